use blogdesk_core::article::{ArticleId, ArticleStatus};
use blogdesk_core::listing::{ArticleBoard, Tab};
use blogdesk_core::repository::{ArticleRepository, RepositoryError};
use blogdesk_core::validation::Field;
use blogdesk_core::workflow::{EditSession, WorkflowError};
use colored::Colorize;

use super::{add::report_saved, format_validation_errors, list, ContentSource};
use crate::prelude::{eprintln, *};

#[derive(Debug, clap::Args, Clone)]
pub struct EditOptions {
    /// Article ID
    #[arg(value_name = "ID")]
    pub id: ArticleId,

    /// New title (minimum 20 characters)
    #[arg(long, short = 't')]
    pub title: Option<String>,

    #[command(flatten)]
    pub content: ContentSource,

    /// New category (minimum 3 characters)
    #[arg(long, short = 'g')]
    pub category: Option<String>,

    /// New status: draft, publish, thrash. Keeps the current status if omitted
    #[arg(long, short = 's')]
    pub status: Option<ArticleStatus>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl EditOptions {
    /// Field values given on the command line, in form order
    fn edits(&self) -> Result<Vec<(Field, String)>> {
        let mut edits = Vec::new();
        if let Some(title) = &self.title {
            edits.push((Field::Title, title.clone()));
        }
        if let Some(content) = self.content.read()? {
            edits.push((Field::Content, content));
        }
        if let Some(category) = &self.category {
            edits.push((Field::Category, category.clone()));
        }
        Ok(edits)
    }
}

pub async fn handler<R>(options: EditOptions, repository: &R) -> Result<()>
where
    R: ArticleRepository + ?Sized,
{
    let selected = match repository.get(options.id).await {
        Ok(article) => Some(article),
        Err(RepositoryError::NotFound(_)) => None,
        Err(err) => return Err(Error::from(err).into()),
    };

    let mut session = match EditSession::open(selected) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{}", f!("{err} (article {})", options.id).yellow().bold());
            let mut board = ArticleBoard::new();
            return list::render_board(&mut board, repository, Tab::default(), false).await;
        }
    };

    for (field, value) in options.edits()? {
        session.form_mut().edit(field, value);
    }
    let status = options.status.unwrap_or(session.article().status);

    match session.submit(repository, status).await {
        Ok(outcome) => report_saved(&outcome, repository, options.json).await,
        Err(WorkflowError::Validation(errors)) => {
            eprintln!("{}", format_validation_errors(session.form(), &errors));
            Err(Error::Validation(errors.to_string()).into())
        }
        Err(err) => {
            eprintln!("{}", err.to_string().red().bold());
            Err(Error::from(err).into())
        }
    }
}
