use blogdesk_core::article::{ArticleFields, ArticleStatus};
use blogdesk_core::listing::{ArticleBoard, Tab};
use blogdesk_core::repository::ArticleRepository;
use blogdesk_core::validation::ArticleForm;
use blogdesk_core::workflow::{self, WorkflowError, WorkflowOutcome};
use colored::Colorize;

use super::{format_validation_errors, list, ContentSource};
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Args, Clone)]
pub struct AddOptions {
    /// Article title (minimum 20 characters)
    #[arg(long, short = 't')]
    pub title: Option<String>,

    #[command(flatten)]
    pub content: ContentSource,

    /// Article category (minimum 3 characters)
    #[arg(long, short = 'g')]
    pub category: Option<String>,

    /// Publish immediately instead of saving a draft
    #[arg(long)]
    pub publish: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AddOptions {
    fn status(&self) -> ArticleStatus {
        if self.publish {
            ArticleStatus::Publish
        } else {
            ArticleStatus::Draft
        }
    }

    /// Missing flags become empty fields so validation reports them
    fn fields(&self) -> Result<ArticleFields> {
        Ok(ArticleFields::new(
            self.title.clone().unwrap_or_default(),
            self.content.read()?.unwrap_or_default(),
            self.category.clone().unwrap_or_default(),
        ))
    }
}

pub async fn handler<R>(options: AddOptions, repository: &R) -> Result<()>
where
    R: ArticleRepository + ?Sized,
{
    let fields = options.fields()?;

    match workflow::create(repository, &fields, options.status()).await {
        Ok(outcome) => report_saved(&outcome, repository, options.json).await,
        Err(WorkflowError::Validation(errors)) => {
            eprintln!(
                "{}",
                format_validation_errors(&ArticleForm::from_fields(fields), &errors)
            );
            Err(Error::Validation(errors.to_string()).into())
        }
        Err(err) => {
            eprintln!("{}", err.to_string().red().bold());
            Err(Error::from(err).into())
        }
    }
}

/// Print the confirmation and land on the management listing
pub(super) async fn report_saved<R>(
    outcome: &WorkflowOutcome,
    repository: &R,
    json: bool,
) -> Result<()>
where
    R: ArticleRepository + ?Sized,
{
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    println!("{}", outcome.message.green().bold());

    let mut board = ArticleBoard::new();
    list::render_board(&mut board, repository, Tab::default(), false).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_options(publish: bool) -> AddOptions {
        AddOptions {
            title: Some("Release notes for the spring update".to_string()),
            content: ContentSource {
                content: Some("body".to_string()),
                content_file: None,
            },
            category: None,
            publish,
            json: false,
        }
    }

    #[test]
    fn test_status_from_publish_flag() {
        assert_eq!(create_test_options(true).status(), ArticleStatus::Publish);
        assert_eq!(create_test_options(false).status(), ArticleStatus::Draft);
    }

    #[test]
    fn test_missing_flags_become_empty_fields() {
        let fields = create_test_options(false).fields().unwrap();

        assert_eq!(fields.title, "Release notes for the spring update");
        assert_eq!(fields.content, "body");
        assert_eq!(fields.category, "");
    }
}
