use blogdesk_core::article::{Article, ArticleId};
use blogdesk_core::listing::{ArticleBoard, Tab};
use blogdesk_core::repository::ArticleRepository;
use blogdesk_core::workflow::{self, Confirmation, TrashOutcome, TRASH_CONFIRMATION_PROMPT};
use colored::Colorize;
use dialoguer::Confirm;

use super::list;
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Args, Clone)]
pub struct TrashOptions {
    /// Article ID
    #[arg(value_name = "ID")]
    pub id: ArticleId,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Tab to show once the article has been moved
    #[arg(long, default_value = "published")]
    pub tab: Tab,
}

/// Ask before anything is sent; `--yes` answers for the user
fn confirm(article: &Article, assume_yes: bool) -> Result<Confirmation> {
    if assume_yes {
        return Ok(Confirmation::Confirmed);
    }

    println!("{} {}", "Article:".bold().cyan(), article.title.bright_white());
    let confirmed = Confirm::new()
        .with_prompt(TRASH_CONFIRMATION_PROMPT)
        .default(false)
        .interact()
        .map_err(|e| eyre!("Failed to read confirmation: {}", e))?;

    Ok(Confirmation::from(confirmed))
}

pub async fn handler<R>(options: TrashOptions, repository: &R) -> Result<()>
where
    R: ArticleRepository + ?Sized,
{
    let mut board = ArticleBoard::new();
    if let Err(message) = board.refresh(repository).await {
        log::debug!("{message}; looking up article {} directly", options.id);
    }
    // The board only holds the first management fetch; older articles need a get.
    let article = match board.find(options.id).cloned() {
        Some(article) => article,
        None => repository.get(options.id).await.map_err(Error::from)?,
    };

    let outcome = match workflow::trash(repository, &article, confirm(&article, options.yes)?).await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            eprintln!("{}", err.to_string().red().bold());
            return Err(Error::from(err).into());
        }
    };

    match outcome {
        TrashOutcome::Cancelled => {
            println!("{}", "Cancelled. Nothing was changed.".yellow());
            Ok(())
        }
        TrashOutcome::Trashed(id) => {
            println!(
                "{}",
                f!("Article \"{}\" ({id}) moved to trash.", article.title).green()
            );
            board.invalidate();
            list::render_board(&mut board, repository, options.tab, false).await
        }
    }
}
