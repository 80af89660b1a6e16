use blogdesk_core::article::ArticleId;
use blogdesk_core::repository::ArticleRepository;

use super::display_article;
use crate::prelude::{println, *};

#[derive(Debug, clap::Args, Clone)]
pub struct GetOptions {
    /// Article ID
    #[arg(value_name = "ID")]
    pub id: ArticleId,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handler<R>(options: GetOptions, repository: &R) -> Result<()>
where
    R: ArticleRepository + ?Sized,
{
    let article = repository.get(options.id).await.map_err(Error::from)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&article)?);
    } else {
        display_article(&article);
    }

    Ok(())
}
