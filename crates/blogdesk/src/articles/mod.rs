pub mod add;
pub mod edit;
pub mod get;
pub mod list;
pub mod trash;

use blogdesk_core::article::{
    character_counter, format_short_date, Article, ArticleStatus, CONTENT_DISPLAY_LIMIT,
    TITLE_DISPLAY_LIMIT,
};
use blogdesk_core::validation::{ArticleForm, Field, ValidationResult};
use colored::{ColoredString, Colorize};
use std::path::PathBuf;

use crate::client::HttpArticleRepository;
use crate::prelude::{println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "articles")]
#[command(about = "Manage articles (list, get, add, edit, trash)")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// List articles under a status tab
    #[clap(name = "list")]
    List(list::ListOptions),

    /// Show a single article
    #[clap(name = "get")]
    Get(get::GetOptions),

    /// Create a new article, as a draft or published
    #[clap(name = "add")]
    Add(add::AddOptions),

    /// Edit an existing article
    #[clap(name = "edit")]
    Edit(edit::EditOptions),

    /// Move an article to the trash
    #[clap(name = "trash")]
    Trash(trash::TrashOptions),
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let repository = HttpArticleRepository::from_global(&global)?;

    match app.command {
        Commands::List(options) => list::handler(options, &repository).await,
        Commands::Get(options) => get::handler(options, &repository).await,
        Commands::Add(options) => add::handler(options, &repository).await,
        Commands::Edit(options) => edit::handler(options, &repository).await,
        Commands::Trash(options) => trash::handler(options, &repository).await,
    }
}

/// Article body given either inline or as a file
#[derive(Debug, Clone, clap::Args)]
pub struct ContentSource {
    /// Article content (minimum 200 characters)
    #[arg(long, short = 'c', conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the article content from a file
    #[arg(long, value_name = "PATH")]
    pub content_file: Option<PathBuf>,
}

impl ContentSource {
    /// Resolve the content, if one was given
    pub fn read(&self) -> Result<Option<String>> {
        match (&self.content, &self.content_file) {
            (Some(content), _) => Ok(Some(content.clone())),
            (None, Some(path)) => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("Failed to read content file {}", path.display())),
            (None, None) => Ok(None),
        }
    }
}

pub fn status_colored(status: ArticleStatus) -> ColoredString {
    match status {
        ArticleStatus::Publish => status.as_str().green(),
        ArticleStatus::Draft => status.as_str().yellow(),
        ArticleStatus::Thrash => status.as_str().red(),
    }
}

/// Render validation failures next to the value each field currently holds
pub fn format_validation_errors(form: &ArticleForm, errors: &ValidationResult) -> String {
    let mut result = String::new();

    result.push_str(&format!(
        "{}\n",
        "The article was not saved:".red().bold()
    ));

    for error in errors.errors() {
        result.push_str(&format!(
            "  {}: {}\n",
            error.field.name().yellow(),
            error.message().red()
        ));
    }

    result.push_str(&format!(
        "\n  {}: {}\n",
        "title".bright_black(),
        character_counter(&form.fields().title, TITLE_DISPLAY_LIMIT)
    ));
    result.push_str(&format!(
        "  {}: {}\n",
        "content".bright_black(),
        character_counter(&form.fields().content, CONTENT_DISPLAY_LIMIT)
    ));
    if errors.get(Field::Category).is_some() {
        result.push_str(&format!(
            "  {}: {:?}\n",
            "category".bright_black(),
            form.fields().category
        ));
    }

    result
}

/// Display an article's details as a formatted CLI table
fn display_article(article: &Article) {
    println!("\n{}\n", article.title.bold().bright_white());

    let mut table = new_table();
    table.add_row(prettytable::row![
        "ID".bold().cyan(),
        article.id.to_string()
    ]);
    table.add_row(prettytable::row![
        "Status".bold().cyan(),
        status_colored(article.status).to_string()
    ]);
    table.add_row(prettytable::row![
        "Category".bold().cyan(),
        article.category.bright_blue().to_string()
    ]);
    table.add_row(prettytable::row![
        "Created".bold().cyan(),
        format_short_date(&article.created_date)
    ]);
    if let Some(updated) = &article.updated_date {
        table.add_row(prettytable::row![
            "Updated".bold().cyan(),
            format_short_date(updated)
        ]);
    }
    table.printstd();

    println!("\n{}", "Content:".bold().cyan());
    println!("{}", article.content);
    println!(
        "\n{}",
        character_counter(&article.content, CONTENT_DISPLAY_LIMIT).bright_black()
    );
}
