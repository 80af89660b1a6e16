use blogdesk_core::article::{excerpt, format_long_date, PREVIEW_EXCERPT_LENGTH};
use blogdesk_core::pagination::{load_preview_page, PreviewPage, PREVIEW_PAGE_SIZE};
use colored::Colorize;

use crate::client::HttpArticleRepository;
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "preview")]
#[command(about = "Browse published articles the way readers see them")]
pub struct App {
    /// Page number (1-indexed)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let repository = HttpArticleRepository::from_global(&global)?;

    if global.verbose {
        eprintln!("Fetching preview page {}...", app.page);
    }

    let preview = match load_preview_page(&repository, app.page, PREVIEW_PAGE_SIZE).await {
        Ok(preview) => preview,
        Err(message) => {
            anstream::eprint!("{}", format_fetch_failure(&message, app.page));
            return Err(eyre!(message));
        }
    };

    if app.json {
        println!("{}", format_preview_json(&preview)?);
    } else {
        print!("{}", format_preview_text(&preview));
    }

    Ok(())
}

/// Fixed fetch error followed by the command that retries it
fn format_fetch_failure(message: &str, page: usize) -> String {
    f!(
        "{}\n{}\n",
        message.red().bold(),
        f!("Retry with: blogdesk preview --page {page}").bright_black()
    )
}

fn format_preview_json(preview: &PreviewPage) -> Result<String> {
    serde_json::to_string_pretty(preview).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Render article cards followed by the page navigation
fn format_preview_text(preview: &PreviewPage) -> String {
    let mut result = String::new();
    let pagination = &preview.pagination;

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!(
            "LATEST ARTICLES (Page {} of {})",
            pagination.current_page, pagination.total_pages
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if preview.articles.is_empty() {
        result.push_str(&f!("\n{}\n", "No published articles yet.".yellow()));
    }

    for article in &preview.articles {
        result.push_str(&f!(
            "\n{} {} {}\n",
            article.category.to_uppercase().bright_blue().bold(),
            "·".bright_black(),
            format_long_date(&article.created_date).bright_black()
        ));
        result.push_str(&f!("{}\n", article.title.white().bold()));
        result.push_str(&f!(
            "    {}\n",
            excerpt(&article.content, PREVIEW_EXCERPT_LENGTH)
        ));
    }

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_yellow()));
    result.push_str(&f!("{}\n", "NAVIGATION".bright_yellow().bold()));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_yellow()));

    result.push_str(&f!(
        "\n{} {} {} {} ({} {})\n",
        "Showing page".bright_white(),
        pagination.current_page.to_string().bright_cyan().bold(),
        "of".bright_white(),
        pagination.total_pages.to_string().bright_cyan().bold(),
        pagination.total_published.to_string().bright_cyan().bold(),
        "published articles".bright_white()
    ));

    if pagination.next_page_command.is_some() || pagination.prev_page_command.is_some() {
        result.push_str(&f!("\n{}:\n", "To navigate".bright_white().bold()));
    }
    if let Some(command) = &pagination.next_page_command {
        result.push_str(&f!("  {}: {}\n", "Next page".green(), command.cyan()));
    }
    if let Some(command) = &pagination.prev_page_command {
        result.push_str(&f!("  {}: {}\n", "Previous page".green(), command.cyan()));
    }
    if pagination.total_pages > 1 {
        result.push_str(&f!(
            "  {}: {}\n",
            "Jump to page".green(),
            f!("blogdesk preview --page <1-{}>", pagination.total_pages).cyan()
        ));
    }

    result.push_str(&f!(
        "\n{}:\n",
        "To get JSON output".bright_white().bold()
    ));
    result.push_str(&f!(
        "  {}\n",
        f!("blogdesk preview --page {} --json", pagination.current_page).cyan()
    ));

    result.push('\n');
    result
}
