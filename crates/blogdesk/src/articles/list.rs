use blogdesk_core::article::format_short_date;
use blogdesk_core::listing::{ArticleBoard, ListingOutput, Tab};
use blogdesk_core::repository::ArticleRepository;
use colored::Colorize;

use super::status_colored;
use crate::prelude::{eprintln, println, *};

#[derive(Debug, clap::Args, Clone)]
pub struct ListOptions {
    /// Status tab: published, draft, thrash, all
    #[arg(long, value_name = "TAB", default_value = "published")]
    pub tab: Tab,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn handler<R>(options: ListOptions, repository: &R) -> Result<()>
where
    R: ArticleRepository + ?Sized,
{
    let mut board = ArticleBoard::new();
    render_board(&mut board, repository, options.tab, options.json).await
}

/// Refresh the board and print one tab of it
///
/// Shared by every command that lands back on the listing after it is done.
pub async fn render_board<R>(
    board: &mut ArticleBoard,
    repository: &R,
    tab: Tab,
    json: bool,
) -> Result<()>
where
    R: ArticleRepository + ?Sized,
{
    if let Err(message) = board.refresh(repository).await {
        eprintln!("{}", message.red().bold());
        eprintln!(
            "{}",
            format!("Retry with: blogdesk articles list --tab {tab}").bright_black()
        );
        return Err(eyre!(message));
    }

    let listing = board.listing(tab);

    if json {
        println!("{}", format_listing_json(&listing)?);
    } else {
        print!("{}", format_listing_text(&listing));
    }

    Ok(())
}

fn format_listing_json(listing: &ListingOutput) -> Result<String> {
    serde_json::to_string_pretty(listing).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Render the tab bar with counts, then the articles under the selected tab
fn format_listing_text(listing: &ListingOutput) -> String {
    let mut result = String::new();

    let tabs = Tab::ALL
        .iter()
        .map(|tab| {
            let label = f!("{} ({})", tab, listing.counts.for_tab(*tab));
            if tab.as_str() == listing.tab {
                label.bright_cyan().bold().underline().to_string()
            } else {
                label.bright_black().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");

    result.push_str(&f!("\n{}\n", "=".repeat(80).bright_cyan()));
    result.push_str(&f!("{}\n", "ARTICLES".bright_cyan().bold()));
    result.push_str(&f!("{}\n", tabs));
    result.push_str(&f!("{}\n", "=".repeat(80).bright_cyan()));

    if listing.articles.is_empty() {
        result.push_str(&f!(
            "\n{}\n",
            f!("No articles under {}.", listing.tab).yellow()
        ));
    } else {
        let mut table = new_table();
        table.add_row(prettytable::row![
            "ID".bold().cyan(),
            "Title".bold().cyan(),
            "Category".bold().cyan(),
            "Status".bold().cyan(),
            "Created".bold().cyan()
        ]);
        for article in &listing.articles {
            table.add_row(prettytable::row![
                article.id.to_string(),
                article.title.bright_white().to_string(),
                article.category.bright_blue().to_string(),
                status_colored(article.status).to_string(),
                format_short_date(&article.created_date)
            ]);
        }
        result.push('\n');
        result.push_str(&table.to_string());
    }

    result.push_str(&f!("\n{}:\n", "Actions".bright_white().bold()));
    result.push_str(&f!(
        "  {}: {}\n",
        "Edit".green(),
        "blogdesk articles edit <id>".cyan()
    ));
    result.push_str(&f!(
        "  {}: {}\n",
        "Trash".green(),
        "blogdesk articles trash <id>".cyan()
    ));
    result.push_str(&f!(
        "  {}: {}\n",
        "Other tabs".green(),
        "blogdesk articles list --tab <tab>  (published, draft, thrash, all)".cyan()
    ));

    result.push('\n');
    result
}
