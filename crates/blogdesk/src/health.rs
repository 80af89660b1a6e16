use blogdesk_core::repository::{ApiInfo, ArticleRepository, HealthStatus};
use colored::Colorize;
use serde::Serialize;

use crate::client::HttpArticleRepository;
use crate::prelude::{println, *};

#[derive(Debug, clap::Parser)]
#[command(name = "health")]
#[command(about = "Check that the article API is reachable")]
pub struct App {
    /// Also list the endpoints the API advertises
    #[arg(long)]
    pub endpoints: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Health check plus the API description, when the API serves one
#[derive(Debug, Serialize)]
struct HealthReport {
    health: HealthStatus,
    info: Option<ApiInfo>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let repository = HttpArticleRepository::from_global(&global)?;
    let health = repository.health().await.map_err(Error::from)?;

    // The API description is optional; a failure here does not fail the check.
    let info = match repository.info().await {
        Ok(info) => Some(info),
        Err(err) => {
            log::debug!("API info unavailable: {err}");
            None
        }
    };

    let report = HealthReport { health, info };

    if app.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!(
            "{}",
            format_health(&report, repository.base_url(), app.endpoints)
        );
    }

    Ok(())
}

fn format_health(report: &HealthReport, base_url: &str, endpoints: bool) -> String {
    let health = &report.health;
    let status = if health.status.eq_ignore_ascii_case("ok") {
        health.status.green().bold()
    } else {
        health.status.yellow().bold()
    };

    let mut result = if health.message.is_empty() {
        f!("{} {}\n", status, base_url.bright_black())
    } else {
        f!("{} {} ({})\n", status, health.message, base_url.bright_black())
    };

    let Some(info) = &report.info else {
        return result;
    };

    if !info.version.is_empty() {
        result.push_str(&f!(
            "{} {}\n",
            info.message.bright_white(),
            f!("v{}", info.version).bright_cyan()
        ));
    }

    if endpoints && !info.endpoints.is_empty() {
        let mut table = new_table();
        table.add_row(prettytable::row![
            "Endpoint".bold().cyan(),
            "Route".bold().cyan()
        ]);
        for (name, route) in &info.endpoints {
            table.add_row(prettytable::row![name, route.bright_white().to_string()]);
        }
        result.push('\n');
        result.push_str(&table.to_string());
    }

    result
}
