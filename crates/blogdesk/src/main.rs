use crate::prelude::*;
use clap::Parser;

mod articles;
mod client;
mod error;
mod health;
mod prelude;
mod preview;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Manage and preview the articles of a blog through its REST API"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the article API
    #[clap(
        long,
        env = "BLOGDESK_API_URL",
        global = true,
        default_value = client::DEFAULT_API_URL
    )]
    api_url: String,

    /// Request timeout in seconds
    #[clap(long, env = "BLOGDESK_TIMEOUT", global = true, default_value = "30")]
    timeout: u64,

    /// Whether to display additional information.
    #[clap(long, env = "BLOGDESK_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Manage articles (list, get, add, edit, trash)
    Articles(crate::articles::App),

    /// Browse published articles the way readers see them
    Preview(crate::preview::App),

    /// Check that the article API is reachable
    Health(crate::health::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Articles(sub_app) => crate::articles::run(sub_app, app.global).await,
        SubCommands::Preview(sub_app) => crate::preview::run(sub_app, app.global).await,
        SubCommands::Health(sub_app) => crate::health::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
