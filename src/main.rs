// LocalTube - browse a home media server from the terminal
// Fetches the catalog once, then hands everything to the TUI

use anyhow::Result;
use clap::Parser;
use localtube::{logging, ui::App, Config, MediaClient};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "localtube")]
#[command(about = "A terminal video browser for a local media server")]
struct Args {
    /// Media server base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable developer logging (stderr + debug output)
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load config - falls back to defaults if missing
    let mut config = match &args.config {
        Some(path) => Config::load_or_create(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = args.base_url {
        config.server.base_url = base_url;
    }

    // Guard must outlive the UI or the tail of the log is lost
    let _log_guard = logging::init_logging(&config.logging.directory, args.dev)?;
    info!("LocalTube starting against {}", config.server.base_url);

    let client = MediaClient::new(config.server.base_url.clone(), config.server.request_timeout())?;

    println!("📺 LocalTube");
    println!("Loading catalog from {} ...", client.base_url());
    let descriptors = client.fetch_or_empty().await;

    let mut app = App::new(config, client, descriptors)?;
    app.run().await?;
    drop(app);

    info!("LocalTube exiting");
    println!("👋 Bye");
    Ok(())
}
