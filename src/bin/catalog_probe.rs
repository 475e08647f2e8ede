// Headless catalog check - fetch, categorize and build a feed without the TUI
// Handy for checking what a server returns before opening the browser

use anyhow::Result;
use clap::Parser;
use localtube::{logging, CatalogEngine, Config, EngineSettings, MediaClient};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "catalog_probe")]
#[command(about = "Print what LocalTube would show for a media server")]
struct Args {
    /// Media server base URL (overrides the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Feed extensions to run after the initial render
    #[arg(long, default_value_t = 0)]
    extend: usize,

    /// Print the summary as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Mirror logs to stderr
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_or_create(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = args.base_url {
        config.server.base_url = base_url;
    }

    let _log_guard = logging::init_logging(&config.logging.directory, args.dev)?;

    let client = MediaClient::new(config.server.base_url.clone(), config.server.request_timeout())?;
    let descriptors = match client.fetch_catalog().await {
        Ok(descriptors) => descriptors,
        Err(e) => {
            if !args.json {
                println!("❌ Fetch failed: {}", e);
            }
            Vec::new()
        }
    };

    let mut engine = CatalogEngine::new(EngineSettings::from(&config));
    engine.load(descriptors);
    for _ in 0..args.extend {
        engine.extend();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&engine.summary())?);
        return Ok(());
    }

    let summary = engine.summary();
    println!("📺 LocalTube catalog probe");
    println!("==========================");
    println!("Server: {}", client.listing_url());
    println!("{}", summary.headline());
    if let Some(badge) = summary.bad_videos_badge() {
        println!("🚫 {}", badge);
    }
    println!();

    match engine.category_nav() {
        Some(nav) => {
            println!("📁 Categories:");
            for entry in nav {
                println!("   {}", entry.label());
            }
        }
        None => println!("📁 Single category, no navigation shown"),
    }

    let bad_videos = engine.bad_videos();
    if !bad_videos.is_empty() {
        println!("\n🚫 Videos without thumbnails: {}", bad_videos.tabs().join("  "));
        for item in bad_videos.visible() {
            println!("   [{}] {} ({})", item.folder, item.title, item.media.file_name());
        }
    }

    let feed = engine.feed();
    println!("\n🎬 Feed ({} cards after {} extensions):", feed.len(), args.extend);
    for entry in feed.iter().take(20) {
        println!(
            "{:>4}. {} [{}] {}",
            entry.display_index,
            entry.title,
            entry.media.category(),
            config.ui.placeholder_duration
        );
    }
    if feed.len() > 20 {
        println!("... and {} more cards", feed.len() - 20);
    }

    Ok(())
}
