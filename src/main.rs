mod catalog;
mod core;
#[cfg(test)]
mod test_support;
mod tui;

use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use crate::core::config;
use crate::core::nav::Menu;

#[derive(Parser)]
#[command(name = "reel", about = "Browse and search movies from your terminal")]
struct Args {
    /// Menu category to open on start
    #[arg(short, long, value_enum)]
    menu: Option<Menu>,

    /// Override the TMDB API base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to reel.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("reel.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring unreadable config: {}", e);
            config::ReelConfig::default()
        }
    };
    let resolved = config::resolve(&file_config, args.menu, args.base_url.as_deref());

    log::info!(
        "Reel starting up: menu={:?}, base_url={}",
        resolved.start_menu,
        resolved.base_url
    );
    if resolved.api_key.is_none() {
        log::warn!("No TMDB API key configured; catalog requests will fail");
    }

    tui::run(resolved)
}
