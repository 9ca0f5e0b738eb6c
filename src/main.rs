#![deny(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use dxball_shell::common::debug::log_environment;
use dxball_shell::config::AppConfig;
use dxball_shell::font::FontDirectoryCache;
use dxball_shell::x11::X11Platform;
use dxball_shell::{ShellError, app};

#[derive(Parser)]
#[command(name = "dxball-shell")]
#[command(version)]
#[command(about = "Opens a window and draws a line of text with a bundled font", long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let _cli = Cli::parse();

    let working_dir = std::env::current_dir().context("Failed to determine working directory")?;
    log_environment(&working_dir);
    let cache = FontDirectoryCache::from_working_dir()?;

    let config = AppConfig::load().context("Failed to load configuration")?;
    let platform = X11Platform::connect().map_err(ShellError::Initialization)?;

    app::run(&platform, &config, cache)?;
    Ok(())
}
