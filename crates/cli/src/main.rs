use std::process::ExitCode;

use anyhow::Result;
use npsdash_core::config::{AppConfig, LoadOptions, LogFormat};
use tracing_subscriber::EnvFilter;

fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.trim()));
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn bootstrap() -> Result<()> {
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);
    Ok(())
}

fn main() -> ExitCode {
    // Config errors are reported again by the command itself as JSON.
    if let Err(error) = bootstrap() {
        eprintln!("npsdash: logging disabled: {error:#}");
    }
    npsdash_cli::run()
}
