pub mod args;
pub mod handlers;
pub mod output;

use crate::args::Cli;
use anyhow::Result;
use clap::Parser;
use csync::domain::config::AppConfig;
use csync::kernel::config::load_config;
use csync_logger::Logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: AppConfig = load_config(cli.connection.config.as_deref())?;
    let _logger = Logger::from_config(env!("CARGO_PKG_NAME"), &config.log)?;
    let api = cli.connection.apply(config.api);

    handlers::run(cli.command, api)
}
