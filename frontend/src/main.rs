//! `me-bau` command line front end

mod cli;

use anyhow::Result;
use clap::Parser;
use me_bau::services::logging;
use me_bau::AppConfig;
use tracing::debug;

use cli::args::Cli;
use cli::commands::{self, Context};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(AppConfig::default_config_path);
    let mut config = AppConfig::load(Some(config_path.as_path()))?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init(level);

    let ctx = Context::new(config, config_path)?;
    debug!("Using service at {}", ctx.api.base_url());
    commands::run(cli.command, &ctx).await
}
