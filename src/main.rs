use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsdesk::app::AppContext;
use newsdesk::cli::{commands, Cli, Commands};
use newsdesk::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they stay out of printed headlines
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(api_key) = cli.api_key {
        config.api.api_key = api_key;
    }
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let ctx = AppContext::new(config, None)?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            newsdesk::tui::run(Arc::new(ctx)).await?;
        }
        Commands::Headlines { choice, json } => {
            commands::headlines(&ctx, &choice, json).await?;
        }
        Commands::Settings { choice } => {
            commands::settings(&ctx, &choice)?;
        }
    }

    Ok(())
}
