use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use gw_cli::commands::{emit, report, serve};
use gw_cli::{Cli, Commands};
use gw_gateway::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match cli.command {
        Some(Commands::Report { log, date, json }) => {
            report::run(&log, date, json).await?;
        }
        Some(Commands::Emit {
            subject,
            name,
            was_playing,
            now_playing,
            log,
        }) => {
            emit::run(
                subject,
                &name,
                was_playing.as_deref(),
                now_playing.as_deref(),
                log.as_deref(),
            )
            .await?;
        }
        Some(Commands::Serve { log }) => {
            let mut config =
                Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");
            if let Some(log) = log {
                config.log_path = log;
            }
            serve::run(config).await?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
