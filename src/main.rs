//! Findash - financial dashboard client
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use findash::cli::{Cli, Commands};
use findash::config::ConfigManager;
use findash::error::FindashResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> FindashResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let config = config_manager.load().await?;

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug. The config
    // file can raise the floor to info and switch to JSON output.
    let verbose = cli.verbose.max(u8::from(config.general.verbose));
    let filter = match verbose {
        0 => EnvFilter::new("findash=warn"),
        1 => EnvFilter::new("findash=info"),
        _ => EnvFilter::new("findash=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time();
    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    // Dispatch to command
    match cli.command {
        Commands::Login(args) => findash::cli::commands::login(args, &config).await,
        Commands::Logout => findash::cli::commands::logout(&config).await,
        Commands::Status => findash::cli::commands::status(&config).await,
        Commands::Dashboard(args) => findash::cli::commands::dashboard(args, &config).await,
        Commands::Portfolio(args) => findash::cli::commands::portfolio(args, &config).await,
        Commands::Market(args) => findash::cli::commands::market(args, &config).await,
        Commands::Accounts(args) => findash::cli::commands::accounts(args, &config).await,
        Commands::Config(args) => {
            findash::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
