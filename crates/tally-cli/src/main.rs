//! Tally CLI - Personal spending dashboard
//!
//! Usage:
//!   tally serve --port 3000          Start the mock API server
//!   tally dashboard --period 90d     Show the spending overview
//!   tally transactions --sort amount_desc --category Dining
//!   tally goals --period 7d          Show budget goals

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let output = if cli.json {
        commands::Output::Json
    } else {
        commands::Output::Text
    };

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
            no_latency,
            fail,
        } => {
            commands::cmd_serve(
                &host,
                port,
                static_dir.as_deref(),
                no_latency,
                fail.as_deref(),
            )
            .await
        }
        Commands::Dashboard { period } => {
            let api = commands::api_client(cli.api_url.as_deref(), cli.customer);
            commands::cmd_dashboard(api, period, output).await
        }
        Commands::Transactions {
            sort,
            category,
            pages,
        } => {
            let api = commands::api_client(cli.api_url.as_deref(), cli.customer);
            commands::cmd_transactions(api, sort, category.as_deref(), pages, output).await
        }
        Commands::Goals { period } => {
            let api = commands::api_client(cli.api_url.as_deref(), cli.customer);
            commands::cmd_goals(api, period, output).await
        }
        Commands::Filters => {
            let api = commands::api_client(cli.api_url.as_deref(), cli.customer);
            commands::cmd_filters(api, output).await
        }
    }
}
