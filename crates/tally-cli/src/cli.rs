//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tally_core::models::{Period, SortBy};

/// Tally - See where your money goes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal spending dashboard backed by a mock API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Base URL of a running `tally serve` (uses the in-process mock when unset)
    #[arg(long, env = "TALLY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Customer id used in API paths
    #[arg(long, env = "TALLY_CUSTOMER_ID", default_value_t = tally_core::CUSTOMER_ID, global = true)]
    pub customer: i64,

    /// Print view state as JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the mock API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Answer immediately instead of simulating latency
        #[arg(long)]
        no_latency: bool,

        /// Endpoints that should fail with 503 (comma-separated, e.g. "goals,trends")
        #[arg(long)]
        fail: Option<String>,
    },

    /// Show the spending overview: summary, categories, trends and goals
    Dashboard {
        /// Period: 7d, 30d, 90d or 1y
        #[arg(short, long, default_value = "30d")]
        period: Period,
    },

    /// List transactions
    Transactions {
        /// Sort order: date_desc, date_asc, amount_desc, amount_asc
        #[arg(short, long, default_value = "date_desc")]
        sort: SortBy,

        /// Only show one category
        #[arg(short, long)]
        category: Option<String>,

        /// Number of pages to load
        #[arg(long, default_value = "1")]
        pages: usize,
    },

    /// Show budget goals
    Goals {
        /// Period: 7d, 30d, 90d or 1y
        #[arg(short, long, default_value = "30d")]
        period: Period,
    },

    /// List categories and date presets
    Filters,
}
