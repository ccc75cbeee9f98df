//! CLI command implementations
//!
//! Commands are organized by screen:
//! - `dashboard` - Spending overview (profile, KPIs, categories, trends, goals)
//! - `filters` - Category and date preset metadata
//! - `goals` - Budget goals for a period
//! - `serve` - Mock API server command
//! - `transactions` - Paged transaction list

pub mod dashboard;
pub mod filters;
pub mod goals;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use dashboard::*;
pub use filters::*;
pub use goals::*;
pub use serve::*;
pub use transactions::*;

use anyhow::{Context, Result};
use serde::Serialize;
use tally_core::ApiClient;
use tracing::debug;

/// Divider under section headers
pub const RULE: &str = "   ─────────────────────────────────────────────────────────────";

/// How command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
}

impl Output {
    /// Print either the rendered text or the view state as JSON
    pub fn emit<T: Serialize>(&self, state: &T, render: impl FnOnce() -> String) -> Result<()> {
        match self {
            Output::Text => println!("{}", render()),
            Output::Json => {
                let json =
                    serde_json::to_string_pretty(state).context("Failed to serialize output")?;
                println!("{}", json);
            }
        }
        Ok(())
    }
}

/// Client for the configured API (HTTP when a URL is given)
pub fn api_client(api_url: Option<&str>, customer_id: i64) -> ApiClient {
    let client = match api_url {
        Some(url) if !url.trim().is_empty() => ApiClient::http(url, customer_id),
        _ => ApiClient::from_env(),
    };
    debug!(api = %tally_core::DashboardApi::describe(&client), "Using API");
    client
}

/// Turn a view-model error message into a command failure
pub fn check(error: Option<&str>) -> Result<()> {
    match error {
        Some(msg) => anyhow::bail!("{}", msg),
        None => Ok(()),
    }
}

/// Truncate a string for display (adds "..." if truncated)
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
