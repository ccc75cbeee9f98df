//! Tally Core Library
//!
//! Shared functionality for the Tally spending dashboard:
//! - Read-only fixture data (profile, summaries, ledger, goals)
//! - Period scaling of 30-day baseline figures
//! - Transaction query engine (filter, sort, paginate)
//! - Mock endpoint layer with parameter defaulting
//! - API clients (in-process mock, HTTP)
//! - View-models with last-request-wins settling
//! - Display formatting

pub mod client;
pub mod endpoints;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod models;
pub mod period;
pub mod query;
pub mod views;

pub use client::{ApiClient, DashboardApi, HttpApi, MockApi};
pub use endpoints::{Endpoint, PeriodParams, TransactionParams, TrendsParams};
pub use error::{Error, Result};
pub use fixtures::{fixtures, CUSTOMER_ID};
pub use models::*;
pub use query::TransactionQuery;
pub use views::{
    Dashboard, DashboardState, Goals, GoalsState, LoadPhase, Settled, Transactions,
    TransactionsState,
};
