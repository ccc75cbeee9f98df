//! View-models for the dashboard screens
//!
//! Each view-model is a plain state machine plus an async handle that drives
//! it against a [`DashboardApi`](crate::client::DashboardApi):
//!
//! - `begin_*` records the request, bumps the generation counter and returns a
//!   [`Ticket`] describing what to fetch
//! - `settle` applies a result only if its ticket is still the latest one;
//!   superseded responses are dropped and reported as [`Settled::Stale`]
//!
//! Handles keep the state behind a mutex that is never held across an await,
//! so a parameter change can be issued while an earlier fetch is in flight.

mod dashboard;
mod goals;
mod transactions;

pub use dashboard::{Dashboard, DashboardBatch, DashboardFetch, DashboardState, DASHBOARD_ERROR};
pub use goals::{Goals, GoalsState, GOALS_ERROR};
pub use transactions::{PageRequest, Transactions, TransactionsState, PAGE_SIZE, TRANSACTIONS_ERROR};

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::warn;

/// Where a view-model is in its fetch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// First fetch in flight, nothing to show
    Loading,
    /// Re-fetch in flight while the previous result is still shown
    Refreshing,
    Ready,
    Failed,
}

impl LoadPhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Loading | Self::Refreshing)
    }
}

/// Handle for one issued request
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket<P> {
    generation: u64,
    params: P,
}

impl<P> Ticket<P> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn params(&self) -> &P {
        &self.params
    }
}

/// Outcome of settling a ticket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    /// A newer request was issued; the result was dropped
    Stale,
}

/// Generation counter, phase and error message shared by every view-model
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    #[serde(skip)]
    generation: u64,
    phase: LoadPhase,
    error: Option<String>,
}

impl Lifecycle {
    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a request, superseding any in flight
    fn issue<P>(&mut self, has_data: bool, params: P) -> Ticket<P> {
        self.generation += 1;
        self.phase = if has_data {
            LoadPhase::Refreshing
        } else {
            LoadPhase::Loading
        };
        self.error = None;
        Ticket {
            generation: self.generation,
            params,
        }
    }

    fn is_current<P>(&self, ticket: &Ticket<P>) -> bool {
        ticket.generation == self.generation
    }

    /// Record the outcome of a current ticket; returns whether it succeeded
    fn finish<T, E: std::fmt::Display>(
        &mut self,
        result: &std::result::Result<T, E>,
        message: &str,
    ) -> bool {
        match result {
            Ok(_) => {
                self.phase = LoadPhase::Ready;
                true
            }
            Err(e) => {
                warn!(error = %e, "{}", message);
                self.phase = LoadPhase::Failed;
                self.error = Some(message.to_string());
                false
            }
        }
    }
}

fn lock<T>(state: &Mutex<T>) -> MutexGuard<'_, T> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}
