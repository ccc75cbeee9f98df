//! Budget goals for a period

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::debug;

use crate::client::DashboardApi;
use crate::endpoints::PeriodParams;
use crate::error::Result;
use crate::models::{GoalsResponse, Period, SpendingGoal};

use super::{lock, Lifecycle, LoadPhase, Settled, Ticket};

pub const GOALS_ERROR: &str = "Failed to load goals.";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsState {
    /// Selected period
    pub period: Period,
    /// Period the shown goals were scaled to
    pub loaded_period: Option<Period>,
    pub goals: Option<Vec<SpendingGoal>>,
    #[serde(flatten)]
    lifecycle: Lifecycle,
}

impl GoalsState {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.lifecycle.phase()
    }

    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }

    pub fn begin_load(&mut self) -> Ticket<Period> {
        self.lifecycle.issue(self.goals.is_some(), self.period)
    }

    /// Returns `None` when the period is unchanged and did not fail
    pub fn begin_period(&mut self, period: Period) -> Option<Ticket<Period>> {
        if period == self.period && self.phase() != LoadPhase::Failed {
            return None;
        }
        self.period = period;
        Some(self.begin_load())
    }

    pub fn settle(&mut self, ticket: &Ticket<Period>, result: Result<GoalsResponse>) -> Settled {
        if !self.lifecycle.is_current(ticket) {
            debug!(period = %ticket.params(), "Discarding stale goals response");
            return Settled::Stale;
        }
        if self.lifecycle.finish(&result, GOALS_ERROR) {
            if let Ok(response) = result {
                self.goals = Some(response.goals);
                self.loaded_period = Some(*ticket.params());
            }
        }
        Settled::Applied
    }
}

/// Async driver for [`GoalsState`]
#[derive(Clone)]
pub struct Goals {
    api: Arc<dyn DashboardApi>,
    state: Arc<Mutex<GoalsState>>,
}

impl Goals {
    pub fn new(api: impl DashboardApi + 'static, period: Period) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(GoalsState::new(period))),
        }
    }

    pub fn snapshot(&self) -> GoalsState {
        lock(&self.state).clone()
    }

    pub async fn load(&self) -> Settled {
        let ticket = lock(&self.state).begin_load();
        self.complete(ticket).await
    }

    pub async fn set_period(&self, period: Period) -> Option<Settled> {
        let ticket = lock(&self.state).begin_period(period)?;
        Some(self.complete(ticket).await)
    }

    async fn complete(&self, ticket: Ticket<Period>) -> Settled {
        let params = PeriodParams::of(*ticket.params());
        let result = self.api.goals(&params).await;
        lock(&self.state).settle(&ticket, result)
    }
}
