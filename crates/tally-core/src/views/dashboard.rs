//! Dashboard overview: profile, summary, category breakdown and trends

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, info};

use crate::client::DashboardApi;
use crate::endpoints::{PeriodParams, TrendsParams, DEFAULT_TREND_MONTHS};
use crate::error::Result;
use crate::models::{CustomerProfile, Period, SpendingByCategory, SpendingSummary, SpendingTrends};

use super::{lock, Lifecycle, LoadPhase, Settled, Ticket};

pub const DASHBOARD_ERROR: &str = "Failed to load dashboard data.";

/// What one dashboard batch fetches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardFetch {
    pub period: Period,
    pub include_profile: bool,
}

impl DashboardFetch {
    /// Months of trend history shown for a period
    pub fn trend_months(&self) -> usize {
        self.period.trend_months().max(DEFAULT_TREND_MONTHS)
    }

    /// Issue every request of the batch in parallel; any failure fails the batch
    pub async fn run(&self, api: &dyn DashboardApi) -> Result<DashboardBatch> {
        let period = PeriodParams::of(self.period);
        let trends = TrendsParams::months(self.trend_months());

        if self.include_profile {
            let (profile, summary, categories, trends) = tokio::try_join!(
                api.profile(),
                api.summary(&period),
                api.categories(&period),
                api.trends(&trends),
            )?;
            Ok(DashboardBatch {
                profile: Some(profile),
                summary,
                categories,
                trends,
            })
        } else {
            let (summary, categories, trends) = tokio::try_join!(
                api.summary(&period),
                api.categories(&period),
                api.trends(&trends),
            )?;
            Ok(DashboardBatch {
                profile: None,
                summary,
                categories,
                trends,
            })
        }
    }
}

/// Result of a dashboard batch
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardBatch {
    pub profile: Option<CustomerProfile>,
    pub summary: SpendingSummary,
    pub categories: SpendingByCategory,
    pub trends: SpendingTrends,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    /// Selected period
    pub period: Period,
    /// Period the shown figures belong to
    pub loaded_period: Option<Period>,
    pub profile: Option<CustomerProfile>,
    pub summary: Option<SpendingSummary>,
    pub categories: Option<SpendingByCategory>,
    pub trends: Option<SpendingTrends>,
    #[serde(flatten)]
    lifecycle: Lifecycle,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Period::default())
    }
}

impl DashboardState {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            loaded_period: None,
            profile: None,
            summary: None,
            categories: None,
            trends: None,
            lifecycle: Lifecycle::default(),
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.lifecycle.phase()
    }

    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }

    fn has_data(&self) -> bool {
        self.summary.is_some()
    }

    /// Initial load of everything
    pub fn begin_mount(&mut self) -> Ticket<DashboardFetch> {
        let fetch = DashboardFetch {
            period: self.period,
            include_profile: true,
        };
        self.lifecycle.issue(self.has_data(), fetch)
    }

    /// Switch period and re-fetch the period-sensitive data
    ///
    /// Returns `None` when the period is unchanged, unless the last request
    /// for it failed. The profile is only re-requested if no profile has been
    /// loaded yet.
    pub fn begin_period(&mut self, period: Period) -> Option<Ticket<DashboardFetch>> {
        if period == self.period && self.phase() != LoadPhase::Failed {
            return None;
        }
        self.period = period;
        let fetch = DashboardFetch {
            period,
            include_profile: self.profile.is_none(),
        };
        Some(self.lifecycle.issue(self.has_data(), fetch))
    }

    pub fn settle(
        &mut self,
        ticket: &Ticket<DashboardFetch>,
        result: Result<DashboardBatch>,
    ) -> Settled {
        if !self.lifecycle.is_current(ticket) {
            debug!(
                generation = ticket.generation(),
                period = %ticket.params().period,
                "Discarding stale dashboard response"
            );
            return Settled::Stale;
        }
        if self.lifecycle.finish(&result, DASHBOARD_ERROR) {
            if let Ok(batch) = result {
                if batch.profile.is_some() {
                    self.profile = batch.profile;
                }
                self.summary = Some(batch.summary);
                self.categories = Some(batch.categories);
                self.trends = Some(batch.trends);
                self.loaded_period = Some(ticket.params().period);
            }
        }
        Settled::Applied
    }
}

/// Async driver for [`DashboardState`]
#[derive(Clone)]
pub struct Dashboard {
    api: Arc<dyn DashboardApi>,
    state: Arc<Mutex<DashboardState>>,
}

impl Dashboard {
    pub fn new(api: impl DashboardApi + 'static, period: Period) -> Self {
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(DashboardState::new(period))),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        lock(&self.state).clone()
    }

    pub async fn mount(&self) -> Settled {
        let ticket = lock(&self.state).begin_mount();
        info!(period = %ticket.params().period, "Loading dashboard");
        self.complete(ticket).await
    }

    /// Returns `None` if the period did not change
    pub async fn set_period(&self, period: Period) -> Option<Settled> {
        let ticket = lock(&self.state).begin_period(period)?;
        debug!(%period, "Dashboard period changed");
        Some(self.complete(ticket).await)
    }

    async fn complete(&self, ticket: Ticket<DashboardFetch>) -> Settled {
        let result = ticket.params().run(self.api.as_ref()).await;
        lock(&self.state).settle(&ticket, result)
    }
}
