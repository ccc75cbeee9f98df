//! In-process mock API
//!
//! Answers from the fixtures after sleeping for each endpoint's simulated
//! latency. Endpoints can be switched into a failing mode to exercise error
//! handling without a network.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use crate::endpoints::{self, Endpoint, PeriodParams, TransactionParams, TrendsParams};
use crate::error::{Error, Result};
use crate::models::{
    CustomerProfile, FiltersResponse, GoalsResponse, SpendingByCategory, SpendingSummary,
    SpendingTrends, TransactionsResponse,
};

use super::DashboardApi;

/// Mock API backed by the fixtures
///
/// Clones share failure switches and call counters.
#[derive(Clone, Debug)]
pub struct MockApi {
    latency_scale: f64,
    failing: Arc<RwLock<HashSet<Endpoint>>>,
    calls: Arc<RwLock<HashMap<Endpoint, usize>>>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    /// Mock with the reference latencies
    pub fn new() -> Self {
        Self {
            latency_scale: 1.0,
            failing: Arc::new(RwLock::new(HashSet::new())),
            calls: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Mock that answers immediately
    pub fn instant() -> Self {
        Self::new().with_latency_scale(0.0)
    }

    /// Multiply every endpoint latency (0 disables the delay)
    pub fn with_latency_scale(mut self, scale: f64) -> Self {
        self.latency_scale = if scale.is_finite() { scale.max(0.0) } else { 1.0 };
        self
    }

    /// Make an endpoint reject every request until `recover` is called
    pub fn fail(&self, endpoint: Endpoint) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(endpoint);
        }
    }

    pub fn recover(&self, endpoint: Endpoint) {
        if let Ok(mut failing) = self.failing.write() {
            failing.remove(&endpoint);
        }
    }

    /// Number of requests an endpoint has received
    pub fn call_count(&self, endpoint: Endpoint) -> usize {
        self.calls
            .read()
            .ok()
            .and_then(|calls| calls.get(&endpoint).copied())
            .unwrap_or(0)
    }

    async fn respond<T>(&self, endpoint: Endpoint, answer: impl FnOnce() -> T) -> Result<T> {
        if let Ok(mut calls) = self.calls.write() {
            *calls.entry(endpoint).or_insert(0) += 1;
        }

        if self.latency_scale > 0.0 {
            let delay = endpoint.latency().mul_f64(self.latency_scale);
            debug!(%endpoint, ?delay, "Simulating latency");
            tokio::time::sleep(delay).await;
        }

        let failing = self
            .failing
            .read()
            .map(|f| f.contains(&endpoint))
            .unwrap_or(false);
        if failing {
            return Err(Error::Simulated(endpoint));
        }

        Ok(answer())
    }
}

#[async_trait]
impl DashboardApi for MockApi {
    async fn profile(&self) -> Result<CustomerProfile> {
        self.respond(Endpoint::Profile, endpoints::profile).await
    }

    async fn summary(&self, params: &PeriodParams) -> Result<SpendingSummary> {
        self.respond(Endpoint::Summary, || endpoints::summary(params))
            .await
    }

    async fn categories(&self, params: &PeriodParams) -> Result<SpendingByCategory> {
        self.respond(Endpoint::Categories, || endpoints::categories(params))
            .await
    }

    async fn trends(&self, params: &TrendsParams) -> Result<SpendingTrends> {
        self.respond(Endpoint::Trends, || endpoints::trends(params))
            .await
    }

    async fn transactions(&self, params: &TransactionParams) -> Result<TransactionsResponse> {
        self.respond(Endpoint::Transactions, || endpoints::transactions(params))
            .await
    }

    async fn goals(&self, params: &PeriodParams) -> Result<GoalsResponse> {
        self.respond(Endpoint::Goals, || endpoints::goals(params))
            .await
    }

    async fn filters(&self) -> Result<FiltersResponse> {
        self.respond(Endpoint::Filters, endpoints::filters).await
    }

    fn describe(&self) -> String {
        format!("in-process mock (latency x{})", self.latency_scale)
    }
}
