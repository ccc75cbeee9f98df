//! Dashboard API clients
//!
//! # Architecture
//!
//! - `DashboardApi` trait: one async method per mock endpoint
//! - `ApiClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Implementations: `MockApi` (in-process, simulated latency) and
//!   `HttpApi` (a running `tally serve` instance)
//!
//! # Configuration
//!
//! Environment variables:
//! - `TALLY_API_URL`: Base URL of a tally server. When unset the in-process mock is used.
//! - `TALLY_CUSTOMER_ID`: Customer id used in request paths (default: 12345)
//! - `TALLY_LATENCY_SCALE`: Multiplier for the mock's simulated latency (default: 1.0, 0 disables)

mod http;
mod mock;

pub use http::HttpApi;
pub use mock::MockApi;

use async_trait::async_trait;

use crate::endpoints::{PeriodParams, TransactionParams, TrendsParams};
use crate::error::Result;
use crate::fixtures::CUSTOMER_ID;
use crate::models::{
    CustomerProfile, FiltersResponse, GoalsResponse, SpendingByCategory, SpendingSummary,
    SpendingTrends, TransactionsResponse,
};

/// Interface to the dashboard's backing endpoints
///
/// Implementations must be Send + Sync so view-models can drive them from
/// spawned tasks.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn profile(&self) -> Result<CustomerProfile>;

    async fn summary(&self, params: &PeriodParams) -> Result<SpendingSummary>;

    async fn categories(&self, params: &PeriodParams) -> Result<SpendingByCategory>;

    async fn trends(&self, params: &TrendsParams) -> Result<SpendingTrends>;

    async fn transactions(&self, params: &TransactionParams) -> Result<TransactionsResponse>;

    async fn goals(&self, params: &PeriodParams) -> Result<GoalsResponse>;

    async fn filters(&self) -> Result<FiltersResponse>;

    /// Where requests go (for logging)
    fn describe(&self) -> String;
}

/// Concrete API client enum
#[derive(Clone, Debug)]
pub enum ApiClient {
    /// In-process fixtures with simulated latency
    Mock(MockApi),
    /// HTTP against a tally server
    Http(HttpApi),
}

impl ApiClient {
    /// Create a client from environment variables
    pub fn from_env() -> Self {
        let customer_id = std::env::var("TALLY_CUSTOMER_ID")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(CUSTOMER_ID);

        match std::env::var("TALLY_API_URL") {
            Ok(url) if !url.trim().is_empty() => ApiClient::http(&url, customer_id),
            _ => {
                let scale = std::env::var("TALLY_LATENCY_SCALE")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1.0);
                ApiClient::Mock(MockApi::new().with_latency_scale(scale))
            }
        }
    }

    /// Create an HTTP client directly
    pub fn http(base_url: &str, customer_id: i64) -> Self {
        ApiClient::Http(HttpApi::new(base_url, customer_id))
    }

    /// Create an in-process mock without latency
    pub fn mock() -> Self {
        ApiClient::Mock(MockApi::instant())
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn profile(&self) -> Result<CustomerProfile> {
        match self {
            ApiClient::Mock(api) => api.profile().await,
            ApiClient::Http(api) => api.profile().await,
        }
    }

    async fn summary(&self, params: &PeriodParams) -> Result<SpendingSummary> {
        match self {
            ApiClient::Mock(api) => api.summary(params).await,
            ApiClient::Http(api) => api.summary(params).await,
        }
    }

    async fn categories(&self, params: &PeriodParams) -> Result<SpendingByCategory> {
        match self {
            ApiClient::Mock(api) => api.categories(params).await,
            ApiClient::Http(api) => api.categories(params).await,
        }
    }

    async fn trends(&self, params: &TrendsParams) -> Result<SpendingTrends> {
        match self {
            ApiClient::Mock(api) => api.trends(params).await,
            ApiClient::Http(api) => api.trends(params).await,
        }
    }

    async fn transactions(&self, params: &TransactionParams) -> Result<TransactionsResponse> {
        match self {
            ApiClient::Mock(api) => api.transactions(params).await,
            ApiClient::Http(api) => api.transactions(params).await,
        }
    }

    async fn goals(&self, params: &PeriodParams) -> Result<GoalsResponse> {
        match self {
            ApiClient::Mock(api) => api.goals(params).await,
            ApiClient::Http(api) => api.goals(params).await,
        }
    }

    async fn filters(&self) -> Result<FiltersResponse> {
        match self {
            ApiClient::Mock(api) => api.filters().await,
            ApiClient::Http(api) => api.filters().await,
        }
    }

    fn describe(&self) -> String {
        match self {
            ApiClient::Mock(api) => api.describe(),
            ApiClient::Http(api) => api.describe(),
        }
    }
}
