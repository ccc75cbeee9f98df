//! HTTP client for a running tally server

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::endpoints::{Endpoint, PeriodParams, TransactionParams, TrendsParams};
use crate::error::{Error, Result};
use crate::models::{
    CustomerProfile, FiltersResponse, GoalsResponse, SpendingByCategory, SpendingSummary,
    SpendingTrends, TransactionsResponse,
};

use super::DashboardApi;

/// Talks to `/api/customers/{id}/...` on a tally server
#[derive(Clone, Debug)]
pub struct HttpApi {
    http_client: Client,
    base_url: String,
    customer_id: i64,
}

impl HttpApi {
    pub fn new(base_url: &str, customer_id: i64) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            customer_id,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!(
            "{}/api/customers/{}/{}",
            self.base_url,
            self.customer_id,
            endpoint.path()
        )
    }

    async fn get<T, Q>(&self, endpoint: Endpoint, query: Option<&Q>) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut request = self.http_client.get(self.url(endpoint));
        if let Some(query) = query {
            request = request.query(query);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%endpoint, status = status.as_u16(), "Request failed");
            return Err(Error::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(%endpoint, bytes = body.len(), "Response received");
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl DashboardApi for HttpApi {
    async fn profile(&self) -> Result<CustomerProfile> {
        self.get::<_, ()>(Endpoint::Profile, None).await
    }

    async fn summary(&self, params: &PeriodParams) -> Result<SpendingSummary> {
        self.get(Endpoint::Summary, Some(params)).await
    }

    async fn categories(&self, params: &PeriodParams) -> Result<SpendingByCategory> {
        self.get(Endpoint::Categories, Some(params)).await
    }

    async fn trends(&self, params: &TrendsParams) -> Result<SpendingTrends> {
        self.get(Endpoint::Trends, Some(params)).await
    }

    async fn transactions(&self, params: &TransactionParams) -> Result<TransactionsResponse> {
        self.get(Endpoint::Transactions, Some(params)).await
    }

    async fn goals(&self, params: &PeriodParams) -> Result<GoalsResponse> {
        self.get(Endpoint::Goals, Some(params)).await
    }

    async fn filters(&self) -> Result<FiltersResponse> {
        self.get::<_, ()>(Endpoint::Filters, None).await
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Json, Router};

    /// Serve a router on an ephemeral port, returning its base URL
    async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_url_building() {
        let api = HttpApi::new("http://localhost:3000/", 42);
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(
            api.url(Endpoint::Trends),
            "http://localhost:3000/api/customers/42/spending/trends"
        );
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let app = Router::new().route(
            "/api/customers/1/filters",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let api = HttpApi::new(&spawn(app).await, 1);

        let err = api.filters().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Status {
                endpoint: Endpoint::Filters,
                status: 503
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let app = Router::new().route(
            "/api/customers/1/profile",
            get(|| async { Json(serde_json::json!({ "unexpected": true })) }),
        );
        let api = HttpApi::new(&spawn(app).await, 1);

        assert!(matches!(api.profile().await, Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn test_query_string_is_forwarded() {
        let app = Router::new().route(
            "/api/customers/1/goals",
            get(
                |axum::extract::Query(params): axum::extract::Query<PeriodParams>| async move {
                    let period = params.resolve();
                    Json(crate::endpoints::goals(&PeriodParams::of(period)))
                },
            ),
        );
        let api = HttpApi::new(&spawn(app).await, 1);

        let goals = api
            .goals(&PeriodParams::of(crate::models::Period::Year))
            .await
            .unwrap();
        assert_eq!(goals.goals[0].days_remaining, 365);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Bind then drop to get a port nothing listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = HttpApi::new(&format!("http://{}", addr), 1);
        assert!(matches!(api.filters().await, Err(Error::Http(_))));
    }
}
