//! Tally Web Server
//!
//! Axum-based mock REST API serving the dashboard fixtures.
//!
//! Features:
//! - Per-endpoint simulated latency (scalable, or disabled for tests)
//! - Injectable endpoint failures for exercising error states
//! - Restrictive CORS policy and security headers
//! - Optional static file serving for a built frontend

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{debug, info, warn};

use tally_core::Endpoint;

mod handlers;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// Multiplier for each endpoint's simulated latency (0 disables it)
    pub latency_scale: f64,
    /// Endpoints that answer 503 instead of data
    pub failing: HashSet<Endpoint>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![],
            latency_scale: 1.0,
            failing: HashSet::new(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from environment variables
    ///
    /// - `TALLY_ALLOWED_ORIGINS`: comma-separated CORS origins
    /// - `TALLY_LATENCY_SCALE`: latency multiplier (default: 1.0)
    /// - `TALLY_FAIL_ENDPOINTS`: comma-separated endpoint names to fail
    pub fn from_env() -> Self {
        let allowed_origins = std::env::var("TALLY_ALLOWED_ORIGINS")
            .map(|s| split_list(&s))
            .unwrap_or_default();

        let latency_scale = std::env::var("TALLY_LATENCY_SCALE")
            .ok()
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|s| s.is_finite() && *s >= 0.0)
            .unwrap_or(1.0);

        let failing = std::env::var("TALLY_FAIL_ENDPOINTS")
            .map(|s| parse_endpoints(&s))
            .unwrap_or_default();

        Self {
            allowed_origins,
            latency_scale,
            failing,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse endpoint names, skipping (and logging) unknown ones
pub fn parse_endpoints(raw: &str) -> HashSet<Endpoint> {
    split_list(raw)
        .iter()
        .filter_map(|name| match name.parse() {
            Ok(endpoint) => Some(endpoint),
            Err(e) => {
                warn!("{}", e);
                None
            }
        })
        .collect()
}

/// Shared application state
pub struct AppState {
    pub config: ServerConfig,
}

impl AppState {
    /// Wait out the endpoint's latency, then fail if the endpoint is switched off
    pub async fn simulate(&self, endpoint: Endpoint, customer_id: &str) -> Result<(), AppError> {
        debug!(%endpoint, customer_id, "Handling request");
        if self.config.latency_scale > 0.0 {
            tokio::time::sleep(endpoint.latency().mul_f64(self.config.latency_scale)).await;
        }
        if self.config.failing.contains(&endpoint) {
            warn!(%endpoint, "Simulated failure");
            return Err(AppError::unavailable(&format!(
                "Simulated failure for {}",
                endpoint
            )));
        }
        Ok(())
    }
}

/// Create the router with all routes
pub fn create_router(static_dir: Option<&str>, config: ServerConfig) -> Router {
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
    };

    let state = Arc::new(AppState { config });

    let customer_routes = Router::new()
        .route("/profile", get(handlers::get_profile))
        .route("/spending/summary", get(handlers::get_summary))
        .route("/spending/categories", get(handlers::get_categories))
        .route("/spending/trends", get(handlers::get_trends))
        .route("/transactions", get(handlers::list_transactions))
        .route("/goals", get(handlers::get_goals))
        .route("/filters", get(handlers::get_filters));

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .nest("/customers/:id", customer_routes)
        .fallback(api_not_found);

    let mut app = Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Security headers
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ));

    // Serve static files if directory provided
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    } else {
        app = app.fallback(api_not_found);
    }

    app
}

async fn api_not_found() -> AppError {
    AppError::not_found("Not found")
}

/// Start the server
pub async fn serve_with_config(
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if config.latency_scale == 0.0 {
        info!("Simulated latency disabled");
    }
    if !config.failing.is_empty() {
        let mut names: Vec<&str> = config.failing.iter().map(|e| e.as_str()).collect();
        names.sort_unstable();
        warn!("⚠️  Failing endpoints: {}", names.join(", "));
    }

    let app = create_router(static_dir, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
        }
    }

    pub fn unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}
