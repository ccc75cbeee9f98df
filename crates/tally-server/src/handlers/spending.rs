//! Spending handlers: summary, category breakdown and monthly trends

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{AppError, AppState};
use tally_core::{
    endpoints,
    models::{SpendingByCategory, SpendingSummary, SpendingTrends},
    Endpoint, PeriodParams, TrendsParams,
};

/// GET /api/customers/:id/spending/summary?period=
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<SpendingSummary>, AppError> {
    state.simulate(Endpoint::Summary, &customer_id).await?;
    Ok(Json(endpoints::summary(&params)))
}

/// GET /api/customers/:id/spending/categories?period=
pub async fn get_categories(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<SpendingByCategory>, AppError> {
    state.simulate(Endpoint::Categories, &customer_id).await?;
    Ok(Json(endpoints::categories(&params)))
}

/// GET /api/customers/:id/spending/trends?period=|months=
///
/// `period` takes precedence over `months` when both are given.
pub async fn get_trends(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
    Query(params): Query<TrendsParams>,
) -> Result<Json<SpendingTrends>, AppError> {
    state.simulate(Endpoint::Trends, &customer_id).await?;
    Ok(Json(endpoints::trends(&params)))
}
