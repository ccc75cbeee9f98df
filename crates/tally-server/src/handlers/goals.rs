//! Budget goal handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{AppError, AppState};
use tally_core::{endpoints, models::GoalsResponse, Endpoint, PeriodParams};

/// GET /api/customers/:id/goals?period=
pub async fn get_goals(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
    Query(params): Query<PeriodParams>,
) -> Result<Json<GoalsResponse>, AppError> {
    state.simulate(Endpoint::Goals, &customer_id).await?;
    Ok(Json(endpoints::goals(&params)))
}
