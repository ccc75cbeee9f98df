//! Filter metadata handler

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};
use tally_core::{endpoints, models::FiltersResponse, Endpoint};

/// GET /api/customers/:id/filters
pub async fn get_filters(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
) -> Result<Json<FiltersResponse>, AppError> {
    state.simulate(Endpoint::Filters, &customer_id).await?;
    Ok(Json(endpoints::filters()))
}
