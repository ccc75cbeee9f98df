//! Customer profile handler

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{AppError, AppState};
use tally_core::{endpoints, models::CustomerProfile, Endpoint};

/// GET /api/customers/:id/profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
) -> Result<Json<CustomerProfile>, AppError> {
    state.simulate(Endpoint::Profile, &customer_id).await?;
    Ok(Json(endpoints::profile()))
}
