//! Transaction handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{AppError, AppState};
use tally_core::{endpoints, models::TransactionsResponse, Endpoint, TransactionParams};

/// GET /api/customers/:id/transactions - List transactions
///
/// Query: `limit` (default 20, max 100), `offset`, `category`, `startDate`,
/// `endDate`, `sortBy`. Malformed values fall back to defaults.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<String>,
    Query(params): Query<TransactionParams>,
) -> Result<Json<TransactionsResponse>, AppError> {
    state.simulate(Endpoint::Transactions, &customer_id).await?;
    Ok(Json(endpoints::transactions(&params)))
}
