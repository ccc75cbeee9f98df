//! Transactions command: paged ledger with sort and category filter

use anyhow::Result;
use tally_core::{
    format::{format_txn_date, format_zar},
    models::SortBy,
    ApiClient, Transactions, TransactionsState,
};
use tracing::info;

use super::{check, truncate, Output, RULE};

pub async fn cmd_transactions(
    api: ApiClient,
    sort: SortBy,
    category: Option<&str>,
    pages: usize,
    output: Output,
) -> Result<()> {
    let state = load_transactions(api, sort, category, pages).await;

    output.emit(&state, || render_transactions(&state))?;
    check(state.error())
}

/// Load the first page with the given filters, then up to `pages - 1` more
pub async fn load_transactions(
    api: ApiClient,
    sort: SortBy,
    category: Option<&str>,
    pages: usize,
) -> TransactionsState {
    let list = Transactions::with_filters(api, sort, category);
    list.load().await;

    for page in 1..pages.max(1) {
        if list.load_more().await.is_none() {
            info!(pages = page, "No more transactions");
            break;
        }
    }

    list.snapshot()
}

pub fn render_transactions(state: &TransactionsState) -> String {
    let mut lines = vec![
        String::new(),
        format!(
            "  📝 Transactions · {} · {}",
            state.category.as_deref().unwrap_or("All categories"),
            state.sort_by
        ),
        RULE.to_string(),
    ];

    if state.transactions.is_empty() {
        lines.push("   No transactions found.".to_string());
    }

    for txn in &state.transactions {
        lines.push(format!(
            "   {} │ {:<14} │ {:<20} │ {:>12} │ {}",
            format_txn_date(&txn.date),
            txn.category,
            truncate(&txn.merchant, 20),
            format_zar(txn.amount, 2),
            txn.payment_method
        ));
    }

    if let Some(pagination) = state.pagination {
        let more = if pagination.has_more {
            " (use --pages to load more)"
        } else {
            ""
        };
        lines.push(String::new());
        lines.push(format!(
            "   Showing {} of {}{}",
            state.transactions.len(),
            pagination.total,
            more
        ));
    }

    lines.join("\n")
}
