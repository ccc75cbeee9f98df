//! Paged transaction list with sort, category filter and "load more"

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::debug;

use crate::client::DashboardApi;
use crate::endpoints::TransactionParams;
use crate::error::Result;
use crate::models::{Pagination, SortBy, Transaction, TransactionsResponse};

use super::{lock, Lifecycle, LoadPhase, Settled, Ticket};

pub const PAGE_SIZE: usize = 10;

pub const TRANSACTIONS_ERROR: &str = "Failed to load transactions.";

/// One page to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub sort_by: SortBy,
    pub category: Option<String>,
    /// Append to the current list instead of replacing it
    pub append: bool,
}

impl PageRequest {
    pub fn params(&self) -> TransactionParams {
        TransactionParams::page(self.offset, PAGE_SIZE, self.sort_by, self.category.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsState {
    pub sort_by: SortBy,
    pub category: Option<String>,
    pub transactions: Vec<Transaction>,
    pub pagination: Option<Pagination>,
    /// Sort and category the shown pages were fetched with
    #[serde(skip)]
    loaded_filters: Option<(SortBy, Option<String>)>,
    #[serde(flatten)]
    lifecycle: Lifecycle,
}

impl TransactionsState {
    pub fn phase(&self) -> LoadPhase {
        self.lifecycle.phase()
    }

    pub fn error(&self) -> Option<&str> {
        self.lifecycle.error()
    }

    pub fn has_more(&self) -> bool {
        self.pagination.is_some_and(|p| p.has_more)
    }

    fn first_page(&mut self) -> Ticket<PageRequest> {
        let request = PageRequest {
            offset: 0,
            sort_by: self.sort_by,
            category: self.category.clone(),
            append: false,
        };
        let has_data = self.pagination.is_some();
        self.lifecycle.issue(has_data, request)
    }

    /// Fetch the first page for the current sort and filter
    pub fn begin_load(&mut self) -> Ticket<PageRequest> {
        self.first_page()
    }

    /// Returns `None` when the sort order is unchanged
    pub fn begin_sort(&mut self, sort_by: SortBy) -> Option<Ticket<PageRequest>> {
        if sort_by == self.sort_by {
            return None;
        }
        self.sort_by = sort_by;
        Some(self.first_page())
    }

    /// Returns `None` when the filter is unchanged; blank means "all categories"
    pub fn begin_category(&mut self, category: Option<&str>) -> Option<Ticket<PageRequest>> {
        let category = normalize_category(category);
        if category == self.category {
            return None;
        }
        self.category = category;
        Some(self.first_page())
    }

    /// Whether the shown list was fetched with the current sort and category
    pub fn matches_filters(&self) -> bool {
        self.loaded_filters
            .as_ref()
            .is_some_and(|(sort_by, category)| {
                *sort_by == self.sort_by && *category == self.category
            })
    }

    /// Request the next page
    ///
    /// Refused while any request is in flight or when the server reported no
    /// further matches. If a sort or filter change failed, the shown list is
    /// from the old filters and the first page is fetched instead.
    pub fn begin_load_more(&mut self) -> Option<Ticket<PageRequest>> {
        if self.lifecycle.phase().is_busy() {
            debug!("Ignoring load more while a request is in flight");
            return None;
        }
        self.pagination?;
        if !self.matches_filters() {
            debug!(sort_by = %self.sort_by, "List is from other filters, reloading first page");
            return Some(self.first_page());
        }
        let pagination = self.pagination.filter(|p| p.has_more)?;
        let request = PageRequest {
            offset: pagination.offset + pagination.limit,
            sort_by: self.sort_by,
            category: self.category.clone(),
            append: true,
        };
        Some(self.lifecycle.issue(true, request))
    }

    pub fn settle(
        &mut self,
        ticket: &Ticket<PageRequest>,
        result: Result<TransactionsResponse>,
    ) -> Settled {
        if !self.lifecycle.is_current(ticket) {
            debug!(
                generation = ticket.generation(),
                offset = ticket.params().offset,
                "Discarding stale transactions response"
            );
            return Settled::Stale;
        }
        if self.lifecycle.finish(&result, TRANSACTIONS_ERROR) {
            if let Ok(page) = result {
                if ticket.params().append {
                    self.transactions.extend(page.transactions);
                } else {
                    self.transactions = page.transactions;
                }
                self.pagination = Some(page.pagination);
                let request = ticket.params();
                self.loaded_filters = Some((request.sort_by, request.category.clone()));
            }
        }
        Settled::Applied
    }
}

fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .filter(|c| !c.trim().is_empty())
        .map(str::to_string)
}

/// Async driver for [`TransactionsState`]
#[derive(Clone)]
pub struct Transactions {
    api: Arc<dyn DashboardApi>,
    state: Arc<Mutex<TransactionsState>>,
}

impl Transactions {
    pub fn new(api: impl DashboardApi + 'static) -> Self {
        Self::with_filters(api, SortBy::default(), None)
    }

    /// Start from a sort order and category other than the defaults
    pub fn with_filters(
        api: impl DashboardApi + 'static,
        sort_by: SortBy,
        category: Option<&str>,
    ) -> Self {
        let state = TransactionsState {
            sort_by,
            category: normalize_category(category),
            ..Default::default()
        };
        Self {
            api: Arc::new(api),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn snapshot(&self) -> TransactionsState {
        lock(&self.state).clone()
    }

    pub async fn load(&self) -> Settled {
        let ticket = lock(&self.state).begin_load();
        self.complete(ticket).await
    }

    pub async fn set_sort(&self, sort_by: SortBy) -> Option<Settled> {
        let ticket = lock(&self.state).begin_sort(sort_by)?;
        Some(self.complete(ticket).await)
    }

    pub async fn set_category(&self, category: Option<&str>) -> Option<Settled> {
        let ticket = lock(&self.state).begin_category(category)?;
        Some(self.complete(ticket).await)
    }

    /// Returns `None` if nothing was requested
    pub async fn load_more(&self) -> Option<Settled> {
        let ticket = lock(&self.state).begin_load_more()?;
        Some(self.complete(ticket).await)
    }

    async fn complete(&self, ticket: Ticket<PageRequest>) -> Settled {
        let result = self.api.transactions(&ticket.params().params()).await;
        lock(&self.state).settle(&ticket, result)
    }
}
