//! Transaction query builder
//!
//! Answers "page K of transactions matching filters F in order O" against an
//! in-memory ledger. Processing order is fixed: filter (category, then start
//! date, then end date), then sort, then paginate. The source slice is never
//! mutated; every run produces a fresh view.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::models::{Pagination, SortBy, Transaction, TransactionsResponse};

/// Page size when the caller does not specify one
pub const DEFAULT_PAGE_LIMIT: usize = 20;

/// Largest page a single query may return
pub const MAX_PAGE_LIMIT: usize = 100;

/// Builder for transaction ledger queries
///
/// All filters are optional and combine with AND semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionQuery {
    pub category: Option<String>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub sort_by: SortBy,
    pub offset: usize,
    pub limit: usize,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            category: None,
            start: None,
            end: None,
            sort_by: SortBy::default(),
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl TransactionQuery {
    /// Create a new query with default paging and newest-first order
    pub fn new() -> Self {
        Self::default()
    }

    /// Set category filter (case-insensitive exact match, blank means none)
    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category = category
            .filter(|c| !c.trim().is_empty())
            .map(str::to_string);
        self
    }

    /// Set inclusive lower date bound from an ISO string
    ///
    /// Unparsable input leaves the bound unset.
    pub fn start_date(mut self, raw: Option<&str>) -> Self {
        self.start = raw.and_then(|s| parse_instant(s, "startDate"));
        self
    }

    /// Set inclusive upper date bound from an ISO string
    ///
    /// Unparsable input leaves the bound unset.
    pub fn end_date(mut self, raw: Option<&str>) -> Self {
        self.end = raw.and_then(|s| parse_instant(s, "endDate"));
        self
    }

    /// Set sort order
    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Set offset (negative values clamp to 0)
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = usize::try_from(offset).unwrap_or(0);
        self
    }

    /// Set page size, clamped to [1, MAX_PAGE_LIMIT]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = limit.clamp(1, MAX_PAGE_LIMIT as i64) as usize;
        self
    }

    /// Whether a transaction passes every configured filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if let Some(ref category) = self.category {
            if !txn.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(start) = self.start {
            if txn.date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if txn.date > end {
                return false;
            }
        }
        true
    }

    /// Run the query against a ledger
    ///
    /// The pagination total counts filtered matches, not the ledger size.
    pub fn run(&self, ledger: &[Transaction]) -> TransactionsResponse {
        let mut matched: Vec<&Transaction> = ledger.iter().filter(|t| self.matches(t)).collect();

        // slice::sort_by is stable: ties keep ledger order
        match self.sort_by {
            SortBy::DateDesc => matched.sort_by(|a, b| b.date.cmp(&a.date)),
            SortBy::DateAsc => matched.sort_by(|a, b| a.date.cmp(&b.date)),
            SortBy::AmountDesc => matched.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
            SortBy::AmountAsc => matched.sort_by(|a, b| a.amount.total_cmp(&b.amount)),
        }

        let total = matched.len();
        let transactions = matched
            .into_iter()
            .skip(self.offset)
            .take(self.limit)
            .cloned()
            .collect();

        TransactionsResponse {
            transactions,
            pagination: Pagination::new(total, self.limit, self.offset),
        }
    }
}

/// Parse an ISO 8601 bound into an instant
///
/// Accepts RFC 3339 timestamps, zone-less datetimes (read as UTC) and plain
/// dates (midnight UTC).
pub fn parse_instant(raw: &str, field: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    debug!(field, value = raw, "Ignoring unparsable date bound");
    None
}
