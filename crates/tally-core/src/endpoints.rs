//! Mock endpoint layer
//!
//! One function per logical endpoint. Each takes the raw query parameters as
//! received from a client and returns the response entity. Malformed or
//! unrecognized parameters are defaulted here and never surface as errors.
//!
//! Simulated latency is not applied here; callers (the HTTP server and
//! `MockApi`) sleep for [`Endpoint::latency`] before answering.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fixtures::fixtures;
use crate::models::{
    CustomerProfile, FiltersResponse, GoalsResponse, Period, SortBy, SpendingByCategory,
    SpendingSummary, SpendingTrends, TransactionsResponse,
};
use crate::period::{scale_categories, scale_goal};
use crate::query::{TransactionQuery, DEFAULT_PAGE_LIMIT};

/// Trend window when neither `period` nor `months` is given
pub const DEFAULT_TREND_MONTHS: usize = 6;

/// Longest trend window a client may request
pub const MAX_TREND_MONTHS: usize = 24;

/// The mock API surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Profile,
    Summary,
    Categories,
    Trends,
    Transactions,
    Goals,
    Filters,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Self::Profile,
        Self::Summary,
        Self::Categories,
        Self::Trends,
        Self::Transactions,
        Self::Goals,
        Self::Filters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Summary => "summary",
            Self::Categories => "categories",
            Self::Trends => "trends",
            Self::Transactions => "transactions",
            Self::Goals => "goals",
            Self::Filters => "filters",
        }
    }

    /// Artificial response delay so loading states are observable
    pub fn latency(&self) -> Duration {
        let ms = match self {
            Self::Profile => 600,
            Self::Summary => 800,
            Self::Categories => 900,
            Self::Trends => 750,
            Self::Transactions => 700,
            Self::Goals => 650,
            Self::Filters => 400,
        };
        Duration::from_millis(ms)
    }

    /// Path below `/api/customers/{id}`
    pub fn path(&self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Summary => "spending/summary",
            Self::Categories => "spending/categories",
            Self::Trends => "spending/trends",
            Self::Transactions => "transactions",
            Self::Goals => "goals",
            Self::Filters => "filters",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Endpoint {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str() == name)
            .ok_or_else(|| format!("Unknown endpoint: {}", s))
    }
}

/// `?period=` for summary, categories and goals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

impl PeriodParams {
    pub fn of(period: Period) -> Self {
        Self {
            period: Some(period.as_str().to_string()),
        }
    }

    pub fn resolve(&self) -> Period {
        Period::parse_or_default(self.period.as_deref())
    }
}

/// `?period=` or `?months=` for trends; `period` wins when both are present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub months: Option<String>,
}

impl TrendsParams {
    pub fn months(months: usize) -> Self {
        Self {
            period: None,
            months: Some(months.to_string()),
        }
    }

    pub fn of(period: Period) -> Self {
        Self {
            period: Some(period.as_str().to_string()),
            months: None,
        }
    }

    /// Number of trailing months to return
    pub fn resolve(&self) -> usize {
        if let Some(ref token) = self.period {
            return match token.parse::<Period>() {
                Ok(period) => period.trend_months(),
                Err(_) => DEFAULT_TREND_MONTHS,
            };
        }
        self.months
            .as_deref()
            .and_then(|m| m.trim().parse::<i64>().ok())
            .map(|m| m.clamp(1, MAX_TREND_MONTHS as i64) as usize)
            .unwrap_or(DEFAULT_TREND_MONTHS)
    }
}

/// Query string of the transactions endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

impl TransactionParams {
    /// Parameters for one page of a (category, sort) listing
    pub fn page(offset: usize, limit: usize, sort_by: SortBy, category: Option<&str>) -> Self {
        Self {
            limit: Some(limit.to_string()),
            offset: Some(offset.to_string()),
            category: category.map(str::to_string),
            start_date: None,
            end_date: None,
            sort_by: Some(sort_by.as_str().to_string()),
        }
    }

    /// Build the ledger query, defaulting anything malformed
    pub fn to_query(&self) -> TransactionQuery {
        let limit = parse_int(self.limit.as_deref()).unwrap_or(DEFAULT_PAGE_LIMIT as i64);
        let offset = parse_int(self.offset.as_deref()).unwrap_or(0);

        TransactionQuery::new()
            .category(self.category.as_deref())
            .start_date(self.start_date.as_deref())
            .end_date(self.end_date.as_deref())
            .sort_by(SortBy::parse_or_default(self.sort_by.as_deref()))
            .offset(offset)
            .limit(limit)
    }
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// GET profile
pub fn profile() -> CustomerProfile {
    fixtures().profile.clone()
}

/// GET spending/summary
pub fn summary(params: &PeriodParams) -> SpendingSummary {
    fixtures().summary(params.resolve()).clone()
}

/// GET spending/categories
pub fn categories(params: &PeriodParams) -> SpendingByCategory {
    scale_categories(&fixtures().categories, params.resolve())
}

/// GET spending/trends
pub fn trends(params: &TrendsParams) -> SpendingTrends {
    let all = &fixtures().trends;
    let months = params.resolve().min(all.len());
    SpendingTrends {
        trends: all[all.len() - months..].to_vec(),
    }
}

/// GET transactions
pub fn transactions(params: &TransactionParams) -> TransactionsResponse {
    params.to_query().run(&fixtures().transactions)
}

/// GET goals
pub fn goals(params: &PeriodParams) -> GoalsResponse {
    let period = params.resolve();
    GoalsResponse {
        goals: fixtures()
            .goals
            .iter()
            .map(|g| scale_goal(g, period))
            .collect(),
    }
}

/// GET filters
pub fn filters() -> FiltersResponse {
    fixtures().filters.clone()
}
