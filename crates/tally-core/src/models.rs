//! Domain models for Tally
//!
//! Every entity serializes to the camelCase JSON shape served by the mock API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Coarse time window selecting which slice of spending to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Period {
    #[serde(rename = "7d")]
    Week,
    #[default]
    #[serde(rename = "30d")]
    Month,
    #[serde(rename = "90d")]
    Quarter,
    #[serde(rename = "1y")]
    Year,
}

impl Period {
    pub const ALL: [Period; 4] = [Self::Week, Self::Month, Self::Quarter, Self::Year];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "1y",
        }
    }

    /// Parse an external token, falling back to 30d for anything unrecognized
    pub fn parse_or_default(token: Option<&str>) -> Self {
        match token {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(token = raw, "Unknown period token, using 30d");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            "90d" => Ok(Self::Quarter),
            "1y" => Ok(Self::Year),
            _ => Err(format!("Unknown period: {}", s)),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordering applied to the transaction ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    DateDesc,
    DateAsc,
    AmountDesc,
    AmountAsc,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::AmountDesc => "amount_desc",
            Self::AmountAsc => "amount_asc",
        }
    }

    /// Parse an external token, falling back to newest-first
    pub fn parse_or_default(token: Option<&str>) -> Self {
        match token {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(token = raw, "Unknown sort key, using date_desc");
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date_desc" => Ok(Self::DateDesc),
            "date_asc" => Ok(Self::DateAsc),
            "amount_desc" => Ok(Self::AmountDesc),
            "amount_asc" => Ok(Self::AmountAsc),
            _ => Err(format!("Unknown sort key: {}", s)),
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Budget consumption classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Under 80% of the budget used
    OnTrack,
    /// 80% up to (but not including) 100%
    Warning,
    /// 100% or more
    Exceeded,
}

impl GoalStatus {
    /// Classify a percentage-used value
    pub fn from_percentage(percentage_used: f64) -> Self {
        if percentage_used >= 100.0 {
            Self::Exceeded
        } else if percentage_used >= 80.0 {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::Warning => "warning",
            Self::Exceeded => "exceeded",
        }
    }

    /// Human-readable badge text
    pub fn label(&self) -> &'static str {
        match self {
            Self::OnTrack => "On track",
            Self::Warning => "Warning",
            Self::Exceeded => "Exceeded",
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Standard,
    Premium,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }
}

/// The customer whose spending is shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
    pub join_date: NaiveDate,
    pub account_type: AccountType,
    /// Lifetime spend
    pub total_spent: f64,
    /// ISO currency code, e.g. "ZAR"
    pub currency: String,
}

impl CustomerProfile {
    /// Upper-cased first letters of each name part ("John Doe" -> "JD")
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Percentage change against the previous window (positive = increase)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub spent_change: f64,
    pub transaction_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    pub period: Period,
    pub total_spent: f64,
    pub transaction_count: u32,
    pub average_transaction: f64,
    pub top_category: String,
    pub compared_to_previous: PeriodComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingCategory {
    pub name: String,
    pub amount: f64,
    /// Share of the baseline total; not recomputed after period scaling
    pub percentage: f64,
    pub transaction_count: u32,
    /// Hex colour, e.g. "#FF6B6B"
    pub color: String,
    /// Icon id, e.g. "shopping-cart"
    pub icon: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingByCategory {
    pub date_range: DateRange,
    pub total_amount: f64,
    pub categories: Vec<SpendingCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// YYYY-MM
    pub month: String,
    pub total_spent: f64,
    pub transaction_count: u32,
    pub average_transaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingTrends {
    pub trends: Vec<MonthlyTrend>,
}

/// A single ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: DateTime<Utc>,
    pub merchant: String,
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub payment_method: String,
    pub icon: String,
    pub category_color: String,
}

/// Window of a query result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Number of matches before paging
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

impl Pagination {
    pub fn new(total: usize, limit: usize, offset: usize) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset + limit < total,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub pagination: Pagination,
}

/// Per-category budget tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingGoal {
    pub id: String,
    pub category: String,
    /// Budget for the requested period (monthly for the 30d baseline)
    pub monthly_budget: f64,
    pub current_spent: f64,
    pub percentage_used: f64,
    pub days_remaining: u32,
    pub status: GoalStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalsResponse {
    pub goals: Vec<SpendingGoal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryFilter {
    pub name: String,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangePreset {
    pub label: String,
    pub value: Period,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiltersResponse {
    pub categories: Vec<CategoryFilter>,
    pub date_range_presets: Vec<DateRangePreset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_tokens_round_trip_through_serde() {
        for period in Period::ALL {
            let json = serde_json::to_string(&period).unwrap();
            assert_eq!(json, format!("\"{}\"", period.as_str()));
            let back: Period = serde_json::from_str(&json).unwrap();
            assert_eq!(back, period);
        }
    }

    #[test]
    fn test_period_unknown_token_falls_back() {
        assert_eq!(Period::parse_or_default(Some("bogus")), Period::Month);
        assert_eq!(Period::parse_or_default(None), Period::Month);
        assert_eq!(Period::parse_or_default(Some("1y")), Period::Year);
    }

    #[test]
    fn test_sort_by_parsing() {
        assert_eq!(SortBy::parse_or_default(Some("amount_asc")), SortBy::AmountAsc);
        assert_eq!(SortBy::parse_or_default(Some("AMOUNT_DESC")), SortBy::AmountDesc);
        assert_eq!(SortBy::parse_or_default(Some("random")), SortBy::DateDesc);
        assert_eq!(
            serde_json::to_string(&SortBy::DateAsc).unwrap(),
            "\"date_asc\""
        );
    }

    #[test]
    fn test_goal_status_thresholds() {
        assert_eq!(GoalStatus::from_percentage(0.0), GoalStatus::OnTrack);
        assert_eq!(GoalStatus::from_percentage(79.99), GoalStatus::OnTrack);
        assert_eq!(GoalStatus::from_percentage(80.0), GoalStatus::Warning);
        assert_eq!(GoalStatus::from_percentage(99.99), GoalStatus::Warning);
        assert_eq!(GoalStatus::from_percentage(100.0), GoalStatus::Exceeded);
        assert_eq!(GoalStatus::from_percentage(226.16), GoalStatus::Exceeded);
    }

    #[test]
    fn test_pagination_has_more() {
        assert!(Pagination::new(3, 2, 0).has_more);
        assert!(!Pagination::new(3, 2, 2).has_more);
        assert!(!Pagination::new(3, 10, 0).has_more);
        assert!(!Pagination::new(0, 10, 50).has_more);
    }

    #[test]
    fn test_transaction_serializes_camel_case() {
        let txn = Transaction {
            id: "txn_1".to_string(),
            date: "2024-09-16T14:30:00Z".parse().unwrap(),
            merchant: "Pick n Pay".to_string(),
            category: "Groceries".to_string(),
            amount: 245.8,
            description: "Weekly groceries".to_string(),
            payment_method: "Credit Card".to_string(),
            icon: "shopping-cart".to_string(),
            category_color: "#FF6B6B".to_string(),
        };
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["date"], "2024-09-16T14:30:00Z");
        assert_eq!(json["paymentMethod"], "Credit Card");
        assert_eq!(json["categoryColor"], "#FF6B6B");
    }

    #[test]
    fn test_profile_initials() {
        let profile = CustomerProfile {
            customer_id: 1,
            name: "john van der merwe".to_string(),
            email: "j@example.com".to_string(),
            join_date: NaiveDate::from_ymd_opt(2023, 1, 15).unwrap(),
            account_type: AccountType::Standard,
            total_spent: 0.0,
            currency: "ZAR".to_string(),
        };
        assert_eq!(profile.initials(), "JVDM");
    }
}
