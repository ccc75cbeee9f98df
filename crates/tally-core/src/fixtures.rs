//! Static mock datasets standing in for a backing store
//!
//! Built once on first access and shared read-only for the life of the process.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{
    AccountType, CategoryFilter, CustomerProfile, DateRange, DateRangePreset, FiltersResponse,
    MonthlyTrend, Period, PeriodComparison, SpendingByCategory, SpendingCategory, SpendingGoal,
    SpendingSummary, GoalStatus, Transaction,
};

/// Customer id the fixtures describe
pub const CUSTOMER_ID: i64 = 12345;

/// All fixture data
#[derive(Debug)]
pub struct Fixtures {
    pub profile: CustomerProfile,
    pub summaries: [SpendingSummary; 4],
    pub categories: SpendingByCategory,
    pub trends: Vec<MonthlyTrend>,
    pub transactions: Vec<Transaction>,
    pub goals: Vec<SpendingGoal>,
    pub filters: FiltersResponse,
}

impl Fixtures {
    /// Summary record for a period
    pub fn summary(&self, period: Period) -> &SpendingSummary {
        let idx = match period {
            Period::Week => 0,
            Period::Month => 1,
            Period::Quarter => 2,
            Period::Year => 3,
        };
        &self.summaries[idx]
    }
}

/// Shared fixture set
pub fn fixtures() -> &'static Fixtures {
    static FIXTURES: OnceLock<Fixtures> = OnceLock::new();
    FIXTURES.get_or_init(build)
}

/// Display metadata for one spending category
struct CategoryStyle {
    name: &'static str,
    color: &'static str,
    icon: &'static str,
}

const GROCERIES: CategoryStyle = CategoryStyle {
    name: "Groceries",
    color: "#FF6B6B",
    icon: "shopping-cart",
};
const ENTERTAINMENT: CategoryStyle = CategoryStyle {
    name: "Entertainment",
    color: "#4ECDC4",
    icon: "film",
};
const TRANSPORTATION: CategoryStyle = CategoryStyle {
    name: "Transportation",
    color: "#45B7D1",
    icon: "car",
};
const DINING: CategoryStyle = CategoryStyle {
    name: "Dining",
    color: "#F7DC6F",
    icon: "utensils",
};
const SHOPPING: CategoryStyle = CategoryStyle {
    name: "Shopping",
    color: "#BB8FCE",
    icon: "shopping-bag",
};
const UTILITIES: CategoryStyle = CategoryStyle {
    name: "Utilities",
    color: "#85C1E9",
    icon: "zap",
};

const CATEGORY_STYLES: [&CategoryStyle; 6] = [
    &GROCERIES,
    &ENTERTAINMENT,
    &TRANSPORTATION,
    &DINING,
    &SHOPPING,
    &UTILITIES,
];

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn instant(iso: &str) -> DateTime<Utc> {
    iso.parse().unwrap_or_default()
}

fn build() -> Fixtures {
    Fixtures {
        profile: CustomerProfile {
            customer_id: CUSTOMER_ID,
            name: "John Doe".to_string(),
            email: "john.doe@email.com".to_string(),
            join_date: date(2023, 1, 15),
            account_type: AccountType::Premium,
            total_spent: 15420.50,
            currency: "ZAR".to_string(),
        },
        summaries: [
            summary(Period::Week, 980.40, 11, 89.13, 5.2, 10.0),
            summary(Period::Month, 4250.75, 47, 90.44, 12.5, -3.2),
            summary(Period::Quarter, 11790.60, 130, 90.70, -2.1, 4.5),
            summary(Period::Year, 48250.00, 520, 92.79, 8.3, 1.1),
        ],
        categories: SpendingByCategory {
            date_range: DateRange {
                start_date: date(2024, 8, 16),
                end_date: date(2024, 9, 16),
            },
            total_amount: 4250.75,
            categories: vec![
                category(&GROCERIES, 1250.30, 29.4, 15),
                category(&ENTERTAINMENT, 890.20, 20.9, 8),
                category(&TRANSPORTATION, 680.45, 16.0, 12),
                category(&DINING, 520.30, 12.2, 9),
                category(&SHOPPING, 450.80, 10.6, 6),
                category(&UTILITIES, 458.70, 10.8, 3),
            ],
        },
        trends: vec![
            trend("2024-01", 3890.25, 42, 92.62),
            trend("2024-02", 4150.80, 38, 109.23),
            trend("2024-03", 3750.60, 45, 83.35),
            trend("2024-04", 4200.45, 39, 107.70),
            trend("2024-05", 3980.30, 44, 90.46),
            trend("2024-06", 4250.75, 47, 90.44),
            trend("2024-07", 3620.10, 40, 90.50),
            trend("2024-08", 4480.90, 51, 87.86),
            trend("2024-09", 4100.00, 46, 89.13),
            trend("2024-10", 3870.55, 43, 90.01),
            trend("2024-11", 5200.30, 58, 89.66),
            trend("2024-12", 6100.80, 65, 93.86),
        ],
        transactions: vec![
            txn("txn_123456", "2024-09-16T14:30:00Z", "Pick n Pay", &GROCERIES, 245.80, "Weekly groceries", "Credit Card"),
            txn("txn_123457", "2024-09-15T10:15:00Z", "Netflix", &ENTERTAINMENT, 199.00, "Monthly subscription", "Debit Order"),
            txn("txn_123458", "2024-09-14T08:45:00Z", "Uber", &TRANSPORTATION, 85.50, "Ride to office", "Credit Card"),
            txn("txn_123459", "2024-09-13T19:30:00Z", "Nando's", &DINING, 320.00, "Family dinner", "Credit Card"),
            txn("txn_123460", "2024-09-12T11:00:00Z", "Woolworths", &SHOPPING, 450.80, "Clothing purchase", "Credit Card"),
            txn("txn_123461", "2024-09-11T09:00:00Z", "City Power", &UTILITIES, 158.70, "Electricity bill", "Debit Order"),
            txn("txn_123462", "2024-09-10T13:20:00Z", "Checkers", &GROCERIES, 312.40, "Monthly grocery run", "Debit Card"),
            txn("txn_123463", "2024-09-09T20:00:00Z", "Spotify", &ENTERTAINMENT, 99.99, "Music subscription", "Debit Order"),
            txn("txn_123464", "2024-09-08T07:30:00Z", "Gautrain", &TRANSPORTATION, 45.00, "Train fare", "Gautrain Card"),
            txn("txn_123465", "2024-09-07T12:15:00Z", "Steers", &DINING, 89.90, "Lunch", "Credit Card"),
            txn("txn_123466", "2024-09-06T16:45:00Z", "Edgars", &SHOPPING, 680.00, "Seasonal sale", "Store Card"),
            txn("txn_123467", "2024-09-05T09:00:00Z", "Telkom", &UTILITIES, 300.00, "Internet bill", "Debit Order"),
            txn("txn_123468", "2024-09-04T14:00:00Z", "Spar", &GROCERIES, 198.60, "Top-up groceries", "Debit Card"),
            txn("txn_123469", "2024-09-03T21:00:00Z", "DStv", &ENTERTAINMENT, 899.00, "Premium package", "Debit Order"),
            txn("txn_123470", "2024-09-02T08:00:00Z", "Shell", &TRANSPORTATION, 850.00, "Fuel", "Credit Card"),
        ],
        goals: vec![
            goal("goal_001", "Entertainment", 1000.00, 650.30, 65.03),
            goal("goal_002", "Groceries", 1500.00, 1450.80, 96.72),
            goal("goal_003", "Dining", 600.00, 520.30, 86.72),
            goal("goal_004", "Transportation", 1200.00, 680.45, 56.70),
            goal("goal_005", "Shopping", 500.00, 1130.80, 226.16),
        ],
        filters: FiltersResponse {
            categories: CATEGORY_STYLES
                .iter()
                .map(|style| CategoryFilter {
                    name: style.name.to_string(),
                    color: style.color.to_string(),
                    icon: style.icon.to_string(),
                })
                .collect(),
            date_range_presets: vec![
                preset("Last 7 days", Period::Week),
                preset("Last 30 days", Period::Month),
                preset("Last 90 days", Period::Quarter),
                preset("Last year", Period::Year),
            ],
        },
    }
}

fn summary(
    period: Period,
    total_spent: f64,
    transaction_count: u32,
    average_transaction: f64,
    spent_change: f64,
    transaction_change: f64,
) -> SpendingSummary {
    SpendingSummary {
        period,
        total_spent,
        transaction_count,
        average_transaction,
        top_category: GROCERIES.name.to_string(),
        compared_to_previous: PeriodComparison {
            spent_change,
            transaction_change,
        },
    }
}

fn category(
    style: &CategoryStyle,
    amount: f64,
    percentage: f64,
    transaction_count: u32,
) -> SpendingCategory {
    SpendingCategory {
        name: style.name.to_string(),
        amount,
        percentage,
        transaction_count,
        color: style.color.to_string(),
        icon: style.icon.to_string(),
    }
}

fn trend(month: &str, total_spent: f64, transaction_count: u32, average: f64) -> MonthlyTrend {
    MonthlyTrend {
        month: month.to_string(),
        total_spent,
        transaction_count,
        average_transaction: average,
    }
}

fn txn(
    id: &str,
    iso: &str,
    merchant: &str,
    style: &CategoryStyle,
    amount: f64,
    description: &str,
    payment_method: &str,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: instant(iso),
        merchant: merchant.to_string(),
        category: style.name.to_string(),
        amount,
        description: description.to_string(),
        payment_method: payment_method.to_string(),
        icon: style.icon.to_string(),
        category_color: style.color.to_string(),
    }
}

fn goal(id: &str, category: &str, budget: f64, spent: f64, percentage_used: f64) -> SpendingGoal {
    SpendingGoal {
        id: id.to_string(),
        category: category.to_string(),
        monthly_budget: budget,
        current_spent: spent,
        percentage_used,
        days_remaining: 12,
        status: GoalStatus::from_percentage(percentage_used),
    }
}

fn preset(label: &str, value: Period) -> DateRangePreset {
    DateRangePreset {
        label: label.to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transactions_are_newest_first_and_unique() {
        let txns = &fixtures().transactions;
        assert_eq!(txns.len(), 15);
        assert!(txns.windows(2).all(|w| w[0].date > w[1].date));

        let mut ids: Vec<_> = txns.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 15);
    }

    #[test]
    fn test_every_transaction_category_has_a_filter() {
        let fx = fixtures();
        for txn in &fx.transactions {
            let filter = fx
                .filters
                .categories
                .iter()
                .find(|f| f.name == txn.category)
                .unwrap();
            assert_eq!(filter.color, txn.category_color);
            assert_eq!(filter.icon, txn.icon);
        }
    }

    #[test]
    fn test_summaries_indexed_by_period() {
        for period in Period::ALL {
            assert_eq!(fixtures().summary(period).period, period);
        }
    }

    #[test]
    fn test_baseline_goal_statuses() {
        let statuses: Vec<_> = fixtures().goals.iter().map(|g| g.status).collect();
        assert_eq!(
            statuses,
            vec![
                GoalStatus::OnTrack,
                GoalStatus::Warning,
                GoalStatus::Warning,
                GoalStatus::OnTrack,
                GoalStatus::Exceeded,
            ]
        );
    }

    #[test]
    fn test_trends_are_chronological() {
        let trends = &fixtures().trends;
        assert_eq!(trends.len(), 12);
        assert!(trends.windows(2).all(|w| w[0].month < w[1].month));
    }
}
