//! Period scaling
//!
//! The fixtures describe a 30-day baseline. Other windows are approximated by
//! multiplying baseline figures by a per-period scale factor:
//!
//! | Period | Scale | Days | Trend months |
//! |--------|-------|------|--------------|
//! | 7d     | 7/30  | 7    | 1            |
//! | 30d    | 1     | 30   | 1            |
//! | 90d    | 3     | 90   | 3            |
//! | 1y     | 12    | 365  | 12           |
//!
//! Money is rounded to 2 decimals and counts to whole numbers. Derived fields
//! (percentage used, goal status) are recomputed from the scaled values rather
//! than scaled themselves.

use crate::models::{GoalStatus, Period, SpendingByCategory, SpendingGoal};

impl Period {
    /// Multiplier applied to a 30-day baseline figure
    pub fn scale(&self) -> f64 {
        match self {
            Self::Week => 7.0 / 30.0,
            Self::Month => 1.0,
            Self::Quarter => 3.0,
            Self::Year => 12.0,
        }
    }

    /// Number of days the window represents (display only)
    pub fn days(&self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    /// Number of trailing monthly trend entries that cover the window
    pub fn trend_months(&self) -> usize {
        match self {
            Self::Week | Self::Month => 1,
            Self::Quarter => 3,
            Self::Year => 12,
        }
    }
}

/// Round to 2 decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scale a monetary amount and round to cents
pub fn scale_amount(amount: f64, period: Period) -> f64 {
    round2(amount * period.scale())
}

/// Scale a count and round to the nearest whole number
pub fn scale_count(count: u32, period: Period) -> u32 {
    (f64::from(count) * period.scale()).round() as u32
}

/// Share of `budget` consumed by `spent`, as a percentage with 2 decimals
///
/// A zero (or negative) budget reports 0 rather than dividing by zero.
pub fn percentage_used(spent: f64, budget: f64) -> f64 {
    if budget > 0.0 {
        round2(spent / budget * 100.0)
    } else {
        0.0
    }
}

/// Re-express a baseline goal for the requested period
pub fn scale_goal(goal: &SpendingGoal, period: Period) -> SpendingGoal {
    let budget = scale_amount(goal.monthly_budget, period);
    let spent = scale_amount(goal.current_spent, period);
    let percentage = percentage_used(spent, budget);

    SpendingGoal {
        id: goal.id.clone(),
        category: goal.category.clone(),
        monthly_budget: budget,
        current_spent: spent,
        percentage_used: percentage,
        days_remaining: period.days(),
        status: GoalStatus::from_percentage(percentage),
    }
}

/// Re-express the category breakdown for the requested period
///
/// Amounts and counts are scaled. The grand total is rounded to a whole
/// number. Per-category percentages are carried over from the baseline
/// unchanged, so after rounding they may no longer sum exactly to 100.
pub fn scale_categories(base: &SpendingByCategory, period: Period) -> SpendingByCategory {
    SpendingByCategory {
        date_range: base.date_range,
        total_amount: (base.total_amount * period.scale()).round(),
        categories: base
            .categories
            .iter()
            .map(|c| {
                let mut scaled = c.clone();
                scaled.amount = scale_amount(c.amount, period);
                scaled.transaction_count = scale_count(c.transaction_count, period);
                scaled
            })
            .collect(),
    }
}
