//! Integration tests for tally-core
//!
//! These tests exercise the endpoint layer and view-models together against
//! the shared fixtures.

use std::time::Duration;

use async_trait::async_trait;
use tally_core::{
    endpoints,
    models::{
        CustomerProfile, FiltersResponse, GoalStatus, GoalsResponse, Period, SortBy,
        SpendingByCategory, SpendingSummary, SpendingTrends, TransactionsResponse,
    },
    Dashboard, DashboardApi, Goals, LoadPhase, MockApi, PeriodParams, Result, Settled,
    TransactionParams, Transactions, TrendsParams,
};

fn txn_params(category: Option<&str>, sort: &str, offset: usize, limit: usize) -> TransactionParams {
    TransactionParams {
        limit: Some(limit.to_string()),
        offset: Some(offset.to_string()),
        category: category.map(str::to_string),
        sort_by: Some(sort.to_string()),
        ..Default::default()
    }
}

// =============================================================================
// Endpoint Properties
// =============================================================================

#[test]
fn test_goal_status_matches_percentage_for_every_period() {
    for period in Period::ALL {
        for goal in endpoints::goals(&PeriodParams::of(period)).goals {
            let expected = if goal.percentage_used >= 100.0 {
                GoalStatus::Exceeded
            } else if goal.percentage_used >= 80.0 {
                GoalStatus::Warning
            } else {
                GoalStatus::OnTrack
            };
            assert_eq!(goal.status, expected, "{} in {}", goal.category, period);
        }
    }
}

#[test]
fn test_page_length_matches_window() {
    let categories = [None, Some("Groceries"), Some("Dining"), Some("Nope")];
    let sorts = ["date_desc", "date_asc", "amount_desc", "amount_asc"];

    for category in categories {
        for sort in sorts {
            for offset in [0, 1, 5, 14, 15, 40] {
                for limit in [1, 2, 10, 20, 100] {
                    let result = endpoints::transactions(&txn_params(category, sort, offset, limit));
                    let total = result.pagination.total;
                    let expected = limit.min(total.saturating_sub(offset));
                    assert!(result.transactions.len() <= limit);
                    assert_eq!(result.transactions.len(), expected);
                }
            }
        }
    }
}

#[test]
fn test_same_query_twice_is_identical() {
    let params = txn_params(Some("Entertainment"), "amount_asc", 0, 2);
    let first = endpoints::transactions(&params);
    let second = endpoints::transactions(&params);
    assert_eq!(first, second);
}

#[test]
fn test_has_more_iff_next_page_non_empty() {
    for category in [None, Some("Groceries"), Some("Shopping")] {
        for limit in [1, 2, 3, 7, 10, 15, 20] {
            let mut offset = 0;
            loop {
                let page = endpoints::transactions(&txn_params(category, "date_desc", offset, limit));
                let next = endpoints::transactions(&txn_params(
                    category,
                    "date_desc",
                    offset + limit,
                    limit,
                ));
                assert_eq!(page.pagination.has_more, !next.transactions.is_empty());
                if !page.pagination.has_more {
                    break;
                }
                offset += limit;
            }
        }
    }
}

#[test]
fn test_week_goal_scaling_scenario() {
    let goals = endpoints::goals(&PeriodParams::of(Period::Week));
    let entertainment = goals
        .goals
        .iter()
        .find(|g| g.category == "Entertainment")
        .unwrap();
    assert_eq!(entertainment.monthly_budget, 233.33);
    assert_eq!(entertainment.current_spent, 151.74);
    assert_eq!(entertainment.percentage_used, 65.03);
    assert_eq!(entertainment.status, GoalStatus::OnTrack);
}

#[test]
fn test_groceries_filter_sort_paginate_scenario() {
    let all = endpoints::transactions(&txn_params(Some("Groceries"), "amount_desc", 0, 100));
    assert_eq!(all.pagination.total, 3);

    let page = endpoints::transactions(&txn_params(Some("Groceries"), "amount_desc", 0, 2));
    let amounts: Vec<f64> = page.transactions.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![312.40, 245.80]);
    assert_eq!(page.pagination.total, 3);
    assert_eq!(page.pagination.limit, 2);
    assert_eq!(page.pagination.offset, 0);
    assert!(page.pagination.has_more);
}

#[test]
fn test_bogus_period_summary_is_30d_record() {
    let bogus = endpoints::summary(&PeriodParams {
        period: Some("bogus".to_string()),
    });
    let month = endpoints::summary(&PeriodParams::of(Period::Month));
    assert_eq!(bogus, month);
}

#[test]
fn test_trends_last_three_months() {
    let all = endpoints::trends(&TrendsParams::months(12)).trends;
    let last3 = endpoints::trends(&TrendsParams::months(3)).trends;
    assert_eq!(all.len(), 12);
    assert_eq!(last3, all[9..].to_vec());
}

#[test]
fn test_responses_serialize_with_wire_names() {
    let json = serde_json::to_value(endpoints::summary(&PeriodParams::default())).unwrap();
    assert_eq!(json["period"], "30d");
    assert!(json["comparedToPrevious"]["spentChange"].is_number());

    let json = serde_json::to_value(endpoints::filters()).unwrap();
    assert_eq!(json["dateRangePresets"][0]["value"], "7d");

    let json = serde_json::to_value(endpoints::goals(&PeriodParams::default())).unwrap();
    assert_eq!(json["goals"][4]["status"], "exceeded");
}

// =============================================================================
// View-model Ordering
// =============================================================================

/// Answers 7d requests slowly and everything else quickly
#[derive(Clone)]
struct SlowWeekApi {
    inner: MockApi,
}

impl SlowWeekApi {
    async fn delay(period: &PeriodParams) {
        let ms = if period.resolve() == Period::Week { 200 } else { 10 };
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[async_trait]
impl DashboardApi for SlowWeekApi {
    async fn profile(&self) -> Result<CustomerProfile> {
        self.inner.profile().await
    }

    async fn summary(&self, params: &PeriodParams) -> Result<SpendingSummary> {
        Self::delay(params).await;
        self.inner.summary(params).await
    }

    async fn categories(&self, params: &PeriodParams) -> Result<SpendingByCategory> {
        Self::delay(params).await;
        self.inner.categories(params).await
    }

    async fn trends(&self, params: &TrendsParams) -> Result<SpendingTrends> {
        self.inner.trends(params).await
    }

    async fn transactions(&self, params: &TransactionParams) -> Result<TransactionsResponse> {
        let ms = if params.sort_by.as_deref() == Some("amount_asc") {
            200
        } else {
            10
        };
        tokio::time::sleep(Duration::from_millis(ms)).await;
        self.inner.transactions(params).await
    }

    async fn goals(&self, params: &PeriodParams) -> Result<GoalsResponse> {
        Self::delay(params).await;
        self.inner.goals(params).await
    }

    async fn filters(&self) -> Result<FiltersResponse> {
        self.inner.filters().await
    }

    fn describe(&self) -> String {
        "slow-week".to_string()
    }
}

fn slow_api() -> SlowWeekApi {
    SlowWeekApi {
        inner: MockApi::instant(),
    }
}

#[tokio::test]
async fn test_dashboard_latest_period_wins_over_late_response() {
    let dashboard = Dashboard::new(slow_api(), Period::Month);
    dashboard.mount().await;

    let slow = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.set_period(Period::Week).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    let fast = dashboard.set_period(Period::Year).await;

    assert_eq!(fast, Some(Settled::Applied));
    assert_eq!(slow.await.unwrap(), Some(Settled::Stale));

    let state = dashboard.snapshot();
    assert_eq!(state.period, Period::Year);
    assert_eq!(state.summary.as_ref().unwrap().period, Period::Year);
    assert_eq!(state.phase(), LoadPhase::Ready);
}

#[tokio::test]
async fn test_goals_latest_period_wins() {
    let goals = Goals::new(slow_api(), Period::Month);
    goals.load().await;

    let slow = {
        let goals = goals.clone();
        tokio::spawn(async move { goals.set_period(Period::Week).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    goals.set_period(Period::Quarter).await;
    assert_eq!(slow.await.unwrap(), Some(Settled::Stale));

    let state = goals.snapshot();
    assert_eq!(state.period, Period::Quarter);
    assert_eq!(state.goals.as_ref().unwrap()[0].days_remaining, 90);
}

#[tokio::test]
async fn test_transactions_latest_sort_wins() {
    let list = Transactions::new(slow_api());
    list.load().await;

    let slow = {
        let list = list.clone();
        tokio::spawn(async move { list.set_sort(SortBy::AmountAsc).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    list.set_sort(SortBy::AmountDesc).await;
    assert_eq!(slow.await.unwrap(), Some(Settled::Stale));

    let state = list.snapshot();
    assert_eq!(state.sort_by, SortBy::AmountDesc);
    assert_eq!(state.transactions[0].merchant, "DStv");
}

#[tokio::test]
async fn test_loading_phase_is_observable_with_latency() {
    let dashboard = Dashboard::new(MockApi::new().with_latency_scale(0.1), Period::Month);
    let mount = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.mount().await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(dashboard.snapshot().phase(), LoadPhase::Loading);

    mount.await.unwrap();
    assert_eq!(dashboard.snapshot().phase(), LoadPhase::Ready);
}
