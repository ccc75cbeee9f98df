//! CLI command tests
//!
//! This module contains all tests for the CLI commands. Commands run against
//! the in-process mock with latency disabled.

use tally_core::{
    models::{Period, SortBy},
    ApiClient, Endpoint, LoadPhase, MockApi,
};

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate, Output};
use clap::Parser;

fn mock() -> ApiClient {
    ApiClient::mock()
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Pick n Pay", 20), "Pick n Pay");
    assert_eq!(truncate("Woolworths Food Market", 10), "Woolwor...");
    // Multi-byte characters are not split
    assert_eq!(truncate("Café Café Café", 8), "Café ...");
}

#[test]
fn test_period_selector_marks_active() {
    assert_eq!(
        commands::period_selector(Period::Quarter),
        " 7d   30d  [90d]  1y "
    );
}

#[test]
fn test_check_turns_error_into_failure() {
    assert!(commands::check(None).is_ok());
    let err = commands::check(Some("Failed to load goals.")).unwrap_err();
    assert_eq!(err.to_string(), "Failed to load goals.");
}

#[test]
fn test_api_client_selection() {
    let client = commands::api_client(Some("http://localhost:3000/"), 7);
    assert!(matches!(client, ApiClient::Http(ref api) if api.base_url() == "http://localhost:3000"));
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_dashboard_period() {
    let cli = Cli::try_parse_from(["tally", "dashboard", "--period", "90d"]).unwrap();
    assert!(matches!(cli.command, Commands::Dashboard { period: Period::Quarter }));
    assert!(!cli.json);
}

#[test]
fn test_parse_rejects_unknown_period() {
    assert!(Cli::try_parse_from(["tally", "goals", "--period", "2w"]).is_err());
}

#[test]
fn test_parse_transactions_with_global_flags() {
    let cli = Cli::try_parse_from([
        "tally",
        "transactions",
        "--sort",
        "amount_asc",
        "-c",
        "Dining",
        "--pages",
        "2",
        "--json",
        "--customer",
        "42",
    ])
    .unwrap();
    assert!(cli.json);
    assert_eq!(cli.customer, 42);
    match cli.command {
        Commands::Transactions {
            sort,
            category,
            pages,
        } => {
            assert_eq!(sort, SortBy::AmountAsc);
            assert_eq!(category.as_deref(), Some("Dining"));
            assert_eq!(pages, 2);
        }
        _ => panic!("expected transactions command"),
    }
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["tally", "serve", "--fail", "goals,trends"]).unwrap();
    match cli.command {
        Commands::Serve {
            port,
            host,
            no_latency,
            fail,
            ..
        } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert!(!no_latency);
            assert_eq!(fail.as_deref(), Some("goals,trends"));
        }
        _ => panic!("expected serve command"),
    }
}

// ========== Dashboard Command Tests ==========

#[tokio::test]
async fn test_load_dashboard() {
    let view = commands::load_dashboard(mock(), Period::Year).await;
    assert_eq!(view.overview.phase(), LoadPhase::Ready);
    assert_eq!(view.overview.period, Period::Year);
    assert_eq!(view.goals.phase(), LoadPhase::Ready);
    // Goals panel stays on the default period
    assert_eq!(view.goals.period, Period::Month);
}

#[tokio::test]
async fn test_render_dashboard() {
    let view = commands::load_dashboard(mock(), Period::Month).await;
    let text = commands::render_dashboard(&view, 9);

    assert!(text.contains("Good morning, John"));
    assert!(text.contains("[JD]"));
    assert!(text.contains("member since Jan 2023"));
    assert!(text.contains("R 4 250,75"));
    assert!(text.contains("↑ 12.5%"));
    assert!(text.contains("↓ 3.2%"));
    assert!(text.contains("R 4 251 total"));
    assert!(text.contains("Dec 2024"));
    assert!(text.contains("Exceeded"));
}

#[tokio::test]
async fn test_render_dashboard_with_failure() {
    let api = MockApi::instant();
    api.fail(Endpoint::Summary);
    let view = commands::load_dashboard(ApiClient::Mock(api), Period::Month).await;

    assert_eq!(view.overview.phase(), LoadPhase::Failed);
    let text = commands::render_dashboard(&view, 20);
    assert!(text.contains("Good evening"));
    assert!(text.contains("Failed to load dashboard data."));
    // Goals still load independently
    assert!(text.contains("Entertainment"));
}

#[tokio::test]
async fn test_cmd_dashboard_json() {
    let result = commands::cmd_dashboard(mock(), Period::Week, Output::Json).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_dashboard_fails_on_error() {
    let api = MockApi::instant();
    api.fail(Endpoint::Trends);
    let result = commands::cmd_dashboard(ApiClient::Mock(api), Period::Month, Output::Text).await;
    assert!(result.is_err());
}

#[test]
fn test_dashboard_view_serializes() {
    let view = commands::DashboardView {
        overview: tally_core::DashboardState::new(Period::Quarter),
        goals: tally_core::GoalsState::new(Period::Month),
    };
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["overview"]["period"], "90d");
    assert_eq!(json["overview"]["phase"], "idle");
    assert!(json["overview"]["error"].is_null());
}

// ========== Transactions Command Tests ==========

#[tokio::test]
async fn test_load_transactions_pages() {
    let state = commands::load_transactions(mock(), SortBy::DateDesc, None, 1).await;
    assert_eq!(state.transactions.len(), 10);
    assert!(state.has_more());

    let state = commands::load_transactions(mock(), SortBy::DateDesc, None, 5).await;
    assert_eq!(state.transactions.len(), 15);
    assert!(!state.has_more());
}

#[tokio::test]
async fn test_load_transactions_filtered() {
    let state =
        commands::load_transactions(mock(), SortBy::AmountAsc, Some("transportation"), 1).await;
    let merchants: Vec<&str> = state.transactions.iter().map(|t| t.merchant.as_str()).collect();
    assert_eq!(merchants, vec!["Gautrain", "Uber", "Shell"]);
}

#[tokio::test]
async fn test_render_transactions() {
    let state = commands::load_transactions(mock(), SortBy::DateDesc, Some("Groceries"), 1).await;
    let text = commands::render_transactions(&state);
    assert!(text.contains("16 Sep 2024"));
    assert!(text.contains("R 245,80"));
    assert!(text.contains("Showing 3 of 3"));
    assert!(!text.contains("--pages"));
}

#[tokio::test]
async fn test_render_empty_transactions() {
    let state = commands::load_transactions(mock(), SortBy::DateDesc, Some("Travel"), 1).await;
    let text = commands::render_transactions(&state);
    assert!(text.contains("No transactions found."));
}

// ========== Goals / Filters Command Tests ==========

#[tokio::test]
async fn test_cmd_goals() {
    let result = commands::cmd_goals(mock(), Period::Week, Output::Text).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_goals_failure() {
    let api = MockApi::instant();
    api.fail(Endpoint::Goals);
    let result = commands::cmd_goals(ApiClient::Mock(api), Period::Month, Output::Json).await;
    assert!(result.is_err());
}

#[test]
fn test_render_goals() {
    let mut state = tally_core::GoalsState::new(Period::Month);
    state.goals = Some(
        tally_core::endpoints::goals(&tally_core::PeriodParams::of(Period::Month)).goals,
    );
    let text = commands::render_goals(&state);
    assert!(text.contains("Budget Goals (30d)"));
    assert!(text.contains("R 1 131 of R 500"));
    assert!(text.contains("[####################]"));
    assert!(text.contains("On track"));
    assert!(text.contains("Warning"));
}

#[tokio::test]
async fn test_render_goals_after_failed_period_change() {
    let api = MockApi::instant();
    let goals = tally_core::Goals::new(api.clone(), Period::Month);
    goals.load().await;
    api.fail(Endpoint::Goals);
    goals.set_period(Period::Year).await;

    let text = commands::render_goals(&goals.snapshot());
    // Still labelled with the period the figures belong to
    assert!(text.contains("Budget Goals (30d)"));
    assert!(text.contains("30 days left"));
    assert!(text.contains("Failed to load goals."));
}

#[tokio::test]
async fn test_cmd_filters() {
    assert!(commands::cmd_filters(mock(), Output::Text).await.is_ok());

    let api = MockApi::instant();
    api.fail(Endpoint::Filters);
    assert!(commands::cmd_filters(ApiClient::Mock(api), Output::Text)
        .await
        .is_err());
}

#[test]
fn test_render_filters() {
    let text = commands::render_filters(&tally_core::endpoints::filters());
    assert!(text.contains("Groceries"));
    assert!(text.contains("#FF6B6B"));
    assert!(text.contains("Last 90 days"));
}
