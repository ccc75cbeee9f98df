//! Dashboard command: the spending overview screen

use anyhow::Result;
use chrono::Timelike;
use serde::Serialize;
use tally_core::{
    format::{
        format_delta, format_member_since, format_month, format_thousands, format_zar, greeting,
    },
    models::Period,
    ApiClient, Dashboard, DashboardState, Goals, GoalsState,
};

use super::{check, goals::render_goals, Output, RULE};

const BAR_WIDTH: usize = 24;

#[derive(Serialize)]
pub struct DashboardView {
    pub overview: DashboardState,
    pub goals: GoalsState,
}

pub async fn cmd_dashboard(api: ApiClient, period: Period, output: Output) -> Result<()> {
    let view = load_dashboard(api, period).await;
    let hour = chrono::Local::now().hour();

    output.emit(&view, || render_dashboard(&view, hour))?;
    check(view.overview.error())?;
    check(view.goals.error())
}

/// Mount the overview and the goals panel side by side
pub async fn load_dashboard(api: ApiClient, period: Period) -> DashboardView {
    let dashboard = Dashboard::new(api.clone(), period);
    let goals = Goals::new(api, Period::default());

    tokio::join!(dashboard.mount(), goals.load());

    DashboardView {
        overview: dashboard.snapshot(),
        goals: goals.snapshot(),
    }
}

pub fn render_dashboard(view: &DashboardView, hour: u32) -> String {
    let state = &view.overview;
    let mut lines = vec![String::new()];

    match &state.profile {
        Some(profile) => {
            let first_name = profile.name.split_whitespace().next().unwrap_or("");
            lines.push(format!("  {}, {} 👋", greeting(hour), first_name));
            lines.push(format!(
                "  [{}] {} · {} member since {}",
                profile.initials(),
                profile.email,
                profile.account_type.as_str(),
                format_member_since(profile.join_date)
            ));
        }
        None => lines.push(format!("  {}", greeting(hour))),
    }

    lines.push(String::new());
    lines.push(format!("  Period: {}", period_selector(state.period)));

    if let Some(summary) = &state.summary {
        lines.push(String::new());
        lines.push("  💰 Summary".to_string());
        lines.push(RULE.to_string());
        lines.push(format!(
            "   Total Spent      {:>14}   {} vs prev period",
            format_zar(summary.total_spent, 2),
            format_delta(summary.compared_to_previous.spent_change)
        ));
        lines.push(format!(
            "   Transactions     {:>14}   {} vs prev period",
            summary.transaction_count,
            format_delta(summary.compared_to_previous.transaction_change)
        ));
        lines.push(format!(
            "   Avg Transaction  {:>14}",
            format_zar(summary.average_transaction, 2)
        ));
        lines.push(format!("   Top Category     {:>14}", summary.top_category));
    }

    if let Some(breakdown) = &state.categories {
        lines.push(String::new());
        lines.push(format!(
            "  🍩 Spending by Category ({} total)",
            format_zar(breakdown.total_amount, 0)
        ));
        lines.push(RULE.to_string());
        for category in &breakdown.categories {
            lines.push(format!(
                "   {:<15} {:>12} {:>5.1}%  {:>3} txns",
                category.name,
                format_zar(category.amount, 2),
                category.percentage,
                category.transaction_count
            ));
        }
    }

    if let Some(trends) = &state.trends {
        let peak = trends
            .trends
            .iter()
            .map(|t| t.total_spent)
            .fold(0.0_f64, f64::max);
        lines.push(String::new());
        lines.push("  📈 Monthly Trends".to_string());
        lines.push(RULE.to_string());
        for trend in &trends.trends {
            let filled = if peak > 0.0 {
                ((trend.total_spent / peak) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            lines.push(format!(
                "   {:<9} {:<width$} {:>6}",
                format_month(&trend.month),
                "█".repeat(filled),
                format_thousands(trend.total_spent),
                width = BAR_WIDTH
            ));
        }
    }

    if let Some(error) = state.error() {
        lines.push(String::new());
        lines.push(format!("  ⚠️  {}", error));
    }

    lines.push(render_goals(&view.goals));
    lines.join("\n")
}

/// Period buttons with the active one bracketed
pub fn period_selector(active: Period) -> String {
    Period::ALL
        .iter()
        .map(|p| {
            if *p == active {
                format!("[{}]", p)
            } else {
                format!(" {} ", p)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
