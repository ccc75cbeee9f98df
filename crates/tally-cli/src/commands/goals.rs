//! Goals command: budget progress per category

use anyhow::Result;
use tally_core::{
    format::{format_zar, progress_bar},
    models::Period,
    ApiClient, Goals, GoalsState,
};

use super::{check, Output, RULE};

pub async fn cmd_goals(api: ApiClient, period: Period, output: Output) -> Result<()> {
    let goals = Goals::new(api, period);
    goals.load().await;
    let state = goals.snapshot();

    output.emit(&state, || render_goals(&state))?;
    check(state.error())
}

pub fn render_goals(state: &GoalsState) -> String {
    let mut lines = vec![
        String::new(),
        format!(
            "  🎯 Budget Goals ({})",
            state.loaded_period.unwrap_or(state.period)
        ),
        RULE.to_string(),
    ];

    match &state.goals {
        Some(goals) if !goals.is_empty() => {
            for goal in goals {
                lines.push(format!(
                    "   {:<15} {} {:>4.0}% used  {:<8}",
                    goal.category,
                    progress_bar(goal.percentage_used, 20),
                    goal.percentage_used,
                    goal.status.label()
                ));
                lines.push(format!(
                    "   {:<15} {} of {} · {} days left",
                    "",
                    format_zar(goal.current_spent, 0),
                    format_zar(goal.monthly_budget, 0),
                    goal.days_remaining
                ));
            }
        }
        Some(_) => lines.push("   No goals set.".to_string()),
        None if state.error().is_none() => lines.push("   Loading...".to_string()),
        None => {}
    }

    if let Some(error) = state.error() {
        lines.push(format!("   ⚠️  {}", error));
    }

    lines.join("\n")
}
