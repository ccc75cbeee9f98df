//! Filters command: available categories and date presets

use anyhow::{Context, Result};
use tally_core::{models::FiltersResponse, ApiClient, DashboardApi};

use super::{Output, RULE};

pub async fn cmd_filters(api: ApiClient, output: Output) -> Result<()> {
    let filters = api.filters().await.context("Failed to load filters")?;
    output.emit(&filters, || render_filters(&filters))
}

pub fn render_filters(filters: &FiltersResponse) -> String {
    let mut lines = vec![String::new(), "  🏷️  Categories".to_string(), RULE.to_string()];
    for category in &filters.categories {
        lines.push(format!(
            "   {:<15} {}  {}",
            category.name, category.color, category.icon
        ));
    }

    lines.push(String::new());
    lines.push("  📅 Date Ranges".to_string());
    lines.push(RULE.to_string());
    for preset in &filters.date_range_presets {
        lines.push(format!("   {:<4} {}", preset.value, preset.label));
    }

    lines.join("\n")
}
