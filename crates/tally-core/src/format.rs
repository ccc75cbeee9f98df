//! Display formatting for amounts, dates and goal progress
//!
//! Amounts use the South African convention: `R` prefix, space-grouped
//! thousands and a comma as decimal separator.

use chrono::{DateTime, NaiveDate, Utc};

/// Format a rand amount, e.g. `R 4 250,75`
pub fn format_zar(amount: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, amount.abs());
    let (whole, fraction) = match fixed.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    // Rounding can turn -0.004 into "0.00"; don't print "-R 0,00"
    if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        out.push('-');
    }
    out.push_str("R ");
    out.push_str(&group_thousands(whole));
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Compact axis label, e.g. 4250.75 -> `R4k`
pub fn format_thousands(amount: f64) -> String {
    format!("R{:.0}k", amount / 1000.0)
}

/// Change against the previous period, e.g. `↑ 12.5%`
pub fn format_delta(pct: f64) -> String {
    let arrow = if pct >= 0.0 { '↑' } else { '↓' };
    format!("{} {:.1}%", arrow, pct.abs())
}

/// `2024-09` -> `Sep 2024`; anything else is returned unchanged
pub fn format_month(month: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d")
        .map(|first| first.format("%b %Y").to_string())
        .unwrap_or_else(|_| month.to_string())
}

/// `16 Sep 2024`
pub fn format_txn_date(date: &DateTime<Utc>) -> String {
    date.format("%d %b %Y").to_string()
}

/// `Jan 2023`
pub fn format_member_since(join_date: NaiveDate) -> String {
    join_date.format("%b %Y").to_string()
}

/// Greeting for the hour of day (0-23)
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    }
}

/// Text progress bar; the fill is capped at 100% even when over budget
pub fn progress_bar(percentage_used: f64, width: usize) -> String {
    let ratio = (percentage_used / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
