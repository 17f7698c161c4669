//! Shared formatting helpers for terminal tables

use crate::models::{AlertTier, Money};

/// Money with the configured currency symbol, right-aligned in `width`
pub fn money_cell(amount: Money, symbol: &str, width: usize) -> String {
    right_align(&amount.format_with_symbol(symbol), width)
}

/// Utilization as shown in tables: always two decimals
pub fn format_percentage(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Marker for an alert tier, readable without color
pub fn tier_marker(tier: AlertTier) -> &'static str {
    match tier {
        AlertTier::Green => "ok",
        AlertTier::Yellow => "WARN",
        AlertTier::Red => "OVER",
    }
}

/// Horizontal bar for `value` relative to `max_value`, capped at full width
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

pub fn right_align(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}
