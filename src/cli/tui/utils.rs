//! Shared utilities for TUI views

use chrono::NaiveDate;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}

/// Compact deadline label relative to today: "today", "1d", "overdue 2d"
pub fn deadline_label(deadline: NaiveDate, today: NaiveDate) -> String {
    let days = (deadline - today).num_days();
    if days == 0 {
        "today".to_string()
    } else if days > 0 {
        format!("{}d", days)
    } else {
        format!("overdue {}d", -days)
    }
}
