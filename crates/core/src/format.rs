//! Display formatting for amounts and alert times.

use chrono::NaiveDateTime;

use crate::types::Money;

/// Format an amount as Indian rupees with lakh/crore digit grouping,
/// e.g. `₹1,25,000.00`.
pub fn format_inr(amount: Money) -> String {
    if !amount.is_finite() {
        return format!("₹{amount}");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };

    format!("{sign}₹{}.{fraction}", group_indian(whole))
}

/// Last three digits, then groups of two: `1234567` → `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

/// Alert clock time, e.g. `2:05 PM`.
pub fn format_clock(at: NaiveDateTime) -> String {
    at.format("%-I:%M %p").to_string()
}
