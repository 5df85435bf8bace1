//! Display helpers for amounts, dates and status badges.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use crate::net::types::Urgency;

/// Format a dollar amount with thousands separators and no cents,
/// e.g. `12500.0` -> `"$12,500"`.
pub fn currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0".to_owned();
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = amount.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if whole < 0 { format!("-${grouped}") } else { format!("${grouped}") }
}

/// Date part of an ISO-8601 timestamp; anything else passes through.
pub fn short_date(timestamp: &str) -> &str {
    match timestamp.split_once('T') {
        Some((date, _)) if date.len() == 10 => date,
        _ => timestamp,
    }
}

/// Badge modifier class for an application or verification status.
pub fn status_class(status: &str) -> &'static str {
    match status.to_ascii_lowercase().as_str() {
        "approved" | "verified" | "funded" | "completed" => "badge badge--success",
        "rejected" | "declined" => "badge badge--danger",
        "under_review" | "in_review" => "badge badge--info",
        _ => "badge badge--pending",
    }
}

/// Human label for a snake_case status value.
pub fn status_label(status: &str) -> String {
    let mut out = String::with_capacity(status.len());
    for (i, word) in status.split(['_', ' ']).filter(|w| !w.is_empty()).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_ascii_lowercase());
        }
    }
    if out.is_empty() { "Pending".to_owned() } else { out }
}

pub fn urgency_class(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Low => "badge badge--low",
        Urgency::Medium => "badge badge--medium",
        Urgency::High => "badge badge--high",
        Urgency::Critical => "badge badge--critical",
    }
}
