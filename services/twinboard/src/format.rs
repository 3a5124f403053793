//! Display formatting helpers

use chrono::{DateTime, Utc};

use crate::twin::FieldValue;

/// Format a last-updated timestamp for a card footer
pub fn datetime_formatter(timestamp: Option<&DateTime<Utc>>) -> String {
    match timestamp {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => "Never".to_string(),
    }
}

/// Format a rounded reading, showing a dash when the store had no number
pub fn reading(value: Option<i64>) -> String {
    value.map_or_else(|| "–".to_string(), |v| v.to_string())
}

pub fn optional_field(value: Option<&FieldValue>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}

/// Escape text for inclusion in HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
