//! Maps raw twin records into view models

use serde_json::Value;

use crate::twin::{DisplayView, FieldValue, RawTwin, TwinView};

pub const DEFAULT_ICON: &str = "content_copy";
pub const DEFAULT_COLOR: &str = "primary";
pub const DEFAULT_ORDER: i64 = 0;

/// Property whose metadata supplies the card's last-updated time
const LAST_UPDATED_PROPERTY: &str = "Humidity";

/// Map records one-to-one, preserving the order the store returned them in
pub fn map_twins(records: &[RawTwin]) -> Vec<TwinView> {
    records.iter().map(map_twin).collect()
}

/// Map a single record. Never fails: missing fields surface as `None`.
pub fn map_twin(raw: &RawTwin) -> TwinView {
    let name = raw.id().unwrap_or_default().to_string();

    let display = match raw.get("Display") {
        None | Some(Value::Null) => default_display(&name),
        // A display block is copied field by field with no fallback to the
        // defaults, so a partial block leaves holes.
        Some(block) => DisplayView {
            name: block.get("Name").and_then(Value::as_str).map(str::to_string),
            order: block.get("Order").and_then(FieldValue::from_json),
            icon: block.get("Icon").and_then(Value::as_str).map(str::to_string),
            color: block.get("Color").and_then(Value::as_str).map(str::to_string),
        },
    };

    TwinView {
        temperature: raw.number("Temperature").and_then(round_reading),
        humidity: raw.number("Humidity").and_then(round_reading),
        last_updated: raw.last_update_time(LAST_UPDATED_PROPERTY),
        warning: false,
        display,
        name,
    }
}

pub fn default_display(name: &str) -> DisplayView {
    DisplayView {
        name: Some(name.to_string()),
        order: Some(FieldValue::int(DEFAULT_ORDER)),
        icon: Some(DEFAULT_ICON.to_string()),
        color: Some(DEFAULT_COLOR.to_string()),
    }
}

/// Round to the nearest integer with halves going up (2.5 -> 3, -2.5 -> -2)
pub fn round_reading(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    };
    Some(rounded as i64)
}
