//! Twin records as returned by the store and the view models built from them

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A twin record exactly as the store returned it.
///
/// The store owns the shape; accessors are lenient and return `None` for
/// anything missing or of an unexpected type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTwin(pub Map<String, Value>);

impl RawTwin {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The `$dtId` identifier
    pub fn id(&self) -> Option<&str> {
        self.get("$dtId").and_then(Value::as_str)
    }

    /// A numeric property such as `Temperature`
    pub fn number(&self, property: &str) -> Option<f64> {
        self.get(property).and_then(Value::as_f64)
    }

    /// `$metadata.<property>.lastUpdateTime`
    pub fn last_update_time(&self, property: &str) -> Option<DateTime<Utc>> {
        let raw = self
            .get("$metadata")?
            .get(property)?
            .get("lastUpdateTime")?
            .as_str()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .ok()
    }
}

impl From<Value> for RawTwin {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => RawTwin(map),
            _ => RawTwin::default(),
        }
    }
}

/// A display or patch value that is either a number or free text.
///
/// Text shows up when the order field holds input that did not parse as an
/// integer; it is stored and sent to the twin store unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(Number),
    Text(String),
}

impl FieldValue {
    pub fn int(value: i64) -> Self {
        FieldValue::Number(Number::from(value))
    }

    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// Read a JSON value, ignoring anything that is neither number nor string
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(FieldValue::Number(n.clone())),
            Value::String(s) => Some(FieldValue::Text(s.clone())),
            _ => None,
        }
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::int(0)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Presentation metadata of a twin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayView {
    pub name: Option<String>,
    pub order: Option<FieldValue>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Display-ready view of a single twin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinView {
    pub name: String,
    pub temperature: Option<i64>,
    pub humidity: Option<i64>,
    pub last_updated: Option<DateTime<Utc>>,
    /// Never set; kept for parity with the card layout
    pub warning: bool,
    pub display: DisplayView,
}
