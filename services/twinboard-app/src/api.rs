//! Client-side API fetch helpers
//!
//! These types mirror the server-side JSON response structures
//! and are shared between SSR and client-side hydration.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Navigation entry as returned by /api/routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub path: String,
    pub name: String,
    pub icon: String,
    pub layout: String,
}

impl RouteResponse {
    pub fn href(&self) -> String {
        format!("{}{}", self.layout, self.path)
    }
}

/// Headline number as returned by /api/dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCardResponse {
    pub title: String,
    pub value: u32,
    pub icon: String,
    pub color: String,
    pub footer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub cards: Vec<StatCardResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayResponse {
    pub name: Option<String>,
    pub order: Option<serde_json::Value>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// One twin card of a list page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwinCardResponse {
    pub name: String,
    pub temperature: Option<i64>,
    pub humidity: Option<i64>,
    pub last_updated: Option<String>,
    pub warning: bool,
    pub display: DisplayResponse,
    pub last_updated_display: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditFieldsResponse {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub order: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditResponse {
    pub phase: String,
    pub twin_id: String,
    pub fields: EditFieldsResponse,
}

impl EditResponse {
    pub fn is_open(&self) -> bool {
        self.phase != "closed"
    }

    pub fn is_saving(&self) -> bool {
        self.phase == "saving"
    }

    /// The twin whose modal is showing, if any
    pub fn open_twin_id(&self) -> Option<&str> {
        self.is_open().then_some(self.twin_id.as_str())
    }
}

/// Text the edit modal holds locally until Save is pressed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditDraft {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub order: String,
}

impl EditDraft {
    pub fn from_fields(fields: &EditFieldsResponse) -> Self {
        Self {
            name: fields.name.clone(),
            color: fields.color.clone(),
            icon: fields.icon.clone(),
            order: value_text(&fields.order),
        }
    }

    /// Bodies for `/edit/input`, one per field, in the order they are sent
    pub fn input_requests(&self) -> Vec<serde_json::Value> {
        [
            ("modalName", &self.name),
            ("modalColor", &self.color),
            ("modalIcon", &self.icon),
            ("modalOrder", &self.order),
        ]
        .into_iter()
        .map(|(field, value)| serde_json::json!({ "field": field, "value": value }))
        .collect()
    }
}

/// List page state as returned by /api/pages/{page}
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageResponse {
    pub title: String,
    pub slug: String,
    pub load_state: String,
    pub twins: Vec<TwinCardResponse>,
    pub edit: EditResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResultResponse {
    pub outcome: String,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of /api/pages/{page}/edit/save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    pub result: SaveResultResponse,
    pub page: PageResponse,
}

/// Text shown in an input for a display value that may be a number or text
pub fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    // In SSR mode there is no origin to fetch from; pages render their
    // loading state and hydrate fills them in.
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}{}", origin()?, path);
        let resp = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("{}", e))?;
        if !resp.ok() {
            return Err(format!("GET {} returned {}", path, resp.status()));
        }
        resp.json().await.map_err(|e| format!("{}", e))
    }

    #[cfg(not(feature = "hydrate"))]
    {
        Err(format!("GET {} is only available in the browser", path))
    }
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    #[cfg(feature = "hydrate")]
    {
        let url = format!("{}{}", origin()?, path);
        let resp = gloo_net::http::Request::post(&url)
            .json(body)
            .map_err(|e| format!("{}", e))?
            .send()
            .await
            .map_err(|e| format!("{}", e))?;
        if !resp.ok() {
            return Err(format!("POST {} returned {}", path, resp.status()));
        }
        resp.json().await.map_err(|e| format!("{}", e))
    }

    #[cfg(not(feature = "hydrate"))]
    {
        let _ = body;
        Err(format!("POST {} is only available in the browser", path))
    }
}

#[cfg(feature = "hydrate")]
fn origin() -> Result<String, String> {
    let window = web_sys::window().ok_or("no window")?;
    window.location().origin().map_err(|e| format!("{:?}", e))
}
