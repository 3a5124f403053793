//! Azure Digital Twins data-plane client

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::config::TwinStoreConfig;
use crate::io::HttpClient;
use crate::twin::{FieldValue, RawTwin};

pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// One JSON-patch operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchOperation {
    pub op: String,
    pub path: String,
    pub value: FieldValue,
}

impl PatchOperation {
    pub fn replace(path: impl Into<String>, value: FieldValue) -> Self {
        Self {
            op: "replace".to_string(),
            path: path.into(),
            value,
        }
    }
}

/// Outcome of a twin update; the store signals success with 204
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResponse {
    pub status: u16,
}

/// Query and update access to a twin store
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait TwinStore: Send + Sync {
    /// Run a query and return every matching record, in store order
    async fn query_twins(&self, query: &str) -> crate::Result<Vec<RawTwin>>;

    /// Apply a patch to a twin and report the status the store answered with
    async fn update_twin(
        &self,
        twin_id: &str,
        patch: &[PatchOperation],
    ) -> crate::Result<UpdateResponse>;
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    #[serde(rename = "continuationToken", skip_serializing_if = "Option::is_none")]
    continuation_token: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(default)]
    value: Vec<RawTwin>,
    #[serde(rename = "continuationToken", default)]
    continuation_token: Option<String>,
}

/// Twin store backed by the Azure Digital Twins REST API
pub struct DigitalTwinsClient {
    endpoint: Url,
    api_version: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for DigitalTwinsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalTwinsClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl DigitalTwinsClient {
    pub fn new(config: &TwinStoreConfig, http: Arc<dyn HttpClient>) -> crate::Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            crate::TwinboardError::Config(format!(
                "Invalid twin store endpoint '{}': {}",
                config.endpoint, e
            ))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(crate::TwinboardError::Config(format!(
                "Twin store endpoint '{}' cannot be used as a base URL",
                config.endpoint
            )));
        }

        tracing::debug!("Created DigitalTwinsClient for {}", endpoint);

        Ok(Self {
            endpoint,
            api_version: config.api_version.clone(),
            http,
        })
    }

    /// `{endpoint}/{segments...}?api-version={v}` with each segment escaped
    fn url(&self, segments: &[&str]) -> String {
        let mut url = self.endpoint.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("api-version", &self.api_version);
        url.into()
    }
}

#[async_trait]
impl TwinStore for DigitalTwinsClient {
    async fn query_twins(&self, query: &str) -> crate::Result<Vec<RawTwin>> {
        let url = self.url(&["query"]);
        let mut records = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let request = match &continuation {
                None => QueryRequest {
                    query: Some(query),
                    continuation_token: None,
                },
                Some(token) => QueryRequest {
                    query: None,
                    continuation_token: Some(token),
                },
            };
            let body = serde_json::to_string(&request)?;
            let response = self.http.post_json(&url, &body).await?;

            if !response.is_success() {
                return Err(crate::TwinboardError::Query(format!(
                    "status {}: {}",
                    response.status, response.body
                )));
            }

            let page: QueryPage = serde_json::from_str(&response.body)?;
            tracing::debug!(
                "Query page returned {} records (more: {})",
                page.value.len(),
                page.continuation_token.is_some()
            );
            records.extend(page.value);

            match page.continuation_token {
                Some(token) if continuation.as_deref() == Some(token.as_str()) => {
                    tracing::warn!("Query returned the same continuation token twice, stopping");
                    break;
                }
                Some(token) => continuation = Some(token),
                None => break,
            }
        }

        Ok(records)
    }

    async fn update_twin(
        &self,
        twin_id: &str,
        patch: &[PatchOperation],
    ) -> crate::Result<UpdateResponse> {
        let url = self.url(&["digitaltwins", twin_id]);
        let body = serde_json::to_string(patch)?;
        tracing::debug!("Updating twin '{}' with {} operations", twin_id, patch.len());

        let response = self
            .http
            .patch(&url, JSON_PATCH_CONTENT_TYPE, &body)
            .await?;

        Ok(UpdateResponse {
            status: response.status,
        })
    }
}
