//! BDD test world for twinboard service

use std::collections::VecDeque;
use std::sync::Arc;

use cucumber::World;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use twinboard::config::Config;
use twinboard::edit::SaveOutcome;
use twinboard::page::PageHandle;
use twinboard::state::AppState;
use twinboard::twin::{RawTwin, TwinView};
use twinboard::twin_client::{PatchOperation, TwinStore, UpdateResponse};

/// A twin store that answers from scripted queues and records every call.
///
/// The last queued query result is repeated once the queue runs down to it.
#[derive(Debug, Default)]
pub struct ScriptedTwinStore {
    pub query_results: RwLock<VecDeque<Result<Vec<RawTwin>, String>>>,
    pub update_results: RwLock<VecDeque<Result<u16, String>>>,
    pub queries: RwLock<Vec<String>>,
    pub updates: RwLock<Vec<(String, Vec<PatchOperation>)>>,
}

impl ScriptedTwinStore {
    pub async fn push_query_result(&self, result: Result<Vec<RawTwin>, String>) {
        self.query_results.write().await.push_back(result);
    }

    pub async fn push_update_result(&self, result: Result<u16, String>) {
        self.update_results.write().await.push_back(result);
    }
}

#[async_trait::async_trait]
impl TwinStore for ScriptedTwinStore {
    async fn query_twins(&self, query: &str) -> twinboard::Result<Vec<RawTwin>> {
        self.queries.write().await.push(query.to_string());

        let mut results = self.query_results.write().await;
        let next = if results.len() > 1 {
            results.pop_front()
        } else {
            results.front().cloned()
        };

        match next.unwrap_or_else(|| Ok(Vec::new())) {
            Ok(records) => Ok(records),
            Err(e) => Err(twinboard::TwinboardError::Query(e)),
        }
    }

    async fn update_twin(
        &self,
        twin_id: &str,
        patch: &[PatchOperation],
    ) -> twinboard::Result<UpdateResponse> {
        self.updates
            .write()
            .await
            .push((twin_id.to_string(), patch.to_vec()));

        match self.update_results.write().await.pop_front() {
            Some(Ok(status)) => Ok(UpdateResponse { status }),
            Some(Err(e)) => Err(twinboard::TwinboardError::Http(e)),
            None => Ok(UpdateResponse { status: 204 }),
        }
    }
}

#[derive(Debug, Default, World)]
pub struct TwinboardWorld {
    // Mapping
    pub raw_records: Vec<RawTwin>,
    pub mapped: Vec<TwinView>,

    // List pages and edit modal
    pub store: Option<Arc<ScriptedTwinStore>>,
    pub page: Option<PageHandle>,
    pub opened: Option<bool>,
    pub last_save: Option<SaveOutcome>,

    // Dashboard routes
    pub app: Option<AppState>,
    pub response_status: Option<u16>,
    pub response_body: Option<String>,

    // Builder and lifecycle
    pub lifecycle_config: Option<Config>,
    pub lifecycle_cancel: Option<CancellationToken>,
    pub lifecycle_http: Option<Arc<crate::steps::lifecycle_steps::RecordingHttpClient>>,
    pub lifecycle_build_succeeded: Option<bool>,
    pub lifecycle_start_succeeded: Option<bool>,
}

impl TwinboardWorld {
    pub fn store(&mut self) -> Arc<ScriptedTwinStore> {
        Arc::clone(
            self.store
                .get_or_insert_with(|| Arc::new(ScriptedTwinStore::default())),
        )
    }
}
