//! Twin list pages: load workflow and edit workflow over shared page state

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::ModelsConfig;
use crate::edit::{EditField, EditFields, EditPhase, EditSession, SaveOutcome};
use crate::format::datetime_formatter;
use crate::mapper::map_twins;
use crate::twin::TwinView;
use crate::twin_client::TwinStore;

/// The admin pages that list twins of one model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Floors,
    Rooms,
    Devices,
}

impl PageKind {
    pub const ALL: [PageKind; 3] = [PageKind::Floors, PageKind::Rooms, PageKind::Devices];

    /// Path segment under `/admin`
    pub fn slug(&self) -> &'static str {
        match self {
            PageKind::Floors => "location",
            PageKind::Rooms => "rooms",
            PageKind::Devices => "devices",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        PageKind::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    pub fn title(&self) -> &'static str {
        match self {
            PageKind::Floors => "Floors",
            PageKind::Rooms => "Rooms",
            PageKind::Devices => "Devices",
        }
    }

    pub fn model_id<'a>(&self, models: &'a ModelsConfig) -> &'a str {
        match self {
            PageKind::Floors => &models.floor,
            PageKind::Rooms => &models.room,
            PageKind::Devices => &models.device,
        }
    }

    pub fn query(&self, models: &ModelsConfig) -> String {
        model_query(self.model_id(models))
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Query selecting every twin of a model
pub fn model_query(model_id: &str) -> String {
    format!(
        "SELECT * FROM digitaltwins WHERE IS_OF_MODEL('{}')",
        model_id
    )
}

/// Load workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Everything one list page owns
#[derive(Debug)]
pub struct TwinListState {
    pub kind: PageKind,
    pub query: String,
    pub twins: Vec<TwinView>,
    pub load_state: LoadState,
    pub edit: EditSession,
}

impl TwinListState {
    pub fn new(kind: PageKind, query: String) -> Self {
        Self {
            kind,
            query,
            twins: Vec::new(),
            load_state: LoadState::Idle,
            edit: EditSession::new(),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            title: self.kind.title().to_string(),
            slug: self.kind.slug().to_string(),
            load_state: self.load_state,
            twins: self
                .twins
                .iter()
                .map(|twin| TwinCard {
                    last_updated_display: datetime_formatter(twin.last_updated.as_ref()),
                    twin: twin.clone(),
                })
                .collect(),
            edit: EditSnapshot {
                phase: self.edit.phase(),
                twin_id: self.edit.twin_id().to_string(),
                fields: self.edit.fields().clone(),
            },
        }
    }
}

/// A twin plus its preformatted footer timestamp
#[derive(Debug, Clone, Serialize)]
pub struct TwinCard {
    #[serde(flatten)]
    pub twin: TwinView,
    pub last_updated_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EditSnapshot {
    pub phase: EditPhase,
    pub twin_id: String,
    pub fields: EditFields,
}

/// Serializable copy of a page's state
#[derive(Debug, Clone, Serialize)]
pub struct PageSnapshot {
    pub title: String,
    pub slug: String,
    pub load_state: LoadState,
    pub twins: Vec<TwinCard>,
    pub edit: EditSnapshot,
}

/// Handle to one list page's state and the store it loads from
#[derive(Clone)]
pub struct PageHandle {
    state: Arc<RwLock<TwinListState>>,
    store: Arc<dyn TwinStore>,
}

impl fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageHandle").finish_non_exhaustive()
    }
}

impl PageHandle {
    pub fn new(kind: PageKind, query: String, store: Arc<dyn TwinStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(TwinListState::new(kind, query))),
            store,
        }
    }

    pub fn state(&self) -> &Arc<RwLock<TwinListState>> {
        &self.state
    }

    pub async fn snapshot(&self) -> PageSnapshot {
        self.state.read().await.snapshot()
    }

    /// Query the store and replace the twin list.
    ///
    /// The lock is not held across the query, so overlapping refreshes race
    /// and the last response to arrive wins. A failure is logged and leaves
    /// the previous list on screen.
    pub async fn refresh(&self) {
        let (kind, query) = {
            let mut state = self.state.write().await;
            state.load_state = LoadState::Loading;
            (state.kind, state.query.clone())
        };

        match self.store.query_twins(&query).await {
            Ok(records) => {
                let twins = map_twins(&records);
                tracing::debug!("{} page loaded {} twins", kind, twins.len());
                let mut state = self.state.write().await;
                state.twins = twins;
                state.load_state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!("Failed to load {} twins: {}", kind, e);
                self.state.write().await.load_state = LoadState::Failed;
            }
        }
    }

    /// Open the edit modal for a twin on the current list.
    ///
    /// Returns false when the twin is not listed or a save is in flight.
    pub async fn open_edit(&self, twin_id: &str) -> bool {
        let mut state = self.state.write().await;
        let twin = state.twins.iter().find(|t| t.name == twin_id).cloned();
        match twin {
            Some(twin) => state.edit.open(&twin),
            None => {
                tracing::debug!("No twin '{}' on the {} page", twin_id, state.kind);
                false
            }
        }
    }

    pub async fn apply_input(&self, field: EditField, value: &str) -> bool {
        self.state.write().await.edit.apply_input(field, value)
    }

    pub async fn cancel_edit(&self) -> bool {
        self.state.write().await.edit.cancel()
    }

    /// Submit the scratch fields as a patch.
    ///
    /// On 204 the modal closes and the list is queried again. Any other
    /// status or a transport error is logged and the modal stays open with
    /// the edits in place.
    pub async fn save_edit(&self) -> SaveOutcome {
        let pending = self.state.write().await.edit.begin_save();
        let Some((twin_id, patch)) = pending else {
            return SaveOutcome::NotOpen;
        };

        let result = self.store.update_twin(&twin_id, &patch).await;
        let outcome = self.state.write().await.edit.finish_save(&result);

        match &outcome {
            SaveOutcome::Saved => {
                tracing::info!("Updated display of twin '{}'", twin_id);
                self.refresh().await;
            }
            SaveOutcome::Rejected { status } => {
                tracing::warn!(
                    "Error updating twin '{}': store answered status {}",
                    twin_id,
                    status
                );
            }
            SaveOutcome::Failed { error } => {
                tracing::warn!("Error updating twin '{}': {}", twin_id, error);
            }
            SaveOutcome::NotOpen => {}
        }

        outcome
    }
}
