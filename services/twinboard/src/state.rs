//! Application state: one independently locked handle per page

use std::sync::Arc;

use serde::Serialize;

use crate::config::{Config, ModelsConfig};
use crate::page::{PageHandle, PageKind};
use crate::summary::SummaryPage;
use crate::twin_client::TwinStore;

/// Read-only configuration shown on the settings page
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub endpoint: String,
    pub api_version: String,
    pub models: ModelsConfig,
    pub authenticated: bool,
}

impl SettingsView {
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: config.twin_store.endpoint.clone(),
            api_version: config.twin_store.api_version.clone(),
            models: config.models.clone(),
            authenticated: config.twin_store.access_token.is_some(),
        }
    }
}

/// State shared by the HTTP handlers. Pages never touch each other's state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub summary: SummaryPage,
    pub floors: PageHandle,
    pub rooms: PageHandle,
    pub devices: PageHandle,
    pub settings: Arc<SettingsView>,
}

impl AppState {
    pub fn new(config: &Config, store: Arc<dyn TwinStore>) -> Self {
        let page = |kind: PageKind| {
            PageHandle::new(kind, kind.query(&config.models), Arc::clone(&store))
        };

        Self {
            summary: SummaryPage::new(&config.models, Arc::clone(&store)),
            floors: page(PageKind::Floors),
            rooms: page(PageKind::Rooms),
            devices: page(PageKind::Devices),
            settings: Arc::new(SettingsView::from_config(config)),
        }
    }

    pub fn page(&self, kind: PageKind) -> &PageHandle {
        match kind {
            PageKind::Floors => &self.floors,
            PageKind::Rooms => &self.rooms,
            PageKind::Devices => &self.devices,
        }
    }
}
