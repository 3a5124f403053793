//! Twinboard - Digital twin admin dashboard
//!
//! Queries a digital twin store, renders twins as cards on per-model pages,
//! and patches their display metadata through an edit modal.

pub mod config;
pub mod dashboard;
pub mod edit;
pub mod error;
pub mod format;
pub mod io;
pub mod mapper;
pub mod page;
pub mod routes;
pub mod state;
pub mod summary;
pub mod twin;
pub mod twin_client;

pub use config::{load_config, Config};
pub use error::{Result, TwinboardError};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio_util::sync::CancellationToken;

use crate::io::{HttpClient, ReqwestHttpClient};
use crate::state::AppState;
use crate::twin_client::{DigitalTwinsClient, TwinStore};

/// Assembles a [`Twinboard`] from configuration, with optional injected
/// collaborators for tests
pub struct TwinboardBuilder {
    config: Config,
    http: Option<Arc<dyn HttpClient>>,
    store: Option<Arc<dyn TwinStore>>,
    cancel: Option<CancellationToken>,
}

impl TwinboardBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: None,
            store: None,
            cancel: None,
        }
    }

    /// Use this HTTP client for the twin store instead of reqwest
    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Bypass the REST client entirely
    pub fn with_twin_store(mut self, store: Arc<dyn TwinStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub async fn build(self) -> Result<Twinboard> {
        let store: Arc<dyn TwinStore> = match self.store {
            Some(store) => store,
            None => {
                let http: Arc<dyn HttpClient> = match self.http {
                    Some(http) => http,
                    None => Arc::new(ReqwestHttpClient::new(
                        self.config.twin_store.access_token.clone(),
                    )),
                };
                Arc::new(DigitalTwinsClient::new(&self.config.twin_store, http)?)
            }
        };

        tracing::debug!("Twin store endpoint: {}", self.config.twin_store.endpoint);

        let state = AppState::new(&self.config, store);
        Ok(Twinboard {
            config: self.config,
            state,
            cancel: self.cancel.unwrap_or_default(),
        })
    }
}

/// A built dashboard, ready to serve
pub struct Twinboard {
    config: Config,
    state: AppState,
    cancel: CancellationToken,
}

impl Twinboard {
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn router(&self) -> Router {
        dashboard::build_router(self.state.clone())
    }

    /// Serve until the cancellation token fires or ctrl-c is received
    pub async fn start(self) -> Result<()> {
        let cancel_for_signal = self.cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Shutdown signal received");
                    cancel_for_signal.cancel();
                }
                Err(e) => tracing::warn!("Failed to listen for ctrl-c: {}", e),
            }
        });

        if !self.config.server.enabled {
            tracing::info!("Dashboard server disabled");
            self.cancel.cancelled().await;
            return Ok(());
        }

        let port = self.config.server.port;
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
            TwinboardError::Dashboard(format!("Failed to bind port {}: {}", port, e))
        })?;
        tracing::info!("Dashboard listening on http://{}", addr);

        let cancel = self.cancel.clone();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
            })
            .await?;

        tracing::info!("Dashboard stopped");
        Ok(())
    }
}
