//! In-process stand-in for the memory service's configuration and memory endpoints.
//!
//! State lives behind a mutex so tests can inject failures and inspect which endpoints were hit.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::Result;
use axum::Router;
use axum::http::StatusCode;
use framework::web::error::HttpError;
use framework::web::error::HttpResult;
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::error;
use tracing::info;

use crate::memory::Memory;

pub mod config;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    GetConfig,
    UpdateConfig,
    GetProviders,
    ResetConfig,
    CreateMemory,
    SearchMemories,
}

#[derive(Clone)]
pub struct MockState {
    store: Arc<Mutex<Store>>,
}

struct Store {
    default_config: Value,
    config: Value,
    memories: Vec<Memory>,
    failures: HashMap<Endpoint, StatusCode>,
    requests: Vec<Endpoint>,
}

impl Default for MockState {
    fn default() -> Self {
        MockState::new(config::default_config())
    }
}

impl MockState {
    pub fn new(default_config: Value) -> Self {
        MockState {
            store: Arc::new(Mutex::new(Store {
                config: default_config.clone(),
                default_config,
                memories: vec![],
                failures: HashMap::new(),
                requests: vec![],
            })),
        }
    }

    pub fn fail(&self, endpoint: Endpoint, status: StatusCode) {
        self.store.lock().unwrap().failures.insert(endpoint, status);
    }

    pub fn set_config(&self, config: Value) {
        self.store.lock().unwrap().config = config;
    }

    pub fn config(&self) -> Value {
        self.store.lock().unwrap().config.clone()
    }

    pub fn memories(&self) -> Vec<Memory> {
        self.store.lock().unwrap().memories.clone()
    }

    pub fn requests(&self) -> Vec<Endpoint> {
        self.store.lock().unwrap().requests.clone()
    }

    // every handler goes through here so the call is recorded even when it fails
    fn enter(&self, endpoint: Endpoint) -> HttpResult<MutexGuard<'_, Store>> {
        let mut store = self.store.lock().unwrap();
        store.requests.push(endpoint);
        if let Some(status) = store.failures.get(&endpoint) {
            return Err(HttpError::Status(*status, format!("injected failure, endpoint={endpoint:?}")));
        }
        Ok(store)
    }
}

pub fn routes() -> Router<MockState> {
    Router::new().merge(config::routes()).merge(memory::routes())
}

/// Serves the mock on an ephemeral local port and returns its base url.
pub async fn serve_local(state: MockState) -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    let app = framework::web::server::app(routes().with_state(state));
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            error!("mock service stopped, error={err}");
        }
    });
    info!("mock service started, address={address}");
    Ok(format!("http://{address}"))
}
