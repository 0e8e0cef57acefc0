//! Shared application state

use std::sync::Arc;

use quaero_es::EsClient;

use crate::config::Config;

/// Request-scoped shared state: configuration plus the engine client.
/// Cheap to clone; no mutable state lives here.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub es: EsClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let es = EsClient::new(&config.elasticsearch.url)?;

        Ok(Self {
            config: Arc::new(config),
            es,
        })
    }
}
