use std::sync::Arc;

use crate::config::Config;
use crate::translator::{registry, ProviderMap};

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub providers: Arc<ProviderMap>,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let providers = registry::build_providers(config)?;
        Ok(Self {
            providers: Arc::new(providers),
        })
    }
}
