use std::sync::Arc;

use mwres_core::image_resolver::ImageResolver;
use mwres_core::pool::TypeInferenceRules;
use mwres_store::DataLayout;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// File locations, also reachable through `config.layout`.
    pub layout: Arc<DataLayout>,
    pub resolver: Arc<ImageResolver>,
    /// Rules used when a dragged item has no explicit type.
    pub type_rules: Arc<TypeInferenceRules>,
}

impl AppState {
    pub fn new(config: ServerConfig, type_rules: TypeInferenceRules) -> Self {
        let layout = config.layout.clone();
        Self {
            resolver: Arc::new(layout.resolver()),
            layout: Arc::new(layout),
            config: Arc::new(config),
            type_rules: Arc::new(type_rules),
        }
    }
}
