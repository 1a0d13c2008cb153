use std::sync::Arc;

use crate::services::{Catalog, NeighborModel, Recommender};

/// Shared application state
///
/// Everything here is loaded once at startup and read-only afterwards, so
/// handlers share it through plain `Arc`s with no locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub recommender: Arc<Recommender>,
    /// Number of recommendations returned per request
    pub recommendations: usize,
}

impl AppState {
    /// Wires the catalog and model into a resolver and the handler state.
    pub fn new(catalog: Catalog, model: Arc<dyn NeighborModel>, recommendations: usize) -> Self {
        let catalog = Arc::new(catalog);
        let recommender = Arc::new(Recommender::new(catalog.clone(), model));
        Self {
            catalog,
            recommender,
            recommendations,
        }
    }
}
