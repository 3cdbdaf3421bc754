use std::sync::Arc;

use fh_catalog::ContentCatalog;

/// Shared, immutable state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn ContentCatalog>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self { catalog }
    }
}
