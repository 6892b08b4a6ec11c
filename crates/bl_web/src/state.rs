use std::sync::Arc;
use bl_core::{ArticleStore, Result};
use bl_registry::StaticRegistry;
use serde_json::Value;

use crate::docs;

pub struct AppState {
    pub store: Arc<dyn ArticleStore>,
    pub openapi: Value,
}

impl AppState {
    pub fn new(store: Arc<dyn ArticleStore>) -> Result<Self> {
        Ok(Self {
            store,
            openapi: docs::openapi_document()?,
        })
    }

    /// State backed by the reference dataset.
    pub fn reference() -> Result<Self> {
        Self::new(Arc::new(StaticRegistry::reference()?))
    }
}
