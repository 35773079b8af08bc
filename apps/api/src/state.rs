use std::sync::Arc;

use crate::precheck::registry::RegionPackRegistry;
use crate::store::{JobCardStore, ProfileStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Region packs, loaded and validated once at startup.
    pub packs: Arc<RegionPackRegistry>,
    pub profiles: Arc<dyn ProfileStore>,
    pub job_cards: Arc<dyn JobCardStore>,
}
