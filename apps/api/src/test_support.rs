//! Shared fixtures for handler tests: in-memory state and request helpers.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use serde_json::Value;

use crate::config::Config;
use crate::precheck::registry::RegionPackRegistry;
use crate::state::AppState;
use crate::store::memory::{MemoryJobCardStore, MemoryProfileStore};

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/applytrail_test".to_string(),
        database_max_connections: 1,
        port: 0,
        rust_log: "debug".to_string(),
        default_region: "us".to_string(),
        default_track: "general".to_string(),
    }
}

/// Builds an `AppState` over in-memory stores, returning the stores so tests
/// can seed and inspect them.
pub fn test_state() -> (AppState, Arc<MemoryProfileStore>, Arc<MemoryJobCardStore>) {
    let config = test_config();
    let packs = RegionPackRegistry::builtin(&config.default_region, &config.default_track)
        .expect("built-in region packs load");
    let profiles = Arc::new(MemoryProfileStore::default());
    let cards = Arc::new(MemoryJobCardStore::default());

    let state = AppState {
        packs: Arc::new(packs),
        profiles: profiles.clone(),
        job_cards: cards.clone(),
    };
    (state, profiles, cards)
}

pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
