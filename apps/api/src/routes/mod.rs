pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::jobs::handlers as jobs;
use crate::precheck::handlers as precheck;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pre-check preview + region packs
        .route("/api/v1/precheck", post(precheck::handle_precheck))
        .route("/api/v1/region-packs", get(precheck::handle_list_packs))
        .route(
            "/api/v1/region-packs/:region/:track",
            get(precheck::handle_get_pack),
        )
        // Job cards (pre-check call sites)
        .route("/api/v1/job-cards", post(jobs::handle_create_job_card))
        .route("/api/v1/job-cards/:id", get(jobs::handle_get_job_card))
        .route(
            "/api/v1/job-cards/:id/snapshots",
            post(jobs::handle_create_snapshot),
        )
        .with_state(state)
}
