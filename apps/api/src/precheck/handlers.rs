//! Axum route handlers for the pre-check preview and region-pack registry.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::precheck::engine::{run_eligibility_precheck, PrecheckResult};
use crate::precheck::profile::Profile;
use crate::precheck::registry::{PackSummary, RegionPack};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PrecheckRequest {
    #[serde(default)]
    pub jd_text: String,
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub track: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PrecheckResponse {
    #[serde(flatten)]
    pub result: PrecheckResult,
    pub pack: PackSummary,
}

/// POST /api/v1/precheck
///
/// Runs the pre-check against a caller-supplied profile without persisting
/// anything. Useful for previewing a JD before creating a card.
pub async fn handle_precheck(
    State(state): State<AppState>,
    Json(request): Json<PrecheckRequest>,
) -> Json<PrecheckResponse> {
    let pack = state
        .packs
        .resolve(request.region.as_deref(), request.track.as_deref());
    let result = run_eligibility_precheck(&request.jd_text, request.profile.as_ref(), &pack.rules);

    Json(PrecheckResponse {
        result,
        pack: pack.summary(),
    })
}

/// GET /api/v1/region-packs
pub async fn handle_list_packs(State(state): State<AppState>) -> Json<Vec<PackSummary>> {
    Json(state.packs.list())
}

/// GET /api/v1/region-packs/:region/:track
pub async fn handle_get_pack(
    State(state): State<AppState>,
    Path((region, track)): Path<(String, String)>,
) -> Result<Json<RegionPack>, AppError> {
    state
        .packs
        .get(&region, &track)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Region pack {region}/{track} not found")))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::routes::build_router;
    use crate::test_support::{json_request, read_json_body, test_state};

    #[tokio::test]
    async fn test_precheck_preview_reports_conflict() {
        let (state, _, _) = test_state();
        let response = build_router(state)
            .oneshot(json_request(
                Method::POST,
                "/api/v1/precheck",
                json!({
                    "jd_text": "Unfortunately we are unable to sponsor visas for this role.",
                    "profile": {"needs_sponsorship": true},
                    "region": "US"
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["status"], "conflict");
        assert_eq!(body["triggered_rules"][0]["rule_id"], "no_sponsorship");
        assert_eq!(body["pack"]["region"], "us");
    }

    #[tokio::test]
    async fn test_precheck_preview_without_profile_is_recommended() {
        let (state, _, _) = test_state();
        let response = build_router(state)
            .oneshot(json_request(
                Method::POST,
                "/api/v1/precheck",
                json!({
                    "jd_text": "Applicants must be a Canadian citizen or permanent resident.",
                    "region": "ca"
                }),
            ))
            .await
            .unwrap();

        let body = read_json_body(response).await;
        assert_eq!(body["status"], "recommended");
        assert_eq!(body["triggered_rules"][0]["rule_id"], "citizen_or_pr_required");
    }

    #[tokio::test]
    async fn test_precheck_preview_unknown_region_uses_default_pack() {
        let (state, _, _) = test_state();
        let response = build_router(state)
            .oneshot(json_request(
                Method::POST,
                "/api/v1/precheck",
                json!({"jd_text": "", "region": "atlantis"}),
            ))
            .await
            .unwrap();

        let body = read_json_body(response).await;
        assert_eq!(body["status"], "none");
        assert_eq!(body["triggered_rules"], json!([]));
        assert_eq!(body["pack"]["region"], "us");
    }

    #[tokio::test]
    async fn test_list_and_get_region_packs() {
        let (state, _, _) = test_state();
        let router = build_router(state);

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/v1/region-packs")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = read_json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));

        let response = router
            .clone()
            .oneshot(
                Request::get("/api/v1/region-packs/uk/general")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["rules"][0]["condition"], "needs_sponsorship == true");

        let response = router
            .oneshot(
                Request::get("/api/v1/region-packs/uk/finance")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
