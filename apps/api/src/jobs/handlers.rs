//! Axum route handlers for job cards and JD snapshots.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::precheck_site::{load_profile_or_none, precheck_for};
use crate::models::job_card::{JdSnapshotRow, JobCardRow, NewJdSnapshot, NewJobCard};
use crate::precheck::engine::PrecheckResult;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateJobCardRequest {
    pub user_id: Uuid,
    pub company: String,
    pub role_title: String,
    #[serde(default)]
    pub jd_text: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub track: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JobCardResponse {
    pub job_card: JobCardRow,
    pub precheck: PrecheckResult,
}

#[derive(Debug, Deserialize)]
pub struct CreateSnapshotRequest {
    pub user_id: Uuid,
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub snapshot: JdSnapshotRow,
    pub precheck: PrecheckResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/job-cards
///
/// Creates a job card and stores the eligibility pre-check verdict on it.
/// The JD may be empty at creation time; the verdict is then `none`.
pub async fn handle_create_job_card(
    State(state): State<AppState>,
    Json(request): Json<CreateJobCardRequest>,
) -> Result<(StatusCode, Json<JobCardResponse>), AppError> {
    if request.company.trim().is_empty() {
        return Err(AppError::Validation("company cannot be empty".to_string()));
    }
    if request.role_title.trim().is_empty() {
        return Err(AppError::Validation("role_title cannot be empty".to_string()));
    }

    let profile = load_profile_or_none(state.profiles.as_ref(), request.user_id).await;
    let site = precheck_for(
        &state,
        profile.as_ref(),
        request.region.as_deref(),
        request.track.as_deref(),
        &request.jd_text,
    );

    let card = NewJobCard {
        user_id: request.user_id,
        company: request.company.trim().to_string(),
        role_title: request.role_title.trim().to_string(),
        jd_text: request.jd_text,
        region: site.pack.region.clone(),
        track: site.pack.track.clone(),
        precheck_status: site.result.status.as_str().to_string(),
        precheck_rules: site.result.triggered_rules.clone(),
    };
    let job_card = state.job_cards.insert_card(card).await?;

    info!(
        job_card_id = %job_card.id,
        status = %site.result.status,
        triggered = site.result.triggered_rules.len(),
        "job card created"
    );

    Ok((
        StatusCode::CREATED,
        Json(JobCardResponse {
            job_card,
            precheck: site.result,
        }),
    ))
}

/// GET /api/v1/job-cards/:id
pub async fn handle_get_job_card(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<JobCardRow>, AppError> {
    let card = state
        .job_cards
        .fetch_card(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job card {id} not found")))?;
    Ok(Json(card))
}

/// POST /api/v1/job-cards/:id/snapshots
///
/// Records a new JD snapshot for the card and re-runs the pre-check with the
/// card's region pack. The card takes the snapshot's verdict.
pub async fn handle_create_snapshot(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CreateSnapshotRequest>,
) -> Result<(StatusCode, Json<SnapshotResponse>), AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }

    let card = state
        .job_cards
        .fetch_card(id)
        .await?
        .filter(|card| card.user_id == request.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Job card {id} not found")))?;

    let profile = load_profile_or_none(state.profiles.as_ref(), card.user_id).await;
    let site = precheck_for(
        &state,
        profile.as_ref(),
        Some(card.region.as_str()),
        Some(card.track.as_str()),
        &request.jd_text,
    );

    let snapshot = state
        .job_cards
        .record_snapshot(NewJdSnapshot {
            job_card_id: card.id,
            jd_text: request.jd_text,
            precheck_status: site.result.status.as_str().to_string(),
            precheck_rules: site.result.triggered_rules.clone(),
        })
        .await?;

    info!(
        job_card_id = %card.id,
        snapshot_id = %snapshot.id,
        status = %site.result.status,
        "jd snapshot recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(SnapshotResponse {
            snapshot,
            precheck: site.result,
        }),
    ))
}
