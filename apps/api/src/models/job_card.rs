#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::precheck::engine::TriggeredRule;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobCardRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: String,
    pub role_title: String,
    pub jd_text: String,
    pub region: String,
    pub track: String,
    /// "none" | "recommended" | "conflict"
    pub precheck_status: String,
    pub precheck_rules: Json<Vec<TriggeredRule>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JdSnapshotRow {
    pub id: Uuid,
    pub job_card_id: Uuid,
    pub jd_text: String,
    pub precheck_status: String,
    pub precheck_rules: Json<Vec<TriggeredRule>>,
    pub created_at: DateTime<Utc>,
}

/// Insert parameters for a new job card, pre-check verdict included.
#[derive(Debug, Clone)]
pub struct NewJobCard {
    pub user_id: Uuid,
    pub company: String,
    pub role_title: String,
    pub jd_text: String,
    pub region: String,
    pub track: String,
    pub precheck_status: String,
    pub precheck_rules: Vec<TriggeredRule>,
}

/// Insert parameters for a JD snapshot. Recording one also moves the parent
/// card's verdict to the snapshot's.
#[derive(Debug, Clone)]
pub struct NewJdSnapshot {
    pub job_card_id: Uuid,
    pub jd_text: String,
    pub precheck_status: String,
    pub precheck_rules: Vec<TriggeredRule>,
}
