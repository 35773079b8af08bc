//! In-memory store backends for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use crate::models::job_card::{JdSnapshotRow, JobCardRow, NewJdSnapshot, NewJobCard};
use crate::models::profile::ProfileRow;
use crate::store::{JobCardStore, ProfileStore, StoreError};

#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<Uuid, ProfileRow>>,
}

impl MemoryProfileStore {
    pub fn insert(&self, row: ProfileRow) {
        self.profiles.lock().unwrap().insert(row.user_id, row);
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, StoreError> {
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }
}

/// Profile store that always fails, to exercise the degrade-to-unknown path.
pub struct UnavailableProfileStore;

#[async_trait]
impl ProfileStore for UnavailableProfileStore {
    async fn fetch_profile(&self, _user_id: Uuid) -> Result<Option<ProfileRow>, StoreError> {
        Err(StoreError::Unavailable("profiles offline".to_string()))
    }
}

#[derive(Default)]
pub struct MemoryJobCardStore {
    cards: Mutex<HashMap<Uuid, JobCardRow>>,
    snapshots: Mutex<Vec<JdSnapshotRow>>,
}

impl MemoryJobCardStore {
    pub fn snapshots(&self) -> Vec<JdSnapshotRow> {
        self.snapshots.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobCardStore for MemoryJobCardStore {
    async fn insert_card(&self, card: NewJobCard) -> Result<JobCardRow, StoreError> {
        let now = Utc::now();
        let row = JobCardRow {
            id: Uuid::new_v4(),
            user_id: card.user_id,
            company: card.company,
            role_title: card.role_title,
            jd_text: card.jd_text,
            region: card.region,
            track: card.track,
            precheck_status: card.precheck_status,
            precheck_rules: Json(card.precheck_rules),
            created_at: now,
            updated_at: now,
        };
        self.cards.lock().unwrap().insert(row.id, row.clone());
        Ok(row)
    }

    async fn fetch_card(&self, id: Uuid) -> Result<Option<JobCardRow>, StoreError> {
        Ok(self.cards.lock().unwrap().get(&id).cloned())
    }

    async fn record_snapshot(&self, snapshot: NewJdSnapshot) -> Result<JdSnapshotRow, StoreError> {
        let now = Utc::now();
        let mut cards = self.cards.lock().unwrap();
        let card = cards
            .get_mut(&snapshot.job_card_id)
            .ok_or_else(|| StoreError::NotFound(format!("job card {}", snapshot.job_card_id)))?;
        card.jd_text = snapshot.jd_text.clone();
        card.precheck_status = snapshot.precheck_status.clone();
        card.precheck_rules = Json(snapshot.precheck_rules.clone());
        card.updated_at = now;

        let row = JdSnapshotRow {
            id: Uuid::new_v4(),
            job_card_id: snapshot.job_card_id,
            jd_text: snapshot.jd_text,
            precheck_status: snapshot.precheck_status,
            precheck_rules: Json(snapshot.precheck_rules),
            created_at: now,
        };
        self.snapshots.lock().unwrap().push(row.clone());
        Ok(row)
    }
}
