//! Persistence collaborators used by the pre-check call sites.
//!
//! Handlers only see the traits; `AppState` carries `Arc<dyn ...>` so the
//! Postgres backends can be swapped for in-memory ones in tests.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::job_card::{JdSnapshotRow, JobCardRow, NewJdSnapshot, NewJobCard};
use crate::models::profile::ProfileRow;

pub mod postgres;

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("record not found: {0}")]
    NotFound(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(e.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, StoreError>;
}

#[async_trait]
pub trait JobCardStore: Send + Sync {
    async fn insert_card(&self, card: NewJobCard) -> Result<JobCardRow, StoreError>;

    async fn fetch_card(&self, id: Uuid) -> Result<Option<JobCardRow>, StoreError>;

    /// Inserts the snapshot and copies its verdict and JD onto the parent card,
    /// atomically.
    async fn record_snapshot(&self, snapshot: NewJdSnapshot) -> Result<JdSnapshotRow, StoreError>;
}
