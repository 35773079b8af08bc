use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::job_card::{JdSnapshotRow, JobCardRow, NewJdSnapshot, NewJobCard};
use crate::models::profile::ProfileRow;
use crate::store::{JobCardStore, ProfileStore, StoreError};

#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[derive(Clone)]
pub struct PgJobCardStore {
    pool: PgPool,
}

impl PgJobCardStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobCardStore for PgJobCardStore {
    async fn insert_card(&self, card: NewJobCard) -> Result<JobCardRow, StoreError> {
        let row = sqlx::query_as::<_, JobCardRow>(
            r#"
            INSERT INTO job_cards
                (user_id, company, role_title, jd_text, region, track,
                 precheck_status, precheck_rules)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(card.user_id)
        .bind(&card.company)
        .bind(&card.role_title)
        .bind(&card.jd_text)
        .bind(&card.region)
        .bind(&card.track)
        .bind(&card.precheck_status)
        .bind(Json(&card.precheck_rules))
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn fetch_card(&self, id: Uuid) -> Result<Option<JobCardRow>, StoreError> {
        let row = sqlx::query_as::<_, JobCardRow>("SELECT * FROM job_cards WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn record_snapshot(&self, snapshot: NewJdSnapshot) -> Result<JdSnapshotRow, StoreError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE job_cards
            SET jd_text = $1, precheck_status = $2, precheck_rules = $3, updated_at = NOW()
            WHERE id = $4
            "#,
        )
        .bind(&snapshot.jd_text)
        .bind(&snapshot.precheck_status)
        .bind(Json(&snapshot.precheck_rules))
        .bind(snapshot.job_card_id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!(
                "job card {}",
                snapshot.job_card_id
            )));
        }

        let row = sqlx::query_as::<_, JdSnapshotRow>(
            r#"
            INSERT INTO jd_snapshots (job_card_id, jd_text, precheck_status, precheck_rules)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(snapshot.job_card_id)
        .bind(&snapshot.jd_text)
        .bind(&snapshot.precheck_status)
        .bind(Json(&snapshot.precheck_rules))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }
}
