#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::precheck::profile::Profile;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub user_id: Uuid,
    pub work_status: Option<String>,
    pub needs_sponsorship: Option<String>,
    pub country_of_residence: Option<String>,
    pub region: Option<String>,
    pub track: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    pub fn to_profile(&self) -> Profile {
        Profile {
            work_status: self.work_status.clone(),
            needs_sponsorship: self.needs_sponsorship.clone(),
            country_of_residence: self.country_of_residence.clone(),
        }
    }
}
