use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Shared catalog movie, curated by admins. `vote_count` is mutated only by
/// the vote recorder, and only upward.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub country_id: Uuid,
    pub country_name: String,
    pub iso_code: String,
    pub vote_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Shared catalog actor, curated by admins.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
    pub country_id: Uuid,
    pub country_name: String,
    pub iso_code: String,
    pub vote_count: i32,
    pub created_at: DateTime<Utc>,
}
