use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A movie on one user's personal ranked list. Owned exclusively by that user
/// and deleted with them. `poster_key` is the storage object key of an
/// uploaded poster; `poster_url` is an externally hosted alternative.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonalMovie {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub country_id: Uuid,
    pub country_name: String,
    pub iso_code: String,
    pub production_year: i32,
    pub score: f64,
    pub poster_key: Option<String>,
    pub poster_url: String,
    pub created_at: DateTime<Utc>,
}

/// An actor on one user's personal ranked list. `born` is the birth year.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PersonalActor {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub country_id: Uuid,
    pub country_name: String,
    pub iso_code: String,
    pub born: i32,
    pub score: f64,
    pub poster_key: Option<String>,
    pub poster_url: String,
    pub created_at: DateTime<Utc>,
}

impl PersonalActor {
    pub fn age(&self) -> i32 {
        age_from_birth_year(self.born, Utc::now().year())
    }
}

/// Age in whole years, clamped at zero for future birth years.
pub fn age_from_birth_year(born: i32, current_year: i32) -> i32 {
    (current_year - born).max(0)
}

/// Validated input for a new personal movie entry.
#[derive(Debug, Clone)]
pub struct NewPersonalMovie {
    pub user_id: Uuid,
    pub title: String,
    pub country_id: Uuid,
    pub production_year: i32,
    pub score: f64,
    pub poster_key: Option<String>,
    pub poster_url: String,
}

/// Validated input for a new personal actor entry.
#[derive(Debug, Clone)]
pub struct NewPersonalActor {
    pub user_id: Uuid,
    pub full_name: String,
    pub country_id: Uuid,
    pub born: i32,
    pub score: f64,
    pub poster_key: Option<String>,
    pub poster_url: String,
}
