use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::{
        catalog::{
            entity::{Actor, Movie},
            repository::CatalogRepository,
        },
        country::entity::iso_to_flag,
    },
    presentation::http::{errors::AppError, state::AppState},
};

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub id: Uuid,
    pub title: String,
    pub country: String,
    pub iso_code: String,
    pub flag_emoji: String,
    pub vote_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ActorResponse {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub iso_code: String,
    pub flag_emoji: String,
    pub vote_count: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Movie> for MovieResponse {
    fn from(m: Movie) -> Self {
        Self {
            id: m.id,
            title: m.title,
            country: m.country_name,
            flag_emoji: iso_to_flag(&m.iso_code),
            iso_code: m.iso_code,
            vote_count: m.vote_count,
            created_at: m.created_at,
        }
    }
}

impl From<Actor> for ActorResponse {
    fn from(a: Actor) -> Self {
        Self {
            id: a.id,
            name: a.name,
            country: a.country_name,
            flag_emoji: iso_to_flag(&a.iso_code),
            iso_code: a.iso_code,
            vote_count: a.vote_count,
            created_at: a.created_at,
        }
    }
}

fn country_filter(params: &CatalogQuery) -> Option<&str> {
    params
        .country
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<Vec<MovieResponse>>, AppError> {
    let movies = state
        .catalog_repo
        .list_movies(country_filter(&params))
        .await?;
    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

pub async fn list_actors(
    State(state): State<AppState>,
    Query(params): Query<CatalogQuery>,
) -> Result<Json<Vec<ActorResponse>>, AppError> {
    let actors = state
        .catalog_repo
        .list_actors(country_filter(&params))
        .await?;
    Ok(Json(actors.into_iter().map(ActorResponse::from).collect()))
}
