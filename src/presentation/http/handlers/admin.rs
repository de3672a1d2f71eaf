use axum::{
    Json,
    extract::{Path, State},
};
use bcrypt::verify;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    domain::{
        catalog::repository::CatalogRepository,
        country::repository::CountryRepository,
    },
    presentation::http::{
        errors::AppError,
        handlers::catalog::{ActorResponse, MovieResponse},
        middleware::admin::AdminClaims,
        state::AppState,
    },
};

const ADMIN_SESSION_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
}

/// Admin identity comes from configuration, not the users table.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(body): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    let email_matches = body.email.trim().eq_ignore_ascii_case(&state.config.admin_email);
    let password_matches = verify(&body.password, &state.config.admin_password_hash)
        .map_err(|_| AppError::Internal("Password verification failed".to_string()))?;

    if !email_matches || !password_matches {
        return Err(AppError::Forbidden("Invalid credentials".to_string()));
    }

    let exp = (Utc::now() + chrono::Duration::hours(ADMIN_SESSION_HOURS)).timestamp() as usize;
    let claims = AdminClaims {
        sub: state.config.admin_email.clone(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    tracing::info!("admin logged in");
    Ok(Json(AdminLoginResponse { token }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Country is required"))]
    pub country: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateActorRequest {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Country is required"))]
    pub country: String,
}

pub async fn create_movie(
    State(state): State<AppState>,
    Json(body): Json<CreateMovieRequest>,
) -> Result<Json<MovieResponse>, AppError> {
    body.validate()?;
    let country = state.country_repo.resolve_or_create(&body.country).await?;
    let movie = state
        .catalog_repo
        .create_movie(body.title.trim(), country.id)
        .await?;
    tracing::info!(movie_id = %movie.id, "catalog movie created");
    Ok(Json(MovieResponse::from(movie)))
}

pub async fn create_actor(
    State(state): State<AppState>,
    Json(body): Json<CreateActorRequest>,
) -> Result<Json<ActorResponse>, AppError> {
    body.validate()?;
    let country = state.country_repo.resolve_or_create(&body.country).await?;
    let actor = state
        .catalog_repo
        .create_actor(body.name.trim(), country.id)
        .await?;
    tracing::info!(actor_id = %actor.id, "catalog actor created");
    Ok(Json(ActorResponse::from(actor)))
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.catalog_repo.delete_movie(id).await?;
    tracing::info!(movie_id = %id, "catalog movie deleted");
    Ok(Json(serde_json::json!({ "message": "Movie deleted." })))
}

pub async fn delete_actor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.catalog_repo.delete_actor(id).await?;
    tracing::info!(actor_id = %id, "catalog actor deleted");
    Ok(Json(serde_json::json!({ "message": "Actor deleted." })))
}

pub async fn delete_country(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.country_repo.delete(id).await?;
    tracing::info!(country_id = %id, "country deleted");
    Ok(Json(serde_json::json!({ "message": "Country deleted." })))
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub users: i64,
    pub countries: i64,
    pub movies: i64,
    pub actors: i64,
    pub movie_votes: i64,
    pub actor_votes: i64,
    pub personal_movies: i64,
    pub personal_actors: i64,
}

async fn count_rows(state: &AppState, query: &str) -> Result<i64, AppError> {
    sqlx::query_scalar(query)
        .fetch_one(&state.db)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    Ok(Json(StatsResponse {
        users: count_rows(&state, "SELECT COUNT(*) FROM users").await?,
        countries: count_rows(&state, "SELECT COUNT(*) FROM countries").await?,
        movies: count_rows(&state, "SELECT COUNT(*) FROM movies").await?,
        actors: count_rows(&state, "SELECT COUNT(*) FROM actors").await?,
        movie_votes: count_rows(&state, "SELECT COUNT(*) FROM movie_votes").await?,
        actor_votes: count_rows(&state, "SELECT COUNT(*) FROM actor_votes").await?,
        personal_movies: count_rows(&state, "SELECT COUNT(*) FROM personal_movies").await?,
        personal_actors: count_rows(&state, "SELECT COUNT(*) FROM personal_actors").await?,
    }))
}
