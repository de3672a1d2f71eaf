//! The authenticated home surface: country directory, both personal ranked
//! lists with country filters, and the create/delete operations for entries.
//!
//! Reads degrade when migrations are pending: each missing table or column
//! turns into an entry in `warnings` and an empty section instead of a 500.
//! Writes against a missing table are rejected with the same notice.

use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::HeaderMap,
};
use chrono::{DateTime, Utc};
use image::{ImageFormat, imageops::FilterType};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use uuid::Uuid;

use crate::{
    domain::{
        collection::{
            entity::{NewPersonalActor, NewPersonalMovie, PersonalActor, PersonalMovie},
            repository::CollectionRepository,
            value_objects::{
                BirthYear, Score, name_or_placeholder, production_year_or_default,
                title_or_placeholder,
            },
        },
        country::{entity::iso_to_flag, repository::CountryRepository},
    },
    infrastructure::database::schema_probe::{table_exists, table_has_column},
    presentation::http::{errors::AppError, middleware::user::require_user_id, state::AppState},
};

const COUNTRY_SCHEMA_NOTICE: &str =
    "Country data is unavailable until database migrations are applied.";
const MOVIE_SCHEMA_NOTICE: &str =
    "Your personal movie list is unavailable until database migrations are applied.";
const ACTOR_SCHEMA_NOTICE: &str =
    "Your personal actor list is unavailable until database migrations are applied.";

const ALLOWED_POSTER_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub movie_country: Option<String>,
    pub actor_country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CountryItem {
    pub id: Uuid,
    pub name: String,
    pub iso_code: String,
    pub flag_emoji: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalMovieItem {
    pub id: Uuid,
    pub title: String,
    pub country: String,
    pub iso_code: String,
    pub flag_emoji: String,
    pub production_year: i32,
    pub score: f64,
    pub poster_source: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalActorItem {
    pub id: Uuid,
    pub full_name: String,
    pub country: String,
    pub iso_code: String,
    pub flag_emoji: String,
    pub born: i32,
    pub age: i32,
    pub score: f64,
    pub poster_source: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub countries: Vec<CountryItem>,
    pub movies: Vec<PersonalMovieItem>,
    pub actors: Vec<PersonalActorItem>,
    pub top_movie: Option<PersonalMovieItem>,
    pub top_actor: Option<PersonalActorItem>,
    pub warnings: Vec<String>,
}

fn poster_source(state: &AppState, poster_key: &Option<String>, poster_url: &str) -> Option<String> {
    if let Some(key) = poster_key {
        return Some(state.storage.get_url(key));
    }
    if poster_url.is_empty() {
        None
    } else {
        Some(poster_url.to_string())
    }
}

fn movie_item(state: &AppState, entry: &PersonalMovie) -> PersonalMovieItem {
    PersonalMovieItem {
        id: entry.id,
        title: entry.title.clone(),
        country: entry.country_name.clone(),
        iso_code: entry.iso_code.clone(),
        flag_emoji: iso_to_flag(&entry.iso_code),
        production_year: entry.production_year,
        score: entry.score,
        poster_source: poster_source(state, &entry.poster_key, &entry.poster_url),
        created_at: entry.created_at,
    }
}

fn actor_item(state: &AppState, entry: &PersonalActor) -> PersonalActorItem {
    PersonalActorItem {
        id: entry.id,
        full_name: entry.full_name.clone(),
        country: entry.country_name.clone(),
        iso_code: entry.iso_code.clone(),
        flag_emoji: iso_to_flag(&entry.iso_code),
        born: entry.born,
        age: entry.age(),
        score: entry.score,
        poster_source: poster_source(state, &entry.poster_key, &entry.poster_url),
        created_at: entry.created_at,
    }
}

fn normalized_filter(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub async fn get_home(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HomeQuery>,
) -> Result<Json<HomeResponse>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;
    let mut warnings = Vec::new();

    let countries = if table_has_column(&state.db, "countries", "iso_code").await {
        state
            .country_repo
            .list()
            .await?
            .into_iter()
            .map(|c| CountryItem {
                id: c.id,
                flag_emoji: c.flag_emoji(),
                name: c.name,
                iso_code: c.iso_code,
            })
            .collect()
    } else {
        warnings.push(COUNTRY_SCHEMA_NOTICE.to_string());
        Vec::new()
    };

    let movie_filter = normalized_filter(&params.movie_country);
    let movies = if table_exists(&state.db, "personal_movies").await {
        state
            .collection_repo
            .list_movies(user_id, movie_filter.as_deref())
            .await?
            .iter()
            .map(|entry| movie_item(&state, entry))
            .collect()
    } else {
        warnings.push(MOVIE_SCHEMA_NOTICE.to_string());
        Vec::new()
    };

    let actor_filter = normalized_filter(&params.actor_country);
    let actors: Vec<PersonalActorItem> = if table_exists(&state.db, "personal_actors").await {
        state
            .collection_repo
            .list_actors(user_id, actor_filter.as_deref())
            .await?
            .iter()
            .map(|entry| actor_item(&state, entry))
            .collect()
    } else {
        warnings.push(ACTOR_SCHEMA_NOTICE.to_string());
        Vec::new()
    };

    let top_movie = movies.first().cloned();
    let top_actor = actors.first().cloned();

    Ok(Json(HomeResponse {
        countries,
        movies,
        actors,
        top_movie,
        top_actor,
        warnings,
    }))
}

/// Free-form fields collected from the multipart entry form. Blank values are
/// kept and resolved to the lenient defaults downstream.
#[derive(Debug, Default)]
struct EntryForm {
    name: String,
    year: String,
    country: String,
    score: String,
    poster_url: String,
    poster_bytes: Option<bytes::Bytes>,
}

async fn parse_entry_form(
    mut multipart: Multipart,
    name_field: &str,
    year_field: &str,
) -> Result<EntryForm, AppError> {
    let mut form = EntryForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Malformed form field".into()))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        if field_name == "poster" {
            let file_name = field.file_name().unwrap_or("").to_lowercase();
            if file_name.is_empty() {
                // Empty file input submitted with no selection.
                continue;
            }
            let extension = file_name.rsplit('.').next().unwrap_or("");
            if !ALLOWED_POSTER_EXTENSIONS.contains(&extension) {
                return Err(AppError::BadRequest(
                    "Poster must be a .png, .jpg, or .jpeg file".into(),
                ));
            }
            form.poster_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|_| AppError::BadRequest("Failed to read poster upload".into()))?,
            );
            continue;
        }

        let value = field.text().await.unwrap_or_default();
        match field_name.as_str() {
            f if f == name_field => form.name = value,
            f if f == year_field => form.year = value,
            "country" => form.country = value,
            "score" => form.score = value,
            "poster_url" => form.poster_url = value.trim().to_string(),
            _ => {}
        }
    }

    Ok(form)
}

/// Re-encode an uploaded poster to WebP, capped at 1200px on the long edge,
/// and store it under the given prefix. Returns the storage key.
async fn store_poster(
    state: &AppState,
    prefix: &str,
    data: &[u8],
) -> Result<String, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|_| AppError::BadRequest("Invalid poster image".into()))?;

    let mut buf = Cursor::new(Vec::new());
    img.resize(1200, 1200, FilterType::Lanczos3)
        .write_to(&mut buf, ImageFormat::WebP)
        .map_err(|e| AppError::Internal(format!("Failed to encode poster to WebP: {}", e)))?;

    let key = format!("{}/{}.webp", prefix, Uuid::now_v7());
    state
        .storage
        .upload(&key, buf.into_inner(), "image/webp")
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;
    Ok(key)
}

pub async fn create_personal_movie(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<PersonalMovieItem>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;

    if !table_exists(&state.db, "personal_movies").await {
        return Err(AppError::SchemaNotReady(
            "Movie list is temporarily unavailable. Please run migrations.".into(),
        ));
    }

    let form = parse_entry_form(multipart, "title", "production_year").await?;

    let title = title_or_placeholder(&form.name);
    let production_year = production_year_or_default(&form.year)?;
    let score = Score::parse_or_default(&form.score)?;
    let country = state.country_repo.resolve_or_create(&form.country).await?;

    let poster_key = match form.poster_bytes.as_deref() {
        Some(data) => Some(store_poster(&state, "posters/movies", data).await?),
        None => None,
    };

    let entry = state
        .collection_repo
        .insert_movie(NewPersonalMovie {
            user_id,
            title,
            country_id: country.id,
            production_year,
            score: score.value(),
            poster_key,
            poster_url: form.poster_url,
        })
        .await?;

    tracing::info!(user_id = %user_id, entry_id = %entry.id, "personal movie created");
    Ok(Json(movie_item(&state, &entry)))
}

pub async fn create_personal_actor(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<PersonalActorItem>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;

    if !table_exists(&state.db, "personal_actors").await {
        return Err(AppError::SchemaNotReady(
            "Actor list is temporarily unavailable. Please run migrations.".into(),
        ));
    }

    let form = parse_entry_form(multipart, "full_name", "born").await?;

    let full_name = name_or_placeholder(&form.name);
    let born = BirthYear::parse_or_default(&form.year)?;
    let score = Score::parse_or_default(&form.score)?;
    let country = state.country_repo.resolve_or_create(&form.country).await?;

    let poster_key = match form.poster_bytes.as_deref() {
        Some(data) => Some(store_poster(&state, "posters/actors", data).await?),
        None => None,
    };

    let entry = state
        .collection_repo
        .insert_actor(NewPersonalActor {
            user_id,
            full_name,
            country_id: country.id,
            born: born.value(),
            score: score.value(),
            poster_key,
            poster_url: form.poster_url,
        })
        .await?;

    tracing::info!(user_id = %user_id, entry_id = %entry.id, "personal actor created");
    Ok(Json(actor_item(&state, &entry)))
}

/// Poster object is removed before the row so a successful delete leaves no
/// dangling storage object. A storage delete racing a stale reference is
/// logged, not surfaced.
async fn discard_poster(state: &AppState, poster_key: Option<&str>) {
    if let Some(key) = poster_key {
        if let Err(e) = state.storage.delete(key).await {
            tracing::warn!(key, error = %e, "poster delete failed, object may already be gone");
        }
    }
}

pub async fn delete_personal_movie(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;

    let entry = state
        .collection_repo
        .find_movie(user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Personal movie not found".into()))?;

    discard_poster(&state, entry.poster_key.as_deref()).await;

    if !state.collection_repo.delete_movie(user_id, id).await? {
        return Err(AppError::NotFound("Personal movie not found".into()));
    }

    Ok(Json(
        serde_json::json!({ "message": "Removed from your personal list." }),
    ))
}

pub async fn delete_personal_actor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;

    let entry = state
        .collection_repo
        .find_actor(user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Personal actor not found".into()))?;

    discard_poster(&state, entry.poster_key.as_deref()).await;

    if !state.collection_repo.delete_actor(user_id, id).await? {
        return Err(AppError::NotFound("Personal actor not found".into()));
    }

    Ok(Json(
        serde_json::json!({ "message": "Removed from your personal list." }),
    ))
}
