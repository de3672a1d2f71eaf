use axum::{Json, extract::Multipart, extract::State, http::HeaderMap};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Utc};
use image::{ImageFormat, imageops::FilterType};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::io::Cursor;
use uuid::Uuid;
use validator::Validate;

use crate::presentation::http::{
    errors::AppError, middleware::user::require_user_id, state::AppState,
};

const ALLOWED_AVATAR_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];
const AVATAR_MAX_EDGE: u32 = 512;

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    username: String,
    email: String,
    first_name: Option<String>,
    role: String,
    avatar_key: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub role: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn profile_response(state: &AppState, row: ProfileRow) -> ProfileResponse {
    ProfileResponse {
        id: row.id,
        username: row.username,
        email: row.email,
        first_name: row.first_name,
        role: row.role,
        avatar_url: row.avatar_key.as_deref().map(|k| state.storage.get_url(k)),
        created_at: row.created_at,
    }
}

async fn fetch_profile(state: &AppState, user_id: Uuid) -> Result<ProfileRow, AppError> {
    sqlx::query_as::<_, ProfileRow>(
        "SELECT id, username, email, first_name, role, avatar_key, created_at \
         FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
    .ok_or_else(|| AppError::Forbidden("User not found".to_string()))
}

pub async fn get_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;
    let row = fetch_profile(&state, user_id).await?;
    Ok(Json(profile_response(&state, row)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInfoRequest {
    #[validate(length(max = 150, message = "First name is too long"))]
    pub first_name: Option<String>,
    #[validate(email(message = "Valid email is required"))]
    pub email: Option<String>,
}

/// Absent fields stay untouched; present fields are trimmed, and the email is
/// lowercased to match the case-insensitive unique index.
fn normalized_updates(body: &UpdateInfoRequest) -> (Option<String>, Option<String>) {
    (
        body.first_name.as_deref().map(|s| s.trim().to_string()),
        body.email.as_deref().map(|e| e.trim().to_lowercase()),
    )
}

pub async fn update_info(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<UpdateInfoRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;
    body.validate()?;

    let (first_name, email) = normalized_updates(&body);

    // Both fields go through one UPDATE: a duplicate-email rejection must
    // leave the whole row untouched, including the first name.
    if first_name.is_some() || email.is_some() {
        let result = sqlx::query(
            "UPDATE users SET first_name = COALESCE($1, first_name), \
             email = COALESCE($2, email) WHERE id = $3",
        )
        .bind(&first_name)
        .bind(&email)
        .bind(user_id)
        .execute(&state.db)
        .await;

        if let Err(e) = result {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23505") {
                    return Err(AppError::BadRequest(
                        "This email is already registered".to_string(),
                    ));
                }
            }
            return Err(AppError::Internal(e.to_string()));
        }
    }

    let row = fetch_profile(&state, user_id).await?;
    Ok(Json(profile_response(&state, row)))
}

pub async fn upload_avatar(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ProfileResponse>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;

    let mut data = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Malformed form field".into()))?
    {
        if field.name() != Some("avatar") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("").to_lowercase();
        let extension = file_name.rsplit('.').next().unwrap_or("");
        if !ALLOWED_AVATAR_EXTENSIONS.contains(&extension) {
            return Err(AppError::BadRequest(
                "Avatar must be a .png, .jpg, .jpeg, or .webp file".into(),
            ));
        }
        data = Some(
            field
                .bytes()
                .await
                .map_err(|_| AppError::BadRequest("Failed to read avatar upload".into()))?,
        );
    }

    let data = data.ok_or_else(|| AppError::BadRequest("Avatar file is required".into()))?;
    let img = image::load_from_memory(&data)
        .map_err(|_| AppError::BadRequest("Invalid avatar image".into()))?;

    let mut buf = Cursor::new(Vec::new());
    img.resize(AVATAR_MAX_EDGE, AVATAR_MAX_EDGE, FilterType::Lanczos3)
        .write_to(&mut buf, ImageFormat::WebP)
        .map_err(|e| AppError::Internal(format!("Failed to encode avatar to WebP: {}", e)))?;

    // Drop the previous object first so the bucket never accumulates
    // orphaned avatars.
    let row = fetch_profile(&state, user_id).await?;
    if let Some(old_key) = &row.avatar_key {
        if let Err(e) = state.storage.delete(old_key).await {
            tracing::warn!(key = %old_key, error = %e, "old avatar delete failed");
        }
    }

    let key = format!("avatars/{}.webp", Uuid::now_v7());
    state
        .storage
        .upload(&key, buf.into_inner(), "image/webp")
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?;

    sqlx::query("UPDATE users SET avatar_key = $1 WHERE id = $2")
        .bind(&key)
        .bind(user_id)
        .execute(&state.db)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user_id, "avatar updated");

    let row = fetch_profile(&state, user_id).await?;
    Ok(Json(profile_response(&state, row)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

pub async fn change_password(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let user_id = require_user_id(&headers, &state.config.jwt_secret)?;
    body.validate()?;

    let current_hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::Forbidden("User not found".to_string()))?;

    let valid = verify(&body.current_password, &current_hash)
        .map_err(|_| AppError::Internal("Password verification failed".to_string()))?;
    if !valid {
        return Err(AppError::Forbidden("Current password is incorrect".into()));
    }

    let new_hash = hash(&body.new_password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
        .bind(&new_hash)
        .bind(user_id)
        .execute(&state.db)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::info!(user_id = %user_id, "password changed");
    Ok(Json(serde_json::json!({ "message": "Password updated." })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(first_name: Option<&str>, email: Option<&str>) -> UpdateInfoRequest {
        UpdateInfoRequest {
            first_name: first_name.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn info_updates_are_trimmed_and_email_is_lowercased() {
        let (first_name, email) = normalized_updates(&body(Some("  Ada "), Some(" Ada@Example.COM ")));
        assert_eq!(first_name.as_deref(), Some("Ada"));
        assert_eq!(email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn absent_info_fields_stay_absent() {
        // Absent fields become NULL binds that COALESCE away, so both changes
        // ride a single statement and fail or commit together.
        let (first_name, email) = normalized_updates(&body(None, None));
        assert!(first_name.is_none());
        assert!(email.is_none());

        let (first_name, email) = normalized_updates(&body(Some("Ada"), None));
        assert_eq!(first_name.as_deref(), Some("Ada"));
        assert!(email.is_none());
    }
}
