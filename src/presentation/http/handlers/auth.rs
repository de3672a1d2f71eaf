use axum::{Json, extract::State, http::HeaderMap};
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{DateTime, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::presentation::http::{
    errors::AppError,
    middleware::user::{UserClaims, decode_required_user_claims},
    state::AppState,
};

lazy_static! {
    static ref USERNAME_RE: Regex =
        Regex::new(r"^[a-zA-Z0-9_]{1,150}$").expect("username regex is valid");
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Valid email is required"))]
    pub email: String,
    #[validate(regex(
        path = *USERNAME_RE,
        message = "Username must use English letters, numbers, or underscore"
    ))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Login accepts a username or an email in the same field: anything
/// containing '@' is treated as an email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

#[derive(Debug, Serialize, FromRow)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    first_name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
}

fn issue_user_token(state: &AppState, user: &AuthUser) -> Result<String, AppError> {
    let exp = (Utc::now() + chrono::Duration::hours(state.config.session_ttl_hours)).timestamp()
        as usize;
    let claims = UserClaims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        role: user.role.clone(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    body.validate()?;
    let email = body.email.trim().to_lowercase();
    let username = body.username.trim().to_string();

    let password_hash = hash(&body.password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    let id = Uuid::now_v7();
    let insert_result = sqlx::query(
        "INSERT INTO users (id, username, email, password_hash, role) VALUES ($1, $2, $3, $4, 'USER')",
    )
    .bind(id)
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .execute(&state.db)
    .await;

    if let Err(e) = insert_result {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.code().as_deref() == Some("23505") {
                let message = match db_err.constraint() {
                    Some("users_username_lower_idx") => "This username is already taken",
                    _ => "This email is already registered",
                };
                return Err(AppError::BadRequest(message.to_string()));
            }
        }
        return Err(AppError::Internal(e.to_string()));
    }

    tracing::info!(user_id = %id, "new user registered");

    let user = AuthUser {
        id,
        username,
        email,
        first_name: None,
        role: "USER".to_string(),
        created_at: Utc::now(),
    };
    let token = issue_user_token(&state, &user)?;

    Ok(Json(AuthResponse { token, user }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let identifier = body.identifier.trim().to_string();
    if identifier.is_empty() {
        return Err(AppError::BadRequest(
            "Username or email is required".to_string(),
        ));
    }

    let lookup = if identifier.contains('@') {
        "SELECT id, username, email, password_hash, first_name, role, created_at \
         FROM users WHERE LOWER(email) = LOWER($1)"
    } else {
        "SELECT id, username, email, password_hash, first_name, role, created_at \
         FROM users WHERE LOWER(username) = LOWER($1)"
    };

    let row = sqlx::query_as::<_, UserRow>(lookup)
        .bind(&identifier)
        .fetch_optional(&state.db)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::Forbidden("Invalid credentials".to_string()))?;

    let valid = verify(&body.password, &row.password_hash)
        .map_err(|_| AppError::Internal("Password verification failed".to_string()))?;

    if !valid {
        return Err(AppError::Forbidden("Invalid credentials".to_string()));
    }

    let user = AuthUser {
        id: row.id,
        username: row.username,
        email: row.email,
        first_name: row.first_name,
        role: row.role,
        created_at: row.created_at,
    };
    let token = issue_user_token(&state, &user)?;

    Ok(Json(AuthResponse { token, user }))
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AuthUser>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Forbidden("Invalid token subject".to_string()))?;

    let user = sqlx::query_as::<_, AuthUser>(
        "SELECT id, username, email, first_name, role, created_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?
    .ok_or_else(|| AppError::Forbidden("User not found".to_string()))?;

    Ok(Json(user))
}

/// Tokens are stateless, so logout is an acknowledgement: the client discards
/// the token and expiry enforces the session window server-side.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    Ok(Json(
        serde_json::json!({ "message": "Logged out. Discard the token client-side." }),
    ))
}
