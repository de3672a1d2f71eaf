use axum::{
    extract::State,
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::presentation::http::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub exp: usize,
}

/// Admin tokens are only honored when their subject is the configured admin
/// identity. A stale token from a previous ADMIN_EMAIL stops working the
/// moment the configuration changes.
fn verify_admin_token(token: &str, secret: &str, admin_email: &str) -> Option<AdminClaims> {
    let claims = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?
    .claims;

    if claims.sub != admin_email {
        return None;
    }
    Some(claims)
}

pub async fn require_admin(
    State(state): State<AppState>,
    mut req: axum::extract::Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let claims = verify_admin_token(token, &state.config.jwt_secret, &state.config.admin_email)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "test-secret";
    const ADMIN: &str = "admin@example.com";

    fn token(sub: &str, exp: i64) -> String {
        let claims = AdminClaims {
            sub: sub.to_string(),
            exp: exp as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap()
    }

    fn future_exp() -> i64 {
        (chrono::Utc::now() + chrono::Duration::hours(1)).timestamp()
    }

    #[test]
    fn valid_admin_token_is_accepted() {
        let t = token(ADMIN, future_exp());
        let claims = verify_admin_token(&t, SECRET, ADMIN);
        assert_eq!(claims.map(|c| c.sub).as_deref(), Some(ADMIN));
    }

    #[test]
    fn token_for_a_different_subject_is_rejected() {
        let t = token("intruder@example.com", future_exp());
        assert!(verify_admin_token(&t, SECRET, ADMIN).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let exp = (chrono::Utc::now() - chrono::Duration::hours(2)).timestamp();
        let t = token(ADMIN, exp);
        assert!(verify_admin_token(&t, SECRET, ADMIN).is_none());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let claims = AdminClaims {
            sub: ADMIN.to_string(),
            exp: future_exp() as usize,
        };
        let t = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"other-secret"),
        )
        .unwrap();
        assert!(verify_admin_token(&t, SECRET, ADMIN).is_none());
    }
}
