//! Auth route handlers: login and first-admin bootstrap.

use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use mirai_core::Email;

use crate::db::AdminRepository;
use crate::error::{AppError, Result};
use crate::middleware::issue_token;
use crate::state::AppState;

/// Login payload.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Exchange admin credentials for a bearer token.
///
/// Wrong email and wrong password are indistinguishable to the caller.
#[instrument(skip(state, credentials))]
pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<serde_json::Value>> {
    let email =
        Email::parse(&credentials.email).map_err(|e| AppError::BadRequest(e.to_string()))?;
    if credentials.password.len() < 6 {
        return Err(AppError::BadRequest(
            "password must be at least 6 characters".to_owned(),
        ));
    }

    let admin = AdminRepository::new(state.pool())
        .find_by_email(&email)
        .await?
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".to_owned()))?;

    let parsed = PasswordHash::new(&admin.password_hash)
        .map_err(|e| AppError::Internal(format!("corrupt password hash: {e}")))?;
    Argon2::default()
        .verify_password(credentials.password.as_bytes(), &parsed)
        .map_err(|_| AppError::Unauthorized("invalid credentials".to_owned()))?;

    let token = issue_token(&state, admin.admin_id(), &admin.email)?;
    tracing::info!(admin = %admin.email, "admin logged in");
    Ok(Json(serde_json::json!({
        "token": token,
        "email": admin.email,
    })))
}

/// Create the first admin account; fails once any admin exists.
#[instrument(skip(state, credentials))]
pub async fn bootstrap(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> Result<Json<serde_json::Value>> {
    let email =
        Email::parse(&credentials.email).map_err(|e| AppError::BadRequest(e.to_string()))?;
    if credentials.password.len() < 8 {
        return Err(AppError::BadRequest(
            "password must be at least 8 characters".to_owned(),
        ));
    }

    let repo = AdminRepository::new(state.pool());
    if repo.any_exists().await? {
        return Err(AppError::BadRequest("already initialized".to_owned()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(credentials.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("could not hash password: {e}")))?
        .to_string();

    repo.create(&email, &hash).await?;
    tracing::info!(admin = %email, "bootstrap admin created");
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_roundtrip() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"orange-blossom-42", &salt)
            .unwrap()
            .to_string();

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"orange-blossom-42", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default()
                .verify_password(b"wrong-password", &parsed)
                .is_err()
        );
    }
}
