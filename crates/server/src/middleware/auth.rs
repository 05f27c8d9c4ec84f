//! Bearer-token authentication for catalog mutations.
//!
//! Admin logins are exchanged for a signed JWT with an 8 hour expiry; the
//! [`RequireAdmin`] extractor verifies it on every protected handler.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{Validation, decode, encode};
use serde::{Deserialize, Serialize};

use mirai_core::AdminId;

use crate::error::AppError;
use crate::state::AppState;

/// Token lifetime.
const TOKEN_TTL_HOURS: i64 = 8;

/// Claims carried by an admin bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin account id.
    pub sub: i64,
    pub email: String,
    /// Expiry as a Unix timestamp.
    pub exp: i64,
}

/// Sign a bearer token for a logged-in admin.
///
/// # Errors
///
/// Returns `AppError::Internal` if signing fails.
pub fn issue_token(state: &AppState, admin_id: AdminId, email: &str) -> Result<String, AppError> {
    let claims = Claims {
        sub: admin_id.as_i64(),
        email: email.to_owned(),
        exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    encode(
        &jsonwebtoken::Header::default(),
        &claims,
        state.jwt_encoding_key(),
    )
    .map_err(|e| AppError::Internal(format!("could not sign token: {e}")))
}

/// Extractor that requires a valid admin bearer token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(claims): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.email)
/// }
/// ```
pub struct RequireAdmin(pub Claims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        let token = header
            .strip_prefix("Bearer ")
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_owned()))?;

        let data = decode::<Claims>(token, state.jwt_decoding_key(), &Validation::default())
            .map_err(|e| AppError::Unauthorized(format!("invalid token: {e}")))?;

        Ok(Self(data.claims))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;

    fn test_state() -> AppState {
        let config = ServerConfig {
            database_url: SecretString::from("postgres://localhost/mirai"),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            jwt_secret: SecretString::from("fJ8#kQ2@mX9$pL4!wR7&zT0*bN5^vC3="),
            allowed_origins: vec![],
        };
        // Lazy pool: never actually connects in these tests.
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/mirai")
            .unwrap();
        AppState::new(config, pool)
    }

    #[tokio::test]
    async fn test_token_roundtrip() {
        let state = test_state();
        let token = issue_token(&state, AdminId::new(1), "admin@mirai.example").unwrap();

        let data =
            decode::<Claims>(&token, state.jwt_decoding_key(), &Validation::default()).unwrap();
        assert_eq!(data.claims.sub, 1);
        assert_eq!(data.claims.email, "admin@mirai.example");
        assert!(data.claims.exp > Utc::now().timestamp());
    }

    #[tokio::test]
    async fn test_expired_token_rejected() {
        let state = test_state();
        let claims = Claims {
            sub: 1,
            email: "admin@mirai.example".to_owned(),
            exp: (Utc::now() - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &jsonwebtoken::Header::default(),
            &claims,
            state.jwt_encoding_key(),
        )
        .unwrap();

        assert!(decode::<Claims>(&token, state.jwt_decoding_key(), &Validation::default()).is_err());
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let state = test_state();
        assert!(
            decode::<Claims>("not-a-token", state.jwt_decoding_key(), &Validation::default())
                .is_err()
        );
    }
}
