use std::time::{SystemTime, UNIX_EPOCH};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::JwtConfig, error::AppError, routes::AppState};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    /// User id.
    sub: String,
}

pub fn generate_token(config: &JwtConfig, user_id: i64) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + config.expiration_days * 24 * 60 * 60,
        iat: now,
        iss: config.issuer.to_owned(),
        sub: user_id.to_string(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

fn decode_user_id(config: &JwtConfig, token: &str) -> Option<i64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .ok()?;

    token_data.claims.sub.parse().ok()
}

/// Authenticated caller. Rejects with 401 when the bearer token is missing,
/// invalid or points to a user that no longer exists.
pub struct AuthUser(pub foodgram_user::User);

/// Caller that may be anonymous. A token that is present but invalid still
/// rejects with 401.
pub struct MaybeAuthUser(pub Option<foodgram_user::User>);

impl MaybeAuthUser {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.id)
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header =
            match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
                Ok(TypedHeader(header)) => header,
                Err(rejection) if rejection.is_missing() => return Ok(MaybeAuthUser(None)),
                Err(_) => return Err(AppError::Unauthorized("Invalid authorization header.")),
            };

        let Some(user_id) = decode_user_id(&state.config.jwt, header.token()) else {
            return Err(AppError::Unauthorized("Invalid token."));
        };

        let Some(user) = state.user_command.load(user_id).await? else {
            tracing::warn!(user_id, "token for unknown user");

            return Err(AppError::Unauthorized("Invalid token."));
        };

        Ok(MaybeAuthUser(Some(user)))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match MaybeAuthUser::from_request_parts(parts, state).await? {
            MaybeAuthUser(Some(user)) => Ok(AuthUser(user)),
            MaybeAuthUser(None) => Err(AppError::Unauthorized(
                "Authentication credentials were not provided.",
            )),
        }
    }
}
