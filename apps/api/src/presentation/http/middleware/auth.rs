use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    domain::user::entity::{Actor, User},
    presentation::http::{errors::AppError, state::AppState},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub fn issue_token(user: &User, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let exp = (Utc::now() + Duration::hours(ttl_hours)).timestamp() as usize;
    let claims = UserClaims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

pub fn decode_token(token: &str, secret: &str) -> Result<UserClaims, AppError> {
    decode::<UserClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|d| d.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))
}

/// Resolves the bearer token to an [`Actor`] and stores it in the request
/// extensions. The account is re-read on every request.
pub async fn require_user(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(req.headers())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;
    let claims = decode_token(token, &state.config.jwt_secret)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid token subject".into()))?;

    let actor = state.users.resolve_actor(user_id).await?;
    tracing::Span::current().record("user", actor.username.as_str());
    req.extensions_mut().insert(actor);

    Ok(next.run(req).await)
}

/// Must be layered inside [`require_user`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let actor = req
        .extensions()
        .get::<Actor>()
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;
    actor.require_admin()?;
    Ok(next.run(req).await)
}
