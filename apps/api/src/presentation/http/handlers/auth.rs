use axum::{Extension, Json, extract::State};
use serde::Serialize;
use ts_rs::TS;

use crate::{
    application::users::dto::LoginForm,
    domain::{
        shared::errors::DomainError,
        user::entity::{Actor, User},
    },
    presentation::http::{
        errors::AppError, extract::AppJson, middleware::auth::issue_token, state::AppState,
    },
};

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginForm>,
) -> Result<Json<AuthResponse>, AppError> {
    if body.username.trim().is_empty() {
        return Err(AppError::BadRequest("Username is required.".to_string()));
    }

    let user = state
        .users
        .authenticate(&body.username, &body.password)
        .await
        .map_err(|e| match e {
            DomainError::Forbidden => AppError::Forbidden("Invalid credentials".to_string()),
            other => other.into(),
        })?;
    let token = issue_token(&user, &state.config.jwt_secret, state.config.token_ttl_hours)?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse { token, user }))
}

pub async fn me(Extension(actor): Extension<Actor>) -> Json<Actor> {
    Json(actor)
}
