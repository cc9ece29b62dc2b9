use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    application::users::dto::{CreateUserForm, UpdateUserForm},
    domain::{
        shared::pagination::{Page, PageQuery},
        user::entity::{Actor, User},
    },
    presentation::http::{errors::AppError, extract::AppJson, state::AppState},
};

pub async fn list_users(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<User>>, AppError> {
    Ok(Json(
        state.users.list(&actor, query.requested_page()).await?,
    ))
}

pub async fn create_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    AppJson(form): AppJson<CreateUserForm>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.users.create(&actor, form).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.get(&actor, id).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    AppJson(form): AppJson<UpdateUserForm>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.update(&actor, id, form).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.users.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
