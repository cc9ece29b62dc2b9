use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};

use crate::{
    application::users::dto::{Profile, RecentRecords},
    domain::{care::entity::RecordKind, shared::pagination::PageQuery, user::entity::Actor},
    presentation::http::{errors::AppError, state::AppState},
};

pub async fn my_profile(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Profile>, AppError> {
    Ok(Json(state.users.profile(&actor).await?))
}

/// `kind` is `anc`, `ldr` or `pnc` (legacy `0`, `1`, `2` also accepted).
pub async fn my_recent_records(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(kind): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<RecentRecords>, AppError> {
    let kind: RecordKind = kind.parse()?;
    let records = state
        .users
        .recent_records(&actor, kind, query.requested_page())
        .await?;
    Ok(Json(records))
}
