//! Labour/delivery (`ldr`) and postnatal (`pnc`) notes share these
//! handlers; the kind comes from the path.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    application::care_notes::dto::{NoteDetail, NoteForm, NoteHistory},
    domain::{
        care::entity::{CareNote, NoteKind},
        shared::pagination::PageQuery,
        user::entity::Actor,
    },
    presentation::http::{errors::AppError, extract::AppJson, state::AppState},
};

pub async fn list_patient_notes(
    State(state): State<AppState>,
    Path((patient_id, kind)): Path<(Uuid, String)>,
    Query(query): Query<PageQuery>,
) -> Result<Json<NoteHistory>, AppError> {
    let kind: NoteKind = kind.parse()?;
    let history = state
        .care_notes
        .list_for_patient(kind, patient_id, query.requested_page())
        .await?;
    Ok(Json(history))
}

pub async fn add_note(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((patient_id, kind)): Path<(Uuid, String)>,
    AppJson(form): AppJson<NoteForm>,
) -> Result<(StatusCode, Json<CareNote>), AppError> {
    let kind: NoteKind = kind.parse()?;
    let note = state.care_notes.add(&actor, kind, patient_id, form).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

pub async fn view_note(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<Json<NoteDetail>, AppError> {
    let kind: NoteKind = kind.parse()?;
    Ok(Json(state.care_notes.view(&actor, kind, id).await?))
}

pub async fn update_note(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((kind, id)): Path<(String, Uuid)>,
    AppJson(form): AppJson<NoteForm>,
) -> Result<Json<CareNote>, AppError> {
    let kind: NoteKind = kind.parse()?;
    Ok(Json(state.care_notes.update(&actor, kind, id, form).await?))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path((kind, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, AppError> {
    let kind: NoteKind = kind.parse()?;
    state.care_notes.delete(&actor, kind, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
