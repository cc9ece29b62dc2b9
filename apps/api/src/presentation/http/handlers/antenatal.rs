use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    application::antenatal::dto::{AncDetail, AncHistory, AncIntakeForm, AncVisitForm},
    domain::{care::entity::AncRecord, shared::pagination::PageQuery, user::entity::Actor},
    presentation::http::{errors::AppError, extract::AppJson, state::AppState},
};

pub async fn list_patient_anc(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
    Query(query): Query<PageQuery>,
) -> Result<Json<AncHistory>, AppError> {
    let history = state
        .antenatal
        .list_for_patient(patient_id, query.requested_page())
        .await?;
    Ok(Json(history))
}

pub async fn add_intake(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(patient_id): Path<Uuid>,
    AppJson(form): AppJson<AncIntakeForm>,
) -> Result<(StatusCode, Json<AncRecord>), AppError> {
    let record = state.antenatal.add_intake(&actor, patient_id, form).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn add_visit(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(patient_id): Path<Uuid>,
    AppJson(form): AppJson<AncVisitForm>,
) -> Result<(StatusCode, Json<AncRecord>), AppError> {
    let record = state.antenatal.add_visit(&actor, patient_id, form).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn view_anc(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<Json<AncDetail>, AppError> {
    Ok(Json(state.antenatal.view(&actor, id).await?))
}

pub async fn update_intake(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    AppJson(form): AppJson<AncIntakeForm>,
) -> Result<Json<AncRecord>, AppError> {
    Ok(Json(state.antenatal.update_intake(&actor, id, form).await?))
}

pub async fn update_visit(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    AppJson(form): AppJson<AncVisitForm>,
) -> Result<Json<AncRecord>, AppError> {
    Ok(Json(state.antenatal.update_visit(&actor, id, form).await?))
}

pub async fn delete_anc(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.antenatal.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
