use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::patients::dto::{PatientForm, PatientOverview},
    domain::{
        patient::entity::Patient,
        shared::pagination::{Page, PageQuery},
        user::entity::Actor,
    },
    presentation::http::{errors::AppError, extract::AppJson, state::AppState},
};

#[derive(Debug, Default, Deserialize)]
pub struct PatientListQuery {
    pub page: Option<String>,
    /// Case-insensitive name filter.
    pub q: Option<String>,
}

pub async fn list_patients(
    State(state): State<AppState>,
    Query(query): Query<PatientListQuery>,
) -> Result<Json<Page<Patient>>, AppError> {
    let requested = PageQuery { page: query.page }.requested_page();
    let page = state.patients.list(requested, query.q).await?;
    Ok(Json(page))
}

pub async fn register_patient(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    AppJson(form): AppJson<PatientForm>,
) -> Result<(StatusCode, Json<Patient>), AppError> {
    let patient = state.patients.register(&actor, form).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

pub async fn view_patient(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PatientOverview>, AppError> {
    Ok(Json(state.patients.view(id).await?))
}

pub async fn update_patient(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    AppJson(form): AppJson<PatientForm>,
) -> Result<Json<Patient>, AppError> {
    Ok(Json(state.patients.update(&actor, id, form).await?))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.patients.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
