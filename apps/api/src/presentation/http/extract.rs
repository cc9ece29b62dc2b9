use axum::{extract::FromRequest, extract::rejection::JsonRejection};

use super::errors::AppError;

/// `axum::Json` whose rejections render as the usual `{"error": ...}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
