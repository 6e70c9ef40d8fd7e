use crate::db::{ContactMessage, NewContactMessage};
use crate::error::{LetterboxError, ValidationError};
use crate::server::router::AppState;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

/// Wire shape of a submission before validation.
///
/// Every field is optional so a missing one surfaces as a structured
/// validation error instead of a serde deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub message: Option<String>,
}

impl ContactForm {
    fn into_new_message(self) -> Result<NewContactMessage, ValidationError> {
        NewContactMessage::new(self.name, self.email, self.mobile, self.message)
    }
}

/// POST /api/contact
///
/// Validates the submission, stores it, and acknowledges with 201.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactForm>, JsonRejection>,
) -> Result<impl axum::response::IntoResponse, LetterboxError> {
    let Json(form) = payload?;
    let new = form.into_new_message()?;
    let stored = state.store.create(new).await?;
    tracing::info!(id = stored.id, "contact message stored");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Message sent successfully!" })),
    ))
}

/// GET /api/messages
///
/// All stored messages, newest first.
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, LetterboxError> {
    let messages = state.store.list_all().await?;
    Ok(Json(messages))
}

/// GET /api/messages/{id}
pub async fn get_message(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ContactMessage>, LetterboxError> {
    let Path(id) = path.map_err(|rejection| LetterboxError::InvalidId(rejection.body_text()))?;
    let message = state.store.get_by_id(id).await?;
    Ok(Json(message))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(submit_contact))
        .route("/api/messages", get(list_messages))
        .route("/api/messages/{id}", get(get_message))
}
