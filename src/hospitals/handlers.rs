use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    catalog::{Hospital, HOSPITALS},
    dto::{ContactRequest, MessageResponse},
    repo_types::HospitalContact,
    services,
};
use crate::{auth::jwt::AuthUser, error::AppError, extract::ApiJson, state::AppState};

pub fn hospital_routes() -> Router<AppState> {
    Router::new()
        .route("/hospital/list", get(list))
        .route("/hospital/contact", post(contact))
        .route("/hospital/contacts", get(contacts))
}

pub async fn list() -> Json<&'static [Hospital]> {
    Json(HOSPITALS)
}

#[instrument(skip(state, payload))]
pub async fn contact(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    services::contact(state.storage.as_ref(), user_id, payload).await?;
    Ok(Json(MessageResponse {
        message: "Contact message sent successfully",
    }))
}

#[instrument(skip(state))]
pub async fn contacts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<HospitalContact>>, AppError> {
    Ok(Json(services::contacts(state.storage.as_ref(), user_id).await?))
}
