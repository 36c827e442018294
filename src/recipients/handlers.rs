use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{RecipientRegisterResponse, RecipientRegistration},
    repo_types::RecipientProfile,
    services,
};
use crate::{
    auth::jwt::AuthUser, error::AppError, extract::ApiJson, state::AppState, storage::Upserted,
};

pub fn recipient_routes() -> Router<AppState> {
    Router::new()
        .route("/recipient/register", post(register))
        .route("/recipient/profile", get(profile))
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(form): ApiJson<RecipientRegistration>,
) -> Result<(StatusCode, Json<RecipientRegisterResponse>), AppError> {
    let res = match services::register(state.storage.as_ref(), user_id, form).await? {
        Upserted::Created(id) => (
            StatusCode::CREATED,
            Json(RecipientRegisterResponse {
                message: "Recipient registered successfully",
                recipient_id: Some(id),
            }),
        ),
        Upserted::Updated => (
            StatusCode::OK,
            Json(RecipientRegisterResponse {
                message: "Recipient information updated successfully",
                recipient_id: None,
            }),
        ),
    };
    Ok(res)
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<RecipientProfile>, AppError> {
    Ok(Json(services::profile(state.storage.as_ref(), user_id).await?))
}
