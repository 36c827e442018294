use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{DonorRegisterResponse, DonorRegistration},
    repo_types::DonorProfile,
    services,
};
use crate::{
    auth::jwt::AuthUser, error::AppError, extract::ApiJson, state::AppState, storage::Upserted,
};

pub fn donor_routes() -> Router<AppState> {
    Router::new()
        .route("/donor/register", post(register))
        .route("/donor/profile", get(profile))
}

#[instrument(skip(state, form))]
pub async fn register(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(form): ApiJson<DonorRegistration>,
) -> Result<(StatusCode, Json<DonorRegisterResponse>), AppError> {
    let res = match services::register(state.storage.as_ref(), user_id, form).await? {
        Upserted::Created(id) => (
            StatusCode::CREATED,
            Json(DonorRegisterResponse {
                message: "Donor registered successfully",
                donor_id: Some(id),
            }),
        ),
        Upserted::Updated => (
            StatusCode::OK,
            Json(DonorRegisterResponse {
                message: "Donor information updated successfully",
                donor_id: None,
            }),
        ),
    };
    Ok(res)
}

#[instrument(skip(state))]
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DonorProfile>, AppError> {
    Ok(Json(services::profile(state.storage.as_ref(), user_id).await?))
}
