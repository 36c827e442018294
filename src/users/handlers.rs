use axum::{extract::State, routing::get, Json, Router};
use tracing::{instrument, warn};

use super::dto::PublicUser;
use crate::{auth::jwt::AuthUser, error::AppError, state::AppState};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user/me", get(get_me))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AppError> {
    let Some(user) = state.storage.find_user_by_id(user_id).await? else {
        warn!(%user_id, "token subject has no user row");
        return Err(AppError::not_found("User not found"));
    };
    Ok(Json(user.into()))
}
