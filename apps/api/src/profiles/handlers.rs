use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{Profile, ProfileRow};
use crate::profiles::validate_profile;
use crate::state::AppState;

/// GET /api/v1/profiles/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ProfileRow>, AppError> {
    state
        .profiles
        .get(user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("profile {user_id}")))
}

/// PUT /api/v1/profiles/:user_id
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(profile): Json<Profile>,
) -> Result<Json<ProfileRow>, AppError> {
    validate_profile(&profile)?;
    let row = state.profiles.upsert(user_id, &profile).await?;
    tracing::info!("Stored profile for user {user_id}");
    Ok(Json(row))
}
