// src/handlers/settings.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentSession,
    models::settings::{ChangePasswordRequest, UpdateSettingsRequest},
};

// GET /api/settings
pub async fn get_settings(CurrentSession(session): CurrentSession) -> Result<impl IntoResponse, AppError> {
    let settings = session.settings.read().await.clone();
    Ok((StatusCode::OK, Json(settings)))
}

// PUT /api/settings
pub async fn update_settings(
    CurrentSession(session): CurrentSession,
    Json(payload): Json<UpdateSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let mut settings = session.settings.write().await;
    settings.apply(payload);
    tracing::info!(session_id = %session.id, "settings updated");

    Ok((StatusCode::OK, Json(settings.clone())))
}

// PUT /api/settings/password
pub async fn change_password(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    app_state.auth_service.change_password(&session, &payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
