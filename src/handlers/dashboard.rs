// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{common::error::AppError, config::AppState, middleware::auth::CurrentSession};

// GET /api/dashboard
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();
    let dashboard = app_state.dashboard_service.get_dashboard(&session, today).await;

    Ok((StatusCode::OK, Json(dashboard)))
}
