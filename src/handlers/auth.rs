// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::CurrentSession,
    models::auth::{LoginUserPayload, SessionInfo, SwitchCompanyPayload, User},
};

// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let response = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(response)))
}

// POST /api/auth/logout
pub async fn logout(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> impl IntoResponse {
    app_state.auth_service.logout(session.id).await;
    StatusCode::NO_CONTENT
}

// GET /api/users/me
pub async fn get_me(CurrentSession(session): CurrentSession) -> Json<User> {
    Json(session.user.clone())
}

// GET /api/session
pub async fn get_session(CurrentSession(session): CurrentSession) -> Json<SessionInfo> {
    let scope = session.scope().await;
    let active_company = match scope.company_id {
        Some(id) => session.workspace.companies.get(&scope, id).await,
        None => None,
    };

    Json(SessionInfo {
        session_id: session.id,
        user: session.user.clone(),
        active_company,
        permissions: session.user.role.permissions(),
        started_at: session.started_at,
    })
}

// PUT /api/session/company
pub async fn switch_company(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<SwitchCompanyPayload>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state
        .tenant_service
        .switch_company(&session, payload.company_id)
        .await?;

    Ok((StatusCode::OK, Json(company)))
}
