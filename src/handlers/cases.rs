// src/handlers/cases.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::CurrentSession,
        rbac::{PermCasesManage, PermCasesView, RequirePermission},
    },
    models::cases::{CasePatch, NewCase},
};

// GET /api/cases
pub async fn list_cases(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCasesView>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let rows = app_state.case_service.list_cases(&session).await;
    Ok((StatusCode::OK, Json(rows)))
}

// GET /api/cases/{id}
pub async fn get_case(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCasesView>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.case_service.detail(&session, id).await?;
    Ok((StatusCode::OK, Json(detail)))
}

// POST /api/cases
pub async fn create_case(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCasesManage>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewCase>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let case = app_state
        .mutations
        .create(&session, &session.workspace.cases, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(case)))
}

// PATCH /api/cases/{id}
// A permissão fina (processo designado) é conferida no serviço.
pub async fn update_case(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCasesView>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<CasePatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let case = app_state.case_service.update_case(&session, id, payload).await?;
    Ok((StatusCode::OK, Json(case)))
}

// DELETE /api/cases/{id}
pub async fn delete_case(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCasesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    app_state
        .mutations
        .delete(&session, &session.workspace.cases, id)
        .await;
    StatusCode::NO_CONTENT
}
