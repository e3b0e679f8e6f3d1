// src/handlers/clients.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, filter::RecordFilter},
    config::AppState,
    middleware::{
        auth::CurrentSession,
        rbac::{PermClientsManage, PermClientsView, RequirePermission},
    },
    models::clients::{ClientPatch, NewClient},
};

// GET /api/clients
pub async fn list_clients(
    _guard: RequirePermission<PermClientsView>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let scope = session.scope().await;
    let filter = session.filters.read().await.clients.clone();
    let clients = session.workspace.clients.list(&scope).await;

    Ok((StatusCode::OK, Json(filter.apply(&clients))))
}

// GET /api/clients/{id}
pub async fn get_client(
    _guard: RequirePermission<PermClientsView>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let client = session
        .workspace
        .clients
        .get(&session.scope().await, id)
        .await
        .ok_or(AppError::NotFound("Client"))?;

    Ok((StatusCode::OK, Json(client)))
}

// POST /api/clients
pub async fn create_client(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermClientsManage>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewClient>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .mutations
        .create(&session, &session.workspace.clients, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(client)))
}

// PATCH /api/clients/{id}
pub async fn update_client(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermClientsManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<ClientPatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let client = app_state
        .mutations
        .update(&session, &session.workspace.clients, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(client)))
}

// DELETE /api/clients/{id}
pub async fn delete_client(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermClientsManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    app_state
        .mutations
        .delete(&session, &session.workspace.clients, id)
        .await;
    StatusCode::NO_CONTENT
}
