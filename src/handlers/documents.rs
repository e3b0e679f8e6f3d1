// src/handlers/documents.rs

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
        rbac::{PermDocumentsView, RequirePermission},
    },
    models::documents::{DocumentPatch, NewDocument},
};

// GET /api/documents
pub async fn list_documents(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermDocumentsView>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let documents = app_state.document_service.list_documents(&session).await;
    Ok((StatusCode::OK, Json(documents)))
}

// GET /api/documents/{id}
pub async fn get_document(
    _guard: RequirePermission<PermDocumentsView>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let document = session
        .workspace
        .documents
        .get(&session.scope().await, id)
        .await
        .ok_or(AppError::NotFound("Document"))?;

    Ok((StatusCode::OK, Json(document)))
}

// Escrita: `manage:documents` ou `manage:own-documents`, conferido no serviço.

// POST /api/documents
pub async fn create_document(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewDocument>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let document = app_state.document_service.create_document(&session, payload).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

// PATCH /api/documents/{id}
pub async fn update_document(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<DocumentPatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let document = app_state
        .document_service
        .update_document(&session, id, payload)
        .await?;
    Ok((StatusCode::OK, Json(document)))
}

// DELETE /api/documents/{id}
pub async fn delete_document(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.document_service.delete_document(&session, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
