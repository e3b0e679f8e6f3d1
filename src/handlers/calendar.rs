// src/handlers/calendar.rs

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
        rbac::{PermEventsManage, PermEventsView, RequirePermission},
    },
    models::calendar::{EventPatch, NewEvent},
};

// GET /api/calendar/events
pub async fn list_events(
    _guard: RequirePermission<PermEventsView>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let scope = session.scope().await;
    let filter = session.filters.read().await.events.clone();
    let mut events = filter.apply(&session.workspace.events.list(&scope).await);
    events.sort_by_key(|e| (e.date, e.time));

    Ok((StatusCode::OK, Json(events)))
}

// GET /api/calendar/events/{id}
pub async fn get_event(
    _guard: RequirePermission<PermEventsView>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let event = session
        .workspace
        .events
        .get(&session.scope().await, id)
        .await
        .ok_or(AppError::NotFound("Event"))?;

    Ok((StatusCode::OK, Json(event)))
}

// POST /api/calendar/events
pub async fn create_event(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermEventsManage>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewEvent>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let event = app_state
        .mutations
        .create(&session, &session.workspace.events, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

// PATCH /api/calendar/events/{id}
pub async fn update_event(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermEventsManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<EventPatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Um patch com só um dos horários ainda precisa bater com o outro já gravado
    if let Some(stored) = session.workspace.events.get(&session.scope().await, id).await {
        stored.check_patched_window(&payload)?;
    }

    let event = app_state
        .mutations
        .update(&session, &session.workspace.events, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(event)))
}

// DELETE /api/calendar/events/{id}
pub async fn delete_event(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermEventsManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    app_state
        .mutations
        .delete(&session, &session.workspace.events, id)
        .await;
    StatusCode::NO_CONTENT
}
