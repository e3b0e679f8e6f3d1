// src/handlers/billing.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::{
        auth::CurrentSession,
        rbac::{PermInvoicesManage, PermInvoicesView, RequirePermission},
    },
    models::billing::{
        BillingRatePatch, InvoicePatch, NewBillingRate, NewInvoice, NewTimeEntry, TimeEntryPatch,
        UnbilledQuery,
    },
};

// =============================================================================
//  ÁREA 1: FATURAS
// =============================================================================

// GET /api/billing/invoices
pub async fn list_invoices(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesView>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.billing_service.list_invoices(&session).await;
    Ok((StatusCode::OK, Json(invoices)))
}

// GET /api/billing/invoices/{id}
pub async fn get_invoice(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesView>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state.billing_service.get_invoice(&session, id).await?;
    Ok((StatusCode::OK, Json(invoice)))
}

// POST /api/billing/invoices
pub async fn create_invoice(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewInvoice>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = app_state.billing_service.create_invoice(&session, payload).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

// PATCH /api/billing/invoices/{id}
pub async fn update_invoice(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<InvoicePatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invoice = app_state.billing_service.update_invoice(&session, id, payload).await?;
    Ok((StatusCode::OK, Json(invoice)))
}

// DELETE /api/billing/invoices/{id}
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    app_state
        .mutations
        .delete(&session, &session.workspace.invoices, id)
        .await;
    StatusCode::NO_CONTENT
}

// GET /api/billing/invoices/{id}/print
pub async fn print_invoice(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesView>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let text = app_state.billing_service.render_printable(&session, id).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text,
    ))
}

// POST /api/billing/invoices/{id}/send
// Sem envio de verdade: só registra o pedido.
pub async fn send_invoice(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = app_state.billing_service.get_invoice(&session, id).await?;
    tracing::info!(
        invoice_id = %id,
        invoice_number = %row.invoice.invoice_number,
        client = %row.client_name,
        "invoice send requested"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "invoiceId": id, "action": "send" })),
    ))
}

// POST /api/billing/invoices/{id}/download
pub async fn download_invoice(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesView>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let row = app_state.billing_service.get_invoice(&session, id).await?;
    tracing::info!(
        invoice_id = %id,
        invoice_number = %row.invoice.invoice_number,
        "invoice download requested"
    );

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "invoiceId": id, "action": "download" })),
    ))
}

// =============================================================================
//  ÁREA 2: LANÇAMENTOS DE HORAS
// =============================================================================

// GET /api/billing/time-entries
pub async fn list_time_entries(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesView>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.billing_service.list_time_entries(&session).await;
    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/billing/time-entries/unbilled?clientId=...
pub async fn list_unbilled(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesView>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<UnbilledQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.billing_service.unbilled(&session, query.client_id).await;
    Ok((StatusCode::OK, Json(entries)))
}

// POST /api/billing/time-entries
pub async fn create_time_entry(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewTimeEntry>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .mutations
        .create(&session, &session.workspace.time_entries, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

// PATCH /api/billing/time-entries/{id}
pub async fn update_time_entry(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<TimeEntryPatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let entry = app_state
        .mutations
        .update(&session, &session.workspace.time_entries, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(entry)))
}

// DELETE /api/billing/time-entries/{id}
pub async fn delete_time_entry(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    app_state
        .mutations
        .delete(&session, &session.workspace.time_entries, id)
        .await;
    StatusCode::NO_CONTENT
}

// =============================================================================
//  ÁREA 3: TABELA DE HONORÁRIOS
// =============================================================================

// GET /api/billing/rates
pub async fn list_rates(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesView>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let rates = app_state.billing_service.list_rates(&session).await;
    Ok((StatusCode::OK, Json(rates)))
}

// POST /api/billing/rates
pub async fn create_rate(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewBillingRate>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let rate = app_state
        .mutations
        .create(&session, &session.workspace.billing_rates, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(rate)))
}

// PATCH /api/billing/rates/{id}
pub async fn update_rate(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<BillingRatePatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let rate = app_state
        .mutations
        .update(&session, &session.workspace.billing_rates, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(rate)))
}

// DELETE /api/billing/rates/{id}
pub async fn delete_rate(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermInvoicesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    app_state
        .mutations
        .delete(&session, &session.workspace.billing_rates, id)
        .await;
    StatusCode::NO_CONTENT
}
