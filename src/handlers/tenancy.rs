// src/handlers/tenancy.rs

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
        rbac::{PermCompaniesManage, PermCompaniesView, PermUsersManage, PermUsersView, RequirePermission},
    },
    models::tenancy::{CompanyPatch, EmployeePatch, NewCompany, NewEmployee},
};

// =============================================================================
//  ÁREA 1: ESCRITÓRIOS
// =============================================================================

// GET /api/companies
pub async fn list_companies(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCompaniesView>,
    CurrentSession(session): CurrentSession,
) -> Result<impl IntoResponse, AppError> {
    let companies = app_state.tenant_service.list_companies(&session).await;
    Ok((StatusCode::OK, Json(companies)))
}

// GET /api/companies/{id}
// Qualquer usuário vê o próprio escritório.
pub async fn get_company(
    State(app_state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let company = app_state.tenant_service.get_company(&session, id).await?;
    Ok((StatusCode::OK, Json(company)))
}

// POST /api/companies
pub async fn create_company(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCompaniesManage>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewCompany>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let company = app_state.tenant_service.create_company(&session, payload).await?;
    Ok((StatusCode::CREATED, Json(company)))
}

// PATCH /api/companies/{id}
pub async fn update_company(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCompaniesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompanyPatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let company = app_state.tenant_service.update_company(&session, id, payload).await?;
    Ok((StatusCode::OK, Json(company)))
}

// DELETE /api/companies/{id}
pub async fn delete_company(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermCompaniesManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    app_state.tenant_service.delete_company(&session, id).await;
    StatusCode::NO_CONTENT
}

// =============================================================================
//  ÁREA 2: FUNCIONÁRIOS
// =============================================================================

// GET /api/companies/{id}/employees
pub async fn list_employees(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUsersView>,
    CurrentSession(session): CurrentSession,
    Path(company_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let employees = app_state.tenant_service.employees_for(&session, company_id).await?;
    Ok((StatusCode::OK, Json(employees)))
}

// POST /api/employees
pub async fn create_employee(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUsersManage>,
    CurrentSession(session): CurrentSession,
    Json(payload): Json<NewEmployee>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state.tenant_service.create_employee(&session, payload).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

// PATCH /api/employees/{id}
pub async fn update_employee(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUsersManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
    Json(payload): Json<EmployeePatch>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let employee = app_state.tenant_service.update_employee(&session, id, payload).await?;
    Ok((StatusCode::OK, Json(employee)))
}

// DELETE /api/employees/{id}
pub async fn delete_employee(
    State(app_state): State<AppState>,
    _guard: RequirePermission<PermUsersManage>,
    CurrentSession(session): CurrentSession,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    app_state.tenant_service.delete_employee(&session, id).await;
    StatusCode::NO_CONTENT
}
