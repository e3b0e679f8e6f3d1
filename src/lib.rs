// src/lib.rs

use axum::{
    http::StatusCode,
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, patch, post, put},
    Json, Router,
};
use serde_json::json;

pub mod common;
pub mod config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

use crate::{config::AppState, middleware::auth::auth_guard};

/// Todas as rotas da API. Fora `/api/auth/login` e `/api/health`, tudo
/// passa pelo `auth_guard`.
pub fn build_router(app_state: AppState) -> Router {
    use handlers::{
        auth, billing, calendar, cases, clients, dashboard, documents, filters, notifications, rbac,
        settings, tenancy,
    };

    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new().route("/login", post(auth::login)).merge(
        Router::new()
            .route("/logout", post(auth::logout))
            .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard)),
    );

    let session_routes = Router::new()
        .route("/api/users/me", get(auth::get_me))
        .route("/api/session", get(auth::get_session))
        .route("/api/session/company", put(auth::switch_company))
        .route("/api/permissions", get(rbac::list_permissions))
        .route("/api/permissions/{slug}", get(rbac::check_permission))
        .route("/api/dashboard", get(dashboard::get_dashboard))
        .route("/api/settings", get(settings::get_settings).put(settings::update_settings))
        .route("/api/settings/password", put(settings::change_password))
        .route("/api/notifications", get(notifications::drain_notifications));

    let client_routes = Router::new()
        .route("/", get(clients::list_clients).post(clients::create_client))
        .route(
            "/filters",
            get(filters::get_client_filter)
                .put(filters::set_client_filter)
                .delete(filters::reset_client_filter),
        )
        .route(
            "/{id}",
            get(clients::get_client)
                .patch(clients::update_client)
                .delete(clients::delete_client),
        );

    let case_routes = Router::new()
        .route("/", get(cases::list_cases).post(cases::create_case))
        .route(
            "/filters",
            get(filters::get_case_filter)
                .put(filters::set_case_filter)
                .delete(filters::reset_case_filter),
        )
        .route(
            "/{id}",
            get(cases::get_case).patch(cases::update_case).delete(cases::delete_case),
        );

    let document_routes = Router::new()
        .route("/", get(documents::list_documents).post(documents::create_document))
        .route(
            "/filters",
            get(filters::get_document_filter)
                .put(filters::set_document_filter)
                .delete(filters::reset_document_filter),
        )
        .route(
            "/{id}",
            get(documents::get_document)
                .patch(documents::update_document)
                .delete(documents::delete_document),
        );

    let billing_routes = Router::new()
        // Faturas
        .route("/invoices", get(billing::list_invoices).post(billing::create_invoice))
        .route(
            "/invoices/{id}",
            get(billing::get_invoice)
                .patch(billing::update_invoice)
                .delete(billing::delete_invoice),
        )
        .route("/invoices/{id}/print", get(billing::print_invoice))
        .route("/invoices/{id}/send", post(billing::send_invoice))
        .route("/invoices/{id}/download", post(billing::download_invoice))
        // Lançamentos de horas
        .route("/time-entries", get(billing::list_time_entries).post(billing::create_time_entry))
        .route("/time-entries/unbilled", get(billing::list_unbilled))
        .route(
            "/time-entries/{id}",
            patch(billing::update_time_entry).delete(billing::delete_time_entry),
        )
        // Honorários
        .route("/rates", get(billing::list_rates).post(billing::create_rate))
        .route(
            "/rates/filters",
            get(filters::get_rate_filter)
                .put(filters::set_rate_filter)
                .delete(filters::reset_rate_filter),
        )
        .route(
            "/rates/{id}",
            patch(billing::update_rate).delete(billing::delete_rate),
        )
        .route(
            "/filters",
            get(filters::get_billing_filter)
                .put(filters::set_billing_filter)
                .delete(filters::reset_billing_filter),
        );

    let calendar_routes = Router::new()
        .route("/events", get(calendar::list_events).post(calendar::create_event))
        .route(
            "/events/{id}",
            get(calendar::get_event)
                .patch(calendar::update_event)
                .delete(calendar::delete_event),
        )
        .route(
            "/filters",
            get(filters::get_event_filter)
                .put(filters::set_event_filter)
                .delete(filters::reset_event_filter),
        );

    let company_routes = Router::new()
        .route("/", get(tenancy::list_companies).post(tenancy::create_company))
        .route(
            "/filters",
            get(filters::get_company_filter)
                .put(filters::set_company_filter)
                .delete(filters::reset_company_filter),
        )
        .route(
            "/{id}",
            get(tenancy::get_company)
                .patch(tenancy::update_company)
                .delete(tenancy::delete_company),
        )
        .route("/{id}/employees", get(tenancy::list_employees));

    let employee_routes = Router::new()
        .route("/", post(tenancy::create_employee))
        .route(
            "/{id}",
            patch(tenancy::update_employee).delete(tenancy::delete_employee),
        );

    // Tudo que exige sessão
    let protected = Router::new()
        .merge(session_routes)
        .nest("/api/clients", client_routes)
        .nest("/api/cases", case_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/billing", billing_routes)
        .nest("/api/calendar", calendar_routes)
        .nest("/api/companies", company_routes)
        .nest("/api/employees", employee_routes)
        .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(health))
        .nest("/api/auth", auth_routes)
        .merge(protected)
        .fallback(not_found)
        .with_state(app_state)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
