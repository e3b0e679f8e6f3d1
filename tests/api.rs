// tests/api.rs

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use lexdesk::{
    build_router,
    config::{AppState, Config},
    db::seed,
};

async fn app_with_latency(latency: Duration) -> Router {
    let mut config = Config::new("test-secret");
    config.simulated_latency = latency;
    config.bcrypt_cost = 4;
    let state = AppState::new(config).await.expect("state");
    build_router(state)
}

async fn app() -> Router {
    app_with_latency(Duration::ZERO).await
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().unwrap().to_string()
}

fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

// ---
// Autenticação e sessão
// ---

#[tokio::test]
async fn login_opens_a_session_in_the_users_company() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "john@lawfirm.com", "password": "password" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "company-admin");
    assert_eq!(body["activeCompanyId"], json!(seed::COMPANY_SMITH));
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": "john@lawfirm.com", "password": "nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn admin_without_company_starts_in_the_first_one() {
    let app = app().await;
    let token = login(&app, "admin@legal-nexus.com", "admin123").await;

    let (status, session) = send(&app, Method::GET, "/api/session", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["activeCompany"]["name"], "Smith & Associates Law Firm");
    assert_eq!(session["permissions"].as_array().unwrap().len(), 14);
}

#[tokio::test]
async fn requests_without_a_token_are_unauthorized() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/api/clients", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_the_token() {
    let app = app().await;
    let token = login(&app, "jane@lawfirm.com", "password").await;

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, "/api/users/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_paths_return_json_404() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/nowhere", None, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Not found" }));
}

// ---
// Escritórios
// ---

#[tokio::test]
async fn switching_company_changes_what_is_visible() {
    let app = app().await;
    let token = login(&app, "admin@legal-nexus.com", "admin123").await;

    let (_, before) = send(&app, Method::GET, "/api/clients", Some(&token), None).await;
    assert_eq!(before.as_array().unwrap().len(), 5);

    let (status, company) = send(
        &app,
        Method::PUT,
        "/api/session/company",
        Some(&token),
        Some(json!({ "companyId": seed::COMPANY_JOHNSON })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(company["name"], "Johnson Legal Group");

    let (_, after) = send(&app, Method::GET, "/api/clients", Some(&token), None).await;
    assert_eq!(after, json!([]));
}

#[tokio::test]
async fn company_admin_cannot_switch_company() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/session/company",
        Some(&token),
        Some(json!({ "companyId": seed::COMPANY_JOHNSON })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ---
// Clientes e filtros
// ---

#[tokio::test]
async fn creating_a_client_yields_exactly_one_match_by_name() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/clients",
        Some(&token),
        Some(json!({
            "name": "Acme",
            "email": "hello@acme.test",
            "type": "business",
            "status": "active"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["createdAt"], created["updatedAt"]);
    assert_eq!(created["companyId"], json!(seed::COMPANY_SMITH));

    let (_, list) = send(&app, Method::GET, "/api/clients", Some(&token), None).await;
    let matches: Vec<String> = names(&list).into_iter().filter(|n| n == "Acme").collect();
    assert_eq!(matches.len(), 1);
}

#[tokio::test]
async fn invalid_client_payload_returns_field_details() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/clients",
        Some(&token),
        Some(json!({ "name": "A", "email": "not-an-email", "type": "business", "status": "active" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn empty_status_filter_returns_every_status() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/clients/filters",
        Some(&token),
        Some(json!({ "status": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, all) = send(&app, Method::GET, "/api/clients", Some(&token), None).await;
    assert_eq!(all.as_array().unwrap().len(), 5);

    send(
        &app,
        Method::PUT,
        "/api/clients/filters",
        Some(&token),
        Some(json!({ "status": ["active"] })),
    )
    .await;
    let (_, active) = send(&app, Method::GET, "/api/clients", Some(&token), None).await;
    assert_eq!(names(&active), vec!["John Smith", "Acme Corporation", "Michael Rodriguez"]);

    let (_, reset) = send(&app, Method::DELETE, "/api/clients/filters", Some(&token), None).await;
    assert_eq!(reset["status"], json!([]));
}

#[tokio::test]
async fn date_range_filter_includes_the_whole_last_day() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    send(
        &app,
        Method::PUT,
        "/api/clients/filters",
        Some(&token),
        Some(json!({ "dateRange": { "from": "2023-03-01", "to": "2023-04-05" } })),
    )
    .await;

    let (_, list) = send(&app, Method::GET, "/api/clients", Some(&token), None).await;
    assert_eq!(names(&list), vec!["Acme Corporation", "Sarah Johnson"]);
}

// ---
// Permissões
// ---

#[tokio::test]
async fn employee_cannot_create_clients() {
    let app = app().await;
    let token = login(&app, "jane@lawfirm.com", "password").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/clients",
        Some(&token),
        Some(json!({ "name": "Globex", "email": "legal@globex.test", "type": "business", "status": "active" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "You need the 'manage:clients' permission to perform this action");
}

#[tokio::test]
async fn employee_can_edit_an_assigned_case_only() {
    let app = app().await;
    let token = login(&app, "jane@lawfirm.com", "password").await;

    let assigned = format!("/api/cases/{}", seed::CASE_SMITH_V_JOHNSON);
    let (status, _) = send(&app, Method::PATCH, &assigned, Some(&token), Some(json!({ "status": "appeal" }))).await;
    assert_eq!(status, StatusCode::OK);

    let other = format!("/api/cases/{}", seed::CASE_TECHCORP);
    let (status, _) = send(&app, Method::PATCH, &other, Some(&token), Some(json!({ "status": "open" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn permission_check_by_slug() {
    let app = app().await;
    let token = login(&app, "jane@lawfirm.com", "password").await;

    let (status, body) = send(&app, Method::GET, "/api/permissions/manage:own-documents", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["granted"], true);

    let (status, _) = send(&app, Method::GET, "/api/permissions/launch:rockets", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---
// Faturamento
// ---

#[tokio::test]
async fn invoice_totals_are_computed_on_creation() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let (status, invoice) = send(
        &app,
        Method::POST,
        "/api/billing/invoices",
        Some(&token),
        Some(json!({
            "invoiceNumber": "INV-2024-010",
            "clientId": seed::CLIENT_ACME,
            "issueDate": "2024-05-01",
            "dueDate": "2024-05-31",
            "status": "draft",
            "items": [
                { "description": "Consultation", "quantity": 2, "rate": 100 },
                { "description": "Filing", "quantity": 1, "rate": 50 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{invoice}");
    assert_eq!(invoice["amount"].as_f64(), Some(250.0));
    assert_eq!(invoice["tax"].as_f64(), Some(20.0));
    assert_eq!(invoice["total"].as_f64(), Some(270.0));
}

#[tokio::test]
async fn oversized_rate_is_rejected_and_the_list_still_loads() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/billing/time-entries",
        Some(&token),
        Some(json!({
            "description": "Research",
            "date": "2024-04-20",
            "hours": 1000,
            "rate": 1e25
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["details"]["rate"][0], "Must be at most 1,000,000,000");

    let (status, entries) = send(&app, Method::GET, "/api/billing/time-entries", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(entries.as_array().unwrap().iter().all(|e| e["duration"] != 60000));
}

#[tokio::test]
async fn deleting_a_billing_rate_shrinks_the_list_by_one() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let (_, before) = send(&app, Method::GET, "/api/billing/rates", Some(&token), None).await;
    let uri = format!("/api/billing/rates/{}", seed::RATE_DOCUMENT_PREP);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, after) = send(&app, Method::GET, "/api/billing/rates", Some(&token), None).await;
    assert_eq!(after.as_array().unwrap().len(), before.as_array().unwrap().len() - 1);
}

#[tokio::test]
async fn print_renders_plain_text() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let uri = format!("/api/billing/invoices/{}/print", seed::INVOICE_001);
    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("INV-2023-001"));
}

// ---
// Agenda
// ---

#[tokio::test]
async fn end_time_alone_cannot_move_before_the_stored_start() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let (status, event) = send(
        &app,
        Method::POST,
        "/api/calendar/events",
        Some(&token),
        Some(json!({
            "title": "Court Hearing",
            "date": "2024-04-12",
            "time": "10:00",
            "endTime": "11:00",
            "type": "court"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{event}");

    let uri = format!("/api/calendar/events/{}", event["id"].as_str().unwrap());
    let (status, _) = send(&app, Method::PATCH, &uri, Some(&token), Some(json!({ "endTime": "08:00" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, stored) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(stored["endTime"], "11:00");

    let (status, _) = send(&app, Method::PATCH, &uri, Some(&token), Some(json!({ "endTime": "12:30" }))).await;
    assert_eq!(status, StatusCode::OK);
}

// ---
// Notificações e latência
// ---

#[tokio::test]
async fn notifications_are_drained_on_read() {
    let app = app().await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let uri = format!("/api/clients/{}", uuid::Uuid::new_v4());
    let (status, _) = send(&app, Method::PATCH, &uri, Some(&token), Some(json!({ "notes": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, notices) = send(&app, Method::GET, "/api/notifications", Some(&token), None).await;
    assert_eq!(notices[0]["message"], "Failed to update client");
    assert_eq!(notices[0]["level"], "error");

    let (_, empty) = send(&app, Method::GET, "/api/notifications", Some(&token), None).await;
    assert_eq!(empty, json!([]));
}

#[tokio::test(start_paused = true)]
async fn mutations_wait_for_the_simulated_latency() {
    let app = app_with_latency(Duration::from_millis(500)).await;
    let token = login(&app, "john@lawfirm.com", "password").await;

    let started = tokio::time::Instant::now();
    let uri = format!("/api/clients/{}", seed::CLIENT_TECH);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(started.elapsed() >= Duration::from_millis(500));
}
