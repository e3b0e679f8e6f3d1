// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::rbac::Permission;

// Um único tipo de erro para toda a aplicação, com `thiserror`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or missing authentication token")]
    InvalidToken,

    #[error("Session expired or logged out")]
    SessionNotFound,

    // A condição "sem tenant": nenhuma escrita acontece.
    #[error("No active company selected")]
    NoActiveCompany,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("You need the '{0}' permission to perform this action")]
    Forbidden(Permission),

    #[error("You do not have access to this company")]
    CompanyAccessDenied,

    #[error("Unknown permission '{0}'")]
    UnknownPermission(String),

    #[error("Current password is incorrect")]
    WrongPassword,

    #[error("New passwords don't match")]
    PasswordMismatch,

    #[error("Internal server error")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            // Todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => m.to_string(),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::InvalidCredentials | AppError::InvalidToken | AppError::SessionNotFound => {
                StatusCode::UNAUTHORIZED
            }
            AppError::NoActiveCompany => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) | AppError::CompanyAccessDenied => StatusCode::FORBIDDEN,
            AppError::UnknownPermission(_) | AppError::WrongPassword | AppError::PasswordMismatch => {
                StatusCode::BAD_REQUEST
            }

            // Bcrypt, JWT e anyhow viram 500; o detalhe fica só no log.
            e => {
                tracing::error!("Internal server error: {}", e);
                let body = Json(json!({ "error": "An unexpected error occurred." }));
                return (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(AppError::NoActiveCompany.into_response().status(), StatusCode::CONFLICT);
        assert_eq!(AppError::NotFound("Client").into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Forbidden(Permission::ManageCases).into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::InternalServerError(anyhow::anyhow!("boom")).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn forbidden_message_names_the_permission_slug() {
        let message = AppError::Forbidden(Permission::ManageInvoices).to_string();
        assert_eq!(message, "You need the 'manage:invoices' permission to perform this action");
    }
}
