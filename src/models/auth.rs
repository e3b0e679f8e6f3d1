// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{rbac::Permission, tenancy::Company};

// Papéis fixos do escritório.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    CompanyAdmin,
    Employee,
}

// Um usuário autenticável
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,

    // Administradores do sistema não pertencem a nenhum escritório
    pub company_id: Option<Uuid>,
    pub avatar_url: Option<String>,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,
}

// Dados para login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginUserPayload {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// Resposta de autenticação com o token
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    pub active_company_id: Option<Uuid>,
}

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,  // Subject (ID do usuário)
    pub sid: Uuid,  // Sessão no servidor
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

// Resposta de GET /api/session
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub user: User,
    pub active_company: Option<Company>,
    pub permissions: Vec<Permission>,
    pub started_at: DateTime<Utc>,
}

// Corpo de PUT /api/session/company
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCompanyPayload {
    pub company_id: Uuid,
}
