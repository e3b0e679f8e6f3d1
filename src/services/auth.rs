// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{Session, SessionRepository, UserRepository},
    models::{
        auth::{AuthResponse, Claims, Role},
        settings::ChangePasswordRequest,
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    sessions: SessionRepository,
    jwt_secret: String,
    token_ttl: Duration,
    bcrypt_cost: u32,
    notice_capacity: usize,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        sessions: SessionRepository,
        jwt_secret: String,
        token_ttl: Duration,
        bcrypt_cost: u32,
        notice_capacity: usize,
    ) -> Self {
        Self { user_repo, sessions, jwt_secret, token_ttl, bcrypt_cost, notice_capacity }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await
            .ok_or(AppError::InvalidCredentials)?;

        if !self.password_matches(password, &user.password_hash).await? {
            tracing::warn!(email, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        let now = Utc::now();
        let expires_at = now + self.token_ttl;
        let session = Session::new(user.clone(), user.company_id, self.notice_capacity).expiring_at(expires_at);

        // Administrador sem escritório começa no primeiro da lista
        if user.company_id.is_none() && user.role == Role::Admin {
            let scope = session.scope().await;
            let first = session.workspace.companies.list(&scope).await.first().map(|c| c.id);
            session.set_active_company(first).await;
        }

        let session = self.sessions.insert(session).await;
        let active_company_id = session.active_company().await;
        let token = self.create_token(user.id, session.id, now)?;

        let live_sessions = self.sessions.live_count().await;
        tracing::info!(
            user_id = %user.id,
            session_id = %session.id,
            live_sessions = live_sessions,
            "user logged in"
        );

        Ok(AuthResponse { token, user, active_company_id })
    }

    /// Valida o JWT e devolve a sessão viva que ele nomeia.
    pub async fn validate_token(&self, token: &str) -> Result<Arc<Session>, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let session = self
            .sessions
            .find(token_data.claims.sid)
            .await
            .ok_or(AppError::SessionNotFound)?;

        if session.user.id != token_data.claims.sub {
            return Err(AppError::InvalidToken);
        }
        Ok(session)
    }

    /// Derruba a sessão; o workspace vai junto.
    pub async fn logout(&self, session_id: Uuid) -> bool {
        let removed = self.sessions.remove(session_id).await;
        if removed {
            tracing::info!(session_id = %session_id, "session closed");
        }
        removed
    }

    pub async fn change_password(&self, session: &Session, req: &ChangePasswordRequest) -> Result<(), AppError> {
        if req.new_password != req.confirm_password {
            return Err(AppError::PasswordMismatch);
        }

        // O hash da sessão pode estar velho; vale o do repositório
        let user = self
            .user_repo
            .find_by_id(session.user.id)
            .await
            .ok_or(AppError::NotFound("User"))?;

        if !self.password_matches(&req.current_password, &user.password_hash).await? {
            return Err(AppError::WrongPassword);
        }

        let new_password = req.new_password.clone();
        let cost = self.bcrypt_cost;
        let new_hash = tokio::task::spawn_blocking(move || hash(new_password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("password hashing task failed: {}", e))??;

        self.user_repo.update_password_hash(user.id, new_hash).await?;
        tracing::info!(user_id = %user.id, "password changed");
        Ok(())
    }

    async fn password_matches(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();

        // Executa a verificação em um thread separado
        let valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("password verification task failed: {}", e))??;
        Ok(valid)
    }

    fn create_token(&self, user_id: Uuid, session_id: Uuid, now: DateTime<Utc>) -> Result<String, AppError> {
        let expires_at = now + self.token_ttl;

        let claims = Claims {
            sub: user_id,
            sid: session_id,
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}
