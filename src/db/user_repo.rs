// src/db/user_repo.rs

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{common::error::AppError, db::seed, models::auth::User};

// O repositório de usuários. Vive o processo inteiro, fora das sessões.
#[derive(Clone)]
pub struct UserRepository {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Carrega os usuários de demonstração, gerando os hashes com `cost`.
    pub async fn seeded(cost: u32) -> anyhow::Result<Self> {
        let mut users = Vec::new();
        for seed in seed::users() {
            let password = seed.password;
            // bcrypt é pesado; fora do executor assíncrono
            let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;

            users.push(User {
                id: seed.id,
                name: seed.name.to_string(),
                email: seed.email.to_string(),
                role: seed.role,
                company_id: seed.company_id,
                avatar_url: None,
                password_hash,
            });
        }
        Ok(Self::new(users))
    }

    // Busca um usuário pelo e-mail (sem diferenciar maiúsculas)
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    // Busca um usuário pelo ID
    pub async fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.read().await.iter().find(|u| u.id == id).cloned()
    }

    pub async fn update_password_hash(&self, id: Uuid, password_hash: String) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(AppError::NotFound("User"))?;
        user.password_hash = password_hash;
        Ok(())
    }
}
