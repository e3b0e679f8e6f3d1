// src/db/session_repo.rs

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    db::{notification_repo::NotificationFeed, store::Scope, workspace::Workspace},
    models::{
        auth::User,
        billing::{BillingFilter, RateFilter},
        calendar::EventFilter,
        cases::CaseFilter,
        clients::ClientFilter,
        documents::DocumentFilter,
        settings::UserSettings,
        tenancy::CompanyFilter,
    },
};

/// Os filtros correntes de cada listagem da sessão.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterBook {
    pub clients: ClientFilter,
    pub cases: CaseFilter,
    pub documents: DocumentFilter,
    // Faturas e lançamentos de horas compartilham o mesmo filtro
    pub billing: BillingFilter,
    pub rates: RateFilter,
    pub events: EventFilter,
    pub companies: CompanyFilter,
}

/// Uma sessão autenticada: o usuário, o escritório ativo e os dados em memória.
pub struct Session {
    pub id: Uuid,
    pub user: User,
    pub workspace: Workspace,
    pub filters: RwLock<FilterBook>,
    pub settings: RwLock<UserSettings>,
    pub notices: NotificationFeed,
    pub started_at: DateTime<Utc>,
    // Acompanha o `exp` do token
    pub expires_at: DateTime<Utc>,
    active_company: RwLock<Option<Uuid>>,
}

impl Session {
    pub fn new(user: User, active_company: Option<Uuid>, notice_capacity: usize) -> Self {
        let settings = UserSettings::for_user(&user.name, &user.email);
        Self {
            id: Uuid::new_v4(),
            workspace: Workspace::seeded(user.id),
            filters: RwLock::new(FilterBook::default()),
            settings: RwLock::new(settings),
            notices: NotificationFeed::new(notice_capacity),
            started_at: Utc::now(),
            expires_at: DateTime::<Utc>::MAX_UTC,
            active_company: RwLock::new(active_company),
            user,
        }
    }

    pub fn expiring_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub async fn active_company(&self) -> Option<Uuid> {
        *self.active_company.read().await
    }

    pub async fn set_active_company(&self, company_id: Option<Uuid>) {
        *self.active_company.write().await = company_id;
    }

    /// O escopo usado em todas as leituras e escritas dos stores.
    pub async fn scope(&self) -> Scope {
        Scope::new(self.user.id, self.active_company().await)
    }
}

// As sessões vivas, indexadas pelo `sid` do token
#[derive(Clone, Default)]
pub struct SessionRepository {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Session>>>>,
}

impl SessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guarda a sessão nova e descarta as que já expiraram.
    pub async fn insert(&self, session: Session) -> Arc<Session> {
        let session = Arc::new(session);
        let now = Utc::now();

        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        let pruned = before - sessions.len();
        if pruned > 0 {
            tracing::debug!(pruned, "expired sessions dropped");
        }
        sessions.insert(session.id, session.clone());
        session
    }

    pub async fn find(&self, id: Uuid) -> Option<Arc<Session>> {
        let now = Utc::now();
        self.sessions
            .read()
            .await
            .get(&id)
            .filter(|s| !s.is_expired(now))
            .cloned()
    }

    pub async fn live_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::seed, models::auth::Role};

    fn jane() -> User {
        User {
            id: seed::EMPLOYEE_JANE,
            name: "Jane Smith".into(),
            email: "jane@lawfirm.com".into(),
            role: Role::Employee,
            company_id: Some(seed::COMPANY_SMITH),
            avatar_url: None,
            password_hash: String::new(),
        }
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let repo = SessionRepository::new();
        let a = repo.insert(Session::new(jane(), Some(seed::COMPANY_SMITH), 10)).await;
        let b = repo.insert(Session::new(jane(), Some(seed::COMPANY_SMITH), 10)).await;

        let scope = a.scope().await;
        assert!(a.workspace.clients.delete(&scope, seed::CLIENT_ACME).await);

        let scope_b = b.scope().await;
        assert!(b.workspace.clients.get(&scope_b, seed::CLIENT_ACME).await.is_some());
    }

    #[tokio::test]
    async fn removed_sessions_are_gone() {
        let repo = SessionRepository::new();
        let session = repo.insert(Session::new(jane(), None, 10)).await;

        assert!(repo.find(session.id).await.is_some());
        assert!(repo.remove(session.id).await);
        assert!(repo.find(session.id).await.is_none());
        assert!(!repo.remove(session.id).await);
    }

    #[tokio::test]
    async fn expired_sessions_are_dropped_on_the_next_insert() {
        let repo = SessionRepository::new();
        let stale = repo
            .insert(Session::new(jane(), None, 10).expiring_at(Utc::now() - chrono::Duration::seconds(1)))
            .await;
        assert!(repo.find(stale.id).await.is_none());
        assert_eq!(repo.live_count().await, 1);

        let fresh = repo.insert(Session::new(jane(), None, 10)).await;
        assert_eq!(repo.live_count().await, 1);
        assert!(repo.find(fresh.id).await.is_some());
    }

    #[tokio::test]
    async fn switching_company_changes_the_visible_slice() {
        let session = Session::new(jane(), Some(seed::COMPANY_SMITH), 10);
        let smith = session.scope().await;
        assert_eq!(session.workspace.clients.list(&smith).await.len(), 5);

        session.set_active_company(Some(seed::COMPANY_JOHNSON)).await;
        let johnson = session.scope().await;
        assert!(session.workspace.clients.list(&johnson).await.is_empty());
    }
}
