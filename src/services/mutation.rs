// src/services/mutation.rs

use std::time::Duration;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        store::{Entity, EntityStore, Scope},
        Session,
    },
    models::notifications::Notice,
};

/// Criar, alterar e excluir, com a latência simulada e o aviso na sessão.
///
/// Toda operação espera `latency` antes de tocar no store. Se for rejeitada,
/// o store fica intacto e o aviso de erro é publicado.
#[derive(Clone)]
pub struct MutationService {
    latency: Duration,
}

impl MutationService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub async fn create<T: Entity>(
        &self,
        session: &Session,
        store: &EntityStore<T>,
        draft: T::Draft,
    ) -> Result<T, AppError> {
        let scope = session.scope().await;
        self.create_in(session, &scope, store, draft).await
    }

    /// Como `create`, mas num escopo explícito (ex.: funcionário de outro escritório).
    pub async fn create_in<T: Entity>(
        &self,
        session: &Session,
        scope: &Scope,
        store: &EntityStore<T>,
        draft: T::Draft,
    ) -> Result<T, AppError> {
        self.simulate_latency().await;
        let result = store.add(scope, draft).await;
        self.report::<T>(session, "create", "created", result.as_ref().map(|r| r.id()))
            .await;
        result
    }

    pub async fn update<T: Entity>(
        &self,
        session: &Session,
        store: &EntityStore<T>,
        id: Uuid,
        patch: T::Patch,
    ) -> Result<T, AppError> {
        self.simulate_latency().await;
        let scope = session.scope().await;
        let result = store.update(&scope, id, patch).await;
        self.report::<T>(session, "update", "updated", result.as_ref().map(|r| r.id()))
            .await;
        result
    }

    /// Excluir é idempotente: um id ausente também é sucesso.
    pub async fn delete<T: Entity>(&self, session: &Session, store: &EntityStore<T>, id: Uuid) -> bool {
        self.simulate_latency().await;
        let scope = session.scope().await;
        let removed = store.delete(&scope, id).await;
        self.report::<T>(session, "delete", "deleted", Ok::<_, &AppError>(id)).await;
        removed
    }

    pub async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    async fn report<T: Entity>(
        &self,
        session: &Session,
        verb: &str,
        past: &str,
        outcome: Result<Uuid, &AppError>,
    ) {
        let notice = match outcome {
            Ok(id) => {
                tracing::info!(session_id = %session.id, record_id = %id, "{} {}", T::LABEL, past);
                Notice::success(format!("{} {} successfully", T::TITLE, past))
            }
            Err(err) => {
                tracing::warn!(session_id = %session.id, error = %err, "failed to {} {}", verb, T::LABEL);
                Notice::error(format!("Failed to {} {}", verb, T::LABEL))
            }
        };
        session.notices.push(notice).await;
    }
}
