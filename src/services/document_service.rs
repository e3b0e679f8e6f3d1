// src/services/document_service.rs

use uuid::Uuid;

use crate::{
    common::{error::AppError, filter::RecordFilter},
    db::Session,
    models::{
        documents::{Document, DocumentPatch, NewDocument},
        rbac::{has_permission, Permission},
    },
    services::mutation::MutationService,
};

#[derive(Clone)]
pub struct DocumentService {
    mutations: MutationService,
}

impl DocumentService {
    pub fn new(mutations: MutationService) -> Self {
        Self { mutations }
    }

    pub async fn list_documents(&self, session: &Session) -> Vec<Document> {
        let scope = session.scope().await;
        let filter = session.filters.read().await.documents.clone();
        let documents = session.workspace.documents.list(&scope).await;
        filter.apply(&documents)
    }

    pub async fn create_document(&self, session: &Session, payload: NewDocument) -> Result<Document, AppError> {
        let role = session.user.role;
        if !has_permission(role, Permission::ManageDocuments) && !has_permission(role, Permission::ManageOwnDocuments) {
            return Err(AppError::Forbidden(Permission::ManageDocuments));
        }
        self.mutations.create(session, &session.workspace.documents, payload).await
    }

    pub async fn update_document(&self, session: &Session, id: Uuid, patch: DocumentPatch) -> Result<Document, AppError> {
        self.ensure_can_edit(session, id).await?;
        self.mutations.update(session, &session.workspace.documents, id, patch).await
    }

    pub async fn delete_document(&self, session: &Session, id: Uuid) -> Result<bool, AppError> {
        self.ensure_can_edit(session, id).await?;
        Ok(self.mutations.delete(session, &session.workspace.documents, id).await)
    }

    /// `manage:documents` mexe em tudo; `manage:own-documents` só no que o
    /// próprio usuário criou.
    async fn ensure_can_edit(&self, session: &Session, id: Uuid) -> Result<(), AppError> {
        let role = session.user.role;
        if has_permission(role, Permission::ManageDocuments) {
            return Ok(());
        }

        let owned = match session.workspace.documents.get(&session.scope().await, id).await {
            Some(document) => document.created_by == session.user.id,
            None => true,
        };
        if has_permission(role, Permission::ManageOwnDocuments) && owned {
            Ok(())
        } else {
            Err(AppError::Forbidden(Permission::ManageDocuments))
        }
    }
}
