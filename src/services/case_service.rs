// src/services/case_service.rs

use uuid::Uuid;

use crate::{
    common::{error::AppError, filter::RecordFilter},
    db::Session,
    models::{
        cases::{CaseDetail, CasePatch, CaseRow, LegalCase},
        rbac::{has_permission, Permission},
    },
    services::{billing_service::BillingService, lookup::client_name, mutation::MutationService},
};

#[derive(Clone)]
pub struct CaseService {
    mutations: MutationService,
    billing: BillingService,
}

impl CaseService {
    pub fn new(mutations: MutationService, billing: BillingService) -> Self {
        Self { mutations, billing }
    }

    pub async fn list_cases(&self, session: &Session) -> Vec<CaseRow> {
        let scope = session.scope().await;
        let filter = session.filters.read().await.cases.clone();
        let cases = session.workspace.cases.list(&scope).await;
        let clients = session.workspace.clients.list(&scope).await;

        filter
            .apply(&cases)
            .into_iter()
            .map(|case| CaseRow {
                client_name: client_name(&clients, case.client_id),
                case,
            })
            .collect()
    }

    /// O processo com cliente, documentos, agenda e horas lançadas.
    pub async fn detail(&self, session: &Session, id: Uuid) -> Result<CaseDetail, AppError> {
        let scope = session.scope().await;
        let case = session
            .workspace
            .cases
            .get(&scope, id)
            .await
            .ok_or(AppError::NotFound("Case"))?;

        let clients = session.workspace.clients.list(&scope).await;
        let documents = session
            .workspace
            .documents
            .list(&scope)
            .await
            .into_iter()
            .filter(|d| d.case_id == Some(id))
            .collect();
        let events = session
            .workspace
            .events
            .list(&scope)
            .await
            .into_iter()
            .filter(|e| e.case_id == Some(id))
            .collect();
        let entries = session
            .workspace
            .time_entries
            .list(&scope)
            .await
            .into_iter()
            .filter(|e| e.case_id == Some(id))
            .collect();

        Ok(CaseDetail {
            client_name: client_name(&clients, case.client_id),
            documents,
            events,
            time_entries: self.billing.time_entry_rows(session, entries).await,
            case,
        })
    }

    /// `manage:cases` altera qualquer processo; `manage:assigned-cases`
    /// só os processos em que o usuário está designado.
    pub async fn update_case(&self, session: &Session, id: Uuid, patch: CasePatch) -> Result<LegalCase, AppError> {
        let role = session.user.role;
        if !has_permission(role, Permission::ManageCases) {
            let scope = session.scope().await;
            let assigned = match session.workspace.cases.get(&scope, id).await {
                Some(case) => case.is_assigned_to(session.user.id),
                // Deixa o store responder NotFound
                None => true,
            };
            if !(has_permission(role, Permission::ManageAssignedCases) && assigned) {
                return Err(AppError::Forbidden(Permission::ManageCases));
            }
            // Quem só edita os próprios processos não muda a equipe
            if patch.assigned_to.is_some() {
                return Err(AppError::Forbidden(Permission::ManageCases));
            }
        }

        self.mutations.update(session, &session.workspace.cases, id, patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::seed,
        models::{
            auth::{Role, User},
            cases::CaseStatus,
        },
    };
    use rust_decimal::Decimal;
    use std::time::Duration;

    fn session(id: Uuid, role: Role) -> Session {
        let user = User {
            id,
            name: "Test".into(),
            email: "test@lawfirm.com".into(),
            role,
            company_id: Some(seed::COMPANY_SMITH),
            avatar_url: None,
            password_hash: String::new(),
        };
        Session::new(user, Some(seed::COMPANY_SMITH), 10)
    }

    fn service() -> CaseService {
        let mutations = MutationService::new(Duration::ZERO);
        let billing = BillingService::new(Decimal::new(8, 2), mutations.clone());
        CaseService::new(mutations, billing)
    }

    #[tokio::test]
    async fn detail_gathers_related_records() {
        let s = session(seed::EMPLOYEE_JOHN, Role::CompanyAdmin);
        let detail = service().detail(&s, seed::CASE_SMITH_V_JOHNSON).await.unwrap();

        assert_eq!(detail.client_name, "John Smith");
        assert_eq!(detail.documents.len(), 1);
        assert_eq!(detail.documents[0].id, seed::DOC_CASE_BRIEF);
        assert_eq!(detail.events.len(), 1);
        assert_eq!(detail.time_entries.len(), 2);
    }

    #[tokio::test]
    async fn employee_updates_only_assigned_cases() {
        let s = session(seed::EMPLOYEE_JANE, Role::Employee);
        let cases = service();

        let patch = CasePatch { status: Some(CaseStatus::Appeal), ..Default::default() };
        let updated = cases.update_case(&s, seed::CASE_SMITH_V_JOHNSON, patch).await.unwrap();
        assert_eq!(updated.status, CaseStatus::Appeal);

        // Jane não está no TechCorp
        let patch = CasePatch { status: Some(CaseStatus::Open), ..Default::default() };
        let result = cases.update_case(&s, seed::CASE_TECHCORP, patch).await;
        assert!(matches!(result, Err(AppError::Forbidden(Permission::ManageCases))));
    }

    #[tokio::test]
    async fn list_rows_carry_client_names() {
        let s = session(seed::EMPLOYEE_JOHN, Role::CompanyAdmin);
        let rows = service().list_cases(&s).await;
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().any(|r| r.client_name == "Acme Corporation"));
    }
}
