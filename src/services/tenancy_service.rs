// src/services/tenancy_service.rs

use uuid::Uuid;

use crate::{
    common::{error::AppError, filter::RecordFilter},
    db::{store::Scope, Session},
    models::{
        auth::Role,
        tenancy::{Company, CompanyPatch, Employee, EmployeePatch, NewCompany, NewEmployee},
    },
    services::mutation::MutationService,
};

#[derive(Clone)]
pub struct TenantService {
    mutations: MutationService,
}

impl TenantService {
    pub fn new(mutations: MutationService) -> Self {
        Self { mutations }
    }

    // ==========================================
    // ESCRITÓRIOS
    // ==========================================

    pub async fn list_companies(&self, session: &Session) -> Vec<Company> {
        let scope = session.scope().await;
        let filter = session.filters.read().await.companies.clone();
        let companies = session.workspace.companies.list(&scope).await;
        filter.apply(&companies)
    }

    /// Um escritório; quem não é admin só enxerga o próprio.
    pub async fn get_company(&self, session: &Session, id: Uuid) -> Result<Company, AppError> {
        ensure_company_access(session, id)?;
        session
            .workspace
            .companies
            .get(&session.scope().await, id)
            .await
            .ok_or(AppError::NotFound("Company"))
    }

    pub async fn create_company(&self, session: &Session, payload: NewCompany) -> Result<Company, AppError> {
        self.mutations.create(session, &session.workspace.companies, payload).await
    }

    pub async fn update_company(&self, session: &Session, id: Uuid, patch: CompanyPatch) -> Result<Company, AppError> {
        self.mutations.update(session, &session.workspace.companies, id, patch).await
    }

    /// Exclui o escritório. Se era o ativo, a sessão passa para outro
    /// escritório restante (ou fica sem nenhum).
    pub async fn delete_company(&self, session: &Session, id: Uuid) -> bool {
        let removed = self.mutations.delete(session, &session.workspace.companies, id).await;

        if session.active_company().await == Some(id) {
            let remaining = session.workspace.companies.list(&session.scope().await).await;
            let fallback = remaining.first().map(|c| c.id);
            session.set_active_company(fallback).await;
            tracing::info!(
                session_id = %session.id,
                company_id = ?fallback,
                "active company deleted, session moved"
            );
        }

        removed
    }

    /// Troca o escritório ativo. Só o admin troca para um escritório que
    /// não é o seu.
    pub async fn switch_company(&self, session: &Session, company_id: Uuid) -> Result<Company, AppError> {
        ensure_company_access(session, company_id)?;

        let company = session
            .workspace
            .companies
            .get(&session.scope().await, company_id)
            .await
            .ok_or(AppError::NotFound("Company"))?;

        session.set_active_company(Some(company.id)).await;
        tracing::info!(session_id = %session.id, company_id = %company.id, "active company switched");
        Ok(company)
    }

    // ==========================================
    // FUNCIONÁRIOS
    // ==========================================

    pub async fn employees_for(&self, session: &Session, company_id: Uuid) -> Result<Vec<Employee>, AppError> {
        ensure_company_access(session, company_id)?;
        Ok(session.workspace.employees.list_in(company_id).await)
    }

    /// Cadastra no escritório indicado (só admin) ou no escritório ativo.
    pub async fn create_employee(&self, session: &Session, payload: NewEmployee) -> Result<Employee, AppError> {
        let scope = match payload.company_id {
            Some(target) => {
                ensure_company_access(session, target)?;
                Scope::new(session.user.id, Some(target))
            }
            None => session.scope().await,
        };

        self.mutations
            .create_in(session, &scope, &session.workspace.employees, payload)
            .await
    }

    pub async fn update_employee(&self, session: &Session, id: Uuid, patch: EmployeePatch) -> Result<Employee, AppError> {
        self.mutations.update(session, &session.workspace.employees, id, patch).await
    }

    pub async fn delete_employee(&self, session: &Session, id: Uuid) -> bool {
        self.mutations.delete(session, &session.workspace.employees, id).await
    }
}

fn ensure_company_access(session: &Session, company_id: Uuid) -> Result<(), AppError> {
    if session.user.role == Role::Admin || session.user.company_id == Some(company_id) {
        Ok(())
    } else {
        Err(AppError::CompanyAccessDenied)
    }
}
