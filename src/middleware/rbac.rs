// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    middleware::auth::CurrentSession,
    models::rbac::{has_permission, Permission},
};

/// 1. O Trait que define o que é uma Permissão
pub trait PermissionDef: Send + Sync + 'static {
    const PERMISSION: Permission;

    fn slug() -> &'static str {
        Self::PERMISSION.slug()
    }
}

/// 2. O Extractor (Guardião)
pub struct RequirePermission<T>(pub PhantomData<T>);

// 3. Implementação do FromRequestParts

impl<T, S> FromRequestParts<S> for RequirePermission<T>
where
    T: PermissionDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // A. Extrai a sessão (o auth_guard já rodou)
        let CurrentSession(session) = parts
            .extensions
            .get::<CurrentSession>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        // B. Confere na tabela do papel
        if !has_permission(session.user.role, T::PERMISSION) {
            tracing::warn!(
                user_id = %session.user.id,
                permission = T::slug(),
                "permission denied"
            );
            return Err(AppError::Forbidden(T::PERMISSION));
        }

        Ok(RequirePermission(PhantomData))
    }
}

// ---
// DEFINIÇÃO DAS PERMISSÕES (TIPOS)
// ---

macro_rules! permission_types {
    ($($name:ident => $permission:ident),+ $(,)?) => {
        $(
            pub struct $name;
            impl PermissionDef for $name {
                const PERMISSION: Permission = Permission::$permission;
            }
        )+
    };
}

permission_types! {
    PermCompaniesManage => ManageCompanies,
    PermCompaniesView => ViewCompanies,
    PermUsersManage => ManageUsers,
    PermUsersView => ViewUsers,
    PermCasesManage => ManageCases,
    PermCasesView => ViewCases,
    PermDocumentsView => ViewDocuments,
    PermInvoicesManage => ManageInvoices,
    PermInvoicesView => ViewInvoices,
    PermClientsManage => ManageClients,
    PermClientsView => ViewClients,
    PermEventsManage => ManageEvents,
    PermEventsView => ViewEvents,
}
