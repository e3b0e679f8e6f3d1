// src/models/rbac.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{common::error::AppError, models::auth::Role};

/// Conjunto fechado de permissões. O slug ("manage:cases") é o formato
/// que trafega na API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "manage:companies")]
    ManageCompanies,
    #[serde(rename = "view:companies")]
    ViewCompanies,
    #[serde(rename = "manage:users")]
    ManageUsers,
    #[serde(rename = "view:users")]
    ViewUsers,
    #[serde(rename = "manage:cases")]
    ManageCases,
    #[serde(rename = "view:cases")]
    ViewCases,
    #[serde(rename = "manage:documents")]
    ManageDocuments,
    #[serde(rename = "view:documents")]
    ViewDocuments,
    #[serde(rename = "manage:invoices")]
    ManageInvoices,
    #[serde(rename = "view:invoices")]
    ViewInvoices,
    #[serde(rename = "manage:clients")]
    ManageClients,
    #[serde(rename = "view:clients")]
    ViewClients,
    #[serde(rename = "manage:events")]
    ManageEvents,
    #[serde(rename = "view:events")]
    ViewEvents,
    #[serde(rename = "manage:assigned-cases")]
    ManageAssignedCases,
    #[serde(rename = "manage:own-documents")]
    ManageOwnDocuments,
}

impl Permission {
    pub const ALL: [Permission; 16] = [
        Permission::ManageCompanies,
        Permission::ViewCompanies,
        Permission::ManageUsers,
        Permission::ViewUsers,
        Permission::ManageCases,
        Permission::ViewCases,
        Permission::ManageDocuments,
        Permission::ViewDocuments,
        Permission::ManageInvoices,
        Permission::ViewInvoices,
        Permission::ManageClients,
        Permission::ViewClients,
        Permission::ManageEvents,
        Permission::ViewEvents,
        Permission::ManageAssignedCases,
        Permission::ManageOwnDocuments,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Permission::ManageCompanies => "manage:companies",
            Permission::ViewCompanies => "view:companies",
            Permission::ManageUsers => "manage:users",
            Permission::ViewUsers => "view:users",
            Permission::ManageCases => "manage:cases",
            Permission::ViewCases => "view:cases",
            Permission::ManageDocuments => "manage:documents",
            Permission::ViewDocuments => "view:documents",
            Permission::ManageInvoices => "manage:invoices",
            Permission::ViewInvoices => "view:invoices",
            Permission::ManageClients => "manage:clients",
            Permission::ViewClients => "view:clients",
            Permission::ManageEvents => "manage:events",
            Permission::ViewEvents => "view:events",
            Permission::ManageAssignedCases => "manage:assigned-cases",
            Permission::ManageOwnDocuments => "manage:own-documents",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Permission::ALL
            .into_iter()
            .find(|p| p.slug() == s)
            .ok_or_else(|| AppError::UnknownPermission(s.to_string()))
    }
}

/// A tabela papel → permissões. Os `match` não usam curinga: uma permissão
/// nova só compila depois de decidida para cada papel.
pub fn has_permission(role: Role, permission: Permission) -> bool {
    use Permission::*;

    match role {
        Role::Admin => match permission {
            ManageCompanies | ViewCompanies | ManageUsers | ViewUsers | ManageCases | ViewCases
            | ManageDocuments | ViewDocuments | ManageInvoices | ViewInvoices | ManageClients
            | ViewClients | ManageEvents | ViewEvents => true,
            ManageAssignedCases | ManageOwnDocuments => false,
        },
        Role::CompanyAdmin => match permission {
            ManageUsers | ViewUsers | ManageCases | ViewCases | ManageDocuments | ViewDocuments
            | ManageInvoices | ViewInvoices | ManageClients | ViewClients | ManageEvents
            | ViewEvents => true,
            ManageCompanies | ViewCompanies | ManageAssignedCases | ManageOwnDocuments => false,
        },
        Role::Employee => match permission {
            ViewCases | ViewDocuments | ViewClients | ViewEvents | ManageAssignedCases
            | ManageOwnDocuments => true,
            ManageCompanies | ViewCompanies | ManageUsers | ViewUsers | ManageCases
            | ManageDocuments | ManageInvoices | ViewInvoices | ManageClients | ManageEvents => false,
        },
    }
}

impl Role {
    pub fn permissions(self) -> Vec<Permission> {
        Permission::ALL
            .into_iter()
            .filter(|p| has_permission(self, *p))
            .collect()
    }
}

// Resposta de GET /api/permissions/{slug}
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionCheck {
    pub permission: Permission,
    pub role: Role,
    pub granted: bool,
}
