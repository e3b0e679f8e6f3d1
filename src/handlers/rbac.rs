// src/handlers/rbac.rs

use axum::{extract::Path, Json};

use crate::{
    common::error::AppError,
    middleware::auth::CurrentSession,
    models::rbac::{has_permission, Permission, PermissionCheck},
};

// GET /api/permissions
pub async fn list_permissions(CurrentSession(session): CurrentSession) -> Json<Vec<Permission>> {
    Json(session.user.role.permissions())
}

// GET /api/permissions/{slug}
pub async fn check_permission(
    CurrentSession(session): CurrentSession,
    Path(slug): Path<String>,
) -> Result<Json<PermissionCheck>, AppError> {
    let permission: Permission = slug.parse()?;
    let role = session.user.role;

    Ok(Json(PermissionCheck {
        permission,
        role,
        granted: has_permission(role, permission),
    }))
}
