// src/handlers/notifications.rs

use axum::Json;

use crate::{middleware::auth::CurrentSession, models::notifications::Notice};

// GET /api/notifications
// Ler esvazia o feed.
pub async fn drain_notifications(CurrentSession(session): CurrentSession) -> Json<Vec<Notice>> {
    Json(session.notices.drain().await)
}
