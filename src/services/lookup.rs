// src/services/lookup.rs

// Relações são só por id; um id velho vira um rótulo genérico.

use uuid::Uuid;

use crate::models::{cases::LegalCase, clients::Client};

pub const UNKNOWN_CLIENT: &str = "Unknown Client";
pub const UNKNOWN_CASE: &str = "Unknown Case";

pub fn client_name(clients: &[Client], id: Uuid) -> String {
    clients
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

pub fn case_title(cases: &[LegalCase], id: Uuid) -> String {
    cases
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.title.clone())
        .unwrap_or_else(|| UNKNOWN_CASE.to_string())
}
