// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{calendar::Event, cases::CaseRow};

// 1. Os cards do topo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub open_cases: usize,
    pub active_clients: usize,
    pub upcoming_events: usize,     // Eventos de hoje em diante
    pub outstanding_amount: Decimal, // Faturas enviadas ou vencidas
}

// 2. O painel completo
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub summary: DashboardSummary,
    pub recent_cases: Vec<CaseRow>, // Os 5 atualizados por último
    pub next_events: Vec<Event>,    // Os próximos 5
}
