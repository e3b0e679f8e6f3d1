// src/services/dashboard_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    db::Session,
    models::{
        calendar::Event,
        cases::{CaseRow, CaseStatus},
        clients::ClientStatus,
        dashboard::{Dashboard, DashboardSummary},
    },
    services::lookup::client_name,
};

const PANEL_SIZE: usize = 5;

#[derive(Clone, Default)]
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    /// Painel do escritório ativo. `today` separa os eventos futuros.
    pub async fn get_dashboard(&self, session: &Session, today: NaiveDate) -> Dashboard {
        let scope = session.scope().await;
        let ws = &session.workspace;

        let mut cases = ws.cases.list(&scope).await;
        let clients = ws.clients.list(&scope).await;
        let invoices = ws.invoices.list(&scope).await;

        let mut upcoming: Vec<Event> = ws
            .events
            .list(&scope)
            .await
            .into_iter()
            .filter(|e| e.date >= today)
            .collect();
        upcoming.sort_by_key(|e| (e.date, e.time));

        let summary = DashboardSummary {
            open_cases: cases.iter().filter(|c| c.status == CaseStatus::Open).count(),
            active_clients: clients.iter().filter(|c| c.status == ClientStatus::Active).count(),
            upcoming_events: upcoming.len(),
            outstanding_amount: invoices
                .iter()
                .filter(|i| i.status.is_outstanding())
                .fold(Decimal::ZERO, |acc, i| acc.saturating_add(i.total)),
        };

        cases.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        let recent_cases = cases
            .into_iter()
            .take(PANEL_SIZE)
            .map(|case| CaseRow {
                client_name: client_name(&clients, case.client_id),
                case,
            })
            .collect();

        upcoming.truncate(PANEL_SIZE);

        Dashboard { summary, recent_cases, next_events: upcoming }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::seed,
        models::auth::{Role, User},
    };
    use uuid::Uuid;

    fn session(company: Option<Uuid>) -> Session {
        let user = User {
            id: seed::EMPLOYEE_JOHN,
            name: "John Doe".into(),
            email: "john@lawfirm.com".into(),
            role: Role::CompanyAdmin,
            company_id: company,
            avatar_url: None,
            password_hash: String::new(),
        };
        Session::new(user, company, 10)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn summary_counts_the_active_company() {
        let s = session(Some(seed::COMPANY_SMITH));
        let dashboard = DashboardService::new().get_dashboard(&s, day(2024, 4, 14)).await;

        assert_eq!(dashboard.summary.open_cases, 3);
        // Só a INV-2023-002 está em aberto
        assert_eq!(dashboard.summary.outstanding_amount, Decimal::new(1080, 0));
        assert_eq!(dashboard.summary.upcoming_events, 4);
        assert_eq!(dashboard.recent_cases.len(), 4);
    }

    #[tokio::test]
    async fn next_events_are_sorted_from_today() {
        let s = session(Some(seed::COMPANY_SMITH));
        let dashboard = DashboardService::new().get_dashboard(&s, day(2024, 4, 14)).await;

        let dates: Vec<NaiveDate> = dashboard.next_events.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![day(2024, 4, 14), day(2024, 4, 15), day(2024, 4, 18), day(2024, 4, 20)]);
    }

    #[tokio::test]
    async fn recent_cases_come_most_recently_updated_first() {
        let s = session(Some(seed::COMPANY_SMITH));
        let dashboard = DashboardService::new().get_dashboard(&s, day(2024, 4, 14)).await;

        let updated: Vec<_> = dashboard.recent_cases.iter().map(|r| r.case.updated_at).collect();
        assert!(updated.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn no_company_means_an_empty_dashboard() {
        let s = session(None);
        let dashboard = DashboardService::new().get_dashboard(&s, day(2024, 4, 14)).await;

        assert_eq!(dashboard.summary.open_cases, 0);
        assert_eq!(dashboard.summary.outstanding_amount, Decimal::ZERO);
        assert!(dashboard.next_events.is_empty());
    }
}
