// src/handlers/filters.rs

// Os filtros correntes de cada listagem: GET lê, PUT troca, DELETE limpa.

use axum::Json;

use crate::{
    middleware::{
        auth::CurrentSession,
        rbac::{
            PermCasesView, PermClientsView, PermCompaniesView, PermDocumentsView, PermEventsView,
            PermInvoicesView, RequirePermission,
        },
    },
    models::{
        billing::{BillingFilter, RateFilter},
        calendar::EventFilter,
        cases::CaseFilter,
        clients::ClientFilter,
        documents::DocumentFilter,
        tenancy::CompanyFilter,
    },
};

macro_rules! filter_handlers {
    ($get:ident, $put:ident, $reset:ident, $field:ident: $filter:ty, $perm:ty) => {
        pub async fn $get(
            _guard: RequirePermission<$perm>,
            CurrentSession(session): CurrentSession,
        ) -> Json<$filter> {
            Json(session.filters.read().await.$field.clone())
        }

        pub async fn $put(
            _guard: RequirePermission<$perm>,
            CurrentSession(session): CurrentSession,
            Json(filter): Json<$filter>,
        ) -> Json<$filter> {
            session.filters.write().await.$field = filter.clone();
            Json(filter)
        }

        pub async fn $reset(
            _guard: RequirePermission<$perm>,
            CurrentSession(session): CurrentSession,
        ) -> Json<$filter> {
            let mut book = session.filters.write().await;
            book.$field = <$filter>::default();
            Json(book.$field.clone())
        }
    };
}

// /api/clients/filters
filter_handlers!(get_client_filter, set_client_filter, reset_client_filter, clients: ClientFilter, PermClientsView);

// /api/cases/filters
filter_handlers!(get_case_filter, set_case_filter, reset_case_filter, cases: CaseFilter, PermCasesView);

// /api/documents/filters
filter_handlers!(get_document_filter, set_document_filter, reset_document_filter, documents: DocumentFilter, PermDocumentsView);

// /api/billing/filters (faturas e lançamentos)
filter_handlers!(get_billing_filter, set_billing_filter, reset_billing_filter, billing: BillingFilter, PermInvoicesView);

// /api/billing/rates/filters
filter_handlers!(get_rate_filter, set_rate_filter, reset_rate_filter, rates: RateFilter, PermInvoicesView);

// /api/calendar/filters
filter_handlers!(get_event_filter, set_event_filter, reset_event_filter, events: EventFilter, PermEventsView);

// /api/companies/filters
filter_handlers!(get_company_filter, set_company_filter, reset_company_filter, companies: CompanyFilter, PermCompaniesView);
