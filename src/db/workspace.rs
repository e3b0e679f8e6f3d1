// src/db/workspace.rs

use uuid::Uuid;

use crate::{
    db::{seed, store::EntityStore},
    models::{
        billing::{BillingRate, Invoice, TimeEntry},
        calendar::Event,
        cases::LegalCase,
        clients::Client,
        documents::Document,
        tenancy::{Company, Employee},
    },
};

/// Todos os stores de uma sessão. Nasce no login e morre no logout.
pub struct Workspace {
    pub companies: EntityStore<Company>,
    pub employees: EntityStore<Employee>,
    pub clients: EntityStore<Client>,
    pub cases: EntityStore<LegalCase>,
    pub documents: EntityStore<Document>,
    pub invoices: EntityStore<Invoice>,
    pub time_entries: EntityStore<TimeEntry>,
    pub billing_rates: EntityStore<BillingRate>,
    pub events: EntityStore<Event>,
}

impl Workspace {
    /// Workspace com os dados de demonstração; os lançamentos de horas
    /// ficam em nome de `user_id`.
    pub fn seeded(user_id: Uuid) -> Self {
        Self {
            companies: EntityStore::new(seed::companies()),
            employees: EntityStore::new(seed::employees()),
            clients: EntityStore::new(seed::clients()),
            cases: EntityStore::new(seed::cases()),
            documents: EntityStore::new(seed::documents()),
            invoices: EntityStore::new(seed::invoices()),
            time_entries: EntityStore::new(seed::time_entries(user_id)),
            billing_rates: EntityStore::new(seed::billing_rates()),
            events: EntityStore::new(seed::events()),
        }
    }
}
