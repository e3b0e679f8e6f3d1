// src/services/billing_service.rs

use std::fmt::Write as _;

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        filter::{related, RecordFilter},
    },
    db::Session,
    models::{
        billing::{
            BillingRate, Invoice, InvoiceDraft, InvoiceItem, InvoicePatch, InvoiceRow, InvoiceTotals,
            NewInvoice, TimeEntry, TimeEntryPatch, TimeEntryRow,
        },
        cases::LegalCase,
        clients::Client,
        tenancy::Company,
    },
    services::{
        lookup::{case_title, client_name},
        mutation::MutationService,
    },
};

fn cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Subtotal = Σ quantidade × valor; imposto = subtotal × alíquota, em centavos.
/// As operações saturam em vez de estourar.
pub fn compute_totals(items: &[InvoiceItem], tax_rate: Decimal) -> InvoiceTotals {
    let amount = cents(
        items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.quantity.saturating_mul(item.rate))),
    );
    let tax = cents(amount.saturating_mul(tax_rate));
    InvoiceTotals { amount, tax, total: amount.saturating_add(tax) }
}

/// Valor faturável de um lançamento: (minutos ÷ 60) × valor/hora.
pub fn billed_amount(entry: &TimeEntry) -> Decimal {
    cents(Decimal::from(entry.duration).saturating_mul(entry.rate) / Decimal::from(60))
}

#[derive(Clone)]
pub struct BillingService {
    tax_rate: Decimal,
    mutations: MutationService,
}

impl BillingService {
    pub fn new(tax_rate: Decimal, mutations: MutationService) -> Self {
        Self { tax_rate, mutations }
    }

    // =========================================================================
    //  FATURAS
    // =========================================================================

    pub async fn list_invoices(&self, session: &Session) -> Vec<InvoiceRow> {
        let scope = session.scope().await;
        let filter = session.filters.read().await.billing.clone();
        let invoices = session.workspace.invoices.list(&scope).await;
        let clients = session.workspace.clients.list(&scope).await;

        filter
            .apply(invoices.as_slice())
            .into_iter()
            .map(|invoice| invoice_row(invoice, &clients))
            .collect()
    }

    pub async fn get_invoice(&self, session: &Session, id: Uuid) -> Result<InvoiceRow, AppError> {
        let scope = session.scope().await;
        let invoice = session
            .workspace
            .invoices
            .get(&scope, id)
            .await
            .ok_or(AppError::NotFound("Invoice"))?;
        let clients = session.workspace.clients.list(&scope).await;
        Ok(invoice_row(invoice, &clients))
    }

    /// Calcula os totais uma única vez e marca como faturados os
    /// lançamentos citados nos itens.
    pub async fn create_invoice(&self, session: &Session, payload: NewInvoice) -> Result<Invoice, AppError> {
        let items: Vec<InvoiceItem> = payload.items.into_iter().map(InvoiceItem::from_input).collect();
        let totals = compute_totals(&items, self.tax_rate);

        let draft = InvoiceDraft {
            invoice_number: payload.invoice_number.trim().to_string(),
            client_id: payload.client_id,
            issue_date: payload.issue_date,
            due_date: payload.due_date,
            status: payload.status,
            notes: payload.notes,
            items,
            totals,
        };

        let invoice = self.mutations.create(session, &session.workspace.invoices, draft).await?;

        let scope = session.scope().await;
        for entry_id in invoice.items.iter().filter_map(|i| i.time_entry_id) {
            let patch = TimeEntryPatch { invoiced: Some(true), ..Default::default() };
            if session.workspace.time_entries.update(&scope, entry_id, patch).await.is_err() {
                tracing::warn!(invoice_id = %invoice.id, time_entry_id = %entry_id, "invoice references a missing time entry");
            }
        }

        Ok(invoice)
    }

    pub async fn update_invoice(&self, session: &Session, id: Uuid, patch: InvoicePatch) -> Result<Invoice, AppError> {
        if patch.items.is_some() {
            tracing::warn!(invoice_id = %id, "invoice items changed; totals stay as issued");
        }
        self.mutations.update(session, &session.workspace.invoices, id, patch).await
    }

    /// A área imprimível da fatura, em texto puro.
    pub async fn render_printable(&self, session: &Session, id: Uuid) -> Result<String, AppError> {
        let row = self.get_invoice(session, id).await?;
        let companies = session.workspace.companies.list(&session.scope().await).await;
        let company = companies.iter().find(|c| c.id == row.invoice.company_id);
        let text = printable(&row, company).map_err(anyhow::Error::from)?;
        Ok(text)
    }

    // =========================================================================
    //  LANÇAMENTOS DE HORAS
    // =========================================================================

    pub async fn list_time_entries(&self, session: &Session) -> Vec<TimeEntryRow> {
        let scope = session.scope().await;
        let filter = session.filters.read().await.billing.clone();
        let entries = session.workspace.time_entries.list(&scope).await;
        self.time_entry_rows(session, filter.apply(entries.as_slice())).await
    }

    /// Faturáveis e ainda não faturados, opcionalmente de um cliente.
    pub async fn unbilled(&self, session: &Session, client_id: Option<Uuid>) -> Vec<TimeEntryRow> {
        let scope = session.scope().await;
        let entries: Vec<TimeEntry> = session
            .workspace
            .time_entries
            .list(&scope)
            .await
            .into_iter()
            .filter(|e| e.billable && !e.invoiced && related(client_id, e.client_id))
            .collect();
        self.time_entry_rows(session, entries).await
    }

    /// Lançamentos com o valor faturável e os nomes de cliente e processo.
    pub async fn time_entry_rows(&self, session: &Session, entries: Vec<TimeEntry>) -> Vec<TimeEntryRow> {
        let scope = session.scope().await;
        let clients = session.workspace.clients.list(&scope).await;
        let cases = session.workspace.cases.list(&scope).await;
        entries
            .into_iter()
            .map(|entry| time_entry_row(entry, &clients, &cases))
            .collect()
    }

    // =========================================================================
    //  TABELA DE HONORÁRIOS
    // =========================================================================

    pub async fn list_rates(&self, session: &Session) -> Vec<BillingRate> {
        let scope = session.scope().await;
        let filter = session.filters.read().await.rates.clone();
        filter.apply(&session.workspace.billing_rates.list(&scope).await)
    }
}

fn invoice_row(invoice: Invoice, clients: &[Client]) -> InvoiceRow {
    InvoiceRow {
        client_name: client_name(clients, invoice.client_id),
        invoice,
    }
}

fn time_entry_row(entry: TimeEntry, clients: &[Client], cases: &[LegalCase]) -> TimeEntryRow {
    TimeEntryRow {
        billed_amount: billed_amount(&entry),
        client_name: entry.client_id.map(|id| client_name(clients, id)),
        case_title: entry.case_id.map(|id| case_title(cases, id)),
        entry,
    }
}

fn printable(row: &InvoiceRow, company: Option<&Company>) -> Result<String, std::fmt::Error> {
    let invoice = &row.invoice;
    let mut out = String::new();

    writeln!(out, "INVOICE {}", invoice.invoice_number)?;
    if let Some(c) = company {
        writeln!(out, "{}", c.name)?;
        writeln!(out, "{}, {}, {} {}", c.address, c.city, c.state, c.zip_code)?;
    }
    writeln!(out)?;
    writeln!(out, "Bill to: {}", row.client_name)?;
    writeln!(out, "Issue date: {}", invoice.issue_date.format("%Y-%m-%d"))?;
    writeln!(out, "Due date: {}", invoice.due_date.format("%Y-%m-%d"))?;
    writeln!(out, "Status: {}", invoice.status.as_str())?;
    writeln!(out)?;
    writeln!(out, "{:<40} {:>8} {:>12} {:>12}", "Description", "Qty", "Rate", "Amount")?;
    for item in &invoice.items {
        writeln!(
            out,
            "{:<40} {:>8} {:>12} {:>12}",
            item.description,
            item.quantity.normalize(),
            format!("${:.2}", item.rate),
            format!("${:.2}", item.amount),
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Subtotal: ${:.2}", invoice.amount)?;
    writeln!(out, "Tax: ${:.2}", invoice.tax)?;
    writeln!(out, "Total: ${:.2}", invoice.total)?;
    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.is_empty()) {
        writeln!(out)?;
        writeln!(out, "Notes: {notes}")?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::seed,
        models::{
            auth::{Role, User},
            billing::{InvoiceItemInput, InvoiceStatus},
        },
    };
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::{str::FromStr, time::Duration};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item(quantity: &str, rate: &str, time_entry_id: Option<Uuid>) -> InvoiceItemInput {
        InvoiceItemInput {
            id: None,
            description: "Legal services".into(),
            quantity: dec(quantity),
            rate: dec(rate),
            time_entry_id,
        }
    }

    fn session() -> Session {
        let user = User {
            id: seed::EMPLOYEE_JOHN,
            name: "John Doe".into(),
            email: "john@lawfirm.com".into(),
            role: Role::CompanyAdmin,
            company_id: Some(seed::COMPANY_SMITH),
            avatar_url: None,
            password_hash: String::new(),
        };
        Session::new(user, Some(seed::COMPANY_SMITH), 10)
    }

    fn service() -> BillingService {
        BillingService::new(dec("0.08"), MutationService::new(Duration::ZERO))
    }

    #[test]
    fn totals_for_two_hundreds_and_a_fifty_at_eight_percent() {
        let items: Vec<InvoiceItem> = vec![item("2", "100", None), item("1", "50", None)]
            .into_iter()
            .map(InvoiceItem::from_input)
            .collect();
        let totals = compute_totals(&items, dec("0.08"));

        assert_eq!(totals.amount, dec("250"));
        assert_eq!(totals.tax, dec("20"));
        assert_eq!(totals.total, dec("270"));
    }

    #[test]
    fn tax_is_rounded_to_cents() {
        let items = vec![InvoiceItem::from_input(item("1", "10.05", None))];
        let totals = compute_totals(&items, dec("0.08"));
        // 0.804 -> 0.80
        assert_eq!(totals.tax, dec("0.80"));
        assert_eq!(totals.total, dec("10.85"));
    }

    #[test]
    fn billed_amount_is_derived_from_minutes() {
        let entry = seed::time_entries(seed::EMPLOYEE_JOHN)
            .into_iter()
            .find(|e| e.id == seed::ENTRY_RESEARCH)
            .unwrap();
        // 180 min a 175/h
        assert_eq!(billed_amount(&entry), dec("525"));

        let mut odd = entry.clone();
        odd.duration = 50;
        odd.rate = dec("100");
        assert_eq!(billed_amount(&odd), dec("83.33"));
    }

    #[test]
    fn extreme_amounts_saturate_instead_of_overflowing() {
        let mut entry = seed::time_entries(seed::EMPLOYEE_JOHN).remove(0);
        entry.duration = u32::MAX;
        entry.rate = Decimal::MAX;
        assert!(billed_amount(&entry) > Decimal::ZERO);

        let items: Vec<InvoiceItem> = vec![item("1000000", "1000000000", None); 3]
            .into_iter()
            .map(InvoiceItem::from_input)
            .collect();
        let totals = compute_totals(&items, Decimal::MAX);
        assert_eq!(totals.total, Decimal::MAX);
    }

    #[tokio::test]
    async fn creating_an_invoice_marks_its_time_entries() {
        let s = session();
        let billing = service();
        let payload = NewInvoice {
            invoice_number: " INV-2024-010 ".into(),
            client_id: seed::CLIENT_ACME,
            issue_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            status: InvoiceStatus::Draft,
            notes: None,
            items: vec![item("3", "175", Some(seed::ENTRY_RESEARCH))],
        };

        let invoice = billing.create_invoice(&s, payload).await.unwrap();
        assert_eq!(invoice.invoice_number, "INV-2024-010");
        assert_eq!(invoice.total, dec("567"));

        assert!(billing.unbilled(&s, None).await.is_empty());
    }

    #[tokio::test]
    async fn updating_items_keeps_issued_totals() {
        let s = session();
        let billing = service();
        let patch = InvoicePatch {
            items: Some(vec![item("10", "1000", None)]),
            ..Default::default()
        };

        let updated = billing.update_invoice(&s, seed::INVOICE_001, patch).await.unwrap();
        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.amount, dec("750"));
        assert_eq!(updated.total, dec("810"));
    }

    #[tokio::test]
    async fn invoice_rows_fall_back_to_unknown_client() {
        let s = session();
        let billing = service();
        let scope = s.scope().await;
        s.workspace.clients.delete(&scope, seed::CLIENT_SMITH).await;

        let row = billing.get_invoice(&s, seed::INVOICE_001).await.unwrap();
        assert_eq!(row.client_name, "Unknown Client");
    }

    #[tokio::test]
    async fn unbilled_can_be_narrowed_to_a_client() {
        let s = session();
        let billing = service();
        assert_eq!(billing.unbilled(&s, Some(seed::CLIENT_ACME)).await.len(), 1);
        assert!(billing.unbilled(&s, Some(seed::CLIENT_SMITH)).await.is_empty());
    }

    #[tokio::test]
    async fn printable_invoice_lists_items_and_totals() {
        let s = session();
        let text = service().render_printable(&s, seed::INVOICE_001).await.unwrap();

        assert!(text.starts_with("INVOICE INV-2023-001"));
        assert!(text.contains("Smith & Associates Law Firm"));
        assert!(text.contains("Bill to: John Smith"));
        assert!(text.contains("Document review"));
        assert!(text.contains("Total: $810.00"));
        assert!(text.contains("Notes: Payment received on time"));
    }
}
