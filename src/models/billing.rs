// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        filter::{related, selected, text_matches, DateRange, RecordFilter},
        validation::{bounded_amount, min_quantity},
    },
    db::store::{apply_patch, record_accessors, Entity, RecordMeta},
};

// =============================================================================
//  TABELA DE HONORÁRIOS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateType {
    Hourly,
    Fixed,
    Contingency,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingRate {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub rate_type: RateType,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBillingRate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "bounded_amount"))]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub rate_type: RateType,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillingRatePatch {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[validate(custom(function = "bounded_amount"))]
    pub amount: Option<Decimal>,
    #[serde(rename = "type")]
    pub rate_type: Option<RateType>,
    pub description: Option<String>,
}

impl Entity for BillingRate {
    type Draft = NewBillingRate;
    type Patch = BillingRatePatch;

    const LABEL: &'static str = "billing rate";
    const TITLE: &'static str = "Billing rate";

    record_accessors!(scoped);

    fn from_draft(meta: RecordMeta, draft: NewBillingRate) -> Self {
        Self {
            id: meta.id,
            company_id: meta.company_id.unwrap_or_default(),
            name: draft.name,
            amount: draft.amount,
            rate_type: draft.rate_type,
            description: draft.description,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    fn merge(&mut self, patch: BillingRatePatch) {
        apply_patch!(self, patch; name, amount, rate_type; optional: description);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RateFilter {
    pub search: String,
    #[serde(rename = "type")]
    pub rate_type: Vec<RateType>,
}

impl RecordFilter<BillingRate> for RateFilter {
    fn matches(&self, rate: &BillingRate) -> bool {
        text_matches(&self.search, &[&rate.name]) && selected(&self.rate_type, &rate.rate_type)
    }
}

// =============================================================================
//  LANÇAMENTOS DE HORAS
// =============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: Uuid,
    pub company_id: Uuid,
    pub description: String,
    pub date: NaiveDate,
    // Em minutos
    pub duration: u32,
    pub rate: Decimal,
    pub billable: bool,
    pub invoiced: bool,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// O formulário informa horas e minutos; o registro guarda só minutos.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeEntry {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    #[validate(range(max = 10000, message = "Hours must be at most 10000"))]
    pub hours: u32,
    #[serde(default)]
    #[validate(range(max = 59, message = "Minutes must be less than 60"))]
    pub minutes: u32,
    #[validate(custom(function = "bounded_amount"))]
    pub rate: Decimal,
    #[serde(default = "default_billable")]
    pub billable: bool,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
}

fn default_billable() -> bool {
    true
}

impl NewTimeEntry {
    pub fn duration_minutes(&self) -> u32 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryPatch {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    // Minutos totais
    #[validate(range(max = 600000, message = "Duration must be at most 600000 minutes"))]
    pub duration: Option<u32>,
    #[validate(custom(function = "bounded_amount"))]
    pub rate: Option<Decimal>,
    pub billable: Option<bool>,
    pub invoiced: Option<bool>,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
}

impl Entity for TimeEntry {
    type Draft = NewTimeEntry;
    type Patch = TimeEntryPatch;

    const LABEL: &'static str = "time entry";
    const TITLE: &'static str = "Time entry";

    record_accessors!(scoped);

    fn from_draft(meta: RecordMeta, draft: NewTimeEntry) -> Self {
        Self {
            id: meta.id,
            company_id: meta.company_id.unwrap_or_default(),
            duration: draft.duration_minutes(),
            description: draft.description,
            date: draft.date,
            rate: draft.rate,
            billable: draft.billable,
            invoiced: false,
            case_id: draft.case_id,
            client_id: draft.client_id,
            user_id: meta.user_id,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    fn merge(&mut self, patch: TimeEntryPatch) {
        apply_patch!(
            self, patch;
            description, date, duration, rate, billable, invoiced;
            optional: case_id, client_id
        );
    }
}

/// Lançamento com o valor faturável calculado e os nomes resolvidos.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryRow {
    #[serde(flatten)]
    pub entry: TimeEntry,
    pub billed_amount: Decimal,
    pub client_name: Option<String>,
    pub case_title: Option<String>,
}

// =============================================================================
//  FATURAS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    /// Ainda a receber.
    pub fn is_outstanding(self) -> bool {
        matches!(self, InvoiceStatus::Sent | InvoiceStatus::Overdue)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub id: Uuid,
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub time_entry_id: Option<Uuid>,
}

impl InvoiceItem {
    pub fn from_input(input: InvoiceItemInput) -> Self {
        Self {
            id: input.id.unwrap_or_else(Uuid::new_v4),
            amount: input.quantity.saturating_mul(input.rate),
            description: input.description,
            quantity: input.quantity,
            rate: input.rate,
            time_entry_id: input.time_entry_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub company_id: Uuid,
    pub invoice_number: String,
    pub client_id: Uuid,
    // Subtotal
    pub amount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemInput {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(custom(function = "min_quantity"))]
    pub quantity: Decimal,
    #[validate(custom(function = "bounded_amount"))]
    pub rate: Decimal,
    pub time_entry_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoice {
    #[validate(length(min = 1, message = "Invoice number is required"))]
    pub invoice_number: String,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "At least one item is required"), nested)]
    pub items: Vec<InvoiceItemInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceTotals {
    pub amount: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

/// Fatura pronta para o store: itens com id e totais já calculados.
#[derive(Debug)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub client_id: Uuid,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub notes: Option<String>,
    pub items: Vec<InvoiceItem>,
    pub totals: InvoiceTotals,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    #[validate(length(min = 1, message = "Invoice number is required"))]
    pub invoice_number: Option<String>,
    pub client_id: Option<Uuid>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<InvoiceStatus>,
    pub notes: Option<String>,
    #[validate(length(min = 1, message = "At least one item is required"), nested)]
    pub items: Option<Vec<InvoiceItemInput>>,
}

impl Entity for Invoice {
    type Draft = InvoiceDraft;
    type Patch = InvoicePatch;

    const LABEL: &'static str = "invoice";
    const TITLE: &'static str = "Invoice";

    record_accessors!(scoped);

    fn from_draft(meta: RecordMeta, draft: InvoiceDraft) -> Self {
        Self {
            id: meta.id,
            company_id: meta.company_id.unwrap_or_default(),
            invoice_number: draft.invoice_number,
            client_id: draft.client_id,
            amount: draft.totals.amount,
            tax: draft.totals.tax,
            total: draft.totals.total,
            status: draft.status,
            issue_date: draft.issue_date,
            due_date: draft.due_date,
            notes: draft.notes,
            items: draft.items,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    // Os totais ficam congelados na emissão; trocar itens não os recalcula.
    fn merge(&mut self, mut patch: InvoicePatch) {
        if let Some(items) = patch.items.take() {
            self.items = items.into_iter().map(InvoiceItem::from_input).collect();
        }
        apply_patch!(
            self, patch;
            invoice_number, client_id, issue_date, due_date, status;
            optional: notes
        );
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRow {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub client_name: String,
}

// =============================================================================
//  FILTRO COMPARTILHADO (faturas e lançamentos)
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingFilter {
    pub search: String,
    pub status: Vec<InvoiceStatus>,
    pub date_range: DateRange,
    pub client_id: Option<Uuid>,
    // Só se aplica aos lançamentos de horas
    pub case_id: Option<Uuid>,
}

impl RecordFilter<Invoice> for BillingFilter {
    fn matches(&self, invoice: &Invoice) -> bool {
        text_matches(&self.search, &[&invoice.invoice_number])
            && selected(&self.status, &invoice.status)
            && related(self.client_id, Some(invoice.client_id))
            && self.date_range.contains_date(invoice.issue_date)
    }
}

impl RecordFilter<TimeEntry> for BillingFilter {
    fn matches(&self, entry: &TimeEntry) -> bool {
        text_matches(&self.search, &[&entry.description])
            && related(self.client_id, entry.client_id)
            && related(self.case_id, entry.case_id)
            && self.date_range.contains_date(entry.date)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnbilledQuery {
    pub client_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn item_amount_is_quantity_times_rate() {
        let item = InvoiceItem::from_input(InvoiceItemInput {
            id: None,
            description: "Document review".into(),
            quantity: dec("2"),
            rate: dec("250"),
            time_entry_id: None,
        });
        assert_eq!(item.amount, dec("500"));
        assert!(!item.id.is_nil());
    }

    #[test]
    fn invoice_requires_items_with_positive_quantity() {
        let empty: NewInvoice = serde_json::from_value(serde_json::json!({
            "invoiceNumber": "INV-1",
            "clientId": Uuid::new_v4(),
            "issueDate": "2024-05-01",
            "dueDate": "2024-06-01",
            "status": "draft",
            "items": []
        }))
        .unwrap();
        assert!(empty.validate().unwrap_err().field_errors().contains_key("items"));

        let zero_qty: NewInvoice = serde_json::from_value(serde_json::json!({
            "invoiceNumber": "INV-1",
            "clientId": Uuid::new_v4(),
            "issueDate": "2024-05-01",
            "dueDate": "2024-06-01",
            "status": "draft",
            "items": [{ "description": "Drafting", "quantity": 0, "rate": 100 }]
        }))
        .unwrap();
        assert!(zero_qty.validate().is_err());
    }

    #[test]
    fn time_entry_minutes_are_capped() {
        let entry: NewTimeEntry = serde_json::from_value(serde_json::json!({
            "description": "Research",
            "date": "2024-04-20",
            "hours": 1,
            "minutes": 75,
            "rate": 175
        }))
        .unwrap();
        assert!(entry.validate().is_err());
        assert!(entry.billable);
    }

    #[test]
    fn hours_and_minutes_become_duration() {
        let entry: NewTimeEntry = serde_json::from_value(serde_json::json!({
            "description": "Research",
            "date": "2024-04-20",
            "hours": 2,
            "minutes": 30,
            "rate": 175
        }))
        .unwrap();
        assert_eq!(entry.duration_minutes(), 150);
    }

    #[test]
    fn rate_filter_by_type() {
        let at = Utc::now();
        let rate = |name: &str, rate_type: RateType| BillingRate {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            name: name.into(),
            amount: dec("250"),
            rate_type,
            description: None,
            created_at: at,
            updated_at: at,
        };
        let list = vec![rate("Standard Rate", RateType::Hourly), rate("Document Preparation", RateType::Fixed)];

        let filter = RateFilter { rate_type: vec![RateType::Fixed], ..Default::default() };
        assert_eq!(filter.apply(&list)[0].name, "Document Preparation");
    }
}
