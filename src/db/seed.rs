// src/db/seed.rs

// Dados de demonstração carregados em cada sessão nova.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    auth::Role,
    billing::{BillingRate, Invoice, InvoiceItem, InvoiceStatus, RateType, TimeEntry},
    calendar::{Event, EventType},
    cases::{CasePriority, CaseStatus, CaseType, LegalCase},
    clients::{Client, ClientStatus, ClientType},
    documents::{Document, DocumentStatus, FileType},
    tenancy::{Company, Employee, EmployeeStatus},
};

// --- IDS FIXOS ---

pub const COMPANY_SMITH: Uuid = Uuid::from_u128(0x101);
pub const COMPANY_JOHNSON: Uuid = Uuid::from_u128(0x102);

pub const USER_ADMIN: Uuid = Uuid::from_u128(0x201);
// John e Jane são usuários e também funcionários (mesmo id)
pub const EMPLOYEE_JOHN: Uuid = Uuid::from_u128(0x301);
pub const EMPLOYEE_JANE: Uuid = Uuid::from_u128(0x302);
pub const EMPLOYEE_ROBERT: Uuid = Uuid::from_u128(0x303);
pub const EMPLOYEE_SARAH: Uuid = Uuid::from_u128(0x304);

pub const CLIENT_SMITH: Uuid = Uuid::from_u128(0x401);
pub const CLIENT_ACME: Uuid = Uuid::from_u128(0x402);
pub const CLIENT_SARAH: Uuid = Uuid::from_u128(0x403);
pub const CLIENT_TECH: Uuid = Uuid::from_u128(0x404);
pub const CLIENT_RODRIGUEZ: Uuid = Uuid::from_u128(0x405);

pub const CASE_SMITH_V_JOHNSON: Uuid = Uuid::from_u128(0x501);
pub const CASE_WILLIAMS_ESTATE: Uuid = Uuid::from_u128(0x502);
pub const CASE_STATE_V_BROWN: Uuid = Uuid::from_u128(0x503);
pub const CASE_TECHCORP: Uuid = Uuid::from_u128(0x504);

pub const DOC_CASE_BRIEF: Uuid = Uuid::from_u128(0x601);
pub const DOC_CONTRACT_DRAFT: Uuid = Uuid::from_u128(0x605);

pub const RATE_STANDARD: Uuid = Uuid::from_u128(0x801);
pub const RATE_DOCUMENT_PREP: Uuid = Uuid::from_u128(0x804);

pub const ENTRY_RESEARCH: Uuid = Uuid::from_u128(0x903);

pub const INVOICE_001: Uuid = Uuid::from_u128(0xA01);

// --- USUÁRIOS ---

pub struct SeedUser {
    pub id: Uuid,
    pub name: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
    pub company_id: Option<Uuid>,
}

pub fn users() -> Vec<SeedUser> {
    vec![
        SeedUser {
            id: USER_ADMIN,
            name: "System Administrator",
            email: "admin@legal-nexus.com",
            password: "admin123",
            role: Role::Admin,
            company_id: None,
        },
        SeedUser {
            id: EMPLOYEE_JOHN,
            name: "John Doe",
            email: "john@lawfirm.com",
            password: "password",
            role: Role::CompanyAdmin,
            company_id: Some(COMPANY_SMITH),
        },
        SeedUser {
            id: EMPLOYEE_JANE,
            name: "Jane Smith",
            email: "jane@lawfirm.com",
            password: "password",
            role: Role::Employee,
            company_id: Some(COMPANY_SMITH),
        },
    ]
}

// --- AUXILIARES DE DATA ---

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap_or_default()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

fn money(units: i64) -> Decimal {
    Decimal::from(units)
}

// --- ESCRITÓRIOS E FUNCIONÁRIOS ---

pub fn companies() -> Vec<Company> {
    let created = at(2023, 1, 1, 9, 0);
    vec![
        Company {
            id: COMPANY_SMITH,
            name: "Smith & Associates Law Firm".into(),
            address: "123 Legal Ave".into(),
            city: "New York".into(),
            state: "NY".into(),
            zip_code: "10001".into(),
            phone: "(212) 555-1234".into(),
            email: "info@smithlaw.com".into(),
            website: "www.smithlaw.com".into(),
            logo_url: "https://placehold.co/400x400/1a365d/FFFFFF?text=S%26A".into(),
            created_at: created,
            updated_at: created,
        },
        Company {
            id: COMPANY_JOHNSON,
            name: "Johnson Legal Group".into(),
            address: "456 Attorney Blvd".into(),
            city: "Los Angeles".into(),
            state: "CA".into(),
            zip_code: "90001".into(),
            phone: "(310) 555-5678".into(),
            email: "contact@johnsonlegal.com".into(),
            website: "www.johnsonlegal.com".into(),
            logo_url: "https://placehold.co/400x400/1a365d/FFFFFF?text=JLG".into(),
            created_at: created,
            updated_at: created,
        },
    ]
}

pub fn employees() -> Vec<Employee> {
    let created = at(2023, 1, 1, 9, 0);
    let employee = |id, name: &str, email: &str, role, department: &str, position: &str, initials: &str| Employee {
        id,
        company_id: COMPANY_SMITH,
        name: name.into(),
        email: email.into(),
        role,
        department: department.into(),
        position: position.into(),
        avatar: format!("https://placehold.co/200x200/718096/FFFFFF?text={initials}"),
        status: EmployeeStatus::Active,
        created_at: created,
        updated_at: created,
    };

    vec![
        employee(EMPLOYEE_JOHN, "John Doe", "john@lawfirm.com", Role::CompanyAdmin, "Management", "Managing Partner", "JD"),
        employee(EMPLOYEE_JANE, "Jane Smith", "jane@lawfirm.com", Role::Employee, "Legal", "Senior Attorney", "JS"),
        employee(EMPLOYEE_ROBERT, "Robert Johnson", "robert@lawfirm.com", Role::Employee, "Legal", "Paralegal", "RJ"),
        employee(EMPLOYEE_SARAH, "Sarah Williams", "sarah@lawfirm.com", Role::Employee, "Administration", "Office Manager", "SW"),
    ]
}

// --- CLIENTES E PROCESSOS ---

pub fn clients() -> Vec<Client> {
    let client = |id, name: &str, email: &str, phone: &str, address: &str, client_type, status, referral: &str, notes: &str, created, updated| Client {
        id,
        company_id: COMPANY_SMITH,
        name: name.into(),
        email: email.into(),
        phone: phone.into(),
        address: address.into(),
        client_type,
        status,
        referral_source: referral.into(),
        notes: notes.into(),
        created_at: created,
        updated_at: updated,
    };

    vec![
        client(
            CLIENT_SMITH, "John Smith", "john.smith@example.com", "(555) 123-4567",
            "123 Main St, Anytown, CA 94001", ClientType::Individual, ClientStatus::Active,
            "Website", "Seeking representation for employment dispute",
            at(2023, 2, 15, 0, 0), at(2023, 2, 15, 0, 0),
        ),
        client(
            CLIENT_ACME, "Acme Corporation", "contact@acmecorp.com", "(555) 987-6543",
            "456 Business Ave, Commerce City, CA 94002", ClientType::Business, ClientStatus::Active,
            "Referral", "Corporate client requiring ongoing legal counsel",
            at(2023, 3, 10, 0, 0), at(2023, 6, 20, 0, 0),
        ),
        client(
            CLIENT_SARAH, "Sarah Johnson", "sarah.j@example.com", "(555) 234-5678",
            "789 Oak St, Lakeside, CA 94003", ClientType::Individual, ClientStatus::Potential,
            "Social media", "Interested in estate planning services",
            at(2023, 4, 5, 0, 0), at(2023, 4, 5, 0, 0),
        ),
        client(
            CLIENT_TECH, "Tech Innovations LLC", "legal@techinnovations.com", "(555) 345-6789",
            "101 Innovation Dr, Tech Park, CA 94004", ClientType::Business, ClientStatus::Inactive,
            "Conference", "Previous client for patent applications",
            at(2022, 12, 12, 0, 0), at(2023, 5, 8, 0, 0),
        ),
        client(
            CLIENT_RODRIGUEZ, "Michael Rodriguez", "m.rodriguez@example.com", "(555) 456-7890",
            "222 Pine St, Westview, CA 94005", ClientType::Individual, ClientStatus::Active,
            "Existing client", "Family law case - custody hearing scheduled",
            at(2023, 6, 20, 0, 0), at(2023, 7, 15, 0, 0),
        ),
    ]
}

pub fn cases() -> Vec<LegalCase> {
    vec![
        LegalCase {
            id: CASE_SMITH_V_JOHNSON,
            company_id: COMPANY_SMITH,
            title: "Smith v. Johnson".into(),
            description: "Breach of contract dispute regarding software development project".into(),
            case_number: "CV-2024-1001".into(),
            case_type: CaseType::Civil,
            status: CaseStatus::Open,
            priority: CasePriority::High,
            client_id: CLIENT_SMITH,
            assigned_to: vec![EMPLOYEE_JANE, EMPLOYEE_ROBERT],
            due_date: Some(day(2024, 6, 15)),
            created_at: at(2024, 1, 10, 9, 0),
            updated_at: at(2024, 4, 5, 14, 30),
        },
        LegalCase {
            id: CASE_WILLIAMS_ESTATE,
            company_id: COMPANY_SMITH,
            title: "In re: Williams Estate".into(),
            description: "Probate proceeding for distribution of assets".into(),
            case_number: "PR-2024-0578".into(),
            case_type: CaseType::Family,
            status: CaseStatus::Open,
            priority: CasePriority::Medium,
            client_id: CLIENT_ACME,
            assigned_to: vec![EMPLOYEE_JANE],
            due_date: Some(day(2024, 7, 30)),
            created_at: at(2024, 2, 18, 10, 15),
            updated_at: at(2024, 4, 2, 11, 20),
        },
        LegalCase {
            id: CASE_STATE_V_BROWN,
            company_id: COMPANY_SMITH,
            title: "State v. Brown".into(),
            description: "Criminal defense for alleged securities fraud".into(),
            case_number: "CR-2024-3421".into(),
            case_type: CaseType::Criminal,
            status: CaseStatus::Open,
            priority: CasePriority::High,
            client_id: CLIENT_SARAH,
            assigned_to: vec![EMPLOYEE_JANE, EMPLOYEE_ROBERT, EMPLOYEE_SARAH],
            due_date: Some(day(2024, 5, 20)),
            created_at: at(2024, 3, 5, 8, 45),
            updated_at: at(2024, 4, 7, 16, 0),
        },
        LegalCase {
            id: CASE_TECHCORP,
            company_id: COMPANY_SMITH,
            title: "TechCorp Acquisition".into(),
            description: "Corporate acquisition of software startup".into(),
            case_number: "CA-2024-0098".into(),
            case_type: CaseType::Corporate,
            status: CaseStatus::Closed,
            priority: CasePriority::Medium,
            client_id: CLIENT_TECH,
            assigned_to: vec![EMPLOYEE_ROBERT],
            due_date: None,
            created_at: at(2023, 11, 15, 11, 30),
            updated_at: at(2024, 3, 20, 15, 45),
        },
    ]
}

// --- DOCUMENTOS E AGENDA ---

pub fn documents() -> Vec<Document> {
    let doc = |id, title: &str, description: &str, file_type, file_size, status, tags: &[&str], created_by, case_id, client_id, created, updated| Document {
        id,
        company_id: COMPANY_SMITH,
        title: title.into(),
        description: description.into(),
        file_type,
        file_size,
        status,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        created_by,
        case_id,
        client_id,
        download_url: "#".into(),
        created_at: created,
        updated_at: updated,
    };

    vec![
        doc(
            DOC_CASE_BRIEF, "Case Brief - Smith v. Johnson", "Summary of key legal arguments and precedents",
            FileType::Pdf, 1_450_000, DocumentStatus::Final, &["brief", "arguments", "case-summary"],
            EMPLOYEE_JANE, Some(CASE_SMITH_V_JOHNSON), None,
            at(2024, 3, 12, 14, 30), at(2024, 3, 15, 9, 20),
        ),
        doc(
            Uuid::from_u128(0x602), "Evidence Photos - Williams Estate", "Property photos for estate valuation",
            FileType::Jpg, 3_200_000, DocumentStatus::Final, &["evidence", "photos", "estate"],
            EMPLOYEE_ROBERT, Some(CASE_WILLIAMS_ESTATE), None,
            at(2024, 2, 20, 11, 15), at(2024, 2, 20, 11, 15),
        ),
        doc(
            Uuid::from_u128(0x603), "Witness Statements - State v. Brown", "Compilation of witness testimonies",
            FileType::Docx, 890_000, DocumentStatus::Draft, &["statements", "witness", "testimony"],
            EMPLOYEE_JANE, Some(CASE_STATE_V_BROWN), None,
            at(2024, 3, 18, 15, 45), at(2024, 4, 1, 10, 30),
        ),
        doc(
            Uuid::from_u128(0x604), "Financial Records - TechCorp", "Financial statements for due diligence",
            FileType::Xlsx, 2_100_000, DocumentStatus::Final, &["financial", "due-diligence", "acquisition"],
            EMPLOYEE_ROBERT, Some(CASE_TECHCORP), None,
            at(2024, 1, 10, 9, 0), at(2024, 1, 25, 16, 20),
        ),
        doc(
            DOC_CONTRACT_DRAFT, "Contract Draft - Smith Consulting", "Service agreement draft for client review",
            FileType::Docx, 450_000, DocumentStatus::Draft, &["contract", "agreement", "draft"],
            EMPLOYEE_JANE, None, Some(CLIENT_SMITH),
            at(2024, 3, 28, 13, 10), at(2024, 3, 28, 13, 10),
        ),
    ]
}

pub fn events() -> Vec<Event> {
    let created = at(2024, 4, 1, 9, 0);
    let event = |id: u128, title: &str, description: &str, date, time, end_time, location: Option<&str>, event_type, case_id, client_id, created_by| Event {
        id: Uuid::from_u128(id),
        company_id: COMPANY_SMITH,
        title: title.into(),
        description: description.into(),
        date,
        time,
        end_time,
        location: location.map(str::to_string),
        event_type,
        case_id,
        client_id,
        attendees: vec![],
        all_day: false,
        reminder_set: false,
        created_by,
        created_at: created,
        updated_at: created,
    };

    let mut deadline = event(
        0x703, "Filing Deadline", "Submit response brief for State v. Brown",
        day(2024, 4, 18), hm(17, 0), None, None,
        EventType::Deadline, Some(CASE_STATE_V_BROWN), None, EMPLOYEE_ROBERT,
    );
    deadline.all_day = true;

    let mut team = event(
        0x704, "Team Meeting", "Weekly team status update",
        day(2024, 4, 15), hm(9, 0), Some(hm(10, 0)), Some("Main Conference Room"),
        EventType::Meeting, None, None, EMPLOYEE_JANE,
    );
    team.attendees = vec![EMPLOYEE_JANE, EMPLOYEE_ROBERT, EMPLOYEE_SARAH];

    vec![
        event(
            0x701, "Court Hearing", "Initial hearing for Smith v. Johnson case",
            day(2024, 4, 12), hm(10, 0), Some(hm(11, 30)), Some("County Courthouse, Room 302"),
            EventType::Court, Some(CASE_SMITH_V_JOHNSON), None, EMPLOYEE_JANE,
        ),
        event(
            0x702, "Client Meeting", "Review estate planning documents with Michael Williams",
            day(2024, 4, 14), hm(14, 30), Some(hm(15, 30)), Some("Office - Conference Room B"),
            EventType::Meeting, Some(CASE_WILLIAMS_ESTATE), Some(CLIENT_ACME), EMPLOYEE_JANE,
        ),
        deadline,
        team,
        event(
            0x705, "Document Review", "Review TechCorp acquisition contracts",
            day(2024, 4, 20), hm(13, 0), Some(hm(16, 0)), None,
            EventType::Other, Some(CASE_TECHCORP), None, EMPLOYEE_JANE,
        ),
    ]
}

// --- FATURAMENTO ---

pub fn billing_rates() -> Vec<BillingRate> {
    let created = at(2023, 1, 1, 9, 0);
    let rate = |id, name: &str, amount, rate_type, description: &str| BillingRate {
        id,
        company_id: COMPANY_SMITH,
        name: name.into(),
        amount: money(amount),
        rate_type,
        description: Some(description.into()),
        created_at: created,
        updated_at: created,
    };

    vec![
        rate(RATE_STANDARD, "Standard Rate", 250, RateType::Hourly, "Standard hourly rate for general legal services"),
        rate(Uuid::from_u128(0x802), "Junior Associate", 175, RateType::Hourly, "Rate for junior associate work"),
        rate(Uuid::from_u128(0x803), "Senior Partner", 450, RateType::Hourly, "Rate for senior partner consultation"),
        rate(RATE_DOCUMENT_PREP, "Document Preparation", 500, RateType::Fixed, "Standard rate for document preparation"),
    ]
}

pub fn time_entries(user_id: Uuid) -> Vec<TimeEntry> {
    let entry = |id: u128, description: &str, date: NaiveDate, duration, rate, invoiced, client_id, case_id| {
        let created = date.and_time(NaiveTime::MIN).and_utc();
        TimeEntry {
            id: Uuid::from_u128(id),
            company_id: COMPANY_SMITH,
            description: description.into(),
            date,
            duration,
            rate: money(rate),
            billable: true,
            invoiced,
            case_id: Some(case_id),
            client_id: Some(client_id),
            user_id,
            created_at: created,
            updated_at: created,
        }
    };

    vec![
        entry(0x901, "Initial consultation", day(2023, 4, 15), 60, 250, true, CLIENT_SMITH, CASE_SMITH_V_JOHNSON),
        entry(0x902, "Document review", day(2023, 4, 17), 120, 250, true, CLIENT_SMITH, CASE_SMITH_V_JOHNSON),
        entry(0x903, "Research for case", day(2023, 4, 20), 180, 175, false, CLIENT_ACME, CASE_WILLIAMS_ESTATE),
    ]
}

pub fn invoices() -> Vec<Invoice> {
    let item = |id: u128, description: &str, quantity: i64, rate: i64, time_entry: Option<u128>| InvoiceItem {
        id: Uuid::from_u128(id),
        description: description.into(),
        quantity: money(quantity),
        rate: money(rate),
        amount: money(quantity * rate),
        time_entry_id: time_entry.map(Uuid::from_u128),
    };

    vec![
        Invoice {
            id: INVOICE_001,
            company_id: COMPANY_SMITH,
            invoice_number: "INV-2023-001".into(),
            client_id: CLIENT_SMITH,
            amount: money(750),
            tax: money(60),
            total: money(810),
            status: InvoiceStatus::Paid,
            issue_date: day(2023, 4, 22),
            due_date: day(2023, 5, 22),
            notes: Some("Payment received on time".into()),
            items: vec![
                item(0xB01, "Initial consultation", 1, 250, Some(0x901)),
                item(0xB02, "Document review", 2, 250, Some(0x902)),
            ],
            created_at: at(2023, 4, 22, 0, 0),
            updated_at: at(2023, 5, 5, 0, 0),
        },
        Invoice {
            id: Uuid::from_u128(0xA02),
            company_id: COMPANY_SMITH,
            invoice_number: "INV-2023-002".into(),
            client_id: CLIENT_ACME,
            amount: money(1000),
            tax: money(80),
            total: money(1080),
            status: InvoiceStatus::Sent,
            issue_date: day(2023, 5, 10),
            due_date: day(2023, 6, 10),
            notes: None,
            items: vec![item(0xB03, "Contract drafting", 4, 250, None)],
            created_at: at(2023, 5, 10, 0, 0),
            updated_at: at(2023, 5, 10, 0, 0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_invoices_are_consistent() {
        for invoice in invoices() {
            let subtotal: Decimal = invoice.items.iter().map(|i| i.amount).sum();
            assert_eq!(subtotal, invoice.amount);
            assert_eq!(invoice.amount + invoice.tax, invoice.total);
        }
    }

    #[test]
    fn seeded_cases_reference_seeded_clients() {
        let clients = clients();
        for case in cases() {
            assert!(clients.iter().any(|c| c.id == case.client_id), "{}", case.title);
        }
    }

    #[test]
    fn only_one_unbilled_entry() {
        let unbilled: Vec<_> = time_entries(USER_ADMIN).into_iter().filter(|e| !e.invoiced).collect();
        assert_eq!(unbilled.len(), 1);
        assert_eq!(unbilled[0].id, ENTRY_RESEARCH);
    }
}
