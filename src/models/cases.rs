// src/models/cases.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::filter::{related, selected, text_matches, DateRange, RecordFilter},
    db::store::{apply_patch, record_accessors, Entity, RecordMeta},
    models::{billing::TimeEntryRow, calendar::Event, documents::Document},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseType {
    Criminal,
    Civil,
    Family,
    Corporate,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Open,
    Closed,
    Suspended,
    Appeal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalCase {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub case_number: String,
    #[serde(rename = "type")]
    pub case_type: CaseType,
    pub status: CaseStatus,
    pub priority: CasePriority,
    pub client_id: Uuid,
    // Ids de funcionários
    pub assigned_to: Vec<Uuid>,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LegalCase {
    pub fn is_assigned_to(&self, employee_id: Uuid) -> bool {
        self.assigned_to.contains(&employee_id)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCase {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Case number is required"))]
    pub case_number: String,
    #[serde(rename = "type")]
    pub case_type: CaseType,
    pub status: CaseStatus,
    pub priority: CasePriority,
    pub client_id: Uuid,
    #[serde(default)]
    pub assigned_to: Vec<Uuid>,
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CasePatch {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Case number is required"))]
    pub case_number: Option<String>,
    #[serde(rename = "type")]
    pub case_type: Option<CaseType>,
    pub status: Option<CaseStatus>,
    pub priority: Option<CasePriority>,
    pub client_id: Option<Uuid>,
    pub assigned_to: Option<Vec<Uuid>>,
    pub due_date: Option<NaiveDate>,
}

impl Entity for LegalCase {
    type Draft = NewCase;
    type Patch = CasePatch;

    const LABEL: &'static str = "case";
    const TITLE: &'static str = "Case";

    record_accessors!(scoped);

    fn from_draft(meta: RecordMeta, draft: NewCase) -> Self {
        Self {
            id: meta.id,
            company_id: meta.company_id.unwrap_or_default(),
            title: draft.title,
            description: draft.description,
            case_number: draft.case_number,
            case_type: draft.case_type,
            status: draft.status,
            priority: draft.priority,
            client_id: draft.client_id,
            assigned_to: draft.assigned_to,
            due_date: draft.due_date,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    fn merge(&mut self, patch: CasePatch) {
        apply_patch!(
            self, patch;
            title, description, case_number, case_type, status, priority, client_id, assigned_to;
            optional: due_date
        );
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaseFilter {
    pub search: String,
    pub status: Vec<CaseStatus>,
    #[serde(rename = "type")]
    pub case_type: Vec<CaseType>,
    pub priority: Vec<CasePriority>,
    pub client_id: Option<Uuid>,
    pub date_range: DateRange,
}

impl RecordFilter<LegalCase> for CaseFilter {
    fn matches(&self, case: &LegalCase) -> bool {
        text_matches(&self.search, &[&case.title, &case.description, &case.case_number])
            && selected(&self.status, &case.status)
            && selected(&self.case_type, &case.case_type)
            && selected(&self.priority, &case.priority)
            && related(self.client_id, Some(case.client_id))
            && self.date_range.contains(case.created_at)
    }
}

// --- VISÕES DE LEITURA ---

/// Linha da listagem: o processo com o nome do cliente resolvido.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRow {
    #[serde(flatten)]
    pub case: LegalCase,
    pub client_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetail {
    #[serde(flatten)]
    pub case: LegalCase,
    pub client_name: String,
    pub documents: Vec<Document>,
    pub events: Vec<Event>,
    pub time_entries: Vec<TimeEntryRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn case(title: &str, status: CaseStatus, priority: CasePriority, client_id: Uuid) -> LegalCase {
        let at = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        LegalCase {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            title: title.into(),
            description: "Breach of contract dispute".into(),
            case_number: format!("CV-{title}"),
            case_type: CaseType::Civil,
            status,
            priority,
            client_id,
            assigned_to: vec![],
            due_date: None,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn combines_priority_and_client() {
        let acme = Uuid::new_v4();
        let list = vec![
            case("A", CaseStatus::Open, CasePriority::High, acme),
            case("B", CaseStatus::Open, CasePriority::Low, acme),
            case("C", CaseStatus::Closed, CasePriority::High, Uuid::new_v4()),
        ];

        let filter = CaseFilter {
            priority: vec![CasePriority::High],
            client_id: Some(acme),
            ..Default::default()
        };
        let titles: Vec<_> = filter.apply(&list).into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["A"]);
    }

    #[test]
    fn search_covers_case_number() {
        let list = vec![case("Smith", CaseStatus::Open, CasePriority::High, Uuid::new_v4())];
        let filter = CaseFilter { search: "cv-smi".into(), ..Default::default() };
        assert_eq!(filter.apply(&list).len(), 1);
    }

    #[test]
    fn patch_keeps_unspecified_fields() {
        let mut c = case("Smith", CaseStatus::Open, CasePriority::High, Uuid::new_v4());
        let due = NaiveDate::from_ymd_opt(2024, 6, 15);
        c.merge(CasePatch {
            status: Some(CaseStatus::Appeal),
            due_date: due,
            ..Default::default()
        });
        assert_eq!(c.status, CaseStatus::Appeal);
        assert_eq!(c.priority, CasePriority::High);
        assert_eq!(c.due_date, due);
        assert_eq!(c.title, "Smith");
    }

    #[test]
    fn new_case_requires_text_fields() {
        let draft: NewCase = serde_json::from_value(serde_json::json!({
            "title": "",
            "description": "",
            "caseNumber": "CV-1",
            "type": "civil",
            "status": "open",
            "priority": "low",
            "clientId": Uuid::new_v4()
        }))
        .unwrap();
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("description"));
    }
}
