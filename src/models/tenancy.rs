// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        filter::{text_matches, RecordFilter},
        validation::optional_url,
    },
    db::store::{apply_patch, record_accessors, Entity, RecordMeta},
    models::auth::Role,
};

// --- ESCRITÓRIO (o tenant) ---

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub logo_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCompany {
    #[validate(length(min = 2, message = "Company name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: String,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub website: String,
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub logo_url: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyPatch {
    #[validate(length(min = 2, message = "Company name is required"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: Option<String>,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: Option<String>,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: Option<String>,
    #[validate(length(min = 1, message = "Zip code is required"))]
    pub zip_code: Option<String>,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: Option<String>,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "optional_url"))]
    pub website: Option<String>,
    #[validate(custom(function = "optional_url"))]
    pub logo_url: Option<String>,
}

impl Entity for Company {
    type Draft = NewCompany;
    type Patch = CompanyPatch;

    const LABEL: &'static str = "company";
    const TITLE: &'static str = "Company";
    const TENANT_SCOPED: bool = false;

    record_accessors!(global);

    fn from_draft(meta: RecordMeta, draft: NewCompany) -> Self {
        Self {
            id: meta.id,
            name: draft.name,
            address: draft.address,
            city: draft.city,
            state: draft.state,
            zip_code: draft.zip_code,
            phone: draft.phone,
            email: draft.email,
            website: draft.website,
            logo_url: draft.logo_url,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    fn merge(&mut self, patch: CompanyPatch) {
        apply_patch!(self, patch; name, address, city, state, zip_code, phone, email, website, logo_url);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyFilter {
    pub search: String,
    // Sigla do estado; vazio = todos
    pub state: String,
}

impl RecordFilter<Company> for CompanyFilter {
    fn matches(&self, company: &Company) -> bool {
        text_matches(
            &self.search,
            &[&company.name, &company.email, &company.phone, &company.city],
        ) && (self.state.is_empty() || company.state.eq_ignore_ascii_case(&self.state))
    }
}

// --- FUNCIONÁRIOS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub department: String,
    pub position: String,
    pub avatar: String,
    pub status: EmployeeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    // Só administradores do sistema escolhem outro escritório
    pub company_id: Option<Uuid>,
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    #[validate(custom(function = "optional_url"))]
    pub avatar: String,
    #[serde(default = "default_employee_status")]
    pub status: EmployeeStatus,
}

fn default_employee_status() -> EmployeeStatus {
    EmployeeStatus::Active
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
    pub role: Option<Role>,
    pub department: Option<String>,
    pub position: Option<String>,
    #[validate(custom(function = "optional_url"))]
    pub avatar: Option<String>,
    pub status: Option<EmployeeStatus>,
}

impl Entity for Employee {
    type Draft = NewEmployee;
    type Patch = EmployeePatch;

    const LABEL: &'static str = "employee";
    const TITLE: &'static str = "Employee";

    record_accessors!(scoped);

    fn from_draft(meta: RecordMeta, draft: NewEmployee) -> Self {
        Self {
            id: meta.id,
            company_id: meta.company_id.unwrap_or_default(),
            name: draft.name,
            email: draft.email,
            role: draft.role,
            department: draft.department,
            position: draft.position,
            avatar: draft.avatar,
            status: draft.status,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    fn merge(&mut self, patch: EmployeePatch) {
        apply_patch!(self, patch; name, email, role, department, position, avatar, status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn company(name: &str, city: &str, state: &str) -> Company {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Company {
            id: Uuid::new_v4(),
            name: name.into(),
            address: String::new(),
            city: city.into(),
            state: state.into(),
            zip_code: String::new(),
            phone: "(212) 555-1234".into(),
            email: format!("info@{}.com", name.to_lowercase().replace(' ', "")),
            website: String::new(),
            logo_url: String::new(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn filter_by_state_and_search() {
        let list = vec![
            company("Smith Law", "New York", "NY"),
            company("Johnson Legal", "Los Angeles", "CA"),
        ];

        let by_state = CompanyFilter { state: "ca".into(), ..Default::default() };
        assert_eq!(by_state.apply(&list).len(), 1);

        let by_city = CompanyFilter { search: "york".into(), ..Default::default() };
        assert_eq!(by_city.apply(&list)[0].name, "Smith Law");

        assert_eq!(CompanyFilter::default().apply(&list).len(), 2);
    }

    #[test]
    fn company_validation_accepts_empty_website() {
        let draft: NewCompany = serde_json::from_value(serde_json::json!({
            "name": "Johnson Legal Group",
            "address": "456 Attorney Blvd",
            "city": "Los Angeles",
            "state": "CA",
            "zipCode": "90001",
            "phone": "(310) 555-5678",
            "email": "contact@johnsonlegal.com",
            "website": ""
        }))
        .unwrap();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn company_validation_rejects_bad_email_and_logo() {
        let patch = CompanyPatch {
            email: Some("not-an-email".into()),
            logo_url: Some("logo".into()),
            ..Default::default()
        };
        let errors = patch.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("logo_url"));
    }
}
