// src/models/clients.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::filter::{selected, text_matches, DateRange, RecordFilter},
    db::store::{apply_patch, record_accessors, Entity, RecordMeta},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientType {
    Individual,
    Business,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Active,
    Inactive,
    Potential,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(rename = "type")]
    pub client_type: ClientType,
    pub status: ClientStatus,
    pub referral_source: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(rename = "type")]
    pub client_type: ClientType,
    pub status: ClientStatus,
    #[serde(default)]
    pub referral_source: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientPatch {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type")]
    pub client_type: Option<ClientType>,
    pub status: Option<ClientStatus>,
    pub referral_source: Option<String>,
    pub notes: Option<String>,
}

impl Entity for Client {
    type Draft = NewClient;
    type Patch = ClientPatch;

    const LABEL: &'static str = "client";
    const TITLE: &'static str = "Client";

    record_accessors!(scoped);

    fn from_draft(meta: RecordMeta, draft: NewClient) -> Self {
        Self {
            id: meta.id,
            company_id: meta.company_id.unwrap_or_default(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            client_type: draft.client_type,
            status: draft.status,
            referral_source: draft.referral_source,
            notes: draft.notes,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    fn merge(&mut self, patch: ClientPatch) {
        apply_patch!(self, patch; name, email, phone, address, client_type, status, referral_source, notes);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientFilter {
    pub search: String,
    pub status: Vec<ClientStatus>,
    #[serde(rename = "type")]
    pub client_type: Vec<ClientType>,
    pub date_range: DateRange,
}

impl RecordFilter<Client> for ClientFilter {
    fn matches(&self, client: &Client) -> bool {
        text_matches(&self.search, &[&client.name, &client.email])
            && selected(&self.status, &client.status)
            && selected(&self.client_type, &client.client_type)
            && self.date_range.contains(client.created_at)
    }
}
