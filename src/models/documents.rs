// src/models/documents.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::filter::{related, selected, text_matches, DateRange, RecordFilter},
    db::store::{apply_patch, record_accessors, Entity, RecordMeta},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Pdf,
    Docx,
    Xlsx,
    Jpg,
    Png,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Draft,
    Final,
    Archived,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub file_type: FileType,
    // Em bytes
    pub file_size: u64,
    pub status: DocumentStatus,
    pub tags: Vec<String>,
    pub created_by: Uuid,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub download_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 5, message = "Description must be at least 5 characters"))]
    pub description: String,
    pub file_type: FileType,
    #[validate(range(min = 1, message = "File size must be greater than 0"))]
    pub file_size: u64,
    #[serde(default = "default_document_status")]
    pub status: DocumentStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    #[serde(default)]
    pub download_url: String,
}

fn default_document_status() -> DocumentStatus {
    DocumentStatus::Draft
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 5, message = "Description must be at least 5 characters"))]
    pub description: Option<String>,
    pub file_type: Option<FileType>,
    #[validate(range(min = 1, message = "File size must be greater than 0"))]
    pub file_size: Option<u64>,
    pub status: Option<DocumentStatus>,
    pub tags: Option<Vec<String>>,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub download_url: Option<String>,
}

impl Entity for Document {
    type Draft = NewDocument;
    type Patch = DocumentPatch;

    const LABEL: &'static str = "document";
    const TITLE: &'static str = "Document";

    record_accessors!(scoped);

    fn from_draft(meta: RecordMeta, draft: NewDocument) -> Self {
        // Sem arquivo de verdade; o link é um marcador
        let download_url = if draft.download_url.is_empty() {
            "#".to_string()
        } else {
            draft.download_url
        };

        Self {
            id: meta.id,
            company_id: meta.company_id.unwrap_or_default(),
            title: draft.title,
            description: draft.description,
            file_type: draft.file_type,
            file_size: draft.file_size,
            status: draft.status,
            tags: draft.tags,
            created_by: meta.user_id,
            case_id: draft.case_id,
            client_id: draft.client_id,
            download_url,
            created_at: meta.now,
            updated_at: meta.now,
        }
    }

    fn merge(&mut self, patch: DocumentPatch) {
        apply_patch!(
            self, patch;
            title, description, file_type, file_size, status, tags, download_url;
            optional: case_id, client_id
        );
    }
}

/// Em que o documento está pendurado.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentScope {
    #[default]
    All,
    Case,
    Client,
    // Nem processo nem cliente
    Other,
}

impl DocumentScope {
    fn includes(self, doc: &Document) -> bool {
        match self {
            DocumentScope::All => true,
            DocumentScope::Case => doc.case_id.is_some(),
            DocumentScope::Client => doc.client_id.is_some(),
            DocumentScope::Other => doc.case_id.is_none() && doc.client_id.is_none(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentFilter {
    pub search: String,
    pub file_type: Vec<FileType>,
    pub status: Vec<DocumentStatus>,
    pub scope: DocumentScope,
    pub case_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub date_range: DateRange,
}

impl RecordFilter<Document> for DocumentFilter {
    fn matches(&self, doc: &Document) -> bool {
        self.scope.includes(doc)
            && text_matches(&self.search, &[&doc.title, &doc.description])
            && selected(&self.file_type, &doc.file_type)
            && selected(&self.status, &doc.status)
            && related(self.case_id, doc.case_id)
            && related(self.client_id, doc.client_id)
            && self.date_range.contains(doc.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc(title: &str, case_id: Option<Uuid>, client_id: Option<Uuid>) -> Document {
        let at = Utc.with_ymd_and_hms(2024, 3, 12, 14, 30, 0).unwrap();
        Document {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            title: title.into(),
            description: "Summary of arguments".into(),
            file_type: FileType::Pdf,
            file_size: 1_450_000,
            status: DocumentStatus::Final,
            tags: vec![],
            created_by: Uuid::nil(),
            case_id,
            client_id,
            download_url: "#".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn scope_splits_documents_by_attachment() {
        let case = Uuid::new_v4();
        let client = Uuid::new_v4();
        let list = vec![
            doc("Brief", Some(case), None),
            doc("Contract", None, Some(client)),
            doc("Template", None, None),
        ];

        let titles = |scope: DocumentScope| -> Vec<String> {
            DocumentFilter { scope, ..Default::default() }
                .apply(&list)
                .into_iter()
                .map(|d| d.title)
                .collect()
        };

        assert_eq!(titles(DocumentScope::All).len(), 3);
        assert_eq!(titles(DocumentScope::Case), vec!["Brief"]);
        assert_eq!(titles(DocumentScope::Client), vec!["Contract"]);
        assert_eq!(titles(DocumentScope::Other), vec!["Template"]);
    }

    #[test]
    fn file_type_filter_and_search() {
        let mut xlsx = doc("Financial Records", None, None);
        xlsx.file_type = FileType::Xlsx;
        let list = vec![doc("Case Brief", None, None), xlsx];

        let filter = DocumentFilter {
            file_type: vec![FileType::Xlsx],
            search: "records".into(),
            ..Default::default()
        };
        assert_eq!(filter.apply(&list).len(), 1);
    }

    #[test]
    fn creation_rules() {
        let draft: NewDocument = serde_json::from_value(serde_json::json!({
            "title": "Ok",
            "description": "tiny",
            "fileType": "pdf",
            "fileSize": 0
        }))
        .unwrap();
        let errors = draft.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("file_size"));
        assert_eq!(draft.status, DocumentStatus::Draft);
    }
}
