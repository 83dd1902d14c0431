//! Request DTOs with validation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateUrl, ValidationError};

use sangrah_core::types::id::{DepartmentId, DonorId, ProjectId, UserId, VendorId};
use sangrah_entity::document::{
    Compliance, CreateDocument, DocumentPatch, DocumentStatus, FileRef, Signature,
};
use sangrah_entity::version::ChangeType;
use sangrah_service::version::EditOptions;

/// Create document request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    /// Display title.
    #[validate(length(min = 1, max = 255, message = "Title is required"))]
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub compliance: Compliance,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub project: Option<ProjectId>,
    #[serde(default)]
    pub department: Option<DepartmentId>,
    #[serde(default)]
    pub project_manager: Option<UserId>,
    #[serde(default)]
    pub document_donor: Option<DonorId>,
    #[serde(default)]
    pub document_vendor: Option<VendorId>,
    /// External link.
    #[serde(default)]
    #[validate(url)]
    pub link: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
    #[serde(default)]
    pub document_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub files: Vec<FileRef>,
    #[serde(default)]
    pub signature: Option<Signature>,
}

impl CreateDocumentRequest {
    /// Convert into the service input. The owner is the acting user.
    pub fn into_input(self) -> CreateDocument {
        CreateDocument {
            title: self.title,
            owner_id: None,
            description: self.description,
            metadata: self.metadata,
            tags: self.tags,
            compliance: self.compliance,
            status: self.status,
            project: self.project,
            department: self.department,
            project_manager: self.project_manager,
            document_donor: self.document_donor,
            document_vendor: self.document_vendor,
            link: self.link,
            comment: self.comment,
            document_date: self.document_date,
            files: self.files,
            signature: self.signature,
        }
    }
}

/// Partial update request body.
///
/// Document fields sit at the top level next to the versioning options.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentRequest {
    /// Fields to change.
    #[serde(flatten)]
    #[validate(custom(function = "validate_patch"))]
    pub patch: DocumentPatch,
    /// Bump the cosmetic version label.
    #[serde(default)]
    pub change_type: Option<ChangeType>,
    /// Override the generated change summary.
    #[serde(default)]
    #[validate(length(max = 500))]
    pub change_reason: Option<String>,
}

impl UpdateDocumentRequest {
    /// Split into the patch and the versioning options.
    pub fn into_parts(self) -> (DocumentPatch, EditOptions) {
        (
            self.patch,
            EditOptions {
                change_type: self.change_type,
                change_reason: self.change_reason,
            },
        )
    }
}

/// The limits `CreateDocumentRequest` enforces, applied to the fields a
/// patch sets. A `null` clears a field and is always accepted.
fn validate_patch(patch: &DocumentPatch) -> Result<(), ValidationError> {
    if let Some(title) = &patch.title {
        let len = title.chars().count();
        if len == 0 || len > 255 {
            return Err(invalid("length", "Title must be 1 to 255 characters"));
        }
    }
    if set(&patch.description).is_some_and(|d| d.chars().count() > 5000) {
        return Err(invalid("length", "Description is too long"));
    }
    if patch.tags.as_ref().is_some_and(|tags| tags.len() > 50) {
        return Err(invalid("length", "Too many tags"));
    }
    if set(&patch.link).is_some_and(|link| !link.validate_url()) {
        return Err(invalid("url", "Link must be a URL"));
    }
    if set(&patch.comment).is_some_and(|c| c.chars().count() > 2000) {
        return Err(invalid("length", "Comment is too long"));
    }
    Ok(())
}

/// The new value of a clearable field, when the patch sets one.
fn set(field: &Option<Option<String>>) -> Option<&String> {
    field.as_ref().and_then(Option::as_ref)
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Restore request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RestoreVersionRequest {
    /// Appended to the recorded change reason.
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Query parameters for comparing two versions.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompareParams {
    /// Base version number.
    #[validate(range(min = 1))]
    pub from: i32,
    /// Target version number.
    #[validate(range(min = 1))]
    pub to: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_flattens_patch() {
        let raw = serde_json::json!({
            "comment": null,
            "tags": ["a"],
            "changeType": "minor",
            "changeReason": "cleanup",
        });
        let request: UpdateDocumentRequest = serde_json::from_value(raw).unwrap();
        let (patch, options) = request.into_parts();

        assert_eq!(patch.comment, Some(None));
        assert_eq!(patch.tags, Some(vec!["a".to_string()]));
        assert_eq!(patch.description, None);
        assert_eq!(options.change_type, Some(ChangeType::Minor));
        assert_eq!(options.change_reason.as_deref(), Some("cleanup"));
    }

    #[test]
    fn test_create_request_validation() {
        let request: CreateDocumentRequest =
            serde_json::from_value(serde_json::json!({ "title": "" })).unwrap();
        assert!(request.validate().is_err());

        let request: CreateDocumentRequest = serde_json::from_value(
            serde_json::json!({ "title": "Audit", "link": "not a url" }),
        )
        .unwrap();
        assert!(request.validate().is_err());

        let request: CreateDocumentRequest = serde_json::from_value(
            serde_json::json!({ "title": "Audit", "link": "https://example.org/a" }),
        )
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_applies_create_limits() {
        let parse = |raw: serde_json::Value| -> UpdateDocumentRequest {
            serde_json::from_value(raw).unwrap()
        };

        assert!(parse(serde_json::json!({ "link": "not a url" })).validate().is_err());
        assert!(parse(serde_json::json!({ "comment": "x".repeat(2001) })).validate().is_err());
        assert!(parse(serde_json::json!({ "title": "" })).validate().is_err());
        let tags: Vec<String> = (0..51).map(|i| format!("t{i}")).collect();
        assert!(parse(serde_json::json!({ "tags": tags })).validate().is_err());

        assert!(parse(serde_json::json!({ "link": "https://example.org/a" })).validate().is_ok());
        assert!(parse(serde_json::json!({ "link": null, "comment": null })).validate().is_ok());
        assert!(parse(serde_json::json!({ "comment": "fine" })).validate().is_ok());
    }
}
