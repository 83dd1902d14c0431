//! Document entity model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use sangrah_core::types::id::{DepartmentId, DocumentId, DonorId, ProjectId, UserId, VendorId};

use super::compliance::Compliance;
use super::file_ref::{FileRef, Signature};
use super::status::DocumentStatus;

/// The live, mutable document record.
///
/// Only a subset of these fields is version-controlled; `title`, `owner_id`
/// and the timestamps are managed by the wider application and survive a
/// restore unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Display title.
    pub title: String,
    /// The user who uploaded the document.
    pub owner_id: Option<UserId>,
    /// Free-text description.
    pub description: Option<String>,
    /// Key-value metadata.
    #[sqlx(json)]
    pub metadata: BTreeMap<String, String>,
    /// Ordered tags.
    pub tags: Vec<String>,
    /// Compliance settings.
    #[sqlx(json)]
    pub compliance: Compliance,
    /// Workflow status.
    pub status: DocumentStatus,
    /// Owning project.
    pub project: Option<ProjectId>,
    /// Owning department.
    pub department: Option<DepartmentId>,
    /// Responsible project manager.
    pub project_manager: Option<UserId>,
    /// Donor the document was prepared for.
    pub document_donor: Option<DonorId>,
    /// Vendor the document concerns.
    pub document_vendor: Option<VendorId>,
    /// External link.
    pub link: Option<String>,
    /// Reviewer or uploader comment.
    pub comment: Option<String>,
    /// Business date of the document.
    pub document_date: Option<DateTime<Utc>>,
    /// Attached files, by reference.
    #[sqlx(json)]
    pub files: Vec<FileRef>,
    /// Applied signature.
    #[sqlx(json)]
    pub signature: Option<Signature>,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Apply a partial update. Returns `true` if anything was supplied.
    pub fn apply_patch(&mut self, patch: DocumentPatch) -> bool {
        let mut touched = false;

        macro_rules! set {
            ($field:ident) => {
                if let Some(value) = patch.$field {
                    self.$field = value;
                    touched = true;
                }
            };
        }

        set!(title);
        set!(description);
        set!(metadata);
        set!(tags);
        set!(compliance);
        set!(status);
        set!(project);
        set!(department);
        set!(project_manager);
        set!(document_donor);
        set!(document_vendor);
        set!(link);
        set!(comment);
        set!(document_date);
        set!(files);
        set!(signature);

        touched
    }
}

/// Data required to create a new document record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    /// Display title.
    pub title: String,
    /// The uploading user.
    #[serde(default)]
    pub owner_id: Option<UserId>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Key-value metadata.
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    /// Ordered tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Compliance settings.
    #[serde(default)]
    pub compliance: Compliance,
    /// Initial workflow status.
    #[serde(default)]
    pub status: DocumentStatus,
    /// Owning project.
    #[serde(default)]
    pub project: Option<ProjectId>,
    /// Owning department.
    #[serde(default)]
    pub department: Option<DepartmentId>,
    /// Responsible project manager.
    #[serde(default)]
    pub project_manager: Option<UserId>,
    /// Donor.
    #[serde(default)]
    pub document_donor: Option<DonorId>,
    /// Vendor.
    #[serde(default)]
    pub document_vendor: Option<VendorId>,
    /// External link.
    #[serde(default)]
    pub link: Option<String>,
    /// Comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Business date.
    #[serde(default)]
    pub document_date: Option<DateTime<Utc>>,
    /// Attached files.
    #[serde(default)]
    pub files: Vec<FileRef>,
    /// Signature.
    #[serde(default)]
    pub signature: Option<Signature>,
}

impl CreateDocument {
    /// Materialize the record with a fresh identifier.
    pub fn into_document(self, now: DateTime<Utc>) -> Document {
        Document {
            id: DocumentId::new(),
            title: self.title,
            owner_id: self.owner_id,
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
            created_at: now,
            updated_at: now,
        }
    }
}

/// A partial update to a document.
///
/// `None` leaves a field untouched. For nullable fields, `Some(None)`
/// (an explicit JSON `null`) clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub metadata: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub compliance: Option<Compliance>,
    #[serde(default)]
    pub status: Option<DocumentStatus>,
    #[serde(default, deserialize_with = "present")]
    pub project: Option<Option<ProjectId>>,
    #[serde(default, deserialize_with = "present")]
    pub department: Option<Option<DepartmentId>>,
    #[serde(default, deserialize_with = "present")]
    pub project_manager: Option<Option<UserId>>,
    #[serde(default, deserialize_with = "present")]
    pub document_donor: Option<Option<DonorId>>,
    #[serde(default, deserialize_with = "present")]
    pub document_vendor: Option<Option<VendorId>>,
    #[serde(default, deserialize_with = "present")]
    pub link: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub comment: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub document_date: Option<Option<DateTime<Utc>>>,
    #[serde(default)]
    pub files: Option<Vec<FileRef>>,
    #[serde(default, deserialize_with = "present")]
    pub signature: Option<Option<Signature>>,
}

/// A key that is present in the payload is `Some`, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
