//! References to uploaded files and signatures.
//!
//! Only identifiers travel with a document or a snapshot; file bytes live in
//! object storage outside this system.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sangrah_core::types::id::{FileId, UserId};

/// A reference to one uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    /// Identifier of the uploaded file.
    pub file_id: FileId,
    /// Name the file was uploaded under.
    pub original_name: String,
}

impl FileRef {
    /// Create a new file reference.
    pub fn new(file_id: FileId, original_name: impl Into<String>) -> Self {
        Self {
            file_id,
            original_name: original_name.into(),
        }
    }
}

/// A signature applied to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// The uploaded signature image.
    pub file_id: FileId,
    /// Who signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_by: Option<UserId>,
    /// When the signature was applied.
    pub signed_at: DateTime<Utc>,
}
