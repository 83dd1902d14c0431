//! Point-in-time snapshot of a document's versioned fields.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sangrah_core::error::AppError;
use sangrah_core::result::AppResult;

use crate::document::{Compliance, DocumentStatus, FileRef, Signature};

/// An immutable copy of a document's versioned fields.
///
/// References (`project`, `department`, ...) are held as stable identifier
/// strings, never as typed handles, so a snapshot outlives the entities it
/// mentions. File content is never included, only [`FileRef`]s.
///
/// `status` and `createdAt` are required when decoding a stored payload;
/// every other field defaults to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSnapshot {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub compliance: Compliance,
    #[serde(default)]
    pub files: Vec<FileRef>,
    #[serde(default)]
    pub signature: Option<Signature>,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub project_manager: Option<String>,
    #[serde(default)]
    pub document_donor: Option<String>,
    #[serde(default)]
    pub document_vendor: Option<String>,
    pub status: DocumentStatus,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub document_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl VersionSnapshot {
    /// Serialize into the opaque payload stored with a version record.
    pub fn to_payload(&self) -> AppResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Decode a stored payload.
    ///
    /// A payload missing required fields, or holding values of the wrong
    /// shape, is reported as a validation error.
    pub fn from_payload(payload: &serde_json::Value) -> AppResult<Self> {
        Self::deserialize(payload)
            .map_err(|e| AppError::validation(format!("Malformed version snapshot: {e}")))
    }
}
