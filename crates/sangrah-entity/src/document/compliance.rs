//! Compliance sub-object attached to a document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Regulatory compliance settings of a document.
///
/// Unset members are omitted when serialized, so the default value
/// serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Compliance {
    /// Whether the document has been marked compliant.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_compliant: bool,
    /// When the compliance sign-off lapses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    /// Reviewer remarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}
