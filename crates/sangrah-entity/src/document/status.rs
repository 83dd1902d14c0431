//! Document workflow status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approval workflow status of a document.
///
/// Serialized with the variant name exactly (`"Draft"`, `"UnderReview"`),
/// which is also the form recorded in version snapshots and change lists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "document_status")]
pub enum DocumentStatus {
    /// Uploaded but not yet submitted.
    #[default]
    Draft,
    /// Submitted and waiting for a reviewer.
    Pending,
    /// A reviewer is working on it.
    UnderReview,
    /// Approved by the responsible reviewer.
    Approved,
    /// Rejected by the responsible reviewer.
    Rejected,
    /// Retired from active use.
    Archived,
}

impl DocumentStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 6] = [
        Self::Draft,
        Self::Pending,
        Self::UnderReview,
        Self::Approved,
        Self::Rejected,
        Self::Archived,
    ];

    /// Return the status as its canonical string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::UnderReview => "UnderReview",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = sangrah_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.replace([' ', '_', '-'], "").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == wanted)
            .ok_or_else(|| {
                sangrah_core::AppError::validation(format!(
                    "Invalid document status: '{s}'. Expected one of: Draft, Pending, \
                     UnderReview, Approved, Rejected, Archived"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_form_matches_as_str() {
        for status in DocumentStatus::ALL {
            let json = serde_json::to_value(status).expect("serialize");
            assert_eq!(json, serde_json::Value::String(status.as_str().to_string()));
        }
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!(
            "under review".parse::<DocumentStatus>().expect("parse"),
            DocumentStatus::UnderReview
        );
        assert_eq!(
            "APPROVED".parse::<DocumentStatus>().expect("parse"),
            DocumentStatus::Approved
        );
        assert!("shredded".parse::<DocumentStatus>().is_err());
    }
}
