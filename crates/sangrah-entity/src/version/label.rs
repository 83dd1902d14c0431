//! Cosmetic dotted version labels.
//!
//! A label like `"2.3"` is an optional annotation chosen at edit time. It is
//! derived only from the previous label and never from, or into, the
//! integer version number.

use serde::{Deserialize, Serialize};

/// How significant an edit is, for labelling purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Bumps the major part and resets the minor part.
    Major,
    /// Bumps the minor part.
    Minor,
}

/// Compute the label following `previous`.
///
/// With no previous label, or one that is not `major.minor`, numbering
/// starts again at `"1.0"`.
pub fn next_label(previous: Option<&str>, change: ChangeType) -> String {
    let Some((major, minor)) = previous.and_then(parse) else {
        return "1.0".to_string();
    };

    match change {
        ChangeType::Major => format!("{}.0", major + 1),
        ChangeType::Minor => format!("{major}.{}", minor + 1),
    }
}

fn parse(label: &str) -> Option<(u32, u32)> {
    let (major, minor) = label.trim().split_once('.')?;
    Some((major.parse().ok()?, minor.parse().ok()?))
}
