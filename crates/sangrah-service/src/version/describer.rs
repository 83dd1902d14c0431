//! Human-readable summaries of a change list.

use serde_json::Value;

use sangrah_entity::version::{FieldChange, TrackedField};

/// Summary used when nothing tracked changed.
pub const NO_CHANGES: &str = "Minor updates";

/// How many phrases are spelled out before the rest are counted.
const MAX_LISTED: usize = 3;

/// Summarize a change list in one line.
pub fn describe_changes(changes: &[FieldChange]) -> String {
    if changes.is_empty() {
        return NO_CHANGES.to_string();
    }

    let mut summary = changes
        .iter()
        .take(MAX_LISTED)
        .map(phrase)
        .collect::<Vec<_>>()
        .join(", ");

    if changes.len() > MAX_LISTED {
        summary.push_str(&format!(" and {} more changes", changes.len() - MAX_LISTED));
    }
    summary
}

fn phrase(change: &FieldChange) -> String {
    match change.field {
        TrackedField::Description => "Description updated".to_string(),
        TrackedField::Metadata => "Metadata modified".to_string(),
        TrackedField::Tags => "Tags updated".to_string(),
        TrackedField::Compliance => "Compliance settings updated".to_string(),
        TrackedField::Status => format!(
            "Status changed from {} to {}",
            display_value(&change.old_value),
            display_value(&change.new_value)
        ),
        other => format!("{other} updated"),
    }
}

/// Strings print bare, empty values print as `none`.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "none".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
