//! Field-by-field change detection between two tracked states.

use sangrah_entity::version::{FieldChange, TrackedField, TrackedState};

/// Compare two tracked states.
///
/// Returns one entry per differing field, in the fixed tracked-field order.
/// With no `old` state every non-empty field of `new` is reported against
/// an empty baseline. Never fails.
pub fn detect_changes(old: Option<&TrackedState>, new: &TrackedState) -> Vec<FieldChange> {
    let baseline = TrackedState::empty();
    let old = old.unwrap_or(&baseline);

    TrackedField::ALL
        .into_iter()
        .filter_map(|field| {
            let before = old.get(field);
            let after = new.get(field);
            (before != after).then(|| FieldChange {
                field,
                old_value: before.clone(),
                new_value: after.clone(),
            })
        })
        .collect()
}
