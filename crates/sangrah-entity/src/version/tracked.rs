//! Tracked fields and their canonical form.
//!
//! Change detection works on a [`TrackedState`]: the fixed allow-list of
//! document fields, each reduced to a canonical JSON value. References are
//! reduced to their stable identifier, unset object members are dropped, and
//! empty values (`null`, `""`, `[]`, `{}`) all collapse to `null` so that an
//! absent field and an empty one compare equal.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sangrah_core::traits::reference::StableId;

use crate::document::Document;

use super::snapshot::VersionSnapshot;

/// A document field subject to change detection.
///
/// Declaration order is the order changes are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackedField {
    Description,
    Metadata,
    Tags,
    Compliance,
    Status,
    Project,
    Department,
    ProjectManager,
    DocumentDonor,
    DocumentVendor,
    Link,
    Comment,
    DocumentDate,
}

impl TrackedField {
    /// The fixed allow-list, in reporting order.
    pub const ALL: [Self; 13] = [
        Self::Description,
        Self::Metadata,
        Self::Tags,
        Self::Compliance,
        Self::Status,
        Self::Project,
        Self::Department,
        Self::ProjectManager,
        Self::DocumentDonor,
        Self::DocumentVendor,
        Self::Link,
        Self::Comment,
        Self::DocumentDate,
    ];

    /// The field name as it appears on the wire and in snapshots.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Description => "description",
            Self::Metadata => "metadata",
            Self::Tags => "tags",
            Self::Compliance => "compliance",
            Self::Status => "status",
            Self::Project => "project",
            Self::Department => "department",
            Self::ProjectManager => "projectManager",
            Self::DocumentDonor => "documentDonor",
            Self::DocumentVendor => "documentVendor",
            Self::Link => "link",
            Self::Comment => "comment",
            Self::DocumentDate => "documentDate",
        }
    }

    /// Look a field up by its wire name. Names outside the allow-list return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for TrackedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One differing field between two tracked states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    /// Which field changed.
    pub field: TrackedField,
    /// Canonical value before the change (`null` when empty).
    pub old_value: Value,
    /// Canonical value after the change (`null` when empty).
    pub new_value: Value,
}

/// The canonical values of every tracked field at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackedState(BTreeMap<TrackedField, Value>);

impl TrackedState {
    /// The implicit baseline used before a document's first version.
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    /// Capture the tracked fields of a live document.
    pub fn capture(document: &Document) -> Self {
        let mut state = Self::empty();
        state.put(TrackedField::Description, to_canonical(&document.description));
        state.put(TrackedField::Metadata, to_canonical(&document.metadata));
        state.put(TrackedField::Tags, to_canonical(&document.tags));
        state.put(TrackedField::Compliance, to_canonical(&document.compliance));
        state.put(TrackedField::Status, to_canonical(&document.status));
        state.put(TrackedField::Project, reference(document.project.as_ref()));
        state.put(TrackedField::Department, reference(document.department.as_ref()));
        state.put(
            TrackedField::ProjectManager,
            reference(document.project_manager.as_ref()),
        );
        state.put(
            TrackedField::DocumentDonor,
            reference(document.document_donor.as_ref()),
        );
        state.put(
            TrackedField::DocumentVendor,
            reference(document.document_vendor.as_ref()),
        );
        state.put(TrackedField::Link, to_canonical(&document.link));
        state.put(TrackedField::Comment, to_canonical(&document.comment));
        state.put(TrackedField::DocumentDate, to_canonical(&document.document_date));
        state
    }

    /// Rebuild the tracked state recorded in a snapshot.
    pub fn from_snapshot(snapshot: &VersionSnapshot) -> Self {
        let mut state = Self::empty();
        state.put(TrackedField::Description, to_canonical(&snapshot.description));
        state.put(TrackedField::Metadata, to_canonical(&snapshot.metadata));
        state.put(TrackedField::Tags, to_canonical(&snapshot.tags));
        state.put(TrackedField::Compliance, to_canonical(&snapshot.compliance));
        state.put(TrackedField::Status, to_canonical(&snapshot.status));
        state.put(TrackedField::Project, reference(snapshot.project.as_ref()));
        state.put(TrackedField::Department, reference(snapshot.department.as_ref()));
        state.put(
            TrackedField::ProjectManager,
            reference(snapshot.project_manager.as_ref()),
        );
        state.put(
            TrackedField::DocumentDonor,
            reference(snapshot.document_donor.as_ref()),
        );
        state.put(
            TrackedField::DocumentVendor,
            reference(snapshot.document_vendor.as_ref()),
        );
        state.put(TrackedField::Link, to_canonical(&snapshot.link));
        state.put(TrackedField::Comment, to_canonical(&snapshot.comment));
        state.put(TrackedField::DocumentDate, to_canonical(&snapshot.document_date));
        state
    }

    /// Build a state from an arbitrary field map, such as a JSON object
    /// posted by a caller. Keys outside the allow-list are ignored.
    pub fn from_fields<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut state = Self::empty();
        for (name, value) in fields {
            if let Some(field) = TrackedField::from_name(name) {
                state.put(field, canonicalize(value.clone()));
            }
        }
        state
    }

    /// The canonical value of a field; `null` when the field is empty.
    pub fn get(&self, field: TrackedField) -> &Value {
        self.0.get(&field).unwrap_or(&Value::Null)
    }

    fn put(&mut self, field: TrackedField, value: Value) {
        if value.is_null() {
            self.0.remove(&field);
        } else {
            self.0.insert(field, value);
        }
    }
}

fn reference<R: StableId>(value: Option<&R>) -> Value {
    value.map_or(Value::Null, |r| Value::String(r.stable_id()))
}

fn to_canonical<T: Serialize>(value: &T) -> Value {
    // Every tracked type serializes infallibly; a failure degrades to "empty".
    serde_json::to_value(value).map_or(Value::Null, canonicalize)
}

/// Reduce a value to its canonical form.
///
/// Object members that are `null` are dropped at every depth. At the top
/// level, an empty string, array or object becomes `null`.
pub fn canonicalize(value: Value) -> Value {
    match strip_nulls(value) {
        Value::String(s) if s.is_empty() => Value::Null,
        Value::Array(items) if items.is_empty() => Value::Null,
        Value::Object(map) if map.is_empty() => Value::Null,
        other => other,
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_nulls(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_names_round_trip() {
        for field in TrackedField::ALL {
            assert_eq!(TrackedField::from_name(field.as_str()), Some(field));
            let json = serde_json::to_value(field).expect("serialize");
            assert_eq!(json, Value::String(field.as_str().to_string()));
        }
        assert_eq!(TrackedField::from_name("files"), None);
    }

    #[test]
    fn test_canonicalize_collapses_empties() {
        assert_eq!(canonicalize(json!("")), Value::Null);
        assert_eq!(canonicalize(json!([])), Value::Null);
        assert_eq!(canonicalize(json!({ "remarks": null })), Value::Null);
        assert_eq!(canonicalize(json!({ "a": 1, "b": null })), json!({ "a": 1 }));
        assert_eq!(canonicalize(json!(["x", ""])), json!(["x", ""]));
    }

    #[test]
    fn test_from_fields_ignores_untracked_keys() {
        let raw = json!({ "comment": "hi", "files": ["f1"], "title": "ignored" });
        let map = raw.as_object().expect("object");
        let state = TrackedState::from_fields(map.iter().map(|(k, v)| (k.as_str(), v)));

        assert_eq!(state.get(TrackedField::Comment), &json!("hi"));
        for field in TrackedField::ALL {
            if field != TrackedField::Comment {
                assert_eq!(state.get(field), &Value::Null);
            }
        }
    }
}
