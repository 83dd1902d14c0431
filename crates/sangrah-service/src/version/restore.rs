//! Applying a historical snapshot onto a live document.

use std::fmt::Display;
use std::str::FromStr;

use sangrah_core::error::AppError;
use sangrah_core::result::AppResult;
use sangrah_entity::document::Document;
use sangrah_entity::version::{TrackedField, VersionSnapshot};

/// Overwrite the versioned fields of `document` with `snapshot`.
///
/// The tracked fields plus `files` and `signature` are replaced. Identity,
/// title, owner and timestamps are left alone. The document is not changed
/// at all if any reference in the snapshot fails to parse.
pub fn apply_snapshot(document: &mut Document, snapshot: &VersionSnapshot) -> AppResult<()> {
    let project = parse_reference(TrackedField::Project, snapshot.project.as_deref())?;
    let department = parse_reference(TrackedField::Department, snapshot.department.as_deref())?;
    let project_manager = parse_reference(
        TrackedField::ProjectManager,
        snapshot.project_manager.as_deref(),
    )?;
    let document_donor = parse_reference(
        TrackedField::DocumentDonor,
        snapshot.document_donor.as_deref(),
    )?;
    let document_vendor = parse_reference(
        TrackedField::DocumentVendor,
        snapshot.document_vendor.as_deref(),
    )?;

    document.description = snapshot.description.clone();
    document.metadata = snapshot.metadata.clone();
    document.tags = snapshot.tags.clone();
    document.compliance = snapshot.compliance.clone();
    document.status = snapshot.status;
    document.project = project;
    document.department = department;
    document.project_manager = project_manager;
    document.document_donor = document_donor;
    document.document_vendor = document_vendor;
    document.link = snapshot.link.clone();
    document.comment = snapshot.comment.clone();
    document.document_date = snapshot.document_date;
    document.files = snapshot.files.clone();
    document.signature = snapshot.signature.clone();
    Ok(())
}

fn parse_reference<T>(field: TrackedField, raw: Option<&str>) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|e| {
            AppError::validation(format!(
                "Snapshot field '{field}' holds an invalid reference '{value}': {e}"
            ))
        }),
    }
}
