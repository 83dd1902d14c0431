//! Snapshot capture from a live document.

use sangrah_core::traits::reference::StableId;
use sangrah_entity::document::Document;
use sangrah_entity::version::VersionSnapshot;

/// Capture the versioned fields of `document`.
///
/// The snapshot owns every value it holds, so later edits to the live
/// document never reach it. References are stored as their stable
/// identifier and files as references only.
pub fn build_snapshot(document: &Document) -> VersionSnapshot {
    VersionSnapshot {
        description: document.description.clone(),
        metadata: document.metadata.clone(),
        tags: document.tags.clone(),
        compliance: document.compliance.clone(),
        files: document.files.clone(),
        signature: document.signature.clone(),
        project: stable(document.project.as_ref()),
        department: stable(document.department.as_ref()),
        project_manager: stable(document.project_manager.as_ref()),
        document_donor: stable(document.document_donor.as_ref()),
        document_vendor: stable(document.document_vendor.as_ref()),
        status: document.status,
        link: document.link.clone(),
        comment: document.comment.clone(),
        document_date: document.document_date,
        created_at: document.created_at,
    }
}

fn stable<R: StableId>(reference: Option<&R>) -> Option<String> {
    reference.map(StableId::stable_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sangrah_core::types::id::{FileId, ProjectId};
    use sangrah_entity::document::{CreateDocument, FileRef};
    use sangrah_entity::version::TrackedState;

    fn document() -> Document {
        CreateDocument {
            title: "Site survey".to_string(),
            tags: vec!["field".to_string()],
            project: Some(ProjectId::new()),
            files: vec![FileRef::new(FileId::new(), "survey.pdf")],
            ..CreateDocument::default()
        }
        .into_document(Utc::now())
    }

    #[test]
    fn test_snapshot_is_independent_of_source() {
        let mut doc = document();
        let snapshot = build_snapshot(&doc);

        doc.tags.push("edited".to_string());
        doc.metadata.insert("k".to_string(), "v".to_string());
        doc.files.clear();

        assert_eq!(snapshot.tags, vec!["field".to_string()]);
        assert!(snapshot.metadata.is_empty());
        assert_eq!(snapshot.files.len(), 1);
    }

    #[test]
    fn test_references_are_stable_ids() {
        let doc = document();
        let snapshot = build_snapshot(&doc);
        let project = doc.project.map(|p| p.to_string());
        assert_eq!(snapshot.project, project);
        assert_eq!(snapshot.department, None);
    }

    #[test]
    fn test_snapshot_tracks_same_state_as_document() {
        let doc = document();
        assert_eq!(
            TrackedState::from_snapshot(&build_snapshot(&doc)),
            TrackedState::capture(&doc)
        );
    }
}
