//! Automerge binary project documents.
//!
//! The project is reconciled into a fresh Automerge document with
//! autosurgeon and saved in Automerge's compact binary format; loading
//! hydrates it back into the same Rust structs.

use std::fs;
use std::path::Path;

use automerge::AutoCommit;
use autosurgeon::{hydrate, reconcile};
use tracing::info;

use super::files::write_creating_dirs;
use crate::error::FlowResult;
use crate::project::Project;

/// Encodes a project as an Automerge document.
pub fn project_to_doc_bytes(project: &Project) -> FlowResult<Vec<u8>> {
    let mut doc = AutoCommit::new();
    reconcile(&mut doc, project)?;
    Ok(doc.save())
}

/// Decodes a project from Automerge document bytes.
pub fn project_from_doc_bytes(bytes: &[u8]) -> FlowResult<Project> {
    let doc = AutoCommit::load(bytes)?;
    let project: Project = hydrate(&doc)?;
    Ok(project)
}

/// Saves a project as an Automerge document file.
pub fn save_project_doc(project: &Project, path: impl AsRef<Path>) -> FlowResult<()> {
    let path = path.as_ref();
    let bytes = project_to_doc_bytes(project)?;
    write_creating_dirs(path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "saved project document");
    Ok(())
}

/// Loads a project from an Automerge document file.
pub fn load_project_doc(path: impl AsRef<Path>) -> FlowResult<Project> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let project = project_from_doc_bytes(&bytes)?;
    info!(path = %path.display(), panels = project.panels.len(), "loaded project document");
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;
    use crate::project::{Character, Panel};

    #[test]
    fn test_doc_round_trip() {
        let mut project = Project::new("Doc");
        project.panels.push(
            Panel::new(6)
                .with_image_data("data:image/png;base64,AAAA")
                .with_duration(0.75)
                .with_character_ids(vec!["a".into()]),
        );
        project
            .characters
            .push(Character::new("Mara", "Lead").with_color_palette("#fff"));

        let bytes = project_to_doc_bytes(&project).unwrap();
        let loaded = project_from_doc_bytes(&bytes).unwrap();

        assert_eq!(loaded, project);
        assert_eq!(loaded.created_at, project.created_at);
        assert_eq!(loaded.panels[6].duration, 0.75);
    }

    #[test]
    fn test_doc_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boards").join("doc.automerge");
        let project = Project::new("File");

        save_project_doc(&project, &path).unwrap();
        assert_eq!(load_project_doc(&path).unwrap(), project);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = project_from_doc_bytes(b"definitely not automerge").unwrap_err();
        assert!(matches!(err, FlowError::Automerge(_)));
    }
}
