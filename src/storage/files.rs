//! Project files on disk: JSON, or Automerge binary chosen by extension.

use std::fs;
use std::path::Path;

use tracing::info;

use super::document::{load_project_doc, save_project_doc};
use crate::error::FlowResult;
use crate::project::Project;

/// On-disk encoding of a project file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    /// Pretty-printed JSON (`.json` and anything unrecognized).
    Json,
    /// Automerge binary document (`.automerge`, `.am`).
    Automerge,
}

impl ProjectFormat {
    /// Picks the format from the path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("automerge") | Some("am") => Self::Automerge,
            _ => Self::Json,
        }
    }

    /// Canonical file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Automerge => "automerge",
        }
    }
}

/// Writes `bytes` to `path`, creating parent directories first.
pub(crate) fn write_creating_dirs(path: &Path, bytes: &[u8]) -> FlowResult<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// Saves a project as pretty-printed JSON.
pub fn save_project_json(project: &Project, path: impl AsRef<Path>) -> FlowResult<()> {
    let path = path.as_ref();
    let data = serde_json::to_vec_pretty(project)?;
    write_creating_dirs(path, &data)?;
    info!(path = %path.display(), bytes = data.len(), "saved project json");
    Ok(())
}

/// Loads a project from a JSON file.
pub fn load_project_json(path: impl AsRef<Path>) -> FlowResult<Project> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let project: Project = serde_json::from_slice(&data)?;
    info!(path = %path.display(), panels = project.panels.len(), "loaded project json");
    Ok(project)
}

/// Saves a project in the format implied by the path's extension.
pub fn save_project(project: &Project, path: impl AsRef<Path>) -> FlowResult<()> {
    let path = path.as_ref();
    match ProjectFormat::from_path(path) {
        ProjectFormat::Json => save_project_json(project, path),
        ProjectFormat::Automerge => save_project_doc(project, path),
    }
}

/// Loads a project in the format implied by the path's extension.
pub fn load_project(path: impl AsRef<Path>) -> FlowResult<Project> {
    let path = path.as_ref();
    match ProjectFormat::from_path(path) {
        ProjectFormat::Json => load_project_json(path),
        ProjectFormat::Automerge => load_project_doc(path),
    }
}
