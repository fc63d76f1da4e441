//! JSON command boundary for a presentation layer.
//!
//! `StoryboardCommands` exposes one method per UI action. Results that carry
//! data are returned as JSON strings using the model's field keys, so a
//! webview or IPC binding can forward them untouched. Saving and loading go
//! through `storage` without holding the manager's lock during I/O.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::error::{FlowError, FlowResult};
use crate::project::{PanelUpdate, ProjectManager};
use crate::storage;

/// Logs a failed command before handing the error back to the caller.
macro_rules! logged {
    ($command:literal, $expr:expr) => {
        $expr.inspect_err(|e: &FlowError| warn!(command = $command, error = %e, "command failed"))
    };
}

fn to_json<T: Serialize>(value: &T) -> FlowResult<String> {
    Ok(serde_json::to_string(value)?)
}

/// UI-facing handlers over a shared `ProjectManager`.
///
/// Cheap to clone; every clone drives the same manager.
#[derive(Debug, Clone)]
pub struct StoryboardCommands {
    manager: Arc<ProjectManager>,
}

impl StoryboardCommands {
    /// Wraps a shared manager.
    pub fn new(manager: Arc<ProjectManager>) -> Self {
        Self { manager }
    }

    /// The manager these commands drive.
    pub fn manager(&self) -> &Arc<ProjectManager> {
        &self.manager
    }

    // =========================================================================
    // PROJECT
    // =========================================================================

    /// Starts a new project, discarding the current one.
    pub fn create_new_project(&self, name: &str) -> FlowResult<()> {
        self.manager.new_project(name);
        Ok(())
    }

    /// Renames the current project.
    pub fn rename_project(&self, name: &str) -> FlowResult<()> {
        logged!("rename_project", self.manager.rename_project(name))
    }

    /// Returns the whole current project as JSON.
    pub fn get_project(&self) -> FlowResult<String> {
        let project = self.manager.project().ok_or(FlowError::NoActiveProject);
        logged!("get_project", project.and_then(|p| to_json(&p)))
    }

    /// Saves the current project and returns a status message.
    ///
    /// Uses the recorded path, or `<projects_dir>/<name>.json` for a project
    /// that was never saved.
    pub fn save_project(&self) -> FlowResult<String> {
        logged!("save_project", self.save_current())
    }

    fn save_current(&self) -> FlowResult<String> {
        let snapshot = self.manager.save_snapshot()?;
        let path = snapshot.path.unwrap_or_else(|| {
            self.manager
                .config()
                .default_project_path(&snapshot.project.name)
        });

        storage::save_project(&snapshot.project, &path)?;
        self.manager.mark_saved(snapshot.revision, &path);

        Ok(format!("Project saved to {}", path.display()))
    }

    /// Loads a project file, installs it, and returns `{"name", "panels"}`.
    pub fn load_project(&self, path: impl AsRef<Path>) -> FlowResult<String> {
        let path = path.as_ref();
        let project = logged!("load_project", storage::load_project(path))?;

        let summary = json!({
            "name": project.name,
            "panels": project.panels.len(),
        });
        self.manager.set_project(project, Some(path.to_path_buf()));
        to_json(&summary)
    }

    /// Writes an HTML print sheet and returns its path.
    pub fn save_export_html(&self, filename: &str, content: &str) -> FlowResult<String> {
        let assets_dir = &self.manager.config().assets_dir;
        let path = logged!(
            "save_export_html",
            storage::save_export_html(assets_dir, filename, content)
        )?;
        Ok(path.display().to_string())
    }

    // =========================================================================
    // PANELS
    // =========================================================================

    /// Appends a panel and returns it as JSON.
    pub fn create_panel(&self) -> FlowResult<String> {
        let panel = logged!("create_panel", self.manager.add_panel())?;
        to_json(&panel)
    }

    /// Duplicates a panel and returns the copy as JSON.
    pub fn duplicate_panel(&self, id: &str) -> FlowResult<String> {
        let panel = logged!("duplicate_panel", self.manager.duplicate_panel(id))?;
        to_json(&panel)
    }

    /// Returns all panels, in order, as a JSON array.
    pub fn get_panels(&self) -> FlowResult<String> {
        to_json(&self.manager.panels())
    }

    /// Sets one panel field from an untyped field name and JSON value.
    pub fn update_panel(&self, id: &str, field: &str, value: Value) -> FlowResult<()> {
        logged!(
            "update_panel",
            PanelUpdate::from_field(field, value)
                .and_then(|update| self.manager.update_panel(id, update))
        )
    }

    /// Removes a panel.
    pub fn delete_panel(&self, id: &str) -> FlowResult<()> {
        logged!("delete_panel", self.manager.delete_panel(id))
    }

    /// Moves a panel. Negative indices are rejected like any other
    /// out-of-range index.
    pub fn reorder_panel(&self, id: &str, new_index: i64) -> FlowResult<()> {
        let result = usize::try_from(new_index)
            .map_err(|_| FlowError::invalid_index(new_index, self.manager.panel_count()))
            .and_then(|index| self.manager.reorder_panel(id, index));
        logged!("reorder_panel", result)
    }

    // =========================================================================
    // CHARACTERS
    // =========================================================================

    /// Adds a character and returns it as JSON.
    ///
    /// A non-empty `image_data` data URL is written to the assets directory
    /// first and the character records the resulting path.
    pub fn add_character(
        &self,
        name: &str,
        description: &str,
        image_data: &str,
    ) -> FlowResult<String> {
        logged!(
            "add_character",
            self.add_character_inner(name, description, image_data)
        )
    }

    fn add_character_inner(
        &self,
        name: &str,
        description: &str,
        image_data: &str,
    ) -> FlowResult<String> {
        if !self.manager.has_project() {
            return Err(FlowError::NoActiveProject);
        }

        let image_path = if image_data.is_empty() {
            None
        } else {
            let assets_dir = &self.manager.config().assets_dir;
            Some(storage::save_character_image(image_data, "char", assets_dir)?)
        };

        let character = self.manager.add_character(name, description, image_path)?;
        to_json(&character)
    }

    /// Returns all characters as a JSON array.
    pub fn get_characters(&self) -> FlowResult<String> {
        to_json(&self.manager.characters())
    }

    /// Removes a character.
    pub fn delete_character(&self, id: &str) -> FlowResult<()> {
        logged!("delete_character", self.manager.delete_character(id))
    }
}
