//! ProjectManager: the lock-guarded owner of the current storyboard project.
//!
//! All state lives in one `Slot` behind a single `RwLock`:
//! - Mutations take the write lock for the whole locate-mutate-renumber-touch
//!   sequence, so no reader ever sees a half-applied change
//! - Reads take the read lock and hand back owned clones
//! - `panel_setters!` generates one typed setter per mutable panel field

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use paste::paste;
use tracing::{debug, info};

use super::model::{Character, Panel, Project};
use super::update::PanelUpdate;
use crate::config::StoryboardConfig;
use crate::error::{FlowError, FlowResult};

// =============================================================================
// PANEL SETTER MACRO
// =============================================================================

/// Generates `set_panel_<field>` methods that delegate to `update_panel`.
macro_rules! panel_setters {
    ($($field:ident => $variant:ident($ty:ty)),* $(,)?) => {
        paste! {
            $(
                #[doc = concat!("Sets the `", stringify!($field), "` field of a panel.")]
                pub fn [<set_panel_ $field>](&self, id: &str, value: $ty) -> FlowResult<()> {
                    self.update_panel(id, PanelUpdate::$variant(value.into()))
                }
            )*
        }
    };
}

// =============================================================================
// STATE SLOT
// =============================================================================

#[derive(Debug, Default)]
struct Slot {
    project: Option<Project>,
    path: Option<PathBuf>,
    dirty: bool,
    /// Bumped by every committed mutation or replacement.
    revision: u64,
}

impl Slot {
    fn project_mut(&mut self) -> FlowResult<&mut Project> {
        self.project.as_mut().ok_or(FlowError::NoActiveProject)
    }

    /// Records a committed change to the current project.
    fn commit(&mut self) {
        if let Some(project) = self.project.as_mut() {
            project.touch();
        }
        self.dirty = true;
        self.revision += 1;
    }
}

/// A consistent copy of everything a save needs, taken under one read lock.
#[derive(Debug, Clone)]
pub struct SaveSnapshot {
    pub project: Project,
    pub path: Option<PathBuf>,
    pub revision: u64,
}

// =============================================================================
// PROJECT MANAGER
// =============================================================================

/// Thread-safe manager for the single "current" storyboard project.
///
/// Share it between callers with `Arc<ProjectManager>`; every method takes
/// `&self`. Values returned to callers are independent clones.
#[derive(Debug, Default)]
pub struct ProjectManager {
    config: StoryboardConfig,
    slot: RwLock<Slot>,
}

impl ProjectManager {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Creates an empty manager (no project loaded) with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty manager that builds new projects from `config`.
    pub fn with_config(config: StoryboardConfig) -> Self {
        Self {
            config,
            slot: RwLock::new(Slot::default()),
        }
    }

    /// Settings used for new projects.
    pub fn config(&self) -> &StoryboardConfig {
        &self.config
    }

    /// Runs `f` against the current project under the write lock and commits
    /// if it succeeds. `f` must locate before it mutates: an `Err` means
    /// nothing changed.
    fn update_project<T, F>(&self, f: F) -> FlowResult<T>
    where
        F: FnOnce(&mut Project) -> FlowResult<T>,
    {
        let mut slot = self.slot.write();
        let value = f(slot.project_mut()?)?;
        slot.commit();
        Ok(value)
    }

    // =========================================================================
    // PROJECT LIFECYCLE
    // =========================================================================

    /// Replaces the current project with a fresh one and clears the path.
    pub fn new_project(&self, name: &str) {
        let project = Project::with_config(name, &self.config);
        let mut slot = self.slot.write();
        slot.project = Some(project);
        slot.path = None;
        slot.dirty = true;
        slot.revision += 1;
        info!(name, "created new project");
    }

    /// Installs a loaded project wholesale. The project is trusted as-is.
    pub fn set_project(&self, project: Project, path: Option<PathBuf>) {
        let mut slot = self.slot.write();
        info!(name = %project.name, panels = project.panels.len(), "project installed");
        slot.project = Some(project);
        slot.path = path;
        slot.dirty = false;
        slot.revision += 1;
    }

    /// Renames the current project.
    pub fn rename_project(&self, name: &str) -> FlowResult<()> {
        self.update_project(|project| {
            project.name = name.to_string();
            Ok(())
        })?;
        debug!(name, "project renamed");
        Ok(())
    }

    /// Returns a copy of the current project.
    pub fn project(&self) -> Option<Project> {
        self.slot.read().project.clone()
    }

    /// True if a project is loaded.
    pub fn has_project(&self) -> bool {
        self.slot.read().project.is_some()
    }

    // =========================================================================
    // DIRTY TRACKING AND PATH HINT
    // =========================================================================

    /// True if the project changed since it was created, loaded or saved.
    pub fn is_dirty(&self) -> bool {
        self.slot.read().dirty
    }

    /// Count of committed changes since the manager was created.
    pub fn revision(&self) -> u64 {
        self.slot.read().revision
    }

    /// Clears the dirty flag without touching data.
    pub fn mark_clean(&self) {
        self.slot.write().dirty = false;
    }

    /// Where the project was last loaded from or saved to.
    pub fn project_path(&self) -> Option<PathBuf> {
        self.slot.read().path.clone()
    }

    /// Sets the path hint. Does not affect the dirty flag.
    pub fn set_project_path(&self, path: impl Into<PathBuf>) {
        self.slot.write().path = Some(path.into());
    }

    /// Copies the project, path hint and revision in one read.
    pub fn save_snapshot(&self) -> FlowResult<SaveSnapshot> {
        let slot = self.slot.read();
        let project = slot.project.clone().ok_or(FlowError::NoActiveProject)?;
        Ok(SaveSnapshot {
            project,
            path: slot.path.clone(),
            revision: slot.revision,
        })
    }

    /// Records a finished save of the snapshot taken at `revision`.
    ///
    /// Sets the path hint and clears the dirty flag only if nothing changed
    /// since the snapshot; returns whether it did.
    pub fn mark_saved(&self, revision: u64, path: &Path) -> bool {
        let mut slot = self.slot.write();
        if slot.revision != revision {
            debug!(
                saved = revision,
                current = slot.revision,
                "project changed during save; staying dirty"
            );
            return false;
        }
        slot.path = Some(path.to_path_buf());
        slot.dirty = false;
        true
    }

    // =========================================================================
    // PANEL OPERATIONS
    // =========================================================================

    /// Appends a blank panel and returns a copy of it.
    pub fn add_panel(&self) -> FlowResult<Panel> {
        let duration = self.config.panel_duration;
        let panel = self.update_project(|project| {
            let panel = Panel::new(project.panels.len() as u32).with_duration(duration);
            project.panels.push(panel.clone());
            Ok(panel)
        })?;
        debug!(panel_id = %panel.id, order = panel.order, "panel added");
        Ok(panel)
    }

    /// Appends a copy of the panel with `id` under a fresh ID.
    ///
    /// The copy lands at the end of the sequence, not next to its source.
    pub fn duplicate_panel(&self, id: &str) -> FlowResult<Panel> {
        let panel = self.update_project(|project| {
            let source = project
                .panel_index(id)
                .ok_or_else(|| FlowError::panel_not_found(id))?;
            let copy = project.panels[source].duplicate(project.panels.len() as u32);
            project.panels.push(copy.clone());
            Ok(copy)
        })?;
        debug!(source_id = id, panel_id = %panel.id, "panel duplicated");
        Ok(panel)
    }

    /// Applies one field update to the panel with `id`.
    pub fn update_panel(&self, id: &str, update: PanelUpdate) -> FlowResult<()> {
        let field = update.field();
        update.validate()?;
        self.update_project(|project| {
            let index = project
                .panel_index(id)
                .ok_or_else(|| FlowError::panel_not_found(id))?;
            update.apply(&mut project.panels[index]);
            Ok(())
        })?;
        debug!(panel_id = id, field, "panel updated");
        Ok(())
    }

    panel_setters! {
        image_data => ImageData(impl Into<String>),
        action_notes => ActionNotes(impl Into<String>),
        dialogue => Dialogue(impl Into<String>),
        shot_type => ShotType(impl Into<String>),
        camera_angle => CameraAngle(impl Into<String>),
        camera_move => CameraMove(impl Into<String>),
        duration => Duration(f64),
        character_ids => CharacterIds(Vec<String>),
    }

    /// Removes the panel with `id` and closes the gap in `order`.
    pub fn delete_panel(&self, id: &str) -> FlowResult<()> {
        self.update_project(|project| {
            let index = project
                .panel_index(id)
                .ok_or_else(|| FlowError::panel_not_found(id))?;
            project.panels.remove(index);
            project.renumber_panels_from(index);
            Ok(())
        })?;
        debug!(panel_id = id, "panel deleted");
        Ok(())
    }

    /// Moves the panel with `id` so it ends up at `new_index`.
    ///
    /// Moving a panel to where it already is succeeds without marking the
    /// project dirty.
    pub fn reorder_panel(&self, id: &str, new_index: usize) -> FlowResult<()> {
        let mut slot = self.slot.write();
        let project = slot.project_mut()?;

        let current = project
            .panel_index(id)
            .ok_or_else(|| FlowError::panel_not_found(id))?;
        let len = project.panels.len();
        if new_index >= len {
            return Err(FlowError::invalid_index(new_index as i64, len));
        }
        if current == new_index {
            return Ok(());
        }

        let panel = project.panels.remove(current);
        project.panels.insert(new_index, panel);
        project.renumber_panels();
        slot.commit();

        debug!(panel_id = id, from = current, to = new_index, "panel reordered");
        Ok(())
    }

    /// Returns a copy of the panel with `id`.
    pub fn panel(&self, id: &str) -> Option<Panel> {
        let slot = self.slot.read();
        let project = slot.project.as_ref()?;
        project.panels.iter().find(|p| p.id == id).cloned()
    }

    /// Number of panels; zero if no project is loaded.
    pub fn panel_count(&self) -> usize {
        self.slot
            .read()
            .project
            .as_ref()
            .map_or(0, |p| p.panels.len())
    }

    /// Returns copies of all panels in sequence order.
    pub fn panels(&self) -> Vec<Panel> {
        self.slot
            .read()
            .project
            .as_ref()
            .map(|p| p.panels.clone())
            .unwrap_or_default()
    }

    // =========================================================================
    // CHARACTER OPERATIONS
    // =========================================================================

    /// Adds a character and returns a copy of it.
    pub fn add_character(
        &self,
        name: &str,
        description: &str,
        image_path: Option<String>,
    ) -> FlowResult<Character> {
        let mut character = Character::new(name, description);
        character.image_path = image_path;

        let character = self.update_project(|project| {
            project.characters.push(character.clone());
            Ok(character)
        })?;
        debug!(character_id = %character.id, name, "character added");
        Ok(character)
    }

    /// Removes the character with `id`.
    ///
    /// Panels that reference the character keep the dangling ID.
    pub fn delete_character(&self, id: &str) -> FlowResult<()> {
        self.update_project(|project| {
            let index = project
                .character_index(id)
                .ok_or_else(|| FlowError::character_not_found(id))?;
            project.characters.remove(index);
            Ok(())
        })?;
        debug!(character_id = id, "character deleted");
        Ok(())
    }

    /// Returns copies of all characters.
    pub fn characters(&self) -> Vec<Character> {
        self.slot
            .read()
            .project
            .as_ref()
            .map(|p| p.characters.clone())
            .unwrap_or_default()
    }
}

// =============================================================================
// TESTS
// =============================================================================
