//! Defaults for new projects and on-disk locations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, FlowResult};

/// Settings used when creating projects and resolving file locations.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```json
/// { "frame_rate": 30, "projects_dir": "/srv/boards" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoryboardConfig {
    /// Aspect ratio tag for new projects.
    pub aspect_ratio: String,
    /// Frames per second for new projects.
    pub frame_rate: u32,
    /// Number of blank panels a new project starts with.
    pub default_panel_count: usize,
    /// Duration in seconds of a freshly created panel.
    pub panel_duration: f64,
    /// Where projects without an explicit path are saved.
    pub projects_dir: PathBuf,
    /// Root for character images and print exports.
    pub assets_dir: PathBuf,
}

impl Default for StoryboardConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: "16:9".to_string(),
            frame_rate: 24,
            default_panel_count: 6,
            panel_duration: 3.0,
            projects_dir: PathBuf::from("projects"),
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl StoryboardConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> FlowResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FlowError::config(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| FlowError::config(format!("{}: {}", path.display(), e)))
    }

    /// Builder: Set aspect ratio.
    pub fn with_aspect_ratio(mut self, aspect_ratio: impl Into<String>) -> Self {
        self.aspect_ratio = aspect_ratio.into();
        self
    }

    /// Builder: Set frame rate.
    pub fn with_frame_rate(mut self, frame_rate: u32) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    /// Builder: Set default panel count.
    pub fn with_default_panel_count(mut self, count: usize) -> Self {
        self.default_panel_count = count;
        self
    }

    /// Builder: Set projects directory.
    pub fn with_projects_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.projects_dir = dir.into();
        self
    }

    /// Builder: Set assets directory.
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = dir.into();
        self
    }

    /// Default save location for a project with the given name.
    ///
    /// Only the last path component of `name` is used, so the file always
    /// lands directly inside `projects_dir`. A name with nothing usable left
    /// falls back to `project.json`.
    pub fn default_project_path(&self, name: &str) -> PathBuf {
        let stem = name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_matches('.');
        let stem = if stem.is_empty() { "project" } else { stem };
        self.projects_dir.join(format!("{}.json", stem))
    }
}
