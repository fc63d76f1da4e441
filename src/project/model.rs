//! Data models for storyboard projects.
//!
//! The same structs serialize to JSON (serde) and to Automerge documents
//! (autosurgeon derives), so both project file formats share one schema.

use std::collections::HashSet;
use std::fmt;

use autosurgeon::{Hydrate, Reconcile};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::config::StoryboardConfig;

/// Default shot type of a new panel.
pub const DEFAULT_SHOT_TYPE: &str = "Medium";
/// Default camera angle of a new panel.
pub const DEFAULT_CAMERA_ANGLE: &str = "Eye-level";
/// Default camera move of a new panel.
pub const DEFAULT_CAMERA_MOVE: &str = "Static";
/// Default panel duration in seconds.
pub const DEFAULT_DURATION: f64 = 3.0;

/// Generates a fresh 16-hex-digit entity ID.
pub fn generate_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(16);
    id
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Reads a timestamp written either as epoch milliseconds or as an RFC 3339
/// string (the form older project files use).
fn millis_or_rfc3339<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Timestamp {
        Millis(i64),
        Text(String),
    }

    match Timestamp::deserialize(deserializer)? {
        Timestamp::Millis(millis) => Ok(millis),
        Timestamp::Text(text) => chrono::DateTime::parse_from_rfc3339(&text)
            .map(|t| t.timestamp_millis())
            .map_err(|e| de::Error::custom(format!("invalid timestamp {:?}: {}", text, e))),
    }
}

// =============================================================================
// PROJECT
// =============================================================================

/// Root aggregate: one storyboard with its panels and characters.
#[derive(Debug, Clone, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub name: String,
    /// Milliseconds since epoch
    #[serde(deserialize_with = "millis_or_rfc3339")]
    pub created_at: i64,
    #[serde(deserialize_with = "millis_or_rfc3339")]
    pub modified_at: i64,
    /// e.g. "16:9", "4:3"
    pub aspect_ratio: String,
    pub frame_rate: u32,
    /// Panels in sequence order; `order` mirrors the position.
    pub panels: Vec<Panel>,
    pub characters: Vec<Character>,
}

impl Project {
    /// Creates a project with default settings and six blank panels.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, &StoryboardConfig::default())
    }

    /// Creates a project using the defaults from `config`.
    pub fn with_config(name: impl Into<String>, config: &StoryboardConfig) -> Self {
        let now = now_millis();
        let panels = (0..config.default_panel_count)
            .map(|i| Panel::new(i as u32).with_duration(config.panel_duration))
            .collect();

        Self {
            name: name.into(),
            created_at: now,
            modified_at: now,
            aspect_ratio: config.aspect_ratio.clone(),
            frame_rate: config.frame_rate,
            panels,
            characters: Vec::new(),
        }
    }

    /// Position of the first panel with `id`.
    pub fn panel_index(&self, id: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.id == id)
    }

    /// Position of the first character with `id`.
    pub fn character_index(&self, id: &str) -> Option<usize> {
        self.characters.iter().position(|c| c.id == id)
    }

    /// Rewrites every panel's `order` to its position in the sequence.
    pub fn renumber_panels(&mut self) {
        self.renumber_panels_from(0);
    }

    /// Rewrites `order` for the panels at `start..`.
    pub fn renumber_panels_from(&mut self, start: usize) {
        for (i, panel) in self.panels.iter_mut().enumerate().skip(start) {
            panel.order = i as u32;
        }
    }

    /// Updates the modified timestamp.
    pub fn touch(&mut self) {
        self.modified_at = now_millis();
    }

    /// Total running time of all panels in seconds.
    pub fn total_duration(&self) -> f64 {
        self.panels.iter().map(|p| p.duration).sum()
    }

    /// Checks the ordering and identity invariants.
    ///
    /// Projects built through `ProjectManager` always pass; this exists for
    /// files loaded from outside, which are otherwise trusted as-is.
    pub fn order_violations(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        let mut seen = HashSet::new();
        for (position, panel) in self.panels.iter().enumerate() {
            if panel.order as usize != position {
                violations.push(InvariantViolation::OrderMismatch {
                    panel_id: panel.id.clone(),
                    position,
                    order: panel.order,
                });
            }
            if !seen.insert(panel.id.as_str()) {
                violations.push(InvariantViolation::DuplicatePanelId(panel.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        for character in &self.characters {
            if !seen.insert(character.id.as_str()) {
                violations.push(InvariantViolation::DuplicateCharacterId(
                    character.id.clone(),
                ));
            }
        }

        violations
    }
}

/// A broken ordering or identity invariant found in a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    OrderMismatch {
        panel_id: String,
        position: usize,
        order: u32,
    },
    DuplicatePanelId(String),
    DuplicateCharacterId(String),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderMismatch {
                panel_id,
                position,
                order,
            } => write!(
                f,
                "panel {} at position {} has order {}",
                panel_id, position, order
            ),
            Self::DuplicatePanelId(id) => write!(f, "duplicate panel id {}", id),
            Self::DuplicateCharacterId(id) => write!(f, "duplicate character id {}", id),
        }
    }
}

// =============================================================================
// PANEL
// =============================================================================

/// A single storyboard frame.
#[derive(Debug, Clone, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Panel {
    pub id: String,
    pub order: u32,
    /// File path or inline-encoded image; opaque here
    pub image_data: String,
    pub action_notes: String,
    pub dialogue: String,
    /// Wide, Medium, Close-up, Extreme Close-up
    pub shot_type: String,
    /// Eye-level, Low, High, Dutch
    pub camera_angle: String,
    /// Static, Pan, Tilt, Zoom, Dolly, Truck
    pub camera_move: String,
    /// Seconds
    pub duration: f64,
    pub character_ids: Vec<String>,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            id: String::new(),
            order: 0,
            image_data: String::new(),
            action_notes: String::new(),
            dialogue: String::new(),
            shot_type: DEFAULT_SHOT_TYPE.to_string(),
            camera_angle: DEFAULT_CAMERA_ANGLE.to_string(),
            camera_move: DEFAULT_CAMERA_MOVE.to_string(),
            duration: DEFAULT_DURATION,
            character_ids: Vec::new(),
        }
    }
}

impl Panel {
    /// Creates a blank panel with a fresh ID at the given order.
    pub fn new(order: u32) -> Self {
        Self {
            id: generate_id(),
            order,
            ..Default::default()
        }
    }

    /// Copies every content field of `self` into a new panel with a fresh ID.
    pub fn duplicate(&self, order: u32) -> Self {
        Self {
            id: generate_id(),
            order,
            ..self.clone()
        }
    }

    /// Builder: Set image data.
    pub fn with_image_data(mut self, image_data: impl Into<String>) -> Self {
        self.image_data = image_data.into();
        self
    }

    /// Builder: Set action notes.
    pub fn with_action_notes(mut self, notes: impl Into<String>) -> Self {
        self.action_notes = notes.into();
        self
    }

    /// Builder: Set dialogue.
    pub fn with_dialogue(mut self, dialogue: impl Into<String>) -> Self {
        self.dialogue = dialogue.into();
        self
    }

    /// Builder: Set duration.
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Builder: Set character IDs.
    pub fn with_character_ids(mut self, ids: Vec<String>) -> Self {
        self.character_ids = ids;
        self
    }
}

// =============================================================================
// CHARACTER
// =============================================================================

/// Reusable character reference.
#[derive(Debug, Clone, Default, Reconcile, Hydrate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Relative path to the reference image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    /// Optional hex colors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_palette: Option<String>,
}

impl Character {
    /// Creates a character with a fresh ID.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Builder: Set image path.
    pub fn with_image_path(mut self, path: impl Into<String>) -> Self {
        self.image_path = Some(path.into());
        self
    }

    /// Builder: Set color palette.
    pub fn with_color_palette(mut self, palette: impl Into<String>) -> Self {
        self.color_palette = Some(palette.into());
        self
    }
}

// =============================================================================
// TESTS
// =============================================================================
