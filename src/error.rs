//! Error types for the storyboard document manager.

use thiserror::Error;

/// Result type alias for storyboard operations.
pub type FlowResult<T> = Result<T, FlowError>;

/// Errors that can occur while editing or persisting a storyboard project.
#[derive(Error, Debug)]
pub enum FlowError {
    /// An operation needs a loaded project but none is set.
    #[error("No active project")]
    NoActiveProject,

    /// Panel not found in the current project.
    #[error("Panel not found: {0}")]
    PanelNotFound(String),

    /// Character not found in the current project.
    #[error("Character not found: {0}")]
    CharacterNotFound(String),

    /// Reorder target outside the panel sequence.
    #[error("Index {index} out of bounds for {len} panels")]
    InvalidIndex { index: i64, len: usize },

    /// Panel update named a field that does not exist or is not mutable.
    #[error("Unknown panel field: {0}")]
    UnknownField(String),

    /// Panel update carried a value of the wrong type for its field.
    #[error("Invalid value for field {field}: expected {expected}")]
    InvalidFieldValue { field: String, expected: String },

    /// Inline image payload could not be decoded.
    #[error("Invalid image data: {0}")]
    InvalidImageData(String),

    /// Configuration could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem error from a persistence collaborator.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Automerge error during document operations.
    #[error("Automerge error: {0}")]
    Automerge(#[from] automerge::AutomergeError),

    /// Autosurgeon hydration error.
    #[error("Hydration error: {0}")]
    Hydrate(#[from] autosurgeon::HydrateError),

    /// Autosurgeon reconcile error.
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] autosurgeon::ReconcileError),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl FlowError {
    /// Creates a PanelNotFound error.
    pub fn panel_not_found(id: impl Into<String>) -> Self {
        Self::PanelNotFound(id.into())
    }

    /// Creates a CharacterNotFound error.
    pub fn character_not_found(id: impl Into<String>) -> Self {
        Self::CharacterNotFound(id.into())
    }

    /// Creates an InvalidIndex error.
    pub fn invalid_index(index: i64, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }

    /// Creates an UnknownField error.
    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField(field.into())
    }

    /// Creates an InvalidFieldValue error.
    pub fn invalid_field_value(field: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            field: field.into(),
            expected: expected.into(),
        }
    }

    /// Creates an InvalidImageData error.
    pub fn invalid_image_data(msg: impl Into<String>) -> Self {
        Self::InvalidImageData(msg.into())
    }

    /// Creates a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for the failures a UI reports as "not found": a missing panel,
    /// character, or project.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NoActiveProject | Self::PanelNotFound(_) | Self::CharacterNotFound(_)
        )
    }
}

impl From<serde_json::Error> for FlowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
