//! Storyboard project module.
//!
//! This module provides:
//! - `model`: Data structures for a project (Project, Panel, Character)
//! - `update`: Tagged single-field panel updates
//! - `manager`: ProjectManager, the lock-guarded owner of the current project

pub mod manager;
pub mod model;
pub mod update;

pub use manager::{ProjectManager, SaveSnapshot};
pub use model::*;
pub use update::PanelUpdate;
