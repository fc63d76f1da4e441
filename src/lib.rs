//! Storyboard Flow - thread-safe document state for storyboard projects.
//!
//! This crate keeps one "current" storyboard project in memory and lets any
//! number of UI callers edit it concurrently:
//!
//! - **Ordered panels**: add, duplicate, update, delete and reorder, with
//!   `order` always renumbered to a dense `0..n-1`
//! - **Characters**: a reusable cast referenced from panels by ID
//! - **Atomic operations**: every mutation runs under one write lock; reads
//!   return independent copies
//! - **Persistence**: JSON or Automerge binary project files, plus asset files
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use storyboard_flow::{PanelUpdate, ProjectManager};
//!
//! let manager = Arc::new(ProjectManager::new());
//! manager.new_project("Pilot");
//!
//! // Six default panels, orders 0..5
//! let panels = manager.panels();
//! assert_eq!(panels.len(), 6);
//!
//! // Move the last panel to the front
//! manager.reorder_panel(&panels[5].id, 0).unwrap();
//! manager
//!     .update_panel(&panels[5].id, PanelUpdate::Dialogue("Cut to black.".into()))
//!     .unwrap();
//!
//! let reordered = manager.panels();
//! assert_eq!(reordered[0].order, 0);
//! assert_eq!(reordered[0].dialogue, "Cut to black.");
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod project;
pub mod storage;

// Re-exports for convenience
pub use commands::StoryboardCommands;
pub use config::StoryboardConfig;
pub use error::{FlowError, FlowResult};
pub use project::{Character, Panel, PanelUpdate, Project, ProjectManager};
pub use storage::ProjectFormat;
