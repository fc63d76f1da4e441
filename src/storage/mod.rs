//! Persistence collaborators for storyboard projects.
//!
//! This module provides:
//! - `files`: JSON project files and format dispatch by extension
//! - `document`: Automerge binary project documents via autosurgeon
//! - `assets`: character images and HTML print exports
//!
//! Nothing here touches `ProjectManager`; callers snapshot a project, hand
//! it over, and report the result back.

pub mod assets;
pub mod document;
pub mod files;

pub use assets::{delete_asset, save_asset, save_character_image, save_export_html};
pub use document::{load_project_doc, project_from_doc_bytes, project_to_doc_bytes, save_project_doc};
pub use files::{load_project, load_project_json, save_project, save_project_json, ProjectFormat};
