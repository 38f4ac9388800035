// src/lib.rs
//! Marionette Pose Engine
//!
//! A pose and transform resolution engine for articulated 3D figures:
//! hierarchical joint rigs, selection resolution, mode-dependent transform
//! handle targeting, bilateral symmetry mirroring, rest-pose capture and a
//! JSON pose document codec.
//!
//! Rendering, cameras, raw input and asset parsing live with external
//! collaborators; this crate owns the logic between a resolved pick and a
//! persisted pose.

pub mod editor;
pub mod error;
pub mod interaction;
pub mod pose;
pub mod prelude;
pub mod rig;
pub mod scene;

// Re-export main types for convenience
pub use editor::PoseEditor;

/// Creates a default posing session: rig built, rest pose captured
pub fn default() -> PoseEditor {
    PoseEditor::new()
}
