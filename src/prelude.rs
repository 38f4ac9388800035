//! # Marionette Prelude
//!
//! This module provides a convenient way to import commonly used types from
//! the pose engine. It's designed to reduce boilerplate imports in typical
//! embedding code.
//!
//! ## Usage
//!
//! ```rust
//! use marionette::prelude::*;
//!
//! let mut editor = marionette::default();
//! editor.set_mode(EditMode::Rotate);
//! editor.select_joint("l_shoulder");
//! ```

// Re-export the session context
pub use crate::default;
pub use crate::editor::PoseEditor;

// Re-export interaction types
pub use crate::interaction::{EditMode, PickHit, Selection};

// Re-export rig types
pub use crate::rig::{counterpart, mirror_rotation, RestSnapshot, RigModel, SymmetryEngine};

// Re-export scene types
pub use crate::scene::{
    EntityRegistry, ImportStatus, ModelPrototype, NodeId, PendingImport, PropKind, PrototypeNode,
    SceneGraph, Transform,
};

// Re-export pose document types
pub use crate::pose::{PoseDocument, PresetDocument, PropDescriptor};

// Re-export error types
pub use crate::error::{ImportError, ValidationError};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, One, Quaternion, Rad, Rotation3, Vector3, Zero};
