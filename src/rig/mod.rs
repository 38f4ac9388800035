//! # Rig Module
//!
//! Everything that concerns the articulated figure itself: the fixed joint
//! hierarchy, bilateral symmetry mirroring, and the authored rest pose.
//!
//! ## Key Components
//!
//! - [`RigModel`] - The joint hierarchy, built once, name-indexed
//! - [`SymmetryEngine`] - Mirrors edits across the sagittal plane
//! - [`RestSnapshot`] - Capture/restore of the authored pose
//!
//! ## Usage
//!
//! The rig is owned and driven by the editor context:
//!
//! ```
//! use marionette::rig::RigModel;
//! use marionette::scene::SceneGraph;
//!
//! let mut graph = SceneGraph::new();
//! let rig = RigModel::build(&mut graph);
//! assert!(rig.joint("l_shoulder").is_some());
//! ```

pub mod model;
pub mod rest_state;
pub mod symmetry;

// Re-export main types
pub use model::{counterpart, JointId, RigModel};
pub use rest_state::RestSnapshot;
pub use symmetry::{mirror_rotation, SymmetryEngine};
