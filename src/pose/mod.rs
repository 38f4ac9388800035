//! # Pose Module
//!
//! The pose document codec and the built-in preset library.
//!
//! ## Key Components
//!
//! - [`PoseDocument`] - The exported/persisted pose shape
//! - [`codec::serialize`] / [`codec::apply_full`] / [`codec::apply_joints_only`]
//! - [`presets`] - Fixed built-in joints-only presets
//!
//! ## Round-trip contract
//!
//! `apply_full(serialize(..))` reproduces identical joint rotations and prop
//! transforms, and applying the same document twice is idempotent for joint
//! rotations.

pub mod codec;
pub mod document;
pub mod presets;

// Re-export main types
pub use document::{PoseDocument, PropDescriptor, POSE_DOCUMENT_VERSION};
pub use presets::PresetDocument;
