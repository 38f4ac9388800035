//! # Interaction Module
//!
//! Turns raw geometry hits and mode switches into edit-safe targets. The
//! picking itself (mouse ray to nearest intersection) lives with the input
//! collaborator; this module owns what happens after: resolving the hit to
//! the logical entity the user means, and deciding which node the transform
//! handle attaches to.
//!
//! ## Key Components
//!
//! - [`EditMode`] - The current manipulation mode
//! - [`PickHit`] - The collaborator-supplied nearest-intersection record
//! - [`Selection`] - The resolved logical entity, passed around as a value
//! - [`resolve`] - Hit to selection, with imported-model root promotion
//! - [`transform_target`] - (mode, selection) to handle target

pub mod resolver;
pub mod target_policy;

use cgmath::Vector3;

use crate::scene::NodeId;

// Re-export main operations
pub use resolver::resolve;
pub use target_policy::transform_target;

/// The current edit mode, switched by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Camera navigation; nothing receives a transform handle.
    Orbit,
    Move,
    Rotate,
    Scale,
}

/// Result of a pick, supplied by the external picking collaborator:
/// the nearest intersected node plus where and how far away it was hit.
#[derive(Debug, Clone, Copy)]
pub struct PickHit {
    /// The intersected scene node.
    pub node: NodeId,
    /// Distance from the ray origin to the intersection point.
    pub distance: f32,
    /// World space intersection point.
    pub point: Vector3<f32>,
}

impl PickHit {
    /// A hit record where only the node matters (tests, synthetic events).
    pub fn on_node(node: NodeId) -> Self {
        Self {
            node,
            distance: 0.0,
            point: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

/// The logical selected entity. Never a bare internal mesh of an imported
/// model: resolution promotes those to the model root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// A rig joint.
    Joint(crate::rig::JointId),
    /// A registered prop, by its node handle.
    Prop(NodeId),
    /// An imported model, by its root node handle.
    Model(NodeId),
    /// Verbatim fallback: a node that is none of the above.
    Node(NodeId),
}
