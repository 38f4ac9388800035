//! # Selection Resolver
//!
//! Maps a raw geometric hit to the logical entity the user intends to
//! manipulate. The output is never a bare visual part: a hit anywhere
//! inside an imported model is promoted to the model's root, and a hit on
//! a joint's geometry selects the joint, so the transform handle always
//! lands on a stable, edit-safe node.

use log::debug;

use crate::rig::RigModel;
use crate::scene::{EntityRegistry, SceneGraph};

use super::{PickHit, Selection};

/// Resolves a hit to a selection.
///
/// Walking upward from the hit node through parent links, the first
/// qualifying owner wins, in this precedence order:
///
/// 1. the hit carries an imported-model back-reference (or is a model
///    root itself) — select the model root;
/// 2. the immediate parent is a joint — select that joint;
/// 3. the hit node is a registered prop — select it;
/// 4. otherwise the hit node is selected verbatim.
///
/// A stale hit resolves to `None`.
pub fn resolve(
    hit: &PickHit,
    graph: &SceneGraph,
    rig: &RigModel,
    registry: &EntityRegistry,
) -> Option<Selection> {
    let node = graph.get(hit.node)?;

    // Model membership wins outright, wherever in the subtree the ray
    // landed. model_by_node follows the tag written at registration.
    let mut cursor = Some(hit.node);
    while let Some(id) = cursor {
        if let Some(root) = registry.model_by_node(graph, id) {
            if id != root {
                debug!("hit on model internals promoted to root");
            }
            return Some(Selection::Model(root));
        }
        cursor = graph.parent_of(id);
    }

    // Direct hit on a joint node, or on geometry whose immediate parent is
    // a joint.
    if let Some(joint) = rig.joint_by_node(hit.node) {
        return Some(Selection::Joint(joint));
    }
    if let Some(parent) = node.parent {
        if let Some(joint) = rig.joint_by_node(parent) {
            return Some(Selection::Joint(joint));
        }
    }

    if registry.is_prop(hit.node) {
        return Some(Selection::Prop(hit.node));
    }

    Some(Selection::Node(hit.node))
}
