//! # Rig Model
//!
//! The fixed joint hierarchy of the posable figure, built exactly once from
//! a static table. Rebuilding discards the previous tree entirely — there is
//! no incremental mutation of the skeleton.
//!
//! The model owns the ordered, name-indexed joint list and the precomputed
//! joint-to-part index, so "first visible part of a joint" is a map lookup
//! at edit time, never a tree walk.

use std::collections::HashMap;

use cgmath::{One, Quaternion, Vector3};
use log::debug;

use crate::scene::{Node, NodeId, NodeTag, SceneGraph};

/// Handle to a joint, stable for the lifetime of the rig build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId(usize);

/// One row of the build table: name, parent name, local offset, whether the
/// joint carries visible geometry.
struct JointSpec {
    name: &'static str,
    parent: Option<&'static str>,
    offset: [f32; 3],
    has_part: bool,
}

const fn row(
    name: &'static str,
    parent: Option<&'static str>,
    offset: [f32; 3],
    has_part: bool,
) -> JointSpec {
    JointSpec {
        name,
        parent,
        offset,
        has_part,
    }
}

/// The humanoid build table. Bilateral joints come in `l_`/`r_` pairs; the
/// root carries no visible part of its own.
const BUILD_TABLE: &[JointSpec] = &[
    row("root", None, [0.0, 1.0, 0.0], false),
    row("spine", Some("root"), [0.0, 0.12, 0.0], true),
    row("chest", Some("spine"), [0.0, 0.25, 0.0], true),
    row("neck", Some("chest"), [0.0, 0.2, 0.0], true),
    row("head", Some("neck"), [0.0, 0.12, 0.0], true),
    row("l_shoulder", Some("chest"), [0.18, 0.15, 0.0], true),
    row("l_elbow", Some("l_shoulder"), [0.26, 0.0, 0.0], true),
    row("l_wrist", Some("l_elbow"), [0.25, 0.0, 0.0], true),
    row("r_shoulder", Some("chest"), [-0.18, 0.15, 0.0], true),
    row("r_elbow", Some("r_shoulder"), [-0.26, 0.0, 0.0], true),
    row("r_wrist", Some("r_elbow"), [-0.25, 0.0, 0.0], true),
    row("l_hip", Some("root"), [0.1, -0.05, 0.0], true),
    row("l_knee", Some("l_hip"), [0.0, -0.42, 0.0], true),
    row("l_ankle", Some("l_knee"), [0.0, -0.4, 0.0], true),
    row("r_hip", Some("root"), [-0.1, -0.05, 0.0], true),
    row("r_knee", Some("r_hip"), [0.0, -0.42, 0.0], true),
    row("r_ankle", Some("r_knee"), [0.0, -0.4, 0.0], true),
];

struct JointEntry {
    name: &'static str,
    node: NodeId,
    part: Option<NodeId>,
}

/// The complete joint hierarchy, with name and node indices.
pub struct RigModel {
    joints: Vec<JointEntry>,
    by_name: HashMap<&'static str, JointId>,
    by_node: HashMap<NodeId, JointId>,
}

impl RigModel {
    /// Builds the fixed hierarchy into the graph.
    pub fn build(graph: &mut SceneGraph) -> Self {
        let mut rig = Self {
            joints: Vec::with_capacity(BUILD_TABLE.len()),
            by_name: HashMap::new(),
            by_node: HashMap::new(),
        };
        rig.build_into(graph);
        rig
    }

    /// Discards the previous tree entirely and builds a fresh one. Handles
    /// into the old tree go stale; joint names and their order are the same
    /// across rebuilds.
    pub fn rebuild(&mut self, graph: &mut SceneGraph) {
        for entry in &self.joints {
            if let Some(part) = entry.part {
                graph.remove(part);
            }
            graph.remove(entry.node);
        }
        self.joints.clear();
        self.by_name.clear();
        self.by_node.clear();
        self.build_into(graph);
    }

    fn build_into(&mut self, graph: &mut SceneGraph) {
        for row in BUILD_TABLE {
            let parent_node = row
                .parent
                .and_then(|name| self.by_name.get(name))
                .map(|&id| self.joints[id.0].node);

            let mut node = Node::new(row.name, NodeTag::Joint)
                .with_position(Vector3::new(row.offset[0], row.offset[1], row.offset[2]));
            if let Some(parent) = parent_node {
                node = node.with_parent(parent);
            }
            let node = graph.insert(node);

            let part = row.has_part.then(|| {
                graph.insert(
                    Node::new(format!("{}_geom", row.name), NodeTag::Part { joint: node })
                        .with_parent(node),
                )
            });

            let id = JointId(self.joints.len());
            self.joints.push(JointEntry {
                name: row.name,
                node,
                part,
            });
            self.by_name.insert(row.name, id);
            self.by_node.insert(node, id);
        }
        debug!("rig built with {} joints", self.joints.len());
    }

    /// Joints in build order.
    pub fn joints(&self) -> impl Iterator<Item = JointId> + '_ {
        (0..self.joints.len()).map(JointId)
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Looks a joint up by its stable name.
    pub fn joint(&self, name: &str) -> Option<JointId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: JointId) -> &'static str {
        self.joints[id.0].name
    }

    /// The joint's own scene node.
    pub fn node_of(&self, id: JointId) -> NodeId {
        self.joints[id.0].node
    }

    /// The joint's first visible part, from the precomputed index.
    pub fn part_of(&self, id: JointId) -> Option<NodeId> {
        self.joints[id.0].part
    }

    /// Maps a scene node back to its joint, if the node is a joint.
    pub fn joint_by_node(&self, node: NodeId) -> Option<JointId> {
        self.by_node.get(&node).copied()
    }

    /// Sets every joint rotation to identity, leaving positions and scales
    /// untouched. A strict subset of rest-state restore; used when applying
    /// a preset.
    pub fn reset_rotations(&self, graph: &mut SceneGraph) {
        for entry in &self.joints {
            if let Some(node) = graph.get_mut(entry.node) {
                node.local.rotation = Quaternion::one();
            }
        }
        debug!("all joint rotations reset to identity");
    }
}

/// The bilateral counterpart name: `l_` and `r_` prefixes swap, anything
/// else has no counterpart. The relation is symmetric.
pub fn counterpart(name: &str) -> Option<String> {
    if let Some(rest) = name.strip_prefix("l_") {
        Some(format!("r_{rest}"))
    } else if let Some(rest) = name.strip_prefix("r_") {
        Some(format!("l_{rest}"))
    } else {
        None
    }
}
