//! # Rest State
//!
//! Snapshot and restore of the rig's authored pose. Captured exactly once
//! after the rig is built; restoring writes every field back verbatim, part
//! scales included — this is the only operation that undoes scale-mode
//! edits.

use std::collections::HashMap;

use cgmath::{Quaternion, Vector3};
use log::debug;

use crate::scene::SceneGraph;

use super::model::RigModel;

#[derive(Debug, Clone, Copy)]
struct RestEntry {
    position: Vector3<f32>,
    rotation: Quaternion<f32>,
    scale: Vector3<f32>,
    part_scale: Option<Vector3<f32>>,
}

/// Per-joint capture of the authored transform state, keyed by joint name.
pub struct RestSnapshot {
    entries: HashMap<String, RestEntry>,
}

impl RestSnapshot {
    /// Captures every joint's position, rotation, scale, and the scale of
    /// its visible part.
    pub fn capture(rig: &RigModel, graph: &SceneGraph) -> Self {
        let mut entries = HashMap::with_capacity(rig.len());
        for id in rig.joints() {
            let Some(node) = graph.get(rig.node_of(id)) else {
                continue;
            };
            let part_scale = rig
                .part_of(id)
                .and_then(|part| graph.get(part))
                .map(|part| part.local.scale);
            entries.insert(
                rig.name_of(id).to_string(),
                RestEntry {
                    position: node.local.position,
                    rotation: node.local.rotation,
                    scale: node.local.scale,
                    part_scale,
                },
            );
        }
        debug!("rest snapshot captured for {} joints", entries.len());
        Self { entries }
    }

    /// Writes every captured field back onto the corresponding joint and its
    /// part. Joints missing from the snapshot are left alone.
    pub fn restore(&self, rig: &RigModel, graph: &mut SceneGraph) {
        for id in rig.joints() {
            let Some(entry) = self.entries.get(rig.name_of(id)) else {
                continue;
            };
            if let Some(node) = graph.get_mut(rig.node_of(id)) {
                node.local.position = entry.position;
                node.local.rotation = entry.rotation;
                node.local.scale = entry.scale;
            }
            if let (Some(part), Some(scale)) = (rig.part_of(id), entry.part_scale) {
                if let Some(node) = graph.get_mut(part) {
                    node.local.scale = scale;
                }
            }
        }
        debug!("rest snapshot restored");
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
