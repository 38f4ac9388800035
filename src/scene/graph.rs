//! # Scene Node Arena
//!
//! Stable-handle storage for every geometry-facing node the collaborators
//! can reference: joint nodes, their visible parts, freestanding props, and
//! imported-model roots with their internal nodes.
//!
//! Nodes are addressed by [`NodeId`], a copyable generational handle. A
//! handle taken before a node was removed resolves to `None` afterwards and
//! never aliases whatever reuses the slot, so collaborators (picker,
//! renderer, pose documents) can hold ids across frames without depending on
//! object identity.

use cgmath::Vector3;

use super::transform::Transform;

/// Stable handle to a node in the [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// Capability tag of a node, resolved by exhaustive matching.
///
/// Exactly one tag per node; the tag never changes after insertion except
/// for the model-part back-reference written when an imported model is
/// registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeTag {
    /// A pose-bearing joint of the rig.
    Joint,
    /// Visible geometry attached under a joint, scalable on its own.
    Part {
        /// The joint this part hangs under.
        joint: NodeId,
    },
    /// A freestanding prop owned by the entity registry.
    Prop,
    /// The root node of an imported model; the only edit-safe node of it.
    ModelRoot,
    /// An internal node of an imported model, carrying the back-reference
    /// hit resolution walks to reach the root.
    ModelPart { root: NodeId },
}

/// A single scene node: name, local transform, parent link, capability tag.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub local: Transform,
    pub parent: Option<NodeId>,
    pub tag: NodeTag,
}

impl Node {
    pub fn new(name: impl Into<String>, tag: NodeTag) -> Self {
        Self {
            name: name.into(),
            local: Transform::identity(),
            parent: None,
            tag,
        }
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.local.position = position;
        self
    }
}

struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena of scene nodes with generational slot reuse.
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Inserts a node and returns its stable handle.
    pub fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    /// Removes a node, invalidating its handle. Children are not touched;
    /// use [`SceneGraph::remove_subtree`] to free a whole tree.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation || slot.node.is_none() {
            return None;
        }
        let node = slot.node.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        node
    }

    /// Removes a node and every node beneath it. Returns how many nodes
    /// were freed; zero for a stale handle.
    pub fn remove_subtree(&mut self, root: NodeId) -> usize {
        if !self.contains(root) {
            return 0;
        }
        let mut doomed = vec![root];
        let mut cursor = 0;
        while cursor < doomed.len() {
            let parent = doomed[cursor];
            cursor += 1;
            doomed.extend(self.children_of(parent));
        }
        let mut freed = 0;
        for id in doomed {
            if self.remove(id).is_some() {
                freed += 1;
            }
        }
        freed
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|node| node.parent)
    }

    /// Direct children of a node. Linear scan; node counts here are small
    /// (one rig, a handful of props and model nodes).
    pub fn children_of(&self, parent: NodeId) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, node)| node.parent == Some(parent))
            .map(|(id, _)| id)
            .collect()
    }

    /// Iterates live nodes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    NodeId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    node,
                )
            })
        })
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}
