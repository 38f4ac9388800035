//! # Entity Registry
//!
//! Owns the freestanding entities of the scene: props and imported-model
//! roots. The rig's joints belong to the rig model, not to this registry.
//!
//! Entities are addressed by their stable [`NodeId`] handles, so documents
//! and collaborators can reference them without depending on object
//! identity. Removal of something that is not (or no longer) registered is
//! a silent no-op by design.

use cgmath::Vector3;
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::graph::{Node, NodeId, NodeTag, SceneGraph};
use super::transform::Transform;

/// Props spawn inside this planar bound, |x| and |z| both under it.
const PLACEMENT_BOUND: f32 = 3.0;

/// The closed set of prop kinds the scene can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropKind {
    Ball,
    Cube,
    Chair,
    Staff,
}

impl PropKind {
    /// Base name new props of this kind start from.
    pub fn default_name(&self) -> &'static str {
        match self {
            PropKind::Ball => "ball",
            PropKind::Cube => "cube",
            PropKind::Chair => "chair",
            PropKind::Staff => "staff",
        }
    }

    /// Legacy inference from a prop's name, for documents predating the
    /// explicit type field. Defaults to `Ball`, which is what those old
    /// documents relied on.
    pub fn guess(name: &str) -> Self {
        let lower = name.to_lowercase();
        if lower.contains("cube") || lower.contains("box") {
            PropKind::Cube
        } else if lower.contains("chair") {
            PropKind::Chair
        } else if lower.contains("staff") || lower.contains("stick") {
            PropKind::Staff
        } else {
            PropKind::Ball
        }
    }
}

/// A fully specified prop, used when rebuilding the set from a document.
#[derive(Debug, Clone)]
pub struct PropSpec {
    pub name: String,
    pub kind: PropKind,
    pub transform: Transform,
}

struct PropEntry {
    name: String,
    kind: PropKind,
    node: NodeId,
}

struct ModelEntry {
    name: String,
    root: NodeId,
}

/// Registry of props and imported models.
pub struct EntityRegistry {
    props: Vec<PropEntry>,
    models: Vec<ModelEntry>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            props: Vec::new(),
            models: Vec::new(),
        }
    }

    /// Instantiates a new prop of the given kind at a bounded-random planar
    /// position and registers it.
    pub fn add_prop(&mut self, kind: PropKind, graph: &mut SceneGraph) -> NodeId {
        let mut rng = rand::rng();
        let position = Vector3::new(
            rng.random_range(-PLACEMENT_BOUND..=PLACEMENT_BOUND),
            0.0,
            rng.random_range(-PLACEMENT_BOUND..=PLACEMENT_BOUND),
        );
        let name = self.ensure_unique_name(kind.default_name());
        self.add_prop_at(
            kind,
            name,
            Transform::at_position(position),
            graph,
        )
    }

    /// Instantiates a prop with an exact name and transform; the codec path.
    pub fn add_prop_at(
        &mut self,
        kind: PropKind,
        name: impl Into<String>,
        transform: Transform,
        graph: &mut SceneGraph,
    ) -> NodeId {
        let name = name.into();
        let mut node = Node::new(name.clone(), NodeTag::Prop);
        node.local = transform;
        let node = graph.insert(node);
        debug!("prop {name} added");
        self.props.push(PropEntry { name, kind, node });
        node
    }

    /// Detaches and releases a prop. A stale or foreign handle is a silent
    /// no-op.
    pub fn remove_prop(&mut self, node: NodeId, graph: &mut SceneGraph) {
        let Some(index) = self.props.iter().position(|p| p.node == node) else {
            debug!("remove_prop on an unregistered handle, ignoring");
            return;
        };
        let entry = self.props.remove(index);
        graph.remove(entry.node);
        debug!("prop {} removed", entry.name);
    }

    /// Registered props in insertion order as `(node, kind, name)`.
    pub fn props(&self) -> impl Iterator<Item = (NodeId, PropKind, &str)> {
        self.props
            .iter()
            .map(|p| (p.node, p.kind, p.name.as_str()))
    }

    pub fn prop_count(&self) -> usize {
        self.props.len()
    }

    pub fn is_prop(&self, node: NodeId) -> bool {
        self.props.iter().any(|p| p.node == node)
    }

    pub fn prop_kind(&self, node: NodeId) -> Option<PropKind> {
        self.props.iter().find(|p| p.node == node).map(|p| p.kind)
    }

    /// Drops the entire current prop set and rebuilds it from the given
    /// specs. Used when applying a document whose `props` field is present.
    pub fn replace_props(&mut self, specs: Vec<PropSpec>, graph: &mut SceneGraph) {
        for entry in self.props.drain(..) {
            graph.remove(entry.node);
        }
        debug!("prop set replaced with {} entries", specs.len());
        for spec in specs {
            self.add_prop_at(spec.kind, spec.name, spec.transform, graph);
        }
    }

    /// Registers an externally constructed model root and tags every node
    /// beneath it, so hit resolution can walk back to the root.
    pub fn register_imported_model(
        &mut self,
        root: NodeId,
        graph: &mut SceneGraph,
    ) -> Option<NodeId> {
        if !graph.contains(root) {
            warn!("register_imported_model on a stale root handle");
            return None;
        }

        // Breadth-first over the subtree, tagging everything but the root.
        let mut pending = graph.children_of(root);
        while let Some(id) = pending.pop() {
            pending.extend(graph.children_of(id));
            if let Some(node) = graph.get_mut(id) {
                node.tag = NodeTag::ModelPart { root };
            }
        }
        if let Some(node) = graph.get_mut(root) {
            node.tag = NodeTag::ModelRoot;
        }

        let name = graph.get(root).map(|n| n.name.clone()).unwrap_or_default();
        debug!("imported model {name} registered");
        self.models.push(ModelEntry { name, root });
        Some(root)
    }

    /// Releases an imported model and its whole subtree. Silent no-op for
    /// an unregistered handle.
    pub fn remove_model(&mut self, root: NodeId, graph: &mut SceneGraph) {
        let Some(index) = self.models.iter().position(|m| m.root == root) else {
            debug!("remove_model on an unregistered handle, ignoring");
            return;
        };
        let entry = self.models.remove(index);
        graph.remove_subtree(entry.root);
        debug!("imported model {} removed", entry.name);
    }

    pub fn is_model_root(&self, node: NodeId) -> bool {
        self.models.iter().any(|m| m.root == node)
    }

    /// Resolves a node to the root of the imported model it belongs to:
    /// either the root itself or any tagged node beneath it.
    pub fn model_by_node(&self, graph: &SceneGraph, node: NodeId) -> Option<NodeId> {
        match graph.get(node)?.tag {
            NodeTag::ModelRoot if self.is_model_root(node) => Some(node),
            NodeTag::ModelPart { root } if self.is_model_root(root) => Some(root),
            _ => None,
        }
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Appends a counter until the name is free, so two balls become
    /// "ball" and "ball (1)".
    fn ensure_unique_name(&self, desired: &str) -> String {
        let mut counter = 0;
        let mut candidate = desired.to_string();
        while self.props.iter().any(|p| p.name == candidate) {
            counter += 1;
            candidate = format!("{} ({})", desired, counter);
        }
        candidate
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_prop_places_within_bounds() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();

        for _ in 0..16 {
            let node = registry.add_prop(PropKind::Ball, &mut graph);
            let position = graph.get(node).unwrap().local.position;
            assert!(position.x.abs() <= PLACEMENT_BOUND);
            assert!(position.z.abs() <= PLACEMENT_BOUND);
            assert_eq!(position.y, 0.0);
        }
    }

    #[test]
    fn test_prop_names_stay_unique() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();

        registry.add_prop(PropKind::Ball, &mut graph);
        registry.add_prop(PropKind::Ball, &mut graph);
        registry.add_prop(PropKind::Ball, &mut graph);

        let names: Vec<_> = registry.props().map(|(_, _, name)| name).collect();
        assert_eq!(names, vec!["ball", "ball (1)", "ball (2)"]);
    }

    #[test]
    fn test_remove_prop_is_silent_for_unknown_handles() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();

        let node = registry.add_prop(PropKind::Cube, &mut graph);
        registry.remove_prop(node, &mut graph);
        assert_eq!(registry.prop_count(), 0);
        assert!(!graph.contains(node));

        // Stale handle, foreign handle: both no-ops.
        registry.remove_prop(node, &mut graph);
        let foreign = graph.insert(Node::new("not a prop", NodeTag::Joint));
        registry.remove_prop(foreign, &mut graph);
        assert!(graph.contains(foreign));
    }

    #[test]
    fn test_replace_props_is_wholesale() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();

        let old = registry.add_prop(PropKind::Ball, &mut graph);
        registry.replace_props(
            vec![
                PropSpec {
                    name: "chair".into(),
                    kind: PropKind::Chair,
                    transform: Transform::identity(),
                },
                PropSpec {
                    name: "staff".into(),
                    kind: PropKind::Staff,
                    transform: Transform::identity(),
                },
            ],
            &mut graph,
        );

        assert!(!graph.contains(old));
        assert_eq!(registry.prop_count(), 2);
        let kinds: Vec<_> = registry.props().map(|(_, kind, _)| kind).collect();
        assert_eq!(kinds, vec![PropKind::Chair, PropKind::Staff]);
    }

    #[test]
    fn test_register_model_tags_descendants() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();

        let root = graph.insert(Node::new("robot", NodeTag::ModelRoot));
        let torso = graph.insert(Node::new("torso", NodeTag::ModelRoot).with_parent(root));
        let arm = graph.insert(Node::new("arm", NodeTag::ModelRoot).with_parent(torso));

        registry.register_imported_model(root, &mut graph).unwrap();

        assert_eq!(graph.get(torso).unwrap().tag, NodeTag::ModelPart { root });
        assert_eq!(graph.get(arm).unwrap().tag, NodeTag::ModelPart { root });
        assert_eq!(registry.model_by_node(&graph, arm), Some(root));
        assert_eq!(registry.model_by_node(&graph, root), Some(root));
    }

    #[test]
    fn test_remove_model_frees_subtree() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();

        let root = graph.insert(Node::new("robot", NodeTag::ModelRoot));
        let torso = graph.insert(Node::new("torso", NodeTag::ModelRoot).with_parent(root));
        registry.register_imported_model(root, &mut graph);

        registry.remove_model(root, &mut graph);
        assert!(!graph.contains(root));
        assert!(!graph.contains(torso));
        assert_eq!(registry.model_count(), 0);
    }

    #[test]
    fn test_kind_guess_for_legacy_names() {
        assert_eq!(PropKind::guess("wooden cube (2)"), PropKind::Cube);
        assert_eq!(PropKind::guess("Chair"), PropKind::Chair);
        assert_eq!(PropKind::guess("walking stick"), PropKind::Staff);
        assert_eq!(PropKind::guess("mystery"), PropKind::Ball);
    }
}
