//! # Model Import Boundary
//!
//! The one operation in the core that legitimately suspends. The import
//! collaborator is handed an [`ImportSender`] and eventually delivers either
//! a [`ModelPrototype`] or a failure; until that happens nothing touches the
//! scene graph or the entity registry.
//!
//! A prototype is pure data — a named node tree with transforms — so a
//! failed or abandoned import has nothing to roll back: the prototype is
//! simply dropped. Dropping the [`PendingImport`] abandons the import; the
//! collaborator's eventual send fails and is ignored.

use futures::channel::oneshot;
use log::{debug, warn};

use crate::error::ImportError;

use super::graph::{Node, NodeId, NodeTag, SceneGraph};
use super::registry::EntityRegistry;
use super::transform::Transform;

/// A node of a not-yet-instantiated model tree.
#[derive(Debug, Clone)]
pub struct PrototypeNode {
    pub name: String,
    pub transform: Transform,
    pub children: Vec<PrototypeNode>,
}

impl PrototypeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: PrototypeNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A fully resolved model, ready to instantiate. The root transform is the
/// one edit-safe handle; internal nodes stay opaque except to hit
/// resolution.
#[derive(Debug, Clone)]
pub struct ModelPrototype {
    pub root: PrototypeNode,
}

/// The collaborator's half of an import: send exactly one result.
pub type ImportSender = oneshot::Sender<Result<ModelPrototype, ImportError>>;

/// Outcome of polling a pending import.
pub enum ImportStatus {
    /// The collaborator has not resolved yet; registry untouched.
    Pending,
    /// The model was instantiated and registered under this root.
    Ready(NodeId),
    /// The import failed; registry untouched, temporaries released.
    Failed(ImportError),
}

/// The core's half of an import in flight.
pub struct PendingImport {
    receiver: oneshot::Receiver<Result<ModelPrototype, ImportError>>,
}

impl PendingImport {
    /// Starts an import: the returned sender goes to the collaborator, the
    /// returned pending handle is polled by the caller.
    pub fn begin() -> (Self, ImportSender) {
        let (sender, receiver) = oneshot::channel();
        (Self { receiver }, sender)
    }

    /// Polls the collaborator and, on success, instantiates the prototype
    /// into the graph and registers it.
    ///
    /// After a terminal status (`Ready` or `Failed`) the pending handle is
    /// spent and should be dropped; polling again reports `Failed`.
    pub fn try_finish(
        &mut self,
        graph: &mut SceneGraph,
        registry: &mut EntityRegistry,
    ) -> ImportStatus {
        match self.receiver.try_recv() {
            Ok(None) => ImportStatus::Pending,
            Ok(Some(Ok(prototype))) => {
                let root = instantiate(&prototype.root, None, graph);
                registry.register_imported_model(root, graph);
                debug!("import finished, model rooted at {:?}", root);
                ImportStatus::Ready(root)
            }
            Ok(Some(Err(err))) => {
                warn!("model import failed: {err}");
                ImportStatus::Failed(err)
            }
            Err(oneshot::Canceled) => {
                warn!("import collaborator disconnected");
                ImportStatus::Failed(ImportError::Disconnected)
            }
        }
    }
}

/// Depth-first instantiation. Tags are provisional; registration rewrites
/// them with the root back-reference.
fn instantiate(proto: &PrototypeNode, parent: Option<NodeId>, graph: &mut SceneGraph) -> NodeId {
    let mut node = Node::new(proto.name.clone(), NodeTag::ModelRoot);
    node.local = proto.transform;
    node.parent = parent;
    let id = graph.insert(node);
    for child in &proto.children {
        instantiate(child, Some(id), graph);
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn robot_prototype() -> ModelPrototype {
        ModelPrototype {
            root: PrototypeNode::new("robot")
                .with_child(PrototypeNode::new("torso").with_child(PrototypeNode::new("arm"))),
        }
    }

    #[test]
    fn test_pending_until_collaborator_resolves() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();
        let (mut pending, sender) = PendingImport::begin();

        assert!(matches!(
            pending.try_finish(&mut graph, &mut registry),
            ImportStatus::Pending
        ));
        assert!(graph.is_empty());

        sender.send(Ok(robot_prototype())).ok();
        let ImportStatus::Ready(root) = pending.try_finish(&mut graph, &mut registry) else {
            panic!("expected Ready");
        };
        assert_eq!(graph.len(), 3);
        assert_eq!(registry.model_count(), 1);
        assert!(registry.is_model_root(root));
    }

    #[test]
    fn test_failure_leaves_registry_unchanged() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();
        let (mut pending, sender) = PendingImport::begin();

        sender
            .send(Err(ImportError::Collaborator(anyhow!("bad file header"))))
            .ok();

        assert!(matches!(
            pending.try_finish(&mut graph, &mut registry),
            ImportStatus::Failed(ImportError::Collaborator(_))
        ));
        assert!(graph.is_empty());
        assert_eq!(registry.model_count(), 0);
    }

    #[test]
    fn test_disconnected_collaborator_is_a_failure() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();
        let (mut pending, sender) = PendingImport::begin();
        drop(sender);

        assert!(matches!(
            pending.try_finish(&mut graph, &mut registry),
            ImportStatus::Failed(ImportError::Disconnected)
        ));
    }

    #[test]
    fn test_abandoned_import_ignores_late_resolution() {
        let (pending, sender) = PendingImport::begin();
        drop(pending);

        // The late send fails and mutates nothing; the collaborator just
        // sees its payload handed back.
        assert!(sender.send(Ok(robot_prototype())).is_err());
    }

    #[test]
    fn test_instantiated_tree_matches_prototype() {
        let mut graph = SceneGraph::new();
        let mut registry = EntityRegistry::new();
        let (mut pending, sender) = PendingImport::begin();
        sender.send(Ok(robot_prototype())).ok();

        let ImportStatus::Ready(root) = pending.try_finish(&mut graph, &mut registry) else {
            panic!("expected Ready");
        };
        let children = graph.children_of(root);
        assert_eq!(children.len(), 1);
        assert_eq!(graph.get(children[0]).unwrap().name, "torso");
        assert_eq!(graph.get(root).unwrap().tag, NodeTag::ModelRoot);
    }
}
