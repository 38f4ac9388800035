//! # Pose Editor
//!
//! The session context that owns the whole core and dispatches every
//! mutation: scene graph, rig, entity registry, rest snapshot, symmetry
//! engine, the current edit mode and the current selection.
//!
//! Selection is an explicit value on this context — collaborators hand hits
//! and mode switches in, and read the resolved selection and handle target
//! back out. All methods mutate synchronously; there is exactly one logical
//! mutator at any instant, so a handle edit, its symmetry mirror, and the
//! target re-evaluation all land within the same call and no half-mirrored
//! state is ever visible across a render boundary.

use cgmath::{Quaternion, Vector3};
use log::debug;

use crate::error::ValidationError;
use crate::interaction::{resolve, transform_target, EditMode, PickHit, Selection};
use crate::pose::{codec, presets, PoseDocument};
use crate::rig::{RestSnapshot, RigModel, SymmetryEngine};
use crate::scene::{
    EntityRegistry, ImportSender, ImportStatus, NodeId, PendingImport, PropKind, SceneGraph,
};

/// Where the transform handle currently sits, plus whether the edit outline
/// still needs a refresh. Detaching the handle suppresses the pending
/// refresh along with it.
#[derive(Debug, Clone, Copy, Default)]
struct HandleState {
    target: Option<NodeId>,
    outline_refresh_pending: bool,
}

/// The posing session: one rig, its rest pose, scene dressing, and the
/// interaction state driving it all.
pub struct PoseEditor {
    graph: SceneGraph,
    rig: RigModel,
    registry: EntityRegistry,
    rest: RestSnapshot,
    symmetry: SymmetryEngine,
    mode: EditMode,
    selection: Option<Selection>,
    handle: HandleState,
}

impl PoseEditor {
    /// Builds the rig and captures its rest snapshot, once.
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let rest = RestSnapshot::capture(&rig, &graph);
        Self {
            graph,
            rig,
            registry: EntityRegistry::new(),
            rest,
            symmetry: SymmetryEngine::new(),
            mode: EditMode::Orbit,
            selection: None,
            handle: HandleState::default(),
        }
    }

    // Scene access for collaborators (picker, renderer)

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn rig(&self) -> &RigModel {
        &self.rig
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    // Selection and mode

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Switches the edit mode and re-targets the handle.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
        self.refresh_target();
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Resolves a pick reported by the input collaborator and makes it the
    /// current selection.
    pub fn select_hit(&mut self, hit: &PickHit) -> Option<Selection> {
        self.selection = resolve(hit, &self.graph, &self.rig, &self.registry);
        self.refresh_target();
        self.selection
    }

    /// Selects an already-resolved entity (UI lists, tests).
    pub fn select(&mut self, selection: Selection) {
        self.selection = Some(selection);
        self.refresh_target();
    }

    /// Selects a joint by name. Returns false for an unknown name.
    pub fn select_joint(&mut self, name: &str) -> bool {
        match self.rig.joint(name) {
            Some(joint) => {
                self.select(Selection::Joint(joint));
                true
            }
            None => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.refresh_target();
    }

    /// The node the transform handle is attached to, if any.
    pub fn handle_target(&self) -> Option<NodeId> {
        self.handle.target
    }

    /// True while the edit outline around the handle target still needs
    /// redrawing. Reading it clears the flag.
    pub fn take_outline_refresh(&mut self) -> bool {
        std::mem::take(&mut self.handle.outline_refresh_pending)
    }

    /// Re-evaluates the transform target from the current mode and
    /// selection. A detached handle also drops any pending outline refresh.
    fn refresh_target(&mut self) {
        let target = self
            .selection
            .as_ref()
            .and_then(|sel| transform_target(self.mode, sel, &self.rig));
        self.handle = match target {
            Some(node) => HandleState {
                target: Some(node),
                outline_refresh_pending: true,
            },
            None => HandleState::default(),
        };
    }

    // Symmetry

    pub fn symmetry_enabled(&self) -> bool {
        self.symmetry.is_enabled()
    }

    pub fn set_symmetry(&mut self, enabled: bool) {
        self.symmetry.set_enabled(enabled);
        debug!("symmetry {}", if enabled { "enabled" } else { "disabled" });
    }

    // Handle-edit notifications

    /// A rotation dragged on the handle. Mirrors onto the counterpart when
    /// the selection is a joint and symmetry is on.
    pub fn apply_handle_rotation(&mut self, rotation: Quaternion<f32>) {
        let Some(target) = self.handle.target else {
            return;
        };
        if let Some(node) = self.graph.get_mut(target) {
            node.local.rotation = rotation;
        }
        if let Some(Selection::Joint(joint)) = self.selection {
            self.symmetry
                .on_rotation_edited(&self.rig, &mut self.graph, joint);
        }
    }

    /// A translation dragged on the handle. Never mirrored.
    pub fn apply_handle_translation(&mut self, position: Vector3<f32>) {
        let Some(target) = self.handle.target else {
            return;
        };
        if let Some(node) = self.graph.get_mut(target) {
            node.local.position = position;
        }
    }

    /// A scale dragged on the handle. For a joint selection the target is
    /// the joint's visible part, so the joint's own scale stays untouched;
    /// the part scale is mirrored verbatim when symmetry is on.
    pub fn apply_handle_scale(&mut self, scale: Vector3<f32>) {
        let Some(target) = self.handle.target else {
            return;
        };
        if let Some(node) = self.graph.get_mut(target) {
            node.local.scale = scale;
        }
        if let Some(Selection::Joint(joint)) = self.selection {
            self.symmetry
                .on_scale_edited(&self.rig, &mut self.graph, joint);
        }
    }

    // Props and imported models

    pub fn add_prop(&mut self, kind: PropKind) -> NodeId {
        self.registry.add_prop(kind, &mut self.graph)
    }

    /// Removes a prop; silent no-op for anything unregistered. A removed
    /// prop that was selected drops the selection with it.
    pub fn remove_prop(&mut self, node: NodeId) {
        self.registry.remove_prop(node, &mut self.graph);
        self.revalidate_selection();
    }

    /// Starts a model import. Hand the sender to the import collaborator
    /// and poll the pending handle with [`PoseEditor::poll_import`].
    pub fn begin_import(&mut self) -> (PendingImport, ImportSender) {
        PendingImport::begin()
    }

    pub fn poll_import(&mut self, pending: &mut PendingImport) -> ImportStatus {
        pending.try_finish(&mut self.graph, &mut self.registry)
    }

    pub fn remove_model(&mut self, root: NodeId) {
        self.registry.remove_model(root, &mut self.graph);
        self.revalidate_selection();
    }

    // Pose persistence

    /// Captures the current pose as a document.
    pub fn save_pose(&self, notes: &str) -> PoseDocument {
        codec::serialize(&self.rig, &self.registry, &self.graph, notes)
    }

    /// Applies a full document: joint rotations, and the prop set if the
    /// document carries one.
    pub fn load_pose(&mut self, doc: &serde_json::Value) -> Result<(), ValidationError> {
        let result = codec::apply_full(doc, &self.rig, &mut self.registry, &mut self.graph);
        self.revalidate_selection();
        result
    }

    /// Applies a built-in preset by name: joint rotations only, on top of a
    /// clean identity pose. Props are never disturbed. Returns false for an
    /// unknown preset.
    pub fn apply_preset(&mut self, name: &str) -> bool {
        let Some(preset) = presets::find(name) else {
            debug!("unknown preset {name}");
            return false;
        };
        codec::apply_joints_only(&preset.to_value(), &self.rig, &mut self.graph)
            .expect("built-in presets are well-formed");
        true
    }

    /// Sets every joint rotation back to identity, positions and scales
    /// untouched.
    pub fn reset_pose(&mut self) {
        self.rig.reset_rotations(&mut self.graph);
    }

    /// Restores the authored rest pose, part scales included. The only way
    /// back from scale-mode edits.
    pub fn restore_rest(&mut self) {
        self.rest.restore(&self.rig, &mut self.graph);
    }

    /// Drops the selection if its node has gone away (prop replaced by a
    /// loaded document, model removed, ...).
    fn revalidate_selection(&mut self) {
        let alive = match self.selection {
            None => return,
            Some(Selection::Joint(joint)) => self.graph.contains(self.rig.node_of(joint)),
            Some(Selection::Prop(node)) => self.registry.is_prop(node),
            Some(Selection::Model(node)) => self.registry.is_model_root(node),
            Some(Selection::Node(node)) => self.graph.contains(node),
        };
        if !alive {
            debug!("selection went stale, clearing");
            self.clear_selection();
        } else {
            self.refresh_target();
        }
    }
}

impl Default for PoseEditor {
    fn default() -> Self {
        Self::new()
    }
}
