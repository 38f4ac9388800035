//! # Transform Target Policy
//!
//! Decides which node actually receives the transform handle for a given
//! edit mode and selection. Pure function of its inputs; the editor
//! re-evaluates it whenever selection or mode changes.
//!
//! The one non-obvious row is scale mode on a joint: a joint's transform is
//! inherited multiplicatively by every descendant, so scaling the joint node
//! would compound down the whole chain and distort the rig's proportions.
//! Scaling the joint's visible part changes apparent size without
//! perturbing skeletal spacing. A joint with no part falls back to the
//! joint node itself.

use crate::rig::RigModel;
use crate::scene::NodeId;

use super::{EditMode, Selection};

/// The node the transform handle should attach to, or `None` when the mode
/// takes no handle at all (orbit).
pub fn transform_target(
    mode: EditMode,
    selection: &Selection,
    rig: &RigModel,
) -> Option<NodeId> {
    match mode {
        EditMode::Orbit => None,
        EditMode::Move | EditMode::Rotate => Some(match *selection {
            Selection::Joint(joint) => rig.node_of(joint),
            Selection::Prop(node) | Selection::Model(node) | Selection::Node(node) => node,
        }),
        EditMode::Scale => Some(match *selection {
            // The scale-mode joint exception.
            Selection::Joint(joint) => rig.part_of(joint).unwrap_or_else(|| rig.node_of(joint)),
            Selection::Prop(node) | Selection::Model(node) | Selection::Node(node) => node,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Node, NodeTag, SceneGraph};

    #[test]
    fn test_orbit_mode_never_targets() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let prop = graph.insert(Node::new("ball", NodeTag::Prop));

        let selections = [
            Selection::Joint(rig.joint("head").unwrap()),
            Selection::Prop(prop),
            Selection::Model(prop),
            Selection::Node(prop),
        ];
        for selection in selections {
            assert_eq!(transform_target(EditMode::Orbit, &selection, &rig), None);
        }
    }

    #[test]
    fn test_move_and_rotate_target_the_entity_itself() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let joint = rig.joint("l_elbow").unwrap();
        let prop = graph.insert(Node::new("ball", NodeTag::Prop));

        for mode in [EditMode::Move, EditMode::Rotate] {
            assert_eq!(
                transform_target(mode, &Selection::Joint(joint), &rig),
                Some(rig.node_of(joint))
            );
            assert_eq!(
                transform_target(mode, &Selection::Prop(prop), &rig),
                Some(prop)
            );
        }
    }

    #[test]
    fn test_scale_mode_targets_the_joints_part() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let joint = rig.joint("l_elbow").unwrap();

        assert_eq!(
            transform_target(EditMode::Scale, &Selection::Joint(joint), &rig),
            rig.part_of(joint)
        );
    }

    #[test]
    fn test_scale_mode_falls_back_to_partless_joint() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let root = rig.joint("root").unwrap();
        assert_eq!(rig.part_of(root), None);

        assert_eq!(
            transform_target(EditMode::Scale, &Selection::Joint(root), &rig),
            Some(rig.node_of(root))
        );
    }

    #[test]
    fn test_model_selection_always_targets_the_root() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let root = graph.insert(Node::new("robot", NodeTag::ModelRoot));

        for mode in [EditMode::Move, EditMode::Rotate, EditMode::Scale] {
            assert_eq!(
                transform_target(mode, &Selection::Model(root), &rig),
                Some(root)
            );
        }
    }
}
