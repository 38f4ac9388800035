//! # Symmetry Engine
//!
//! Mirrors rotation and scale edits from one bilateral side of the rig onto
//! its counterpart. Scoped to joints only — props and imported models are
//! never mirrored.
//!
//! Rotation mirroring reflects the edited rotation across the rig's sagittal
//! plane: with the rotation as a 3x3 matrix R and the plane's reflection
//! M = diag(-1, 1, 1), the mirrored rotation is R' = M * R * M, converted
//! back to a quaternion and renormalized. The result is written onto the
//! counterpart as an absolute set, never routed back through the edit
//! notification path, so a single edit can never trigger a second mirror
//! pass.

use cgmath::{InnerSpace, Matrix3, Quaternion};
use log::debug;

use crate::scene::SceneGraph;

use super::model::{counterpart, JointId, RigModel};

/// Reflection across the sagittal (YZ) plane.
fn sagittal_reflection() -> Matrix3<f32> {
    Matrix3::new(
        -1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// Reflects a rotation across the sagittal plane.
///
/// The composition M * R * M can carry a small scale artifact out of the
/// matrix-to-quaternion conversion; normalization cancels it. Applying the
/// mirror twice returns the original rotation within float tolerance.
pub fn mirror_rotation(rotation: Quaternion<f32>) -> Quaternion<f32> {
    let m = sagittal_reflection();
    let r = Matrix3::from(rotation);
    Quaternion::from(m * r * m).normalize()
}

/// Stateful on/off toggle around the mirroring rules.
pub struct SymmetryEngine {
    enabled: bool,
}

impl SymmetryEngine {
    pub fn new() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Finds the counterpart joint, if the name has one and the rig knows it.
    fn counterpart_of(&self, rig: &RigModel, joint: JointId) -> Option<JointId> {
        let name = rig.name_of(joint);
        let other = counterpart(name)?;
        let found = rig.joint(&other);
        if found.is_none() {
            debug!("no counterpart joint named {other}, skipping mirror");
        }
        found
    }

    /// Mirrors a rotation edit on `joint` onto its counterpart.
    ///
    /// Fires once per handle-edit notification, edited side to counterpart
    /// side. A joint with no counterpart is a silent no-op.
    pub fn on_rotation_edited(&self, rig: &RigModel, graph: &mut SceneGraph, joint: JointId) {
        if !self.enabled {
            return;
        }
        let Some(other) = self.counterpart_of(rig, joint) else {
            return;
        };
        let Some(rotation) = graph.get(rig.node_of(joint)).map(|n| n.local.rotation) else {
            return;
        };
        if let Some(node) = graph.get_mut(rig.node_of(other)) {
            node.local.rotation = mirror_rotation(rotation);
        }
    }

    /// Mirrors a scale edit on `joint`'s visible part onto the counterpart's
    /// part, copying the scale vector verbatim — non-uniform scale here is an
    /// orientation-independent magnitude, so no reflection is involved.
    /// Either side lacking a part is a silent no-op.
    pub fn on_scale_edited(&self, rig: &RigModel, graph: &mut SceneGraph, joint: JointId) {
        if !self.enabled {
            return;
        }
        let Some(other) = self.counterpart_of(rig, joint) else {
            return;
        };
        let (Some(part), Some(other_part)) = (rig.part_of(joint), rig.part_of(other)) else {
            debug!("scale mirror skipped, joint pair has no visible part");
            return;
        };
        let Some(scale) = graph.get(part).map(|n| n.local.scale) else {
            return;
        };
        if let Some(node) = graph.get_mut(other_part) {
            node.local.scale = scale;
        }
    }
}

impl Default for SymmetryEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::model::RigModel;
    use cgmath::{Rad, Rotation3, Vector3};

    fn assert_quat_eq(a: Quaternion<f32>, b: Quaternion<f32>) {
        // q and -q are the same rotation.
        let dot = a.dot(b).abs();
        assert!(dot > 1.0 - 1e-5, "quaternions differ: {a:?} vs {b:?}");
    }

    #[test]
    fn test_mirror_is_an_involution() {
        let q = Quaternion::from_axis_angle(Vector3::new(0.3, 0.5, 0.8).normalize(), Rad(1.1));
        assert_quat_eq(mirror_rotation(mirror_rotation(q)), q);
    }

    #[test]
    fn test_mirror_keeps_x_rotation_and_flips_y() {
        let rx = Quaternion::from_angle_x(Rad(0.7));
        assert_quat_eq(mirror_rotation(rx), rx);

        let ry = Quaternion::from_angle_y(Rad(0.7));
        assert_quat_eq(mirror_rotation(ry), Quaternion::from_angle_y(Rad(-0.7)));
    }

    #[test]
    fn test_mirror_output_is_normalized() {
        let q = Quaternion::from_axis_angle(Vector3::new(1.0, 2.0, -0.5).normalize(), Rad(2.4));
        let mirrored = mirror_rotation(q);
        assert!((mirrored.magnitude() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotation_edit_mirrors_onto_counterpart() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let mut engine = SymmetryEngine::new();
        engine.set_enabled(true);

        let left = rig.joint("l_shoulder").unwrap();
        let right = rig.joint("r_shoulder").unwrap();
        let q = Quaternion::from_angle_z(Rad(0.9));

        graph.get_mut(rig.node_of(left)).unwrap().local.rotation = q;
        engine.on_rotation_edited(&rig, &mut graph, left);

        let mirrored = graph.get(rig.node_of(right)).unwrap().local.rotation;
        assert_quat_eq(mirrored, mirror_rotation(q));
    }

    #[test]
    fn test_disabled_engine_mirrors_nothing() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let engine = SymmetryEngine::new();

        let left = rig.joint("l_shoulder").unwrap();
        let right = rig.joint("r_shoulder").unwrap();
        graph.get_mut(rig.node_of(left)).unwrap().local.rotation =
            Quaternion::from_angle_z(Rad(0.9));
        engine.on_rotation_edited(&rig, &mut graph, left);

        let untouched = graph.get(rig.node_of(right)).unwrap().local.rotation;
        assert_quat_eq(untouched, Quaternion::from_angle_z(Rad(0.0)));
    }

    #[test]
    fn test_unpaired_joint_is_a_silent_noop() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let mut engine = SymmetryEngine::new();
        engine.set_enabled(true);

        let spine = rig.joint("spine").unwrap();
        graph.get_mut(rig.node_of(spine)).unwrap().local.rotation =
            Quaternion::from_angle_x(Rad(0.4));
        // Must not panic or touch anything else.
        engine.on_rotation_edited(&rig, &mut graph, spine);
    }

    #[test]
    fn test_scale_edit_copies_part_scale_verbatim() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let mut engine = SymmetryEngine::new();
        engine.set_enabled(true);

        let left = rig.joint("l_knee").unwrap();
        let right = rig.joint("r_knee").unwrap();
        let scale = Vector3::new(1.5, 0.8, 1.2);

        let part = rig.part_of(left).unwrap();
        graph.get_mut(part).unwrap().local.scale = scale;
        engine.on_scale_edited(&rig, &mut graph, left);

        let other_part = rig.part_of(right).unwrap();
        assert_eq!(graph.get(other_part).unwrap().local.scale, scale);
        // Joint nodes themselves keep identity scale.
        let joint_scale = graph.get(rig.node_of(right)).unwrap().local.scale;
        assert_eq!(joint_scale, Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_editing_the_counterpart_mirrors_back() {
        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        let mut engine = SymmetryEngine::new();
        engine.set_enabled(true);

        let right = rig.joint("r_elbow").unwrap();
        let left = rig.joint("l_elbow").unwrap();
        let q = Quaternion::from_angle_y(Rad(0.35));

        graph.get_mut(rig.node_of(right)).unwrap().local.rotation = q;
        engine.on_rotation_edited(&rig, &mut graph, right);

        assert_quat_eq(
            graph.get(rig.node_of(left)).unwrap().local.rotation,
            mirror_rotation(q),
        );
    }
}
