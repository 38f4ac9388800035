//! # Pose Codec
//!
//! Serializes the current pose into a [`PoseDocument`] and applies documents
//! back onto the scene. Application is deliberately lenient at the entry
//! level — unknown joint names and malformed rotation arrays are skipped,
//! never errors — while the document shape itself is validated and rejected
//! with a [`ValidationError`].
//!
//! Applying is not transactional: joint rotations land before the `props`
//! field is examined, so a malformed `props` value leaves the joints
//! already updated. The prop set itself is rebuilt validate-then-replace:
//! every descriptor is parsed before the current set is dropped, so a bad
//! entry can never leave a half-rebuilt prop set.

use std::collections::BTreeMap;

use cgmath::{Quaternion, Vector3};
use log::debug;
use serde_json::Value;

use crate::error::ValidationError;
use crate::rig::RigModel;
use crate::scene::{EntityRegistry, PropKind, PropSpec, SceneGraph, Transform};

use super::document::{PoseDocument, PropDescriptor, POSE_DOCUMENT_VERSION};

fn quat_to_array(q: Quaternion<f32>) -> [f32; 4] {
    [q.v.x, q.v.y, q.v.z, q.s]
}

fn array_to_quat(a: [f32; 4]) -> Quaternion<f32> {
    Quaternion::new(a[3], a[0], a[1], a[2])
}

fn parse_f32_array<const N: usize>(value: &Value) -> Option<[f32; N]> {
    let items = value.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item.as_f64()? as f32;
    }
    Some(out)
}

/// Captures the current pose: rotation-only entries for every joint, full
/// transform descriptors for every prop, free-text notes, and a timestamp.
pub fn serialize(
    rig: &RigModel,
    registry: &EntityRegistry,
    graph: &SceneGraph,
    notes: &str,
) -> PoseDocument {
    let mut joints = BTreeMap::new();
    for id in rig.joints() {
        if let Some(node) = graph.get(rig.node_of(id)) {
            joints.insert(rig.name_of(id).to_string(), quat_to_array(node.local.rotation));
        }
    }

    let props: Vec<PropDescriptor> = registry
        .props()
        .filter_map(|(node, kind, name)| {
            let local = graph.get(node)?.local;
            Some(PropDescriptor {
                name: name.to_string(),
                kind: Some(kind),
                position: local.position.into(),
                rotation: quat_to_array(local.rotation),
                scale: local.scale.into(),
            })
        })
        .collect();

    PoseDocument {
        version: POSE_DOCUMENT_VERSION,
        notes: notes.to_string(),
        joints,
        props: Some(props),
        saved_at: chrono::Utc::now().to_rfc3339(),
    }
}

/// Applies every recognized entry of `joints` onto the rig. Unknown names
/// and malformed rotation arrays are skipped.
fn apply_joint_entries(
    obj: &serde_json::Map<String, Value>,
    rig: &RigModel,
    graph: &mut SceneGraph,
) -> Result<(), ValidationError> {
    let Some(joints_value) = obj.get("joints") else {
        return Ok(());
    };
    let entries = joints_value
        .as_object()
        .ok_or(ValidationError::MalformedJoints)?;

    for (name, value) in entries {
        let Some(joint) = rig.joint(name) else {
            debug!("unknown joint {name} in document, ignoring");
            continue;
        };
        let Some(rotation) = parse_f32_array::<4>(value) else {
            debug!("malformed rotation for joint {name}, ignoring");
            continue;
        };
        if let Some(node) = graph.get_mut(rig.node_of(joint)) {
            node.local.rotation = array_to_quat(rotation);
        }
    }
    Ok(())
}

/// Parses one prop descriptor, leniently. `None` means the entry is
/// skipped. The explicit type field wins; without it the kind is guessed
/// from the name the way legacy documents expect.
fn parse_prop_spec(value: &Value) -> Option<PropSpec> {
    let obj = value.as_object()?;
    let name = obj.get("name")?.as_str()?.to_string();
    let kind = match obj.get("type") {
        Some(explicit) => serde_json::from_value::<PropKind>(explicit.clone()).ok()?,
        None => PropKind::guess(&name),
    };
    let position: [f32; 3] = parse_f32_array(obj.get("position")?)?;
    let rotation: [f32; 4] = parse_f32_array(obj.get("rotation")?)?;
    let scale: [f32; 3] = parse_f32_array(obj.get("scale")?)?;
    Some(PropSpec {
        name,
        kind,
        transform: Transform {
            position: Vector3::from(position),
            rotation: array_to_quat(rotation),
            scale: Vector3::from(scale),
        },
    })
}

/// Applies a full document: joint rotations, then — only if the `props`
/// field is present — a wholesale replacement of the current prop set.
/// Without a `props` field the existing props are left untouched.
pub fn apply_full(
    doc: &Value,
    rig: &RigModel,
    registry: &mut EntityRegistry,
    graph: &mut SceneGraph,
) -> Result<(), ValidationError> {
    let obj = doc.as_object().ok_or(ValidationError::NotAnObject)?;

    apply_joint_entries(obj, rig, graph)?;

    match obj.get("props") {
        None => {}
        Some(Value::Array(entries)) => {
            let specs: Vec<PropSpec> = entries.iter().filter_map(parse_prop_spec).collect();
            if specs.len() < entries.len() {
                debug!(
                    "{} malformed prop descriptors skipped",
                    entries.len() - specs.len()
                );
            }
            registry.replace_props(specs, graph);
        }
        Some(_) => return Err(ValidationError::MalformedProps),
    }
    Ok(())
}

/// Applies only the joint rotations of a document, on top of a clean
/// identity pose. Props are never touched — this is the preset path, used
/// to swap the figure's pose without disturbing scene dressing.
pub fn apply_joints_only(
    doc: &Value,
    rig: &RigModel,
    graph: &mut SceneGraph,
) -> Result<(), ValidationError> {
    let obj = doc.as_object().ok_or(ValidationError::NotAnObject)?;
    rig.reset_rotations(graph);
    apply_joint_entries(obj, rig, graph)
}
