//! Local transform carried by every scene node.
//!
//! Stored decomposed rather than as a matrix: the pose codec round-trips
//! position/rotation/scale individually, and the symmetry engine rewrites
//! rotations in place, so the decomposed form is the authoritative one.

use cgmath::{One, Quaternion, Vector3, Zero};

/// Decomposed local transform: position, rotation quaternion, scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    /// Identity transform: zero position, identity rotation, unit scale.
    pub fn identity() -> Self {
        Self {
            position: Vector3::zero(),
            rotation: Quaternion::one(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Identity transform at the given position.
    pub fn at_position(position: Vector3<f32>) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
