//! # Pose Document
//!
//! The serialized pose shape exported to and consumed from the outside:
//! gallery payloads, preset files, clipboard exchange. Joint entries are
//! rotation-only; props carry their full transform.
//!
//! ```json
//! { "version": 1, "notes": "",
//!   "joints": { "l_shoulder": [0.0, 0.0, 0.38, 0.92] },
//!   "props": [ { "name": "ball", "type": "ball",
//!                "position": [0,0,0], "rotation": [0,0,0,1], "scale": [1,1,1] } ],
//!   "savedAt": "2026-08-08T12:00:00+00:00" }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::scene::PropKind;

/// Current document format version.
pub const POSE_DOCUMENT_VERSION: u32 = 1;

/// Full transform descriptor of one prop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropDescriptor {
    pub name: String,
    /// Explicit prop type. Legacy documents omit it, in which case the type
    /// is guessed from the name on apply.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropKind>,
    pub position: [f32; 3],
    /// `[qx, qy, qz, qw]`
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

/// A complete captured pose: joint rotations, prop transforms, notes, and
/// when it was taken.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseDocument {
    pub version: u32,
    #[serde(default)]
    pub notes: String,
    /// Joint name to `[qx, qy, qz, qw]`, in stable name order.
    pub joints: BTreeMap<String, [f32; 4]>,
    /// Absent means "leave the current prop set alone" on apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<PropDescriptor>>,
    /// ISO-8601 capture timestamp.
    #[serde(rename = "savedAt")]
    pub saved_at: String,
}

impl PoseDocument {
    /// The document as a JSON value, the form the apply operations take.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::to_value(self).expect("pose document is always representable as JSON")
    }
}
