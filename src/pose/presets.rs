//! Built-in pose presets, embedded at compile time and parsed once.
//!
//! Presets are joints-only documents from a fixed library; they are applied
//! through [`apply_joints_only`](super::codec::apply_joints_only) so scene
//! dressing — props, imported models — is never disturbed.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::json;

/// One entry of the built-in library: a name and a joints-only rotation map.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetDocument {
    pub name: String,
    pub joints: BTreeMap<String, [f32; 4]>,
}

impl PresetDocument {
    /// The preset as an applicable joints-only document value.
    pub fn to_value(&self) -> serde_json::Value {
        json!({ "joints": self.joints })
    }
}

static PRESETS: OnceLock<Vec<PresetDocument>> = OnceLock::new();

/// The fixed built-in preset library.
pub fn library() -> &'static [PresetDocument] {
    PRESETS.get_or_init(|| {
        serde_json::from_str(include_str!("../../assets/presets.json"))
            .expect("presets.json missing or malformed")
    })
}

/// Preset names, in library order.
pub fn names() -> Vec<&'static str> {
    library().iter().map(|p| p.name.as_str()).collect()
}

/// Looks a preset up by name.
pub fn find(name: &str) -> Option<&'static PresetDocument> {
    library().iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_parses_and_names_are_unique() {
        let presets = library();
        assert!(!presets.is_empty());

        let mut seen = std::collections::HashSet::new();
        for preset in presets {
            assert!(seen.insert(&preset.name), "duplicate preset {}", preset.name);
        }
    }

    #[test]
    fn test_expected_presets_are_present() {
        for name in ["t_pose", "arms_down", "wave"] {
            assert!(find(name).is_some(), "missing preset {name}");
        }
        assert!(find("moonwalk").is_none());
    }

    #[test]
    fn test_presets_only_name_real_joints() {
        use crate::rig::RigModel;
        use crate::scene::SceneGraph;

        let mut graph = SceneGraph::new();
        let rig = RigModel::build(&mut graph);
        for preset in library() {
            for joint in preset.joints.keys() {
                assert!(
                    rig.joint(joint).is_some(),
                    "preset {} names unknown joint {joint}",
                    preset.name
                );
            }
        }
    }

    #[test]
    fn test_preset_value_is_joints_only() {
        let value = find("wave").unwrap().to_value();
        assert!(value.get("joints").is_some());
        assert!(value.get("props").is_none());
    }
}
