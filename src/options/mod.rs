//! Centralized view and motion options with TOML preset support.
//!
//! All tweakable settings (camera, rotation, zoom, timing, the cinematic
//! sequence, hotspots, asset groups, keybindings) are consolidated here.
//! Options serialize to/from TOML so presets can live next to the assets.

mod assets;
mod camera;
mod keybindings;
mod keyframes;
mod rotation;
mod timing;
mod zoom;

use std::path::Path;

pub use assets::{AssetGroup, AssetGroupOptions};
pub use camera::CameraOptions;
pub use keybindings::KeybindingOptions;
pub use keyframes::default_keyframes;
pub use rotation::RotationOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use timing::TimingOptions;
pub use zoom::ZoomOptions;

use crate::camera::Keyframe;
use crate::error::TurntableError;
use crate::hotspot::{default_catalog, Hotspot};

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[zoom]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Projection, intro, and auto-rotate parameters.
    pub camera: CameraOptions,
    /// Drag and tilt mapping.
    pub rotation: RotationOptions,
    /// Zoom bounds and step.
    pub zoom: ZoomOptions,
    /// Timer lengths.
    pub timing: TimingOptions,
    /// Cinematic demo sequence.
    #[schemars(skip)]
    pub keyframes: Vec<Keyframe>,
    /// Annotation catalog.
    #[schemars(skip)]
    pub hotspots: Vec<Hotspot>,
    /// Logical view groups and their asset keys.
    #[schemars(skip)]
    pub asset_groups: AssetGroupOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            camera: CameraOptions::default(),
            rotation: RotationOptions::default(),
            zoom: ZoomOptions::default(),
            timing: TimingOptions::default(),
            keyframes: default_keyframes(),
            hotspots: default_catalog(),
            asset_groups: AssetGroupOptions::default(),
            keybindings: KeybindingOptions::default(),
        }
    }
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TurntableError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| TurntableError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TurntableError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TurntableError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content).map_err(TurntableError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::KeyAction;

    #[test]
    fn test_default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = r"
[zoom]
max = 4.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.zoom.max, 4.0);
        // Everything else should be default
        assert_eq!(opts.zoom.min, 0.8);
        assert_eq!(opts.timing.idle_delay_ms, 5000);
        assert_eq!(opts.keyframes.len(), 14);
        assert_eq!(opts.hotspots.len(), 5);
    }

    #[test]
    fn test_keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Skip));
        assert_eq!(
            opts.keybindings.lookup("KeyC"),
            Some(KeyAction::ToggleCinematic)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn test_keyframes_can_be_overridden() {
        let toml_str = r"
[[keyframes]]
name = 'only'
position = [1.0, 2.0, 3.0]
target = [0.0, 0.0, 0.0]
duration_ms = 1000
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.keyframes.len(), 1);
        assert_eq!(opts.keyframes[0].name, "only");
        assert_eq!(opts.keyframes[0].duration_ms, 1000);
    }

    #[test]
    fn test_save_then_load_preserves_options() {
        let dir = std::env::temp_dir()
            .join(format!("turntable-options-{}", std::process::id()));
        let path = dir.join("studio.toml");
        let mut opts = Options::default();
        opts.zoom.step = 0.25;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["studio".to_owned()]);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = std::env::temp_dir()
            .join(format!("turntable-bad-options-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "zoom = 3").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(TurntableError::OptionsParse(_))
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        // UI-exposed sections should be present
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("rotation"));
        assert!(props.contains_key("zoom"));
        assert!(props.contains_key("timing"));

        // Skipped sections should be absent
        assert!(!props.contains_key("keyframes"));
        assert!(!props.contains_key("hotspots"));
        assert!(!props.contains_key("keybindings"));

        // Camera should have exposed fields but not skipped ones
        let camera = &props["camera"]["properties"];
        assert!(camera.get("fovy").is_some());
        assert!(camera.get("intro_duration_ms").is_some());
        assert!(camera.get("znear").is_none());
        assert!(camera.get("default_pose").is_none());
    }
}
