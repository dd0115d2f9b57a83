use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawKeybindings")]
/// Configurable keyboard bindings mapping actions to key codes.
pub struct KeybindingOptions {
    /// Maps action → key strings (e.g. `ZoomIn` → `["ArrowUp", "Equal"]`).
    pub bindings: HashMap<KeyAction, Vec<String>>,
    /// Reverse lookup cache (key string → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

/// Deserialization shape; converting it rebuilds the reverse map.
#[derive(Deserialize)]
#[serde(default)]
struct RawKeybindings {
    bindings: HashMap<KeyAction, Vec<String>>,
}

impl Default for RawKeybindings {
    fn default() -> Self {
        Self {
            bindings: KeybindingOptions::default().bindings,
        }
    }
}

impl From<RawKeybindings> for KeybindingOptions {
    fn from(raw: RawKeybindings) -> Self {
        Self::with_bindings(raw.bindings)
    }
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let keys = |keys: &[&str]| -> Vec<String> {
            keys.iter().map(|&k| k.to_owned()).collect()
        };
        let bindings = HashMap::from([
            (KeyAction::ToggleCinematic, keys(&["KeyC"])),
            (KeyAction::Skip, keys(&["Escape"])),
            (KeyAction::ResetView, keys(&["KeyR"])),
            (KeyAction::ToggleAutoRotate, keys(&["Space"])),
            (KeyAction::RotateLeft, keys(&["ArrowLeft", "KeyA"])),
            (KeyAction::RotateRight, keys(&["ArrowRight", "KeyD"])),
            (
                KeyAction::ZoomIn,
                keys(&["ArrowUp", "Equal", "NumpadAdd"]),
            ),
            (
                KeyAction::ZoomOut,
                keys(&["ArrowDown", "Minus", "NumpadSubtract"]),
            ),
        ]);

        Self::with_bindings(bindings)
    }
}

impl KeybindingOptions {
    /// Build options from a forward map, populating the reverse lookup.
    #[must_use]
    pub fn with_bindings(bindings: HashMap<KeyAction, Vec<String>>) -> Self {
        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }

    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, keys) in &self.bindings {
            for key in keys {
                let _ = self.key_to_action.insert(key.clone(), *action);
            }
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_several_keys_share_an_action() {
        let opts = KeybindingOptions::default();
        assert_eq!(opts.lookup("ArrowUp"), Some(KeyAction::ZoomIn));
        assert_eq!(opts.lookup("Equal"), Some(KeyAction::ZoomIn));
        assert_eq!(opts.lookup("Escape"), Some(KeyAction::Skip));
        assert_eq!(opts.lookup("KeyZ"), None);
    }

    #[test]
    fn test_deserializing_rebuilds_reverse_map() {
        let toml_str = r#"
[bindings]
skip = ["KeyX"]
"#;
        let opts: KeybindingOptions = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.lookup("KeyX"), Some(KeyAction::Skip));
        assert_eq!(opts.lookup("Escape"), None);
    }
}
