use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One logical view of the product and the frames that make it up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
pub struct AssetGroup {
    /// Group id, also the key's directory and file stem.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Number of frames, numbered from 1.
    pub frames: u32,
    /// Short description for UI tabs.
    pub description: String,
}

impl AssetGroup {
    fn new(id: &str, label: &str, frames: u32, description: &str) -> Self {
        Self {
            id: id.to_owned(),
            label: label.to_owned(),
            frames,
            description: description.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Assets", inline)]
#[serde(default)]
/// Logical view groups and how their asset keys are spelled.
///
/// Keys follow `{base_path}{id}/{prefix}-{id}-{n}.{extension}`.
pub struct AssetGroupOptions {
    /// Prefix prepended to every key.
    pub base_path: String,
    /// File stem prefix.
    pub prefix: String,
    /// File extension, without the dot.
    pub extension: String,
    /// Groups in display order; the first is the fallback.
    pub groups: Vec<AssetGroup>,
}

impl Default for AssetGroupOptions {
    fn default() -> Self {
        Self {
            base_path: "car-images/".to_owned(),
            prefix: "car".to_owned(),
            extension: "png".to_owned(),
            groups: vec![
                AssetGroup::new(
                    "exterior",
                    "Exterior",
                    8,
                    "360° exterior view showcasing body lines and design",
                ),
                AssetGroup::new(
                    "interior",
                    "Interior",
                    1,
                    "Luxury cabin with premium finishes",
                ),
                AssetGroup::new(
                    "front",
                    "Front",
                    4,
                    "Detailed front view and headlights",
                ),
                AssetGroup::new(
                    "detail",
                    "Details",
                    3,
                    "Close-up shots of special features",
                ),
            ],
        }
    }
}

impl AssetGroupOptions {
    /// Group by id, falling back to the first group for unknown ids.
    #[must_use]
    pub fn group(&self, id: &str) -> Option<&AssetGroup> {
        self.groups
            .iter()
            .find(|g| g.id == id)
            .or_else(|| self.groups.first())
    }

    /// Asset keys for a group, in frame order.
    ///
    /// Unknown ids resolve to the first group; no groups at all yields an
    /// empty list.
    #[must_use]
    pub fn keys_for(&self, id: &str) -> Vec<String> {
        let Some(group) = self.group(id) else {
            return Vec::new();
        };
        (1..=group.frames)
            .map(|n| {
                format!(
                    "{}{}/{}-{}-{n}.{}",
                    self.base_path,
                    group.id,
                    self.prefix,
                    group.id,
                    self.extension
                )
            })
            .collect()
    }

    /// Every key across all groups, in group order.
    #[must_use]
    pub fn all_keys(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|g| self.keys_for(&g.id))
            .collect()
    }
}
