use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Zoom", inline)]
#[serde(default)]
/// Zoom bounds and step.
pub struct ZoomOptions {
    /// Lowest zoom factor.
    #[schemars(title = "Min Zoom", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub min: f32,
    /// Highest zoom factor.
    #[schemars(title = "Max Zoom", range(min = 1.0, max = 10.0), extend("step" = 0.1))]
    pub max: f32,
    /// Change per wheel notch or zoom button press.
    #[schemars(title = "Zoom Step", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub step: f32,
    /// Zoom before any interaction and after reset.
    #[schemars(skip)]
    pub initial: f32,
}

impl Default for ZoomOptions {
    fn default() -> Self {
        Self {
            min: 0.8,
            max: 3.0,
            step: 0.1,
            initial: 1.0,
        }
    }
}
