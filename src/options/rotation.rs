use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rotation", inline)]
#[serde(default)]
/// Drag-to-frame and scroll-to-tilt parameters.
pub struct RotationOptions {
    /// Frames in a full turn.
    #[schemars(title = "Frames", range(min = 1, max = 360))]
    pub total_steps: u32,
    /// Frame shown before any interaction.
    #[schemars(skip)]
    pub initial_frame: u32,
    /// Horizontal drag distance for one frame, in pixels.
    #[schemars(title = "Pixels per Frame", range(min = 1.0, max = 200.0), extend("step" = 1.0))]
    pub pixels_per_frame: f32,
    /// Drag multiplier.
    #[schemars(title = "Sensitivity", range(min = 0.1, max = 4.0), extend("step" = 0.1))]
    pub sensitivity: f32,
    /// Degrees of tilt per viewport height of offset from center.
    #[schemars(title = "Tilt Gain", range(min = 0.0, max = 90.0), extend("step" = 1.0))]
    pub tilt_gain: f32,
    /// Tilt limit in degrees.
    #[schemars(title = "Max Tilt", range(min = 0.0, max = 90.0), extend("step" = 1.0))]
    pub max_tilt: f32,
}

impl Default for RotationOptions {
    fn default() -> Self {
        Self {
            total_steps: 8,
            initial_frame: 0,
            pixels_per_frame: 30.0,
            sensitivity: 1.0,
            tilt_gain: 40.0,
            max_tilt: 40.0,
        }
    }
}
