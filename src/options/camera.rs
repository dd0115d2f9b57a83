use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::CameraPose;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection, intro sweep, and auto-rotate parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Resting pose the intro ends on and reset returns to.
    #[schemars(skip)]
    pub default_pose: CameraPose,
    /// Wide pose the intro sweep starts from.
    #[schemars(skip)]
    pub establishing_pose: CameraPose,
    /// Intro sweep length in milliseconds.
    #[schemars(title = "Intro Duration (ms)", range(min = 0, max = 10000))]
    pub intro_duration_ms: u64,
    /// Hold on the establishing pose before the sweep starts.
    #[schemars(title = "Intro Delay (ms)", range(min = 0, max = 5000))]
    pub intro_delay_ms: u64,
    /// Start the cinematic demo once after the intro.
    #[schemars(title = "Auto Demo")]
    pub auto_demo: bool,
    /// Enter auto-rotate after the idle delay.
    #[schemars(title = "Idle Auto-Rotate")]
    pub idle_auto_rotate: bool,
    /// Auto-rotate increment around the vertical axis, radians per tick.
    #[schemars(title = "Auto-Rotate Speed", range(min = 0.0, max = 0.05), extend("step" = 0.0005))]
    pub auto_rotate_step: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        let target = Vec3::new(0.0, 0.5, 0.0);
        Self {
            fovy: 50.0,
            znear: 0.1,
            zfar: 1000.0,
            default_pose: CameraPose::new(Vec3::new(0.0, 2.0, 10.0), target),
            establishing_pose: CameraPose::new(
                Vec3::new(12.0, 0.5, 12.0),
                target,
            ),
            intro_duration_ms: 2500,
            intro_delay_ms: 500,
            auto_demo: true,
            idle_auto_rotate: true,
            auto_rotate_step: 0.0026,
        }
    }
}
