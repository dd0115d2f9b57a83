use glam::{Mat4, Vec2, Vec3};

use super::pose::CameraPose;
use crate::options::CameraOptions;

/// Perspective projection parameters; the pose supplies eye and target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and camera metadata.
pub struct PoseUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Camera forward direction for lighting.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

impl Camera {
    /// Projection from configured options and a viewport aspect ratio.
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Update the aspect ratio after a viewport resize.
    #[allow(clippy::cast_precision_loss)]
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    /// Build the combined view-projection matrix for `pose`.
    #[must_use]
    pub fn build_matrix(&self, pose: &CameraPose) -> Mat4 {
        let view = Mat4::look_at_rh(pose.position, pose.target, Vec3::Y);
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Project a world-space point into pixel coordinates (origin top-left).
    ///
    /// Returns `None` for points behind the camera or outside the depth
    /// range, so annotation overlays can hide them.
    #[must_use]
    pub fn project(
        &self,
        pose: &CameraPose,
        world: Vec3,
        viewport: Vec2,
    ) -> Option<Vec2> {
        let clip = self.build_matrix(pose) * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }
        let screen = Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.x,
            (1.0 - ndc.y) * 0.5 * viewport.y,
        );
        screen.is_finite().then_some(screen)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default(), 16.0 / 9.0)
    }
}

impl PoseUniform {
    /// Uniform contents for `pose` seen through `camera`.
    #[must_use]
    pub fn new(camera: &Camera, pose: &CameraPose) -> Self {
        Self {
            view_proj: camera.build_matrix(pose).to_cols_array_2d(),
            position: pose.position.to_array(),
            aspect: camera.aspect,
            forward: pose.forward().to_array(),
            fovy: camera.fovy,
        }
    }
}
