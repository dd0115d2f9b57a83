use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Camera position plus look-at target, the unit every motion source
/// writes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Look-at target in world space.
    pub target: Vec3,
}

impl CameraPose {
    /// Build a pose from eye position and look-at target.
    #[must_use]
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Whether both vectors are free of NaN and infinities.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.target.is_finite()
    }

    /// Linear blend toward `end` by `t`.
    ///
    /// Falls back to `self` if the blend would produce a non-finite pose,
    /// so interpolation never leaks NaN into the camera.
    #[must_use]
    pub fn lerp(&self, end: &Self, t: f32) -> Self {
        let blended = Self {
            position: self.position + (end.position - self.position) * t,
            target: self.target + (end.target - self.target) * t,
        };
        if blended.is_finite() {
            blended
        } else {
            *self
        }
    }

    /// Distance from eye to target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }

    /// Unit view direction (eye toward target), or `-Z` when degenerate.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 0.5, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_hits_endpoints() {
        let a = CameraPose::new(Vec3::ZERO, Vec3::X);
        let b = CameraPose::new(Vec3::new(10.0, 20.0, 30.0), Vec3::Y);
        assert_eq!(a.lerp(&b, 0.0), a);
        let mid = a.lerp(&b, 0.5);
        assert!((mid.position - Vec3::new(5.0, 10.0, 15.0)).length() < 1e-5);
        assert!((mid.target - Vec3::new(0.5, 0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_lerp_rejects_non_finite() {
        let a = CameraPose::default();
        let b = CameraPose::new(Vec3::splat(f32::INFINITY), Vec3::ZERO);
        assert_eq!(a.lerp(&b, 0.5), a);
        assert_eq!(a.lerp(&CameraPose::default(), f32::NAN), a);
    }

    #[test]
    fn test_forward_of_degenerate_pose() {
        let p = CameraPose::new(Vec3::ONE, Vec3::ONE);
        assert_eq!(p.forward(), Vec3::NEG_Z);
        assert!(CameraPose::default().forward().z < 0.0);
    }
}
