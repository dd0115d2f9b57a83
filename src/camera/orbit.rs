use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Quat, Vec3};

use super::pose::CameraPose;

/// Distance used when a pose's eye sits on its target.
const MIN_DISTANCE: f32 = 1e-3;

/// Orbital rig for manual control, anchored on the pose it was created from.
///
/// The rig maps a rotation angle and a zoom factor back onto a pose around
/// a fixed target. It is anchored so that the anchor angle and zoom
/// reproduce the anchor pose, which keeps the hand-off from automated
/// motion to manual control free of jumps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitRig {
    target: Vec3,
    /// Eye distance at `anchor_zoom`.
    anchor_distance: f32,
    anchor_zoom: f32,
    /// Angle from +Y, in radians.
    polar: f32,
    /// Azimuth of the anchor pose minus the anchor rotation angle.
    azimuth_offset: f32,
}

impl OrbitRig {
    /// Anchor a rig so that `pose_at(anchor_angle, anchor_zoom)` is `pose`.
    #[must_use]
    pub fn anchored(
        pose: &CameraPose,
        anchor_angle: f32,
        anchor_zoom: f32,
    ) -> Self {
        let offset = pose.position - pose.target;
        let distance = offset.length();
        let (distance, polar, azimuth) = if distance > MIN_DISTANCE {
            let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
            (distance, polar, offset.x.atan2(offset.z))
        } else {
            (MIN_DISTANCE, FRAC_PI_2, 0.0)
        };
        let anchor_zoom = if anchor_zoom.is_finite() && anchor_zoom > 0.0 {
            anchor_zoom
        } else {
            1.0
        };

        Self {
            target: pose.target,
            anchor_distance: distance,
            anchor_zoom,
            polar,
            azimuth_offset: azimuth - anchor_angle,
        }
    }

    /// Pose for a rotation angle (radians) and zoom factor.
    ///
    /// Higher zoom brings the eye closer: distance scales with
    /// `anchor_zoom / zoom`.
    #[must_use]
    pub fn pose_at(&self, angle: f32, zoom: f32) -> CameraPose {
        let zoom = if zoom > 0.0 { zoom } else { self.anchor_zoom };
        let distance = self.anchor_distance * self.anchor_zoom / zoom;
        let azimuth = self.azimuth_offset + angle;
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = azimuth.sin_cos();
        let offset = Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * distance;
        let pose = CameraPose::new(self.target + offset, self.target);
        if pose.is_finite() {
            pose
        } else {
            CameraPose::new(
                self.target + Vec3::Z * self.anchor_distance,
                self.target,
            )
        }
    }

    /// Look-at target the rig orbits.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.target
    }
}

/// Rotation angle (radians) of a discrete frame on a `total_steps` ring.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn frame_angle(frame: u32, total_steps: u32) -> f32 {
    if total_steps == 0 {
        return 0.0;
    }
    frame as f32 / total_steps as f32 * TAU
}

/// Rotate the eye around the vertical axis through the target.
#[must_use]
pub fn rotate_about_vertical(pose: &CameraPose, angle: f32) -> CameraPose {
    let offset = Quat::from_rotation_y(angle) * (pose.position - pose.target);
    let rotated = CameraPose::new(pose.target + offset, pose.target);
    if rotated.is_finite() {
        rotated
    } else {
        *pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: &CameraPose, b: &CameraPose) -> bool {
        a.position.distance(b.position) < 1e-4
            && a.target.distance(b.target) < 1e-4
    }

    #[test]
    fn test_anchored_rig_reproduces_anchor_pose() {
        let pose = CameraPose::new(
            Vec3::new(3.0, 1.5, -4.0),
            Vec3::new(0.0, 0.5, 0.0),
        );
        let rig = OrbitRig::anchored(&pose, 1.2, 1.5);
        assert!(close(&rig.pose_at(1.2, 1.5), &pose));
    }

    #[test]
    fn test_zoom_scales_distance_relative_to_anchor() {
        let pose = CameraPose::default();
        let rig = OrbitRig::anchored(&pose, 0.0, 1.0);
        let zoomed = rig.pose_at(0.0, 2.0);
        assert!((zoomed.distance() - pose.distance() / 2.0).abs() < 1e-4);
        assert_eq!(zoomed.target, pose.target);
    }

    #[test]
    fn test_full_turn_returns_to_start() {
        let pose = CameraPose::default();
        let rig = OrbitRig::anchored(&pose, 0.0, 1.0);
        assert!(close(&rig.pose_at(TAU, 1.0), &pose));
    }

    #[test]
    fn test_vertical_rotation_keeps_height_and_distance() {
        let pose = CameraPose::default();
        let rotated = rotate_about_vertical(&pose, 0.3);
        assert!((rotated.position.y - pose.position.y).abs() < 1e-5);
        assert!((rotated.distance() - pose.distance()).abs() < 1e-4);
        assert_eq!(rotated.target, pose.target);
    }

    #[test]
    fn test_degenerate_pose_still_yields_finite_rig() {
        let pose = CameraPose::new(Vec3::ONE, Vec3::ONE);
        let rig = OrbitRig::anchored(&pose, 0.0, f32::NAN);
        assert!(rig.pose_at(0.5, 1.0).is_finite());
    }

    #[test]
    fn test_frame_angles_wrap_the_ring() {
        assert_eq!(frame_angle(0, 36), 0.0);
        assert!((frame_angle(9, 36) - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(frame_angle(3, 0), 0.0);
    }
}
