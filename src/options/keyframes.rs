use glam::Vec3;

use crate::camera::Keyframe;

/// The default fourteen-shot cinematic sequence: close passes over the
/// nose, cockpit, flanks, and tail, ending on a pull-back and hero shot.
#[must_use]
pub fn default_keyframes() -> Vec<Keyframe> {
    let shot = |name: &str, position: [f32; 3], target: [f32; 3], ms: u64| {
        Keyframe::new(
            name,
            Vec3::from_array(position),
            Vec3::from_array(target),
            ms,
        )
    };
    vec![
        shot("front-low", [3.0, 0.3, 4.0], [0.0, 0.5, 2.0], 2500),
        shot("front-wing-detail", [1.5, 0.4, 3.5], [1.2, 0.2, 3.0], 2000),
        shot("front-wing-sweep", [-1.5, 0.4, 3.5], [-1.2, 0.2, 3.0], 2500),
        shot("halo-top", [0.0, 1.8, 1.5], [0.0, 1.0, 0.0], 2000),
        shot("cockpit-side", [2.0, 1.2, 0.5], [0.0, 0.9, 0.0], 2500),
        shot("sidepod-detail", [2.5, 0.8, -0.5], [1.5, 0.5, -0.5], 2000),
        shot("rear-wheel", [2.2, 0.5, -1.5], [1.8, 0.4, -2.0], 2500),
        shot("rear-diffuser", [0.0, 0.4, -3.5], [0.0, 0.5, -2.5], 2000),
        shot("rear-wing-low", [0.0, 0.8, -4.0], [0.0, 1.2, -2.5], 2500),
        shot("rear-quarter-rise", [-3.0, 1.5, -3.0], [0.0, 0.6, 0.0], 2000),
        shot("engine-cover", [-1.5, 1.5, -1.0], [0.0, 1.0, -1.0], 2000),
        shot("front-wheel-left", [-2.2, 0.5, 1.0], [-1.8, 0.4, 1.5], 2500),
        shot("reveal-pullback", [5.0, 2.5, 5.0], [0.0, 0.5, 0.0], 3000),
        shot("hero-shot", [4.0, 1.5, 3.0], [0.0, 0.5, 0.0], 2500),
    ]
}
