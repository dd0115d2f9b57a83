//! Keyframed camera motion.
//!
//! A [`KeyframeAnimator`] walks an ordered sequence of [`Keyframe`]s. Each
//! segment blends from a start snapshot to the current keyframe's pose over
//! that keyframe's duration. Progress is always derived from a stored
//! segment start timestamp, never from a frame counter, so a stalled tick
//! source resumes where it left off instead of skipping ahead.

use std::sync::Arc;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use web_time::{Duration, Instant};

use super::pose::CameraPose;
use crate::util::easing::EasingFunction;

/// A named camera pose reached after `duration_ms` of blending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Shot name, for logs and UI.
    pub name: String,
    /// Eye position at the end of the segment.
    pub position: Vec3,
    /// Look-at target at the end of the segment.
    pub target: Vec3,
    /// Time taken to blend into this keyframe.
    pub duration_ms: u64,
}

impl Keyframe {
    /// Create a keyframe.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        position: Vec3,
        target: Vec3,
        duration_ms: u64,
    ) -> Self {
        Self {
            name: name.into(),
            position,
            target,
            duration_ms,
        }
    }

    /// The pose this keyframe blends toward.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose::new(self.position, self.target)
    }

    /// Segment duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// What happens after the last keyframe is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Wrap back to the first keyframe, indefinitely.
    Loop,
    /// Hold the final pose and report completion.
    Once,
}

/// Interpolation cursor over a keyframe sequence.
#[derive(Debug, Clone)]
pub struct KeyframeAnimator {
    keyframes: Arc<[Keyframe]>,
    playback: Playback,
    easing: EasingFunction,
    /// Index of the keyframe currently being blended toward.
    index: usize,
    /// Pose the current segment blends from.
    start_pose: CameraPose,
    /// Elapsed-time origin of the current segment.
    segment_start: Instant,
    /// Last pose handed out (held while paused or finished).
    last_pose: CameraPose,
    paused_at: Option<Instant>,
    finished: bool,
}

impl KeyframeAnimator {
    /// Start an endlessly looping sequence from `start_pose` at `now`.
    ///
    /// Segments blend with ease-in-out cubic.
    #[must_use]
    pub fn looping(
        keyframes: Arc<[Keyframe]>,
        start_pose: CameraPose,
        now: Instant,
    ) -> Self {
        Self::new(
            keyframes,
            Playback::Loop,
            EasingFunction::CubicInOut,
            start_pose,
            now,
        )
    }

    /// Start a sequence that plays once and holds the final pose.
    #[must_use]
    pub fn once(
        keyframes: Arc<[Keyframe]>,
        easing: EasingFunction,
        start_pose: CameraPose,
        now: Instant,
    ) -> Self {
        Self::new(keyframes, Playback::Once, easing, start_pose, now)
    }

    fn new(
        keyframes: Arc<[Keyframe]>,
        playback: Playback,
        easing: EasingFunction,
        start_pose: CameraPose,
        now: Instant,
    ) -> Self {
        let finished = keyframes.is_empty();
        if finished {
            log::debug!("keyframe animator started with an empty sequence");
        }
        Self {
            keyframes,
            playback,
            easing,
            index: 0,
            start_pose,
            segment_start: now,
            last_pose: start_pose,
            paused_at: None,
            finished,
        }
    }

    /// Advance to `now` and return the camera pose for this tick.
    ///
    /// When the current segment completes, its keyframe pose becomes the
    /// next segment's start snapshot and the elapsed origin resets to
    /// `now`. At most one keyframe is consumed per call.
    pub fn advance(&mut self, now: Instant) -> CameraPose {
        if self.finished || self.paused_at.is_some() {
            return self.last_pose;
        }
        let Some(keyframe) = self.keyframes.get(self.index) else {
            self.finished = true;
            return self.last_pose;
        };

        let target = keyframe.pose();
        let progress = self.progress_for(keyframe, now);

        let pose = if progress >= 1.0 {
            target
        } else {
            self.start_pose.lerp(&target, self.easing.evaluate(progress))
        };
        if pose.is_finite() {
            self.last_pose = pose;
        }

        if progress >= 1.0 {
            if target.is_finite() {
                self.start_pose = target;
            } else {
                log::warn!("skipping non-finite keyframe '{}'", keyframe.name);
                self.start_pose = self.last_pose;
            }
            self.segment_start = now;
            self.step_index();
        }

        self.last_pose
    }

    fn step_index(&mut self) {
        let len = self.keyframes.len();
        match self.playback {
            Playback::Loop => self.index = (self.index + 1) % len,
            Playback::Once => {
                if self.index + 1 >= len {
                    self.finished = true;
                } else {
                    self.index += 1;
                }
            }
        }
    }

    fn progress_for(&self, keyframe: &Keyframe, now: Instant) -> f32 {
        let duration = keyframe.duration();
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.segment_start);
        (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Raw (un-eased) progress of the current segment at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.finished {
            return 1.0;
        }
        let now = self.paused_at.unwrap_or(now);
        self.keyframes
            .get(self.index)
            .map_or(1.0, |k| self.progress_for(k, now))
    }

    /// Freeze the animation at its last computed pose.
    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Resume after [`pause`](Self::pause); the paused span is not counted
    /// as elapsed segment time.
    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.segment_start += now.saturating_duration_since(paused_at);
        }
    }

    /// Whether the animator is paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Whether a [`Playback::Once`] sequence has reached its final pose.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Index of the keyframe currently being blended toward.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The keyframe currently being blended toward.
    #[must_use]
    pub fn current_keyframe(&self) -> Option<&Keyframe> {
        self.keyframes.get(self.index)
    }

    /// Pose the current segment blends from.
    #[must_use]
    pub fn start_pose(&self) -> CameraPose {
        self.start_pose
    }

    /// Most recent pose returned by [`advance`](Self::advance).
    #[must_use]
    pub fn last_pose(&self) -> CameraPose {
        self.last_pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::ease_in_out_cubic;

    fn ms(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    fn sequence() -> Arc<[Keyframe]> {
        Arc::from(vec![
            Keyframe::new(
                "k0",
                Vec3::new(4.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                2000,
            ),
            Keyframe::new("k1", Vec3::new(0.0, 0.0, 4.0), Vec3::ZERO, 1000),
        ])
    }

    fn p0() -> CameraPose {
        CameraPose::new(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 0.5, 0.0))
    }

    #[test]
    fn test_cinematic_entry_scenario() {
        let start = Instant::now();
        let keyframes = sequence();
        let k0 = keyframes[0].pose();
        let mut animator =
            KeyframeAnimator::looping(keyframes, p0(), start);

        assert_eq!(animator.advance(start), p0());

        let mid = animator.advance(ms(start, 1000));
        let expected = p0().lerp(&k0, ease_in_out_cubic(0.5));
        assert!((mid.position - expected.position).length() < 1e-5);
        assert!((mid.target - expected.target).length() < 1e-5);
        assert_eq!(animator.index(), 0);

        assert_eq!(animator.advance(ms(start, 2000)), k0);
        assert_eq!(animator.index(), 1);
        assert_eq!(animator.start_pose(), k0);
        // Elapsed origin was reset: the same instant is progress 0 of k1.
        assert_eq!(animator.progress(ms(start, 2000)), 0.0);
        assert_eq!(animator.advance(ms(start, 2000)), k0);
    }

    #[test]
    fn test_monotonic_approach() {
        let start = Instant::now();
        let keyframes = sequence();
        let k0 = keyframes[0].pose();
        let mut animator =
            KeyframeAnimator::looping(keyframes, p0(), start);

        let mut prev = f32::INFINITY;
        for t in (0..=2000).step_by(100) {
            let pose = animator.advance(ms(start, t));
            let d = pose.position.distance(k0.position);
            assert!(d <= prev + 1e-5, "moved away at t={t}");
            prev = d;
        }
        assert_eq!(prev, 0.0);
    }

    #[test]
    fn test_loops_back_to_first_keyframe() {
        let start = Instant::now();
        let keyframes = sequence();
        let k1 = keyframes[1].pose();
        let mut animator =
            KeyframeAnimator::looping(keyframes, p0(), start);

        let _ = animator.advance(ms(start, 2000));
        assert_eq!(animator.advance(ms(start, 3000)), k1);
        assert_eq!(animator.index(), 0);
        assert_eq!(animator.start_pose(), k1);
    }

    #[test]
    fn test_stalled_ticks_do_not_skip_keyframes() {
        let start = Instant::now();
        let keyframes = sequence();
        let k0 = keyframes[0].pose();
        let mut animator =
            KeyframeAnimator::looping(keyframes, p0(), start);

        // Loop suspended for a minute: only k0 is consumed.
        assert_eq!(animator.advance(ms(start, 60_000)), k0);
        assert_eq!(animator.index(), 1);
    }

    #[test]
    fn test_pause_holds_pose_and_excludes_paused_span() {
        let start = Instant::now();
        let mut animator =
            KeyframeAnimator::looping(sequence(), p0(), start);

        let before = animator.advance(ms(start, 500));
        animator.pause(ms(start, 500));
        assert!(animator.is_paused());
        assert_eq!(animator.advance(ms(start, 5000)), before);

        animator.resume(ms(start, 5000));
        let resumed = animator.advance(ms(start, 5000));
        assert!((resumed.position - before.position).length() < 1e-5);
        assert!((animator.progress(ms(start, 5500)) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_once_playback_finishes_and_holds() {
        let start = Instant::now();
        let keyframes = sequence();
        let k1 = keyframes[1].pose();
        let mut animator = KeyframeAnimator::once(
            keyframes,
            EasingFunction::CubicOut,
            p0(),
            start,
        );

        let _ = animator.advance(ms(start, 2000));
        assert!(!animator.is_finished());
        assert_eq!(animator.advance(ms(start, 3000)), k1);
        assert!(animator.is_finished());
        assert_eq!(animator.advance(ms(start, 9000)), k1);
        assert_eq!(animator.progress(ms(start, 9000)), 1.0);
    }

    #[test]
    fn test_zero_duration_and_empty_sequences() {
        let start = Instant::now();
        let snap: Arc<[Keyframe]> =
            Arc::from(vec![Keyframe::new("snap", Vec3::X, Vec3::ZERO, 0)]);
        let mut animator = KeyframeAnimator::looping(snap, p0(), start);
        assert_eq!(animator.advance(start).position, Vec3::X);

        let empty: Arc<[Keyframe]> = Arc::from(Vec::new());
        let mut animator = KeyframeAnimator::looping(empty, p0(), start);
        assert_eq!(animator.advance(ms(start, 100)), p0());
        assert!(animator.is_finished());
    }

    #[test]
    fn test_non_finite_keyframe_never_reaches_camera() {
        let start = Instant::now();
        let bad: Arc<[Keyframe]> = Arc::from(vec![
            Keyframe::new("bad", Vec3::splat(f32::NAN), Vec3::ZERO, 1000),
            Keyframe::new("good", Vec3::X, Vec3::ZERO, 1000),
        ]);
        let mut animator = KeyframeAnimator::looping(bad, p0(), start);
        for t in [0, 500, 1000, 1500, 2000] {
            assert!(animator.advance(ms(start, t)).is_finite());
        }
    }
}
