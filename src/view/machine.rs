//! The view state machine.
//!
//! [`ViewStateMachine`] owns the current [`Mode`], the output pose, and the
//! manual controllers. Commands arrive through
//! [`execute`](ViewStateMachine::execute); the host calls
//! [`tick`](ViewStateMachine::tick) once per frame and reads the pose back.
//! Each tick runs in a fixed order:
//!
//! 1. overlay phase (starts the demo when the dark phase ends)
//! 2. demo time limit
//! 3. click-burst expiry
//! 4. idle check (manual → auto-rotate)
//! 5. pending demo requests
//! 6. the live mode's pose write
//!
//! Mode changes made by commands take effect on the next tick.

use std::sync::Arc;

use glam::Vec2;
use rustc_hash::FxHashSet;
use web_time::{Duration, Instant};

use super::command::ViewCommand;
use super::mode::{Mode, Motion};
use super::overlay::{OverlayPhase, OverlaySequencer};
use super::snapshot::ViewSnapshot;
use crate::assets::LoadProgress;
use crate::camera::orbit::{frame_angle, rotate_about_vertical};
use crate::camera::{
    Camera, CameraPose, Keyframe, KeyframeAnimator, OrbitRig, PoseUniform,
};
use crate::hotspot::{HotspotRegistry, ProjectedHotspot};
use crate::input::{
    BurstResult, ClickBurst, ElementRect, PointerRotationMapper, ScrollTilt,
    ZoomController,
};
use crate::options::{AssetGroupOptions, Options, TimingOptions};
use crate::util::easing::EasingFunction;

/// Why a cinematic demo is waiting to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DemoRequest {
    /// The single automatic run after the intro.
    Auto,
    /// An explicit toggle made before the demo could start.
    Toggle,
}

/// Owner of mode, camera pose, and the manual controllers.
#[derive(Debug, Clone)]
pub struct ViewStateMachine {
    motion: Motion,
    pose: CameraPose,
    default_pose: CameraPose,
    keyframes: Arc<[Keyframe]>,

    rotation: PointerRotationMapper,
    zoom: ZoomController,
    tilt: ScrollTilt,
    hotspots: HotspotRegistry,

    overlay: OverlaySequencer,
    clicks: ClickBurst,
    timing: TimingOptions,
    auto_rotate_step: f32,

    demo_request: Option<DemoRequest>,
    loading: Option<LoadProgress>,
    groups: AssetGroupOptions,
    current_group: String,
    loaded_groups: FxHashSet<String>,
    last_interaction: Instant,
    idle_auto_rotate: bool,
    spotlight: bool,
    disposed: bool,
}

impl ViewStateMachine {
    /// Mount the view at `now`; the intro starts immediately.
    ///
    /// The intro holds the establishing pose for the configured lead-in,
    /// then sweeps to the default pose with ease-out cubic.
    #[must_use]
    pub fn new(options: &Options, now: Instant) -> Self {
        let camera = &options.camera;
        let intro: Arc<[Keyframe]> = Arc::from(vec![Keyframe::new(
            "default",
            camera.default_pose.position,
            camera.default_pose.target,
            camera.intro_duration_ms,
        )]);
        let lead_in = Duration::from_millis(camera.intro_delay_ms);
        let animator = KeyframeAnimator::once(
            intro,
            EasingFunction::CubicOut,
            camera.establishing_pose,
            now + lead_in,
        );

        log::info!(
            "view mounted: {} keyframes, {} hotspots",
            options.keyframes.len(),
            options.hotspots.len()
        );

        Self {
            motion: Motion::Intro { animator },
            pose: camera.establishing_pose,
            default_pose: camera.default_pose,
            keyframes: Arc::from(options.keyframes.clone()),
            rotation: PointerRotationMapper::new(&options.rotation),
            zoom: ZoomController::new(&options.zoom),
            tilt: ScrollTilt::new(&options.rotation),
            hotspots: HotspotRegistry::new(options.hotspots.clone()),
            overlay: OverlaySequencer::new(&options.timing),
            clicks: ClickBurst::new(options.timing.click_window()),
            timing: options.timing.clone(),
            auto_rotate_step: camera.auto_rotate_step,
            demo_request: camera.auto_demo.then_some(DemoRequest::Auto),
            loading: None,
            groups: options.asset_groups.clone(),
            current_group: options
                .asset_groups
                .groups
                .first()
                .map(|g| g.id.clone())
                .unwrap_or_default(),
            loaded_groups: FxHashSet::default(),
            last_interaction: now,
            idle_auto_rotate: camera.idle_auto_rotate,
            spotlight: false,
            disposed: false,
        }
    }

    // ── Per-frame ───────────────────────────────────────────────────

    /// Advance timers and the live mode to `now`, returning the pose to
    /// render. After [`dispose`](Self::dispose) the pose is frozen.
    pub fn tick(&mut self, now: Instant) -> CameraPose {
        if self.disposed {
            return self.pose;
        }
        self.advance_overlay(now);
        self.stop_expired_demo(now);
        self.clicks.expire(now);
        self.enter_idle_if_quiet(now);
        self.start_requested_demo(now);
        self.write_pose(now);
        self.pose
    }

    fn advance_overlay(&mut self, now: Instant) {
        let before = self.overlay.phase();
        let phase = self.overlay.advance(now);
        if phase != before {
            log::debug!("overlay phase {before:?} -> {phase:?}");
        }
        if matches!(self.motion, Motion::Transitioning)
            && phase != OverlayPhase::Dark
        {
            self.start_demo(now);
        }
    }

    fn stop_expired_demo(&mut self, now: Instant) {
        let Motion::CinematicDemo { started_at, .. } = self.motion else {
            return;
        };
        if now.saturating_duration_since(started_at) >= self.timing.demo_max()
        {
            log::info!("cinematic demo reached its time limit");
            self.overlay.cancel();
            self.return_to_manual(now);
        }
    }

    fn enter_idle_if_quiet(&mut self, now: Instant) {
        let eligible = matches!(self.motion, Motion::Manual { .. })
            && self.idle_auto_rotate
            && self.demo_request.is_none()
            && self.assets_loaded()
            && !self.rotation.is_dragging()
            && !self.zoom.is_pinching();
        if eligible
            && now.saturating_duration_since(self.last_interaction)
                >= self.timing.idle_delay()
        {
            self.set_motion(Motion::IdleAutoRotate);
        }
    }

    fn start_requested_demo(&mut self, now: Instant) {
        let Some(request) = self.demo_request else {
            return;
        };
        let ready = self.assets_loaded()
            && matches!(
                self.motion,
                Motion::Manual { .. } | Motion::IdleAutoRotate
            );
        if ready {
            log::debug!("starting requested demo ({request:?})");
            self.demo_request = None;
            self.begin_transition(now);
        }
    }

    /// Let the live mode write the pose. Exactly one arm runs.
    fn write_pose(&mut self, now: Instant) {
        let angle =
            frame_angle(self.rotation.frame(), self.rotation.total_steps());
        let zoom = self.zoom.value();
        let mut intro_finished = false;

        match &mut self.motion {
            Motion::Intro { animator } => {
                self.pose = animator.advance(now);
                intro_finished = animator.is_finished();
            }
            Motion::CinematicDemo { animator, .. } => {
                self.pose = animator.advance(now);
            }
            Motion::IdleAutoRotate => {
                self.pose =
                    rotate_about_vertical(&self.pose, self.auto_rotate_step);
            }
            Motion::Manual { rig: Some(rig) } => {
                self.pose = rig.pose_at(angle, zoom);
            }
            Motion::Manual { rig: None } | Motion::Transitioning => {}
        }

        if intro_finished {
            log::info!("intro complete");
            self.return_to_manual(now);
        }
    }

    // ── Transitions ─────────────────────────────────────────────────

    fn set_motion(&mut self, motion: Motion) {
        let (from, to) = (self.motion.mode(), motion.mode());
        if from != to {
            log::info!("view mode: {from} -> {to}");
        }
        self.motion = motion;
    }

    /// Hand control back to the user without moving the camera.
    fn return_to_manual(&mut self, now: Instant) {
        self.last_interaction = now;
        self.set_motion(Motion::manual());
    }

    fn begin_transition(&mut self, now: Instant) {
        self.overlay.start(now);
        self.set_motion(Motion::Transitioning);
    }

    /// Start the looping tour from wherever the camera is now.
    fn start_demo(&mut self, now: Instant) {
        if self.keyframes.is_empty() {
            log::warn!("no cinematic keyframes configured; demo not started");
            self.overlay.cancel();
            self.return_to_manual(now);
            return;
        }
        let animator = KeyframeAnimator::looping(
            Arc::clone(&self.keyframes),
            self.pose,
            now,
        );
        self.set_motion(Motion::CinematicDemo {
            animator,
            started_at: now,
        });
    }

    /// Direct manipulation: switch to manual and anchor the orbit rig on
    /// the current pose before the input changes frame or zoom.
    fn interact(&mut self, now: Instant) {
        self.last_interaction = now;
        if self.demo_request == Some(DemoRequest::Auto) {
            log::debug!("user took control; automatic demo dropped");
            self.demo_request = None;
        }
        if matches!(
            self.motion,
            Motion::CinematicDemo { .. } | Motion::Transitioning
        ) {
            self.overlay.cancel();
        }
        if !matches!(self.motion, Motion::Manual { .. }) {
            self.set_motion(Motion::manual());
        }

        let angle =
            frame_angle(self.rotation.frame(), self.rotation.total_steps());
        let zoom = self.zoom.value();
        if let Motion::Manual { rig } = &mut self.motion {
            if rig.is_none() {
                *rig = Some(OrbitRig::anchored(&self.pose, angle, zoom));
            }
        }
    }

    // ── Commands ────────────────────────────────────────────────────

    /// Apply `cmd` at `now`.
    ///
    /// Commands that make no sense in the current mode are ignored; out of
    /// range values are clamped or wrapped by the controllers.
    pub fn execute(&mut self, cmd: ViewCommand, now: Instant) {
        if self.disposed {
            log::debug!("{cmd:?} ignored: view disposed");
            return;
        }
        if cmd.is_interaction() {
            self.interact(now);
        }

        match cmd {
            ViewCommand::ToggleCinematic => self.toggle_cinematic(now),
            ViewCommand::Skip => self.skip(now),
            ViewCommand::ResetView => self.reset_view(now),
            ViewCommand::ToggleAutoRotate => self.toggle_auto_rotate(now),
            ViewCommand::SelectHotspot { id } => {
                let _ = self.select_hotspot(&id);
            }
            ViewCommand::ClearHotspot => self.hotspots.clear(),
            ViewCommand::ChangeView { id } => {
                let _ = self.change_view(&id, now);
            }
            ViewCommand::SetZoom { value } => {
                let _ = self.zoom.set(value);
            }
            ViewCommand::ZoomIn => {
                let _ = self.zoom.zoom_in();
            }
            ViewCommand::ZoomOut => {
                let _ = self.zoom.zoom_out();
            }
            ViewCommand::RotateLeft => self.rotation.rotate_left(),
            ViewCommand::RotateRight => self.rotation.rotate_right(),
            ViewCommand::SetFrame { frame } => self.rotation.set_frame(frame),
            ViewCommand::DragBegin { x } => self.rotation.begin(x),
            ViewCommand::DragMove { x } => {
                let _ = self.rotation.move_to(x);
            }
            ViewCommand::DragEnd => {
                self.rotation.end();
                self.last_interaction = now;
            }
            ViewCommand::PinchBegin { distance } => {
                self.zoom.pinch_start(distance);
            }
            ViewCommand::PinchMove { distance } => {
                let _ = self.zoom.pinch_move(distance);
            }
            ViewCommand::PinchEnd => {
                self.zoom.pinch_end();
                self.last_interaction = now;
            }
            ViewCommand::Wheel { delta_y } => {
                let _ = self.zoom.wheel(delta_y);
            }
            ViewCommand::ProductClicked => self.register_click(now),
        }
    }

    /// Start the demo, or stop it if running. Requests made during the
    /// intro or before assets load are queued; a second toggle withdraws
    /// the queued request.
    pub fn toggle_cinematic(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        match self.motion {
            Motion::CinematicDemo { .. } | Motion::Transitioning => {
                log::info!("cinematic demo stopped");
                self.overlay.cancel();
                self.return_to_manual(now);
            }
            Motion::Manual { .. } | Motion::IdleAutoRotate
                if self.assets_loaded() =>
            {
                self.demo_request = None;
                self.begin_transition(now);
            }
            _ => {
                if self.demo_request == Some(DemoRequest::Toggle) {
                    log::debug!("queued demo request withdrawn");
                    self.demo_request = None;
                } else {
                    log::debug!("demo queued until intro and assets finish");
                    self.demo_request = Some(DemoRequest::Toggle);
                }
            }
        }
    }

    /// Stop the intro or demo and hand control to the user, leaving the
    /// camera where it is. Skipping the intro also drops the automatic
    /// demo. With nothing to skip this is a no-op.
    pub fn skip(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        match self.motion {
            Motion::Intro { .. } => {
                log::info!("intro skipped");
                if self.demo_request == Some(DemoRequest::Auto) {
                    self.demo_request = None;
                }
                self.return_to_manual(now);
            }
            Motion::CinematicDemo { .. } | Motion::Transitioning => {
                log::info!("cinematic demo skipped");
                self.overlay.cancel();
                self.return_to_manual(now);
            }
            Motion::Manual { .. } | Motion::IdleAutoRotate => {
                log::debug!("skip ignored in {}", self.mode());
            }
        }
    }

    /// Snap rotation, zoom, and pose to their defaults and stop any
    /// automated motion.
    pub fn reset_view(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        self.rotation.reset();
        let _ = self.zoom.reset();
        self.overlay.cancel();
        self.demo_request = None;
        self.pose = self.default_pose;
        log::info!("view reset");
        self.return_to_manual(now);
    }

    /// Enter auto-rotate now, or leave it and stop re-entering it when
    /// idle. Outside manual and auto-rotate only the preference flips.
    pub fn toggle_auto_rotate(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        match self.motion {
            Motion::IdleAutoRotate => {
                self.idle_auto_rotate = false;
                self.return_to_manual(now);
            }
            Motion::Manual { .. } => {
                self.idle_auto_rotate = true;
                self.set_motion(Motion::IdleAutoRotate);
            }
            _ => {
                self.idle_auto_rotate = !self.idle_auto_rotate;
                log::debug!(
                    "idle auto-rotate set to {}",
                    self.idle_auto_rotate
                );
            }
        }
    }

    /// Toggle selection of hotspot `id`; returns the active hotspot id.
    pub fn select_hotspot(&mut self, id: &str) -> Option<&str> {
        if self.disposed {
            return self.hotspots.active_id();
        }
        self.hotspots.select(id).map(|h| h.id.as_str())
    }

    /// Set the zoom factor as a direct manipulation; returns the clamped
    /// value.
    pub fn set_zoom(&mut self, value: f32, now: Instant) -> f32 {
        if self.disposed {
            return self.zoom.value();
        }
        self.interact(now);
        self.zoom.set(value)
    }

    fn register_click(&mut self, now: Instant) {
        match self.clicks.click(now) {
            BurstResult::Fired => {
                self.spotlight = !self.spotlight;
                log::info!(
                    "spotlight {}",
                    if self.spotlight { "on" } else { "off" }
                );
            }
            BurstResult::Counting(count) => {
                log::trace!("product click {count}");
            }
        }
    }

    // ── Assets ──────────────────────────────────────────────────────

    /// Record progress of the current view group's batch. Demos and idle
    /// auto-rotate wait for a complete batch.
    pub fn set_loading_progress(&mut self, progress: LoadProgress) {
        let was_loaded = self.assets_loaded();
        self.loading = Some(progress);
        if progress.is_complete() {
            if !was_loaded {
                log::info!(
                    "view '{}' ready ({} keys)",
                    self.current_group,
                    progress.total
                );
            }
            let _ = self.loaded_groups.insert(self.current_group.clone());
        }
    }

    /// Switch to view group `id` and leave auto-rotate.
    ///
    /// Returns the keys the host must load, or `None` when nothing needs
    /// loading: the group is already loaded, already current, unknown, or
    /// the view is disposed. Until the returned keys are reported complete
    /// through [`set_loading_progress`](Self::set_loading_progress), demos
    /// and idle auto-rotate wait.
    pub fn change_view(
        &mut self,
        id: &str,
        now: Instant,
    ) -> Option<Vec<String>> {
        if self.disposed || id == self.current_group {
            return None;
        }
        if !self.groups.groups.iter().any(|g| g.id == id) {
            log::debug!("unknown view '{id}' ignored");
            return None;
        }
        log::info!("view group: {} -> {id}", self.current_group);
        id.clone_into(&mut self.current_group);
        if matches!(self.motion, Motion::IdleAutoRotate) {
            self.return_to_manual(now);
        }

        let keys = self.groups.keys_for(id);
        let total = keys.len();
        if self.loaded_groups.contains(id) || keys.is_empty() {
            self.set_loading_progress(LoadProgress::new(total, total));
            return None;
        }
        self.set_loading_progress(LoadProgress::new(0, total));
        Some(keys)
    }

    /// Record that group `id` was loaded in the background, so switching
    /// to it needs no loading gate.
    pub fn mark_group_loaded(&mut self, id: &str) {
        if self.groups.groups.iter().any(|g| g.id == id) {
            let _ = self.loaded_groups.insert(id.to_owned());
        }
    }

    /// Groups other than the current one that are not loaded yet, in
    /// display order.
    #[must_use]
    pub fn background_groups(&self) -> Vec<&str> {
        self.groups
            .groups
            .iter()
            .map(|g| g.id.as_str())
            .filter(|id| {
                *id != self.current_group && !self.loaded_groups.contains(*id)
            })
            .collect()
    }

    /// Id of the active view group.
    #[must_use]
    pub fn current_group(&self) -> &str {
        &self.current_group
    }

    /// Whether the last reported batch has fully settled.
    #[must_use]
    pub fn assets_loaded(&self) -> bool {
        self.loading.is_some_and(|p| p.is_complete())
    }

    /// Percentage of the last reported batch, 0 before any report.
    #[must_use]
    pub fn loading_percentage(&self) -> u32 {
        self.loading.map_or(0, |p| p.percentage)
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Unmount: cancel the overlay, queued demos, and gestures, and freeze
    /// the pose. Later ticks and commands do nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.overlay.cancel();
        self.demo_request = None;
        self.rotation.end();
        self.zoom.pinch_end();
        self.set_motion(Motion::manual());
        self.disposed = true;
        log::info!("view disposed");
    }

    /// Whether [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.motion.mode()
    }

    /// Pose written by the last tick.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        self.pose
    }

    /// Drag rotation state.
    #[must_use]
    pub fn rotation(&self) -> &PointerRotationMapper {
        &self.rotation
    }

    /// Zoom state.
    #[must_use]
    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    /// Hotspot catalog and selection.
    #[must_use]
    pub fn hotspots(&self) -> &HotspotRegistry {
        &self.hotspots
    }

    /// Whether the triple-click spotlight is on.
    #[must_use]
    pub fn spotlight(&self) -> bool {
        self.spotlight
    }

    /// Whether auto-rotate is re-entered after the idle delay.
    #[must_use]
    pub fn idle_auto_rotate(&self) -> bool {
        self.idle_auto_rotate
    }

    /// Whether a demo is queued behind the intro or asset loading.
    #[must_use]
    pub fn demo_pending(&self) -> bool {
        self.demo_request.is_some()
    }

    /// Overlay phase as of the last tick.
    #[must_use]
    pub fn overlay_phase(&self) -> OverlayPhase {
        self.overlay.phase()
    }

    /// Overlay opacity at `now`.
    #[must_use]
    pub fn overlay_opacity(&self, now: Instant) -> f32 {
        self.overlay.opacity(now)
    }

    /// Name of the keyframe the demo is heading toward.
    #[must_use]
    pub fn current_shot(&self) -> Option<&str> {
        match &self.motion {
            Motion::CinematicDemo { animator, .. } => {
                animator.current_keyframe().map(|k| k.name.as_str())
            }
            _ => None,
        }
    }

    /// GPU uniform for the current pose.
    #[must_use]
    pub fn uniform(&self, camera: &Camera) -> PoseUniform {
        PoseUniform::new(camera, &self.pose)
    }

    /// Hotspot markers in screen space for the current pose.
    #[must_use]
    pub fn project_hotspots(
        &self,
        camera: &Camera,
        viewport: Vec2,
    ) -> Vec<ProjectedHotspot<'_>> {
        self.hotspots.project(camera, &self.pose, viewport)
    }

    /// Scroll-driven tilt, in degrees, for each element.
    #[must_use]
    pub fn tilt_angles(
        &self,
        elements: &[ElementRect],
        viewport_height: f32,
    ) -> Vec<f32> {
        self.tilt.angles(elements, viewport_height)
    }

    /// UI-facing summary at `now`.
    #[must_use]
    pub fn snapshot(&self, now: Instant) -> ViewSnapshot {
        ViewSnapshot {
            mode: self.mode(),
            overlay_phase: self.overlay.phase(),
            overlay_opacity: self.overlay.opacity(now),
            zoom_percentage: self.zoom.percentage(),
            loading_percentage: self.loading_percentage(),
            view: self.current_group.clone(),
            frame: self.rotation.frame(),
            total_steps: self.rotation.total_steps(),
            spotlight: self.spotlight,
            auto_rotate: self.idle_auto_rotate,
            active_hotspot: self.hotspots.active_id().map(str::to_owned),
            shot: self.current_shot().map(str::to_owned),
            pose: self.pose,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    fn manual_options() -> Options {
        let mut options = Options::default();
        options.camera.auto_demo = false;
        options
    }

    fn loaded(options: &Options, start: Instant) -> ViewStateMachine {
        let mut view = ViewStateMachine::new(options, start);
        view.set_loading_progress(LoadProgress::new(16, 16));
        view
    }

    /// Mounted with assets ready, intro finished at 3000 ms, dark phase
    /// from 3001 ms, demo running from 4201 ms.
    fn demo_running(start: Instant) -> ViewStateMachine {
        let mut view = loaded(&Options::default(), start);
        let _ = view.tick(at(start, 3000));
        let _ = view.tick(at(start, 3001));
        let _ = view.tick(at(start, 4201));
        assert_eq!(view.mode(), Mode::CinematicDemo);
        view
    }

    fn close(a: CameraPose, b: CameraPose) -> bool {
        a.position.distance(b.position) < 1e-3
            && a.target.distance(b.target) < 1e-3
    }

    #[test]
    fn test_intro_holds_then_sweeps_to_default() {
        let start = Instant::now();
        let options = manual_options();
        let mut view = ViewStateMachine::new(&options, start);
        let establishing = options.camera.establishing_pose;

        assert_eq!(view.mode(), Mode::Intro);
        assert_eq!(view.tick(start), establishing);
        assert_eq!(view.tick(at(start, 400)), establishing);

        let mid = view.tick(at(start, 1750));
        assert_ne!(mid, establishing);
        assert_ne!(mid, options.camera.default_pose);

        assert_eq!(view.tick(at(start, 3000)), options.camera.default_pose);
        assert_eq!(view.mode(), Mode::Manual);
    }

    #[test]
    fn test_intro_runs_without_assets() {
        let start = Instant::now();
        let mut view = ViewStateMachine::new(&Options::default(), start);
        assert!(!view.assets_loaded());
        let _ = view.tick(at(start, 3000));
        assert_eq!(view.mode(), Mode::Manual);
    }

    #[test]
    fn test_auto_demo_waits_for_assets() {
        let start = Instant::now();
        let mut view = ViewStateMachine::new(&Options::default(), start);
        let _ = view.tick(at(start, 3000));
        let _ = view.tick(at(start, 4000));
        assert_eq!(view.mode(), Mode::Manual);
        assert!(view.demo_pending());

        view.set_loading_progress(LoadProgress::new(3, 16));
        let _ = view.tick(at(start, 4500));
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.loading_percentage(), 18);

        view.set_loading_progress(LoadProgress::new(16, 16));
        let _ = view.tick(at(start, 5000));
        assert_eq!(view.mode(), Mode::Transitioning);
        assert_eq!(view.overlay_phase(), OverlayPhase::Dark);
        assert!(!view.demo_pending());

        let held = view.pose();
        assert_eq!(view.tick(at(start, 6199)), held);
        assert_eq!(view.mode(), Mode::Transitioning);

        let _ = view.tick(at(start, 6200));
        assert_eq!(view.mode(), Mode::CinematicDemo);
        assert_eq!(view.overlay_phase(), OverlayPhase::Revealing);
        assert_eq!(view.current_shot(), Some("front-low"));
    }

    #[test]
    fn test_demo_starts_from_the_current_pose() {
        let start = Instant::now();
        let mut view = demo_running(start);
        let entry = view.pose();
        assert_eq!(view.tick(at(start, 4201)), entry);
    }

    #[test]
    fn test_demo_stops_after_time_limit() {
        let start = Instant::now();
        let mut view = demo_running(start);
        let last = view.tick(at(start, 4201 + 29_999));
        assert_eq!(view.mode(), Mode::CinematicDemo);

        assert_eq!(view.tick(at(start, 4201 + 30_000)), last);
        assert_eq!(view.mode(), Mode::Manual);
    }

    #[test]
    fn test_skipping_demo_leaves_last_interpolated_pose() {
        let start = Instant::now();
        let mut view = demo_running(start);
        let last = view.tick(at(start, 5201));

        view.execute(ViewCommand::Skip, at(start, 5202));
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.overlay_phase(), OverlayPhase::None);
        assert_eq!(view.tick(at(start, 5300)), last);
    }

    #[test]
    fn test_toggling_demo_off_leaves_last_pose() {
        let start = Instant::now();
        let mut view = demo_running(start);
        let last = view.tick(at(start, 6000));
        view.toggle_cinematic(at(start, 6001));
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.tick(at(start, 6100)), last);
    }

    #[test]
    fn test_skip_without_demo_is_a_no_op() {
        let start = Instant::now();
        let mut view = loaded(&manual_options(), start);
        let pose = view.tick(at(start, 3000));

        view.execute(ViewCommand::Skip, at(start, 3100));
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.tick(at(start, 3200)), pose);
    }

    #[test]
    fn test_skipping_intro_drops_auto_demo() {
        let start = Instant::now();
        let mut view = loaded(&Options::default(), start);
        let _ = view.tick(at(start, 1000));
        let held = view.pose();

        view.skip(at(start, 1000));
        assert_eq!(view.mode(), Mode::Manual);
        assert!(!view.demo_pending());
        assert_eq!(view.tick(at(start, 2000)), held);
        assert_eq!(view.mode(), Mode::Manual);
    }

    #[test]
    fn test_toggle_during_intro_is_queued() {
        let start = Instant::now();
        let mut view = loaded(&manual_options(), start);
        view.execute(ViewCommand::ToggleCinematic, at(start, 1000));
        assert_eq!(view.mode(), Mode::Intro);
        assert!(view.demo_pending());

        let _ = view.tick(at(start, 3000));
        assert_eq!(view.mode(), Mode::Manual);
        let _ = view.tick(at(start, 3001));
        assert_eq!(view.mode(), Mode::Transitioning);
    }

    #[test]
    fn test_second_toggle_withdraws_queued_demo() {
        let start = Instant::now();
        let mut view = ViewStateMachine::new(&manual_options(), start);
        view.toggle_cinematic(at(start, 100));
        view.toggle_cinematic(at(start, 200));
        assert!(!view.demo_pending());
    }

    #[test]
    fn test_interaction_exits_demo() {
        let start = Instant::now();
        let mut view = demo_running(start);
        let last = view.tick(at(start, 5000));

        view.execute(ViewCommand::DragBegin { x: 200.0 }, at(start, 5001));
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.overlay_phase(), OverlayPhase::None);
        assert!(close(view.tick(at(start, 5002)), last));
    }

    #[test]
    fn test_interaction_drops_pending_auto_demo() {
        let start = Instant::now();
        let mut view = ViewStateMachine::new(&Options::default(), start);
        let _ = view.tick(at(start, 3000));
        view.execute(ViewCommand::ZoomIn, at(start, 3500));
        view.set_loading_progress(LoadProgress::new(16, 16));
        let _ = view.tick(at(start, 3600));
        assert_eq!(view.mode(), Mode::Manual);
    }

    #[test]
    fn test_idle_delay_enters_auto_rotate() {
        let start = Instant::now();
        let mut view = loaded(&manual_options(), start);
        let _ = view.tick(at(start, 3000));
        let _ = view.tick(at(start, 7999));
        assert_eq!(view.mode(), Mode::Manual);

        let first = view.tick(at(start, 8000));
        assert_eq!(view.mode(), Mode::IdleAutoRotate);
        let second = view.tick(at(start, 8016));
        assert_ne!(first.position, second.position);
        assert!((first.distance() - second.distance()).abs() < 1e-4);

        view.execute(ViewCommand::DragBegin { x: 10.0 }, at(start, 9000));
        assert_eq!(view.mode(), Mode::Manual);
    }

    #[test]
    fn test_held_drag_blocks_idle() {
        let start = Instant::now();
        let mut view = loaded(&manual_options(), start);
        let _ = view.tick(at(start, 3000));
        view.execute(ViewCommand::DragBegin { x: 10.0 }, at(start, 3500));
        let _ = view.tick(at(start, 20_000));
        assert_eq!(view.mode(), Mode::Manual);
    }

    #[test]
    fn test_manual_drag_and_zoom_move_the_camera() {
        let start = Instant::now();
        let mut view = loaded(&manual_options(), start);
        let rest = view.tick(at(start, 3000));

        view.execute(ViewCommand::DragBegin { x: 100.0 }, at(start, 3100));
        assert!(close(view.tick(at(start, 3100)), rest));

        view.execute(ViewCommand::DragMove { x: 70.0 }, at(start, 3150));
        let turned = view.tick(at(start, 3150));
        assert_ne!(view.rotation().frame(), 0);
        assert!(turned.position.distance(rest.position) > 0.1);
        assert!((turned.distance() - rest.distance()).abs() < 1e-3);

        view.execute(ViewCommand::Wheel { delta_y: -1.0 }, at(start, 3200));
        let zoomed = view.tick(at(start, 3200));
        assert!(zoomed.distance() < turned.distance());
        assert_eq!(view.zoom().percentage(), 110);
    }

    #[test]
    fn test_reset_view_restores_defaults() {
        let start = Instant::now();
        let options = manual_options();
        let mut view = loaded(&options, start);
        let _ = view.tick(at(start, 3000));
        view.execute(ViewCommand::SetFrame { frame: 3 }, at(start, 3100));
        view.execute(ViewCommand::SetZoom { value: 2.5 }, at(start, 3100));
        let _ = view.tick(at(start, 3100));

        view.execute(ViewCommand::ResetView, at(start, 3200));
        assert_eq!(view.rotation().frame(), 0);
        assert_eq!(view.zoom().value(), 1.0);
        assert_eq!(view.tick(at(start, 3300)), options.camera.default_pose);
    }

    #[test]
    fn test_set_zoom_clamps_and_takes_control() {
        let start = Instant::now();
        let mut view = ViewStateMachine::new(&manual_options(), start);
        assert_eq!(view.set_zoom(9.0, at(start, 100)), 3.0);
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.select_hotspot("sidepod"), Some("sidepod"));
        assert_eq!(view.select_hotspot("sidepod"), None);
    }

    #[test]
    fn test_reset_view_stops_demo() {
        let start = Instant::now();
        let mut view = demo_running(start);
        view.reset_view(at(start, 5000));
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.overlay_phase(), OverlayPhase::None);
    }

    #[test]
    fn test_toggle_auto_rotate_enters_and_leaves() {
        let start = Instant::now();
        let mut view = loaded(&manual_options(), start);
        let _ = view.tick(at(start, 3000));

        view.execute(ViewCommand::ToggleAutoRotate, at(start, 3100));
        assert_eq!(view.mode(), Mode::IdleAutoRotate);
        view.execute(ViewCommand::ToggleAutoRotate, at(start, 3200));
        assert_eq!(view.mode(), Mode::Manual);
        assert!(!view.idle_auto_rotate());

        let _ = view.tick(at(start, 60_000));
        assert_eq!(view.mode(), Mode::Manual);
    }

    #[test]
    fn test_triple_click_toggles_spotlight() {
        let start = Instant::now();
        let mut view = loaded(&manual_options(), start);
        for ms in [0, 100, 200] {
            view.execute(ViewCommand::ProductClicked, at(start, ms));
        }
        assert!(view.spotlight());

        view.execute(ViewCommand::ProductClicked, at(start, 1000));
        view.execute(ViewCommand::ProductClicked, at(start, 1900));
        view.execute(ViewCommand::ProductClicked, at(start, 2000));
        assert!(view.spotlight());

        view.execute(ViewCommand::ProductClicked, at(start, 2100));
        assert!(!view.spotlight());
    }

    #[test]
    fn test_hotspot_commands_route_to_registry() {
        let start = Instant::now();
        let mut view = ViewStateMachine::new(&Options::default(), start);
        let select = |id: &str| ViewCommand::SelectHotspot { id: id.into() };

        view.execute(select("halo"), start);
        assert_eq!(view.hotspots().active_id(), Some("halo"));
        view.execute(select("halo"), start);
        assert_eq!(view.hotspots().active_id(), None);
        view.execute(select("halo"), start);
        view.execute(ViewCommand::ClearHotspot, start);
        assert_eq!(view.hotspots().active_id(), None);
        assert_eq!(view.mode(), Mode::Intro);
    }

    #[test]
    fn test_empty_sequence_falls_back_to_manual() {
        let start = Instant::now();
        let mut options = manual_options();
        options.keyframes.clear();
        let mut view = loaded(&options, start);
        let _ = view.tick(at(start, 3000));
        view.toggle_cinematic(at(start, 3100));
        let _ = view.tick(at(start, 3100));
        assert_eq!(view.mode(), Mode::Transitioning);

        let _ = view.tick(at(start, 4300));
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.overlay_phase(), OverlayPhase::None);
    }

    #[test]
    fn test_dispose_freezes_everything() {
        let start = Instant::now();
        let mut view = demo_running(start);
        let last = view.tick(at(start, 5000));
        view.dispose();

        assert!(view.is_disposed());
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.tick(at(start, 9000)), last);
        view.execute(ViewCommand::ZoomIn, at(start, 9000));
        assert_eq!(view.zoom().value(), 1.0);
        assert_eq!(view.select_hotspot("halo"), None);
        view.execute(
            ViewCommand::SelectHotspot { id: "halo".into() },
            at(start, 9000),
        );
        assert_eq!(view.hotspots().active_id(), None);
        assert_eq!(view.change_view("interior", at(start, 9000)), None);
        assert_eq!(view.current_group(), "exterior");
    }

    #[test]
    fn test_view_change_regates_demo_and_idle() {
        let start = Instant::now();
        let mut view = loaded(&manual_options(), start);
        let _ = view.tick(at(start, 3000));
        let _ = view.tick(at(start, 8000));
        assert_eq!(view.mode(), Mode::IdleAutoRotate);

        let keys = view.change_view("interior", at(start, 8500));
        assert_eq!(
            keys,
            Some(vec!["car-images/interior/car-interior-1.png".to_owned()])
        );
        assert_eq!(view.mode(), Mode::Manual);
        assert_eq!(view.current_group(), "interior");
        assert!(!view.assets_loaded());
        assert_eq!(view.loading_percentage(), 0);
        assert!(view.idle_auto_rotate());

        let _ = view.tick(at(start, 14_000));
        assert_eq!(view.mode(), Mode::Manual);
        view.toggle_cinematic(at(start, 14_000));
        let _ = view.tick(at(start, 14_100));
        assert_eq!(view.mode(), Mode::Manual);
        assert!(view.demo_pending());

        view.set_loading_progress(LoadProgress::new(1, 1));
        let _ = view.tick(at(start, 14_200));
        assert_eq!(view.mode(), Mode::Transitioning);

        assert_eq!(view.change_view("exterior", at(start, 14_300)), None);
        assert!(view.assets_loaded());
        assert_eq!(view.loading_percentage(), 100);
        assert_eq!(view.change_view("exterior", at(start, 14_300)), None);
        assert_eq!(view.change_view("trunk", at(start, 14_300)), None);
        assert_eq!(view.current_group(), "exterior");
    }

    #[test]
    fn test_background_groups_skip_current_and_loaded() {
        let start = Instant::now();
        let mut view = loaded(&manual_options(), start);
        assert_eq!(view.background_groups(), ["interior", "front", "detail"]);

        view.mark_group_loaded("front");
        view.mark_group_loaded("trunk");
        assert_eq!(view.background_groups(), ["interior", "detail"]);

        view.execute(
            ViewCommand::ChangeView { id: "front".into() },
            at(start, 100),
        );
        assert_eq!(view.current_group(), "front");
        assert!(view.assets_loaded());
        assert_eq!(view.snapshot(at(start, 100)).view, "front");
        assert_eq!(view.background_groups(), ["interior", "detail"]);
    }

    #[test]
    fn test_every_tick_pose_is_finite() {
        let start = Instant::now();
        let mut view = loaded(&Options::default(), start);
        for step in 0..2500_u64 {
            let now = at(start, step * 16);
            if step == 1200 {
                view.execute(ViewCommand::Wheel { delta_y: 1.0 }, now);
            }
            assert!(view.tick(now).is_finite(), "tick {step}");
        }
    }
}
