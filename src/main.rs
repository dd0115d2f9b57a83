//! Headless turntable session.
//!
//! Loads the active view group, preloads the other groups in the
//! background one second apart, plays the intro and cinematic demo on a
//! synthetic clock, replays a short scripted user session, and logs UI
//! snapshots once per simulated second.
//!
//! ```text
//! turntable [ASSET_ROOT] [PRESET.toml]
//! ```
//!
//! Without `ASSET_ROOT` the assets come from memory, with one key left
//! out so the placeholder path is exercised.

use std::cell::Cell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::task::{Context, Poll};

use futures_util::future::LocalBoxFuture;
use futures_util::task::noop_waker_ref;
use futures_util::FutureExt;
use glam::Vec2;
use turntable::assets::{
    AssetData, AssetHandle, AssetPreloadCache, FsFetcher, LoadProgress,
    MemoryFetcher,
};
use turntable::camera::Camera;
use turntable::input::{InputEvent, InputProcessor};
use turntable::util::frame_clock::FrameClock;
use turntable::{Options, ViewCommand, ViewStateMachine};
use web_time::{Duration, Instant};

/// Simulated session length.
const SESSION: Duration = Duration::from_secs(45);
/// Candidate tick spacing; the frame clock thins this to 60 fps.
const CANDIDATE_TICK: Duration = Duration::from_micros(4_167);
const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
/// Gap between background group preloads.
const PRELOAD_STAGGER: Duration = Duration::from_secs(1);

/// One scripted user action.
enum Step {
    Key(&'static str),
    Pointer(InputEvent),
    Command(ViewCommand),
}

/// The scripted session, in milliseconds since mount.
fn script() -> Vec<(u64, Step)> {
    let down = |x| Step::Pointer(InputEvent::PointerDown { x, y: 360.0 });
    let drag = |x| Step::Pointer(InputEvent::PointerMove { x, y: 360.0 });
    let view = |id: &str| {
        Step::Command(ViewCommand::ChangeView { id: id.to_owned() })
    };
    vec![
        (1_500, view("detail")),
        (12_000, Step::Key("Escape")),
        (12_500, down(640.0)),
        (12_550, drag(610.0)),
        (12_600, drag(570.0)),
        (12_650, drag(520.0)),
        (12_700, Step::Pointer(InputEvent::PointerUp)),
        (13_000, Step::Pointer(InputEvent::Wheel { delta_y: -1.0 })),
        (13_100, Step::Pointer(InputEvent::Wheel { delta_y: -1.0 })),
        (13_500, down(640.0)),
        (13_520, Step::Pointer(InputEvent::PointerUp)),
        (13_700, down(640.0)),
        (13_720, Step::Pointer(InputEvent::PointerUp)),
        (13_900, down(640.0)),
        (13_920, Step::Pointer(InputEvent::PointerUp)),
        (
            14_000,
            Step::Command(ViewCommand::SelectHotspot {
                id: "halo".to_owned(),
            }),
        ),
        (20_000, view("exterior")),
        (25_000, Step::Key("KeyC")),
        (38_000, Step::Key("KeyR")),
    ]
}

fn load_options(path: Option<String>) -> Options {
    let Some(path) = path else {
        return Options::default();
    };
    match Options::load(Path::new(&path)) {
        Ok(options) => {
            log::info!("loaded preset {path}");
            options
        }
        Err(e) => {
            log::error!("{e}; using default options");
            Options::default()
        }
    }
}

fn build_cache(root: Option<PathBuf>, keys: &[String]) -> AssetPreloadCache {
    if let Some(root) = root {
        log::info!("reading assets from {}", root.display());
        return AssetPreloadCache::new(FsFetcher::new(root));
    }
    let mut fetcher = MemoryFetcher::new();
    for key in keys.iter().skip(1) {
        fetcher.insert(key.as_str(), AssetData::from(key.as_bytes().to_vec()));
    }
    AssetPreloadCache::new(fetcher)
}

/// An asset batch the session is waiting on.
struct PendingLoad {
    group: String,
    /// Progress sink for the batch gating the view; background preloads
    /// have none.
    progress: Option<Rc<Cell<Option<LoadProgress>>>>,
    future: LocalBoxFuture<'static, Vec<AssetHandle>>,
}

impl PendingLoad {
    fn start(
        cache: &AssetPreloadCache,
        group: &str,
        keys: Vec<String>,
        foreground: bool,
    ) -> Self {
        log::info!(
            "loading view '{group}' ({} keys, {})",
            keys.len(),
            if foreground { "foreground" } else { "background" }
        );
        let progress = foreground.then(|| Rc::new(Cell::new(None)));
        let sink = progress.clone();
        let cache = cache.clone();
        let future = async move {
            cache
                .load(&keys, |p| {
                    if let Some(sink) = &sink {
                        sink.set(Some(p));
                    }
                })
                .await
        }
        .boxed_local();
        Self {
            group: group.to_owned(),
            progress,
            future,
        }
    }
}

/// Poll every load once, forwarding progress for the active group.
/// Returns whether a foreground load finished.
fn poll_loads(
    loads: &mut Vec<PendingLoad>,
    view: &mut ViewStateMachine,
    cx: &mut Context<'_>,
) -> bool {
    let mut foreground_done = false;
    for mut load in std::mem::take(loads) {
        let ready = load.future.poll_unpin(cx);
        let progress = load.progress.as_ref().and_then(|p| p.take());
        if let Some(progress) = progress {
            if load.group == view.current_group() {
                view.set_loading_progress(progress);
            }
        }
        match ready {
            Poll::Ready(handles) => {
                report_handles(&load.group, &handles);
                view.mark_group_loaded(&load.group);
                foreground_done |= load.progress.is_some();
            }
            Poll::Pending => loads.push(load),
        }
    }
    foreground_done
}

/// Apply one scripted step. View switches are routed through
/// [`ViewStateMachine::change_view`] so the keys it asks for get loaded.
fn apply(
    step: Step,
    input: &mut InputProcessor,
    view: &mut ViewStateMachine,
    now: Instant,
) -> Vec<(String, Vec<String>)> {
    let commands = match step {
        Step::Key(key) => input.handle_key_press(key).into_iter().collect(),
        Step::Pointer(event) => input.handle_event(event),
        Step::Command(cmd) => vec![cmd],
    };
    let mut requests = Vec::new();
    for cmd in commands {
        log::debug!("command {cmd:?}");
        match cmd {
            ViewCommand::ChangeView { id } => {
                if let Some(keys) = view.change_view(&id, now) {
                    requests.push((id, keys));
                }
            }
            cmd => view.execute(cmd, now),
        }
    }
    requests
}

fn report_handles(group: &str, handles: &[AssetHandle]) {
    let placeholders: Vec<&str> = handles
        .iter()
        .filter(|h| h.is_placeholder())
        .map(AssetHandle::key)
        .collect();
    log::info!(
        "view '{group}': {} assets ready, {} placeholders {:?}",
        handles.len() - placeholders.len(),
        placeholders.len(),
        placeholders
    );
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let mut args = std::env::args().skip(1);
    let asset_root = args.next().map(PathBuf::from);
    let options = load_options(args.next());

    let cache = build_cache(asset_root, &options.asset_groups.all_keys());
    let mut cx = Context::from_waker(noop_waker_ref());

    let start = Instant::now();
    let camera = Camera::from_options(&options.camera, VIEWPORT.x / VIEWPORT.y);
    let mut view = ViewStateMachine::new(&options, start);

    let initial = view.current_group().to_owned();
    let mut loads = vec![PendingLoad::start(
        &cache,
        &initial,
        options.asset_groups.keys_for(&initial),
        true,
    )];
    let mut background: Option<VecDeque<(Duration, String)>> = None;
    let mut input = InputProcessor::with_key_bindings(options.keybindings);
    let mut clock = FrameClock::new(60);
    let mut script = script().into_iter().peekable();
    let mut next_report = Duration::ZERO;

    let mut elapsed = Duration::ZERO;
    while elapsed <= SESSION {
        let candidate = start + elapsed;
        elapsed += CANDIDATE_TICK;
        let Some(now) = clock.tick(candidate) else {
            continue;
        };
        let since_mount = now.saturating_duration_since(start);

        if poll_loads(&mut loads, &mut view, &mut cx) && background.is_none()
        {
            let mut at = since_mount;
            let queue = view
                .background_groups()
                .into_iter()
                .map(|id| {
                    at += PRELOAD_STAGGER;
                    (at, id.to_owned())
                })
                .collect();
            background = Some(queue);
        }
        if let Some(queue) = &mut background {
            while queue.front().is_some_and(|(at, _)| *at <= since_mount) {
                let Some((_, id)) = queue.pop_front() else {
                    break;
                };
                if view.background_groups().contains(&id.as_str()) {
                    let keys = options.asset_groups.keys_for(&id);
                    loads.push(PendingLoad::start(&cache, &id, keys, false));
                }
            }
        }

        while let Some((_, step)) = script.next_if(|(at, _)| {
            Duration::from_millis(*at) <= since_mount
        }) {
            for (id, keys) in apply(step, &mut input, &mut view, now) {
                loads.push(PendingLoad::start(&cache, &id, keys, true));
            }
        }

        let _ = view.tick(now);

        if since_mount >= next_report {
            next_report += Duration::from_secs(1);
            match view.snapshot(now).to_json() {
                Ok(json) => log::info!("{json}"),
                Err(e) => log::warn!("snapshot not serializable: {e}"),
            }
        }
    }

    let uniform = view.uniform(&camera);
    let visible = view.project_hotspots(&camera, VIEWPORT);
    log::info!(
        "session over after {} frames (~{:.0} fps): {} of {} hotspots \
         on screen, uniform {} bytes",
        clock.frames(),
        clock.fps(),
        visible.len(),
        view.hotspots().len(),
        bytemuck::bytes_of(&uniform).len()
    );
    view.dispose();
}
