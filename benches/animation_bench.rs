#![allow(missing_docs)]

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use turntable::assets::LoadProgress;
use turntable::camera::{CameraPose, Keyframe, KeyframeAnimator};
use turntable::options::{default_keyframes, Options};
use turntable::util::easing::EasingFunction;
use turntable::{ViewCommand, ViewStateMachine};
use web_time::{Duration, Instant};

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::CubicInOut;
    c.bench_function("cubic_in_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn keyframe_advance_benchmark(c: &mut Criterion) {
    let keyframes: Arc<[Keyframe]> = Arc::from(default_keyframes());
    let start = Instant::now();

    c.bench_function("keyframe_advance_60fps", |b| {
        let mut animator = KeyframeAnimator::looping(
            Arc::clone(&keyframes),
            CameraPose::default(),
            start,
        );
        let mut now = start;
        b.iter(|| {
            now += Duration::from_micros(16_667);
            black_box(animator.advance(now))
        });
    });
}

fn view_tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_tick");
    let options = Options::default();

    for (name, cmd) in [
        ("manual", ViewCommand::Skip),
        ("cinematic", ViewCommand::ToggleCinematic),
    ] {
        group.bench_function(name, |b| {
            let start = Instant::now();
            let mut view = ViewStateMachine::new(&options, start);
            view.set_loading_progress(LoadProgress::new(1, 1));
            view.execute(cmd.clone(), start);
            let mut now = start;
            b.iter(|| {
                now += Duration::from_micros(16_667);
                black_box(view.tick(now))
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    easing_benchmark,
    keyframe_advance_benchmark,
    view_tick_benchmark
);
criterion_main!(benches);
