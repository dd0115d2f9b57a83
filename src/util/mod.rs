//! Shared utilities: easing curves and tick-source bookkeeping.

pub mod easing;
/// Frame timestamp source with rate limiting and FPS smoothing.
pub mod frame_clock;
