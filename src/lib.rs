// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (clippy default thresholds)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! View-state and motion engine for an interactive product turntable.
//!
//! Turntable decides where the camera is on every frame. It owns the
//! intro sweep, the cinematic keyframe tour with its dark-to-light
//! overlay, idle auto-rotate, and manual drag/zoom control, and exposes
//! one [`camera::CameraPose`] per tick for a renderer to consume.
//!
//! # Key entry points
//!
//! - [`view::ViewStateMachine`] - mode owner; `execute` commands, `tick`
//!   once per frame
//! - [`input::InputProcessor`] - raw pointer/touch/wheel/key events to
//!   [`view::ViewCommand`]s
//! - [`assets::AssetPreloadCache`] - batch preloading with progress and
//!   placeholders for failed keys
//! - [`options::Options`] - runtime configuration with TOML presets
//!
//! # Architecture
//!
//! Everything runs on one thread, driven by the host's frame tick with
//! explicit timestamps. Asset batches are the only asynchronous work: the
//! cache hands out a local future that the host polls alongside its frame
//! loop, feeding [`assets::LoadProgress`] into the view to gate the demo
//! and auto-rotate. Camera motion is computed from stored start times, so
//! a stalled tick source resumes where it left off.

pub mod assets;
pub mod camera;
pub mod error;
pub mod hotspot;
pub mod input;
pub mod options;
pub mod util;
pub mod view;

pub use error::TurntableError;
pub use options::Options;
pub use view::{ViewCommand, ViewStateMachine};
