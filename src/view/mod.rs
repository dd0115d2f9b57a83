//! View state: modes, the demo overlay, the command vocabulary, and the
//! state machine that ties controllers and motion sources to one pose.

/// The interactive command vocabulary.
pub mod command;
/// The state machine.
pub mod machine;
/// Mode tag and per-mode motion state.
pub mod mode;
/// Dark-to-light overlay sequencing.
pub mod overlay;
/// Serializable UI summary.
pub mod snapshot;

pub use command::ViewCommand;
pub use machine::ViewStateMachine;
pub use mode::Mode;
pub use overlay::{OverlayPhase, OverlaySequencer};
pub use snapshot::ViewSnapshot;
