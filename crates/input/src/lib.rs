//! Input layer: per-frame snapshots of both hands and the head anchor.
//!
//! # Invariants
//! - The controller only ever sees an `InputFrame`; how it was sampled is the
//!   host's business (`InputSource`).
//! - Hand and head positions in an `InputFrame` are world space. Tracked-space
//!   data is resolved through the rig before it reaches the controller.

pub mod frame;
pub mod script;
pub mod source;

pub use frame::{HandSample, HeadPose, InputFrame};
pub use script::{InputScript, ScriptError, ScriptStep, TrackedFrame};
pub use source::{InputSource, ScriptedInput};

pub fn crate_info() -> &'static str {
    "rigspace-input v0.1.0"
}
