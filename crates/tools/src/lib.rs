//! Developer tooling: read-only inspection of the rig and gesture sessions.
//!
//! # Invariants
//! - Tools never mutate controller state.

mod inspector;

pub use inspector::{RigInspector, RigSummary, SessionInfo};

pub fn crate_info() -> &'static str {
    "rigspace-tools v0.1.0"
}
