//! Shared types and math for the rigspace locomotion stack.
//!
//! # Invariants
//! - Rotations derived from hand geometry are yaw-only (no pitch, no roll).
//! - Rig scale is uniform; a single factor applies to all three axes.

pub mod math;
mod types;

pub use types::{Hand, RigTransform};

pub fn crate_info() -> &'static str {
    "rigspace-common v0.1.0"
}
