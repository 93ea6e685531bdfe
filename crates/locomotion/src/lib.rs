//! Locomotion controller: turns per-frame hand input into rig movement.
//!
//! Three gestures are evaluated every tick, always in this order:
//! two-hand scale/rotate, thumbstick flight, one-hand crawl.
//!
//! # Invariants
//! - Rig scale stays within `[min_scale, max_scale]`.
//! - A scale session lives only while both grips are continuously held.
//! - Rotations derived from hand geometry are yaw-only.
//! - All state mutations happen inside `LocomotionController::tick`.

pub mod config;
pub mod controller;
pub mod crawl;
pub mod event;
mod flight;
pub mod scale;

pub use config::{ConfigError, LocomotionConfig};
pub use controller::LocomotionController;
pub use crawl::CrawlState;
pub use event::{EventRecord, LocomotionEvent};
pub use scale::ScaleSession;

pub fn crate_info() -> &'static str {
    "rigspace-locomotion v0.1.0"
}
