//! Recorded or hand-written input, replayed frame by frame.
//!
//! Scripts are JSON. Positions are in tracked space (relative to the rig), the
//! way a headset reports them, and are mapped into world space through the rig
//! as it stands when each frame is sampled:
//!
//! ```json
//! {
//!   "dt": 0.011,
//!   "steps": [
//!     { "left": { "position": [-0.2, 1.0, -0.3], "grip_held": true }, "repeat": 5 },
//!     { "left": { "position": [-0.4, 1.0, -0.3], "grip_held": true } }
//!   ]
//! }
//! ```

use std::path::Path;

use rigspace_common::RigTransform;
use serde::{Deserialize, Serialize};

use crate::frame::{HandSample, HeadPose, InputFrame};

/// Frame delta used when a script does not specify one (90 Hz).
pub const DEFAULT_SCRIPT_DT: f32 = 1.0 / 90.0;

/// Errors from loading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("script has no frames")]
    Empty,
    #[error("invalid frame delta {0}: must be finite and positive")]
    InvalidDt(f32),
}

/// One frame of tracked-space input.
///
/// Same shape as `InputFrame`, but positions and the head direction are
/// relative to the rig. Edge flags are ignored; they are derived on replay.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackedFrame {
    pub left: HandSample,
    pub right: HandSample,
    pub head: HeadPose,
}

impl TrackedFrame {
    /// Map tracked-space poses into world space through `rig`.
    pub fn resolve(&self, rig: &RigTransform) -> InputFrame {
        let place = |sample: &HandSample| HandSample {
            position: rig.transform_point(sample.position),
            grip_pressed: false,
            ..*sample
        };
        InputFrame {
            left: place(&self.left),
            right: place(&self.right),
            head: HeadPose {
                position: rig.transform_point(self.head.position),
                forward: rig.transform_direction(self.head.forward),
            },
        }
    }
}

/// A tracked frame held for `repeat` consecutive ticks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(flatten)]
    pub frame: TrackedFrame,
    #[serde(default = "one")]
    pub repeat: u32,
}

fn one() -> u32 {
    1
}

impl From<TrackedFrame> for ScriptStep {
    fn from(frame: TrackedFrame) -> Self {
        Self { frame, repeat: 1 }
    }
}

/// A fixed-timestep sequence of tracked frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default = "default_dt")]
    pub dt: f32,
    pub steps: Vec<ScriptStep>,
}

fn default_dt() -> f32 {
    DEFAULT_SCRIPT_DT
}

impl InputScript {
    /// Build a script from steps, checking it the same way a loaded one is.
    pub fn new(dt: f32, steps: Vec<ScriptStep>) -> Result<Self, ScriptError> {
        let script = Self { dt, steps };
        script.validate()?;
        Ok(script)
    }

    /// Parse and validate a script from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(text)?;
        script.validate()?;
        Ok(script)
    }

    /// Read and validate a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let script = Self::from_json(&text)?;
        tracing::debug!(
            path = %path.display(),
            frames = script.frame_count(),
            dt = script.dt,
            "loaded input script"
        );
        Ok(script)
    }

    pub fn to_json(&self) -> Result<String, ScriptError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ScriptError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ScriptError::InvalidDt(self.dt));
        }
        if self.frame_count() == 0 {
            return Err(ScriptError::Empty);
        }
        Ok(())
    }

    /// Total number of ticks once repeats are expanded.
    pub fn frame_count(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.repeat)).sum()
    }

    /// Iterate over every tick's frame with repeats expanded.
    pub fn frames(&self) -> impl Iterator<Item = &TrackedFrame> {
        self.steps
            .iter()
            .flat_map(|s| std::iter::repeat_n(&s.frame, s.repeat as usize))
    }
}
