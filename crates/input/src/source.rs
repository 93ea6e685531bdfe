use rigspace_common::RigTransform;

use crate::frame::InputFrame;
use crate::script::{InputScript, ScriptStep, TrackedFrame};

/// Host capability that reads the current button, axis, and pose state.
///
/// The rig is passed in because the head and hand anchors ride on it: a host
/// reporting world-space poses needs the rig as it stands right now.
pub trait InputSource {
    fn sample(&mut self, rig: &RigTransform) -> InputFrame;
}

impl<F> InputSource for F
where
    F: FnMut(&RigTransform) -> InputFrame,
{
    fn sample(&mut self, rig: &RigTransform) -> InputFrame {
        self(rig)
    }
}

/// Replays an `InputScript`, deriving grip edges from level changes.
///
/// Repeats are expanded on the fly, one frame per `sample`. Once the script
/// runs out the last frame is held, so buttons stay in their final state and
/// no further edges fire.
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    /// Index of the step being replayed.
    step: usize,
    /// Ticks of `steps[step]` already sampled.
    played: u32,
    remaining: u64,
    last: Option<TrackedFrame>,
    previous: Option<InputFrame>,
}

impl ScriptedInput {
    pub fn new(script: &InputScript) -> Self {
        Self {
            steps: script.steps.clone(),
            step: 0,
            played: 0,
            remaining: script.frame_count(),
            last: None,
            previous: None,
        }
    }

    /// Frames not yet sampled.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    fn next_tracked(&mut self) -> Option<TrackedFrame> {
        while let Some(step) = self.steps.get(self.step) {
            if self.played < step.repeat {
                self.played += 1;
                self.remaining -= 1;
                return Some(step.frame);
            }
            self.step += 1;
            self.played = 0;
        }
        None
    }
}

impl InputSource for ScriptedInput {
    fn sample(&mut self, rig: &RigTransform) -> InputFrame {
        let tracked = match self.next_tracked() {
            Some(frame) => {
                self.last = Some(frame);
                frame
            }
            None => self.last.unwrap_or_default(),
        };
        let frame = tracked.resolve(rig).with_grip_edges(self.previous.as_ref());
        self.previous = Some(frame);
        frame
    }
}
