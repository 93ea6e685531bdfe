use glam::{Vec2, Vec3};
use rigspace_common::Hand;
use serde::{Deserialize, Serialize};

/// Control-surface and pose state of one hand for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandSample {
    /// Hand anchor position.
    pub position: Vec3,
    /// Grip is held this frame.
    pub grip_held: bool,
    /// Grip went from released to held this frame.
    pub grip_pressed: bool,
    /// Index trigger is held.
    pub trigger_held: bool,
    /// Primary face button is held.
    pub primary_held: bool,
    /// Thumbstick axes, each in `[-1, 1]`. Only the left stick drives flight.
    pub thumbstick: Vec2,
}

impl HandSample {
    /// A hand at `position` with nothing pressed.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Same sample with the grip held.
    pub fn gripping(mut self) -> Self {
        self.grip_held = true;
        self
    }
}

/// Head (camera) anchor pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadPose {
    pub position: Vec3,
    /// Unit direction the head is looking along.
    pub forward: Vec3,
}

impl Default for HeadPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
        }
    }
}

/// Everything the controller reads in one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFrame {
    pub left: HandSample,
    pub right: HandSample,
    pub head: HeadPose,
}

impl InputFrame {
    pub fn hand(&self, hand: Hand) -> &HandSample {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    pub fn hand_mut(&mut self, hand: Hand) -> &mut HandSample {
        match hand {
            Hand::Left => &mut self.left,
            Hand::Right => &mut self.right,
        }
    }

    pub fn both_grips_held(&self) -> bool {
        self.left.grip_held && self.right.grip_held
    }

    pub fn any_grip_held(&self) -> bool {
        self.left.grip_held || self.right.grip_held
    }

    pub fn both_triggers_held(&self) -> bool {
        self.left.trigger_held && self.right.trigger_held
    }

    pub fn both_primaries_held(&self) -> bool {
        self.left.primary_held && self.right.primary_held
    }

    /// Fill in `grip_pressed` from the grip levels of `previous`.
    ///
    /// For hosts that only report levels. Any edge flags already set are
    /// overwritten.
    pub fn with_grip_edges(mut self, previous: Option<&InputFrame>) -> Self {
        for hand in Hand::ALL {
            let was_held = previous.is_some_and(|p| p.hand(hand).grip_held);
            let sample = self.hand_mut(hand);
            sample.grip_pressed = sample.grip_held && !was_held;
        }
        self
    }
}
