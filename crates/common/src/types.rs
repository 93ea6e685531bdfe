use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::math;

/// One of the two tracked hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    /// Evaluation order for per-hand checks. Right comes last, so it wins ties.
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// The movable reference frame carrying the head and hand anchors.
///
/// Position is in world space. Rotation is stored as a full quaternion but
/// locomotion only ever writes yaw-only values into it. Scale is a single
/// uniform factor and must stay positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for RigTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

impl RigTransform {
    /// Map a rig-local (tracked space) point into world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * (local * self.scale)
    }

    /// Map a world-space point into rig-local (tracked) space.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        (self.rotation.inverse() * (world - self.position)) / self.scale
    }

    /// Rotate a rig-local direction into world space. Scale is not applied.
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// Move the rig along its own axes. Scale is not applied to the offset.
    pub fn translate_local(&mut self, offset: Vec3) {
        self.position += self.rotation * offset;
    }

    /// Heading of the rig in degrees, in `[0, 360)`.
    pub fn yaw_degrees(&self) -> f32 {
        math::yaw_degrees(self.rotation)
    }

    /// The uniform scale expanded to all three axes.
    pub fn scale_vec(&self) -> Vec3 {
        Vec3::splat(self.scale)
    }
}
