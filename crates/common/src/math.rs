//! Yaw and vector helpers used by the gesture evaluators.
//!
//! Angles at this boundary are in degrees. Positive yaw is a right-handed
//! rotation about +Y.

use glam::{Quat, Vec3};

/// Below this squared length a vector or quaternion is treated as degenerate.
const DEGENERATE_SQ: f32 = 1e-12;

/// Keep only the twist of `rotation` about +Y.
///
/// Drops the x and z quaternion components and renormalizes, which is the
/// swing-twist decomposition around the up axis. A rotation with no yaw
/// component at all (a pure 180 degree swing) collapses to identity.
pub fn constrain_yaw(rotation: Quat) -> Quat {
    let twist = Quat::from_xyzw(0.0, rotation.y, 0.0, rotation.w);
    if twist.length_squared() < DEGENERATE_SQ {
        return Quat::IDENTITY;
    }
    twist.normalize()
}

/// Yaw-only rotation of `degrees` about +Y.
pub fn yaw_rotation(degrees: f32) -> Quat {
    Quat::from_axis_angle(Vec3::Y, degrees.to_radians())
}

/// Yaw of `rotation` in degrees, normalized to `[0, 360)`.
pub fn yaw_degrees(rotation: Quat) -> f32 {
    let twist = constrain_yaw(rotation);
    let degrees = (2.0 * twist.y.atan2(twist.w)).to_degrees();
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Copy of `v` projected onto the horizontal plane.
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Unsigned angle between two vectors in degrees, in `[0, 180]`.
///
/// Returns 0 when either vector is (close to) zero length. Uses atan2 of the
/// cross and dot products so nearly parallel inputs stay exact.
pub fn angle_degrees(from: Vec3, to: Vec3) -> f32 {
    if from.length_squared() < DEGENERATE_SQ || to.length_squared() < DEGENERATE_SQ {
        return 0.0;
    }
    from.cross(to).length().atan2(from.dot(to)).to_degrees()
}

/// Sign that treats zero (and NaN) as positive.
pub fn sign(value: f32) -> f32 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

/// Direction of the yaw change needed to follow `start` turning into
/// `current`, as +1 or -1.
///
/// `start` is rotated a quarter turn about the down axis and compared with
/// `current`. The rig turns opposite to the hands, so hands sweeping
/// counter-clockwise seen from above produce a negative value.
pub fn yaw_sign(start: Vec3, current: Vec3) -> f32 {
    let quarter_turn = Quat::from_axis_angle(Vec3::NEG_Y, 90f32.to_radians());
    sign((quarter_turn * start).dot(current))
}

/// Signed yaw delta in degrees between two flattened hand-to-hand vectors.
pub fn signed_yaw_delta(start: Vec3, current: Vec3) -> f32 {
    angle_degrees(start, current) * yaw_sign(start, current)
}
