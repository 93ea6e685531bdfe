//! Two-handed scale and rotate ("world in hand").
//!
//! While both grips are held the rig is rescaled by the ratio of the starting
//! hand distance to the current one, and yawed by the angle the hand-to-hand
//! vector has swept since the session began. The point midway between the
//! hands stays fixed in world space throughout.

use glam::Vec3;
use rigspace_common::math;
use rigspace_input::InputFrame;

use crate::controller::TickContext;
use crate::event::LocomotionEvent;

/// State captured on the first frame both grips are held.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSession {
    pub start_scale: f32,
    /// Hand separation in rig-local space.
    pub start_distance: f32,
    /// Rig-local hand midpoint, yawed and scaled into a world offset from the
    /// rig origin.
    pub start_midpoint: Vec3,
    pub start_position: Vec3,
    /// Flattened rig-local hand-to-hand vector.
    pub start_direction: Vec3,
    pub start_yaw_degrees: f32,
}

impl ScaleSession {
    /// Scale for the current hand separation. A 0/0 ratio keeps the start
    /// scale; everything else is clamped into the configured range.
    fn scale_for(&self, distance: f32, ctx: &TickContext<'_>) -> f32 {
        let raw = self.start_scale * (self.start_distance / distance);
        if raw.is_nan() {
            return ctx.config.clamp_scale(self.start_scale);
        }
        ctx.config.clamp_scale(raw)
    }
}

/// Hand geometry in rig-local space for one frame.
struct HandSpan {
    distance: f32,
    midpoint: Vec3,
    direction: Vec3,
}

impl HandSpan {
    fn measure(input: &InputFrame, ctx: &TickContext<'_>) -> Self {
        let left = ctx.rig.inverse_transform_point(input.left.position);
        let right = ctx.rig.inverse_transform_point(input.right.position);
        let hand_to_hand = right - left;
        Self {
            distance: hand_to_hand.length(),
            midpoint: left + hand_to_hand * 0.5,
            direction: math::flatten(hand_to_hand),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct ScaleGesture {
    session: Option<ScaleSession>,
}

impl ScaleGesture {
    pub fn session(&self) -> Option<&ScaleSession> {
        self.session.as_ref()
    }

    /// Returns true when the gesture owns the rig this tick.
    pub fn evaluate(&mut self, input: &InputFrame, ctx: &mut TickContext<'_>) -> bool {
        if !input.both_grips_held() || !*ctx.allow_scaling {
            self.teardown(ctx);
            if !*ctx.allow_scaling && !input.any_grip_held() {
                *ctx.allow_scaling = true;
                ctx.record(LocomotionEvent::ScalingRearmed);
            }
            return false;
        }

        let span = HandSpan::measure(input, ctx);
        let session = match self.session {
            Some(session) => session,
            None => {
                let session = self.begin(&span, ctx);
                ctx.record(LocomotionEvent::ScaleStarted {
                    start_scale: session.start_scale,
                    start_yaw_degrees: session.start_yaw_degrees,
                });
                session
            }
        };
        let current_scale = session.scale_for(span.distance, ctx);

        if input.both_primaries_held() {
            self.reset(&session, input, ctx);
            return true;
        }

        let yaw = session.start_yaw_degrees
            + math::signed_yaw_delta(session.start_direction, span.direction);
        let rotation = math::yaw_rotation(yaw);
        let midpoint = rotation * span.midpoint * current_scale;

        ctx.rig.position = session.start_position + session.start_midpoint - midpoint;
        ctx.rig.rotation = rotation;
        ctx.rig.scale = current_scale;
        true
    }

    fn begin(&mut self, span: &HandSpan, ctx: &TickContext<'_>) -> ScaleSession {
        let pivot_yaw = math::constrain_yaw(ctx.rig.rotation);
        let session = ScaleSession {
            start_scale: ctx.rig.scale,
            start_distance: span.distance,
            start_midpoint: pivot_yaw * span.midpoint * ctx.rig.scale,
            start_position: ctx.rig.position,
            start_direction: span.direction,
            start_yaw_degrees: ctx.rig.yaw_degrees(),
        };
        self.session = Some(session);
        session
    }

    /// Both primary buttons: back to scale 1 at the session's starting yaw,
    /// keeping the world midpoint of the hands where it is. Suspends scaling
    /// until both grips are released.
    fn reset(&mut self, session: &ScaleSession, input: &InputFrame, ctx: &mut TickContext<'_>) {
        *ctx.allow_scaling = false;

        let reset_scale = ctx.config.clamp_scale(1.0);
        let reset_rotation = math::yaw_rotation(session.start_yaw_degrees);
        let midpoint = (input.left.position + input.right.position) * 0.5;
        let local = ctx.rig.inverse_transform_point(midpoint);
        ctx.rig.position = midpoint - reset_rotation * local * reset_scale;
        ctx.rig.rotation = reset_rotation;
        ctx.rig.scale = reset_scale;

        ctx.record(LocomotionEvent::ScaleReset);
        self.teardown(ctx);
    }

    fn teardown(&mut self, ctx: &mut TickContext<'_>) {
        if self.session.take().is_some() {
            ctx.record(LocomotionEvent::ScaleEnded {
                final_scale: ctx.rig.scale,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::LocomotionConfig;
    use crate::controller::LocomotionController;
    use crate::controller::testing::*;
    use crate::event::LocomotionEvent;
    use glam::{Quat, Vec3};
    use rigspace_common::{RigTransform, math};
    use rigspace_input::TrackedFrame;

    const EPS: f32 = 1e-4;

    fn l(x: f32, z: f32) -> Vec3 {
        Vec3::new(x, 1.2, z)
    }

    fn driver_at(rig: RigTransform) -> Driver {
        Driver::new(LocomotionController::with_rig(LocomotionConfig::default(), rig))
    }

    fn started(d: &Driver) -> usize {
        d.controller
            .events()
            .iter()
            .filter(|r| matches!(r.event, LocomotionEvent::ScaleStarted { .. }))
            .count()
    }

    #[test]
    fn unchanged_distance_recenters_on_the_midpoint() {
        let mut d = driver_at(RigTransform::default());
        d.step(both_gripping(Vec3::new(-0.2, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0)));
        assert!(d.controller.is_scaling());
        assert_eq!(*d.controller.rig(), RigTransform::default());

        d.step(both_gripping(Vec3::new(-0.1, 0.0, 0.0), Vec3::new(0.3, 0.0, 0.0)));
        let rig = d.controller.rig();
        assert!((rig.scale - 1.0).abs() < EPS);
        assert!(rig.yaw_degrees().abs() < EPS || (rig.yaw_degrees() - 360.0).abs() < EPS);
        assert!(rig.position.abs_diff_eq(Vec3::new(-0.1, 0.0, 0.0), EPS));
    }

    #[test]
    fn doubling_distance_halves_scale() {
        let mut d = driver_at(RigTransform {
            scale: 4.0,
            ..RigTransform::default()
        });
        d.step(both_gripping(l(-0.2, 0.0), l(0.2, 0.0)));
        d.step(both_gripping(l(-0.4, 0.0), l(0.4, 0.0)));
        assert!((d.controller.viewer_scale() - 2.0).abs() < EPS);

        // Already at 2; spreading further bottoms out at the minimum.
        d.step(both_gripping(l(-2.0, 0.0), l(2.0, 0.0)));
        assert!((d.controller.viewer_scale() - 1.0).abs() < EPS);
    }

    #[test]
    fn halving_distance_doubles_scale() {
        let mut d = driver_at(RigTransform::default());
        d.step(both_gripping(l(-0.4, 0.0), l(0.4, 0.0)));
        d.step(both_gripping(l(-0.2, 0.0), l(0.2, 0.0)));
        assert!((d.controller.viewer_scale() - 2.0).abs() < EPS);
    }

    #[test]
    fn scale_stays_in_range_for_extreme_distances() {
        let mut d = driver_at(RigTransform::default());
        d.step(both_gripping(l(-0.2, 0.0), l(0.2, 0.0)));
        for half in [0.0, 1e-9, 1e-4, 0.05, 0.2, 3.0, 1e3, 1e9, 0.0, 0.1] {
            d.step(both_gripping(l(-half, 0.0), l(half, 0.0)));
            let s = d.controller.viewer_scale();
            assert!((1.0..=100.0).contains(&s), "half={half} scale={s}");
        }
    }

    #[test]
    fn coincident_hands_from_the_start_keep_scale() {
        let mut d = driver_at(RigTransform {
            scale: 3.0,
            ..RigTransform::default()
        });
        d.step(both_gripping(l(0.0, 0.0), l(0.0, 0.0)));
        d.step(both_gripping(l(0.0, 0.0), l(0.0, 0.0)));
        assert!((d.controller.viewer_scale() - 3.0).abs() < EPS);
        assert!(d.controller.rig().position.is_finite());
    }

    #[test]
    fn midpoint_stays_fixed_while_scaling() {
        let mut d = driver_at(RigTransform {
            position: Vec3::new(2.0, 0.0, -3.0),
            rotation: math::yaw_rotation(40.0),
            scale: 5.0,
        });
        let start = both_gripping(l(-0.3, -0.2), l(0.3, -0.2));
        d.step(start);
        let (a, b) = d.world(&start);
        let world_mid = (a + b) * 0.5;

        let pinched = both_gripping(l(-0.1, -0.2), l(0.1, -0.2));
        d.step(pinched);
        assert!((d.controller.viewer_scale() - 15.0).abs() < 1e-3);
        let (a, b) = d.world(&pinched);
        assert!(((a + b) * 0.5).abs_diff_eq(world_mid, 1e-3));
    }

    #[test]
    fn yaw_follows_hands_and_keeps_them_in_place() {
        let mut d = driver_at(RigTransform::default());
        let start = both_gripping(Vec3::new(-0.2, 0.0, 0.0), Vec3::new(0.2, 0.0, 0.0));
        d.step(start);
        let (start_left, start_right) = d.world(&start);

        // Hands sweep a quarter turn counter-clockwise seen from above.
        let turn = math::yaw_rotation(90.0);
        let turned = both_gripping(turn * start.left.position, turn * start.right.position);
        d.step(turned);

        let rig = d.controller.rig();
        assert!((rig.yaw_degrees() - 270.0).abs() < 1e-2);
        // The world turned with the hands: they are back over the same points.
        let (left, right) = d.world(&turned);
        assert!(left.abs_diff_eq(start_left, 1e-4));
        assert!(right.abs_diff_eq(start_right, 1e-4));
    }

    #[test]
    fn rotation_is_always_yaw_only() {
        let mut d = driver_at(RigTransform::default());
        d.step(both_gripping(Vec3::new(-0.2, 0.9, 0.1), Vec3::new(0.2, 1.4, -0.1)));
        d.step(both_gripping(Vec3::new(-0.1, 0.5, 0.3), Vec3::new(0.25, 1.8, -0.2)));
        let r = d.controller.rig().rotation;
        assert!(r.x.abs() < 1e-6 && r.z.abs() < 1e-6);
        assert!((r * Vec3::Y).abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn releasing_a_grip_ends_the_session_and_regrip_starts_fresh() {
        let mut d = driver_at(RigTransform::default());
        d.step(both_gripping(l(-0.4, 0.0), l(0.4, 0.0)));
        d.step(both_gripping(l(-0.2, 0.0), l(0.2, 0.0)));
        assert!((d.controller.viewer_scale() - 2.0).abs() < EPS);

        // Right grip released.
        d.step(left_gripping(l(-0.1, 0.0)));
        assert!(!d.controller.is_scaling());
        assert!((d.controller.viewer_scale() - 2.0).abs() < EPS);

        // Re-gripping captures the current scale and distance anew, so the
        // same hand spacing produces no jump.
        d.step(both_gripping(l(-0.2, 0.0), l(0.2, 0.0)));
        let session = *d.controller.scale_session().unwrap();
        assert!((session.start_scale - 2.0).abs() < EPS);
        assert!((session.start_distance - 0.4).abs() < EPS);
        assert!((d.controller.viewer_scale() - 2.0).abs() < EPS);
        assert_eq!(started(&d), 2);
    }

    #[test]
    fn primary_reset_restores_unit_scale_and_start_yaw() {
        let mut d = driver_at(RigTransform {
            position: Vec3::new(1.0, 0.0, 1.0),
            rotation: math::yaw_rotation(30.0),
            scale: 1.0,
        });
        d.step(both_gripping(l(-0.4, 0.0), l(0.4, 0.0)));
        d.step(both_gripping(l(-0.1, 0.0), l(0.1, 0.0)));
        assert!((d.controller.viewer_scale() - 4.0).abs() < 1e-3);

        let mut reset = both_gripping(l(-0.1, 0.0), l(0.1, 0.0));
        reset.left.primary_held = true;
        reset.right.primary_held = true;
        let (a, b) = d.world(&reset);
        let before = (a + b) * 0.5;

        d.step(reset);
        let rig = *d.controller.rig();
        assert_eq!(rig.scale, 1.0);
        assert!((rig.yaw_degrees() - 30.0).abs() < 1e-2);
        assert!(!d.controller.allow_scaling());
        assert!(!d.controller.is_scaling());
        let (a, b) = d.world(&reset);
        assert!(((a + b) * 0.5).abs_diff_eq(before, 1e-4));

        // Still holding both grips: no scaling until they are released.
        d.step(both_gripping(l(-0.05, 0.0), l(0.05, 0.0)));
        assert_eq!(d.controller.viewer_scale(), 1.0);
        assert!(!d.controller.is_scaling());

        // One grip released is not enough to re-arm.
        d.step(left_gripping(l(-0.05, 0.0)));
        assert!(!d.controller.allow_scaling());

        d.step(TrackedFrame::default());
        assert!(d.controller.allow_scaling());
        assert!(
            d.controller
                .events()
                .iter()
                .any(|r| r.event == LocomotionEvent::ScalingRearmed)
        );
    }

    #[test]
    fn reset_after_turning_keeps_midpoint_fixed() {
        let mut d = driver_at(RigTransform::default());
        d.step(both_gripping(l(0.2, -0.4), l(0.6, -0.4)));

        // Halve the spread and turn the pair 60 degrees about its centre.
        let centre = l(0.4, -0.4);
        let turn = math::yaw_rotation(60.0);
        let mut reset = both_gripping(
            centre + turn * Vec3::new(-0.1, 0.0, 0.0),
            centre + turn * Vec3::new(0.1, 0.0, 0.0),
        );
        d.step(reset);
        assert!((d.controller.viewer_scale() - 2.0).abs() < 1e-3);
        assert!((d.controller.rig().yaw_degrees() - 300.0).abs() < 1e-2);

        reset.left.primary_held = true;
        reset.right.primary_held = true;
        let (a, b) = d.world(&reset);
        let before = (a + b) * 0.5;

        d.step(reset);
        let rig = *d.controller.rig();
        assert_eq!(rig.scale, 1.0);
        assert!(rig.yaw_degrees() < 1e-2 || rig.yaw_degrees() > 360.0 - 1e-2);
        let (a, b) = d.world(&reset);
        let after = (a + b) * 0.5;
        assert!(
            after.abs_diff_eq(before, 1e-4),
            "midpoint moved {}",
            after.distance(before)
        );
    }

    #[test]
    fn reset_is_one_shot() {
        let mut d = driver_at(RigTransform::default());
        let mut reset = both_gripping(l(-0.2, 0.0), l(0.2, 0.0));
        reset.left.primary_held = true;
        reset.right.primary_held = true;
        d.step(reset);
        d.step(reset);
        d.step(reset);
        let resets = d
            .controller
            .events()
            .iter()
            .filter(|r| r.event == LocomotionEvent::ScaleReset)
            .count();
        assert_eq!(resets, 1);
        assert_eq!(d.controller.rig().rotation, Quat::IDENTITY);
    }
}
