//! Thumbstick flight along the head's look direction.

use rigspace_input::InputFrame;

use crate::controller::TickContext;

/// Move the rig along the head's forward direction.
///
/// Speed is the left stick's vertical axis times the fast or slow speed
/// (left index trigger held or not), scaled by the viewer scale so flight
/// feels the same at every zoom level. Runs every tick regardless of grips.
pub(crate) fn evaluate(input: &InputFrame, ctx: &mut TickContext<'_>, dt: f32) {
    if !dt.is_finite() || dt <= 0.0 {
        return;
    }
    let axis = input.left.thumbstick.y;
    if !axis.is_finite() || axis == 0.0 {
        return;
    }

    let base = if input.left.trigger_held {
        ctx.config.fast_move_speed
    } else {
        ctx.config.slow_move_speed
    };
    let speed = base * axis.clamp(-1.0, 1.0) * ctx.rig.scale;

    let forward = input.head.forward.normalize_or_zero();
    let local = ctx.rig.rotation.inverse() * forward * (speed * dt);
    ctx.rig.translate_local(local);
}
