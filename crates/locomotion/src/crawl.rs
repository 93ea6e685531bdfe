//! Crawl: grab the world with one hand and pull.
//!
//! The rig moves by the inverse of the anchor hand's frame-to-frame
//! displacement, so the grabbed point stays under the hand.

use glam::{Quat, Vec3};
use rigspace_common::Hand;
use rigspace_input::InputFrame;

use crate::controller::TickContext;
use crate::event::LocomotionEvent;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CrawlState {
    #[default]
    Idle,
    /// A grip edge picked `anchor`; `last_position` is where that hand was at
    /// the end of the previous tick, in world space.
    Dragging { anchor: Hand, last_position: Vec3 },
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CrawlGesture {
    state: CrawlState,
}

impl CrawlGesture {
    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    /// `scale_claimed` is true when the two-hand gesture already placed the
    /// rig this tick.
    pub fn evaluate(&mut self, input: &InputFrame, ctx: &mut TickContext<'_>, scale_claimed: bool) {
        // Edges apply left then right, so the right hand wins a simultaneous
        // press.
        let pressed = Hand::ALL
            .into_iter()
            .rev()
            .find(|&hand| input.hand(hand).grip_pressed);
        if let Some(hand) = pressed {
            self.state = CrawlState::Dragging {
                anchor: hand,
                last_position: input.hand(hand).position,
            };
            ctx.record(LocomotionEvent::CrawlStarted { hand });
        }

        if !input.any_grip_held() {
            if self.state != CrawlState::Idle {
                self.state = CrawlState::Idle;
                ctx.record(LocomotionEvent::CrawlEnded);
            }
            return;
        }

        // A grip held without an observed edge (e.g. held before the first
        // tick) has no anchor to drag from.
        let CrawlState::Dragging {
            anchor,
            last_position,
        } = self.state
        else {
            return;
        };

        let current = input.hand(anchor).position;
        if !scale_claimed || ctx.config.crawl_during_scale {
            ctx.rig.position += last_position - current;
        }

        if input.both_triggers_held() {
            *ctx.allow_scaling = false;
            ctx.rig.position = Vec3::ZERO;
            ctx.rig.rotation = Quat::IDENTITY;
            ctx.record(LocomotionEvent::OriginReset);
        }

        // The hand rides on the rig: carry its tracked position through the rig
        // as it now stands so the next delta only sees real hand motion.
        let tracked = ctx.sampled.inverse_transform_point(current);
        self.state = CrawlState::Dragging {
            anchor,
            last_position: ctx.rig.transform_point(tracked),
        };
    }
}
