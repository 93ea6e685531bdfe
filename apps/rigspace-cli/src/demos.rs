//! Built-in input scripts for the `demo` command.

use clap::ValueEnum;
use glam::{Vec2, Vec3};
use rigspace_common::math;
use rigspace_input::{HandSample, InputScript, ScriptError, ScriptStep, TrackedFrame};

const DT: f32 = 1.0 / 90.0;

/// Resting hand positions in tracked space.
const LEFT_REST: Vec3 = Vec3::new(-0.25, 1.1, -0.35);
const RIGHT_REST: Vec3 = Vec3::new(0.25, 1.1, -0.35);

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Grab with the left hand and pull the world towards you.
    Crawl,
    /// Pinch both hands together while twisting.
    Scale,
    /// Push the left stick forward, then hold the trigger for fast flight.
    Fly,
    /// Scale up, reset scale with both primary buttons, then snap to origin.
    Reset,
}

impl Scenario {
    pub fn script(self) -> Result<InputScript, ScriptError> {
        let steps = match self {
            Self::Crawl => crawl(),
            Self::Scale => scale(),
            Self::Fly => fly(),
            Self::Reset => reset(),
        };
        InputScript::new(DT, steps)
    }
}

fn idle(repeat: u32) -> ScriptStep {
    ScriptStep {
        frame: TrackedFrame {
            left: HandSample::at(LEFT_REST),
            right: HandSample::at(RIGHT_REST),
            ..TrackedFrame::default()
        },
        repeat,
    }
}

fn pinch(half_width: f32, yaw_degrees: f32) -> TrackedFrame {
    let turn = math::yaw_rotation(yaw_degrees);
    let center = (LEFT_REST + RIGHT_REST) * 0.5;
    TrackedFrame {
        left: HandSample::at(center + turn * Vec3::new(-half_width, 0.0, 0.0)).gripping(),
        right: HandSample::at(center + turn * Vec3::new(half_width, 0.0, 0.0)).gripping(),
        ..TrackedFrame::default()
    }
}

fn crawl() -> Vec<ScriptStep> {
    let mut steps = vec![idle(5)];
    for i in 0..=30 {
        let pull = i as f32 / 30.0 * 0.5;
        steps.push(
            TrackedFrame {
                left: HandSample::at(LEFT_REST + Vec3::new(0.0, 0.0, pull)).gripping(),
                right: HandSample::at(RIGHT_REST),
                ..TrackedFrame::default()
            }
            .into(),
        );
    }
    steps.push(idle(5));
    steps
}

fn scale() -> Vec<ScriptStep> {
    let mut steps = vec![idle(5)];
    for i in 0..=45 {
        let t = i as f32 / 45.0;
        steps.push(pinch(0.3 - 0.22 * t, 45.0 * t).into());
    }
    steps.push(idle(5));
    steps
}

fn fly() -> Vec<ScriptStep> {
    let mut cruise = idle(45);
    cruise.frame.left.thumbstick = Vec2::new(0.0, 1.0);
    let mut boost = cruise.clone();
    boost.frame.left.trigger_held = true;
    vec![idle(5), cruise, boost, idle(5)]
}

fn reset() -> Vec<ScriptStep> {
    let mut steps = vec![idle(5)];
    for i in 0..=20 {
        let t = i as f32 / 20.0;
        steps.push(pinch(0.3 - 0.2 * t, 0.0).into());
    }
    let mut primaries = pinch(0.1, 0.0);
    primaries.left.primary_held = true;
    primaries.right.primary_held = true;
    steps.push(ScriptStep {
        frame: primaries,
        repeat: 10,
    });
    steps.push(idle(5));

    let mut origin = idle(10).frame;
    origin.left.grip_held = true;
    origin.left.trigger_held = true;
    origin.right.trigger_held = true;
    steps.push(ScriptStep {
        frame: origin,
        repeat: 10,
    });
    steps.push(idle(5));
    steps
}
