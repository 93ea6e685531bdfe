use rigspace_common::RigTransform;
use rigspace_input::{InputFrame, InputSource};

use crate::config::LocomotionConfig;
use crate::crawl::{CrawlGesture, CrawlState};
use crate::event::{EventRecord, LocomotionEvent};
use crate::flight;
use crate::scale::{ScaleGesture, ScaleSession};

/// Mutable view of the controller shared by the gesture evaluators for one
/// tick.
pub(crate) struct TickContext<'a> {
    /// Rig as it stood when the input frame was sampled.
    pub sampled: RigTransform,
    pub rig: &'a mut RigTransform,
    pub allow_scaling: &'a mut bool,
    pub config: &'a LocomotionConfig,
    events: &'a mut Vec<EventRecord>,
    frame: u64,
}

impl TickContext<'_> {
    pub fn record(&mut self, event: LocomotionEvent) {
        record_event(self.events, self.frame, event);
    }
}

fn record_event(log: &mut Vec<EventRecord>, frame: u64, event: LocomotionEvent) {
    tracing::debug!(frame, %event, "gesture transition");
    log.push(EventRecord { frame, event });
}

/// Owns the rig transform and the gesture state machine that drives it.
///
/// Renderers read `rig()` between ticks; nothing outside `tick` writes it
/// except the explicit host operations (`set_viewer_scale`, `recenter`).
#[derive(Debug, Clone)]
pub struct LocomotionController {
    config: LocomotionConfig,
    rig: RigTransform,
    /// Cleared by either reset gesture; re-armed once both grips release.
    allow_scaling: bool,
    scale: ScaleGesture,
    crawl: CrawlGesture,
    frame: u64,
    /// Append-only log of gesture transitions.
    event_log: Vec<EventRecord>,
}

impl Default for LocomotionController {
    fn default() -> Self {
        Self::new(LocomotionConfig::default())
    }
}

impl LocomotionController {
    /// Controller with the rig at the origin, identity rotation, scale 1.
    pub fn new(config: LocomotionConfig) -> Self {
        Self::with_rig(config, RigTransform::default())
    }

    /// Controller starting from an existing rig pose. Scale is clamped.
    pub fn with_rig(config: LocomotionConfig, mut rig: RigTransform) -> Self {
        rig.scale = config.clamp_scale(rig.scale);
        Self {
            config,
            rig,
            allow_scaling: true,
            scale: ScaleGesture::default(),
            crawl: CrawlGesture::default(),
            frame: 0,
            event_log: Vec::new(),
        }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn rig(&self) -> &RigTransform {
        &self.rig
    }

    /// Number of ticks evaluated so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn allow_scaling(&self) -> bool {
        self.allow_scaling
    }

    pub fn is_scaling(&self) -> bool {
        self.scale.session().is_some()
    }

    pub fn scale_session(&self) -> Option<&ScaleSession> {
        self.scale.session()
    }

    pub fn crawl_state(&self) -> &CrawlState {
        self.crawl.state()
    }

    /// Current uniform viewer scale.
    pub fn viewer_scale(&self) -> f32 {
        self.rig.scale
    }

    /// Set the uniform viewer scale, clamped to the configured range.
    pub fn set_viewer_scale(&mut self, scale: f32) {
        self.rig.scale = self.config.clamp_scale(scale);
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[EventRecord] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<EventRecord> {
        std::mem::take(&mut self.event_log)
    }

    /// Snap the rig back to the origin at scale 1 and drop any gesture in
    /// progress. Safe to call repeatedly.
    pub fn recenter(&mut self) {
        self.rig = RigTransform {
            scale: self.config.clamp_scale(1.0),
            ..RigTransform::default()
        };
        self.scale = ScaleGesture::default();
        self.crawl = CrawlGesture::default();
        self.allow_scaling = true;
        record_event(&mut self.event_log, self.frame, LocomotionEvent::Recentered);
    }

    /// Sample `source` against the current rig and evaluate one tick.
    pub fn update<S: InputSource + ?Sized>(&mut self, source: &mut S, dt: f32) -> InputFrame {
        let input = source.sample(&self.rig);
        self.tick(&input, dt);
        input
    }

    /// Evaluate one frame: scale, then flight, then crawl.
    ///
    /// `dt` is the unscaled frame time in seconds.
    pub fn tick(&mut self, input: &InputFrame, dt: f32) {
        self.frame += 1;
        let _span = tracing::info_span!("locomotion_tick", frame = self.frame).entered();

        let mut ctx = TickContext {
            sampled: self.rig,
            rig: &mut self.rig,
            allow_scaling: &mut self.allow_scaling,
            config: &self.config,
            events: &mut self.event_log,
            frame: self.frame,
        };

        let scale_claimed = self.scale.evaluate(input, &mut ctx);
        flight::evaluate(input, &mut ctx, dt);
        self.crawl.evaluate(input, &mut ctx, scale_claimed);

        tracing::trace!(
            position = ?self.rig.position,
            yaw = self.rig.yaw_degrees(),
            scale = self.rig.scale,
            scale_claimed,
            "tick complete"
        );
    }
}
