use rigspace_common::Hand;

/// A gesture state transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocomotionEvent {
    /// A grip edge made `hand` the crawl anchor.
    CrawlStarted { hand: Hand },
    /// No grip is held any more.
    CrawlEnded,
    /// Both grips held; a scale session captured its start state.
    ScaleStarted {
        start_scale: f32,
        start_yaw_degrees: f32,
    },
    /// The scale session was torn down.
    ScaleEnded { final_scale: f32 },
    /// Both primary buttons reset scale to 1 and yaw to the session start.
    ScaleReset,
    /// Both index triggers snapped the rig to the origin.
    OriginReset,
    /// Scaling was suspended by a reset and both grips are now released.
    ScalingRearmed,
    /// The host recentered the rig.
    Recentered,
}

impl std::fmt::Display for LocomotionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CrawlStarted { hand } => write!(f, "crawl started ({} hand)", hand.as_str()),
            Self::CrawlEnded => write!(f, "crawl ended"),
            Self::ScaleStarted {
                start_scale,
                start_yaw_degrees,
            } => write!(
                f,
                "scale started (scale={start_scale:.2}, yaw={start_yaw_degrees:.1})"
            ),
            Self::ScaleEnded { final_scale } => {
                write!(f, "scale ended (scale={final_scale:.2})")
            }
            Self::ScaleReset => write!(f, "scale reset"),
            Self::OriginReset => write!(f, "origin reset"),
            Self::ScalingRearmed => write!(f, "scaling re-armed"),
            Self::Recentered => write!(f, "recentered"),
        }
    }
}

/// A logged event and the controller frame it happened on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRecord {
    pub frame: u64,
    pub event: LocomotionEvent,
}

impl std::fmt::Display for EventRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:>6}] {}", self.frame, self.event)
    }
}
