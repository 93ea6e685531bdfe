use rigspace_common::Hand;
use rigspace_locomotion::{CrawlState, LocomotionController};
use serde::Serialize;

/// Rig and gesture inspector for developer tooling.
///
/// Provides read-only queries against a controller for debugging, replay
/// output, and development UI.
pub struct RigInspector;

impl RigInspector {
    /// Produce a summary of the rig and which gestures are live.
    pub fn summary(controller: &LocomotionController) -> RigSummary {
        let rig = controller.rig();
        let p = rig.position;
        let crawl_anchor = match controller.crawl_state() {
            CrawlState::Idle => None,
            CrawlState::Dragging { anchor, .. } => Some(*anchor),
        };
        RigSummary {
            frame: controller.frame(),
            position: [p.x, p.y, p.z],
            yaw_degrees: rig.yaw_degrees(),
            scale: rig.scale,
            allow_scaling: controller.allow_scaling(),
            scaling: controller.is_scaling(),
            crawl_anchor,
            pending_events: controller.events().len(),
        }
    }

    /// Details of the active scale session, if any.
    pub fn inspect_session(controller: &LocomotionController) -> Option<SessionInfo> {
        controller.scale_session().map(|s| SessionInfo {
            start_scale: s.start_scale,
            start_distance: s.start_distance,
            start_yaw_degrees: s.start_yaw_degrees,
            current_scale: controller.viewer_scale(),
            current_yaw_degrees: controller.rig().yaw_degrees(),
        })
    }
}

/// Summary of rig state for the inspector.
#[derive(Debug, Clone, Serialize)]
pub struct RigSummary {
    pub frame: u64,
    pub position: [f32; 3],
    pub yaw_degrees: f32,
    pub scale: f32,
    pub allow_scaling: bool,
    pub scaling: bool,
    pub crawl_anchor: Option<Hand>,
    pub pending_events: usize,
}

impl std::fmt::Display for RigSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let crawl = self.crawl_anchor.map_or("-", Hand::as_str);
        write!(
            f,
            "Rig: frame={} pos=({:.3}, {:.3}, {:.3}) yaw={:.1} scale={:.3} scaling={} crawl={}",
            self.frame,
            self.position[0],
            self.position[1],
            self.position[2],
            self.yaw_degrees,
            self.scale,
            self.scaling,
            crawl,
        )?;
        if !self.allow_scaling {
            write!(f, " (scaling suspended)")?;
        }
        Ok(())
    }
}

/// Snapshot of an active two-hand session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub start_scale: f32,
    pub start_distance: f32,
    pub start_yaw_degrees: f32,
    pub current_scale: f32,
    pub current_yaw_degrees: f32,
}

impl std::fmt::Display for SessionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Session: scale {:.3} -> {:.3}, yaw {:.1} -> {:.1}, start distance {:.3}",
            self.start_scale,
            self.current_scale,
            self.start_yaw_degrees,
            self.current_yaw_degrees,
            self.start_distance,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rigspace_input::{HandSample, InputFrame};

    fn gripping_both() -> InputFrame {
        InputFrame {
            left: HandSample::at(Vec3::new(-0.2, 1.0, 0.0)).gripping(),
            right: HandSample::at(Vec3::new(0.2, 1.0, 0.0)).gripping(),
            ..InputFrame::default()
        }
        .with_grip_edges(None)
    }

    #[test]
    fn summary_fresh_controller() {
        let c = LocomotionController::default();
        let summary = RigInspector::summary(&c);
        assert_eq!(summary.frame, 0);
        assert_eq!(summary.position, [0.0, 0.0, 0.0]);
        assert_eq!(summary.scale, 1.0);
        assert!(summary.allow_scaling);
        assert!(!summary.scaling);
        assert!(summary.crawl_anchor.is_none());
    }

    #[test]
    fn summary_during_two_hand_hold() {
        let mut c = LocomotionController::default();
        c.tick(&gripping_both(), 0.01);

        let summary = RigInspector::summary(&c);
        assert_eq!(summary.frame, 1);
        assert!(summary.scaling);
        assert_eq!(summary.crawl_anchor, Some(Hand::Right));
        // scale started + crawl started
        assert_eq!(summary.pending_events, 2);
    }

    #[test]
    fn session_only_while_scaling() {
        let mut c = LocomotionController::default();
        assert!(RigInspector::inspect_session(&c).is_none());

        c.tick(&gripping_both(), 0.01);
        let info = RigInspector::inspect_session(&c).unwrap();
        assert!((info.start_distance - 0.4).abs() < 1e-5);
        assert_eq!(info.start_scale, 1.0);
        assert!(format!("{info}").contains("start distance 0.400"));
    }

    #[test]
    fn summary_display() {
        let c = LocomotionController::default();
        let s = format!("{}", RigInspector::summary(&c));
        assert!(s.contains("frame=0"));
        assert!(s.contains("crawl=-"));
        assert!(!s.contains("suspended"));
    }
}
