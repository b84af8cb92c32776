//! Per-card controller living in the session arena.
//!
//! Created when a card becomes the top of the stack and dropped when the card
//! is retired or the session is reset, taking its timers with it.

use crate::animation::{CommitAnimator, ExitAnimation, ExitStyle, SnapBack};
use crate::config::SwipeConfig;
use crate::gesture::{Decision, GestureTracker, GestureTuning};
use std::time::Instant;

/// Gesture tracker plus the animations owned by one card.
#[derive(Debug, Clone)]
pub struct CardController {
    tracker: GestureTracker,
    animator: CommitAnimator,
    snap: SnapBack,
}

/// Timer events raised by a controller on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerTick {
    /// The snap-back transition hint expired.
    pub transition_cleared: bool,
    /// The exit animation completed with this decision.
    pub completed: Option<Decision>,
}

impl CardController {
    /// Build a controller from session configuration.
    pub fn new(config: &SwipeConfig) -> Self {
        Self {
            tracker: GestureTracker::new(GestureTuning::from(config)),
            animator: CommitAnimator::new(ExitStyle {
                duration: config.commit_duration(),
                lift: config.exit_lift,
                rotation_deg: config.exit_rotation_deg,
            }),
            snap: SnapBack::new(config.snap_back()),
        }
    }

    /// The card's gesture tracker.
    pub const fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub(crate) fn tracker_mut(&mut self) -> &mut GestureTracker {
        &mut self.tracker
    }

    pub(crate) fn snap_mut(&mut self) -> &mut SnapBack {
        &mut self.snap
    }

    /// Snap-back transition length in milliseconds.
    pub fn snap_back_ms(&self) -> u64 {
        self.snap.duration_ms()
    }

    /// Drop a pending snap-back hint; `true` if one was pending.
    pub(crate) fn clear_transition(&mut self) -> bool {
        self.snap.cancel()
    }

    /// Start the exit animation for a decision the tracker has committed.
    ///
    /// Call [`clear_transition`](Self::clear_transition) first so a pending
    /// snap-back hint is reported before the exit begins.
    pub(crate) fn start_exit(&mut self, decision: Decision, viewport_width: f32, now: Instant) -> Option<ExitAnimation> {
        self.animator.start(decision, viewport_width, now)
    }

    /// Advance timers.
    pub(crate) fn tick(&mut self, now: Instant) -> ControllerTick {
        ControllerTick {
            transition_cleared: self.snap.poll(now),
            completed: self.animator.poll(now),
        }
    }

    /// Whether the exit animation is running.
    pub const fn is_exiting(&self) -> bool {
        self.animator.is_running()
    }
}
