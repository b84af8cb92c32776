//! Commit Animator: fixed-duration exit animation with a one-shot completion.

use crate::gesture::{CardTransform, Decision};
use log::debug;
use std::time::{Duration, Instant};

/// Descriptor of an exit animation handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitAnimation {
    /// Direction the card leaves in.
    pub direction: Decision,
    /// Transition length in milliseconds.
    pub duration_ms: u64,
    /// Final transform, fully off the viewport.
    pub transform: CardTransform,
}

/// Parameters of the exit transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitStyle {
    /// Transition length.
    pub duration: Duration,
    /// Upward offset of the exiting card.
    pub lift: f32,
    /// Rotation magnitude of the exiting card, in degrees.
    pub rotation_deg: f32,
}

impl Default for ExitStyle {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(200),
            lift: 40.0,
            rotation_deg: 20.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CommitState {
    Ready,
    Running { decision: Decision, deadline: Instant },
    Finished(Decision),
}

/// Plays the exit animation once and signals completion once.
///
/// Once started the animation cannot be restarted or interrupted; a second
/// [`start`](Self::start) is a no-op.
#[derive(Debug, Clone)]
pub struct CommitAnimator {
    style: ExitStyle,
    state: CommitState,
}

impl CommitAnimator {
    /// Create an animator that has not started.
    pub const fn new(style: ExitStyle) -> Self {
        Self {
            style,
            state: CommitState::Ready,
        }
    }

    /// Start the exit animation.
    ///
    /// Returns `None` if an animation was already started for this card.
    pub fn start(&mut self, decision: Decision, viewport_width: f32, now: Instant) -> Option<ExitAnimation> {
        if self.state != CommitState::Ready {
            debug!("exit animation already started, ignoring {}", decision.as_str());
            return None;
        }
        self.state = CommitState::Running {
            decision,
            deadline: now + self.style.duration,
        };

        let sign = decision.sign();
        Some(ExitAnimation {
            direction: decision,
            duration_ms: u64::try_from(self.style.duration.as_millis()).unwrap_or(u64::MAX),
            transform: CardTransform {
                translate_x: sign * viewport_width,
                translate_y: -self.style.lift,
                rotation_deg: sign * self.style.rotation_deg,
                like_opacity: if decision == Decision::Like { 1.0 } else { 0.0 },
                dislike_opacity: if decision == Decision::Dislike { 1.0 } else { 0.0 },
            },
        })
    }

    /// Raise the completion signal if the duration has elapsed.
    ///
    /// Yields the decision exactly once over the animator's lifetime.
    pub fn poll(&mut self, now: Instant) -> Option<Decision> {
        match self.state {
            CommitState::Running { decision, deadline } if now >= deadline => {
                self.state = CommitState::Finished(decision);
                Some(decision)
            }
            _ => None,
        }
    }

    /// Whether the animation is running.
    pub const fn is_running(&self) -> bool {
        matches!(self.state, CommitState::Running { .. })
    }

    /// Whether completion has been signalled.
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, CommitState::Finished(_))
    }
}

impl Default for CommitAnimator {
    fn default() -> Self {
        Self::new(ExitStyle::default())
    }
}
