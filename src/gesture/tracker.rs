//! Gesture Tracker: per-card drag state machine.
//!
//! # States
//!
//! ```text
//!            pointer_down               pointer_up, |dx| <= threshold
//!   ┌──────┐ ───────────▶ ┌──────────┐ ────────────────────────────▶ Idle (snap-back)
//!   │ Idle │              │ Dragging │
//!   └──────┘ ◀─────────── └──────────┘ ────────────────────────────▶ Committing(decision)
//!      │                    │  ▲  │      pointer_up, |dx| > threshold
//!      │ commit()           └──┘  │ commit()
//!      ▼                  pointer_move  ▼
//!   Committing(decision) ◀────────────────
//! ```
//!
//! `Committing` is terminal: pointer events and further commits are no-ops,
//! which is what keeps a card from reaching the ledger twice.

use super::geometry::{CardTransform, Decision, Point};
use crate::config::SwipeConfig;
use log::{debug, trace};

/// Tuning values the tracker reads on every event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureTuning {
    /// Distance `|dx|` must strictly exceed to commit.
    pub threshold: f32,
    /// Fraction of vertical displacement applied.
    pub vertical_damping: f32,
    /// Displacement per degree of rotation.
    pub rotation_divisor: f32,
    /// Rotation clamp in degrees.
    pub max_rotation_deg: f32,
    /// Displacement giving full affordance opacity.
    pub affordance_distance: f32,
}

impl From<&SwipeConfig> for GestureTuning {
    fn from(config: &SwipeConfig) -> Self {
        Self {
            threshold: config.commit_threshold,
            vertical_damping: config.vertical_damping,
            rotation_divisor: config.rotation_divisor,
            max_rotation_deg: config.max_rotation_deg,
            affordance_distance: config.affordance_distance,
        }
    }
}

impl Default for GestureTuning {
    fn default() -> Self {
        Self::from(&SwipeConfig::default())
    }
}

impl GestureTuning {
    /// Visual transform for a raw displacement from the drag origin.
    pub fn transform(&self, dx: f32, raw_dy: f32) -> CardTransform {
        // Not `clamp`: a negative or NaN limit must not panic.
        let limit = self.max_rotation_deg.abs();
        let rotation = (dx / self.rotation_divisor).max(-limit).min(limit);
        let intensity = (dx.abs() / self.affordance_distance).min(1.0);

        CardTransform {
            translate_x: dx,
            translate_y: raw_dy * self.vertical_damping,
            rotation_deg: rotation,
            like_opacity: if dx > 0.0 { intensity } else { 0.0 },
            dislike_opacity: if dx < 0.0 { intensity } else { 0.0 },
        }
    }

    /// Decision for a released drag, `None` means snap back.
    pub fn classify(&self, dx: f32) -> Option<Decision> {
        if dx > self.threshold {
            Some(Decision::Like)
        } else if dx < -self.threshold {
            Some(Decision::Dislike)
        } else {
            None
        }
    }
}

/// Current phase of a card's gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    /// No pointer is down on the card.
    Idle,
    /// A pointer is down and being tracked.
    Dragging {
        /// Where the pointer went down.
        origin: Point,
        /// Latest pointer position.
        current: Point,
    },
    /// A decision was committed; the card accepts no more input.
    Committing(Decision),
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// No drag was in progress, or the card is already committing.
    Ignored,
    /// The drag stayed within the threshold; the card returns to neutral.
    SnapBack,
    /// The drag crossed the threshold and committed.
    Commit(Decision),
}

/// Drag state machine for the top card.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    phase: GesturePhase,
    tuning: GestureTuning,
}

impl GestureTracker {
    /// Create an idle tracker.
    pub const fn new(tuning: GestureTuning) -> Self {
        Self {
            phase: GesturePhase::Idle,
            tuning,
        }
    }

    /// Current phase.
    #[inline]
    pub const fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Whether a decision has been committed.
    #[inline]
    pub const fn is_committing(&self) -> bool {
        matches!(self.phase, GesturePhase::Committing(_))
    }

    /// Horizontal displacement of the drag in progress.
    pub fn displacement(&self) -> Option<f32> {
        match self.phase {
            GesturePhase::Dragging { origin, current } => Some(current.x - origin.x),
            _ => None,
        }
    }

    /// Pointer went down on the card.
    ///
    /// Returns `false` when the card is committing. A second down while
    /// dragging restarts the drag from the new point.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        if self.is_committing() {
            return false;
        }
        debug!("drag start at ({}, {})", point.x, point.y);
        self.phase = GesturePhase::Dragging {
            origin: point,
            current: point,
        };
        true
    }

    /// Pointer moved; yields the new transform while dragging.
    pub fn pointer_move(&mut self, point: Point) -> Option<CardTransform> {
        let GesturePhase::Dragging { origin, .. } = self.phase else {
            return None;
        };
        self.phase = GesturePhase::Dragging {
            origin,
            current: point,
        };
        let transform = self.tuning.transform(point.x - origin.x, point.y - origin.y);
        trace!(
            "drag dx={} rot={} like={} dislike={}",
            transform.translate_x,
            transform.rotation_deg,
            transform.like_opacity,
            transform.dislike_opacity
        );
        Some(transform)
    }

    /// Pointer released; evaluates the threshold exactly once.
    pub fn pointer_up(&mut self) -> GestureOutcome {
        let GesturePhase::Dragging { origin, current } = self.phase else {
            return GestureOutcome::Ignored;
        };
        let dx = current.x - origin.x;
        match self.tuning.classify(dx) {
            Some(decision) => {
                debug!("drag released dx={dx}, committing {}", decision.as_str());
                self.phase = GesturePhase::Committing(decision);
                GestureOutcome::Commit(decision)
            }
            None => {
                debug!("drag released dx={dx}, snapping back");
                self.phase = GesturePhase::Idle;
                GestureOutcome::SnapBack
            }
        }
    }

    /// Commit without a drag (button tap), superseding any drag in progress.
    ///
    /// Returns `false` if the card was already committing.
    pub fn commit(&mut self, decision: Decision) -> bool {
        if let GesturePhase::Committing(existing) = self.phase {
            debug!(
                "ignoring {} commit, already committing {}",
                decision.as_str(),
                existing.as_str()
            );
            return false;
        }
        self.phase = GesturePhase::Committing(decision);
        true
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(GestureTuning::default())
    }
}
