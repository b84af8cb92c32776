//! Pointer gesture tracking.
//!
//! Converts pointer down/move/up on the top card into a continuous
//! [`CardTransform`] and, on release, either a snap-back or a [`Decision`].

mod geometry;
mod tracker;

pub use geometry::{CardTransform, Decision, Point};
pub use tracker::{GestureOutcome, GesturePhase, GestureTracker, GestureTuning};
