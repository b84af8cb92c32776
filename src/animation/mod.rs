//! Time-boxed card animations.
//!
//! Animations here do not own a clock: callers pass `Instant`s in, normally
//! from the runtime's ticker, and poll for completion. Completion signals
//! are one-shot.

mod commit;
mod snap;

pub use commit::{CommitAnimator, ExitAnimation, ExitStyle};
pub use snap::SnapBack;
