//! Snap-back transition hint.
//!
//! After a drag is cancelled the card animates back to neutral. The
//! presentation layer keeps a transition active for a short time, then the
//! hint is cleared so the next drag follows the pointer without easing.

use std::time::{Duration, Instant};

/// Tracks when a snap-back transition hint should be cleared.
#[derive(Debug, Clone)]
pub struct SnapBack {
    duration: Duration,
    clear_at: Option<Instant>,
}

impl SnapBack {
    /// Create an inactive snap-back timer.
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            clear_at: None,
        }
    }

    /// Transition length in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }

    /// Begin (or restart) the transition.
    pub fn start(&mut self, now: Instant) {
        self.clear_at = Some(now + self.duration);
    }

    /// Drop a pending hint early, e.g. when a new drag starts.
    ///
    /// Returns `true` if a hint was pending; the caller must then tell the
    /// presentation layer the transition is cleared.
    pub fn cancel(&mut self) -> bool {
        self.clear_at.take().is_some()
    }

    /// Whether a transition is pending.
    pub const fn is_active(&self) -> bool {
        self.clear_at.is_some()
    }

    /// Returns `true` exactly once when the transition should be cleared.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.clear_at {
            Some(deadline) if now >= deadline => {
                self.clear_at = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clears_once() {
        let start = Instant::now();
        let mut snap = SnapBack::new(Duration::from_millis(160));
        assert!(!snap.poll(start));

        snap.start(start);
        assert!(snap.is_active());
        assert!(!snap.poll(start + Duration::from_millis(100)));
        assert!(snap.poll(start + Duration::from_millis(160)));
        assert!(!snap.poll(start + Duration::from_millis(500)));
        assert_eq!(snap.duration_ms(), 160);
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut snap = SnapBack::new(Duration::from_millis(160));
        assert!(!snap.cancel());
        snap.start(start);
        assert!(snap.cancel());
        assert!(!snap.cancel());
        assert!(!snap.poll(start + Duration::from_secs(1)));
    }
}
