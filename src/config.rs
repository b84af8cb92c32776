//! Session configuration: gesture thresholds, animation timings and layout.
//!
//! Every constant the swipe machinery depends on lives here so a host can
//! tune it from a TOML document. Missing keys fall back to the defaults.
//!
//! ```rust
//! use swipedeck::SwipeConfig;
//!
//! let config = SwipeConfig::from_toml_str("commit_threshold = 90.0").unwrap();
//! assert_eq!(config.commit_threshold, 90.0);
//! assert_eq!(config.deck_size, 16);
//! ```

use crate::error::{Result, SwipeError};
use serde::Deserialize;
use std::time::Duration;

/// Configuration for a swipe session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Horizontal distance a drag must strictly exceed to commit.
    pub commit_threshold: f32,
    /// Fraction of raw vertical displacement applied to the card.
    pub vertical_damping: f32,
    /// Horizontal displacement per degree of rotation.
    pub rotation_divisor: f32,
    /// Symmetric rotation clamp while dragging, in degrees.
    pub max_rotation_deg: f32,
    /// Displacement at which an affordance badge reaches full opacity.
    pub affordance_distance: f32,
    /// Duration of the snap-back transition.
    pub snap_back_ms: u64,
    /// Duration of the exit transition; completion fires when it elapses.
    pub commit_duration_ms: u64,
    /// Upward offset applied to an exiting card.
    pub exit_lift: f32,
    /// Rotation applied to an exiting card, in degrees.
    pub exit_rotation_deg: f32,
    /// Number of cards generated per session.
    pub deck_size: usize,
    /// Liked items shown before the gallery needs a "show all" toggle.
    pub gallery_preview_limit: usize,
    /// Display columns available for an alt-text fallback caption.
    pub caption_columns: usize,
    /// Width of the viewport an exiting card must clear.
    pub viewport_width: f32,
    /// Interval between animation ticks.
    pub tick_interval_ms: u64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            commit_threshold: 120.0,
            vertical_damping: 0.2,
            rotation_divisor: 12.0,
            max_rotation_deg: 12.0,
            affordance_distance: 120.0,
            snap_back_ms: 160,
            commit_duration_ms: 200,
            exit_lift: 40.0,
            exit_rotation_deg: 20.0,
            deck_size: 16,
            gallery_preview_limit: 6,
            caption_columns: 48,
            viewport_width: 800.0,
            tick_interval_ms: 16,
        }
    }
}

impl SwipeConfig {
    /// Parse a configuration from TOML and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("commit_threshold", self.commit_threshold),
            ("rotation_divisor", self.rotation_divisor),
            ("affordance_distance", self.affordance_distance),
            ("viewport_width", self.viewport_width),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SwipeError::invalid(field, "must be a positive number"));
            }
        }
        if !(0.0..=1.0).contains(&self.vertical_damping) {
            return Err(SwipeError::invalid("vertical_damping", "must be within 0..=1"));
        }
        if !(self.max_rotation_deg.is_finite() && self.max_rotation_deg >= 0.0) {
            return Err(SwipeError::invalid("max_rotation_deg", "must not be negative"));
        }
        if self.deck_size == 0 {
            return Err(SwipeError::invalid("deck_size", "must be at least 1"));
        }
        if self.commit_duration_ms == 0 {
            return Err(SwipeError::invalid("commit_duration_ms", "must be at least 1"));
        }
        if self.snap_back_ms == 0 {
            return Err(SwipeError::invalid("snap_back_ms", "must be at least 1"));
        }
        if self.tick_interval_ms == 0 {
            return Err(SwipeError::invalid("tick_interval_ms", "must be at least 1"));
        }
        Ok(())
    }

    /// Snap-back transition length.
    #[inline]
    pub const fn snap_back(&self) -> Duration {
        Duration::from_millis(self.snap_back_ms)
    }

    /// Exit transition length.
    #[inline]
    pub const fn commit_duration(&self) -> Duration {
        Duration::from_millis(self.commit_duration_ms)
    }

    /// Ticker interval.
    #[inline]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SwipeConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.commit_duration(), Duration::from_millis(200));
        assert_eq!(config.snap_back(), Duration::from_millis(160));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SwipeConfig::from_toml_str("deck_size = 4\nsnap_back_ms = 100").unwrap();
        assert_eq!(config.deck_size, 4);
        assert_eq!(config.snap_back_ms, 100);
        assert!((config.commit_threshold - 120.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_zero_deck() {
        let err = SwipeConfig::from_toml_str("deck_size = 0").unwrap_err();
        assert!(matches!(
            err,
            SwipeError::InvalidConfig { field: "deck_size", .. }
        ));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let config = SwipeConfig {
            commit_threshold: -1.0,
            ..SwipeConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_toml() {
        let err = SwipeConfig::from_toml_str("deck_size = \"many\"").unwrap_err();
        assert!(matches!(err, SwipeError::ConfigParse(_)));
    }
}
