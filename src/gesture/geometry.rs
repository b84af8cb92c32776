//! Geometry shared by the gesture tracker and the animators.

/// A pointer position in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The binary classification a commit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Swiped right / like button.
    Like,
    /// Swiped left / dislike button.
    Dislike,
}

impl Decision {
    /// `+1.0` for like, `-1.0` for dislike.
    #[inline]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Like => 1.0,
            Self::Dislike => -1.0,
        }
    }

    /// Lowercase label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

/// Visual transform of a card plus its affordance badge opacities.
///
/// Emitted on every pointer move so the presentation layer can bind the
/// values directly instead of looking up badge elements itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Horizontal translation.
    pub translate_x: f32,
    /// Vertical translation.
    pub translate_y: f32,
    /// Rotation in degrees, positive is clockwise.
    pub rotation_deg: f32,
    /// Opacity of the "like" badge, `0.0..=1.0`.
    pub like_opacity: f32,
    /// Opacity of the "dislike" badge, `0.0..=1.0`.
    pub dislike_opacity: f32,
}

impl CardTransform {
    /// Resting position with both badges hidden.
    pub const NEUTRAL: Self = Self {
        translate_x: 0.0,
        translate_y: 0.0,
        rotation_deg: 0.0,
        like_opacity: 0.0,
        dislike_opacity: 0.0,
    };
}

impl Default for CardTransform {
    fn default() -> Self {
        Self::NEUTRAL
    }
}
