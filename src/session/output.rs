//! Session inputs and outputs exchanged with the host.

use crate::animation::ExitAnimation;
use crate::deck::CardId;
use crate::gesture::{CardTransform, Decision, Point};
use bitflags::bitflags;

/// Kind of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Pointer or touch went down.
    Down,
    /// Pointer or touch moved.
    Move,
    /// Pointer or touch was released.
    Up,
}

/// A raw pointer event aimed at a card.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Pointer position.
    pub point: Point,
    /// Card the host hit-tested the event to.
    pub target: CardId,
}

impl PointerEvent {
    /// Create a pointer event.
    pub const fn new(kind: PointerKind, point: Point, target: CardId) -> Self {
        Self { kind, point, target }
    }
}

/// Colour theme handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Light background.
    Light,
    /// Dark background.
    #[default]
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Lowercase label.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Everything the session tells the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutput {
    /// The top card follows the pointer.
    Transform {
        /// Card being dragged.
        card_id: CardId,
        /// New transform.
        transform: CardTransform,
    },
    /// A drag was cancelled; animate back to neutral.
    SnapBack {
        /// Card returning to rest.
        card_id: CardId,
        /// Transition length in milliseconds.
        duration_ms: u64,
    },
    /// The snap-back transition hint can be removed.
    TransitionCleared {
        /// Card whose transition ended.
        card_id: CardId,
    },
    /// A card started its exit animation.
    CommitStarted {
        /// Card leaving the stack.
        card_id: CardId,
        /// Exit animation descriptor.
        animation: ExitAnimation,
    },
    /// A decision was recorded and the stack advanced.
    Decided {
        /// Card that was decided.
        card_id: CardId,
        /// The decision.
        decision: Decision,
    },
    /// The last card was decided.
    Exhausted {
        /// Number of liked cards.
        liked: usize,
        /// Deck length.
        total: usize,
    },
    /// A card image failed to load; show its caption instead.
    ImageFallback {
        /// Card whose image failed.
        card_id: CardId,
        /// Alt text fitted to the caption width.
        caption: String,
    },
    /// The gallery detail selection changed.
    SelectionChanged(Option<CardId>),
    /// The gallery was expanded or collapsed.
    GalleryToggled {
        /// Whether all liked items are shown.
        expanded: bool,
    },
    /// The theme was toggled.
    ThemeChanged(Theme),
    /// A new deck replaced the old one.
    SessionReset {
        /// Length of the new deck.
        deck_len: usize,
    },
}

bitflags! {
    /// Presentation areas touched by a batch of outputs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Changes: u8 {
        /// Top card transform or animation.
        const CARD = 0b0000_0001;
        /// Stack contents or progress.
        const STACK = 0b0000_0010;
        /// Summary and gallery view.
        const SUMMARY = 0b0000_0100;
        /// Theme.
        const THEME = 0b0000_1000;
    }
}

impl Changes {
    /// Areas affected by one output.
    pub const fn of(output: &SessionOutput) -> Self {
        match output {
            SessionOutput::Transform { .. }
            | SessionOutput::SnapBack { .. }
            | SessionOutput::TransitionCleared { .. }
            | SessionOutput::CommitStarted { .. }
            | SessionOutput::ImageFallback { .. } => Self::CARD,
            SessionOutput::Decided { .. } => Self::CARD.union(Self::STACK),
            SessionOutput::Exhausted { .. } => Self::STACK.union(Self::SUMMARY),
            SessionOutput::SelectionChanged(_) | SessionOutput::GalleryToggled { .. } => Self::SUMMARY,
            SessionOutput::ThemeChanged(_) => Self::THEME,
            SessionOutput::SessionReset { .. } => Self::all(),
        }
    }

    /// Areas affected by a batch of outputs.
    pub fn from_outputs(outputs: &[SessionOutput]) -> Self {
        outputs.iter().fold(Self::empty(), |acc, output| acc | Self::of(output))
    }
}
