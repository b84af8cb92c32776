//! Message types for actor communication.
//!
//! These enums define the protocol between the input/ticker threads and the
//! runtime loop.

use std::time::{Duration, Instant};

/// Key codes for keyboard input.
///
/// A subset of crossterm's `KeyCode`, limited to what the swipe keymap uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Tab key.
    Tab,
    /// Escape key.
    Esc,
}

/// Key modifiers the keymap reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Control key held.
    pub control: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self { control: false };

    /// Control held.
    pub const CONTROL: Self = Self { control: true };
}

/// Events from the input thread.
///
/// Pointer coordinates are already scaled from terminal cells into the
/// units the gesture thresholds are expressed in.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },

    /// Primary button pressed.
    PointerDown {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },

    /// Pointer dragged with the primary button held.
    PointerMove {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },

    /// Primary button released.
    PointerUp {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },

    /// Terminal was resized.
    Resize {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    /// Input thread encountered an error.
    Error(String),

    /// Input thread is shutting down.
    Shutdown,
}

impl InputEvent {
    /// Plain key press without modifiers.
    pub const fn key(code: KeyCode) -> Self {
        Self::Key {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

/// A tick event sent at regular intervals.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Frame number (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the ticker was started.
    pub elapsed: Duration,
    /// When the tick was generated.
    pub at: Instant,
}

/// Conversion from terminal cells to pointer units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerScale {
    /// Units per column.
    pub x: f32,
    /// Units per row.
    pub y: f32,
}

impl PointerScale {
    /// Scale a cell position.
    #[inline]
    pub fn apply(&self, column: u16, row: u16) -> (f32, f32) {
        (f32::from(column) * self.x, f32::from(row) * self.y)
    }
}

impl Default for PointerScale {
    /// Roughly the pixel size of a terminal cell.
    fn default() -> Self {
        Self { x: 8.0, y: 16.0 }
    }
}
