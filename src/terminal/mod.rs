//! Terminal setup for the interactive runtime.
//!
//! [`TerminalGuard`] enters raw mode, optionally switches to the alternate
//! screen and enables mouse capture so drags reach the input actor. All of it
//! is undone when the guard is dropped.

use crate::error::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Terminal options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalOptions {
    /// Whether to enable mouse capture.
    pub enable_mouse: bool,
    /// Whether to use alternate screen buffer.
    pub alternate_screen: bool,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            enable_mouse: true,
            alternate_screen: true,
        }
    }
}

/// Restores the terminal on drop.
#[derive(Debug)]
pub struct TerminalGuard {
    options: TerminalOptions,
    width: u16,
    height: u16,
}

impl TerminalGuard {
    /// Put the terminal into interactive mode.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails (raw mode, alternate screen, etc.).
    pub fn enter(options: TerminalOptions) -> Result<Self> {
        let (width, height) = terminal::size()?;
        terminal::enable_raw_mode()?;

        let mut stdout = io::stdout();
        if options.alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        if options.enable_mouse {
            execute!(stdout, EnableMouseCapture)?;
        }
        execute!(stdout, cursor::Hide)?;

        Ok(Self {
            options,
            width,
            height,
        })
    }

    /// Terminal size when the guard was created.
    pub const fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show);
        if self.options.enable_mouse {
            let _ = execute!(stdout, DisableMouseCapture);
        }
        if self.options.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}
