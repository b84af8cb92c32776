//! Input Actor: Dedicated thread for polling terminal events.
//!
//! This actor runs in its own thread and uses crossterm's event polling
//! to turn mouse drags into pointer events and key presses into
//! [`InputEvent::Key`], without blocking the runtime loop.

use super::messages::{InputEvent, KeyCode, KeyModifiers, PointerScale};
use crate::error::{Result, SwipeError};
use crossbeam_channel::Sender;
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Input actor that polls terminal events.
pub struct InputActor {
    /// Handle to the input thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
}

impl InputActor {
    /// Spawn the input actor thread.
    ///
    /// # Arguments
    ///
    /// * `sender` - Channel to send input events to the runtime.
    /// * `poll_timeout` - How long to wait for events before checking shutdown.
    /// * `scale` - Cell to pointer unit conversion.
    pub fn spawn(sender: Sender<InputEvent>, poll_timeout: Duration, scale: PointerScale) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = thread::Builder::new()
            .name("swipedeck-input".to_string())
            .spawn(move || {
                Self::run_loop(&sender, &shutdown_clone, poll_timeout, scale);
            })
            .map_err(|_| SwipeError::Spawn("input"))?;

        Ok(Self {
            handle: Some(handle),
            shutdown,
        })
    }

    /// Signal the input thread to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the input thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main input polling loop.
    fn run_loop(sender: &Sender<InputEvent>, shutdown: &AtomicBool, poll_timeout: Duration, scale: PointerScale) {
        loop {
            if shutdown.load(Ordering::Relaxed) {
                let _ = sender.send(InputEvent::Shutdown);
                break;
            }

            match event::poll(poll_timeout) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if let Some(input_event) = convert_event(event, scale) {
                            if sender.send(input_event).is_err() {
                                // Receiver dropped, exit
                                break;
                            }
                        }
                    }
                    Err(e) => {
                        let _ = sender.send(InputEvent::Error(e.to_string()));
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    let _ = sender.send(InputEvent::Error(e.to_string()));
                }
            }
        }
    }
}

impl Drop for InputActor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Convert a crossterm event to an [`InputEvent`].
pub fn convert_event(event: Event, scale: PointerScale) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => {
            // Only process key press events (not release or repeat)
            if key_event.kind != KeyEventKind::Press {
                return None;
            }
            Some(InputEvent::Key {
                code: convert_key_code(key_event.code)?,
                modifiers: convert_modifiers(key_event.modifiers),
            })
        }
        Event::Mouse(mouse) => {
            let (x, y) = scale.apply(mouse.column, mouse.row);
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown { x, y }),
                MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::PointerMove { x, y }),
                MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp { x, y }),
                _ => None,
            }
        }
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => None,
    }
}

/// Convert crossterm `KeyCode` to ours.
fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Enter => KeyCode::Enter,
        event::KeyCode::Left => KeyCode::Left,
        event::KeyCode::Right => KeyCode::Right,
        event::KeyCode::Tab => KeyCode::Tab,
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

/// Convert crossterm `KeyModifiers` to ours.
fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        control: mods.contains(event::KeyModifiers::CONTROL),
    }
}
