//! Actor Model: Message-passing concurrency around the swipe session.
//!
//! This module implements a simple actor system using crossbeam channels:
//! - **Input Actor**: Polls terminal events, forwards pointer and key events
//! - **Ticker Actor**: Emits timing ticks that drive the card animations
//! - **Runtime**: Single thread of control that owns the [`Session`](crate::Session)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐    SessionOutput   ┌───────────┐
//! │ Input Thread │ ─────────────────▶  │              │ ─────────────────▶ │ Presenter │
//! └──────────────┘                     │   Runtime    │                    └───────────┘
//! ┌──────────────┐        Tick         │  (Session)   │
//! │Ticker Thread │ ─────────────────▶  │              │
//! └──────────────┘                     │              │
//! ┌──────────────┐    PreloadReport    │              │
//! │Preload Thread│ ─────────────────▶  │              │
//! └──────────────┘                     └──────────────┘
//! ```

mod input;
mod messages;
mod runtime;
mod ticker;

pub use input::{convert_event, InputActor};
pub use messages::{InputEvent, KeyCode, KeyModifiers, PointerScale, Tick};
pub use runtime::{Presenter, Runtime, RuntimeConfig};
pub use ticker::TickerActor;
