//! # Swipedeck
//!
//! A swipe-gesture card stack engine.
//!
//! Swipedeck presents a deck of image cards one at a time, turns pointer
//! drags (or button taps) into like/dislike decisions, plays a time-boxed
//! exit animation and records each decision exactly once.
//!
//! ## Core Concepts
//!
//! - **Gesture tracking**: per-card `Idle → Dragging → Committing` state machine
//! - **Commit animation**: fixed-duration exit with a one-shot completion signal
//! - **Stack controller**: fixed deck, monotonic cursor, disjoint like/dislike ledger
//! - **Session summary**: liked items in deck order with a gallery viewer
//! - **Actor model**: input, ticker and preload threads feeding one runtime loop
//!
//! ## Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use swipedeck::{Point, PointerEvent, PointerKind, Session, SessionOutput, SwipeConfig};
//!
//! let mut session = Session::with_defaults(SwipeConfig::default()).unwrap();
//! let top = session.top_id().unwrap();
//! let now = Instant::now();
//!
//! for (kind, x) in [(PointerKind::Down, 0.0), (PointerKind::Move, 150.0), (PointerKind::Up, 150.0)] {
//!     session.pointer(&PointerEvent::new(kind, Point::new(x, 0.0), top.clone()), now);
//! }
//! let outputs = session.tick(now + Duration::from_millis(200));
//! assert!(matches!(outputs[0], SessionOutput::Decided { .. }));
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod animation;
pub mod config;
pub mod deck;
pub mod error;
pub mod gesture;
pub mod preload;
pub mod session;
pub mod stack;
pub mod summary;
pub mod terminal;
pub mod text;

// Re-exports for convenience
pub use actor::{InputEvent, KeyCode, Presenter, Runtime, RuntimeConfig};
pub use animation::{CommitAnimator, ExitAnimation, SnapBack};
pub use config::SwipeConfig;
pub use deck::{CardId, CardItem, CataasSource, Deck, DeckGenerator, ImageSource};
pub use error::{Result, SwipeError};
pub use gesture::{CardTransform, Decision, GestureOutcome, GesturePhase, GestureTracker, Point};
pub use preload::{ImageFetcher, NoopFetcher, PreloadReport, Preloader};
pub use session::{Changes, PointerEvent, PointerKind, Session, SessionOutput, Theme};
pub use stack::{Ledger, StackController};
pub use summary::{Gallery, SessionSummary};
