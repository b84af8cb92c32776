//! Session: the swipe state machine wired together.
//!
//! A [`Session`] owns the deck generator, the [`StackController`], an arena
//! of [`CardController`]s keyed by card id, the gallery and the theme. Every
//! input is synchronous and returns the [`SessionOutput`]s the presentation
//! layer should apply.
//!
//! # Event ordering per card
//!
//! ```text
//! (pointer moves)* ─▶ at most one commit ─▶ one completion ─▶ at most one advance
//! ```
//!
//! Completion signals are only raised from [`Session::tick`]; a completion
//! for a card that is no longer on top is discarded by the stack.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, Instant};
//! use swipedeck::{Decision, Session, SwipeConfig};
//!
//! let mut session = Session::with_defaults(SwipeConfig::default()).unwrap();
//! let top = session.top_id().unwrap();
//! let start = Instant::now();
//!
//! session.decide(&top, Decision::Like, start);
//! session.tick(start + Duration::from_millis(250));
//! assert_eq!(session.stack().cursor(), 1);
//! ```

mod controller;
mod output;

pub use controller::{CardController, ControllerTick};
pub use output::{Changes, PointerEvent, PointerKind, SessionOutput, Theme};

use crate::config::SwipeConfig;
use crate::deck::{CardId, CataasSource, Deck, DeckGenerator, ImageSource};
use crate::error::{Result, SwipeError};
use crate::gesture::{CardTransform, Decision, GestureOutcome};
use crate::stack::StackController;
use crate::summary::{Gallery, SessionSummary};
use crate::text::fit_caption;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::time::Instant;

/// A complete swipe session.
#[derive(Debug)]
pub struct Session<S = CataasSource> {
    config: SwipeConfig,
    generator: DeckGenerator<S>,
    stack: StackController,
    cards: HashMap<CardId, CardController>,
    gallery: Gallery,
    theme: Theme,
    viewport_width: f32,
}

impl Session<CataasSource> {
    /// Start a session drawing cards from cataas.com.
    pub fn with_defaults(config: SwipeConfig) -> Result<Self> {
        Self::new(config, DeckGenerator::default())
    }
}

impl<S: ImageSource> Session<S> {
    /// Validate `config` and start a session with a freshly generated deck.
    pub fn new(config: SwipeConfig, generator: DeckGenerator<S>) -> Result<Self> {
        let deck = generator.generate(config.deck_size)?;
        Self::with_deck(config, generator, deck)
    }

    /// Validate `config` and start a session over an existing deck.
    ///
    /// Fails with [`SwipeError::EmptyDeck`] if `deck` has no cards.
    pub fn with_deck(config: SwipeConfig, generator: DeckGenerator<S>, deck: Deck) -> Result<Self> {
        config.validate()?;
        if deck.is_empty() {
            return Err(SwipeError::EmptyDeck);
        }
        let mut session = Self {
            gallery: Gallery::new(config.gallery_preview_limit),
            viewport_width: config.viewport_width,
            config,
            generator,
            stack: StackController::new(deck),
            cards: HashMap::new(),
            theme: Theme::default(),
        };
        session.ensure_top_controller();
        info!("session started with {} cards", session.stack.deck().len());
        Ok(session)
    }

    /// Session configuration.
    pub const fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// Deck, cursor and ledger.
    pub const fn stack(&self) -> &StackController {
        &self.stack
    }

    /// Current theme.
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Gallery state.
    pub const fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Width an exiting card must clear.
    pub const fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Liked items and navigation over them.
    pub fn summary(&self) -> SessionSummary<'_> {
        SessionSummary::new(&self.stack)
    }

    /// Id of the interactive top card.
    pub fn top_id(&self) -> Option<CardId> {
        self.stack.current_top().map(|item| item.id.clone())
    }

    /// Controller of a live card.
    pub fn controller(&self, id: &CardId) -> Option<&CardController> {
        self.cards.get(id)
    }

    /// Number of live card controllers.
    pub fn live_controllers(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck has been fully decided.
    pub fn is_exhausted(&self) -> bool {
        self.stack.is_exhausted()
    }

    fn ensure_top_controller(&mut self) {
        if let Some(top) = self.stack.current_top() {
            if !self.cards.contains_key(&top.id) {
                debug!("controller created for {}", top.id);
                self.cards
                    .insert(top.id.clone(), CardController::new(&self.config));
            }
        }
    }

    /// The top card's controller, if `target` is the top card.
    fn top_controller(&mut self, target: &CardId) -> Option<&mut CardController> {
        match self.stack.current_top() {
            Some(top) if &top.id == target => self.cards.get_mut(target),
            _ => {
                debug!("ignoring input for inert card {target}");
                None
            }
        }
    }

    /// Feed a pointer event.
    pub fn pointer(&mut self, event: &PointerEvent, now: Instant) -> Vec<SessionOutput> {
        let viewport_width = self.viewport_width;
        let Some(card) = self.top_controller(&event.target) else {
            return Vec::new();
        };
        let card_id = event.target.clone();

        match event.kind {
            PointerKind::Down => {
                if card.tracker_mut().pointer_down(event.point) && card.clear_transition() {
                    vec![SessionOutput::TransitionCleared { card_id }]
                } else {
                    Vec::new()
                }
            }
            PointerKind::Move => card
                .tracker_mut()
                .pointer_move(event.point)
                .map(|transform| vec![SessionOutput::Transform { card_id, transform }])
                .unwrap_or_default(),
            PointerKind::Up => match card.tracker_mut().pointer_up() {
                GestureOutcome::Ignored => Vec::new(),
                GestureOutcome::SnapBack => {
                    card.snap_mut().start(now);
                    vec![
                        SessionOutput::Transform {
                            card_id: card_id.clone(),
                            transform: CardTransform::NEUTRAL,
                        },
                        SessionOutput::SnapBack {
                            card_id,
                            duration_ms: card.snap_back_ms(),
                        },
                    ]
                }
                GestureOutcome::Commit(decision) => exit(card, card_id, decision, viewport_width, now),
            },
        }
    }

    /// Commit a decision for `card_id` without a drag (button tap).
    ///
    /// A no-op for inert cards and for a card that is already committing.
    pub fn decide(&mut self, card_id: &CardId, decision: Decision, now: Instant) -> Vec<SessionOutput> {
        let viewport_width = self.viewport_width;
        let Some(card) = self.top_controller(card_id) else {
            return Vec::new();
        };
        if !card.tracker_mut().commit(decision) {
            return Vec::new();
        }
        exit(card, card_id.clone(), decision, viewport_width, now)
    }

    /// Commit a decision for whatever card is on top.
    pub fn decide_top(&mut self, decision: Decision, now: Instant) -> Vec<SessionOutput> {
        match self.top_id() {
            Some(id) => self.decide(&id, decision, now),
            None => Vec::new(),
        }
    }

    /// Advance timers: clear snap-back hints and deliver completions.
    pub fn tick(&mut self, now: Instant) -> Vec<SessionOutput> {
        let mut outputs = Vec::new();
        let mut completed = Vec::new();

        for (card_id, card) in &mut self.cards {
            let tick = card.tick(now);
            if tick.transition_cleared {
                outputs.push(SessionOutput::TransitionCleared {
                    card_id: card_id.clone(),
                });
            }
            if let Some(decision) = tick.completed {
                completed.push((card_id.clone(), decision));
            }
        }

        for (card_id, decision) in completed {
            self.cards.remove(&card_id);
            if !self.stack.advance(decision, &card_id) {
                continue;
            }
            outputs.push(SessionOutput::Decided { card_id, decision });
            if self.stack.is_exhausted() {
                let liked = self.stack.ledger().liked().len();
                let total = self.stack.deck().len();
                info!("deck exhausted: liked {liked} of {total}");
                outputs.push(SessionOutput::Exhausted { liked, total });
            }
        }

        self.ensure_top_controller();
        outputs
    }

    /// Report a failed image load; degrades to the card's caption.
    pub fn image_failed(&mut self, card_id: &CardId, reason: &str) -> Vec<SessionOutput> {
        warn!("image for {card_id} failed to load: {reason}");
        let deck = self.stack.deck();
        let Some(item) = deck.position(card_id).and_then(|index| deck.get(index)) else {
            return Vec::new();
        };
        vec![SessionOutput::ImageFallback {
            card_id: card_id.clone(),
            caption: fit_caption(&item.alt_text, self.config.caption_columns),
        }]
    }

    /// Update the viewport width used by exit animations.
    pub fn resize(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.viewport_width = width;
        }
    }

    /// Replace the deck with a freshly generated one.
    pub fn reset(&mut self) -> Result<Vec<SessionOutput>> {
        let deck = self.generator.generate(self.config.deck_size)?;
        self.reset_with(deck)
    }

    /// Replace the deck with `deck`.
    ///
    /// An empty deck is refused and the current session is kept.
    pub fn reset_with(&mut self, deck: Deck) -> Result<Vec<SessionOutput>> {
        if deck.is_empty() {
            return Err(SwipeError::EmptyDeck);
        }
        let deck_len = deck.len();
        self.cards.clear();
        self.stack.reset(deck);
        self.gallery.reset();
        self.ensure_top_controller();
        Ok(vec![SessionOutput::SessionReset { deck_len }])
    }

    /// Switch between light and dark.
    pub fn toggle_theme(&mut self) -> Vec<SessionOutput> {
        self.theme = self.theme.toggled();
        debug!("theme -> {}", self.theme.as_str());
        vec![SessionOutput::ThemeChanged(self.theme)]
    }

    /// Open the detail view on a liked card.
    pub fn select(&mut self, card_id: &CardId) -> Vec<SessionOutput> {
        let summary = SessionSummary::new(&self.stack);
        if self.gallery.select(&summary, card_id) {
            vec![SessionOutput::SelectionChanged(Some(card_id.clone()))]
        } else {
            Vec::new()
        }
    }

    /// Open the detail view on the first liked card.
    pub fn select_first(&mut self) -> Vec<SessionOutput> {
        let summary = SessionSummary::new(&self.stack);
        if self.gallery.select_first(&summary) {
            self.selection_changed()
        } else {
            Vec::new()
        }
    }

    /// Show the next liked card in the detail view.
    pub fn select_next(&mut self) -> Vec<SessionOutput> {
        let summary = SessionSummary::new(&self.stack);
        if self.gallery.select_next(&summary) {
            self.selection_changed()
        } else {
            Vec::new()
        }
    }

    /// Show the previous liked card in the detail view.
    pub fn select_previous(&mut self) -> Vec<SessionOutput> {
        let summary = SessionSummary::new(&self.stack);
        if self.gallery.select_previous(&summary) {
            self.selection_changed()
        } else {
            Vec::new()
        }
    }

    /// Close the detail view.
    pub fn close_detail(&mut self) -> Vec<SessionOutput> {
        if self.gallery.selected().is_none() {
            return Vec::new();
        }
        self.gallery.close();
        vec![SessionOutput::SelectionChanged(None)]
    }

    /// Expand or collapse the liked grid.
    pub fn toggle_gallery(&mut self) -> Vec<SessionOutput> {
        self.gallery.toggle_expanded();
        vec![SessionOutput::GalleryToggled {
            expanded: self.gallery.is_expanded(),
        }]
    }

    fn selection_changed(&self) -> Vec<SessionOutput> {
        vec![SessionOutput::SelectionChanged(self.gallery.selected().cloned())]
    }
}

/// Outputs for a committed card: a pending snap-back hint is cleared first.
fn exit(
    card: &mut CardController,
    card_id: CardId,
    decision: Decision,
    viewport_width: f32,
    now: Instant,
) -> Vec<SessionOutput> {
    let mut outputs = Vec::with_capacity(2);
    if card.clear_transition() {
        outputs.push(SessionOutput::TransitionCleared {
            card_id: card_id.clone(),
        });
    }
    if let Some(animation) = card.start_exit(decision, viewport_width, now) {
        outputs.push(SessionOutput::CommitStarted { card_id, animation });
    }
    outputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::CardItem;
    use crate::gesture::Point;
    use std::collections::HashSet;
    use std::time::Duration;

    fn deck(n: usize) -> Deck {
        Deck::new(
            (0..n)
                .map(|i| CardItem::new(format!("c{i}").as_str(), format!("img://{i}"), format!("Random cat {}", i + 1)))
                .collect(),
        )
    }

    fn session(n: usize) -> Session {
        Session::with_deck(SwipeConfig::default(), DeckGenerator::default(), deck(n)).unwrap()
    }

    fn ms(start: Instant, millis: u64) -> Instant {
        start + Duration::from_millis(millis)
    }

    fn swipe(session: &mut Session, dx: f32, now: Instant) -> Vec<SessionOutput> {
        let target = session.top_id().unwrap();
        let mut outputs = Vec::new();
        for (kind, x) in [
            (PointerKind::Down, 100.0),
            (PointerKind::Move, 100.0 + dx / 2.0),
            (PointerKind::Move, 100.0 + dx),
            (PointerKind::Up, 100.0 + dx),
        ] {
            let event = PointerEvent::new(kind, Point::new(x, 200.0), target.clone());
            outputs.extend(session.pointer(&event, now));
        }
        outputs
    }

    fn assert_invariants(session: &Session) {
        let ledger = session.stack().ledger();
        assert_eq!(ledger.len(), session.stack().cursor());
        assert!(ledger.liked().is_disjoint(ledger.disliked()));
    }

    #[test]
    fn test_drag_commit_then_completion() {
        let mut session = session(3);
        let start = Instant::now();
        let first = session.top_id().unwrap();

        let outputs = swipe(&mut session, 121.0, start);
        assert!(matches!(
            outputs.last(),
            Some(SessionOutput::CommitStarted { animation, .. }) if animation.direction == Decision::Like
        ));
        // Nothing advances until the animation completes.
        assert_eq!(session.stack().cursor(), 0);
        assert!(session.tick(ms(start, 100)).is_empty());

        let outputs = session.tick(ms(start, 200));
        assert_eq!(
            outputs,
            [SessionOutput::Decided {
                card_id: first.clone(),
                decision: Decision::Like
            }]
        );
        assert_eq!(session.stack().cursor(), 1);
        assert!(session.stack().ledger().is_liked(&first));
        assert!(session.controller(&first).is_none());
        assert_eq!(session.live_controllers(), 1);
        assert_invariants(&session);
    }

    #[test]
    fn test_snap_back_leaves_state_untouched() {
        let mut session = session(3);
        let start = Instant::now();
        let top = session.top_id().unwrap();

        let outputs = swipe(&mut session, -119.0, start);
        assert!(outputs.contains(&SessionOutput::SnapBack {
            card_id: top.clone(),
            duration_ms: 160
        }));
        assert_eq!(session.stack().cursor(), 0);
        assert!(session.stack().ledger().is_empty());

        assert_eq!(
            session.tick(ms(start, 160)),
            [SessionOutput::TransitionCleared { card_id: top.clone() }]
        );
        assert!(session.tick(ms(start, 400)).is_empty());
        assert_eq!(session.top_id(), Some(top));
    }

    #[test]
    fn test_repress_during_snap_back_clears_hint() {
        let mut session = session(3);
        let start = Instant::now();
        let top = session.top_id().unwrap();

        let outputs = swipe(&mut session, 50.0, start);
        assert!(outputs.contains(&SessionOutput::SnapBack {
            card_id: top.clone(),
            duration_ms: 160
        }));

        let down = PointerEvent::new(PointerKind::Down, Point::new(100.0, 200.0), top.clone());
        assert_eq!(
            session.pointer(&down, ms(start, 50)),
            [SessionOutput::TransitionCleared { card_id: top.clone() }]
        );
        // The hint is reported once, not again when the timer would have fired.
        assert!(session.tick(ms(start, 200)).is_empty());
        assert!(session.tick(ms(start, 2000)).is_empty());
    }

    #[test]
    fn test_tap_during_snap_back_clears_hint_before_exit() {
        let mut session = session(3);
        let start = Instant::now();
        let top = session.top_id().unwrap();
        swipe(&mut session, -40.0, start);

        let outputs = session.decide(&top, Decision::Like, ms(start, 20));
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0], SessionOutput::TransitionCleared { card_id: top.clone() });
        assert!(matches!(outputs[1], SessionOutput::CommitStarted { .. }));
        assert_eq!(
            session.tick(ms(start, 220)),
            [SessionOutput::Decided {
                card_id: top,
                decision: Decision::Like
            }]
        );
    }

    #[test]
    fn test_with_deck_rejects_invalid_config() {
        let config = SwipeConfig {
            max_rotation_deg: -1.0,
            ..SwipeConfig::default()
        };
        let err = Session::with_deck(config, DeckGenerator::default(), deck(2)).unwrap_err();
        assert!(matches!(
            err,
            SwipeError::InvalidConfig {
                field: "max_rotation_deg",
                ..
            }
        ));

        let nan = SwipeConfig {
            max_rotation_deg: f32::NAN,
            ..SwipeConfig::default()
        };
        assert!(Session::with_deck(nan, DeckGenerator::default(), deck(2)).is_err());
    }

    #[test]
    fn test_empty_deck_refused() {
        let err = Session::with_deck(SwipeConfig::default(), DeckGenerator::default(), deck(0)).unwrap_err();
        assert!(matches!(err, SwipeError::EmptyDeck));

        let mut session = session(2);
        assert!(matches!(session.reset_with(deck(0)), Err(SwipeError::EmptyDeck)));
        assert_eq!(session.stack().deck().len(), 2);
        assert!(!session.is_exhausted());
        assert_eq!(session.live_controllers(), 1);
    }

    #[test]
    fn test_duplicate_button_taps_commit_once() {
        let mut session = session(3);
        let start = Instant::now();
        let top = session.top_id().unwrap();

        assert_eq!(session.decide(&top, Decision::Dislike, start).len(), 1);
        assert!(session.decide(&top, Decision::Dislike, ms(start, 10)).is_empty());
        assert!(session.decide(&top, Decision::Like, ms(start, 20)).is_empty());
        // Late pointer events are ignored too.
        let late = PointerEvent::new(PointerKind::Up, Point::new(0.0, 0.0), top.clone());
        assert!(session.pointer(&late, ms(start, 30)).is_empty());

        session.tick(ms(start, 250));
        session.tick(ms(start, 500));
        assert_eq!(session.stack().cursor(), 1);
        assert_eq!(session.stack().ledger().decision(&top), Some(Decision::Dislike));
        assert_invariants(&session);
    }

    #[test]
    fn test_inert_cards_ignore_input() {
        let mut session = session(3);
        let start = Instant::now();
        let below = session.stack().deck().get(1).unwrap().id.clone();

        let down = PointerEvent::new(PointerKind::Down, Point::new(0.0, 0.0), below.clone());
        assert!(session.pointer(&down, start).is_empty());
        assert!(session.decide(&below, Decision::Like, start).is_empty());
        session.tick(ms(start, 1000));
        assert_eq!(session.stack().cursor(), 0);
    }

    #[test]
    fn test_exhaustion_and_summary_order() {
        use Decision::{Dislike, Like};
        let mut session = session(5);
        let start = Instant::now();
        let plan = [Dislike, Like, Like, Dislike, Like];

        let mut exhausted = Vec::new();
        for (step, decision) in plan.into_iter().enumerate() {
            let at = ms(start, step as u64 * 1000);
            session.decide_top(decision, at);
            for output in session.tick(ms(start, step as u64 * 1000 + 200)) {
                if let SessionOutput::Exhausted { liked, total } = output {
                    exhausted.push((liked, total));
                }
            }
        }

        assert!(session.is_exhausted());
        assert_eq!(exhausted, [(3, 5)]);
        assert_eq!(session.live_controllers(), 0);
        let liked: Vec<_> = session
            .summary()
            .liked_items()
            .iter()
            .map(|item| item.id.to_string())
            .collect();
        assert_eq!(liked, ["c1", "c2", "c4"]);
        assert_invariants(&session);
    }

    #[test]
    fn test_exit_uses_viewport_width() {
        let mut session = session(2);
        session.resize(390.0);
        session.resize(-5.0);
        let outputs = session.decide_top(Decision::Dislike, Instant::now());
        let Some(SessionOutput::CommitStarted { animation, .. }) = outputs.first() else {
            panic!("expected commit, got {outputs:?}");
        };
        assert!((animation.transform.translate_x + 390.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_reset_during_commit_discards_completion() {
        let mut session = session(3);
        let start = Instant::now();
        session.decide_top(Decision::Like, start);

        let outputs = session.reset_with(deck(16)).unwrap();
        assert_eq!(outputs, [SessionOutput::SessionReset { deck_len: 16 }]);
        assert!(session.tick(ms(start, 500)).is_empty());
        assert_eq!(session.stack().cursor(), 0);
        assert!(!session.is_exhausted());
        assert!(session.summary().liked_items().is_empty());
    }

    #[test]
    fn test_generated_reset_produces_fresh_ids() {
        let mut session = Session::with_defaults(SwipeConfig::default()).unwrap();
        let before: HashSet<_> = session.stack().deck().iter().map(|i| i.id.clone()).collect();
        session.reset().unwrap();
        assert_eq!(session.stack().deck().len(), 16);
        assert!(session
            .stack()
            .deck()
            .iter()
            .all(|item| !before.contains(&item.id)));
    }

    #[test]
    fn test_image_failure_is_non_fatal() {
        let mut session = session(2);
        let top = session.top_id().unwrap();
        let outputs = session.image_failed(&top, "404");
        assert_eq!(
            outputs,
            [SessionOutput::ImageFallback {
                card_id: top,
                caption: "Random cat 1".to_string()
            }]
        );
        assert!(session.image_failed(&CardId::new("gone"), "timeout").is_empty());

        session.decide_top(Decision::Like, Instant::now());
        session.tick(Instant::now() + Duration::from_secs(1));
        assert_eq!(session.stack().cursor(), 1);
    }

    #[test]
    fn test_gallery_flow() {
        let mut session = session(3);
        let start = Instant::now();
        for step in 0..3 {
            session.decide_top(Decision::Like, ms(start, step * 1000));
            session.tick(ms(start, step * 1000 + 300));
        }

        assert_eq!(
            session.select_first(),
            [SessionOutput::SelectionChanged(Some(CardId::new("c0")))]
        );
        assert!(session.select_previous().is_empty());
        session.select_next();
        session.select_next();
        assert!(session.select_next().is_empty());
        assert_eq!(session.gallery().selected(), Some(&CardId::new("c2")));
        assert_eq!(session.close_detail(), [SessionOutput::SelectionChanged(None)]);
        assert!(session.close_detail().is_empty());
        assert_eq!(
            session.toggle_gallery(),
            [SessionOutput::GalleryToggled { expanded: true }]
        );
    }

    #[test]
    fn test_theme_toggle() {
        let mut session = session(1);
        assert_eq!(session.theme(), Theme::Dark);
        assert_eq!(session.toggle_theme(), [SessionOutput::ThemeChanged(Theme::Light)]);
    }

    #[test]
    fn test_drag_emits_transforms() {
        let mut session = session(2);
        let outputs = swipe(&mut session, 60.0, Instant::now());
        let transforms: Vec<_> = outputs
            .iter()
            .filter_map(|output| match output {
                SessionOutput::Transform { transform, .. } => Some(*transform),
                _ => None,
            })
            .collect();
        assert_eq!(transforms.len(), 3);
        assert!((transforms[1].like_opacity - 0.5).abs() < 1e-5);
        assert_eq!(transforms[2], CardTransform::NEUTRAL);
    }
}
