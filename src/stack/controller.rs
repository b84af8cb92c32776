//! Stack Controller: deck, cursor and ledger.
//!
//! The cursor is the index of the next undecided card. It only moves forward,
//! one step per successful [`advance`](StackController::advance), and only
//! [`reset`](StackController::reset) rewinds it.

use super::ledger::Ledger;
use crate::deck::{CardId, CardItem, Deck};
use crate::gesture::Decision;
use log::{debug, info};

/// Owns the ordered deck, the cursor and the classification ledger.
#[derive(Debug, Clone)]
pub struct StackController {
    deck: Deck,
    cursor: usize,
    ledger: Ledger,
}

impl StackController {
    /// Start a session over `deck`.
    pub fn new(deck: Deck) -> Self {
        Self {
            deck,
            cursor: 0,
            ledger: Ledger::new(),
        }
    }

    /// The card on top of the stack, `None` once exhausted.
    #[inline]
    pub fn current_top(&self) -> Option<&CardItem> {
        self.deck.get(self.cursor)
    }

    /// Record `decision` for `card_id` and move to the next card.
    ///
    /// Stale commits (for a card that is no longer on top) are ignored and
    /// return `false`; they come from late or duplicate completion signals.
    pub fn advance(&mut self, decision: Decision, card_id: &CardId) -> bool {
        let Some(top) = self.deck.get(self.cursor) else {
            debug!("stale commit for {card_id}: stack exhausted");
            return false;
        };
        if &top.id != card_id {
            debug!("stale commit for {card_id}: top is {}", top.id);
            return false;
        }
        if !self.ledger.record(top.id.clone(), decision) {
            debug!("duplicate commit for {card_id}");
            return false;
        }
        self.cursor += 1;
        debug!(
            "{card_id} -> {} ({}/{})",
            decision.as_str(),
            self.cursor,
            self.deck.len()
        );
        true
    }

    /// Replace the deck and forget every decision.
    pub fn reset(&mut self, deck: Deck) {
        info!("stack reset with {} cards", deck.len());
        self.deck = deck;
        self.cursor = 0;
        self.ledger.clear();
    }

    /// Whether every card has been decided.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.deck.len()
    }

    /// Index of the next undecided card.
    #[inline]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// The session deck.
    #[inline]
    pub const fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Decisions recorded so far.
    #[inline]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Undecided cards paired with their stacking depth (0 is on top).
    ///
    /// Only depth 0 is interactive; deeper cards are inert and painted
    /// below it in order.
    pub fn visible(&self) -> impl Iterator<Item = (usize, &CardItem)> {
        self.deck.as_slice()[self.cursor..].iter().enumerate()
    }

    /// One-based position of the top card and the deck length.
    pub fn progress(&self) -> (usize, usize) {
        ((self.cursor + 1).min(self.deck.len()), self.deck.len())
    }
}
