//! Ledger: the two disjoint sets of decided card ids.

use crate::deck::CardId;
use crate::gesture::Decision;
use std::collections::HashSet;

/// Record of liked and disliked card ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    liked: HashSet<CardId>,
    disliked: HashSet<CardId>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a decision; refuses ids already present in either set.
    pub fn record(&mut self, id: CardId, decision: Decision) -> bool {
        if self.contains(&id) {
            return false;
        }
        match decision {
            Decision::Like => self.liked.insert(id),
            Decision::Dislike => self.disliked.insert(id),
        }
    }

    /// Whether `id` has been decided.
    pub fn contains(&self, id: &CardId) -> bool {
        self.liked.contains(id) || self.disliked.contains(id)
    }

    /// Decision recorded for `id`.
    pub fn decision(&self, id: &CardId) -> Option<Decision> {
        if self.liked.contains(id) {
            Some(Decision::Like)
        } else if self.disliked.contains(id) {
            Some(Decision::Dislike)
        } else {
            None
        }
    }

    /// Whether `id` was liked.
    #[inline]
    pub fn is_liked(&self, id: &CardId) -> bool {
        self.liked.contains(id)
    }

    /// Liked ids.
    pub const fn liked(&self) -> &HashSet<CardId> {
        &self.liked
    }

    /// Disliked ids.
    pub const fn disliked(&self) -> &HashSet<CardId> {
        &self.disliked
    }

    /// Total decisions recorded.
    pub fn len(&self) -> usize {
        self.liked.len() + self.disliked.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty()
    }

    /// Forget every decision.
    pub fn clear(&mut self) {
        self.liked.clear();
        self.disliked.clear();
    }
}
