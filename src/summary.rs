//! Session Summary: the liked subset and the gallery viewer over it.
//!
//! [`SessionSummary`] is a read-only view derived from the stack; the
//! [`Gallery`] holds the UI state (selected item, collapsed or expanded)
//! which is independent of the swipe state machine.

use crate::deck::{CardId, CardItem};
use crate::stack::StackController;

/// Liked items of a session in original deck order.
#[derive(Debug, Clone)]
pub struct SessionSummary<'a> {
    liked: Vec<&'a CardItem>,
    total: usize,
}

impl<'a> SessionSummary<'a> {
    /// Derive the summary from a stack.
    pub fn new(stack: &'a StackController) -> Self {
        let ledger = stack.ledger();
        Self {
            liked: stack
                .deck()
                .iter()
                .filter(|item| ledger.is_liked(&item.id))
                .collect(),
            total: stack.deck().len(),
        }
    }

    /// Liked cards, ordered as they appear in the deck.
    pub fn liked_items(&self) -> &[&'a CardItem] {
        &self.liked
    }

    /// Number of liked cards.
    pub fn liked_count(&self) -> usize {
        self.liked.len()
    }

    /// Deck length.
    pub const fn total(&self) -> usize {
        self.total
    }

    fn index_of(&self, id: &CardId) -> Option<usize> {
        self.liked.iter().position(|item| &item.id == id)
    }

    /// The liked item after `current`, `None` at the end.
    pub fn next(&self, current: &CardId) -> Option<&'a CardItem> {
        let index = self.index_of(current)?;
        self.liked.get(index + 1).copied()
    }

    /// The liked item before `current`, `None` at the start.
    pub fn previous(&self, current: &CardId) -> Option<&'a CardItem> {
        let index = self.index_of(current)?;
        index.checked_sub(1).and_then(|i| self.liked.get(i)).copied()
    }
}

/// Gallery state: detail selection and collapse flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    selected: Option<CardId>,
    expanded: bool,
    preview_limit: usize,
}

impl Gallery {
    /// Create a collapsed gallery showing at most `preview_limit` items.
    pub const fn new(preview_limit: usize) -> Self {
        Self {
            selected: None,
            expanded: false,
            preview_limit,
        }
    }

    /// Item under detail view.
    pub const fn selected(&self) -> Option<&CardId> {
        self.selected.as_ref()
    }

    /// Whether every liked item is shown.
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Open the detail view on `id` if it was liked.
    pub fn select(&mut self, summary: &SessionSummary<'_>, id: &CardId) -> bool {
        if summary.index_of(id).is_none() {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    /// Open the detail view on the first liked item.
    pub fn select_first(&mut self, summary: &SessionSummary<'_>) -> bool {
        match summary.liked_items().first() {
            Some(item) => {
                self.selected = Some(item.id.clone());
                true
            }
            None => false,
        }
    }

    /// Move the selection forward; no-op at the last item.
    pub fn select_next(&mut self, summary: &SessionSummary<'_>) -> bool {
        self.step(summary, SessionSummary::next)
    }

    /// Move the selection back; no-op at the first item.
    pub fn select_previous(&mut self, summary: &SessionSummary<'_>) -> bool {
        self.step(summary, SessionSummary::previous)
    }

    fn step<'a>(
        &mut self,
        summary: &SessionSummary<'a>,
        pick: fn(&SessionSummary<'a>, &CardId) -> Option<&'a CardItem>,
    ) -> bool {
        let Some(current) = self.selected.as_ref() else {
            return false;
        };
        match pick(summary, current) {
            Some(item) => {
                self.selected = Some(item.id.clone());
                true
            }
            None => false,
        }
    }

    /// Close the detail view.
    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Flip between collapsed and expanded.
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Whether the "show all" toggle should be offered.
    pub fn shows_toggle(&self, summary: &SessionSummary<'_>) -> bool {
        summary.liked_count() > self.preview_limit
    }

    /// Items currently shown in the grid.
    pub fn visible_items<'a>(&self, summary: &SessionSummary<'a>) -> Vec<&'a CardItem> {
        let items = summary.liked_items();
        let shown = if self.expanded {
            items.len()
        } else {
            items.len().min(self.preview_limit)
        };
        items[..shown].to_vec()
    }

    /// Clear selection and collapse, for a new session.
    pub fn reset(&mut self) {
        self.selected = None;
        self.expanded = false;
    }
}
