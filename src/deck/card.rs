//! Card items and the fixed-order deck that holds them.

use std::fmt;
use std::sync::Arc;

/// Opaque identifier of a card, unique within a session.
///
/// Backed by an `Arc<str>` so the ledger, the controller arena and the
/// outputs can share ids without reallocating.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(Arc<str>);

impl CardId {
    /// Create an id from any string.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Borrow the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({})", self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One unit of content presented for a single like/dislike decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardItem {
    /// Session-unique id.
    pub id: CardId,
    /// Address of the card image.
    pub image_ref: String,
    /// Accessibility text, also used as the fallback caption.
    pub alt_text: String,
}

impl CardItem {
    /// Create a card item.
    pub fn new(id: impl Into<CardId>, image_ref: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_ref: image_ref.into(),
            alt_text: alt_text.into(),
        }
    }
}

/// The fixed ordered sequence of cards for one session.
///
/// Insertion order is display order. Items are never removed or reordered;
/// progress through the deck is tracked by the stack controller's cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    items: Arc<[CardItem]>,
}

impl Deck {
    /// Build a deck from items in display order.
    pub fn new(items: Vec<CardItem>) -> Self {
        Self {
            items: items.into(),
        }
    }

    /// Number of cards.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the deck has no cards.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Card at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&CardItem> {
        self.items.get(index)
    }

    /// All cards as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[CardItem] {
        &self.items
    }

    /// Iterate cards in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, CardItem> {
        self.items.iter()
    }

    /// Index of the card with `id`.
    pub fn position(&self, id: &CardId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Image references in display order, for preloading.
    pub fn image_refs(&self) -> Vec<(CardId, String)> {
        self.items
            .iter()
            .map(|item| (item.id.clone(), item.image_ref.clone()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a CardItem;
    type IntoIter = std::slice::Iter<'a, CardItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
