//! Deck generation on top of a pluggable image supply.
//!
//! The generator never fetches or validates image bytes. It only asks the
//! [`ImageSource`] for a reference per slot and stamps every card with an id
//! that combines the slot index, a per-generator batch counter and a random
//! nonce, so two decks generated back to back never collide.

use super::card::{CardId, CardItem, Deck};
use crate::error::{Result, SwipeError};
use log::debug;
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};

/// Supplies addressable image references for generated cards.
pub trait ImageSource {
    /// Image reference for the card at `index` in a batch seeded by `nonce`.
    fn image_ref(&self, index: usize, nonce: u64) -> String;

    /// Accessibility text for the card at `index`.
    fn alt_text(&self, index: usize) -> String;
}

/// Random cat pictures from cataas.com.
#[derive(Debug, Clone)]
pub struct CataasSource {
    base: String,
    width: u32,
    height: u32,
}

impl CataasSource {
    /// Default endpoint.
    pub const BASE: &'static str = "https://cataas.com/cat";

    /// Create a source for the given image size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            base: Self::BASE.to_string(),
            width,
            height,
        }
    }

    /// Use a different base URL.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }
}

impl Default for CataasSource {
    fn default() -> Self {
        Self::new(600, 800)
    }
}

impl ImageSource for CataasSource {
    fn image_ref(&self, index: usize, nonce: u64) -> String {
        format!(
            "{}?width={}&height={}&random={nonce:x}-{index}",
            self.base, self.width, self.height
        )
    }

    fn alt_text(&self, index: usize) -> String {
        format!("Random cat {}", index + 1)
    }
}

/// Produces fixed-length decks with session-unique ids.
#[derive(Debug)]
pub struct DeckGenerator<S> {
    source: S,
    batch: AtomicU64,
}

impl<S: ImageSource> DeckGenerator<S> {
    /// Create a generator over an image source.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            batch: AtomicU64::new(0),
        }
    }

    /// The underlying image source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Generate a deck of exactly `n` cards.
    pub fn generate(&self, n: usize) -> Result<Deck> {
        if n == 0 {
            return Err(SwipeError::EmptyDeck);
        }

        let batch = self.batch.fetch_add(1, Ordering::Relaxed);
        let nonce: u64 = rand::thread_rng().gen();

        let items = (0..n)
            .map(|index| {
                CardItem::new(
                    CardId::new(format!("c{index}-{batch}-{nonce:x}")),
                    self.source.image_ref(index, nonce),
                    self.source.alt_text(index),
                )
            })
            .collect();

        debug!("generated deck batch={batch} size={n}");
        Ok(Deck::new(items))
    }
}

impl Default for DeckGenerator<CataasSource> {
    fn default() -> Self {
        Self::new(CataasSource::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_exact_length() {
        let generator = DeckGenerator::default();
        let deck = generator.generate(16).unwrap();
        assert_eq!(deck.len(), 16);
        for item in &deck {
            assert!(item.image_ref.starts_with(CataasSource::BASE));
            assert!(!item.alt_text.is_empty());
        }
        assert_eq!(deck.get(0).unwrap().alt_text, "Random cat 1");
    }

    #[test]
    fn test_generate_zero_is_error() {
        let generator = DeckGenerator::default();
        assert!(matches!(generator.generate(0), Err(SwipeError::EmptyDeck)));
    }

    #[test]
    fn test_ids_unique_across_rapid_batches() {
        let generator = DeckGenerator::default();
        let mut seen = HashSet::new();
        for _ in 0..50 {
            let deck = generator.generate(16).unwrap();
            for item in &deck {
                assert!(seen.insert(item.id.clone()), "duplicate id {}", item.id);
            }
        }
        assert_eq!(seen.len(), 800);
    }

    #[test]
    fn test_custom_source() {
        struct Fixed;
        impl ImageSource for Fixed {
            fn image_ref(&self, index: usize, _nonce: u64) -> String {
                format!("file:///cards/{index}.png")
            }
            fn alt_text(&self, index: usize) -> String {
                format!("card {index}")
            }
        }

        let deck = DeckGenerator::new(Fixed).generate(2).unwrap();
        assert_eq!(deck.get(1).unwrap().image_ref, "file:///cards/1.png");
    }
}
