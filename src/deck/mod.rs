//! Cards, decks and deck generation.
//!
//! - [`CardItem`]: an immutable card with an id, image reference and alt text
//! - [`Deck`]: the fixed ordered sequence of cards for a session
//! - [`DeckGenerator`]: builds decks with collision-free ids from an [`ImageSource`]

mod card;
mod generator;

pub use card::{CardId, CardItem, Deck};
pub use generator::{CataasSource, DeckGenerator, ImageSource};
