//! The card stack: ordered deck, cursor and decision ledger.

mod controller;
mod ledger;

pub use controller::StackController;
pub use ledger::Ledger;
