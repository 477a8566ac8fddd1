//! Deck construction rules.
//!
//! A player's deck is their season-long pick of power cards. It is saved
//! wholesale (no partial edits) and frozen at the season lock.

mod validator;

pub use validator::{validate_deck, Deck, DeckError, DeckRuleViolation, DeckValidator};
