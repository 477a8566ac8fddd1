//! In-memory store.

use rustc_hash::FxHashMap;

use crate::activation::{Activation, UsedCardLedger};
use crate::cards::CardId;
use crate::core::{PlayerId, RaceId, Season};
use crate::deck::Deck;

use super::{ActivationKey, ActivationStore, DeckKey, DeckStore};

/// Decks, activations and the ledger held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStore {
    decks: FxHashMap<DeckKey, Deck>,
    activations: FxHashMap<ActivationKey, Activation>,
    ledger: UsedCardLedger,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current ledger, for building an `ActivationContext`.
    #[must_use]
    pub fn ledger(&self) -> &UsedCardLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut UsedCardLedger {
        &mut self.ledger
    }

    /// All activations stored for a race, sorted by player.
    #[must_use]
    pub fn activations_for_race(&self, race: RaceId) -> Vec<Activation> {
        let mut found: Vec<Activation> = self
            .activations
            .values()
            .filter(|a| a.race == race)
            .cloned()
            .collect();
        found.sort_by_key(|a| a.player);
        found
    }
}

impl DeckStore for InMemoryStore {
    fn deck(&self, key: DeckKey) -> Option<Deck> {
        self.decks.get(&key).cloned()
    }

    fn replace_deck(&mut self, key: DeckKey, deck: Deck) {
        self.decks.insert(key, deck);
    }
}

impl ActivationStore for InMemoryStore {
    fn activation(&self, key: ActivationKey) -> Option<Activation> {
        self.activations.get(&key).cloned()
    }

    fn compare_and_put(&mut self, activation: Activation, expected: Option<&Activation>) -> bool {
        let key = ActivationKey::of(&activation);
        if self.activations.get(&key) != expected {
            return false;
        }
        self.activations.insert(key, activation);
        true
    }

    fn remove_activation(&mut self, key: ActivationKey) -> Option<Activation> {
        self.activations.remove(&key)
    }

    fn is_card_used(&self, player: PlayerId, season: Season, card: CardId) -> bool {
        self.ledger.is_used(player, season, card)
    }

    fn mark_card_used(&mut self, player: PlayerId, season: Season, card: CardId) -> bool {
        self.ledger.mark_used(player, season, card)
    }
}
