//! Collaborator contracts.
//!
//! The engine never talks to storage, scrapers or the calendar itself.
//! These traits describe what it needs from them; `InMemoryStore` is a
//! complete implementation of the store side for tests and embedding.

mod memory;
mod batch;

pub use memory::InMemoryStore;
pub use batch::{score_league_races, ScoringReport};

use crate::activation::Activation;
use crate::cards::{Card, CardCatalog, CardId, CatalogError};
use crate::core::{LeagueId, PlayerId, RaceId, Season};
use crate::deck::Deck;
use crate::scoring::RaceResult;

/// Key of a deck: one per player, league and season.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeckKey {
    pub player: PlayerId,
    pub league: LeagueId,
    pub season: Season,
}

/// Key of an activation: one per player, league and race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivationKey {
    pub player: PlayerId,
    pub league: LeagueId,
    pub race: RaceId,
}

impl ActivationKey {
    #[must_use]
    pub fn of(activation: &Activation) -> Self {
        Self {
            player: activation.player,
            league: activation.league,
            race: activation.race,
        }
    }
}

/// Full card catalog; static within a season.
pub trait CatalogProvider {
    fn cards(&self) -> Vec<Card>;
}

/// Build the season catalog from a provider. Duplicate IDs are a data
/// error, not something to silently overwrite.
pub fn load_catalog(provider: &impl CatalogProvider) -> Result<CardCatalog, CatalogError> {
    CardCatalog::from_cards(provider.cards())
}

/// Ingested race results.
pub trait RaceResultProvider {
    /// `None` until the race has been ingested.
    fn race_result(&self, race: RaceId) -> Option<RaceResult>;
}

/// League rosters, for target checks and statistics scope.
pub trait MembershipProvider {
    fn members(&self, league: LeagueId) -> Vec<PlayerId>;
}

/// Deck persistence. Decks are replaced wholesale.
pub trait DeckStore {
    fn deck(&self, key: DeckKey) -> Option<Deck>;

    fn replace_deck(&mut self, key: DeckKey, deck: Deck);
}

/// Activation persistence and the used-card ledger.
pub trait ActivationStore {
    fn activation(&self, key: ActivationKey) -> Option<Activation>;

    /// Check-and-set: store `activation` only if the current record equals
    /// `expected`. Gives at-most-one-writer semantics per key.
    fn compare_and_put(&mut self, activation: Activation, expected: Option<&Activation>) -> bool;

    fn remove_activation(&mut self, key: ActivationKey) -> Option<Activation>;

    fn is_card_used(&self, player: PlayerId, season: Season, card: CardId) -> bool;

    /// Idempotent; returns `true` if newly marked.
    fn mark_card_used(&mut self, player: PlayerId, season: Season, card: CardId) -> bool;
}
