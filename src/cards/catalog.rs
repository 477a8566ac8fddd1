//! Card catalog for definition lookup.
//!
//! The `CardCatalog` is process-wide read-only reference data: loaded
//! once per season, shared by every deck, activation and scoring pass.

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::definition::{Card, CardId, CardType, TargetRequirement};
use super::effect::CardEffect;

/// Catalog construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Two definitions share an ID.
    #[error("{0} is already registered")]
    DuplicateCard(CardId),

    /// Admin toggle on a card the catalog does not hold.
    #[error("{0} is not in the catalog")]
    UnknownCard(CardId),

    /// A definition that could never be scored.
    #[error("{card} has an invalid definition: {reason}")]
    InvalidDefinition {
        card: CardId,
        reason: DefinitionProblem,
    },
}

/// Why a card definition was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DefinitionProblem {
    #[error("slot cost must be positive")]
    ZeroSlotCost,

    #[error("mirror cards must target a player, found {0:?}")]
    MirrorWithoutPlayerTarget(TargetRequirement),

    #[error("mystery cards belong on the driver side")]
    MysteryNotDriver,

    #[error("random cards belong on the team side")]
    RandomNotTeam,
}

/// Reject definitions whose effect, side and target disagree.
///
/// Definitions can arrive through serde, which skips the `Card::new`
/// slot-cost bump.
fn check_definition(card: &Card) -> Result<(), DefinitionProblem> {
    if card.slot_cost == 0 {
        return Err(DefinitionProblem::ZeroSlotCost);
    }
    match card.effect {
        CardEffect::MirrorOpponent if card.requires_target != TargetRequirement::Player => Err(
            DefinitionProblem::MirrorWithoutPlayerTarget(card.requires_target),
        ),
        CardEffect::Mystery if card.card_type != CardType::Driver => {
            Err(DefinitionProblem::MysteryNotDriver)
        }
        CardEffect::Random if card.card_type != CardType::Team => {
            Err(DefinitionProblem::RandomNotTeam)
        }
        _ => Ok(()),
    }
}

/// Catalog of card definitions.
///
/// ## Example
///
/// ```
/// use power_cards::cards::{Card, CardCatalog, CardId, CardType, Tier};
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(Card::new(CardId::new(1), "Turbo", CardType::Driver, Tier::Gold, 3))
///     .unwrap();
///
/// assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Turbo");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: FxHashMap<CardId, Card>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a list of definitions.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Register a card definition.
    ///
    /// Fails on a duplicate ID or an incoherent definition.
    pub fn register(&mut self, card: Card) -> Result<(), CatalogError> {
        if self.cards.contains_key(&card.id) {
            return Err(CatalogError::DuplicateCard(card.id));
        }
        check_definition(&card).map_err(|reason| CatalogError::InvalidDefinition {
            card: card.id,
            reason,
        })?;
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Admin toggle. The only mutation a card ever sees.
    pub fn set_active(&mut self, id: CardId, active: bool) -> Result<(), CatalogError> {
        let card = self.cards.get_mut(&id).ok_or(CatalogError::UnknownCard(id))?;
        card.is_active = active;
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions (unordered).
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Cards of one type, sorted by ID.
    ///
    /// Sorted so draws over the result are reproducible for a given seed.
    #[must_use]
    pub fn cards_of_type(&self, card_type: CardType) -> Vec<&Card> {
        let mut cards: Vec<&Card> = self
            .cards
            .values()
            .filter(|c| c.card_type == card_type)
            .collect();
        cards.sort_by_key(|c| c.id);
        cards
    }
}
