//! Card definitions - static catalog data.
//!
//! A `Card` is immutable reference data. The only field an admin may
//! change after creation is `is_active`, and that goes through
//! `CardCatalog::set_active`.

use serde::{Deserialize, Serialize};

use super::effect::CardEffect;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Which deck side a card belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Driver,
    Team,
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardType::Driver => write!(f, "driver"),
            CardType::Team => write!(f, "team"),
        }
    }
}

/// Card rarity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Gold,
    Silver,
    Bronze,
}

/// What the player must name when activating the card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRequirement {
    #[default]
    None,
    Player,
    Driver,
    Team,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use power_cards::cards::{Card, CardEffect, CardId, CardType, Tier};
///
/// let boost = Card::new(CardId::new(1), "Turbo", CardType::Driver, Tier::Gold, 3)
///     .with_effect(CardEffect::multiplier(2.0));
///
/// assert_eq!(boost.slot_cost, 3);
/// assert!(boost.is_active);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub card_type: CardType,
    pub tier: Tier,
    /// Deck slots consumed. Always positive.
    pub slot_cost: u32,
    pub effect: CardEffect,
    pub requires_target: TargetRequirement,
    pub is_active: bool,
}

impl Card {
    /// Create an active card with no effect and no target requirement.
    ///
    /// A zero `slot_cost` is bumped to 1.
    #[must_use]
    pub fn new(
        id: CardId,
        name: impl Into<String>,
        card_type: CardType,
        tier: Tier,
        slot_cost: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            tier,
            slot_cost: slot_cost.max(1),
            effect: CardEffect::FlatBonus {
                points: 0.0,
                floor: None,
            },
            requires_target: TargetRequirement::None,
            is_active: true,
        }
    }

    /// Set the effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: CardEffect) -> Self {
        self.effect = effect;
        self
    }

    /// Set the target requirement.
    #[must_use]
    pub fn with_target(mut self, requirement: TargetRequirement) -> Self {
        self.requires_target = requirement;
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    #[must_use]
    pub fn is_gold(&self) -> bool {
        self.tier == Tier::Gold
    }

    /// Mystery/Random cards resolve to another card at activation.
    #[must_use]
    pub fn is_transformer(&self) -> bool {
        self.effect.is_transformer()
    }

    #[must_use]
    pub fn requires_target(&self) -> bool {
        self.requires_target != TargetRequirement::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_card_builder() {
        let card = Card::new(CardId::new(1), "Spy", CardType::Driver, Tier::Silver, 2)
            .with_effect(CardEffect::MirrorOpponent)
            .with_target(TargetRequirement::Player);

        assert_eq!(card.name, "Spy");
        assert!(!card.is_gold());
        assert!(card.requires_target());
        assert!(!card.is_transformer());
    }

    #[test]
    fn test_zero_slot_cost_is_bumped() {
        let card = Card::new(CardId::new(1), "Free", CardType::Team, Tier::Bronze, 0);
        assert_eq!(card.slot_cost, 1);
    }

    #[test]
    fn test_card_serialization() {
        let card = Card::new(CardId::new(5), "Wildcard", CardType::Team, Tier::Gold, 4)
            .with_effect(CardEffect::Random);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
        assert!(deserialized.is_transformer());
    }
}
