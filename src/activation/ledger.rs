//! Season ledger of used cards.
//!
//! Each card may be played once per season. The ledger records which
//! cards a player has burned, keyed by (player, season).
//!
//! Backed by persistent maps, so `snapshot()` is O(1) and an activation
//! check can run against a frozen view while the live ledger moves on.

use im::{OrdMap, OrdSet};

use crate::cards::CardId;
use crate::core::{PlayerId, Season};

/// Used-card ledger.
///
/// ## Example
///
/// ```
/// use power_cards::activation::UsedCardLedger;
/// use power_cards::cards::CardId;
/// use power_cards::core::PlayerId;
///
/// let mut ledger = UsedCardLedger::new();
/// let player = PlayerId::new(1);
///
/// assert!(ledger.mark_used(player, 2026, CardId::new(4)));
/// assert!(!ledger.mark_used(player, 2026, CardId::new(4))); // already there
/// assert!(ledger.is_used(player, 2026, CardId::new(4)));
/// assert!(!ledger.is_used(player, 2027, CardId::new(4)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsedCardLedger {
    used: OrdMap<(PlayerId, Season), OrdSet<CardId>>,
}

impl UsedCardLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_used(&self, player: PlayerId, season: Season, card: CardId) -> bool {
        self.used
            .get(&(player, season))
            .is_some_and(|cards| cards.contains(&card))
    }

    /// Record a card as used.
    ///
    /// Returns `true` if newly recorded. Marking an already-used card is
    /// a no-op, so retried commits never double-charge.
    pub fn mark_used(&mut self, player: PlayerId, season: Season, card: CardId) -> bool {
        let key = (player, season);
        let mut cards = self.used.get(&key).cloned().unwrap_or_default();
        let inserted = cards.insert(card).is_none();
        if inserted {
            self.used.insert(key, cards);
        }
        inserted
    }

    /// Cards a player has used in a season, in ID order.
    pub fn used_cards(&self, player: PlayerId, season: Season) -> impl Iterator<Item = CardId> + '_ {
        self.used
            .get(&(player, season))
            .into_iter()
            .flat_map(|cards| cards.iter().copied())
    }

    #[must_use]
    pub fn used_count(&self, player: PlayerId, season: Season) -> usize {
        self.used.get(&(player, season)).map_or(0, OrdSet::len)
    }

    /// Frozen view of the current ledger.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}
