//! Engine configuration.
//!
//! Every tunable rule of the game lives here rather than in the
//! components that enforce it:
//! - `DeckRules`: slot budgets, card counts and gold limits per side
//! - `PointsTable`: race points by finishing position (used by rank-shift)
//! - `RatingScales`: the mappings behind consistency and comeback ratings
//! - `EngineConfig`: combines the above with lock offsets and eligibility
//!
//! All types deserialize with defaults, so a partial JSON document only
//! needs to name the values it overrides.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::ids::Season;

/// Limits for one side (driver or team) of a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRules {
    /// Exact number of slots the side must fill.
    pub slot_budget: u32,
    /// Maximum number of distinct cards.
    pub max_cards: usize,
    /// Maximum number of gold-tier cards.
    pub max_gold: usize,
}

impl SideRules {
    #[must_use]
    pub const fn new(slot_budget: u32, max_cards: usize, max_gold: usize) -> Self {
        Self {
            slot_budget,
            max_cards,
            max_gold,
        }
    }
}

/// Deck construction rules for both sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckRules {
    pub driver: SideRules,
    pub team: SideRules,
}

impl Default for DeckRules {
    fn default() -> Self {
        Self {
            driver: SideRules::new(12, 8, 2),
            team: SideRules::new(10, 6, 1),
        }
    }
}

/// Race points awarded by finishing position.
///
/// Positions past the end of the table score zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointsTable {
    points: Vec<f64>,
}

impl PointsTable {
    pub fn new(points: impl IntoIterator<Item = f64>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Points for a 1-based finishing position.
    #[must_use]
    pub fn points_for(&self, position: u32) -> f64 {
        if position == 0 {
            return 0.0;
        }
        self.points
            .get(position as usize - 1)
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of point-scoring positions.
    #[must_use]
    pub fn scoring_positions(&self) -> usize {
        self.points.len()
    }
}

impl Default for PointsTable {
    fn default() -> Self {
        Self::new([25.0, 18.0, 15.0, 12.0, 10.0, 8.0, 6.0, 4.0, 2.0, 1.0])
    }
}

/// Scales for the 0-10 ratings.
///
/// Only the clamp and the monotonic direction are contractual; these
/// constants tune how quickly ratings saturate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingScales {
    /// Coefficient of variation at (or above) which consistency hits 0.
    pub consistency_cv_ceiling: f64,
    /// Weight of the recovery rate in the comeback rating (rest goes to magnitude).
    pub comeback_rate_weight: f64,
    /// Recovery magnitude, relative to the average, that saturates the magnitude term.
    pub comeback_magnitude_ceiling: f64,
}

impl Default for RatingScales {
    fn default() -> Self {
        Self {
            consistency_cv_ceiling: 1.0,
            comeback_rate_weight: 0.5,
            comeback_magnitude_ceiling: 0.5,
        }
    }
}

/// Top-level engine configuration.
///
/// ## Example
///
/// ```
/// use power_cards::core::EngineConfig;
///
/// let config = EngineConfig::from_json(r#"{ "first_card_season": 2027 }"#).unwrap();
/// assert_eq!(config.first_card_season, 2027);
/// assert_eq!(config.deck.driver.slot_budget, 12);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub deck: DeckRules,
    /// Minutes before the locking session at which decks/activations freeze.
    pub lock_offset_minutes: i64,
    /// First season in which power cards can be activated.
    pub first_card_season: Season,
    pub points: PointsTable,
    pub ratings: RatingScales,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            deck: DeckRules::default(),
            lock_offset_minutes: 5,
            first_card_season: 2026,
            points: PointsTable::default(),
            ratings: RatingScales::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[must_use]
    pub fn lock_offset(&self) -> Duration {
        Duration::minutes(self.lock_offset_minutes)
    }

    #[must_use]
    pub fn with_deck_rules(mut self, deck: DeckRules) -> Self {
        self.deck = deck;
        self
    }

    #[must_use]
    pub fn with_lock_offset_minutes(mut self, minutes: i64) -> Self {
        self.lock_offset_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_first_card_season(mut self, season: Season) -> Self {
        self.first_card_season = season;
        self
    }

    #[must_use]
    pub fn with_points_table(mut self, points: PointsTable) -> Self {
        self.points = points;
        self
    }

    #[must_use]
    pub fn with_rating_scales(mut self, ratings: RatingScales) -> Self {
        self.ratings = ratings;
        self
    }
}
