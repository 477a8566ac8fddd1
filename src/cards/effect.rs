//! Card effect definitions.
//!
//! Every effect kind is one variant of `CardEffect`, so the scoring
//! engine matches exhaustively and a new kind cannot be added without
//! handling it there.
//!
//! Effects transform a *running total*: the scoring engine feeds the
//! current points in and takes the returned points out. Effects are not
//! commutative, which is why the engine fixes driver-before-team order.

use serde::{Deserialize, Serialize};

/// A card's effect on race points.
///
/// ## Arithmetic
///
/// - `Multiplier`: scale the running total
/// - `FlatBonus`: add to the running total
///
/// Both accept an optional floor. Without one the result may go
/// negative.
///
/// ## Race-aware
///
/// - `RankShift`: rescore as if finishing `positions` places better
///   (negative is worse), clamped to the field
/// - `MirrorOpponent`: take the targeted player's base total for the race
///
/// ## Transformers
///
/// - `Mystery` (driver side) and `Random` (team side) carry no effect of
///   their own. Activation draws a concrete card and scoring uses that
///   card's effect instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardEffect {
    Multiplier {
        factor: f64,
        #[serde(default)]
        floor: Option<f64>,
    },

    FlatBonus {
        points: f64,
        #[serde(default)]
        floor: Option<f64>,
    },

    RankShift {
        positions: i32,
    },

    MirrorOpponent,

    Mystery,

    Random,
}

impl CardEffect {
    /// Scale points by `factor`.
    pub fn multiplier(factor: f64) -> Self {
        Self::Multiplier { factor, floor: None }
    }

    /// Add `points` (may be negative).
    pub fn flat_bonus(points: f64) -> Self {
        Self::FlatBonus { points, floor: None }
    }

    /// Finish `positions` places better.
    pub fn rank_shift(positions: i32) -> Self {
        Self::RankShift { positions }
    }

    /// Attach a floor to an arithmetic effect. Other kinds are returned unchanged.
    #[must_use]
    pub fn with_floor(self, min: f64) -> Self {
        match self {
            Self::Multiplier { factor, .. } => Self::Multiplier {
                factor,
                floor: Some(min),
            },
            Self::FlatBonus { points, .. } => Self::FlatBonus {
                points,
                floor: Some(min),
            },
            other => other,
        }
    }

    #[must_use]
    pub fn is_transformer(&self) -> bool {
        matches!(self, Self::Mystery | Self::Random)
    }

    /// Apply an arithmetic effect to a running total.
    ///
    /// Returns `None` for effects that need race context.
    #[must_use]
    pub fn apply_arithmetic(&self, total: f64) -> Option<f64> {
        match self {
            Self::Multiplier { factor, floor } => Some(apply_floor(total * factor, *floor)),
            Self::FlatBonus { points, floor } => Some(apply_floor(total + points, *floor)),
            Self::RankShift { .. } | Self::MirrorOpponent | Self::Mystery | Self::Random => None,
        }
    }
}

fn apply_floor(value: f64, floor: Option<f64>) -> f64 {
    match floor {
        Some(min) => value.max(min),
        None => value,
    }
}
