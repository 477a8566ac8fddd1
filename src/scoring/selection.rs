//! Player selections and their scored form.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardId, CardType};
use crate::core::{DriverId, LeagueId, PlayerId, RaceId, TeamId};

/// A player's driver/team picks for one race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub player: PlayerId,
    pub league: LeagueId,
    pub race: RaceId,
    pub main_driver: DriverId,
    pub reserve_driver: DriverId,
    pub team: TeamId,
}

impl Selection {
    pub fn new(
        player: PlayerId,
        league: LeagueId,
        race: RaceId,
        main_driver: DriverId,
        reserve_driver: DriverId,
        team: TeamId,
    ) -> Self {
        Self {
            player,
            league,
            race,
            main_driver,
            reserve_driver,
            team,
        }
    }

    /// Whether the driver is the main or reserve pick.
    #[must_use]
    pub fn has_driver(&self, driver: DriverId) -> bool {
        self.main_driver == driver || self.reserve_driver == driver
    }
}

/// One card effect as it was applied to the running total.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedCard {
    pub side: CardType,
    /// The card the player chose.
    pub card: CardId,
    /// The card whose effect ran (differs for Mystery/Random).
    pub effective_card: CardId,
    pub points_before: f64,
    pub points_after: f64,
}

impl AppliedCard {
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.points_after - self.points_before
    }
}

/// A selection with its base and final points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredSelection {
    pub player: PlayerId,
    pub league: LeagueId,
    pub race: RaceId,
    /// Calendar round, used to order races.
    pub round: u32,
    pub main_driver: DriverId,
    pub reserve_driver: DriverId,
    pub team: TeamId,
    /// Main race points credited to the driver pick.
    pub driver_points: f64,
    /// Set when a DNS main driver was replaced by the reserve.
    pub reserve_substituted: bool,
    /// Reserve sprint points (sprint weekends only).
    pub reserve_points: f64,
    pub team_points: f64,
    /// Total before card effects.
    pub base_points: f64,
    /// Total after card effects.
    pub final_points: f64,
    /// Effects in application order (driver side first).
    pub cards: SmallVec<[AppliedCard; 2]>,
}

impl ScoredSelection {
    /// Points gained (or lost) through cards.
    #[must_use]
    pub fn card_gain(&self) -> f64 {
        self.final_points - self.base_points
    }
}
