//! League statistics: a pure fold over scored selections.
//!
//! Nothing here is stored or updated in place. Given the same selections
//! (in any order) `aggregate` returns identical statistics.

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::core::{DriverId, LeagueId, PlayerId, RaceId, RatingScales};
use crate::error::ErrorKind;
use crate::scoring::ScoredSelection;

use super::head_to_head::HeadToHeadRecord;
use super::ratings::{comeback_rating, consistency_rating, mean, population_std_dev};

/// Malformed input for one player's aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatsError {
    #[error("{player} has a {race} selection from {found}")]
    ForeignLeague {
        player: PlayerId,
        race: RaceId,
        found: LeagueId,
    },

    #[error("{player} has non-finite points for {race}")]
    NonFinitePoints { player: PlayerId, race: RaceId },

    #[error("{player} has more than one selection for {race}")]
    DuplicateSelection { player: PlayerId, race: RaceId },
}

impl StatsError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::DataIntegrity
    }

    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            Self::ForeignLeague { player, .. }
            | Self::NonFinitePoints { player, .. }
            | Self::DuplicateSelection { player, .. } => *player,
        }
    }
}

/// Below-average races and what followed them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryStats {
    /// Races strictly below the player's own average.
    pub below_average_races: u32,
    /// Below-average races immediately followed by an above-average one.
    pub successful_recoveries: u32,
    /// Mean of (next race points - average) over successful recoveries.
    pub average_recovery_points: f64,
}

/// Per-player statistics within a league.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LeagueStatistics {
    pub player: PlayerId,
    pub league: LeagueId,
    pub total_points: f64,
    pub races_participated: u32,
    pub average_points_per_race: f64,
    pub highest_points_in_race: f64,
    pub highest_points_race: Option<RaceId>,
    /// Mean ratio of the player's points to the average of everyone who
    /// picked the same main driver that race. 1.0 is par.
    pub success_rate: f64,
    pub points_standard_deviation: f64,
    pub consistency_rating: f64,
    pub recovery: RecoveryStats,
    pub comeback_rating: f64,
    pub cards_played: u32,
    /// Sum of (final - base) points.
    pub card_points_gained: f64,
    /// Sorted by opponent.
    pub head_to_head: Vec<HeadToHeadRecord>,
}

impl LeagueStatistics {
    #[must_use]
    pub fn against(&self, opponent: PlayerId) -> Option<&HeadToHeadRecord> {
        self.head_to_head.iter().find(|r| r.opponent == opponent)
    }
}

/// Result of one aggregation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LeagueAggregate {
    pub league: LeagueId,
    /// One entry per valid player, sorted by player.
    pub statistics: Vec<LeagueStatistics>,
    /// Players whose input was malformed. They get no statistics and their
    /// selections are left out of everyone else's.
    pub rejected: Vec<StatsError>,
}

impl LeagueAggregate {
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&LeagueStatistics> {
        self.statistics.iter().find(|s| s.player == player)
    }
}

/// Compute statistics for every player appearing in `selections`.
pub fn aggregate(
    league: LeagueId,
    selections: &[ScoredSelection],
    scales: &RatingScales,
) -> LeagueAggregate {
    let (valid, rejected) = partition_valid(league, selections);

    // Per (race, main driver): sum and count of final points.
    let mut driver_pools: FxHashMap<(RaceId, DriverId), (f64, u32)> = FxHashMap::default();
    // Per race: every player's final points.
    let mut race_points: FxHashMap<RaceId, Vec<(PlayerId, f64)>> = FxHashMap::default();
    let mut by_player: BTreeMap<PlayerId, Vec<&ScoredSelection>> = BTreeMap::new();

    for &s in &valid {
        let pool = driver_pools.entry((s.race, s.main_driver)).or_insert((0.0, 0));
        pool.0 += s.final_points;
        pool.1 += 1;
        race_points.entry(s.race).or_default().push((s.player, s.final_points));
        by_player.entry(s.player).or_default().push(s);
    }

    let statistics: Vec<LeagueStatistics> = by_player
        .into_iter()
        .map(|(player, rows)| player_statistics(league, player, &rows, &driver_pools, &race_points, scales))
        .collect();

    info!(
        league = %league,
        players = statistics.len(),
        rejected = rejected.len(),
        "league statistics aggregated"
    );

    LeagueAggregate {
        league,
        statistics,
        rejected,
    }
}

/// Split off malformed rows. A player with any malformed row is rejected
/// entirely. Valid rows come back sorted by (round, race, player).
fn partition_valid(
    league: LeagueId,
    selections: &[ScoredSelection],
) -> (Vec<&ScoredSelection>, Vec<StatsError>) {
    let mut rejected: BTreeMap<PlayerId, StatsError> = BTreeMap::new();
    let mut seen = FxHashSet::default();

    for s in selections {
        let error = if s.league != league {
            Some(StatsError::ForeignLeague {
                player: s.player,
                race: s.race,
                found: s.league,
            })
        } else if !s.final_points.is_finite() || !s.base_points.is_finite() {
            Some(StatsError::NonFinitePoints {
                player: s.player,
                race: s.race,
            })
        } else if !seen.insert((s.player, s.race)) {
            Some(StatsError::DuplicateSelection {
                player: s.player,
                race: s.race,
            })
        } else {
            None
        };

        if let Some(error) = error {
            warn!(%error, "selection rejected from statistics");
            rejected.entry(s.player).or_insert(error);
        }
    }

    let mut valid: Vec<&ScoredSelection> = selections
        .iter()
        .filter(|s| !rejected.contains_key(&s.player))
        .collect();
    valid.sort_by_key(|s| (s.round, s.race, s.player));

    (valid, rejected.into_values().collect())
}

fn player_statistics(
    league: LeagueId,
    player: PlayerId,
    rows: &[&ScoredSelection],
    driver_pools: &FxHashMap<(RaceId, DriverId), (f64, u32)>,
    race_points: &FxHashMap<RaceId, Vec<(PlayerId, f64)>>,
    scales: &RatingScales,
) -> LeagueStatistics {
    let points: Vec<f64> = rows.iter().map(|s| s.final_points).collect();
    let races = points.len();

    let total_points: f64 = points.iter().sum();
    let average = mean(&points);
    let std_dev = population_std_dev(&points);

    let mut highest: Option<(f64, RaceId)> = None;
    for s in rows {
        if highest.map_or(true, |(best, _)| s.final_points > best) {
            highest = Some((s.final_points, s.race));
        }
    }

    let success_ratios: Vec<f64> = rows
        .iter()
        .map(|s| match driver_pools.get(&(s.race, s.main_driver)) {
            Some(&(sum, count)) if count > 0 && sum != 0.0 => s.final_points / (sum / f64::from(count)),
            _ => 0.0,
        })
        .collect();

    let recovery = recovery_stats(&points, average);

    let mut head_to_head: BTreeMap<PlayerId, HeadToHeadRecord> = BTreeMap::new();
    for s in rows {
        let Some(entries) = race_points.get(&s.race) else {
            continue;
        };
        for &(opponent, opponent_points) in entries {
            if opponent != player {
                head_to_head
                    .entry(opponent)
                    .or_insert_with(|| HeadToHeadRecord::new(opponent))
                    .record(s.final_points, opponent_points);
            }
        }
    }

    LeagueStatistics {
        player,
        league,
        total_points,
        races_participated: races as u32,
        average_points_per_race: average,
        highest_points_in_race: highest.map_or(0.0, |(p, _)| p),
        highest_points_race: highest.map(|(_, race)| race),
        success_rate: mean(&success_ratios),
        points_standard_deviation: std_dev,
        consistency_rating: consistency_rating(average, std_dev, races, scales),
        comeback_rating: comeback_rating(
            recovery.below_average_races,
            recovery.successful_recoveries,
            recovery.average_recovery_points,
            average,
            scales,
        ),
        recovery,
        cards_played: rows.iter().map(|s| s.cards.len() as u32).sum(),
        card_points_gained: rows.iter().map(|s| s.card_gain()).sum(),
        head_to_head: head_to_head.into_values().collect(),
    }
}

fn recovery_stats(points: &[f64], average: f64) -> RecoveryStats {
    let mut stats = RecoveryStats::default();
    let mut recovered_total = 0.0;

    for (i, &p) in points.iter().enumerate() {
        if p >= average {
            continue;
        }
        stats.below_average_races += 1;
        if let Some(&next) = points.get(i + 1) {
            if next > average {
                stats.successful_recoveries += 1;
                recovered_total += next - average;
            }
        }
    }

    if stats.successful_recoveries > 0 {
        stats.average_recovery_points = recovered_total / f64::from(stats.successful_recoveries);
    }
    stats
}
