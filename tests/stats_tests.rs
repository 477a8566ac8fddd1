//! League statistics tests.
//!
//! These tests aggregate scored selections into per-player statistics:
//! - Totals, averages, spread and ratings
//! - Head-to-head records
//! - Success rate against same-driver pickers
//! - Rejection of malformed rows
//! - Idempotence and order independence

use smallvec::smallvec;

use power_cards::cards::{CardId, CardType};
use power_cards::core::{DriverId, LeagueId, PlayerId, RaceId, RatingScales, TeamId};
use power_cards::scoring::{AppliedCard, ScoredSelection};
use power_cards::stats::{aggregate, StatsError};

const LEAGUE: LeagueId = LeagueId(1);
const EPS: f64 = 1e-3;

fn scored(player: u32, race: u32, main_driver: u32, points: f64) -> ScoredSelection {
    ScoredSelection {
        player: PlayerId::new(player),
        league: LEAGUE,
        race: RaceId::new(race),
        round: race,
        main_driver: DriverId::new(main_driver),
        reserve_driver: DriverId::new(20),
        team: TeamId::new(1),
        driver_points: points,
        reserve_substituted: false,
        reserve_points: 0.0,
        team_points: 0.0,
        base_points: points,
        final_points: points,
        cards: smallvec![],
    }
}

/// Player 1 scores 25, 15, 30; player 2 scores 18, 20, 22. Both pick
/// driver 1 in race 1 only.
fn season() -> Vec<ScoredSelection> {
    vec![
        scored(1, 1, 1, 25.0),
        scored(1, 2, 2, 15.0),
        scored(1, 3, 3, 30.0),
        scored(2, 1, 1, 18.0),
        scored(2, 2, 4, 20.0),
        scored(2, 3, 5, 22.0),
    ]
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

// =============================================================================
// Per-player figures
// =============================================================================

#[test]
fn test_player_totals_and_spread() {
    let agg = aggregate(LEAGUE, &season(), &RatingScales::default());
    let stats = agg.get(PlayerId::new(1)).unwrap();

    assert_eq!(stats.total_points, 70.0);
    assert_eq!(stats.races_participated, 3);
    assert!(approx(stats.average_points_per_race, 23.333));
    assert_eq!(stats.highest_points_in_race, 30.0);
    assert_eq!(stats.highest_points_race, Some(RaceId::new(3)));

    // Population standard deviation.
    assert!(approx(stats.points_standard_deviation, 6.2361));
    assert!(approx(stats.consistency_rating, 7.3274));
}

/// 15 is the only below-average race and 30 follows it.
#[test]
fn test_recovery_and_comeback() {
    let agg = aggregate(LEAGUE, &season(), &RatingScales::default());
    let stats = agg.get(PlayerId::new(1)).unwrap();

    assert_eq!(stats.recovery.below_average_races, 1);
    assert_eq!(stats.recovery.successful_recoveries, 1);
    assert!(approx(stats.recovery.average_recovery_points, 6.667));
    assert!(approx(stats.comeback_rating, 7.857));
}

#[test]
fn test_head_to_head() {
    let agg = aggregate(LEAGUE, &season(), &RatingScales::default());
    let record = agg
        .get(PlayerId::new(1))
        .unwrap()
        .against(PlayerId::new(2))
        .unwrap();

    assert_eq!(record.races_compared, 3);
    assert_eq!(record.wins, 2);
    assert_eq!(record.losses, 1);
    assert_eq!(record.total_points, 70.0);
    assert_eq!(record.opponent_total_points, 60.0);
    assert_eq!(record.points_difference, 10.0);
    assert!(approx(record.average_points_difference, 3.333));
    assert_eq!(record.best_race_difference, 8.0);
    assert_eq!(record.worst_race_difference, -5.0);

    let mirror = agg
        .get(PlayerId::new(2))
        .unwrap()
        .against(PlayerId::new(1))
        .unwrap();
    assert_eq!(mirror.wins, 1);
    assert_eq!(mirror.points_difference, -10.0);
}

/// Only race 1 has a shared driver; the other races are par.
#[test]
fn test_success_rate_against_same_driver() {
    let agg = aggregate(LEAGUE, &season(), &RatingScales::default());

    let p1 = agg.get(PlayerId::new(1)).unwrap().success_rate;
    let p2 = agg.get(PlayerId::new(2)).unwrap().success_rate;

    assert!(approx(p1, (25.0 / 21.5 + 2.0) / 3.0));
    assert!(approx(p2, (18.0 / 21.5 + 2.0) / 3.0));
    assert!(p1 > 1.0 && p2 < 1.0);
}

#[test]
fn test_card_contribution() {
    let mut rows = season();
    rows[2].base_points = 20.0;
    rows[2].cards = smallvec![AppliedCard {
        side: CardType::Driver,
        card: CardId::new(3),
        effective_card: CardId::new(3),
        points_before: 20.0,
        points_after: 30.0,
    }];

    let agg = aggregate(LEAGUE, &rows, &RatingScales::default());
    let stats = agg.get(PlayerId::new(1)).unwrap();
    assert_eq!(stats.cards_played, 1);
    assert_eq!(stats.card_points_gained, 10.0);
    assert_eq!(agg.get(PlayerId::new(2)).unwrap().cards_played, 0);
}

// =============================================================================
// Malformed input
// =============================================================================

/// A player with a bad row is dropped entirely and vanishes from
/// everyone else's head-to-head.
#[test]
fn test_malformed_player_rejected() {
    let mut rows = season();
    rows.push(scored(3, 1, 1, 12.0));
    rows.push(scored(3, 2, 6, f64::NAN));
    let mut foreign = scored(4, 1, 9, 10.0);
    foreign.league = LeagueId::new(2);
    rows.push(foreign);

    let agg = aggregate(LEAGUE, &rows, &RatingScales::default());

    assert_eq!(agg.statistics.len(), 2);
    assert!(agg.get(PlayerId::new(3)).is_none());
    assert!(agg.get(PlayerId::new(1)).unwrap().against(PlayerId::new(3)).is_none());
    assert_eq!(
        agg.rejected,
        vec![
            StatsError::NonFinitePoints {
                player: PlayerId::new(3),
                race: RaceId::new(2),
            },
            StatsError::ForeignLeague {
                player: PlayerId::new(4),
                race: RaceId::new(1),
                found: LeagueId::new(2),
            },
        ]
    );

    // Player 3's race 1 row must not dilute the driver 1 pool.
    let clean = aggregate(LEAGUE, &season(), &RatingScales::default());
    assert_eq!(agg.get(PlayerId::new(1)), clean.get(PlayerId::new(1)));
}

#[test]
fn test_duplicate_selection_rejected() {
    let mut rows = season();
    rows.push(scored(2, 3, 5, 22.0));

    let agg = aggregate(LEAGUE, &rows, &RatingScales::default());
    assert!(agg.get(PlayerId::new(2)).is_none());
    assert_eq!(
        agg.rejected,
        vec![StatsError::DuplicateSelection {
            player: PlayerId::new(2),
            race: RaceId::new(3),
        }]
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_aggregate_is_idempotent_and_order_independent() {
    let scales = RatingScales::default();
    let forward = season();
    let mut reversed = season();
    reversed.reverse();

    let first = aggregate(LEAGUE, &forward, &scales);
    let again = aggregate(LEAGUE, &forward, &scales);
    let shuffled = aggregate(LEAGUE, &reversed, &scales);

    assert_eq!(first, again);
    assert_eq!(first, shuffled);
}

#[test]
fn test_empty_league() {
    let agg = aggregate(LEAGUE, &[], &RatingScales::default());
    assert!(agg.statistics.is_empty());
    assert!(agg.rejected.is_empty());
}
