//! Race scoring tests.
//!
//! These tests run full race results through the `ScoringEngine`:
//! - Base points (reserve substitution, DNF, sprint weekends)
//! - Card effect order and each effect kind
//! - Whole-race scoring with mirror cards
//! - Incomplete or mismatched inputs

use power_cards::activation::{ActivatedCard, Activation, Target};
use power_cards::cards::{Card, CardCatalog, CardEffect, CardId, CardType, TargetRequirement, Tier};
use power_cards::core::{DriverId, EngineConfig, LeagueId, PlayerId, RaceId, TeamId, WeekendType};
use power_cards::error::ErrorKind;
use power_cards::scoring::{
    FinishStatus, MissingEntry, PeerTotals, RaceResult, ScoringEngine, ScoringError, Selection,
    SessionResult,
};

const LEAGUE: LeagueId = LeagueId(1);
const RACE: RaceId = RaceId(1);

fn catalog() -> CardCatalog {
    CardCatalog::from_cards([
        Card::new(CardId::new(1), "Mystery", CardType::Driver, Tier::Gold, 2)
            .with_effect(CardEffect::Mystery),
        Card::new(CardId::new(2), "Double", CardType::Driver, Tier::Silver, 3)
            .with_effect(CardEffect::multiplier(2.0)),
        Card::new(CardId::new(3), "Bonus", CardType::Driver, Tier::Bronze, 2)
            .with_effect(CardEffect::flat_bonus(5.0)),
        Card::new(CardId::new(4), "Overtake", CardType::Driver, Tier::Silver, 2)
            .with_effect(CardEffect::rank_shift(3)),
        Card::new(CardId::new(5), "Mirror", CardType::Driver, Tier::Gold, 3)
            .with_effect(CardEffect::MirrorOpponent)
            .with_target(TargetRequirement::Player),
        Card::new(CardId::new(11), "Team bonus", CardType::Team, Tier::Bronze, 3)
            .with_effect(CardEffect::flat_bonus(5.0)),
        Card::new(CardId::new(12), "Team double", CardType::Team, Tier::Silver, 3)
            .with_effect(CardEffect::multiplier(2.0)),
        Card::new(CardId::new(13), "Team climb", CardType::Team, Tier::Silver, 3)
            .with_effect(CardEffect::rank_shift(1)),
    ])
    .unwrap()
}

/// Drivers 1-6 across teams 1-3. Driver 4 did not start, driver 5 retired.
fn normal_result() -> RaceResult {
    RaceResult::new(RACE, 1, WeekendType::Normal)
        .with_driver(DriverId::new(1), TeamId::new(1), SessionResult::finished(1, 25.0))
        .with_driver(DriverId::new(2), TeamId::new(2), SessionResult::finished(2, 18.0))
        .with_driver(DriverId::new(3), TeamId::new(1), SessionResult::finished(3, 15.0))
        .with_driver(DriverId::new(6), TeamId::new(3), SessionResult::finished(4, 12.0))
        .with_driver(DriverId::new(4), TeamId::new(2), SessionResult::retired(FinishStatus::Dns))
        .with_driver(DriverId::new(5), TeamId::new(3), SessionResult::retired(FinishStatus::Dnf))
        .with_team(TeamId::new(1), 40.0)
        .with_team(TeamId::new(2), 18.0)
        .with_team(TeamId::new(3), 12.0)
}

fn selection(player: u32, main: u32, reserve: u32, team: u32) -> Selection {
    Selection::new(
        PlayerId::new(player),
        LEAGUE,
        RACE,
        DriverId::new(main),
        DriverId::new(reserve),
        TeamId::new(team),
    )
}

fn played(card: u32) -> ActivatedCard {
    ActivatedCard {
        card: CardId::new(card),
        target: None,
        transformed: None,
    }
}

fn activation(player: u32, driver: Option<ActivatedCard>, team: Option<ActivatedCard>) -> Activation {
    Activation {
        player: PlayerId::new(player),
        league: LEAGUE,
        race: RACE,
        season: 2026,
        driver,
        team,
    }
}

// =============================================================================
// Base points
// =============================================================================

/// A main driver who did not start is replaced by the reserve.
#[test]
fn test_dns_main_driver_uses_reserve() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let scored = engine
        .score(&selection(1, 4, 3, 3), &normal_result(), None, &PeerTotals::new())
        .unwrap();

    assert!(scored.reserve_substituted);
    assert_eq!(scored.driver_points, 15.0);
    assert_eq!(scored.team_points, 12.0);
    assert_eq!(scored.base_points, 27.0);
    assert_eq!(scored.final_points, 27.0);
}

/// A retirement scores zero and the reserve does not step in.
#[test]
fn test_dnf_scores_zero_without_substitution() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let scored = engine
        .score(&selection(1, 5, 1, 3), &normal_result(), None, &PeerTotals::new())
        .unwrap();

    assert!(!scored.reserve_substituted);
    assert_eq!(scored.driver_points, 0.0);
    assert_eq!(scored.base_points, 12.0);
}

/// Sprint weekends add reserve sprint points and team sprint points, and
/// ignore any activation.
#[test]
fn test_sprint_weekend_base_and_no_cards() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let result = RaceResult::new(RACE, 4, WeekendType::Sprint)
        .with_sprint_driver(
            DriverId::new(1),
            TeamId::new(1),
            SessionResult::finished(1, 25.0),
            SessionResult::finished(2, 7.0),
        )
        .with_sprint_driver(
            DriverId::new(2),
            TeamId::new(2),
            SessionResult::finished(2, 18.0),
            SessionResult::finished(1, 8.0),
        )
        .with_sprint_team(TeamId::new(1), 40.0, 15.0)
        .with_sprint_team(TeamId::new(2), 18.0, 8.0);

    let stray = activation(1, Some(played(2)), None);
    let scored = engine
        .score(&selection(1, 1, 2, 1), &result, Some(&stray), &PeerTotals::new())
        .unwrap();

    assert_eq!(scored.driver_points, 25.0);
    assert_eq!(scored.reserve_points, 8.0);
    assert_eq!(scored.team_points, 55.0);
    assert_eq!(scored.base_points, 88.0);
    assert_eq!(scored.final_points, 88.0);
    assert!(scored.cards.is_empty());
    assert_eq!(scored.round, 4);
}

/// A sprint weekend missing the team's sprint points is not scored.
#[test]
fn test_sprint_weekend_missing_team_sprint() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let result = RaceResult::new(RACE, 4, WeekendType::Sprint)
        .with_sprint_driver(
            DriverId::new(1),
            TeamId::new(1),
            SessionResult::finished(1, 25.0),
            SessionResult::finished(2, 7.0),
        )
        .with_team(TeamId::new(1), 40.0);

    let err = engine
        .score(&selection(1, 1, 1, 1), &result, None, &PeerTotals::new())
        .unwrap_err();
    assert_eq!(
        err,
        ScoringError::IncompleteRaceResult {
            race: RACE,
            missing: MissingEntry::TeamSprint(TeamId::new(1)),
        }
    );
}

// =============================================================================
// Effect order
// =============================================================================

/// Base 10 (8 driver + 2 team). Driver card always runs first, so
/// +5 then x2 is 30 while x2 then +5 is 25.
#[test]
fn test_driver_card_applies_before_team_card() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let result = RaceResult::new(RACE, 1, WeekendType::Normal)
        .with_driver(DriverId::new(1), TeamId::new(1), SessionResult::finished(6, 8.0))
        .with_team(TeamId::new(1), 2.0);
    let sel = selection(1, 1, 1, 1);

    let bonus_then_double = activation(1, Some(played(3)), Some(played(12)));
    let scored = engine
        .score(&sel, &result, Some(&bonus_then_double), &PeerTotals::new())
        .unwrap();
    assert_eq!(scored.base_points, 10.0);
    assert_eq!(scored.final_points, 30.0);
    assert_eq!(scored.cards.len(), 2);
    assert_eq!(scored.cards[0].side, CardType::Driver);
    assert_eq!(scored.cards[0].points_after, 15.0);
    assert_eq!(scored.cards[1].gain(), 15.0);

    let double_then_bonus = activation(1, Some(played(2)), Some(played(11)));
    let scored = engine
        .score(&sel, &result, Some(&double_then_bonus), &PeerTotals::new())
        .unwrap();
    assert_eq!(scored.final_points, 25.0);
    assert_eq!(scored.card_gain(), 15.0);
}

/// A transformed card scores with the effect it turned into.
#[test]
fn test_transformed_card_uses_drawn_effect() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let mystery = ActivatedCard {
        card: CardId::new(1),
        target: None,
        transformed: Some(CardId::new(3)),
    };
    let scored = engine
        .score(
            &selection(1, 1, 2, 1),
            &normal_result(),
            Some(&activation(1, Some(mystery), None)),
            &PeerTotals::new(),
        )
        .unwrap();

    assert_eq!(scored.final_points, 70.0);
    assert_eq!(scored.cards[0].card, CardId::new(1));
    assert_eq!(scored.cards[0].effective_card, CardId::new(3));
}

/// A transformer that was never drawn cannot be scored.
#[test]
fn test_undrawn_transformer_is_rejected() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let err = engine
        .score(
            &selection(1, 1, 2, 1),
            &normal_result(),
            Some(&activation(1, Some(played(1)), None)),
            &PeerTotals::new(),
        )
        .unwrap_err();
    assert_eq!(
        err,
        ScoringError::UnresolvedCard {
            race: RACE,
            card: CardId::new(1),
        }
    );
    assert_eq!(err.kind(), ErrorKind::DataIntegrity);
}

// =============================================================================
// Rank shift
// =============================================================================

/// P2 moving up three places clamps to P1: 18 -> 25 on the points table.
#[test]
fn test_driver_rank_shift_clamps_to_first() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let scored = engine
        .score(
            &selection(1, 2, 1, 2),
            &normal_result(),
            Some(&activation(1, Some(played(4)), None)),
            &PeerTotals::new(),
        )
        .unwrap();

    assert_eq!(scored.base_points, 36.0);
    assert_eq!(scored.final_points, 43.0);
}

/// A retired driver has no position to move from.
#[test]
fn test_rank_shift_on_unclassified_driver() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let scored = engine
        .score(
            &selection(1, 5, 1, 3),
            &normal_result(),
            Some(&activation(1, Some(played(4)), None)),
            &PeerTotals::new(),
        )
        .unwrap();
    assert_eq!(scored.final_points, scored.base_points);
}

/// Team 2 is second on 18; moving up one takes team 1's 40.
#[test]
fn test_team_rank_shift() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let scored = engine
        .score(
            &selection(1, 6, 1, 2),
            &normal_result(),
            Some(&activation(1, None, Some(played(13)))),
            &PeerTotals::new(),
        )
        .unwrap();

    assert_eq!(scored.base_points, 30.0);
    assert_eq!(scored.final_points, 52.0);
}

// =============================================================================
// Whole race
// =============================================================================

/// Mirror copies the opponent's pre-card total, not their final score.
#[test]
fn test_mirror_reads_opponent_base_points() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let selections = [selection(1, 1, 3, 1), selection(2, 2, 6, 2)];
    let mirror = ActivatedCard {
        card: CardId::new(5),
        target: Some(Target::Player(PlayerId::new(1))),
        transformed: None,
    };
    let activations = [
        activation(1, Some(played(3)), None),
        activation(2, Some(mirror), None),
    ];

    let scored = engine
        .score_race(&selections, &normal_result(), &activations)
        .unwrap();

    assert_eq!(scored.len(), 2);
    assert_eq!(scored[0].base_points, 65.0);
    assert_eq!(scored[0].final_points, 70.0);
    assert_eq!(scored[1].base_points, 36.0);
    assert_eq!(scored[1].final_points, 65.0);
}

/// A player in two leagues only gets this league's activation.
#[test]
fn test_activation_from_another_league_ignored() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let mut elsewhere = activation(1, Some(played(3)), None);
    elsewhere.league = LeagueId::new(2);
    let here = activation(2, Some(played(3)), None);

    let selections = [selection(1, 1, 3, 1), selection(2, 2, 6, 2)];
    let scored = engine
        .score_race(&selections, &normal_result(), &[elsewhere, here])
        .unwrap();

    assert_eq!(scored[0].final_points, 65.0);
    assert!(scored[0].cards.is_empty());
    assert_eq!(scored[1].final_points, 41.0);
}

/// One unknown driver fails the whole race.
#[test]
fn test_incomplete_result_fails_race() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let selections = [selection(1, 1, 3, 1), selection(2, 99, 6, 2)];
    let err = engine
        .score_race(&selections, &normal_result(), &[])
        .unwrap_err();

    assert_eq!(
        err,
        ScoringError::IncompleteRaceResult {
            race: RACE,
            missing: MissingEntry::Driver(DriverId::new(99)),
        }
    );
}

#[test]
fn test_selection_for_another_race() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let mut sel = selection(1, 1, 3, 1);
    sel.race = RaceId::new(2);
    let err = engine
        .score(&sel, &normal_result(), None, &PeerTotals::new())
        .unwrap_err();

    assert_eq!(
        err,
        ScoringError::MismatchedInput {
            player: PlayerId::new(1),
            race: RACE,
            found: RaceId::new(2),
        }
    );
    assert_eq!(err.kind(), ErrorKind::Referential);
}

/// Scoring is a pure function of its inputs.
#[test]
fn test_scoring_is_deterministic() {
    let catalog = catalog();
    let config = EngineConfig::default();
    let engine = ScoringEngine::new(&catalog, &config);

    let selections = [selection(1, 1, 3, 1), selection(2, 2, 6, 2), selection(3, 4, 6, 3)];
    let activations = [activation(3, Some(played(2)), Some(played(11)))];

    let first = engine.score_race(&selections, &normal_result(), &activations).unwrap();
    let second = engine.score_race(&selections, &normal_result(), &activations).unwrap();
    assert_eq!(first, second);
}
