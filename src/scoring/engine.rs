//! Race scoring - base points from results, then card effects.
//!
//! ## Base points
//!
//! Normal weekend: the main driver's race points, or the reserve's if the
//! main driver did not start (DNF/DSQ score zero with no substitution),
//! plus the team's race points.
//!
//! Sprint weekend: main driver race points + reserve driver sprint points
//! + team race and sprint points. Cards never apply.
//!
//! ## Effects
//!
//! The driver card runs first, then the team card, each on the running
//! total. Effects are not commutative, so this order is fixed.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, warn};

use crate::activation::{ActivatedCard, Activation};
use crate::cards::{CardCatalog, CardEffect, CardId, CardType};
use crate::core::{DriverId, EngineConfig, PlayerId, RaceId, TeamId, WeekendType};
use crate::error::ErrorKind;

use super::results::{DriverResult, FinishStatus, RaceResult};
use super::selection::{AppliedCard, ScoredSelection, Selection};

/// A result entry the engine needed but did not find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MissingEntry {
    Driver(DriverId),
    DriverSprint(DriverId),
    Team(TeamId),
    TeamSprint(TeamId),
}

impl std::fmt::Display for MissingEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Driver(d) => write!(f, "race result for {d}"),
            Self::DriverSprint(d) => write!(f, "sprint result for {d}"),
            Self::Team(t) => write!(f, "race result for {t}"),
            Self::TeamSprint(t) => write!(f, "sprint result for {t}"),
        }
    }
}

/// Scoring failures. None are expected with well-formed inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// A selected driver or team has no result. Never scored as zero.
    #[error("{race} is missing the {missing}")]
    IncompleteRaceResult { race: RaceId, missing: MissingEntry },

    /// No result has been ingested for the race at all.
    #[error("no result available for {race}")]
    NoRaceResult { race: RaceId },

    /// An activated card cannot be resolved to a concrete effect.
    #[error("{card} in the activation for {race} has no resolvable effect")]
    UnresolvedCard { race: RaceId, card: CardId },

    /// Selection, activation and result disagree on player or race.
    #[error("{player} has inputs for {found} while scoring {race}")]
    MismatchedInput {
        player: PlayerId,
        race: RaceId,
        found: RaceId,
    },
}

impl ScoringError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IncompleteRaceResult { .. }
            | Self::NoRaceResult { .. }
            | Self::UnresolvedCard { .. } => ErrorKind::DataIntegrity,
            Self::MismatchedInput { .. } => ErrorKind::Referential,
        }
    }
}

/// Base totals of every player in a race, read by mirror effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PeerTotals {
    totals: FxHashMap<PlayerId, f64>,
}

impl PeerTotals {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player: PlayerId, base_points: f64) {
        self.totals.insert(player, base_points);
    }

    /// A player with no selection this race counts as zero.
    #[must_use]
    pub fn base_points(&self, player: PlayerId) -> f64 {
        self.totals.get(&player).copied().unwrap_or(0.0)
    }
}

/// Base points before any card, plus what the effects need to know.
struct BaseScore {
    scoring_driver: DriverId,
    driver_position: Option<u32>,
    driver_points: f64,
    reserve_substituted: bool,
    reserve_points: f64,
    team_points: f64,
}

impl BaseScore {
    fn total(&self) -> f64 {
        self.driver_points + self.reserve_points + self.team_points
    }
}

/// Scores selections against race results.
#[derive(Clone, Copy, Debug)]
pub struct ScoringEngine<'a> {
    catalog: &'a CardCatalog,
    config: &'a EngineConfig,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(catalog: &'a CardCatalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Score one selection.
    ///
    /// `peers` supplies opponents' base totals for mirror effects; pass
    /// `PeerTotals::new()` when no mirror card can be in play.
    pub fn score(
        &self,
        selection: &Selection,
        result: &RaceResult,
        activation: Option<&Activation>,
        peers: &PeerTotals,
    ) -> Result<ScoredSelection, ScoringError> {
        if selection.race != result.race {
            return Err(ScoringError::MismatchedInput {
                player: selection.player,
                race: result.race,
                found: selection.race,
            });
        }
        if let Some(a) = activation {
            if a.race != result.race || a.player != selection.player {
                return Err(ScoringError::MismatchedInput {
                    player: a.player,
                    race: result.race,
                    found: a.race,
                });
            }
        }

        let base = self.base_score(selection, result)?;
        let base_points = base.total();

        let mut total = base_points;
        let mut cards: SmallVec<[AppliedCard; 2]> = SmallVec::new();

        match (result.weekend, activation) {
            (WeekendType::Sprint, Some(_)) => {
                warn!(
                    player = %selection.player,
                    race = %result.race,
                    "activation on a sprint weekend ignored"
                );
            }
            (WeekendType::Normal, Some(activation)) => {
                for side in [CardType::Driver, CardType::Team] {
                    if let Some(activated) = activation.side(side) {
                        let before = total;
                        total = self.apply_card(side, activated, total, selection, &base, result, peers)?;
                        cards.push(AppliedCard {
                            side,
                            card: activated.card,
                            effective_card: activated.effective_card(),
                            points_before: before,
                            points_after: total,
                        });
                    }
                }
            }
            (_, None) => {}
        }

        Ok(ScoredSelection {
            player: selection.player,
            league: selection.league,
            race: selection.race,
            round: result.round,
            main_driver: selection.main_driver,
            reserve_driver: selection.reserve_driver,
            team: selection.team,
            driver_points: base.driver_points,
            reserve_substituted: base.reserve_substituted,
            reserve_points: base.reserve_points,
            team_points: base.team_points,
            base_points,
            final_points: total,
            cards,
        })
    }

    /// Score a whole league race.
    ///
    /// Base totals are computed for everyone first so mirror effects read
    /// opponents' pre-card points. Any failure fails the race: a partial
    /// race is never handed on to statistics.
    pub fn score_race(
        &self,
        selections: &[Selection],
        result: &RaceResult,
        activations: &[Activation],
    ) -> Result<Vec<ScoredSelection>, ScoringError> {
        let mut peers = PeerTotals::new();
        for selection in selections {
            let base = self.base_score(selection, result)?;
            peers.insert(selection.player, base.total());
        }

        let scored = selections
            .iter()
            .map(|selection| {
                let activation = activations
                    .iter()
                    .find(|a| {
                        a.player == selection.player
                            && a.league == selection.league
                            && a.race == selection.race
                    });
                self.score(selection, result, activation, &peers)
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(race = %result.race, players = scored.len(), "race scored");
        Ok(scored)
    }

    fn base_score(&self, selection: &Selection, result: &RaceResult) -> Result<BaseScore, ScoringError> {
        let race = result.race;
        let main = driver_entry(result, selection.main_driver)?;
        let team = result.team(selection.team).ok_or(ScoringError::IncompleteRaceResult {
            race,
            missing: MissingEntry::Team(selection.team),
        })?;

        match result.weekend {
            WeekendType::Normal => {
                let (scoring, substituted) = if main.race.status == FinishStatus::Dns {
                    (driver_entry(result, selection.reserve_driver)?, true)
                } else {
                    (main, false)
                };
                Ok(BaseScore {
                    scoring_driver: scoring.driver,
                    driver_position: scoring.race.status.position(),
                    driver_points: scoring.race.points,
                    reserve_substituted: substituted,
                    reserve_points: 0.0,
                    team_points: team.points,
                })
            }
            WeekendType::Sprint => {
                let reserve = driver_entry(result, selection.reserve_driver)?;
                let reserve_sprint = reserve.sprint.ok_or(ScoringError::IncompleteRaceResult {
                    race,
                    missing: MissingEntry::DriverSprint(reserve.driver),
                })?;
                let team_sprint = team.sprint_points.ok_or(ScoringError::IncompleteRaceResult {
                    race,
                    missing: MissingEntry::TeamSprint(team.team),
                })?;
                Ok(BaseScore {
                    scoring_driver: main.driver,
                    driver_position: main.race.status.position(),
                    driver_points: main.race.points,
                    reserve_substituted: false,
                    reserve_points: reserve_sprint.points,
                    team_points: team.points + team_sprint,
                })
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_card(
        &self,
        side: CardType,
        activated: &ActivatedCard,
        total: f64,
        selection: &Selection,
        base: &BaseScore,
        result: &RaceResult,
        peers: &PeerTotals,
    ) -> Result<f64, ScoringError> {
        let unresolved = || ScoringError::UnresolvedCard {
            race: result.race,
            card: activated.card,
        };
        let card = self.catalog.get(activated.effective_card()).ok_or_else(unresolved)?;

        let new_total = match &card.effect {
            CardEffect::Multiplier { .. } | CardEffect::FlatBonus { .. } => {
                card.effect.apply_arithmetic(total).ok_or_else(unresolved)?
            }
            CardEffect::RankShift { positions } => {
                total + self.rank_shift_delta(side, *positions, selection, base, result)
            }
            CardEffect::MirrorOpponent => {
                let target = activated
                    .target
                    .and_then(|t| t.as_player())
                    .ok_or_else(unresolved)?;
                peers.base_points(target)
            }
            // A transformer must have been replaced by its draw.
            CardEffect::Mystery | CardEffect::Random => return Err(unresolved()),
        };

        debug!(
            player = %selection.player,
            card = %card.id,
            before = total,
            after = new_total,
            "card applied"
        );
        Ok(new_total)
    }

    /// Change in points from finishing `positions` places better.
    ///
    /// Driver side moves the scoring driver along the points table;
    /// non-classified drivers are unaffected. Team side moves the team
    /// along this race's team ranking.
    fn rank_shift_delta(
        &self,
        side: CardType,
        positions: i32,
        selection: &Selection,
        base: &BaseScore,
        result: &RaceResult,
    ) -> f64 {
        match side {
            CardType::Driver => {
                let Some(position) = base.driver_position else {
                    debug!(driver = %base.scoring_driver, "rank shift on unclassified driver");
                    return 0.0;
                };
                let shifted = shift_position(position, positions, result.field_size());
                let table = &self.config.points;
                table.points_for(shifted) - table.points_for(position)
            }
            CardType::Team => {
                let ranking = result.team_ranking();
                let Some(rank) = result.team_rank(selection.team) else {
                    return 0.0;
                };
                let shifted = shift_position(rank, positions, ranking.len() as u32);
                let current = ranking[rank as usize - 1].points;
                ranking[shifted as usize - 1].points - current
            }
        }
    }
}

fn driver_entry(result: &RaceResult, driver: DriverId) -> Result<&DriverResult, ScoringError> {
    result.driver(driver).ok_or(ScoringError::IncompleteRaceResult {
        race: result.race,
        missing: MissingEntry::Driver(driver),
    })
}

/// Move `positions` places up (negative: down), clamped to `1..=field`.
fn shift_position(position: u32, positions: i32, field: u32) -> u32 {
    let field = i64::from(field.max(1));
    let shifted = i64::from(position) - i64::from(positions);
    shifted.clamp(1, field) as u32
}
