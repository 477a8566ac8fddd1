//! Card activation - a player's per-race choice of cards to play.
//!
//! The `ActivationResolver` checks a request against the race calendar,
//! the player's deck and the season ledger, resolves targets, and rolls
//! Mystery/Random transformations. It never mutates shared state itself:
//! the ledger is only written by `commit`, once the race lock has passed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info};

use crate::cards::{Card, CardCatalog, CardId, CardType, TargetRequirement};
use crate::core::{EngineConfig, LeagueId, PlayerId, RaceId, RaceWeekend, RandomChoice, Season};
use crate::deck::Deck;
use crate::error::ErrorKind;
use crate::scoring::Selection;

use super::ledger::UsedCardLedger;
use super::targets::{check_target, InvalidTargetReason, Target, TargetCheck};

/// One side's pick in an activation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPick {
    pub card: CardId,
    pub target: Option<Target>,
}

impl CardPick {
    pub fn new(card: CardId) -> Self {
        Self { card, target: None }
    }

    #[must_use]
    pub fn targeting(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }
}

/// A request to play cards for one race.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationRequest {
    pub player: PlayerId,
    pub league: LeagueId,
    pub race: RaceId,
    pub driver: Option<CardPick>,
    pub team: Option<CardPick>,
}

impl ActivationRequest {
    pub fn new(player: PlayerId, league: LeagueId, race: RaceId) -> Self {
        Self {
            player,
            league,
            race,
            driver: None,
            team: None,
        }
    }

    #[must_use]
    pub fn with_driver_card(mut self, pick: CardPick) -> Self {
        self.driver = Some(pick);
        self
    }

    #[must_use]
    pub fn with_team_card(mut self, pick: CardPick) -> Self {
        self.team = Some(pick);
        self
    }

    fn pick(&self, side: CardType) -> Option<&CardPick> {
        match side {
            CardType::Driver => self.driver.as_ref(),
            CardType::Team => self.team.as_ref(),
        }
    }
}

/// Everything an activation is checked against.
///
/// Time, season and ledger are explicit so tests can place the request
/// anywhere on the season timeline.
#[derive(Clone, Copy, Debug)]
pub struct ActivationContext<'a> {
    pub weekend: &'a RaceWeekend,
    /// Season the league plays in.
    pub league_season: Season,
    pub now: DateTime<Utc>,
    pub deck: &'a Deck,
    pub ledger: &'a UsedCardLedger,
    pub members: &'a [PlayerId],
    /// The activating player's driver/team picks for this race, if made.
    pub selection: Option<&'a Selection>,
}

/// A committed card choice for one side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivatedCard {
    /// The card the player chose.
    pub card: CardId,
    pub target: Option<Target>,
    /// Set when `card` is a Mystery/Random card: the card it turned into.
    pub transformed: Option<CardId>,
}

impl ActivatedCard {
    /// The card whose effect is applied when scoring.
    #[must_use]
    pub fn effective_card(&self) -> CardId {
        self.transformed.unwrap_or(self.card)
    }
}

/// A player's committed activation for one race.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub player: PlayerId,
    pub league: LeagueId,
    pub race: RaceId,
    pub season: Season,
    pub driver: Option<ActivatedCard>,
    pub team: Option<ActivatedCard>,
}

impl Activation {
    #[must_use]
    pub fn side(&self, side: CardType) -> Option<&ActivatedCard> {
        match side {
            CardType::Driver => self.driver.as_ref(),
            CardType::Team => self.team.as_ref(),
        }
    }

    /// Draw result of a driver-side Mystery card.
    #[must_use]
    pub fn mystery_transformed_card(&self) -> Option<CardId> {
        self.driver.and_then(|c| c.transformed)
    }

    /// Draw result of a team-side Random card.
    #[must_use]
    pub fn random_transformed_card(&self) -> Option<CardId> {
        self.team.and_then(|c| c.transformed)
    }

    /// Cards the player chose (not their transformations), driver first.
    #[must_use]
    pub fn chosen_cards(&self) -> SmallVec<[CardId; 2]> {
        self.driver
            .iter()
            .chain(self.team.iter())
            .map(|c| c.card)
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.driver.is_none() && self.team.is_none()
    }
}

/// Why a card cannot be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvalidCardReason {
    NotInCatalog,
    NotInDeck,
    /// A team card on the driver side or vice versa.
    WrongSide,
    Inactive,
    /// Every candidate for a Mystery/Random draw is excluded.
    EmptyTransformationPool,
}

impl std::fmt::Display for InvalidCardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::NotInCatalog => "not in the catalog",
            Self::NotInDeck => "not in your deck",
            Self::WrongSide => "played on the wrong side",
            Self::Inactive => "currently disabled",
            Self::EmptyTransformationPool => "no card left to transform into",
        };
        f.write_str(text)
    }
}

/// Activation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActivationError {
    #[error("{card} is {reason}")]
    InvalidCard { card: CardId, reason: InvalidCardReason },

    #[error("{card} was already used in season {season}")]
    CardAlreadyUsed { card: CardId, season: Season },

    #[error("cards cannot be played on the sprint weekend of {race}")]
    SprintWeekendForbidden { race: RaceId },

    #[error("cards are not available in season {season} (first season {first})")]
    SeasonNotEligible { season: Season, first: Season },

    #[error("{race} locked at {locked_at}")]
    LockPassed { race: RaceId, locked_at: DateTime<Utc> },

    /// `commit` called while the activation can still change.
    #[error("{race} does not lock until {locks_at}")]
    NotLocked { race: RaceId, locks_at: DateTime<Utc> },

    #[error("no card selected")]
    NothingSelected,

    #[error("{card} needs a {required:?} target")]
    MissingTarget { card: CardId, required: TargetRequirement },

    #[error("{card} cannot target {target}: {reason}")]
    InvalidTarget {
        card: CardId,
        target: Target,
        reason: InvalidTargetReason,
    },
}

impl ActivationError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CardAlreadyUsed { .. }
            | Self::SprintWeekendForbidden { .. }
            | Self::SeasonNotEligible { .. }
            | Self::LockPassed { .. }
            | Self::NotLocked { .. } => ErrorKind::State,
            Self::NothingSelected | Self::MissingTarget { .. } => ErrorKind::Validation,
            Self::InvalidCard { .. } | Self::InvalidTarget { .. } => ErrorKind::Referential,
        }
    }
}

/// Resolves activation requests against the catalog and engine rules.
#[derive(Clone, Copy, Debug)]
pub struct ActivationResolver<'a> {
    catalog: &'a CardCatalog,
    config: &'a EngineConfig,
}

impl<'a> ActivationResolver<'a> {
    pub fn new(catalog: &'a CardCatalog, config: &'a EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Check a request and roll any transformations.
    ///
    /// Each call draws afresh: re-activating before the lock re-rolls
    /// Mystery/Random cards independently.
    pub fn activate(
        &self,
        request: &ActivationRequest,
        ctx: &ActivationContext<'_>,
        rng: &mut impl RandomChoice,
    ) -> Result<Activation, ActivationError> {
        self.check_window(ctx)?;

        if request.driver.is_none() && request.team.is_none() {
            return Err(ActivationError::NothingSelected);
        }

        // Validate both sides before drawing so a rejected request
        // consumes no randomness.
        let mut validated: SmallVec<[(CardType, &Card, Option<Target>); 2]> = SmallVec::new();
        for side in [CardType::Driver, CardType::Team] {
            if let Some(pick) = request.pick(side) {
                let card = self.check_card(side, pick.card, request.player, ctx)?;
                let target = check_target(
                    card.requires_target,
                    pick.target,
                    request.player,
                    ctx.members,
                    ctx.selection,
                )
                .map_err(|check| match check {
                    TargetCheck::Missing => ActivationError::MissingTarget {
                        card: card.id,
                        required: card.requires_target,
                    },
                    TargetCheck::Invalid(reason) => match pick.target {
                        Some(target) => ActivationError::InvalidTarget {
                            card: card.id,
                            target,
                            reason,
                        },
                        None => ActivationError::MissingTarget {
                            card: card.id,
                            required: card.requires_target,
                        },
                    },
                })?;
                validated.push((side, card, target));
            }
        }

        let mut activation = Activation {
            player: request.player,
            league: request.league,
            race: request.race,
            season: ctx.league_season,
            driver: None,
            team: None,
        };

        for (side, card, target) in validated {
            let transformed = if card.is_transformer() {
                Some(self.draw_transformation(card, request.player, ctx, &mut *rng)?)
            } else {
                None
            };
            let activated = ActivatedCard {
                card: card.id,
                target,
                transformed,
            };
            match side {
                CardType::Driver => activation.driver = Some(activated),
                CardType::Team => activation.team = Some(activated),
            }
        }

        debug!(
            player = %request.player,
            race = %request.race,
            cards = activation.chosen_cards().len(),
            "activation resolved"
        );
        Ok(activation)
    }

    /// Clear one side before the lock.
    ///
    /// Returns `None` once neither side holds a card. Clearing an empty
    /// side is a no-op.
    pub fn clear_side(
        &self,
        mut activation: Activation,
        side: CardType,
        weekend: &RaceWeekend,
        now: DateTime<Utc>,
    ) -> Result<Option<Activation>, ActivationError> {
        self.check_unlocked(weekend, now)?;
        match side {
            CardType::Driver => activation.driver = None,
            CardType::Team => activation.team = None,
        }
        Ok(if activation.is_empty() {
            None
        } else {
            Some(activation)
        })
    }

    /// Remove an activation entirely before the lock.
    pub fn clear(
        &self,
        activation: Activation,
        weekend: &RaceWeekend,
        now: DateTime<Utc>,
    ) -> Result<(), ActivationError> {
        self.check_unlocked(weekend, now)?;
        debug!(player = %activation.player, race = %activation.race, "activation cleared");
        Ok(())
    }

    /// Burn the chosen cards in the season ledger once the race has locked.
    ///
    /// Idempotent: returns how many cards were newly marked, so a retried
    /// commit returns 0 and charges nothing.
    pub fn commit(
        &self,
        activation: &Activation,
        ledger: &mut UsedCardLedger,
        weekend: &RaceWeekend,
        now: DateTime<Utc>,
    ) -> Result<usize, ActivationError> {
        let lock_offset = self.config.lock_offset();
        if !weekend.is_locked(now, lock_offset) {
            return Err(ActivationError::NotLocked {
                race: weekend.race,
                locks_at: weekend.race_lock(lock_offset),
            });
        }

        let marked = activation
            .chosen_cards()
            .into_iter()
            .filter(|&card| ledger.mark_used(activation.player, activation.season, card))
            .count();

        info!(
            player = %activation.player,
            race = %activation.race,
            marked,
            "activation committed"
        );
        Ok(marked)
    }

    fn check_window(&self, ctx: &ActivationContext<'_>) -> Result<(), ActivationError> {
        if ctx.weekend.weekend.is_sprint() {
            return Err(ActivationError::SprintWeekendForbidden {
                race: ctx.weekend.race,
            });
        }
        if ctx.league_season < self.config.first_card_season {
            return Err(ActivationError::SeasonNotEligible {
                season: ctx.league_season,
                first: self.config.first_card_season,
            });
        }
        self.check_unlocked(ctx.weekend, ctx.now)
    }

    fn check_unlocked(&self, weekend: &RaceWeekend, now: DateTime<Utc>) -> Result<(), ActivationError> {
        let lock_offset = self.config.lock_offset();
        if weekend.is_locked(now, lock_offset) {
            return Err(ActivationError::LockPassed {
                race: weekend.race,
                locked_at: weekend.race_lock(lock_offset),
            });
        }
        Ok(())
    }

    fn check_card(
        &self,
        side: CardType,
        id: CardId,
        player: PlayerId,
        ctx: &ActivationContext<'_>,
    ) -> Result<&'a Card, ActivationError> {
        let invalid = |reason| ActivationError::InvalidCard { card: id, reason };

        let card = self.catalog.get(id).ok_or(invalid(InvalidCardReason::NotInCatalog))?;
        if card.card_type != side {
            return Err(invalid(InvalidCardReason::WrongSide));
        }
        if !ctx.deck.contains(side, id) {
            return Err(invalid(InvalidCardReason::NotInDeck));
        }
        if !card.is_active {
            return Err(invalid(InvalidCardReason::Inactive));
        }
        if ctx.ledger.is_used(player, ctx.league_season, id) {
            return Err(ActivationError::CardAlreadyUsed {
                card: id,
                season: ctx.league_season,
            });
        }
        Ok(card)
    }

    /// Draw the card a Mystery/Random card turns into.
    ///
    /// The pool is every active card of the same type except the
    /// transformer itself, cards the player already used this season,
    /// other transformers, and cards that need a target.
    fn draw_transformation(
        &self,
        transformer: &Card,
        player: PlayerId,
        ctx: &ActivationContext<'_>,
        rng: &mut impl RandomChoice,
    ) -> Result<CardId, ActivationError> {
        let pool = transformation_pool(self.catalog, transformer, player, ctx.league_season, ctx.ledger);

        let drawn = rng
            .choose_index(pool.len())
            .and_then(|idx| pool.get(idx).copied())
            .ok_or(ActivationError::InvalidCard {
                card: transformer.id,
                reason: InvalidCardReason::EmptyTransformationPool,
            })?;

        debug!(
            player = %player,
            card = %transformer.id,
            drawn = %drawn,
            pool = pool.len(),
            "transformation drawn"
        );
        Ok(drawn)
    }
}

/// Candidate cards for a transformation draw, sorted by ID.
#[must_use]
pub fn transformation_pool(
    catalog: &CardCatalog,
    transformer: &Card,
    player: PlayerId,
    season: Season,
    ledger: &UsedCardLedger,
) -> Vec<CardId> {
    catalog
        .cards_of_type(transformer.card_type)
        .into_iter()
        .filter(|c| {
            c.id != transformer.id
                && c.is_active
                && !c.is_transformer()
                && !c.requires_target()
                && !ledger.is_used(player, season, c.id)
        })
        .map(|c| c.id)
        .collect()
}
