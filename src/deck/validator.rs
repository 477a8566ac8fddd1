//! Deck validation.
//!
//! A deck is accepted iff every rule holds on both sides:
//!
//! 1. Every ID resolves to a catalog card of the side's type
//! 2. No ID repeats within a side
//! 3. Slot costs sum to exactly the side's budget
//! 4. The side holds at most `max_cards` cards
//! 5. The side holds at most `max_gold` gold cards
//!
//! All rules are evaluated and every violation is reported, so a
//! deck-builder UI can show the whole list at once.

use chrono::{DateTime, Duration, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::cards::{CardCatalog, CardId, CardType};
use crate::core::{DeckRules, SeasonSchedule, SideRules};
use crate::error::ErrorKind;

/// A validated deck.
///
/// Only `DeckValidator` produces these, so holding one means the rules held
/// when it was saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    driver_cards: Vec<CardId>,
    team_cards: Vec<CardId>,
}

impl Deck {
    /// Selected cards for one side, in the order they were submitted.
    #[must_use]
    pub fn cards(&self, side: CardType) -> &[CardId] {
        match side {
            CardType::Driver => &self.driver_cards,
            CardType::Team => &self.team_cards,
        }
    }

    #[must_use]
    pub fn contains(&self, side: CardType, card: CardId) -> bool {
        self.cards(side).contains(&card)
    }

    /// Every card in the deck, driver side first.
    pub fn iter(&self) -> impl Iterator<Item = CardId> + '_ {
        self.driver_cards.iter().chain(self.team_cards.iter()).copied()
    }
}

/// A single broken deck rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeckRuleViolation {
    UnknownCard {
        side: CardType,
        card: CardId,
    },
    WrongCardType {
        side: CardType,
        card: CardId,
        actual: CardType,
    },
    DuplicateCard {
        side: CardType,
        card: CardId,
    },
    /// Under- and over-allocation are both violations.
    SlotBudgetMismatch {
        side: CardType,
        expected: u32,
        actual: u32,
    },
    TooManyCards {
        side: CardType,
        max: usize,
        actual: usize,
    },
    TooManyGold {
        side: CardType,
        max: usize,
        actual: usize,
    },
}

impl std::fmt::Display for DeckRuleViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCard { side, card } => write!(f, "{side} side: unknown {card}"),
            Self::WrongCardType { side, card, actual } => {
                write!(f, "{side} side: {card} is a {actual} card")
            }
            Self::DuplicateCard { side, card } => write!(f, "{side} side: {card} selected twice"),
            Self::SlotBudgetMismatch {
                side,
                expected,
                actual,
            } => write!(f, "{side} side: uses {actual} slots, must use exactly {expected}"),
            Self::TooManyCards { side, max, actual } => {
                write!(f, "{side} side: {actual} cards, at most {max} allowed")
            }
            Self::TooManyGold { side, max, actual } => {
                write!(f, "{side} side: {actual} gold cards, at most {max} allowed")
            }
        }
    }
}

/// Deck save errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    /// One or more rules failed; every failure is listed.
    #[error("deck rejected: {}", format_violations(.0))]
    Violations(Vec<DeckRuleViolation>),

    /// The season lock has passed; decks are frozen.
    #[error("decks for season {season} locked at {locked_at}")]
    LockPassed {
        season: u16,
        locked_at: DateTime<Utc>,
    },
}

impl DeckError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Violations(_) => ErrorKind::Validation,
            Self::LockPassed { .. } => ErrorKind::State,
        }
    }

    /// The violations, if this is a rule failure.
    #[must_use]
    pub fn violations(&self) -> &[DeckRuleViolation] {
        match self {
            Self::Violations(v) => v,
            Self::LockPassed { .. } => &[],
        }
    }
}

fn format_violations(violations: &[DeckRuleViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a candidate deck against the default rules.
///
/// ```
/// use power_cards::cards::{Card, CardCatalog, CardId, CardType, Tier};
/// use power_cards::deck::validate_deck;
///
/// let catalog = CardCatalog::from_cards([
///     Card::new(CardId::new(1), "Too small", CardType::Driver, Tier::Bronze, 1),
/// ]).unwrap();
///
/// let err = validate_deck(&[CardId::new(1)], &[], &catalog).unwrap_err();
/// assert_eq!(err.violations().len(), 2); // both sides miss their slot budget
/// ```
pub fn validate_deck(
    driver_ids: &[CardId],
    team_ids: &[CardId],
    catalog: &CardCatalog,
) -> Result<Deck, DeckError> {
    DeckValidator::default().validate(driver_ids, team_ids, catalog)
}

/// Validates and saves decks under a set of `DeckRules`.
#[derive(Clone, Debug, Default)]
pub struct DeckValidator {
    rules: DeckRules,
}

impl DeckValidator {
    #[must_use]
    pub fn new(rules: DeckRules) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &DeckRules {
        &self.rules
    }

    /// Check every rule on both sides. Pure.
    pub fn validate(
        &self,
        driver_ids: &[CardId],
        team_ids: &[CardId],
        catalog: &CardCatalog,
    ) -> Result<Deck, DeckError> {
        let mut violations = Vec::new();
        violations.extend(check_side(CardType::Driver, driver_ids, &self.rules.driver, catalog));
        violations.extend(check_side(CardType::Team, team_ids, &self.rules.team, catalog));

        if violations.is_empty() {
            Ok(Deck {
                driver_cards: driver_ids.to_vec(),
                team_cards: team_ids.to_vec(),
            })
        } else {
            debug!(count = violations.len(), "deck rejected");
            Err(DeckError::Violations(violations))
        }
    }

    /// Validate a deck for saving at `now`.
    ///
    /// Rejected outright once the season lock has passed; there is no
    /// partial edit.
    pub fn save_deck(
        &self,
        driver_ids: &[CardId],
        team_ids: &[CardId],
        catalog: &CardCatalog,
        schedule: &SeasonSchedule,
        now: DateTime<Utc>,
        lock_offset: Duration,
    ) -> Result<Deck, DeckError> {
        if schedule.is_deck_locked(now, lock_offset) {
            return Err(DeckError::LockPassed {
                season: schedule.season,
                locked_at: schedule.deck_lock(lock_offset),
            });
        }
        self.validate(driver_ids, team_ids, catalog)
    }

    /// Slots still unfilled on one side of a candidate.
    ///
    /// Negative when over budget. Unknown IDs cost nothing.
    #[must_use]
    pub fn remaining_slots(&self, side: CardType, ids: &[CardId], catalog: &CardCatalog) -> i64 {
        let budget = match side {
            CardType::Driver => self.rules.driver.slot_budget,
            CardType::Team => self.rules.team.slot_budget,
        };
        let used: i64 = ids
            .iter()
            .filter_map(|id| catalog.get(*id))
            .map(|c| i64::from(c.slot_cost))
            .sum();
        i64::from(budget) - used
    }
}

fn check_side(
    side: CardType,
    ids: &[CardId],
    rules: &SideRules,
    catalog: &CardCatalog,
) -> SmallVec<[DeckRuleViolation; 4]> {
    let mut violations = SmallVec::new();
    let mut seen = FxHashSet::default();
    let mut slots = 0u32;
    let mut gold = 0usize;

    for &id in ids {
        if !seen.insert(id) {
            violations.push(DeckRuleViolation::DuplicateCard { side, card: id });
        }

        match catalog.get(id) {
            None => violations.push(DeckRuleViolation::UnknownCard { side, card: id }),
            Some(card) => {
                if card.card_type != side {
                    violations.push(DeckRuleViolation::WrongCardType {
                        side,
                        card: id,
                        actual: card.card_type,
                    });
                }
                // Repeated IDs of a costly card must not wrap.
                slots = slots.saturating_add(card.slot_cost);
                if card.is_gold() {
                    gold += 1;
                }
            }
        }
    }

    if slots != rules.slot_budget {
        violations.push(DeckRuleViolation::SlotBudgetMismatch {
            side,
            expected: rules.slot_budget,
            actual: slots,
        });
    }
    if ids.len() > rules.max_cards {
        violations.push(DeckRuleViolation::TooManyCards {
            side,
            max: rules.max_cards,
            actual: ids.len(),
        });
    }
    if gold > rules.max_gold {
        violations.push(DeckRuleViolation::TooManyGold {
            side,
            max: rules.max_gold,
            actual: gold,
        });
    }

    violations
}
