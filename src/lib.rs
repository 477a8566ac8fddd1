//! # power-cards
//!
//! Scoring and power-card engine for a motorsport fantasy league.
//!
//! Players pick a main driver, a reserve driver and a team for each race
//! weekend. On top of that they build a season deck of one-shot power
//! cards and may play up to one driver card and one team card per race.
//!
//! ## Design Principles
//!
//! 1. **Pure core**: No I/O. Storage, clocks, result scraping and league
//!    rosters come in through the `providers` traits or plain arguments.
//!
//! 2. **Deterministic**: Given the same inputs (and the same RNG seed for
//!    Mystery/Random draws) every component returns the same output.
//!
//! 3. **Fixed effect order**: Card effects are not commutative. The driver
//!    card always applies before the team card.
//!
//! ## Modules
//!
//! - `core`: IDs, calendar deadlines, configuration, RNG
//! - `cards`: Card definitions, effects and the catalog
//! - `deck`: Deck validation and saving
//! - `activation`: Per-race card activation and the used-card ledger
//! - `scoring`: Base points from results, then card effects
//! - `stats`: Per-league player statistics
//! - `providers`: Collaborator traits, in-memory store, batch scoring
//! - `error`: Crate-wide error taxonomy

pub mod core;
pub mod cards;
pub mod deck;
pub mod activation;
pub mod scoring;
pub mod stats;
pub mod providers;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    DriverId, LeagueId, PlayerId, RaceId, Season, TeamId,
    RaceWeekend, SeasonSchedule, WeekendType,
    DeckRules, EngineConfig, PointsTable, RatingScales, SideRules,
    CardRng, CardRngState, RandomChoice,
};

pub use crate::cards::{Card, CardCatalog, CardEffect, CardId, CardType, TargetRequirement, Tier};

pub use crate::deck::{validate_deck, Deck, DeckError, DeckRuleViolation, DeckValidator};

pub use crate::activation::{
    Activation, ActivationContext, ActivationError, ActivationRequest, ActivationResolver,
    CardPick, Target, UsedCardLedger,
};

pub use crate::scoring::{
    FinishStatus, RaceResult, ScoredSelection, ScoringEngine, ScoringError, Selection,
    SessionResult,
};

pub use crate::stats::{aggregate, LeagueAggregate, LeagueStatistics, StatsError};

pub use crate::error::{EngineError, ErrorKind};
