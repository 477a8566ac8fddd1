//! Core engine types: identifiers, calendar deadlines, configuration, RNG.
//!
//! Everything here is shared by the deck, activation, scoring and
//! statistics components and depends on none of them.

pub mod ids;
pub mod calendar;
pub mod config;
pub mod rng;

pub use ids::{DriverId, LeagueId, PlayerId, RaceId, Season, TeamId};
pub use calendar::{RaceWeekend, SeasonSchedule, WeekendType};
pub use config::{DeckRules, EngineConfig, PointsTable, RatingScales, SideRules};
pub use rng::{CardRng, CardRngState, RandomChoice, SequenceChoice};
