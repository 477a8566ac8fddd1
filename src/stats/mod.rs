//! League statistics over scored selections.
//!
//! Statistics are derived state: always recomputable from the league's
//! `ScoredSelection`s and never edited by hand.

mod aggregate;
mod head_to_head;
pub mod ratings;

pub use aggregate::{aggregate, LeagueAggregate, LeagueStatistics, RecoveryStats, StatsError};
pub use head_to_head::HeadToHeadRecord;
