//! Race scoring: turning raw results and activations into player points.
//!
//! - `RaceResult`: per-driver and per-team outcomes of a weekend
//! - `Selection`: a player's main/reserve driver and team for a race
//! - `ScoringEngine`: base points, then card effects in fixed order
//! - `ScoredSelection`: the outcome, consumed by statistics

mod results;
mod selection;
mod engine;

pub use results::{DriverResult, FinishStatus, RaceResult, SessionResult, TeamResult};
pub use selection::{AppliedCard, ScoredSelection, Selection};
pub use engine::{MissingEntry, PeerTotals, ScoringEngine, ScoringError};
