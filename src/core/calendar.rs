//! Race calendar data and lock deadlines.
//!
//! Two deadlines govern mutation:
//! - The **season lock**: decks freeze a fixed offset before the season's
//!   first qualifying session.
//! - The **race lock**: activations freeze the same offset before the
//!   weekend's first competitive qualifying (sprint qualifying on sprint
//!   weekends).
//!
//! Time is always passed in explicitly so callers can simulate any point
//! of the season timeline.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{RaceId, Season};

/// Weekend format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekendType {
    /// Qualifying and a single main race.
    Normal,
    /// Adds a sprint qualifying and a sprint session before the main race.
    Sprint,
}

impl WeekendType {
    #[must_use]
    pub const fn is_sprint(self) -> bool {
        matches!(self, WeekendType::Sprint)
    }
}

/// Season-level schedule data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSchedule {
    pub season: Season,
    /// Start of the first qualifying session of the season.
    pub first_qualifying: DateTime<Utc>,
}

impl SeasonSchedule {
    pub fn new(season: Season, first_qualifying: DateTime<Utc>) -> Self {
        Self {
            season,
            first_qualifying,
        }
    }

    /// Instant after which decks can no longer be saved.
    #[must_use]
    pub fn deck_lock(&self, lock_offset: Duration) -> DateTime<Utc> {
        self.first_qualifying - lock_offset
    }

    /// Whether the deck lock has passed at `now`.
    #[must_use]
    pub fn is_deck_locked(&self, now: DateTime<Utc>, lock_offset: Duration) -> bool {
        now >= self.deck_lock(lock_offset)
    }
}

/// A single race weekend on the calendar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceWeekend {
    pub race: RaceId,
    pub season: Season,
    pub round: u32,
    pub weekend: WeekendType,
    pub qualifying_start: DateTime<Utc>,
    /// Only set on sprint weekends.
    pub sprint_qualifying_start: Option<DateTime<Utc>>,
}

impl RaceWeekend {
    /// Create a normal (non-sprint) weekend.
    pub fn normal(race: RaceId, season: Season, round: u32, qualifying_start: DateTime<Utc>) -> Self {
        Self {
            race,
            season,
            round,
            weekend: WeekendType::Normal,
            qualifying_start,
            sprint_qualifying_start: None,
        }
    }

    /// Create a sprint weekend.
    pub fn sprint(
        race: RaceId,
        season: Season,
        round: u32,
        sprint_qualifying_start: DateTime<Utc>,
        qualifying_start: DateTime<Utc>,
    ) -> Self {
        Self {
            race,
            season,
            round,
            weekend: WeekendType::Sprint,
            qualifying_start,
            sprint_qualifying_start: Some(sprint_qualifying_start),
        }
    }

    /// The first session whose start locks the weekend.
    #[must_use]
    pub fn locking_session(&self) -> DateTime<Utc> {
        match (self.weekend, self.sprint_qualifying_start) {
            (WeekendType::Sprint, Some(sprint_quali)) => sprint_quali.min(self.qualifying_start),
            _ => self.qualifying_start,
        }
    }

    /// Instant after which activations are frozen.
    #[must_use]
    pub fn race_lock(&self, lock_offset: Duration) -> DateTime<Utc> {
        self.locking_session() - lock_offset
    }

    #[must_use]
    pub fn is_locked(&self, now: DateTime<Utc>, lock_offset: Duration) -> bool {
        now >= self.race_lock(lock_offset)
    }
}
