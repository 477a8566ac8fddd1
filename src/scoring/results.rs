//! Raw race results, as delivered by the result provider.
//!
//! Results are presumed structurally valid. The scoring engine still
//! refuses to guess when an entry it needs is absent.

use serde::{Deserialize, Serialize};

use crate::core::{DriverId, RaceId, TeamId, WeekendType};

/// How a driver's session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishStatus {
    /// Classified at a 1-based position.
    Finished(u32),
    /// Did not finish.
    Dnf,
    /// Did not start.
    Dns,
    /// Disqualified.
    Dsq,
}

impl FinishStatus {
    #[must_use]
    pub fn position(self) -> Option<u32> {
        match self {
            FinishStatus::Finished(p) => Some(p),
            _ => None,
        }
    }
}

/// One driver's outcome in one session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub status: FinishStatus,
    pub points: f64,
}

impl SessionResult {
    pub fn finished(position: u32, points: f64) -> Self {
        Self {
            status: FinishStatus::Finished(position),
            points,
        }
    }

    pub fn retired(status: FinishStatus) -> Self {
        Self { status, points: 0.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriverResult {
    pub driver: DriverId,
    pub team: TeamId,
    pub race: SessionResult,
    /// Present on sprint weekends.
    pub sprint: Option<SessionResult>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamResult {
    pub team: TeamId,
    pub points: f64,
    /// Present on sprint weekends.
    pub sprint_points: Option<f64>,
}

/// Full result of one race weekend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceResult {
    pub race: RaceId,
    pub round: u32,
    pub weekend: WeekendType,
    pub drivers: Vec<DriverResult>,
    pub teams: Vec<TeamResult>,
}

impl RaceResult {
    pub fn new(race: RaceId, round: u32, weekend: WeekendType) -> Self {
        Self {
            race,
            round,
            weekend,
            drivers: Vec::new(),
            teams: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_driver(mut self, driver: DriverId, team: TeamId, race: SessionResult) -> Self {
        self.drivers.push(DriverResult {
            driver,
            team,
            race,
            sprint: None,
        });
        self
    }

    #[must_use]
    pub fn with_sprint_driver(
        mut self,
        driver: DriverId,
        team: TeamId,
        race: SessionResult,
        sprint: SessionResult,
    ) -> Self {
        self.drivers.push(DriverResult {
            driver,
            team,
            race,
            sprint: Some(sprint),
        });
        self
    }

    #[must_use]
    pub fn with_team(mut self, team: TeamId, points: f64) -> Self {
        self.teams.push(TeamResult {
            team,
            points,
            sprint_points: None,
        });
        self
    }

    #[must_use]
    pub fn with_sprint_team(mut self, team: TeamId, points: f64, sprint_points: f64) -> Self {
        self.teams.push(TeamResult {
            team,
            points,
            sprint_points: Some(sprint_points),
        });
        self
    }

    #[must_use]
    pub fn driver(&self, id: DriverId) -> Option<&DriverResult> {
        self.drivers.iter().find(|d| d.driver == id)
    }

    #[must_use]
    pub fn team(&self, id: TeamId) -> Option<&TeamResult> {
        self.teams.iter().find(|t| t.team == id)
    }

    /// Number of classified positions available (the driver field).
    #[must_use]
    pub fn field_size(&self) -> u32 {
        self.drivers.len() as u32
    }

    /// Teams ordered best-first by main race points, ties by ID.
    #[must_use]
    pub fn team_ranking(&self) -> Vec<&TeamResult> {
        let mut ranked: Vec<&TeamResult> = self.teams.iter().collect();
        ranked.sort_by(|a, b| {
            b.points
                .total_cmp(&a.points)
                .then_with(|| a.team.cmp(&b.team))
        });
        ranked
    }

    /// 1-based rank of a team in `team_ranking`.
    #[must_use]
    pub fn team_rank(&self, id: TeamId) -> Option<u32> {
        self.team_ranking()
            .iter()
            .position(|t| t.team == id)
            .map(|idx| idx as u32 + 1)
    }
}
