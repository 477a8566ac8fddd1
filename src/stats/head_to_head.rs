//! Pairwise head-to-head records.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// One player's record against one opponent over their shared races.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadRecord {
    pub opponent: PlayerId,
    pub races_compared: u32,
    pub wins: u32,
    pub losses: u32,
    /// Equal points; neither a win nor a loss.
    pub ties: u32,
    /// Player's points over shared races only.
    pub total_points: f64,
    pub opponent_total_points: f64,
    pub points_difference: f64,
    pub average_points_difference: f64,
    /// Largest single-race margin in the player's favour.
    pub best_race_difference: f64,
    /// Smallest (most negative) single-race margin.
    pub worst_race_difference: f64,
}

impl HeadToHeadRecord {
    pub(crate) fn new(opponent: PlayerId) -> Self {
        Self {
            opponent,
            races_compared: 0,
            wins: 0,
            losses: 0,
            ties: 0,
            total_points: 0.0,
            opponent_total_points: 0.0,
            points_difference: 0.0,
            average_points_difference: 0.0,
            best_race_difference: f64::NEG_INFINITY,
            worst_race_difference: f64::INFINITY,
        }
    }

    /// Fold in one shared race.
    pub(crate) fn record(&mut self, points: f64, opponent_points: f64) {
        let diff = points - opponent_points;

        self.races_compared += 1;
        if diff > 0.0 {
            self.wins += 1;
        } else if diff < 0.0 {
            self.losses += 1;
        } else {
            self.ties += 1;
        }

        self.total_points += points;
        self.opponent_total_points += opponent_points;
        self.points_difference = self.total_points - self.opponent_total_points;
        self.average_points_difference = self.points_difference / f64::from(self.races_compared);
        self.best_race_difference = self.best_race_difference.max(diff);
        self.worst_race_difference = self.worst_race_difference.min(diff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_folds_races() {
        let mut record = HeadToHeadRecord::new(PlayerId::new(2));
        for (mine, theirs) in [(25.0, 18.0), (15.0, 20.0), (30.0, 22.0)] {
            record.record(mine, theirs);
        }

        assert_eq!(record.wins, 2);
        assert_eq!(record.losses, 1);
        assert_eq!(record.ties, 0);
        assert_eq!(record.total_points, 70.0);
        assert_eq!(record.opponent_total_points, 60.0);
        assert_eq!(record.points_difference, 10.0);
        assert!((record.average_points_difference - 10.0 / 3.0).abs() < 1e-9);
        assert_eq!(record.best_race_difference, 8.0);
        assert_eq!(record.worst_race_difference, -5.0);
    }

    #[test]
    fn test_tie_is_neither_win_nor_loss() {
        let mut record = HeadToHeadRecord::new(PlayerId::new(2));
        record.record(10.0, 10.0);

        assert_eq!((record.wins, record.losses, record.ties), (0, 0, 1));
        assert_eq!(record.best_race_difference, 0.0);
        assert_eq!(record.worst_race_difference, 0.0);
    }
}
