//! Batch scoring job: run once results are ingested, before statistics.

use tracing::{error, info};

use crate::activation::Activation;
use crate::core::RaceId;
use crate::scoring::{ScoredSelection, ScoringEngine, ScoringError, Selection};

use super::RaceResultProvider;

/// Outcome of a batch scoring run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoringReport {
    pub scored: Vec<ScoredSelection>,
    /// Races left out because their data is incomplete. They stay out of
    /// statistics until ingestion is corrected and the job re-runs.
    pub excluded: Vec<(RaceId, ScoringError)>,
}

impl ScoringReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.excluded.is_empty()
    }
}

/// Score every listed race of a league.
///
/// A race whose result is missing or incomplete is excluded whole; the
/// other races are still scored.
pub fn score_league_races(
    engine: &ScoringEngine<'_>,
    results: &impl RaceResultProvider,
    races: &[RaceId],
    selections: &[Selection],
    activations: &[Activation],
) -> ScoringReport {
    let mut report = ScoringReport::default();

    for &race in races {
        let outcome = results
            .race_result(race)
            .ok_or(ScoringError::NoRaceResult { race })
            .and_then(|result| {
                let race_selections: Vec<Selection> =
                    selections.iter().filter(|s| s.race == race).copied().collect();
                let race_activations: Vec<Activation> =
                    activations.iter().filter(|a| a.race == race).cloned().collect();
                engine.score_race(&race_selections, &result, &race_activations)
            });

        match outcome {
            Ok(scored) => report.scored.extend(scored),
            Err(e) => {
                error!(race = %race, error = %e, "race excluded from scoring");
                report.excluded.push((race, e));
            }
        }
    }

    info!(
        scored = report.scored.len(),
        excluded = report.excluded.len(),
        "scoring pass finished"
    );
    report
}
