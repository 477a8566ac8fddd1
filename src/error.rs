//! Crate-wide error taxonomy.
//!
//! Each component returns its own error enum. `EngineError` unifies them
//! for callers that drive several components (the batch scoring job, an
//! HTTP layer), and `ErrorKind` tells those callers how to react.

use thiserror::Error;

use crate::activation::ActivationError;
use crate::cards::CatalogError;
use crate::deck::DeckError;
use crate::scoring::ScoringError;
use crate::stats::StatsError;

/// How a caller should treat a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Rule violations in the input. Show to the user verbatim.
    Validation,
    /// Lock passed, card used, sprint weekend. Do not retry unchanged.
    State,
    /// Unknown card/target/race. The client holds stale data.
    Referential,
    /// Ingested data is missing or malformed. Operational failure; the
    /// affected race is excluded until ingestion is corrected.
    DataIntegrity,
}

/// Any engine failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error(transparent)]
    Activation(#[from] ActivationError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl EngineError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Catalog(
                CatalogError::DuplicateCard(_) | CatalogError::InvalidDefinition { .. },
            ) => ErrorKind::DataIntegrity,
            Self::Catalog(CatalogError::UnknownCard(_)) => ErrorKind::Referential,
            Self::Deck(e) => e.kind(),
            Self::Activation(e) => e.kind(),
            Self::Scoring(e) => e.kind(),
            Self::Stats(e) => e.kind(),
        }
    }
}
