use thiserror::Error;

use super::config::ConfigError;
use crate::core::error::ValidationError;
use crate::core::io::molden::FormatError;
use crate::core::io::summary::SummaryError;
use crate::core::io::traits::WriteError;

/// An operation was invoked out of order on a [`Tabulator`](super::tabulator::Tabulator).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("Orbital data is unavailable because only the molecule was parsed")]
    MoleculeOnly,

    #[error("Grid is not defined; create a grid before tabulating")]
    NoGrid,

    #[error("GTOs have not been tabulated; call tabulate_gtos first")]
    NoBasis,

    #[error("The grid kind is unknown; only Cartesian and spherical grids can be tabulated")]
    UnknownGrid,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to parse Molden input: {source}")]
    Format {
        #[from]
        source: FormatError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid operation order: {0}")]
    State(#[from] StateError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write orbital summary: {0}")]
    Summary(#[from] SummaryError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start the tabulation worker pool: {0}")]
    WorkerPool(String),

    #[error("Internal logic error: {0}")]
    Internal(String),
}

impl From<WriteError> for EngineError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::Io(e) => EngineError::Io(e),
            WriteError::Validation(e) => EngineError::Validation(e),
        }
    }
}
