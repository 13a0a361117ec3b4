//! Oracle access errors.
use crate::error::{CoreError, ErrorSeverity};
use crate::grid::CellRef;
use crate::types::ActorId;

/// Errors that occur when accessing collaborator oracles.
///
/// Missing oracles are configuration errors detected at the start of an
/// operation: the operation reports failure and the tick loop continues.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// TerrainOracle is not available in the environment.
    #[error("TerrainOracle not available")]
    TerrainNotAvailable,

    /// RayOracle is not available in the environment.
    #[error("RayOracle not available")]
    RayNotAvailable,

    /// ActorOracle is not available in the environment.
    #[error("ActorOracle not available")]
    ActorsNotAvailable,

    /// Actor transform was not found by id.
    #[error("actor {0} not found")]
    ActorNotFound(ActorId),

    /// Cell lies outside the terrain bounds.
    #[error("cell {0} is out of grid bounds")]
    CellOutOfBounds(CellRef),
}

impl CoreError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            // Missing oracles mean the scene was wired incompletely.
            TerrainNotAvailable | RayNotAvailable | ActorsNotAvailable => ErrorSeverity::Fatal,

            ActorNotFound(_) | CellOutOfBounds(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            TerrainNotAvailable => "ORACLE_TERRAIN_NOT_AVAILABLE",
            RayNotAvailable => "ORACLE_RAY_NOT_AVAILABLE",
            ActorsNotAvailable => "ORACLE_ACTORS_NOT_AVAILABLE",
            ActorNotFound(_) => "ORACLE_ACTOR_NOT_FOUND",
            CellOutOfBounds(_) => "ORACLE_CELL_OUT_OF_BOUNDS",
        }
    }
}
