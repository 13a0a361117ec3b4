//! Unified error type surfaced by the runtime crate.
//!
//! Wraps scenario loading, oracle wiring, and reasoning failures so hosts
//! can bubble them up with consistent context.
use std::path::PathBuf;

use thiserror::Error;

use tactics_core::{OracleError, SceneError, SpatialError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to read scenario file {path}")]
    ScenarioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario file {path}")]
    ScenarioParse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("invalid map: {0}")]
    InvalidMap(String),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("failed to serialize snapshot")]
    Snapshot(#[from] serde_json::Error),
}
