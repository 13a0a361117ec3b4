//! Deterministic tactical reasoning for grid-based agents.
//!
//! Three cooperating subsystems share one cell grid: perception integrates
//! per-observer awareness of targets, belief estimation maintains a
//! probability map of where each unseen target might be, and spatial
//! reasoning scores candidate standing positions through configurable
//! layered criteria. All of it is pure computation over oracle traits; the
//! host supplies terrain, ray casts, and actor transforms through an
//! explicitly wired [`Env`] and drives everything from a [`Scene`].
pub mod belief;
pub mod config;
pub mod env;
pub mod error;
pub mod grid;
pub mod perception;
pub mod scene;
pub mod spatial;
pub mod types;

#[cfg(test)]
mod testutil;

pub use belief::{TargetCache, TargetState, TargetTracker};
pub use config::TacticsConfig;
pub use env::{
    ActorOracle, Env, OracleError, PathFollower, RayOracle, TacticalEnv, TerrainOracle,
};
pub use error::{CoreError, ErrorSeverity};
pub use grid::{CellFlags, CellRef, GridBounds, GridField};
pub use perception::{PerceptionTracker, TargetData, VisionParams};
pub use scene::{Scene, SceneError};
pub use spatial::{
    ChooseRequest, CombineOp, CurveKey, DistanceField, ResponseCurve, ScoringLayer, SignalSource,
    SpatialError, SpatialFunction, SpatialReasoner, UNREACHED,
};
pub use types::{ActorId, TargetId, Tick};
