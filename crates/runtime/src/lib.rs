//! Runtime hosting for the tactical reasoning core.
//!
//! This crate wires concrete oracles, scenario loading, and the tick driver
//! into an embeddable API. Consumers load a [`Scenario`], build a
//! [`Simulation`], move actors between ticks, and read scene state or JSON
//! snapshots back out.
//!
//! Modules are organized by responsibility:
//! - [`oracle`] implements the core's oracle traits over in-memory data
//! - [`scenario`] loads RON scenario files
//! - [`simulation`] owns the oracle bundle and drives the scene
pub mod oracle;
pub mod scenario;
pub mod simulation;

mod error;

pub use error::{Result, RuntimeError};
pub use oracle::{ActorStore, GridRayOracle, RecordingPathFollower, TerrainOracleImpl};
pub use scenario::{ActorPlacement, ActorRole, Scenario};
pub use simulation::{AgentSnapshot, Simulation, SimulationSnapshot, TargetSnapshot};
