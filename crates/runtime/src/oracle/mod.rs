//! Concrete oracle implementations backing the core's traits.
mod actors;
mod path;
mod ray;
mod terrain;

pub use actors::ActorStore;
pub use path::RecordingPathFollower;
pub use ray::GridRayOracle;
pub use terrain::TerrainOracleImpl;
