//! Multi-criteria selection of where an agent should stand.
//!
//! Evaluation is explicit and ordered: build the reachability field over the
//! sample window, run the configured scoring layers in sequence, take the
//! arg-max cell, then optionally hand the route to a path follower. Layers
//! are data ([`SpatialFunction`]); the [`SpatialReasoner`] executes them.
mod function;
mod reasoner;
mod search;

pub use function::{CombineOp, CurveKey, ResponseCurve, ScoringLayer, SignalSource, SpatialFunction};
pub use reasoner::{ChooseRequest, SpatialError, SpatialReasoner};
pub use search::{DistanceField, UNREACHED};
