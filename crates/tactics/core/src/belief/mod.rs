//! Probabilistic belief of where each target is when it cannot be seen.
//!
//! One [`TargetTracker`] per target entity. While a target is directly
//! perceived its cache mirrors ground truth; once it slips out of sight the
//! tracker evolves a probability-mass [`GridField`](crate::grid::GridField)
//! over the terrain: harvest mass from cells proven empty by observation,
//! renormalize, extract the arg-max estimate, and diffuse to model growing
//! uncertainty.
mod tracker;

pub use tracker::{TargetCache, TargetState, TargetTracker};
