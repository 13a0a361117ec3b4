//! Instantaneous visibility and integrated awareness per observer.
//!
//! One [`PerceptionTracker`] per observer; one [`TargetData`] record per
//! (observer, target) pair. The scene runs every pair's update before any
//! belief estimator harvests visibility in the same tick.
mod tracker;
mod vision;

pub use tracker::{PerceptionTracker, TargetData};
pub use vision::VisionParams;
