use glam::Vec3;

use crate::types::ActorId;

/// Line-of-sight / collision query collaborator.
///
/// This is the one external call the core treats as expensive; callers gate
/// it behind cheaper angle/distance checks wherever the semantics allow.
pub trait RayOracle: Send + Sync {
    /// Casts a ray from `start` to `end`, ignoring the listed actors.
    /// Returns `true` when something was hit (line of sight blocked).
    fn cast(&self, start: Vec3, end: Vec3, ignore: &[ActorId]) -> bool;
}
