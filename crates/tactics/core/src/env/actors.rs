use glam::Vec3;

use crate::types::ActorId;

/// Transform access for observers, targets, and agents.
///
/// Every accessor returns `Option`: an unregistered id yields "not found",
/// never a fabricated transform.
pub trait ActorOracle: Send + Sync {
    fn position(&self, actor: ActorId) -> Option<Vec3>;

    /// Unit forward vector of the actor's facing.
    fn forward(&self, actor: ActorId) -> Option<Vec3>;

    fn velocity(&self, actor: ActorId) -> Option<Vec3>;
}
