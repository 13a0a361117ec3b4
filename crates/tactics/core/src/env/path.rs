use glam::Vec3;

/// Path-following / movement execution collaborator.
///
/// The spatial reasoner hands a chosen route to this component and otherwise
/// knows nothing about movement execution. Mutable by design: it is passed
/// separately from the read-only [`Env`](super::Env) aggregate.
pub trait PathFollower {
    /// Replaces the current route with `waypoints` (world positions, in
    /// travel order, starting at the agent's current position).
    fn commit_path(&mut self, waypoints: &[Vec3]);

    /// Drops any route currently being followed.
    fn clear_path(&mut self);
}
