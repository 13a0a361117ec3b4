//! Mutable actor transform store served through [`tactics_core::ActorOracle`].
use std::collections::HashMap;

use glam::Vec3;

use tactics_core::{ActorId, ActorOracle};

#[derive(Clone, Copy, Debug)]
struct ActorRecord {
    position: Vec3,
    forward: Vec3,
    velocity: Vec3,
}

/// In-memory actor transforms, mutated by the host between ticks.
#[derive(Clone, Debug, Default)]
pub struct ActorStore {
    records: HashMap<ActorId, ActorRecord>,
}

impl ActorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an actor's full transform.
    pub fn place(&mut self, id: ActorId, position: Vec3, forward: Vec3) {
        self.records.insert(
            id,
            ActorRecord {
                position,
                forward,
                velocity: Vec3::ZERO,
            },
        );
    }

    /// Moves an existing actor, updating its velocity to the displacement.
    /// A no-op for unknown actors.
    pub fn set_position(&mut self, id: ActorId, position: Vec3) {
        if let Some(record) = self.records.get_mut(&id) {
            record.velocity = position - record.position;
            record.position = position;
        }
    }

    pub fn set_forward(&mut self, id: ActorId, forward: Vec3) {
        if let Some(record) = self.records.get_mut(&id) {
            record.forward = forward;
        }
    }

    pub fn remove(&mut self, id: ActorId) {
        self.records.remove(&id);
    }

    pub fn contains(&self, id: ActorId) -> bool {
        self.records.contains_key(&id)
    }
}

impl ActorOracle for ActorStore {
    fn position(&self, actor: ActorId) -> Option<Vec3> {
        self.records.get(&actor).map(|record| record.position)
    }

    fn forward(&self, actor: ActorId) -> Option<Vec3> {
        self.records.get(&actor).map(|record| record.forward)
    }

    fn velocity(&self, actor: ActorId) -> Option<Vec3> {
        self.records.get(&actor).map(|record| record.velocity)
    }
}
