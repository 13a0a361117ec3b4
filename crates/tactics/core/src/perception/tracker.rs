use std::collections::HashMap;

use glam::Vec3;

use crate::env::{OracleError, TacticalEnv};
use crate::types::{ActorId, TargetId};

use super::vision::{VisionParams, within_cone_and_range};

/// Per (observer, target) perception record.
///
/// Created lazily on the first encounter with a target and kept until the
/// observer or target deregisters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetData {
    /// Whether this observer had a clear line of sight on the last update.
    pub clear_los: bool,

    /// Accumulated awareness in [0, 1]; grows while line of sight holds and
    /// decays otherwise.
    pub awareness: f32,
}

/// Tracks instantaneous visibility and integrated awareness of every target
/// for a single observer.
///
/// The tracker's only side effect is writing into its own table; the scene
/// drives one [`update_target`](Self::update_target) per pair per tick.
#[derive(Clone, Debug)]
pub struct PerceptionTracker {
    observer: ActorId,
    vision: VisionParams,
    awareness_step: f32,
    table: HashMap<TargetId, TargetData>,
}

impl PerceptionTracker {
    pub fn new(observer: ActorId, vision: VisionParams, awareness_step: f32) -> Self {
        Self {
            observer,
            vision,
            awareness_step,
            table: HashMap::new(),
        }
    }

    pub fn observer(&self) -> ActorId {
        self.observer
    }

    pub fn vision(&self) -> &VisionParams {
        &self.vision
    }

    /// Perception record for a target, or `None` before the first encounter.
    pub fn target_data(&self, target: TargetId) -> Option<&TargetData> {
        self.table.get(&target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetId, &TargetData)> + '_ {
        self.table.iter().map(|(id, data)| (*id, data))
    }

    /// Drops the record for a deregistered target.
    pub fn remove_target(&mut self, target: TargetId) {
        self.table.remove(&target);
    }

    /// Runs one tick of the visibility test and awareness integration for a
    /// single (observer, target) pair.
    ///
    /// Visibility requires the target inside the field-of-view cone, within
    /// vision range, and an unobstructed ray; the ray is only cast once the
    /// cheap gates pass.
    ///
    /// # Errors
    ///
    /// Fails when a required oracle is missing or either actor has no
    /// transform.
    pub fn update_target(
        &mut self,
        target: TargetId,
        target_actor: ActorId,
        env: &TacticalEnv<'_>,
    ) -> Result<(), OracleError> {
        let actors = env.actors()?;
        let observer_pos = self
            .observer_position(env)?;
        let forward = actors
            .forward(self.observer)
            .ok_or(OracleError::ActorNotFound(self.observer))?;
        let target_pos = actors
            .position(target_actor)
            .ok_or(OracleError::ActorNotFound(target_actor))?;

        let mut clear_los = false;
        if within_cone_and_range(observer_pos, forward, target_pos, &self.vision) {
            let ray = env.ray()?;
            clear_los = !ray.cast(observer_pos, target_pos, &[self.observer, target_actor]);
        }

        let data = self.table.entry(target).or_default();
        data.clear_los = clear_los;
        let step = if clear_los {
            self.awareness_step
        } else {
            -self.awareness_step
        };
        data.awareness = (data.awareness + step).clamp(0.0, 1.0);

        Ok(())
    }

    /// World-space visibility test against an arbitrary probe point.
    ///
    /// Same rules as the actor test, substituting the probe for the target's
    /// position. The probe's height is coerced to the observer's height
    /// because the grid carries no elevation. Used by the belief estimator
    /// to decide which cells an observer currently sees.
    ///
    /// # Errors
    ///
    /// Fails when a required oracle is missing or the observer has no
    /// transform.
    pub fn can_see_point(&self, probe: Vec3, env: &TacticalEnv<'_>) -> Result<bool, OracleError> {
        let actors = env.actors()?;
        let observer_pos = self.observer_position(env)?;
        let forward = actors
            .forward(self.observer)
            .ok_or(OracleError::ActorNotFound(self.observer))?;

        let probe = Vec3::new(probe.x, probe.y, observer_pos.z);
        if !within_cone_and_range(observer_pos, forward, probe, &self.vision) {
            return Ok(false);
        }

        let ray = env.ray()?;
        Ok(!ray.cast(observer_pos, probe, &[self.observer]))
    }

    fn observer_position(&self, env: &TacticalEnv<'_>) -> Result<Vec3, OracleError> {
        env.actors()?
            .position(self.observer)
            .ok_or(OracleError::ActorNotFound(self.observer))
    }
}
