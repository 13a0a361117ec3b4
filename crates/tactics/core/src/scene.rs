//! Composition root for one simulated arena.
//!
//! The scene owns every perception tracker and belief estimator and drives
//! them in a fixed order each tick: all perception updates first, then all
//! belief updates, so harvesting always reads this tick's visibility. It is
//! handed its [`TacticalEnv`] explicitly on every call; it never holds world
//! references of its own.
use crate::belief::{TargetState, TargetTracker};
use crate::config::TacticsConfig;
use crate::env::{OracleError, TacticalEnv};
use crate::error::{CoreError, ErrorSeverity};
use crate::perception::{PerceptionTracker, VisionParams};
use crate::types::{ActorId, TargetId, Tick};

#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("observer {0} is already registered")]
    DuplicateObserver(ActorId),

    #[error("target {0} is already registered")]
    DuplicateTarget(TargetId),

    #[error("target {0} is not registered")]
    UnknownTarget(TargetId),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CoreError for SceneError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::DuplicateObserver(_) | Self::DuplicateTarget(_) | Self::UnknownTarget(_) => {
                ErrorSeverity::Validation
            }
            Self::Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateObserver(_) => "SCENE_DUPLICATE_OBSERVER",
            Self::DuplicateTarget(_) => "SCENE_DUPLICATE_TARGET",
            Self::UnknownTarget(_) => "SCENE_UNKNOWN_TARGET",
            Self::Oracle(inner) => inner.error_code(),
        }
    }
}

/// Registry and tick driver for the tactical reasoning of one arena.
#[derive(Clone, Debug)]
pub struct Scene {
    config: TacticsConfig,
    observers: Vec<PerceptionTracker>,
    targets: Vec<TargetTracker>,
    tick: Tick,
}

impl Scene {
    pub fn new(config: TacticsConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
            targets: Vec::new(),
            tick: Tick::ZERO,
        }
    }

    pub fn config(&self) -> &TacticsConfig {
        &self.config
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> Tick {
        self.tick
    }

    /// Registers an observing actor with its vision envelope.
    pub fn register_observer(
        &mut self,
        actor: ActorId,
        vision: VisionParams,
    ) -> Result<(), SceneError> {
        if self.observer(actor).is_some() {
            return Err(SceneError::DuplicateObserver(actor));
        }
        self.observers.push(PerceptionTracker::new(
            actor,
            vision,
            self.config.awareness_step,
        ));
        Ok(())
    }

    /// Removes an observer and its perception table. A no-op for actors that
    /// were never registered.
    pub fn deregister_observer(&mut self, actor: ActorId) {
        self.observers.retain(|observer| observer.observer() != actor);
    }

    /// Registers a trackable target, creating its belief estimator over the
    /// terrain's full bounds.
    pub fn register_target(
        &mut self,
        id: TargetId,
        actor: ActorId,
        env: &TacticalEnv<'_>,
    ) -> Result<(), SceneError> {
        if self.target(id).is_some() {
            return Err(SceneError::DuplicateTarget(id));
        }
        self.targets.push(TargetTracker::new(id, actor, env)?);
        Ok(())
    }

    /// Removes a target's belief estimator and every observer's perception
    /// record for it.
    pub fn deregister_target(&mut self, id: TargetId) {
        self.targets.retain(|target| target.id() != id);
        for observer in &mut self.observers {
            observer.remove_target(id);
        }
    }

    pub fn observer(&self, actor: ActorId) -> Option<&PerceptionTracker> {
        self.observers
            .iter()
            .find(|observer| observer.observer() == actor)
    }

    pub fn observers(&self) -> &[PerceptionTracker] {
        &self.observers
    }

    pub fn target(&self, id: TargetId) -> Option<&TargetTracker> {
        self.targets.iter().find(|target| target.id() == id)
    }

    pub fn targets(&self) -> &[TargetTracker] {
        &self.targets
    }

    /// Knowledge state of a target.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnknownTarget`] when `id` is not registered.
    pub fn target_state(&self, id: TargetId) -> Result<TargetState, SceneError> {
        self.target(id)
            .map(TargetTracker::state)
            .ok_or(SceneError::UnknownTarget(id))
    }

    /// Targets that have been perceived at least once, in registration order.
    pub fn known_targets(&self) -> impl Iterator<Item = &TargetTracker> + '_ {
        self.targets.iter().filter(|target| target.is_known())
    }

    /// Advances the whole scene by one tick and returns the new tick count.
    ///
    /// Every (observer, target) perception pair updates before any belief
    /// estimator runs; registration order fixes the iteration order, so
    /// repeated runs over the same world are bit-identical.
    pub fn tick(&mut self, env: &TacticalEnv<'_>) -> Result<Tick, SceneError> {
        for observer in &mut self.observers {
            for target in &self.targets {
                observer.update_target(target.id(), target.actor(), env)?;
            }
        }

        for target in &mut self.targets {
            target.tick(&self.observers, env)?;
        }

        self.tick = self.tick.next();
        Ok(self.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TestWorld;
    use glam::Vec3;

    fn scene() -> Scene {
        Scene::new(TacticsConfig::default())
    }

    #[test]
    fn duplicate_registrations_are_rejected() {
        let world = TestWorld::open(4, 4);
        let mut scene = scene();

        scene
            .register_observer(ActorId(0), VisionParams::default())
            .unwrap();
        assert_eq!(
            scene.register_observer(ActorId(0), VisionParams::default()),
            Err(SceneError::DuplicateObserver(ActorId(0)))
        );

        scene
            .register_target(TargetId(1), ActorId(1), &world.env())
            .unwrap();
        assert_eq!(
            scene.register_target(TargetId(1), ActorId(2), &world.env()),
            Err(SceneError::DuplicateTarget(TargetId(1)))
        );
    }

    #[test]
    fn unknown_target_state_is_an_error() {
        let scene = scene();
        assert_eq!(
            scene.target_state(TargetId(9)),
            Err(SceneError::UnknownTarget(TargetId(9)))
        );
    }

    #[test]
    fn tick_promotes_a_watched_target() {
        let mut world = TestWorld::open(8, 8);
        world.place_actor(ActorId(0), Vec3::new(50.0, 50.0, 0.0), Vec3::X);
        world.place_actor(ActorId(1), Vec3::new(250.0, 50.0, 0.0), Vec3::X);

        let mut scene = scene();
        scene
            .register_observer(ActorId(0), VisionParams::default())
            .unwrap();
        scene
            .register_target(TargetId(1), ActorId(1), &world.env())
            .unwrap();

        // Default awareness step is 0.1: ten visible ticks saturate it.
        for _ in 0..10 {
            scene.tick(&world.env()).unwrap();
        }
        assert_eq!(scene.target_state(TargetId(1)), Ok(TargetState::Immediate));
        assert_eq!(scene.tick_count(), Tick(10));
    }

    #[test]
    fn known_targets_excludes_the_never_seen() {
        let mut world = TestWorld::open(8, 8);
        world.place_actor(ActorId(0), Vec3::new(50.0, 50.0, 0.0), Vec3::X);
        world.place_actor(ActorId(1), Vec3::new(250.0, 50.0, 0.0), Vec3::X);
        // Behind the observer, never perceived.
        world.place_actor(ActorId(2), Vec3::new(-500.0, 50.0, 0.0), Vec3::X);

        let mut scene = scene();
        scene
            .register_observer(ActorId(0), VisionParams::default())
            .unwrap();
        scene
            .register_target(TargetId(1), ActorId(1), &world.env())
            .unwrap();
        scene
            .register_target(TargetId(2), ActorId(2), &world.env())
            .unwrap();

        for _ in 0..10 {
            scene.tick(&world.env()).unwrap();
        }

        let known: Vec<TargetId> = scene.known_targets().map(TargetTracker::id).collect();
        assert_eq!(known, vec![TargetId(1)]);
        assert_eq!(scene.target_state(TargetId(2)), Ok(TargetState::Unknown));
    }

    #[test]
    fn deregistering_a_target_drops_perception_records() {
        let mut world = TestWorld::open(8, 8);
        world.place_actor(ActorId(0), Vec3::new(50.0, 50.0, 0.0), Vec3::X);
        world.place_actor(ActorId(1), Vec3::new(250.0, 50.0, 0.0), Vec3::X);

        let mut scene = scene();
        scene
            .register_observer(ActorId(0), VisionParams::default())
            .unwrap();
        scene
            .register_target(TargetId(1), ActorId(1), &world.env())
            .unwrap();
        scene.tick(&world.env()).unwrap();
        assert!(scene.observer(ActorId(0)).unwrap().target_data(TargetId(1)).is_some());

        scene.deregister_target(TargetId(1));
        assert!(scene.target(TargetId(1)).is_none());
        assert!(scene.observer(ActorId(0)).unwrap().target_data(TargetId(1)).is_none());
    }
}
