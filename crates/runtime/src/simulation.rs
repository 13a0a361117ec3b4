//! Tick driver that hosts a scene over the concrete oracles.
use std::collections::HashMap;

use serde::Serialize;

use glam::Vec3;
use tactics_core::{
    ActorId, ActorOracle, CellRef, ChooseRequest, Env, GridField, PathFollower, RayOracle, Scene,
    SpatialError, SpatialReasoner, TacticalEnv, TargetId, TargetState, TerrainOracle, Tick,
};

use crate::error::RuntimeError;
use crate::oracle::{ActorStore, GridRayOracle, RecordingPathFollower, TerrainOracleImpl};
use crate::scenario::{ActorRole, Scenario};

struct AgentRuntime {
    reasoner: SpatialReasoner,
    target: Option<ActorId>,
    follower: RecordingPathFollower,
}

/// Owns the oracle bundle and the scene, and advances them tick by tick.
///
/// Per tick: the scene's perception and belief pass first, then every
/// agent's position selection with path commitment. Hosts mutate actor
/// transforms between ticks through [`actors_mut`](Self::actors_mut).
pub struct Simulation {
    name: String,
    terrain: TerrainOracleImpl,
    ray: GridRayOracle,
    actors: ActorStore,
    scene: Scene,
    agents: Vec<AgentRuntime>,
    last_states: HashMap<TargetId, TargetState>,
}

impl Simulation {
    /// Builds the oracle bundle and scene a scenario describes.
    ///
    /// # Errors
    ///
    /// Rejects malformed maps, duplicate actor ids, placements outside the
    /// map, and duplicate scene registrations.
    pub fn from_scenario(scenario: &Scenario) -> Result<Self, RuntimeError> {
        let terrain =
            TerrainOracleImpl::from_rows(&scenario.map, scenario.cell_size, scenario.origin)?;
        let ray = GridRayOracle::new(&terrain);
        let mut actors = ActorStore::new();

        for placement in &scenario.actors {
            let id = ActorId(placement.id);
            if actors.contains(id) {
                return Err(RuntimeError::InvalidScenario(format!(
                    "actor {id} placed twice"
                )));
            }
            let cell = CellRef::new(placement.cell.0, placement.cell.1);
            if !terrain.bounds().contains(cell) {
                return Err(RuntimeError::InvalidScenario(format!(
                    "actor {id} placed outside the map at {cell}"
                )));
            }
            actors.place(id, terrain.cell_position(cell), placement.forward);
        }

        let mut scene = Scene::new(scenario.config());
        let mut agents = Vec::new();
        {
            let env = Env::new(
                Some(&terrain as &dyn TerrainOracle),
                Some(&ray as &dyn RayOracle),
                Some(&actors as &dyn ActorOracle),
            );
            for placement in &scenario.actors {
                let id = ActorId(placement.id);
                match &placement.role {
                    ActorRole::Observer { vision } => scene.register_observer(id, *vision)?,
                    ActorRole::Target { target } => {
                        scene.register_target(TargetId(*target), id, &env)?
                    }
                    ActorRole::Agent { function, target } => agents.push(AgentRuntime {
                        reasoner: SpatialReasoner::new(id, scenario.sample_extent)
                            .with_function(function.clone()),
                        target: target.map(ActorId),
                        follower: RecordingPathFollower::new(),
                    }),
                }
            }
        }

        tracing::info!(
            name = %scenario.name,
            actors = scenario.actors.len(),
            agents = agents.len(),
            "scenario loaded"
        );

        Ok(Self {
            name: scenario.name.clone(),
            terrain,
            ray,
            actors,
            scene,
            agents,
            last_states: HashMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn terrain(&self) -> &TerrainOracleImpl {
        &self.terrain
    }

    /// Mutable actor transforms, for moving actors between ticks.
    pub fn actors_mut(&mut self) -> &mut ActorStore {
        &mut self.actors
    }

    /// Read-only environment over this simulation's oracles.
    pub fn env(&self) -> TacticalEnv<'_> {
        Env::new(
            Some(&self.terrain as &dyn TerrainOracle),
            Some(&self.ray as &dyn RayOracle),
            Some(&self.actors as &dyn ActorOracle),
        )
    }

    /// Route most recently committed for an agent, if any.
    pub fn agent_path(&self, agent: ActorId) -> Option<&[Vec3]> {
        self.agent(agent)?.follower.current_path()
    }

    /// Cell most recently chosen for an agent.
    pub fn agent_best_cell(&self, agent: ActorId) -> Option<CellRef> {
        let cell = self.agent(agent)?.reasoner.best_cell();
        cell.is_valid().then_some(cell)
    }

    fn agent(&self, agent: ActorId) -> Option<&AgentRuntime> {
        self.agents
            .iter()
            .find(|runtime| runtime.reasoner.agent() == agent)
    }

    /// Advances the world one tick: scene first, then every agent's
    /// position selection with path commitment.
    ///
    /// An agent finding no reachable cell is logged and skipped (its route
    /// is cleared); every other failure aborts the tick.
    pub fn tick(&mut self) -> Result<Tick, RuntimeError> {
        let env = Env::new(
            Some(&self.terrain as &dyn TerrainOracle),
            Some(&self.ray as &dyn RayOracle),
            Some(&self.actors as &dyn ActorOracle),
        );

        let tick = self.scene.tick(&env)?;

        for target in self.scene.targets() {
            let state = target.state();
            let previous = self.last_states.insert(target.id(), state);
            if previous != Some(state) {
                tracing::debug!(
                    target_id = %target.id(),
                    from = ?previous,
                    to = %state,
                    "target state changed"
                );
            }
        }

        for agent in &mut self.agents {
            let request = ChooseRequest {
                target: agent.target,
                commit_path: true,
            };
            let follower = &mut agent.follower as &mut dyn PathFollower;
            match agent.reasoner.choose_position(request, &env, Some(follower)) {
                Ok(cell) => {
                    tracing::debug!(agent = %agent.reasoner.agent(), %cell, "position chosen");
                }
                Err(SpatialError::NoReachableCell) => {
                    tracing::warn!(
                        agent = %agent.reasoner.agent(),
                        "no reachable cell, route cleared"
                    );
                }
                Err(err) => {
                    tracing::warn!(agent = %agent.reasoner.agent(), error = %err, "position selection failed");
                    return Err(err.into());
                }
            }
        }

        tracing::trace!(tick = %tick, rays = self.ray.take_cast_count(), "tick complete");
        Ok(tick)
    }

    /// Clones the observable state of the scene for export.
    pub fn snapshot(&self) -> SimulationSnapshot {
        let targets = self
            .scene
            .targets()
            .iter()
            .map(|tracker| TargetSnapshot {
                id: tracker.id(),
                state: tracker.state(),
                position: tracker.cache().position,
                total_mass: tracker.total_mass(),
                belief: tracker.belief().clone(),
            })
            .collect();

        let agents = self
            .agents
            .iter()
            .map(|runtime| AgentSnapshot {
                agent: runtime.reasoner.agent(),
                best_cell: runtime.reasoner.best_cell(),
                scores: runtime.reasoner.score_map().cloned(),
                path: runtime.follower.current_path().map(<[Vec3]>::to_vec),
            })
            .collect();

        SimulationSnapshot {
            tick: self.scene.tick_count(),
            targets,
            agents,
        }
    }

    /// Serializes the current snapshot as pretty JSON for external viewers.
    pub fn snapshot_json(&self) -> Result<String, RuntimeError> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

/// Debug export of everything an external visualizer needs.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationSnapshot {
    pub tick: Tick,
    pub targets: Vec<TargetSnapshot>,
    pub agents: Vec<AgentSnapshot>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TargetSnapshot {
    pub id: TargetId,
    pub state: TargetState,
    pub position: Vec3,
    pub total_mass: f32,
    pub belief: GridField<f32>,
}

#[derive(Clone, Debug, Serialize)]
pub struct AgentSnapshot {
    pub agent: ActorId,
    pub best_cell: CellRef,
    pub scores: Option<GridField<f32>>,
    pub path: Option<Vec<Vec3>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic_scenario() -> Scenario {
        Scenario::from_ron(
            r#"
            Scenario(
                name: "watch",
                map: ["....", "...."],
                cell_size: 100.0,
                actors: [
                    ActorPlacement(
                        id: 0,
                        cell: (0, 0),
                        role: Observer(vision: (angle_deg: 90.0, range: 8000.0)),
                    ),
                    ActorPlacement(
                        id: 1,
                        cell: (3, 0),
                        role: Target(target: 1),
                    ),
                ],
            )
            "#,
        )
        .unwrap()
    }

    #[test]
    fn builds_and_ticks_a_scenario() {
        let mut simulation = Simulation::from_scenario(&basic_scenario()).unwrap();
        for _ in 0..10 {
            simulation.tick().unwrap();
        }
        assert_eq!(
            simulation.scene().target_state(TargetId(1)),
            Ok(TargetState::Immediate)
        );
        assert_eq!(simulation.scene().tick_count(), Tick(10));
    }

    #[test]
    fn rejects_out_of_bounds_placement() {
        let mut scenario = basic_scenario();
        scenario.actors[1].cell = (9, 9);
        assert!(matches!(
            Simulation::from_scenario(&scenario),
            Err(RuntimeError::InvalidScenario(_))
        ));
    }

    #[test]
    fn rejects_duplicate_actor_ids() {
        let mut scenario = basic_scenario();
        scenario.actors[1].id = 0;
        assert!(matches!(
            Simulation::from_scenario(&scenario),
            Err(RuntimeError::InvalidScenario(_))
        ));
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut simulation = Simulation::from_scenario(&basic_scenario()).unwrap();
        simulation.tick().unwrap();
        let json = simulation.snapshot_json().unwrap();
        assert!(json.contains("\"targets\""));
        assert!(json.contains("\"tick\""));
    }
}
