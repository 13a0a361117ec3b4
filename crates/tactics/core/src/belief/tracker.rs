use arrayvec::ArrayVec;
use glam::Vec3;

use crate::config::TacticsConfig;
use crate::env::{OracleError, TacticalEnv};
use crate::grid::{CellRef, GridField};
use crate::perception::PerceptionTracker;
use crate::types::{ActorId, TargetId};

/// Discrete knowledge state of a target.
///
/// Transitions only as Unknown → Immediate and Immediate ↔ Hidden; once a
/// target has been known it never returns to Unknown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetState {
    /// Never perceived by any observer.
    #[default]
    Unknown,
    /// Previously known; current position is a belief-map estimate.
    Hidden,
    /// Some observer's awareness is saturated; position is ground truth.
    Immediate,
}

/// Last-known cache of a target: position, heading, and knowledge state.
///
/// While [`TargetState::Immediate`] both fields are refreshed from ground
/// truth; while [`TargetState::Hidden`] the position is the belief estimate
/// and the heading stays frozen at its value from the moment sight was lost.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetCache {
    pub position: Vec3,
    pub heading: Vec3,
    pub state: TargetState,
}

/// Belief estimator for a single target entity.
///
/// Owns the target's belief map; created on registration and destroyed on
/// deregistration. The map persists and evolves tick over tick, unlike the
/// spatial reasoner's maps which are rebuilt per evaluation.
#[derive(Clone, Debug)]
pub struct TargetTracker {
    id: TargetId,
    actor: ActorId,
    cache: TargetCache,
    belief: GridField<f32>,
}

impl TargetTracker {
    /// Creates a tracker whose belief map spans `env`'s full terrain bounds,
    /// initially all zero (nothing known).
    pub fn new(id: TargetId, actor: ActorId, env: &TacticalEnv<'_>) -> Result<Self, OracleError> {
        let bounds = env.terrain()?.bounds();
        Ok(Self {
            id,
            actor,
            cache: TargetCache::default(),
            belief: GridField::new(bounds, 0.0),
        })
    }

    pub fn id(&self) -> TargetId {
        self.id
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn cache(&self) -> &TargetCache {
        &self.cache
    }

    pub fn state(&self) -> TargetState {
        self.cache.state
    }

    /// True once the target has ever been directly perceived.
    pub fn is_known(&self) -> bool {
        self.cache.state != TargetState::Unknown
    }

    pub fn belief(&self) -> &GridField<f32> {
        &self.belief
    }

    /// Total probability mass currently in the belief map.
    pub fn total_mass(&self) -> f32 {
        self.belief.sum()
    }

    /// Advances the knowledge state machine and belief map by one tick.
    ///
    /// Must run after every observer's perception update for this tick;
    /// harvesting reads the observers' current visibility.
    pub fn tick(
        &mut self,
        observers: &[PerceptionTracker],
        env: &TacticalEnv<'_>,
    ) -> Result<(), OracleError> {
        let immediate = observers.iter().any(|observer| {
            observer
                .target_data(self.id)
                .is_some_and(|data| data.awareness >= 1.0)
        });

        if immediate {
            self.refresh_from_ground_truth(env)?;
        } else if self.is_known() {
            self.cache.state = TargetState::Hidden;
            self.observe_and_estimate(observers, env)?;
            self.diffuse(env)?;
        }

        Ok(())
    }

    /// Immediate tick: cache mirrors the actor's true transform and the
    /// belief map collapses to a delta at the observed cell. This is also
    /// the map's seed: the first Hidden tick diffuses outward from here.
    fn refresh_from_ground_truth(&mut self, env: &TacticalEnv<'_>) -> Result<(), OracleError> {
        let actors = env.actors()?;
        let position = actors
            .position(self.actor)
            .ok_or(OracleError::ActorNotFound(self.actor))?;
        let heading = actors
            .forward(self.actor)
            .ok_or(OracleError::ActorNotFound(self.actor))?;

        self.cache = TargetCache {
            position,
            heading,
            state: TargetState::Immediate,
        };

        self.belief.reset(0.0);
        if let Some(cell) = env.terrain()?.cell_at(position) {
            self.belief.set(cell, 1.0);
        }
        Ok(())
    }

    /// Hidden tick, steps 1-3: harvest visible cells, renormalize the
    /// survivors in place, and refresh the cached position from the arg-max
    /// cell. The heading is left frozen.
    fn observe_and_estimate(
        &mut self,
        observers: &[PerceptionTracker],
        env: &TacticalEnv<'_>,
    ) -> Result<(), OracleError> {
        let harvest = self.harvest(observers, env)?;
        let terrain = env.terrain()?;

        if harvest.total >= 1.0 - TacticsConfig::MASS_EPSILON {
            // Fully observed: every cell that held mass was just proven
            // visible. Rather than divide by ~zero, fall back to the
            // strongest harvested cell as the point estimate.
            self.belief.reset(0.0);
            if harvest.strongest.is_valid() {
                self.belief.set(harvest.strongest, 1.0);
                self.cache.position = terrain.cell_position(harvest.strongest);
            }
            return Ok(());
        }

        if harvest.total > 0.0 {
            self.belief.scale(1.0 / (1.0 - harvest.total));
        }

        if let Some((cell, mass)) = self.belief.max_cell() {
            // An all-zero map (nothing was ever seeded) carries no estimate;
            // keep the cached position instead of snapping to the scan-order
            // first cell of a flat field.
            if mass > 0.0 {
                self.cache.position = terrain.cell_position(cell);
            }
        }
        Ok(())
    }

    /// Removes the mass of every cell currently visible to any observer.
    /// Each cell is harvested at most once per pass.
    fn harvest(
        &mut self,
        observers: &[PerceptionTracker],
        env: &TacticalEnv<'_>,
    ) -> Result<Harvest, OracleError> {
        let terrain = env.terrain()?;
        let mut harvest = Harvest::default();

        for cell in self.belief.bounds().iter() {
            let mass = self.belief.get(cell).unwrap_or(0.0);
            if mass == 0.0 {
                continue;
            }

            let probe = terrain.cell_position(cell);
            let mut visible = false;
            for observer in observers {
                if observer.can_see_point(probe, env)? {
                    visible = true;
                    break;
                }
            }

            if visible {
                harvest.total += mass;
                if mass > harvest.strongest_mass {
                    harvest.strongest_mass = mass;
                    harvest.strongest = cell;
                }
                self.belief.set(cell, 0.0);
            }
        }

        Ok(harvest)
    }

    /// Hidden tick, step 4: spread each traversable cell's mass as the mean
    /// over itself and its traversable 8-neighborhood.
    ///
    /// Computed into a fresh buffer and swapped; each new value depends on
    /// the neighbors' old values, so in-place mutation would corrupt the
    /// pass.
    fn diffuse(&mut self, env: &TacticalEnv<'_>) -> Result<(), OracleError> {
        let terrain = env.terrain()?;
        let bounds = self.belief.bounds();
        let mut next = GridField::new(bounds, 0.0);

        for cell in bounds.iter() {
            if !terrain.is_traversable(cell) {
                continue;
            }

            // Cells outside the bounds or non-traversable count in neither
            // the sum nor the divisor.
            let mut neighborhood: ArrayVec<CellRef, 9> = ArrayVec::new();
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let neighbor = CellRef::new(cell.x + dx, cell.y + dy);
                    if bounds.contains(neighbor) && terrain.is_traversable(neighbor) {
                        neighborhood.push(neighbor);
                    }
                }
            }

            let sum: f32 = neighborhood
                .iter()
                .map(|n| self.belief.get(*n).unwrap_or(0.0))
                .sum();
            next.set(cell, sum / neighborhood.len() as f32);
        }

        self.belief = next;
        Ok(())
    }
}

/// Result of one harvest pass.
#[derive(Clone, Copy, Debug)]
struct Harvest {
    total: f32,
    strongest: CellRef,
    strongest_mass: f32,
}

impl Default for Harvest {
    fn default() -> Self {
        Self {
            total: 0.0,
            strongest: CellRef::INVALID,
            strongest_mass: 0.0,
        }
    }
}
