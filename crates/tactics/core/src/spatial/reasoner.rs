use glam::Vec3;

use crate::env::{OracleError, PathFollower, TacticalEnv};
use crate::error::{CoreError, ErrorSeverity};
use crate::grid::{CellRef, GridField};
use crate::types::ActorId;

use super::function::{CombineOp, ScoringLayer, SignalSource, SpatialFunction};
use super::search::DistanceField;

/// Errors reported by a position-selection pass.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SpatialError {
    /// No spatial function has been assigned to this reasoner.
    #[error("no spatial function configured")]
    MissingFunction,

    /// Path commitment was requested without a path follower.
    #[error("path follower required to commit a path")]
    MissingPathFollower,

    /// A target-dependent layer ran without a designated target. The caller
    /// must prevent this; there is no fallback signal.
    #[error("{signal} layer requires a designated target")]
    MissingTarget { signal: SignalSource },

    /// The agent stands outside the grid, so no sample window exists.
    #[error("agent {0} is outside the grid")]
    AgentOffGrid(ActorId),

    /// No cell in the sample window was reachable from the agent.
    #[error("no reachable cell in the sample window")]
    NoReachableCell,

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CoreError for SpatialError {
    fn severity(&self) -> ErrorSeverity {
        use SpatialError::*;
        match self {
            MissingFunction | MissingPathFollower => ErrorSeverity::Fatal,
            MissingTarget { .. } | AgentOffGrid(_) => ErrorSeverity::Validation,
            NoReachableCell => ErrorSeverity::Recoverable,
            Oracle(inner) => inner.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        use SpatialError::*;
        match self {
            MissingFunction => "SPATIAL_MISSING_FUNCTION",
            MissingPathFollower => "SPATIAL_MISSING_PATH_FOLLOWER",
            MissingTarget { .. } => "SPATIAL_MISSING_TARGET",
            AgentOffGrid(_) => "SPATIAL_AGENT_OFF_GRID",
            NoReachableCell => "SPATIAL_NO_REACHABLE_CELL",
            Oracle(inner) => inner.error_code(),
        }
    }
}

/// Parameters of one position-selection pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChooseRequest {
    /// Actor the target-dependent layers measure against.
    pub target: Option<ActorId>,

    /// When set, the chosen route is handed to the path follower (and a
    /// failed selection clears any existing route). When unset the chosen
    /// cell is only recorded for inspection.
    pub commit_path: bool,
}

impl ChooseRequest {
    pub fn against(target: ActorId) -> Self {
        Self {
            target: Some(target),
            commit_path: false,
        }
    }

    pub fn with_commit(mut self) -> Self {
        self.commit_path = true;
        self
    }
}

/// Picks the best nearby standing position for one agent.
///
/// Every call rebuilds the distance and score maps from scratch; only the
/// previous best cell survives between evaluations (for the optional
/// sticky-cell bonus and for inspection).
#[derive(Clone, Debug)]
pub struct SpatialReasoner {
    agent: ActorId,
    sample_extent: f32,
    function: Option<SpatialFunction>,
    /// Score pre-seeded on the previous best cell before layers run, damping
    /// oscillation between near-equal positions. Zero disables it.
    last_cell_bonus: f32,
    best_cell: CellRef,
    score_map: Option<GridField<f32>>,
}

impl SpatialReasoner {
    pub fn new(agent: ActorId, sample_extent: f32) -> Self {
        Self {
            agent,
            sample_extent,
            function: None,
            last_cell_bonus: 0.0,
            best_cell: CellRef::INVALID,
            score_map: None,
        }
    }

    pub fn with_function(mut self, function: SpatialFunction) -> Self {
        self.function = Some(function);
        self
    }

    pub fn with_last_cell_bonus(mut self, bonus: f32) -> Self {
        self.last_cell_bonus = bonus;
        self
    }

    pub fn agent(&self) -> ActorId {
        self.agent
    }

    pub fn set_function(&mut self, function: SpatialFunction) {
        self.function = Some(function);
    }

    /// Cell chosen by the most recent successful pass.
    pub fn best_cell(&self) -> CellRef {
        self.best_cell
    }

    /// Score map left by the most recent pass, for external visualization.
    pub fn score_map(&self) -> Option<&GridField<f32>> {
        self.score_map.as_ref()
    }

    /// Evaluates the configured layers over every reachable cell around the
    /// agent and selects the arg-max cell.
    ///
    /// Runs the four steps in order: reachability (Dijkstra over the sample
    /// window), layer evaluation, arg-max selection with scan-order
    /// tie-break, and optional path commitment.
    ///
    /// # Errors
    ///
    /// Configuration failures (missing function, missing oracle, missing
    /// path follower when commitment was requested) abort before any map is
    /// built. [`SpatialError::NoReachableCell`] reports an empty reachable
    /// set; when path commitment was requested the follower's route has been
    /// cleared by then.
    pub fn choose_position(
        &mut self,
        request: ChooseRequest,
        env: &TacticalEnv<'_>,
        mut path_follower: Option<&mut dyn PathFollower>,
    ) -> Result<CellRef, SpatialError> {
        let function = self.function.clone().ok_or(SpatialError::MissingFunction)?;
        if request.commit_path && path_follower.is_none() {
            return Err(SpatialError::MissingPathFollower);
        }

        let terrain = env.terrain()?;
        let agent_pos = env
            .actors()?
            .position(self.agent)
            .ok_or(OracleError::ActorNotFound(self.agent))?;

        let last_cell = self.best_cell;
        self.best_cell = CellRef::INVALID;

        let window = terrain
            .sample_window(agent_pos, self.sample_extent)
            .ok_or(SpatialError::AgentOffGrid(self.agent))?;
        let source = terrain
            .cell_at(agent_pos)
            .ok_or(SpatialError::AgentOffGrid(self.agent))?;

        // Step 1: reachability. Must complete before any layer reads it.
        let distances = DistanceField::compute(source, window, terrain);

        let mut scores = GridField::new(window, 0.0);
        if self.last_cell_bonus != 0.0 && distances.is_reached(last_cell) {
            scores.set(last_cell, self.last_cell_bonus);
        }

        // Step 2: layers, in configured order.
        for layer in &function.layers {
            self.evaluate_layer(layer, request.target, &distances, &mut scores, env)?;
        }

        // Step 3: arg-max over reachable cells, scan-order first on ties.
        let mut best: Option<(CellRef, f32)> = None;
        for (cell, score) in scores.iter() {
            if !distances.is_reached(cell) {
                continue;
            }
            let replace = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if replace {
                best = Some((cell, score));
            }
        }

        self.score_map = Some(scores);

        // Step 4: commit or clear.
        match best {
            Some((cell, _)) => {
                self.best_cell = cell;
                if request.commit_path {
                    if let (Some(follower), Some(route)) =
                        (path_follower.as_deref_mut(), distances.reconstruct_path(cell))
                    {
                        let mut waypoints: Vec<Vec3> = Vec::with_capacity(route.len() + 1);
                        waypoints.push(agent_pos);
                        waypoints.extend(route.into_iter().skip(1).map(|c| terrain.cell_position(c)));
                        follower.commit_path(&waypoints);
                    }
                }
                Ok(cell)
            }
            None => {
                if request.commit_path {
                    if let Some(follower) = path_follower.as_deref_mut() {
                        follower.clear_path();
                    }
                }
                Err(SpatialError::NoReachableCell)
            }
        }
    }

    /// Applies one layer across every traversable, reached cell.
    fn evaluate_layer(
        &self,
        layer: &ScoringLayer,
        target: Option<ActorId>,
        distances: &DistanceField,
        scores: &mut GridField<f32>,
        env: &TacticalEnv<'_>,
    ) -> Result<(), SpatialError> {
        let terrain = env.terrain()?;

        let target_info = match layer.signal {
            SignalSource::TargetRange | SignalSource::LineOfSight => {
                let target = target.ok_or(SpatialError::MissingTarget {
                    signal: layer.signal,
                })?;
                let position = env
                    .actors()?
                    .position(target)
                    .ok_or(OracleError::ActorNotFound(target))?;
                Some((target, position))
            }
            _ => None,
        };

        for cell in scores.bounds().iter() {
            if !terrain.is_traversable(cell) || !distances.is_reached(cell) {
                continue;
            }

            let raw = match (layer.signal, target_info) {
                (SignalSource::None, _) => 0.0,
                (SignalSource::TargetRange, Some((_, target_pos))) => {
                    terrain.cell_position(cell).distance(target_pos)
                }
                (SignalSource::PathDistance, _) => {
                    distances.distance(cell).unwrap_or(super::search::UNREACHED)
                }
                (SignalSource::LineOfSight, Some((target_actor, target_pos))) => {
                    // The grid has no elevation; probe from the target's
                    // height so level geometry doesn't clip the ray.
                    let mut probe = terrain.cell_position(cell);
                    probe.z = target_pos.z;
                    let hit = env
                        .ray()?
                        .cast(probe, target_pos, &[self.agent, target_actor]);
                    if hit { 0.0 } else { 1.0 }
                }
                // Target-dependent signals always carry target_info by now.
                _ => 0.0,
            };

            let shaped = layer.curve.eval(raw);
            let current = scores.get(cell).unwrap_or(0.0);
            let combined = match layer.op {
                CombineOp::None => current,
                CombineOp::Add => current + shaped,
                CombineOp::Multiply => current * shaped,
            };
            scores.set(cell, combined);
        }

        Ok(())
    }
}
