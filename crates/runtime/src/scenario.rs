//! Scenario files: map layout plus actor placement and roles.
//!
//! Scenarios are authored in RON. The map is ASCII rows, actors are placed
//! by cell with a role that decides how the scene wires them: observers get
//! a perception tracker, targets get a belief estimator, agents get a
//! spatial reasoner with an authored scoring function.
use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use tactics_core::{SpatialFunction, TacticsConfig, VisionParams};

use crate::error::RuntimeError;

fn default_forward() -> Vec3 {
    Vec3::X
}

/// How an actor participates in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActorRole {
    /// Perceiving actor; tracks awareness of every target.
    Observer { vision: VisionParams },

    /// Trackable actor; `target` keys its perception and belief records.
    Target { target: u32 },

    /// Position-reasoning actor. `target` names the actor its
    /// target-dependent scoring layers measure against.
    Agent {
        function: SpatialFunction,
        target: Option<u32>,
    },
}

/// One actor placement: world identity, starting cell, and role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorPlacement {
    pub id: u32,
    pub cell: (i32, i32),
    #[serde(default = "default_forward")]
    pub forward: Vec3,
    pub role: ActorRole,
}

/// Scenario configuration for simulation setup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,

    /// ASCII map rows: `.` floor, `#` wall. Row 0 is y = 0.
    pub map: Vec<String>,

    pub cell_size: f32,

    #[serde(default)]
    pub origin: Vec3,

    /// Per-tick awareness step; defaults to the core's tuning.
    #[serde(default = "Scenario::default_awareness_step")]
    pub awareness_step: f32,

    /// Side length of each agent's sample window, in world units.
    #[serde(default = "Scenario::default_sample_extent")]
    pub sample_extent: f32,

    pub actors: Vec<ActorPlacement>,
}

impl Scenario {
    fn default_awareness_step() -> f32 {
        TacticsConfig::DEFAULT_AWARENESS_STEP
    }

    fn default_sample_extent() -> f32 {
        TacticsConfig::DEFAULT_SAMPLE_EXTENT
    }

    pub fn config(&self) -> TacticsConfig {
        TacticsConfig {
            awareness_step: self.awareness_step,
            sample_extent: self.sample_extent,
        }
    }

    /// Parses a scenario from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    /// Loads a scenario file, attaching the path to read and parse errors.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RuntimeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RuntimeError::ScenarioRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text).map_err(|source| RuntimeError::ScenarioParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
