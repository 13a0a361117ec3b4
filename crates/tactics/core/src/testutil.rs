//! In-memory world fixture shared by the unit tests.
use std::collections::{HashMap, HashSet};

use glam::Vec3;

use crate::env::{ActorOracle, Env, RayOracle, TacticalEnv, TerrainOracle};
use crate::grid::{CellFlags, CellRef, GridBounds};
use crate::types::ActorId;

pub(crate) const CELL_SIZE: f32 = 100.0;

/// Flat test terrain with optional wall cells and hand-placed actors.
/// Walls are both non-traversable and sight-blocking.
pub(crate) struct TestWorld {
    bounds: GridBounds,
    blocked: HashSet<CellRef>,
    actors: HashMap<ActorId, ActorFixture>,
}

struct ActorFixture {
    position: Vec3,
    forward: Vec3,
    velocity: Vec3,
}

impl TestWorld {
    /// All-floor grid of `width` x `height` cells anchored at the origin.
    pub(crate) fn open(width: i32, height: i32) -> Self {
        Self {
            bounds: GridBounds::new(0, 0, width - 1, height - 1),
            blocked: HashSet::new(),
            actors: HashMap::new(),
        }
    }

    pub(crate) fn block_cell(&mut self, cell: CellRef) {
        self.blocked.insert(cell);
    }

    pub(crate) fn place_actor(&mut self, id: ActorId, position: Vec3, forward: Vec3) {
        self.actors.insert(
            id,
            ActorFixture {
                position,
                forward,
                velocity: Vec3::ZERO,
            },
        );
    }

    pub(crate) fn cell_center(&self, x: i32, y: i32) -> Vec3 {
        self.cell_position(CellRef::new(x, y))
    }

    pub(crate) fn env(&self) -> TacticalEnv<'_> {
        Env::new(
            Some(self as &dyn TerrainOracle),
            Some(self as &dyn RayOracle),
            Some(self as &dyn ActorOracle),
        )
    }
}

impl TerrainOracle for TestWorld {
    fn bounds(&self) -> GridBounds {
        self.bounds
    }

    fn flags(&self, cell: CellRef) -> Option<CellFlags> {
        if !self.bounds.contains(cell) {
            return None;
        }
        if self.blocked.contains(&cell) {
            Some(CellFlags::BLOCKS_SIGHT)
        } else {
            Some(CellFlags::TRAVERSABLE)
        }
    }

    fn cell_position(&self, cell: CellRef) -> Vec3 {
        Vec3::new(
            (cell.x as f32 + 0.5) * CELL_SIZE,
            (cell.y as f32 + 0.5) * CELL_SIZE,
            0.0,
        )
    }

    fn cell_at(&self, position: Vec3) -> Option<CellRef> {
        let cell = CellRef::new(
            (position.x / CELL_SIZE).floor() as i32,
            (position.y / CELL_SIZE).floor() as i32,
        );
        self.bounds.contains(cell).then_some(cell)
    }

    fn cell_size(&self) -> f32 {
        CELL_SIZE
    }
}

impl RayOracle for TestWorld {
    fn cast(&self, start: Vec3, end: Vec3, _ignore: &[ActorId]) -> bool {
        let delta = end - start;
        let length = delta.length();
        if length == 0.0 {
            return false;
        }

        // Quarter-cell sampling is plenty for axis-aligned test walls.
        let steps = (length / (CELL_SIZE * 0.25)).ceil() as i32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            if let Some(cell) = self.cell_at(start + delta * t) {
                if self.blocked.contains(&cell) {
                    return true;
                }
            }
        }
        false
    }
}

impl ActorOracle for TestWorld {
    fn position(&self, actor: ActorId) -> Option<Vec3> {
        self.actors.get(&actor).map(|fixture| fixture.position)
    }

    fn forward(&self, actor: ActorId) -> Option<Vec3> {
        self.actors.get(&actor).map(|fixture| fixture.forward)
    }

    fn velocity(&self, actor: ActorId) -> Option<Vec3> {
        self.actors.get(&actor).map(|fixture| fixture.velocity)
    }
}
