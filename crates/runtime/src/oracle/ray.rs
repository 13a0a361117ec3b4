//! Grid-walking ray oracle.
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;

use tactics_core::{ActorId, CellFlags, CellRef, GridField, RayOracle, TerrainOracle};

use super::terrain::TerrainOracleImpl;

/// Ray oracle that walks the cell grid between two points and reports a hit
/// on the first sight-blocking cell.
///
/// Rays are resolved against static terrain only; actor bodies never block
/// sight here, so the ignore list is accepted and unused. Elevation is
/// likewise ignored, matching the flat grid.
pub struct GridRayOracle {
    blocks_sight: GridField<bool>,
    cell_size: f32,
    origin: Vec3,
    /// Casts since the last [`take_cast_count`](Self::take_cast_count),
    /// for per-tick budgeting logs. Atomic because the oracle trait is
    /// `Send + Sync` while `cast` takes `&self`.
    casts: AtomicU64,
}

impl GridRayOracle {
    pub fn new(terrain: &TerrainOracleImpl) -> Self {
        let bounds = terrain.bounds();
        let mut blocks_sight = GridField::new(bounds, false);
        for cell in bounds.iter() {
            let blocked = terrain
                .flags(cell)
                .is_some_and(|flags| flags.contains(CellFlags::BLOCKS_SIGHT));
            blocks_sight.set(cell, blocked);
        }
        Self {
            blocks_sight,
            cell_size: terrain.cell_size(),
            origin: terrain.origin(),
            casts: AtomicU64::new(0),
        }
    }

    /// Returns the casts performed since the last call and resets the count.
    pub fn take_cast_count(&self) -> u64 {
        self.casts.swap(0, Ordering::Relaxed)
    }

    fn blocked(&self, cell: CellRef) -> bool {
        self.blocks_sight.get(cell).unwrap_or(false)
    }
}

impl RayOracle for GridRayOracle {
    fn cast(&self, start: Vec3, end: Vec3, _ignore: &[ActorId]) -> bool {
        self.casts.fetch_add(1, Ordering::Relaxed);

        // Amanatides-Woo traversal in cell units, flattened to the plane.
        let sx = (start.x - self.origin.x) / self.cell_size;
        let sy = (start.y - self.origin.y) / self.cell_size;
        let ex = (end.x - self.origin.x) / self.cell_size;
        let ey = (end.y - self.origin.y) / self.cell_size;

        let mut x = sx.floor() as i32;
        let mut y = sy.floor() as i32;
        let end_x = ex.floor() as i32;
        let end_y = ey.floor() as i32;

        let dx = ex - sx;
        let dy = ey - sy;
        let step_x: i32 = if dx >= 0.0 { 1 } else { -1 };
        let step_y: i32 = if dy >= 0.0 { 1 } else { -1 };

        let t_delta_x = if dx != 0.0 { (1.0 / dx).abs() } else { f32::INFINITY };
        let t_delta_y = if dy != 0.0 { (1.0 / dy).abs() } else { f32::INFINITY };

        let mut t_max_x = if dx != 0.0 {
            let boundary = if dx >= 0.0 { x as f32 + 1.0 } else { x as f32 };
            ((boundary - sx) / dx).abs()
        } else {
            f32::INFINITY
        };
        let mut t_max_y = if dy != 0.0 {
            let boundary = if dy >= 0.0 { y as f32 + 1.0 } else { y as f32 };
            ((boundary - sy) / dy).abs()
        } else {
            f32::INFINITY
        };

        // The traversal visits every crossed cell exactly once, so the cell
        // count bounds the loop.
        let max_steps = (end_x - x).abs() + (end_y - y).abs() + 1;
        for _ in 0..=max_steps {
            if self.blocked(CellRef::new(x, y)) {
                return true;
            }
            if x == end_x && y == end_y {
                break;
            }
            if t_max_x <= t_max_y {
                t_max_x += t_delta_x;
                x += step_x;
            } else {
                t_max_y += t_delta_y;
                y += step_y;
            }
        }
        false
    }
}
