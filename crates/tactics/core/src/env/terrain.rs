use glam::Vec3;

use crate::grid::{CellFlags, CellRef, GridBounds};

/// Read-only terrain collaborator: cell/world coordinate mapping, per-cell
/// flags, and grid extents.
///
/// The reasoning core never stores terrain; every query goes through this
/// oracle so the grid representation stays external.
pub trait TerrainOracle: Send + Sync {
    /// Full extents of the grid.
    fn bounds(&self) -> GridBounds;

    /// Flags for a cell, or `None` outside the grid.
    fn flags(&self, cell: CellRef) -> Option<CellFlags>;

    /// World-space center of a cell. Only meaningful for in-bounds cells.
    fn cell_position(&self, cell: CellRef) -> Vec3;

    /// Cell containing a world-space position, or `None` outside the grid.
    fn cell_at(&self, position: Vec3) -> Option<CellRef>;

    /// Side length of one cell in world units.
    fn cell_size(&self) -> f32;

    fn is_traversable(&self, cell: CellRef) -> bool {
        self.flags(cell)
            .is_some_and(|flags| flags.contains(CellFlags::TRAVERSABLE))
    }

    /// Grid bounds covering a square world-space window of `extent` units on
    /// each side, centered on `position`, clipped to the grid. `None` when
    /// the window misses the grid entirely.
    fn sample_window(&self, position: Vec3, extent: f32) -> Option<GridBounds> {
        let center = self.cell_at(position)?;
        let half_cells = (extent / (2.0 * self.cell_size())).ceil() as i32;
        GridBounds::window(center, half_cells).intersect(&self.bounds())
    }
}
