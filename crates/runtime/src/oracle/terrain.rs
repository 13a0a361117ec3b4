//! Static grid terrain served through [`tactics_core::TerrainOracle`].
use glam::Vec3;

use tactics_core::{CellFlags, CellRef, GridBounds, GridField, TerrainOracle};

use crate::error::RuntimeError;

/// Terrain oracle backed by an immutable flag grid authored as ASCII rows.
///
/// Holds the static layout only; nothing in it changes during a run. Row 0
/// of the input is the y = 0 row, and column 0 is x = 0.
pub struct TerrainOracleImpl {
    flags: GridField<CellFlags>,
    cell_size: f32,
    origin: Vec3,
}

impl TerrainOracleImpl {
    /// Builds terrain from ASCII rows: `.` is floor, `#` is a wall that both
    /// blocks movement and blocks sight.
    ///
    /// # Errors
    ///
    /// Rejects an empty map, ragged rows, and unknown glyphs.
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        cell_size: f32,
        origin: Vec3,
    ) -> Result<Self, RuntimeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 || height == 0 {
            return Err(RuntimeError::InvalidMap("map has no cells".into()));
        }
        if cell_size <= 0.0 {
            return Err(RuntimeError::InvalidMap(format!(
                "cell size must be positive, got {cell_size}"
            )));
        }

        let bounds = GridBounds::new(0, 0, width as i32 - 1, height as i32 - 1);
        let mut flags = GridField::new(bounds, CellFlags::empty());

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(RuntimeError::InvalidMap(format!(
                    "row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, glyph) in row.chars().enumerate() {
                let cell_flags = match glyph {
                    '.' => CellFlags::TRAVERSABLE,
                    '#' => CellFlags::BLOCKS_SIGHT,
                    other => {
                        return Err(RuntimeError::InvalidMap(format!(
                            "unknown glyph '{other}' at ({x}, {y})"
                        )));
                    }
                };
                flags.set(CellRef::new(x as i32, y as i32), cell_flags);
            }
        }

        Ok(Self {
            flags,
            cell_size,
            origin,
        })
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }
}

impl TerrainOracle for TerrainOracleImpl {
    fn bounds(&self) -> GridBounds {
        self.flags.bounds()
    }

    fn flags(&self, cell: CellRef) -> Option<CellFlags> {
        self.flags.get(cell)
    }

    fn cell_position(&self, cell: CellRef) -> Vec3 {
        self.origin
            + Vec3::new(
                (cell.x as f32 + 0.5) * self.cell_size,
                (cell.y as f32 + 0.5) * self.cell_size,
                0.0,
            )
    }

    fn cell_at(&self, position: Vec3) -> Option<CellRef> {
        let local = position - self.origin;
        let cell = CellRef::new(
            (local.x / self.cell_size).floor() as i32,
            (local.y / self.cell_size).floor() as i32,
        );
        self.bounds().contains(cell).then_some(cell)
    }

    fn cell_size(&self) -> f32 {
        self.cell_size
    }
}
