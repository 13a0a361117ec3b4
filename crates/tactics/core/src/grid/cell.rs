use std::fmt;

use bitflags::bitflags;

/// Integer (x, y) reference into the navigation grid.
///
/// A distinguished [`CellRef::INVALID`] sentinel represents "no cell";
/// equality and hashing are by coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    pub x: i32,
    pub y: i32,
}

impl CellRef {
    /// Sentinel value meaning "no cell". Never addresses storage.
    pub const INVALID: Self = Self {
        x: i32::MIN,
        y: i32::MIN,
    };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true unless this is the [`CellRef::INVALID`] sentinel.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.x != i32::MIN || self.y != i32::MIN
    }
}

impl Default for CellRef {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "({}, {})", self.x, self.y)
        } else {
            write!(f, "(invalid)")
        }
    }
}

/// Inclusive rectangular sub-bound of the full grid.
///
/// Bounds both restrict which cells a [`GridField`](super::GridField) can
/// address and define the canonical row-major scan order (Y outer, X inner)
/// that tie-breaking rules across the crate depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl GridBounds {
    pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounds covering a square window of `half_width` cells on each side of
    /// `center` (so the full side length is `2 * half_width + 1`).
    pub const fn window(center: CellRef, half_width: i32) -> Self {
        Self {
            min_x: center.x - half_width,
            min_y: center.y - half_width,
            max_x: center.x + half_width,
            max_y: center.y + half_width,
        }
    }

    pub const fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub const fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }

    pub const fn cell_count(&self) -> usize {
        (self.width() as usize) * (self.height() as usize)
    }

    pub fn contains(&self, cell: CellRef) -> bool {
        cell.is_valid()
            && cell.x >= self.min_x
            && cell.x <= self.max_x
            && cell.y >= self.min_y
            && cell.y <= self.max_y
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Clips this bounds to `other`, returning `None` when they don't overlap.
    pub fn intersect(&self, other: &GridBounds) -> Option<GridBounds> {
        let clipped = GridBounds::new(
            self.min_x.max(other.min_x),
            self.min_y.max(other.min_y),
            self.max_x.min(other.max_x),
            self.max_y.min(other.max_y),
        );
        if clipped.is_empty() { None } else { Some(clipped) }
    }

    /// Iterates every cell in row-major scan order (Y outer, X inner).
    pub fn iter(&self) -> impl Iterator<Item = CellRef> + '_ {
        let bounds = *self;
        (bounds.min_y..=bounds.max_y)
            .flat_map(move |y| (bounds.min_x..=bounds.max_x).map(move |x| CellRef::new(x, y)))
    }
}

bitflags! {
    /// Per-cell terrain flags supplied by the terrain oracle.
    ///
    /// The reasoning core only interprets `TRAVERSABLE`; other bits pass
    /// through untouched so terrain providers can carry their own markers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct CellFlags: u8 {
        /// Agents may path through this cell and belief mass may occupy it.
        const TRAVERSABLE = 1 << 0;
        /// Line-of-sight rays are blocked by this cell.
        const BLOCKS_SIGHT = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sentinel_is_not_valid() {
        assert!(!CellRef::INVALID.is_valid());
        assert!(CellRef::new(0, 0).is_valid());
        assert!(CellRef::new(i32::MIN, 0).is_valid());
    }

    #[test]
    fn bounds_contains_is_inclusive() {
        let bounds = GridBounds::new(-1, -1, 2, 3);
        assert!(bounds.contains(CellRef::new(-1, -1)));
        assert!(bounds.contains(CellRef::new(2, 3)));
        assert!(!bounds.contains(CellRef::new(3, 3)));
        assert!(!bounds.contains(CellRef::INVALID));
    }

    #[test]
    fn iteration_is_row_major_y_outer() {
        let bounds = GridBounds::new(0, 0, 1, 1);
        let cells: Vec<_> = bounds.iter().collect();
        assert_eq!(
            cells,
            vec![
                CellRef::new(0, 0),
                CellRef::new(1, 0),
                CellRef::new(0, 1),
                CellRef::new(1, 1),
            ]
        );
    }

    #[test]
    fn intersect_clips_to_overlap() {
        let a = GridBounds::new(0, 0, 10, 10);
        let b = GridBounds::new(5, 5, 20, 20);
        assert_eq!(a.intersect(&b), Some(GridBounds::new(5, 5, 10, 10)));

        let disjoint = GridBounds::new(50, 50, 60, 60);
        assert_eq!(a.intersect(&disjoint), None);
    }
}
