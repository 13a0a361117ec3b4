use super::{CellRef, GridBounds};

/// Dense 2D scalar/flag field addressed by cell reference, restricted to a
/// rectangular sub-bound of the full grid.
///
/// Invariant: every cell within the declared bounds holds a defined value
/// from construction onward. Lookups outside the bounds return `None`
/// rather than an arbitrary default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridField<T> {
    bounds: GridBounds,
    values: Vec<T>,
}

impl<T: Copy> GridField<T> {
    /// Creates a field with every in-bounds cell initialized to `fill`.
    pub fn new(bounds: GridBounds, fill: T) -> Self {
        Self {
            bounds,
            values: vec![fill; bounds.cell_count()],
        }
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    #[inline]
    fn index(&self, cell: CellRef) -> Option<usize> {
        if !self.bounds.contains(cell) {
            return None;
        }
        let dx = (cell.x - self.bounds.min_x) as usize;
        let dy = (cell.y - self.bounds.min_y) as usize;
        Some(dy * self.bounds.width() as usize + dx)
    }

    /// Returns the stored value, or `None` when `cell` lies outside the
    /// bounds (including the invalid sentinel).
    pub fn get(&self, cell: CellRef) -> Option<T> {
        self.index(cell).map(|i| self.values[i])
    }

    /// Writes `value` into `cell`. Out-of-bounds writes are a checked no-op
    /// returning `false`; in-bounds writes return `true`.
    pub fn set(&mut self, cell: CellRef, value: T) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.values[i] = value;
                true
            }
            None => false,
        }
    }

    /// Resets every in-bounds cell to `fill`.
    pub fn reset(&mut self, fill: T) {
        self.values.fill(fill);
    }

    /// Iterates `(cell, value)` pairs in row-major scan order.
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, T)> + '_ {
        self.bounds
            .iter()
            .zip(self.values.iter().copied())
    }
}

impl<T: Copy + PartialOrd> GridField<T> {
    /// Returns the maximum stored value together with the *first* cell in
    /// row-major scan order (Y outer, X inner) that achieves it.
    ///
    /// Downstream selection (belief estimate extraction, spatial argmax)
    /// depends on this tie-break being reproducible.
    pub fn max_cell(&self) -> Option<(CellRef, T)> {
        let mut best: Option<(CellRef, T)> = None;
        for (cell, value) in self.iter() {
            let replace = match &best {
                Some((_, best_value)) => value > *best_value,
                None => true,
            };
            if replace {
                best = Some((cell, value));
            }
        }
        best
    }
}

impl GridField<f32> {
    /// Sum of all stored values; used by the belief estimator's mass checks.
    pub fn sum(&self) -> f32 {
        self.values.iter().sum()
    }

    /// Scales every stored value by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for value in &mut self.values {
            *value *= factor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds_3x3() -> GridBounds {
        GridBounds::new(0, 0, 2, 2)
    }

    #[test]
    fn get_outside_bounds_is_none() {
        let field = GridField::new(bounds_3x3(), 1.0f32);
        assert_eq!(field.get(CellRef::new(1, 1)), Some(1.0));
        assert_eq!(field.get(CellRef::new(3, 0)), None);
        assert_eq!(field.get(CellRef::new(0, -1)), None);
        assert_eq!(field.get(CellRef::INVALID), None);
    }

    #[test]
    fn set_outside_bounds_is_rejected_noop() {
        let mut field = GridField::new(bounds_3x3(), 0.0f32);
        assert!(field.set(CellRef::new(2, 2), 5.0));
        assert!(!field.set(CellRef::new(3, 3), 9.0));
        assert_eq!(field.sum(), 5.0);
    }

    #[test]
    fn reset_refills_every_cell() {
        let mut field = GridField::new(bounds_3x3(), 2.0f32);
        field.set(CellRef::new(0, 0), 7.0);
        field.reset(1.0);
        assert!(field.iter().all(|(_, v)| v == 1.0));
    }

    #[test]
    fn max_cell_breaks_ties_in_scan_order() {
        let mut field = GridField::new(bounds_3x3(), 0.0f32);
        // Two cells share the maximum; the scan-order-first one must win.
        field.set(CellRef::new(2, 0), 4.0);
        field.set(CellRef::new(0, 1), 4.0);
        let (cell, value) = field.max_cell().unwrap();
        assert_eq!(cell, CellRef::new(2, 0));
        assert_eq!(value, 4.0);
    }

    #[test]
    fn max_cell_on_uniform_field_is_scan_order_first() {
        let field = GridField::new(bounds_3x3(), 0.25f32);
        let (cell, value) = field.max_cell().unwrap();
        assert_eq!(cell, CellRef::new(0, 0));
        assert_eq!(value, 0.25);
    }

    #[test]
    fn negative_bounds_address_correctly() {
        let mut field = GridField::new(GridBounds::new(-2, -2, 0, 0), 0.0f32);
        assert!(field.set(CellRef::new(-2, -1), 3.0));
        assert_eq!(field.get(CellRef::new(-2, -1)), Some(3.0));
        assert_eq!(field.get(CellRef::new(-1, -2)), Some(0.0));
    }
}
