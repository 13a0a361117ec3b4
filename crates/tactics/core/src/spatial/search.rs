//! Single-source shortest paths over the sample window.
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::env::TerrainOracle;
use crate::grid::{CellRef, GridBounds, GridField};

/// Sentinel distance for cells the search never reached.
pub const UNREACHED: f32 = f32::INFINITY;

const SQRT_2: f32 = std::f32::consts::SQRT_2;

/// Shortest-path distances from a single source cell, with predecessor
/// links for route reconstruction.
///
/// Distances are in world units: one cell side per orthogonal step, √2
/// sides per diagonal step. Unreached cells carry [`UNREACHED`] and are
/// excluded from every later evaluation step.
#[derive(Clone, Debug)]
pub struct DistanceField {
    source: CellRef,
    distances: GridField<f32>,
    parents: GridField<CellRef>,
}

impl DistanceField {
    /// Runs Dijkstra from `source` over the traversable cells of `window`.
    ///
    /// A source outside the window (or standing on non-traversable terrain)
    /// yields a field with no reached cells; callers detect that through
    /// the normal unreached sentinel.
    pub fn compute(source: CellRef, window: GridBounds, terrain: &dyn TerrainOracle) -> Self {
        let step = terrain.cell_size();
        let mut distances = GridField::new(window, UNREACHED);
        let mut parents = GridField::new(window, CellRef::INVALID);

        if !window.contains(source) || !terrain.is_traversable(source) {
            return Self {
                source,
                distances,
                parents,
            };
        }

        distances.set(source, 0.0);
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry {
            distance: 0.0,
            cell: source,
        });

        while let Some(entry) = queue.pop() {
            let recorded = distances.get(entry.cell).unwrap_or(UNREACHED);
            if entry.distance > recorded {
                continue; // stale entry
            }

            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let neighbor = CellRef::new(entry.cell.x + dx, entry.cell.y + dy);
                    if !window.contains(neighbor) || !terrain.is_traversable(neighbor) {
                        continue;
                    }

                    let edge = if dx != 0 && dy != 0 { step * SQRT_2 } else { step };
                    let candidate = entry.distance + edge;
                    if candidate < distances.get(neighbor).unwrap_or(UNREACHED) {
                        distances.set(neighbor, candidate);
                        parents.set(neighbor, entry.cell);
                        queue.push(QueueEntry {
                            distance: candidate,
                            cell: neighbor,
                        });
                    }
                }
            }
        }

        Self {
            source,
            distances,
            parents,
        }
    }

    pub fn source(&self) -> CellRef {
        self.source
    }

    pub fn bounds(&self) -> GridBounds {
        self.distances.bounds()
    }

    /// Distance to `cell`, or `None` outside the window. Reached cells hold
    /// a finite value; unreached in-window cells hold [`UNREACHED`].
    pub fn distance(&self, cell: CellRef) -> Option<f32> {
        self.distances.get(cell)
    }

    pub fn is_reached(&self, cell: CellRef) -> bool {
        self.distance(cell).is_some_and(f32::is_finite)
    }

    pub fn distances(&self) -> &GridField<f32> {
        &self.distances
    }

    /// Rebuilds the cell route from the source to `to` by walking the
    /// predecessor links. `None` when `to` was never reached.
    pub fn reconstruct_path(&self, to: CellRef) -> Option<Vec<CellRef>> {
        if !self.is_reached(to) {
            return None;
        }

        let mut route = vec![to];
        let mut cursor = to;
        while cursor != self.source {
            cursor = self.parents.get(cursor)?;
            if !cursor.is_valid() {
                return None;
            }
            route.push(cursor);
        }
        route.reverse();
        Some(route)
    }
}

/// Min-queue entry; ordering is inverted for `BinaryHeap` and falls back to
/// cell coordinates so equal distances pop deterministically.
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    distance: f32,
    cell: CellRef,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}
