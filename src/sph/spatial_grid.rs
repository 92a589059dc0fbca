use crate::units::*;
use std::collections::HashMap;

pub type ParticleIndex = usize;

/// Integer coordinates of a grid cell, (floor(x/h), floor(y/h)).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellPos {
    pub x: i64,
    pub y: i64,
}

impl CellPos {
    #[inline]
    pub fn from_position(position: Point, cell_size: Real) -> CellPos {
        // `as` saturates, so positions far outside the domain still land in some (edge) cell.
        CellPos {
            x: (position.x / cell_size).floor() as i64,
            y: (position.y / cell_size).floor() as i64,
        }
    }

    #[inline]
    fn offset(self, dx: i64, dy: i64) -> CellPos {
        CellPos {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Uniform hash grid with cells of side h.
///
/// Rebuilt from scratch every tick. A neighbor query returns everything in the 3x3 block of cells
/// around the query cell, no matter the exact distance. Callers rely on kernel compact support to
/// drop the far ones.
#[derive(Default, Debug)]
pub struct SpatialGrid {
    cell_size: Real,
    cells: HashMap<CellPos, Vec<ParticleIndex>>,
}

impl SpatialGrid {
    pub fn new() -> SpatialGrid {
        Default::default()
    }

    /// Buckets all positions, indices within a cell stay in ascending order.
    pub fn rebuild(&mut self, positions: &[Point], cell_size: Real) {
        let _span = tracing::trace_span!("SpatialGrid::rebuild", num_positions = positions.len()).entered();

        self.cells.clear();
        self.cell_size = cell_size;

        for (i, &position) in positions.iter().enumerate() {
            self.cells
                .entry(CellPos::from_position(position, cell_size))
                .or_default()
                .push(i);
        }
    }

    pub fn cell_size(&self) -> Real {
        self.cell_size
    }

    pub fn num_occupied_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, cell: CellPos) -> &[ParticleIndex] {
        self.cells.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Calls `f` for every index in the 3x3 block around `position`'s cell.
    ///
    /// Visiting order is fixed: column by column (dx = -1, 0, 1), within a column row by row, within a cell by index.
    #[inline]
    pub fn foreach_potential_neighbor(&self, position: Point, mut f: impl FnMut(ParticleIndex)) {
        let center = CellPos::from_position(position, self.cell_size);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(indices) = self.cells.get(&center.offset(dx, dy)) {
                    for &j in indices {
                        f(j);
                    }
                }
            }
        }
    }

    pub fn potential_neighbors(&self, position: Point) -> Vec<ParticleIndex> {
        let mut neighbors = Vec::new();
        self.foreach_potential_neighbor(position, |j| neighbors.push(j));
        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_use_floor() {
        assert_eq!(CellPos::from_position(Point::new(2.5, 0.0), 1.0), CellPos { x: 2, y: 0 });
        assert_eq!(CellPos::from_position(Point::new(-0.1, 1.99), 1.0), CellPos { x: -1, y: 1 });
        assert_eq!(CellPos::from_position(Point::new(1.0, 0.5), 0.25), CellPos { x: 4, y: 2 });
    }

    #[test]
    fn query_includes_self() {
        let positions = [Point::new(0.5, 0.5)];
        let mut grid = SpatialGrid::new();
        grid.rebuild(&positions, 1.0);
        assert_eq!(grid.potential_neighbors(positions[0]), vec![0]);
    }

    #[test]
    fn query_covers_three_by_three_block_only() {
        let positions = [
            Point::new(5.5, 5.5),  // center cell
            Point::new(4.1, 6.9),  // upper left neighbor cell
            Point::new(6.9, 4.1),  // lower right neighbor cell
            Point::new(7.1, 5.5),  // two cells to the right
            Point::new(5.5, 3.99), // two cells down
        ];
        let mut grid = SpatialGrid::new();
        grid.rebuild(&positions, 1.0);

        let mut neighbors = grid.potential_neighbors(positions[0]);
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![0, 1, 2]);
    }

    #[test]
    fn query_returns_far_corners_of_neighbor_cells() {
        // distance ~2.7h, still returned since the grid only approximates the support radius
        let positions = [Point::new(1.01, 1.01), Point::new(2.99, 2.99)];
        let mut grid = SpatialGrid::new();
        grid.rebuild(&positions, 1.0);
        assert_eq!(grid.potential_neighbors(positions[1]), vec![0, 1]);
    }

    #[test]
    fn rebuild_discards_previous_state() {
        let mut grid = SpatialGrid::new();
        grid.rebuild(&[Point::new(0.5, 0.5), Point::new(10.5, 10.5)], 1.0);
        assert_eq!(grid.num_occupied_cells(), 2);

        grid.rebuild(&[Point::new(20.5, 20.5)], 1.0);
        assert_eq!(grid.num_occupied_cells(), 1);
        assert!(grid.cell(CellPos { x: 0, y: 0 }).is_empty());
        assert_eq!(grid.cell(CellPos { x: 20, y: 20 }), &[0]);
    }

    #[test]
    fn empty_grid_never_errors() {
        let mut grid = SpatialGrid::new();
        grid.rebuild(&[], 0.5);
        assert!(grid.potential_neighbors(Point::new(1.0, 1.0)).is_empty());
    }
}
