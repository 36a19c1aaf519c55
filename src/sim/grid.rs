//! Fixed-size ball grid
//!
//! Square-packed lattice: every slot sits `2 * BALL_RADIUS` from its
//! neighbours. Cell positions are derived from (row, col) and never drift.

use glam::Vec2;
use rand::Rng;
use rand::distr::{Distribution, StandardUniform};
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::PlacementError;

/// The five ball hues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
}

impl BallColor {
    pub const ALL: [BallColor; 5] = [
        BallColor::Red,
        BallColor::Green,
        BallColor::Blue,
        BallColor::Yellow,
        BallColor::Magenta,
    ];

    /// CSS hex string for render sinks
    pub fn hex(&self) -> &'static str {
        match self {
            BallColor::Red => "#FF0000",
            BallColor::Green => "#00FF00",
            BallColor::Blue => "#0000FF",
            BallColor::Yellow => "#FFFF00",
            BallColor::Magenta => "#FF00FF",
        }
    }
}

impl Distribution<BallColor> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BallColor {
        BallColor::ALL[rng.random_range(0..BallColor::ALL.len())]
    }
}

/// In-bounds grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    /// Bounds-checked constructor; `None` outside `[0, GRID_ROWS) x [0, GRID_COLS)`
    pub fn new(row: i32, col: i32) -> Option<Self> {
        if row < 0 || col < 0 || row as usize >= GRID_ROWS || col as usize >= GRID_COLS {
            return None;
        }
        Some(Self {
            row: row as usize,
            col: col as usize,
        })
    }

    /// Canonical center of this slot
    #[inline]
    pub fn canonical_position(&self) -> Vec2 {
        canonical_position(self.row, self.col)
    }

    /// Up, down, left, right neighbours that lie inside the grid
    pub fn neighbors(&self) -> impl Iterator<Item = GridPos> {
        let (row, col) = (self.row as i32, self.col as i32);
        [(row - 1, col), (row + 1, col), (row, col - 1), (row, col + 1)]
            .into_iter()
            .filter_map(|(r, c)| GridPos::new(r, c))
    }
}

/// Canonical center of slot (row, col)
#[inline]
pub fn canonical_position(row: usize, col: usize) -> Vec2 {
    let pitch = BALL_RADIUS * 2.0;
    Vec2::new(
        col as f32 * pitch + BALL_RADIUS,
        row as f32 * pitch + BALL_RADIUS,
    )
}

/// A settled ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub color: BallColor,
    pub pos: Vec2,
}

/// The ball grid, exclusively owned by the game session
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: [[Option<Cell>; GRID_COLS]; GRID_ROWS],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Empty grid
    pub fn new() -> Self {
        Self {
            cells: [[None; GRID_COLS]; GRID_ROWS],
        }
    }

    /// Grid in its start-of-game layout
    pub fn filled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut grid = Self::new();
        grid.reset(rng);
        grid
    }

    /// Cell at (row, col). Out-of-range coordinates are an error, not clamped.
    pub fn cell_at(&self, row: i32, col: i32) -> Result<Option<Cell>, PlacementError> {
        let pos = GridPos::new(row, col).ok_or(PlacementError::OutOfBounds { row, col })?;
        Ok(self.get(pos).copied())
    }

    #[inline]
    pub fn get(&self, pos: GridPos) -> Option<&Cell> {
        self.cells[pos.row][pos.col].as_ref()
    }

    #[inline]
    pub fn is_occupied(&self, pos: GridPos) -> bool {
        self.get(pos).is_some()
    }

    /// Put a new ball at (row, col). Rejected placements leave the grid untouched.
    pub fn place(&mut self, row: i32, col: i32, color: BallColor) -> Result<Cell, PlacementError> {
        let pos = GridPos::new(row, col).ok_or(PlacementError::OutOfBounds { row, col })?;
        self.place_at(pos, color)
    }

    pub fn place_at(&mut self, pos: GridPos, color: BallColor) -> Result<Cell, PlacementError> {
        let slot = &mut self.cells[pos.row][pos.col];
        if slot.is_some() {
            return Err(PlacementError::Occupied {
                row: pos.row,
                col: pos.col,
            });
        }
        let cell = Cell {
            color,
            pos: pos.canonical_position(),
        };
        *slot = Some(cell);
        Ok(cell)
    }

    /// Empty (row, col), returning what was there
    pub fn remove(&mut self, row: i32, col: i32) -> Result<Option<Cell>, PlacementError> {
        let pos = GridPos::new(row, col).ok_or(PlacementError::OutOfBounds { row, col })?;
        Ok(self.remove_at(pos))
    }

    pub fn remove_at(&mut self, pos: GridPos) -> Option<Cell> {
        self.cells[pos.row][pos.col].take()
    }

    /// Refill the top `PREFILLED_ROWS` rows with random colors and clear the rest
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                self.cells[row][col] = if row < PREFILLED_ROWS {
                    Some(Cell {
                        color: rng.random(),
                        pos: canonical_position(row, col),
                    })
                } else {
                    None
                };
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[None; GRID_COLS]; GRID_ROWS];
    }

    /// Occupied cells in row-major order
    pub fn occupied(&self) -> impl Iterator<Item = (GridPos, &Cell)> {
        self.cells.iter().enumerate().flat_map(|(row, cols)| {
            cols.iter().enumerate().filter_map(move |(col, slot)| {
                slot.as_ref().map(|cell| (GridPos { row, col }, cell))
            })
        })
    }

    pub fn len(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn color_strategy() -> impl Strategy<Value = BallColor> {
        prop::sample::select(BallColor::ALL.to_vec())
    }

    #[test]
    fn test_canonical_geometry() {
        assert_eq!(canonical_position(0, 0), Vec2::new(20.0, 20.0));
        assert_eq!(canonical_position(4, 3), Vec2::new(140.0, 180.0));
        assert_eq!(canonical_position(7, 9), Vec2::new(380.0, 300.0));
    }

    #[test]
    fn test_reset_layout() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut grid = Grid::new();
        grid.place(6, 6, BallColor::Blue).unwrap();
        grid.reset(&mut rng);

        for row in 0..GRID_ROWS as i32 {
            for col in 0..GRID_COLS as i32 {
                let cell = grid.cell_at(row, col).unwrap();
                if (row as usize) < PREFILLED_ROWS {
                    let cell = cell.expect("prefilled row should be populated");
                    assert_eq!(cell.pos, canonical_position(row as usize, col as usize));
                } else {
                    assert!(cell.is_none());
                }
            }
        }
        assert_eq!(grid.len(), PREFILLED_ROWS * GRID_COLS);
    }

    #[test]
    fn test_cell_at_out_of_bounds_is_error() {
        let grid = Grid::new();
        assert_eq!(
            grid.cell_at(-1, 0),
            Err(PlacementError::OutOfBounds { row: -1, col: 0 })
        );
        assert_eq!(
            grid.cell_at(0, GRID_COLS as i32),
            Err(PlacementError::OutOfBounds {
                row: 0,
                col: GRID_COLS as i32
            })
        );
        assert_eq!(grid.cell_at(GRID_ROWS as i32 - 1, 0), Ok(None));
    }

    #[test]
    fn test_remove_empty_and_out_of_range() {
        let mut grid = Grid::new();
        assert_eq!(grid.remove(3, 3), Ok(None));
        assert_eq!(
            grid.remove(99, 3),
            Err(PlacementError::OutOfBounds { row: 99, col: 3 })
        );
        assert!(grid.is_empty());

        grid.place(3, 3, BallColor::Red).unwrap();
        assert_eq!(
            grid.remove(3, 3).unwrap().map(|c| c.color),
            Some(BallColor::Red)
        );
        assert!(grid.is_empty());
    }

    #[test]
    fn test_occupied_is_row_major() {
        let mut grid = Grid::new();
        grid.place(5, 1, BallColor::Red).unwrap();
        grid.place(2, 8, BallColor::Green).unwrap();
        grid.place(2, 3, BallColor::Blue).unwrap();

        let order: Vec<_> = grid.occupied().map(|(p, _)| (p.row, p.col)).collect();
        assert_eq!(order, vec![(2, 3), (2, 8), (5, 1)]);
    }

    #[test]
    fn test_neighbors_stay_in_bounds() {
        let corner = GridPos::new(0, 0).unwrap();
        let n: Vec<_> = corner.neighbors().collect();
        assert_eq!(n, vec![GridPos { row: 1, col: 0 }, GridPos { row: 0, col: 1 }]);

        let middle = GridPos::new(3, 3).unwrap();
        assert_eq!(middle.neighbors().count(), 4);
    }

    proptest! {
        #[test]
        fn prop_place_stores_canonical_position(
            row in 0..GRID_ROWS as i32,
            col in 0..GRID_COLS as i32,
            color in color_strategy(),
        ) {
            let mut grid = Grid::new();
            grid.place(row, col, color).unwrap();
            let cell = grid.cell_at(row, col).unwrap().unwrap();
            prop_assert_eq!(cell.color, color);
            prop_assert_eq!(cell.pos, canonical_position(row as usize, col as usize));
        }

        #[test]
        fn prop_rejected_place_never_mutates(
            seed in any::<u64>(),
            row in -3i32..(GRID_ROWS as i32 + 3),
            col in -3i32..(GRID_COLS as i32 + 3),
            color in color_strategy(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut grid = Grid::filled(&mut rng);
            let in_bounds = GridPos::new(row, col).is_some();
            let free = in_bounds && grid.cell_at(row, col).unwrap().is_none();
            prop_assume!(!free);

            let before = grid.clone();
            prop_assert!(grid.place(row, col, color).is_err());
            prop_assert!(grid.place(row, col, color).is_err());
            prop_assert_eq!(grid, before);
        }
    }
}
