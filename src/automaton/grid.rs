//! Bounded 2D grid of cell states

use super::{CellState, Family};
use crate::error::GridError;
use itertools::iproduct;
use std::fmt;

/// A fixed-size grid surrounded by an implicit field of its default state.
///
/// Cells are stored row-major in a flat vector. Reads outside the grid
/// return the default state, writes outside the grid are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    default_state: CellState,
    cells: Vec<CellState>,
}

impl Grid {
    /// Largest number of cells a grid may hold
    pub const MAX_CELLS: usize = 1 << 26;

    /// Create a grid filled with `default_state`
    pub fn new(width: usize, height: usize, default_state: CellState) -> Result<Self, GridError> {
        let len = check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            default_state,
            cells: vec![default_state; len],
        })
    }

    /// Create a grid from rows of states, all of which must share the
    /// default state's family
    pub fn from_rows(rows: Vec<Vec<CellState>>, default_state: CellState) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;

        let family = default_state.family();
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            if let Some(x) = row.iter().position(|state| state.family() != family) {
                return Err(GridError::ForeignState {
                    x,
                    y,
                    state: row[x],
                    expected: family,
                });
            }
        }

        Ok(Self {
            width,
            height,
            default_state,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn default_state(&self) -> CellState {
        self.default_state
    }

    pub fn family(&self) -> Family {
        self.default_state.family()
    }

    #[inline]
    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// State at (x, y), or the default state outside the grid
    pub fn get(&self, x: isize, y: isize) -> CellState {
        self.index(x, y)
            .map_or(self.default_state, |idx| self.cells[idx])
    }

    /// Write `state` at (x, y); does nothing outside the grid
    pub fn set(&mut self, x: isize, y: isize, state: CellState) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = state;
        }
    }

    /// Discard all content and become a `width`x`height` grid of the default state
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        let len = check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        self.cells = vec![self.default_state; len];
        Ok(())
    }

    /// Reset every cell to the default state, keeping dimensions
    pub fn clear(&mut self) {
        self.cells.fill(self.default_state);
    }

    /// Change the default state and fill every cell with it
    pub(crate) fn refill(&mut self, default_state: CellState) {
        self.default_state = default_state;
        self.cells.fill(default_state);
    }

    /// Row-major view of the stored cells
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Iterate over `(x, y, state)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, CellState)> + '_ {
        iproduct!(0..self.height, 0..self.width).map(move |(y, x)| (x, y, self.cells[y * self.width + x]))
    }

    /// Number of cells currently in `state`
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&cell| cell == state).count()
    }

    /// Rows of states, top to bottom
    pub fn rows(&self) -> Vec<Vec<CellState>> {
        self.cells.chunks(self.width).map(<[CellState]>::to_vec).collect()
    }

    /// Swap in a complete next generation. Length must match the grid.
    pub(crate) fn commit(&mut self, next: &mut Vec<CellState>) {
        debug_assert_eq!(next.len(), self.cells.len());
        std::mem::swap(&mut self.cells, next);
    }
}

/// Cell count of a `width`x`height` grid, if it is a valid size
fn check_dimensions(width: usize, height: usize) -> Result<usize, GridError> {
    if width == 0 || height == 0 {
        return Err(GridError::EmptyDimensions { width, height });
    }
    match width.checked_mul(height) {
        Some(len) if len <= Grid::MAX_CELLS => Ok(len),
        _ => Err(GridError::TooLarge {
            width,
            height,
            max_cells: Grid::MAX_CELLS,
        }),
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 3, CellState::Dead).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells().len(), 12);
        assert_eq!(grid.count(CellState::Dead), 12);
        assert_eq!(grid.family(), Family::GameOfLife);
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5, CellState::Dead),
            Err(GridError::EmptyDimensions { width: 0, height: 5 })
        );
        assert!(Grid::new(5, 0, CellState::Empty).is_err());
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            Grid::new(1 << 32, 1 << 32, CellState::Dead),
            Err(GridError::TooLarge { .. })
        ));
        assert!(matches!(
            Grid::new(1 << 62, 4, CellState::Empty),
            Err(GridError::TooLarge { .. })
        ));
        assert!(matches!(
            Grid::new(100_000, 100_000, CellState::Dead),
            Err(GridError::TooLarge { .. })
        ));
        assert!(Grid::new(Grid::MAX_CELLS, 1, CellState::Dead).is_ok());

        let mut grid = Grid::new(2, 2, CellState::Dead).unwrap();
        grid.set(0, 0, CellState::Alive);
        assert!(matches!(grid.resize(usize::MAX, 2), Err(GridError::TooLarge { .. })));
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.get(0, 0), CellState::Alive);
    }

    #[test]
    fn test_set_then_get() {
        let mut grid = Grid::new(5, 5, CellState::Dead).unwrap();
        grid.set(2, 2, CellState::Alive);
        assert_eq!(grid.get(2, 2), CellState::Alive);
        assert_eq!(grid.get(0, 0), CellState::Dead);

        // every in-bounds coordinate round trips
        for y in 0..5 {
            for x in 0..5 {
                grid.set(x, y, CellState::Alive);
                assert_eq!(grid.get(x, y), CellState::Alive);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_reads_default() {
        let grid = Grid::new(10, 10, CellState::Dead).unwrap();
        assert_eq!(grid.get(-1, -1), CellState::Dead);
        assert_eq!(grid.get(100, 100), CellState::Dead);
        assert_eq!(grid.get(10, 0), CellState::Dead);
        assert_eq!(grid.get(0, 10), CellState::Dead);

        let grid = Grid::new(3, 3, CellState::Empty).unwrap();
        assert_eq!(grid.get(-5, 1), CellState::Empty);
    }

    #[test]
    fn test_out_of_bounds_writes_ignored() {
        let mut grid = Grid::new(3, 3, CellState::Dead).unwrap();
        grid.set(1, 1, CellState::Alive);
        let before = grid.clone();

        grid.set(-1, 0, CellState::Alive);
        grid.set(0, -1, CellState::Alive);
        grid.set(3, 0, CellState::Alive);
        grid.set(0, 3, CellState::Alive);
        grid.set(isize::MAX, isize::MIN, CellState::Alive);

        assert_eq!(grid, before);
        assert_eq!(grid.get(3, 0), CellState::Dead);
    }

    #[test]
    fn test_resize_discards_content() {
        let mut grid = Grid::new(5, 5, CellState::Dead).unwrap();
        grid.set(0, 0, CellState::Alive);
        grid.set(4, 4, CellState::Alive);

        grid.resize(20, 10).unwrap();

        assert_eq!(grid.width(), 20);
        assert_eq!(grid.height(), 10);
        assert_eq!(grid.count(CellState::Dead), 200);
        assert_eq!(grid.get(0, 0), CellState::Dead);
        assert_eq!(grid.get(19, 9), CellState::Dead);
    }

    #[test]
    fn test_resize_rejects_zero_and_keeps_grid() {
        let mut grid = Grid::new(2, 2, CellState::Dead).unwrap();
        grid.set(1, 1, CellState::Alive);
        assert!(grid.resize(0, 4).is_err());
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.get(1, 1), CellState::Alive);
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![
            vec![CellState::Alive, CellState::Dead, CellState::Alive],
            vec![CellState::Dead, CellState::Alive, CellState::Dead],
        ];
        let grid = Grid::from_rows(rows.clone(), CellState::Dead).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(2, 0), CellState::Alive);
        assert_eq!(grid.get(1, 1), CellState::Alive);
        assert_eq!(grid.rows(), rows);
    }

    #[test]
    fn test_from_rows_invalid() {
        let ragged = vec![vec![CellState::Dead; 3], vec![CellState::Dead; 2]];
        assert!(matches!(
            Grid::from_rows(ragged, CellState::Dead),
            Err(GridError::RaggedRow { row: 1, expected: 3, actual: 2 })
        ));

        let mixed = vec![vec![CellState::Dead, CellState::Head]];
        assert!(matches!(
            Grid::from_rows(mixed, CellState::Dead),
            Err(GridError::ForeignState { x: 1, y: 0, .. })
        ));

        assert!(Grid::from_rows(Vec::new(), CellState::Dead).is_err());
    }

    #[test]
    fn test_iter_is_row_major() {
        let mut grid = Grid::new(2, 2, CellState::Empty).unwrap();
        grid.set(1, 0, CellState::Head);
        let visited: Vec<_> = grid.iter().collect();
        assert_eq!(
            visited,
            vec![
                (0, 0, CellState::Empty),
                (1, 0, CellState::Head),
                (0, 1, CellState::Empty),
                (1, 1, CellState::Empty),
            ]
        );
    }

    #[test]
    fn test_display() {
        let mut grid = Grid::new(3, 1, CellState::Dead).unwrap();
        grid.set(1, 0, CellState::Alive);
        assert_eq!(grid.to_string(), "·█·\n");
    }
}
