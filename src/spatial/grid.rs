//! Fixed-size grid of cells with bounds-checked neighbour lookup
//!
//! Positions are `[row, col]` indices into a row-major `ndarray::Array2`.
//! Every access goes through `get`/`get_mut`, so lookups past an edge
//! yield `None` instead of reading out of bounds.

use ndarray::Array2;

use crate::analysis::adjacency::{AdjacencyModel, Color, Direction};
use crate::io::configuration::UNRESOLVED_COLOR;
use crate::spatial::cell::Cell;

/// Grid position as `[row, col]`
pub type Position = [usize; 2];

/// What a renderer sees of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Resolved color, or the unresolved placeholder
    pub color: Color,
    /// Whether the cell is resolved
    pub collapsed: bool,
}

/// Generation grid
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Create a `width x height` grid where every cell holds the full model
    pub fn new(width: usize, height: usize, model: &AdjacencyModel) -> Self {
        let template = Cell::new(model);
        Self {
            cells: Array2::from_elem((height, width), template),
        }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Total cell count
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check that a position lies inside the grid
    pub fn contains(&self, position: Position) -> bool {
        position[0] < self.height() && position[1] < self.width()
    }

    /// Cell at `position`
    pub fn get(&self, position: Position) -> Option<&Cell> {
        self.cells.get(position)
    }

    /// Mutable cell at `position`
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Cell> {
        self.cells.get_mut(position)
    }

    /// Neighbour of `position` in `direction`, if inside the grid
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        direction.step(position, self.height(), self.width())
    }

    /// In-bounds neighbours with the direction leading to each
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(position, d).map(|p| (d, p)))
    }

    /// Iterate cells with their positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ([row, col], cell))
    }

    /// Number of resolved cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_collapsed()).count()
    }

    /// Whether every cell is resolved
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Per-cell color and collapse flag for rendering
    pub fn snapshot(&self) -> Array2<CellView> {
        self.cells.map(|cell| CellView {
            color: cell.color().unwrap_or(UNRESOLVED_COLOR),
            collapsed: cell.is_collapsed(),
        })
    }
}
