//! Grid model - fixed-size board of residential cells

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Contents of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Group(u8),
}

impl CellState {
    pub fn is_empty(self) -> bool {
        matches!(self, CellState::Empty)
    }

    pub fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// External encoding: 0 for empty, `g + 1` for group `g`.
    pub fn code(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Group(g) => g + 1,
        }
    }
}

/// Cell position in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: usize,
    pub y: usize,
}

impl CellPos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Read-only view over a grid of cells.
///
/// Anything that wants to display or inspect a finished trial goes through
/// this trait instead of touching the engine's internals.
pub trait GridView {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Cell code at `(x, y)`; see [`CellState::code`].
    fn get_grid(&self, x: usize, y: usize) -> Result<u8>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![CellState::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Convert a position to its row-major index
    pub fn pos_to_index(&self, pos: CellPos) -> Option<usize> {
        if pos.x < self.width && pos.y < self.height {
            Some(pos.y * self.width + pos.x)
        } else {
            None
        }
    }

    /// Convert a row-major index back to a position
    pub fn index_to_pos(&self, index: usize) -> Option<CellPos> {
        if index < self.cells.len() {
            Some(self.pos_of(index))
        } else {
            None
        }
    }

    /// Position of an index already known to be in range
    pub(crate) fn pos_of(&self, index: usize) -> CellPos {
        CellPos::new(index % self.width, index / self.width)
    }

    fn checked_index(&self, x: usize, y: usize) -> Result<usize> {
        self.pos_to_index(CellPos { x, y })
            .ok_or(SimulationError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }

    pub fn get(&self, x: usize, y: usize) -> Result<CellState> {
        let index = self.checked_index(x, y)?;
        Ok(self.cells[index])
    }

    pub fn set(&mut self, x: usize, y: usize, state: CellState) -> Result<()> {
        let index = self.checked_index(x, y)?;
        self.cells[index] = state;
        Ok(())
    }

    pub(crate) fn get_index(&self, index: usize) -> CellState {
        self.cells[index]
    }

    pub(crate) fn set_index(&mut self, index: usize, state: CellState) {
        self.cells[index] = state;
    }

    /// In-bounds Moore neighbourhood (8-connectivity, no wraparound)
    pub fn neighbors(&self, x: usize, y: usize) -> Result<Vec<CellPos>> {
        self.checked_index(x, y)?;
        let mut neighbors = Vec::with_capacity(8);
        let x_range = x.saturating_sub(1)..=(x + 1).min(self.width - 1);
        for ny in y.saturating_sub(1)..=(y + 1).min(self.height - 1) {
            for nx in x_range.clone() {
                if nx != x || ny != y {
                    neighbors.push(CellPos { x: nx, y: ny });
                }
            }
        }
        Ok(neighbors)
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_occupied()).count()
    }

    /// Row-major iteration over every cell with its position
    pub fn iter(&self) -> impl Iterator<Item = (CellPos, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (self.pos_of(index), *cell))
    }
}

impl GridView for Grid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get_grid(&self, x: usize, y: usize) -> Result<u8> {
        self.get(x, y).map(CellState::code)
    }
}
