use crate::error::Result;
use crate::grid::{CellState, Grid};

/// Neighbour tally around one agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Neighborhood {
    pub same: u32,
    pub occupied: u32,
}

impl Neighborhood {
    /// Fraction of occupied neighbours sharing the agent's group, `None` when
    /// the agent has no occupied neighbours.
    pub fn ratio(&self) -> Option<f64> {
        if self.occupied == 0 {
            None
        } else {
            Some(self.same as f64 / self.occupied as f64)
        }
    }
}

/// Count occupied and same-group neighbours of the cell at `(x, y)`.
/// An empty cell reports an empty tally.
pub fn neighborhood(grid: &Grid, x: usize, y: usize) -> Result<Neighborhood> {
    let group = match grid.get(x, y)? {
        CellState::Empty => return Ok(Neighborhood::default()),
        CellState::Group(g) => g,
    };

    let mut tally = Neighborhood::default();
    for pos in grid.neighbors(x, y)? {
        match grid.get(pos.x, pos.y)? {
            CellState::Empty => {}
            CellState::Group(other) => {
                tally.occupied += 1;
                if other == group {
                    tally.same += 1;
                }
            }
        }
    }
    Ok(tally)
}

/// Whether the agent at `(x, y)` is content to stay.
///
/// Happy means at least `tolerance` same-group neighbours, or no occupied
/// neighbours at all. Empty cells are always happy.
pub fn is_happy(grid: &Grid, x: usize, y: usize, tolerance: u32) -> Result<bool> {
    let tally = neighborhood(grid, x, y)?;
    Ok(tally.occupied == 0 || tally.same >= tolerance)
}
