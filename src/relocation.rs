//! Relocation loop - moves unhappy agents until the grid settles
//!
//! The engine alternates between scanning the grid in row-major order for an
//! unhappy agent and relocating that agent to a uniformly random vacancy. A
//! sweep that relocates nobody means the grid has converged. The total number
//! of relocations per trial is capped by `max_iterations`.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::grid::{CellPos, CellState, Grid};
use crate::happiness::is_happy;
use crate::rng::RandomSource;

/// How a trial's relocation loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    /// A full sweep found no unhappy agent.
    Converged,
    /// The relocation cap was hit while unhappy agents remained.
    IterationLimitReached,
}

impl Termination {
    pub fn is_converged(self) -> bool {
        matches!(self, Termination::Converged)
    }
}

/// A single agent move, reported to hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub step: usize,
    pub group: u8,
    pub from: CellPos,
    pub to: CellPos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocationOutcome {
    pub termination: Termination,
    pub moves: usize,
    pub sweeps: usize,
}

/// Live grid plus the list of empty cell indices.
///
/// The vacancy list is kept in sync with the grid on every move so that a
/// random empty cell can be drawn in constant time.
#[derive(Debug, Clone)]
pub struct TrialState {
    grid: Grid,
    vacancies: Vec<usize>,
}

impl TrialState {
    pub fn new(grid: Grid) -> Self {
        let vacancies = (0..grid.cell_count())
            .filter(|&index| grid.get_index(index).is_empty())
            .collect();
        Self { grid, vacancies }
    }

    pub(crate) fn from_parts(grid: Grid, vacancies: Vec<usize>) -> Self {
        Self { grid, vacancies }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }

    pub fn vacancy_count(&self) -> usize {
        self.vacancies.len()
    }

    /// Move the agent at `source` to a random vacancy, returning the
    /// destination index.
    fn relocate(&mut self, source: usize, rng: &mut impl RandomSource) -> Result<usize> {
        if self.vacancies.is_empty() {
            return Err(SimulationError::CapacityExhausted);
        }
        let slot = rng.below(self.vacancies.len());
        let destination = self.vacancies[slot];
        let agent = self.grid.get_index(source);
        self.grid.set_index(source, CellState::Empty);
        self.grid.set_index(destination, agent);
        self.vacancies[slot] = source;
        Ok(destination)
    }
}

enum Phase {
    Scanning,
    Relocating { index: usize, group: u8 },
    Converged,
    IterationLimitReached,
}

#[derive(Debug, Clone, Copy)]
pub struct RelocationEngine {
    tolerance: u32,
    max_iterations: usize,
}

impl RelocationEngine {
    pub fn new(tolerance: u32, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.tolerance(), config.max_iterations())
    }

    pub fn run(
        &self,
        state: &mut TrialState,
        rng: &mut impl RandomSource,
    ) -> Result<RelocationOutcome> {
        self.run_with_hook(state, rng, |_| {})
    }

    pub fn run_with_hook<F>(
        &self,
        state: &mut TrialState,
        rng: &mut impl RandomSource,
        mut on_move: F,
    ) -> Result<RelocationOutcome>
    where
        F: FnMut(&Relocation),
    {
        let cell_count = state.grid.cell_count();
        // Destinations of this sweep's moves; those agents wait for the next sweep.
        let mut processed = vec![false; cell_count];
        let mut cursor = 0;
        let mut moved_this_sweep = 0;
        let mut moves = 0;
        let mut sweeps = 0;
        let mut phase = Phase::Scanning;

        loop {
            phase = match phase {
                Phase::Scanning => match self.next_unhappy(&state.grid, &mut cursor, &processed)? {
                    Some(_) if moves >= self.max_iterations => Phase::IterationLimitReached,
                    Some((index, group)) => Phase::Relocating { index, group },
                    None => {
                        sweeps += 1;
                        if moved_this_sweep == 0 {
                            Phase::Converged
                        } else {
                            processed.iter_mut().for_each(|flag| *flag = false);
                            cursor = 0;
                            moved_this_sweep = 0;
                            Phase::Scanning
                        }
                    }
                },
                Phase::Relocating {
                    index: source,
                    group,
                } => {
                    let destination = state.relocate(source, rng)?;
                    moves += 1;
                    moved_this_sweep += 1;
                    processed[destination] = true;

                    let relocation = Relocation {
                        step: moves,
                        group,
                        from: state.grid.pos_of(source),
                        to: state.grid.pos_of(destination),
                    };
                    trace!(
                        step = relocation.step,
                        group,
                        from = ?relocation.from,
                        to = ?relocation.to,
                        "relocated agent"
                    );
                    on_move(&relocation);
                    Phase::Scanning
                }
                Phase::Converged => {
                    debug!(moves, sweeps, "relocation converged");
                    return Ok(RelocationOutcome {
                        termination: Termination::Converged,
                        moves,
                        sweeps,
                    });
                }
                Phase::IterationLimitReached => {
                    debug!(moves, sweeps, "relocation stopped at iteration cap");
                    return Ok(RelocationOutcome {
                        termination: Termination::IterationLimitReached,
                        moves,
                        sweeps,
                    });
                }
            };
        }
    }

    /// Advance `cursor` to the next unhappy, not yet processed agent and
    /// return its index and group.
    fn next_unhappy(
        &self,
        grid: &Grid,
        cursor: &mut usize,
        processed: &[bool],
    ) -> Result<Option<(usize, u8)>> {
        while *cursor < grid.cell_count() {
            let index = *cursor;
            *cursor += 1;
            let CellState::Group(group) = grid.get_index(index) else {
                continue;
            };
            if processed[index] {
                continue;
            }
            let pos = grid.pos_of(index);
            if !is_happy(grid, pos.x, pos.y, self.tolerance)? {
                return Ok(Some((index, group)));
            }
        }
        Ok(None)
    }
}
