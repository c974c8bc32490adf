use tracing::debug;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::happiness::neighborhood;
use crate::placement::place_agents;
use crate::relocation::{Relocation, RelocationEngine, Termination, TrialState};
use crate::rng::RandomSource;

/// Everything one trial produces
#[derive(Debug, Clone)]
pub struct TrialOutcome {
    pub grid: Grid,
    pub homophily: f64,
    pub termination: Termination,
    pub moves: usize,
}

/// Mean same-group fraction over agents with at least one occupied
/// neighbour. Isolated agents are skipped; a grid with no such agent
/// scores 0.
pub fn homophily(grid: &Grid) -> Result<f64> {
    let mut total = 0.0;
    let mut sampled = 0usize;
    for (pos, cell) in grid.iter() {
        if cell.is_empty() {
            continue;
        }
        if let Some(ratio) = neighborhood(grid, pos.x, pos.y)?.ratio() {
            total += ratio;
            sampled += 1;
        }
    }
    if sampled == 0 {
        Ok(0.0)
    } else {
        Ok(total / sampled as f64)
    }
}

pub struct TrialRunner<'a> {
    config: &'a SimulationConfig,
}

impl<'a> TrialRunner<'a> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, rng: &mut impl RandomSource) -> Result<TrialOutcome> {
        self.run_with_hook(rng, |_| {})
    }

    pub fn run_with_hook<F>(&self, rng: &mut impl RandomSource, on_move: F) -> Result<TrialOutcome>
    where
        F: FnMut(&Relocation),
    {
        let config = self.config;
        let mut grid = Grid::new(config.width(), config.height());
        let vacancies = place_agents(&mut grid, config.num_groups(), config.population(), rng)?;
        let mut state = TrialState::from_parts(grid, vacancies);

        let outcome =
            RelocationEngine::from_config(config).run_with_hook(&mut state, rng, on_move)?;
        let grid = state.into_grid();
        let homophily = homophily(&grid)?;
        debug!(
            homophily,
            moves = outcome.moves,
            termination = ?outcome.termination,
            "trial finished"
        );

        Ok(TrialOutcome {
            grid,
            homophily,
            termination: outcome.termination,
            moves: outcome.moves,
        })
    }
}
