use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::grid::{Grid, GridView};
use crate::relocation::Termination;
use crate::rng::{RandomSource, SimRng};
use crate::stats::HomophilySummary;
use crate::trial::TrialRunner;

/// Per-trial result kept by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub index: usize,
    pub homophily: f64,
    pub termination: Termination,
    pub moves: usize,
}

/// Runs independent trials back to back.
///
/// One random source is shared by every trial. Only the most recent trial's
/// grid is kept; it backs the [`GridView`] accessors.
pub struct Simulator<R = SimRng> {
    config: SimulationConfig,
    rng: R,
    last_grid: Option<Grid>,
    records: Vec<TrialRecord>,
}

impl Simulator<SimRng> {
    pub fn new(config: SimulationConfig, seed: u64) -> Self {
        Self::with_rng(config, SimRng::new(seed))
    }
}

impl<R: RandomSource> Simulator<R> {
    pub fn with_rng(config: SimulationConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            last_grid: None,
            records: Vec::new(),
        }
    }

    /// Run `trials` trials and return their homophily values in order.
    pub fn simulate(&mut self, trials: usize) -> Result<Vec<f64>> {
        let records = self.run_trials(trials)?;
        Ok(records.iter().map(|record| record.homophily).collect())
    }

    /// Like [`Simulator::simulate`] but keeps termination details.
    ///
    /// Records and the retained grid are replaced only when every trial
    /// succeeds; a failed run leaves the previous results in place.
    pub fn run_trials(&mut self, trials: usize) -> Result<&[TrialRecord]> {
        let mut records = Vec::with_capacity(trials);
        let mut last_grid = None;
        let runner = TrialRunner::new(&self.config);
        for index in 0..trials {
            let outcome = runner.run(&mut self.rng)?;
            records.push(TrialRecord {
                index,
                homophily: outcome.homophily,
                termination: outcome.termination,
                moves: outcome.moves,
            });
            last_grid = Some(outcome.grid);
        }

        self.records = records;
        if last_grid.is_some() {
            self.last_grid = last_grid;
        }

        if let Some(summary) = self.summary() {
            info!(
                trials = summary.trials,
                mean = summary.mean,
                std_dev = summary.std_dev,
                converged = summary.converged,
                "simulation finished"
            );
        }
        Ok(&self.records)
    }

    /// Records of the latest run
    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn summary(&self) -> Option<HomophilySummary> {
        HomophilySummary::from_records(&self.records)
    }

    pub fn last_grid(&self) -> Option<&Grid> {
        self.last_grid.as_ref()
    }
}

impl<R: RandomSource> GridView for Simulator<R> {
    fn width(&self) -> usize {
        self.config.width()
    }

    fn height(&self) -> usize {
        self.config.height()
    }

    fn get_grid(&self, x: usize, y: usize) -> Result<u8> {
        self.last_grid
            .as_ref()
            .ok_or(SimulationError::NoTrialRun)?
            .get_grid(x, y)
    }
}
