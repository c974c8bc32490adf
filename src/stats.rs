use serde::{Deserialize, Serialize};

use crate::simulation::TrialRecord;

/// Aggregate view over the trials of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomophilySummary {
    pub trials: usize,
    pub mean: f64,
    /// Population standard deviation (divides by the trial count).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub converged: usize,
}

impl HomophilySummary {
    pub fn from_records(records: &[TrialRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let trials = records.len();
        let n = trials as f64;
        let mean = records.iter().map(|r| r.homophily).sum::<f64>() / n;
        let variance = records
            .iter()
            .map(|r| (r.homophily - mean).powi(2))
            .sum::<f64>()
            / n;
        let min = records
            .iter()
            .map(|r| r.homophily)
            .fold(f64::INFINITY, f64::min);
        let max = records
            .iter()
            .map(|r| r.homophily)
            .fold(f64::NEG_INFINITY, f64::max);
        let converged = records
            .iter()
            .filter(|r| r.termination.is_converged())
            .count();

        Some(Self {
            trials,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            converged,
        })
    }
}
