use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;

fn default_trials() -> usize {
    100
}

fn default_max_iterations() -> usize {
    1_000
}

fn default_num_groups() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Seed for the shared random source; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_trials")]
    pub trials: usize,
    pub grid: GridSize,
    #[serde(default = "default_num_groups")]
    pub num_groups: usize,
    /// Absolute agent count. Mutually exclusive with `occupancy`.
    #[serde(default)]
    pub population: Option<usize>,
    /// Fraction of cells to fill. Mutually exclusive with `population`.
    #[serde(default)]
    pub occupancy: Option<f64>,
    pub tolerance: u32,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl Scenario {
    /// Reference run: 75x75 grid at 60% occupancy, two groups, tolerance 2.
    pub fn classic() -> Self {
        Self {
            name: "classic".into(),
            description: Some("two groups on a 75x75 grid, 60% occupied".into()),
            seed: None,
            trials: default_trials(),
            grid: GridSize {
                width: 75,
                height: 75,
            },
            num_groups: 2,
            population: None,
            occupancy: Some(0.6),
            tolerance: 2,
            max_iterations: default_max_iterations(),
        }
    }

    pub fn resolved_population(&self) -> Result<usize> {
        match (self.population, self.occupancy) {
            (Some(population), None) => Ok(population),
            (None, Some(occupancy)) => {
                if !(0.0..=1.0).contains(&occupancy) {
                    bail!("occupancy must lie in [0, 1], got {occupancy}");
                }
                let Some(cells) = self.grid.width.checked_mul(self.grid.height) else {
                    bail!(
                        "scenario '{}' grid {}x{} is too large",
                        self.name,
                        self.grid.width,
                        self.grid.height
                    );
                };
                Ok((cells as f64 * occupancy).floor() as usize)
            }
            (Some(_), Some(_)) => bail!(
                "scenario '{}' sets both population and occupancy",
                self.name
            ),
            (None, None) => bail!(
                "scenario '{}' must set either population or occupancy",
                self.name
            ),
        }
    }

    pub fn config(&self) -> Result<SimulationConfig> {
        let population = self.resolved_population()?;
        let config = SimulationConfig::new(
            self.max_iterations,
            self.num_groups,
            population,
            self.tolerance,
            self.grid.width,
            self.grid.height,
        )
        .with_context(|| format!("invalid scenario '{}'", self.name))?;
        Ok(config)
    }

    pub fn trials(&self, override_trials: Option<usize>) -> usize {
        override_trials.unwrap_or(self.trials)
    }
}

pub struct ScenarioLoader {
    base_dir: PathBuf,
}

impl ScenarioLoader {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self, file: impl AsRef<Path>) -> Result<Scenario> {
        let path = self.base_dir.join(file);
        let data = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let scenario: Scenario = serde_yaml::from_str(&data)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_scenario() {
        let scenario = Scenario::classic();
        let config = scenario.config().unwrap();

        assert_eq!(config.width(), 75);
        assert_eq!(config.height(), 75);
        assert_eq!(config.population(), 3375);
        assert_eq!(config.tolerance(), 2);
        assert_eq!(config.max_iterations(), 1_000);
        assert_eq!(scenario.trials(None), 100);
        assert_eq!(scenario.trials(Some(3)), 3);
    }

    #[test]
    fn test_parse_with_defaults() {
        let yaml = "name: tiny\ngrid: { width: 10, height: 10 }\npopulation: 50\ntolerance: 3\n";
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(scenario.trials, 100);
        assert_eq!(scenario.num_groups, 2);
        assert_eq!(scenario.max_iterations, 1_000);
        assert_eq!(scenario.seed, None);
        assert_eq!(scenario.config().unwrap().population(), 50);
    }

    #[test]
    fn test_population_and_occupancy_conflict() {
        let mut scenario = Scenario::classic();
        scenario.population = Some(10);
        assert!(scenario.config().is_err());

        scenario.population = None;
        scenario.occupancy = None;
        assert!(scenario.config().is_err());

        scenario.occupancy = Some(1.5);
        assert!(scenario.config().is_err());
    }

    #[test]
    fn test_oversized_grid_with_occupancy_is_rejected() {
        let mut scenario = Scenario::classic();
        scenario.grid = GridSize {
            width: usize::MAX / 2,
            height: 4,
        };

        let err = scenario.config().unwrap_err();
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_over_capacity_scenario_is_rejected() {
        let mut scenario = Scenario::classic();
        scenario.grid = GridSize {
            width: 10,
            height: 10,
        };
        scenario.occupancy = None;
        scenario.population = Some(101);

        let err = scenario.config().unwrap_err();
        assert!(err
            .chain()
            .any(|cause| cause.to_string().contains("exceeds grid capacity")));
    }
}
