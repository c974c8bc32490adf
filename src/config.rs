use serde::Serialize;

use crate::error::{Result, SimulationError};

/// Parameters shared read-only by every trial of a run.
///
/// `tolerance` is the minimum number of same-group neighbours an agent needs
/// among its occupied neighbours to stay put. `max_iterations` caps the total
/// number of relocations in one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationConfig {
    max_iterations: usize,
    num_groups: u8,
    population: usize,
    tolerance: u32,
    width: usize,
    height: usize,
}

impl SimulationConfig {
    pub fn new(
        max_iterations: usize,
        num_groups: usize,
        population: usize,
        tolerance: u32,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimulationError::InvalidConfig(format!(
                "grid dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let num_groups = match u8::try_from(num_groups) {
            Ok(0) | Err(_) => {
                return Err(SimulationError::InvalidConfig(format!(
                    "number of groups must be between 1 and {}, got {num_groups}",
                    u8::MAX
                )))
            }
            Ok(groups) => groups,
        };
        let capacity = width
            .checked_mul(height)
            .ok_or_else(|| SimulationError::InvalidConfig("grid is too large".into()))?;
        if population > capacity {
            return Err(SimulationError::Capacity {
                population,
                capacity,
            });
        }

        Ok(Self {
            max_iterations,
            num_groups,
            population,
            tolerance,
            width,
            height,
        })
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn num_groups(&self) -> u8 {
        self.num_groups
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn tolerance(&self) -> u32 {
        self.tolerance
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn capacity(&self) -> usize {
        self.width * self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = SimulationConfig::new(500, 2, 50, 3, 10, 10).unwrap();

        assert_eq!(config.max_iterations(), 500);
        assert_eq!(config.num_groups(), 2);
        assert_eq!(config.population(), 50);
        assert_eq!(config.tolerance(), 3);
        assert_eq!(config.capacity(), 100);
    }

    #[test]
    fn test_population_over_capacity() {
        let err = SimulationConfig::new(500, 2, 101, 3, 10, 10).unwrap_err();
        assert_eq!(
            err,
            SimulationError::Capacity {
                population: 101,
                capacity: 100
            }
        );
    }

    #[test]
    fn test_full_grid_is_allowed() {
        assert!(SimulationConfig::new(10, 2, 100, 3, 10, 10).is_ok());
    }

    #[test]
    fn test_rejects_degenerate_settings() {
        assert!(matches!(
            SimulationConfig::new(10, 0, 5, 1, 10, 10),
            Err(SimulationError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimulationConfig::new(10, 256, 5, 1, 10, 10),
            Err(SimulationError::InvalidConfig(_))
        ));
        assert!(matches!(
            SimulationConfig::new(10, 2, 0, 1, 0, 10),
            Err(SimulationError::InvalidConfig(_))
        ));
    }
}
