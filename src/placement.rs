//! Initial seeding of agents onto an empty grid

use crate::error::{Result, SimulationError};
use crate::grid::{CellState, Grid};
use crate::rng::{partial_shuffle, shuffle, RandomSource};

/// Split `population` across `num_groups` as evenly as possible.
/// The remainder goes to the lowest-numbered groups.
pub fn group_sizes(num_groups: u8, population: usize) -> Vec<usize> {
    let groups = num_groups as usize;
    if groups == 0 {
        return Vec::new();
    }
    let base = population / groups;
    let remainder = population % groups;
    (0..groups)
        .map(|g| base + usize::from(g < remainder))
        .collect()
}

/// Place `population` agents on distinct random cells of `grid`.
///
/// Cells are sampled without replacement and the group labels are shuffled
/// before assignment. Returns the indices of the cells left empty, which the
/// relocation engine uses as its vacancy list.
pub fn place_agents(
    grid: &mut Grid,
    num_groups: u8,
    population: usize,
    rng: &mut impl RandomSource,
) -> Result<Vec<usize>> {
    let capacity = grid.cell_count();
    if population > capacity {
        return Err(SimulationError::Capacity {
            population,
            capacity,
        });
    }
    if num_groups == 0 && population > 0 {
        return Err(SimulationError::InvalidConfig(
            "cannot place agents without any groups".into(),
        ));
    }

    let mut labels: Vec<u8> = group_sizes(num_groups, population)
        .into_iter()
        .enumerate()
        .flat_map(|(g, count)| std::iter::repeat(g as u8).take(count))
        .collect();
    shuffle(&mut labels, rng);

    let mut cells: Vec<usize> = (0..capacity).collect();
    partial_shuffle(&mut cells, population, rng);

    for (&index, &group) in cells[..population].iter().zip(&labels) {
        grid.set_index(index, CellState::Group(group));
    }

    Ok(cells.split_off(population))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimRng;

    #[test]
    fn test_group_sizes_even_split() {
        assert_eq!(group_sizes(2, 50), vec![25, 25]);
        assert_eq!(group_sizes(3, 10), vec![4, 3, 3]);
        assert_eq!(group_sizes(4, 2), vec![1, 1, 0, 0]);
        assert_eq!(group_sizes(1, 7), vec![7]);
    }

    #[test]
    fn test_placement_counts() {
        let mut grid = Grid::new(10, 10);
        let mut rng = SimRng::new(11);
        let vacancies = place_agents(&mut grid, 3, 61, &mut rng).unwrap();

        assert_eq!(grid.occupied_count(), 61);
        assert_eq!(vacancies.len(), 39);
        for &index in &vacancies {
            assert!(grid.get_index(index).is_empty());
        }

        let mut per_group = [0usize; 3];
        for (_, cell) in grid.iter() {
            if let CellState::Group(g) = cell {
                per_group[g as usize] += 1;
            }
        }
        assert_eq!(per_group, [21, 20, 20]);
    }

    #[test]
    fn test_full_grid_leaves_no_vacancies() {
        let mut grid = Grid::new(4, 4);
        let mut rng = SimRng::new(5);
        let vacancies = place_agents(&mut grid, 2, 16, &mut rng).unwrap();

        assert!(vacancies.is_empty());
        assert_eq!(grid.occupied_count(), 16);
    }

    #[test]
    fn test_over_capacity_fails_without_touching_grid() {
        let mut grid = Grid::new(3, 3);
        let mut rng = SimRng::new(5);
        let err = place_agents(&mut grid, 2, 10, &mut rng).unwrap_err();

        assert_eq!(
            err,
            SimulationError::Capacity {
                population: 10,
                capacity: 9
            }
        );
        assert_eq!(grid.occupied_count(), 0);
    }
}
