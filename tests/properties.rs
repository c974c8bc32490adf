use proptest::prelude::*;

use schelling::{
    happiness::is_happy, placement::place_agents, CellState, Grid, RelocationEngine, SimRng,
    SimulationConfig, Simulator, TrialState,
};

fn random_grid(width: usize, height: usize, groups: u8, population: usize, seed: u64) -> Grid {
    let mut grid = Grid::new(width, height);
    let mut rng = SimRng::new(seed);
    place_agents(&mut grid, groups, population, &mut rng).unwrap();
    grid
}

proptest! {
    #[test]
    fn happiness_is_monotone_in_tolerance(
        seed in any::<u64>(),
        fill in 0usize..=64,
        low in 0u32..=9,
        bump in 0u32..=9,
    ) {
        let grid = random_grid(8, 8, 2, fill, seed);
        let high = low + bump;
        for y in 0..8 {
            for x in 0..8 {
                if !is_happy(&grid, x, y, low).unwrap() {
                    prop_assert!(!is_happy(&grid, x, y, high).unwrap());
                }
            }
        }
    }

    #[test]
    fn relocation_preserves_population(
        seed in any::<u64>(),
        fill in 1usize..60,
        groups in 1u8..=4,
        tolerance in 0u32..=8,
        cap in 0usize..200,
    ) {
        let grid = random_grid(8, 8, groups, fill, seed);
        let mut per_group = vec![0usize; groups as usize];
        for (_, cell) in grid.iter() {
            if let CellState::Group(g) = cell {
                per_group[g as usize] += 1;
            }
        }

        let mut state = TrialState::new(grid);
        let mut rng = SimRng::new(seed.wrapping_add(1));
        let outcome = RelocationEngine::new(tolerance, cap).run(&mut state, &mut rng).unwrap();

        prop_assert!(outcome.moves <= cap);
        prop_assert_eq!(state.grid().occupied_count(), fill);
        let mut after = vec![0usize; groups as usize];
        for (_, cell) in state.grid().iter() {
            if let CellState::Group(g) = cell {
                after[g as usize] += 1;
            }
        }
        prop_assert_eq!(after, per_group);
    }

    #[test]
    fn homophily_stays_in_unit_interval(
        seed in any::<u64>(),
        fill in 0usize..36,
        tolerance in 0u32..=8,
    ) {
        let config = SimulationConfig::new(100, 2, fill, tolerance, 6, 6).unwrap();
        let mut sim = Simulator::new(config, seed);
        for value in sim.simulate(2).unwrap() {
            prop_assert!((0.0..=1.0).contains(&value));
        }
    }
}
