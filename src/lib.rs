pub mod config;
pub mod error;
pub mod grid;
pub mod happiness;
pub mod placement;
pub mod relocation;
pub mod rng;
pub mod scenario;
pub mod simulation;
pub mod stats;
pub mod trial;

pub use config::SimulationConfig;
pub use error::{Result, SimulationError};
pub use grid::{CellPos, CellState, Grid, GridView};
pub use relocation::{Relocation, RelocationEngine, RelocationOutcome, Termination, TrialState};
pub use rng::{RandomSource, SimRng};
pub use scenario::{Scenario, ScenarioLoader};
pub use simulation::{Simulator, TrialRecord};
pub use stats::HomophilySummary;
pub use trial::{TrialOutcome, TrialRunner};
