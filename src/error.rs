use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("population {population} exceeds grid capacity {capacity}")]
    Capacity { population: usize, capacity: usize },

    #[error("no empty cell available for relocation")]
    CapacityExhausted,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no trial has been run yet")]
    NoTrialRun,
}

pub type Result<T> = std::result::Result<T, SimulationError>;
