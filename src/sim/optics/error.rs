//! Error types for optical simulations.

use thiserror::Error;

use crate::scene::SceneError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Simulation cancelled after {completed} of {requested} samples")]
    Cancelled { completed: usize, requested: usize },

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
