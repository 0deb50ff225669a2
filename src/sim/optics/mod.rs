pub mod accumulator;
pub mod config;
pub mod error;
pub mod result;
mod simulation;
pub mod sweep;

pub use config::{CancelPolicy, CancelToken, SimulationConfig, SimulationOptions};
pub use error::SimulationError;
pub use result::{FlatResult, RaySegment, SimulationResult, SweepResult};
pub use simulation::{OpticsSimulation, simulate, simulate_sweep, simulate_sweep_with};
