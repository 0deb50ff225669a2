pub mod engine;
pub mod optics;

pub use optics::{
    OpticsSimulation, SimulationConfig, SimulationError, SimulationOptions, SimulationResult,
    SweepResult, simulate, simulate_sweep, simulate_sweep_with,
};
