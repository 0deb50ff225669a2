pub mod geom;
pub mod io;
pub mod scene;
pub mod sim;

// Prelude
pub use geom::point::Point;
pub use geom::vector::Vector;
pub use scene::{Component, ComponentKind, ComponentType, Metadata, Scene, SceneError, Sweep};
pub use sim::{
    SimulationConfig, SimulationError, SimulationOptions, SimulationResult, SweepResult,
    simulate, simulate_sweep, simulate_sweep_with,
};
