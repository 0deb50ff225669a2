//! File I/O for scenes and simulation results.

pub mod scene_json;

pub use scene_json::{read_scene, results_to_string, scene_from_str, write_results};
