use rayon::prelude::*;

use crate::scene::Scene;
use crate::sim::engine::FlatScene;
use crate::sim::engine::tracer::{SourceTrace, TraceSettings, trace_source};

use super::accumulator::DetectorAccumulator;
use super::config::{CancelPolicy, SimulationConfig, SimulationOptions};
use super::error::{Result, SimulationError};
use super::result::{SimulationResult, SweepResult};
use super::sweep::sample_values;

/// Forward ray tracing over a fixed scene.
///
/// The scene is flattened once; every pass (sweep sample) then runs
/// independently over the same read-only data.
pub struct OpticsSimulation<'a> {
    config: SimulationConfig,
    scene: &'a Scene,
    flat: FlatScene,
}

impl<'a> OpticsSimulation<'a> {
    pub fn new(scene: &'a Scene, config: SimulationConfig) -> Self {
        let flat = FlatScene::new(scene, &config);
        Self {
            config,
            scene,
            flat,
        }
    }

    /// Single pass at the scene's own angle of incidence.
    pub fn run_single(&self, options: &SimulationOptions) -> Result<SimulationResult> {
        let value = self.scene.metadata().angle_of_incidence;
        self.run_sample(value, options)
            .ok_or(SimulationError::Cancelled {
                completed: 0,
                requested: 1,
            })
    }

    /// Runs every sample of the scene's sweep.
    ///
    /// Samples may execute in any order on the worker pool; the result is
    /// always ordered by sample index. On cancellation the completed prefix
    /// is returned or an error raised, depending on `options.policy`.
    pub fn run_sweep(&self, options: &SimulationOptions) -> Result<SweepResult> {
        let values = sample_values(&self.scene.metadata().sweep)?;
        let requested = values.len();
        log::info!(
            "Sweep: {} samples, {} sources, {} surfaces",
            requested,
            self.flat.emitters.len(),
            self.flat.surfaces.len()
        );

        let run = || -> Vec<Option<SimulationResult>> {
            if self.config.parallel {
                values
                    .par_iter()
                    .map(|&v| self.run_sample(v, options))
                    .collect()
            } else {
                values.iter().map(|&v| self.run_sample(v, options)).collect()
            }
        };

        let outcomes = match self.config.worker_threads {
            Some(n) if self.config.parallel => {
                let num_threads = bounded_worker_count(n);
                log::debug!("Building worker pool with {num_threads} threads");
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| SimulationError::WorkerPool(e.to_string()))?;
                pool.install(run)
            }
            _ => run(),
        };

        completed_prefix(outcomes, options.policy)
    }

    /// Traces every source at one angle of incidence.
    ///
    /// Returns `None` if interrupted; a sample is either complete or absent.
    pub fn run_sample(&self, value: f64, options: &SimulationOptions) -> Option<SimulationResult> {
        if options.is_interrupted() {
            return None;
        }

        let metadata = self.scene.metadata();
        let settings = TraceSettings {
            angle_of_incidence: value,
            rays_per_source: metadata.rays_per_source,
            max_bounces: metadata.max_bounces,
            min_intensity: self.config.min_intensity,
        };
        let interrupted = || options.is_interrupted();

        // Per-source partial results, merged below in source order so the
        // sums do not depend on scheduling.
        let traces: Vec<Option<SourceTrace>> = if self.config.parallel {
            self.flat
                .emitters
                .par_iter()
                .map(|e| trace_source(&self.flat, e, &settings, interrupted))
                .collect()
        } else {
            self.flat
                .emitters
                .iter()
                .map(|e| trace_source(&self.flat, e, &settings, interrupted))
                .collect()
        };

        let mut accumulator = DetectorAccumulator::new(&self.flat.detector_ids);
        let mut ray_segments = Vec::new();
        let mut dropped_rays = 0;
        for trace in traces {
            let trace = trace?;
            accumulator.record_all(&trace.absorptions);
            ray_segments.extend(trace.segments);
            dropped_rays += trace.dropped_rays;
        }
        if dropped_rays > 0 {
            log::debug!("Sample {value}: dropped {dropped_rays} degenerate rays");
        }

        Some(SimulationResult {
            sweep_value: value,
            ray_segments,
            detector_readings: accumulator.into_readings(),
            dropped_rays,
        })
    }
}

/// Keeps the leading run of completed samples.
///
/// Anything after the first missing sample is discarded, even if it
/// finished, so the result is always a prefix of the sweep.
fn completed_prefix(
    outcomes: Vec<Option<SimulationResult>>,
    policy: CancelPolicy,
) -> Result<SweepResult> {
    let requested = outcomes.len();
    let samples: Vec<SimulationResult> = outcomes.into_iter().map_while(|o| o).collect();
    let completed = samples.len();

    if completed < requested {
        log::warn!("Sweep interrupted after {completed} of {requested} samples");
        if policy == CancelPolicy::Fail {
            return Err(SimulationError::Cancelled {
                completed,
                requested,
            });
        }
    } else {
        log::info!("Sweep finished: {completed} samples");
    }

    Ok(SweepResult::new(samples, requested))
}

/// Clamps a requested worker count to 1..=available cores.
fn bounded_worker_count(requested: usize) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    requested.clamp(1, cores)
}

/// Runs a single pass at `metadata.angle_of_incidence`, ignoring the sweep.
pub fn simulate(scene: &Scene) -> Result<SimulationResult> {
    OpticsSimulation::new(scene, SimulationConfig::new()).run_single(&SimulationOptions::new())
}

/// Runs the full sweep with default settings.
pub fn simulate_sweep(scene: &Scene) -> Result<Vec<SimulationResult>> {
    simulate_sweep_with(scene, &SimulationConfig::new(), &SimulationOptions::new())
        .map(SweepResult::into_samples)
}

/// Runs the full sweep with explicit settings and cancellation options.
pub fn simulate_sweep_with(
    scene: &Scene,
    config: &SimulationConfig,
    options: &SimulationOptions,
) -> Result<SweepResult> {
    OpticsSimulation::new(scene, config.clone()).run_sweep(options)
}
