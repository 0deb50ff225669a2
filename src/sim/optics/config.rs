use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Engine-wide simulation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    // Geometry defaults for components that do not declare a size
    pub default_capture_radius: f64,
    pub default_mirror_length: f64,
    pub default_lens_height: f64,

    // Tracing
    /// Travel distance of escaping rays when the scene is unbounded.
    pub max_travel: f64,
    /// Rays dimmer than this after a reflection are not traced further.
    /// Set to 0.0 to disable.
    pub min_intensity: f64,

    // Parallelism
    /// Run sweep samples and sources on rayon workers.
    pub parallel: bool,
    /// Size of a dedicated worker pool, clamped to the available cores.
    /// `None` uses the global rayon pool.
    pub worker_threads: Option<usize>,
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self {
            default_capture_radius: 30.0,
            default_mirror_length: 160.0,
            default_lens_height: 120.0,
            max_travel: 1000.0,
            min_intensity: 1e-3,
            parallel: true,
            worker_threads: None,
        }
    }

    /// Same settings, traced on the calling thread only.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::new()
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared flag a caller can raise to stop a running sweep.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// What a cancelled sweep returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CancelPolicy {
    /// Return the samples completed before the first unfinished one.
    #[default]
    ReturnPrefix,
    /// Fail with `SimulationError::Cancelled`.
    Fail,
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct SimulationOptions {
    pub cancel: Option<CancelToken>,
    pub deadline: Option<Instant>,
    pub policy: CancelPolicy,
}

impl SimulationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_policy(mut self, policy: CancelPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// True once the token is raised or the deadline has passed.
    pub fn is_interrupted(&self) -> bool {
        self.cancel.as_ref().is_some_and(|c| c.is_cancelled())
            || self.deadline.is_some_and(|d| Instant::now() >= d)
    }
}
