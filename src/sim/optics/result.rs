use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use crate::sim::engine::tracer::RaySegment;

/// Result of one trace pass (one sweep sample).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Angle of incidence used for this pass, in degrees.
    pub sweep_value: f64,
    /// Traced legs of all rays, source by source, ray by ray.
    pub ray_segments: Vec<RaySegment>,
    /// Absorbed intensity per detector id.
    #[serde(rename = "detectors")]
    pub detector_readings: BTreeMap<String, f64>,
    /// Rays discarded because of degenerate geometry.
    #[serde(default)]
    pub dropped_rays: usize,
}

impl SimulationResult {
    pub fn reading(&self, detector_id: &str) -> Option<f64> {
        self.detector_readings.get(detector_id).copied()
    }
}

/// Single-pass view of a sweep: everything from every sample merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatResult {
    pub ray_segments: Vec<RaySegment>,
    pub detectors: BTreeMap<String, f64>,
}

/// Ordered results of a sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SweepResult {
    /// One result per completed sample, by ascending sample index.
    pub samples: Vec<SimulationResult>,
    /// Number of samples the sweep asked for.
    pub requested: usize,
}

impl SweepResult {
    pub fn new(samples: Vec<SimulationResult>, requested: usize) -> Self {
        Self { samples, requested }
    }

    /// True unless the sweep was cut short by cancellation.
    pub fn is_complete(&self) -> bool {
        self.samples.len() == self.requested
    }

    pub fn sweep_values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.sweep_value).collect()
    }

    /// Concatenates all ray segments (in sample order) and sums detector
    /// readings across samples.
    pub fn flatten(&self) -> FlatResult {
        let mut flat = FlatResult::default();
        for sample in &self.samples {
            flat.ray_segments.extend_from_slice(&sample.ray_segments);
            for (id, value) in &sample.detector_readings {
                *flat.detectors.entry(id.clone()).or_insert(0.0) += value;
            }
        }
        flat
    }

    pub fn into_samples(self) -> Vec<SimulationResult> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn sample(value: f64, reading: f64) -> SimulationResult {
        SimulationResult {
            sweep_value: value,
            ray_segments: vec![RaySegment {
                start: Point::new(0., 0.),
                end: Point::new(value, 0.),
                intensity: 1.0,
            }],
            detector_readings: BTreeMap::from([
                ("d1".to_string(), reading),
                ("d2".to_string(), 0.0),
            ]),
            dropped_rays: 0,
        }
    }

    #[test]
    fn test_flatten() {
        let sweep = SweepResult::new(vec![sample(1.0, 0.5), sample(2.0, 0.25)], 2);
        assert!(sweep.is_complete());
        assert_eq!(sweep.sweep_values(), vec![1.0, 2.0]);

        let flat = sweep.flatten();
        assert_eq!(flat.ray_segments.len(), 2);
        assert!(flat.ray_segments[1].end.is_close(&Point::new(2., 0.)));
        assert!((flat.detectors["d1"] - 0.75).abs() < 1e-12);
        assert_eq!(flat.detectors["d2"], 0.0);
    }

    #[test]
    fn test_incomplete_sweep() {
        let sweep = SweepResult::new(vec![sample(1.0, 0.5)], 3);
        assert!(!sweep.is_complete());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(sample(45.0, 1.0)).unwrap();
        assert_eq!(json["sweepValue"], 45.0);
        assert_eq!(json["raySegments"][0]["start"], serde_json::json!([0.0, 0.0]));
        assert_eq!(json["raySegments"][0]["end"], serde_json::json!([45.0, 0.0]));
        assert_eq!(json["detectors"]["d1"], 1.0);
        assert_eq!(json["droppedRays"], 0);
    }
}
