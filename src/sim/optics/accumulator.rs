use std::collections::BTreeMap;

use crate::sim::engine::tracer::Absorption;

/// Running detector totals for one sweep sample.
///
/// Every detector starts at 0.0, so detectors that receive nothing still
/// show up in the readings.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorAccumulator {
    ids: Vec<String>,
    totals: Vec<f64>,
}

impl DetectorAccumulator {
    pub fn new(detector_ids: &[String]) -> Self {
        Self {
            ids: detector_ids.to_vec(),
            totals: vec![0.0; detector_ids.len()],
        }
    }

    /// Adds absorbed intensity to a detector.
    pub fn record(&mut self, absorption: &Absorption) {
        if let Some(total) = self.totals.get_mut(absorption.detector) {
            *total += absorption.intensity;
        }
    }

    pub fn record_all<'a>(&mut self, absorptions: impl IntoIterator<Item = &'a Absorption>) {
        for a in absorptions {
            self.record(a);
        }
    }

    pub fn total(&self, id: &str) -> Option<f64> {
        self.ids
            .iter()
            .position(|d| d == id)
            .map(|idx| self.totals[idx])
    }

    /// Readings keyed by detector id.
    pub fn into_readings(self) -> BTreeMap<String, f64> {
        self.ids.into_iter().zip(self.totals).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<String> {
        vec!["d1".to_string(), "d2".to_string()]
    }

    #[test]
    fn test_starts_at_zero() {
        let acc = DetectorAccumulator::new(&ids());
        let readings = acc.into_readings();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings["d1"], 0.0);
        assert_eq!(readings["d2"], 0.0);
    }

    #[test]
    fn test_record_and_sum() {
        let mut acc = DetectorAccumulator::new(&ids());
        acc.record(&Absorption {
            detector: 1,
            intensity: 0.5,
        });
        acc.record_all(&[
            Absorption {
                detector: 1,
                intensity: 0.25,
            },
            Absorption {
                detector: 0,
                intensity: 1.0,
            },
        ]);
        assert!((acc.total("d2").unwrap() - 0.75).abs() < 1e-12);
        assert!((acc.total("d1").unwrap() - 1.0).abs() < 1e-12);
        assert!(acc.total("d3").is_none());
    }

    #[test]
    fn test_unknown_index_ignored() {
        let mut acc = DetectorAccumulator::new(&ids());
        acc.record(&Absorption {
            detector: 7,
            intensity: 1.0,
        });
        assert!(acc.into_readings().values().all(|v| *v == 0.0));
    }
}
