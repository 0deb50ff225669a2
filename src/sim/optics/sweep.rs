use crate::scene::Sweep;

use super::error::SimulationError;

/// Angle-of-incidence values of a sweep, in ascending sample order.
///
/// `points` values spaced evenly over `[start, stop]`, both ends included.
/// A single point yields `start`.
pub fn sample_values(sweep: &Sweep) -> Result<Vec<f64>, SimulationError> {
    if sweep.points < 1 {
        return Err(SimulationError::InvalidSweep(format!(
            "points must be at least 1, got {}",
            sweep.points
        )));
    }
    if !sweep.start.is_finite() || !sweep.stop.is_finite() {
        return Err(SimulationError::InvalidSweep(format!(
            "start and stop must be finite, got [{}, {}]",
            sweep.start, sweep.stop
        )));
    }
    if sweep.points == 1 {
        return Ok(vec![sweep.start]);
    }

    let span = sweep.stop - sweep.start;
    let last = (sweep.points - 1) as f64;
    Ok((0..sweep.points)
        .map(|i| sweep.start + span * (i as f64 / last))
        .collect())
}
