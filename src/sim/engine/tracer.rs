use serde::{Deserialize, Serialize};

use crate::Point;
use crate::geom::GeometryError;
use crate::geom::ray::Ray;

use super::interaction::{Interaction, resolve};
use super::{Emitter, FlatScene};

/// One traced leg of a ray.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaySegment {
    pub start: Point,
    pub end: Point,
    /// Intensity carried along this leg.
    pub intensity: f64,
}

/// Intensity delivered to a detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Absorption {
    /// Index into `FlatScene::detector_ids`.
    pub detector: usize,
    pub intensity: f64,
}

/// State of a single ray in flight.
///
/// Never mutated: every bounce produces a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayState {
    pub ray: Ray,
    pub intensity: f64,
    pub bounces_remaining: usize,
}

/// Per-pass tracing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceSettings {
    /// Angle of incidence for this pass, in degrees.
    pub angle_of_incidence: f64,
    pub rays_per_source: usize,
    pub max_bounces: usize,
    /// Rays dimmer than this after a reflection stop.
    pub min_intensity: f64,
}

/// Complete path of one ray.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RayPath {
    pub segments: Vec<RaySegment>,
    pub absorption: Option<Absorption>,
}

/// Everything one source produced during one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTrace {
    pub segments: Vec<RaySegment>,
    pub absorptions: Vec<Absorption>,
    /// Rays discarded because of degenerate geometry.
    pub dropped_rays: usize,
}

/// Emission angles (degrees) of the fan of `emitter`.
///
/// Ray `i` leaves at `base + i` degrees. A source with a declared fan width
/// instead spreads its rays evenly over `base ± spread / 2`.
pub fn fan_angles(emitter: &Emitter, angle_of_incidence: f64, count: usize) -> Vec<f64> {
    let base = emitter.base_angle + angle_of_incidence;
    match emitter.spread {
        Some(spread) if count > 1 => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|i| base + (i as f64 / last - 0.5) * spread)
                .collect()
        }
        _ => (0..count).map(|i| base + i as f64).collect(),
    }
}

/// Initial states of all rays emitted by `emitter`.
///
/// Rays whose direction cannot be built are returned as errors so the caller
/// can drop them individually.
pub fn emit(
    emitter: &Emitter,
    settings: &TraceSettings,
) -> Vec<Result<RayState, GeometryError>> {
    fan_angles(emitter, settings.angle_of_incidence, settings.rays_per_source)
        .into_iter()
        .map(|angle| {
            Ray::from_angle(emitter.position, angle.to_radians()).map(|ray| RayState {
                ray,
                intensity: emitter.power,
                bounces_remaining: settings.max_bounces,
            })
        })
        .collect()
}

/// Follows one ray until it is absorbed, escapes, runs out of bounces or
/// becomes too dim.
///
/// The loop is bounded by the bounce budget, so closed mirror cavities
/// terminate after `max_bounces + 1` legs.
pub fn trace_ray(
    scene: &FlatScene,
    initial: RayState,
    min_intensity: f64,
) -> Result<RayPath, GeometryError> {
    let mut path = RayPath::default();
    let mut state = initial;

    loop {
        let ray = state.ray;
        let (end, interaction) = match scene.find_target_surface(&ray)? {
            None => (ray.point_at(scene.escape_distance(&ray)), Interaction::Escape),
            Some((idx, t)) => {
                let hit = ray.point_at(t);
                let interaction = resolve(&scene.surfaces[idx], &ray, hit, state.intensity)?;
                (hit, interaction)
            }
        };

        path.segments.push(RaySegment {
            start: ray.origin,
            end,
            intensity: state.intensity,
        });

        match interaction {
            Interaction::Escape => break,
            Interaction::Absorb {
                detector,
                intensity,
            } => {
                path.absorption = Some(Absorption {
                    detector,
                    intensity,
                });
                break;
            }
            Interaction::Redirect {
                direction,
                intensity,
            } => {
                if state.bounces_remaining == 0 || intensity < min_intensity {
                    break;
                }
                state = RayState {
                    ray: Ray::new(end, direction)?,
                    intensity: intensity.min(state.intensity),
                    bounces_remaining: state.bounces_remaining - 1,
                };
            }
        }
    }

    Ok(path)
}

/// Traces the whole fan of one source.
///
/// Returns `None` if `interrupted` fires before the fan is complete; a
/// partial fan is never returned.
pub fn trace_source<F>(
    scene: &FlatScene,
    emitter: &Emitter,
    settings: &TraceSettings,
    interrupted: F,
) -> Option<SourceTrace>
where
    F: Fn() -> bool,
{
    let mut trace = SourceTrace::default();

    for (i, initial) in emit(emitter, settings).into_iter().enumerate() {
        if interrupted() {
            return None;
        }
        match initial.and_then(|state| trace_ray(scene, state, settings.min_intensity)) {
            Ok(path) => {
                trace.segments.extend(path.segments);
                trace.absorptions.extend(path.absorption);
            }
            Err(e) => {
                log::debug!("Dropping ray {i} of source {}: {e}", emitter.id);
                trace.dropped_rays += 1;
            }
        }
    }

    Some(trace)
}
