use crate::geom::ray::Ray;
use crate::geom::segment::segment_normal;
use crate::geom::{EPS, GeometryError};
use crate::{Point, Vector};

use super::Surface;

/// Outcome of a ray meeting a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Interaction {
    /// The ray continues from the hit point in a new direction.
    Redirect { direction: Vector, intensity: f64 },
    /// The ray is absorbed by a detector.
    Absorb { detector: usize, intensity: f64 },
    /// No surface ahead: the ray leaves the scene.
    Escape,
}

impl Interaction {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Interaction::Redirect { .. })
    }
}

/// Resolves the interaction of `ray`, carrying `intensity`, with `surface`
/// at `hit`.
pub fn resolve(
    surface: &Surface,
    ray: &Ray,
    hit: Point,
    intensity: f64,
) -> Result<Interaction, GeometryError> {
    match surface {
        Surface::Mirror { a, b, reflectivity } => {
            let normal = segment_normal(*a, *b)?;
            Ok(Interaction::Redirect {
                direction: ray.direction.reflect(&normal)?,
                intensity: intensity * reflectivity,
            })
        }
        Surface::Lens {
            center,
            axis,
            focal_length,
            ..
        } => Ok(Interaction::Redirect {
            direction: refract_thin_lens(ray.direction, *axis, *center, hit, *focal_length)?,
            intensity,
        }),
        Surface::Detector {
            detector,
            sensitivity,
            ..
        } => Ok(Interaction::Absorb {
            detector: *detector,
            intensity: intensity * sensitivity,
        }),
    }
}

/// Paraxial thin-lens bend.
///
/// The lateral slope of the ray relative to the optical axis changes by
/// `-h / f`, where `h` is the signed hit height on the lens. Rays travelling
/// against the axis are handled symmetrically. Without a usable focal length
/// the lens is a pass-through.
pub fn refract_thin_lens(
    direction: Vector,
    axis: Vector,
    center: Point,
    hit: Point,
    focal_length: Option<f64>,
) -> Result<Vector, GeometryError> {
    let f = match focal_length {
        Some(f) if f.is_finite() && f.abs() > EPS => f,
        _ => return Ok(direction),
    };
    let axis = axis.normalize()?;
    let lateral = axis.perpendicular();

    let along = direction.dot(&axis);
    if along.abs() < EPS {
        return Ok(direction); // Grazing
    }
    let forward = axis * along.signum();
    let h = (hit - center).dot(&lateral);
    let slope = direction.dot(&lateral) / along.abs();

    (forward + lateral * (slope - h / f)).normalize()
}
