//! Ray / line segment intersection.
//!
//! Mirrors and lenses are modelled as straight segments on the bench.

use crate::geom::ray::Ray;
use crate::geom::{EPS, GeometryError};
use crate::{Point, Vector};

/// Where a ray crosses a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Ray parameter (distance from the ray origin)
    pub t: f64,
    /// Segment parameter: 0 at `a`, 1 at `b`
    pub u: f64,
    /// Intersection point
    pub point: Point,
}

/// Finds the first crossing of `ray` with the segment `a`-`b`.
///
/// Returns `Ok(None)` when the ray is (nearly) parallel to the segment, when
/// the crossing lies within `EPS` of (or behind) the ray origin, or when it
/// falls outside the segment. A segment whose end points coincide is an
/// error.
pub fn intersect_ray_segment(
    ray: &Ray,
    a: Point,
    b: Point,
) -> Result<Option<SegmentHit>, GeometryError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(GeometryError::NonFinite);
    }
    let s = b - a;
    let s_len = s.length();
    if s_len < EPS {
        return Err(GeometryError::CoincidentPoints);
    }

    // origin + t * d = a + u * s
    let d = ray.direction;
    let denom = d.cross(&s);
    if (denom / s_len).abs() < EPS {
        return Ok(None); // Parallel
    }

    let qp = a - ray.origin;
    let t = qp.cross(&s) / denom;
    let u = qp.cross(&d) / denom;

    if t > EPS && (0.0..=1.0).contains(&u) {
        Ok(Some(SegmentHit {
            t,
            u,
            point: ray.point_at(t),
        }))
    } else {
        Ok(None)
    }
}

/// Unit normal of the segment `a`-`b` (direction rotated by +90 degrees).
pub fn segment_normal(a: Point, b: Point) -> Result<Vector, GeometryError> {
    (b - a)
        .normalize()
        .map(|v| v.perpendicular())
        .map_err(|e| match e {
            GeometryError::ZeroDirection => GeometryError::CoincidentPoints,
            other => other,
        })
}

/// End points of a segment of `length` centred at `center` and running along
/// `angle` radians.
pub fn centered_segment(center: Point, angle: f64, length: f64) -> (Point, Point) {
    let half = Vector::from_angle(angle) * (length / 2.0);
    (center + half * -1.0, center + half)
}
