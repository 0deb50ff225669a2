//! Ray casting infrastructure.
//!
//! This module provides the geometric half-line used by the tracer. Physical
//! state (intensity, remaining bounces) lives in the engine.

use crate::geom::GeometryError;
use crate::{Point, Vector};

/// A ray defined by an origin point and a unit direction vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray
    pub origin: Point,
    /// Direction vector (always normalized)
    pub direction: Vector,
}

impl Ray {
    /// Creates a new ray from origin point and direction vector.
    ///
    /// The direction vector is automatically normalized. Zero-length or
    /// non-finite input is rejected instead of producing NaN downstream.
    pub fn new(origin: Point, direction: Vector) -> Result<Self, GeometryError> {
        if !origin.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        let direction = direction.normalize()?;
        Ok(Self { origin, direction })
    }

    /// Creates a ray leaving `origin` at `angle` radians.
    pub fn from_angle(origin: Point, angle: f64) -> Result<Self, GeometryError> {
        Self::new(origin, Vector::from_angle(angle))
    }

    /// Creates a ray from two points (origin to target).
    pub fn from_points(origin: Point, target: Point) -> Result<Self, GeometryError> {
        Self::new(origin, target - origin).map_err(|e| match e {
            GeometryError::ZeroDirection => GeometryError::CoincidentPoints,
            other => other,
        })
    }

    /// Returns the point along the ray at parameter t.
    ///
    /// point = origin + t * direction
    pub fn point_at(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Ray parameter of the point closest to `target`.
    ///
    /// Negative when `target` lies behind the origin.
    pub fn closest_approach(&self, target: Point) -> f64 {
        (target - self.origin).dot(&self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let ray = Ray::new(Point::new(0.0, 0.0), Vector::new(3.0, 4.0)).unwrap();
        assert!(ray.direction.is_close(&Vector::new(0.6, 0.8)));

        // Zero direction should fail
        let ray = Ray::new(Point::new(0.0, 0.0), Vector::new(0.0, 0.0));
        assert_eq!(ray, Err(GeometryError::ZeroDirection));

        // So should a NaN origin
        let ray = Ray::new(Point::new(f64::NAN, 0.0), Vector::new(1.0, 0.0));
        assert_eq!(ray, Err(GeometryError::NonFinite));
    }

    #[test]
    fn test_ray_from_points() {
        let ray = Ray::from_points(Point::new(0.0, 0.0), Point::new(1.0, 1.0));
        assert!(ray.is_ok());
        let ray = Ray::from_points(Point::new(2.0, 2.0), Point::new(2.0, 2.0));
        assert_eq!(ray, Err(GeometryError::CoincidentPoints));
    }

    #[test]
    fn test_ray_point_at() {
        let ray = Ray::from_angle(Point::new(1.0, 0.0), 0.0).unwrap();
        let p = ray.point_at(5.0);
        assert!(p.is_close(&Point::new(6.0, 0.0)));
    }

    #[test]
    fn test_closest_approach() {
        let ray = Ray::new(Point::new(0.0, 0.0), Vector::new(1.0, 0.0)).unwrap();
        assert!((ray.closest_approach(Point::new(10.0, 7.0)) - 10.0).abs() < 1e-12);
        assert!(ray.closest_approach(Point::new(-4.0, 1.0)) < 0.0);
    }
}
