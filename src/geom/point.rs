use crate::Vector;
use crate::geom::EPS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Point on the optical bench.
///
/// Serialized as a `[x, y]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns true if both points are very close to each other.
    pub fn is_close(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPS && (self.y - other.y).abs() < EPS
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Self) -> f64 {
        distance(*self, *other)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
}

impl From<[f64; 2]> for Point {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<Point> for [f64; 2] {
    fn from(value: Point) -> Self {
        [value.x, value.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(f, "Point({:.prec$}, {:.prec$})", self.x, self.y, prec = prec)
    }
}

// Implement +
impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, other: Vector) -> Self {
        Self {
            x: self.x + other.dx,
            y: self.y + other.dy,
        }
    }
}

// Implement - (point to point gives the vector between them)
impl Sub for Point {
    type Output = Vector;
    fn sub(self, other: Self) -> Vector {
        Vector::from_points(other, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_close() {
        let pa = Point::new(5., 5.);
        let pb = Point::new(5.0000000001, 5.);
        let pc = Point::new(5.0001, 5.);
        assert!(pa.is_close(&pb));
        assert!(!pa.is_close(&pc));
    }

    #[test]
    fn test_distance() {
        let p0 = Point::new(0., 0.);
        let p1 = Point::new(3., 4.);
        assert!((distance(p0, p1) - 5.0).abs() < 1e-12);
        assert!((p1.distance(&p0) - 5.0).abs() < 1e-12);
        assert_eq!(p0.distance(&p0), 0.0);
    }

    #[test]
    fn test_add_and_sub() {
        let p = Point::new(1., 2.) + Vector::new(2., -1.);
        assert!(p.is_close(&Point::new(3., 1.)));
        let v = Point::new(3., 1.) - Point::new(1., 2.);
        assert!(v.is_close(&Vector::new(2., -1.)));
    }

    #[test]
    fn test_serialize_as_pair() {
        let json = serde_json::to_string(&Point::new(1.5, -2.0)).unwrap();
        assert_eq!(json, "[1.5,-2.0]");
        let p: Point = serde_json::from_str("[0.0, 100.0]").unwrap();
        assert!(p.is_close(&Point::new(0., 100.)));
    }
}
