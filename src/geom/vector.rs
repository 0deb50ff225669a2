use crate::Point;
use crate::geom::{EPS, GeometryError};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub fn from_points(beg: Point, end: Point) -> Self {
        Self {
            dx: end.x - beg.x,
            dy: end.y - beg.y,
        }
    }

    /// Unit vector pointing at `angle` radians (counter-clockwise from +x).
    pub fn from_angle(angle: f64) -> Self {
        Self {
            dx: angle.cos(),
            dy: angle.sin(),
        }
    }

    /// Dot product between 2 vectors.
    pub fn dot(&self, other: &Self) -> f64 {
        self.dx * other.dx + self.dy * other.dy
    }

    /// Scalar (z-component of the) cross product between 2 vectors.
    ///
    /// Positive when `other` is counter-clockwise from `self`.
    pub fn cross(&self, other: &Self) -> f64 {
        self.dx * other.dy - self.dy * other.dx
    }

    /// Returns the length of the vector.
    pub fn length(&self) -> f64 {
        (self.dx.powi(2) + self.dy.powi(2)).sqrt()
    }

    /// The vector rotated by +90 degrees.
    pub fn perpendicular(&self) -> Self {
        Self {
            dx: -self.dy,
            dy: self.dx,
        }
    }

    pub fn is_close(&self, other: &Self) -> bool {
        (self.dx - other.dx).abs() < EPS && (self.dy - other.dy).abs() < EPS
    }

    pub fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }

    /// Normalizes the vector (divides by its length) and returns a copy.
    pub fn normalize(&self) -> Result<Self, GeometryError> {
        if !self.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        let len = self.length();
        if len < EPS {
            Err(GeometryError::ZeroDirection)
        } else {
            Ok(Self {
                dx: self.dx / len,
                dy: self.dy / len,
            })
        }
    }

    /// Mirror reflection of `self` about a surface with the given normal.
    ///
    /// The normal does not have to be unit length or face the incoming ray.
    /// Angle of incidence equals angle of reflection, and the length of
    /// `self` is preserved.
    pub fn reflect(&self, normal: &Self) -> Result<Self, GeometryError> {
        let n = normal.normalize()?;
        let dot = self.dot(&n);
        Ok(*self - 2.0 * dot * n)
    }
}

/// Reflects `direction` about `normal` (see [`Vector::reflect`]).
pub fn reflect(direction: Vector, normal: Vector) -> Result<Vector, GeometryError> {
    direction.reflect(&normal)
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(2); // Default 2 decimals
        write!(
            f,
            "Vector({:.prec$}, {:.prec$})",
            self.dx,
            self.dy,
            prec = prec
        )
    }
}

// Implement +
impl Add for Vector {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            dx: self.dx + other.dx,
            dy: self.dy + other.dy,
        }
    }
}

// Implement -
impl Sub for Vector {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            dx: self.dx - other.dx,
            dy: self.dy - other.dy,
        }
    }
}

impl Neg for Vector {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
        }
    }
}

// Implement *
impl Mul<f64> for Vector {
    type Output = Self;
    fn mul(self, other: f64) -> Self {
        Self {
            dx: self.dx * other,
            dy: self.dy * other,
        }
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;
    fn mul(self, other: Vector) -> Vector {
        other * self
    }
}
