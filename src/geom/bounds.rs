use crate::Point;
use crate::geom::EPS;
use crate::geom::ray::Ray;

/// Axis-aligned rectangle enclosing the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    /// Bounding box of all points. Returns `None` for an empty slice.
    pub fn from_points(pts: &[Point]) -> Option<Self> {
        let first = pts.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in pts.iter().skip(1) {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some(Self { min, max })
    }

    /// Returns a copy grown by `margin` on every side.
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.min.x - EPS
            && pt.x <= self.max.x + EPS
            && pt.y >= self.min.y - EPS
            && pt.y <= self.max.y + EPS
    }

    /// Distance along `ray` to where it leaves the rectangle.
    ///
    /// Rays starting outside the rectangle leave it immediately (0.0).
    pub fn exit_distance(&self, ray: &Ray) -> f64 {
        if !self.contains(ray.origin) {
            return 0.0;
        }
        let d = ray.direction;
        let o = ray.origin;
        let tx = if d.dx > EPS {
            (self.max.x - o.x) / d.dx
        } else if d.dx < -EPS {
            (self.min.x - o.x) / d.dx
        } else {
            f64::INFINITY
        };
        let ty = if d.dy > EPS {
            (self.max.y - o.y) / d.dy
        } else if d.dy < -EPS {
            (self.min.y - o.y) / d.dy
        } else {
            f64::INFINITY
        };
        tx.min(ty).max(0.0)
    }
}
