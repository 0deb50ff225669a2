use crate::Point;
use crate::geom::EPS;
use crate::geom::ray::Ray;

/// Tests a ray against a capture disk.
///
/// The ray is captured when its point of closest approach to `center` lies
/// in front of the origin (`t > EPS`) and no farther than `radius` from the
/// centre. Returns the ray parameter of that closest-approach point, which
/// is where the ray is absorbed.
pub fn intersect_ray_circle(ray: &Ray, center: Point, radius: f64) -> Option<f64> {
    if radius.is_nan() || radius < 0.0 || !center.is_finite() {
        return None;
    }
    let t = ray.closest_approach(center);
    if t <= EPS {
        return None;
    }
    let miss = ray.point_at(t).distance(&center);
    (miss <= radius).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vector;

    fn ray_x() -> Ray {
        Ray::new(Point::new(0., 0.), Vector::new(1., 0.)).unwrap()
    }

    #[test]
    fn test_capture_on_axis() {
        let t = intersect_ray_circle(&ray_x(), Point::new(100., 0.), 30.).unwrap();
        assert!((t - 100.).abs() < 1e-12);
    }

    #[test]
    fn test_capture_off_axis() {
        let t = intersect_ray_circle(&ray_x(), Point::new(50., 20.), 30.).unwrap();
        assert!((t - 50.).abs() < 1e-12);
        assert!(intersect_ray_circle(&ray_x(), Point::new(50., 31.), 30.).is_none());
    }

    #[test]
    fn test_no_capture_behind_or_beside_origin() {
        assert!(intersect_ray_circle(&ray_x(), Point::new(-100., 0.), 30.).is_none());
        // Centre straight above the origin: closest approach is the origin itself
        assert!(intersect_ray_circle(&ray_x(), Point::new(0., 100.), 30.).is_none());
        assert!(intersect_ray_circle(&ray_x(), Point::new(0., 10.), 30.).is_none());
    }

    #[test]
    fn test_invalid_radius() {
        assert!(intersect_ray_circle(&ray_x(), Point::new(10., 0.), -1.).is_none());
        assert!(intersect_ray_circle(&ray_x(), Point::new(10., 0.), f64::NAN).is_none());
    }
}
