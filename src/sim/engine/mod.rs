pub mod interaction;
pub mod tracer;

use crate::geom::bounds::Bounds;
use crate::geom::circle::intersect_ray_circle;
use crate::geom::ray::Ray;
use crate::geom::segment::{centered_segment, intersect_ray_segment, segment_normal};
use crate::geom::{EPS, GeometryError};
use crate::scene::{ComponentKind, Scene};
use crate::sim::optics::config::SimulationConfig;
use crate::{Point, Vector};
use std::f64::consts::FRAC_PI_2;

/// Geometry and optical response of one interactive component.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Mirror {
        a: Point,
        b: Point,
        /// Reflectivity clamped to [0, 1].
        reflectivity: f64,
    },
    Lens {
        a: Point,
        b: Point,
        center: Point,
        /// Unit optical axis (perpendicular to the lens segment).
        axis: Vector,
        focal_length: Option<f64>,
    },
    Detector {
        center: Point,
        radius: f64,
        sensitivity: f64,
        /// Index into `FlatScene::detector_ids`.
        detector: usize,
    },
}

/// A source resolved for tracing.
#[derive(Debug, Clone, PartialEq)]
pub struct Emitter {
    pub id: String,
    pub position: Point,
    /// Source orientation in degrees.
    pub base_angle: f64,
    pub spread: Option<f64>,
    pub power: f64,
}

/// Flattened scene representation for fast indexed access during tracing.
///
/// Surfaces are stored in ascending component-id order, so scanning them
/// front to back breaks distance ties in favour of the lowest id.
pub struct FlatScene {
    /// Interactive surfaces (mirrors, lenses, detectors). Sources are never targets.
    pub surfaces: Vec<Surface>,
    /// Component id for each surface.
    pub surface_ids: Vec<String>,
    /// Detector ids in ascending order.
    pub detector_ids: Vec<String>,
    /// Sources in scene order.
    pub emitters: Vec<Emitter>,
    /// Mirrors and lenses left out because their segment is degenerate.
    pub skipped_ids: Vec<String>,
    /// Scene bounds, `None` if the scene is unbounded.
    pub bounds: Option<Bounds>,
    /// Travel distance of escaping rays in an unbounded scene.
    pub max_travel: f64,
}

/// Clamps to [0, 1]; NaN becomes 0.
fn unit_interval(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

impl FlatScene {
    /// Creates a flat scene, filling missing sizes from `config`.
    pub fn new(scene: &Scene, config: &SimulationConfig) -> Self {
        let mut ordered: Vec<_> = scene.components().iter().collect();
        ordered.sort_by(|a, b| a.id.cmp(&b.id));

        let detector_ids: Vec<String> = ordered
            .iter()
            .filter(|c| matches!(c.kind, ComponentKind::Detector(_)))
            .map(|c| c.id.clone())
            .collect();

        let mut surfaces = Vec::new();
        let mut surface_ids = Vec::new();
        let mut extent = Vec::new();
        let mut next_detector = 0;
        let mut skipped_ids = Vec::new();

        for c in &ordered {
            let surface = match &c.kind {
                ComponentKind::Source(_) => {
                    extent.push(c.position);
                    continue;
                }
                ComponentKind::Mirror(props) => {
                    let length = props.length.unwrap_or(config.default_mirror_length);
                    let (a, b) = centered_segment(c.position, c.angle, length);
                    extent.extend([a, b]);
                    Surface::Mirror {
                        a,
                        b,
                        reflectivity: unit_interval(props.reflectivity),
                    }
                }
                ComponentKind::Lens(props) => {
                    let height = props.height.unwrap_or(config.default_lens_height);
                    let axis = Vector::from_angle(c.angle);
                    let (a, b) = centered_segment(c.position, c.angle + FRAC_PI_2, height);
                    extent.extend([a, b]);
                    Surface::Lens {
                        a,
                        b,
                        center: c.position,
                        axis,
                        focal_length: props.focal_length,
                    }
                }
                ComponentKind::Detector(props) => {
                    let radius = props
                        .capture_radius
                        .unwrap_or(config.default_capture_radius);
                    let r = radius.max(0.0);
                    let p = c.position;
                    extent.extend([
                        Point::new(p.x - r, p.y - r),
                        Point::new(p.x + r, p.y + r),
                    ]);
                    let detector = next_detector;
                    next_detector += 1;
                    Surface::Detector {
                        center: p,
                        radius,
                        sensitivity: props.sensitivity.max(0.0),
                        detector,
                    }
                }
            };
            if let Surface::Mirror { a, b, .. } | Surface::Lens { a, b, .. } = &surface
                && let Err(e) = segment_normal(*a, *b)
            {
                log::warn!("Skipping component {}: {e}", c.id);
                skipped_ids.push(c.id.clone());
                continue;
            }
            surfaces.push(surface);
            surface_ids.push(c.id.clone());
        }

        let emitters = scene
            .components()
            .iter()
            .filter_map(|c| match &c.kind {
                ComponentKind::Source(props) => Some(Emitter {
                    id: c.id.clone(),
                    position: c.position,
                    base_angle: c.angle.to_degrees(),
                    spread: props.spread,
                    power: props.power.max(0.0),
                }),
                _ => None,
            })
            .collect();

        let grid_size = scene.metadata().grid_size;
        let finite: Vec<Point> = extent.into_iter().filter(|p| p.is_finite()).collect();
        let bounds = if grid_size > 0 {
            Bounds::from_points(&finite).map(|b| b.padded(grid_size as f64))
        } else {
            None
        };

        Self {
            surfaces,
            surface_ids,
            detector_ids,
            emitters,
            skipped_ids,
            bounds,
            max_travel: config.max_travel,
        }
    }

    /// Finds the closest surface in the ray's direction.
    ///
    /// Returns (surface_index, distance) or None if the ray escapes.
    /// Errors only if the ray itself cannot be intersected.
    pub fn find_target_surface(&self, ray: &Ray) -> Result<Option<(usize, f64)>, GeometryError> {
        let mut closest: Option<(usize, f64)> = None;

        for (idx, surface) in self.surfaces.iter().enumerate() {
            let t = match surface {
                Surface::Mirror { a, b, .. } | Surface::Lens { a, b, .. } => {
                    intersect_ray_segment(ray, *a, *b)?.map(|hit| hit.t)
                }
                Surface::Detector { center, radius, .. } => {
                    intersect_ray_circle(ray, *center, *radius)
                }
            };
            if let Some(t) = t {
                match closest {
                    None => closest = Some((idx, t)),
                    Some((_, best_t)) if t < best_t - EPS => closest = Some((idx, t)),
                    _ => {}
                }
            }
        }

        Ok(closest)
    }

    /// Distance an escaping ray travels before it leaves the scene.
    pub fn escape_distance(&self, ray: &Ray) -> f64 {
        match &self.bounds {
            Some(bounds) => bounds.exit_distance(ray),
            None => self.max_travel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Component, Metadata};

    fn scene(components: Vec<Component>) -> FlatScene {
        let scene = Scene::new(Metadata::new(), components).unwrap();
        FlatScene::new(&scene, &SimulationConfig::new())
    }

    #[test]
    fn test_flat_scene_construction() {
        let flat = scene(vec![
            Component::source("s", Point::new(0., 0.), 0.),
            Component::mirror("m", Point::new(100., 0.), FRAC_PI_2, 0.9),
            Component::detector("d2", Point::new(0., 100.)),
            Component::detector("d1", Point::new(0., -100.)),
        ]);
        assert_eq!(flat.surfaces.len(), 3);
        assert_eq!(flat.surfaces.len(), flat.surface_ids.len());
        assert_eq!(flat.surface_ids, vec!["d1", "d2", "m"]);
        assert_eq!(flat.detector_ids, vec!["d1", "d2"]);
        assert_eq!(flat.emitters.len(), 1);
    }

    #[test]
    fn test_bounds_padded_by_grid_size() {
        let flat = scene(vec![
            Component::source("s", Point::new(0., 0.), 0.),
            Component::detector("d", Point::new(100., 0.)),
        ]);
        let bounds = flat.bounds.unwrap();
        // Detector disk (radius 30) plus 20 units of padding
        assert!(bounds.max.is_close(&Point::new(150., 50.)));
        assert!(bounds.min.is_close(&Point::new(-20., -50.)));
    }

    #[test]
    fn test_unbounded_scene() {
        let mut meta = Metadata::new();
        meta.grid_size = 0;
        let s = Scene::new(meta, vec![Component::source("s", Point::new(0., 0.), 0.)]).unwrap();
        let flat = FlatScene::new(&s, &SimulationConfig::new());
        assert!(flat.bounds.is_none());
        let ray = Ray::from_angle(Point::new(0., 0.), 0.).unwrap();
        assert!((flat.escape_distance(&ray) - 1000.).abs() < 1e-10);
    }

    #[test]
    fn test_find_target_nearest() {
        let flat = scene(vec![
            Component::mirror("far", Point::new(200., 0.), FRAC_PI_2, 1.0),
            Component::mirror("near", Point::new(100., 0.), FRAC_PI_2, 1.0),
        ]);
        let ray = Ray::from_angle(Point::new(0., 0.), 0.).unwrap();
        let (idx, t) = flat.find_target_surface(&ray).unwrap().unwrap();
        assert_eq!(flat.surface_ids[idx], "near");
        assert!((t - 100.).abs() < 1e-9);
    }

    #[test]
    fn test_find_target_tie_breaks_by_id() {
        // Mirror and detector at the same distance
        let flat = scene(vec![
            Component::mirror("b_mirror", Point::new(100., 0.), FRAC_PI_2, 1.0),
            Component::detector("a_detector", Point::new(100., 0.)),
        ]);
        let ray = Ray::from_angle(Point::new(0., 0.), 0.).unwrap();
        let (idx, _) = flat.find_target_surface(&ray).unwrap().unwrap();
        assert_eq!(flat.surface_ids[idx], "a_detector");
    }

    #[test]
    fn test_find_target_none() {
        let flat = scene(vec![Component::mirror("m", Point::new(100., 0.), FRAC_PI_2, 1.0)]);
        let ray = Ray::from_angle(Point::new(0., 0.), std::f64::consts::PI).unwrap();
        assert!(flat.find_target_surface(&ray).unwrap().is_none());
    }

    #[test]
    fn test_degenerate_segments_skipped() {
        let mut m = Component::mirror("m", Point::new(100., 0.), FRAC_PI_2, 1.0);
        if let ComponentKind::Mirror(props) = &mut m.kind {
            props.length = Some(0.0);
        }
        let mut l = Component::lens("l", Point::new(50., 0.), 0., Some(10.));
        if let ComponentKind::Lens(props) = &mut l.kind {
            props.height = Some(f64::NAN);
        }
        let flat = scene(vec![m, l, Component::detector("d", Point::new(200., 0.))]);
        assert_eq!(flat.skipped_ids, vec!["l", "m"]);
        assert_eq!(flat.surface_ids, vec!["d"]);

        let ray = Ray::from_angle(Point::new(0., 0.), 0.).unwrap();
        let (idx, _) = flat.find_target_surface(&ray).unwrap().unwrap();
        assert_eq!(flat.surface_ids[idx], "d");
    }

    #[test]
    fn test_reflectivity_sanitized() {
        let flat = scene(vec![
            Component::mirror("a", Point::new(100., 0.), FRAC_PI_2, f64::NAN),
            Component::mirror("b", Point::new(200., 0.), FRAC_PI_2, 1.5),
            Component::mirror("c", Point::new(300., 0.), FRAC_PI_2, -0.5),
        ]);
        let reflectivities: Vec<f64> = flat
            .surfaces
            .iter()
            .filter_map(|s| match s {
                Surface::Mirror { reflectivity, .. } => Some(*reflectivity),
                _ => None,
            })
            .collect();
        assert_eq!(reflectivities, vec![0.0, 1.0, 0.0]);
    }
}
