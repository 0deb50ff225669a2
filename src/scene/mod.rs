//! Scene description: metadata, sweep parameters and placed components.
//!
//! A [`Scene`] is built once (from code or from a scene file, see
//! [`crate::io::scene_json`]) and is read-only afterwards.

mod component;

use std::collections::HashSet;

use thiserror::Error;

pub use component::{
    Component, ComponentKind, ComponentType, DetectorProps, LensProps, MirrorProps, SourceProps,
};

/// Errors raised while building a scene.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    #[error("unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("duplicate component id: {0}")]
    DuplicateComponentId(String),
}

/// Linear scan of the angle of incidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep {
    pub start: f64,
    pub stop: f64,
    /// Number of samples, including both ends.
    pub points: usize,
}

impl Sweep {
    pub fn new(start: f64, stop: f64, points: usize) -> Self {
        Self {
            start,
            stop,
            points,
        }
    }

    /// A sweep with a single sample at `value`.
    pub fn single(value: f64) -> Self {
        Self::new(value, value, 1)
    }
}

/// Global scan parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Free-form creation timestamp, carried through untouched.
    pub created_at: String,
    /// Padding around the scene bounds. Zero or negative means unbounded.
    pub grid_size: i64,
    /// Base angle of incidence in degrees.
    pub angle_of_incidence: f64,
    pub rays_per_source: usize,
    /// Maximum number of surface interactions per ray.
    pub max_bounces: usize,
    pub sweep: Sweep,
}

impl Metadata {
    pub fn new() -> Self {
        Self {
            created_at: String::new(),
            grid_size: 20,
            angle_of_incidence: 0.0,
            rays_per_source: 1,
            max_bounces: 0,
            sweep: Sweep::single(0.0),
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete, immutable scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    metadata: Metadata,
    components: Vec<Component>,
}

impl Scene {
    /// Creates a scene. Component ids must be unique.
    pub fn new(metadata: Metadata, components: Vec<Component>) -> Result<Self, SceneError> {
        let mut seen = HashSet::new();
        for c in &components {
            if !seen.insert(c.id.as_str()) {
                return Err(SceneError::DuplicateComponentId(c.id.clone()));
            }
        }
        Ok(Self {
            metadata,
            components,
        })
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Looks up a component by id.
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }

    pub fn sources(&self) -> impl Iterator<Item = &Component> {
        self.of_type(ComponentType::Source)
    }

    pub fn detectors(&self) -> impl Iterator<Item = &Component> {
        self.of_type(ComponentType::Detector)
    }

    fn of_type(&self, t: ComponentType) -> impl Iterator<Item = &Component> {
        self.components
            .iter()
            .filter(move |c| c.component_type() == t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    #[test]
    fn test_scene_construction() {
        let components = vec![
            Component::source("src", Point::new(0., 0.), 0.),
            Component::detector("det", Point::new(100., 0.)),
            Component::detector("det2", Point::new(0., 100.)),
        ];
        let scene = Scene::new(Metadata::new(), components).unwrap();
        assert_eq!(scene.components().len(), 3);
        assert_eq!(scene.sources().count(), 1);
        assert_eq!(scene.detectors().count(), 2);
        assert!(scene.component("det2").is_some());
        assert!(scene.component("missing").is_none());
    }

    #[test]
    fn test_duplicate_ids() {
        let components = vec![
            Component::source("a", Point::new(0., 0.), 0.),
            Component::detector("a", Point::new(100., 0.)),
        ];
        let err = Scene::new(Metadata::new(), components).unwrap_err();
        assert_eq!(err, SceneError::DuplicateComponentId("a".to_string()));
    }

    #[test]
    fn test_metadata_defaults() {
        let meta: Metadata = Default::default();
        assert_eq!(meta.rays_per_source, 1);
        assert_eq!(meta.max_bounces, 0);
        assert_eq!(meta.sweep.points, 1);
    }
}
