//! JSON scene files and result output.
//!
//! Scene files look like:
//!
//! ```json
//! {
//!   "metadata": {
//!     "createdAt": "2024-01-01T00:00:00Z",
//!     "gridSize": 20,
//!     "angleOfIncidence": 0,
//!     "raysPerSource": 1,
//!     "maxBounces": 0,
//!     "sweep": { "start": 0, "stop": 0, "points": 1 }
//!   },
//!   "components": [
//!     { "id": "s1", "type": "source", "x": 0, "y": 0, "angle": 0, "properties": {} }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::Point;
use crate::scene::{
    Component, ComponentKind, ComponentType, DetectorProps, LensProps, Metadata, MirrorProps,
    Scene, SceneError, SourceProps, Sweep,
};
use crate::sim::SimulationResult;

/// Root structure of a scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub metadata: MetadataFile,
    #[serde(default)]
    pub components: Vec<ComponentFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataFile {
    #[serde(default)]
    pub created_at: String,
    #[serde(default = "default_grid_size")]
    pub grid_size: i64,
    #[serde(default)]
    pub angle_of_incidence: f64,
    #[serde(default = "default_rays_per_source")]
    pub rays_per_source: usize,
    #[serde(default)]
    pub max_bounces: usize,
    /// Missing sweep means a single sample at `angleOfIncidence`.
    #[serde(default)]
    pub sweep: Option<SweepFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepFile {
    pub start: f64,
    pub stop: f64,
    pub points: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentFile {
    pub id: String,
    #[serde(rename = "type")]
    pub component_type: String,
    pub x: f64,
    pub y: f64,
    /// Orientation in radians
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

fn default_grid_size() -> i64 {
    20
}

fn default_rays_per_source() -> usize {
    1
}

impl ProjectFile {
    /// Converts the wire form into a validated [`Scene`].
    pub fn into_scene(self) -> Result<Scene, SceneError> {
        let meta = self.metadata;
        let sweep = match meta.sweep {
            Some(s) => Sweep::new(s.start, s.stop, s.points),
            None => Sweep::single(meta.angle_of_incidence),
        };
        let metadata = Metadata {
            created_at: meta.created_at,
            grid_size: meta.grid_size,
            angle_of_incidence: meta.angle_of_incidence,
            rays_per_source: meta.rays_per_source,
            max_bounces: meta.max_bounces,
            sweep,
        };

        let components = self
            .components
            .into_iter()
            .map(ComponentFile::into_component)
            .collect::<Result<Vec<_>, _>>()?;

        Scene::new(metadata, components)
    }
}

impl ComponentFile {
    pub fn into_component(self) -> Result<Component, SceneError> {
        let t: ComponentType = self.component_type.parse()?;
        let props = Properties {
            id: &self.id,
            map: &self.properties,
        };
        let kind = match t {
            ComponentType::Source => {
                let d = SourceProps::default();
                ComponentKind::Source(SourceProps {
                    spread: props.number("spread"),
                    power: props.number("power").unwrap_or(d.power),
                })
            }
            ComponentType::Mirror => {
                let d = MirrorProps::default();
                ComponentKind::Mirror(MirrorProps {
                    reflectivity: props.number("reflectivity").unwrap_or(d.reflectivity),
                    length: props.number("length"),
                })
            }
            ComponentType::Lens => ComponentKind::Lens(LensProps {
                focal_length: props.number("focalLength"),
                height: props.number("height"),
            }),
            ComponentType::Detector => {
                let d = DetectorProps::default();
                ComponentKind::Detector(DetectorProps {
                    capture_radius: props
                        .number("captureRadius")
                        .or_else(|| props.number("radius")),
                    sensitivity: props.number("sensitivity").unwrap_or(d.sensitivity),
                })
            }
        };

        Ok(Component::new(
            &self.id,
            Point::new(self.x, self.y),
            self.angle,
            kind,
        ))
    }
}

struct Properties<'a> {
    id: &'a str,
    map: &'a Map<String, Value>,
}

impl Properties<'_> {
    /// Numeric property, or `None` if absent. Non-numeric values are
    /// ignored with a warning.
    fn number(&self, key: &str) -> Option<f64> {
        let value = self.map.get(key)?;
        match value.as_f64() {
            Some(v) => Some(v),
            None => {
                if !value.is_null() {
                    log::warn!(
                        "Component {}: ignoring non-numeric property {key} = {value}",
                        self.id
                    );
                }
                None
            }
        }
    }
}

/// Parses a scene from a JSON string.
pub fn scene_from_str(s: &str) -> Result<Scene> {
    let project: ProjectFile = serde_json::from_str(s).context("Failed to parse scene JSON")?;
    let scene = project.into_scene()?;
    Ok(scene)
}

/// Reads a scene from a JSON file.
pub fn read_scene(path: &Path) -> Result<Scene> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open scene file: {}", path.display()))?;
    let reader = BufReader::new(file);
    let project: ProjectFile = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse scene file: {}", path.display()))?;
    let scene = project
        .into_scene()
        .with_context(|| format!("Invalid scene in {}", path.display()))?;

    log::info!(
        "Read scene from {}: {} components",
        path.display(),
        scene.components().len()
    );
    Ok(scene)
}

/// Serializes results as pretty-printed JSON.
pub fn results_to_string(results: &[SimulationResult]) -> Result<String> {
    serde_json::to_string_pretty(results).context("Failed to serialize results")
}

/// Writes results as pretty-printed JSON.
pub fn write_results(path: &Path, results: &[SimulationResult]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results).context("Failed to write results")?;
    writer.flush()?;
    Ok(())
}
