use std::fmt;
use std::str::FromStr;

use crate::Point;

use super::SceneError;

/// Component type tag as it appears in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentType {
    Source,
    Mirror,
    Lens,
    Detector,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Source => "source",
            ComponentType::Mirror => "mirror",
            ComponentType::Lens => "lens",
            ComponentType::Detector => "detector",
        }
    }
}

impl FromStr for ComponentType {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "source" => Ok(ComponentType::Source),
            "mirror" => Ok(ComponentType::Mirror),
            "lens" => Ok(ComponentType::Lens),
            "detector" => Ok(ComponentType::Detector),
            other => Err(SceneError::UnknownComponentType(other.to_string())),
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light source emitting a fan of rays.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceProps {
    /// Total fan width in degrees. `None` spaces rays one degree apart.
    pub spread: Option<f64>,
    /// Initial intensity of every emitted ray.
    pub power: f64,
}

impl Default for SourceProps {
    fn default() -> Self {
        Self {
            spread: None,
            power: 1.0,
        }
    }
}

/// Flat mirror.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorProps {
    /// Fraction of intensity kept on reflection.
    pub reflectivity: f64,
    /// Segment length. `None` uses the simulation default.
    pub length: Option<f64>,
}

impl Default for MirrorProps {
    fn default() -> Self {
        Self {
            reflectivity: 1.0,
            length: None,
        }
    }
}

/// Thin lens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LensProps {
    /// Signed focal length. Missing or zero makes the lens a pass-through.
    pub focal_length: Option<f64>,
    /// Aperture (segment length). `None` uses the simulation default.
    pub height: Option<f64>,
}

/// Absorbing detector disk.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorProps {
    /// Capture radius. `None` uses the simulation default.
    pub capture_radius: Option<f64>,
    /// Multiplier applied to absorbed intensity.
    pub sensitivity: f64,
}

impl Default for DetectorProps {
    fn default() -> Self {
        Self {
            capture_radius: None,
            sensitivity: 1.0,
        }
    }
}

/// Type-specific part of a component.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentKind {
    Source(SourceProps),
    Mirror(MirrorProps),
    Lens(LensProps),
    Detector(DetectorProps),
}

impl ComponentKind {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentKind::Source(_) => ComponentType::Source,
            ComponentKind::Mirror(_) => ComponentType::Mirror,
            ComponentKind::Lens(_) => ComponentType::Lens,
            ComponentKind::Detector(_) => ComponentType::Detector,
        }
    }
}

/// An optical element placed on the bench.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: String,
    pub position: Point,
    /// Orientation in radians.
    pub angle: f64,
    pub kind: ComponentKind,
}

impl Component {
    pub fn new(id: &str, position: Point, angle: f64, kind: ComponentKind) -> Self {
        Self {
            id: id.to_string(),
            position,
            angle,
            kind,
        }
    }

    pub fn source(id: &str, position: Point, angle: f64) -> Self {
        Self::new(id, position, angle, ComponentKind::Source(SourceProps::default()))
    }

    pub fn mirror(id: &str, position: Point, angle: f64, reflectivity: f64) -> Self {
        let props = MirrorProps {
            reflectivity,
            ..Default::default()
        };
        Self::new(id, position, angle, ComponentKind::Mirror(props))
    }

    pub fn lens(id: &str, position: Point, angle: f64, focal_length: Option<f64>) -> Self {
        let props = LensProps {
            focal_length,
            ..Default::default()
        };
        Self::new(id, position, angle, ComponentKind::Lens(props))
    }

    pub fn detector(id: &str, position: Point) -> Self {
        Self::new(id, position, 0.0, ComponentKind::Detector(DetectorProps::default()))
    }

    pub fn component_type(&self) -> ComponentType {
        self.kind.component_type()
    }
}
