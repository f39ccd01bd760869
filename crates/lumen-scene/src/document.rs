//! Declarative scene description.
//!
//! The document is purely data — no built surfaces or rays, just the
//! parameters to construct them. Building happens on insertion into a
//! [`crate::World`], which is also where validation errors surface.

use crate::SceneError;
use lumen_geom::{
    ArcMirror, ArcOrientation, ArcRefractor, Blocker, IdealLens, LensKind, PlaneMirror,
    PlaneRefractor, Surface, SurfaceError,
};
use lumen_math::{perp, unit_from_angle, Point2, Vec2};
use lumen_trace::{LightRay, TraceSettings};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// A 2D position or direction in a scene document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenePoint {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
}

impl ScenePoint {
    /// Create a new scene point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    fn vec(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// An optical element — the construction parameters for one surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementDef {
    /// Reflective segment.
    Mirror {
        /// First endpoint.
        a: ScenePoint,
        /// Second endpoint.
        b: ScenePoint,
    },
    /// Refractive segment.
    Refractor {
        /// First endpoint.
        a: ScenePoint,
        /// Second endpoint.
        b: ScenePoint,
        /// Relative refractive index.
        index: f64,
    },
    /// Ideal thin lens.
    Lens {
        /// First endpoint.
        a: ScenePoint,
        /// Second endpoint.
        b: ScenePoint,
        /// Convex or concave.
        kind: LensKind,
        /// Focal length in scene units.
        focal_length: f64,
    },
    /// Absorbing segment.
    Blocker {
        /// First endpoint.
        a: ScenePoint,
        /// Second endpoint.
        b: ScenePoint,
    },
    /// Reflective circular arc.
    ArcMirror {
        /// Circle center.
        center: ScenePoint,
        /// Circle radius.
        radius: f64,
        /// Polar angle of the arc midpoint, radians.
        facing: f64,
        /// Angular span, radians in (0, 2π].
        span: f64,
    },
    /// Refractive circular arc.
    ArcRefractor {
        /// Circle center.
        center: ScenePoint,
        /// Circle radius.
        radius: f64,
        /// Polar angle of the arc midpoint, radians.
        facing: f64,
        /// Angular span, radians in (0, 2π].
        span: f64,
        /// Relative refractive index.
        index: f64,
        /// Which way the outward normal points.
        #[serde(default = "default_orientation")]
        orientation: ArcOrientation,
    },
}

fn default_orientation() -> ArcOrientation {
    ArcOrientation::Outward
}

impl ElementDef {
    /// Build the surface this element describes, validating its
    /// parameters.
    pub fn build(&self) -> Result<Box<dyn Surface>, SurfaceError> {
        Ok(match self {
            ElementDef::Mirror { a, b } => Box::new(PlaneMirror::new(a.point(), b.point())?),
            ElementDef::Refractor { a, b, index } => {
                Box::new(PlaneRefractor::new(a.point(), b.point(), *index)?)
            }
            ElementDef::Lens {
                a,
                b,
                kind,
                focal_length,
            } => Box::new(IdealLens::new(a.point(), b.point(), *kind, *focal_length)?),
            ElementDef::Blocker { a, b } => Box::new(Blocker::new(a.point(), b.point())?),
            ElementDef::ArcMirror {
                center,
                radius,
                facing,
                span,
            } => Box::new(ArcMirror::new(center.point(), *radius, *facing, *span)?),
            ElementDef::ArcRefractor {
                center,
                radius,
                facing,
                span,
                index,
                orientation,
            } => Box::new(ArcRefractor::new(
                center.point(),
                *radius,
                *facing,
                *span,
                *index,
                *orientation,
            )?),
        })
    }
}

fn default_intensity() -> f64 {
    1.0
}

fn default_sweep() -> f64 {
    TAU
}

/// A light source — the construction parameters for one or more primary
/// rays.
///
/// A `wavelength` makes the emission monochromatic; omitting it emits
/// achromatic white light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceDef {
    /// A single ray.
    Ray {
        /// Emission origin.
        origin: ScenePoint,
        /// Emission direction (normalized on build).
        direction: ScenePoint,
        /// Wavelength in nanometers, if monochromatic.
        #[serde(default)]
        wavelength: Option<f64>,
        /// Emission intensity.
        #[serde(default = "default_intensity")]
        intensity: f64,
    },
    /// A beam of parallel rays spread across a width.
    Beam {
        /// Beam center.
        origin: ScenePoint,
        /// Shared ray direction (normalized on build).
        direction: ScenePoint,
        /// Total width perpendicular to the direction.
        width: f64,
        /// Number of rays across the width.
        count: usize,
        /// Wavelength in nanometers, if monochromatic.
        #[serde(default)]
        wavelength: Option<f64>,
        /// Per-ray emission intensity.
        #[serde(default = "default_intensity")]
        intensity: f64,
    },
    /// A point source fanning rays over an angular range.
    Point {
        /// Emission origin shared by all rays.
        origin: ScenePoint,
        /// Number of rays across the sweep.
        count: usize,
        /// Polar angle of the first ray, radians.
        #[serde(default)]
        start_angle: f64,
        /// Angular range covered, radians (full circle by default).
        #[serde(default = "default_sweep")]
        sweep: f64,
        /// Wavelength in nanometers, if monochromatic.
        #[serde(default)]
        wavelength: Option<f64>,
        /// Per-ray emission intensity.
        #[serde(default = "default_intensity")]
        intensity: f64,
    },
}

impl SourceDef {
    /// Build the primary rays this source emits, validating parameters.
    pub fn build(&self) -> Result<Vec<LightRay>, SceneError> {
        match self {
            SourceDef::Ray {
                origin,
                direction,
                wavelength,
                intensity,
            } => Ok(vec![make_ray(
                origin.point(),
                direction.vec(),
                *wavelength,
                *intensity,
            )?]),
            SourceDef::Beam {
                origin,
                direction,
                width,
                count,
                wavelength,
                intensity,
            } => {
                if *count == 0 {
                    return Err(SceneError::EmptySource);
                }
                let dir = direction.vec();
                let across = perp(&dir).normalize();
                let mut rays = Vec::with_capacity(*count);
                for i in 0..*count {
                    let frac = if *count == 1 {
                        0.5
                    } else {
                        i as f64 / (*count - 1) as f64
                    };
                    let offset = (frac - 0.5) * *width;
                    rays.push(make_ray(
                        origin.point() + offset * across,
                        dir,
                        *wavelength,
                        *intensity,
                    )?);
                }
                Ok(rays)
            }
            SourceDef::Point {
                origin,
                count,
                start_angle,
                sweep,
                wavelength,
                intensity,
            } => {
                if *count == 0 {
                    return Err(SceneError::EmptySource);
                }
                // A full circle tiles evenly; a partial fan includes
                // both endpoints.
                let step = if *count == 1 {
                    0.0
                } else if (sweep - TAU).abs() < 1e-9 {
                    sweep / *count as f64
                } else {
                    sweep / (*count - 1) as f64
                };
                let base = if *count == 1 {
                    start_angle + sweep * 0.5
                } else {
                    *start_angle
                };
                let mut rays = Vec::with_capacity(*count);
                for i in 0..*count {
                    let dir = unit_from_angle(base + step * i as f64);
                    rays.push(make_ray(origin.point(), dir, *wavelength, *intensity)?);
                }
                Ok(rays)
            }
        }
    }
}

fn make_ray(
    origin: Point2,
    direction: Vec2,
    wavelength: Option<f64>,
    intensity: f64,
) -> Result<LightRay, SceneError> {
    let ray = match wavelength {
        Some(w) => LightRay::monochromatic(origin, direction, w, intensity)?,
        None => LightRay::white(origin, direction, intensity)?,
    };
    Ok(ray)
}

/// A complete declarative scene: elements, sources, and settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDoc {
    /// Optical elements.
    #[serde(default)]
    pub elements: Vec<ElementDef>,
    /// Light sources.
    #[serde(default)]
    pub sources: Vec<SourceDef>,
    /// Tracer settings for the scene.
    #[serde(default)]
    pub settings: TraceSettings,
}

impl SceneDoc {
    /// Parse a scene document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize this scene document to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
