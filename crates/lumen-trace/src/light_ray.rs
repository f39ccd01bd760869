//! A traceable light ray and its bounded trace loop.

use crate::intersect::intersect_surface;
use crate::respond::respond_surface;
use crate::{Ray, TraceSettings, ESCAPE_DISTANCE};
use lumen_geom::Surface;
use lumen_math::{Point2, Tolerance, Vec2};
use lumen_optics::{Color, WAVELENGTH_MAX, WAVELENGTH_MIN};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from light-ray construction.
#[derive(Debug, Clone, Error)]
pub enum RayError {
    /// Monochromatic wavelength outside the representable range.
    #[error("wavelength must be in [360, 830] nm, got {0}")]
    InvalidWavelength(f64),

    /// Intensity must be strictly positive.
    #[error("ray intensity must be positive, got {0}")]
    InvalidIntensity(f64),

    /// A zero direction vector does not define a ray.
    #[error("ray direction must be nonzero")]
    ZeroDirection,
}

/// A ray's optical identity: a single wavelength or an explicit color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RayColor {
    /// Monochromatic light at a wavelength in nanometers.
    Wavelength(f64),
    /// Achromatic light with a fixed color.
    Fixed(Color),
}

/// The outcome of tracing one ray: its interaction count and any
/// secondary rays spawned by partial-reflectance responses.
///
/// Spawned rays are returned to the caller untraced; the orchestrator
/// expands them breadth-first (never recursively).
#[derive(Debug)]
pub struct TraceOutcome {
    /// Number of surface interactions along the traced path.
    pub bounces: usize,
    /// Secondary rays spawned during the trace, in spawn order.
    pub spawned: Vec<LightRay>,
    /// Whether the ray was absorbed (as opposed to escaping or running
    /// out of bounces).
    pub terminated: bool,
}

/// A light ray with optical identity and a traced path.
///
/// The path and per-segment colors are derived state, fully recomputed
/// by every [`LightRay::trace`] call; retracing after a scene change is
/// the sole invalidation mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRay {
    origin: Point2,
    direction: Vec2,
    color: RayColor,
    intensity: f64,
    generation: usize,
    path: Vec<Point2>,
    segment_colors: Vec<Color>,
}

impl LightRay {
    /// Create a ray. The direction is normalized and must be nonzero;
    /// intensity must be positive; a monochromatic wavelength must lie
    /// in [360, 830] nm.
    pub fn new(
        origin: Point2,
        direction: Vec2,
        color: RayColor,
        intensity: f64,
    ) -> Result<Self, RayError> {
        if direction.norm() < Tolerance::DEFAULT.linear {
            return Err(RayError::ZeroDirection);
        }
        if intensity <= 0.0 {
            return Err(RayError::InvalidIntensity(intensity));
        }
        if let RayColor::Wavelength(w) = color {
            if !(WAVELENGTH_MIN..=WAVELENGTH_MAX).contains(&w) {
                return Err(RayError::InvalidWavelength(w));
            }
        }
        Ok(Self {
            origin,
            direction: direction.normalize(),
            color,
            intensity,
            generation: 0,
            path: vec![origin],
            segment_colors: Vec::new(),
        })
    }

    /// A monochromatic ray at `wavelength` nanometers.
    pub fn monochromatic(
        origin: Point2,
        direction: Vec2,
        wavelength: f64,
        intensity: f64,
    ) -> Result<Self, RayError> {
        Self::new(origin, direction, RayColor::Wavelength(wavelength), intensity)
    }

    /// An achromatic white ray.
    pub fn white(origin: Point2, direction: Vec2, intensity: f64) -> Result<Self, RayError> {
        Self::new(origin, direction, RayColor::Fixed(Color::default()), intensity)
    }

    /// Emission origin.
    pub fn origin(&self) -> Point2 {
        self.origin
    }

    /// Initial unit direction.
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Emission intensity.
    pub fn intensity(&self) -> f64 {
        self.intensity
    }

    /// Optical identity.
    pub fn color(&self) -> RayColor {
        self.color
    }

    /// Wavelength in nanometers, if monochromatic.
    pub fn wavelength(&self) -> Option<f64> {
        match self.color {
            RayColor::Wavelength(w) => Some(w),
            RayColor::Fixed(_) => None,
        }
    }

    /// Secondary-ray generation index; 0 for primary rays.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Traced path vertices. Holds only the origin until traced.
    pub fn path(&self) -> &[Point2] {
        &self.path
    }

    /// Per-segment colors parallel to [`LightRay::path`] (one per
    /// segment, intensity baked into alpha).
    pub fn segment_colors(&self) -> &[Color] {
        &self.segment_colors
    }

    /// Renderable color of a segment carrying `intensity`.
    fn color_at(&self, intensity: f64) -> Color {
        match self.color {
            RayColor::Wavelength(w) => Color::from_wavelength(w, intensity),
            RayColor::Fixed(c) => c.with_alpha(intensity),
        }
    }

    /// Trace this ray through `surfaces`, rebuilding its path.
    ///
    /// Repeatedly finds the nearest intersecting surface (skipping the
    /// previous one unless it allows reintersection) and applies its
    /// response, until the ray escapes, is absorbed, or reaches the
    /// bounce limit. Secondary rays spawned by reflectance branches are
    /// collected and returned, not traced.
    pub fn trace(&mut self, surfaces: &[&dyn Surface], settings: &TraceSettings) -> TraceOutcome {
        self.path.clear();
        self.path.push(self.origin);
        self.segment_colors.clear();

        let mut point = self.origin;
        let mut direction = self.direction;
        let mut intensity = self.intensity;
        let mut last: Option<usize> = None;
        let mut spawned = Vec::new();
        let mut terminated = false;
        let mut escaped = false;

        for _ in 0..settings.max_bounces {
            let ray = Ray::new(point, direction);

            let mut nearest: Option<(usize, Point2, f64)> = None;
            for (i, surface) in surfaces.iter().enumerate() {
                if last == Some(i) && !surface.allows_reintersection() {
                    continue;
                }
                if let Some(hit) = intersect_surface(&ray, *surface) {
                    let dist_sq = (hit - point).norm_squared();
                    if nearest.map_or(true, |(_, _, best)| dist_sq < best) {
                        nearest = Some((i, hit, dist_sq));
                    }
                }
            }

            let segment_color = self.color_at(intensity);
            let Some((index, hit, _)) = nearest else {
                // Natural escape: extend far along the current direction
                // so the polyline stays renderable.
                self.segment_colors.push(segment_color);
                self.path.push(point + ESCAPE_DISTANCE * direction);
                escaped = true;
                break;
            };

            let response =
                respond_surface(surfaces[index], &hit, &direction, self.wavelength(), settings);

            self.segment_colors.push(segment_color);
            self.path.push(hit);

            if let Some(branch) = &response.reflectance {
                if settings.compute_reflectance {
                    let spawn_intensity =
                        intensity * (1.0 - branch.transmittance) * settings.reflectance_factor;
                    if spawn_intensity > settings.min_secondary_intensity {
                        spawned.push(LightRay {
                            origin: branch.origin,
                            direction: branch.direction.normalize(),
                            color: self.color,
                            intensity: spawn_intensity,
                            generation: self.generation + 1,
                            path: vec![branch.origin],
                            segment_colors: Vec::new(),
                        });
                    }
                }
                intensity *= branch.transmittance;
            }

            if response.terminate {
                terminated = true;
                break;
            }

            point = hit;
            direction = response.direction;
            last = Some(index);
        }

        let bounces = if escaped {
            self.path.len() - 2
        } else {
            self.path.len() - 1
        };
        TraceOutcome {
            bounces,
            spawned,
            terminated,
        }
    }
}
