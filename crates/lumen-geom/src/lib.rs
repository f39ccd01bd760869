#![warn(missing_docs)]

//! Optical surface types for the lumen kernel.
//!
//! Provides the [`Surface`] trait — the capability set shared by every
//! optical boundary in a scene — and the six concrete variants: plane
//! mirror, plane refractor, ideal thin lens, blocker, arc mirror, and
//! arc refractor.
//!
//! Surfaces validate their defining geometry at construction and are
//! rebuilt (not mutated) when a shape parameter changes; position and
//! rotation updates move the existing control points in place via
//! [`Surface::translate`] and [`Surface::rotate_about`]. Ray-surface
//! intersection and optical response dispatch live in `lumen-trace`.

mod arc;
mod plane;

pub use arc::{ArcMirror, ArcOrientation, ArcRefractor};
pub use plane::{Blocker, IdealLens, LensKind, PlaneMirror, PlaneRefractor};

use lumen_math::{Point2, Vec2};
use std::any::Any;
use std::f64::consts::TAU;
use thiserror::Error;

/// Errors from surface construction and reconfiguration.
#[derive(Debug, Clone, Error)]
pub enum SurfaceError {
    /// Arc radius must be strictly positive.
    #[error("arc radius must be positive, got {0}")]
    InvalidRadius(f64),

    /// Arc angular span must be in (0, 2π].
    #[error("arc span must be in (0, 2pi], got {0} radians")]
    InvalidSpan(f64),

    /// Refractive index must be strictly positive.
    #[error("refractive index must be positive, got {0}")]
    InvalidIndex(f64),

    /// Lens focal length must be strictly positive.
    #[error("focal length must be positive, got {0}")]
    InvalidFocalLength(f64),

    /// Two coincident endpoints do not define a segment.
    #[error("coincident endpoints define a zero-length segment")]
    DegenerateSegment,
}

/// The kind of a surface (for match-based dispatch).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Reflective line segment.
    PlaneMirror,
    /// Refractive line segment.
    PlaneRefractor,
    /// Ideal thin lens on a line segment.
    IdealLens,
    /// Absorbing line segment.
    Blocker,
    /// Reflective circular arc.
    ArcMirror,
    /// Refractive circular arc.
    ArcRefractor,
}

/// An axis-aligned bounding box in the scene plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Aabb2 {
    /// Create a bounding box from two corners.
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// The smallest box containing all of `points`.
    ///
    /// Returns a degenerate box at the first point when given a single
    /// point; `points` must be non-empty.
    pub fn from_points(points: &[Point2]) -> Self {
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Self { min, max }
    }

    /// Whether `p` lies inside this box (inclusive).
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// An optical boundary in the scene.
///
/// Each surface owns its control geometry (two endpoints, or
/// center/radius/facing/span) plus material parameters. Concrete types
/// are recovered for dispatch via [`Surface::as_any`].
pub trait Surface: Send + Sync + std::fmt::Debug {
    /// The kind of this surface.
    fn kind(&self) -> SurfaceKind;

    /// Conservative axis-aligned bounding box.
    fn bounds(&self) -> Aabb2;

    /// Move the surface by `delta`, mutating control points in place.
    fn translate(&mut self, delta: Vec2);

    /// Rotate the surface about `pivot` by `angle` radians, mutating
    /// control points in place.
    fn rotate_about(&mut self, pivot: Point2, angle: f64);

    /// Whether a ray may hit this surface again immediately after
    /// interacting with it. Arcs allow this so a ray can enter and exit
    /// the same curved boundary; planes do not.
    fn allows_reintersection(&self) -> bool {
        false
    }

    /// Clone this surface into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Surface>;

    /// Downcast to a concrete type via `Any`.
    fn as_any(&self) -> &dyn Any;
}

impl Clone for Box<dyn Surface> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Validate an angular span, requiring span ∈ (0, 2π].
pub(crate) fn check_span(span: f64) -> Result<f64, SurfaceError> {
    if span > 0.0 && span <= TAU + 1e-12 {
        Ok(span.min(TAU))
    } else {
        Err(SurfaceError::InvalidSpan(span))
    }
}
