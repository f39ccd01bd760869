//! Circular-arc surface variants.

use crate::{check_span, Aabb2, Surface, SurfaceError, SurfaceKind};
use lumen_math::{unit_from_angle, wrap_angle, Point2, Transform2, Vec2};
use lumen_optics::critical_angle;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// A reflective circular arc.
///
/// The arc covers the angular window `facing ± span/2` on a circle of
/// the given radius. Rays may hit either face; the reflection normal is
/// the center-to-hit direction, so concave and convex behavior fall out
/// of which side the ray arrives from.
#[derive(Debug, Clone)]
pub struct ArcMirror {
    center: Point2,
    radius: f64,
    facing: f64,
    span: f64,
}

impl ArcMirror {
    /// Create an arc mirror.
    ///
    /// `facing` is the polar angle (radians) of the arc's midpoint as
    /// seen from the center; `span` must be in (0, 2π].
    pub fn new(center: Point2, radius: f64, facing: f64, span: f64) -> Result<Self, SurfaceError> {
        if radius <= 0.0 {
            return Err(SurfaceError::InvalidRadius(radius));
        }
        let span = check_span(span)?;
        Ok(Self {
            center,
            radius,
            facing: wrap_angle(facing),
            span,
        })
    }

    /// Circle center.
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Circle radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Polar angle of the arc midpoint, radians in (-π, π].
    pub fn facing(&self) -> f64 {
        self.facing
    }

    /// Angular span in radians.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Midpoint of the arc on the circle.
    pub fn midpoint(&self) -> Point2 {
        self.center + self.radius * unit_from_angle(self.facing)
    }
}

impl Surface for ArcMirror {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::ArcMirror
    }

    fn bounds(&self) -> Aabb2 {
        // Conservative: the full circle.
        Aabb2::new(
            Point2::new(self.center.x - self.radius, self.center.y - self.radius),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    fn rotate_about(&mut self, pivot: Point2, angle: f64) {
        let t = Transform2::rotation_about(pivot, angle);
        self.center = t.apply_point(&self.center);
        self.facing = wrap_angle(self.facing + angle);
    }

    fn allows_reintersection(&self) -> bool {
        true
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Which way an arc refractor's outward normal points.
///
/// `Outward` puts the rarer medium outside the circle (a glass bulge);
/// `Inward` flips that, which lets a lens be assembled from two opposing
/// arcs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArcOrientation {
    /// Outward normal points away from the circle center.
    Outward,
    /// Outward normal points toward the circle center.
    Inward,
}

impl ArcOrientation {
    /// Multiplier applied to the center-to-hit direction.
    pub fn sign(&self) -> f64 {
        match self {
            ArcOrientation::Outward => 1.0,
            ArcOrientation::Inward => -1.0,
        }
    }
}

/// A refractive circular arc.
#[derive(Debug, Clone)]
pub struct ArcRefractor {
    center: Point2,
    radius: f64,
    facing: f64,
    span: f64,
    index: f64,
    critical_angle: f64,
    orientation: ArcOrientation,
}

impl ArcRefractor {
    /// Create an arc refractor with the given relative index.
    pub fn new(
        center: Point2,
        radius: f64,
        facing: f64,
        span: f64,
        index: f64,
        orientation: ArcOrientation,
    ) -> Result<Self, SurfaceError> {
        if radius <= 0.0 {
            return Err(SurfaceError::InvalidRadius(radius));
        }
        let span = check_span(span)?;
        if index <= 0.0 {
            return Err(SurfaceError::InvalidIndex(index));
        }
        Ok(Self {
            center,
            radius,
            facing: wrap_angle(facing),
            span,
            index,
            critical_angle: critical_angle(index),
            orientation,
        })
    }

    /// Circle center.
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Circle radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Polar angle of the arc midpoint, radians in (-π, π].
    pub fn facing(&self) -> f64 {
        self.facing
    }

    /// Angular span in radians.
    pub fn span(&self) -> f64 {
        self.span
    }

    /// Relative refractive index.
    pub fn index(&self) -> f64 {
        self.index
    }

    /// Critical angle for total internal reflection, kept in sync with
    /// the index.
    pub fn critical_angle(&self) -> f64 {
        self.critical_angle
    }

    /// Normal orientation multiplier source.
    pub fn orientation(&self) -> ArcOrientation {
        self.orientation
    }

    /// Outward normal at a point on the arc, per the orientation.
    pub fn outward_normal(&self, point: &Point2) -> Vec2 {
        (point - self.center) * self.orientation.sign()
    }

    /// Change the refractive index, recomputing the critical angle.
    pub fn set_index(&mut self, index: f64) -> Result<(), SurfaceError> {
        if index <= 0.0 {
            return Err(SurfaceError::InvalidIndex(index));
        }
        self.index = index;
        self.critical_angle = critical_angle(index);
        Ok(())
    }
}

impl Surface for ArcRefractor {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::ArcRefractor
    }

    fn bounds(&self) -> Aabb2 {
        Aabb2::new(
            Point2::new(self.center.x - self.radius, self.center.y - self.radius),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }

    fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    fn rotate_about(&mut self, pivot: Point2, angle: f64) {
        let t = Transform2::rotation_about(pivot, angle);
        self.center = t.apply_point(&self.center);
        self.facing = wrap_angle(self.facing + angle);
    }

    fn allows_reintersection(&self) -> bool {
        true
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
