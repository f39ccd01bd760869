//! Plane (line-segment) surface variants.

use crate::{Aabb2, Surface, SurfaceError, SurfaceKind};
use lumen_math::{perp, Point2, Tolerance, Transform2, Vec2};
use lumen_optics::critical_angle;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Unit edge normal of the segment `a -> b`, counterclockwise of the edge.
///
/// Rejects coincident endpoints — the normal is undefined for a
/// zero-length segment.
fn segment_normal(a: &Point2, b: &Point2) -> Result<Vec2, SurfaceError> {
    let edge = b - a;
    if Tolerance::DEFAULT.is_zero(edge.norm()) {
        return Err(SurfaceError::DegenerateSegment);
    }
    Ok(perp(&edge).normalize())
}

/// A reflective line segment. Both faces mirror.
#[derive(Debug, Clone)]
pub struct PlaneMirror {
    a: Point2,
    b: Point2,
    normal: Vec2,
}

impl PlaneMirror {
    /// Create a mirror between two distinct endpoints.
    pub fn new(a: Point2, b: Point2) -> Result<Self, SurfaceError> {
        let normal = segment_normal(&a, &b)?;
        Ok(Self { a, b, normal })
    }

    /// First endpoint.
    pub fn a(&self) -> Point2 {
        self.a
    }

    /// Second endpoint.
    pub fn b(&self) -> Point2 {
        self.b
    }

    /// Precomputed unit edge normal.
    pub fn normal(&self) -> Vec2 {
        self.normal
    }
}

impl Surface for PlaneMirror {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::PlaneMirror
    }

    fn bounds(&self) -> Aabb2 {
        Aabb2::from_points(&[self.a, self.b])
    }

    fn translate(&mut self, delta: Vec2) {
        self.a += delta;
        self.b += delta;
    }

    fn rotate_about(&mut self, pivot: Point2, angle: f64) {
        let t = Transform2::rotation_about(pivot, angle);
        self.a = t.apply_point(&self.a);
        self.b = t.apply_point(&self.b);
        self.normal = t.apply_vec(&self.normal);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A refractive line segment separating the ambient medium (index 1)
/// from a denser or rarer medium behind the edge normal.
#[derive(Debug, Clone)]
pub struct PlaneRefractor {
    a: Point2,
    b: Point2,
    normal: Vec2,
    index: f64,
    critical_angle: f64,
}

impl PlaneRefractor {
    /// Create a refractive boundary with the given relative index.
    pub fn new(a: Point2, b: Point2, index: f64) -> Result<Self, SurfaceError> {
        let normal = segment_normal(&a, &b)?;
        if index <= 0.0 {
            return Err(SurfaceError::InvalidIndex(index));
        }
        Ok(Self {
            a,
            b,
            normal,
            index,
            critical_angle: critical_angle(index),
        })
    }

    /// First endpoint.
    pub fn a(&self) -> Point2 {
        self.a
    }

    /// Second endpoint.
    pub fn b(&self) -> Point2 {
        self.b
    }

    /// Precomputed unit edge normal (points toward the rarer side).
    pub fn normal(&self) -> Vec2 {
        self.normal
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

impl Surface for PlaneRefractor {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::PlaneRefractor
    }

    fn bounds(&self) -> Aabb2 {
        Aabb2::from_points(&[self.a, self.b])
    }

    fn translate(&mut self, delta: Vec2) {
        self.a += delta;
        self.b += delta;
    }

    fn rotate_about(&mut self, pivot: Point2, angle: f64) {
        let t = Transform2::rotation_about(pivot, angle);
        self.a = t.apply_point(&self.a);
        self.b = t.apply_point(&self.b);
        self.normal = t.apply_vec(&self.normal);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Whether an ideal lens converges or diverges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensKind {
    /// Converging lens: parallel rays meet at the focal plane beyond it.
    Convex,
    /// Diverging lens: rays exit as if from the focal plane before it.
    Concave,
}

/// An idealized thin lens on a line segment.
///
/// Uses focal-plane projection rather than physical curvature: the lens
/// line, its center, and two focal planes at ± the focal length fully
/// determine the transfer.
#[derive(Debug, Clone)]
pub struct IdealLens {
    a: Point2,
    b: Point2,
    normal: Vec2,
    kind: LensKind,
    focal_length: f64,
}

impl IdealLens {
    /// Create a lens between two distinct endpoints with a positive
    /// focal length.
    pub fn new(a: Point2, b: Point2, kind: LensKind, focal_length: f64) -> Result<Self, SurfaceError> {
        let normal = segment_normal(&a, &b)?;
        if focal_length <= 0.0 {
            return Err(SurfaceError::InvalidFocalLength(focal_length));
        }
        Ok(Self {
            a,
            b,
            normal,
            kind,
            focal_length,
        })
    }

    /// First endpoint.
    pub fn a(&self) -> Point2 {
        self.a
    }

    /// Second endpoint.
    pub fn b(&self) -> Point2 {
        self.b
    }

    /// Unit normal of the lens line.
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Convex or concave.
    pub fn lens_kind(&self) -> LensKind {
        self.kind
    }

    /// Focal length in scene units.
    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    /// Optical center of the lens (segment midpoint).
    pub fn center(&self) -> Point2 {
        Point2::from((self.a.coords + self.b.coords) * 0.5)
    }
}

impl Surface for IdealLens {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::IdealLens
    }

    fn bounds(&self) -> Aabb2 {
        Aabb2::from_points(&[self.a, self.b])
    }

    fn translate(&mut self, delta: Vec2) {
        self.a += delta;
        self.b += delta;
    }

    fn rotate_about(&mut self, pivot: Point2, angle: f64) {
        let t = Transform2::rotation_about(pivot, angle);
        self.a = t.apply_point(&self.a);
        self.b = t.apply_point(&self.b);
        self.normal = t.apply_vec(&self.normal);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// An absorbing line segment. Any ray hitting it terminates.
#[derive(Debug, Clone)]
pub struct Blocker {
    a: Point2,
    b: Point2,
}

impl Blocker {
    /// Create a blocker between two distinct endpoints.
    pub fn new(a: Point2, b: Point2) -> Result<Self, SurfaceError> {
        segment_normal(&a, &b)?;
        Ok(Self { a, b })
    }

    /// First endpoint.
    pub fn a(&self) -> Point2 {
        self.a
    }

    /// Second endpoint.
    pub fn b(&self) -> Point2 {
        self.b
    }
}

impl Surface for Blocker {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Blocker
    }

    fn bounds(&self) -> Aabb2 {
        Aabb2::from_points(&[self.a, self.b])
    }

    fn translate(&mut self, delta: Vec2) {
        self.a += delta;
        self.b += delta;
    }

    fn rotate_about(&mut self, pivot: Point2, angle: f64) {
        let t = Transform2::rotation_about(pivot, angle);
        self.a = t.apply_point(&self.a);
        self.b = t.apply_point(&self.b);
    }

    fn clone_box(&self) -> Box<dyn Surface> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_mirror_normal_is_perpendicular_unit() {
        let m = PlaneMirror::new(Point2::new(-100.0, 0.0), Point2::new(100.0, 0.0)).unwrap();
        assert!((m.normal().norm() - 1.0).abs() < 1e-12);
        assert!(m.normal().dot(&(m.b() - m.a())).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_segment_rejected() {
        let p = Point2::new(1.0, 1.0);
        assert!(matches!(
            PlaneMirror::new(p, p),
            Err(SurfaceError::DegenerateSegment)
        ));
        assert!(Blocker::new(p, p).is_err());
        assert!(PlaneRefractor::new(p, p, 1.5).is_err());
        assert!(IdealLens::new(p, p, LensKind::Convex, 10.0).is_err());
    }

    #[test]
    fn test_refractor_rejects_bad_index() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        assert!(matches!(
            PlaneRefractor::new(a, b, 0.0),
            Err(SurfaceError::InvalidIndex(_))
        ));
        assert!(PlaneRefractor::new(a, b, -1.5).is_err());
    }

    #[test]
    fn test_set_index_recomputes_critical_angle() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(1.0, 0.0);
        let mut r = PlaneRefractor::new(a, b, 1.5).unwrap();
        let before = r.critical_angle();
        r.set_index(2.0).unwrap();
        assert!((r.critical_angle() - (0.5f64).asin()).abs() < 1e-12);
        assert!(r.critical_angle() < before);
        assert!(r.set_index(-1.0).is_err());
        // A failed update leaves the surface unchanged.
        assert!((r.index() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_lens_rejects_bad_focal_length() {
        let a = Point2::new(0.0, -10.0);
        let b = Point2::new(0.0, 10.0);
        assert!(matches!(
            IdealLens::new(a, b, LensKind::Convex, 0.0),
            Err(SurfaceError::InvalidFocalLength(_))
        ));
        assert!(IdealLens::new(a, b, LensKind::Concave, -5.0).is_err());
    }

    #[test]
    fn test_lens_center_is_midpoint() {
        let l = IdealLens::new(
            Point2::new(0.0, -10.0),
            Point2::new(0.0, 10.0),
            LensKind::Convex,
            20.0,
        )
        .unwrap();
        assert!((l.center() - Point2::new(0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_translate_moves_endpoints_keeps_normal() {
        let mut m = PlaneMirror::new(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)).unwrap();
        let n = m.normal();
        m.translate(Vec2::new(5.0, -1.0));
        assert_eq!(m.a(), Point2::new(5.0, -1.0));
        assert_eq!(m.b(), Point2::new(7.0, -1.0));
        assert!((m.normal() - n).norm() < 1e-12);
    }

    #[test]
    fn test_rotate_about_endpoint() {
        let mut m = PlaneMirror::new(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)).unwrap();
        m.rotate_about(Point2::new(0.0, 0.0), FRAC_PI_2);
        assert!((m.a() - Point2::new(0.0, 0.0)).norm() < 1e-12);
        assert!((m.b() - Point2::new(0.0, 2.0)).norm() < 1e-12);
        // Normal follows the rotation and stays perpendicular.
        assert!(m.normal().dot(&(m.b() - m.a())).abs() < 1e-12);
    }

    #[test]
    fn test_bounds_contain_endpoints() {
        let m = PlaneMirror::new(Point2::new(-3.0, 2.0), Point2::new(4.0, -1.0)).unwrap();
        let b = m.bounds();
        assert!(b.contains(&m.a()));
        assert!(b.contains(&m.b()));
    }

    #[test]
    fn test_planes_disallow_reintersection() {
        let m = PlaneMirror::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)).unwrap();
        assert!(!m.allows_reintersection());
    }
}
