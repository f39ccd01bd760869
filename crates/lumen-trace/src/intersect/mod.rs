//! Ray-surface intersection algorithms.
//!
//! Two bases cover every surface variant: the line segment (plane
//! mirrors, refractors, lenses, blockers) and the circular arc (arc
//! mirrors and refractors). [`intersect_surface`] dispatches on the
//! surface kind.

mod arc;
mod segment;

pub use arc::intersect_arc;
pub use segment::intersect_segment;

use crate::Ray;
use lumen_geom::{
    ArcMirror, ArcRefractor, Blocker, IdealLens, PlaneMirror, PlaneRefractor, Surface, SurfaceKind,
};
use lumen_math::Point2;

/// Minimum distance a ray must travel before it may register a hit.
///
/// Candidates closer than this to the ray origin are rejected, so a ray
/// leaving a surface cannot immediately re-hit the same point and loop.
pub const HIT_EPSILON: f64 = 0.01;

/// Intersect a ray with a surface, returning the nearest admissible hit.
///
/// Dispatches to the segment or arc intersector based on surface kind.
pub fn intersect_surface(ray: &Ray, surface: &dyn Surface) -> Option<Point2> {
    match surface.kind() {
        SurfaceKind::PlaneMirror => surface
            .as_any()
            .downcast_ref::<PlaneMirror>()
            .and_then(|m| intersect_segment(ray, &m.a(), &m.b())),
        SurfaceKind::PlaneRefractor => surface
            .as_any()
            .downcast_ref::<PlaneRefractor>()
            .and_then(|r| intersect_segment(ray, &r.a(), &r.b())),
        SurfaceKind::IdealLens => surface
            .as_any()
            .downcast_ref::<IdealLens>()
            .and_then(|l| intersect_segment(ray, &l.a(), &l.b())),
        SurfaceKind::Blocker => surface
            .as_any()
            .downcast_ref::<Blocker>()
            .and_then(|b| intersect_segment(ray, &b.a(), &b.b())),
        SurfaceKind::ArcMirror => surface
            .as_any()
            .downcast_ref::<ArcMirror>()
            .and_then(|a| intersect_arc(ray, &a.center(), a.radius(), a.facing(), a.span())),
        SurfaceKind::ArcRefractor => surface
            .as_any()
            .downcast_ref::<ArcRefractor>()
            .and_then(|a| intersect_arc(ray, &a.center(), a.radius(), a.facing(), a.span())),
    }
}
