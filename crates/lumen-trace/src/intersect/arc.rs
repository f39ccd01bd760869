//! Ray-arc intersection (closest-approach chord construction).

use super::HIT_EPSILON;
use crate::Ray;
use lumen_math::{angle_of, wrap_angle, Point2};

/// Intersect a ray with a circular arc.
///
/// The arc covers the angular window `facing ± span/2` on the circle of
/// the given center and radius. The ray origin is projected onto the ray
/// to find the closest approach to the center; the two chord offsets ±k
/// around it give a backward and a forward candidate. The backward
/// candidate is tried first so a ray starting inside the circle finds
/// the near exit boundary instead of skipping to the far one. Candidates
/// behind the origin or within the self-intersection epsilon are
/// rejected, as are points outside the angular window.
pub fn intersect_arc(
    ray: &Ray,
    center: &Point2,
    radius: f64,
    facing: f64,
    span: f64,
) -> Option<Point2> {
    let to_center = center - ray.origin;
    let proj = to_center.dot(&ray.direction);
    let closest_sq = to_center.norm_squared() - proj * proj;
    let radius_sq = radius * radius;
    if closest_sq > radius_sq {
        return None;
    }

    let k = (radius_sq - closest_sq).max(0.0).sqrt();
    for t in [proj - k, proj + k] {
        if t <= HIT_EPSILON {
            continue;
        }
        let p = ray.at(t);
        if on_arc(center, facing, span, &p) {
            return Some(p);
        }
    }
    None
}

/// Whether `p`, assumed on the circle, lies within the arc's angular
/// window.
fn on_arc(center: &Point2, facing: f64, span: f64, p: &Point2) -> bool {
    let angle = angle_of(&(p - center));
    wrap_angle(angle - facing).abs() <= span * 0.5 + 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::Vec2;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_head_on_hits_at_radius() {
        // Aimed at the center along the facing direction: the hit is
        // exactly one radius from the center.
        let ray = Ray::new(Point2::new(50.0, 0.0), Vec2::new(-1.0, 0.0));
        let center = Point2::new(0.0, 0.0);
        let p = intersect_arc(&ray, &center, 10.0, 0.0, PI).unwrap();
        assert!(((p - center).norm() - 10.0).abs() < 1e-10);
        assert!((p.x - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_near_candidate_preferred() {
        // A full circle: the near (backward) chord point wins.
        let ray = Ray::new(Point2::new(50.0, 0.0), Vec2::new(-1.0, 0.0));
        let p = intersect_arc(&ray, &Point2::new(0.0, 0.0), 10.0, 0.0, TAU).unwrap();
        assert!((p.x - 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_inside_finds_near_exit() {
        // Origin inside the circle: the backward candidate is behind the
        // origin, so the forward one is the near exit.
        let ray = Ray::new(Point2::new(5.0, 0.0), Vec2::new(1.0, 0.0));
        let p = intersect_arc(&ray, &Point2::new(0.0, 0.0), 10.0, 0.0, TAU).unwrap();
        assert!((p.x - 10.0).abs() < 1e-10);
        assert!(p.y.abs() < 1e-10);
    }

    #[test]
    fn test_angular_window_excludes_near_candidate() {
        // Arc only covers the far (left) side: the near candidate at
        // (10, 0) is outside the window, the far one at (-10, 0) is in.
        let ray = Ray::new(Point2::new(50.0, 0.0), Vec2::new(-1.0, 0.0));
        let p = intersect_arc(&ray, &Point2::new(0.0, 0.0), 10.0, PI, PI).unwrap();
        assert!((p.x + 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_miss_beyond_radius() {
        let ray = Ray::new(Point2::new(50.0, 20.0), Vec2::new(-1.0, 0.0));
        assert!(intersect_arc(&ray, &Point2::new(0.0, 0.0), 10.0, 0.0, TAU).is_none());
    }

    #[test]
    fn test_behind_ray_rejected() {
        let ray = Ray::new(Point2::new(50.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(intersect_arc(&ray, &Point2::new(0.0, 0.0), 10.0, 0.0, TAU).is_none());
    }

    #[test]
    fn test_epsilon_guard_on_arc_point() {
        // Origin on the circle heading out: the t ≈ 0 candidate must not
        // register, and no other candidate is ahead.
        let ray = Ray::new(Point2::new(10.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(intersect_arc(&ray, &Point2::new(0.0, 0.0), 10.0, 0.0, TAU).is_none());
    }

    #[test]
    fn test_chord_crossing_origin_on_circle() {
        // Origin on the circle heading through the interior: the exit on
        // the far side is found, not the origin itself.
        let ray = Ray::new(Point2::new(10.0, 0.0), Vec2::new(-1.0, 0.0));
        let p = intersect_arc(&ray, &Point2::new(0.0, 0.0), 10.0, 0.0, TAU).unwrap();
        assert!((p.x + 10.0).abs() < 1e-10);
    }

    #[test]
    fn test_tangent_ray() {
        // Grazing the top of the circle: one (double) candidate at the
        // tangent point.
        let ray = Ray::new(Point2::new(-50.0, 10.0), Vec2::new(1.0, 0.0));
        let p = intersect_arc(&ray, &Point2::new(0.0, 0.0), 10.0, 0.0, TAU).unwrap();
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 10.0).abs() < 1e-6);
    }
}
