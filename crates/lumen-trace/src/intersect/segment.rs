//! Ray-segment intersection (two-line parametric solve).

use super::HIT_EPSILON;
use crate::Ray;
use lumen_math::{cross2, Point2};

/// Intersect a ray with the segment `a -> b`.
///
/// Solves the two-line parametric system; a hit requires the segment
/// parameter `u ∈ [0, 1]` and the ray parameter `t` beyond the
/// self-intersection epsilon. A near-zero denominator (parallel lines)
/// is no intersection, not an error.
pub fn intersect_segment(ray: &Ray, a: &Point2, b: &Point2) -> Option<Point2> {
    let edge = b - a;
    let denom = cross2(&ray.direction, &edge);
    if denom.abs() < 1e-12 {
        return None;
    }

    let to_a = a - ray.origin;
    let t = cross2(&to_a, &edge) / denom;
    let u = cross2(&to_a, &ray.direction) / denom;

    if t > HIT_EPSILON && (0.0..=1.0).contains(&u) {
        Some(ray.at(t))
    } else {
        None
    }
}
