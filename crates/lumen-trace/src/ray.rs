//! Ray representation.

use lumen_math::{Point2, Vec2};

/// A ray in the scene plane defined by origin and unit direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point2,
    /// Unit direction of the ray.
    pub direction: Vec2,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized; it must be nonzero.
    pub fn new(origin: Point2, direction: Vec2) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point2 {
        self.origin + t * self.direction
    }
}
