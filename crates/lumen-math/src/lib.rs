#![warn(missing_docs)]

//! Math types for the lumen optics kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types
//! for 2D geometric optics: points, vectors, directions, rigid
//! transforms, angle helpers, and tolerance constants.

use nalgebra::Unit;
use std::f64::consts::{PI, TAU};

/// A point in the 2D scene plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = nalgebra::Vector2<f64>;

/// A unit (normalized) direction vector in 2D space.
pub type Dir2 = Unit<nalgebra::Vector2<f64>>;

/// The 2D scalar cross product `a.x * b.y - a.y * b.x`.
///
/// Positive when `b` lies counterclockwise of `a`.
#[inline]
pub fn cross2(a: &Vec2, b: &Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// The counterclockwise perpendicular of `v`.
#[inline]
pub fn perp(v: &Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// The polar angle of `v` in radians, via `atan2`, in (-π, π].
#[inline]
pub fn angle_of(v: &Vec2) -> f64 {
    v.y.atan2(v.x)
}

/// A unit vector at polar angle `a` radians.
#[inline]
pub fn unit_from_angle(a: f64) -> Vec2 {
    let (s, c) = a.sin_cos();
    Vec2::new(c, s)
}

/// Rotate `v` counterclockwise by `angle` radians.
#[inline]
pub fn rotate_vec(v: &Vec2, angle: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Normalize an angle into (-π, π].
pub fn wrap_angle(a: f64) -> f64 {
    let mut a = a % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// A rigid (rotation + translation) transform of the scene plane.
///
/// Application order: `apply_point(p) = R * p + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2 {
    /// Rotation angle in radians (counterclockwise).
    pub rotation: f64,
    /// Translation applied after the rotation.
    pub translation: Vec2,
}

impl Transform2 {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            rotation: 0.0,
            translation: Vec2::zeros(),
        }
    }

    /// Translation by `(dx, dy)`.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            rotation: 0.0,
            translation: Vec2::new(dx, dy),
        }
    }

    /// Rotation about the origin by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        Self {
            rotation: angle,
            translation: Vec2::zeros(),
        }
    }

    /// Rotation about `pivot` by `angle` radians.
    pub fn rotation_about(pivot: Point2, angle: f64) -> Self {
        let rotated = rotate_vec(&pivot.coords, angle);
        Self {
            rotation: angle,
            translation: pivot.coords - rotated,
        }
    }

    /// Compose: apply `self` first, then `other`.
    pub fn then(&self, other: &Transform2) -> Self {
        Self {
            rotation: self.rotation + other.rotation,
            translation: rotate_vec(&self.translation, other.rotation) + other.translation,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point2) -> Point2 {
        Point2::from(rotate_vec(&p.coords, self.rotation) + self.translation)
    }

    /// Transform a direction vector (rotation only, no translation).
    pub fn apply_vec(&self, v: &Vec2) -> Vec2 {
        rotate_vec(v, self.rotation)
    }
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in scene units.
    pub linear: f64,
    /// Angular tolerance in radians.
    pub angular: f64,
}

impl Tolerance {
    /// Default tolerances (1e-9 units linear, 1e-9 rad angular).
    pub const DEFAULT: Self = Self {
        linear: 1e-9,
        angular: 1e-9,
    };

    /// Check if two points are coincident within tolerance.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two angles are effectively equal (in radians).
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        wrap_angle(a - b).abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
