#![warn(missing_docs)]

//! Optical response functions for the lumen kernel.
//!
//! Pure functions computing how a light ray responds to an optical
//! interface: mirror reflection, Snell's-law refraction with total
//! internal reflection, wavelength dispersion, and a Schlick-style
//! partial-reflectance heuristic. The [`spectrum`] module converts
//! wavelengths to renderable colors.
//!
//! All functions take the *outward* interface normal — the normal on the
//! rarer-medium side of a refractive boundary. [`refract`] uses the signed
//! angle between ray and normal to decide transparently whether the ray is
//! entering or exiting the denser medium.

pub mod spectrum;

pub use spectrum::{Color, REFERENCE_WAVELENGTH, WAVELENGTH_MAX, WAVELENGTH_MIN};

use lumen_math::{angle_of, rotate_vec, wrap_angle, Vec2};
use std::f64::consts::{FRAC_PI_2, PI};

/// Mirror-reflect `incident` about `normal`: `d - 2(d·n)/|n|² · n`.
///
/// `normal` does not need to be normalized; the magnitude of the result
/// equals the magnitude of `incident`.
pub fn reflect(incident: &Vec2, normal: &Vec2) -> Vec2 {
    incident - 2.0 * incident.dot(normal) / normal.norm_squared() * normal
}

/// Refract `incident` across an interface with relative refractive
/// `index`, falling back to total internal reflection past the
/// `critical_angle` (see [`critical_angle`]).
///
/// The signed angle from `normal` to `incident` (wrapped into (-π, π])
/// selects the branch: a magnitude above π/2 means the ray approaches
/// against the outward normal (rarer → denser, Snell applied forward),
/// otherwise the ray is leaving the denser medium (Snell in reverse).
/// A sine argument outside [-1, 1] in either branch also reflects, so a
/// relative index below 1 is handled without special cases.
pub fn refract(incident: &Vec2, normal: &Vec2, index: f64, critical_angle: f64) -> Vec2 {
    let theta = wrap_angle(angle_of(incident) - angle_of(normal));
    if theta.abs() > FRAC_PI_2 {
        // Rarer -> denser: bend toward the normal.
        let incidence = PI - theta.abs();
        let sine = incidence.sin() / index;
        if sine.abs() > 1.0 {
            return reflect(incident, normal);
        }
        let refraction = sine.asin();
        rotate_vec(incident, theta.signum() * (incidence - refraction))
    } else {
        // Denser -> rarer: bend away from the normal, or reflect internally.
        let incidence = theta.abs();
        let sine = incidence.sin() * index;
        if incidence >= critical_angle || sine.abs() > 1.0 {
            return reflect(incident, normal);
        }
        let refraction = sine.asin();
        rotate_vec(incident, theta.signum() * (refraction - incidence))
    }
}

/// Critical angle for total internal reflection: `asin(1/index)`.
///
/// For an index at or below 1 there is no critical angle on exit; π/2 is
/// returned so the comparison in [`refract`] never triggers.
pub fn critical_angle(index: f64) -> f64 {
    if index > 1.0 {
        (1.0 / index).asin()
    } else {
        FRAC_PI_2
    }
}

/// Wavelength-adjusted refractive index.
///
/// Scales `base_index` by `1 + factor · (reference/wavelength - 1)`:
/// shorter wavelengths see a higher index (blue bends more), with the
/// effect attenuated by `factor` so it stays visually legible.
pub fn dispersion_adjusted_index(
    wavelength: f64,
    reference_wavelength: f64,
    base_index: f64,
    factor: f64,
) -> f64 {
    base_index * (1.0 + factor * (reference_wavelength / wavelength - 1.0))
}

/// Schlick's approximation of Fresnel reflectance.
///
/// `cos_incidence` is the cosine of the angle between the incoming ray
/// and the interface normal. Returns the reflected fraction in [0, 1];
/// the transmitted fraction is its complement.
pub fn schlick_reflectance(cos_incidence: f64, index: f64) -> f64 {
    let r0 = ((1.0 - index) / (1.0 + index)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos_incidence.abs()).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::unit_from_angle;

    fn deg(d: f64) -> f64 {
        d.to_radians()
    }

    #[test]
    fn test_reflect_45_degrees() {
        // Ray going down-right onto a horizontal surface bounces up-right.
        let incident = Vec2::new(1.0, -1.0).normalize();
        let out = reflect(&incident, &Vec2::new(0.0, 1.0));
        assert!((out - Vec2::new(1.0, 1.0).normalize()).norm() < 1e-12);
    }

    #[test]
    fn test_reflect_preserves_magnitude() {
        let incident = Vec2::new(3.0, -4.0);
        let out = reflect(&incident, &Vec2::new(0.3, 0.7));
        assert!((out.norm() - incident.norm()).abs() < 1e-12);
    }

    #[test]
    fn test_reflect_unnormalized_normal() {
        let incident = Vec2::new(1.0, -1.0);
        let a = reflect(&incident, &Vec2::new(0.0, 1.0));
        let b = reflect(&incident, &Vec2::new(0.0, 17.0));
        assert!((a - b).norm() < 1e-12);
    }

    #[test]
    fn test_refract_perpendicular_is_undeviated() {
        // Head-on incidence passes straight through, entering and exiting.
        let n = Vec2::new(0.0, 1.0);
        let down = Vec2::new(0.0, -1.0);
        let out = refract(&down, &n, 1.5, critical_angle(1.5));
        assert!((out - down).norm() < 1e-12);

        let up = Vec2::new(0.0, 1.0);
        let out = refract(&up, &n, 1.5, critical_angle(1.5));
        assert!((out - up).norm() < 1e-12);
    }

    #[test]
    fn test_refract_snells_law_entering() {
        // Denser medium below a horizontal interface, outward normal +y.
        let index = 1.5;
        let n = Vec2::new(0.0, 1.0);
        for incidence in [deg(10.0), deg(30.0), deg(60.0), deg(85.0)] {
            for side in [-1.0, 1.0] {
                let incident = Vec2::new(side * incidence.sin(), -incidence.cos());
                let out = refract(&incident, &n, index, critical_angle(index));
                // Refraction angle measured from the inward normal.
                let refraction = out.angle(&Vec2::new(0.0, -1.0));
                assert!(
                    (incidence.sin() - index * refraction.sin()).abs() < 1e-10,
                    "Snell violated at incidence {incidence}"
                );
                // Still heading into the denser medium, same lateral side.
                assert!(out.y < 0.0);
                assert!(out.x * side >= 0.0);
            }
        }
    }

    #[test]
    fn test_refract_snells_law_exiting() {
        let index = 1.5;
        let n = Vec2::new(0.0, 1.0);
        let incidence = deg(20.0);
        let incident = Vec2::new(incidence.sin(), incidence.cos());
        let out = refract(&incident, &n, index, critical_angle(index));
        let refraction = out.angle(&n);
        assert!((index * incidence.sin() - refraction.sin()).abs() < 1e-10);
        assert!(out.y > 0.0);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        let index = 1.5;
        let crit = critical_angle(index);
        let n = Vec2::new(0.0, 1.0);
        // Exiting beyond the critical angle must equal pure reflection.
        let incidence = crit + deg(5.0);
        let incident = Vec2::new(incidence.sin(), incidence.cos());
        let out = refract(&incident, &n, index, crit);
        let reflected = reflect(&incident, &n);
        assert!((out - reflected).norm() < 1e-12);
    }

    #[test]
    fn test_critical_angle_values() {
        assert!((critical_angle(1.5) - (1.0f64 / 1.5).asin()).abs() < 1e-12);
        assert!((critical_angle(1.0) - FRAC_PI_2).abs() < 1e-12);
        assert!((critical_angle(0.7) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_refract_arbitrary_normal_orientation() {
        // Same physical setup rotated by 30° gives the rotated result.
        let index = 1.4;
        let crit = critical_angle(index);
        let incident = Vec2::new(0.5f64.sin(), -(0.5f64.cos()));
        let straight = refract(&incident, &Vec2::new(0.0, 1.0), index, crit);

        let rot = deg(30.0);
        let out = refract(
            &rotate_vec(&incident, rot),
            &rotate_vec(&Vec2::new(0.0, 1.0), rot),
            index,
            crit,
        );
        assert!((out - rotate_vec(&straight, rot)).norm() < 1e-10);
    }

    #[test]
    fn test_dispersion_blue_bends_more() {
        let base = 1.5;
        let blue = dispersion_adjusted_index(420.0, REFERENCE_WAVELENGTH, base, 0.2);
        let red = dispersion_adjusted_index(680.0, REFERENCE_WAVELENGTH, base, 0.2);
        assert!(blue > base);
        assert!(red < base);
        // At the reference wavelength the index is unchanged.
        let refr = dispersion_adjusted_index(REFERENCE_WAVELENGTH, REFERENCE_WAVELENGTH, base, 0.2);
        assert!((refr - base).abs() < 1e-12);
        // Zero factor disables dispersion entirely.
        let flat = dispersion_adjusted_index(420.0, REFERENCE_WAVELENGTH, base, 0.0);
        assert!((flat - base).abs() < 1e-12);
    }

    #[test]
    fn test_schlick_reflectance_bounds() {
        // Normal incidence on glass: the classic ~4%.
        let r = schlick_reflectance(1.0, 1.5);
        assert!((r - 0.04).abs() < 1e-3);
        // Grazing incidence approaches total reflection.
        let g = schlick_reflectance(0.0, 1.5);
        assert!((g - 1.0).abs() < 1e-12);
        // Monotone between the two.
        let mid = schlick_reflectance(0.5, 1.5);
        assert!(r < mid && mid < g);
    }

    #[test]
    fn test_refract_matches_unit_direction() {
        // Unit in, unit out (rotation preserves magnitude).
        let incident = unit_from_angle(deg(-70.0));
        let out = refract(&incident, &Vec2::new(0.0, 1.0), 1.33, critical_angle(1.33));
        assert!((out.norm() - 1.0).abs() < 1e-12);
    }
}
