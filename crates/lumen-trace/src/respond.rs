//! Per-surface optical response dispatch.
//!
//! Given a hit point and the incoming direction, [`respond_surface`]
//! selects the variant's response: mirror reflection, dispersion-adjusted
//! refraction with a partial-reflectance branch, ideal thin-lens
//! transfer, or absorption.

use crate::intersect::HIT_EPSILON;
use crate::TraceSettings;
use lumen_geom::{
    ArcMirror, ArcRefractor, IdealLens, LensKind, PlaneMirror, PlaneRefractor, Surface, SurfaceKind,
};
use lumen_math::{Point2, Tolerance, Vec2};
use lumen_optics::{
    critical_angle, dispersion_adjusted_index, reflect, refract, schlick_reflectance,
};

/// A partial-reflection branch reported alongside a transmitted ray.
#[derive(Debug, Clone, Copy)]
pub struct ReflectanceBranch {
    /// Fraction of intensity that continues with the primary ray, in (0, 1).
    pub transmittance: f64,
    /// Secondary-ray origin, nudged off the surface along the reflected
    /// direction so the spawned ray cannot re-hit the same point.
    pub origin: Point2,
    /// Secondary-ray (reflected) direction.
    pub direction: Vec2,
}

/// The outcome of one surface interaction.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceResponse {
    /// New direction for the continuing ray; zero when terminated.
    pub direction: Vec2,
    /// Whether the ray stops here (absorption).
    pub terminate: bool,
    /// Optional partial-reflection branch.
    pub reflectance: Option<ReflectanceBranch>,
}

impl SurfaceResponse {
    fn continue_along(direction: Vec2) -> Self {
        Self {
            direction,
            terminate: false,
            reflectance: None,
        }
    }

    fn absorbed() -> Self {
        Self {
            direction: Vec2::zeros(),
            terminate: true,
            reflectance: None,
        }
    }
}

/// Compute a surface's optical response at `point` for a ray arriving
/// along `incoming`.
///
/// `wavelength` is `Some` for monochromatic rays and enables dispersion
/// on refractive variants when the settings carry a nonzero dispersion
/// factor.
pub fn respond_surface(
    surface: &dyn Surface,
    point: &Point2,
    incoming: &Vec2,
    wavelength: Option<f64>,
    settings: &TraceSettings,
) -> SurfaceResponse {
    match surface.kind() {
        SurfaceKind::PlaneMirror => match surface.as_any().downcast_ref::<PlaneMirror>() {
            Some(m) => SurfaceResponse::continue_along(reflect(incoming, &m.normal())),
            None => SurfaceResponse::absorbed(),
        },
        SurfaceKind::ArcMirror => match surface.as_any().downcast_ref::<ArcMirror>() {
            Some(m) => {
                let normal = point - m.center();
                SurfaceResponse::continue_along(reflect(incoming, &normal))
            }
            None => SurfaceResponse::absorbed(),
        },
        SurfaceKind::PlaneRefractor => match surface.as_any().downcast_ref::<PlaneRefractor>() {
            Some(r) => refractive_response(point, incoming, &r.normal(), r.index(), wavelength, settings),
            None => SurfaceResponse::absorbed(),
        },
        SurfaceKind::ArcRefractor => match surface.as_any().downcast_ref::<ArcRefractor>() {
            Some(r) => refractive_response(
                point,
                incoming,
                &r.outward_normal(point),
                r.index(),
                wavelength,
                settings,
            ),
            None => SurfaceResponse::absorbed(),
        },
        SurfaceKind::IdealLens => match surface.as_any().downcast_ref::<IdealLens>() {
            Some(l) => lens_response(l, point, incoming),
            None => SurfaceResponse::absorbed(),
        },
        SurfaceKind::Blocker => SurfaceResponse::absorbed(),
    }
}

/// Refractive index effective for this interaction: dispersion-adjusted
/// for monochromatic rays when enabled, the base index otherwise.
fn effective_index(base: f64, wavelength: Option<f64>, settings: &TraceSettings) -> f64 {
    match wavelength {
        Some(w) if settings.dispersion_factor > 0.0 => dispersion_adjusted_index(
            w,
            settings.reference_wavelength,
            base,
            settings.dispersion_factor,
        ),
        _ => base,
    }
}

/// Shared response for the two refractive variants.
///
/// `normal` is the outward normal on the rarer side. Transmission
/// carries a partial-reflectance branch; total internal reflection does
/// not (the continuing ray already is the reflection).
fn refractive_response(
    point: &Point2,
    incoming: &Vec2,
    normal: &Vec2,
    base_index: f64,
    wavelength: Option<f64>,
    settings: &TraceSettings,
) -> SurfaceResponse {
    let index = effective_index(base_index, wavelength, settings);
    let crit = critical_angle(index);

    let cos_incidence = (incoming.dot(normal) / (incoming.norm() * normal.norm())).clamp(-1.0, 1.0);
    let entering = cos_incidence < 0.0;
    let incidence = cos_incidence.abs().acos();
    let total_internal = if entering {
        incidence.sin() / index > 1.0
    } else {
        incidence >= crit || incidence.sin() * index > 1.0
    };

    let direction = refract(incoming, normal, index, crit);
    let reflectance = if total_internal {
        None
    } else {
        let reflected = reflect(incoming, normal);
        let r = schlick_reflectance(cos_incidence, index);
        let transmittance = (1.0 - r).clamp(1e-6, 1.0 - 1e-6);
        Some(ReflectanceBranch {
            transmittance,
            origin: point + HIT_EPSILON * reflected.normalize(),
            direction: reflected,
        })
    };

    SurfaceResponse {
        direction,
        terminate: false,
        reflectance,
    }
}

/// Ideal thin-lens transfer via focal-plane projection.
///
/// A construction ray through the lens center, parallel to the incident
/// direction, meets the focal plane at distance `f / |d·n|` along
/// itself — forward of the lens for a convex lens, behind it for a
/// concave one. The outgoing direction runs from the hit point to that
/// focal point (convex) or away from it (concave, virtual focus).
fn lens_response(lens: &IdealLens, point: &Point2, incoming: &Vec2) -> SurfaceResponse {
    let d = incoming.normalize();
    let along_normal = d.dot(&lens.normal());
    if along_normal.abs() < Tolerance::DEFAULT.linear {
        // Grazing along the lens plane: the construction is degenerate,
        // pass through undeviated.
        return SurfaceResponse::continue_along(*incoming);
    }

    let reach = lens.focal_length() / along_normal.abs();
    match lens.lens_kind() {
        LensKind::Convex => {
            let focal = lens.center() + reach * d;
            SurfaceResponse::continue_along((focal - point).normalize())
        }
        LensKind::Concave => {
            let focal = lens.center() - reach * d;
            SurfaceResponse::continue_along((point - focal).normalize())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_geom::{ArcOrientation, Blocker};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn settings() -> TraceSettings {
        TraceSettings {
            dispersion_factor: 0.0,
            ..TraceSettings::default()
        }
    }

    #[test]
    fn test_mirror_angle_of_reflection() {
        let m = PlaneMirror::new(Point2::new(-100.0, 0.0), Point2::new(100.0, 0.0)).unwrap();
        let incoming = Vec2::new(1.0, -1.0).normalize();
        let r = respond_surface(&m, &Point2::new(0.0, 0.0), &incoming, None, &settings());
        assert!(!r.terminate);
        assert!(r.reflectance.is_none());
        // Equal angles about the normal, magnitude preserved.
        let n = m.normal();
        assert!((incoming.dot(&n).abs() - r.direction.dot(&n).abs()).abs() < 1e-12);
        assert!((r.direction.norm() - incoming.norm()).abs() < 1e-12);
        assert!((r.direction - Vec2::new(1.0, 1.0).normalize()).norm() < 1e-12);
    }

    #[test]
    fn test_blocker_always_terminates() {
        let b = Blocker::new(Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0)).unwrap();
        for angle in [0.1, 1.0, 2.0, 3.0] {
            let incoming = lumen_math::unit_from_angle(angle);
            for wl in [None, Some(450.0), Some(650.0)] {
                let r = respond_surface(&b, &Point2::new(0.0, 0.0), &incoming, wl, &settings());
                assert!(r.terminate);
                assert!(r.reflectance.is_none());
            }
        }
    }

    #[test]
    fn test_refractor_perpendicular_passthrough() {
        let g = PlaneRefractor::new(Point2::new(0.0, -10.0), Point2::new(0.0, 10.0), 1.5).unwrap();
        let incoming = Vec2::new(1.0, 0.0);
        let r = respond_surface(&g, &Point2::new(0.0, 0.0), &incoming, None, &settings());
        assert!(!r.terminate);
        assert!((r.direction - incoming).norm() < 1e-12);
        // Normal incidence still reflects the classic ~4%.
        let branch = r.reflectance.unwrap();
        assert!((branch.transmittance - 0.96).abs() < 1e-2);
        assert!((branch.direction - Vec2::new(-1.0, 0.0)).norm() < 1e-12);
        // Nudged origin sits off the surface on the reflected side.
        assert!(branch.origin.x < 0.0);
    }

    #[test]
    fn test_refractor_snell_oblique() {
        let g = PlaneRefractor::new(Point2::new(-10.0, 0.0), Point2::new(10.0, 0.0), 1.5).unwrap();
        // Normal is +y; arrive from above at 30° to the normal.
        let incidence = PI / 6.0;
        let incoming = Vec2::new(incidence.sin(), -incidence.cos());
        let r = respond_surface(&g, &Point2::new(0.0, 0.0), &incoming, None, &settings());
        let refraction = r.direction.angle(&Vec2::new(0.0, -1.0));
        assert!((incidence.sin() - 1.5 * refraction.sin()).abs() < 1e-10);
    }

    #[test]
    fn test_total_internal_reflection_no_branch() {
        let g = PlaneRefractor::new(Point2::new(-10.0, 0.0), Point2::new(10.0, 0.0), 1.5).unwrap();
        // Exiting (with the +y normal) past the ~41.8° critical angle.
        let incidence: f64 = 0.9;
        let incoming = Vec2::new(incidence.sin(), incidence.cos());
        let r = respond_surface(&g, &Point2::new(0.0, 0.0), &incoming, None, &settings());
        assert!(r.reflectance.is_none());
        let reflected = reflect(&incoming, &g.normal());
        assert!((r.direction - reflected).norm() < 1e-12);
    }

    #[test]
    fn test_dispersion_blue_deviates_more() {
        let mut s = settings();
        s.dispersion_factor = 0.3;
        let g = PlaneRefractor::new(Point2::new(-10.0, 0.0), Point2::new(10.0, 0.0), 1.5).unwrap();
        let incidence: f64 = 0.6;
        let incoming = Vec2::new(incidence.sin(), -incidence.cos());
        let p = Point2::new(0.0, 0.0);
        let blue = respond_surface(&g, &p, &incoming, Some(420.0), &s);
        let red = respond_surface(&g, &p, &incoming, Some(680.0), &s);
        let blue_refraction = blue.direction.angle(&Vec2::new(0.0, -1.0));
        let red_refraction = red.direction.angle(&Vec2::new(0.0, -1.0));
        assert!(blue_refraction < red_refraction);
        // Achromatic rays are untouched by dispersion.
        let white = respond_surface(&g, &p, &incoming, None, &s);
        let base = respond_surface(&g, &p, &incoming, None, &settings());
        assert!((white.direction - base.direction).norm() < 1e-12);
    }

    #[test]
    fn test_arc_mirror_center_ray_returns() {
        let m = ArcMirror::new(Point2::new(0.0, 0.0), 10.0, 0.0, PI).unwrap();
        let r = respond_surface(
            &m,
            &Point2::new(10.0, 0.0),
            &Vec2::new(-1.0, 0.0),
            None,
            &settings(),
        );
        assert!((r.direction - Vec2::new(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_arc_refractor_center_ray_undeviated() {
        let g = ArcRefractor::new(
            Point2::new(0.0, 0.0),
            10.0,
            0.0,
            PI,
            1.5,
            ArcOrientation::Outward,
        )
        .unwrap();
        let incoming = Vec2::new(-1.0, 0.0);
        let r = respond_surface(&g, &Point2::new(10.0, 0.0), &incoming, None, &settings());
        assert!((r.direction - incoming).norm() < 1e-12);
    }

    #[test]
    fn test_arc_orientation_flips_interface() {
        // With the normal inverted, the same geometry reads as exiting
        // the dense medium, so a steep hit reflects internally.
        let steep: f64 = 0.9;
        let incoming = Vec2::new(-steep.cos(), steep.sin());
        let p = Point2::new(10.0, 0.0);
        let outward = ArcRefractor::new(
            Point2::new(0.0, 0.0),
            10.0,
            0.0,
            PI,
            1.5,
            ArcOrientation::Outward,
        )
        .unwrap();
        let inward = ArcRefractor::new(
            Point2::new(0.0, 0.0),
            10.0,
            0.0,
            PI,
            1.5,
            ArcOrientation::Inward,
        )
        .unwrap();
        let r_out = respond_surface(&outward, &p, &incoming, None, &settings());
        let r_in = respond_surface(&inward, &p, &incoming, None, &settings());
        // Entering has a reflectance branch; total internal reflection
        // does not.
        assert!(r_out.reflectance.is_some());
        assert!(r_in.reflectance.is_none());
    }

    #[test]
    fn test_convex_lens_parallel_rays_converge() {
        let lens = IdealLens::new(
            Point2::new(0.0, -20.0),
            Point2::new(0.0, 20.0),
            LensKind::Convex,
            10.0,
        )
        .unwrap();
        let d = Vec2::new(1.0, 0.0);
        // Axis-parallel rays at different heights all cross (f, 0).
        for y in [-8.0, -3.0, 5.0] {
            let hit = Point2::new(0.0, y);
            let r = respond_surface(&lens, &hit, &d, None, &settings());
            let t = (10.0 - hit.x) / r.direction.x;
            let at_focus = hit + t * r.direction;
            assert!((at_focus.y).abs() < 1e-10, "ray from y={y} misses focus");
        }
        // A ray through the center is undeviated.
        let oblique = Vec2::new(1.0, 0.5).normalize();
        let r = respond_surface(&lens, &Point2::new(0.0, 0.0), &oblique, None, &settings());
        assert!((r.direction - oblique).norm() < 1e-10);
    }

    #[test]
    fn test_concave_lens_diverges_from_virtual_focus() {
        let lens = IdealLens::new(
            Point2::new(0.0, -20.0),
            Point2::new(0.0, 20.0),
            LensKind::Concave,
            10.0,
        )
        .unwrap();
        let d = Vec2::new(1.0, 0.0);
        let hit = Point2::new(0.0, 5.0);
        let r = respond_surface(&lens, &hit, &d, None, &settings());
        // Still moving forward, bending away from the axis.
        assert!(r.direction.x > 0.0);
        assert!(r.direction.y > 0.0);
        // Extended backward, the out-ray passes through the virtual
        // focus at (-f, 0).
        let t = (-10.0 - hit.x) / r.direction.x;
        let back = hit + t * r.direction;
        assert!(back.y.abs() < 1e-10);
    }

    #[test]
    fn test_lens_grazing_passes_through() {
        let lens = IdealLens::new(
            Point2::new(0.0, -20.0),
            Point2::new(0.0, 20.0),
            LensKind::Convex,
            10.0,
        )
        .unwrap();
        let d = Vec2::new(0.0, 1.0);
        let r = respond_surface(&lens, &Point2::new(0.0, 0.0), &d, None, &settings());
        assert!((r.direction - d).norm() < 1e-12);
    }

    #[test]
    fn test_rotated_lens_focuses_on_axis() {
        // Same convex lens rotated 90°: rays parallel to its axis still
        // meet at focal distance along the (rotated) axis.
        let mut lens = IdealLens::new(
            Point2::new(0.0, -20.0),
            Point2::new(0.0, 20.0),
            LensKind::Convex,
            10.0,
        )
        .unwrap();
        lens.rotate_about(Point2::new(0.0, 0.0), FRAC_PI_2);
        // Lens now lies along x; axis is y.
        let d = Vec2::new(0.0, -1.0);
        for x in [-6.0, 2.0, 9.0] {
            let hit = Point2::new(x, 0.0);
            let r = respond_surface(&lens, &hit, &d, None, &settings());
            let t = (-10.0 - hit.y) / r.direction.y;
            let at_focus = hit + t * r.direction;
            assert!(at_focus.x.abs() < 1e-10);
        }
    }
}
