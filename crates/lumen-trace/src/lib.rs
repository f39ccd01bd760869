#![warn(missing_docs)]

//! Ray-tracing kernel for the lumen optics simulator.
//!
//! Traces light rays against a pooled set of optical surfaces, applying
//! each surface's optical response (reflection, refraction with
//! dispersion, thin-lens transfer, absorption) and expanding spawned
//! secondary rays breadth-first into successive generations.
//!
//! # Architecture
//!
//! - [`Ray`] - ray representation with origin and unit direction
//! - [`intersect`] - ray-surface intersection, one module per basis
//!   (segment, arc)
//! - [`respond`] - per-kind optical response dispatch
//! - [`LightRay`] - a traceable ray with optical identity and its traced
//!   path
//! - [`TraceSettings`] - explicit configuration threaded through every
//!   trace call
//! - [`trace_all`] - generation-expansion orchestration
//!
//! The kernel is pure: it never holds global state, and retracing with
//! an unchanged scene yields identical output.
//!
//! # Example
//!
//! ```
//! use lumen_geom::{PlaneMirror, Surface};
//! use lumen_math::{Point2, Vec2};
//! use lumen_trace::{trace_all, LightRay, TraceSettings};
//!
//! let mirror = PlaneMirror::new(Point2::new(-100.0, 0.0), Point2::new(100.0, 0.0)).unwrap();
//! let surfaces: Vec<&dyn Surface> = vec![&mirror];
//!
//! let ray = LightRay::white(Point2::new(0.0, -50.0), Vec2::new(0.0, 1.0), 1.0).unwrap();
//! let result = trace_all(vec![ray], &surfaces, &TraceSettings::default());
//! assert_eq!(result.stats.total_bounces, 1);
//! ```

mod light_ray;
mod ray;
mod settings;
mod tracer;

pub mod intersect;
pub mod respond;

pub use light_ray::{LightRay, RayColor, RayError, TraceOutcome};
pub use lumen_optics::Color;
pub use ray::Ray;
pub use respond::{ReflectanceBranch, SurfaceResponse};
pub use settings::TraceSettings;
pub use tracer::{trace_all, TraceResult, TraceStats};

/// Distance appended along an escaping ray's direction so the
/// renderer-facing polyline stays finite.
pub const ESCAPE_DISTANCE: f64 = 1e5;
