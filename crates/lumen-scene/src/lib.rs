#![warn(missing_docs)]

//! Scene description and simulation world for the lumen optics kernel.
//!
//! A [`SceneDoc`] is a declarative serde document: optical elements,
//! light sources, and tracer settings. A [`World`] owns the built
//! entities — each element owns exactly one surface, each source owns
//! its emitted primary rays — and recomputes the light-transport result
//! on [`World::tick`] whenever the scene is dirty.
//!
//! # Example
//!
//! ```
//! use lumen_scene::{SceneDoc, World};
//!
//! let doc: SceneDoc = serde_json::from_str(
//!     r#"{
//!         "elements": [
//!             {"type": "mirror", "a": {"x": -100.0, "y": 0.0}, "b": {"x": 100.0, "y": 0.0}}
//!         ],
//!         "sources": [
//!             {"type": "ray", "origin": {"x": 0.0, "y": -50.0}, "direction": {"x": 0.0, "y": 1.0}}
//!         ]
//!     }"#,
//! )
//! .unwrap();
//!
//! let mut world = World::from_doc(&doc).unwrap();
//! let result = world.tick();
//! assert_eq!(result.stats.total_bounces, 1);
//! ```

mod document;
mod world;

pub use document::{ElementDef, SceneDoc, ScenePoint, SourceDef};
pub use world::World;

use lumen_geom::SurfaceError;
use lumen_trace::RayError;
use thiserror::Error;

/// Errors from scene construction and editing.
#[derive(Debug, Error)]
pub enum SceneError {
    /// An element's surface failed validation.
    #[error("invalid surface: {0}")]
    Surface(#[from] SurfaceError),

    /// A source's ray failed validation.
    #[error("invalid ray: {0}")]
    Ray(#[from] RayError),

    /// A source with a ray count of zero emits nothing.
    #[error("source emits no rays (count is 0)")]
    EmptySource,

    /// Element id out of range.
    #[error("no such element: {0}")]
    UnknownElement(usize),

    /// Source id out of range.
    #[error("no such source: {0}")]
    UnknownSource(usize),
}
