//! The simulation world: built entities plus the cached trace result.

use crate::{ElementDef, SceneDoc, SceneError, SourceDef};
use lumen_geom::Surface;
use lumen_math::{Point2, Vec2};
use lumen_trace::{trace_all, LightRay, TraceResult, TraceSettings, TraceStats};

/// The simulation world for one scene.
///
/// Owns every element's surface and every source's primary rays.
/// Geometry edits mark the world dirty; [`World::tick`] recomputes the
/// light-transport result only when dirty and otherwise returns the
/// cached result unchanged.
#[derive(Debug)]
pub struct World {
    elements: Vec<Box<dyn Surface>>,
    sources: Vec<Vec<LightRay>>,
    settings: TraceSettings,
    dirty: bool,
    result: TraceResult,
}

impl World {
    /// Create an empty world with the given settings.
    pub fn new(settings: TraceSettings) -> Self {
        Self {
            elements: Vec::new(),
            sources: Vec::new(),
            settings,
            dirty: true,
            result: TraceResult {
                rays: Vec::new(),
                stats: TraceStats::default(),
            },
        }
    }

    /// Build a world from a scene document, validating every element
    /// and source.
    pub fn from_doc(doc: &SceneDoc) -> Result<Self, SceneError> {
        let mut world = Self::new(doc.settings.clone());
        for element in &doc.elements {
            world.add_element(element)?;
        }
        for source in &doc.sources {
            world.add_source(source)?;
        }
        Ok(world)
    }

    /// Add an element, returning its id.
    pub fn add_element(&mut self, def: &ElementDef) -> Result<usize, SceneError> {
        let surface = def.build()?;
        self.elements.push(surface);
        self.dirty = true;
        Ok(self.elements.len() - 1)
    }

    /// Add a source, returning its id.
    pub fn add_source(&mut self, def: &SourceDef) -> Result<usize, SceneError> {
        let rays = def.build()?;
        self.sources.push(rays);
        self.dirty = true;
        Ok(self.sources.len() - 1)
    }

    /// Replace an element's shape wholesale (shape-defining attribute
    /// changes rebuild the surface rather than mutating it).
    pub fn reconfigure_element(&mut self, id: usize, def: &ElementDef) -> Result<(), SceneError> {
        if id >= self.elements.len() {
            return Err(SceneError::UnknownElement(id));
        }
        self.elements[id] = def.build()?;
        self.dirty = true;
        Ok(())
    }

    /// Replace a source's emission parameters, rebuilding its rays.
    pub fn reconfigure_source(&mut self, id: usize, def: &SourceDef) -> Result<(), SceneError> {
        if id >= self.sources.len() {
            return Err(SceneError::UnknownSource(id));
        }
        self.sources[id] = def.build()?;
        self.dirty = true;
        Ok(())
    }

    /// Move an element, translating its control points in place.
    pub fn translate_element(&mut self, id: usize, delta: Vec2) -> Result<(), SceneError> {
        let surface = self
            .elements
            .get_mut(id)
            .ok_or(SceneError::UnknownElement(id))?;
        surface.translate(delta);
        self.dirty = true;
        Ok(())
    }

    /// Rotate an element about `pivot`, rotating its control points in
    /// place.
    pub fn rotate_element(
        &mut self,
        id: usize,
        pivot: Point2,
        angle: f64,
    ) -> Result<(), SceneError> {
        let surface = self
            .elements
            .get_mut(id)
            .ok_or(SceneError::UnknownElement(id))?;
        surface.rotate_about(pivot, angle);
        self.dirty = true;
        Ok(())
    }

    /// Replace the tracer settings.
    pub fn set_settings(&mut self, settings: TraceSettings) {
        self.settings = settings;
        self.dirty = true;
    }

    /// Current tracer settings.
    pub fn settings(&self) -> &TraceSettings {
        &self.settings
    }

    /// Number of elements in the scene.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Number of sources in the scene.
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Whether the next tick will recompute the trace.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Advance the simulation one tick.
    ///
    /// When the scene is dirty, pools all surfaces and primary rays and
    /// reruns the full generation expansion; otherwise the previous
    /// result is returned unchanged.
    pub fn tick(&mut self) -> &TraceResult {
        if self.dirty {
            let surfaces: Vec<&dyn Surface> =
                self.elements.iter().map(|boxed| boxed.as_ref()).collect();
            let primaries: Vec<LightRay> = self.sources.iter().flatten().cloned().collect();
            log::debug!(
                "retracing {} primaries against {} surfaces",
                primaries.len(),
                surfaces.len()
            );
            self.result = trace_all(primaries, &surfaces, &self.settings);
            self.dirty = false;
        }
        &self.result
    }

    /// The most recently traced rays.
    pub fn rays(&self) -> &[LightRay] {
        &self.result.rays
    }

    /// Statistics from the most recent trace.
    pub fn stats(&self) -> TraceStats {
        self.result.stats
    }
}
