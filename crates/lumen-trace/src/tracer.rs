//! Generation-expansion orchestration.
//!
//! Expands a set of primary rays into the full light-transport result
//! for one tick: every ray is traced, spawned secondary rays are
//! buffered, and each buffered generation is appended and traced in
//! turn until a generation spawns nothing further or a bound is hit.

use crate::{LightRay, TraceSettings};
use lumen_geom::Surface;
use serde::{Deserialize, Serialize};

/// Statistics for one tick's trace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStats {
    /// Total rays traced, primaries plus all spawned generations.
    pub ray_count: usize,
    /// Total surface interactions across all rays.
    pub total_bounces: usize,
    /// Number of secondary generations expanded.
    pub generations: usize,
}

/// The full light-transport result for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceResult {
    /// All traced rays: primaries first, then generations in order.
    pub rays: Vec<LightRay>,
    /// Tick statistics.
    pub stats: TraceStats,
}

/// Trace `primaries` and every generation of spawned secondary rays.
///
/// Secondary rays are buffered separately from the generation being
/// traced (breadth-first, never recursive), so a ray is never appended
/// to while it is being traced. Expansion stops when a generation spawns
/// nothing, the generation limit is reached, or reflectance computation
/// is disabled. Output order is deterministic: ray index, then spawn
/// order.
pub fn trace_all(
    primaries: Vec<LightRay>,
    surfaces: &[&dyn Surface],
    settings: &TraceSettings,
) -> TraceResult {
    let mut rays = primaries;
    let mut buffer: Vec<LightRay> = Vec::new();
    let mut total_bounces = 0;

    for ray in rays.iter_mut() {
        let outcome = ray.trace(surfaces, settings);
        total_bounces += outcome.bounces;
        buffer.extend(outcome.spawned);
    }

    let mut generations = 0;
    while !buffer.is_empty() && generations < settings.max_generations && settings.compute_reflectance
    {
        let start = rays.len();
        rays.append(&mut buffer);
        for i in start..rays.len() {
            let outcome = rays[i].trace(surfaces, settings);
            total_bounces += outcome.bounces;
            buffer.extend(outcome.spawned);
        }
        generations += 1;
        log::trace!(
            "generation {generations}: traced {} rays, {} buffered",
            rays.len() - start,
            buffer.len()
        );
    }

    if !buffer.is_empty() {
        log::debug!(
            "generation limit {} reached, dropping {} spawned rays",
            settings.max_generations,
            buffer.len()
        );
    }
    log::debug!(
        "traced {} rays in {generations} generations, {total_bounces} bounces",
        rays.len()
    );

    TraceResult {
        stats: TraceStats {
            ray_count: rays.len(),
            total_bounces,
            generations,
        },
        rays,
    }
}
