//! Tracer configuration.

use lumen_optics::REFERENCE_WAVELENGTH;
use serde::{Deserialize, Serialize};

/// Configuration threaded explicitly into every trace call.
///
/// The kernel holds no ambient state; a scene's settings travel with the
/// tick that consumes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceSettings {
    /// Whether partial-reflectance secondary rays are computed at all.
    pub compute_reflectance: bool,
    /// Intensity multiplier applied to spawned secondary rays.
    pub reflectance_factor: f64,
    /// Minimum intensity a secondary ray needs to be kept.
    pub min_secondary_intensity: f64,
    /// Maximum number of secondary-ray generations per tick.
    pub max_generations: usize,
    /// Maximum surface interactions along a single ray.
    pub max_bounces: usize,
    /// Strength of chromatic dispersion (0 disables it).
    pub dispersion_factor: f64,
    /// Wavelength in nanometers at which a refractor's base index holds.
    pub reference_wavelength: f64,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            compute_reflectance: true,
            reflectance_factor: 1.0,
            min_secondary_intensity: 0.01,
            max_generations: 10,
            max_bounces: 64,
            dispersion_factor: 0.2,
            reference_wavelength: REFERENCE_WAVELENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let s = TraceSettings::default();
        assert!(s.compute_reflectance);
        assert!(s.max_bounces > 0);
        assert!(s.max_generations > 0);
        assert!(s.min_secondary_intensity > 0.0);
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let s: TraceSettings = serde_json::from_str(r#"{"max_bounces": 8}"#).unwrap();
        assert_eq!(s.max_bounces, 8);
        assert_eq!(s.max_generations, TraceSettings::default().max_generations);
    }
}
