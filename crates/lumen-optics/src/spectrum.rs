//! Wavelength handling and conversion to renderable colors.
//!
//! Monochromatic rays carry a wavelength in nanometers; the renderer-facing
//! output needs RGBA. The conversion uses the standard piecewise-linear
//! visible-spectrum approximation with intensity falloff toward the
//! spectrum edges.

use serde::{Deserialize, Serialize};

/// Shortest representable wavelength in nanometers.
pub const WAVELENGTH_MIN: f64 = 360.0;

/// Longest representable wavelength in nanometers.
pub const WAVELENGTH_MAX: f64 = 830.0;

/// Reference wavelength for dispersion (mid-spectrum green), nanometers.
pub const REFERENCE_WAVELENGTH: f64 = 550.0;

/// An RGBA color with components in [0, 1].
///
/// Ray intensity is baked into the alpha channel, so a traced segment's
/// color is self-contained for the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component.
    pub r: f64,
    /// Green component.
    pub g: f64,
    /// Blue component.
    pub b: f64,
    /// Alpha component (encodes intensity).
    pub a: f64,
}

impl Color {
    /// An opaque color from RGB components.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// This color with its alpha replaced by `alpha` clamped into [0, 1].
    ///
    /// The clamp is intentional: intensity above 1 renders fully opaque
    /// rather than being treated as an error.
    pub fn with_alpha(&self, alpha: f64) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..*self
        }
    }

    /// The color of a monochromatic ray at `wavelength` nanometers with
    /// the given intensity in the alpha channel.
    pub fn from_wavelength(wavelength: f64, intensity: f64) -> Self {
        let (r, g, b) = wavelength_to_rgb(wavelength);
        Self::rgb(r, g, b).with_alpha(intensity)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

/// Approximate RGB components for a visible wavelength in nanometers.
///
/// Piecewise-linear fit over 380–780 nm; inputs outside that band are
/// clamped to it, so the extremes of the [360, 830] range render as dim
/// violet and dim red rather than black.
pub fn wavelength_to_rgb(wavelength: f64) -> (f64, f64, f64) {
    let w = wavelength.clamp(380.0, 780.0);

    let (r, g, b) = match w {
        w if w < 440.0 => (-(w - 440.0) / 60.0, 0.0, 1.0),
        w if w < 490.0 => (0.0, (w - 440.0) / 50.0, 1.0),
        w if w < 510.0 => (0.0, 1.0, -(w - 510.0) / 20.0),
        w if w < 580.0 => ((w - 510.0) / 70.0, 1.0, 0.0),
        w if w < 645.0 => (1.0, -(w - 645.0) / 65.0, 0.0),
        _ => (1.0, 0.0, 0.0),
    };

    // Fade near the edges of visibility.
    let factor = if w < 420.0 {
        0.3 + 0.7 * (w - 380.0) / 40.0
    } else if w > 700.0 {
        0.3 + 0.7 * (780.0 - w) / 80.0
    } else {
        1.0
    };

    (r * factor, g * factor, b * factor)
}
