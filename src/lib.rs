//! Sandglass - an animated hourglass widget
//!
//! Core modules:
//! - `geometry`: Progress-to-geometry mapping (frame outline, draining wedge, filling cone)
//! - `layer`: Widget state with recompute-on-write setters and host draw calls
//! - `emitter`: Falling-sand emitter parameters and a software particle system
//! - `sprite`: Cached round particle sprite bitmap
//! - `renderer`: Tessellation of paths into colored triangles for GPU hosts
//! - `driver`: Fixed-interval progress driver for demos
//! - `settings`: Data-driven configuration

pub mod color;
pub mod driver;
pub mod emitter;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod renderer;
pub mod settings;
pub mod sprite;

pub use color::Color;
pub use error::{Result, SandglassError};
pub use layer::{SandglassLayer, Surface};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Widget configuration constants
pub mod consts {
    /// Default frame stroke width (matches the sample widget)
    pub const DEFAULT_LINE_WIDTH: f32 = 5.0;

    /// The bottom pile never grows past this fraction of the bulb radius
    pub const BOTTOM_FILL_CAP: f32 = 0.8;

    /// Emitter layer birth rate while sand is falling
    pub const EMITTER_ACTIVE_BIRTH_RATE: f32 = 1.0;
    /// Emitter lifetime multiplier at progress 1
    pub const EMITTER_BASE_LIFETIME: f32 = 1.0;
    /// Extra emitter lifetime at progress 0 (particles fall further early on)
    pub const EMITTER_LIFETIME_BONUS: f32 = 0.25;

    /// Side of the particle sprite in points
    pub const SPRITE_SIDE: f32 = 1.5 * 1.5;
    /// Default sprite pixel density (points to pixels)
    pub const DEFAULT_SPRITE_SCALE: f32 = 2.0;

    /// Arc flattening density used when a path is tessellated
    pub const ARC_SEGMENTS_PER_RADIAN: f32 = 16.0;

    /// Sample driver: progress increment per tick
    pub const DRIVER_STEP: f32 = 0.01;
    /// Sample driver: milliseconds between ticks
    pub const DRIVER_INTERVAL_MS: u64 = 100;
    /// Sample driver stops once the value passes this
    pub const DRIVER_LIMIT: f32 = 1.1;
}

/// Convert polar (r, theta) to cartesian (x, y)
///
/// Screen coordinates: y grows downward, so increasing theta turns clockwise.
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert degrees to radians
#[inline]
pub fn deg(degrees: f32) -> f32 {
    degrees.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_polar_is_clockwise_on_screen() {
        // 90° points down the screen
        let p = polar_to_cartesian(10.0, FRAC_PI_2);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_deg() {
        assert!((deg(180.0) - std::f32::consts::PI).abs() < 1e-6);
    }
}
