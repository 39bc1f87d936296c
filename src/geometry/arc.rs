//! Circular arc geometry for the bulbs and the bottom mound
//!
//! An arc is defined by:
//! - center, radius
//! - start_angle, end_angle (radians, 0 = +x, 90° = down the screen)
//! - direction: clockwise on screen means increasing angle

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::polar_to_cartesian;

/// A circular arc traced from `start_angle` to `end_angle`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub center: Vec2,
    pub radius: f32,
    pub start_angle: f32,
    pub end_angle: f32,
    /// Increasing angle when true (clockwise with y pointing down)
    pub clockwise: bool,
}

impl Arc {
    pub fn new(center: Vec2, radius: f32, start_angle: f32, end_angle: f32, clockwise: bool) -> Self {
        Self {
            center,
            radius,
            start_angle,
            end_angle,
            clockwise,
        }
    }

    /// Signed angle swept from start to end (positive when clockwise)
    ///
    /// Always within (-TAU, TAU); equal angles sweep nothing.
    pub fn sweep(&self) -> f32 {
        let mut span = (self.end_angle - self.start_angle) % TAU;
        if self.clockwise {
            if span < 0.0 {
                span += TAU;
            }
        } else if span > 0.0 {
            span -= TAU;
        }
        if span.is_finite() { span } else { 0.0 }
    }

    /// Point at a fraction `t` (0..=1) along the arc
    pub fn point_at(&self, t: f32) -> Vec2 {
        let theta = self.start_angle + t * self.sweep();
        self.center + polar_to_cartesian(self.radius, theta)
    }

    pub fn start_point(&self) -> Vec2 {
        self.center + polar_to_cartesian(self.radius, self.start_angle)
    }

    pub fn end_point(&self) -> Vec2 {
        self.point_at(1.0)
    }

    /// Arc length (radius may be negative for degenerate input, length is not)
    pub fn length(&self) -> f32 {
        (self.sweep() * self.radius).abs()
    }

    /// Sample points along the arc, endpoints included
    pub fn sample(&self, segments_per_radian: f32) -> Vec<Vec2> {
        let segments = ((self.sweep().abs() * segments_per_radian).ceil() as usize).max(1);

        (0..=segments)
            .map(|i| self.point_at(i as f32 / segments as f32))
            .collect()
    }
}
