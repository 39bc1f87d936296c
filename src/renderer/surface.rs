//! A `Surface` that tessellates draw calls into a triangle list
//!
//! GPU hosts can upload `vertices()` as-is (see `Vertex` for the layout).

use glam::Vec2;

use super::shapes;
use super::vertex::{self, Vertex};
use crate::color::Color;
use crate::consts::ARC_SEGMENTS_PER_RADIAN;
use crate::emitter::{EmitterLayer, Particle};
use crate::geometry::{Path, Rect};
use crate::layer::{StrokeStyle, Surface};
use crate::sprite::Sprite;

/// Collects tessellated triangles in draw order
#[derive(Debug, Clone)]
pub struct VertexSurface {
    vertices: Vec<Vertex>,
    /// Software particles drawn when the layer hands over its emitter
    particles: Vec<Particle>,
    segments_per_radian: f32,
    /// Particle sprite radius in points at scale 1
    particle_radius: f32,
}

impl Default for VertexSurface {
    fn default() -> Self {
        Self::new(ARC_SEGMENTS_PER_RADIAN)
    }
}

impl VertexSurface {
    pub fn new(segments_per_radian: f32) -> Self {
        Self {
            vertices: Vec::new(),
            particles: Vec::new(),
            segments_per_radian: segments_per_radian.max(1.0),
            particle_radius: crate::consts::SPRITE_SIDE / 2.0,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn as_bytes(&self) -> &[u8] {
        vertex::as_bytes(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Start a new frame (staged particles are kept)
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    /// Particles to draw beneath the sand on the next `draw`
    pub fn set_particles(&mut self, particles: &[Particle]) {
        self.particles.clear();
        self.particles.extend_from_slice(particles);
    }

    /// Small discs: sprite scale shrinks the disc, alpha fades it
    fn tessellate_particles(&mut self) {
        for p in &self.particles {
            let color = p.color.with_alpha(p.color.a * p.alpha).to_array();
            let radius = (self.particle_radius * p.scale * 5.0).max(0.25);
            self.vertices
                .extend(shapes::circle(p.pos, radius, color, shapes::ROUND_SEGMENTS));
        }
    }
}

impl Surface for VertexSurface {
    fn fill_path(&mut self, path: &Path, color: Color) {
        let color = color.to_array();
        for line in path.flatten(self.segments_per_radian) {
            self.vertices
                .extend(shapes::fill_polygon(&line.points, color));
        }
    }

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle) {
        let color = style.color.to_array();
        for line in path.flatten(self.segments_per_radian) {
            self.vertices.extend(shapes::stroke(
                &line,
                style.width,
                color,
                style.join,
                style.cap,
            ));
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_zero_area() {
            return;
        }
        self.vertices.extend(shapes::rect(
            rect.origin,
            rect.origin + rect.size,
            color.to_array(),
        ));
    }

    fn draw_emitter(&mut self, _emitter: &EmitterLayer, _sprite: &Sprite) {
        self.tessellate_particles();
    }
}

/// Bounding box of everything drawn so far
pub fn vertex_bounds(vertices: &[Vertex]) -> Option<Rect> {
    Rect::bounding(vertices.iter().map(|v| Vec2::from(v.position)))
}
