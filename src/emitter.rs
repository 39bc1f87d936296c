//! Falling-sand emitter
//!
//! Two layers of parameters, mirroring a host particle primitive:
//! - `EmitterCell`: per-particle template (rate, lifetime, velocity, fade)
//! - `EmitterLayer`: multipliers and placement, switched between Idle and
//!   Emitting by `begin` / `end`
//!
//! `ParticleSystem` is a small deterministic software emitter for hosts that
//! have no particle primitive. It is a visual approximation, not physics.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::{EMITTER_ACTIVE_BIRTH_RATE, EMITTER_BASE_LIFETIME, EMITTER_LIFETIME_BONUS};
use crate::geometry::Rect;
use crate::polar_to_cartesian;

/// Where new particles appear relative to the emitter position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmitterShape {
    Point,
    #[default]
    Circle,
    Rectangle,
}

/// Which part of the shape emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmitterMode {
    Points,
    #[default]
    Outline,
    Surface,
}

/// Draw order of live particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderMode {
    #[default]
    Unordered,
    OldestFirst,
    OldestLast,
}

/// Emitter on/off state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum EmitterPhase {
    /// Detached from the layer tree, birth rate 0
    #[default]
    Idle,
    /// Attached beneath the sand layers, emitting grains
    Emitting,
}

/// Per-particle template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterCell {
    /// Particles per second (multiplied by the layer birth rate)
    pub birth_rate: f32,
    /// Seconds a particle lives (multiplied by the layer lifetime)
    pub lifetime: f32,
    pub lifetime_range: f32,
    /// Alpha change per second (negative fades out)
    pub alpha_speed: f32,
    pub alpha_range: f32,
    pub velocity: f32,
    pub velocity_range: f32,
    /// Emission direction (radians, screen angle; pi/2 points down)
    pub emission_longitude: f32,
    pub emission_range: f32,
    pub red_range: f32,
    pub green_range: f32,
    pub blue_range: f32,
    pub scale: f32,
    pub scale_range: f32,
    pub x_acceleration: f32,
    pub y_acceleration: f32,
}

impl Default for EmitterCell {
    fn default() -> Self {
        Self {
            birth_rate: 120.0,
            lifetime: 0.25,
            lifetime_range: 0.3,
            alpha_speed: -1.0,
            alpha_range: 0.1,
            velocity: 0.0,
            velocity_range: 25.0,
            emission_longitude: std::f32::consts::FRAC_PI_2,
            emission_range: 0.0,
            red_range: 0.5,
            green_range: 0.5,
            blue_range: 0.5,
            scale: 0.2,
            scale_range: 0.02,
            x_acceleration: 0.0,
            y_acceleration: 250.0,
        }
    }
}

/// Emitter layer parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterLayer {
    pub cell: EmitterCell,
    /// Multiplier on the cell birth rate (0 = off)
    pub birth_rate: f32,
    /// Multiplier on the cell lifetime
    pub lifetime: f32,
    pub position: Vec2,
    pub size: Vec2,
    pub shape: EmitterShape,
    pub mode: EmitterMode,
    pub render_mode: RenderMode,
    pub frame: Rect,
    pub masks_to_bounds: bool,
    phase: EmitterPhase,
}

impl Default for EmitterLayer {
    fn default() -> Self {
        Self {
            cell: EmitterCell::default(),
            birth_rate: 0.0,
            lifetime: EMITTER_BASE_LIFETIME + EMITTER_LIFETIME_BONUS,
            position: Vec2::ZERO,
            size: Vec2::new(0.1, 1.0),
            shape: EmitterShape::Circle,
            mode: EmitterMode::Outline,
            render_mode: RenderMode::Unordered,
            frame: Rect::ZERO,
            masks_to_bounds: true,
            phase: EmitterPhase::Idle,
        }
    }
}

impl EmitterLayer {
    pub fn new(cell: EmitterCell) -> Self {
        Self {
            cell,
            ..Self::default()
        }
    }

    pub fn phase(&self) -> EmitterPhase {
        self.phase
    }

    /// True while the emitter is part of the layer tree
    pub fn is_attached(&self) -> bool {
        self.phase == EmitterPhase::Emitting
    }

    /// Lifetime multiplier for a progress value: particles live longer early on
    pub fn lifetime_for(progress: f32) -> f32 {
        EMITTER_BASE_LIFETIME + EMITTER_LIFETIME_BONUS * (1.0 - progress)
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.lifetime = Self::lifetime_for(progress);
    }

    /// Attach below the sand and start emitting from just under the waist
    pub fn begin(&mut self, bounds: &Rect, line_width: f32) {
        self.frame = *bounds;
        self.position = Vec2::new(bounds.mid_x(), bounds.mid_y() + line_width);
        self.birth_rate = EMITTER_ACTIVE_BIRTH_RATE;
        self.phase = EmitterPhase::Emitting;
    }

    /// Stop emitting and detach
    pub fn end(&mut self) {
        self.birth_rate = 0.0;
        self.phase = EmitterPhase::Idle;
    }

    /// Particles per second actually produced
    pub fn effective_birth_rate(&self) -> f32 {
        self.cell.birth_rate * self.birth_rate
    }
}

/// A single falling grain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub age: f32,
    pub lifetime: f32,
    pub alpha: f32,
    pub scale: f32,
    pub color: Color,
}

impl Particle {
    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime && self.alpha > 0.0
    }
}

/// Default cap on live particles
pub const MAX_PARTICLES: usize = 256;

/// Deterministic software emitter
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: Pcg32,
    spawn_accumulator: f32,
    max_particles: usize,
}

impl ParticleSystem {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: Vec::with_capacity(max_particles),
            rng: Pcg32::seed_from_u64(seed),
            spawn_accumulator: 0.0,
            max_particles,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.spawn_accumulator = 0.0;
    }

    /// Advance by `dt` seconds: move, fade and cull, then spawn
    ///
    /// A detached emitter shows nothing, so its particles are dropped.
    pub fn step(&mut self, emitter: &EmitterLayer, tint: Color, dt: f32) {
        if !emitter.is_attached() || self.max_particles == 0 {
            self.clear();
            return;
        }

        let cell = &emitter.cell;
        let accel = Vec2::new(cell.x_acceleration, cell.y_acceleration);
        for particle in self.particles.iter_mut() {
            particle.vel += accel * dt;
            particle.pos += particle.vel * dt;
            particle.age += dt;
            particle.alpha += cell.alpha_speed * dt;
        }
        let frame = emitter.frame;
        let masks = emitter.masks_to_bounds;
        self.particles
            .retain(|p| p.is_alive() && (!masks || frame.contains(p.pos)));

        self.spawn_accumulator += emitter.effective_birth_rate() * dt;
        let count = self.spawn_accumulator.floor().max(0.0);
        self.spawn_accumulator -= count;

        // Anything beyond one full cap would be evicted before it is seen
        let count = (count as usize).min(self.max_particles);
        let overflow = (self.particles.len() + count).saturating_sub(self.max_particles);
        if overflow > 0 {
            // Remove oldest particles to make room
            self.particles.drain(..overflow);
        }
        for _ in 0..count {
            let particle = self.spawn(emitter, tint);
            self.particles.push(particle);
        }
    }

    fn spawn(&mut self, emitter: &EmitterLayer, tint: Color) -> Particle {
        let cell = &emitter.cell;

        let lifetime = (cell.lifetime + self.spread(cell.lifetime_range)).max(0.0) * emitter.lifetime;
        let speed = cell.velocity + self.spread(cell.velocity_range);
        let direction = cell.emission_longitude + self.spread(cell.emission_range);
        let alpha = (1.0 + self.spread(cell.alpha_range)).clamp(0.0, 1.0);
        let scale = (cell.scale + self.spread(cell.scale_range)).max(0.0);
        let color = Color::rgba(
            (tint.r + self.spread(cell.red_range)).clamp(0.0, 1.0),
            (tint.g + self.spread(cell.green_range)).clamp(0.0, 1.0),
            (tint.b + self.spread(cell.blue_range)).clamp(0.0, 1.0),
            tint.a,
        );

        Particle {
            pos: emitter.position + self.spawn_offset(emitter),
            vel: polar_to_cartesian(speed, direction),
            age: 0.0,
            lifetime,
            alpha,
            scale,
            color,
        }
    }

    /// Offset from the emitter position according to shape and mode
    fn spawn_offset(&mut self, emitter: &EmitterLayer) -> Vec2 {
        let half = emitter.size / 2.0;
        match (emitter.shape, emitter.mode) {
            (EmitterShape::Point, _) | (_, EmitterMode::Points) => Vec2::ZERO,
            (EmitterShape::Circle, EmitterMode::Outline) => {
                let theta = self.rng.random_range(0.0..std::f32::consts::TAU);
                polar_to_cartesian(half.x, theta)
            }
            (EmitterShape::Circle, EmitterMode::Surface) => {
                let theta = self.rng.random_range(0.0..std::f32::consts::TAU);
                let r = half.x * self.rng.random::<f32>().sqrt();
                polar_to_cartesian(r, theta)
            }
            (EmitterShape::Rectangle, EmitterMode::Outline) => {
                // Pick an edge, then a point along it
                let t = self.rng.random::<f32>() * 2.0 - 1.0;
                match self.rng.random_range(0..4) {
                    0 => Vec2::new(t * half.x, -half.y),
                    1 => Vec2::new(t * half.x, half.y),
                    2 => Vec2::new(-half.x, t * half.y),
                    _ => Vec2::new(half.x, t * half.y),
                }
            }
            (EmitterShape::Rectangle, EmitterMode::Surface) => Vec2::new(
                self.spread(emitter.size.x),
                self.spread(emitter.size.y),
            ),
        }
    }

    /// Uniform value in [-range/2, range/2]
    fn spread(&mut self, range: f32) -> f32 {
        if range <= 0.0 {
            return 0.0;
        }
        (self.rng.random::<f32>() - 0.5) * range
    }
}
