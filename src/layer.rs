//! Sandglass widget state
//!
//! Holds the inputs (bounds, line width, progress, colors) and eagerly
//! recomputes every derived path whenever one of them changes. Equal-value
//! writes are no-ops. Drawing goes through the host-provided `Surface`.

use crate::color::Color;
use crate::consts::{ARC_SEGMENTS_PER_RADIAN, DEFAULT_LINE_WIDTH, DEFAULT_SPRITE_SCALE, SPRITE_SIDE};
use crate::emitter::EmitterLayer;
use crate::geometry::{
    BottomSand, Path, Rect, TopSand, frame_path, hole_color, hole_rect, sand_bottom, sand_top,
};
use crate::settings::Settings;
use crate::sprite::Sprite;

/// Stroke line join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// Stroke line cap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// How to stroke a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f32,
    pub join: LineJoin,
    pub cap: LineCap,
}

/// Drawing target supplied by the host
pub trait Surface {
    fn fill_path(&mut self, path: &Path, color: Color);

    fn stroke_path(&mut self, path: &Path, style: &StrokeStyle);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Hand the emitter to a host particle primitive (ignored by default)
    fn draw_emitter(&mut self, _emitter: &EmitterLayer, _sprite: &Sprite) {}
}

/// Waist indicator: sand colored while draining, white when done
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hole {
    pub rect: Rect,
    pub color: Color,
}

/// The hourglass widget
#[derive(Debug, Clone)]
pub struct SandglassLayer {
    bounds: Rect,
    line_width: f32,
    progress: f32,
    sand_color: Color,
    frame_stroke_color: Color,
    sprite_scale: f32,

    frame: Path,
    top: TopSand,
    bottom: BottomSand,
    hole: Hole,
    emitter: EmitterLayer,
    sprite: Sprite,

    /// Number of times the sand paths were rebuilt
    recompute_count: u64,
}

impl Default for SandglassLayer {
    fn default() -> Self {
        Self::new(Rect::ZERO)
    }
}

impl SandglassLayer {
    pub fn new(bounds: Rect) -> Self {
        let sand_color = Color::SYSTEM_RED;
        let mut layer = Self {
            bounds,
            line_width: DEFAULT_LINE_WIDTH,
            progress: 0.0,
            sand_color,
            frame_stroke_color: Color::from_hex(0xF0F0F2, 0.5),
            sprite_scale: DEFAULT_SPRITE_SCALE,
            frame: Path::new(),
            top: TopSand::default(),
            bottom: BottomSand::default(),
            hole: Hole {
                rect: hole_rect(&bounds, DEFAULT_LINE_WIDTH),
                color: sand_color,
            },
            emitter: EmitterLayer::default(),
            sprite: Sprite::round(sand_color, SPRITE_SIDE, DEFAULT_SPRITE_SCALE),
            recompute_count: 0,
        };
        layer.redraw();
        layer
    }

    /// Create a layer configured from settings
    pub fn from_settings(bounds: Rect, settings: &Settings) -> Self {
        let mut layer = Self::new(bounds);
        layer.sprite_scale = settings.sprite_scale;
        layer.emitter = EmitterLayer::new(settings.emitter_cell);
        layer.set_frame_stroke_color(settings.frame_stroke_color);
        layer.set_line_width(settings.line_width);
        // Always rebuild the sprite: the scale may have changed even if the color did not
        layer.sand_color = settings.sand_color;
        layer.apply_sand_color();
        layer
    }

    // === Inputs ===

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Resize the drawable area; equal bounds are a no-op
    pub fn set_bounds(&mut self, bounds: Rect) {
        if bounds == self.bounds {
            return;
        }
        self.bounds = bounds;
        self.redraw();
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    /// Change the frame width; negative and non-finite widths become 0
    pub fn set_line_width(&mut self, line_width: f32) {
        let line_width = if line_width.is_finite() {
            line_width.max(0.0)
        } else {
            0.0
        };
        if line_width == self.line_width {
            return;
        }
        self.line_width = line_width;
        self.redraw();
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Set drain progress, clamped to [0, 1]
    ///
    /// Writing the current (clamped) value does nothing; NaN is ignored.
    pub fn set_progress(&mut self, progress: f32) {
        if progress.is_nan() {
            log::warn!("Ignoring NaN progress");
            return;
        }
        let progress = progress.clamp(0.0, 1.0);
        if progress == self.progress {
            return;
        }
        self.progress = progress;
        self.apply_progress();
    }

    pub fn sand_color(&self) -> Color {
        self.sand_color
    }

    /// Re-tint the sand and hole and rebuild the particle sprite
    pub fn set_sand_color(&mut self, color: Color) {
        self.sand_color = color;
        self.apply_sand_color();
    }

    pub fn frame_stroke_color(&self) -> Color {
        self.frame_stroke_color
    }

    pub fn set_frame_stroke_color(&mut self, color: Color) {
        self.frame_stroke_color = color;
    }

    // === Derived state ===

    pub fn frame_path(&self) -> &Path {
        &self.frame
    }

    pub fn top_sand(&self) -> &TopSand {
        &self.top
    }

    pub fn bottom_sand(&self) -> &BottomSand {
        &self.bottom
    }

    pub fn hole(&self) -> Hole {
        self.hole
    }

    pub fn emitter(&self) -> &EmitterLayer {
        &self.emitter
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    pub fn is_animating(&self) -> bool {
        self.emitter.is_attached()
    }

    // === Animation ===

    /// Start the falling sand
    pub fn begin_animate(&mut self) {
        self.emitter.begin(&self.bounds, self.line_width);
        log::info!(
            "Sand falling from ({:.1}, {:.1})",
            self.emitter.position.x,
            self.emitter.position.y
        );
    }

    /// Stop the falling sand and detach the emitter
    pub fn end_animate(&mut self) {
        self.emitter.end();
        log::info!("Sand stopped at progress {:.2}", self.progress);
    }

    // === Drawing ===

    /// Issue draw calls back to front
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        if self.emitter.is_attached() {
            surface.draw_emitter(&self.emitter, &self.sprite);
        }
        surface.fill_path(&self.bottom.path, self.sand_color);
        surface.fill_path(&self.top.path, self.sand_color);

        // White base first so the translucent tint reads as a single layer
        let base = StrokeStyle {
            color: Color::WHITE,
            width: self.line_width,
            join: LineJoin::Round,
            cap: LineCap::Round,
        };
        surface.stroke_path(&self.frame, &base);
        surface.stroke_path(
            &self.frame,
            &StrokeStyle {
                color: self.frame_stroke_color,
                ..base
            },
        );

        surface.fill_rect(self.hole.rect, self.hole.color);
    }

    /// Total filled sand area, handy for hosts that want to sanity-check frames
    pub fn sand_area(&self) -> f32 {
        self.top.path.fill_area(ARC_SEGMENTS_PER_RADIAN)
            + self.bottom.path.fill_area(ARC_SEGMENTS_PER_RADIAN)
    }

    // === Recompute ===

    /// Rebuild everything that depends on bounds or line width
    fn redraw(&mut self) {
        let Some(frame) = frame_path(&self.bounds, self.line_width) else {
            log::debug!("Skipping redraw for zero-area bounds {:?}", self.bounds.size);
            return;
        };
        self.frame = frame;
        self.hole.rect = hole_rect(&self.bounds, self.line_width);
        self.apply_progress();
    }

    /// Rebuild everything that depends on progress
    fn apply_progress(&mut self) {
        self.hole.color = hole_color(self.progress, self.sand_color);
        self.emitter.set_progress(self.progress);

        if self.bounds.is_zero_area() {
            return;
        }
        self.top = sand_top(self.progress, &self.bounds, self.line_width);
        self.bottom = sand_bottom(self.progress, &self.bounds, self.line_width);
        self.recompute_count += 1;
        log::debug!(
            "progress {:.3}: top height {:.2}, bottom radius {:.2}",
            self.progress,
            self.top.height,
            self.bottom.bottom_radius
        );
    }

    fn apply_sand_color(&mut self) {
        self.hole.color = hole_color(self.progress, self.sand_color);
        self.sprite = Sprite::round(self.sand_color, SPRITE_SIDE, self.sprite_scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_layer() -> SandglassLayer {
        let mut layer = SandglassLayer::new(Rect::from_size(100.0, (48.0 + 5.0) * 2.0));
        layer.set_line_width(5.0);
        layer
    }

    /// Records draw calls in order
    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
        stroke_colors: Vec<Color>,
    }

    impl Surface for Recorder {
        fn fill_path(&mut self, _path: &Path, _color: Color) {
            self.calls.push("fill");
        }

        fn stroke_path(&mut self, _path: &Path, style: &StrokeStyle) {
            self.calls.push("stroke");
            self.stroke_colors.push(style.color);
        }

        fn fill_rect(&mut self, _rect: Rect, _color: Color) {
            self.calls.push("rect");
        }

        fn draw_emitter(&mut self, _emitter: &EmitterLayer, _sprite: &Sprite) {
            self.calls.push("emitter");
        }
    }

    #[test]
    fn test_progress_is_clamped() {
        let mut layer = sample_layer();
        layer.set_progress(1.7);
        assert_eq!(layer.progress(), 1.0);
        layer.set_progress(-0.3);
        assert_eq!(layer.progress(), 0.0);
        layer.set_progress(f32::NAN);
        assert_eq!(layer.progress(), 0.0);
    }

    #[test]
    fn test_equal_progress_is_noop() {
        let mut layer = sample_layer();
        let before = layer.recompute_count();
        layer.set_progress(0.4);
        layer.set_progress(0.4);
        assert_eq!(layer.recompute_count(), before + 1);

        // Both clamp to 1
        layer.set_progress(2.0);
        layer.set_progress(3.0);
        assert_eq!(layer.recompute_count(), before + 2);
    }

    #[test]
    fn test_complete_turns_hole_white() {
        let mut layer = sample_layer();
        layer.set_progress(0.99);
        assert_eq!(layer.hole().color, layer.sand_color());
        layer.set_progress(1.0);
        assert_eq!(layer.hole().color, Color::WHITE);
        assert!(layer.top_sand().path.is_empty());
        assert!((layer.bottom_sand().real_progress - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_sample_bottom_radius() {
        let mut layer = sample_layer();
        layer.set_progress(0.5);
        assert!((layer.bottom_sand().bottom_radius - 35.0).abs() < 0.1);
    }

    #[test]
    fn test_zero_bounds_leave_paths_unchanged() {
        let mut layer = SandglassLayer::default();
        assert!(layer.frame_path().is_empty());
        layer.set_progress(0.5);
        layer.set_line_width(3.0);
        layer.begin_animate();
        layer.end_animate();
        assert!(layer.frame_path().is_empty());
        assert!(layer.top_sand().path.is_empty());
        assert!(layer.bottom_sand().path.is_empty());
        assert_eq!(layer.recompute_count(), 0);

        // Shrinking a live layer to zero keeps the last paths
        let mut layer = sample_layer();
        layer.set_progress(0.3);
        let top = layer.top_sand().clone();
        layer.set_bounds(Rect::ZERO);
        layer.set_progress(0.6);
        assert_eq!(layer.top_sand(), &top);
    }

    #[test]
    fn test_bounds_change_recomputes() {
        let mut layer = sample_layer();
        let before = layer.recompute_count();
        layer.set_bounds(Rect::from_size(100.0, 106.0));
        assert_eq!(layer.recompute_count(), before);
        layer.set_bounds(Rect::from_size(200.0, 212.0));
        assert_eq!(layer.recompute_count(), before + 1);
        assert_eq!(layer.hole().rect.mid_x(), 100.0);
    }

    #[test]
    fn test_moving_origin_recomputes() {
        let mut layer = sample_layer();
        let before = layer.recompute_count();
        let moved = Rect {
            origin: glam::Vec2::new(10.0, 10.0),
            size: layer.bounds().size,
        };
        layer.set_bounds(moved);
        assert_eq!(layer.recompute_count(), before + 1);
        assert_eq!(layer.hole().rect.mid_x(), 60.0);
        let frame = layer.frame_path().bounding_box(ARC_SEGMENTS_PER_RADIAN).unwrap();
        assert!((frame.mid_x() - 60.0).abs() < 1e-2);

        layer.set_bounds(moved);
        assert_eq!(layer.recompute_count(), before + 1);
    }

    #[test]
    fn test_line_width_sanitized() {
        let mut layer = sample_layer();
        layer.set_line_width(-4.0);
        assert_eq!(layer.line_width(), 0.0);
        layer.set_line_width(f32::INFINITY);
        assert_eq!(layer.line_width(), 0.0);
    }

    #[test]
    fn test_begin_end_animate() {
        let mut layer = sample_layer();
        layer.begin_animate();
        assert!(layer.is_animating());
        assert_eq!(layer.emitter().position.y, 53.0 + 5.0);
        layer.end_animate();
        assert!(!layer.is_animating());
        assert_eq!(layer.emitter().birth_rate, 0.0);
    }

    #[test]
    fn test_emitter_lifetime_follows_progress() {
        let mut layer = sample_layer();
        layer.set_progress(0.2);
        assert!((layer.emitter().lifetime - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_sand_color_rebuilds_sprite() {
        let mut layer = sample_layer();
        let red = layer.sprite().clone();
        layer.set_sand_color(Color::from_hex(0xFF8000, 0.5));
        assert_ne!(layer.sprite(), &red);
        assert_eq!(layer.hole().color, Color::from_hex(0xFF8000, 0.5));
    }

    #[test]
    fn test_draw_order() {
        let mut layer = sample_layer();
        let mut rec = Recorder::default();
        layer.draw(&mut rec);
        assert_eq!(rec.calls, ["fill", "fill", "stroke", "stroke", "rect"]);
        assert_eq!(rec.stroke_colors[0], Color::WHITE);
        assert_eq!(rec.stroke_colors[1], layer.frame_stroke_color());

        layer.begin_animate();
        let mut rec = Recorder::default();
        layer.draw(&mut rec);
        assert_eq!(rec.calls[0], "emitter");
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            line_width: 3.0,
            sand_color: Color::from_hex(0x336699, 1.0),
            sprite_scale: 4.0,
            ..Settings::default()
        };
        let layer = SandglassLayer::from_settings(Rect::from_size(100.0, 106.0), &settings);
        assert_eq!(layer.line_width(), 3.0);
        assert_eq!(layer.sand_color(), settings.sand_color);
        assert_eq!(layer.sprite().width(), 9);
    }

    proptest! {
        #[test]
        fn prop_progress_clamped(p in -10.0f32..10.0) {
            let mut layer = sample_layer();
            layer.set_progress(p);
            prop_assert_eq!(layer.progress(), p.clamp(0.0, 1.0));
        }
    }
}
