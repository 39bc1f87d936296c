//! Round particle sprite
//!
//! The emitter draws every grain with the same small filled circle tinted in
//! the sand color. The bitmap is regenerated whenever the sand color changes.

use crate::color::Color;

/// Samples per pixel axis when estimating circle coverage
const SUPERSAMPLE: u32 = 4;

/// Largest sprite side we are willing to allocate
const MAX_SPRITE_PIXELS: u32 = 4096;

/// Straight-alpha RGBA8 bitmap
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Sprite {
    /// Blank sprite used when a bitmap cannot be produced
    pub fn empty() -> Self {
        Self::default()
    }

    /// Filled circle inscribed in a `side` x `side` point square
    ///
    /// `scale` converts points to pixels. Falls back to an empty sprite when
    /// the pixel size is zero, non-finite or unreasonably large.
    pub fn round(color: Color, side: f32, scale: f32) -> Self {
        let side_px = side * scale;
        if !side_px.is_finite() || side_px <= 0.0 || side_px > MAX_SPRITE_PIXELS as f32 {
            log::warn!(
                "Cannot build {}x{} sprite (side {}, scale {}), using empty sprite",
                side_px,
                side_px,
                side,
                scale
            );
            return Self::empty();
        }

        let dim = side_px.ceil() as u32;
        let radius = side_px / 2.0;
        let r2 = radius * radius;
        let [r, g, b, _] = color.to_rgba8();

        let mut pixels = Vec::with_capacity((dim * dim) as usize);
        for y in 0..dim {
            for x in 0..dim {
                let mut inside = 0;
                for sy in 0..SUPERSAMPLE {
                    for sx in 0..SUPERSAMPLE {
                        let px = x as f32 + (sx as f32 + 0.5) / SUPERSAMPLE as f32 - radius;
                        let py = y as f32 + (sy as f32 + 0.5) / SUPERSAMPLE as f32 - radius;
                        if px * px + py * py <= r2 {
                            inside += 1;
                        }
                    }
                }
                let coverage = inside as f32 / (SUPERSAMPLE * SUPERSAMPLE) as f32;
                let alpha = (color.a.clamp(0.0, 1.0) * coverage * 255.0).round() as u8;
                if alpha == 0 {
                    pixels.push([0, 0, 0, 0]);
                } else {
                    pixels.push([r, g, b, alpha]);
                }
            }
        }

        Self {
            width: dim,
            height: dim,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Raw RGBA bytes, row-major, ready for texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SPRITE_SIDE;

    #[test]
    fn test_round_sprite_center_and_corners() {
        let color = Color::from_hex(0xFF8000, 1.0);
        let sprite = Sprite::round(color, SPRITE_SIDE, 16.0);
        // 2.25 * 16 = 36 px
        assert_eq!(sprite.width(), 36);
        assert_eq!(sprite.height(), 36);

        let center = sprite.pixel(18, 18).unwrap();
        assert_eq!(center, [255, 128, 0, 255]);
        assert_eq!(sprite.pixel(0, 0).unwrap()[3], 0);
        assert_eq!(sprite.pixel(35, 35).unwrap()[3], 0);
        assert!(sprite.pixel(36, 0).is_none());
    }

    #[test]
    fn test_alpha_follows_color() {
        let sprite = Sprite::round(Color::WHITE.with_alpha(0.5), SPRITE_SIDE, 16.0);
        assert_eq!(sprite.pixel(18, 18).unwrap()[3], 128);
    }

    #[test]
    fn test_bytes_layout() {
        let sprite = Sprite::round(Color::WHITE, SPRITE_SIDE, 2.0);
        assert_eq!(sprite.width(), 5);
        assert_eq!(sprite.as_bytes().len(), 5 * 5 * 4);
    }

    #[test]
    fn test_fallback_to_empty() {
        assert!(Sprite::round(Color::WHITE, SPRITE_SIDE, 0.0).is_empty());
        assert!(Sprite::round(Color::WHITE, SPRITE_SIDE, f32::NAN).is_empty());
        assert!(Sprite::round(Color::WHITE, SPRITE_SIDE, 1.0e9).is_empty());
        assert_eq!(Sprite::empty().as_bytes().len(), 0);
    }
}
