//! Axis-aligned rectangle used for layer bounds and the hole indicator

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangle in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Rectangle at the origin with the given size
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    #[inline]
    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn mid_x(&self) -> f32 {
        self.origin.x + self.size.x / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f32 {
        self.origin.y + self.size.y / 2.0
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.mid_x(), self.mid_y())
    }

    /// True when there is nothing to draw into (zero, negative or non-finite area)
    pub fn is_zero_area(&self) -> bool {
        !(self.size.x.is_finite() && self.size.y.is_finite())
            || self.size.x <= 0.0
            || self.size.y <= 0.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_x() && p.x <= self.max_x() && p.y >= self.min_y() && p.y <= self.max_y()
    }

    /// Smallest rectangle containing all points, None for an empty iterator
    pub fn bounding(points: impl IntoIterator<Item = Vec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self {
            origin: min,
            size: max - min,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mid_and_max() {
        let r = Rect::new(10.0, 20.0, 100.0, 106.0);
        assert_eq!(r.mid_x(), 60.0);
        assert_eq!(r.mid_y(), 73.0);
        assert_eq!(r.max_y(), 126.0);
    }

    #[test]
    fn test_zero_area() {
        assert!(Rect::ZERO.is_zero_area());
        assert!(Rect::from_size(100.0, 0.0).is_zero_area());
        assert!(Rect::from_size(f32::NAN, 10.0).is_zero_area());
        assert!(!Rect::from_size(1.0, 1.0).is_zero_area());
    }

    #[test]
    fn test_bounding() {
        let b = Rect::bounding([Vec2::new(1.0, 5.0), Vec2::new(-2.0, 3.0), Vec2::new(4.0, 4.0)])
            .unwrap();
        assert_eq!(b, Rect::new(-2.0, 3.0, 6.0, 2.0));
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }
}
