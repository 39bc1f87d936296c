//! Sand geometry: the draining wedge, the filling mound and the waist hole
//!
//! The two easing curves are deliberately asymmetric. The top pile loses
//! height slowly at first and quickly near the end; the bottom pile grows fast
//! and then settles, capped below the full bulb radius.

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, SQRT_2};

use super::arc::Arc;
use super::path::Path;
use super::rect::Rect;
use crate::color::Color;
use crate::consts::BOTTOM_FILL_CAP;

/// Ease-out for the top pile height: 1 at p=0, 0 at p=1
#[inline]
pub fn drain_curve(progress: f32) -> f32 {
    (1.0 - progress * progress).max(0.0).sqrt()
}

/// Ease-in for the bottom pile: 0 at p=0, BOTTOM_FILL_CAP at p=1
#[inline]
pub fn fill_curve(progress: f32) -> f32 {
    let remaining = 1.0 - progress;
    BOTTOM_FILL_CAP * (1.0 - remaining * remaining).max(0.0).sqrt()
}

/// Radius available to the sand inside a bulb
#[inline]
pub fn bulb_radius(bounds: &Rect, line_width: f32) -> f32 {
    bounds.height() * 0.5 - line_width
}

/// Height of the bottom mound above the bulb floor
#[inline]
pub fn bottom_radius(progress: f32, bounds: &Rect, line_width: f32) -> f32 {
    (bounds.height() - line_width) * 0.5 * fill_curve(progress)
}

/// The inverted triangle left in the top bulb
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopSand {
    pub path: Path,
    /// Remaining pile height (0 once drained)
    pub height: f32,
    /// Half width of the pile surface; negative means the wedge has folded over
    pub offset_x: f32,
}

/// Build the top wedge for a progress value
pub fn sand_top(progress: f32, bounds: &Rect, line_width: f32) -> TopSand {
    if progress >= 1.0 {
        return TopSand::default();
    }

    let radius = bulb_radius(bounds, line_width);
    // Maximum triangle height
    let a = (radius * radius * 0.5).sqrt();
    let top_offset = line_width * 0.5 * SQRT_2;
    let origin = Vec2::new(bounds.mid_x(), bounds.mid_y() - top_offset);

    let height = a * drain_curve(progress);
    let y = bounds.mid_y() - height + top_offset;
    let offset_x = height - top_offset * 0.5;

    let mut path = Path::new();
    path.move_to(origin)
        .line_to(Vec2::new(bounds.mid_x() - offset_x, y))
        .line_to(Vec2::new(bounds.mid_x() + offset_x, y))
        .line_to(origin);

    TopSand {
        path,
        height,
        offset_x,
    }
}

/// The mound growing in the bottom bulb
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BottomSand {
    pub path: Path,
    /// Eased fill fraction, at most BOTTOM_FILL_CAP
    pub real_progress: f32,
    /// Mound height above the bulb floor
    pub bottom_radius: f32,
    /// Half angle of the arc along the bulb floor
    pub offset_angle: f32,
}

/// Build the bottom mound for a progress value
pub fn sand_bottom(progress: f32, bounds: &Rect, line_width: f32) -> BottomSand {
    let radius = bulb_radius(bounds, line_width);
    let real_progress = fill_curve(progress);
    let bottom_radius = (bounds.height() - line_width) * 0.5 * real_progress;
    let offset_angle = half_angle(bottom_radius, radius);

    let mut path = Path::new();
    path.add_arc(Arc::new(
        bounds.center(),
        radius,
        FRAC_PI_2 - offset_angle,
        FRAC_PI_2 + offset_angle,
        true,
    ));
    path.line_to(Vec2::new(
        bounds.mid_x(),
        bounds.max_y() - bottom_radius - line_width,
    ));
    path.close();

    BottomSand {
        path,
        real_progress,
        bottom_radius,
        offset_angle,
    }
}

/// atan(opposite / adjacent) without dividing by zero
fn half_angle(opposite: f32, adjacent: f32) -> f32 {
    if adjacent != 0.0 {
        (opposite / adjacent).atan()
    } else if opposite > 0.0 {
        FRAC_PI_2
    } else if opposite < 0.0 {
        -FRAC_PI_2
    } else {
        0.0
    }
}

/// Waist hole rectangle (half a line wide, two lines tall)
pub fn hole_rect(bounds: &Rect, line_width: f32) -> Rect {
    Rect::new(
        bounds.mid_x() - line_width * 0.25,
        bounds.mid_y() - line_width,
        line_width * 0.5,
        line_width * 2.0,
    )
}

/// Hole fill: sand while draining, white once done
pub fn hole_color(progress: f32, sand: Color) -> Color {
    if progress == 1.0 { Color::WHITE } else { sand }
}
