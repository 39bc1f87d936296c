//! Hourglass frame outline
//!
//! Two bulb arcs on a shared circle joined by an "X" through the waist.
//! The same path is stroked twice by the layer: opaque white underneath and
//! the translucent frame tint on top, so the tint never blends with itself.

use glam::Vec2;

use super::arc::Arc;
use super::path::Path;
use super::rect::Rect;
use crate::deg;

/// Build the frame outline, None when the bounds have no area
pub fn frame_path(bounds: &Rect, line_width: f32) -> Option<Path> {
    if bounds.is_zero_area() {
        return None;
    }

    let center = bounds.center();
    let radius = (bounds.height() - line_width) * 0.5;
    // Half diagonal of the square inscribed in the circle
    let a = (radius * radius * 0.5).sqrt();

    let mut path = Path::new();
    path.add_arc(Arc::new(center, radius, deg(225.0), deg(315.0), true));
    path.move_to(Vec2::new(center.x + a, center.y + a));
    path.line_to(Vec2::new(center.x - a, center.y - a));

    path.add_arc(Arc::new(center, radius, deg(45.0), deg(135.0), true));

    path.move_to(Vec2::new(center.x + a, center.y - a));
    path.line_to(Vec2::new(center.x - a, center.y + a));

    path.move_to(center);

    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathCommand;

    #[test]
    fn test_zero_bounds_short_circuits() {
        assert!(frame_path(&Rect::ZERO, 5.0).is_none());
    }

    #[test]
    fn test_frame_points_on_circle() {
        let bounds = Rect::from_size(100.0, 106.0);
        let path = frame_path(&bounds, 5.0).unwrap();
        let center = bounds.center();
        let radius = (106.0 - 5.0) / 2.0;

        for cmd in path.commands() {
            match *cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    if p != center {
                        assert!(((p - center).length() - radius).abs() < 1e-3);
                    }
                }
                PathCommand::Arc(arc) => {
                    assert_eq!(arc.center, center);
                    assert!((arc.radius - radius).abs() < 1e-5);
                    assert!(arc.clockwise);
                }
                PathCommand::Close => panic!("frame outline is open"),
            }
        }
    }

    #[test]
    fn test_diagonals_cross_at_waist() {
        let bounds = Rect::from_size(100.0, 106.0);
        let path = frame_path(&bounds, 5.0).unwrap();
        let lines = path.flatten(16.0);
        // Upper bulb + first diagonal, lower bulb joined to the first diagonal, second diagonal
        assert_eq!(lines.len(), 3);
        let diag = &lines[2];
        let mid = (diag.points[0] + diag.points[1]) / 2.0;
        assert!((mid - bounds.center()).length() < 1e-3);
    }
}
