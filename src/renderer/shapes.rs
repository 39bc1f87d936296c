//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::geometry::Polyline;
use crate::layer::{LineCap, LineJoin};

/// Segments used for round joins, caps and particles
pub const ROUND_SEGMENTS: u32 = 12;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Two triangles covering a thick line segment
fn segment_quad(p1: Vec2, p2: Vec2, half_width: f32, color: [f32; 4], out: &mut Vec<Vertex>) {
    // Direction from p1 to p2
    let dir = (p2 - p1).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * half_width;

    let v1a = p1 + perp;
    let v1b = p1 - perp;
    let v2a = p2 + perp;
    let v2b = p2 - perp;

    out.push(Vertex::new(v1a.x, v1a.y, color));
    out.push(Vertex::new(v1b.x, v1b.y, color));
    out.push(Vertex::new(v2a.x, v2a.y, color));

    out.push(Vertex::new(v2a.x, v2a.y, color));
    out.push(Vertex::new(v1b.x, v1b.y, color));
    out.push(Vertex::new(v2b.x, v2b.y, color));
}

/// Fill the wedge between two segment ends meeting at `corner`
fn bevel(
    prev: Vec2,
    corner: Vec2,
    next: Vec2,
    half_width: f32,
    color: [f32; 4],
    out: &mut Vec<Vertex>,
) {
    let d1 = (corner - prev).normalize_or_zero();
    let d2 = (next - corner).normalize_or_zero();
    if d1 == Vec2::ZERO || d2 == Vec2::ZERO {
        return;
    }
    // Outer side of the turn
    let side = if d1.perp_dot(d2) > 0.0 { -1.0 } else { 1.0 };
    let a = corner + Vec2::new(-d1.y, d1.x) * half_width * side;
    let b = corner + Vec2::new(-d2.y, d2.x) * half_width * side;
    out.push(Vertex::new(corner.x, corner.y, color));
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
}

/// Generate vertices for a stroked polyline
pub fn stroke(
    line: &Polyline,
    width: f32,
    color: [f32; 4],
    join: LineJoin,
    cap: LineCap,
) -> Vec<Vertex> {
    let mut pts = line.points.clone();
    pts.dedup();
    if pts.len() < 2 || width <= 0.0 {
        return Vec::new();
    }
    if line.closed && pts.first() != pts.last() {
        pts.push(pts[0]);
    }
    let half = width / 2.0;
    let closed = line.closed;

    // Square caps push the open ends out by half the width
    if !closed && cap == LineCap::Square {
        let n = pts.len();
        let start_dir = (pts[1] - pts[0]).normalize_or_zero();
        let end_dir = (pts[n - 1] - pts[n - 2]).normalize_or_zero();
        pts[0] -= start_dir * half;
        pts[n - 1] += end_dir * half;
    }

    let mut vertices = Vec::with_capacity(pts.len() * 6);
    for pair in pts.windows(2) {
        segment_quad(pair[0], pair[1], half, color, &mut vertices);
    }

    // Joins at interior vertices (and the seam of a closed line)
    let n = pts.len();
    let mut corners: Vec<(Vec2, Vec2, Vec2)> = (1..n - 1)
        .map(|i| (pts[i - 1], pts[i], pts[i + 1]))
        .collect();
    if closed && n >= 3 {
        corners.push((pts[n - 2], pts[0], pts[1]));
    }
    for (prev, corner, next) in corners {
        match join {
            LineJoin::Round => vertices.extend(circle(corner, half, color, ROUND_SEGMENTS)),
            LineJoin::Bevel | LineJoin::Miter => {
                bevel(prev, corner, next, half, color, &mut vertices)
            }
        }
    }

    if !closed && cap == LineCap::Round {
        vertices.extend(circle(pts[0], half, color, ROUND_SEGMENTS));
        vertices.extend(circle(pts[n - 1], half, color, ROUND_SEGMENTS));
    }

    vertices
}

/// Triangulate a simple polygon by ear clipping
///
/// Degenerate polygons (fewer than three distinct points, zero area) yield
/// nothing. Self-intersecting input falls back to a fan for whatever cannot
/// be clipped.
pub fn fill_polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    let mut pts = points.to_vec();
    pts.dedup();
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    if pts.len() < 3 {
        return Vec::new();
    }

    let area = Polyline {
        points: pts.clone(),
        closed: true,
    }
    .signed_area();
    if area.abs() < f32::EPSILON || !area.is_finite() {
        return Vec::new();
    }
    let orientation = area.signum();

    let mut remaining: Vec<usize> = (0..pts.len()).collect();
    let mut vertices = Vec::with_capacity((pts.len() - 2) * 3);
    let push = |a: Vec2, b: Vec2, c: Vec2, out: &mut Vec<Vertex>| {
        out.push(Vertex::new(a.x, a.y, color));
        out.push(Vertex::new(b.x, b.y, color));
        out.push(Vertex::new(c.x, c.y, color));
    };

    while remaining.len() > 3 {
        let n = remaining.len();
        let ear = (0..n).find(|&i| {
            let a = pts[remaining[(i + n - 1) % n]];
            let b = pts[remaining[i]];
            let c = pts[remaining[(i + 1) % n]];
            if (b - a).perp_dot(c - b) * orientation <= 0.0 {
                return false;
            }
            remaining
                .iter()
                .map(|&j| pts[j])
                .filter(|&p| p != a && p != b && p != c)
                .all(|p| !in_triangle(p, a, b, c))
        });

        match ear {
            Some(i) => {
                let a = pts[remaining[(i + n - 1) % n]];
                let b = pts[remaining[i]];
                let c = pts[remaining[(i + 1) % n]];
                push(a, b, c, &mut vertices);
                remaining.remove(i);
            }
            None => break,
        }
    }

    // Fan whatever is left (a single triangle for simple polygons)
    for i in 1..remaining.len().saturating_sub(1) {
        push(
            pts[remaining[0]],
            pts[remaining[i]],
            pts[remaining[i + 1]],
            &mut vertices,
        );
    }

    vertices
}

fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Total area covered by a triangle list
pub fn triangle_area(vertices: &[Vertex]) -> f32 {
    vertices
        .chunks_exact(3)
        .map(|t| {
            let a = Vec2::from(t[0].position);
            let b = Vec2::from(t[1].position);
            let c = Vec2::from(t[2].position);
            (b - a).perp_dot(c - a).abs() / 2.0
        })
        .sum()
}
