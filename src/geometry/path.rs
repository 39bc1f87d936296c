//! Vector paths handed to the host render surface
//!
//! A path is a list of commands in the style of a host path API:
//! `add_arc` connects from the current point with a straight line, `close`
//! returns to the start of the current subpath. Paths can be flattened into
//! polylines for tessellation or inspection.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::Arc;
use super::rect::Rect;

/// A single path command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Vec2),
    LineTo(Vec2),
    Arc(Arc),
    Close,
}

/// A flattened subpath
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Vec2>,
    pub closed: bool,
}

impl Polyline {
    /// Shoelace area (positive when clockwise on screen), implicitly closed
    pub fn signed_area(&self) -> f32 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut sum = 0.0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum / 2.0
    }
}

/// A vector path made of lines and arcs
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Path {
    commands: Vec<PathCommand>,
    #[serde(skip)]
    current: Option<Vec2>,
    #[serde(skip)]
    subpath_start: Option<Vec2>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// True when the path has nothing to draw
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Last point reached by the pen
    pub fn current_point(&self) -> Option<Vec2> {
        self.current
    }

    pub fn move_to(&mut self, p: Vec2) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(p));
        self.current = Some(p);
        self.subpath_start = Some(p);
        self
    }

    /// Line from the current point; starts a subpath if there is none
    pub fn line_to(&mut self, p: Vec2) -> &mut Self {
        if self.current.is_none() {
            return self.move_to(p);
        }
        self.commands.push(PathCommand::LineTo(p));
        self.current = Some(p);
        self
    }

    /// Append an arc, joined to the current point by a straight line
    pub fn add_arc(&mut self, arc: Arc) -> &mut Self {
        if self.current.is_none() {
            self.subpath_start = Some(arc.start_point());
        }
        self.commands.push(PathCommand::Arc(arc));
        self.current = Some(arc.end_point());
        self
    }

    pub fn close(&mut self) -> &mut Self {
        if self.current.is_some() {
            self.commands.push(PathCommand::Close);
            self.current = self.subpath_start;
        }
        self
    }

    /// Flatten arcs into line segments
    ///
    /// Subpaths with a single point (a trailing `move_to`) are dropped.
    pub fn flatten(&self, segments_per_radian: f32) -> Vec<Polyline> {
        let mut out = Vec::new();
        let mut current = Polyline::default();

        let mut finish = |line: &mut Polyline| {
            let line = std::mem::take(line);
            if line.points.len() >= 2 {
                out.push(line);
            }
        };

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    finish(&mut current);
                    current.points.push(p);
                }
                PathCommand::LineTo(p) => current.points.push(p),
                PathCommand::Arc(arc) => current.points.extend(arc.sample(segments_per_radian)),
                PathCommand::Close => {
                    let start = current.points.first().copied();
                    current.closed = true;
                    finish(&mut current);
                    // Drawing after a close continues from the subpath start
                    if let Some(start) = start {
                        current.points.push(start);
                    }
                }
            }
        }
        finish(&mut current);

        out
    }

    /// Bounding box of the flattened path
    pub fn bounding_box(&self, segments_per_radian: f32) -> Option<Rect> {
        Rect::bounding(
            self.flatten(segments_per_radian)
                .into_iter()
                .flat_map(|line| line.points),
        )
    }

    /// Filled area (sum of absolute subpath areas)
    pub fn fill_area(&self, segments_per_radian: f32) -> f32 {
        self.flatten(segments_per_radian)
            .iter()
            .map(|line| line.signed_area().abs())
            .sum()
    }
}
