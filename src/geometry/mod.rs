//! Progress geometry engine
//!
//! Everything here is a pure function of (progress, bounds, line width):
//! - No stored state
//! - No timing
//! - Degenerate input yields empty or degenerate paths, never a panic

pub mod arc;
pub mod frame;
pub mod path;
pub mod rect;
pub mod sand;

pub use arc::Arc;
pub use frame::frame_path;
pub use path::{Path, PathCommand, Polyline};
pub use rect::Rect;
pub use sand::{
    BottomSand, TopSand, bottom_radius, bulb_radius, drain_curve, fill_curve, hole_color,
    hole_rect, sand_bottom, sand_top,
};
