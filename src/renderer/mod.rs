//! Tessellation for GPU hosts
//!
//! Turns the layer's draw calls into colored triangles that can be uploaded
//! to any vertex buffer.

pub mod shapes;
pub mod surface;
pub mod vertex;

pub use surface::{VertexSurface, vertex_bounds};
pub use vertex::Vertex;
