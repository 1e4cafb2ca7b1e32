//! WebGPU rendering module
//!
//! Flat-colored triangles built from the simulation state each frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, board_to_ndc};
pub use shapes::scene;
pub use vertex::Vertex;
