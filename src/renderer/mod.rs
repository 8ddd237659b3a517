//! WebGPU rendering module
//!
//! Scenes are built as flat-colored triangle lists in field coordinates and
//! mapped to clip space at upload time.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::Vertex;
