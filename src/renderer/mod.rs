//! WebGPU rendering module
//!
//! The grid and balls are drawn as flat-colored triangle lists built by
//! `FrameBuilder` during each tick.

pub mod frame;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use frame::FrameBuilder;
pub use pipeline::RenderState;
pub use vertex::{Vertex, colors};
