//! Renderable objects module.
//!
//! Contains the single-instance mesh used for transistor parts and the
//! instanced mesh used for the particle stream.

mod instanced_mesh;
mod mesh;

pub use instanced_mesh::*;
pub use mesh::*;
