//! Geometry module: CPU-side vertex data for the transistor parts and the
//! particle sprite.

mod box_geometry;
mod buffer_geometry;
mod sphere_geometry;
mod vertex;

pub use box_geometry::BoxGeometry;
pub use buffer_geometry::BufferGeometry;
pub use sphere_geometry::SphereGeometry;
pub use vertex::Vertex;
