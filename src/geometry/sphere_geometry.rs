//! UV sphere geometry, used for the electron sprites.

use super::{BufferGeometry, Vertex};
use std::f32::consts::PI;

/// A sphere geometry description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    /// Radius.
    pub radius: f32,
    /// Width segments (longitude).
    pub width_segments: u32,
    /// Height segments (latitude).
    pub height_segments: u32,
}

impl Default for SphereGeometry {
    fn default() -> Self {
        Self::new(1.0, 32, 16)
    }
}

impl SphereGeometry {
    /// Create a new sphere geometry.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    /// Build the sphere into an indexed geometry.
    pub fn build(&self) -> BufferGeometry {
        let columns = self.width_segments + 1;
        let mut vertices = Vec::with_capacity((columns * (self.height_segments + 1)) as usize);
        let mut indices = Vec::new();

        for iy in 0..=self.height_segments {
            let v = iy as f32 / self.height_segments as f32;
            let theta = v * PI;

            for ix in 0..=self.width_segments {
                let u = ix as f32 / self.width_segments as f32;
                let phi = u * PI * 2.0;

                let normal = [
                    -theta.sin() * phi.cos(),
                    theta.cos(),
                    theta.sin() * phi.sin(),
                ];
                let position = normal.map(|n| n * self.radius);

                vertices.push(Vertex::new(position, normal, [u, 1.0 - v]));
            }
        }

        for iy in 0..self.height_segments {
            for ix in 0..self.width_segments {
                let a = iy * columns + ix + 1;
                let b = iy * columns + ix;
                let c = (iy + 1) * columns + ix;
                let d = (iy + 1) * columns + ix + 1;

                // Skip degenerate triangles at the poles
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != self.height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        BufferGeometry::new(vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_vertices_on_surface() {
        let g = SphereGeometry::new(0.025, 8, 8).build();
        for v in g.vertices() {
            assert!((Vec3::from_array(v.position).length() - 0.025).abs() < 1e-6);
        }
    }

    #[test]
    fn test_triangle_count_skips_poles() {
        let g = SphereGeometry::new(1.0, 8, 8).build();
        // 8 x 8 quads, minus one triangle per quad in the first and last rows
        assert_eq!(g.index_count(), (8 * 8 * 2 - 8 - 8) * 3);
    }

    #[test]
    fn test_minimum_segments() {
        let s = SphereGeometry::new(1.0, 1, 1);
        assert_eq!(s.width_segments, 3);
        assert_eq!(s.height_segments, 2);
    }
}
