//! Box geometry (rectangular cuboid), centred on the origin.

use super::{BufferGeometry, Vertex};

/// A box (rectangular cuboid) geometry description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    /// Width (X axis).
    pub width: f32,
    /// Height (Y axis).
    pub height: f32,
    /// Depth (Z axis).
    pub depth: f32,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl BoxGeometry {
    /// Create a new box geometry.
    pub const fn new(width: f32, height: f32, depth: f32) -> Self {
        Self { width, height, depth }
    }

    /// Build the six faces into an indexed geometry.
    pub fn build(&self) -> BufferGeometry {
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        let (w, h, d) = (self.width, self.height, self.depth);

        // (u, v, w) axes, u/v winding direction, face extents, offset along w, normal
        build_face(&mut vertices, &mut indices, [2, 1, 0], [-1.0, -1.0], [d, h], w / 2.0, [1.0, 0.0, 0.0]);
        build_face(&mut vertices, &mut indices, [2, 1, 0], [1.0, -1.0], [d, h], -w / 2.0, [-1.0, 0.0, 0.0]);
        build_face(&mut vertices, &mut indices, [0, 2, 1], [1.0, 1.0], [w, d], h / 2.0, [0.0, 1.0, 0.0]);
        build_face(&mut vertices, &mut indices, [0, 2, 1], [1.0, -1.0], [w, d], -h / 2.0, [0.0, -1.0, 0.0]);
        build_face(&mut vertices, &mut indices, [0, 1, 2], [1.0, -1.0], [w, h], d / 2.0, [0.0, 0.0, 1.0]);
        build_face(&mut vertices, &mut indices, [0, 1, 2], [-1.0, -1.0], [w, h], -d / 2.0, [0.0, 0.0, -1.0]);

        BufferGeometry::new(vertices, indices)
    }
}

fn build_face(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    axes: [usize; 3],
    dir: [f32; 2],
    extent: [f32; 2],
    offset: f32,
    normal: [f32; 3],
) {
    let base = vertices.len() as u32;

    for iy in 0..=1u32 {
        let y = (iy as f32 - 0.5) * extent[1] * dir[1];
        for ix in 0..=1u32 {
            let x = (ix as f32 - 0.5) * extent[0] * dir[0];

            let mut position = [0.0f32; 3];
            position[axes[0]] = x;
            position[axes[1]] = y;
            position[axes[2]] = offset;

            vertices.push(Vertex::new(position, normal, [ix as f32, 1.0 - iy as f32]));
        }
    }

    let (a, b, c, d) = (base, base + 2, base + 3, base + 1);
    indices.extend_from_slice(&[a, b, d, b, c, d]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Box3;
    use glam::Vec3;

    #[test]
    fn test_counts() {
        let g = BoxGeometry::new(1.0, 2.0, 3.0).build();
        assert_eq!(g.vertices().len(), 24);
        assert_eq!(g.index_count(), 36);
    }

    #[test]
    fn test_bounds_match_dimensions() {
        let g = BoxGeometry::new(1.2, 0.5, 3.02).build();
        assert!(g.bounding_box().approx_eq(
            &Box3::from_center_size(Vec3::ZERO, Vec3::new(1.2, 0.5, 3.02)),
            1e-6
        ));
    }

    #[test]
    fn test_normals_point_outwards() {
        let g = BoxGeometry::new(2.0, 2.0, 2.0).build();
        for v in g.vertices() {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            assert!(p.dot(n) > 0.0);
        }
    }
}
