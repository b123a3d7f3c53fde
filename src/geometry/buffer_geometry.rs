//! Indexed triangle geometry kept on the CPU.

use super::Vertex;
use crate::core::Id;
use crate::math::Box3;
use glam::Vec3;

/// Indexed triangle geometry with a cached local bounding box.
pub struct BufferGeometry {
    id: Id,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    bounding_box: Box3,
}

impl BufferGeometry {
    /// Create a geometry from vertex and index data.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let mut geometry = Self {
            id: Id::new(),
            vertices,
            indices,
            bounding_box: Box3::EMPTY,
        };
        geometry.compute_bounding_box();
        geometry
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Vertex data.
    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Index data.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of indices (three per triangle).
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Local-space bounding box. Empty when there are no vertices.
    #[inline]
    pub fn bounding_box(&self) -> Box3 {
        self.bounding_box
    }

    /// Recompute the bounding box from vertex positions.
    pub fn compute_bounding_box(&mut self) {
        let mut bbox = Box3::EMPTY;
        for v in &self.vertices {
            bbox.expand_by_point(Vec3::from_array(v.position));
        }
        self.bounding_box = bbox;
    }

    /// Translate every vertex, e.g. to recentre a generated shape.
    pub fn translate(&mut self, offset: Vec3) {
        for v in &mut self.vertices {
            v.position = (Vec3::from_array(v.position) + offset).to_array();
        }
        self.compute_bounding_box();
    }

    /// Concatenate several geometries into one, rebasing their indices.
    pub fn merge(parts: impl IntoIterator<Item = BufferGeometry>) -> Self {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        for mut part in parts {
            let base = vertices.len() as u32;
            indices.extend(part.indices.iter().map(|i| i + base));
            vertices.append(&mut part.vertices);
        }
        Self::new(vertices, indices)
    }

    /// Vertex data as interleaved floats: position, normal, uv.
    #[inline]
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Whether `dispose` emptied this geometry.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }

    /// Drop the vertex and index data.
    pub fn dispose(&mut self) {
        self.vertices = Vec::new();
        self.indices = Vec::new();
        self.bounding_box = Box3::EMPTY;
    }
}

impl std::fmt::Debug for BufferGeometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferGeometry")
            .field("id", &self.id)
            .field("vertices", &self.vertices.len())
            .field("indices", &self.indices.len())
            .finish()
    }
}
