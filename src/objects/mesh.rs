//! Mesh object combining geometry and material.

use crate::geometry::BufferGeometry;
use crate::material::Material;
use crate::math::Box3;

/// A renderable geometry with a material. Placement comes from the scene
/// node that owns it.
pub struct Mesh {
    geometry: BufferGeometry,
    material: Material,
    /// Render order (for transparency sorting).
    pub render_order: i32,
}

impl Mesh {
    /// Create a new mesh.
    pub fn new(geometry: BufferGeometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            render_order: 0,
        }
    }

    /// Get the geometry.
    #[inline]
    pub fn geometry(&self) -> &BufferGeometry {
        &self.geometry
    }

    /// Get the material.
    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Local bounding box of the geometry.
    #[inline]
    pub fn bounding_box(&self) -> Box3 {
        self.geometry.bounding_box()
    }

    /// Release the geometry data.
    pub fn dispose(&mut self) {
        self.geometry.dispose();
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("geometry", &self.geometry)
            .field("render_order", &self.render_order)
            .finish()
    }
}
