//! Instanced mesh for rendering many copies of one geometry in a single draw.

use crate::geometry::BufferGeometry;
use crate::material::Material;
use crate::math::Box3;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Per-instance data: one model matrix and one color.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct InstanceData {
    /// Model matrix (column-major).
    pub model_matrix: [[f32; 4]; 4],
    /// Instance color (RGBA).
    pub color: [f32; 4],
}

impl Default for InstanceData {
    fn default() -> Self {
        Self {
            model_matrix: Mat4::IDENTITY.to_cols_array_2d(),
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl InstanceData {
    /// Floats per instance when the data is viewed as a flat array.
    pub const FLOATS: usize = 20;

    /// Translation stored in the model matrix.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        Mat4::from_cols_array_2d(&self.model_matrix).w_axis.truncate()
    }
}

/// Many copies of one geometry, drawn with one call.
pub struct InstancedMesh {
    geometry: BufferGeometry,
    material: Material,
    instances: Vec<InstanceData>,
    disposed: bool,
    /// Render order; particles draw after the translucent gate.
    pub render_order: i32,
}

impl InstancedMesh {
    /// Create an instanced mesh with `count` identity instances tinted by the
    /// material color.
    pub fn new(geometry: BufferGeometry, material: Material, count: usize) -> Self {
        let instance = InstanceData {
            color: material.rgba(),
            ..InstanceData::default()
        };
        Self {
            geometry,
            material,
            instances: vec![instance; count],
            disposed: false,
            render_order: 0,
        }
    }

    /// Get the shared geometry.
    #[inline]
    pub fn geometry(&self) -> &BufferGeometry {
        &self.geometry
    }

    /// Get the material.
    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Number of instances.
    #[inline]
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    /// Get all instances.
    #[inline]
    pub fn instances(&self) -> &[InstanceData] {
        &self.instances
    }

    /// Matrix of one instance.
    pub fn matrix_at(&self, index: usize) -> Option<Mat4> {
        self.instances
            .get(index)
            .map(|i| Mat4::from_cols_array_2d(&i.model_matrix))
    }

    /// Set the matrix of one instance. Out-of-range indices are ignored.
    pub fn set_matrix_at(&mut self, index: usize, matrix: &Mat4) {
        if let Some(instance) = self.instances.get_mut(index) {
            instance.model_matrix = matrix.to_cols_array_2d();
        }
    }

    /// Place one instance at a translation with unit scale and no rotation.
    pub fn set_translation_at(&mut self, index: usize, translation: Vec3) {
        self.set_matrix_at(index, &Mat4::from_translation(translation));
    }

    /// Local bounds covering every instance's geometry.
    pub fn bounding_box(&self) -> Box3 {
        let local = self.geometry.bounding_box();
        self.instances.iter().fold(Box3::EMPTY, |acc, i| {
            acc.union(&local.apply_matrix4(&Mat4::from_cols_array_2d(&i.model_matrix)))
        })
    }

    /// Whether `dispose` has released this mesh.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Instance data as flat floats: sixteen matrix entries, then RGBA.
    #[inline]
    pub fn instance_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Release the geometry and instance data.
    pub fn dispose(&mut self) {
        self.geometry.dispose();
        self.instances = Vec::new();
        self.disposed = true;
    }
}

impl std::fmt::Debug for InstancedMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstancedMesh")
            .field("count", &self.instances.len())
            .field("disposed", &self.disposed)
            .field("render_order", &self.render_order)
            .finish()
    }
}
