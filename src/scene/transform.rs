//! Transform component for scene objects.

use glam::{Mat4, Quat, Vec3};

/// Transform component containing position, rotation, and scale.
#[derive(Debug, Clone)]
pub struct Transform {
    /// Local position.
    pub position: Vec3,
    /// Local rotation.
    pub quaternion: Quat,
    /// Local scale.
    pub scale: Vec3,
    /// Local transformation matrix.
    local_matrix: Mat4,
    /// World transformation matrix.
    world_matrix: Mat4,
    /// Whether the local matrix needs updating.
    local_matrix_dirty: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Create a new identity transform.
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            quaternion: Quat::IDENTITY,
            scale: Vec3::ONE,
            local_matrix: Mat4::IDENTITY,
            world_matrix: Mat4::IDENTITY,
            local_matrix_dirty: false,
        }
    }

    /// Create a transform from position.
    pub fn from_position(position: Vec3) -> Self {
        let mut t = Self::new();
        t.set_position(position);
        t
    }

    /// Set position.
    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.local_matrix_dirty = true;
    }

    /// Set rotation from quaternion.
    #[inline]
    pub fn set_quaternion(&mut self, quaternion: Quat) {
        self.quaternion = quaternion;
        self.local_matrix_dirty = true;
    }

    /// Set scale.
    #[inline]
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.local_matrix_dirty = true;
    }

    /// Rotate around the local Y axis.
    #[inline]
    pub fn rotate_y(&mut self, angle: f32) {
        self.quaternion = (self.quaternion * Quat::from_rotation_y(angle)).normalize();
        self.local_matrix_dirty = true;
    }

    /// Get the local matrix, recomposing it if needed.
    pub fn local_matrix(&mut self) -> &Mat4 {
        self.update_local_matrix();
        &self.local_matrix
    }

    /// Get the world matrix as of the last `update_world_matrix`.
    #[inline]
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    /// Recompose the local matrix from its components.
    pub fn update_local_matrix(&mut self) {
        if self.local_matrix_dirty {
            self.local_matrix =
                Mat4::from_scale_rotation_translation(self.scale, self.quaternion, self.position);
            self.local_matrix_dirty = false;
        }
    }

    /// Update the world matrix from the parent's world matrix.
    pub fn update_world_matrix(&mut self, parent_world: Option<&Mat4>) {
        self.update_local_matrix();
        self.world_matrix = match parent_world {
            Some(parent) => *parent * self.local_matrix,
            None => self.local_matrix,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let mut t = Transform::new();
        assert_eq!(*t.local_matrix(), Mat4::IDENTITY);
        assert_eq!(*t.world_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_world_composes_parent() {
        let mut t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        let parent = Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0));
        t.update_world_matrix(Some(&parent));
        let p = t.world_matrix().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn test_rotate_y_accumulates() {
        let mut t = Transform::new();
        t.rotate_y(FRAC_PI_2 / 2.0);
        t.rotate_y(FRAC_PI_2 / 2.0);
        t.update_world_matrix(None);
        let p = t.world_matrix().transform_point3(Vec3::X);
        assert!(p.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
    }
}
