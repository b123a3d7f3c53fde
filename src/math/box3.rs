//! Axis-aligned bounding box implementation.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3 {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Default for Box3 {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Box3 {
    /// Empty box (inverted, ready to expand).
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Create a new box.
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box from center and size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Create the tightest box around a set of points.
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut result = Self::EMPTY;
        for p in points {
            result.expand_by_point(*p);
        }
        result
    }

    /// Check if the box is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
    }

    /// Center of the box, or the origin for an empty box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Extent of the box along each axis.
    #[inline]
    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    /// Expand to include a point.
    #[inline]
    pub fn expand_by_point(&mut self, point: Vec3) -> &mut Self {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
        self
    }

    /// Grow (or shrink, if negative) by the same amount on every side.
    #[inline]
    pub fn expand_by_scalar(&mut self, scalar: f32) -> &mut Self {
        self.min -= Vec3::splat(scalar);
        self.max += Vec3::splat(scalar);
        self
    }

    /// Check if a point is inside the box (boundary inclusive).
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Union of this box with another.
    pub fn union(&self, other: &Box3) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Apply a matrix and re-bound the eight transformed corners.
    ///
    /// The result is an AABB of the transformed box, not an oriented box.
    pub fn apply_matrix4(&self, m: &Mat4) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }

        let mut result = Self::EMPTY;
        for corner in self.corners() {
            result.expand_by_point(m.transform_point3(corner));
        }
        result
    }

    /// The 8 corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Box3, epsilon: f32) -> bool {
        self.min.abs_diff_eq(other.min, epsilon) && self.max.abs_diff_eq(other.max, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_size() {
        let b = Box3::from_center_size(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert!(b.center().abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6));
        assert!(b.size().abs_diff_eq(Vec3::new(2.0, 4.0, 6.0), 1e-6));
    }

    #[test]
    fn test_empty() {
        assert!(Box3::EMPTY.is_empty());
        assert_eq!(Box3::EMPTY.size(), Vec3::ZERO);
        assert!(Box3::EMPTY.apply_matrix4(&Mat4::IDENTITY).is_empty());
        assert!(!Box3::from_points(&[Vec3::ZERO]).is_empty());
    }

    #[test]
    fn test_contains() {
        let b = Box3::new(Vec3::ZERO, Vec3::ONE);
        assert!(b.contains_point(Vec3::splat(0.5)));
        assert!(b.contains_point(Vec3::ONE));
        assert!(!b.contains_point(Vec3::splat(2.0)));
    }

    #[test]
    fn test_apply_rotation_rebounds_corners() {
        let b = Box3::new(Vec3::new(-2.0, -0.5, -1.0), Vec3::new(2.0, 0.5, 1.0));
        let rotated = b.apply_matrix4(&Mat4::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(rotated.approx_eq(
            &Box3::new(Vec3::new(-1.0, -0.5, -2.0), Vec3::new(1.0, 0.5, 2.0)),
            1e-5
        ));
    }

    #[test]
    fn test_union_and_shrink() {
        let a = Box3::new(Vec3::ZERO, Vec3::ONE);
        let b = Box3::new(Vec3::splat(2.0), Vec3::splat(3.0));
        let mut u = a.union(&b);
        assert!(u.approx_eq(&Box3::new(Vec3::ZERO, Vec3::splat(3.0)), 1e-6));
        u.expand_by_scalar(-0.5);
        assert!(u.approx_eq(&Box3::new(Vec3::splat(0.5), Vec3::splat(2.5)), 1e-6));
    }
}
