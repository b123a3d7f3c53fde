//! # Math Module
//!
//! Vector and matrix types come straight from `glam`. This module adds the
//! few geometric helpers the scene graph and particle code share.

mod box3;
mod color;

pub use box3::Box3;
pub use color::Color;
pub use glam::{Mat4, Quat, Vec3};

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
