//! Material descriptions for the transistor parts and the electron sprites.
//!
//! These are plain surface parameters; turning them into pipelines is the
//! rendering surface's job.

use crate::math::Color;
use serde::{Deserialize, Serialize};

/// How a material's fragments combine with what is already drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlendMode {
    /// Opaque or standard alpha blending.
    #[default]
    Normal,
    /// Additive blending. Order-independent, used for glowing particles.
    Additive,
}

/// Physically based surface parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color.
    pub color: Color,
    /// Metalness (0 = dielectric, 1 = metal).
    pub metalness: f32,
    /// Roughness (0 = mirror, 1 = diffuse).
    pub roughness: f32,
    /// Clearcoat layer strength.
    pub clearcoat: f32,
    /// Opacity, only honoured when `transparent` is set.
    pub opacity: f32,
    /// Whether the material is alpha blended.
    pub transparent: bool,
    /// Blend mode.
    pub blend: BlendMode,
    /// Whether the material writes depth.
    pub depth_write: bool,
    /// Skip lighting entirely.
    pub unlit: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            metalness: 0.0,
            roughness: 1.0,
            clearcoat: 0.0,
            opacity: 1.0,
            transparent: false,
            blend: BlendMode::Normal,
            depth_write: true,
            unlit: false,
        }
    }
}

impl Material {
    fn glossy_silicon(hex: u32) -> Self {
        Self {
            color: Color::from_hex(hex),
            metalness: 0.6,
            roughness: 0.1,
            clearcoat: 0.5,
            ..Self::default()
        }
    }

    /// Undoped channel silicon.
    pub fn silicon() -> Self {
        Self::glossy_silicon(0x333344)
    }

    /// Doped source/drain silicon.
    pub fn silicon_active() -> Self {
        Self::glossy_silicon(0xaa4444)
    }

    /// Bulk substrate.
    pub fn substrate() -> Self {
        Self::glossy_silicon(0x555555)
    }

    /// Gate dielectric and buried oxide.
    pub fn oxide() -> Self {
        Self {
            color: Color::from_hex(0xaaccff),
            metalness: 0.1,
            roughness: 0.1,
            opacity: 0.4,
            transparent: true,
            ..Self::default()
        }
    }

    /// Shallow trench isolation between fins.
    pub fn isolation() -> Self {
        Self {
            color: Color::from_hex(0xcccccc),
            metalness: 0.1,
            roughness: 0.5,
            ..Self::default()
        }
    }

    /// Opaque gate metal.
    pub fn gate_metal() -> Self {
        Self {
            color: Color::from_hex(0xffd700),
            metalness: 0.9,
            roughness: 0.15,
            clearcoat: 0.3,
            ..Self::default()
        }
    }

    /// Gate metal see-through enough to show the wrapped channel.
    pub fn gate_metal_translucent() -> Self {
        Self {
            opacity: 0.7,
            transparent: true,
            ..Self::gate_metal()
        }
    }

    /// Glowing electron sprite.
    pub fn electron() -> Self {
        Self {
            color: Color::from_hex(0x00ffff),
            opacity: 0.9,
            transparent: true,
            blend: BlendMode::Additive,
            depth_write: false,
            unlit: true,
            ..Self::default()
        }
    }

    /// RGBA color with opacity applied when transparent.
    pub fn rgba(&self) -> [f32; 4] {
        let alpha = if self.transparent { self.opacity } else { 1.0 };
        self.color.with_alpha(alpha)
    }
}
