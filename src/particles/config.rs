//! Flow configuration.

use crate::error::{FetError, Result};
use crate::material::Material;
use crate::math::Color;
use crate::models::ModelType;
use serde::{Deserialize, Serialize};

/// Particle stream settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Particle count for planar, SOI and FinFET.
    pub base_count: usize,
    /// Particle count for GAAFET, which has nine conduction sheets.
    pub nanosheet_count: usize,
    /// Minimum per-frame speed along the flow axis.
    pub speed_min: f32,
    /// Maximum per-frame speed along the flow axis (exclusive).
    pub speed_max: f32,
    /// Particle sphere radius.
    pub particle_radius: f32,
    /// Sphere tessellation along each direction.
    pub particle_segments: u32,
    /// Particle color.
    pub color: Color,
    /// Particle opacity.
    pub opacity: f32,
    /// Chance that a FinFET particle rides the fin top instead of a side.
    pub top_face_probability: f32,
    /// Render order of the particle batch.
    pub render_order: i32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            base_count: 100,
            nanosheet_count: 150,
            speed_min: 0.01,
            speed_max: 0.02,
            particle_radius: 0.025,
            particle_segments: 8,
            color: Color::from_hex(0x00ffff),
            opacity: 0.9,
            top_face_probability: 0.4,
            render_order: 999,
        }
    }
}

impl FlowConfig {
    /// Particle count for a model.
    pub fn count_for(&self, model: ModelType) -> usize {
        match model {
            ModelType::GaaFet => self.nanosheet_count,
            _ => self.base_count,
        }
    }

    /// Material for the particle batch.
    pub fn material(&self) -> Material {
        Material {
            color: self.color,
            opacity: self.opacity,
            ..Material::electron()
        }
    }

    /// Check that the settings describe a usable stream.
    pub fn validate(&self) -> Result<()> {
        if self.base_count == 0 || self.nanosheet_count == 0 {
            return Err(FetError::InvalidConfig(
                "particle counts must be non-zero".into(),
            ));
        }
        if !(self.speed_min.is_finite() && self.speed_max.is_finite()) {
            return Err(FetError::InvalidConfig(format!(
                "speed range {}..{} must be finite",
                self.speed_min, self.speed_max
            )));
        }
        if !(self.speed_min > 0.0 && self.speed_min < self.speed_max) {
            return Err(FetError::InvalidConfig(format!(
                "speed range {}..{} must be positive and non-empty",
                self.speed_min, self.speed_max
            )));
        }
        if !(0.0..=1.0).contains(&self.top_face_probability) {
            return Err(FetError::InvalidConfig(format!(
                "top_face_probability {} is outside [0, 1]",
                self.top_face_probability
            )));
        }
        if !(self.particle_radius > 0.0 && self.particle_radius.is_finite()) {
            return Err(FetError::InvalidConfig(
                "particle_radius must be positive and finite".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(FetError::InvalidConfig(format!(
                "opacity {} is outside [0, 1]",
                self.opacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = FlowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.count_for(ModelType::Planar), 100);
        assert_eq!(config.count_for(ModelType::FinFet), 100);
        assert_eq!(config.count_for(ModelType::GaaFet), 150);
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            FlowConfig { base_count: 0, ..Default::default() },
            FlowConfig { speed_min: 0.02, speed_max: 0.01, ..Default::default() },
            FlowConfig { speed_min: 0.0, ..Default::default() },
            FlowConfig { top_face_probability: 1.5, ..Default::default() },
            FlowConfig { particle_radius: f32::NAN, ..Default::default() },
            FlowConfig { particle_radius: f32::INFINITY, ..Default::default() },
            FlowConfig { speed_max: f32::INFINITY, ..Default::default() },
            FlowConfig { speed_min: f32::NEG_INFINITY, ..Default::default() },
            FlowConfig { speed_min: -0.02, speed_max: -0.01, ..Default::default() },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(FetError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_material_uses_config_color() {
        let config = FlowConfig {
            color: Color::from_hex(0xff00ff),
            ..Default::default()
        };
        let material = config.material();
        assert_eq!(material.color.to_hex(), 0xff00ff);
        assert!(!material.depth_write);
    }
}
