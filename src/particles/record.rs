//! Per-particle state.

use crate::models::ModelType;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which surface of the geometry a particle was placed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    /// Thin band just beneath a planar or SOI channel's top.
    ChannelSurface,
    /// Just above a fin crest.
    FinTop,
    /// Just outside a fin's lateral wall.
    FinSide,
    /// Inside a nanosheet's silhouette.
    SheetInterior,
}

/// One particle. Only `position.x` moves between respawns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleRecord {
    /// Position in the model group's frame.
    pub position: Vec3,
    /// Per-frame speed along the travel direction.
    pub velocity: f32,
    /// Smaller X bound of the travel segment.
    pub lower: f32,
    /// Larger X bound of the travel segment.
    pub upper: f32,
    /// `1.0` when travelling toward +X, `-1.0` toward -X.
    pub direction: f32,
    /// Model the record was placed for.
    pub model: ModelType,
    /// Placement face.
    pub face: Face,
    /// Times this slot has wrapped back to its segment start.
    pub respawns: u32,
}

impl ParticleRecord {
    /// Offset across the device (Z).
    #[inline]
    pub fn lateral(&self) -> f32 {
        self.position.z
    }

    /// Height (Y).
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.position.y
    }

    /// X where the particle enters its segment.
    #[inline]
    pub fn start(&self) -> f32 {
        if self.direction < 0.0 {
            self.upper
        } else {
            self.lower
        }
    }

    /// X after one more frame of travel.
    #[inline]
    pub fn advanced(&self) -> f32 {
        self.position.x + self.velocity * self.direction
    }

    /// Whether `x` lies past the far end of the segment.
    #[inline]
    pub fn is_past_end(&self, x: f32) -> bool {
        if self.direction < 0.0 {
            x < self.lower
        } else {
            x > self.upper
        }
    }

    /// Whether X lies within `[lower, upper]`.
    #[inline]
    pub fn in_segment(&self) -> bool {
        (self.lower..=self.upper).contains(&self.position.x)
    }
}
