//! Dimensions shared by the model builders and the particle placement rules.
//!
//! All values are in the model group's local frame. X is the source to drain
//! axis, Y is up, Z runs across the device width.

use crate::math::Box3;
use glam::Vec3;

/// Device depth along Z for the planar and SOI stacks.
pub const DEVICE_DEPTH: f32 = 3.0;
/// Outer half-length of the planar and SOI stacks.
pub const OUTER_X: f32 = 2.25;
/// Outer edge of the source and drain wells.
pub const WELL_OUTER_X: f32 = 1.75;
/// Inner edge of the wells, which is also the channel half-length.
pub const WELL_INNER_X: f32 = 0.5;
/// Flow half-range used when planar or SOI parts cannot be found.
pub const FALLBACK_HALF_RANGE: f32 = WELL_OUTER_X;

/// Bulk planar MOSFET.
pub mod planar {
    use super::*;

    /// Underside of the substrate.
    pub const SUBSTRATE_BOTTOM: f32 = -1.3;
    /// Floor of the source and drain wells.
    pub const WELL_BOTTOM: f32 = -0.3;
    /// Top of the raised substrate walls beside the wells.
    pub const WALL_TOP: f32 = 0.2;
    /// Underside of the channel layer.
    pub const CHANNEL_BOTTOM: f32 = -0.1;
    /// Top of the channel layer.
    pub const CHANNEL_TOP: f32 = -0.05;
    /// Top of the gate oxide.
    pub const OXIDE_TOP: f32 = 0.0;
    /// Top of the gate.
    pub const GATE_TOP: f32 = 0.6;

    /// Channel bounds, also the placement fallback.
    pub const CHANNEL: Box3 = Box3::new(
        Vec3::new(-WELL_INNER_X, CHANNEL_BOTTOM, -DEVICE_DEPTH / 2.0),
        Vec3::new(WELL_INNER_X, CHANNEL_TOP, DEVICE_DEPTH / 2.0),
    );
}

/// Silicon-on-insulator MOSFET.
pub mod soi {
    use super::*;

    /// Underside of the substrate.
    pub const SUBSTRATE_BOTTOM: f32 = -1.75;
    /// Underside of the buried oxide.
    pub const BURIED_OXIDE_BOTTOM: f32 = -0.75;
    /// Top of the buried oxide.
    pub const BURIED_OXIDE_TOP: f32 = -0.25;
    /// The silicon film's floor under the wells.
    pub const FILM_FLOOR: f32 = -0.2;
    /// Top of the raised substrate walls beside the wells.
    pub const WALL_TOP: f32 = 0.05;
    /// Underside of the channel layer.
    pub const CHANNEL_BOTTOM: f32 = 0.0;
    /// Top of the channel layer.
    pub const CHANNEL_TOP: f32 = 0.05;
    /// Top of the gate oxide.
    pub const OXIDE_TOP: f32 = 0.1;
    /// Top of the gate.
    pub const GATE_TOP: f32 = 0.7;

    /// Channel bounds, also the placement fallback.
    pub const CHANNEL: Box3 = Box3::new(
        Vec3::new(-WELL_INNER_X, CHANNEL_BOTTOM, -DEVICE_DEPTH / 2.0),
        Vec3::new(WELL_INNER_X, CHANNEL_TOP, DEVICE_DEPTH / 2.0),
    );
}

/// FinFET.
pub mod finfet {
    /// Half-length of the flow path along X.
    pub const HALF_LENGTH: f32 = 2.3;
    /// Substrate depth along Z.
    pub const DEPTH: f32 = 3.1;
    /// Underside of the substrate.
    pub const SUBSTRATE_BOTTOM: f32 = -0.75;
    /// Fin foot, buried in the isolation.
    pub const FIN_BOTTOM: f32 = -0.25;
    /// Top of the shallow trench isolation; fins are exposed above it.
    pub const ISOLATION_TOP: f32 = 0.15;
    /// Top of each fin.
    pub const FIN_CREST: f32 = 0.55;
    /// Fin width along Z.
    pub const FIN_WIDTH: f32 = 0.3;
    /// Fin centres along Z.
    pub const FIN_CENTERS: [f32; 3] = [-0.6, 0.0, 0.6];
    /// Gate length along X.
    pub const GATE_LENGTH: f32 = 1.25;
    /// Underside of the gate.
    pub const GATE_BOTTOM: f32 = -0.125;
    /// Top of the gate.
    pub const GATE_TOP: f32 = 1.125;
    /// Gate depth along Z.
    pub const GATE_DEPTH: f32 = 3.2;

    /// Height of top-face particles above the crest.
    pub const TOP_CLEARANCE: f32 = 0.008;
    /// Half-span of top-face jitter across the fin.
    pub const TOP_JITTER: f32 = 0.125;
    /// Offset of side-face particles from the fin centre, just outside the wall.
    pub const SIDE_OFFSET: f32 = 0.16;
}

/// Gate-all-around nanosheet FET.
pub mod gaafet {
    /// Half-length of the flow path along X.
    pub const HALF_LENGTH: f32 = 2.3;
    /// Substrate depth along Z.
    pub const DEPTH: f32 = 3.0;
    /// Underside of the substrate.
    pub const SUBSTRATE_BOTTOM: f32 = -0.5;
    /// Top of the substrate.
    pub const SUBSTRATE_TOP: f32 = 0.0;
    /// Inner face of the source and drain pillars.
    pub const PILLAR_INNER_X: f32 = 1.5;
    /// Top of the pillars.
    pub const PILLAR_TOP: f32 = 1.2;
    /// Pillar depth along Z.
    pub const PILLAR_DEPTH: f32 = 2.0;
    /// Sheets reach slightly into the pillars so they read as attached.
    pub const SHEET_HALF_LENGTH: f32 = 1.55;
    /// Nanosheet half-height.
    pub const SHEET_HALF_HEIGHT: f32 = 0.07;
    /// Nanosheet half-width along Z.
    pub const SHEET_HALF_WIDTH: f32 = 0.15;
    /// Nanosheet centres along Y.
    pub const SHEET_LEVELS: [f32; 3] = [0.3, 0.6, 0.9];
    /// Nanosheet centres along Z.
    pub const SHEET_COLUMNS: [f32; 3] = [-0.6, 0.0, 0.6];
    /// Gate length along X.
    pub const GATE_LENGTH: f32 = 1.0;
    /// Gate depth along Z.
    pub const GATE_DEPTH: f32 = 2.2;

    /// Vertical jitter half-span, inside the sheet half-height.
    pub const LEVEL_JITTER: f32 = 0.05;
    /// Lateral jitter half-span, inside the sheet half-width.
    pub const COLUMN_JITTER: f32 = 0.125;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_stays_inside_parts() {
        assert!(gaafet::LEVEL_JITTER < gaafet::SHEET_HALF_HEIGHT);
        assert!(gaafet::COLUMN_JITTER < gaafet::SHEET_HALF_WIDTH);
        assert!(finfet::SIDE_OFFSET > finfet::FIN_WIDTH / 2.0);
        assert!(finfet::ISOLATION_TOP < finfet::FIN_CREST);
    }

    #[test]
    fn test_channels_sit_between_wells() {
        for channel in [planar::CHANNEL, soi::CHANNEL] {
            assert!(!channel.is_empty());
            assert_eq!(channel.size().x, 2.0 * WELL_INNER_X);
        }
        assert!(planar::CHANNEL.max.y <= planar::WALL_TOP);
        assert!(soi::CHANNEL.min.y >= soi::FILM_FLOOR);
    }
}
