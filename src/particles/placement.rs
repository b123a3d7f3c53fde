//! Where particles spawn for each architecture.
//!
//! Every rule keeps the spawned point inside the solid region it depicts:
//! the channel surface band for planar and SOI, the exposed fin flanks and
//! crests for FinFET, and the nanosheet cross-sections for GAAFET.

use super::anchor::FlowAnchor;
use super::config::FlowConfig;
use super::record::{Face, ParticleRecord};
use crate::math::Box3;
use crate::models::layout::{self, finfet, gaafet};
use crate::models::ModelType;
use glam::Vec3;
use rand::{Rng, RngCore};

/// A per-architecture spawn policy.
///
/// Particles travel along X from the path start to its end; the rule picks
/// the other two coordinates.
pub trait PlacementRule {
    /// Travel path along X as `(start, end)`. `start` may exceed `end`.
    fn range(&self) -> (f32, f32);

    /// Pick `(y, z)` and the face it lies on.
    fn cross_section(&self, rng: &mut dyn RngCore) -> (f32, f32, Face);
}

/// Uniform draw from `[lo, hi)`, or `lo` when the range is empty.
fn uniform(rng: &mut dyn RngCore, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

fn pick<T: Copy>(rng: &mut dyn RngCore, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

/// Planar and SOI: a thin band hugging the underside of the channel top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSurface {
    start: f32,
    end: f32,
    channel: Box3,
}

impl ChannelSurface {
    /// Share of the channel depth kept clear at each edge.
    pub const DEPTH_MARGIN: f32 = 0.05;
    /// Upper bound on the band thickness.
    pub const MAX_BAND: f32 = 0.01;
    /// Upper bound on the band centre's depth below the channel top.
    pub const MAX_BAND_DEPTH: f32 = 0.045;

    /// Route from the source centre to the drain centre.
    pub fn from_anchor(anchor: &FlowAnchor) -> Self {
        if anchor.start.x > anchor.end.x {
            log::debug!("Source lies at +X, flow runs toward -X");
        }
        Self {
            start: anchor.start.x,
            end: anchor.end.x,
            channel: anchor.channel,
        }
    }

    /// Fixed route used when the model's parts cannot be found.
    pub fn fallback(model: ModelType) -> Self {
        let channel = match model {
            ModelType::Soi => layout::soi::CHANNEL,
            _ => layout::planar::CHANNEL,
        };
        Self {
            start: -layout::FALLBACK_HALF_RANGE,
            end: layout::FALLBACK_HALF_RANGE,
            channel,
        }
    }

    /// Channel bounds the band is cut from.
    pub fn channel(&self) -> &Box3 {
        &self.channel
    }

    /// Allowed Z range after the edge margin.
    pub fn depth_range(&self) -> (f32, f32) {
        let margin = self.channel.size().z * Self::DEPTH_MARGIN;
        (self.channel.min.z + margin, self.channel.max.z - margin)
    }

    /// Band centre and thickness along Y.
    pub fn band(&self) -> (f32, f32) {
        let height = self.channel.size().y;
        let thickness = Self::MAX_BAND.min(0.2 * height);
        let center = self.channel.max.y - Self::MAX_BAND_DEPTH.min(height - thickness);
        (center, thickness)
    }
}

impl PlacementRule for ChannelSurface {
    fn range(&self) -> (f32, f32) {
        (self.start, self.end)
    }

    fn cross_section(&self, rng: &mut dyn RngCore) -> (f32, f32, Face) {
        let (z_lo, z_hi) = self.depth_range();
        let z = uniform(rng, z_lo, z_hi);
        let (center, thickness) = self.band();
        let y = center + uniform(rng, -0.5, 0.5) * thickness;
        (y, z, Face::ChannelSurface)
    }
}

/// FinFET: along fin crests or just outside the exposed fin walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinFlanks {
    top_probability: f32,
}

impl FinFlanks {
    /// Share of the exposed flank height kept clear at each end.
    pub const FLANK_MARGIN: f32 = 0.05;

    /// Create with the chance of choosing the crest over a side.
    pub fn new(top_probability: f32) -> Self {
        Self {
            top_probability: top_probability.clamp(0.0, 1.0),
        }
    }

    /// Y range of side spawns: the fin wall above the isolation oxide.
    pub fn flank_range() -> (f32, f32) {
        let exposed = finfet::FIN_CREST - finfet::ISOLATION_TOP;
        let margin = exposed * Self::FLANK_MARGIN;
        (finfet::ISOLATION_TOP + margin, finfet::FIN_CREST - margin)
    }
}

impl PlacementRule for FinFlanks {
    fn range(&self) -> (f32, f32) {
        (-finfet::HALF_LENGTH, finfet::HALF_LENGTH)
    }

    fn cross_section(&self, rng: &mut dyn RngCore) -> (f32, f32, Face) {
        let fin = pick(rng, &finfet::FIN_CENTERS);
        let u: f32 = rng.gen();
        if u > 1.0 - self.top_probability {
            let jitter = uniform(rng, -finfet::TOP_JITTER, finfet::TOP_JITTER);
            (
                finfet::FIN_CREST + finfet::TOP_CLEARANCE,
                fin + jitter,
                Face::FinTop,
            )
        } else {
            let side = if rng.gen::<bool>() { 1.0 } else { -1.0 };
            let (lo, hi) = Self::flank_range();
            (uniform(rng, lo, hi), fin + side * finfet::SIDE_OFFSET, Face::FinSide)
        }
    }
}

/// GAAFET: inside one cell of the 3x3 nanosheet stack.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NanosheetGrid;

impl PlacementRule for NanosheetGrid {
    fn range(&self) -> (f32, f32) {
        (-gaafet::HALF_LENGTH, gaafet::HALF_LENGTH)
    }

    fn cross_section(&self, rng: &mut dyn RngCore) -> (f32, f32, Face) {
        let level = pick(rng, &gaafet::SHEET_LEVELS);
        let column = pick(rng, &gaafet::SHEET_COLUMNS);
        let y = level + uniform(rng, -gaafet::LEVEL_JITTER, gaafet::LEVEL_JITTER);
        let z = column + uniform(rng, -gaafet::COLUMN_JITTER, gaafet::COLUMN_JITTER);
        (y, z, Face::SheetInterior)
    }
}

/// The placement rule for the active model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Planar and SOI.
    Channel(ChannelSurface),
    /// FinFET.
    Fins(FinFlanks),
    /// GAAFET.
    Sheets(NanosheetGrid),
}

impl Placement {
    /// Choose the rule for `model`. Planar and SOI fall back to layout
    /// positions when no anchor was resolved.
    pub fn for_model(model: ModelType, anchor: Option<&FlowAnchor>, config: &FlowConfig) -> Self {
        match model {
            ModelType::Planar | ModelType::Soi => match anchor {
                Some(anchor) => Placement::Channel(ChannelSurface::from_anchor(anchor)),
                None => {
                    log::debug!("No flow anchor for {model}, using layout fallback");
                    Placement::Channel(ChannelSurface::fallback(model))
                }
            },
            ModelType::FinFet => Placement::Fins(FinFlanks::new(config.top_face_probability)),
            ModelType::GaaFet => Placement::Sheets(NanosheetGrid),
        }
    }

    fn rule(&self) -> &dyn PlacementRule {
        match self {
            Placement::Channel(rule) => rule,
            Placement::Fins(rule) => rule,
            Placement::Sheets(rule) => rule,
        }
    }
}

impl PlacementRule for Placement {
    fn range(&self) -> (f32, f32) {
        self.rule().range()
    }

    fn cross_section(&self, rng: &mut dyn RngCore) -> (f32, f32, Face) {
        self.rule().cross_section(rng)
    }
}

/// Make a fresh record. With `randomize` the particle starts anywhere on its
/// path, otherwise at the path start.
pub fn spawn_record(
    placement: &Placement,
    model: ModelType,
    config: &FlowConfig,
    randomize: bool,
    rng: &mut dyn RngCore,
) -> ParticleRecord {
    let (start, end) = placement.range();
    let (lower, upper) = (start.min(end), start.max(end));
    let x = if randomize {
        uniform(rng, lower, upper)
    } else {
        start
    };
    let (y, z, face) = placement.cross_section(rng);

    ParticleRecord {
        position: Vec3::new(x, y, z),
        velocity: uniform(rng, config.speed_min, config.speed_max),
        lower,
        upper,
        direction: if end < start { -1.0 } else { 1.0 },
        model,
        face,
        respawns: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::build_model;
    use crate::particles::anchor::resolve_anchor;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    fn spawn_many(model: ModelType, placement: &Placement, n: usize) -> Vec<ParticleRecord> {
        let config = FlowConfig::default();
        let mut rng = rng();
        (0..n)
            .map(|_| spawn_record(placement, model, &config, true, &mut rng))
            .collect()
    }

    /// World bounds of every mesh called `name`, grown by a rounding slack.
    fn part_boxes(model: ModelType, names: &[&str]) -> Vec<Box3> {
        let group = build_model(model);
        group.write().unwrap().update_world_matrix(None);
        let mut boxes = Vec::new();
        group.read().unwrap().traverse(&mut |node| {
            if names.contains(&node.name()) {
                let mut b = node.own_world_bounding_box();
                b.expand_by_scalar(1e-4);
                boxes.push(b);
            }
        });
        boxes
    }

    fn anchored(model: ModelType) -> Placement {
        let group = build_model(model);
        group.write().unwrap().update_world_matrix(None);
        let anchor = resolve_anchor(model, &group.read().unwrap());
        Placement::for_model(model, anchor.as_ref(), &FlowConfig::default())
    }

    #[test]
    fn test_planar_band_and_range() {
        let placement = anchored(ModelType::Planar);
        let Placement::Channel(rule) = placement else {
            panic!("planar must use the channel rule");
        };
        let (lower, upper) = rule.range();
        let (z_lo, z_hi) = rule.depth_range();
        let (center, thickness) = rule.band();

        for r in spawn_many(ModelType::Planar, &placement, 500) {
            assert!(r.position.x >= lower && r.position.x <= upper);
            assert!(r.lateral() >= z_lo && r.lateral() < z_hi);
            assert!((r.vertical() - center).abs() <= thickness / 2.0 + 1e-6);
            assert!(rule.channel().contains_point(Vec3::new(0.0, r.vertical(), r.lateral())));
            assert_eq!(r.face, Face::ChannelSurface);
        }
    }

    #[test]
    fn test_band_inside_thin_channel() {
        let anchor = FlowAnchor {
            start: Vec3::new(-1.0, 0.0, 0.0),
            end: Vec3::new(1.0, 0.0, 0.0),
            channel: Box3::new(Vec3::new(-0.5, 0.0, -1.0), Vec3::new(0.5, 0.02, 1.0)),
        };
        let rule = ChannelSurface::from_anchor(&anchor);
        let (center, thickness) = rule.band();
        assert!(center - thickness / 2.0 >= 0.0);
        assert!(center + thickness / 2.0 <= 0.02);
    }

    #[test]
    fn test_planar_and_soi_inside_solid_parts() {
        for model in [ModelType::Planar, ModelType::Soi] {
            let solids = part_boxes(model, &["source", "channel", "drain"]);
            assert_eq!(solids.len(), 3);
            for r in spawn_many(model, &anchored(model), 1000) {
                assert!(
                    solids.iter().any(|b| b.contains_point(r.position)),
                    "{model} particle floating at {:?}",
                    r.position
                );
            }
        }
    }

    #[test]
    fn test_fallback_matches_layout() {
        for model in [ModelType::Planar, ModelType::Soi] {
            let placement = Placement::for_model(model, None, &FlowConfig::default());
            assert_eq!(
                placement.range(),
                (-layout::FALLBACK_HALF_RANGE, layout::FALLBACK_HALF_RANGE)
            );
            let solids = part_boxes(model, &["source", "channel", "drain"]);
            for r in spawn_many(model, &placement, 300) {
                assert!(solids.iter().any(|b| b.contains_point(r.position)));
            }
        }
    }

    #[test]
    fn test_finfet_top_share() {
        let placement = Placement::for_model(ModelType::FinFet, None, &FlowConfig::default());
        let records = spawn_many(ModelType::FinFet, &placement, 10_000);
        let top = records.iter().filter(|r| r.face == Face::FinTop).count();
        let share = top as f32 / records.len() as f32;
        assert!((share - 0.4).abs() < 0.03, "top share {share}");
    }

    #[test]
    fn test_finfet_faces() {
        let placement = Placement::for_model(ModelType::FinFet, None, &FlowConfig::default());
        let fins = part_boxes(ModelType::FinFet, &["fin"]);
        let half = finfet::FIN_WIDTH / 2.0;

        for r in spawn_many(ModelType::FinFet, &placement, 2000) {
            assert!(r.position.x.abs() <= finfet::HALF_LENGTH);
            let fin = finfet::FIN_CENTERS
                .iter()
                .copied()
                .min_by(|a, b| (r.lateral() - a).abs().total_cmp(&(r.lateral() - b).abs()))
                .unwrap();
            match r.face {
                Face::FinTop => {
                    assert!(r.vertical() > finfet::FIN_CREST);
                    assert!((r.lateral() - fin).abs() <= finfet::TOP_JITTER);
                }
                Face::FinSide => {
                    assert!(r.vertical() > finfet::ISOLATION_TOP);
                    assert!(r.vertical() < finfet::FIN_CREST);
                    assert!((r.lateral() - fin).abs() > half);
                }
                other => panic!("unexpected face {other:?}"),
            }
            assert!(!fins.iter().any(|b| b.contains_point(r.position)));
        }
    }

    #[test]
    fn test_gaafet_levels_and_containment() {
        let placement = Placement::for_model(ModelType::GaaFet, None, &FlowConfig::default());
        let solids = part_boxes(ModelType::GaaFet, &["nanosheet", "source", "drain"]);
        assert_eq!(solids.len(), 11);

        let mut seen = [false; 3];
        for r in spawn_many(ModelType::GaaFet, &placement, 2000) {
            let level = gaafet::SHEET_LEVELS
                .iter()
                .position(|l| (r.vertical() - l).abs() <= gaafet::LEVEL_JITTER)
                .expect("particle between sheet levels");
            seen[level] = true;
            assert_eq!(r.face, Face::SheetInterior);
            assert!(solids.iter().any(|b| b.contains_point(r.position)));
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn test_reversed_anchor_starts_at_source() {
        let anchor = FlowAnchor {
            start: Vec3::new(1.2, 0.0, 0.0),
            end: Vec3::new(-1.2, 0.0, 0.0),
            channel: layout::planar::CHANNEL,
        };
        let placement = Placement::Channel(ChannelSurface::from_anchor(&anchor));
        assert_eq!(placement.range(), (1.2, -1.2));

        let config = FlowConfig::default();
        let mut rng = rng();
        let r = spawn_record(&placement, ModelType::Planar, &config, false, &mut rng);
        assert_eq!(r.position.x, 1.2);
        assert_eq!(r.start(), 1.2);
        assert_eq!(r.direction, -1.0);
        assert_eq!((r.lower, r.upper), (-1.2, 1.2));
        assert!(r.advanced() < r.position.x);

        for r in spawn_many(ModelType::Planar, &placement, 200) {
            assert!(r.in_segment());
            assert_eq!(r.direction, -1.0);
        }
    }

    #[test]
    fn test_snap_to_start() {
        let placement = Placement::for_model(ModelType::GaaFet, None, &FlowConfig::default());
        let config = FlowConfig::default();
        let mut rng = rng();
        let r = spawn_record(&placement, ModelType::GaaFet, &config, false, &mut rng);
        assert_eq!(r.position.x, -gaafet::HALF_LENGTH);
        assert_eq!(r.direction, 1.0);
        assert!(r.velocity >= config.speed_min && r.velocity < config.speed_max);
        assert_eq!(r.respawns, 0);
    }
}
