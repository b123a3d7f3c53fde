//! The particle store and its per-frame simulation.

use super::anchor::{resolve_anchor, FlowAnchor};
use super::config::FlowConfig;
use super::placement::{spawn_record, Placement};
use super::record::ParticleRecord;
use crate::error::Result;
use crate::geometry::SphereGeometry;
use crate::models::ModelType;
use crate::objects::InstancedMesh;
use crate::scene::{Object3D, Scene, SharedObject};
use glam::Mat4;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Name of the scene node carrying the particle batch.
pub const FLOW_NODE_NAME: &str = "electron-flow";

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 0x5eed_f10e;

/// Animated electron stream for one model at a time.
///
/// Records live in the model group's frame; the batched drawable is attached
/// to that group, so the stream turns with the model.
pub struct ParticleFlow {
    config: FlowConfig,
    rng: SmallRng,
    model: Option<ModelType>,
    anchor: Option<FlowAnchor>,
    placement: Option<Placement>,
    records: Vec<ParticleRecord>,
    node: Option<SharedObject>,
}

impl ParticleFlow {
    /// Create an empty flow after validating `config`. Nothing is drawn
    /// until `initialize`.
    pub fn new(config: FlowConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
            model: None,
            anchor: None,
            placement: None,
            records: Vec::new(),
            node: None,
        })
    }

    /// Start configuring a flow.
    pub fn builder() -> FlowBuilder {
        FlowBuilder::new()
    }

    /// Rebuild the stream for `model`.
    ///
    /// Releases the previous batch, resolves the flow anchor from `group` when
    /// the model uses one, spawns every record at a random point on its path and
    /// attaches a new batch under `group` (or the scene root without a group).
    /// Returns the anchor that was resolved.
    pub fn initialize(
        &mut self,
        model: ModelType,
        scene: &Scene,
        group: Option<&SharedObject>,
    ) -> Option<FlowAnchor> {
        self.dispose();

        scene.update_world_matrices();
        let anchor = group.and_then(|g| {
            refresh_world_matrices(g);
            let guard = g.read().ok()?;
            resolve_anchor(model, &guard)
        });

        let placement = Placement::for_model(model, anchor.as_ref(), &self.config);
        let count = self.config.count_for(model);
        self.records = (0..count)
            .map(|_| spawn_record(&placement, model, &self.config, true, &mut self.rng))
            .collect();

        let segments = self.config.particle_segments;
        let geometry =
            SphereGeometry::new(self.config.particle_radius, segments, segments).build();
        let mut mesh = InstancedMesh::new(geometry, self.config.material(), count);
        mesh.render_order = self.config.render_order;
        for (i, record) in self.records.iter().enumerate() {
            mesh.set_translation_at(i, record.position);
        }

        let node = Object3D::with_instanced(FLOW_NODE_NAME, mesh).into_shared();
        match group {
            Some(g) => {
                Object3D::attach(g, Arc::clone(&node));
                refresh_world_matrices(g);
            }
            None => {
                scene.add(Arc::clone(&node));
                scene.update_world_matrices();
            }
        }

        log::info!(
            "Initialized {} flow with {} particles ({})",
            model,
            count,
            if anchor.is_some() { "anchored" } else { "layout" }
        );

        self.model = Some(model);
        self.anchor = anchor;
        self.placement = Some(placement);
        self.node = Some(node);
        anchor
    }

    /// Respawn one particle. With `randomize` it lands anywhere on its path,
    /// otherwise at the path start. Out-of-range indices are ignored.
    pub fn regenerate_one(&mut self, index: usize, randomize: bool) {
        if self.respawn(index, randomize) {
            let position = self.records[index].position;
            self.with_batch(|batch| batch.set_translation_at(index, position));
        }
    }

    fn respawn(&mut self, index: usize, randomize: bool) -> bool {
        let (Some(placement), Some(model)) = (self.placement.as_ref(), self.model) else {
            return false;
        };
        let Some(slot) = self.records.get_mut(index) else {
            return false;
        };
        let respawns = slot.respawns + 1;
        *slot = spawn_record(placement, model, &self.config, randomize, &mut self.rng);
        slot.respawns = respawns;
        true
    }

    /// Advance every particle one frame and refresh the batch's matrices.
    pub fn update(&mut self) {
        if self.placement.is_none() {
            return;
        }

        for i in 0..self.records.len() {
            let record = self.records[i];
            let x = record.advanced();
            if record.is_past_end(x) {
                self.respawn(i, false);
            } else {
                self.records[i].position.x = x;
            }
        }

        self.with_batch(|batch| {
            for (i, record) in self.records.iter().enumerate() {
                batch.set_translation_at(i, record.position);
            }
        });
    }

    /// Detach and release the batch and drop all records.
    pub fn dispose(&mut self) {
        if let Some(node) = self.node.take() {
            Object3D::detach(&node);
            if let Ok(mut node) = node.write() {
                if let Some(drawable) = node.drawable_mut() {
                    drawable.dispose();
                }
            }
            log::debug!("Disposed particle batch");
        }
        self.records.clear();
        self.placement = None;
        self.anchor = None;
        self.model = None;
    }

    fn with_batch(&self, f: impl FnOnce(&mut InstancedMesh)) {
        if let Some(node) = &self.node {
            if let Ok(mut node) = node.write() {
                if let Some(batch) = node.drawable_mut().and_then(|d| d.as_instanced_mut()) {
                    f(batch);
                }
            }
        }
    }

    /// Current model, once initialized.
    #[inline]
    pub fn model(&self) -> Option<ModelType> {
        self.model
    }

    /// Anchor resolved by the last `initialize`.
    #[inline]
    pub fn anchor(&self) -> Option<&FlowAnchor> {
        self.anchor.as_ref()
    }

    /// Active placement rule.
    #[inline]
    pub fn placement(&self) -> Option<&Placement> {
        self.placement.as_ref()
    }

    /// All particle records.
    #[inline]
    pub fn records(&self) -> &[ParticleRecord] {
        &self.records
    }

    /// Number of particles.
    #[inline]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Configuration.
    #[inline]
    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Scene node carrying the batch.
    #[inline]
    pub fn node(&self) -> Option<&SharedObject> {
        self.node.as_ref()
    }

    /// World matrix of every particle, using the last world matrix refresh.
    pub fn world_matrices(&self) -> Vec<Mat4> {
        let Some(node) = &self.node else {
            return Vec::new();
        };
        let Ok(node) = node.read() else {
            return Vec::new();
        };
        let world = *node.world_matrix();
        node.drawable()
            .and_then(|d| d.as_instanced())
            .map(|batch| {
                (0..batch.count())
                    .filter_map(|i| batch.matrix_at(i))
                    .map(|m| world * m)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Drop for ParticleFlow {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Refresh `group`'s subtree against its parent's current world matrix.
fn refresh_world_matrices(group: &SharedObject) {
    let parent = group.read().ok().and_then(|g| g.parent());
    let parent_world = match &parent {
        Some(p) => p.read().ok().map(|p| *p.world_matrix()),
        None => None,
    };
    if let Ok(mut g) = group.write() {
        g.update_world_matrix(parent_world.as_ref());
    }
}

/// Builder for a validated [`ParticleFlow`].
#[derive(Debug, Clone)]
pub struct FlowBuilder {
    config: FlowConfig,
    seed: u64,
}

impl Default for FlowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: FlowConfig::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: FlowConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set both particle counts.
    pub fn counts(mut self, base: usize, nanosheet: usize) -> Self {
        self.config.base_count = base;
        self.config.nanosheet_count = nanosheet;
        self
    }

    /// Set the per-frame speed range.
    pub fn speed(mut self, min: f32, max: f32) -> Self {
        self.config.speed_min = min;
        self.config.speed_max = max;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<ParticleFlow> {
        ParticleFlow::new(self.config, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetError;
    use crate::models::build_model;
    use crate::particles::Face;
    use glam::Vec3;

    fn setup(model: ModelType) -> (Scene, SharedObject, ParticleFlow) {
        let scene = Scene::new();
        let group = build_model(model);
        scene.add(Arc::clone(&group));
        let flow = ParticleFlow::builder().seed(42).build().unwrap();
        (scene, group, flow)
    }

    #[test]
    fn test_update_before_initialize_is_noop() {
        let mut flow = ParticleFlow::builder().build().unwrap();
        flow.update();
        flow.regenerate_one(0, true);
        assert_eq!(flow.count(), 0);
        assert!(flow.world_matrices().is_empty());
    }

    #[test]
    fn test_builder_validates() {
        let err = ParticleFlow::builder().speed(0.02, 0.01).build();
        assert!(matches!(err, Err(FetError::InvalidConfig(_))));
        assert!(ParticleFlow::builder().counts(0, 10).build().is_err());
    }

    #[test]
    fn test_planar_initialize() {
        let (scene, group, mut flow) = setup(ModelType::Planar);
        let anchor = flow.initialize(ModelType::Planar, &scene, Some(&group)).unwrap();

        assert_eq!(flow.count(), 100);
        assert_eq!(flow.anchor(), Some(&anchor));
        for r in flow.records() {
            assert!(r.position.x >= anchor.start.x && r.position.x <= anchor.end.x);
            assert!(anchor.channel.contains_point(Vec3::new(0.0, r.vertical(), r.lateral())));
            assert_eq!(r.model, ModelType::Planar);
        }

        let node = flow.node().unwrap();
        let parent = node.read().unwrap().parent().unwrap();
        assert!(Arc::ptr_eq(&parent, &group));
    }

    #[test]
    fn test_counts_per_model() {
        for (model, expected) in [
            (ModelType::Soi, 100),
            (ModelType::FinFet, 100),
            (ModelType::GaaFet, 150),
        ] {
            let (scene, group, mut flow) = setup(model);
            flow.initialize(model, &scene, Some(&group));
            assert_eq!(flow.count(), expected);
            assert_eq!(scene.count_instanced(), 1);
        }
    }

    #[test]
    fn test_update_keeps_segment_bounds() {
        for model in ModelType::ALL {
            let (scene, group, mut flow) = setup(model);
            flow.initialize(model, &scene, Some(&group));
            for _ in 0..300 {
                flow.update();
                assert!(flow.records().iter().all(|r| r.in_segment()));
            }
        }
    }

    #[test]
    fn test_update_respawns_stay_in_channel_band() {
        for model in [ModelType::Planar, ModelType::Soi] {
            let (scene, group, mut flow) = setup(model);
            flow.initialize(model, &scene, Some(&group));
            let Some(Placement::Channel(rule)) = flow.placement().copied() else {
                panic!("{model} must use the channel rule");
            };
            let (z_lo, z_hi) = rule.depth_range();
            let (center, thickness) = rule.band();

            for _ in 0..400 {
                flow.update();
                for r in flow.records().iter().filter(|r| r.respawns > 0) {
                    assert!(r.lateral() >= z_lo && r.lateral() < z_hi);
                    assert!((r.vertical() - center).abs() <= thickness / 2.0 + 1e-6);
                    assert_eq!(r.face, Face::ChannelSurface);
                }
            }
            assert!(flow.records().iter().any(|r| r.respawns > 0));
        }
    }

    #[test]
    fn test_unvalidated_config_is_rejected() {
        let config = FlowConfig {
            speed_min: -0.02,
            speed_max: -0.01,
            ..Default::default()
        };
        assert!(matches!(
            ParticleFlow::new(config, 1),
            Err(FetError::InvalidConfig(_))
        ));
        let config = FlowConfig {
            speed_max: f32::INFINITY,
            ..Default::default()
        };
        assert!(ParticleFlow::new(config, 1).is_err());
    }

    #[test]
    fn test_source_at_positive_x_flows_toward_negative_x() {
        let (scene, group, mut flow) = setup(ModelType::Planar);
        {
            let g = group.read().unwrap();
            let source = g.get_object_by_name("source").unwrap();
            let drain = g.get_object_by_name("drain").unwrap();
            let source_at = source.read().unwrap().position();
            let drain_at = drain.read().unwrap().position();
            source.write().unwrap().set_position(drain_at);
            drain.write().unwrap().set_position(source_at);
        }

        let anchor = flow.initialize(ModelType::Planar, &scene, Some(&group)).unwrap();
        assert!(anchor.start.x > anchor.end.x);
        assert!(flow.records().iter().all(|r| r.direction == -1.0));

        let before: Vec<f32> = flow.records().iter().map(|r| r.position.x).collect();
        flow.update();
        for (r, x) in flow.records().iter().zip(before) {
            if r.respawns == 0 {
                assert!(r.position.x < x);
            }
        }

        for _ in 0..1000 {
            flow.update();
            assert!(flow.records().iter().all(|r| r.in_segment()));
        }
        assert!(flow.records().iter().all(|r| r.respawns >= 1));

        flow.regenerate_one(0, false);
        assert!((flow.records()[0].position.x - anchor.start.x).abs() < 1e-6);
    }

    #[test]
    fn test_every_particle_respawns() {
        let (scene, group, mut flow) = setup(ModelType::Planar);
        flow.initialize(ModelType::Planar, &scene, Some(&group));
        for _ in 0..1000 {
            flow.update();
        }
        assert!(flow.records().iter().all(|r| r.respawns >= 1));
    }

    #[test]
    fn test_respawn_lands_at_start_inside_channel() {
        let (scene, group, mut flow) = setup(ModelType::Soi);
        let anchor = flow.initialize(ModelType::Soi, &scene, Some(&group)).unwrap();
        let margin = anchor.channel.size().z * 0.05;

        flow.regenerate_one(3, false);
        let r = flow.records()[3];
        assert_eq!(r.position.x, r.start());
        assert_eq!(r.respawns, 1);
        assert!(r.lateral() >= anchor.channel.min.z + margin);
        assert!(r.lateral() < anchor.channel.max.z - margin);

        flow.regenerate_one(10_000, false);
        assert_eq!(flow.count(), 100);
    }

    #[test]
    fn test_batch_matrices_follow_records() {
        let (scene, group, mut flow) = setup(ModelType::GaaFet);
        flow.initialize(ModelType::GaaFet, &scene, Some(&group));
        flow.update();

        let node = flow.node().unwrap().read().unwrap();
        let batch = node.drawable().unwrap().as_instanced().unwrap();
        for (i, r) in flow.records().iter().enumerate() {
            assert_eq!(batch.instances()[i].translation(), r.position);
        }
    }

    #[test]
    fn test_switch_retags_all_records() {
        let (scene, group, mut flow) = setup(ModelType::Planar);
        flow.initialize(ModelType::Planar, &scene, Some(&group));
        scene.remove(&group);

        let finfet = build_model(ModelType::FinFet);
        scene.add(Arc::clone(&finfet));
        assert!(flow.initialize(ModelType::FinFet, &scene, Some(&finfet)).is_none());

        assert_eq!(flow.count(), 100);
        for r in flow.records() {
            assert_eq!(r.model, ModelType::FinFet);
            assert!(matches!(r.face, Face::FinTop | Face::FinSide));
            assert_eq!(r.respawns, 0);
        }
    }

    #[test]
    fn test_double_initialize_leaves_one_batch() {
        let (scene, group, mut flow) = setup(ModelType::Planar);
        flow.initialize(ModelType::Planar, &scene, Some(&group));
        let first = Arc::clone(flow.node().unwrap());
        flow.initialize(ModelType::Planar, &scene, Some(&group));

        assert_eq!(scene.count_instanced(), 1);
        let first = first.read().unwrap();
        assert!(first.parent().is_none());
        assert!(first.drawable().unwrap().as_instanced().unwrap().is_disposed());
    }

    #[test]
    fn test_without_group_attaches_to_root() {
        let scene = Scene::new();
        let mut flow = ParticleFlow::builder().build().unwrap();
        assert!(flow.initialize(ModelType::Planar, &scene, None).is_none());

        assert_eq!(scene.children_count(), 1);
        assert!(matches!(flow.placement(), Some(Placement::Channel(_))));
        assert!(flow
            .records()
            .iter()
            .all(|r| r.position.x.abs() <= crate::models::layout::FALLBACK_HALF_RANGE));
    }

    #[test]
    fn test_missing_parts_fall_back() {
        let (scene, group, mut flow) = setup(ModelType::Planar);
        let channel = group.read().unwrap().get_object_by_name("channel").unwrap();
        Object3D::detach(&channel);

        assert!(flow.initialize(ModelType::Planar, &scene, Some(&group)).is_none());
        assert_eq!(flow.count(), 100);
        flow.update();
        assert!(flow.records().iter().all(|r| r.in_segment()));
    }

    #[test]
    fn test_world_matrices_follow_group_rotation() {
        let (scene, group, mut flow) = setup(ModelType::FinFet);
        flow.initialize(ModelType::FinFet, &scene, Some(&group));
        group.write().unwrap().rotate_y(std::f32::consts::FRAC_PI_2);
        scene.update_world_matrices();

        let world = flow.world_matrices();
        assert_eq!(world.len(), flow.count());
        let r = flow.records()[0];
        let p = world[0].transform_point3(Vec3::ZERO);
        // A quarter turn about Y maps (x, y, z) to (z, y, -x)
        assert!(p.abs_diff_eq(Vec3::new(r.position.z, r.position.y, -r.position.x), 1e-4));
    }

    #[test]
    fn test_dispose_detaches() {
        let (scene, group, mut flow) = setup(ModelType::GaaFet);
        flow.initialize(ModelType::GaaFet, &scene, Some(&group));
        flow.dispose();
        assert_eq!(scene.count_instanced(), 0);
        assert_eq!(flow.count(), 0);
        assert!(flow.model().is_none());
    }

    #[test]
    fn test_same_seed_same_stream() {
        let run = || {
            let (scene, group, mut flow) = setup(ModelType::FinFet);
            flow.initialize(ModelType::FinFet, &scene, Some(&group));
            flow.update();
            flow.records().to_vec()
        };
        assert_eq!(run(), run());
    }
}
