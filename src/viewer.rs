//! The interactive viewer: scene, camera, controls, the active model and its
//! particle stream, driven one frame at a time.

use crate::camera::PerspectiveCamera;
use crate::controls::OrbitControls;
use crate::error::{FetError, Result};
use crate::math::Color;
use crate::models::{build_model, Language, ModelInfo, ModelType};
use crate::particles::{FlowAnchor, FlowConfig, ParticleFlow, DEFAULT_SEED};
use crate::scene::{RenderList, Scene, SharedObject};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Initial camera position.
    pub camera_position: Vec3,
    /// Orbit control settings.
    pub controls: OrbitControls,
    /// Model spin about Y, in radians per frame.
    pub rotation_speed: f32,
    /// Background and fog color.
    pub background: Color,
    /// Exponential fog density.
    pub fog_density: f32,
    /// Particle stream settings.
    pub flow: FlowConfig,
    /// Particle RNG seed.
    pub seed: Option<u64>,
    /// Model shown first.
    pub initial_model: ModelType,
    /// Language of the model descriptions.
    pub language: Language,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 1000.0,
            camera_position: Vec3::new(5.0, 4.0, 8.0),
            controls: OrbitControls::default(),
            rotation_speed: 0.002,
            background: Color::from_hex(0x050505),
            fog_density: 0.02,
            flow: FlowConfig::default(),
            seed: None,
            initial_model: ModelType::Planar,
            language: Language::Zh,
        }
    }
}

impl ViewerConfig {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| FetError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize settings to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| FetError::InvalidConfig(e.to_string()))
    }

    /// Check camera, control and flow settings.
    pub fn validate(&self) -> Result<()> {
        self.flow.validate()?;
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(FetError::InvalidConfig(format!(
                "fov {} must be within (0, 180)",
                self.fov
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(FetError::InvalidConfig(format!(
                "clip planes {}..{} must be positive and increasing",
                self.near, self.far
            )));
        }
        let c = &self.controls;
        if !(c.min_distance > 0.0 && c.min_distance <= c.max_distance) {
            return Err(FetError::InvalidConfig(format!(
                "orbit distance {}..{} must be positive and ordered",
                c.min_distance, c.max_distance
            )));
        }
        if self.fog_density < 0.0 {
            return Err(FetError::InvalidConfig("fog_density must not be negative".into()));
        }
        Ok(())
    }
}

/// Owns everything needed to animate one transistor model at a time.
pub struct Viewer {
    config: ViewerConfig,
    scene: Scene,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    flow: ParticleFlow,
    model: ModelType,
    group: Option<SharedObject>,
    language: Language,
    frame: u64,
    revision: u32,
}

impl Viewer {
    /// Build the scene and show `config.initial_model`.
    pub fn new(config: ViewerConfig, width: u32, height: u32) -> Result<Self> {
        config.validate()?;

        let mut scene = Scene::new();
        scene.set_background_color(config.background);
        scene.set_exponential_fog(config.background, config.fog_density);

        let mut camera = PerspectiveCamera::new(config.fov, 1.0, config.near, config.far);
        camera.set_position(config.camera_position);
        camera.look_at(config.controls.target);
        if height > 0 {
            camera.set_aspect(width as f32 / height as f32);
        }

        let flow = ParticleFlow::builder()
            .config(config.flow.clone())
            .seed(config.seed.unwrap_or(DEFAULT_SEED))
            .build()?;

        let mut viewer = Self {
            controls: config.controls.clone(),
            language: config.language,
            model: config.initial_model,
            config,
            scene,
            camera,
            flow,
            group: None,
            frame: 0,
            revision: 0,
        };
        viewer.switch_model(viewer.model);
        Ok(viewer)
    }

    /// Tear down the current model and show `model`.
    pub fn switch_model(&mut self, model: ModelType) -> Option<FlowAnchor> {
        self.flow.dispose();
        if let Some(old) = self.group.take() {
            self.scene.remove(&old);
            if let Ok(mut old) = old.write() {
                old.dispose_subtree();
            }
        }

        let group = build_model(model);
        self.scene.add(group.clone());
        let anchor = self.flow.initialize(model, &self.scene, Some(&group));

        log::info!("Switched to {} model", model);
        self.model = model;
        self.group = Some(group);
        self.revision = self.revision.wrapping_add(1);
        anchor
    }

    /// Parse a model name and switch to it.
    pub fn switch_model_by_name(&mut self, name: &str) -> Result<ModelType> {
        let model: ModelType = name.parse()?;
        self.switch_model(model);
        Ok(model)
    }

    /// Advance one frame: controls, model spin, world matrices, particles.
    pub fn tick(&mut self) {
        self.controls.update(&mut self.camera);
        if let Some(group) = &self.group {
            if let Ok(mut group) = group.write() {
                group.rotate_y(self.config.rotation_speed);
            }
        }
        self.scene.update_world_matrices();
        self.flow.update();
        self.frame += 1;
    }

    /// Match the camera to a new viewport size. Zero height is ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.camera.set_aspect(width as f32 / height as f32);
        }
    }

    /// Active model.
    #[inline]
    pub fn model(&self) -> ModelType {
        self.model
    }

    /// Display text for the active model.
    pub fn info(&self) -> ModelInfo {
        self.model.info(self.language)
    }

    /// Description language.
    #[inline]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Change the description language.
    #[inline]
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Get the scene.
    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Group of the active model.
    #[inline]
    pub fn group(&self) -> Option<&SharedObject> {
        self.group.as_ref()
    }

    /// Get the camera.
    #[inline]
    pub fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }

    /// Get the controls and the camera they drive, for pointer input.
    pub fn controls_mut(&mut self) -> (&mut OrbitControls, &PerspectiveCamera) {
        (&mut self.controls, &self.camera)
    }

    /// Get the particle stream.
    #[inline]
    pub fn flow(&self) -> &ParticleFlow {
        &self.flow
    }

    /// Frames advanced so far.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&mut self) -> Mat4 {
        *self.camera.view_projection_matrix()
    }

    /// Bumped on every model switch; a renderer holding a [`RenderList`]
    /// should collect a new one when this changes.
    #[inline]
    pub fn scene_revision(&self) -> u32 {
        self.revision
    }

    /// Visible drawables in draw order.
    pub fn render_list(&self) -> RenderList {
        RenderList::collect(&self.scene)
    }

    /// World matrix of every particle.
    pub fn particle_matrices(&self) -> Vec<Mat4> {
        self.flow.world_matrices()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Fog;
    use std::sync::Arc;

    fn viewer() -> Viewer {
        let config = ViewerConfig {
            seed: Some(1),
            ..Default::default()
        };
        Viewer::new(config, 1600, 900).unwrap()
    }

    #[test]
    fn test_new_shows_initial_model() {
        let v = viewer();
        assert_eq!(v.model(), ModelType::Planar);
        assert_eq!(v.scene().children_count(), 1);
        assert_eq!(v.scene().count_instanced(), 1);
        assert_eq!(v.flow().count(), 100);
        assert!(v.flow().anchor().is_some());
        assert!(matches!(v.scene().fog(), Fog::Exponential { .. }));
        assert_eq!(v.camera().aspect, 1600.0 / 900.0);
    }

    #[test]
    fn test_config_from_json() {
        let config = ViewerConfig::from_json(
            r#"{ "initial_model": "finfet", "language": "en", "seed": 7, "flow": { "base_count": 40 } }"#,
        )
        .unwrap();
        assert_eq!(config.initial_model, ModelType::FinFet);
        assert_eq!(config.language, Language::En);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.flow.base_count, 40);
        assert_eq!(config.flow.nanosheet_count, 150);
        assert_eq!(config.fov, 45.0);

        let back = ViewerConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back.initial_model, ModelType::FinFet);
        assert_eq!(back.flow, config.flow);
    }

    #[test]
    fn test_config_json_errors() {
        assert!(matches!(
            ViewerConfig::from_json("{ not json"),
            Err(FetError::InvalidConfig(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "initial_model": "bjt" }"#),
            Err(FetError::InvalidConfig(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json(r#"{ "fov": 0.0 }"#),
            Err(FetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ViewerConfig {
            near: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            Viewer::new(config, 100, 100),
            Err(FetError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_switching_keeps_one_model_and_one_batch() {
        let mut v = viewer();
        for model in [
            ModelType::Soi,
            ModelType::FinFet,
            ModelType::GaaFet,
            ModelType::GaaFet,
            ModelType::Planar,
        ] {
            v.switch_model(model);
            assert_eq!(v.scene().children_count(), 1);
            assert_eq!(v.scene().count_instanced(), 1);
            assert!(v.flow().records().iter().all(|r| r.model == model));
        }
    }

    #[test]
    fn test_switch_by_name() {
        let mut v = viewer();
        assert_eq!(v.switch_model_by_name("GAAFET").unwrap(), ModelType::GaaFet);
        assert_eq!(v.flow().count(), 150);
        assert!(v.switch_model_by_name("tfet").is_err());
        assert_eq!(v.model(), ModelType::GaaFet);
    }

    #[test]
    fn test_old_group_released() {
        let mut v = viewer();
        let old = Arc::clone(v.group().unwrap());
        v.switch_model(ModelType::FinFet);
        assert!(old.read().unwrap().parent().is_none());
        assert!(old.read().unwrap().get_object_by_name("electron-flow").is_none());
        assert!(old.read().unwrap().world_bounding_box().is_empty());
    }

    #[test]
    fn test_tick_spins_model_and_moves_particles() {
        let mut v = viewer();
        let before = v.flow().records().to_vec();
        for _ in 0..10 {
            v.tick();
        }
        assert_eq!(v.frame_count(), 10);

        let group = v.group().unwrap().read().unwrap();
        let (_, angle) = group.transform().quaternion.to_axis_angle();
        assert!((angle - 0.02).abs() < 1e-4);

        let moved = v
            .flow()
            .records()
            .iter()
            .zip(&before)
            .any(|(now, then)| now.position.x != then.position.x);
        assert!(moved);
        assert!(v.flow().records().iter().all(|r| r.in_segment()));
    }

    #[test]
    fn test_particles_follow_spin() {
        let mut v = viewer();
        v.tick();
        let group_world = *v.group().unwrap().read().unwrap().world_matrix();
        let r = v.flow().records()[0];
        let p = v.particle_matrices()[0].transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(group_world.transform_point3(r.position), 1e-5));
    }

    #[test]
    fn test_info_language() {
        let mut v = viewer();
        assert_eq!(v.info().subtitle, "平面场效应晶体管");
        v.set_language(Language::En);
        assert_eq!(v.info().title, "Planar MOSFET");
    }

    #[test]
    fn test_render_list_tracks_switches() {
        let mut v = viewer();
        let first = v.scene_revision();
        let planar = v.render_list();
        assert!(planar.items().iter().any(|i| i.name() == "channel"));
        assert_eq!(planar.items().iter().filter(|i| i.is_instanced()).count(), 1);

        v.switch_model(ModelType::GaaFet);
        assert_ne!(v.scene_revision(), first);
        let gaafet = v.render_list();
        assert_eq!(gaafet.items().iter().filter(|i| i.name() == "nanosheet").count(), 9);
        assert!(gaafet.items().iter().all(|i| i.name() != "channel"));

        assert!(gaafet.items().iter().all(|i| !i.vertices().is_empty()));
    }

    #[test]
    fn test_resize() {
        let mut v = viewer();
        v.resize(800, 800);
        assert_eq!(v.camera().aspect, 1.0);
        v.resize(800, 0);
        assert_eq!(v.camera().aspect, 1.0);
        let vp = v.view_projection();
        assert!(vp.is_finite());
    }
}
