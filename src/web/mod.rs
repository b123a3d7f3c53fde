//! Web bindings for the transistor viewer.
//!
//! Exposes the viewer to JavaScript via wasm-bindgen. The page owns the
//! canvas and the draw calls; this side owns the scene and the particle
//! stream and hands back matrices each frame.

use wasm_bindgen::prelude::*;
use web_sys::{window, UrlSearchParams};

use crate::material::BlendMode;
use crate::models::{Language, ModelType};
use crate::scene::{Background, Fog, RenderItem, RenderList};
use crate::viewer::{Viewer, ViewerConfig};

/// The viewer handle exported to JavaScript.
///
/// Drawing goes through the mesh list. It is refreshed on `switch_model`;
/// when `scene_revision` changes, upload each mesh's vertices and indices once,
/// then read `mesh_matrix` (and `mesh_instances` for the particle batch)
/// every frame.
#[wasm_bindgen]
pub struct FetViewer {
    viewer: Viewer,
    meshes: RenderList,
}

#[wasm_bindgen]
impl FetViewer {
    /// Create a viewer for a `width` x `height` viewport. The first model
    /// comes from the page's `?type=N` parameter and the text language from
    /// the browser.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> Result<FetViewer, JsValue> {
        let language = window()
            .and_then(|w| w.navigator().language())
            .and_then(|tag| tag.parse::<Language>().ok())
            .unwrap_or_default();
        let config = ViewerConfig {
            language,
            ..Default::default()
        };
        Self::start(config, width, height)
    }

    /// Create a viewer from JSON settings. The page's `?type=N` parameter
    /// still picks the first model when present, and a random seed is drawn
    /// when the settings carry none.
    #[wasm_bindgen]
    pub fn with_config(json: &str, width: u32, height: u32) -> Result<FetViewer, JsValue> {
        let config = ViewerConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Self::start(config, width, height)
    }

    /// Switch to a model by name (`planar`, `soi`, `finfet`, `gaafet`).
    #[wasm_bindgen]
    pub fn switch_model(&mut self, name: &str) -> Result<(), JsValue> {
        self.viewer
            .switch_model_by_name(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.meshes = self.viewer.render_list();
        Ok(())
    }

    /// Name of the active model.
    #[wasm_bindgen]
    pub fn model(&self) -> String {
        self.viewer.model().to_string()
    }

    /// Advance one frame.
    #[wasm_bindgen]
    pub fn frame(&mut self) {
        self.viewer.tick();
    }

    /// Current frame number.
    #[wasm_bindgen]
    pub fn frame_number(&self) -> u64 {
        self.viewer.frame_count()
    }

    /// Handle pointer drag for rotation, in pixels.
    #[wasm_bindgen]
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        let (controls, _) = self.viewer.controls_mut();
        controls.rotate_by_pixels(delta_x, delta_y);
    }

    /// Handle pointer drag for panning, in pixels.
    #[wasm_bindgen]
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let (controls, camera) = self.viewer.controls_mut();
        controls.pan(delta_x, delta_y, camera);
    }

    /// Handle mouse wheel for zoom.
    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        let (controls, _) = self.viewer.controls_mut();
        controls.zoom_by_wheel(delta);
    }

    /// Resize the viewport.
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewer.resize(width, height);
    }

    /// Number of particles.
    #[wasm_bindgen]
    pub fn particle_count(&self) -> u32 {
        self.viewer.flow().count() as u32
    }

    /// World matrix of every particle, 16 column-major floats each.
    #[wasm_bindgen]
    pub fn particle_matrices(&self) -> Vec<f32> {
        self.viewer
            .particle_matrices()
            .iter()
            .flat_map(|m| m.to_cols_array())
            .collect()
    }

    /// Combined view-projection matrix, column-major.
    #[wasm_bindgen]
    pub fn view_projection(&mut self) -> Vec<f32> {
        self.viewer.view_projection().to_cols_array().to_vec()
    }

    /// Set the text language from a tag such as `en` or `zh-CN`.
    #[wasm_bindgen]
    pub fn set_language(&mut self, tag: &str) {
        if let Ok(language) = tag.parse() {
            self.viewer.set_language(language);
        }
    }

    /// Changes whenever the model is switched.
    #[wasm_bindgen]
    pub fn scene_revision(&self) -> u32 {
        self.viewer.scene_revision()
    }

    /// Re-collect the visible meshes in draw order. Returns how many.
    #[wasm_bindgen]
    pub fn refresh_meshes(&mut self) -> u32 {
        self.meshes = self.viewer.render_list();
        self.meshes.len() as u32
    }

    /// Number of meshes from the last `refresh_meshes`.
    #[wasm_bindgen]
    pub fn mesh_count(&self) -> u32 {
        self.meshes.len() as u32
    }

    /// Name of a mesh.
    #[wasm_bindgen]
    pub fn mesh_name(&self, index: u32) -> String {
        self.mesh(index).map(|m| m.name().to_string()).unwrap_or_default()
    }

    /// Interleaved vertex floats (position, normal, uv) of a mesh.
    #[wasm_bindgen]
    pub fn mesh_vertices(&self, index: u32) -> Vec<f32> {
        self.mesh(index).map(|m| m.vertices().to_vec()).unwrap_or_default()
    }

    /// Triangle indices of a mesh.
    #[wasm_bindgen]
    pub fn mesh_indices(&self, index: u32) -> Vec<u32> {
        self.mesh(index).map(|m| m.indices().to_vec()).unwrap_or_default()
    }

    /// Current world matrix of a mesh, column-major.
    #[wasm_bindgen]
    pub fn mesh_matrix(&self, index: u32) -> Vec<f32> {
        self.mesh(index)
            .and_then(|m| m.world_matrix())
            .map(|m| m.to_cols_array().to_vec())
            .unwrap_or_default()
    }

    /// RGBA color of a mesh, alpha applied for transparent materials.
    #[wasm_bindgen]
    pub fn mesh_color(&self, index: u32) -> Vec<f32> {
        self.mesh(index)
            .map(|m| m.material().rgba().to_vec())
            .unwrap_or_default()
    }

    /// Metalness and roughness of a mesh.
    #[wasm_bindgen]
    pub fn mesh_surface(&self, index: u32) -> Vec<f32> {
        self.mesh(index)
            .map(|m| vec![m.material().metalness, m.material().roughness])
            .unwrap_or_default()
    }

    /// Whether a mesh is alpha blended.
    #[wasm_bindgen]
    pub fn mesh_transparent(&self, index: u32) -> bool {
        self.mesh(index).is_some_and(|m| m.material().transparent)
    }

    /// Whether a mesh blends additively.
    #[wasm_bindgen]
    pub fn mesh_additive(&self, index: u32) -> bool {
        self.mesh(index)
            .is_some_and(|m| m.material().blend == BlendMode::Additive)
    }

    /// Whether a mesh writes depth.
    #[wasm_bindgen]
    pub fn mesh_depth_write(&self, index: u32) -> bool {
        self.mesh(index).is_some_and(|m| m.material().depth_write)
    }

    /// Whether a mesh is the instanced particle batch.
    #[wasm_bindgen]
    pub fn mesh_instanced(&self, index: u32) -> bool {
        self.mesh(index).is_some_and(|m| m.is_instanced())
    }

    /// Per-instance floats of the particle batch: sixteen matrix entries
    /// relative to `mesh_matrix`, then RGBA. Empty for plain meshes.
    #[wasm_bindgen]
    pub fn mesh_instances(&self, index: u32) -> Vec<f32> {
        self.mesh(index).map(|m| m.instance_floats()).unwrap_or_default()
    }

    /// Clear color as RGB, or empty when there is no background.
    #[wasm_bindgen]
    pub fn background(&self) -> Vec<f32> {
        match self.viewer.scene().background() {
            Background::Color(c) => vec![c.r, c.g, c.b],
            Background::None => Vec::new(),
        }
    }

    /// Exponential fog as RGB plus density, or empty without fog.
    #[wasm_bindgen]
    pub fn fog(&self) -> Vec<f32> {
        match self.viewer.scene().fog() {
            Fog::Exponential { color, density } => vec![color.r, color.g, color.b, *density],
            Fog::None => Vec::new(),
        }
    }

    /// Title of the active model.
    #[wasm_bindgen]
    pub fn title(&self) -> String {
        self.viewer.info().title.to_string()
    }

    /// Full name of the active model.
    #[wasm_bindgen]
    pub fn subtitle(&self) -> String {
        self.viewer.info().subtitle.to_string()
    }

    /// Description of the active model.
    #[wasm_bindgen]
    pub fn description(&self) -> String {
        self.viewer.info().description.to_string()
    }
}

impl FetViewer {
    fn start(mut config: ViewerConfig, width: u32, height: u32) -> Result<FetViewer, JsValue> {
        let window = window().ok_or_else(|| JsValue::from_str("No window object"))?;

        let search = window.location().search().unwrap_or_default();
        if let Some(index) = UrlSearchParams::new_with_str(&search)
            .ok()
            .and_then(|params| params.get("type"))
        {
            config.initial_model = ModelType::from_query_index(&index);
        }

        if config.seed.is_none() {
            config.seed = Some(random_seed());
        }

        let initial_model = config.initial_model;
        let viewer = Viewer::new(config, width, height)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Viewer ready with {} model", initial_model);
        let meshes = viewer.render_list();
        Ok(FetViewer { viewer, meshes })
    }

    fn mesh(&self, index: u32) -> Option<&RenderItem> {
        self.meshes.get(index as usize)
    }
}

fn random_seed() -> u64 {
    let high = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let low = (js_sys::Math::random() * u32::MAX as f64) as u64;
    (high << 32) | low
}
