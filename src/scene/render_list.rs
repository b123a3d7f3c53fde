//! Flattened draw list handed to whatever surface renders the scene.

use super::{Drawable, Scene, SharedObject};
use crate::material::Material;
use glam::Mat4;
use std::sync::Arc;

/// One visible drawable with a copy of its geometry.
///
/// Geometry and material are captured once; the world matrix and instance
/// data are read from the live node so a renderer can keep the item across
/// frames.
pub struct RenderItem {
    node: SharedObject,
    name: String,
    instanced: bool,
    vertices: Vec<f32>,
    indices: Vec<u32>,
    material: Material,
    render_order: i32,
}

impl RenderItem {
    /// Name of the node.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the instanced particle batch.
    #[inline]
    pub fn is_instanced(&self) -> bool {
        self.instanced
    }

    /// Interleaved vertex floats: position, normal, uv.
    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Triangle indices.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Surface parameters.
    #[inline]
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Draw order within its pass.
    #[inline]
    pub fn render_order(&self) -> i32 {
        self.render_order
    }

    /// Current world matrix of the node.
    pub fn world_matrix(&self) -> Option<Mat4> {
        self.node.read().ok().map(|node| *node.world_matrix())
    }

    /// Current per-instance floats of a batch, relative to `world_matrix`.
    /// Empty for plain meshes.
    pub fn instance_floats(&self) -> Vec<f32> {
        let Ok(node) = self.node.read() else {
            return Vec::new();
        };
        node.drawable()
            .and_then(|d| d.as_instanced())
            .map(|batch| batch.instance_floats().to_vec())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for RenderItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderItem")
            .field("name", &self.name)
            .field("instanced", &self.instanced)
            .field("triangles", &(self.indices.len() / 3))
            .field("render_order", &self.render_order)
            .finish()
    }
}

/// Visible drawables in draw order: opaque first, then transparent, each
/// pass sorted by render order.
#[derive(Debug, Default)]
pub struct RenderList {
    items: Vec<RenderItem>,
}

impl RenderList {
    /// Walk `scene` and capture every visible drawable. A hidden node hides
    /// its whole subtree; disposed geometry is skipped.
    pub fn collect(scene: &Scene) -> Self {
        let mut items = Vec::new();
        collect_visible(scene.root(), &mut items);
        items.sort_by_key(|item| (item.material.transparent, item.render_order));
        Self { items }
    }

    /// All items in draw order.
    #[inline]
    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    /// Item at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&RenderItem> {
        self.items.get(index)
    }

    /// Number of items, one draw call each.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is visible.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items drawn in the opaque pass.
    pub fn opaque_count(&self) -> usize {
        self.items.iter().filter(|i| !i.material.transparent).count()
    }

    /// Triangles per frame, counting every instance of a batch.
    pub fn triangle_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| {
                let copies = if item.instanced {
                    item.instance_floats().len() / crate::objects::InstanceData::FLOATS
                } else {
                    1
                };
                item.indices.len() / 3 * copies
            })
            .sum()
    }
}

fn collect_visible(node: &SharedObject, items: &mut Vec<RenderItem>) {
    let Ok(guard) = node.read() else {
        return;
    };
    if !guard.is_visible() {
        return;
    }

    if let Some(drawable) = guard.drawable() {
        let (geometry, material, render_order, instanced) = match drawable {
            Drawable::Mesh(mesh) => (mesh.geometry(), mesh.material(), mesh.render_order, false),
            Drawable::Instanced(batch) => {
                (batch.geometry(), batch.material(), batch.render_order, true)
            }
        };
        if !geometry.is_disposed() {
            items.push(RenderItem {
                node: Arc::clone(node),
                name: guard.name().to_string(),
                instanced,
                vertices: geometry.vertex_floats().to_vec(),
                indices: geometry.indices().to_vec(),
                material: *material,
                render_order,
            });
        }
    }

    for child in guard.children() {
        collect_visible(child, items);
    }
}
