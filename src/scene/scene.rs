//! Scene container - the root of the scene graph.

use super::{Object3D, ObjectType, SharedObject};
use crate::core::Id;
use crate::math::Color;
use std::sync::Arc;

/// Background type for the scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Background {
    /// Solid color background.
    Color(Color),
    /// No background (transparent).
    #[default]
    None,
}

/// Fog type for the scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Fog {
    /// No fog.
    #[default]
    None,
    /// Exponential fog.
    Exponential {
        /// Fog color.
        color: Color,
        /// Fog density.
        density: f32,
    },
}

/// The scene - root container for all objects.
pub struct Scene {
    /// The root object, shared so children can hold a weak parent link.
    root: SharedObject,
    /// Scene background.
    background: Background,
    /// Scene fog.
    fog: Fog,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        let mut root = Object3D::with_type(ObjectType::Scene);
        root.set_name("Scene");

        Self {
            root: root.into_shared(),
            background: Background::None,
            fog: Fog::None,
        }
    }

    /// Get the scene ID.
    pub fn id(&self) -> Option<Id> {
        self.root.read().ok().map(|r| r.id())
    }

    /// Get the background.
    #[inline]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Set background color.
    #[inline]
    pub fn set_background_color(&mut self, color: Color) {
        self.background = Background::Color(color);
    }

    /// Get the fog.
    #[inline]
    pub fn fog(&self) -> &Fog {
        &self.fog
    }

    /// Set exponential fog.
    pub fn set_exponential_fog(&mut self, color: Color, density: f32) {
        self.fog = Fog::Exponential { color, density };
    }

    /// Get the root object.
    #[inline]
    pub fn root(&self) -> &SharedObject {
        &self.root
    }

    /// Add an object to the scene.
    pub fn add(&self, object: SharedObject) {
        Object3D::attach(&self.root, object);
    }

    /// Remove a top-level object. Returns whether it was a child of the root.
    pub fn remove(&self, object: &SharedObject) -> bool {
        let is_top_level = object
            .read()
            .ok()
            .and_then(|o| o.parent())
            .map(|p| Arc::ptr_eq(&p, &self.root))
            .unwrap_or(false);
        is_top_level && Object3D::detach(object)
    }

    /// Get the number of top-level objects.
    pub fn children_count(&self) -> usize {
        self.root.read().map(|r| r.children_count()).unwrap_or(0)
    }

    /// Update all world matrices in the scene.
    pub fn update_world_matrices(&self) {
        if let Ok(mut root) = self.root.write() {
            root.update_world_matrix(None);
        }
    }

    /// Traverse all objects in the scene, root first.
    pub fn traverse<F>(&self, mut callback: F)
    where
        F: FnMut(&Object3D),
    {
        if let Ok(root) = self.root.read() {
            root.traverse(&mut callback);
        }
    }

    /// Find an object by name.
    pub fn find_by_name(&self, name: &str) -> Option<SharedObject> {
        self.root.read().ok()?.get_object_by_name(name)
    }

    /// Count nodes carrying a drawable.
    pub fn count_drawables(&self) -> usize {
        let mut count = 0;
        self.traverse(|o| {
            if o.drawable().is_some() {
                count += 1;
            }
        });
        count
    }

    /// Count nodes carrying an instanced drawable.
    pub fn count_instanced(&self) -> usize {
        let mut count = 0;
        self.traverse(|o| {
            if o.drawable().and_then(|d| d.as_instanced()).is_some() {
                count += 1;
            }
        });
        count
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("background", &self.background)
            .field("fog", &self.fog)
            .field("children", &self.children_count())
            .finish()
    }
}
