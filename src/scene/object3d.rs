//! Base node type for all scene objects.

use super::{ObjectType, Transform};
use crate::core::Id;
use crate::math::Box3;
use crate::objects::{InstancedMesh, Mesh};
use glam::{Mat4, Quat, Vec3};
use std::sync::{Arc, RwLock, Weak};

/// A scene node shared between its parent and any handles held elsewhere.
pub type SharedObject = Arc<RwLock<Object3D>>;

/// Renderable payload carried by a node.
#[derive(Debug)]
pub enum Drawable {
    /// A single mesh.
    Mesh(Mesh),
    /// A batch of instances of one geometry.
    Instanced(InstancedMesh),
}

impl Drawable {
    /// Local bounding box of the payload.
    pub fn bounding_box(&self) -> Box3 {
        match self {
            Drawable::Mesh(mesh) => mesh.bounding_box(),
            Drawable::Instanced(mesh) => mesh.bounding_box(),
        }
    }

    /// Get the instanced mesh, if this is one.
    pub fn as_instanced(&self) -> Option<&InstancedMesh> {
        match self {
            Drawable::Instanced(mesh) => Some(mesh),
            Drawable::Mesh(_) => None,
        }
    }

    /// Get the instanced mesh mutably, if this is one.
    pub fn as_instanced_mut(&mut self) -> Option<&mut InstancedMesh> {
        match self {
            Drawable::Instanced(mesh) => Some(mesh),
            Drawable::Mesh(_) => None,
        }
    }

    /// Release geometry and instance data.
    pub fn dispose(&mut self) {
        match self {
            Drawable::Mesh(mesh) => mesh.dispose(),
            Drawable::Instanced(mesh) => mesh.dispose(),
        }
    }
}

/// A node in the scene graph.
pub struct Object3D {
    /// Unique identifier.
    id: Id,
    /// Object name.
    name: String,
    /// Object type.
    object_type: ObjectType,
    /// Transform component.
    transform: Transform,
    /// Whether the node and its subtree are rendered.
    visible: bool,
    /// Parent object.
    parent: Option<Weak<RwLock<Object3D>>>,
    /// Child objects.
    children: Vec<SharedObject>,
    /// Renderable payload.
    drawable: Option<Drawable>,
}

impl Default for Object3D {
    fn default() -> Self {
        Self::with_type(ObjectType::Group)
    }
}

impl Object3D {
    /// Create with a specific type.
    pub fn with_type(object_type: ObjectType) -> Self {
        Self {
            id: Id::new(),
            name: String::new(),
            object_type,
            transform: Transform::new(),
            visible: true,
            parent: None,
            children: Vec::new(),
            drawable: None,
        }
    }

    /// Create an empty named group.
    pub fn group(name: impl Into<String>) -> Self {
        let mut obj = Self::with_type(ObjectType::Group);
        obj.name = name.into();
        obj
    }

    /// Create a named mesh node.
    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        let mut obj = Self::with_type(ObjectType::Mesh);
        obj.name = name.into();
        obj.drawable = Some(Drawable::Mesh(mesh));
        obj
    }

    /// Create a named instanced mesh node.
    pub fn with_instanced(name: impl Into<String>, mesh: InstancedMesh) -> Self {
        let mut obj = Self::with_type(ObjectType::InstancedMesh);
        obj.name = name.into();
        obj.drawable = Some(Drawable::Instanced(mesh));
        obj
    }

    /// Wrap into a shared handle.
    pub fn into_shared(self) -> SharedObject {
        Arc::new(RwLock::new(self))
    }

    /// Get the unique ID.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the object name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the object name.
    #[inline]
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the object type.
    #[inline]
    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// Get the transform.
    #[inline]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Get mutable transform.
    #[inline]
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Check if visible.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set visibility.
    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // === Transform shortcuts ===

    /// Get position.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Set position.
    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.transform.set_position(position);
    }

    /// Set rotation from quaternion.
    #[inline]
    pub fn set_quaternion(&mut self, quaternion: Quat) {
        self.transform.set_quaternion(quaternion);
    }

    /// Rotate around Y axis.
    #[inline]
    pub fn rotate_y(&mut self, angle: f32) {
        self.transform.rotate_y(angle);
    }

    /// Get the world matrix.
    #[inline]
    pub fn world_matrix(&self) -> &Mat4 {
        self.transform.world_matrix()
    }

    /// Update this node's world matrix and then every descendant's.
    ///
    /// `parent_world` is `None` for a root.
    pub fn update_world_matrix(&mut self, parent_world: Option<&Mat4>) {
        self.transform.update_world_matrix(parent_world);
        let world = *self.transform.world_matrix();
        for child in &self.children {
            if let Ok(mut child_guard) = child.write() {
                child_guard.update_world_matrix(Some(&world));
            }
        }
    }

    /// Convert a world-space point into this node's local frame.
    pub fn world_to_local(&self, point: Vec3) -> Vec3 {
        self.transform
            .world_matrix()
            .inverse()
            .transform_point3(point)
    }

    // === Hierarchy ===

    /// Get the parent.
    pub fn parent(&self) -> Option<SharedObject> {
        self.parent.as_ref().and_then(|w| w.upgrade())
    }

    /// Get children.
    #[inline]
    pub fn children(&self) -> &[SharedObject] {
        &self.children
    }

    /// Get number of children.
    #[inline]
    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    /// Attach `child` under `parent`, detaching it from any previous parent.
    ///
    /// Attaching a node to itself is ignored.
    pub fn attach(parent: &SharedObject, child: SharedObject) {
        if Arc::ptr_eq(parent, &child) {
            return;
        }
        Self::detach(&child);
        if let Ok(mut child_guard) = child.write() {
            child_guard.parent = Some(Arc::downgrade(parent));
        }
        if let Ok(mut parent_guard) = parent.write() {
            parent_guard.children.push(child);
        }
    }

    /// Remove `child` from its parent. Returns whether it was attached.
    pub fn detach(child: &SharedObject) -> bool {
        let (parent, id) = match child.read() {
            Ok(guard) => (guard.parent(), guard.id),
            Err(_) => return false,
        };
        let removed = parent
            .and_then(|p| p.write().ok().and_then(|mut g| g.remove_by_id(id)))
            .is_some();
        if let Ok(mut guard) = child.write() {
            guard.parent = None;
        }
        removed
    }

    /// Remove a direct child by ID without touching its parent link.
    fn remove_by_id(&mut self, id: Id) -> Option<SharedObject> {
        let pos = self
            .children
            .iter()
            .position(|c| c.read().map(|guard| guard.id == id).unwrap_or(false))?;
        Some(self.children.remove(pos))
    }

    /// Depth-first search of the descendants for a node with this name.
    pub fn get_object_by_name(&self, name: &str) -> Option<SharedObject> {
        for child in &self.children {
            let Ok(guard) = child.read() else { continue };
            if guard.name == name {
                return Some(Arc::clone(child));
            }
            if let Some(found) = guard.get_object_by_name(name) {
                return Some(found);
            }
        }
        None
    }

    /// Visit this node and then every descendant, depth first.
    pub fn traverse(&self, f: &mut dyn FnMut(&Object3D)) {
        f(self);
        for child in &self.children {
            if let Ok(guard) = child.read() {
                guard.traverse(f);
            }
        }
    }

    // === Drawable ===

    /// Get the drawable.
    #[inline]
    pub fn drawable(&self) -> Option<&Drawable> {
        self.drawable.as_ref()
    }

    /// Get the drawable mutably.
    #[inline]
    pub fn drawable_mut(&mut self) -> Option<&mut Drawable> {
        self.drawable.as_mut()
    }

    /// Release geometry and instance data held by this node and every descendant.
    pub fn dispose_subtree(&mut self) {
        if let Some(drawable) = self.drawable.as_mut() {
            drawable.dispose();
        }
        for child in &self.children {
            if let Ok(mut child_guard) = child.write() {
                child_guard.dispose_subtree();
            }
        }
    }

    // === Bounds ===

    /// World bounding box of this node's own drawable, ignoring children.
    pub fn own_world_bounding_box(&self) -> Box3 {
        self.drawable
            .as_ref()
            .map(|d| d.bounding_box().apply_matrix4(self.transform.world_matrix()))
            .unwrap_or(Box3::EMPTY)
    }

    /// World bounding box of the whole subtree.
    ///
    /// Empty when nothing in the subtree has geometry. Uses the world matrices
    /// from the last `update_world_matrix`.
    pub fn world_bounding_box(&self) -> Box3 {
        let mut bounds = Box3::EMPTY;
        self.traverse(&mut |node| bounds = bounds.union(&node.own_world_bounding_box()));
        bounds
    }

    /// Bounding box of the whole subtree in another node's frame.
    ///
    /// `world_to_frame` is the inverse of that node's world matrix. Each
    /// drawable's local box goes through its frame-relative matrix, so a
    /// rotation shared by the frame and the subtree does not inflate the result.
    pub fn bounding_box_in_frame(&self, world_to_frame: &Mat4) -> Box3 {
        let mut bounds = Box3::EMPTY;
        self.traverse(&mut |node| {
            if let Some(drawable) = node.drawable() {
                let relative = *world_to_frame * *node.world_matrix();
                bounds = bounds.union(&drawable.bounding_box().apply_matrix4(&relative));
            }
        });
        bounds
    }
}

impl std::fmt::Debug for Object3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object3D")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type", &self.object_type)
            .field("visible", &self.visible)
            .field("children", &self.children.len())
            .finish()
    }
}
