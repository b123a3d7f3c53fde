//! # Scene Module
//!
//! Scene graph with hierarchical transformations. Nodes are shared as
//! `Arc<RwLock<Object3D>>` with weak parent back-references, so a child's
//! world matrix follows whatever group it is attached to.

mod object3d;
mod render_list;
mod scene;
mod transform;

pub use object3d::{Drawable, Object3D, SharedObject};
pub use render_list::{RenderItem, RenderList};
pub use scene::{Background, Fog, Scene};
pub use transform::Transform;

/// Object type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    /// Scene root.
    Scene,
    /// Group node.
    Group,
    /// Mesh object.
    Mesh,
    /// Instanced mesh object.
    InstancedMesh,
}
