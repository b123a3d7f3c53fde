//! Flow anchors derived from named model parts.

use crate::math::Box3;
use crate::models::ModelType;
use crate::scene::Object3D;
use glam::{Mat4, Vec3};

/// Start, end and channel bounds of a flow path, in the model group's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowAnchor {
    /// Centre of the source.
    pub start: Vec3,
    /// Centre of the drain.
    pub end: Vec3,
    /// Channel bounds.
    pub channel: Box3,
}

/// Derive the flow anchor for `model` from the parts of `group`.
///
/// Returns `None` for models routed by fixed layout positions, and when any of
/// `source`, `drain` or `channel` is missing or has no geometry. World matrices
/// must be current.
pub fn resolve_anchor(model: ModelType, group: &Object3D) -> Option<FlowAnchor> {
    if !model.uses_anchor() {
        return None;
    }

    let world_to_group = group.world_matrix().inverse();
    let source = part_world_bounds(group, "source")?;
    let drain = part_world_bounds(group, "drain")?;
    let channel = part_bounds_in_group(group, "channel", &world_to_group)?;

    Some(FlowAnchor {
        start: world_to_group.transform_point3(source.center()),
        end: world_to_group.transform_point3(drain.center()),
        channel,
    })
}

fn part_world_bounds(group: &Object3D, name: &str) -> Option<Box3> {
    let node = group.get_object_by_name(name)?;
    let bounds = node.read().ok()?.world_bounding_box();
    (!bounds.is_empty()).then_some(bounds)
}

fn part_bounds_in_group(group: &Object3D, name: &str, world_to_group: &Mat4) -> Option<Box3> {
    let node = group.get_object_by_name(name)?;
    let bounds = node.read().ok()?.bounding_box_in_frame(world_to_group);
    (!bounds.is_empty()).then_some(bounds)
}
