//! Bulk planar MOSFET: doped wells cut into the substrate, a thin channel
//! between them, gate oxide and gate on top.

use super::layout::planar::*;
use super::layout::{DEVICE_DEPTH, OUTER_X, WELL_INNER_X, WELL_OUTER_X};
use super::{assemble, part, span, stepped, ModelType};
use crate::material::Material;
use crate::scene::SharedObject;

pub(super) fn build() -> SharedObject {
    let d = DEVICE_DEPTH;
    let gate_x = (-WELL_INNER_X, WELL_INNER_X);

    // Base slab, outer walls, and the ridge the channel sits on
    let substrate = stepped(
        "substrate",
        &[
            span((-OUTER_X, OUTER_X), (SUBSTRATE_BOTTOM, WELL_BOTTOM), d),
            span((-OUTER_X, -WELL_OUTER_X), (WELL_BOTTOM, WALL_TOP), d),
            span((WELL_OUTER_X, OUTER_X), (WELL_BOTTOM, WALL_TOP), d),
            span(gate_x, (WELL_BOTTOM, CHANNEL_BOTTOM), d),
        ],
        Material::substrate(),
    );

    assemble(
        ModelType::Planar,
        [
            substrate,
            part(
                "source",
                span((-WELL_OUTER_X, -WELL_INNER_X), (WELL_BOTTOM, WALL_TOP), d),
                Material::silicon_active(),
            ),
            part(
                "drain",
                span((WELL_INNER_X, WELL_OUTER_X), (WELL_BOTTOM, WALL_TOP), d),
                Material::silicon_active(),
            ),
            part("channel", CHANNEL, Material::silicon()),
            part("oxide", span(gate_x, (CHANNEL_TOP, OXIDE_TOP), d), Material::oxide()),
            part("gate", span(gate_x, (OXIDE_TOP, GATE_TOP), d), Material::gate_metal()),
        ],
    )
}
