//! SOI MOSFET: a thin silicon film on a buried oxide layer, with wells for
//! source and drain and a planar gate stack over the channel.

use super::layout::soi::*;
use super::layout::{DEVICE_DEPTH, OUTER_X, WELL_INNER_X, WELL_OUTER_X};
use super::{assemble, part, span, stepped, ModelType};
use crate::material::Material;
use crate::scene::SharedObject;

pub(super) fn build() -> SharedObject {
    let d = DEVICE_DEPTH;
    let gate_x = (-WELL_INNER_X, WELL_INNER_X);
    let full_x = (-OUTER_X, OUTER_X);

    let body = stepped(
        "body",
        &[
            span(full_x, (BURIED_OXIDE_TOP, FILM_FLOOR), d),
            span((-OUTER_X, -WELL_OUTER_X), (FILM_FLOOR, WALL_TOP), d),
            span((WELL_OUTER_X, OUTER_X), (FILM_FLOOR, WALL_TOP), d),
            span(gate_x, (FILM_FLOOR, CHANNEL_BOTTOM), d),
        ],
        Material::substrate(),
    );

    assemble(
        ModelType::Soi,
        [
            part(
                "substrate",
                span(full_x, (SUBSTRATE_BOTTOM, BURIED_OXIDE_BOTTOM), d),
                Material::substrate(),
            ),
            part(
                "buried-oxide",
                span(full_x, (BURIED_OXIDE_BOTTOM, BURIED_OXIDE_TOP), d),
                Material::oxide(),
            ),
            body,
            part(
                "source",
                span((-WELL_OUTER_X, -WELL_INNER_X), (FILM_FLOOR, WALL_TOP), d),
                Material::silicon_active(),
            ),
            part(
                "drain",
                span((WELL_INNER_X, WELL_OUTER_X), (FILM_FLOOR, WALL_TOP), d),
                Material::silicon_active(),
            ),
            part("channel", CHANNEL, Material::silicon()),
            part("oxide", span(gate_x, (CHANNEL_TOP, OXIDE_TOP), d), Material::oxide()),
            part("gate", span(gate_x, (OXIDE_TOP, GATE_TOP), d), Material::gate_metal()),
        ],
    )
}
