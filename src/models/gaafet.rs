//! GAAFET: a 3x3 stack of nanosheets bridging source and drain pillars,
//! fully surrounded by a translucent gate.

use super::layout::gaafet::*;
use super::{assemble, part, span, ModelType};
use crate::material::Material;
use crate::math::Box3;
use crate::scene::SharedObject;
use glam::Vec3;

pub(super) fn build() -> SharedObject {
    let pillar_y = (SUBSTRATE_TOP, PILLAR_TOP);

    let mut parts = vec![
        part(
            "substrate",
            span((-HALF_LENGTH, HALF_LENGTH), (SUBSTRATE_BOTTOM, SUBSTRATE_TOP), DEPTH),
            Material::substrate(),
        ),
        part(
            "source",
            span((-HALF_LENGTH, -PILLAR_INNER_X), pillar_y, PILLAR_DEPTH),
            Material::silicon_active(),
        ),
        part(
            "drain",
            span((PILLAR_INNER_X, HALF_LENGTH), pillar_y, PILLAR_DEPTH),
            Material::silicon_active(),
        ),
    ];

    for &y in &SHEET_LEVELS {
        for &z in &SHEET_COLUMNS {
            let center = Vec3::new(0.0, y, z);
            let half = Vec3::new(SHEET_HALF_LENGTH, SHEET_HALF_HEIGHT, SHEET_HALF_WIDTH);
            parts.push(part(
                "nanosheet",
                Box3::new(center - half, center + half),
                Material::silicon(),
            ));
        }
    }

    parts.push(part(
        "gate",
        span((-GATE_LENGTH / 2.0, GATE_LENGTH / 2.0), pillar_y, GATE_DEPTH),
        Material::gate_metal_translucent(),
    ));

    assemble(ModelType::GaaFet, parts)
}
