//! FinFET: vertical silicon fins rising through shallow trench isolation,
//! wrapped on three sides by a translucent gate.

use super::layout::finfet::*;
use super::{assemble, part, span, ModelType};
use crate::material::Material;
use crate::math::Box3;
use crate::scene::SharedObject;
use glam::Vec3;

pub(super) fn build() -> SharedObject {
    let full_x = (-HALF_LENGTH, HALF_LENGTH);

    let mut parts = vec![
        part(
            "substrate",
            span(full_x, (SUBSTRATE_BOTTOM, FIN_BOTTOM), DEPTH),
            Material::substrate(),
        ),
        part(
            "isolation",
            span(full_x, (FIN_BOTTOM, ISOLATION_TOP), DEPTH),
            Material::isolation(),
        ),
    ];

    parts.extend(FIN_CENTERS.iter().map(|&z| {
        let half = FIN_WIDTH / 2.0;
        part(
            "fin",
            Box3::new(
                Vec3::new(-HALF_LENGTH, FIN_BOTTOM, z - half),
                Vec3::new(HALF_LENGTH, FIN_CREST, z + half),
            ),
            Material::silicon_active(),
        )
    }));

    parts.push(part(
        "gate",
        span(
            (-GATE_LENGTH / 2.0, GATE_LENGTH / 2.0),
            (GATE_BOTTOM, GATE_TOP),
            GATE_DEPTH,
        ),
        Material::gate_metal_translucent(),
    ));

    assemble(ModelType::FinFet, parts)
}
