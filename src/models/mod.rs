//! # Models Module
//!
//! Procedural geometry for the four transistor architectures. Each builder
//! returns a group whose children are named box meshes; the planar and SOI
//! groups expose `source`, `drain` and `channel` parts for flow anchoring.

mod finfet;
mod gaafet;
mod info;
pub mod layout;
mod planar;
mod soi;

pub use info::{Language, ModelInfo};

use crate::error::FetError;
use crate::geometry::{BoxGeometry, BufferGeometry};
use crate::material::Material;
use crate::math::Box3;
use crate::objects::Mesh;
use crate::scene::{Object3D, SharedObject};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transistor architecture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Bulk planar MOSFET.
    #[default]
    Planar,
    /// Silicon-on-insulator MOSFET.
    Soi,
    /// Fin field-effect transistor.
    FinFet,
    /// Gate-all-around nanosheet transistor.
    GaaFet,
}

impl ModelType {
    /// Every model, in menu order.
    pub const ALL: [ModelType; 4] = [Self::Planar, Self::Soi, Self::FinFet, Self::GaaFet];

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planar => "planar",
            Self::Soi => "soi",
            Self::FinFet => "finfet",
            Self::GaaFet => "gaafet",
        }
    }

    /// Map a `?type=N` page parameter to a model. `2`, `3` and `4` pick SOI,
    /// FinFET and GAAFET; anything else is planar.
    pub fn from_query_index(index: &str) -> Self {
        match index.trim() {
            "2" => Self::Soi,
            "3" => Self::FinFet,
            "4" => Self::GaaFet,
            _ => Self::Planar,
        }
    }

    /// One-based position in menu order.
    pub fn query_index(self) -> u8 {
        match self {
            Self::Planar => 1,
            Self::Soi => 2,
            Self::FinFet => 3,
            Self::GaaFet => 4,
        }
    }

    /// Whether particle paths are derived from the `source`/`drain`/`channel`
    /// parts rather than fixed layout positions.
    #[inline]
    pub fn uses_anchor(self) -> bool {
        matches!(self, Self::Planar | Self::Soi)
    }

    /// Display text for this model.
    pub fn info(self, language: Language) -> ModelInfo {
        info::model_info(self, language)
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = FetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| FetError::UnknownModel(name.to_string()))
    }
}

/// Build the geometry group for a model. The group is named after the model.
pub fn build_model(model: ModelType) -> SharedObject {
    let group = match model {
        ModelType::Planar => planar::build(),
        ModelType::Soi => soi::build(),
        ModelType::FinFet => finfet::build(),
        ModelType::GaaFet => gaafet::build(),
    };
    log::debug!(
        "Built {} model with {} parts",
        model,
        group.read().map(|g| g.children_count()).unwrap_or(0)
    );
    group
}

/// Box spanning the given X and Y ranges, centred on Z.
fn span(x: (f32, f32), y: (f32, f32), depth: f32) -> Box3 {
    Box3::new(
        Vec3::new(x.0, y.0, -depth / 2.0),
        Vec3::new(x.1, y.1, depth / 2.0),
    )
}

/// Box geometry filling `bounds`, expressed relative to its centre.
fn box_geometry(bounds: &Box3) -> BufferGeometry {
    let size = bounds.size();
    BoxGeometry::new(size.x, size.y, size.z).build()
}

/// A named box part whose node sits at the centre of `bounds`.
fn part(name: &str, bounds: Box3, material: Material) -> SharedObject {
    let mesh = Mesh::new(box_geometry(&bounds), material);
    let mut node = Object3D::with_mesh(name, mesh);
    node.set_position(bounds.center());
    node.into_shared()
}

/// One mesh built from several slabs given in group coordinates.
fn stepped(name: &str, slabs: &[Box3], material: Material) -> SharedObject {
    let geometry = BufferGeometry::merge(slabs.iter().map(|slab| {
        let mut g = box_geometry(slab);
        g.translate(slab.center());
        g
    }));
    let mesh = Mesh::new(geometry, material);
    Object3D::with_mesh(name, mesh).into_shared()
}

/// Create a named group and attach `parts` in order.
fn assemble(model: ModelType, parts: impl IntoIterator<Item = SharedObject>) -> SharedObject {
    let group = Object3D::group(model.as_str()).into_shared();
    for p in parts {
        Object3D::attach(&group, p);
    }
    group
}
