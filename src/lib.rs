//! # fetviz - Animated Transistor Structure Viewer
//!
//! fetviz builds 3D models of four field-effect transistor generations
//! (planar MOSFET, SOI, FinFET and gate-all-around nanosheet FET) and runs a
//! stream of electron particles through each device's conduction channel.
//!
//! ## Features
//!
//! - **Models**: Procedural device geometry sharing one layout table
//! - **Particles**: Per-model placement rules anchored to the channel
//! - **Scene**: Object3D hierarchy with world-matrix propagation
//! - **Controls**: Damped orbit camera
//! - **Web**: wasm-bindgen surface for a browser page
//!
//! ## Example
//!
//! ```ignore
//! use fetviz::prelude::*;
//!
//! let mut viewer = Viewer::new(ViewerConfig::default(), 1280, 720)?;
//! viewer.switch_model(ModelType::FinFet);
//! loop {
//!     viewer.tick();
//!     let matrices = viewer.particle_matrices();
//! }
//! ```

#![warn(missing_docs)]

#[cfg(feature = "web")]
use wasm_bindgen::prelude::*;

pub mod camera;
pub mod controls;
pub mod core;
pub mod error;
pub mod geometry;
pub mod material;
pub mod math;
pub mod models;
pub mod objects;
pub mod particles;
pub mod scene;
pub mod viewer;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use error::{FetError, Result};
pub use viewer::{Viewer, ViewerConfig};

pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::camera::*;
    pub use crate::controls::*;
    pub use crate::core::*;
    pub use crate::error::FetError;
    pub use crate::geometry::*;
    pub use crate::material::*;
    pub use crate::math::*;
    pub use crate::models::*;
    pub use crate::objects::*;
    pub use crate::particles::*;
    pub use crate::scene::*;
    pub use crate::viewer::*;
}

/// Install the panic hook so panics reach the browser console.
#[cfg(feature = "web")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = "fetviz";
