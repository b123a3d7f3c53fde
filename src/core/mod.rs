//! # Core Module
//!
//! Identity for scene objects and geometries.

mod id;

pub use id::Id;
