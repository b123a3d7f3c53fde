//! # Particles Module
//!
//! The electron stream: flow anchors resolved from model parts, per-model
//! placement rules, and the particle store that advances and respawns
//! particles every frame.

mod anchor;
mod config;
mod flow;
mod placement;
mod record;

pub use anchor::{resolve_anchor, FlowAnchor};
pub use config::FlowConfig;
pub use flow::{FlowBuilder, ParticleFlow, DEFAULT_SEED, FLOW_NODE_NAME};
pub use placement::{spawn_record, ChannelSurface, FinFlanks, NanosheetGrid, Placement, PlacementRule};
pub use record::{Face, ParticleRecord};
