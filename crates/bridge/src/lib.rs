//! Adapter between the cinder host engine and the cinder editing model.
//!
//! A [`Bridge`] owns the canonical registries and the translation caches.
//! Build one with [`Bridge::start`] once the host's catalogs are final, then
//! hand out its world, entity and player handles to the editor.

pub mod block;
pub mod bridge;
pub mod config;
pub mod entity;
pub mod error;
pub mod item;
pub mod location;
pub mod nbt;
pub mod platform;
pub mod player;
pub mod property;
pub mod registry;
pub mod world;

pub use bridge::Bridge;
pub use config::{BridgeConfig, TagMode};
pub use error::{BridgeError, Result};
