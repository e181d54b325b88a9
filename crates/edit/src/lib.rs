//! The editor's own model of blocks, items, entities and worlds.
//!
//! Nothing in here knows about a particular game engine. A platform adapter
//! implements [`world::World`], [`entity::Entity`], [`entity::Player`] and
//! [`platform::Platform`] and translates its native values to and from the
//! types in this crate.

pub mod block;
pub mod entity;
pub mod error;
pub mod identifier;
pub mod item;
pub mod math;
pub mod platform;
pub mod property;
pub mod registry;
pub mod tag;
pub mod world;

pub use error::{EditError, Result};
pub use identifier::Identifier;
