//! Host voxel runtime: the block palette, loaded levels, entities and items
//! that the editing bridge adapts.

pub mod catalog;
pub mod entity;
pub mod item;
pub mod palette;
pub mod server;
pub mod vanilla;
pub mod world;
