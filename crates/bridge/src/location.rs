//! Coordinate, facing, location and biome conversions.

use std::sync::Arc;

use cinder_edit::identifier::Identifier;
use cinder_edit::math::{BlockVector3, Direction, Vector3};
use cinder_edit::world::{BiomeType, Location, World};
use cinder_engine::world::LevelId;
use cinder_engine::world::position::{
    BlockPos, Direction as HostDirection, Location as HostLocation, Vec3,
};

use crate::bridge::Bridge;
use crate::error::{BridgeError, Result};
use crate::registry;
use crate::world::BridgeWorld;

pub fn adapt_direction(direction: HostDirection) -> Direction {
    match direction {
        HostDirection::North => Direction::North,
        HostDirection::South => Direction::South,
        HostDirection::West => Direction::West,
        HostDirection::East => Direction::East,
        HostDirection::Down => Direction::Down,
        HostDirection::Up => Direction::Up,
    }
}

/// `None` for the diagonals, which the host has no face for.
pub fn adapt_to_host_direction(direction: Direction) -> Option<HostDirection> {
    match direction {
        Direction::North => Some(HostDirection::North),
        Direction::South => Some(HostDirection::South),
        Direction::West => Some(HostDirection::West),
        Direction::East => Some(HostDirection::East),
        Direction::Down => Some(HostDirection::Down),
        Direction::Up => Some(HostDirection::Up),
        Direction::NorthEast | Direction::NorthWest | Direction::SouthEast | Direction::SouthWest => None,
    }
}

pub fn adapt_vector(v: Vec3) -> Vector3 {
    Vector3::new(v.x as f64, v.y as f64, v.z as f64)
}

pub fn adapt_to_host_vector(v: Vector3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}

/// Host coordinates beyond `i32` clamp to the edge.
pub fn adapt_block_pos(pos: BlockPos) -> BlockVector3 {
    let clamp = |v: i64| v.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    BlockVector3::new(clamp(pos.x), clamp(pos.y), clamp(pos.z))
}

pub fn adapt_to_host_block_pos(v: BlockVector3) -> BlockPos {
    BlockPos::new(v.x as i64, v.y as i64, v.z as i64)
}

impl Bridge {
    /// Host location → canonical location. [`Location::nowhere`] if the
    /// level is gone.
    pub fn adapt_location(self: &Arc<Self>, location: &HostLocation) -> Location {
        match self.wrap_world(location.level) {
            Ok(world) => Location::new(Arc::new(world), adapt_vector(location.position))
                .with_rotation(location.yaw, location.pitch),
            Err(_) => Location::nowhere(),
        }
    }

    pub fn adapt_to_host_location(&self, location: &Location) -> Result<HostLocation> {
        let level = self.resolve_level(location.extent().as_ref())?;
        Ok(HostLocation::new(level, adapt_to_host_vector(location.position()))
            .with_rotation(location.yaw(), location.pitch()))
    }

    /// The live host level behind a canonical world: directly for this
    /// bridge's own handles, by name for anything else.
    pub fn resolve_level(&self, world: &dyn World) -> Result<LevelId> {
        if let Some(own) = world.as_any().downcast_ref::<BridgeWorld>() {
            if Arc::ptr_eq(own.bridge().server(), self.server()) {
                return match self.server().level(own.level_id()) {
                    Some(_) => Ok(own.level_id()),
                    None => Err(BridgeError::WorldUnloaded(own.name())),
                };
            }
        }
        let name = world.name();
        self.server()
            .level_by_name(&name)
            .map(|(id, _)| id)
            .ok_or(BridgeError::NoSuchWorld(name))
    }

    pub fn adapt_biome(&self, host_id: &str) -> Result<Arc<BiomeType>> {
        let id = Identifier::parse(host_id)?;
        Ok(self.registry().biome_type_or_stub(&id))
    }

    pub fn adapt_to_host_biome(&self, biome: &BiomeType) -> Result<String> {
        registry::host_entry(self.server().biomes(), biome.id())
            .map(str::to_string)
            .ok_or_else(|| BridgeError::MissingAdapter(biome.id().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_host_direction_round_trips() {
        for direction in HostDirection::ALL {
            assert_eq!(adapt_to_host_direction(adapt_direction(direction)), Some(direction));
        }
        assert_eq!(adapt_to_host_direction(Direction::NorthEast), None);
    }

    #[test]
    fn steps_agree() {
        for direction in HostDirection::ALL {
            let (x, y, z) = direction.step();
            let v = adapt_direction(direction).to_vector();
            assert_eq!((v.x as i64, v.y as i64, v.z as i64), (x, y, z));
        }
    }

    #[test]
    fn block_positions_clamp() {
        let far = BlockPos::new(i64::MAX, -5, i64::MIN);
        assert_eq!(adapt_block_pos(far), BlockVector3::new(i32::MAX, -5, i32::MIN));
        let near = BlockVector3::new(1, -2, 3);
        assert_eq!(adapt_block_pos(adapt_to_host_block_pos(near)), near);
    }

    #[test]
    fn vectors_narrow_to_f32() {
        let v = Vector3::new(1.5, -64.25, 1e3);
        assert_eq!(adapt_vector(adapt_to_host_vector(v)), v);
    }
}
