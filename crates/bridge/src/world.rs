//! World handles.
//!
//! A `BridgeWorld` stores only the level's generational key. Every call
//! re-resolves it through the server; once the level is unloaded the key
//! never resolves again and checked calls fail with `WorldUnloaded`.

use std::any::Any;
use std::path::PathBuf;
use std::sync::Arc;

use cinder_edit::block::BlockState;
use cinder_edit::entity::{BaseEntity, Entity};
use cinder_edit::item::BaseItemStack;
use cinder_edit::math::{BlockVector3, CuboidRegion, Vector3};
use cinder_edit::world::{Location, World};
use cinder_edit::{EditError, Result as EditResult};
use cinder_engine::entity::{Entity as HostEntity, EntityClass};
use cinder_engine::world::block::BlockId;
use cinder_engine::world::position::Location as HostLocation;
use cinder_engine::world::{Level, LevelId};
use rayon::prelude::*;

use crate::bridge::Bridge;
use crate::entity::{BridgeEntity, class_for_type};
use crate::error::{BridgeError, Result};
use crate::registry;
use crate::location::{adapt_block_pos, adapt_to_host_block_pos, adapt_to_host_vector, adapt_vector};

#[derive(Clone)]
pub struct BridgeWorld {
    bridge: Arc<Bridge>,
    level: LevelId,
    name: String,
    folder: String,
}

impl BridgeWorld {
    pub(crate) fn new(bridge: Arc<Bridge>, level: LevelId, live: &Level) -> Self {
        Self {
            bridge,
            level,
            name: live.name().to_string(),
            folder: live.folder_id().to_string(),
        }
    }

    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    pub fn level_id(&self) -> LevelId {
        self.level
    }

    pub fn is_loaded(&self) -> bool {
        self.bridge.server().level(self.level).is_some()
    }

    /// Checked access to the live level.
    pub fn level(&self) -> Result<Arc<Level>> {
        self.bridge
            .server()
            .level(self.level)
            .ok_or_else(|| BridgeError::WorldUnloaded(self.name.clone()))
    }

    /// The shared canonical state at `position`.
    pub fn block_at(&self, position: BlockVector3) -> Result<Arc<BlockState>> {
        let level = self.level()?;
        self.bridge
            .adapt_block_state(level.get_block(adapt_to_host_block_pos(position)))
    }

    /// Read every block in `region` on the rayon pool.
    pub fn blocks_in_region(&self, region: &CuboidRegion) -> Result<Vec<(BlockVector3, Arc<BlockState>)>> {
        let level = self.level()?;
        let positions: Vec<BlockVector3> = region.iter().collect();
        positions
            .into_par_iter()
            .map(|p| {
                let host = level.get_block(adapt_to_host_block_pos(p));
                Ok::<_, BridgeError>((p, self.bridge.adapt_block_state(host)?))
            })
            .collect()
    }

    fn wrap_entities(&self, filter: impl Fn(&HostEntity) -> bool) -> Vec<Box<dyn Entity>> {
        let server = self.bridge.server();
        server
            .entities_in(self.level)
            .into_iter()
            .filter(|id| server.with_entity(*id, &filter).unwrap_or(false))
            .map(|id| Box::new(BridgeEntity::new(Arc::clone(&self.bridge), id)) as Box<dyn Entity>)
            .collect()
    }
}

impl World for BridgeWorld {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn id(&self) -> String {
        self.folder.clone()
    }

    fn storage_path(&self) -> Option<PathBuf> {
        self.is_loaded()
            .then(|| self.bridge.server().data_path().join("worlds").join(&self.folder))
    }

    fn block(&self, position: BlockVector3) -> EditResult<BlockState> {
        Ok(self.block_at(position)?.as_ref().clone())
    }

    fn set_block(&self, position: BlockVector3, state: &BlockState) -> EditResult<bool> {
        let level = self.level()?;
        let host = self.bridge.adapt_to_host_state(state)?;
        let previous = level.set_block(adapt_to_host_block_pos(position), host);
        Ok(previous != host)
    }

    fn block_light_level(&self, position: BlockVector3) -> EditResult<u8> {
        Ok(self.level()?.get_block_light(adapt_to_host_block_pos(position)))
    }

    fn simulate_block_mine(&self, position: BlockVector3) -> EditResult<()> {
        self.level()?
            .set_block(adapt_to_host_block_pos(position), BlockId::AIR);
        Ok(())
    }

    fn clear_container_block_contents(&self, position: BlockVector3) -> bool {
        let Ok(level) = self.level() else {
            return false;
        };
        let pos = adapt_to_host_block_pos(position);
        let is_container = self
            .bridge
            .server()
            .palette()
            .kind_of(level.get_block(pos))
            .is_some_and(|kind| kind.behavior().container);
        if is_container {
            level.clear_container(pos);
        }
        is_container
    }

    fn spawn_position(&self) -> EditResult<BlockVector3> {
        Ok(adapt_block_pos(self.level()?.spawn()))
    }

    fn drop_item(&self, position: Vector3, item: &BaseItemStack) -> EditResult<()> {
        self.level()?;
        let host = self.bridge.adapt_to_host_item(item)?;
        if host.is_air() {
            return Ok(());
        }
        self.bridge
            .server()
            .drop_item(self.level, adapt_to_host_vector(position), &host)
            .map(|_| ())
            .ok_or_else(|| EditError::WorldUnloaded(self.name.clone()))
    }

    fn entities(&self) -> EditResult<Vec<Box<dyn Entity>>> {
        self.level()?;
        Ok(self.wrap_entities(|_| true))
    }

    fn entities_in(&self, region: &CuboidRegion) -> EditResult<Vec<Box<dyn Entity>>> {
        self.level()?;
        Ok(self.wrap_entities(|e| region.contains_point(adapt_vector(e.location.position))))
    }

    fn create_entity(&self, location: &Location, entity: &BaseEntity) -> EditResult<Option<Box<dyn Entity>>> {
        let host_location = HostLocation::new(self.level, adapt_to_host_vector(location.position()))
            .with_rotation(location.yaw(), location.pitch());
        let server = self.bridge.server();
        let type_id = entity.entity_type().id();
        let Some(host_type) = registry::host_entry(server.entity_types(), type_id) else {
            return Ok(None);
        };
        let class = class_for_type(type_id);
        if class == EntityClass::Player {
            return Ok(None);
        }
        let tag = entity
            .tag()
            .map(|tag| self.bridge.tags().to_host(tag))
            .unwrap_or_default();
        let spawned = server
            .spawn(HostEntity::new(host_type, class, host_location).with_tag(tag))
            .ok_or_else(|| EditError::WorldUnloaded(self.name.clone()))?;
        Ok(Some(Box::new(BridgeEntity::new(Arc::clone(&self.bridge), spawned))))
    }

    /// Our own handles compare by level key, so a stale handle never
    /// equals the level that replaced it.
    fn same_world(&self, other: &dyn World) -> bool {
        match other.as_any().downcast_ref::<BridgeWorld>() {
            Some(own) => self == own,
            None => self.name == other.name(),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Same server, same level key.
impl PartialEq for BridgeWorld {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && Arc::ptr_eq(self.bridge.server(), other.bridge.server())
    }
}

impl Eq for BridgeWorld {}

impl std::hash::Hash for BridgeWorld {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.level.hash(state);
    }
}

impl std::fmt::Debug for BridgeWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeWorld")
            .field("name", &self.name)
            .field("level", &self.level)
            .finish()
    }
}
