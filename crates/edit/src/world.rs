//! Worlds as the editor sees them, and positions inside them.

use std::any::Any;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use crate::block::{self, BlockState};
use crate::entity::{BaseEntity, Entity};
use crate::error::Result;
use crate::identifier::Identifier;
use crate::item::BaseItemStack;
use crate::math::{BlockVector3, CuboidRegion, Vector3};

/// A place blocks and entities live in.
///
/// Methods returning `Result` fail once the platform's world is gone; the
/// rest degrade to a neutral value.
pub trait World: Send + Sync {
    fn name(&self) -> String;

    /// Stable identifier, usually the storage folder name.
    fn id(&self) -> String;

    fn storage_path(&self) -> Option<PathBuf>;

    fn block(&self, position: BlockVector3) -> Result<BlockState>;

    /// Returns whether the stored block changed.
    fn set_block(&self, position: BlockVector3, state: &BlockState) -> Result<bool>;

    fn block_light_level(&self, position: BlockVector3) -> Result<u8>;

    /// Break the block as a player would, without drops.
    fn simulate_block_mine(&self, position: BlockVector3) -> Result<()>;

    /// Empty the inventory of the container block at `position`. Returns
    /// `false` if the block holds no inventory or the world is gone.
    fn clear_container_block_contents(&self, position: BlockVector3) -> bool;

    fn spawn_position(&self) -> Result<BlockVector3>;

    fn drop_item(&self, position: Vector3, item: &BaseItemStack) -> Result<()>;

    fn entities(&self) -> Result<Vec<Box<dyn Entity>>>;

    fn entities_in(&self, region: &CuboidRegion) -> Result<Vec<Box<dyn Entity>>>;

    /// `Ok(None)` when the platform refuses to spawn the given type.
    fn create_entity(&self, location: &Location, entity: &BaseEntity) -> Result<Option<Box<dyn Entity>>>;

    /// Whether `other` refers to the same world. Worlds of unrelated
    /// platforms can only be compared by name.
    fn same_world(&self, other: &dyn World) -> bool {
        self.name() == other.name()
    }

    fn as_any(&self) -> &dyn Any;
}

/// A world that contains only air and accepts no changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWorld;

impl NullWorld {
    pub fn shared() -> Arc<dyn World> {
        static SHARED: OnceLock<Arc<NullWorld>> = OnceLock::new();
        SHARED.get_or_init(|| Arc::new(NullWorld)).clone()
    }
}

impl World for NullWorld {
    fn name(&self) -> String {
        "null".to_string()
    }

    fn id(&self) -> String {
        "null".to_string()
    }

    fn storage_path(&self) -> Option<PathBuf> {
        None
    }

    fn block(&self, _position: BlockVector3) -> Result<BlockState> {
        Ok(block::air_state())
    }

    fn set_block(&self, _position: BlockVector3, _state: &BlockState) -> Result<bool> {
        Ok(false)
    }

    fn block_light_level(&self, _position: BlockVector3) -> Result<u8> {
        Ok(0)
    }

    fn simulate_block_mine(&self, _position: BlockVector3) -> Result<()> {
        Ok(())
    }

    fn clear_container_block_contents(&self, _position: BlockVector3) -> bool {
        false
    }

    fn spawn_position(&self) -> Result<BlockVector3> {
        Ok(BlockVector3::ZERO)
    }

    fn drop_item(&self, _position: Vector3, _item: &BaseItemStack) -> Result<()> {
        Ok(())
    }

    fn entities(&self) -> Result<Vec<Box<dyn Entity>>> {
        Ok(Vec::new())
    }

    fn entities_in(&self, _region: &CuboidRegion) -> Result<Vec<Box<dyn Entity>>> {
        Ok(Vec::new())
    }

    fn create_entity(&self, _location: &Location, _entity: &BaseEntity) -> Result<Option<Box<dyn Entity>>> {
        Ok(None)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A position and look direction inside a world.
#[derive(Clone)]
pub struct Location {
    extent: Arc<dyn World>,
    position: Vector3,
    yaw: f32,
    pitch: f32,
}

impl Location {
    pub fn new(extent: Arc<dyn World>, position: Vector3) -> Self {
        Self {
            extent,
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// The origin of [`NullWorld`]. Returned where a real location is
    /// unavailable.
    pub fn nowhere() -> Self {
        Self::new(NullWorld::shared(), Vector3::ZERO)
    }

    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    pub fn extent(&self) -> &Arc<dyn World> {
        &self.extent
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn block_position(&self) -> BlockVector3 {
        self.position.to_block_point()
    }

    pub fn is_nowhere(&self) -> bool {
        self.extent.as_any().is::<NullWorld>()
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.extent.same_world(other.extent.as_ref())
            && self.position == other.position
            && self.yaw == other.yaw
            && self.pitch == other.pitch
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Location")
            .field("extent", &self.extent.name())
            .field("position", &self.position)
            .field("yaw", &self.yaw)
            .field("pitch", &self.pitch)
            .finish()
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct BiomeType {
    id: Identifier,
}

impl BiomeType {
    pub fn new(id: Identifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }
}
