//! Entities and players as the editor sees them.

use std::any::Any;
use std::sync::Arc;

use uuid::Uuid;

use crate::block::BlockState;
use crate::error::Result;
use crate::identifier::Identifier;
use crate::item::BaseItemStack;
use crate::tag::CompoundTag;
use crate::world::{Location, World};

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EntityType {
    id: Identifier,
}

impl EntityType {
    pub fn new(id: Identifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }
}

/// A detached snapshot of an entity: its type and tag data. Enough to
/// recreate it elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseEntity {
    entity_type: Arc<EntityType>,
    tag: Option<CompoundTag>,
}

impl BaseEntity {
    pub fn new(entity_type: Arc<EntityType>) -> Self {
        Self {
            entity_type,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Option<CompoundTag>) -> Self {
        self.tag = tag;
        self
    }

    pub fn entity_type(&self) -> &Arc<EntityType> {
        &self.entity_type
    }

    pub fn tag(&self) -> Option<&CompoundTag> {
        self.tag.as_ref()
    }
}

/// What kind of thing an entity is, for filtering and copy/paste decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntityProperties {
    pub player_derived: bool,
    pub projectile: bool,
    pub item: bool,
    pub falling_block: bool,
    pub painting: bool,
    pub item_frame: bool,
    pub boat: bool,
    pub minecart: bool,
    pub tnt: bool,
    pub experience_orb: bool,
    pub living: bool,
    pub animal: bool,
    pub ambient: bool,
    pub npc: bool,
    pub golem: bool,
    pub tamed: bool,
    /// Living and carrying a custom name.
    pub tagged: bool,
    pub armor_stand: bool,
    /// Safe to copy into a clipboard. Players are not.
    pub pasteable: bool,
}

/// A handle to an entity owned by the platform.
///
/// The entity may despawn at any time. `Result`-returning methods then fail
/// with [`EditError::EntityDespawned`](crate::EditError::EntityDespawned);
/// the others fall back to a neutral value.
pub trait Entity: Send + Sync {
    fn state(&self) -> Result<BaseEntity>;

    /// [`Location::nowhere`] once despawned.
    fn location(&self) -> Location;

    /// Returns `false` if the entity is gone or the destination is not
    /// reachable.
    fn set_location(&self, location: &Location) -> bool;

    /// [`NullWorld`](crate::world::NullWorld) once despawned.
    fn extent(&self) -> Arc<dyn World>;

    /// Despawn. Returns `false` if already gone.
    fn remove(&self) -> bool;

    /// `None` once despawned.
    fn properties(&self) -> Option<EntityProperties>;

    fn is_alive(&self) -> bool;

    fn as_any(&self) -> &dyn Any;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandSide {
    MainHand,
    OffHand,
}

pub trait Player: Entity {
    fn name(&self) -> Result<String>;

    fn unique_id(&self) -> Result<Uuid>;

    fn item_in_hand(&self, hand: HandSide) -> Result<BaseItemStack>;

    /// Fails with [`EditError::NotABlock`](crate::EditError::NotABlock) when
    /// the held item cannot be placed.
    fn block_in_hand(&self, hand: HandSide) -> Result<BlockState>;

    fn give_item(&self, item: &BaseItemStack) -> Result<()>;

    /// The world the player is in, or [`NullWorld`](crate::world::NullWorld).
    fn world(&self) -> Arc<dyn World>;
}
