//! Player handles: an entity handle plus the player-only surface.

use std::any::Any;
use std::sync::Arc;

use cinder_edit::block::BlockState;
use cinder_edit::entity::{BaseEntity, Entity, EntityProperties, HandSide, Player};
use cinder_edit::item::BaseItemStack;
use cinder_edit::world::{Location, World};
use cinder_edit::Result as EditResult;
use cinder_engine::entity::{EntityId, PlayerData};
use cinder_engine::item::ItemStack;

use crate::bridge::Bridge;
use crate::entity::BridgeEntity;
use crate::error::{BridgeError, Result};

#[derive(Clone)]
pub struct BridgePlayer {
    entity: BridgeEntity,
}

impl BridgePlayer {
    pub(crate) fn new(bridge: Arc<Bridge>, id: EntityId) -> Self {
        Self {
            entity: BridgeEntity::new(bridge, id),
        }
    }

    pub fn id(&self) -> EntityId {
        self.entity.id()
    }

    fn bridge(&self) -> &Arc<Bridge> {
        self.entity.bridge()
    }

    fn with_player<R>(&self, f: impl FnOnce(&PlayerData) -> R) -> Result<R> {
        self.entity
            .with_host(|e| e.player.as_ref().map(f))?
            .ok_or(BridgeError::NotAPlayer)
    }

    fn held(&self, hand: HandSide) -> Result<ItemStack> {
        self.with_player(|p| match hand {
            HandSide::MainHand => p.inventory.item_in_hand().clone(),
            HandSide::OffHand => p.inventory.off_hand().clone(),
        })
    }
}

impl Entity for BridgePlayer {
    fn state(&self) -> EditResult<BaseEntity> {
        self.entity.state()
    }

    fn location(&self) -> Location {
        self.entity.location()
    }

    fn set_location(&self, location: &Location) -> bool {
        self.entity.set_location(location)
    }

    fn extent(&self) -> Arc<dyn World> {
        self.entity.extent()
    }

    fn remove(&self) -> bool {
        self.entity.remove()
    }

    fn properties(&self) -> Option<EntityProperties> {
        self.entity.properties()
    }

    fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Player for BridgePlayer {
    fn name(&self) -> EditResult<String> {
        Ok(self.with_player(|p| p.name.clone())?)
    }

    fn unique_id(&self) -> EditResult<uuid::Uuid> {
        Ok(self.entity.with_host(|e| e.unique_id)?)
    }

    fn item_in_hand(&self, hand: HandSide) -> EditResult<BaseItemStack> {
        let held = self.held(hand)?;
        Ok(self.bridge().adapt_item(&held)?)
    }

    fn block_in_hand(&self, hand: HandSide) -> EditResult<BlockState> {
        let held = self.held(hand)?;
        let state = self.bridge().item_as_block_state(&held)?;
        Ok(state.as_ref().clone())
    }

    /// Overflow that does not fit the inventory lands at the player's feet.
    fn give_item(&self, item: &BaseItemStack) -> EditResult<()> {
        let stack = self.bridge().adapt_to_host_item(item)?;
        if stack.is_air() {
            return Ok(());
        }
        let server = self.bridge().server();
        let (stored, location) = server
            .with_entity_mut(self.id(), |e| {
                let stored = e
                    .player
                    .as_mut()
                    .map(|p| p.inventory.add_item(stack.clone()));
                (stored, e.location)
            })
            .ok_or(BridgeError::EntityDespawned)?;
        match stored {
            None => Err(BridgeError::NotAPlayer.into()),
            Some(true) => Ok(()),
            Some(false) => {
                tracing::debug!("Inventory full, dropping {} at player", stack.id());
                server
                    .drop_item(location.level, location.position, &stack)
                    .map(|_| ())
                    .ok_or_else(|| BridgeError::EntityDespawned.into())
            }
        }
    }

    fn world(&self) -> Arc<dyn World> {
        self.entity.extent()
    }
}

impl std::fmt::Debug for BridgePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgePlayer").field("id", &self.id()).finish()
    }
}
