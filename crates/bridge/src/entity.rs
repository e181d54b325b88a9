//! Entity handles.
//!
//! Like worlds, a `BridgeEntity` holds only a generational key and
//! re-resolves it on every call.

use std::any::Any;
use std::sync::Arc;

use cinder_edit::entity::{BaseEntity, Entity, EntityProperties};
use cinder_edit::identifier::Identifier;
use cinder_edit::world::{Location, NullWorld, World};
use cinder_edit::Result as EditResult;
use cinder_engine::entity::{Entity as HostEntity, EntityClass, EntityId};

use crate::bridge::Bridge;
use crate::error::{BridgeError, Result};

#[derive(Clone)]
pub struct BridgeEntity {
    bridge: Arc<Bridge>,
    id: EntityId,
}

impl BridgeEntity {
    pub(crate) fn new(bridge: Arc<Bridge>, id: EntityId) -> Self {
        Self { bridge, id }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn bridge(&self) -> &Arc<Bridge> {
        &self.bridge
    }

    /// Run `f` against the live host entity, or fail with `EntityDespawned`.
    pub(crate) fn with_host<R>(&self, f: impl FnOnce(&HostEntity) -> R) -> Result<R> {
        self.bridge
            .server()
            .with_entity(self.id, f)
            .ok_or(BridgeError::EntityDespawned)
    }
}

impl Entity for BridgeEntity {
    fn state(&self) -> EditResult<BaseEntity> {
        let (kind, tag) = self.with_host(|e| (e.kind.clone(), e.tag.clone()))?;
        let id = Identifier::parse(&kind).map_err(BridgeError::from)?;
        let entity_type = self.bridge.registry().entity_type_or_stub(&id);
        let tag = (!tag.is_empty()).then(|| self.bridge.tags().to_canonical(&tag));
        Ok(BaseEntity::new(entity_type).with_tag(tag))
    }

    fn location(&self) -> Location {
        match self.with_host(|e| e.location) {
            Ok(location) => self.bridge.adapt_location(&location),
            Err(_) => Location::nowhere(),
        }
    }

    fn set_location(&self, location: &Location) -> bool {
        let Ok(target) = self.bridge.adapt_to_host_location(location) else {
            return false;
        };
        self.bridge.server().teleport(self.id, target)
    }

    fn extent(&self) -> Arc<dyn World> {
        let Ok(level) = self.with_host(|e| e.location.level) else {
            return NullWorld::shared();
        };
        match self.bridge.wrap_world(level) {
            Ok(world) => Arc::new(world),
            Err(_) => NullWorld::shared(),
        }
    }

    fn remove(&self) -> bool {
        self.bridge.server().despawn(self.id)
    }

    fn properties(&self) -> Option<EntityProperties> {
        self.with_host(entity_properties).ok()
    }

    fn is_alive(&self) -> bool {
        self.bridge.server().is_alive(self.id)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for BridgeEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeEntity").field("id", &self.id).finish()
    }
}

/// The host class a spawned entity of type `id` gets.
pub fn class_for_type(id: &Identifier) -> EntityClass {
    match id.path() {
        "player" => EntityClass::Player,
        "item" => EntityClass::Item,
        "falling_block" => EntityClass::FallingBlock,
        "arrow" | "snowball" | "trident" => EntityClass::Projectile,
        "painting" => EntityClass::Painting,
        "item_frame" => EntityClass::ItemFrame,
        "boat" => EntityClass::Boat,
        "minecart" => EntityClass::Minecart,
        "tnt_minecart" => EntityClass::TntMinecart,
        "tnt" => EntityClass::PrimedTnt,
        "experience_orb" => EntityClass::ExperienceOrb,
        "armor_stand" => EntityClass::ArmorStand,
        "pig" | "cow" | "sheep" | "chicken" | "wolf" => EntityClass::Animal,
        "bat" => EntityClass::Bat,
        "villager" => EntityClass::Villager,
        "iron_golem" => EntityClass::IronGolem,
        "zombie" | "creeper" | "skeleton" | "spider" => EntityClass::Monster,
        _ => EntityClass::Other,
    }
}

pub fn entity_properties(entity: &HostEntity) -> EntityProperties {
    let class = entity.class;
    let living = class.is_living();
    EntityProperties {
        player_derived: matches!(class, EntityClass::Player | EntityClass::Human),
        projectile: class == EntityClass::Projectile,
        item: class == EntityClass::Item,
        falling_block: class == EntityClass::FallingBlock,
        painting: class == EntityClass::Painting,
        item_frame: class == EntityClass::ItemFrame,
        boat: class == EntityClass::Boat,
        minecart: matches!(class, EntityClass::Minecart | EntityClass::TntMinecart),
        tnt: matches!(class, EntityClass::PrimedTnt | EntityClass::TntMinecart),
        experience_orb: class == EntityClass::ExperienceOrb,
        living,
        animal: class == EntityClass::Animal,
        ambient: class == EntityClass::Bat,
        npc: class == EntityClass::Villager,
        golem: class == EntityClass::IronGolem,
        tamed: entity.tamed,
        tagged: living && entity.name_tag.is_some(),
        armor_stand: class == EntityClass::ArmorStand,
        pasteable: class != EntityClass::Player,
    }
}
