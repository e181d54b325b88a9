//! Entities: everything in a level that is not a block.

use slotmap::new_key_type;
use uuid::Uuid;

use crate::item::{Inventory, NbtCompound};
use crate::world::position::Location;

new_key_type! {
    /// Generational handle for a spawned entity. Stops resolving the moment
    /// the entity despawns.
    pub struct EntityId;
}

/// Behavioural class of an entity. Decides which gameplay systems apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Player,
    /// Human-shaped NPC that is not a connected player.
    Human,
    Item,
    FallingBlock,
    Projectile,
    Painting,
    ItemFrame,
    Boat,
    Minecart,
    TntMinecart,
    PrimedTnt,
    ExperienceOrb,
    ArmorStand,
    Animal,
    Bat,
    Villager,
    IronGolem,
    Monster,
    Other,
}

impl EntityClass {
    /// Has health and AI (or a player behind it).
    pub const fn is_living(self) -> bool {
        matches!(
            self,
            EntityClass::Player
                | EntityClass::Human
                | EntityClass::Animal
                | EntityClass::Bat
                | EntityClass::Villager
                | EntityClass::IronGolem
                | EntityClass::Monster
        )
    }
}

/// Data only connected players carry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerData {
    pub name: String,
    pub display_name: String,
    pub inventory: Inventory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Registered type id, e.g. `minecraft:pig`.
    pub kind: String,
    pub class: EntityClass,
    pub unique_id: Uuid,
    pub location: Location,
    pub tag: NbtCompound,
    pub name_tag: Option<String>,
    pub tamed: bool,
    pub player: Option<PlayerData>,
}

impl Entity {
    pub fn new(kind: impl Into<String>, class: EntityClass, location: Location) -> Self {
        Self {
            kind: kind.into(),
            class,
            unique_id: Uuid::new_v4(),
            location,
            tag: NbtCompound::new(),
            name_tag: None,
            tamed: false,
            player: None,
        }
    }

    /// A connected player named `name`.
    pub fn player(name: &str, location: Location) -> Self {
        let mut entity = Self::new("minecraft:player", EntityClass::Player, location);
        entity.player = Some(PlayerData {
            name: name.to_string(),
            display_name: name.to_string(),
            inventory: Inventory::default(),
        });
        entity
    }

    pub fn with_tag(mut self, tag: NbtCompound) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_name_tag(mut self, name: impl Into<String>) -> Self {
        self.name_tag = Some(name.into());
        self
    }

    pub fn tamed(mut self) -> Self {
        self.tamed = true;
        self
    }

    pub fn is_player(&self) -> bool {
        self.player.is_some()
    }
}
