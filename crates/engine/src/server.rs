//! The live registry of levels and entities.
//!
//! Everything outside the server refers to levels and entities by
//! generational key and re-resolves through here on every access, so an
//! unload or despawn is visible to the very next call.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use slotmap::SlotMap;
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::entity::{Entity, EntityClass, EntityId};
use crate::item::{ItemStack, NbtCompound};
use crate::palette::BlockPalette;
use crate::world::position::{BlockPos, Location, Vec3};
use crate::world::{Level, LevelId};

pub struct Server {
    palette: Arc<BlockPalette>,
    items: Catalog,
    biomes: Catalog,
    entity_types: Catalog,
    data_path: PathBuf,
    levels: RwLock<SlotMap<LevelId, Arc<Level>>>,
    entities: RwLock<SlotMap<EntityId, Entity>>,
}

impl Server {
    pub fn new(
        palette: BlockPalette,
        items: Catalog,
        biomes: Catalog,
        entity_types: Catalog,
    ) -> Self {
        Self {
            palette: Arc::new(palette),
            items,
            biomes,
            entity_types,
            data_path: PathBuf::from("."),
            levels: RwLock::new(SlotMap::with_key()),
            entities: RwLock::new(SlotMap::with_key()),
        }
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn palette(&self) -> &BlockPalette {
        &self.palette
    }

    pub fn items(&self) -> &Catalog {
        &self.items
    }

    pub fn biomes(&self) -> &Catalog {
        &self.biomes
    }

    pub fn entity_types(&self) -> &Catalog {
        &self.entity_types
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    // ── Levels ──────────────────────────────────────────────────────────

    pub fn load_level(&self, name: &str, spawn: BlockPos) -> LevelId {
        let id = self
            .levels
            .write()
            .expect("level table poisoned")
            .insert(Arc::new(Level::new(name, spawn)));
        tracing::info!("Level '{}' loaded", name);
        id
    }

    /// Unload a level and despawn everything in it. Returns `false` if it was
    /// not loaded.
    ///
    /// Both tables stay locked until the despawn finishes, so no spawn or
    /// teleport can land in the level while it is going away.
    pub fn unload_level(&self, id: LevelId) -> bool {
        let mut levels = self.levels.write().expect("level table poisoned");
        let Some(level) = levels.remove(id) else {
            return false;
        };
        let mut entities = self.entities.write().expect("entity table poisoned");
        let before = entities.len();
        entities.retain(|_, e| e.location.level != id);
        tracing::info!(
            "Level '{}' unloaded ({} entities despawned)",
            level.name(),
            before - entities.len()
        );
        true
    }

    pub fn level(&self, id: LevelId) -> Option<Arc<Level>> {
        self.levels
            .read()
            .expect("level table poisoned")
            .get(id)
            .cloned()
    }

    pub fn level_by_name(&self, name: &str) -> Option<(LevelId, Arc<Level>)> {
        self.levels
            .read()
            .expect("level table poisoned")
            .iter()
            .find(|(_, level)| level.name() == name)
            .map(|(id, level)| (id, Arc::clone(level)))
    }

    pub fn levels(&self) -> Vec<(LevelId, Arc<Level>)> {
        self.levels
            .read()
            .expect("level table poisoned")
            .iter()
            .map(|(id, level)| (id, Arc::clone(level)))
            .collect()
    }

    // ── Entities ────────────────────────────────────────────────────────

    /// Spawn into the entity's level. Returns `None` if that level is not
    /// loaded.
    pub fn spawn(&self, entity: Entity) -> Option<EntityId> {
        // Lock order is levels, then entities. Holding the level table across
        // the insert keeps `unload_level` from slipping in between.
        let levels = self.levels.read().expect("level table poisoned");
        if !levels.contains_key(entity.location.level) {
            return None;
        }
        let id = self
            .entities
            .write()
            .expect("entity table poisoned")
            .insert(entity);
        drop(levels);
        Some(id)
    }

    /// Remove an entity. Returns `false` if it was already gone.
    pub fn despawn(&self, id: EntityId) -> bool {
        self.entities
            .write()
            .expect("entity table poisoned")
            .remove(id)
            .is_some()
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entities
            .read()
            .expect("entity table poisoned")
            .contains_key(id)
    }

    /// Run `f` against a live entity. The table stays read-locked while `f`
    /// runs, so `f` must not call back into the server.
    pub fn with_entity<R>(&self, id: EntityId, f: impl FnOnce(&Entity) -> R) -> Option<R> {
        self.entities
            .read()
            .expect("entity table poisoned")
            .get(id)
            .map(f)
    }

    /// Like [`with_entity`](Self::with_entity), with write access.
    pub fn with_entity_mut<R>(&self, id: EntityId, f: impl FnOnce(&mut Entity) -> R) -> Option<R> {
        self.entities
            .write()
            .expect("entity table poisoned")
            .get_mut(id)
            .map(f)
    }

    pub fn entities_in(&self, level: LevelId) -> Vec<EntityId> {
        self.entities
            .read()
            .expect("entity table poisoned")
            .iter()
            .filter(|(_, e)| e.location.level == level)
            .map(|(id, _)| id)
            .collect()
    }

    /// Move an entity, possibly across levels. Fails if the entity is gone or
    /// the destination level is not loaded.
    pub fn teleport(&self, id: EntityId, to: Location) -> bool {
        let levels = self.levels.read().expect("level table poisoned");
        if !levels.contains_key(to.level) {
            return false;
        }
        let moved = self
            .entities
            .write()
            .expect("entity table poisoned")
            .get_mut(id)
            .map(|e| e.location = to)
            .is_some();
        drop(levels);
        moved
    }

    pub fn players(&self) -> Vec<EntityId> {
        self.entities
            .read()
            .expect("entity table poisoned")
            .iter()
            .filter(|(_, e)| e.is_player())
            .map(|(id, _)| id)
            .collect()
    }

    pub fn player_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities
            .read()
            .expect("entity table poisoned")
            .iter()
            .find(|(_, e)| e.player.as_ref().is_some_and(|p| p.name.eq_ignore_ascii_case(name)))
            .map(|(id, _)| id)
    }

    pub fn player_by_uuid(&self, uuid: Uuid) -> Option<EntityId> {
        self.entities
            .read()
            .expect("entity table poisoned")
            .iter()
            .find(|(_, e)| e.is_player() && e.unique_id == uuid)
            .map(|(id, _)| id)
    }

    // ── Items ───────────────────────────────────────────────────────────

    /// Build an item stack, attaching the block form when a block kind of
    /// the same name exists.
    pub fn create_item(
        &self,
        id: &str,
        meta: i16,
        count: u32,
        tag: Option<NbtCompound>,
    ) -> ItemStack {
        ItemStack::new(id, count)
            .with_meta(meta)
            .with_tag(tag)
            .with_block(self.palette.default_state(id))
    }

    /// Spawn a dropped-item entity carrying `item`.
    pub fn drop_item(&self, level: LevelId, position: Vec3, item: &ItemStack) -> Option<EntityId> {
        if item.is_air() {
            return None;
        }
        let mut stack = HashMap::new();
        stack.insert("Name".to_string(), fastnbt::Value::String(item.id().to_string()));
        stack.insert(
            "Count".to_string(),
            fastnbt::Value::Int(item.count().min(i32::MAX as u32) as i32),
        );
        stack.insert("Damage".to_string(), fastnbt::Value::Short(item.meta()));
        if let Some(tag) = item.tag() {
            stack.insert("tag".to_string(), fastnbt::Value::Compound(tag.clone()));
        }
        let mut tag = NbtCompound::new();
        tag.insert("Item".to_string(), fastnbt::Value::Compound(stack));

        self.spawn(
            Entity::new("minecraft:item", EntityClass::Item, Location::new(level, position))
                .with_tag(tag),
        )
    }
}

impl std::fmt::Debug for Server {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Server")
            .field("palette", &self.palette)
            .field("items", &self.items.len())
            .field("levels", &self.levels.read().map(|l| l.len()).unwrap_or(0))
            .finish()
    }
}
