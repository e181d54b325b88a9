//! The bridge context: one explicitly owned value holding the registries and
//! caches every adapter operation consults.

use std::sync::Arc;

use cinder_edit::block::{BlockMaterial, BlockState};
use cinder_engine::entity::EntityId;
use cinder_engine::palette::KindId;
use cinder_engine::server::Server;
use cinder_engine::world::LevelId;
use cinder_engine::world::block::BlockId;
use dashmap::DashMap;

use crate::config::BridgeConfig;
use crate::entity::BridgeEntity;
use crate::error::{BridgeError, Result};
use crate::nbt::{self, TagConverter};
use crate::platform::BridgePlatform;
use crate::player::BridgePlayer;
use crate::property::PropertyMapper;
use crate::registry::{BootstrapReport, IdentifierRegistry};
use crate::world::BridgeWorld;

pub struct Bridge {
    server: Arc<Server>,
    config: BridgeConfig,
    registry: IdentifierRegistry,
    properties: PropertyMapper,
    /// Host runtime id → the one canonical state handed out for it.
    pub(crate) states: DashMap<BlockId, Arc<BlockState>>,
    pub(crate) materials: DashMap<KindId, BlockMaterial>,
    tags: Box<dyn TagConverter>,
}

impl Bridge {
    pub fn new(server: Arc<Server>, config: BridgeConfig) -> Self {
        let tags = nbt::for_mode(config.tag_mode);
        Self {
            server,
            config,
            registry: IdentifierRegistry::new(),
            properties: PropertyMapper::new(),
            states: DashMap::new(),
            materials: DashMap::new(),
            tags,
        }
    }

    /// Construct and bootstrap in one go.
    pub fn start(server: Arc<Server>, config: BridgeConfig) -> Arc<Self> {
        let bridge = Arc::new(Self::new(server, config));
        bridge.bootstrap();
        bridge
    }

    /// Sync the canonical catalogs with the host's. Safe to repeat.
    pub fn bootstrap(&self) -> BootstrapReport {
        self.registry.bootstrap(&self.server, &self.config)
    }

    pub fn server(&self) -> &Arc<Server> {
        &self.server
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    pub fn registry(&self) -> &IdentifierRegistry {
        &self.registry
    }

    pub fn properties(&self) -> &PropertyMapper {
        &self.properties
    }

    pub fn tags(&self) -> &dyn TagConverter {
        self.tags.as_ref()
    }

    /// Number of host states translated so far.
    pub fn cached_states(&self) -> usize {
        self.states.len()
    }

    // ── Handles ─────────────────────────────────────────────────────────

    pub fn wrap_world(self: &Arc<Self>, level: LevelId) -> Result<BridgeWorld> {
        let live = self
            .server
            .level(level)
            .ok_or_else(|| BridgeError::WorldUnloaded(format!("{level:?}")))?;
        Ok(BridgeWorld::new(Arc::clone(self), level, &live))
    }

    pub fn wrap_entity(self: &Arc<Self>, id: EntityId) -> Result<BridgeEntity> {
        if !self.server.is_alive(id) {
            return Err(BridgeError::EntityDespawned);
        }
        Ok(BridgeEntity::new(Arc::clone(self), id))
    }

    pub fn wrap_player(self: &Arc<Self>, id: EntityId) -> Result<BridgePlayer> {
        match self.server.with_entity(id, |e| e.is_player()) {
            Some(true) => Ok(BridgePlayer::new(Arc::clone(self), id)),
            Some(false) => Err(BridgeError::NotAPlayer),
            None => Err(BridgeError::EntityDespawned),
        }
    }

    pub fn platform(self: &Arc<Self>) -> BridgePlatform {
        BridgePlatform::new(Arc::clone(self))
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("config", &self.config)
            .field("blocks", &self.registry.blocks().len())
            .field("properties", &self.properties.len())
            .field("states", &self.states.len())
            .finish()
    }
}
