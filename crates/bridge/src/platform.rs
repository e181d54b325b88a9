//! The platform services the editor queries: loaded worlds, connected
//! players, and mob-type validation.

use std::sync::Arc;

use cinder_edit::entity::{Entity, Player};
use cinder_edit::identifier::Identifier;
use cinder_edit::platform::Platform;
use cinder_edit::world::World;
use cinder_engine::entity::EntityId;

use crate::bridge::Bridge;
use crate::player::BridgePlayer;
use crate::registry;

#[derive(Clone)]
pub struct BridgePlatform {
    bridge: Arc<Bridge>,
}

impl BridgePlatform {
    pub(crate) fn new(bridge: Arc<Bridge>) -> Self {
        Self { bridge }
    }

    fn wrap_players(&self, ids: impl IntoIterator<Item = EntityId>) -> Vec<Box<dyn Player>> {
        ids.into_iter()
            .filter_map(|id| self.bridge.wrap_player(id).ok())
            .map(|p| Box::new(p) as Box<dyn Player>)
            .collect()
    }
}

impl Platform for BridgePlatform {
    fn worlds(&self) -> Vec<Arc<dyn World>> {
        self.bridge
            .server()
            .levels()
            .into_iter()
            .filter_map(|(id, _)| self.bridge.wrap_world(id).ok())
            .map(|w| Arc::new(w) as Arc<dyn World>)
            .collect()
    }

    /// A stale handle of our own falls back to a live level of the same
    /// name.
    fn match_world(&self, world: &dyn World) -> Option<Arc<dyn World>> {
        let level = match self.bridge.resolve_level(world) {
            Ok(level) => level,
            Err(_) => self.bridge.server().level_by_name(&world.name())?.0,
        };
        let wrapped = self.bridge.wrap_world(level).ok()?;
        Some(Arc::new(wrapped))
    }

    fn match_player(&self, player: &dyn Player) -> Option<Box<dyn Player>> {
        if let Some(own) = player.as_any().downcast_ref::<BridgePlayer>() {
            if own.is_alive() {
                return Some(Box::new(own.clone()));
            }
        }
        let server = self.bridge.server();
        let id = player
            .unique_id()
            .ok()
            .and_then(|uuid| server.player_by_uuid(uuid))
            .or_else(|| player.name().ok().and_then(|name| server.player_by_name(&name)))?;
        self.wrap_players([id]).pop()
    }

    fn connected_players(&self) -> Vec<Box<dyn Player>> {
        self.wrap_players(self.bridge.server().players())
    }

    /// Only explicitly namespaced vanilla ids the host has registered
    /// qualify; a bare `pig` does not.
    fn is_valid_mob_type(&self, id: &str) -> bool {
        let Some((namespace, _)) = id.trim().split_once(':') else {
            return false;
        };
        if !namespace.eq_ignore_ascii_case(Identifier::DEFAULT_NAMESPACE) {
            return false;
        }
        let Ok(id) = Identifier::parse(id) else {
            return false;
        };
        registry::host_entry(self.bridge.server().entity_types(), &id).is_some()
    }
}

impl std::fmt::Debug for BridgePlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgePlatform").finish_non_exhaustive()
    }
}
