//! The services a game platform offers the editor.

use std::sync::Arc;

use crate::entity::Player;
use crate::world::World;

pub trait Platform: Send + Sync {
    /// Every currently loaded world.
    fn worlds(&self) -> Vec<Arc<dyn World>>;

    /// Resolve a world from another source (a stale handle, a world from a
    /// saved session) to a live one of this platform.
    fn match_world(&self, world: &dyn World) -> Option<Arc<dyn World>>;

    fn match_player(&self, player: &dyn Player) -> Option<Box<dyn Player>>;

    fn connected_players(&self) -> Vec<Box<dyn Player>>;

    /// Whether `id` names a mob the platform can spawn.
    fn is_valid_mob_type(&self, id: &str) -> bool;
}
