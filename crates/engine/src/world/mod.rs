pub mod block;
pub mod chunk;
pub mod position;

use block::BlockId;
use chunk::Chunk;
use dashmap::DashMap;
use position::{BlockPos, ChunkPos};
use slotmap::new_key_type;

use crate::item::Inventory;

new_key_type! {
    /// Generational handle for a loaded level. Once the level is unloaded the
    /// key never resolves again, even if its slot is reused.
    pub struct LevelId;
}

/// One loaded dimension. Thread-safe, lock-sharded by chunk.
///
/// Levels are owned by the `Server`; everything else refers to them through
/// a `LevelId` and re-resolves on use.
pub struct Level {
    name: String,
    folder: String,
    spawn: BlockPos,
    chunks: DashMap<ChunkPos, Chunk>,
    /// Inventories of container blocks, keyed by position.
    containers: DashMap<BlockPos, Inventory>,
}

impl Level {
    pub fn new(name: impl Into<String>, spawn: BlockPos) -> Self {
        let name = name.into();
        let folder = name.to_ascii_lowercase().replace(' ', "_");
        Self {
            name,
            folder,
            spawn,
            chunks: DashMap::new(),
            containers: DashMap::new(),
        }
    }

    /// Display name, unique among loaded levels.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Folder name under the server's `worlds/` directory.
    pub fn folder_id(&self) -> &str {
        &self.folder
    }

    pub fn spawn(&self) -> BlockPos {
        self.spawn
    }

    /// Read a block at an absolute position. Returns AIR for missing chunks.
    pub fn get_block(&self, pos: BlockPos) -> BlockId {
        match self.chunks.get(&pos.chunk()) {
            Some(chunk) => chunk.get_block(pos.local()),
            None => BlockId::AIR,
        }
    }

    /// Write a block at an absolute position, creating the chunk if needed.
    /// Returns the state that was replaced. Any inventory stored at the
    /// position is dropped when the state changes.
    ///
    /// Takes `&self` because `DashMap` provides interior mutability via
    /// per-shard locking.
    pub fn set_block(&self, pos: BlockPos, block: BlockId) -> BlockId {
        let previous = self
            .chunks
            .entry(pos.chunk())
            .or_default()
            .set_block(pos.local(), block);
        if previous != block {
            self.containers.remove(&pos);
        }
        previous
    }

    pub fn get_block_light(&self, pos: BlockPos) -> u8 {
        self.chunks
            .get(&pos.chunk())
            .map(|chunk| chunk.get_light(pos.local()))
            .unwrap_or(0)
    }

    pub fn set_block_light(&self, pos: BlockPos, level: u8) {
        self.chunks
            .entry(pos.chunk())
            .or_default()
            .set_light(pos.local(), level);
    }

    pub fn has_chunk(&self, pos: ChunkPos) -> bool {
        self.chunks.contains_key(&pos)
    }

    /// Insert a pre-built chunk (generation/loading).
    pub fn insert_chunk(&self, pos: ChunkPos, chunk: Chunk) {
        self.chunks.insert(pos, chunk);
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    // ── Containers ──────────────────────────────────────────────────────

    /// Snapshot of the inventory stored at `pos`.
    pub fn container(&self, pos: BlockPos) -> Option<Inventory> {
        self.containers.get(&pos).map(|inv| inv.clone())
    }

    /// Run `f` against the inventory at `pos`, creating an empty one first.
    /// Whether the block there is a container is the caller's concern.
    pub fn with_container_mut<R>(&self, pos: BlockPos, f: impl FnOnce(&mut Inventory) -> R) -> R {
        f(&mut self.containers.entry(pos).or_default())
    }

    /// Empty the inventory at `pos`. Returns `false` if nothing was stored
    /// there.
    pub fn clear_container(&self, pos: BlockPos) -> bool {
        match self.containers.get_mut(&pos) {
            Some(mut inv) => {
                inv.clear_all();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level")
            .field("name", &self.name)
            .field("spawn", &self.spawn)
            .field("chunks", &self.chunks.len())
            .field("containers", &self.containers.len())
            .finish()
    }
}
