use super::block::BlockId;
use super::position::LocalBlockPos;
use std::collections::HashMap;

/// Number of blocks along each axis of a chunk section.
pub const SECTION_SIZE: usize = 16;
/// Total block count in one section.
const SECTION_VOLUME: usize = SECTION_SIZE * SECTION_SIZE * SECTION_SIZE;
/// Highest block light level.
pub const MAX_LIGHT: u8 = 15;

/// A 16x16x16 cube of block states plus their block light.
///
/// Stored as flat arrays in YZX order (x fastest). A section that is entirely
/// air and unlit is never kept (see `Chunk`).
#[derive(Clone)]
pub struct ChunkSection {
    blocks: Box<[BlockId; SECTION_VOLUME]>,
    light: Box<[u8; SECTION_VOLUME]>,
}

impl ChunkSection {
    pub fn new_filled(block: BlockId) -> Self {
        Self {
            blocks: Box::new([block; SECTION_VOLUME]),
            light: Box::new([0; SECTION_VOLUME]),
        }
    }

    pub fn new_empty() -> Self {
        Self::new_filled(BlockId::AIR)
    }

    #[inline]
    const fn index(x: u8, y: u8, z: u8) -> usize {
        (y as usize) * SECTION_SIZE * SECTION_SIZE + (z as usize) * SECTION_SIZE + (x as usize)
    }

    #[inline]
    pub fn get(&self, x: u8, y: u8, z: u8) -> BlockId {
        self.blocks[Self::index(x, y, z)]
    }

    /// Store `block` and return what was there before.
    #[inline]
    pub fn set(&mut self, x: u8, y: u8, z: u8, block: BlockId) -> BlockId {
        std::mem::replace(&mut self.blocks[Self::index(x, y, z)], block)
    }

    #[inline]
    pub fn light(&self, x: u8, y: u8, z: u8) -> u8 {
        self.light[Self::index(x, y, z)]
    }

    #[inline]
    pub fn set_light(&mut self, x: u8, y: u8, z: u8, level: u8) {
        self.light[Self::index(x, y, z)] = level.min(MAX_LIGHT);
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(|b| *b == BlockId::AIR) && self.light.iter().all(|l| *l == 0)
    }
}

/// A column of chunk sections, keyed by section index (y >> 4).
///
/// Only non-empty sections are stored (sparse).
pub struct Chunk {
    sections: HashMap<i32, ChunkSection>,
}

impl Chunk {
    pub fn new() -> Self {
        Self {
            sections: HashMap::new(),
        }
    }

    pub fn get_block(&self, pos: LocalBlockPos) -> BlockId {
        match self.sections.get(&pos.section_index()) {
            Some(section) => section.get(pos.x, pos.section_local_y(), pos.z),
            None => BlockId::AIR,
        }
    }

    /// Store `block` at `pos`, returning the previous state.
    pub fn set_block(&mut self, pos: LocalBlockPos, block: BlockId) -> BlockId {
        let section_idx = pos.section_index();

        if block == BlockId::AIR {
            let Some(section) = self.sections.get_mut(&section_idx) else {
                return BlockId::AIR;
            };
            let previous = section.set(pos.x, pos.section_local_y(), pos.z, block);
            if section.is_empty() {
                self.sections.remove(&section_idx);
            }
            previous
        } else {
            self.sections
                .entry(section_idx)
                .or_insert_with(ChunkSection::new_empty)
                .set(pos.x, pos.section_local_y(), pos.z, block)
        }
    }

    pub fn get_light(&self, pos: LocalBlockPos) -> u8 {
        self.sections
            .get(&pos.section_index())
            .map(|s| s.light(pos.x, pos.section_local_y(), pos.z))
            .unwrap_or(0)
    }

    pub fn set_light(&mut self, pos: LocalBlockPos, level: u8) {
        let section_idx = pos.section_index();
        if level == 0 && !self.sections.contains_key(&section_idx) {
            return;
        }
        let section = self
            .sections
            .entry(section_idx)
            .or_insert_with(ChunkSection::new_empty);
        section.set_light(pos.x, pos.section_local_y(), pos.z, level);
        if section.is_empty() {
            self.sections.remove(&section_idx);
        }
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

impl Default for Chunk {
    fn default() -> Self {
        Self::new()
    }
}
