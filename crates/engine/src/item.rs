//! Item stacks and inventories.

use std::collections::HashMap;

use crate::world::block::BlockId;

/// Root of an NBT tag tree as the engine stores it.
pub type NbtCompound = HashMap<String, fastnbt::Value>;

/// Item id of the empty stack.
pub const AIR_ITEM: &str = "minecraft:air";

#[derive(Debug, Clone, PartialEq)]
pub struct ItemStack {
    id: String,
    meta: i16,
    count: u32,
    tag: Option<NbtCompound>,
    block: Option<BlockId>,
}

impl ItemStack {
    /// A plain stack with no tag and no block form. Use
    /// `Server::create_item` to get the block association right.
    pub fn new(id: impl Into<String>, count: u32) -> Self {
        Self {
            id: id.into(),
            meta: 0,
            count,
            tag: None,
            block: None,
        }
    }

    pub fn air() -> Self {
        Self::new(AIR_ITEM, 0)
    }

    pub fn with_meta(mut self, meta: i16) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_tag(mut self, tag: Option<NbtCompound>) -> Self {
        self.tag = tag;
        self
    }

    pub fn with_block(mut self, block: Option<BlockId>) -> Self {
        self.block = block;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn meta(&self) -> i16 {
        self.meta
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = count;
    }

    pub fn tag(&self) -> Option<&NbtCompound> {
        self.tag.as_ref()
    }

    /// The block this item places, if it is a block item.
    pub fn block(&self) -> Option<BlockId> {
        self.block
    }

    pub fn is_air(&self) -> bool {
        self.count == 0 || self.id.eq_ignore_ascii_case(AIR_ITEM)
    }
}

/// A player's carried items.
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    hand: ItemStack,
    off_hand: ItemStack,
    contents: Vec<ItemStack>,
    capacity: usize,
}

impl Inventory {
    pub const DEFAULT_CAPACITY: usize = 36;

    pub fn new(capacity: usize) -> Self {
        Self {
            hand: ItemStack::air(),
            off_hand: ItemStack::air(),
            contents: Vec::new(),
            capacity,
        }
    }

    pub fn item_in_hand(&self) -> &ItemStack {
        &self.hand
    }

    pub fn off_hand(&self) -> &ItemStack {
        &self.off_hand
    }

    pub fn set_item_in_hand(&mut self, item: ItemStack) {
        self.hand = item;
    }

    pub fn set_off_hand(&mut self, item: ItemStack) {
        self.off_hand = item;
    }

    pub fn contents(&self) -> &[ItemStack] {
        &self.contents
    }

    /// Merge into an existing stack of the same id and tag, else take a free
    /// slot. Returns `false` when the inventory is full.
    pub fn add_item(&mut self, item: ItemStack) -> bool {
        if item.is_air() {
            return true;
        }
        if let Some(existing) = self
            .contents
            .iter_mut()
            .find(|s| s.id == item.id && s.meta == item.meta && s.tag == item.tag)
        {
            existing.count += item.count;
            return true;
        }
        if self.contents.len() >= self.capacity {
            return false;
        }
        self.contents.push(item);
        true
    }

    pub fn clear_all(&mut self) {
        self.hand = ItemStack::air();
        self.off_hand = ItemStack::air();
        self.contents.clear();
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
