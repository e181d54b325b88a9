//! Item types and stacks.

use std::fmt;
use std::sync::Arc;

use crate::identifier::Identifier;
use crate::tag::CompoundTag;

#[derive(Debug, PartialEq, Eq, Hash)]
pub struct ItemType {
    id: Identifier,
}

impl ItemType {
    pub fn new(id: Identifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(f)
    }
}

/// An amount of one item type, with optional tag data.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseItemStack {
    item_type: Arc<ItemType>,
    amount: u32,
    tag: Option<CompoundTag>,
}

impl BaseItemStack {
    pub fn new(item_type: Arc<ItemType>, amount: u32) -> Self {
        Self {
            item_type,
            amount,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: Option<CompoundTag>) -> Self {
        self.tag = tag;
        self
    }

    pub fn item_type(&self) -> &Arc<ItemType> {
        &self.item_type
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn set_amount(&mut self, amount: u32) {
        self.amount = amount;
    }

    pub fn tag(&self) -> Option<&CompoundTag> {
        self.tag.as_ref()
    }

    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }
}
