//! Item stack translation.

use std::sync::Arc;

use cinder_edit::block::BlockState;
use cinder_edit::identifier::Identifier;
use cinder_edit::item::BaseItemStack;
use cinder_engine::item::ItemStack;

use crate::bridge::Bridge;
use crate::error::{BridgeError, Result};
use crate::registry;

impl Bridge {
    /// Host stack → canonical stack. An item type the catalog lacks is
    /// registered as a stub.
    pub fn adapt_item(&self, item: &ItemStack) -> Result<BaseItemStack> {
        let id = Identifier::parse(item.id())?;
        let item_type = self.registry().item_type_or_stub(&id);
        let tag = item.tag().map(|tag| self.tags().to_canonical(tag));
        Ok(BaseItemStack::new(item_type, item.count()).with_tag(tag))
    }

    /// Canonical stack → host stack. The host decides whether the result
    /// has a block form.
    pub fn adapt_to_host_item(&self, item: &BaseItemStack) -> Result<ItemStack> {
        let id = item.item_type().id();
        let host_id = registry::host_entry(self.server().items(), id)
            .ok_or_else(|| BridgeError::MissingAdapter(id.clone()))?;
        let tag = item.tag().map(|tag| self.tags().to_host(tag));
        Ok(self.server().create_item(host_id, 0, item.amount(), tag))
    }

    /// The block a host stack places.
    ///
    /// Fails with [`BridgeError::NotABlock`] for items without a block form;
    /// that is an ordinary answer, not a fault.
    pub fn item_as_block_state(&self, item: &ItemStack) -> Result<Arc<BlockState>> {
        match item.block() {
            Some(block) => self.adapt_block_state(block),
            None => Err(BridgeError::NotABlock(item.id().to_string())),
        }
    }
}
