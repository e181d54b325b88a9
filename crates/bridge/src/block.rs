//! Block-state translation and the block registry services built on it.
//!
//! Host → canonical walks the host state trait by trait and caches the
//! result per runtime id, so the same host state always yields the same
//! `Arc<BlockState>`. Canonical → host starts at the kind's default state
//! and applies each property with the palette's state arithmetic.

use std::sync::Arc;

use cinder_edit::block::{BlockMaterial, BlockState, BlockType};
use cinder_edit::identifier::Identifier;
use cinder_edit::property::Property;
use cinder_engine::palette::{BlockKind, KindId};
use cinder_engine::world::block::BlockId;
use indexmap::IndexMap;

use crate::bridge::Bridge;
use crate::error::{BridgeError, Result};
use crate::property::{to_property_value, to_trait_value};
use crate::registry;

impl Bridge {
    /// Host state → canonical state. Identity-stable per runtime id.
    pub fn adapt_block_state(&self, state: BlockId) -> Result<Arc<BlockState>> {
        if let Some(hit) = self.states.get(&state) {
            return Ok(Arc::clone(hit.value()));
        }
        let built = Arc::new(self.translate_host_state(state)?);
        // A concurrent translation may have won; keep whatever is published.
        let entry = self.states.entry(state).or_insert(built);
        Ok(Arc::clone(entry.value()))
    }

    fn translate_host_state(&self, state: BlockId) -> Result<BlockState> {
        let palette = self.server().palette();
        let kind = palette
            .kind_of(state)
            .ok_or(BridgeError::UnknownHostState(state.0))?;
        let block_type = self.block_type_for(kind)?;

        let mut builder = BlockState::builder(block_type);
        for (host_trait, value) in palette.values(state)? {
            let property = self.properties().to_property(host_trait)?;
            builder = builder.set(&property, to_property_value(host_trait, value)?)?;
        }
        Ok(builder.build()?)
    }

    /// Canonical state → host runtime id.
    ///
    /// A property value the host trait refuses falls back to the kind's
    /// default state. A property this bridge never produced is an error.
    pub fn adapt_to_host_state(&self, state: &BlockState) -> Result<BlockId> {
        let palette = self.server().palette();
        let kind = registry::host_block(palette, state.id())
            .ok_or_else(|| BridgeError::MissingAdapter(state.id().clone()))?;

        let mut host = kind.default_state();
        for (property, value) in state.values() {
            let host_trait = self.properties().to_trait(property)?;
            match palette.with_trait(host, &host_trait, to_trait_value(value)) {
                Ok(next) => host = next,
                Err(e) => {
                    tracing::warn!(
                        "Cannot apply {}={} to {}: {}; using default state",
                        property.name(),
                        value,
                        kind.name(),
                        e
                    );
                    return Ok(kind.default_state());
                }
            }
        }
        Ok(host)
    }

    /// Host kind → canonical type, with its property schema attached.
    pub fn adapt_block_type(&self, kind: KindId) -> Result<Arc<BlockType>> {
        let kind = self
            .server()
            .palette()
            .kind(kind)
            .ok_or(BridgeError::UnknownHostKind(kind.index()))?;
        self.block_type_for(kind)
    }

    /// Canonical type → host kind.
    pub fn adapt_to_host_block_type(&self, block_type: &BlockType) -> Result<KindId> {
        self.host_kind(block_type.id()).map(BlockKind::id)
    }

    /// The canonical properties of a block type, by name, in host order.
    pub fn block_properties(&self, block_type: &BlockType) -> Result<IndexMap<String, Arc<Property>>> {
        let kind = self.host_kind(block_type.id())?;
        kind.traits()
            .iter()
            .map(|host_trait| {
                let property = self.properties().to_property(host_trait)?;
                Ok::<_, BridgeError>((property.name().to_string(), property))
            })
            .collect()
    }

    /// Physical behavior of a block type, computed once per host kind.
    pub fn block_material(&self, block_type: &BlockType) -> Result<BlockMaterial> {
        let kind = self.host_kind(block_type.id())?;
        let material = *self.materials.entry(kind.id()).or_insert_with(|| {
            let behavior = kind.behavior();
            BlockMaterial {
                air: kind.first_state() == BlockId::AIR,
                solid: behavior.solid,
                burnable: behavior.burn_ability > 0,
                light_value: behavior.light_emission,
                container: behavior.container,
            }
        });
        Ok(material)
    }

    /// The host's runtime id for a canonical state.
    pub fn internal_state_id(&self, state: &BlockState) -> Result<u32> {
        self.adapt_to_host_state(state).map(|id| id.0 as u32)
    }

    fn host_kind(&self, id: &Identifier) -> Result<&BlockKind> {
        registry::host_block(self.server().palette(), id)
            .ok_or_else(|| BridgeError::MissingAdapter(id.clone()))
    }

    /// The canonical type for a host kind. Attaches the schema the first
    /// time the type is seen through this bridge.
    fn block_type_for(&self, kind: &BlockKind) -> Result<Arc<BlockType>> {
        let id = Identifier::parse(kind.name())?;
        let block_type = self.registry().block_type_or_stub(&id);
        if !block_type.has_schema() {
            let schema = kind
                .traits()
                .iter()
                .map(|t| self.properties().to_property(t))
                .collect::<Result<Vec<_>>>()?;
            block_type.init_properties(schema);
        }
        Ok(block_type)
    }
}
