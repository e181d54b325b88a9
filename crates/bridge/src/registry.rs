//! The identifier registry: canonical type catalogs kept in step with the
//! host's.
//!
//! Bootstrap walks every host catalog once and creates a minimal canonical
//! entry for each id that is not registered yet. Registration is additive:
//! existing entries are never replaced, so bootstrap can run any number of
//! times.

use std::sync::Arc;

use cinder_edit::block::BlockType;
use cinder_edit::entity::EntityType;
use cinder_edit::identifier::Identifier;
use cinder_edit::item::ItemType;
use cinder_edit::registry::NamespacedRegistry;
use cinder_edit::world::BiomeType;
use cinder_engine::catalog::Catalog;
use cinder_engine::palette::{BlockKind, BlockPalette};
use cinder_engine::server::Server;

use crate::config::BridgeConfig;

/// What one bootstrap pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub blocks_added: usize,
    pub items_added: usize,
    pub biomes_added: usize,
    pub entity_types_added: usize,
    /// Host entries whose ids could not be parsed.
    pub skipped: usize,
}

impl BootstrapReport {
    pub fn added(&self) -> usize {
        self.blocks_added + self.items_added + self.biomes_added + self.entity_types_added
    }
}

pub struct IdentifierRegistry {
    blocks: NamespacedRegistry<BlockType>,
    items: NamespacedRegistry<ItemType>,
    biomes: NamespacedRegistry<BiomeType>,
    entity_types: NamespacedRegistry<EntityType>,
}

impl IdentifierRegistry {
    pub fn new() -> Self {
        Self {
            blocks: NamespacedRegistry::new("block"),
            items: NamespacedRegistry::new("item"),
            biomes: NamespacedRegistry::new("biome"),
            entity_types: NamespacedRegistry::new("entity type"),
        }
    }

    pub fn blocks(&self) -> &NamespacedRegistry<BlockType> {
        &self.blocks
    }

    pub fn items(&self) -> &NamespacedRegistry<ItemType> {
        &self.items
    }

    pub fn biomes(&self) -> &NamespacedRegistry<BiomeType> {
        &self.biomes
    }

    pub fn entity_types(&self) -> &NamespacedRegistry<EntityType> {
        &self.entity_types
    }

    /// Register a canonical type for every host type that lacks one.
    /// A malformed host id is logged and skipped.
    pub fn bootstrap(&self, server: &Server, config: &BridgeConfig) -> BootstrapReport {
        let mut report = BootstrapReport::default();

        for kind in server.palette().kinds() {
            let Some(id) = parse_host_id(kind.name(), "block", &mut report) else {
                continue;
            };
            if config.register_block_items && self.register_item(id.clone()) {
                report.items_added += 1;
            }
            if self.register_block(id) {
                report.blocks_added += 1;
            }
        }

        for host_id in server.items().iter() {
            if let Some(id) = parse_host_id(host_id, "item", &mut report) {
                if self.register_item(id) {
                    report.items_added += 1;
                }
            }
        }

        for host_id in server.biomes().iter() {
            if let Some(id) = parse_host_id(host_id, "biome", &mut report) {
                let (_, created) = self
                    .biomes
                    .get_or_register_with(id.clone(), || BiomeType::new(id));
                report.biomes_added += created as usize;
            }
        }

        for host_id in server.entity_types().iter() {
            if let Some(id) = parse_host_id(host_id, "entity type", &mut report) {
                let (_, created) = self
                    .entity_types
                    .get_or_register_with(id.clone(), || EntityType::new(id));
                report.entity_types_added += created as usize;
            }
        }

        tracing::info!(
            "Bootstrap: +{} blocks, +{} items, +{} biomes, +{} entity types ({} skipped)",
            report.blocks_added,
            report.items_added,
            report.biomes_added,
            report.entity_types_added,
            report.skipped
        );
        report
    }

    fn register_block(&self, id: Identifier) -> bool {
        self.blocks
            .get_or_register_with(id.clone(), || BlockType::new(id))
            .1
    }

    fn register_item(&self, id: Identifier) -> bool {
        self.items
            .get_or_register_with(id.clone(), || ItemType::new(id))
            .1
    }

    // ── Canonical lookups ───────────────────────────────────────────────

    pub fn block_type(&self, id: &Identifier) -> Option<Arc<BlockType>> {
        self.blocks.get(id)
    }

    pub fn item_type(&self, id: &Identifier) -> Option<Arc<ItemType>> {
        self.items.get(id)
    }

    pub fn biome_type(&self, id: &Identifier) -> Option<Arc<BiomeType>> {
        self.biomes.get(id)
    }

    pub fn entity_type(&self, id: &Identifier) -> Option<Arc<EntityType>> {
        self.entity_types.get(id)
    }

    /// The canonical block type for `id`, registered on the spot if the
    /// catalog is missing it.
    pub fn block_type_or_stub(&self, id: &Identifier) -> Arc<BlockType> {
        let (block, created) = self
            .blocks
            .get_or_register_with(id.clone(), || BlockType::new(id.clone()));
        if created {
            tracing::debug!("Registered block type {} after bootstrap", id);
        }
        block
    }

    pub fn item_type_or_stub(&self, id: &Identifier) -> Arc<ItemType> {
        let (item, created) = self
            .items
            .get_or_register_with(id.clone(), || ItemType::new(id.clone()));
        if created {
            tracing::debug!("Registered stub item type {}", id);
        }
        item
    }

    pub fn biome_type_or_stub(&self, id: &Identifier) -> Arc<BiomeType> {
        self.biomes
            .get_or_register_with(id.clone(), || BiomeType::new(id.clone()))
            .0
    }

    pub fn entity_type_or_stub(&self, id: &Identifier) -> Arc<EntityType> {
        self.entity_types
            .get_or_register_with(id.clone(), || EntityType::new(id.clone()))
            .0
    }
}

impl Default for IdentifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_host_id(host_id: &str, what: &str, report: &mut BootstrapReport) -> Option<Identifier> {
    match Identifier::parse(host_id) {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("Skipping host {} '{}': {}", what, host_id, e);
            report.skipped += 1;
            None
        }
    }
}

// ── Host lookups ────────────────────────────────────────────────────────

/// The host block kind registered under `id`.
///
/// The palette keys kinds the same way identifiers normalize, so a host
/// name without a namespace matches the default namespace.
pub fn host_block<'a>(palette: &'a BlockPalette, id: &Identifier) -> Option<&'a BlockKind> {
    palette.kind_by_name(id.as_str())
}

/// The host catalog entry for `id`, in the host's own spelling.
pub fn host_entry<'a>(catalog: &'a Catalog, id: &Identifier) -> Option<&'a str> {
    catalog
        .iter()
        .find(|entry| Identifier::parse(entry).is_ok_and(|parsed| parsed == *id))
}
