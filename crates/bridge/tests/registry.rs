//! Identifier registry bootstrap and the platform's catalog queries.

use std::sync::Arc;

use cinder_bridge::{Bridge, BridgeConfig, BridgeError};
use cinder_edit::identifier::Identifier;
use cinder_edit::platform::Platform;
use cinder_engine::catalog::Catalog;
use cinder_engine::palette::{BlockKindDef, BlockPalette, BlockTrait, PaletteError};
use cinder_engine::server::Server;
use cinder_engine::vanilla;

fn id(text: &str) -> Identifier {
    Identifier::parse(text).unwrap()
}

fn vanilla_server() -> Arc<Server> {
    Arc::new(vanilla::server().unwrap())
}

/// A palette with one modded kind that has no item, plus malformed ids in
/// the block and item catalogs.
fn odd_server() -> Arc<Server> {
    let mut builder = BlockPalette::builder();
    builder.register(BlockKindDef::new("mymod:frame")).unwrap();
    builder.register(BlockKindDef::new("Bad Block!")).unwrap();
    let mut items = Catalog::new("item");
    items.register("minecraft:stick");
    items.register("minecraft:Bad Item");
    Arc::new(Server::new(
        builder.build(),
        items,
        Catalog::new("biome"),
        Catalog::new("entity type"),
    ))
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[test]
fn bootstrap_mirrors_every_host_catalog() {
    let server = vanilla_server();
    let bridge = Bridge::new(Arc::clone(&server), BridgeConfig::default());
    let report = bridge.bootstrap();

    assert_eq!(report.blocks_added, server.palette().kinds().count());
    assert_eq!(report.items_added, server.items().len());
    assert_eq!(report.biomes_added, server.biomes().len());
    assert_eq!(report.entity_types_added, server.entity_types().len());
    assert_eq!(report.skipped, 0);

    let registry = bridge.registry();
    assert_eq!(registry.blocks().len(), report.blocks_added);
    assert!(registry.block_type(&id("minecraft:air")).is_some());
    assert!(registry.item_type(&id("minecraft:diamond_pickaxe")).is_some());
    assert!(registry.biome_type(&id("minecraft:the_void")).is_some());
    assert!(registry.entity_type(&id("minecraft:armor_stand")).is_some());
}

#[test]
fn bootstrap_is_idempotent() {
    let bridge = Bridge::start(vanilla_server(), BridgeConfig::default());
    let stone = bridge.registry().block_type(&id(vanilla::STONE)).unwrap();

    let again = bridge.bootstrap();
    assert_eq!(again.added(), 0);
    assert!(Arc::ptr_eq(
        &stone,
        &bridge.registry().block_type(&id(vanilla::STONE)).unwrap()
    ));
}

#[test]
fn malformed_host_ids_are_skipped() {
    let bridge = Bridge::new(odd_server(), BridgeConfig::default());
    let report = bridge.bootstrap();
    assert_eq!(report.skipped, 2);
    // air and the modded frame
    assert_eq!(report.blocks_added, 2);
    assert!(bridge.registry().block_type(&id("mymod:frame")).is_some());
    assert!(bridge.registry().item_type(&id("minecraft:stick")).is_some());
}

#[test]
fn block_items_follow_config() {
    let with_items = Bridge::start(odd_server(), BridgeConfig::default());
    assert!(with_items.registry().item_type(&id("mymod:frame")).is_some());

    let config = BridgeConfig {
        register_block_items: false,
        ..BridgeConfig::default()
    };
    let without = Bridge::start(odd_server(), config);
    assert!(without.registry().item_type(&id("mymod:frame")).is_none());
    assert!(without.registry().block_type(&id("mymod:frame")).is_some());
}

#[test]
fn aliased_host_names_map_to_one_block_type() {
    let lit = BlockTrait::boolean("lit");
    let mut builder = BlockPalette::builder();
    builder.register(BlockKindDef::new("Lamp").with_trait(&lit)).unwrap();
    assert!(matches!(
        builder.register(BlockKindDef::new("minecraft:lamp")),
        Err(PaletteError::DuplicateKind(_))
    ));
    let server = Server::new(
        builder.build(),
        Catalog::new("item"),
        Catalog::new("biome"),
        Catalog::new("entity type"),
    );
    let bridge = Bridge::new(Arc::new(server), BridgeConfig::default());
    let report = bridge.bootstrap();
    // air and the lamp
    assert_eq!(report.blocks_added, 2);
    assert_eq!(report.skipped, 0);

    let palette = bridge.server().palette();
    let kind = palette.kind_by_name("minecraft:lamp").unwrap();
    for state in kind.states() {
        let canonical = bridge.adapt_block_state(state).unwrap();
        assert_eq!(canonical.id(), &id("minecraft:lamp"));
        assert_eq!(bridge.adapt_to_host_state(&canonical).unwrap(), state);
    }
    let block_type = bridge.registry().block_type(&id("lamp")).unwrap();
    assert_eq!(block_type.properties().len(), 1);
}

// ---------------------------------------------------------------------------
// Biomes and mob types
// ---------------------------------------------------------------------------

#[test]
fn biomes_resolve_both_ways() {
    let bridge = Bridge::start(vanilla_server(), BridgeConfig::default());
    let plains = bridge.adapt_biome("minecraft:plains").unwrap();
    assert!(Arc::ptr_eq(
        &plains,
        &bridge.registry().biome_type(&id("minecraft:plains")).unwrap()
    ));
    assert_eq!(bridge.adapt_to_host_biome(&plains).unwrap(), "minecraft:plains");

    let modded = bridge.adapt_biome("mymod:glade").unwrap();
    assert!(matches!(
        bridge.adapt_to_host_biome(&modded),
        Err(BridgeError::MissingAdapter(_))
    ));
}

#[test]
fn mob_types_need_the_vanilla_namespace_spelled_out() {
    let bridge = Bridge::start(vanilla_server(), BridgeConfig::default());
    let platform = bridge.platform();
    assert!(platform.is_valid_mob_type("minecraft:pig"));
    assert!(platform.is_valid_mob_type("MINECRAFT:Zombie"));
    assert!(!platform.is_valid_mob_type("pig"));
    assert!(!platform.is_valid_mob_type("mymod:pig"));
    assert!(!platform.is_valid_mob_type("minecraft:dragon"));
    assert!(!platform.is_valid_mob_type("minecraft:"));
    assert!(!platform.is_valid_mob_type(""));
}
