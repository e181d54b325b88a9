//! Block-state translation: round trips, identity stability of the
//! host → canonical cache, and the failure modes of the reverse direction.

use std::sync::Arc;

use cinder_bridge::{Bridge, BridgeConfig, BridgeError};
use cinder_edit::block::{BlockState, BlockType};
use cinder_edit::identifier::Identifier;
use cinder_edit::property::{Property, PropertyValue};
use cinder_engine::catalog::Catalog;
use cinder_engine::palette::{BlockKindDef, BlockPalette, BlockTrait};
use cinder_engine::server::Server;
use cinder_engine::vanilla;
use cinder_engine::world::block::BlockId;
use rayon::prelude::*;

fn vanilla_bridge() -> Arc<Bridge> {
    Bridge::start(Arc::new(vanilla::server().unwrap()), BridgeConfig::default())
}

fn host_default(bridge: &Bridge, name: &str) -> BlockId {
    bridge.server().palette().default_state(name).unwrap()
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn every_host_state_round_trips() {
    let bridge = vanilla_bridge();
    let palette = bridge.server().palette();
    for state in palette.states() {
        let canonical = bridge.adapt_block_state(state).unwrap();
        assert_eq!(
            bridge.adapt_to_host_state(&canonical).unwrap(),
            state,
            "{} did not round trip",
            palette.describe(state)
        );
        assert_eq!(bridge.internal_state_id(&canonical).unwrap(), state.0 as u32);
    }
    assert_eq!(bridge.cached_states(), palette.len());
}

#[test]
fn enum_values_come_out_lower_case() {
    let bridge = vanilla_bridge();
    let stairs = bridge
        .adapt_block_state(host_default(&bridge, vanilla::OAK_STAIRS))
        .unwrap();
    assert_eq!(
        stairs.to_string(),
        "minecraft:oak_stairs[facing=north,half=bottom,shape=straight,waterlogged=false]"
    );
    let log = bridge
        .adapt_block_state(host_default(&bridge, vanilla::OAK_LOG))
        .unwrap();
    assert_eq!(log.get("axis"), Some(&PropertyValue::Enum("y".into())));
}

#[test]
fn edited_state_maps_to_the_matching_host_state() {
    let bridge = vanilla_bridge();
    let palette = bridge.server().palette();
    let leaves = bridge
        .adapt_block_state(host_default(&bridge, vanilla::OAK_LEAVES))
        .unwrap()
        .with("distance", PropertyValue::Int(3))
        .unwrap()
        .with("persistent", PropertyValue::Bool(true))
        .unwrap();
    let host = bridge.adapt_to_host_state(&leaves).unwrap();
    assert_eq!(
        palette.describe(host),
        "minecraft:oak_leaves[distance=3,persistent=true]"
    );
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

#[test]
fn same_host_state_yields_the_same_object() {
    let bridge = vanilla_bridge();
    let furnace = host_default(&bridge, vanilla::FURNACE);
    let first = bridge.adapt_block_state(furnace).unwrap();
    let second = bridge.adapt_block_state(furnace).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let other = bridge.adapt_block_state(BlockId(furnace.0 + 1)).unwrap();
    assert!(!Arc::ptr_eq(&first, &other));
    assert_ne!(*first, *other);
}

#[test]
fn concurrent_first_translation_publishes_one_object() {
    let bridge = vanilla_bridge();
    let states: Vec<BlockId> = bridge.server().palette().states().collect();

    let rounds: Vec<Vec<Arc<BlockState>>> = (0..8)
        .into_par_iter()
        .map(|_| {
            states
                .par_iter()
                .map(|s| bridge.adapt_block_state(*s).unwrap())
                .collect()
        })
        .collect();

    for (i, state) in states.iter().enumerate() {
        let settled = bridge.adapt_block_state(*state).unwrap();
        for round in &rounds {
            assert!(Arc::ptr_eq(&round[i], &settled));
        }
    }
}

#[test]
fn shared_host_trait_gives_one_property() {
    let bridge = vanilla_bridge();
    let facing_of = |name: &str| {
        let state = bridge.adapt_block_state(host_default(&bridge, name)).unwrap();
        Arc::clone(state.block_type().property("facing").unwrap())
    };
    let stairs = facing_of(vanilla::OAK_STAIRS);
    assert!(Arc::ptr_eq(&stairs, &facing_of(vanilla::FURNACE)));
    assert!(Arc::ptr_eq(&stairs, &facing_of(vanilla::CHEST)));
}

// ---------------------------------------------------------------------------
// Block types and registry services
// ---------------------------------------------------------------------------

#[test]
fn block_types_carry_their_schema() {
    let bridge = vanilla_bridge();
    let kind = bridge
        .server()
        .palette()
        .kind_by_name(vanilla::OAK_STAIRS)
        .unwrap();
    let block_type = bridge.adapt_block_type(kind.id()).unwrap();
    assert!(block_type.has_schema());
    assert_eq!(bridge.adapt_to_host_block_type(&block_type).unwrap(), kind.id());

    let names: Vec<String> = bridge
        .block_properties(&block_type)
        .unwrap()
        .into_keys()
        .collect();
    assert_eq!(names, ["facing", "half", "shape", "waterlogged"]);
}

#[test]
fn materials_follow_host_behavior() {
    let bridge = vanilla_bridge();
    let material = |name: &str| {
        let block_type = bridge
            .registry()
            .block_type(&Identifier::parse(name).unwrap())
            .unwrap();
        bridge.block_material(&block_type).unwrap()
    };
    assert!(material("minecraft:air").is_air());
    assert!(material(vanilla::STONE).is_solid());
    assert!(!material(vanilla::STONE).is_burnable());
    assert!(!material(vanilla::WATER).is_solid());
    assert!(material(vanilla::OAK_PLANKS).is_burnable());
    assert_eq!(material(vanilla::LAVA).light_value(), 15);
    assert_eq!(material(vanilla::TORCH).light_value(), 14);
    assert!(material(vanilla::CHEST).has_container());
    assert!(!material(vanilla::STONE).has_container());
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn unknown_runtime_id_is_reported() {
    let bridge = vanilla_bridge();
    let past_end = BlockId(bridge.server().palette().len() as u16);
    assert!(matches!(
        bridge.adapt_block_state(past_end),
        Err(BridgeError::UnknownHostState(_))
    ));
}

#[test]
fn unknown_kind_is_reported_as_a_kind() {
    let vanilla = vanilla::palette().unwrap();
    let chest = vanilla.kind_by_name(vanilla::CHEST).unwrap().id();

    let mut builder = BlockPalette::builder();
    builder.register(BlockKindDef::new(vanilla::STONE)).unwrap();
    let server = Server::new(
        builder.build(),
        Catalog::new("item"),
        Catalog::new("biome"),
        Catalog::new("entity type"),
    );
    let bridge = Bridge::start(Arc::new(server), BridgeConfig::default());
    match bridge.adapt_block_type(chest) {
        Err(BridgeError::UnknownHostKind(index)) => assert_eq!(index, chest.index()),
        other => panic!("expected UnknownHostKind, got {other:?}"),
    }
}

#[test]
fn canonical_block_without_host_kind_is_missing_adapter() {
    let bridge = vanilla_bridge();
    let id = Identifier::parse("mymod:gadget").unwrap();
    let block_type = bridge.registry().block_type_or_stub(&id);
    let state = BlockState::builder(block_type).build().unwrap();
    match bridge.adapt_to_host_state(&state) {
        Err(BridgeError::MissingAdapter(missing)) => assert_eq!(missing, id),
        other => panic!("expected MissingAdapter, got {other:?}"),
    }
}

#[test]
fn foreign_property_is_an_error() {
    let bridge = vanilla_bridge();
    let lookalike = Property::boolean("waterlogged");
    let block_type = Arc::new(BlockType::with_properties(
        Identifier::parse(vanilla::CHEST).unwrap(),
        vec![Arc::clone(&lookalike)],
    ));
    let state = BlockState::builder(block_type)
        .set(&lookalike, PropertyValue::Bool(true))
        .unwrap()
        .build()
        .unwrap();
    assert!(matches!(
        bridge.adapt_to_host_state(&state),
        Err(BridgeError::UnknownProperty(name)) if name == "waterlogged"
    ));
}

#[test]
fn value_the_host_refuses_falls_back_to_default() {
    let bridge = vanilla_bridge();
    // Borrow the stairs' `half` property and graft it onto furnaces before
    // the bridge has attached the furnace schema itself.
    let stairs = bridge
        .adapt_block_state(host_default(&bridge, vanilla::OAK_STAIRS))
        .unwrap();
    let half = Arc::clone(stairs.block_type().property("half").unwrap());
    let furnace_type = bridge
        .registry()
        .block_type(&Identifier::parse(vanilla::FURNACE).unwrap())
        .unwrap();
    assert!(!furnace_type.has_schema());
    furnace_type.init_properties(vec![Arc::clone(&half)]);

    let state = BlockState::builder(furnace_type)
        .set(&half, PropertyValue::Enum("top".into()))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(
        bridge.adapt_to_host_state(&state).unwrap(),
        host_default(&bridge, vanilla::FURNACE)
    );
}

#[test]
fn custom_trait_kind_is_unsupported() {
    let mut builder = BlockPalette::builder();
    builder
        .register(
            BlockKindDef::new("mymod:dial")
                .with_trait(&BlockTrait::custom("setting", "DialSetting", ["low", "high"])),
        )
        .unwrap();
    builder.register(BlockKindDef::new("minecraft:stone")).unwrap();
    let server = Server::new(
        builder.build(),
        Catalog::new("item"),
        Catalog::new("biome"),
        Catalog::new("entity type"),
    );
    let bridge = Bridge::start(Arc::new(server), BridgeConfig::default());

    let dial = bridge.server().palette().default_state("mymod:dial").unwrap();
    for _ in 0..2 {
        match bridge.adapt_block_state(dial) {
            Err(BridgeError::UnsupportedTraitKind { name, kind }) => {
                assert_eq!(name, "setting");
                assert_eq!(kind, "DialSetting");
            }
            other => panic!("expected UnsupportedTraitKind, got {other:?}"),
        }
    }
    assert!(bridge.properties().is_empty());
    assert_eq!(bridge.cached_states(), 0);

    let stone = bridge.server().palette().default_state("minecraft:stone").unwrap();
    assert_eq!(bridge.adapt_block_state(stone).unwrap().id().as_str(), "minecraft:stone");
}
