//! Palette layout and state arithmetic, plus the chunk storage the states
//! end up in.

use cinder_engine::palette::{
    BlockKindDef, BlockPalette, BlockTrait, PaletteError, TraitKind, TraitValue,
};
use cinder_engine::vanilla;
use cinder_engine::world::Level;
use cinder_engine::world::block::BlockId;
use cinder_engine::world::chunk::Chunk;
use cinder_engine::world::position::{BlockPos, Direction};

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn air_is_state_zero() {
    let palette = BlockPalette::builder().build();
    assert_eq!(palette.len(), 1);
    let air = palette.kind_of(BlockId::AIR).unwrap();
    assert_eq!(air.name(), "minecraft:air");
    assert!(!air.behavior().solid);
}

#[test]
fn kinds_get_contiguous_ranges() {
    let palette = vanilla::palette().unwrap();
    let mut next = 0u16;
    for kind in palette.kinds() {
        assert_eq!(kind.first_state(), BlockId(next));
        next += kind.state_count() as u16;
    }
    assert_eq!(next as usize, palette.len());

    let stairs = palette.kind_by_name(vanilla::OAK_STAIRS).unwrap();
    assert_eq!(stairs.state_count(), 4 * 2 * 5 * 2);
}

#[test]
fn kind_lookup_ignores_case() {
    let palette = vanilla::palette().unwrap();
    let a = palette.kind_by_name("MINECRAFT:Stone").unwrap();
    let b = palette.kind_by_name(vanilla::STONE).unwrap();
    assert_eq!(a.id(), b.id());
}

#[test]
fn explicit_default_is_honoured() {
    let palette = vanilla::palette().unwrap();
    let log = palette.default_state(vanilla::OAK_LOG).unwrap();
    let axis = &palette.kind_of(log).unwrap().traits()[0];
    assert_eq!(palette.value(log, axis), Some(TraitValue::Enum("Y")));
    assert_eq!(palette.describe(log), "minecraft:oak_log[axis=Y]");
}

#[test]
fn duplicate_kind_is_rejected() {
    let mut builder = BlockPalette::builder();
    builder.register(BlockKindDef::new("test:a")).unwrap();
    let err = builder.register(BlockKindDef::new("TEST:A")).unwrap_err();
    assert_eq!(err, PaletteError::DuplicateKind("TEST:A".into()));
}

#[test]
fn bare_name_collides_with_its_namespaced_form() {
    let mut builder = BlockPalette::builder();
    builder.register(BlockKindDef::new("lamp")).unwrap();
    let lit = BlockTrait::boolean("lit");
    let err = builder
        .register(BlockKindDef::new("minecraft:lamp").with_trait(&lit))
        .unwrap_err();
    assert_eq!(err, PaletteError::DuplicateKind("minecraft:lamp".into()));
    assert!(matches!(
        builder.register(BlockKindDef::new(" Minecraft:Air ")),
        Err(PaletteError::DuplicateKind(_))
    ));

    let palette = builder.build();
    let lamp = palette.kind_by_name("minecraft:LAMP").unwrap();
    assert_eq!(lamp.name(), "lamp");
    assert!(lamp.traits().is_empty());
}

#[test]
fn bad_default_is_rejected() {
    let mut builder = BlockPalette::builder();
    let level = BlockTrait::integer("level", 0, 3);
    let err = builder
        .register(BlockKindDef::new("test:tank").with_trait_default(&level, "9"))
        .unwrap_err();
    assert!(matches!(err, PaletteError::InvalidDefault { .. }));
}

#[test]
fn empty_trait_is_rejected() {
    let mut builder = BlockPalette::builder();
    let none = BlockTrait::enumerated("none", Vec::<String>::new());
    let err = builder
        .register(BlockKindDef::new("test:empty").with_trait(&none))
        .unwrap_err();
    assert_eq!(err, PaletteError::EmptyTrait("none".into()));
}

#[test]
fn too_many_states_is_rejected() {
    let mut builder = BlockPalette::builder();
    let wide = BlockTrait::integer("wide", 0, 999);
    let err = builder
        .register(
            BlockKindDef::new("test:huge")
                .with_trait(&wide)
                .with_trait(&BlockTrait::integer("more", 0, 99)),
        )
        .unwrap_err();
    assert_eq!(err, PaletteError::TooManyStates);
}

// ---------------------------------------------------------------------------
// State arithmetic
// ---------------------------------------------------------------------------

#[test]
fn with_trait_changes_only_that_trait() {
    let palette = vanilla::palette().unwrap();
    let stairs = palette.kind_by_name(vanilla::OAK_STAIRS).unwrap();
    let [facing, half, shape, waterlogged] = stairs.traits() else {
        panic!("stairs should have four traits");
    };

    let base = stairs.default_state();
    let east = palette.with_trait(base, facing, TraitValue::Enum("east")).unwrap();
    assert_ne!(east, base);
    assert!(stairs.contains(east));
    assert_eq!(palette.value(east, facing), Some(TraitValue::Enum("EAST")));
    assert_eq!(palette.value(east, half), palette.value(base, half));
    assert_eq!(palette.value(east, shape), palette.value(base, shape));

    let wet = palette.with_trait(east, waterlogged, TraitValue::Boolean(true)).unwrap();
    assert_eq!(palette.value(wet, facing), Some(TraitValue::Enum("EAST")));
    assert_eq!(palette.value(wet, waterlogged), Some(TraitValue::Boolean(true)));

    // Round trip back to the default.
    let back = palette
        .with_trait(wet, facing, TraitValue::Enum("NORTH"))
        .and_then(|s| palette.with_trait(s, waterlogged, TraitValue::Boolean(false)))
        .unwrap();
    assert_eq!(back, base);
}

#[test]
fn with_trait_reaches_every_state() {
    let palette = vanilla::palette().unwrap();
    let leaves = palette.kind_by_name(vanilla::OAK_LEAVES).unwrap();
    let [distance, persistent] = leaves.traits() else {
        panic!("leaves should have two traits");
    };
    let mut seen = std::collections::HashSet::new();
    for d in distance.possible_values() {
        for p in persistent.possible_values() {
            let state = palette
                .with_trait(leaves.first_state(), distance, d)
                .and_then(|s| palette.with_trait(s, persistent, p))
                .unwrap();
            assert!(leaves.contains(state));
            seen.insert(state);
        }
    }
    assert_eq!(seen.len(), leaves.state_count() as usize);
}

#[test]
fn shared_trait_is_the_same_instance_everywhere() {
    let palette = vanilla::palette().unwrap();
    let facing = vanilla::facing_of(&palette).unwrap();
    for name in [vanilla::OAK_STAIRS, vanilla::FURNACE, vanilla::CHEST] {
        let kind = palette.kind_by_name(name).unwrap();
        assert!(kind.trait_position(&facing).is_some(), "{name} lacks shared facing");
    }
    let snowy = &palette.kind_by_name(vanilla::GRASS_BLOCK).unwrap().traits()[0];
    assert!(palette
        .kind_by_name(vanilla::FURNACE)
        .unwrap()
        .trait_position(snowy)
        .is_none());
}

#[test]
fn lookalike_trait_is_not_on_kind() {
    let palette = vanilla::palette().unwrap();
    let furnace = palette.default_state(vanilla::FURNACE).unwrap();
    let impostor = BlockTrait::enumerated("facing", ["NORTH", "SOUTH", "WEST", "EAST"]);
    let err = palette
        .with_trait(furnace, &impostor, TraitValue::Enum("EAST"))
        .unwrap_err();
    assert!(matches!(err, PaletteError::TraitNotOnKind { .. }));
}

#[test]
fn invalid_value_is_rejected() {
    let palette = vanilla::palette().unwrap();
    let wire = palette.default_state(vanilla::REDSTONE_WIRE).unwrap();
    let power = &palette.kind_of(wire).unwrap().traits()[0];
    let err = palette
        .with_trait(wire, power, TraitValue::Integer(16))
        .unwrap_err();
    assert!(matches!(err, PaletteError::InvalidValue { .. }));
    let err = palette
        .with_trait(wire, power, TraitValue::Boolean(true))
        .unwrap_err();
    assert!(matches!(err, PaletteError::InvalidValue { .. }));
}

#[test]
fn unknown_state_is_reported() {
    let palette = vanilla::palette().unwrap();
    let beyond = BlockId(palette.len() as u16);
    assert!(palette.kind_of(beyond).is_none());
    assert!(matches!(
        palette.values(beyond),
        Err(PaletteError::UnknownState(_))
    ));
    assert!(palette.describe(beyond).starts_with("<unknown"));
}

#[test]
fn custom_trait_values_are_case_sensitive() {
    let colour = BlockTrait::custom("colour", "plugin:Colour", ["Red", "red"]);
    assert!(matches!(colour.kind(), TraitKind::Custom { .. }));
    assert_eq!(colour.cardinality(), 2);
    assert_eq!(colour.parse_value("red"), Some(TraitValue::Custom("red")));
    assert_eq!(colour.index_of(TraitValue::Custom("Red")), Some(0));
}

// ---------------------------------------------------------------------------
// Chunk / level storage
// ---------------------------------------------------------------------------

#[test]
fn chunk_set_returns_previous_and_drops_empty_sections() {
    let mut chunk = Chunk::new();
    let pos = BlockPos::new(3, 70, 5).local();
    assert_eq!(chunk.set_block(pos, BlockId(4)), BlockId::AIR);
    assert_eq!(chunk.section_count(), 1);
    assert_eq!(chunk.set_block(pos, BlockId::AIR), BlockId(4));
    assert_eq!(chunk.section_count(), 0);
}

#[test]
fn level_blocks_and_light() {
    let level = Level::new("Over World", BlockPos::new(0, 64, 0));
    assert_eq!(level.folder_id(), "over_world");
    let pos = BlockPos::new(-1, -3, 17);
    assert_eq!(level.get_block(pos), BlockId::AIR);
    level.set_block(pos, BlockId(2));
    assert_eq!(level.get_block(pos), BlockId(2));
    assert_eq!(level.get_block(pos.offset(Direction::Up)), BlockId::AIR);

    level.set_block_light(pos, 40);
    assert_eq!(level.get_block_light(pos), 15);
    assert_eq!(level.get_block_light(BlockPos::new(500, 0, 500)), 0);
}

#[test]
fn direction_steps_are_opposite() {
    for dir in Direction::ALL {
        let (x, y, z) = dir.step();
        let (ox, oy, oz) = dir.opposite().step();
        assert_eq!((x + ox, y + oy, z + oz), (0, 0, 0));
    }
}
