//! The built-in content set: block kinds, items, biomes and entity types a
//! fresh server starts with.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::palette::{BlockPalette, BlockKindDef, BlockTrait, PaletteError};
use crate::server::Server;

pub const STONE: &str = "minecraft:stone";
pub const GRASS_BLOCK: &str = "minecraft:grass_block";
pub const DIRT: &str = "minecraft:dirt";
pub const BEDROCK: &str = "minecraft:bedrock";
pub const SAND: &str = "minecraft:sand";
pub const OAK_LOG: &str = "minecraft:oak_log";
pub const OAK_PLANKS: &str = "minecraft:oak_planks";
pub const OAK_LEAVES: &str = "minecraft:oak_leaves";
pub const WATER: &str = "minecraft:water";
pub const LAVA: &str = "minecraft:lava";
pub const OAK_STAIRS: &str = "minecraft:oak_stairs";
pub const FURNACE: &str = "minecraft:furnace";
pub const CHEST: &str = "minecraft:chest";
pub const REDSTONE_WIRE: &str = "minecraft:redstone_wire";
pub const TORCH: &str = "minecraft:torch";

/// Build the vanilla palette.
///
/// `facing` is one trait instance shared by stairs, furnaces and chests.
pub fn palette() -> Result<BlockPalette, PaletteError> {
    let facing = BlockTrait::enumerated("facing", ["NORTH", "SOUTH", "WEST", "EAST"]);
    let waterlogged = BlockTrait::boolean("waterlogged");
    let fluid_level = BlockTrait::integer("level", 0, 15);

    let mut builder = BlockPalette::builder();
    builder.register(BlockKindDef::new(STONE))?;
    builder.register(BlockKindDef::new(GRASS_BLOCK).with_trait(&BlockTrait::boolean("snowy")))?;
    builder.register(BlockKindDef::new(DIRT))?;
    builder.register(BlockKindDef::new(BEDROCK))?;
    builder.register(BlockKindDef::new(SAND))?;
    builder.register(
        BlockKindDef::new(OAK_LOG)
            .with_trait_default(&BlockTrait::enumerated("axis", ["X", "Y", "Z"]), "Y")
            .burns(5),
    )?;
    builder.register(BlockKindDef::new(OAK_PLANKS).burns(20))?;
    builder.register(
        BlockKindDef::new(OAK_LEAVES)
            .with_trait_default(&BlockTrait::integer("distance", 1, 7), "7")
            .with_trait(&BlockTrait::boolean("persistent"))
            .non_solid()
            .burns(60),
    )?;
    builder.register(BlockKindDef::new(WATER).with_trait(&fluid_level).non_solid())?;
    builder.register(
        BlockKindDef::new(LAVA)
            .with_trait(&fluid_level)
            .non_solid()
            .emits_light(15),
    )?;
    builder.register(
        BlockKindDef::new(OAK_STAIRS)
            .with_trait(&facing)
            .with_trait_default(&BlockTrait::enumerated("half", ["TOP", "BOTTOM"]), "BOTTOM")
            .with_trait(&BlockTrait::enumerated(
                "shape",
                ["STRAIGHT", "INNER_LEFT", "INNER_RIGHT", "OUTER_LEFT", "OUTER_RIGHT"],
            ))
            .with_trait(&waterlogged)
            .burns(20),
    )?;
    builder.register(
        BlockKindDef::new(FURNACE)
            .with_trait(&facing)
            .with_trait(&BlockTrait::boolean("lit"))
            .container(),
    )?;
    builder.register(
        BlockKindDef::new(CHEST)
            .with_trait(&facing)
            .with_trait(&waterlogged)
            .container(),
    )?;
    builder.register(
        BlockKindDef::new(REDSTONE_WIRE)
            .with_trait(&BlockTrait::integer("power", 0, 15))
            .non_solid(),
    )?;
    builder.register(BlockKindDef::new(TORCH).non_solid().emits_light(14))?;
    Ok(builder.build())
}

/// Every block kind doubles as an item, plus a few tools and materials.
pub fn items(palette: &BlockPalette) -> Catalog {
    let mut items = Catalog::new("item");
    items.extend(palette.kinds().map(|k| k.name().to_string()));
    items.extend([
        "minecraft:stick",
        "minecraft:coal",
        "minecraft:diamond",
        "minecraft:diamond_pickaxe",
        "minecraft:bucket",
        "minecraft:water_bucket",
    ]);
    items
}

pub fn biomes() -> Catalog {
    let mut biomes = Catalog::new("biome");
    biomes.extend([
        "minecraft:plains",
        "minecraft:forest",
        "minecraft:desert",
        "minecraft:ocean",
        "minecraft:river",
        "minecraft:the_void",
    ]);
    biomes
}

pub fn entity_types() -> Catalog {
    let mut types = Catalog::new("entity type");
    types.extend([
        "minecraft:player",
        "minecraft:item",
        "minecraft:falling_block",
        "minecraft:arrow",
        "minecraft:painting",
        "minecraft:item_frame",
        "minecraft:boat",
        "minecraft:minecart",
        "minecraft:tnt_minecart",
        "minecraft:tnt",
        "minecraft:experience_orb",
        "minecraft:armor_stand",
        "minecraft:pig",
        "minecraft:cow",
        "minecraft:wolf",
        "minecraft:bat",
        "minecraft:villager",
        "minecraft:iron_golem",
        "minecraft:zombie",
        "minecraft:creeper",
        "minecraft:skeleton",
    ]);
    types
}

/// A server with the vanilla content set and no levels loaded.
pub fn server() -> Result<Server, PaletteError> {
    let palette = palette()?;
    let items = items(&palette);
    Ok(Server::new(palette, items, biomes(), entity_types()))
}

/// Shared so callers can build extra kinds that vary the same way as the
/// vanilla facing blocks.
pub fn facing_of(palette: &BlockPalette) -> Option<Arc<BlockTrait>> {
    palette
        .kind_by_name(FURNACE)?
        .traits()
        .iter()
        .find(|t| t.name() == "facing")
        .cloned()
}
