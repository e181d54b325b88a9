use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use cinder_bridge::{Bridge, BridgeConfig, BridgeError};
use cinder_edit::entity::{Entity, HandSide, Player};
use cinder_edit::identifier::Identifier;
use cinder_edit::item::BaseItemStack;
use cinder_edit::math::{BlockVector3, CuboidRegion};
use cinder_edit::property::PropertyValue;
use cinder_edit::world::World;
use cinder_edit::EditError;
use cinder_engine::entity::Entity as HostEntity;
use cinder_engine::vanilla;
use cinder_engine::world::chunk::{Chunk, SECTION_SIZE};
use cinder_engine::world::position::{BlockPos, ChunkPos, LocalBlockPos, Location, Vec3};
use cinder_engine::world::Level;

fn main() -> Result<()> {
    let config_path: Option<PathBuf> = std::env::args()
        .skip_while(|a| a != "--config")
        .nth(1)
        .map(PathBuf::from);
    let chunk_radius: i32 = std::env::args()
        .skip_while(|a| a != "--radius")
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .init();

    let config = match &config_path {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };
    tracing::info!("cinder bridge demo ({:?})", config);

    // ── Host side ───────────────────────────────────────────────────────
    let server = Arc::new(vanilla::server().context("building vanilla palette")?);
    let level_id = server.load_level("Demo World", BlockPos::new(0, 5, 0));
    let level = server.level(level_id).context("demo level vanished")?;
    generate_flat(&server, &level, chunk_radius)?;
    tracing::info!("Level ready: {} chunks", level.chunk_count());

    // ── Bridge ──────────────────────────────────────────────────────────
    let bridge = Bridge::start(Arc::clone(&server), config);
    let world = bridge.wrap_world(level_id)?;

    let stairs_type = bridge
        .registry()
        .block_type(&Identifier::parse(vanilla::OAK_STAIRS)?)
        .context("stairs not bootstrapped")?;
    let stairs = bridge
        .adapt_block_state(server.palette().default_state(vanilla::OAK_STAIRS).context("no stairs")?)?
        .with("facing", PropertyValue::Enum("east".into()))?;
    let at = BlockVector3::new(0, 5, 0);
    world.set_block(at, &stairs)?;
    let read_back = world.block_at(at)?;
    tracing::info!("Placed {} and read back {}", stairs, read_back);
    tracing::info!(
        "{} has {} properties",
        stairs_type.id(),
        bridge.block_properties(&stairs_type)?.len()
    );

    let region = CuboidRegion::new(BlockVector3::new(-8, 0, -8), BlockVector3::new(7, 5, 7));
    let blocks = world.blocks_in_region(&region)?;
    tracing::info!(
        "Read {} blocks; {} distinct host states translated",
        blocks.len(),
        bridge.cached_states()
    );

    // ── Players and items ───────────────────────────────────────────────
    let spawn = Location::new(level_id, Vec3::new(0.5, 6.0, 0.5));
    let player_id = server
        .spawn(HostEntity::player("alex", spawn))
        .context("spawning player")?;
    let player = bridge.wrap_player(player_id)?;

    for id in [vanilla::FURNACE, "minecraft:stick"] {
        let item_type = bridge
            .registry()
            .item_type(&Identifier::parse(id)?)
            .with_context(|| format!("{id} not bootstrapped"))?;
        player.give_item(&BaseItemStack::new(item_type, 1))?;
    }
    let furnace = server.create_item(vanilla::FURNACE, 0, 1, None);
    let stick = server.create_item("minecraft:stick", 0, 1, None);
    server.with_entity_mut(player_id, |e| {
        if let Some(data) = e.player.as_mut() {
            data.inventory.set_item_in_hand(furnace);
            data.inventory.set_off_hand(stick);
        }
    });
    for hand in [HandSide::MainHand, HandSide::OffHand] {
        match player.block_in_hand(hand) {
            Ok(state) => tracing::info!("{} holds {} ({:?})", player.name()?, state, hand),
            Err(EditError::NotABlock(id)) => {
                tracing::info!("{} holds {}, not a block ({:?})", player.name()?, id, hand)
            }
            Err(e) => return Err(e.into()),
        }
    }

    // ── Liveness ────────────────────────────────────────────────────────
    server.unload_level(level_id);
    match world.block_at(at) {
        Err(BridgeError::WorldUnloaded(name)) => tracing::info!("World {} is gone", name),
        other => tracing::warn!("Unexpected read after unload: {:?}", other),
    }
    tracing::info!(
        "Player alive: {}, location is nowhere: {}",
        player.is_alive(),
        player.location().is_nowhere()
    );

    Ok(())
}

/// Bedrock at y=0, stone y=1-3, grass at y=4.
fn generate_flat(server: &cinder_engine::server::Server, level: &Level, chunk_radius: i32) -> Result<()> {
    let palette = server.palette();
    let state = |name: &str| {
        palette
            .default_state(name)
            .with_context(|| format!("{name} missing from palette"))
    };
    let bedrock = state(vanilla::BEDROCK)?;
    let stone = state(vanilla::STONE)?;
    let grass = state(vanilla::GRASS_BLOCK)?;

    for cx in -chunk_radius..chunk_radius {
        for cz in -chunk_radius..chunk_radius {
            let mut chunk = Chunk::new();
            for x in 0..SECTION_SIZE as u8 {
                for z in 0..SECTION_SIZE as u8 {
                    chunk.set_block(LocalBlockPos { x, y: 0, z }, bedrock);
                    for y in 1..=3i64 {
                        chunk.set_block(LocalBlockPos { x, y, z }, stone);
                    }
                    chunk.set_block(LocalBlockPos { x, y: 4, z }, grass);
                }
            }
            level.insert_chunk(ChunkPos::new(cx, cz), chunk);
        }
    }
    Ok(())
}
