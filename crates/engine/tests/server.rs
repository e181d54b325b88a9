//! Level and entity lifetime: generational keys must stop resolving as soon
//! as their target goes away.

use cinder_engine::entity::{Entity, EntityClass};
use cinder_engine::item::ItemStack;
use cinder_engine::vanilla;
use cinder_engine::world::block::BlockId;
use cinder_engine::world::position::{BlockPos, Location, Vec3};

#[test]
fn unloaded_level_key_never_resolves_again() {
    let server = vanilla::server().unwrap();
    let first = server.load_level("world", BlockPos::new(0, 64, 0));
    assert!(server.level(first).is_some());
    assert!(server.unload_level(first));
    assert!(server.level(first).is_none());
    assert!(!server.unload_level(first));

    // Reusing the slot must not revive the old key.
    let second = server.load_level("world", BlockPos::new(0, 64, 0));
    assert_ne!(first, second);
    assert!(server.level(first).is_none());
    assert!(server.level(second).is_some());
}

#[test]
fn unloading_despawns_entities_in_that_level() {
    let server = vanilla::server().unwrap();
    let a = server.load_level("a", BlockPos::new(0, 64, 0));
    let b = server.load_level("b", BlockPos::new(0, 64, 0));
    let pig = server
        .spawn(Entity::new("minecraft:pig", EntityClass::Animal, Location::new(a, Vec3::ZERO)))
        .unwrap();
    let cow = server
        .spawn(Entity::new("minecraft:cow", EntityClass::Animal, Location::new(b, Vec3::ZERO)))
        .unwrap();

    server.unload_level(a);
    assert!(!server.is_alive(pig));
    assert!(server.is_alive(cow));
    assert_eq!(server.entities_in(b), vec![cow]);
}

#[test]
fn spawn_into_missing_level_fails() {
    let server = vanilla::server().unwrap();
    let level = server.load_level("gone", BlockPos::new(0, 0, 0));
    server.unload_level(level);
    let entity = Entity::new("minecraft:pig", EntityClass::Animal, Location::new(level, Vec3::ZERO));
    assert!(server.spawn(entity).is_none());
}

#[test]
fn spawns_racing_an_unload_never_outlive_the_level() {
    for _ in 0..20 {
        let server = vanilla::server().unwrap();
        let doomed = server.load_level("doomed", BlockPos::new(0, 64, 0));
        let safe = server.load_level("safe", BlockPos::new(0, 64, 0));

        let server = &server;
        let spawned = std::thread::scope(|scope| {
            let spawners: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(move || {
                        let mut ids = Vec::new();
                        for _ in 0..200 {
                            let at = Location::new(doomed, Vec3::ZERO);
                            let pig = Entity::new("minecraft:pig", EntityClass::Animal, at);
                            if let Some(id) = server.spawn(pig) {
                                ids.push(id);
                            }
                            let away = Location::new(safe, Vec3::ZERO);
                            let cow = server
                                .spawn(Entity::new("minecraft:cow", EntityClass::Animal, away))
                                .unwrap();
                            // Moving into the level races the unload as well.
                            if server.teleport(cow, at) {
                                ids.push(cow);
                            }
                        }
                        ids
                    })
                })
                .collect();
            scope.spawn(move || {
                std::thread::yield_now();
                assert!(server.unload_level(doomed));
            });
            spawners
                .into_iter()
                .flat_map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert!(server.level(doomed).is_none());
        assert!(server.entities_in(doomed).is_empty());
        for id in spawned {
            assert!(!server.is_alive(id));
        }
    }
}

#[test]
fn container_inventory_goes_with_its_block() {
    let server = vanilla::server().unwrap();
    let id = server.load_level("world", BlockPos::new(0, 64, 0));
    let level = server.level(id).unwrap();
    let chest = server.palette().default_state(vanilla::CHEST).unwrap();
    let pos = BlockPos::new(1, 64, -1);

    level.set_block(pos, chest);
    assert!(level.container(pos).is_none());
    assert!(!level.clear_container(pos));

    level.with_container_mut(pos, |inv| inv.add_item(ItemStack::new("minecraft:coal", 8)));
    assert_eq!(level.container(pos).unwrap().contents().len(), 1);
    // Rewriting the same state keeps the contents.
    level.set_block(pos, chest);
    assert!(level.clear_container(pos));
    assert!(level.container(pos).unwrap().contents().is_empty());

    level.with_container_mut(pos, |inv| inv.add_item(ItemStack::new("minecraft:coal", 1)));
    level.set_block(pos, BlockId::AIR);
    assert!(level.container(pos).is_none());
}

#[test]
fn despawned_entity_is_not_accessible() {
    let server = vanilla::server().unwrap();
    let level = server.load_level("world", BlockPos::new(0, 64, 0));
    let id = server
        .spawn(Entity::new("minecraft:zombie", EntityClass::Monster, Location::new(level, Vec3::ZERO)))
        .unwrap();
    assert_eq!(server.with_entity(id, |e| e.kind.clone()).as_deref(), Some("minecraft:zombie"));
    assert!(server.despawn(id));
    assert!(server.with_entity(id, |e| e.kind.clone()).is_none());
    assert!(!server.despawn(id));
}

#[test]
fn teleport_checks_destination() {
    let server = vanilla::server().unwrap();
    let home = server.load_level("home", BlockPos::new(0, 64, 0));
    let away = server.load_level("away", BlockPos::new(0, 64, 0));
    let id = server.spawn(Entity::player("Alex", Location::new(home, Vec3::ZERO))).unwrap();

    let target = Location::new(away, Vec3::new(1.5, 70.0, -2.5)).with_rotation(90.0, 10.0);
    assert!(server.teleport(id, target));
    assert_eq!(server.with_entity(id, |e| e.location), Some(target));

    server.unload_level(home);
    assert!(!server.teleport(id, Location::new(home, Vec3::ZERO)));
}

#[test]
fn players_are_found_by_name_and_uuid() {
    let server = vanilla::server().unwrap();
    let level = server.load_level("world", BlockPos::new(0, 64, 0));
    let id = server.spawn(Entity::player("Steve", Location::new(level, Vec3::ZERO))).unwrap();
    server
        .spawn(Entity::new("minecraft:pig", EntityClass::Animal, Location::new(level, Vec3::ZERO)))
        .unwrap();

    assert_eq!(server.player_by_name("steve"), Some(id));
    let uuid = server.with_entity(id, |e| e.unique_id).unwrap();
    assert_eq!(server.player_by_uuid(uuid), Some(id));
    assert_eq!(server.players(), vec![id]);
}

#[test]
fn create_item_attaches_block_form() {
    let server = vanilla::server().unwrap();
    let stone = server.create_item(vanilla::STONE, 0, 3, None);
    assert_eq!(stone.block(), server.palette().default_state(vanilla::STONE));
    let stick = server.create_item("minecraft:stick", 0, 1, None);
    assert_eq!(stick.block(), None);
}

#[test]
fn drop_item_spawns_item_entity() {
    let server = vanilla::server().unwrap();
    let level = server.load_level("world", BlockPos::new(0, 64, 0));
    let stack = server.create_item("minecraft:diamond", 0, 2, None);
    let id = server.drop_item(level, Vec3::new(0.5, 65.0, 0.5), &stack).unwrap();
    let (class, has_item) = server
        .with_entity(id, |e| (e.class, e.tag.contains_key("Item")))
        .unwrap();
    assert_eq!(class, EntityClass::Item);
    assert!(has_item);

    assert!(server.drop_item(level, Vec3::ZERO, &ItemStack::air()).is_none());
}

#[test]
fn inventory_merges_matching_stacks() {
    let server = vanilla::server().unwrap();
    let level = server.load_level("world", BlockPos::new(0, 64, 0));
    let id = server.spawn(Entity::player("Alex", Location::new(level, Vec3::ZERO))).unwrap();
    server
        .with_entity_mut(id, |e| {
            let inv = &mut e.player.as_mut().unwrap().inventory;
            assert!(inv.add_item(ItemStack::new("minecraft:coal", 4)));
            assert!(inv.add_item(ItemStack::new("minecraft:coal", 5)));
            assert_eq!(inv.contents().len(), 1);
            assert_eq!(inv.contents()[0].count(), 9);
        })
        .unwrap();
}
