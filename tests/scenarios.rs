//! End-to-end scenarios over the public API

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use underlord::combat::process_combat;
use underlord::core::types::{CreatureId, HeroId, Position};
use underlord::core::GameConfig;
use underlord::dungeon::RoomType;
use underlord::entity::{Creature, CreatureType, DungeonHeart, Hero, HeroTarget, HeroType};
use underlord::simulation::{
    create_wave, run_game_tick, start_game, try_place_room, GameEvent, GameState,
};
use underlord::spatial::{Grid, Tile, TileKind, DIG_GOLD};

fn playing(seed: u64) -> GameState {
    let mut state = GameState::new(GameConfig::seeded(seed));
    start_game(&mut state);
    state
}

#[test]
fn test_digging_plain_dirt_yields_base_gold() {
    let mut grid = Grid::generate(Some(1));
    let pos = Position::new(5, 5);
    grid.set_tile(pos, Tile::new(TileKind::Dirt));

    assert_eq!(grid.dig(pos), DIG_GOLD);
    assert_eq!(DIG_GOLD, 50);

    let tile = grid.tile(pos).copied().expect("in bounds");
    assert_eq!(tile.kind, TileKind::Floor);
    assert!(tile.owned);
    assert!(!tile.gold_seam);

    // Digging floor or rock does nothing
    assert_eq!(grid.dig(pos), 0);
    assert_eq!(grid.dig(Position::new(0, 0)), 0);
    assert_eq!(grid.kind_at(Position::new(0, 0)), Some(TileKind::Rock));
}

#[test]
fn test_hero_hit_on_creature_stays_within_variance() {
    for seed in 0..50 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut creatures = vec![Creature::new(
            CreatureId(1),
            CreatureType::Beetle,
            Position::new(10, 10),
        )];
        assert_eq!(creatures[0].hp, 40.0);

        let mut hero = Hero::new(HeroId(1), HeroType::Peasant, Position::new(10, 11));
        hero.target = Some(HeroTarget::Creature(CreatureId(1)));
        let mut heroes = vec![hero];
        let mut heart = DungeonHeart::new(Position::new(30, 20));

        let events = process_combat(&mut creatures, &mut heroes, &mut heart, 10.0, &mut rng);
        assert_eq!(events.len(), 1);
        assert!((6..=9).contains(&events[0].damage));
        let hp = creatures[0].hp;
        assert!((31.0..=34.0).contains(&hp), "hp {} out of range", hp);
    }
}

#[test]
fn test_wave_compositions() {
    let first = create_wave(1);
    assert_eq!(first, vec![HeroType::Peasant, HeroType::Peasant]);

    let fifth = create_wave(5);
    assert_eq!(fifth.iter().filter(|&&h| h == HeroType::Lord).count(), 1);
}

#[test]
fn test_lair_purchase_is_atomic() {
    let mut state = playing(4);
    let top_left = state.heart.pos.offset(-2, -2);

    // Footprint inside the cleared heart area
    assert!(try_place_room(&mut state, top_left, RoomType::Lair));
    // Charged 500, then clamped to the 1000 capacity
    assert_eq!(state.gold(), 1000);
    assert_eq!(state.rooms.len(), 1);

    // Overlapping footprint
    assert!(!try_place_room(&mut state, top_left, RoomType::Lair));
    assert_eq!(state.gold(), 1000);

    // Not enough gold
    state.economy.gold = 400;
    let elsewhere = state.heart.pos.offset(-2, 1);
    assert!(!try_place_room(&mut state, elsewhere, RoomType::Lair));
    assert_eq!(state.gold(), 400);
    assert_eq!(state.rooms.len(), 1);
}

#[test]
fn test_unhappy_creature_leaves_next_tick() {
    let mut state = playing(4);
    let id = state.ids.next_creature();
    let mut creature = Creature::new(id, CreatureType::Troll, state.heart.pos.offset(1, 1));
    creature.happiness = 5.0;
    creature.hp = 1.0;
    state.creatures.push(creature);

    let events = run_game_tick(&mut state, 0.1);
    assert!(state.creatures.is_empty());
    assert!(events.contains(&GameEvent::CreatureLeft {
        id,
        creature_type: CreatureType::Troll
    }));
    assert!(state.messages.contains("troll left due to unhappiness!"));
    // Leaving is not dying
    assert!(state.dead_creatures.is_empty());
}
