//! The per-tick pipeline
//!
//! `run_game_tick` runs every phase in a fixed order. Within a phase,
//! entities are visited in list order. Removals are deferred to the end of
//! the phase that decides them so no list is mutated while it is walked.

use crate::combat::resolution::{is_in_range, process_combat};
use crate::core::types::{CreatureId, HeroId, ImpId, Position, Seconds};
use crate::dungeon::economy::calculate_wages;
use crate::dungeon::room::{rooms_of_type, Room, RoomType};
use crate::entity::creature::{CreatureBehavior, CreatureType};
use crate::entity::hero::{HeroBehavior, HeroTarget, HeroType};
use crate::entity::imp::{find_nearest_reachable_task, ImpOutcome, TaskKind, IMP_SPEED};
use crate::entity::Combatant;
use crate::simulation::events::GameEvent;
use crate::simulation::movement::step_toward;
use crate::simulation::population::{
    process_prisoner_conversion, process_respawns, queue_respawn, try_attract_creature,
};
use crate::simulation::state::{GameScreen, GameState, Prisoner};
use crate::simulation::wave::{
    should_show_warning, should_spawn_wave, spawn_wave, time_until_next_wave, SPAWN_ROW,
};
use crate::spatial::grid::{Grid, TileKind};

/// Advance the game by `dt` seconds.
///
/// Does nothing unless the game is being played and is not paused. Returns
/// everything noteworthy that happened, in the order it happened.
pub fn run_game_tick(state: &mut GameState, dt: Seconds) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if !state.is_playing() || state.paused {
        return events;
    }

    // 1. Clocks
    state.game_time += dt;
    state.wave_timer += dt;

    // 2. Heart regeneration
    state.heart.regenerate(
        state.game_time,
        dt,
        state.config.heart_regen_rate,
        state.config.heart_regen_delay,
    );

    // 3. Creature attraction
    if state.game_time - state.last_creature_spawn_time >= state.config.creature_spawn_interval {
        state.last_creature_spawn_time = state.game_time;
        try_attract_creature(state, &mut events);
    }

    // 4-7. Agents and upkeep
    update_imps(state, dt, &mut events);
    pay_wages(state, &mut events);
    update_creatures(state, dt, &mut events);
    update_heroes(state, dt);

    // 8. Hazards
    apply_lava_damage(state, dt);

    // 9. Combat
    let attacks = process_combat(
        &mut state.creatures,
        &mut state.heroes,
        &mut state.heart,
        state.game_time,
        &mut state.rng,
    );
    events.extend(attacks.into_iter().map(GameEvent::Attack));

    // 10-12. Casualties
    handle_fallen_heroes(state, &mut events);
    handle_fallen_creatures(state, &mut events);
    revive_imps(state, &mut events);

    // 13. Queued arrivals
    process_respawns(state, &mut events);
    process_prisoner_conversion(state, &mut events);

    // 14. Clear the dead; imps are never removed
    state.heroes.retain(|h| !h.is_dead());
    state.creatures.retain(|c| !c.is_dead());

    // 15. Waves
    advance_waves(state, &mut events);

    // 16. Game over
    if state.heart_destroyed() {
        state.screen = GameScreen::GameOver;
        state.add_message("Your dungeon heart has been destroyed!");
        tracing::info!(
            wave = state.wave,
            time = state.game_time,
            score = state.final_score(),
            "Game over"
        );
        events.push(GameEvent::GameOver);
    }

    events
}

fn update_imps(state: &mut GameState, dt: Seconds, events: &mut Vec<GameEvent>) {
    let flee_radius = state.config.imp_flee_radius;
    let heart = state.heart.pos;

    for i in 0..state.imps.len() {
        let imp = &mut state.imps[i];

        let threatened = state
            .heroes
            .iter()
            .any(|h| !h.is_dead() && h.pos.manhattan(&imp.pos) <= flee_radius);
        if threatened {
            if imp.task == TaskKind::Dig {
                if let Some(task) = state.dig_tasks.iter_mut().find(|t| Some(t.pos) == imp.target) {
                    task.assigned = false;
                }
            }
            imp.clear_task();
            step_toward(&state.grid, &mut imp.pos, &mut imp.move_progress, heart, IMP_SPEED, dt);
            continue;
        }

        if !imp.is_working() {
            let nearest = find_nearest_reachable_task(&state.grid, imp.pos, &state.dig_tasks);
            if let Some(index) = nearest {
                let task = &mut state.dig_tasks[index];
                task.assigned = true;
                imp.assign_task(TaskKind::Dig, Some(task.pos));
            }
        }

        let imp_id = imp.id;
        match imp.update(&mut state.grid, dt) {
            ImpOutcome::Dug { at, gold } => {
                // Gold goes straight to the treasury
                imp.carrying = 0;
                state.dig_tasks.retain(|t| t.pos != at);
                let added = state.add_gold(gold);
                tracing::debug!(imp = imp_id.0, %at, gold, added, "Tile dug");
                events.push(GameEvent::Dug {
                    imp: imp_id,
                    at,
                    gold,
                });
            }
            ImpOutcome::Finished => {
                // The designation no longer points at dirt
                let grid = &state.grid;
                state.dig_tasks.retain(|t| grid.is_diggable(t.pos));
            }
            ImpOutcome::Blocked => {
                if let Some(target) = imp.target {
                    if let Some(task) = state.dig_tasks.iter_mut().find(|t| t.pos == target) {
                        task.assigned = false;
                    }
                    tracing::debug!(imp = imp_id.0, %target, "Imp cannot reach task");
                }
                imp.clear_task();
            }
            ImpOutcome::Idle
            | ImpOutcome::Moved
            | ImpOutcome::Claimed { .. }
            | ImpOutcome::Deposited { .. } => {}
        }
    }
}

/// Pay every creature's wage on the wage cadence.
///
/// Unaffordable wages are not paid in part; every creature loses happiness
/// instead.
fn pay_wages(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.game_time - state.economy.last_wage_time < state.config.wage_interval {
        return;
    }
    state.economy.last_wage_time = state.game_time;

    let wages = calculate_wages(&state.creatures);
    if wages == 0 {
        return;
    }

    if state.economy.spend_gold(wages) {
        tracing::debug!(wages, gold = state.gold(), "Wages paid");
        events.push(GameEvent::WagesPaid { amount: wages });
    } else {
        let penalty = state.config.unpaid_happiness_penalty;
        for creature in &mut state.creatures {
            creature.happiness = (creature.happiness - penalty).max(0.0);
        }
        state.add_message("Not enough gold for wages!");
        tracing::warn!(wages, gold = state.gold(), "Wages unpaid");
        events.push(GameEvent::WagesMissed { owed: wages });
    }
}

fn first_tile(rooms: &[Room], room_type: RoomType) -> Option<Position> {
    rooms_of_type(rooms, room_type).next().and_then(Room::top_left)
}

fn update_creatures(state: &mut GameState, dt: Seconds, events: &mut Vec<GameEvent>) {
    let hatchery = first_tile(&state.rooms, RoomType::Hatchery);
    let has_food = hatchery.is_some();
    let heart = state.heart.pos;
    let leave_threshold = state.config.leave_happiness_threshold;
    let mut leaving: Vec<CreatureId> = Vec::new();

    for creature in state.creatures.iter_mut() {
        if creature.is_dead() {
            continue;
        }
        creature.update_needs(dt);

        if creature.happiness < leave_threshold {
            let name = creature.creature_type.name();
            leaving.push(creature.id);
            state.messages.push(format!("{} left due to unhappiness!", name));
            tracing::info!(creature = name, id = creature.id.0, "Creature left");
            events.push(GameEvent::CreatureLeft {
                id: creature.id,
                creature_type: creature.creature_type,
            });
            continue;
        }

        let nearest = creature
            .find_nearest_enemy(&state.heroes)
            .map(|hero| (hero.id, hero.pos));
        if let Some((hero_id, _)) = nearest {
            creature.target = Some(hero_id);
        }

        let work = creature
            .creature_type
            .work_room()
            .and_then(|room_type| first_tile(&state.rooms, room_type).map(|tile| (room_type, tile)));

        let behavior = creature.determine_behavior(nearest.is_some(), has_food);
        creature.behavior = behavior;
        let speed = creature.speed();

        match behavior {
            CreatureBehavior::Fighting => {
                if let Some((_, hero_pos)) = nearest {
                    if !is_in_range(creature.pos, hero_pos, creature.range()) {
                        step_toward(
                            &state.grid,
                            &mut creature.pos,
                            &mut creature.move_progress,
                            hero_pos,
                            speed,
                            dt,
                        );
                    }
                }
            }
            CreatureBehavior::Eating => {
                if let Some(tile) = hatchery {
                    if creature.pos.manhattan(&tile) <= 1 {
                        creature.feed(state.config.feed_amount);
                    } else {
                        step_toward(
                            &state.grid,
                            &mut creature.pos,
                            &mut creature.move_progress,
                            tile,
                            speed,
                            dt,
                        );
                    }
                }
            }
            CreatureBehavior::Fleeing => {
                step_toward(
                    &state.grid,
                    &mut creature.pos,
                    &mut creature.move_progress,
                    heart,
                    speed,
                    dt,
                );
            }
            CreatureBehavior::Idle | CreatureBehavior::Working => {
                let Some((room_type, tile)) = work else {
                    continue;
                };
                if creature.pos.manhattan(&tile) > 1 {
                    step_toward(
                        &state.grid,
                        &mut creature.pos,
                        &mut creature.move_progress,
                        tile,
                        speed,
                        dt,
                    );
                    continue;
                }

                creature.behavior = CreatureBehavior::Working;
                creature.pay(state.config.work_happiness_rate * dt);

                if room_type == RoomType::Training
                    && creature.train(dt * state.config.training_rate, state.config.max_creature_level)
                {
                    let name = creature.creature_type.name();
                    state
                        .messages
                        .push(format!("{} leveled up to {}!", name, creature.level));
                    tracing::info!(creature = name, level = creature.level, "Creature levelled up");
                    events.push(GameEvent::CreatureLevelledUp {
                        id: creature.id,
                        level: creature.level,
                    });
                }
            }
        }
    }

    if !leaving.is_empty() {
        state.creatures.retain(|c| !leaving.contains(&c.id));
    }
}

fn update_heroes(state: &mut GameState, dt: Seconds) {
    let width = state.grid.width();

    for hero in state.heroes.iter_mut() {
        if hero.is_dead() {
            continue;
        }

        hero.target = hero.choose_target(&state.creatures, &state.heart);
        hero.behavior = hero.determine_behavior();

        let goal = match hero.behavior {
            HeroBehavior::Entering => Some(
                hero.find_nearest_target(&state.creatures, &state.heart)
                    .map_or(state.heart.pos, |(_, pos)| pos),
            ),
            HeroBehavior::Attacking => {
                let target_pos = match hero.target {
                    Some(HeroTarget::Heart) => Some(state.heart.pos),
                    Some(HeroTarget::Creature(id)) => {
                        state.creatures.iter().find(|c| c.id == id).map(|c| c.pos)
                    }
                    None => None,
                };
                target_pos.filter(|&pos| !is_in_range(hero.pos, pos, hero.range()))
            }
            HeroBehavior::Fleeing => {
                let x = if hero.pos.x < width / 2 { 1 } else { width - 2 };
                Some(Position::new(x, SPAWN_ROW))
            }
        };

        if let Some(goal) = goal {
            let speed = hero.speed();
            step_toward(&state.grid, &mut hero.pos, &mut hero.move_progress, goal, speed, dt);
        }
    }
}

fn burn<T: Combatant>(grid: &Grid, agents: &mut [T], damage: f32) {
    for agent in agents.iter_mut() {
        if grid.kind_at(agent.position()) == Some(TileKind::Lava) {
            agent.apply_damage(damage);
        }
    }
}

fn apply_lava_damage(state: &mut GameState, dt: Seconds) {
    let damage = state.config.lava_damage_per_second * dt;
    burn(&state.grid, &mut state.creatures, damage);
    burn(&state.grid, &mut state.heroes, damage);
    burn(&state.grid, &mut state.imps, damage);
}

/// Capture fallen heroes if there is a prison, otherwise collect their gold
fn handle_fallen_heroes(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let fallen: Vec<(HeroId, HeroType)> = state
        .heroes
        .iter()
        .filter(|h| h.is_dead())
        .map(|h| (h.id, h.hero_type))
        .collect();
    if fallen.is_empty() {
        return;
    }

    let has_prison = state.has_room(RoomType::Prison);
    for (id, hero_type) in fallen {
        state.stats.heroes_defeated += 1;

        if has_prison {
            state.prisoners.push(Prisoner {
                hero_type,
                capture_time: state.game_time,
                reported: false,
            });
            state.add_message("Hero captured! Prisoner added to prison.");
            tracing::info!(hero = hero_type.name(), "Hero captured");
            events.push(GameEvent::HeroCaptured { id, hero_type });
        } else {
            let gold = hero_type.stats().gold;
            let added = state.add_gold(gold);
            state.add_message(format!("Hero slain! +{} gold", gold));
            tracing::info!(hero = hero_type.name(), gold, added, "Hero slain");
            events.push(GameEvent::HeroSlain { id, hero_type, gold });
        }
    }
}

/// Queue every fallen creature for respawn
fn handle_fallen_creatures(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let fallen: Vec<(CreatureId, CreatureType)> = state
        .creatures
        .iter()
        .filter(|c| c.is_dead())
        .map(|c| (c.id, c.creature_type))
        .collect();

    for (id, creature_type) in fallen {
        queue_respawn(state, creature_type);
        state.add_message(format!("{} fell in battle!", creature_type.name()));
        tracing::info!(creature = creature_type.name(), id = id.0, "Creature died");
        events.push(GameEvent::CreatureDied { id, creature_type });
    }
}

/// Imps are immortal: a dead imp reappears below the heart at full health
fn revive_imps(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let spawn = state.heart.pos.offset(0, 1);
    let mut revived: Vec<ImpId> = Vec::new();

    for imp in state.imps.iter_mut().filter(|imp| imp.is_dead()) {
        if let Some(target) = imp.target {
            if let Some(task) = state.dig_tasks.iter_mut().find(|t| t.pos == target) {
                task.assigned = false;
            }
        }
        imp.hp = imp.max_hp;
        imp.pos = spawn;
        imp.clear_task();
        imp.carrying = 0;
        imp.move_progress = 0.0;
        revived.push(imp.id);
    }

    for id in revived {
        state.add_message("Imp respawned at dungeon heart.");
        tracing::debug!(imp = id.0, "Imp respawned");
        events.push(GameEvent::ImpRespawned { id });
    }
}

fn advance_waves(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let interval = state.config.wave_interval;

    if should_spawn_wave(state.wave_timer, interval) {
        state.wave += 1;
        let heroes = spawn_wave(state.wave, &state.grid, &mut state.ids, &mut state.rng);
        let count = heroes.len();
        state.heroes.extend(heroes);
        state.wave_timer = 0.0;
        state.wave_warning_shown = false;

        state.add_message(format!("Wave {} incoming! {} heroes attack!", state.wave, count));
        tracing::info!(wave = state.wave, heroes = count, "Wave spawned");
        events.push(GameEvent::WaveSpawned {
            wave: state.wave,
            heroes: count,
        });
    } else if !state.wave_warning_shown
        && should_show_warning(state.wave_timer, interval, state.config.wave_warning)
    {
        state.wave_warning_shown = true;
        let next = state.wave + 1;
        let seconds_left = time_until_next_wave(state.wave_timer, interval);
        state.add_message(format!("Wave {} approaches in {:.0} seconds!", next, seconds_left));
        events.push(GameEvent::WaveWarning {
            wave: next,
            seconds_left,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::dungeon::room::place_room;
    use crate::entity::creature::Creature;
    use crate::entity::hero::Hero;
    use crate::simulation::commands::{designate_dig, start_game, toggle_pause};
    use crate::spatial::grid::Tile;

    fn playing() -> GameState {
        let mut state = GameState::new(GameConfig::seeded(3));
        start_game(&mut state);
        state
    }

    fn add_creature(state: &mut GameState, creature_type: CreatureType, pos: Position) -> usize {
        let id = state.ids.next_creature();
        state.creatures.push(Creature::new(id, creature_type, pos));
        state.creatures.len() - 1
    }

    fn add_hero(state: &mut GameState, hero_type: HeroType, pos: Position) -> usize {
        let id = state.ids.next_hero();
        state.heroes.push(Hero::new(id, hero_type, pos));
        state.heroes.len() - 1
    }

    #[test]
    fn test_tick_is_noop_unless_playing() {
        let mut state = GameState::new(GameConfig::seeded(3));
        assert!(run_game_tick(&mut state, 1.0).is_empty());
        assert_eq!(state.game_time, 0.0);

        start_game(&mut state);
        toggle_pause(&mut state);
        run_game_tick(&mut state, 1.0);
        assert_eq!(state.game_time, 0.0);
        assert_eq!(state.wave_timer, 0.0);

        toggle_pause(&mut state);
        run_game_tick(&mut state, 1.0);
        assert_eq!(state.game_time, 1.0);
        assert_eq!(state.wave_timer, 1.0);
    }

    #[test]
    fn test_heart_regenerates_after_delay() {
        let mut state = playing();
        state.heart.hp = 500.0;
        state.heart.last_attack_time = -10.0;
        run_game_tick(&mut state, 1.0);
        assert_eq!(state.heart.hp, 501.0);
    }

    #[test]
    fn test_imp_digs_designated_tile() {
        let mut state = playing();
        state.economy.gold = 0;
        let heart = state.heart.pos;
        let dirt = heart.offset(3, 0);
        assert!(designate_dig(&mut state, dirt));

        let mut dug = None;
        for _ in 0..20 {
            for event in run_game_tick(&mut state, 0.5) {
                if let GameEvent::Dug { at, gold, .. } = event {
                    dug = Some((at, gold));
                }
            }
        }

        let (at, gold) = dug.expect("imp should dig the tile");
        assert_eq!(at, dirt);
        assert!(gold == 50 || gold == 250);
        assert_eq!(state.gold(), gold);
        assert!(state.grid.is_walkable(dirt));
        assert!(state.dig_tasks.is_empty());
        assert!(state.imps.iter().all(|imp| imp.carrying == 0));
    }

    #[test]
    fn test_imps_flee_heroes_and_release_task() {
        let mut state = playing();
        let heart = state.heart.pos;
        let dirt = heart.offset(3, 0);
        designate_dig(&mut state, dirt);
        run_game_tick(&mut state, 0.1);
        assert!(state.dig_tasks[0].assigned);

        // A hero right next to every imp
        add_hero(&mut state, HeroType::Peasant, heart.offset(0, 2));
        state.heroes[0].hp = 1000.0;
        state.heroes[0].max_hp = 1000.0;
        run_game_tick(&mut state, 0.1);

        assert!(!state.dig_tasks[0].assigned);
        assert!(state.imps.iter().all(|imp| !imp.is_working()));
    }

    #[test]
    fn test_unpaid_wages_cost_happiness_not_gold() {
        let mut state = playing();
        let heart = state.heart.pos;
        add_creature(&mut state, CreatureType::Orc, heart.offset(1, -1));
        state.economy.gold = 10;
        state.economy.last_wage_time = -60.0;

        let events = run_game_tick(&mut state, 0.1);
        assert!(events.contains(&GameEvent::WagesMissed { owed: 20 }));
        assert_eq!(state.gold(), 10);
        let happiness = state.creatures[0].happiness;
        assert!(happiness < 80.0 && happiness > 79.9);
    }

    #[test]
    fn test_paid_wages_only_deduct_gold() {
        let mut state = playing();
        let heart = state.heart.pos;
        let index = add_creature(&mut state, CreatureType::Orc, heart.offset(1, -1));
        state.creatures[index].happiness = 50.0;
        state.economy.gold = 100;
        state.economy.last_wage_time = -60.0;

        let events = run_game_tick(&mut state, 0.1);
        assert!(events.contains(&GameEvent::WagesPaid { amount: 20 }));
        assert_eq!(state.gold(), 80);
        let happiness = state.creatures[0].happiness;
        assert!(happiness <= 50.0 && happiness > 49.9);
    }

    #[test]
    fn test_fallen_hero_drops_gold_without_prison() {
        let mut state = playing();
        state.economy.gold = 0;
        let index = add_hero(&mut state, HeroType::Archer, Position::new(5, 1));
        state.heroes[index].hp = 0.0;

        let events = run_game_tick(&mut state, 0.1);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::HeroSlain { gold: 100, .. })));
        assert_eq!(state.gold(), 100);
        assert!(state.heroes.is_empty());
        assert_eq!(state.stats.heroes_defeated, 1);
        assert!(state.messages.contains("Hero slain! +100 gold"));
    }

    #[test]
    fn test_fallen_hero_captured_with_prison() {
        let mut state = playing();
        state.economy.gold = 0;
        place_room(&mut state.grid, &mut state.rooms, Position::new(18, 13), RoomType::Prison);
        let index = add_hero(&mut state, HeroType::Knight, Position::new(5, 1));
        state.heroes[index].hp = 0.0;

        let events = run_game_tick(&mut state, 0.1);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::HeroCaptured { hero_type: HeroType::Knight, .. })));
        assert_eq!(state.gold(), 0);
        assert_eq!(state.prisoners.len(), 1);
        assert!(state.heroes.is_empty());
    }

    #[test]
    fn test_fallen_creature_queued_for_respawn() {
        let mut state = playing();
        let heart = state.heart.pos;
        let index = add_creature(&mut state, CreatureType::Warlock, heart.offset(1, -1));
        state.creatures[index].hp = 0.0;

        let events = run_game_tick(&mut state, 0.1);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::CreatureDied { .. })));
        assert!(state.creatures.is_empty());
        assert_eq!(state.dead_creatures.len(), 1);
        assert_eq!(state.dead_creatures[0].cost, 150);
        assert!(state.messages.contains("warlock fell in battle!"));
    }

    #[test]
    fn test_dead_imp_revives_below_heart() {
        let mut state = playing();
        state.imps[0].hp = 0.0;
        state.imps[0].pos = Position::new(18, 13);
        state.imps[0].carrying = 40;

        let events = run_game_tick(&mut state, 0.1);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::ImpRespawned { .. })));
        let imp = &state.imps[0];
        assert_eq!(imp.hp, imp.max_hp);
        assert_eq!(imp.pos, state.heart.pos.offset(0, 1));
        assert_eq!(imp.carrying, 0);
        assert_eq!(state.imps.len(), 3);
    }

    #[test]
    fn test_lava_burns_agents() {
        let mut state = playing();
        let heart = state.heart.pos;
        let lava = heart.offset(2, 2);
        state.grid.set_tile(lava, Tile::new(TileKind::Lava));
        let index = add_creature(&mut state, CreatureType::Troll, lava);

        run_game_tick(&mut state, 0.5);
        assert_eq!(state.creatures[index].hp, 75.0);
    }

    #[test]
    fn test_wave_spawns_at_interval() {
        let mut state = playing();
        state.wave_timer = 119.9;

        let events = run_game_tick(&mut state, 0.5);
        assert!(events.contains(&GameEvent::WaveSpawned { wave: 1, heroes: 2 }));
        assert_eq!(state.wave, 1);
        assert_eq!(state.wave_timer, 0.0);
        assert_eq!(state.heroes.len(), 2);
        assert!(state.messages.contains("Wave 1 incoming! 2 heroes attack!"));
    }

    #[test]
    fn test_wave_warning_fires_once() {
        let mut state = playing();
        state.wave_timer = 95.0;

        let first = run_game_tick(&mut state, 0.1);
        assert!(first
            .iter()
            .any(|e| matches!(e, GameEvent::WaveWarning { wave: 1, .. })));

        let second = run_game_tick(&mut state, 0.1);
        assert!(!second
            .iter()
            .any(|e| matches!(e, GameEvent::WaveWarning { .. })));
    }

    #[test]
    fn test_game_over_when_heart_destroyed() {
        let mut state = playing();
        state.heart.hp = 0.0;

        let events = run_game_tick(&mut state, 0.1);
        assert!(events.contains(&GameEvent::GameOver));
        assert!(state.is_game_over());
        assert_eq!(
            state.messages.latest(),
            Some("Your dungeon heart has been destroyed!")
        );

        assert!(run_game_tick(&mut state, 0.1).is_empty());
    }
}
