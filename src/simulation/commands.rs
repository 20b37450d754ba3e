//! Player commands applied between ticks
//!
//! Each command either succeeds and mutates the game, or fails without
//! touching anything but the message log.

use crate::core::types::{ImpId, Position};
use crate::dungeon::room::{can_place_room, place_room, remove_room_at, RoomType};
use crate::entity::imp::{DigTask, Imp, TaskKind};
use crate::simulation::state::{GameScreen, GameState};

/// Leave the title screen and start the clock
pub fn start_game(state: &mut GameState) {
    state.screen = GameScreen::Playing;
    state.wave = 0;
    state.wave_timer = 0.0;
    state.wave_warning_shown = false;
    state.add_message("The dungeon awaits. Build your empire!");
    tracing::info!(seed = ?state.config.seed, "Game started");
}

/// Mark a dirt tile for the imps to dig. Fails on non-dirt or a duplicate.
pub fn designate_dig(state: &mut GameState, pos: Position) -> bool {
    if !state.grid.is_diggable(pos) {
        return false;
    }
    if state.dig_tasks.iter().any(|t| t.pos == pos) {
        return false;
    }
    state.dig_tasks.push(DigTask::new(pos));
    true
}

/// Withdraw a dig designation; any imp working it goes idle
pub fn cancel_dig(state: &mut GameState, pos: Position) -> bool {
    let Some(index) = state.dig_tasks.iter().position(|t| t.pos == pos) else {
        return false;
    };
    state.dig_tasks.remove(index);

    for imp in state
        .imps
        .iter_mut()
        .filter(|imp| imp.task == TaskKind::Dig && imp.target == Some(pos))
    {
        imp.clear_task();
    }
    true
}

/// Buy and build a room with its top-left corner at `top_left`.
///
/// Affordability is checked before the footprint, so a broke player hears
/// about the gold first.
pub fn try_place_room(state: &mut GameState, top_left: Position, room_type: RoomType) -> bool {
    let cost = room_type.cost();

    if !state.economy.can_afford(cost) {
        state.add_message("Not enough gold!");
        return false;
    }
    if !can_place_room(&state.grid, top_left, room_type) {
        state.add_message("Cannot place room here!");
        return false;
    }

    state.economy.spend_gold(cost);
    place_room(&mut state.grid, &mut state.rooms, top_left, room_type);
    state.economy.update_max_gold(&state.rooms);
    state.stats.rooms_built += 1;
    state.add_message(format!("{} built!", room_type.name()));
    tracing::info!(room = room_type.name(), cost, %top_left, gold = state.gold(), "Room built");

    refresh_placement(state);
    true
}

/// Tear down the room covering `pos`. No refund.
pub fn try_remove_room(state: &mut GameState, pos: Position) -> bool {
    let Some(room) = remove_room_at(&mut state.grid, &mut state.rooms, pos) else {
        return false;
    };

    state.economy.update_max_gold(&state.rooms);
    state.add_message(format!("{} removed", room.room_type.name()));
    tracing::info!(room = room.room_type.name(), %pos, max_gold = state.max_gold(), "Room removed");

    refresh_placement(state);
    true
}

/// Buy a new imp, placed on the heart
pub fn summon_imp(state: &mut GameState) -> Option<ImpId> {
    if !state.economy.spend_gold(state.config.imp_cost) {
        state.add_message("Not enough gold!");
        return None;
    }

    let id = state.ids.next_imp();
    state.imps.push(Imp::new(id, state.heart.pos));
    state.add_message("Imp summoned!");
    tracing::debug!(imp = id.0, gold = state.gold(), "Imp summoned");
    Some(id)
}

/// Pause or resume. Only meaningful while playing.
pub fn toggle_pause(state: &mut GameState) -> bool {
    if state.is_playing() {
        state.paused = !state.paused;
    }
    state.paused
}

/// Choose the room type to preview for placement
pub fn select_room(state: &mut GameState, room_type: RoomType) {
    state.selected_room = room_type;
    refresh_placement(state);
}

/// Move the placement preview
pub fn set_hover(state: &mut GameState, pos: Option<Position>) {
    state.hover_pos = pos;
    refresh_placement(state);
}

fn refresh_placement(state: &mut GameState) {
    state.placement_valid = match state.hover_pos {
        Some(pos) => {
            can_place_room(&state.grid, pos, state.selected_room)
                && state.economy.can_afford(state.selected_room.cost())
        }
        None => false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::spatial::grid::{Tile, TileKind};

    fn playing() -> GameState {
        let mut state = GameState::new(GameConfig::seeded(11));
        start_game(&mut state);
        state
    }

    /// A claimed 3x3 patch with its top-left at `top_left`
    fn claim_patch(state: &mut GameState, top_left: Position) {
        for dy in 0..3 {
            for dx in 0..3 {
                state.grid.set_tile(top_left.offset(dx, dy), Tile::claimed_floor());
            }
        }
    }

    #[test]
    fn test_start_game() {
        let mut state = GameState::new(GameConfig::seeded(11));
        state.wave = 4;
        start_game(&mut state);
        assert!(state.is_playing());
        assert_eq!(state.wave, 0);
        assert_eq!(state.messages.latest(), Some("The dungeon awaits. Build your empire!"));
    }

    #[test]
    fn test_designate_dig_rejects_duplicates_and_non_dirt() {
        let mut state = playing();
        let dirt = Position::new(5, 5);
        state.grid.set_tile(dirt, Tile::new(TileKind::Dirt));

        assert!(designate_dig(&mut state, dirt));
        assert!(!designate_dig(&mut state, dirt));
        let heart_pos = state.heart.pos;
        assert!(!designate_dig(&mut state, heart_pos));
        assert!(!designate_dig(&mut state, Position::new(-1, 0)));
        assert_eq!(state.dig_tasks.len(), 1);
    }

    #[test]
    fn test_cancel_dig_releases_imp() {
        let mut state = playing();
        let dirt = Position::new(5, 5);
        state.grid.set_tile(dirt, Tile::new(TileKind::Dirt));
        designate_dig(&mut state, dirt);
        state.imps[0].assign_task(TaskKind::Dig, Some(dirt));

        assert!(cancel_dig(&mut state, dirt));
        assert!(state.dig_tasks.is_empty());
        assert!(!state.imps[0].is_working());
        assert!(!cancel_dig(&mut state, dirt));
    }

    #[test]
    fn test_place_room_charges_exact_cost() {
        let mut state = playing();
        let top_left = Position::new(4, 4);
        claim_patch(&mut state, top_left);

        assert!(try_place_room(&mut state, top_left, RoomType::Lair));
        // 2000 - 500, then clamped to the base capacity
        assert_eq!(state.gold(), 1000);
        assert_eq!(state.rooms.len(), 1);
        assert_eq!(state.stats.rooms_built, 1);
        assert_eq!(state.messages.latest(), Some("Lair built!"));
    }

    #[test]
    fn test_place_room_fails_without_gold() {
        let mut state = playing();
        let top_left = Position::new(4, 4);
        claim_patch(&mut state, top_left);
        state.economy.gold = 499;

        assert!(!try_place_room(&mut state, top_left, RoomType::Lair));
        assert_eq!(state.gold(), 499);
        assert!(state.rooms.is_empty());
        assert_eq!(state.messages.latest(), Some("Not enough gold!"));
    }

    #[test]
    fn test_place_room_fails_on_bad_footprint() {
        let mut state = playing();
        // Top-left corner of the map is rock
        assert!(!try_place_room(&mut state, Position::new(0, 0), RoomType::Lair));
        assert_eq!(state.gold(), 2000);
        assert!(state.rooms.is_empty());
        assert_eq!(state.messages.latest(), Some("Cannot place room here!"));
    }

    #[test]
    fn test_treasury_raises_capacity_and_removal_clamps() {
        let mut state = playing();
        let top_left = Position::new(4, 4);
        claim_patch(&mut state, top_left);

        assert!(try_place_room(&mut state, top_left, RoomType::Treasury));
        assert_eq!(state.max_gold(), 2000);
        assert_eq!(state.gold(), 1750);

        assert!(try_remove_room(&mut state, Position::new(5, 5)));
        assert_eq!(state.max_gold(), 1000);
        assert_eq!(state.gold(), 1000);
        assert!(!try_remove_room(&mut state, Position::new(5, 5)));
    }

    #[test]
    fn test_summon_imp() {
        let mut state = playing();
        let before = state.imps.len();
        let id = summon_imp(&mut state);
        assert!(id.is_some());
        assert_eq!(state.imps.len(), before + 1);
        assert_eq!(state.imps[before].pos, state.heart.pos);
        assert_eq!(state.gold(), 1900);

        state.economy.gold = 50;
        assert!(summon_imp(&mut state).is_none());
        assert_eq!(state.imps.len(), before + 1);
    }

    #[test]
    fn test_toggle_pause_only_while_playing() {
        let mut title = GameState::new(GameConfig::seeded(11));
        assert!(!toggle_pause(&mut title));

        let mut state = playing();
        assert!(toggle_pause(&mut state));
        assert!(!toggle_pause(&mut state));
    }

    #[test]
    fn test_placement_preview() {
        let mut state = playing();
        let top_left = Position::new(4, 4);
        claim_patch(&mut state, top_left);

        select_room(&mut state, RoomType::Lair);
        assert!(!state.placement_valid);

        set_hover(&mut state, Some(top_left));
        assert!(state.placement_valid);

        state.economy.gold = 10;
        select_room(&mut state, RoomType::Lair);
        assert!(!state.placement_valid);

        set_hover(&mut state, None);
        assert!(!state.placement_valid);
    }
}
