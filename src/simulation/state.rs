//! The game aggregate - everything one tick reads and mutates

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::GameConfig;
use crate::core::types::{IdAllocator, Position, Seconds};
use crate::dungeon::economy::Economy;
use crate::dungeon::room::{count_rooms, Room, RoomType};
use crate::entity::creature::{Creature, CreatureType};
use crate::entity::heart::DungeonHeart;
use crate::entity::hero::{Hero, HeroType};
use crate::entity::imp::{DigTask, Imp};
use crate::simulation::score::calculate_score;
use crate::spatial::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameScreen {
    #[default]
    Title,
    Playing,
    GameOver,
}

/// Player-facing message feed; oldest messages drop off first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageLog {
    capacity: usize,
    messages: VecDeque<String>,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.messages.len() == self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

/// A fallen creature waiting to be bought back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadCreature {
    pub creature_type: CreatureType,
    /// Absolute game time after which respawn may be attempted
    pub respawn_time: Seconds,
    pub cost: u32,
    /// A failed attempt has already been reported to the player
    pub reported: bool,
}

/// A captured hero waiting in the prison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prisoner {
    pub hero_type: HeroType,
    pub capture_time: Seconds,
    pub reported: bool,
}

/// Counters feeding the final score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Attracted, respawned or converted
    pub creatures_recruited: u32,
    /// Slain or captured
    pub heroes_defeated: u32,
    pub rooms_built: u32,
    pub peak_gold: u32,
}

/// Complete world state
#[derive(Debug, Clone)]
pub struct GameState {
    pub screen: GameScreen,
    pub grid: Grid,
    pub rooms: Vec<Room>,
    pub imps: Vec<Imp>,
    pub creatures: Vec<Creature>,
    pub heroes: Vec<Hero>,
    pub heart: DungeonHeart,
    pub economy: Economy,
    pub wave: u32,
    pub wave_timer: Seconds,
    pub game_time: Seconds,
    pub paused: bool,
    pub messages: MessageLog,
    pub dig_tasks: Vec<DigTask>,

    // Placement preview
    pub selected_room: RoomType,
    pub placement_valid: bool,
    pub hover_pos: Option<Position>,

    pub dead_creatures: Vec<DeadCreature>,
    pub prisoners: Vec<Prisoner>,

    pub ids: IdAllocator,
    pub config: GameConfig,
    pub rng: ChaCha8Rng,
    pub last_creature_spawn_time: Seconds,
    /// Warning already announced for the upcoming wave
    pub wave_warning_shown: bool,
    pub stats: GameStats,
}

impl GameState {
    /// Fresh dungeon on the title screen
    pub fn new(config: GameConfig) -> Self {
        let grid = Grid::generate(config.seed);
        let center = grid.center();
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut ids = IdAllocator::new();
        let imps = (0..config.starting_imps as i32)
            .map(|i| Imp::new(ids.next_imp(), center.offset(i - 1, 1)))
            .collect();

        let economy = Economy::new(config.starting_gold);

        Self {
            screen: GameScreen::Title,
            heart: DungeonHeart::new(center),
            grid,
            rooms: Vec::new(),
            imps,
            creatures: Vec::new(),
            heroes: Vec::new(),
            stats: GameStats {
                peak_gold: economy.gold,
                ..GameStats::default()
            },
            economy,
            wave: 0,
            wave_timer: 0.0,
            game_time: 0.0,
            paused: false,
            messages: MessageLog::new(config.message_log_capacity),
            dig_tasks: Vec::new(),
            selected_room: RoomType::None,
            placement_valid: false,
            hover_pos: None,
            dead_creatures: Vec::new(),
            prisoners: Vec::new(),
            ids,
            rng,
            last_creature_spawn_time: 0.0,
            wave_warning_shown: false,
            config,
        }
    }

    pub fn gold(&self) -> u32 {
        self.economy.gold
    }

    pub fn max_gold(&self) -> u32 {
        self.economy.max_gold
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message);
    }

    /// Credit gold to the treasury (capped), tracking the peak.
    /// Returns the change in gold.
    pub fn add_gold(&mut self, amount: u32) -> i64 {
        let added = self.economy.add_gold(amount);
        self.stats.peak_gold = self.stats.peak_gold.max(self.economy.gold);
        added
    }

    pub fn is_playing(&self) -> bool {
        self.screen == GameScreen::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.screen == GameScreen::GameOver
    }

    pub fn has_room(&self, room_type: RoomType) -> bool {
        count_rooms(&self.rooms, room_type) > 0
    }

    /// How many creatures the lairs can house
    pub fn creature_capacity(&self) -> usize {
        count_rooms(&self.rooms, RoomType::Lair) * self.config.lair_capacity as usize
    }

    pub fn has_lair_space(&self) -> bool {
        self.creatures.len() < self.creature_capacity()
    }

    pub fn heart_destroyed(&self) -> bool {
        self.heart.hp <= 0.0
    }

    pub fn final_score(&self) -> u64 {
        calculate_score(
            self.wave,
            self.stats.creatures_recruited,
            self.stats.heroes_defeated,
            self.stats.peak_gold,
            self.stats.rooms_built,
        )
    }
}
