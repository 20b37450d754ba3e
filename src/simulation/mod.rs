pub mod commands;
pub mod events;
pub mod movement;
pub mod population;
pub mod score;
pub mod state;
pub mod tick;
pub mod wave;

pub use commands::{
    cancel_dig, designate_dig, select_room, set_hover, start_game, summon_imp, toggle_pause,
    try_place_room, try_remove_room,
};
pub use events::{dispatch_audio, AudioSink, GameEvent, SilentAudio, SoundCue};
pub use score::{calculate_score, Leaderboard, LeaderboardEntry};
pub use state::{DeadCreature, GameScreen, GameState, GameStats, MessageLog, Prisoner};
pub use tick::run_game_tick;
pub use wave::{create_wave, spawn_wave, wave_difficulty};
