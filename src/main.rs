//! Underlord - headless runner
//!
//! Plays a game on autopilot for a fixed stretch of simulated time and
//! prints a summary as JSON or text.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use underlord::core::error::Result;
use underlord::core::types::{Position, Seconds};
use underlord::core::GameConfig;
use underlord::dungeon::room::{can_place_room, RoomType, ROOM_SIZE};
use underlord::simulation::{
    designate_dig, dispatch_audio, run_game_tick, start_game, summon_imp, try_place_room,
    GameState, SilentAudio,
};

/// Headless dungeon runner
#[derive(Parser, Debug)]
#[command(name = "underlord")]
#[command(about = "Run the dungeon simulation on autopilot and report the outcome")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding configuration defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 600.0)]
    seconds: f32,

    /// Tick length in seconds
    #[arg(long, default_value_t = 0.1)]
    dt: f32,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// Run summary
#[derive(Serialize, Debug)]
struct RunReport {
    seed: Option<u64>,
    seconds: Seconds,
    game_over: bool,
    wave: u32,
    gold: u32,
    max_gold: u32,
    imps: usize,
    creatures: usize,
    heroes: usize,
    prisoners: usize,
    rooms: usize,
    heroes_defeated: u32,
    creatures_recruited: u32,
    sounds_played: usize,
    score: u64,
    messages: Vec<String>,
}

/// Rooms the autopilot builds, in order
const BUILD_ORDER: [RoomType; 6] = [
    RoomType::Lair,
    RoomType::Hatchery,
    RoomType::Treasury,
    RoomType::Training,
    RoomType::Prison,
    RoomType::Torture,
];

/// Seconds between autopilot decisions
const AUTOPILOT_INTERVAL: Seconds = 1.0;
/// How far from the heart the autopilot digs
const DIG_RADIUS: i32 = 8;
const MAX_IMPS: usize = 6;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("underlord=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    let dt = if args.dt > 0.0 { args.dt } else { 0.1 };

    let mut state = GameState::new(config);
    start_game(&mut state);

    let mut audio = SilentAudio;
    let mut sounds_played = 0;
    let mut since_decision = AUTOPILOT_INTERVAL;

    while state.game_time < args.seconds && !state.is_game_over() {
        if since_decision >= AUTOPILOT_INTERVAL {
            autopilot(&mut state);
            since_decision = 0.0;
        }
        let events = run_game_tick(&mut state, dt);
        sounds_played += dispatch_audio(&events, &mut audio);
        since_decision += dt;
    }

    let report = RunReport {
        seed: state.config.seed,
        seconds: state.game_time,
        game_over: state.is_game_over(),
        wave: state.wave,
        gold: state.gold(),
        max_gold: state.max_gold(),
        imps: state.imps.len(),
        creatures: state.creatures.len(),
        heroes: state.heroes.len(),
        prisoners: state.prisoners.len(),
        rooms: state.rooms.len(),
        heroes_defeated: state.stats.heroes_defeated,
        creatures_recruited: state.stats.creatures_recruited,
        sounds_played,
        score: state.final_score(),
        messages: state.messages.iter().map(str::to_string).collect(),
    };

    match args.format.as_str() {
        "text" => print_text(&report),
        _ => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

fn print_text(report: &RunReport) {
    println!("Underlord Run");
    println!("=============");
    println!("Simulated: {:.1}s", report.seconds);
    println!("Outcome: {}", if report.game_over { "heart destroyed" } else { "survived" });
    println!("Wave: {}", report.wave);
    println!("Gold: {} / {}", report.gold, report.max_gold);
    println!(
        "Imps: {}  Creatures: {}  Heroes: {}  Prisoners: {}",
        report.imps, report.creatures, report.heroes, report.prisoners
    );
    println!("Rooms: {}", report.rooms);
    println!("Score: {}", report.score);
    println!();
    for message in &report.messages {
        println!("  {}", message);
    }
}

/// One round of player decisions: keep the imps digging, build the next
/// affordable room and summon an imp when the treasury is nearly full
fn autopilot(state: &mut GameState) {
    designate_frontier(state);

    if let Some(room_type) = BUILD_ORDER
        .into_iter()
        .find(|&room_type| !state.has_room(room_type))
    {
        if state.economy.can_afford(room_type.cost()) {
            if let Some(top_left) = find_room_site(state, room_type) {
                try_place_room(state, top_left, room_type);
            }
        }
    }

    if state.imps.len() < MAX_IMPS && state.gold() >= state.max_gold() * 3 / 4 {
        summon_imp(state);
    }
}

/// Designate dirt bordering open floor near the heart, a few at a time
fn designate_frontier(state: &mut GameState) {
    let budget = state.imps.len() * 2;
    let heart = state.heart.pos;

    for radius in 1..=DIG_RADIUS {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if state.dig_tasks.len() >= budget {
                    return;
                }
                let pos = heart.offset(dx, dy);
                let on_frontier = state.grid.is_diggable(pos)
                    && state.grid.all_neighbors(pos).iter().any(|&n| state.grid.is_walkable(n));
                if on_frontier {
                    designate_dig(state, pos);
                }
            }
        }
    }
}

/// First valid top-left corner, scanning row by row
fn find_room_site(state: &GameState, room_type: RoomType) -> Option<Position> {
    (0..=state.grid.height() - ROOM_SIZE)
        .flat_map(|y| (0..=state.grid.width() - ROOM_SIZE).map(move |x| Position::new(x, y)))
        .find(|&pos| can_place_room(&state.grid, pos, room_type))
}
