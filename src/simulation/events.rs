//! Events produced by a game tick, and the audio capability that consumes them
//!
//! The simulation never plays sound itself. Callers pass the events returned
//! by `run_game_tick` to `dispatch_audio` with whatever sink they have.

use serde::{Deserialize, Serialize};

use crate::combat::resolution::CombatEvent;
use crate::core::types::{CreatureId, HeroId, ImpId, Position};
use crate::entity::creature::CreatureType;
use crate::entity::hero::HeroType;

/// Something noteworthy that happened during a tick
///
/// Returned by `run_game_tick` for logs, UI feeds and audio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// An imp dug out a tile
    Dug { imp: ImpId, at: Position, gold: u32 },
    /// A room attracted a new creature
    CreatureArrived { id: CreatureId, creature_type: CreatureType },
    /// A creature walked out over unhappiness
    CreatureLeft { id: CreatureId, creature_type: CreatureType },
    CreatureLevelledUp { id: CreatureId, level: u32 },
    /// A creature fell and was queued for respawn
    CreatureDied { id: CreatureId, creature_type: CreatureType },
    CreatureRespawned {
        id: CreatureId,
        creature_type: CreatureType,
        cost: u32,
    },
    HeroSlain { id: HeroId, hero_type: HeroType, gold: u32 },
    HeroCaptured { id: HeroId, hero_type: HeroType },
    /// A prisoner turned into a dark angel
    PrisonerConverted { id: CreatureId },
    ImpRespawned { id: ImpId },
    WagesPaid { amount: u32 },
    /// Wages were due but unaffordable
    WagesMissed { owed: u32 },
    /// The next wave is close
    WaveWarning { wave: u32, seconds_left: f32 },
    WaveSpawned { wave: u32, heroes: usize },
    Attack(CombatEvent),
    GameOver,
}

/// Named sound effects an audio layer can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    Dig,
    Claim,
    Build,
    Spawn,
    Combat,
    HeroEnter,
    HeroDefeat,
    ImpWork,
    GoldCollect,
    GameOver,
}

impl SoundCue {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundCue::Dig => "dig",
            SoundCue::Claim => "claim",
            SoundCue::Build => "build",
            SoundCue::Spawn => "spawn",
            SoundCue::Combat => "combat",
            SoundCue::HeroEnter => "heroEnter",
            SoundCue::HeroDefeat => "heroDefeat",
            SoundCue::ImpWork => "impWork",
            SoundCue::GoldCollect => "goldCollect",
            SoundCue::GameOver => "gameOver",
        }
    }
}

impl GameEvent {
    /// Sound this event should trigger, if any
    pub fn sound_cue(&self) -> Option<SoundCue> {
        match self {
            GameEvent::Dug { .. } => Some(SoundCue::Dig),
            GameEvent::CreatureArrived { .. }
            | GameEvent::CreatureRespawned { .. }
            | GameEvent::PrisonerConverted { .. }
            | GameEvent::ImpRespawned { .. } => Some(SoundCue::Spawn),
            GameEvent::Attack(_) => Some(SoundCue::Combat),
            GameEvent::WaveSpawned { .. } => Some(SoundCue::HeroEnter),
            GameEvent::HeroSlain { .. } | GameEvent::HeroCaptured { .. } => {
                Some(SoundCue::HeroDefeat)
            }
            GameEvent::WagesPaid { .. } => Some(SoundCue::GoldCollect),
            GameEvent::GameOver => Some(SoundCue::GameOver),
            GameEvent::CreatureLeft { .. }
            | GameEvent::CreatureLevelledUp { .. }
            | GameEvent::CreatureDied { .. }
            | GameEvent::WagesMissed { .. }
            | GameEvent::WaveWarning { .. } => None,
        }
    }
}

/// Fire-and-forget sound playback
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, _cue: SoundCue) {}
}

/// Play the cue of every event that has one. Returns how many were played.
pub fn dispatch_audio(events: &[GameEvent], sink: &mut dyn AudioSink) -> usize {
    let mut played = 0;
    for cue in events.iter().filter_map(GameEvent::sound_cue) {
        sink.play(cue);
        played += 1;
    }
    played
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::EntityRef;

    #[derive(Default)]
    struct Recorder(Vec<SoundCue>);

    impl AudioSink for Recorder {
        fn play(&mut self, cue: SoundCue) {
            self.0.push(cue);
        }
    }

    #[test]
    fn test_cue_names() {
        assert_eq!(SoundCue::Dig.as_str(), "dig");
        assert_eq!(SoundCue::HeroDefeat.as_str(), "heroDefeat");
        assert_eq!(SoundCue::GameOver.as_str(), "gameOver");
    }

    #[test]
    fn test_dispatch_skips_silent_events() {
        let events = vec![
            GameEvent::Dug {
                imp: ImpId(1),
                at: Position::new(3, 3),
                gold: 50,
            },
            GameEvent::WagesMissed { owed: 40 },
            GameEvent::Attack(CombatEvent {
                attacker: EntityRef::Hero(HeroId(1)),
                defender: EntityRef::Heart,
                damage: 7,
                defender_died: false,
            }),
            GameEvent::GameOver,
        ];

        let mut recorder = Recorder::default();
        assert_eq!(dispatch_audio(&events, &mut recorder), 3);
        assert_eq!(
            recorder.0,
            vec![SoundCue::Dig, SoundCue::Combat, SoundCue::GameOver]
        );

        assert_eq!(dispatch_audio(&events, &mut SilentAudio), 3);
    }
}
