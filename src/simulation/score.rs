//! Final scoring and an in-memory leaderboard
//!
//! Persisting the leaderboard is the caller's job; it serializes with serde.

use serde::{Deserialize, Serialize};

pub const MAX_LEADERBOARD_ENTRIES: usize = 10;

const WAVE_WEIGHT: u64 = 500;
const CREATURE_WEIGHT: u64 = 100;
const HERO_WEIGHT: u64 = 50;
const ROOM_WEIGHT: u64 = 25;

/// Score from end-of-game counters
pub fn calculate_score(
    waves: u32,
    creatures_recruited: u32,
    heroes_defeated: u32,
    max_gold: u32,
    rooms_built: u32,
) -> u64 {
    u64::from(waves) * WAVE_WEIGHT
        + u64::from(creatures_recruited) * CREATURE_WEIGHT
        + u64::from(heroes_defeated) * HERO_WEIGHT
        + u64::from(max_gold / 10)
        + u64::from(rooms_built) * ROOM_WEIGHT
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    pub waves_defeated: u32,
    pub creatures_recruited: u32,
    pub max_gold: u32,
    pub date: String,
}

/// Best scores, highest first, ties broken by waves
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert, re-sort and trim to the top entries
    pub fn add_entry(&mut self, entry: LeaderboardEntry) -> &[LeaderboardEntry] {
        self.entries.push(entry);
        self.entries.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.waves_defeated.cmp(&a.waves_defeated))
        });
        self.entries.truncate(MAX_LEADERBOARD_ENTRIES);
        &self.entries
    }

    pub fn top(&self, n: usize) -> &[LeaderboardEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// 1-based rank `score` would take, or None if it would not make the board
    pub fn would_rank(&self, score: u64) -> Option<usize> {
        match self.entries.iter().position(|e| score > e.score) {
            Some(i) => Some(i + 1),
            None if self.entries.len() < MAX_LEADERBOARD_ENTRIES => Some(self.entries.len() + 1),
            None => None,
        }
    }

    /// 1-based rank of the first entry with exactly `score`
    pub fn rank_of(&self, score: u64) -> Option<usize> {
        self.entries.iter().position(|e| e.score == score).map(|i| i + 1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
