//! Imps - the dungeon's workers
//!
//! An imp holds one task at a time. `target` is the tile the task acts on;
//! for digging that tile is dirt and never walkable, so the imp also picks a
//! walkable `staging` tile next to it to stand on while it works.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::types::{ImpId, Position, Seconds};
use crate::entity::gain_movement;
use crate::spatial::grid::{Grid, DIRECTIONS};
use crate::spatial::pathfinding::find_path;

pub const IMP_HP: f32 = 20.0;
/// Tiles per second
pub const IMP_SPEED: f32 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskKind {
    #[default]
    Idle,
    Dig,
    Claim,
    Haul,
    Fortify,
}

/// A tile designated for digging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigTask {
    pub pos: Position,
    /// Set by the orchestrator when an imp takes the task
    pub assigned: bool,
}

impl DigTask {
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            assigned: false,
        }
    }
}

/// What an imp did during one update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpOutcome {
    /// No task
    Idle,
    /// Stepped one tile, or is building up movement
    Moved,
    /// Could not find a way to the task
    Blocked,
    /// Dug out `at`, picking up `gold`
    Dug { at: Position, gold: u32 },
    Claimed { at: Position },
    /// Dropped off everything carried
    Deposited { gold: u32 },
    /// Task ended with nothing to show for it
    Finished,
}

impl ImpOutcome {
    /// Signed change to the imp's carried gold: positive for a dig reward,
    /// negative for a deposit
    pub fn gold_delta(&self) -> i64 {
        match self {
            ImpOutcome::Dug { gold, .. } => i64::from(*gold),
            ImpOutcome::Deposited { gold } => -i64::from(*gold),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imp {
    pub id: ImpId,
    pub pos: Position,
    pub hp: f32,
    pub max_hp: f32,
    pub last_attack_time: Seconds,
    pub task: TaskKind,
    /// Tile the task acts on
    pub target: Option<Position>,
    /// Walkable tile the imp stands on to dig `target`
    pub staging: Option<Position>,
    pub carrying: u32,
    pub path: VecDeque<Position>,
    /// Movement accumulator in tiles
    pub move_progress: f32,
}

impl Imp {
    pub fn new(id: ImpId, pos: Position) -> Self {
        Self {
            id,
            pos,
            hp: IMP_HP,
            max_hp: IMP_HP,
            last_attack_time: 0.0,
            task: TaskKind::Idle,
            target: None,
            staging: None,
            carrying: 0,
            path: VecDeque::new(),
            move_progress: 0.0,
        }
    }

    /// Give the imp a new task. Any in-flight path is dropped.
    pub fn assign_task(&mut self, task: TaskKind, target: Option<Position>) {
        self.task = task;
        self.target = target;
        self.staging = None;
        self.path.clear();
    }

    /// Drop the current task and go idle
    pub fn clear_task(&mut self) {
        self.assign_task(TaskKind::Idle, None);
    }

    pub fn is_working(&self) -> bool {
        self.task != TaskKind::Idle
    }

    pub fn is_carrying(&self) -> bool {
        self.carrying > 0
    }

    /// Advance the current task by one tick
    pub fn update(&mut self, grid: &mut Grid, dt: Seconds) -> ImpOutcome {
        if self.task == TaskKind::Idle {
            return ImpOutcome::Idle;
        }
        let Some(target) = self.target else {
            self.clear_task();
            return ImpOutcome::Idle;
        };

        let stand = if self.task == TaskKind::Dig {
            let staging = match self.staging {
                Some(staging) => Some(staging),
                None => self.resolve_staging(grid, target),
            };
            match staging {
                Some(staging) => staging,
                None => return ImpOutcome::Blocked,
            }
        } else {
            target
        };

        if self.pos == stand {
            return self.perform(grid, target);
        }

        self.move_toward(grid, stand, target, dt)
    }

    /// Pick a walkable tile orthogonally next to `target` and remember it.
    ///
    /// Standing next to the target already counts. Otherwise neighbours are
    /// tried up, down, left, right and the first reachable one wins.
    fn resolve_staging(&mut self, grid: &Grid, target: Position) -> Option<Position> {
        let staging = staging_tile(grid, self.pos, target);
        self.staging = staging;
        staging
    }

    fn move_toward(&mut self, grid: &Grid, stand: Position, target: Position, dt: Seconds) -> ImpOutcome {
        if self.path.is_empty() {
            self.path = find_path(grid, self.pos, stand).into();
        }

        if self.path.is_empty() && self.task == TaskKind::Dig {
            // Staging went stale (terrain changed); pick again
            self.staging = None;
            if let Some(staging) = self.resolve_staging(grid, target) {
                if staging == self.pos {
                    return ImpOutcome::Moved;
                }
                self.path = find_path(grid, self.pos, staging).into();
            }
        }

        let Some(&next) = self.path.front() else {
            return ImpOutcome::Blocked;
        };

        if !grid.is_walkable(next) {
            self.path.clear();
            return ImpOutcome::Blocked;
        }

        if gain_movement(&mut self.move_progress, IMP_SPEED, dt) {
            self.pos = next;
            self.path.pop_front();
            self.move_progress = 0.0;
        }
        ImpOutcome::Moved
    }

    fn perform(&mut self, grid: &mut Grid, target: Position) -> ImpOutcome {
        let outcome = match self.task {
            TaskKind::Dig => {
                if grid.is_diggable(target) {
                    let gold = grid.dig(target);
                    self.carrying += gold;
                    ImpOutcome::Dug { at: target, gold }
                } else {
                    ImpOutcome::Finished
                }
            }
            TaskKind::Claim => ImpOutcome::Claimed { at: target },
            TaskKind::Haul => {
                let gold = self.carrying;
                self.carrying = 0;
                ImpOutcome::Deposited { gold }
            }
            TaskKind::Fortify | TaskKind::Idle => ImpOutcome::Finished,
        };

        self.clear_task();
        outcome
    }
}

fn staging_tile(grid: &Grid, from: Position, target: Position) -> Option<Position> {
    if from.is_adjacent(&target) {
        return Some(from);
    }
    DIRECTIONS
        .iter()
        .map(|&(dx, dy)| target.offset(dx, dy))
        .find(|&p| grid.is_walkable(p) && !find_path(grid, from, p).is_empty())
}

/// Index of the nearest (Manhattan) unassigned dig task that an imp at
/// `from` can get next to. Unreachable designations are skipped.
pub fn find_nearest_reachable_task(grid: &Grid, from: Position, tasks: &[DigTask]) -> Option<usize> {
    let mut candidates: Vec<(usize, u32)> = tasks
        .iter()
        .enumerate()
        .filter(|(_, task)| !task.assigned)
        .map(|(i, task)| (i, from.manhattan(&task.pos)))
        .collect();
    candidates.sort_by_key(|&(_, dist)| dist);

    candidates
        .into_iter()
        .map(|(i, _)| i)
        .find(|&i| staging_tile(grid, from, tasks[i].pos).is_some())
}
