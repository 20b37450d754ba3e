//! Hero waves - composition, spawn placement and timing

use rand::Rng;

use crate::core::types::{IdAllocator, Position, Seconds};
use crate::entity::hero::{Hero, HeroType};
use crate::spatial::grid::{Grid, TileKind};

/// Heroes enter on the row just inside the top border
pub const SPAWN_ROW: i32 = 1;

/// Heroes making up wave `n`, in spawn order.
///
/// Peasants scale with the wave; archers join from wave 2 (max 3), knights
/// from wave 3 (max 2), wizards from wave 4 (max 2), and one lord from
/// wave 5 on.
pub fn create_wave(n: u32) -> Vec<HeroType> {
    let mut heroes = vec![HeroType::Peasant; n as usize + 1];

    if n >= 2 {
        let archers = ((n - 1) / 2 + 1).min(3);
        heroes.extend(std::iter::repeat(HeroType::Archer).take(archers as usize));
    }
    if n >= 3 {
        let knights = ((n - 2) / 2 + 1).min(2);
        heroes.extend(std::iter::repeat(HeroType::Knight).take(knights as usize));
    }
    if n >= 4 {
        let wizards = ((n - 3) / 2 + 1).min(2);
        heroes.extend(std::iter::repeat(HeroType::Wizard).take(wizards as usize));
    }
    if n >= 5 {
        heroes.push(HeroType::Lord);
    }

    heroes
}

fn can_spawn_on(kind: Option<TileKind>) -> bool {
    !matches!(
        kind,
        None | Some(TileKind::Rock) | Some(TileKind::Water) | Some(TileKind::Lava)
    )
}

/// Exactly `count` spawn positions on the entry row.
///
/// Random distinct columns are tried first (up to 10 attempts per hero),
/// skipping rock, water and lava. Any shortfall is filled with unused
/// columns left to right, then by reusing columns.
pub fn spawn_positions<R: Rng>(grid: &Grid, count: usize, rng: &mut R) -> Vec<Position> {
    let mut positions = Vec::with_capacity(count);
    let mut used_x = Vec::with_capacity(count);
    let span = grid.width() - 4;

    if span > 0 {
        for _ in 0..count * 10 {
            if positions.len() >= count {
                break;
            }
            let x = 2 + rng.gen_range(0..span);
            if used_x.contains(&x) {
                continue;
            }
            let pos = Position::new(x, SPAWN_ROW);
            if can_spawn_on(grid.kind_at(pos)) {
                positions.push(pos);
                used_x.push(x);
            }
        }
    }

    let columns: Vec<i32> = (1..(grid.width() - 1).max(2)).collect();
    let mut fallback = columns
        .iter()
        .copied()
        .filter(|x| !used_x.contains(x))
        .chain(columns.iter().copied().cycle());
    while positions.len() < count {
        match fallback.next() {
            Some(x) => positions.push(Position::new(x, SPAWN_ROW)),
            None => break,
        }
    }

    positions
}

/// Create the heroes of wave `n` at their spawn positions
pub fn spawn_wave<R: Rng>(n: u32, grid: &Grid, ids: &mut IdAllocator, rng: &mut R) -> Vec<Hero> {
    let types = create_wave(n);
    let positions = spawn_positions(grid, types.len(), rng);
    types
        .into_iter()
        .zip(positions)
        .map(|(hero_type, pos)| Hero::new(ids.next_hero(), hero_type, pos))
        .collect()
}

pub fn should_spawn_wave(timer: Seconds, interval: Seconds) -> bool {
    timer >= interval
}

pub fn time_until_next_wave(timer: Seconds, interval: Seconds) -> Seconds {
    (interval - timer).max(0.0)
}

/// Strictly inside the warning window before a wave
pub fn should_show_warning(timer: Seconds, interval: Seconds, warning: Seconds) -> bool {
    timer > interval - warning && timer < interval
}

pub fn wave_hero_count(n: u32) -> usize {
    create_wave(n).len()
}

/// Total gold the heroes of wave `n` would drop
pub fn wave_difficulty(n: u32) -> u32 {
    create_wave(n).iter().map(|h| h.stats().gold).sum()
}
