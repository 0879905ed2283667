//! Monster and potion placement on a validated skeleton.

use rand_chacha::ChaCha8Rng;

use crate::content::{
    MONSTER_ARCHETYPES, MONSTER_ATTACK_POWERS, MONSTER_HEALTH_VALUES, archetype_name,
};
use crate::grid::Grid;
use crate::types::{Pos, Tile};

use super::connectivity::all_reachable;
use super::model::MonsterSpawn;
use super::seed::{pick, roll_below};

/// Stamps `tile` on a random empty cell, keeping it only if every cell stays reachable.
fn place_reachable(rng: &mut ChaCha8Rng, grid: &mut Grid, start: Pos, tile: Tile) -> Option<Pos> {
    let pos = pick(rng, &grid.positions_of(Tile::Empty))?;
    grid.set_tile(pos, tile);
    if all_reachable(grid, start) {
        return Some(pos);
    }
    grid.set_tile(pos, Tile::Empty);
    log::trace!("skipped {tile:?} at {pos:?}: it would cut off part of the dungeon");
    None
}

pub(super) fn spawn_monsters(
    rng: &mut ChaCha8Rng,
    grid: &mut Grid,
    start: Pos,
    count: usize,
) -> Vec<MonsterSpawn> {
    let count = count.min(grid.count(Tile::Empty));
    let mut spawns = Vec::with_capacity(count);
    for _ in 0..count {
        let Some(pos) = place_reachable(rng, grid, start, Tile::Monster) else {
            continue;
        };
        let archetype = archetype_name(roll_below(rng, MONSTER_ARCHETYPES.len()));
        let attack = MONSTER_ATTACK_POWERS[roll_below(rng, MONSTER_ATTACK_POWERS.len())];
        let health = MONSTER_HEALTH_VALUES[roll_below(rng, MONSTER_HEALTH_VALUES.len())];
        spawns.push(MonsterSpawn { pos, archetype, health, attack });
    }
    spawns
}

pub(super) fn spawn_potions(
    rng: &mut ChaCha8Rng,
    grid: &mut Grid,
    start: Pos,
    count: usize,
) -> Vec<Pos> {
    let count = count.min(grid.count(Tile::Empty));
    (0..count).filter_map(|_| place_reachable(rng, grid, start, Tile::Potion)).collect()
}
