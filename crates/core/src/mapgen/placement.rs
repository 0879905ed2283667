//! Layout skeleton: player, exit, key, optional void, and walls.

use rand_chacha::ChaCha8Rng;

use crate::config::TierSettings;
use crate::grid::{Grid, manhattan};
use crate::types::{Pos, Tile};

use super::connectivity::is_valid_dungeon;
use super::model::Landmarks;
use super::seed::{pick, roll_below};

pub const MAX_WALL_ATTEMPTS: u32 = 25;
/// Scales the tier's nominal wall density down to keep layouts open.
pub const WALL_OPENNESS: f64 = 0.6;
const MIN_VOID_DISTANCE: u32 = 3;
const MIN_WALL_DISTANCE: u32 = 2;

pub(super) struct Skeleton {
    pub grid: Grid,
    pub landmarks: Landmarks,
    pub void: Option<Pos>,
}

pub(super) fn wall_budget(settings: &TierSettings) -> usize {
    (settings.side_length as f64 * settings.wall_density * WALL_OPENNESS).floor() as usize
}

/// One randomized attempt. Returns `None` only when the key has nowhere to go.
pub(super) fn build_skeleton(
    rng: &mut ChaCha8Rng,
    settings: &TierSettings,
    include_void: bool,
) -> Option<Skeleton> {
    let side = settings.side_length;
    let mut grid = Grid::new(side);
    let player = Pos::ORIGIN;
    grid.set_tile(player, Tile::Player);

    let exit = place_exit(rng, side);
    debug_assert_ne!(exit, player);
    grid.set_tile(exit, Tile::Exit);

    let key_floor = (side / 3) as u32;
    let key_candidates: Vec<Pos> = grid
        .positions()
        .filter(|&pos| pos != player && pos != exit && manhattan(pos, player) >= key_floor)
        .collect();
    let key = pick(rng, &key_candidates)?;
    grid.set_tile(key, Tile::Key);

    let void = if include_void {
        let void_candidates: Vec<Pos> = grid
            .positions()
            .filter(|&pos| grid.tile_at(pos) == Tile::Empty)
            .filter(|&pos| manhattan(pos, player) >= MIN_VOID_DISTANCE)
            .collect();
        pick(rng, &void_candidates)
    } else {
        None
    };
    if let Some(pos) = void {
        grid.set_tile(pos, Tile::Void);
    }

    let landmarks = Landmarks { player, exit, key };
    place_walls(rng, &mut grid, landmarks, wall_budget(settings));
    Some(Skeleton { grid, landmarks, void })
}

/// Each coordinate comes from the upper half of the range, so the exit never lands on the start.
fn place_exit(rng: &mut ChaCha8Rng, side: usize) -> Pos {
    let low = side / 2;
    let span = side - low;
    let x = low + roll_below(rng, span);
    let y = low + roll_below(rng, span);
    Pos { y: y as i32, x: x as i32 }
}

/// Tries at most one wall per empty cell, however large `budget` is.
fn place_walls(rng: &mut ChaCha8Rng, grid: &mut Grid, landmarks: Landmarks, budget: usize) {
    let budget = budget.min(grid.count(Tile::Empty));
    for wall_index in 0..budget {
        if grid.count(Tile::Empty) == 0 {
            break;
        }
        let mut placed = false;
        for _ in 0..MAX_WALL_ATTEMPTS {
            let Some(pos) = pick(rng, &grid.positions_of(Tile::Empty)) else {
                break;
            };
            if manhattan(pos, landmarks.player) < MIN_WALL_DISTANCE {
                continue;
            }
            grid.set_tile(pos, Tile::Wall);
            if is_valid_dungeon(grid, landmarks) {
                placed = true;
                break;
            }
            grid.set_tile(pos, Tile::Empty);
        }
        if !placed {
            log::trace!("wall {wall_index} could not be placed after {MAX_WALL_ATTEMPTS} attempts");
        }
    }
}

/// No walls, exit in the far corner, key in the centre.
pub(super) fn fallback_skeleton(side: usize) -> Skeleton {
    let mut grid = Grid::new(side);
    let last = side as i32 - 1;
    let middle = (side / 2) as i32;
    let landmarks = Landmarks {
        player: Pos::ORIGIN,
        exit: Pos { y: last, x: last },
        key: Pos { y: middle, x: middle },
    };
    grid.set_tile(landmarks.player, Tile::Player);
    grid.set_tile(landmarks.exit, Tile::Exit);
    grid.set_tile(landmarks.key, Tile::Key);
    Skeleton { grid, landmarks, void: None }
}
