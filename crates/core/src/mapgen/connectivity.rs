//! Reachability rules shared by dungeon validation and wall placement.
//!
//! Wall and Void tiles never admit traversal. The Exit tile blocks general flood
//! fill and is entered only by a path query whose destination is the exit itself.

use std::collections::VecDeque;

use crate::grid::{Grid, neighbors};
use crate::types::{Pos, Tile};

use super::model::Landmarks;

pub const MIN_START_MOVES: usize = 2;

/// Cells visited by one flood fill, sized to the grid it was computed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reachable {
    side: usize,
    cells: Vec<bool>,
    count: usize,
}

impl Reachable {
    pub fn contains(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.side
            && (pos.y as usize) < self.side
            && self.cells[pos.y as usize * self.side + pos.x as usize]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

fn blocks_traversal(tile: Tile) -> bool {
    matches!(tile, Tile::Wall | Tile::Void | Tile::Exit)
}

fn must_be_reachable(tile: Tile) -> bool {
    matches!(tile, Tile::Empty | Tile::Key | Tile::Potion | Tile::Monster)
}

pub fn flood_reachable(grid: &Grid, start: Pos) -> Reachable {
    let side = grid.side();
    let mut reachable = Reachable { side, cells: vec![false; grid.cell_count()], count: 0 };
    if !grid.in_bounds(start) || blocks_traversal(grid.tile_at(start)) {
        return reachable;
    }

    reachable.cells[grid.index(start)] = true;
    reachable.count = 1;
    let mut stack = vec![start];
    while let Some(current) = stack.pop() {
        for next in neighbors(current) {
            if !grid.in_bounds(next) || blocks_traversal(grid.tile_at(next)) {
                continue;
            }
            let idx = grid.index(next);
            if reachable.cells[idx] {
                continue;
            }
            reachable.cells[idx] = true;
            reachable.count += 1;
            stack.push(next);
        }
    }
    reachable
}

pub fn all_reachable(grid: &Grid, start: Pos) -> bool {
    let reachable = flood_reachable(grid, start);
    grid.positions().all(|pos| !must_be_reachable(grid.tile_at(pos)) || reachable.contains(pos))
}

pub fn no_isolated_cell(grid: &Grid) -> bool {
    grid.positions()
        .filter(|&pos| must_be_reachable(grid.tile_at(pos)) || grid.tile_at(pos) == Tile::Player)
        .all(|pos| neighbors(pos).into_iter().any(|next| !blocks_traversal(grid.tile_at(next))))
}

pub fn exit_reachable_from_neighbors(grid: &Grid, exit: Pos) -> bool {
    neighbors(exit).into_iter().any(|next| !matches!(grid.tile_at(next), Tile::Wall | Tile::Void))
}

/// Breadth-first search. The exit cell is only enterable when it is `to`.
pub fn path_exists(grid: &Grid, from: Pos, to: Pos) -> bool {
    if !grid.in_bounds(from) || !grid.in_bounds(to) {
        return false;
    }
    if from == to {
        return true;
    }

    let mut seen = vec![false; grid.cell_count()];
    seen[grid.index(from)] = true;
    let mut queue = VecDeque::from([from]);
    while let Some(current) = queue.pop_front() {
        for next in neighbors(current) {
            if !grid.in_bounds(next) {
                continue;
            }
            let tile = grid.tile_at(next);
            if matches!(tile, Tile::Wall | Tile::Void) || (tile == Tile::Exit && next != to) {
                continue;
            }
            if next == to {
                return true;
            }
            let idx = grid.index(next);
            if !seen[idx] {
                seen[idx] = true;
                queue.push_back(next);
            }
        }
    }
    false
}

pub fn min_valid_moves(grid: &Grid, pos: Pos) -> usize {
    neighbors(pos).into_iter().filter(|&next| !blocks_traversal(grid.tile_at(next))).count()
}

/// Outcome of every validity check for one candidate grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidityReport {
    pub all_reachable: bool,
    pub no_isolated_cell: bool,
    pub exit_accessible: bool,
    pub player_to_key: bool,
    pub key_to_exit: bool,
    pub start_moves: usize,
}

impl ValidityReport {
    pub fn is_valid(&self) -> bool {
        self.all_reachable
            && self.no_isolated_cell
            && self.exit_accessible
            && self.player_to_key
            && self.key_to_exit
            && self.start_moves >= MIN_START_MOVES
    }
}

pub fn validate(grid: &Grid, landmarks: Landmarks) -> ValidityReport {
    ValidityReport {
        all_reachable: all_reachable(grid, landmarks.player),
        no_isolated_cell: no_isolated_cell(grid),
        exit_accessible: exit_reachable_from_neighbors(grid, landmarks.exit),
        player_to_key: path_exists(grid, landmarks.player, landmarks.key),
        key_to_exit: path_exists(grid, landmarks.key, landmarks.exit),
        start_moves: min_valid_moves(grid, landmarks.player),
    }
}

/// Short-circuiting form of [`validate`] used inside placement loops.
pub fn is_valid_dungeon(grid: &Grid, landmarks: Landmarks) -> bool {
    min_valid_moves(grid, landmarks.player) >= MIN_START_MOVES
        && exit_reachable_from_neighbors(grid, landmarks.exit)
        && no_isolated_cell(grid)
        && all_reachable(grid, landmarks.player)
        && path_exists(grid, landmarks.player, landmarks.key)
        && path_exists(grid, landmarks.key, landmarks.exit)
}
