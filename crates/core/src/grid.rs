//! Square tile grid plus the per-cell exploration flags the narration layer reads.

use crate::types::{Pos, Tile};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    tiles: Vec<Tile>,
    visited: Vec<bool>,
    described: Vec<bool>,
}

impl Grid {
    pub fn new(side: usize) -> Self {
        let cells = side * side;
        Self {
            side,
            tiles: vec![Tile::Empty; cells],
            visited: vec![false; cells],
            described: vec![false; cells],
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.side && (pos.y as usize) < self.side
    }

    /// Out-of-bounds positions read as walls.
    pub fn tile_at(&self, pos: Pos) -> Tile {
        if !self.in_bounds(pos) {
            return Tile::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: Pos, tile: Tile) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.tiles[idx] = tile;
        }
    }

    pub fn is_visited(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.visited[self.index(pos)]
    }

    pub fn mark_visited(&mut self, pos: Pos) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.visited[idx] = true;
        }
    }

    pub fn visited_count(&self) -> usize {
        self.visited.iter().filter(|&&seen| seen).count()
    }

    /// Whether the player has already stood on this cell and heard its description.
    pub fn is_described(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.described[self.index(pos)]
    }

    pub fn mark_described(&mut self, pos: Pos) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.described[idx] = true;
        }
    }

    /// Row-major iteration over every in-bounds position.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<> {
        let side = self.side as i32;
        (0..side).flat_map(move |y| (0..side).map(move |x| Pos { y, x }))
    }

    pub fn positions_of(&self, tile: Tile) -> Vec<Pos> {
        self.positions().filter(|&pos| self.tile_at(pos) == tile).collect()
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn index(&self, pos: Pos) -> usize {
        pos.y as usize * self.side + pos.x as usize
    }

    /// One text row per grid row, using each tile's glyph.
    pub fn draw(&self) -> String {
        let mut out = String::with_capacity(self.cell_count() + self.side);
        for (i, tile) in self.tiles.iter().enumerate() {
            out.push(tile.glyph());
            if (i + 1) % self.side == 0 {
                out.push('\n');
            }
        }
        out
    }
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Orthogonal neighbours in up, right, down, left order. May include out-of-bounds positions.
pub fn neighbors(pos: Pos) -> [Pos; 4] {
    [
        Pos { y: pos.y - 1, x: pos.x },
        Pos { y: pos.y, x: pos.x + 1 },
        Pos { y: pos.y + 1, x: pos.x },
        Pos { y: pos.y, x: pos.x - 1 },
    ]
}
