use crate::config::{DifficultyTable, GameMode, TierSettings};
use crate::state::{DungeonState, EntityKind, Monster};
use crate::types::*;

use super::Game;

/// Wall-free dungeon with the player at the origin and the exit in the far corner.
pub(crate) fn open_dungeon(side: usize) -> DungeonState {
    let settings =
        TierSettings { side_length: side, monster_count: 0, potion_count: 0, wall_density: 0.0 };
    let mut dungeon = DungeonState::new(settings, Pos::ORIGIN);
    let last = side as i32 - 1;
    dungeon.spawn(Pos { y: last, x: last }, EntityKind::Exit { discovered: false });
    dungeon
}

pub(crate) fn add_monster(
    dungeon: &mut DungeonState,
    pos: Pos,
    health: i32,
    attack: i32,
) -> EntityId {
    dungeon.spawn(pos, EntityKind::Monster(Monster::new("Goblin", health, attack)))
}

pub(crate) fn add_item(dungeon: &mut DungeonState, pos: Pos, kind: EntityKind) -> EntityId {
    dungeon.spawn(pos, kind)
}

pub(crate) fn add_wall(dungeon: &mut DungeonState, pos: Pos) {
    dungeon.grid.set_tile(pos, Tile::Wall);
}

pub(crate) fn place_player(dungeon: &mut DungeonState, pos: Pos) {
    dungeon.grid.set_tile(dungeon.player.pos, Tile::Empty);
    dungeon.grid.set_tile(pos, Tile::Player);
    dungeon.grid.mark_visited(pos);
    dungeon.player.pos = pos;
}

/// A started game whose current dungeon is `dungeon` instead of a generated one.
pub(crate) fn game_with_dungeon(mode: GameMode, dungeon: DungeonState) -> Game {
    let mut game = Game::new(0, DifficultyTable::default()).expect("default table");
    game.mode = Some(mode);
    game.status = RunStatus::Playing;
    game.dungeon = Some(dungeon);
    game
}

/// Dungeon where stepping right from the start reaches an unlocked exit.
pub(crate) fn one_step_victory() -> DungeonState {
    let mut dungeon = open_dungeon(3);
    place_player(&mut dungeon, Pos { y: 2, x: 1 });
    dungeon.player.has_key = true;
    dungeon
}

/// Dungeon where stepping right from the start hits a monster that kills the player.
pub(crate) fn one_step_defeat() -> DungeonState {
    let mut dungeon = open_dungeon(4);
    add_monster(&mut dungeon, Pos { y: 0, x: 1 }, 60, 20);
    dungeon.player.health = 10;
    dungeon
}

/// Dungeon where stepping down from the start falls into the void.
pub(crate) fn one_step_void() -> DungeonState {
    let mut dungeon = open_dungeon(4);
    add_item(&mut dungeon, Pos { y: 1, x: 0 }, EntityKind::Void);
    dungeon
}
