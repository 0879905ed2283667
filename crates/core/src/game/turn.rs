//! Movement and tile interaction for a single player step.

use crate::content::{PLAYER_MAX_HEALTH, POTION_HEAL};
use crate::state::{DungeonState, EntityKind};
use crate::types::*;

impl DungeonState {
    /// Resolves one step. Events are appended in the order they happen.
    pub fn apply_move(
        &mut self,
        direction: Direction,
        events: &mut Vec<GameEvent>,
    ) -> Option<TurnSignal> {
        let target = self.player.pos.step(direction);
        if !self.grid.in_bounds(target) {
            events.push(GameEvent::BoundaryBlocked { direction });
            return None;
        }

        let tile = self.grid.tile_at(target);
        self.grid.mark_visited(target);
        match tile {
            Tile::Wall => {
                events.push(GameEvent::WallBump { pos: target });
                None
            }
            Tile::Void => {
                events.push(GameEvent::VoidFall { pos: target });
                Some(TurnSignal::VoidFall)
            }
            Tile::Monster => self.engage_monster(target, events),
            Tile::Potion => {
                self.collect_item(target, ItemKind::Potion, events);
                None
            }
            Tile::Key => {
                self.collect_item(target, ItemKind::Key, events);
                None
            }
            Tile::Exit => self.try_exit(target, events),
            Tile::Empty => {
                self.step_player(target, events);
                None
            }
            Tile::Player => None,
        }
    }

    fn collect_item(&mut self, target: Pos, kind: ItemKind, events: &mut Vec<GameEvent>) {
        let Some(id) = self.entity_id_at(target) else {
            return;
        };
        self.despawn(id);
        match kind {
            ItemKind::Potion => {
                self.player.health = (self.player.health + POTION_HEAL).min(PLAYER_MAX_HEALTH);
            }
            ItemKind::Key => self.player.has_key = true,
        }
        events.push(GameEvent::ItemCollected { kind, player_health: self.player.health });
        self.step_player(target, events);
    }

    fn try_exit(&mut self, target: Pos, events: &mut Vec<GameEvent>) -> Option<TurnSignal> {
        if let Some(id) = self.entity_id_at(target)
            && let Some(entity) = self.entities.get_mut(id)
            && let EntityKind::Exit { discovered } = &mut entity.kind
        {
            *discovered = true;
        }
        if self.player.has_key {
            return Some(TurnSignal::Victory);
        }
        events.push(GameEvent::ExitLocked { pos: target });
        None
    }

    fn step_player(&mut self, target: Pos, events: &mut Vec<GameEvent>) {
        self.grid.set_tile(self.player.pos, Tile::Empty);
        self.grid.set_tile(target, Tile::Player);
        self.player.pos = target;
        self.first_visit = !self.grid.is_described(target);
        self.grid.mark_described(target);
        events.push(GameEvent::Moved { to: target, first_visit: self.first_visit });
    }
}
