use slotmap::SlotMap;

use crate::config::TierSettings;
use crate::content::{PLAYER_ATTACK, PLAYER_MAX_HEALTH};
use crate::grid::Grid;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    pub archetype: &'static str,
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub has_been_attacked: bool,
    pub encounters: u32,
}

impl Monster {
    pub fn new(archetype: &'static str, health: i32, attack: i32) -> Self {
        Self {
            archetype,
            health,
            max_health: health,
            attack,
            has_been_attacked: false,
            encounters: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Monster(Monster),
    Potion,
    Key,
    Exit { discovered: bool },
    Void,
}

impl EntityKind {
    pub fn tile(&self) -> Tile {
        match self {
            EntityKind::Monster(_) => Tile::Monster,
            EntityKind::Potion => Tile::Potion,
            EntityKind::Key => Tile::Key,
            EntityKind::Exit { .. } => Tile::Exit,
            EntityKind::Void => Tile::Void,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub id: EntityId,
    pub pos: Pos,
    pub kind: EntityKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Player {
    pub pos: Pos,
    pub health: i32,
    pub attack: i32,
    pub has_key: bool,
}

impl Player {
    pub fn fresh(pos: Pos) -> Self {
        Self { pos, health: PLAYER_MAX_HEALTH, attack: PLAYER_ATTACK, has_key: false }
    }
}

/// One live dungeon: its grid, the entities standing on it, and the player.
#[derive(Clone, Debug)]
pub struct DungeonState {
    pub grid: Grid,
    pub entities: SlotMap<EntityId, Entity>,
    pub player: Player,
    pub settings: TierSettings,
    pub has_void: bool,
    /// Set once the run ends; every cell then counts as revealed.
    pub revealed: bool,
    /// Whether the player's current cell had never been stood on before this arrival.
    pub first_visit: bool,
}

impl DungeonState {
    /// Empty grid with only the player placed and its start cell visited.
    pub fn new(settings: TierSettings, start: Pos) -> Self {
        let mut grid = Grid::new(settings.side_length);
        grid.set_tile(start, Tile::Player);
        grid.mark_visited(start);
        grid.mark_described(start);
        Self {
            grid,
            entities: SlotMap::with_key(),
            player: Player::fresh(start),
            settings,
            has_void: false,
            revealed: false,
            first_visit: true,
        }
    }

    /// Registers an entity and stamps its tile onto the grid.
    pub fn spawn(&mut self, pos: Pos, kind: EntityKind) -> EntityId {
        self.grid.set_tile(pos, kind.tile());
        if matches!(kind, EntityKind::Void) {
            self.has_void = true;
        }
        let id = self.entities.insert(Entity { id: EntityId::default(), pos, kind });
        if let Some(entity) = self.entities.get_mut(id) {
            entity.id = id;
        }
        id
    }

    pub fn entity_at(&self, pos: Pos) -> Option<&Entity> {
        self.entities.values().find(|entity| entity.pos == pos)
    }

    pub fn entity_id_at(&self, pos: Pos) -> Option<EntityId> {
        self.entity_at(pos).map(|entity| entity.id)
    }

    pub fn monster(&self, id: EntityId) -> Option<&Monster> {
        match &self.entities.get(id)?.kind {
            EntityKind::Monster(monster) => Some(monster),
            _ => None,
        }
    }

    pub fn monster_mut(&mut self, id: EntityId) -> Option<&mut Monster> {
        match &mut self.entities.get_mut(id)?.kind {
            EntityKind::Monster(monster) => Some(monster),
            _ => None,
        }
    }

    pub fn monsters(&self) -> impl Iterator<Item = (&Entity, &Monster)> {
        self.entities.values().filter_map(|entity| match &entity.kind {
            EntityKind::Monster(monster) => Some((entity, monster)),
            _ => None,
        })
    }

    /// Removes an entity and clears its tile.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        let entity = self.entities.remove(id)?;
        self.grid.set_tile(entity.pos, Tile::Empty);
        Some(entity)
    }

    pub fn is_revealed(&self, pos: Pos) -> bool {
        self.revealed || self.grid.is_visited(pos)
    }

    /// First disagreement between grid tiles, entities, and the player, if any.
    pub fn consistency_violation(&self) -> Option<String> {
        if self.grid.tile_at(self.player.pos) != Tile::Player {
            return Some(format!("player at {:?} not marked on grid", self.player.pos));
        }
        if self.grid.count(Tile::Player) != 1 {
            return Some(format!("{} player tiles on grid", self.grid.count(Tile::Player)));
        }
        if !(0..=PLAYER_MAX_HEALTH).contains(&self.player.health) {
            return Some(format!("player health {} out of range", self.player.health));
        }
        for entity in self.entities.values() {
            let tile = self.grid.tile_at(entity.pos);
            if tile != entity.kind.tile() {
                return Some(format!("{:?} at {:?} sits on {tile:?}", entity.kind, entity.pos));
            }
            if let EntityKind::Monster(monster) = &entity.kind
                && monster.health <= 0
            {
                return Some(format!("dead monster left at {:?}", entity.pos));
            }
        }
        let tracked = [Tile::Monster, Tile::Potion, Tile::Key, Tile::Exit, Tile::Void];
        for pos in self.grid.positions() {
            let tile = self.grid.tile_at(pos);
            if tracked.contains(&tile) && self.entity_at(pos).is_none() {
                return Some(format!("{tile:?} at {pos:?} has no entity"));
            }
        }
        if self.grid.count(Tile::Exit) != 1 {
            return Some(format!("{} exits on grid", self.grid.count(Tile::Exit)));
        }
        None
    }
}
