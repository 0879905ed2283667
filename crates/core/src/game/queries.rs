//! Read-only answers for status, location, and map overview requests.

use serde::Serialize;

use crate::config::GameMode;
use crate::content::PLAYER_MAX_HEALTH;
use crate::state::{DungeonState, EntityKind};
use crate::types::*;

use super::{Game, SurvivalState};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "query", rename_all = "kebab-case")]
pub enum QueryAnswer {
    Status(StatusReport),
    Location(LocationReport),
    MapOverview(MapOverview),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub health: i32,
    pub max_health: i32,
    pub attack: i32,
    pub has_key: bool,
    pub status: RunStatus,
    pub mode: GameMode,
    pub survival: Option<SurvivalState>,
}

/// What lies one step away in a given direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Open,
    Blocked,
    Monster,
    Potion,
    Exit,
    UndiscoveredExit,
    Key,
    Void,
    Edge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Surrounding {
    pub direction: Direction,
    pub feature: Feature,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocationReport {
    pub pos: Pos,
    pub first_visit: bool,
    pub surroundings: Vec<Surrounding>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonsterSighting {
    pub pos: Pos,
    pub archetype: &'static str,
    pub health: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MapOverview {
    pub side: usize,
    pub player: Pos,
    pub revealed_cells: usize,
    pub total_cells: usize,
    pub monsters: Vec<MonsterSighting>,
    pub potions: usize,
    pub exit: Option<Pos>,
    pub round: Option<u32>,
}

impl DungeonState {
    pub fn feature_toward(&self, direction: Direction) -> Feature {
        let target = self.player.pos.step(direction);
        if !self.grid.in_bounds(target) {
            return Feature::Edge;
        }
        match self.grid.tile_at(target) {
            Tile::Empty | Tile::Player => Feature::Open,
            Tile::Wall => Feature::Blocked,
            Tile::Monster => Feature::Monster,
            Tile::Potion => Feature::Potion,
            Tile::Key => Feature::Key,
            Tile::Void => Feature::Void,
            Tile::Exit => match self.entity_at(target).map(|entity| &entity.kind) {
                Some(EntityKind::Exit { discovered: true }) => Feature::Exit,
                _ => Feature::UndiscoveredExit,
            },
        }
    }

    pub fn location_report(&self) -> LocationReport {
        LocationReport {
            pos: self.player.pos,
            first_visit: self.first_visit,
            surroundings: Direction::ALL
                .into_iter()
                .map(|direction| Surrounding { direction, feature: self.feature_toward(direction) })
                .collect(),
        }
    }

    pub fn revealed_cells(&self) -> usize {
        if self.revealed { self.grid.cell_count() } else { self.grid.visited_count() }
    }
}

impl Game {
    fn started_dungeon(&self) -> Result<(&DungeonState, GameMode), GameError> {
        match (self.dungeon.as_ref(), self.mode) {
            (Some(dungeon), Some(mode)) => Ok((dungeon, mode)),
            _ => Err(GameError::NotStarted),
        }
    }

    pub fn status_report(&self) -> Result<StatusReport, GameError> {
        let (dungeon, mode) = self.started_dungeon()?;
        Ok(StatusReport {
            health: dungeon.player.health,
            max_health: PLAYER_MAX_HEALTH,
            attack: dungeon.player.attack,
            has_key: dungeon.player.has_key,
            status: self.status,
            mode,
            survival: self.is_survival().then_some(self.survival),
        })
    }

    pub fn location_report(&self) -> Result<LocationReport, GameError> {
        let (dungeon, _) = self.started_dungeon()?;
        Ok(dungeon.location_report())
    }

    pub fn map_overview(&self) -> Result<MapOverview, GameError> {
        let (dungeon, _) = self.started_dungeon()?;
        let mut monsters: Vec<MonsterSighting> = dungeon
            .monsters()
            .filter(|(entity, _)| dungeon.is_revealed(entity.pos))
            .map(|(entity, monster)| MonsterSighting {
                pos: entity.pos,
                archetype: monster.archetype,
                health: monster.health,
            })
            .collect();
        monsters.sort_by_key(|sighting| sighting.pos);
        let potions = dungeon
            .entities
            .values()
            .filter(|entity| matches!(entity.kind, EntityKind::Potion))
            .filter(|entity| dungeon.is_revealed(entity.pos))
            .count();
        let exit = dungeon
            .entities
            .values()
            .find(|entity| matches!(entity.kind, EntityKind::Exit { .. }))
            .map(|entity| entity.pos)
            .filter(|&pos| dungeon.is_revealed(pos));
        Ok(MapOverview {
            side: dungeon.grid.side(),
            player: dungeon.player.pos,
            revealed_cells: dungeon.revealed_cells(),
            total_cells: dungeon.grid.cell_count(),
            monsters,
            potions,
            exit,
            round: self.is_survival().then_some(self.survival.round),
        })
    }
}
