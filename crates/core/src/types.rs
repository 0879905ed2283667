use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::config::{DifficultyTier, GameMode};

new_key_type! {
    pub struct EntityId;
}

/// Grid coordinate. `x` is the column, `y` the row, both 0-indexed from the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const ORIGIN: Pos = Pos { y: 0, x: 0 };

    pub fn step(self, direction: Direction) -> Pos {
        let (dx, dy) = direction.delta();
        Pos { y: self.y + dy, x: self.x + dx }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tile {
    Empty,
    Wall,
    Player,
    Monster,
    Potion,
    Key,
    Exit,
    Void,
}

impl Tile {
    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Wall => '#',
            Tile::Player => 'P',
            Tile::Monster => 'M',
            Tile::Potion => 'H',
            Tile::Key => 'K',
            Tile::Exit => 'E',
            Tile::Void => 'V',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Column and row offsets `(dx, dy)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Potion,
    Key,
}

/// Which canned reaction the narration layer should use for a monster engagement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncounterTier {
    First,
    Second,
    Repeated,
}

impl EncounterTier {
    pub fn from_count(encounters: u32) -> Self {
        match encounters {
            0 | 1 => EncounterTier::First,
            2 => EncounterTier::Second,
            _ => EncounterTier::Repeated,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            EncounterTier::First => 1,
            EncounterTier::Second => 2,
            EncounterTier::Repeated => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Playing,
    Won,
    Lost,
}

/// Terminal signal produced by one resolved move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnSignal {
    VoidFall,
    Victory,
    Defeat,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum GameEvent {
    RunStarted {
        mode: GameMode,
    },
    DungeonGenerated {
        side: usize,
        monsters: usize,
        potions: usize,
        has_void: bool,
        fallback: bool,
    },
    Moved {
        to: Pos,
        first_visit: bool,
    },
    BoundaryBlocked {
        direction: Direction,
    },
    WallBump {
        pos: Pos,
    },
    VoidFall {
        pos: Pos,
    },
    DungeonReset,
    MonsterEncountered {
        id: EntityId,
        archetype: &'static str,
        encounters: u32,
        tier: EncounterTier,
    },
    CombatResult {
        id: EntityId,
        damage_dealt: i32,
        damage_taken: i32,
        monster_health: i32,
        player_health: i32,
        monster_defeated: bool,
        player_defeated: bool,
    },
    ItemCollected {
        kind: ItemKind,
        player_health: i32,
    },
    ExitLocked {
        pos: Pos,
    },
    Victory,
    Defeat,
    RoundAdvance {
        round: u32,
        tier: DifficultyTier,
        extra_monsters: u32,
    },
    GameOver {
        rounds_survived: u32,
    },
}

/// Discrete request accepted by [`crate::Game::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    StatusQuery,
    LocationQuery,
    MapOverviewQuery,
    AcknowledgeNextRound,
    StartGame(GameMode),
    Restart,
    ChangeDifficulty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("no game has been started")]
    NotStarted,
    #[error("the current run is over")]
    NotPlaying,
    #[error("no survival round is waiting to start")]
    NoPendingRound,
    #[error("choose a game mode before restarting")]
    NothingToRestart,
}
