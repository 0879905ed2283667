use crate::grid::Grid;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Landmarks {
    pub player: Pos,
    pub exit: Pos,
    pub key: Pos,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterSpawn {
    pub pos: Pos,
    pub archetype: &'static str,
    pub health: i32,
    pub attack: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedDungeon {
    pub grid: Grid,
    pub landmarks: Landmarks,
    pub void: Option<Pos>,
    pub monster_spawns: Vec<MonsterSpawn>,
    pub potion_spawns: Vec<Pos>,
    /// Layout attempts consumed, including the accepted one.
    pub attempts: u32,
    pub used_fallback: bool,
}

impl GeneratedDungeon {
    pub fn has_void(&self) -> bool {
        self.void.is_some()
    }

    pub fn side(&self) -> usize {
        self.grid.side()
    }
}
