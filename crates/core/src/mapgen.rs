//! Procedural dungeon generation split into coherent submodules.

pub mod connectivity;
pub mod model;

mod generator;
mod placement;
mod seed;
mod spawns;

use crate::config::{ConfigError, TierSettings};

pub use generator::{DungeonGenerator, MAX_GENERATION_ATTEMPTS, VOID_CHANCE};
pub use model::{GeneratedDungeon, Landmarks, MonsterSpawn};
pub use placement::{MAX_WALL_ATTEMPTS, WALL_OPENNESS};

pub fn generate_dungeon(
    run_seed: u64,
    generation_index: u64,
    settings: TierSettings,
) -> Result<GeneratedDungeon, ConfigError> {
    Ok(DungeonGenerator::new(run_seed, settings)?.generate(generation_index))
}
