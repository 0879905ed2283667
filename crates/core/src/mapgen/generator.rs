//! Rejection-sampling loop that composes skeleton placement, validation, and spawns.

use crate::config::{ConfigError, TierSettings};

use super::connectivity::validate;
use super::model::GeneratedDungeon;
use super::placement::{build_skeleton, fallback_skeleton};
use super::seed::{dungeon_rng, roll_chance};
use super::spawns::{spawn_monsters, spawn_potions};

pub const MAX_GENERATION_ATTEMPTS: u32 = 150;
pub const VOID_CHANCE: f64 = 0.25;

pub struct DungeonGenerator {
    run_seed: u64,
    settings: TierSettings,
}

impl DungeonGenerator {
    pub fn new(run_seed: u64, settings: TierSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self { run_seed, settings })
    }

    /// For settings drawn from a table that already passed validation.
    pub(crate) fn from_checked(run_seed: u64, settings: TierSettings) -> Self {
        debug_assert!(settings.validate().is_ok(), "{settings:?}");
        Self { run_seed, settings }
    }

    pub fn generate(&self, generation_index: u64) -> GeneratedDungeon {
        let mut rng = dungeon_rng(self.run_seed, generation_index);
        let include_void = roll_chance(&mut rng, VOID_CHANCE);

        let mut accepted = None;
        let mut attempts = 0;
        while accepted.is_none() && attempts < MAX_GENERATION_ATTEMPTS {
            attempts += 1;
            let Some(candidate) = build_skeleton(&mut rng, &self.settings, include_void) else {
                log::debug!("dungeon attempt {attempts}: no room for the key");
                continue;
            };
            let report = validate(&candidate.grid, candidate.landmarks);
            if report.is_valid() {
                accepted = Some(candidate);
            } else {
                log::debug!("dungeon attempt {attempts} rejected: {report:?}");
            }
        }

        let used_fallback = accepted.is_none();
        let mut skeleton = accepted.unwrap_or_else(|| {
            log::warn!(
                "no valid {n}x{n} dungeon after {MAX_GENERATION_ATTEMPTS} attempts, using fallback",
                n = self.settings.side_length
            );
            fallback_skeleton(self.settings.side_length)
        });

        let start = skeleton.landmarks.player;
        let monster_spawns =
            spawn_monsters(&mut rng, &mut skeleton.grid, start, self.settings.monster_count);
        let potion_spawns =
            spawn_potions(&mut rng, &mut skeleton.grid, start, self.settings.potion_count);
        skeleton.grid.mark_visited(start);
        skeleton.grid.mark_described(start);

        log::info!(
            "generated {n}x{n} dungeon: {} monsters, {} potions, void={}, attempts={attempts}",
            monster_spawns.len(),
            potion_spawns.len(),
            skeleton.void.is_some(),
            n = self.settings.side_length,
        );

        GeneratedDungeon {
            grid: skeleton.grid,
            landmarks: skeleton.landmarks,
            void: skeleton.void,
            monster_spawns,
            potion_spawns,
            attempts,
            used_fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DifficultyTable, DifficultyTier, MAX_WALL_DENSITY};
    use crate::types::{Pos, Tile};

    #[test]
    fn only_the_start_cell_is_visited() {
        let settings = DifficultyTable::default().settings(DifficultyTier::Hard);
        let dungeon = DungeonGenerator::new(77, settings).expect("valid").generate(0);
        assert_eq!(dungeon.grid.visited_count(), 1);
        assert!(dungeon.grid.is_visited(Pos::ORIGIN));
        assert_eq!(dungeon.grid.tile_at(Pos::ORIGIN), Tile::Player);
    }

    #[test]
    fn dense_walls_still_yield_a_valid_dungeon() {
        let settings = TierSettings::new(4, 2, 1, 6.0);
        for index in 0..20 {
            let dungeon = DungeonGenerator::new(9, settings).expect("valid").generate(index);
            assert!(validate(&dungeon.grid, dungeon.landmarks).is_valid());
            assert!(dungeon.attempts >= 1 && dungeon.attempts <= MAX_GENERATION_ATTEMPTS);
        }
    }

    #[test]
    fn spawns_land_on_their_tiles() {
        let settings = DifficultyTable::default().settings(DifficultyTier::Adventurer);
        let dungeon = DungeonGenerator::new(2024, settings).expect("valid").generate(1);
        for spawn in &dungeon.monster_spawns {
            assert_eq!(dungeon.grid.tile_at(spawn.pos), Tile::Monster);
            assert_eq!(spawn.health, spawn.health.clamp(40, 60));
        }
        for pos in &dungeon.potion_spawns {
            assert_eq!(dungeon.grid.tile_at(*pos), Tile::Potion);
        }
        assert_eq!(dungeon.grid.count(Tile::Void), usize::from(dungeon.has_void()));
    }

    #[test]
    fn void_shows_up_in_some_dungeons() {
        let settings = DifficultyTable::default().settings(DifficultyTier::Normal);
        let generator = DungeonGenerator::new(1, settings).expect("valid");
        let with_void = (0..80).filter(|&index| generator.generate(index).has_void()).count();
        assert!(with_void > 0 && with_void < 80, "{with_void} of 80 dungeons had a void");
    }

    #[test]
    fn degenerate_settings_never_reach_generation() {
        for side in [0, 1, 2] {
            let settings = TierSettings::new(side, 1, 1, 1.0);
            assert!(DungeonGenerator::new(4, settings).is_err(), "side {side}");
        }
        let dense = TierSettings::new(3, 1, 1, 1e6);
        assert!(matches!(
            DungeonGenerator::new(4, dense),
            Err(ConfigError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn densest_allowed_small_grid_still_generates() {
        let settings = TierSettings::new(3, 50, 50, MAX_WALL_DENSITY);
        let generator = DungeonGenerator::new(8, settings).expect("cap is allowed");
        for index in 0..10 {
            let dungeon = generator.generate(index);
            assert!(validate(&dungeon.grid, dungeon.landmarks).is_valid());
            assert!(dungeon.monster_spawns.len() + dungeon.potion_spawns.len() <= 9);
        }
    }
}
