//! Stable snapshot hashing for determinism checks.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;
use crate::config::DifficultyTier;
use crate::state::EntityKind;

fn tier_code(tier: DifficultyTier) -> u8 {
    match tier {
        DifficultyTier::Easy => 0,
        DifficultyTier::Normal => 1,
        DifficultyTier::Hard => 2,
        DifficultyTier::Adventurer => 3,
    }
}

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.run_seed);
        hasher.write_u64(self.generation_index);
        hasher.write_u8(match self.mode {
            None => 0,
            Some(GameMode::Survival) => 1,
            Some(GameMode::Classic(tier)) => 2 + tier_code(tier),
        });
        hasher.write_u8(match self.status {
            RunStatus::Playing => 0,
            RunStatus::Won => 1,
            RunStatus::Lost => 2,
        });
        hasher.write_u32(self.survival.round);
        hasher.write_u8(tier_code(self.survival.tier));
        hasher.write_u32(self.survival.extra_monsters);
        hasher.write_u8(u8::from(self.survival.pending_next_round));

        if let Some(dungeon) = &self.dungeon {
            let player = dungeon.player;
            hasher.write_i32(player.pos.x);
            hasher.write_i32(player.pos.y);
            hasher.write_i32(player.health);
            hasher.write_u8(u8::from(player.has_key));
            for tile in dungeon.grid.tiles() {
                hasher.write_u8(*tile as u8);
            }
            for pos in dungeon.grid.positions() {
                hasher.write_u8(u8::from(dungeon.grid.is_visited(pos)));
            }
            let mut monsters: Vec<_> =
                dungeon.monsters().map(|(entity, monster)| (entity.pos, monster.health)).collect();
            monsters.sort();
            for (pos, health) in monsters {
                hasher.write_i32(pos.x);
                hasher.write_i32(pos.y);
                hasher.write_i32(health);
            }
            let exit_discovered = dungeon
                .entities
                .values()
                .any(|entity| matches!(entity.kind, EntityKind::Exit { discovered: true }));
            hasher.write_u8(u8::from(exit_discovered));
        }
        hasher.finish()
    }
}
