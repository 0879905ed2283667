//! Installs freshly generated dungeons into the running game.

use crate::config::{GameMode, TierSettings};
use crate::mapgen::{DungeonGenerator, GeneratedDungeon};
use crate::state::{DungeonState, EntityKind, Monster, Player};
use crate::types::GameEvent;

use super::Game;

/// Turns generator output into live state: registry entries for every placed feature.
pub fn build_dungeon_state(generated: GeneratedDungeon, settings: TierSettings) -> DungeonState {
    let GeneratedDungeon { grid, landmarks, void, monster_spawns, potion_spawns, .. } = generated;
    let mut dungeon = DungeonState {
        grid,
        entities: Default::default(),
        player: Player::fresh(landmarks.player),
        settings,
        has_void: false,
        revealed: false,
        first_visit: true,
    };

    dungeon.spawn(landmarks.exit, EntityKind::Exit { discovered: false });
    dungeon.spawn(landmarks.key, EntityKind::Key);
    if let Some(pos) = void {
        dungeon.spawn(pos, EntityKind::Void);
    }
    for spawn in monster_spawns {
        let monster = Monster::new(spawn.archetype, spawn.health, spawn.attack);
        dungeon.spawn(spawn.pos, EntityKind::Monster(monster));
    }
    for pos in potion_spawns {
        dungeon.spawn(pos, EntityKind::Potion);
    }
    dungeon
}

impl Game {
    pub(super) fn active_settings(&self) -> TierSettings {
        match self.mode {
            Some(GameMode::Classic(tier)) => self.table.settings(tier),
            Some(GameMode::Survival) | None => self.survival.settings(&self.table),
        }
    }

    /// Generates the next dungeon for the current mode and makes it the active one.
    pub(super) fn install_dungeon(&mut self) {
        let settings = self.active_settings();
        let generated = DungeonGenerator::from_checked(self.run_seed, settings)
            .generate(self.generation_index);
        self.generation_index += 1;
        self.emit(GameEvent::DungeonGenerated {
            side: generated.side(),
            monsters: generated.monster_spawns.len(),
            potions: generated.potion_spawns.len(),
            has_void: generated.has_void(),
            fallback: generated.used_fallback,
        });
        self.dungeon = Some(build_dungeon_state(generated, settings));
    }
}
