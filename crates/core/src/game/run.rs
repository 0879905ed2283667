//! Run status transitions and the survival-mode difficulty ramp.

use serde::Serialize;

use crate::config::{DifficultyTable, DifficultyTier, GameMode, TierSettings};
use crate::types::*;

use super::Game;

pub const HARD_TIER_ROUND: u32 = 4;
pub const ADVENTURER_TIER_ROUND: u32 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SurvivalState {
    pub round: u32,
    pub tier: DifficultyTier,
    pub extra_monsters: u32,
    /// Only meaningful while the run is `Won`.
    pub pending_next_round: bool,
}

impl Default for SurvivalState {
    fn default() -> Self {
        Self {
            round: 1,
            tier: DifficultyTier::Normal,
            extra_monsters: 0,
            pending_next_round: false,
        }
    }
}

impl SurvivalState {
    pub fn record_victory(&mut self) {
        self.round += 1;
        if self.round == HARD_TIER_ROUND {
            self.tier = DifficultyTier::Hard;
        } else if self.round == ADVENTURER_TIER_ROUND {
            self.tier = DifficultyTier::Adventurer;
        } else if self.round > ADVENTURER_TIER_ROUND {
            self.extra_monsters = self.round - ADVENTURER_TIER_ROUND;
        }
        self.pending_next_round = true;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn settings(&self, table: &DifficultyTable) -> TierSettings {
        table.settings(self.tier).with_extra_monsters(self.extra_monsters)
    }
}

impl Game {
    pub(super) fn resolve_move(&mut self, direction: Direction) -> Result<(), GameError> {
        if self.mode.is_none() {
            return Err(GameError::NotStarted);
        }
        if self.status != RunStatus::Playing {
            return Err(GameError::NotPlaying);
        }
        let Some(dungeon) = self.dungeon.as_mut() else {
            return Err(GameError::NotStarted);
        };

        let mut events = Vec::new();
        let signal = dungeon.apply_move(direction, &mut events);
        for event in events {
            self.emit(event);
        }
        match signal {
            None => {}
            Some(TurnSignal::Victory) => self.on_victory(),
            Some(TurnSignal::Defeat) => self.on_defeat(),
            Some(TurnSignal::VoidFall) if self.is_survival() => self.on_defeat(),
            Some(TurnSignal::VoidFall) => {
                log::info!("fell into the void, rebuilding the dungeon");
                self.emit(GameEvent::DungeonReset);
                self.install_dungeon();
            }
        }
        Ok(())
    }

    fn on_victory(&mut self) {
        self.emit(GameEvent::Victory);
        self.finish(RunStatus::Won);
        if self.is_survival() {
            self.survival.record_victory();
            let SurvivalState { round, tier, extra_monsters, .. } = self.survival;
            log::info!(
                "survival round {round} unlocked at {} (+{extra_monsters} monsters)",
                tier.name()
            );
            self.emit(GameEvent::RoundAdvance { round, tier, extra_monsters });
        }
    }

    fn on_defeat(&mut self) {
        self.emit(GameEvent::Defeat);
        self.finish(RunStatus::Lost);
        if self.is_survival() {
            let rounds_survived = self.survival.round;
            self.survival.reset();
            self.emit(GameEvent::GameOver { rounds_survived });
        }
    }

    fn finish(&mut self, status: RunStatus) {
        self.status = status;
        if let Some(dungeon) = self.dungeon.as_mut() {
            dungeon.revealed = true;
        }
        log::info!("run finished: {status:?}");
    }

    pub(super) fn acknowledge_next_round(&mut self) -> Result<(), GameError> {
        let pending = self.status == RunStatus::Won && self.survival.pending_next_round;
        if !self.is_survival() || !pending {
            return Err(GameError::NoPendingRound);
        }
        self.survival.pending_next_round = false;
        self.status = RunStatus::Playing;
        self.install_dungeon();
        Ok(())
    }

    pub(super) fn start(&mut self, mode: GameMode) {
        log::info!("starting {mode:?}");
        self.mode = Some(mode);
        self.survival.reset();
        self.status = RunStatus::Playing;
        self.emit(GameEvent::RunStarted { mode });
        self.install_dungeon();
    }

    pub(super) fn restart(&mut self) -> Result<(), GameError> {
        if self.mode.is_none() {
            return Err(GameError::NothingToRestart);
        }
        if self.is_survival() {
            self.survival.reset();
        }
        self.status = RunStatus::Playing;
        self.install_dungeon();
        Ok(())
    }

    /// Back to mode selection. The current dungeon is discarded.
    pub(super) fn change_difficulty(&mut self) {
        self.mode = None;
        self.dungeon = None;
        self.status = RunStatus::Playing;
        self.survival.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn ramp_follows_round_thresholds() {
        let mut survival = SurvivalState::default();
        let mut seen = vec![(survival.round, survival.tier, survival.extra_monsters)];
        while survival.round < 10 {
            survival.record_victory();
            seen.push((survival.round, survival.tier, survival.extra_monsters));
        }
        let tiers: Vec<DifficultyTier> = seen.iter().map(|&(_, tier, _)| tier).collect();
        let extras: Vec<u32> = seen.iter().map(|&(_, _, extra)| extra).collect();
        use DifficultyTier::*;
        assert_eq!(tiers[..3], [Normal; 3]);
        assert_eq!(tiers[3..6], [Hard; 3]);
        assert_eq!(tiers[6..], [Adventurer; 4]);
        assert_eq!(extras, vec![0, 0, 0, 0, 0, 0, 0, 1, 2, 3]);
    }

    #[test]
    fn survival_settings_add_extra_monsters() {
        let table = DifficultyTable::default();
        let survival = SurvivalState {
            round: 9,
            tier: DifficultyTier::Adventurer,
            extra_monsters: 2,
            pending_next_round: false,
        };
        assert_eq!(survival.settings(&table).monster_count, 12);
    }

    #[test]
    fn classic_victory_is_terminal() {
        let mode = GameMode::Classic(DifficultyTier::Easy);
        let mut game = game_with_dungeon(mode, one_step_victory());
        let report = game.apply(Action::Move(Direction::Right)).expect("move");
        assert_eq!(report.events, vec![GameEvent::Victory]);
        assert_eq!(game.status(), RunStatus::Won);
        assert!(game.dungeon().is_some_and(|d| d.revealed));
        assert_eq!(game.apply(Action::Move(Direction::Left)), Err(GameError::NotPlaying));
        assert_eq!(game.apply(Action::AcknowledgeNextRound), Err(GameError::NoPendingRound));
    }

    #[test]
    fn survival_victory_waits_for_acknowledgement() {
        let mut game = game_with_dungeon(GameMode::Survival, one_step_victory());
        let report = game.apply(Action::Move(Direction::Right)).expect("move");
        assert_eq!(
            report.events,
            vec![
                GameEvent::Victory,
                GameEvent::RoundAdvance {
                    round: 2,
                    tier: DifficultyTier::Normal,
                    extra_monsters: 0,
                },
            ]
        );
        assert_eq!(game.status(), RunStatus::Won);
        assert!(game.survival().pending_next_round);

        let report = game.apply(Action::AcknowledgeNextRound).expect("acknowledge");
        assert!(matches!(report.events[..], [GameEvent::DungeonGenerated { side: 6, .. }]));
        assert_eq!(game.status(), RunStatus::Playing);
        assert!(!game.survival().pending_next_round);
        assert_eq!(game.survival().round, 2);
        assert_eq!(game.apply(Action::AcknowledgeNextRound), Err(GameError::NoPendingRound));
    }

    #[test]
    fn survival_defeat_resets_the_ramp() {
        let mut game = game_with_dungeon(GameMode::Survival, one_step_defeat());
        game.survival = SurvivalState {
            round: 5,
            tier: DifficultyTier::Hard,
            extra_monsters: 0,
            pending_next_round: false,
        };
        let report = game.apply(Action::Move(Direction::Right)).expect("move");
        assert_eq!(report.events.last(), Some(&GameEvent::GameOver { rounds_survived: 5 }));
        assert!(report.events.contains(&GameEvent::Defeat));
        assert_eq!(game.status(), RunStatus::Lost);
        assert_eq!(game.survival(), SurvivalState::default());
        assert_eq!(game.mode(), Some(GameMode::Survival));

        game.apply(Action::Restart).expect("restart");
        assert_eq!(game.status(), RunStatus::Playing);
        assert_eq!(game.dungeon().map(|d| d.grid.side()), Some(6));
    }

    #[test]
    fn classic_defeat_is_terminal() {
        let mode = GameMode::Classic(DifficultyTier::Hard);
        let mut game = game_with_dungeon(mode, one_step_defeat());
        game.apply(Action::Move(Direction::Right)).expect("move");
        assert_eq!(game.status(), RunStatus::Lost);
        assert_eq!(game.dungeon().map(|d| d.player.health), Some(0));
        game.apply(Action::Restart).expect("restart");
        assert_eq!(game.dungeon().map(|d| d.grid.side()), Some(8));
        assert_eq!(game.dungeon().map(|d| d.player.health), Some(100));
    }

    #[test]
    fn survival_void_is_fatal() {
        let mut game = game_with_dungeon(GameMode::Survival, one_step_void());
        let report = game.apply(Action::Move(Direction::Down)).expect("move");
        assert!(matches!(report.events[0], GameEvent::VoidFall { .. }));
        assert!(report.events.contains(&GameEvent::GameOver { rounds_survived: 1 }));
        assert_eq!(game.status(), RunStatus::Lost);
    }

    #[test]
    fn classic_void_rebuilds_the_dungeon() {
        let mode = GameMode::Classic(DifficultyTier::Easy);
        let mut game = game_with_dungeon(mode, one_step_void());
        let report = game.apply(Action::Move(Direction::Down)).expect("move");
        assert!(matches!(
            report.events[..],
            [
                GameEvent::VoidFall { .. },
                GameEvent::DungeonReset,
                GameEvent::DungeonGenerated { side: 5, .. }
            ]
        ));
        assert_eq!(game.status(), RunStatus::Playing);
        let dungeon = game.dungeon().expect("fresh dungeon");
        assert_eq!(dungeon.player.pos, Pos::ORIGIN);
        assert_eq!(dungeon.grid.visited_count(), 1);
    }

    #[test]
    fn change_difficulty_returns_to_mode_selection() {
        let mut game = game_with_dungeon(GameMode::Survival, open_dungeon(4));
        game.apply(Action::ChangeDifficulty).expect("change");
        assert_eq!(game.mode(), None);
        assert!(game.dungeon().is_none());
        assert_eq!(game.apply(Action::Move(Direction::Right)), Err(GameError::NotStarted));
        let mode = GameMode::Classic(DifficultyTier::Adventurer);
        game.apply(Action::StartGame(mode)).expect("start");
        assert_eq!(game.dungeon().map(|d| d.grid.side()), Some(10));
    }
}
