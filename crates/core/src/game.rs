//! Run-level facade: owns the active dungeon, the survival ramp, and the event log.

mod bootstrap;
mod combat;
mod hash;
mod queries;
mod run;
mod shared;
mod turn;

#[cfg(test)]
pub(crate) mod test_support;

use crate::config::{ConfigError, DifficultyTable, GameMode};
use crate::state::DungeonState;
use crate::types::*;

pub use bootstrap::build_dungeon_state;
pub use combat::CombatExchange;
pub use queries::{
    Feature, LocationReport, MapOverview, MonsterSighting, QueryAnswer, StatusReport, Surrounding,
};
pub use run::{ADVENTURER_TIER_ROUND, HARD_TIER_ROUND, SurvivalState};
pub use shared::{EventSink, SharedGame, Submission};

/// Everything one accepted action produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionReport {
    pub events: Vec<GameEvent>,
    pub answer: Option<QueryAnswer>,
}

pub struct Game {
    run_seed: u64,
    generation_index: u64,
    table: DifficultyTable,
    mode: Option<GameMode>,
    status: RunStatus,
    survival: SurvivalState,
    dungeon: Option<DungeonState>,
    log: Vec<GameEvent>,
    sink: Option<Box<dyn EventSink + Send>>,
}

impl Game {
    /// Fails when any tier in `table` could not be generated.
    pub fn new(run_seed: u64, table: DifficultyTable) -> Result<Self, ConfigError> {
        table.validate()?;
        Ok(Self {
            run_seed,
            generation_index: 0,
            table,
            mode: None,
            status: RunStatus::Playing,
            survival: SurvivalState::default(),
            dungeon: None,
            log: Vec::new(),
            sink: None,
        })
    }

    /// Resolves one action to completion. Rejected actions leave the game untouched.
    pub fn apply(&mut self, action: Action) -> Result<ActionReport, GameError> {
        let first_event = self.log.len();
        let answer = match action {
            Action::Move(direction) => {
                self.resolve_move(direction)?;
                None
            }
            Action::StatusQuery => Some(QueryAnswer::Status(self.status_report()?)),
            Action::LocationQuery => Some(QueryAnswer::Location(self.location_report()?)),
            Action::MapOverviewQuery => Some(QueryAnswer::MapOverview(self.map_overview()?)),
            Action::AcknowledgeNextRound => {
                self.acknowledge_next_round()?;
                None
            }
            Action::StartGame(mode) => {
                self.start(mode);
                None
            }
            Action::Restart => {
                self.restart()?;
                None
            }
            Action::ChangeDifficulty => {
                self.change_difficulty();
                None
            }
        };
        Ok(ActionReport { events: self.log[first_event..].to_vec(), answer })
    }

    pub fn set_event_sink(&mut self, sink: Box<dyn EventSink + Send>) {
        self.sink = Some(sink);
    }

    pub fn run_seed(&self) -> u64 {
        self.run_seed
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn survival(&self) -> SurvivalState {
        self.survival
    }

    pub fn dungeon(&self) -> Option<&DungeonState> {
        self.dungeon.as_ref()
    }

    pub fn table(&self) -> &DifficultyTable {
        &self.table
    }

    pub fn log(&self) -> &[GameEvent] {
        &self.log
    }

    fn emit(&mut self, event: GameEvent) {
        if let Some(sink) = self.sink.as_mut() {
            sink.on_event(&event);
        }
        self.log.push(event);
    }

    fn is_survival(&self) -> bool {
        self.mode == Some(GameMode::Survival)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::config::{DifficultyTier, TierSettings};

    #[test]
    fn actions_before_start_are_rejected_without_side_effects() {
        let mut game = Game::new(1, DifficultyTable::default()).expect("default table");
        assert_eq!(game.apply(Action::Move(Direction::Right)), Err(GameError::NotStarted));
        assert_eq!(game.apply(Action::StatusQuery), Err(GameError::NotStarted));
        assert_eq!(game.apply(Action::Restart), Err(GameError::NothingToRestart));
        assert_eq!(game.apply(Action::AcknowledgeNextRound), Err(GameError::NoPendingRound));
        assert!(game.log().is_empty());
        assert!(game.dungeon().is_none());
    }

    #[test]
    fn start_game_generates_a_dungeon_for_the_tier() {
        let mut game = Game::new(8, DifficultyTable::default()).expect("default table");
        let mode = GameMode::Classic(DifficultyTier::Hard);
        let report = game.apply(Action::StartGame(mode)).expect("start");
        assert!(matches!(report.events[0], GameEvent::RunStarted { .. }));
        assert!(matches!(report.events[1], GameEvent::DungeonGenerated { side: 8, .. }));
        let dungeon = game.dungeon().expect("dungeon installed");
        assert_eq!(dungeon.grid.side(), 8);
        assert_eq!(dungeon.consistency_violation(), None);
    }

    #[test]
    fn report_carries_only_new_events() {
        let mut dungeon = open_dungeon(4);
        add_wall(&mut dungeon, Pos { y: 0, x: 1 });
        let mut game = game_with_dungeon(GameMode::Classic(DifficultyTier::Normal), dungeon);
        game.apply(Action::Move(Direction::Right)).expect("bump");
        let report = game.apply(Action::Move(Direction::Down)).expect("move");
        let moved = GameEvent::Moved { to: Pos { y: 1, x: 0 }, first_visit: true };
        assert_eq!(report.events, vec![moved]);
        assert_eq!(game.log().len(), 2);
    }

    #[test]
    fn locked_exit_keeps_the_run_going() {
        let mut dungeon = open_dungeon(5);
        place_player(&mut dungeon, Pos { y: 4, x: 3 });
        let mut game = game_with_dungeon(GameMode::Classic(DifficultyTier::Easy), dungeon);
        let report = game.apply(Action::Move(Direction::Right)).expect("move");
        let exit = Pos { y: 4, x: 4 };
        assert_eq!(report.events, vec![GameEvent::ExitLocked { pos: exit }]);
        assert_eq!(game.status(), RunStatus::Playing);
        let dungeon = game.dungeon().expect("dungeon");
        assert_eq!(dungeon.player.pos, Pos { y: 4, x: 3 });
        assert!(!dungeon.revealed);
    }

    #[test]
    fn unplayable_table_is_rejected_up_front() {
        let tiny = TierSettings::new(1, 1, 0, 1.0);
        let table = DifficultyTable { easy: tiny, ..DifficultyTable::default() };
        let err = Game::new(2, table).err().expect("side 1 cannot be generated");
        assert!(matches!(err, ConfigError::InvalidTier { tier: DifficultyTier::Easy, .. }));

        let dense = TierSettings::new(3, 1, 0, 1e6);
        let table = DifficultyTable { hard: dense, ..DifficultyTable::default() };
        assert!(Game::new(2, table).is_err());
    }
}
