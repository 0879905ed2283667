pub mod config;
pub mod content;
pub mod game;
pub mod grid;
pub mod mapgen;
pub mod state;
pub mod types;

pub use config::{ConfigError, DifficultyTable, DifficultyTier, GameMode, TierSettings};
pub use game::{
    ActionReport, EventSink, Feature, Game, LocationReport, MapOverview, QueryAnswer, SharedGame,
    StatusReport, Submission, SurvivalState,
};
pub use grid::Grid;
pub use mapgen::{DungeonGenerator, GeneratedDungeon, generate_dungeon};
pub use state::{DungeonState, Entity, EntityKind, Monster, Player};
pub use types::*;
