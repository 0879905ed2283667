//! Difficulty tiers, their generation parameters, and run modes.
//!
//! The built-in table can be overridden from a TOML file. Tiers missing from the
//! file keep their defaults; every tier present must be complete.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const MIN_SIDE_LENGTH: usize = 3;
pub const MAX_SIDE_LENGTH: usize = 32;
/// Upper bound on `wall_density`; the wall budget is also capped by the free cells.
pub const MAX_WALL_DENSITY: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Normal,
    Hard,
    Adventurer,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::Easy,
        DifficultyTier::Normal,
        DifficultyTier::Hard,
        DifficultyTier::Adventurer,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Normal => "normal",
            DifficultyTier::Hard => "hard",
            DifficultyTier::Adventurer => "adventurer",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierSettings {
    pub side_length: usize,
    pub monster_count: usize,
    pub potion_count: usize,
    pub wall_density: f64,
}

impl TierSettings {
    pub const fn new(
        side_length: usize,
        monster_count: usize,
        potion_count: usize,
        wall_density: f64,
    ) -> Self {
        Self { side_length, monster_count, potion_count, wall_density }
    }

    pub fn with_extra_monsters(self, extra: u32) -> Self {
        Self { monster_count: self.monster_count.saturating_add(extra as usize), ..self }
    }

    /// Rejects settings the generator cannot lay out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.problem() {
            Some(reason) => Err(ConfigError::InvalidSettings { reason }),
            None => Ok(()),
        }
    }

    fn problem(&self) -> Option<String> {
        if !(MIN_SIDE_LENGTH..=MAX_SIDE_LENGTH).contains(&self.side_length) {
            return Some(format!(
                "side_length {} outside {MIN_SIDE_LENGTH}..={MAX_SIDE_LENGTH}",
                self.side_length
            ));
        }
        if !(0.0..=MAX_WALL_DENSITY).contains(&self.wall_density) {
            let density = self.wall_density;
            return Some(format!("wall_density {density} outside 0..={MAX_WALL_DENSITY}"));
        }
        None
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DifficultyTable {
    pub easy: TierSettings,
    pub normal: TierSettings,
    pub hard: TierSettings,
    pub adventurer: TierSettings,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: TierSettings::new(5, 3, 1, 1.5),
            normal: TierSettings::new(6, 4, 1, 1.5),
            hard: TierSettings::new(8, 6, 2, 2.0),
            adventurer: TierSettings::new(10, 10, 3, 2.5),
        }
    }
}

impl DifficultyTable {
    pub fn settings(&self, tier: DifficultyTier) -> TierSettings {
        match tier {
            DifficultyTier::Easy => self.easy,
            DifficultyTier::Normal => self.normal,
            DifficultyTier::Hard => self.hard,
            DifficultyTier::Adventurer => self.adventurer,
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let table: Self = toml::from_str(text)?;
        table.validate()?;
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        let table = Self::from_toml_str(&text)?;
        log::debug!("loaded difficulty table from {}", path.display());
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        DifficultyTier::ALL.into_iter().try_for_each(|tier| match self.settings(tier).problem() {
            Some(reason) => Err(ConfigError::InvalidTier { tier, reason }),
            None => Ok(()),
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", content = "tier", rename_all = "lowercase")]
pub enum GameMode {
    Classic(DifficultyTier),
    Survival,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read difficulty config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not parse difficulty config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid settings for tier {}: {reason}", tier.name())]
    InvalidTier { tier: DifficultyTier, reason: String },
    #[error("invalid dungeon settings: {reason}")]
    InvalidSettings { reason: String },
}
