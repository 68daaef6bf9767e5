//! Tunable parameters and the level list, optionally read from TOML.
//!
//! ```toml
//! tick_rate = 60.0
//! seed = 7
//!
//! [physics]
//! gravity = 0.005
//!
//! [[levels]]
//! description = "Collect 50\npollen"
//! goal = "pollen"
//! amount = 50
//! ```
//!
//! Every field is optional; omitted ones take the built-in defaults.

use std::collections::VecDeque;
use std::path::Path;

use serde::Deserialize;

use crate::entities::{GoalKind, Level};
use crate::error::{GameError, Result};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration per tick.
    pub gravity: f32,
    /// Vertical velocity set by an up/down action.
    pub jump_speed: f32,
    /// Horizontal pixels per tick while a direction is held.
    pub x_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 0.005,
            jump_speed: 0.05,
            x_speed: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LevelConfig {
    pub description: String,
    pub goal: GoalKind,
    pub amount: u32,
    #[serde(default)]
    pub time_limit: Option<f32>,
}

impl LevelConfig {
    fn new(description: &str, goal: GoalKind, amount: u32, time_limit: Option<f32>) -> Self {
        Self {
            description: description.to_string(),
            goal,
            amount,
            time_limit,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Simulation ticks per second; converts ticks into level seconds.
    pub tick_rate: f32,
    /// Fixed RNG seed for reproducible worlds.
    pub seed: Option<u64>,
    pub physics: PhysicsConfig,
    pub levels: Vec<LevelConfig>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            seed: None,
            physics: PhysicsConfig::default(),
            levels: default_levels(),
        }
    }
}

fn default_levels() -> Vec<LevelConfig> {
    vec![
        LevelConfig::new("Collect 50\npollen", GoalKind::Pollen, 50, None),
        LevelConfig::new("Collect 30\nnectar", GoalKind::Nectar, 30, None),
        LevelConfig::new("100 pollen\nin 60 sec", GoalKind::Pollen, 100, Some(60.0)),
        LevelConfig::new("60 nectar\nin 90 sec", GoalKind::Nectar, 60, Some(90.0)),
        LevelConfig::new("300 pollen\nin 180 sec", GoalKind::Pollen, 300, Some(180.0)),
    ]
}

impl GameConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        tracing::info!(
            path = %path.as_ref().display(),
            levels = config.levels.len(),
            "loaded config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.tick_rate > 0.0) {
            return Err(GameError::InvalidTickRate(self.tick_rate));
        }
        if self.levels.is_empty() {
            return Err(GameError::NoLevels);
        }
        for (i, level) in self.levels.iter().enumerate() {
            let number = i + 1;
            if level.amount == 0 {
                return Err(GameError::InvalidLevel {
                    number,
                    reason: "goal amount must be at least 1".to_string(),
                });
            }
            if let Some(limit) = level.time_limit {
                if !(limit > 0.0) {
                    return Err(GameError::InvalidLevel {
                        number,
                        reason: format!("time limit must be positive, got {}", limit),
                    });
                }
            }
            if level.description.trim().is_empty() {
                return Err(GameError::InvalidLevel {
                    number,
                    reason: "description is empty".to_string(),
                });
            }
        }
        Ok(())
    }

    /// A fresh queue of levels, numbered from 1, each with its popup armed.
    pub fn level_queue(&self) -> VecDeque<Level> {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, l)| {
                Level::new(
                    i as u32 + 1,
                    &l.description,
                    l.goal,
                    l.amount,
                    l.time_limit,
                )
            })
            .collect()
    }
}
