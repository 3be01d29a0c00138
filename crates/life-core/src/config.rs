//! Configuration types for the simulation.

use crate::{Error, Result, MAX_CELLS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Upper bound on `RunnerConfig::ticks_per_second`
pub const MAX_TICKS_PER_SECOND: u32 = 1000;

/// Which neighbors a Shrinker clears
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShrinkerReach {
    /// All eight neighbors are cleared, whatever they held or were about to become.
    #[default]
    AllNeighbors,
    /// Only neighbors that were occupied in the previous generation are cleared.
    OccupiedOnly,
}

/// World configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the world grid
    pub width: i32,
    /// Height of the world grid
    pub height: i32,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Fill the first grid with Normal cells at 50% density
    pub randomize_on_start: bool,
    /// Shrinker kill scope
    pub shrinker_reach: ShrinkerReach,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 60,
            seed: 0,
            randomize_on_start: true,
            shrinker_reach: ShrinkerReach::AllNeighbors,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width < 1 || self.height < 1 || self.width as usize * self.height as usize > MAX_CELLS {
            return Err(Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Headless runner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub world: WorldConfig,
    /// Generations per second while running
    pub ticks_per_second: u32,
    /// Stop after this many generations (runs until interrupted when unset)
    pub max_ticks: Option<u64>,
    /// Emit population metrics every N generations (0 disables)
    pub metrics_interval: u64,
    /// Start with the simulation paused
    pub start_paused: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            ticks_per_second: 10,
            max_ticks: None,
            metrics_interval: 100,
            start_paused: false,
        }
    }
}

impl RunnerConfig {
    /// Load a JSON config; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: RunnerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        if self.ticks_per_second == 0 {
            return Err(Error::Config("ticks_per_second must be at least 1".to_string()));
        }
        if self.ticks_per_second > MAX_TICKS_PER_SECOND {
            return Err(Error::Config(format!(
                "ticks_per_second must be at most {}, got {}",
                MAX_TICKS_PER_SECOND, self.ticks_per_second
            )));
        }
        Ok(())
    }
}
