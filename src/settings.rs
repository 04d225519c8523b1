//! Optional settings file, merged with command line flags.
//!
//! ```toml
//! level = "medium"
//! width = 24
//! height = 24
//! obstacles = true
//! log_file = "snake.log"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::game::{GameConfig, Level, ObstacleLayout};
use crate::modes::GridSizing;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub level: Option<Level>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub obstacles: Option<bool>,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse settings in {:?}", path))
    }

    /// Layer `overrides` on top of these settings
    pub fn merge(self, overrides: Settings) -> Settings {
        Settings {
            level: overrides.level.or(self.level),
            width: overrides.width.or(self.width),
            height: overrides.height.or(self.height),
            obstacles: overrides.obstacles.or(self.obstacles),
            log_file: overrides.log_file.or(self.log_file),
        }
    }

    pub fn level(&self) -> Level {
        self.level.unwrap_or_default()
    }

    pub fn obstacle_layout(&self) -> ObstacleLayout {
        match self.obstacles {
            Some(false) => ObstacleLayout::None,
            _ => ObstacleLayout::Walls,
        }
    }

    /// A fixed grid if either side was given; a single side makes a square
    pub fn grid_sizing(&self) -> GridSizing {
        match (self.width, self.height) {
            (Some(width), Some(height)) => GridSizing::Fixed { width, height },
            (Some(side), None) | (None, Some(side)) => GridSizing::Fixed {
                width: side,
                height: side,
            },
            (None, None) => GridSizing::FitToSurface,
        }
    }

    /// Game configuration, validated when the grid size is fixed.
    /// Fitted grids get their size from the terminal later.
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = GameConfig::default()
            .with_level(self.level())
            .with_obstacles(self.obstacle_layout());

        if let GridSizing::Fixed { width, height } = self.grid_sizing() {
            config = config.with_grid(width, height);
            config.validate().context("Invalid grid size")?;
        }

        Ok(config)
    }
}
