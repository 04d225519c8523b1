use anyhow::{Result, bail};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Percentage of the available surface the board is allowed to cover
const SURFACE_FILL_PERCENT: usize = 85;

/// Size of one grid cell on the render surface, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub columns: u16,
    pub rows: u16,
}

/// Every level draws its cells at the same size
pub const CELL_SIZE: CellSize = CellSize {
    columns: 2,
    rows: 1,
};

/// Difficulty level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Time between two simulation ticks
    pub fn tick_interval(&self) -> Duration {
        match self {
            Level::Easy => Duration::from_millis(120),
            Level::Medium => Duration::from_millis(80),
            Level::Hard => Duration::from_millis(50),
        }
    }

    /// Points awarded for each food eaten
    pub fn score_per_food(&self) -> u32 {
        match self {
            Level::Easy => 1,
            Level::Medium => 2,
            Level::Hard => 3,
        }
    }

    pub fn cell_size(&self) -> CellSize {
        CELL_SIZE
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
        }
    }

    /// The next level, wrapping from hard back to easy
    pub fn next(&self) -> Level {
        match self {
            Level::Easy => Level::Medium,
            Level::Medium => Level::Hard,
            Level::Hard => Level::Easy,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which fixed wall shapes are placed on the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleLayout {
    /// Open board, only the grid bounds are deadly
    None,
    /// Vertical center wall plus the L shape in the top-left corner
    #[default]
    Walls,
}

impl ObstacleLayout {
    /// Smallest (width, height) grid this layout supports.
    ///
    /// With walls the grid must hold the whole L shape and leave a free
    /// start cell next to the center wall.
    pub fn min_grid_size(&self) -> (usize, usize) {
        match self {
            ObstacleLayout::None => (2, 2),
            ObstacleLayout::Walls => (12, 12),
        }
    }
}

/// Configuration for one game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub level: Level,
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    pub obstacles: ObstacleLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            level: Level::Easy,
            grid_width: 20,
            grid_height: 20,
            obstacles: ObstacleLayout::Walls,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(level: Level, width: usize, height: usize) -> Self {
        Self {
            level,
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    pub fn with_obstacles(mut self, obstacles: ObstacleLayout) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    /// Reject grids too small for the obstacle layout
    pub fn validate(&self) -> Result<()> {
        let (min_width, min_height) = self.obstacles.min_grid_size();
        if self.grid_width < min_width || self.grid_height < min_height {
            bail!(
                "grid {}x{} is too small, at least {}x{} is required",
                self.grid_width,
                self.grid_height,
                min_width,
                min_height
            );
        }
        // Coordinates are i32 on the grid
        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            bail!("grid {}x{} is too large", self.grid_width, self.grid_height);
        }
        Ok(())
    }
}

/// Square grid that fits on a surface of `columns` x `rows` terminal cells.
///
/// The board covers 85% of the smaller surface dimension and never drops
/// below the layout's minimum size.
pub fn fit_grid(
    columns: u16,
    rows: u16,
    cell: CellSize,
    layout: ObstacleLayout,
) -> (usize, usize) {
    let across = columns / cell.columns.max(1);
    let down = rows / cell.rows.max(1);
    let side = usize::from(across.min(down)) * SURFACE_FILL_PERCENT / 100;

    let (min_width, min_height) = layout.min_grid_size();
    (side.max(min_width), side.max(min_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_table() {
        assert_eq!(Level::Easy.tick_interval(), Duration::from_millis(120));
        assert_eq!(Level::Medium.tick_interval(), Duration::from_millis(80));
        assert_eq!(Level::Hard.tick_interval(), Duration::from_millis(50));

        assert_eq!(Level::Easy.score_per_food(), 1);
        assert_eq!(Level::Medium.score_per_food(), 2);
        assert_eq!(Level::Hard.score_per_food(), 3);

        for level in Level::ALL {
            assert_eq!(level.cell_size(), CELL_SIZE);
        }
    }

    #[test]
    fn test_level_parsing() {
        assert_eq!(Level::from_str("easy", false).unwrap(), Level::Easy);
        assert_eq!(Level::from_str("Medium", true).unwrap(), Level::Medium);
        assert_eq!(Level::from_str("hard", false).unwrap(), Level::Hard);
        assert!(Level::from_str("HARD", false).is_err());
        assert!(Level::from_str("insane", true).is_err());

        for level in Level::ALL {
            let value = level.to_possible_value().unwrap();
            assert_eq!(value.get_name(), level.name());
        }
    }

    #[test]
    fn test_level_cycle() {
        assert_eq!(Level::Easy.next(), Level::Medium);
        assert_eq!(Level::Medium.next(), Level::Hard);
        assert_eq!(Level::Hard.next(), Level::Easy);
    }

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.level, Level::Easy);
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.obstacles, ObstacleLayout::Walls);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_minimum_grid() {
        assert!(GameConfig::new(Level::Easy, 11, 20).validate().is_err());
        assert!(GameConfig::new(Level::Easy, 12, 12).validate().is_ok());

        let open = GameConfig::new(Level::Hard, 10, 10).with_obstacles(ObstacleLayout::None);
        assert!(open.validate().is_ok());
        assert!(open.with_grid(1, 5).validate().is_err());
    }

    #[test]
    fn test_fit_grid_uses_smaller_dimension() {
        // 100 columns = 50 cells across, 40 rows = 40 cells down
        assert_eq!(
            fit_grid(100, 40, CELL_SIZE, ObstacleLayout::Walls),
            (34, 34)
        );
        assert_eq!(
            fit_grid(40, 100, CELL_SIZE, ObstacleLayout::Walls),
            (17, 17)
        );
    }

    #[test]
    fn test_fit_grid_clamps_to_minimum() {
        assert_eq!(fit_grid(10, 5, CELL_SIZE, ObstacleLayout::Walls), (12, 12));
        assert_eq!(fit_grid(0, 0, CELL_SIZE, ObstacleLayout::None), (2, 2));
    }

    #[test]
    fn test_settings_serialization_names() {
        let config = GameConfig::new(Level::Medium, 15, 15);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("level = \"medium\""));
        assert!(text.contains("obstacles = \"walls\""));
    }
}
