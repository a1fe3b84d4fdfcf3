use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SnakeError};
use crate::snake::Cell;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 35;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 35;

/// Default pixels per grid cell.
pub const DEFAULT_SCALE_FACTOR: u16 = 30;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 200;

/// Default number of segments a new snake spawns with.
pub const DEFAULT_START_NODE_COUNT: u16 = 3;

/// Largest pixel coordinate a frame may address. A head one cell past the
/// grid edge is still drawn, hence the extra cell in `validate`.
const MAX_CANVAS_EXTENT: u64 = i32::MAX as u64;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

/// Fixed fill colors used when drawing a frame.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub food: Color,
    pub snake: Color,
}

pub const PALETTE: Palette = Palette {
    background: Color::Black,
    food: Color::White,
    snake: Color::Red,
};

/// How the engine decides whether the head ran into the body.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfCollision {
    /// Body segments are never treated as obstacles.
    #[default]
    Legacy,
    /// The head colliding with any other segment's coordinates ends the game.
    Coordinates,
}

/// Tunables for one game session.
///
/// Every field has a default, so a config file only needs the keys it
/// changes.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub scale_factor: u16,
    pub delay_ms: u64,
    pub start_node_count: u16,
    pub self_collision: SelfCollision,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            scale_factor: DEFAULT_SCALE_FACTOR,
            delay_ms: DEFAULT_TICK_INTERVAL_MS,
            start_node_count: DEFAULT_START_NODE_COUNT,
            self_collision: SelfCollision::Legacy,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Returns the grid dimensions.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    /// Spawn cell of a new snake.
    ///
    /// The x coordinate is taken from the height and the y coordinate from
    /// the width. On square grids the two agree.
    #[must_use]
    pub fn start_cell(&self) -> Cell {
        Cell {
            x: i32::from(self.height / 2),
            y: i32::from(self.width / 2),
        }
    }

    /// Cell of the first food item of a new game.
    #[must_use]
    pub fn start_food(&self) -> Cell {
        let start = self.start_cell();
        Cell {
            x: start.x,
            y: start.y + i32::from(self.start_node_count) * 2,
        }
    }

    /// Rejects values the engine or the shell cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SnakeError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.scale_factor == 0 {
            return Err(SnakeError::InvalidConfig(
                "scale_factor must be positive".to_owned(),
            ));
        }
        let widest = u64::from(self.width.max(self.height)) + 1;
        if widest * u64::from(self.scale_factor) > MAX_CANVAS_EXTENT {
            return Err(SnakeError::InvalidConfig(format!(
                "{}x{} cells at scale {} exceed the drawable pixel range",
                self.width, self.height, self.scale_factor
            )));
        }
        if self.delay_ms == 0 {
            return Err(SnakeError::InvalidConfig(
                "delay_ms must be positive".to_owned(),
            ));
        }
        if self.start_node_count == 0 {
            return Err(SnakeError::InvalidConfig(
                "start_node_count must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    /// Loads configuration from `explicit` when given, otherwise from the
    /// platform config directory. Falls back to defaults when the default
    /// file does not exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => match config_path() {
                Some(path) => Self::from_path_or_default(&path),
                None => Ok(Self::default()),
            },
        }
    }

    /// Reads a config file that must exist.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| SnakeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &raw)
    }

    fn from_path_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_json(path, &raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(SnakeError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn from_json(path: &Path, raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|source| SnakeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{GameConfig, GridSize, SelfCollision};
    use crate::error::SnakeError;
    use crate::snake::Cell;

    #[test]
    fn defaults_place_snake_and_food_like_the_classic_board() {
        let config = GameConfig::default();

        assert_eq!(
            config.grid(),
            GridSize {
                width: 35,
                height: 35
            }
        );
        assert_eq!(config.start_cell(), Cell { x: 17, y: 17 });
        assert_eq!(config.start_food(), Cell { x: 17, y: 23 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn start_cell_swaps_axes_on_rectangular_grids() {
        let config = GameConfig {
            width: 20,
            height: 10,
            ..GameConfig::default()
        };

        assert_eq!(config.start_cell(), Cell { x: 5, y: 10 });
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let zero_width = GameConfig {
            width: 0,
            ..GameConfig::default()
        };
        let zero_delay = GameConfig {
            delay_ms: 0,
            ..GameConfig::default()
        };
        let no_nodes = GameConfig {
            start_node_count: 0,
            ..GameConfig::default()
        };

        for config in [zero_width, zero_delay, no_nodes] {
            assert!(matches!(
                config.validate(),
                Err(SnakeError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn validate_rejects_grids_beyond_the_pixel_range() {
        let huge = GameConfig {
            width: 60_000,
            height: 60_000,
            scale_factor: 60_000,
            ..GameConfig::default()
        };
        let tall = GameConfig {
            width: 10,
            height: 40_000,
            scale_factor: 60_000,
            ..GameConfig::default()
        };
        let large_but_drawable = GameConfig {
            width: 60_000,
            height: 60_000,
            scale_factor: 30_000,
            ..GameConfig::default()
        };

        assert!(matches!(huge.validate(), Err(SnakeError::InvalidConfig(_))));
        assert!(matches!(tall.validate(), Err(SnakeError::InvalidConfig(_))));
        assert!(large_but_drawable.validate().is_ok());
    }

    #[test]
    fn missing_default_config_file_falls_back_to_defaults() {
        let path = unique_test_path("absent-default");

        let config = GameConfig::from_path_or_default(&path).expect("missing file is not an error");

        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_config_file_keeps_other_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "width": 12, "self_collision": "coordinates" }"#);

        let config = GameConfig::from_path(&path).expect("config should parse");

        assert_eq!(config.width, 12);
        assert_eq!(config.height, 35);
        assert_eq!(config.self_collision, SelfCollision::Coordinates);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_config_file_returns_parse_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        assert!(matches!(
            GameConfig::from_path(&path),
            Err(SnakeError::ConfigParse { .. })
        ));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_explicit_config_file_is_an_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            GameConfig::load(Some(&path)),
            Err(SnakeError::ConfigRead { .. })
        ));
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
        if let Some(parent) = path.parent() {
            let _ = fs::remove_dir(parent);
        }
    }
}
