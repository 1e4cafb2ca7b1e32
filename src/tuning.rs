//! Data-driven game balance
//!
//! Defaults mirror `crate::consts`. Every field is optional in JSON.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Cell;

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in cells (wraparound and spawning)
    pub grid_width: u32,
    /// Board height in cells (wraparound and spawning)
    pub grid_height: u32,
    pub snake_start: Cell,
    pub food_start: Cell,
    pub poison_start: Cell,
    pub powerup_start: Cell,

    // === Speed (ms per step, lower is faster) ===
    pub start_speed_ms: u32,
    pub min_speed_ms: u32,
    pub speed_ramp_interval_ms: u64,
    pub speed_ramp_step_ms: u32,
    pub powerup_slowdown_ms: u32,
    pub powerup_speed_cap_ms: u32,

    // === Scoring ===
    pub food_score: i64,
    pub poison_score: i64,
    pub powerup_score: i64,
    pub food_growth: u32,
    pub powerup_growth: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            snake_start: SNAKE_START.into(),
            food_start: FOOD_START.into(),
            poison_start: POISON_START.into(),
            powerup_start: POWERUP_START.into(),

            start_speed_ms: START_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            speed_ramp_interval_ms: SPEED_RAMP_INTERVAL_MS,
            speed_ramp_step_ms: SPEED_RAMP_STEP_MS,
            powerup_slowdown_ms: POWERUP_SLOWDOWN_MS,
            powerup_speed_cap_ms: POWERUP_SPEED_CAP_MS,

            food_score: FOOD_SCORE,
            poison_score: POISON_SCORE,
            powerup_score: POWERUP_SCORE,
            food_growth: FOOD_GROWTH,
            powerup_growth: POWERUP_GROWTH,
        }
    }
}

/// Rejected tuning values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyGrid { width: u32, height: u32 },
    GridTooLarge { width: u32, height: u32 },
    StartOutOfBounds(Cell),
    ZeroSpeed,
    SpeedFloorAboveStart { min: u32, start: u32 },
    ZeroRampInterval,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyGrid { width, height } => {
                write!(f, "grid must be at least 1x1, got {}x{}", width, height)
            }
            ConfigError::GridTooLarge { width, height } => write!(
                f,
                "grid must be at most {}x{}, got {}x{}",
                MAX_GRID_WIDTH, MAX_GRID_HEIGHT, width, height
            ),
            ConfigError::StartOutOfBounds(cell) => {
                write!(f, "start cell ({}, {}) is outside the grid", cell.x, cell.y)
            }
            ConfigError::ZeroSpeed => write!(f, "step speeds must be non-zero"),
            ConfigError::SpeedFloorAboveStart { min, start } => {
                write!(f, "min speed {}ms is slower than start speed {}ms", min, start)
            }
            ConfigError::ZeroRampInterval => write!(f, "speed ramp interval must be non-zero"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    /// Config with a custom board size
    pub fn with_grid(width: u32, height: u32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.grid_width > MAX_GRID_WIDTH || self.grid_height > MAX_GRID_HEIGHT {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        for cell in [
            self.snake_start,
            self.food_start,
            self.poison_start,
            self.powerup_start,
        ] {
            if !cell.in_bounds(self.grid_width, self.grid_height) {
                return Err(ConfigError::StartOutOfBounds(cell));
            }
        }
        if self.start_speed_ms == 0 || self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroSpeed);
        }
        if self.min_speed_ms > self.start_speed_ms {
            return Err(ConfigError::SpeedFloorAboveStart {
                min: self.min_speed_ms,
                start: self.start_speed_ms,
            });
        }
        if self.speed_ramp_interval_ms == 0 {
            return Err(ConfigError::ZeroRampInterval);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 40);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.start_speed_ms, 100);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = GameConfig::with_grid(0, 30);
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                width: 0,
                height: 30
            })
        );
    }

    #[test]
    fn test_rejects_oversized_grid() {
        assert_eq!(
            GameConfig::with_grid(u32::MAX, 30).validate(),
            Err(ConfigError::GridTooLarge {
                width: u32::MAX,
                height: 30
            })
        );
        assert!(matches!(
            GameConfig::with_grid(40, 51).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
        assert_eq!(GameConfig::with_grid(70, 50).validate(), Ok(()));
    }

    #[test]
    fn test_rejects_start_outside_small_grid() {
        // Default snake start (8, 8) does not fit on a 5x5 board
        let config = GameConfig::with_grid(5, 5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOutOfBounds(_))
        ));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let config = GameConfig {
            min_speed_ms: 150,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::SpeedFloorAboveStart { .. })
        ));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"grid_width": 70, "snake_start": {"x": 2, "y": 3}}"#)
                .unwrap();
        assert_eq!(config.grid_width, 70);
        assert_eq!(config.grid_height, 30);
        assert_eq!(config.snake_start, Cell::new(2, 3));
        assert_eq!(config.food_score, 10);
    }
}
