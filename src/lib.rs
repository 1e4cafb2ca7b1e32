//! Toro Snake - grid Snake on a wrapping board
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring)
//! - `tuning`: Data-driven game balance
//! - `settings`: Presentation preferences and page-supplied configuration
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural Web Audio sound effects and music (wasm only)
//! - `hud`: DOM score display and start/restart buttons (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ConfigError, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Canonical grid size (cells)
    pub const GRID_WIDTH: u32 = 40;
    pub const GRID_HEIGHT: u32 = 30;
    /// Largest accepted board (cells)
    pub const MAX_GRID_WIDTH: u32 = 70;
    pub const MAX_GRID_HEIGHT: u32 = 50;

    /// Pixel size of one cell
    pub const TILE_SIZE: f32 = 16.0;

    /// Snake spawn cell
    pub const SNAKE_START: (i32, i32) = (8, 8);

    /// Initial collectible cells
    pub const FOOD_START: (i32, i32) = (3, 4);
    pub const POISON_START: (i32, i32) = (10, 12);
    pub const POWERUP_START: (i32, i32) = (15, 15);

    /// Milliseconds per step at game start
    pub const START_SPEED_MS: u32 = 100;
    /// Fastest allowed step (ms)
    pub const MIN_SPEED_MS: u32 = 20;
    /// Game time between speed ramps (ms)
    pub const SPEED_RAMP_INTERVAL_MS: u64 = 10_000;
    /// Step time removed per ramp (ms)
    pub const SPEED_RAMP_STEP_MS: u32 = 10;
    /// Step time added back by a powerup (ms)
    pub const POWERUP_SLOWDOWN_MS: u32 = 20;
    /// Slowest step a powerup can bring the snake back to (ms)
    pub const POWERUP_SPEED_CAP_MS: u32 = 100;

    /// Score deltas
    pub const FOOD_SCORE: i64 = 10;
    pub const POISON_SCORE: i64 = -100;
    pub const POWERUP_SCORE: i64 = 30;

    /// Segments added per pickup
    pub const FOOD_GROWTH: u32 = 1;
    pub const POWERUP_GROWTH: u32 = 3;
}

/// Wrap a coordinate into `[0, size)`
#[inline]
pub fn wrap(value: i32, size: u32) -> i32 {
    value.rem_euclid(size as i32)
}
