//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in from the host as milliseconds
//! - Seeded RNG only
//! - Fixed collision order (food, poison, powerup)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collectible;
pub mod grid;
pub mod snake;
pub mod state;
pub mod tick;

pub use collectible::{Collectible, CollectibleKind, Effect};
pub use grid::{Cell, Direction, OccupancyGrid};
pub use snake::{Snake, SnakeState, StepOutcome};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
