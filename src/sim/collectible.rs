//! Food, poison and powerups
//!
//! Single-cell pickups. Collecting one applies its effect to the snake and
//! reports the score change; the pickup is then moved to a free cell.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, OccupancyGrid};
use super::snake::Snake;
use crate::tuning::GameConfig;

/// Pickup types, in collision-check order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    Food,
    Poison,
    Powerup,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 3] = [
        CollectibleKind::Food,
        CollectibleKind::Poison,
        CollectibleKind::Powerup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectibleKind::Food => "food",
            CollectibleKind::Poison => "poison",
            CollectibleKind::Powerup => "powerup",
        }
    }

    /// What collecting this kind does
    pub fn effect(&self, config: &GameConfig) -> Effect {
        match self {
            CollectibleKind::Food => Effect {
                score: config.food_score,
                growth: config.food_growth,
                slowdown_ms: 0,
            },
            // Costs points but does not shrink the snake
            CollectibleKind::Poison => Effect {
                score: config.poison_score,
                growth: 0,
                slowdown_ms: 0,
            },
            CollectibleKind::Powerup => Effect {
                score: config.powerup_score,
                growth: config.powerup_growth,
                slowdown_ms: config.powerup_slowdown_ms,
            },
        }
    }
}

/// Outcome of a pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    pub score: i64,
    /// Segments added at the vacated tail
    pub growth: u32,
    /// Added to step time (capped by `powerup_speed_cap_ms`)
    pub slowdown_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub cell: Cell,
    /// Lifetime pickups (only counted for food)
    pub eaten: u32,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, cell: Cell) -> Self {
        Self {
            kind,
            cell,
            eaten: 0,
        }
    }

    /// Exact cell match with the snake head
    pub fn is_hit_by(&self, head: Cell) -> bool {
        self.cell == head
    }

    /// Apply this pickup to the snake and return the effect for scoring
    pub fn on_collect(&mut self, snake: &mut Snake, config: &GameConfig) -> Effect {
        let effect = self.kind.effect(config);
        for _ in 0..effect.growth {
            snake.grow();
        }
        if effect.slowdown_ms > 0 {
            snake.slow_down(effect.slowdown_ms, config.powerup_speed_cap_ms);
        }
        if self.kind == CollectibleKind::Food {
            self.eaten += 1;
        }
        effect
    }

    /// Move to a uniformly random free cell. Stays put when the board is full.
    pub fn reposition<R: Rng>(&mut self, grid: &OccupancyGrid, rng: &mut R) -> bool {
        let free = grid.free_cells();
        if free.is_empty() {
            log::debug!("No free cell for {}, leaving it in place", self.kind.as_str());
            return false;
        }
        self.cell = free[rng.random_range(0..free.len())];
        log::debug!(
            "Moved {} to ({}, {})",
            self.kind.as_str(),
            self.cell.x,
            self.cell.y
        );
        true
    }
}
