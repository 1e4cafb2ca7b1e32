//! Game session state
//!
//! Everything the simulation owns lives here: the snake, the three pickups,
//! the score and the seeded RNG. The host reads it and drains events.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collectible::{Collectible, CollectibleKind};
use super::grid::{Cell, OccupancyGrid};
use super::snake::{Snake, SnakeState};
use crate::tuning::GameConfig;

/// Session lifecycle, derived from the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Start screen, snake idle
    Ready,
    Playing,
    /// Snake dead, waiting for restart
    GameOver,
}

/// Things the host reacts to (sound, HUD, background color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Restarted,
    Stepped { head: Cell },
    Collected { kind: CollectibleKind, cell: Cell },
    ScoreChanged(i64),
    Died { score: i64 },
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub snake: Snake,
    pub food: Collectible,
    pub poison: Collectible,
    pub powerup: Collectible,
    pub score: i64,
    /// Completed steps this run
    pub steps: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64, config: GameConfig) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            snake: Snake::new(config.snake_start, config.start_speed_ms),
            food: Collectible::new(CollectibleKind::Food, config.food_start),
            poison: Collectible::new(CollectibleKind::Poison, config.poison_start),
            powerup: Collectible::new(CollectibleKind::Powerup, config.powerup_start),
            score: 0,
            steps: 0,
            events: Vec::new(),
            config,
        }
    }

    pub fn phase(&self) -> GamePhase {
        match self.snake.state {
            SnakeState::Idle => GamePhase::Ready,
            SnakeState::Alive => GamePhase::Playing,
            SnakeState::Dead => GamePhase::GameOver,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.snake.is_alive()
    }

    /// Pickups in collision-check order
    pub fn collectibles(&self) -> [&Collectible; 3] {
        [&self.food, &self.poison, &self.powerup]
    }

    pub fn collectible(&self, kind: CollectibleKind) -> &Collectible {
        match kind {
            CollectibleKind::Food => &self.food,
            CollectibleKind::Poison => &self.poison,
            CollectibleKind::Powerup => &self.powerup,
        }
    }

    /// Occupancy of the canonical grid by the snake
    pub fn occupancy(&self) -> OccupancyGrid {
        OccupancyGrid::build(
            self.config.grid_width,
            self.config.grid_height,
            self.snake.segments(),
        )
    }

    /// Ready -> Playing. Score starts at zero; pickups stay where they are.
    pub fn start(&mut self, now_ms: u64) {
        if self.phase() != GamePhase::Ready {
            return;
        }
        self.snake.start(now_ms);
        self.set_score(0);
        self.push_event(GameEvent::Started);
        log::info!("Game started (seed {})", self.seed);
    }

    /// Fresh snake, zero score, all pickups moved, then straight into play
    pub fn restart(&mut self, now_ms: u64) {
        self.snake = Snake::new(self.config.snake_start, self.config.start_speed_ms);
        self.steps = 0;
        for kind in CollectibleKind::ALL {
            self.reposition(kind);
        }
        self.snake.start(now_ms);
        self.set_score(0);
        self.push_event(GameEvent::Restarted);
        log::info!("Game restarted");
    }

    /// Move one pickup to a random cell off the snake
    pub fn reposition(&mut self, kind: CollectibleKind) {
        let grid = self.occupancy();
        let target = match kind {
            CollectibleKind::Food => &mut self.food,
            CollectibleKind::Poison => &mut self.poison,
            CollectibleKind::Powerup => &mut self.powerup,
        };
        target.reposition(&grid, &mut self.rng);
    }

    /// Apply a score delta and notify the HUD
    pub fn add_score(&mut self, delta: i64) {
        self.set_score(self.score + delta);
    }

    fn set_score(&mut self, score: i64) {
        self.score = score;
        self.push_event(GameEvent::ScoreChanged(score));
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
