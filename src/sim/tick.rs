//! Per-frame controller
//!
//! Called once per animation frame with the frame timestamp. The snake's own
//! step timer decides whether anything moves.

use super::autopilot;
use super::collectible::CollectibleKind;
use super::grid::Direction;
use super::snake::StepOutcome;
use super::state::{GameEvent, GamePhase, GameState};

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held direction keys
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Start button (one-shot)
    pub start: bool,
    /// Restart button (one-shot)
    pub restart: bool,
    /// Demo mode - steer automatically when no key is held
    pub autopilot: bool,
}

impl TickInput {
    /// First held key in priority order left, right, up, down
    pub fn held_direction(&self) -> Option<Direction> {
        if self.left {
            Some(Direction::Left)
        } else if self.right {
            Some(Direction::Right)
        } else if self.up {
            Some(Direction::Up)
        } else if self.down {
            Some(Direction::Down)
        } else {
            None
        }
    }

    /// Drop all held direction keys; used when key-up events can be missed
    pub fn release_directions(&mut self) {
        self.left = false;
        self.right = false;
        self.up = false;
        self.down = false;
    }
}

/// Advance the session to `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    if input.restart {
        state.restart(now_ms);
    } else if input.start && state.phase() == GamePhase::Ready {
        state.start(now_ms);
    }

    if !state.is_playing() {
        return;
    }

    let turn = input.held_direction().or_else(|| {
        if input.autopilot {
            autopilot::suggest(state)
        } else {
            None
        }
    });
    if let Some(direction) = turn {
        state.snake.face(direction);
    }

    let config = state.config.clone();
    match state.snake.update(now_ms, &config) {
        None => {}
        Some(StepOutcome::Died { .. }) => {
            let score = state.score;
            state.push_event(GameEvent::Died { score });
            log::info!("Died with score {} after {} steps", score, state.steps);
        }
        Some(StepOutcome::Moved { head }) => {
            state.steps += 1;
            state.push_event(GameEvent::Stepped { head });
            log::debug!("Step {} -> ({}, {})", state.steps, head.x, head.y);
            resolve_pickups(state);
        }
    }
}

/// Food, then poison, then powerup; each can fire on the same step
fn resolve_pickups(state: &mut GameState) {
    let head = state.snake.head();
    for kind in CollectibleKind::ALL {
        let collectible = match kind {
            CollectibleKind::Food => &mut state.food,
            CollectibleKind::Poison => &mut state.poison,
            CollectibleKind::Powerup => &mut state.powerup,
        };
        if !collectible.is_hit_by(head) {
            continue;
        }
        let cell = collectible.cell;
        let effect = collectible.on_collect(&mut state.snake, &state.config);

        state.push_event(GameEvent::Collected { kind, cell });
        state.add_score(effect.score);
        state.reposition(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Cell;
    use crate::sim::snake::SnakeState;
    use crate::tuning::GameConfig;

    fn playing(config: GameConfig) -> GameState {
        let mut state = GameState::new(12345, config);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            0,
        );
        state
    }

    #[test]
    fn test_ready_until_start() {
        let mut state = GameState::new(1, GameConfig::default());
        tick(&mut state, &TickInput::default(), 1_000);
        assert_eq!(state.phase(), GamePhase::Ready);
        assert_eq!(state.snake.head(), Cell::new(8, 8));

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
            2_000,
        );
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.snake.head(), Cell::new(9, 8));
    }

    #[test]
    fn test_start_keeps_initial_pickups() {
        let state = playing(GameConfig::default());
        assert_eq!(state.snake.head(), Cell::new(9, 8));
        assert_eq!(state.food.cell, Cell::new(3, 4));
        assert_eq!(state.poison.cell, Cell::new(10, 12));
        assert_eq!(state.powerup.cell, Cell::new(15, 15));
    }

    #[test]
    fn test_one_step_scenario() {
        let mut state = playing(GameConfig::with_grid(70, 30));
        assert_eq!(state.snake.head(), Cell::new(9, 8));
        assert_eq!(state.snake.move_time, 100);
        assert_eq!(state.steps, 1);
        assert!(state.is_playing());
    }

    #[test]
    fn test_input_priority() {
        let input = TickInput {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(input.held_direction(), Some(Direction::Left));

        let input = TickInput {
            up: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(input.held_direction(), Some(Direction::Up));
        assert_eq!(TickInput::default().held_direction(), None);
    }

    #[test]
    fn test_left_blocks_lower_priority_turn() {
        // Moving right: left is refused, and up is never looked at
        let mut state = playing(GameConfig::default());
        let input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };
        tick(&mut state, &input, 100);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Cell::new(10, 8));
    }

    #[test]
    fn test_released_keys_unblock_turns() {
        let mut state = playing(GameConfig::default());
        let mut input = TickInput {
            left: true,
            up: true,
            ..Default::default()
        };

        // Stuck left wins and is refused while moving right
        tick(&mut state, &input, 100);
        assert_eq!(state.snake.head(), Cell::new(10, 8));

        input.release_directions();
        assert_eq!(input.held_direction(), None);
        input.up = true;
        tick(&mut state, &input, 200);
        assert_eq!(state.snake.head(), Cell::new(10, 7));
    }

    #[test]
    fn test_eat_food() {
        let mut state = playing(GameConfig::default());
        state.food.cell = Cell::new(10, 8);
        state.drain_events();

        tick(&mut state, &TickInput::default(), 100);

        assert_eq!(state.score, 10);
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.food.eaten, 1);
        assert!(!state.snake.occupies(state.food.cell));
        assert!(state.drain_events().contains(&GameEvent::Collected {
            kind: CollectibleKind::Food,
            cell: Cell::new(10, 8)
        }));
    }

    #[test]
    fn test_eat_poison() {
        let mut state = playing(GameConfig::default());
        state.poison.cell = Cell::new(10, 8);

        tick(&mut state, &TickInput::default(), 100);

        assert_eq!(state.score, -100);
        assert_eq!(state.snake.len(), 1);
        assert_ne!(state.poison.cell, Cell::new(10, 8));
        assert!(!state.snake.occupies(state.poison.cell));
    }

    #[test]
    fn test_eat_powerup() {
        let mut state = playing(GameConfig::default());
        state.powerup.cell = Cell::new(10, 8);
        state.snake.speed = 50;

        tick(&mut state, &TickInput::default(), 100);

        assert_eq!(state.score, 30);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.speed, 70);
        assert!(!state.snake.occupies(state.powerup.cell));
    }

    #[test]
    fn test_stacked_pickups_all_fire() {
        let mut state = playing(GameConfig::default());
        state.food.cell = Cell::new(10, 8);
        state.poison.cell = Cell::new(10, 8);
        state.drain_events();

        tick(&mut state, &TickInput::default(), 100);

        assert_eq!(state.score, -90);
        assert_eq!(state.snake.len(), 2);
        let events = state.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::Stepped {
                    head: Cell::new(10, 8)
                },
                GameEvent::Collected {
                    kind: CollectibleKind::Food,
                    cell: Cell::new(10, 8)
                },
                GameEvent::ScoreChanged(10),
                GameEvent::Collected {
                    kind: CollectibleKind::Poison,
                    cell: Cell::new(10, 8)
                },
                GameEvent::ScoreChanged(-90),
            ]
        );
    }

    #[test]
    fn test_death_stops_simulation() {
        let mut state = playing(GameConfig::default());
        state.snake = crate::sim::snake::Snake::from_segments(
            [(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)].map(Cell::from),
            Direction::Left,
            100,
        );
        state.snake.start(100);
        state.drain_events();

        let up = TickInput {
            up: true,
            ..Default::default()
        };
        tick(&mut state, &up, 100);

        assert_eq!(state.snake.state, SnakeState::Dead);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.drain_events(), vec![GameEvent::Died { score: 0 }]);

        let head = state.snake.head();
        tick(&mut state, &TickInput::default(), 10_000);
        assert_eq!(state.snake.head(), head);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_restart_after_death() {
        let mut state = playing(GameConfig::default());
        state.add_score(40);
        state.snake.state = SnakeState::Dead;

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
            5_000,
        );

        assert!(state.is_playing());
        assert_eq!(state.steps, 1);
        // Restart steps straight away from the spawn cell
        assert_eq!(state.snake.head(), Cell::new(9, 8));
        let events = state.drain_events();
        let restart_at = events
            .iter()
            .position(|e| *e == GameEvent::Restarted)
            .unwrap();
        assert_eq!(events[restart_at - 1], GameEvent::ScoreChanged(0));
    }

    #[test]
    fn test_autopilot_used_without_keys() {
        let mut state = playing(GameConfig::default());
        state.food.cell = Cell::new(9, 2);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, 100);
        assert_eq!(state.snake.direction, Direction::Up);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                start: true,
                ..Default::default()
            },
            TickInput {
                autopilot: true,
                ..Default::default()
            },
        ];
        let mut a = GameState::new(99999, GameConfig::default());
        let mut b = GameState::new(99999, GameConfig::default());

        tick(&mut a, &inputs[0], 0);
        tick(&mut b, &inputs[0], 0);
        for frame in 1..2_000u64 {
            tick(&mut a, &inputs[1], frame * 16);
            tick(&mut b, &inputs[1], frame * 16);
        }

        assert_eq!(a.snake, b.snake);
        assert_eq!(a.score, b.score);
        assert_eq!(a.food, b.food);
        assert_eq!(a.steps, b.steps);
    }
}
