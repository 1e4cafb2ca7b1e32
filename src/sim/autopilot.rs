//! Demo-mode steering
//!
//! Greedy: head for the food along the shortest wrapped distance, never
//! reverse, never step onto the body, prefer not to eat poison.

use super::grid::{Cell, Direction};
use super::state::GameState;

/// Shortest distance between two cells on a wrapping board
pub fn torus_distance(a: Cell, b: Cell, width: u32, height: u32) -> u32 {
    let dx = a.x.abs_diff(b.x).min(width.saturating_sub(a.x.abs_diff(b.x)));
    let dy = a.y.abs_diff(b.y).min(height.saturating_sub(a.y.abs_diff(b.y)));
    dx + dy
}

/// Direction the autopilot wants next, or `None` if every option is fatal
pub fn suggest(state: &GameState) -> Option<Direction> {
    let snake = &state.snake;
    let (width, height) = (state.config.grid_width, state.config.grid_height);
    let head = snake.head();
    let segments = snake.segments();
    // The tail moves out of the way this step
    let blocking = segments.len().saturating_sub(1);

    Direction::ALL
        .into_iter()
        .filter(|&dir| dir != snake.direction.opposite())
        .filter_map(|dir| {
            let next = head.step(dir, width, height);
            if segments.iter().take(blocking).any(|&c| c == next) {
                return None;
            }
            let mut cost = torus_distance(next, state.food.cell, width, height) * 2;
            if next == state.poison.cell {
                cost += width + height;
            }
            if next == state.powerup.cell {
                cost = cost.saturating_sub(1);
            }
            // Ties keep the current direction
            if dir != snake.direction {
                cost += 1;
            }
            Some((cost, dir))
        })
        .min_by_key(|&(cost, _)| cost)
        .map(|(_, dir)| dir)
}
