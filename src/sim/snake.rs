//! The snake: segment deque plus heading/direction state machine

use std::collections::VecDeque;

use super::grid::{Cell, Direction};
use crate::tuning::GameConfig;

/// Snake lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeState {
    /// Created, waiting for start
    Idle,
    /// Moving every step
    Alive,
    /// Ran into itself; terminal until replaced
    Dead,
}

/// Result of a step that actually ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved { head: Cell },
    Died { head: Cell },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Segments, head at the front
    body: VecDeque<Cell>,
    /// Requested direction, applied on the next step
    pub heading: Direction,
    /// Direction applied on the last step
    pub direction: Direction,
    pub state: SnakeState,
    /// Milliseconds per step
    pub speed: u32,
    /// Earliest time the next step may run (ms)
    pub move_time: u64,
    /// Time of the last speed ramp (ms)
    pub last_ramp_ms: u64,
    /// Tail cell dropped by the last step; growth lands here
    vacated: Cell,
}

impl Snake {
    /// A one-segment idle snake heading right
    pub fn new(start: Cell, speed: u32) -> Self {
        Self::from_segments([start], Direction::Right, speed)
    }

    /// Build from explicit segments (head first). Falls back to the origin if empty.
    pub fn from_segments(
        segments: impl IntoIterator<Item = Cell>,
        direction: Direction,
        speed: u32,
    ) -> Self {
        let mut body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            body.push_back(Cell::default());
        }
        let vacated = body.back().copied().unwrap_or_default();
        Self {
            body,
            heading: direction,
            direction,
            state: SnakeState::Idle,
            speed,
            move_time: 0,
            last_ramp_ms: 0,
            vacated,
        }
    }

    pub fn head(&self) -> Cell {
        self.body.front().copied().unwrap_or_default()
    }

    pub fn tail(&self) -> Cell {
        self.body.back().copied().unwrap_or_default()
    }

    pub fn segments(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Never true; a snake always has a head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_alive(&self) -> bool {
        self.state == SnakeState::Alive
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Tail cell most recently vacated by a step
    pub fn vacated(&self) -> Cell {
        self.vacated
    }

    /// Idle -> Alive. The first step may run immediately.
    pub fn start(&mut self, now_ms: u64) {
        if self.state == SnakeState::Idle {
            self.state = SnakeState::Alive;
            self.move_time = now_ms;
            self.last_ramp_ms = now_ms;
        }
    }

    /// Request a turn. Only quarter turns from the committed direction are accepted.
    pub fn face(&mut self, direction: Direction) -> bool {
        if self.direction.is_perpendicular(direction) {
            self.heading = direction;
            true
        } else {
            false
        }
    }

    pub fn face_left(&mut self) -> bool {
        self.face(Direction::Left)
    }

    pub fn face_right(&mut self) -> bool {
        self.face(Direction::Right)
    }

    pub fn face_up(&mut self) -> bool {
        self.face(Direction::Up)
    }

    pub fn face_down(&mut self) -> bool {
        self.face(Direction::Down)
    }

    /// Run one step if alive and the step timer has elapsed
    pub fn update(&mut self, now_ms: u64, config: &GameConfig) -> Option<StepOutcome> {
        if self.state != SnakeState::Alive || now_ms < self.move_time {
            return None;
        }
        self.ramp_speed(now_ms, config);
        Some(self.advance(now_ms, config.grid_width, config.grid_height))
    }

    /// Faster by one ramp step per interval of game time, floored
    fn ramp_speed(&mut self, now_ms: u64, config: &GameConfig) {
        if now_ms.saturating_sub(self.last_ramp_ms) >= config.speed_ramp_interval_ms {
            let previous = self.speed;
            self.speed = self
                .speed
                .saturating_sub(config.speed_ramp_step_ms)
                .max(config.min_speed_ms);
            self.last_ramp_ms = now_ms;
            if self.speed != previous {
                log::info!("Speed ramp: {}ms -> {}ms per step", previous, self.speed);
            }
        }
    }

    fn advance(&mut self, now_ms: u64, width: u32, height: u32) -> StepOutcome {
        let head = self.head().step(self.heading, width, height);
        self.direction = self.heading;

        self.body.push_front(head);
        if let Some(tail) = self.body.pop_back() {
            self.vacated = tail;
        }

        if self.body.iter().skip(1).any(|&segment| segment == head) {
            self.state = SnakeState::Dead;
            log::info!("Snake hit itself at ({}, {})", head.x, head.y);
            return StepOutcome::Died { head };
        }

        self.move_time = now_ms + u64::from(self.speed);
        StepOutcome::Moved { head }
    }

    /// Add one segment on the vacated tail cell
    pub fn grow(&mut self) {
        self.body.push_back(self.vacated);
    }

    /// Powerup slowdown, capped
    pub fn slow_down(&mut self, by_ms: u32, cap_ms: u32) {
        self.speed = self.speed.saturating_add(by_ms).min(cap_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, height: u32) -> GameConfig {
        GameConfig::with_grid(width, height)
    }

    fn alive(segments: &[(i32, i32)], direction: Direction) -> Snake {
        let mut snake = Snake::from_segments(
            segments.iter().copied().map(Cell::from),
            direction,
            100,
        );
        snake.start(0);
        snake
    }

    #[test]
    fn test_single_step_scenario() {
        let config = config(70, 30);
        let mut snake = Snake::new(Cell::new(8, 8), 100);
        snake.start(0);

        let outcome = snake.update(0, &config);

        assert_eq!(
            outcome,
            Some(StepOutcome::Moved {
                head: Cell::new(9, 8)
            })
        );
        assert_eq!(snake.head(), Cell::new(9, 8));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.move_time, 100);
        assert_eq!(snake.vacated(), Cell::new(8, 8));
    }

    #[test]
    fn test_idle_snake_does_not_move() {
        let mut snake = Snake::new(Cell::new(8, 8), 100);
        assert_eq!(snake.update(5_000, &config(40, 30)), None);
        assert_eq!(snake.head(), Cell::new(8, 8));
    }

    #[test]
    fn test_step_gated_by_move_time() {
        let config = config(40, 30);
        let mut snake = alive(&[(8, 8)], Direction::Right);
        assert!(snake.update(0, &config).is_some());
        assert_eq!(snake.update(99, &config), None);
        assert!(snake.update(100, &config).is_some());
        assert_eq!(snake.head(), Cell::new(10, 8));
    }

    #[test]
    fn test_wraps_right_edge() {
        let mut snake = alive(&[(69, 3)], Direction::Right);
        snake.update(0, &config(70, 30));
        assert_eq!(snake.head(), Cell::new(0, 3));
    }

    #[test]
    fn test_wraps_top_edge() {
        let mut snake = alive(&[(5, 0)], Direction::Up);
        snake.update(0, &config(40, 30));
        assert_eq!(snake.head(), Cell::new(5, 29));
    }

    #[test]
    fn test_turn_rejected_along_same_axis() {
        let mut snake = alive(&[(8, 8)], Direction::Right);
        assert!(!snake.face_left());
        assert!(!snake.face_right());
        assert_eq!(snake.heading, Direction::Right);

        assert!(snake.face_up());
        assert_eq!(snake.heading, Direction::Up);
    }

    #[test]
    fn test_turns_before_step_last_write_wins() {
        let mut snake = alive(&[(8, 8)], Direction::Right);
        snake.face_up();
        snake.face_down();
        // Still moving right, so left is refused even though heading is down
        snake.face_left();
        assert_eq!(snake.heading, Direction::Down);

        snake.update(0, &config(40, 30));
        assert_eq!(snake.direction, Direction::Down);
        assert_eq!(snake.head(), Cell::new(8, 9));
    }

    #[test]
    fn test_body_follows_head() {
        let mut snake = alive(&[(5, 5), (4, 5), (3, 5)], Direction::Right);
        snake.update(0, &config(40, 30));
        let cells: Vec<Cell> = snake.segments().iter().copied().collect();
        assert_eq!(cells, vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]);
        assert_eq!(snake.vacated(), Cell::new(3, 5));
    }

    #[test]
    fn test_grow_uses_vacated_tail() {
        let mut snake = alive(&[(5, 5), (4, 5)], Direction::Right);
        snake.update(0, &config(40, 30));
        snake.grow();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_stacked_growth_unfolds() {
        let config = config(40, 30);
        let mut snake = alive(&[(5, 5)], Direction::Right);
        snake.update(0, &config);
        snake.grow();
        snake.grow();
        snake.grow();
        assert_eq!(snake.len(), 4);

        for step in 1..=3 {
            let outcome = snake.update(step * 100, &config);
            assert!(matches!(outcome, Some(StepOutcome::Moved { .. })));
        }
        let cells: Vec<Cell> = snake.segments().iter().copied().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(9, 5),
                Cell::new(8, 5),
                Cell::new(7, 5),
                Cell::new(6, 5)
            ]
        );
    }

    #[test]
    fn test_self_collision_kills() {
        let config = config(40, 30);
        // Head at (5,5) with body wrapping round so that turning up re-enters (5,4)
        let mut snake = alive(
            &[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)],
            Direction::Left,
        );
        snake.face_up();
        let outcome = snake.update(0, &config);

        assert_eq!(
            outcome,
            Some(StepOutcome::Died {
                head: Cell::new(5, 4)
            })
        );
        assert_eq!(snake.state, SnakeState::Dead);
        assert_eq!(snake.update(10_000, &config), None);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_safe() {
        let config = config(40, 30);
        // 2x2 loop: the head chases the tail cell that is vacated this step
        let mut snake = alive(&[(5, 5), (6, 5), (6, 4), (5, 4)], Direction::Left);
        snake.face_up();
        let outcome = snake.update(0, &config);
        assert_eq!(
            outcome,
            Some(StepOutcome::Moved {
                head: Cell::new(5, 4)
            })
        );
        assert!(snake.is_alive());
    }

    #[test]
    fn test_single_segment_never_self_collides() {
        let config = config(1, 1);
        let mut snake = alive(&[(0, 0)], Direction::Right);
        for step in 0..10 {
            let outcome = snake.update(step * 100, &config);
            assert!(matches!(outcome, Some(StepOutcome::Moved { .. })));
        }
    }

    #[test]
    fn test_speed_ramp() {
        let config = config(40, 30);
        let mut snake = alive(&[(8, 8)], Direction::Right);

        snake.update(9_999, &config);
        assert_eq!(snake.speed, 100);
        assert_eq!(snake.move_time, 10_099);

        snake.update(10_099, &config);
        assert_eq!(snake.speed, 90);
        assert_eq!(snake.move_time, 10_189);
    }

    #[test]
    fn test_speed_ramp_fires_at_exact_interval() {
        let config = config(40, 30);
        let mut snake = alive(&[(8, 8)], Direction::Right);

        snake.update(0, &config);
        assert_eq!(snake.speed, 100);

        snake.update(10_000, &config);
        assert_eq!(snake.speed, 90);
        assert_eq!(snake.last_ramp_ms, 10_000);
        assert_eq!(snake.move_time, 10_090);
    }

    #[test]
    fn test_speed_ramp_floor() {
        let config = config(40, 30);
        let mut snake = alive(&[(8, 8)], Direction::Right);
        let mut now = 0;
        for _ in 0..50 {
            now += 10_000;
            snake.update(now, &config);
        }
        assert_eq!(snake.speed, 20);
    }

    #[test]
    fn test_slow_down_capped() {
        let mut snake = Snake::new(Cell::new(0, 0), 50);
        snake.slow_down(20, 100);
        assert_eq!(snake.speed, 70);
        snake.slow_down(20, 100);
        snake.slow_down(20, 100);
        assert_eq!(snake.speed, 100);
    }
}
