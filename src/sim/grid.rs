//! Grid cells, directions and occupancy
//!
//! The board is a torus: stepping off one edge re-enters on the opposite one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::wrap;

/// One discrete board position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in `direction`, wrapped onto a `width x height` board
    pub fn step(self, direction: Direction, width: u32, height: u32) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: wrap(self.x + dx, width),
            y: wrap(self.y + dy, height),
        }
    }

    /// Whether the cell lies on a `width x height` board
    pub fn in_bounds(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }

    /// Top-left pixel of the cell
    pub fn to_pixels(self, tile: f32) -> Vec2 {
        Vec2::new(self.x as f32 * tile, self.y as f32 * tile)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Cell delta, y grows downward
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when turning from `self` to `other` is a quarter turn
    pub fn is_perpendicular(self, other: Direction) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Free/occupied map of the board, indexed `[y][x]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    free: Vec<Vec<bool>>,
}

impl OccupancyGrid {
    /// Start all-free, then mark every given cell as taken
    pub fn build<'a>(width: u32, height: u32, occupied: impl IntoIterator<Item = &'a Cell>) -> Self {
        let mut free = vec![vec![true; width as usize]; height as usize];
        for cell in occupied {
            if cell.in_bounds(width, height) {
                free[cell.y as usize][cell.x as usize] = false;
            }
        }
        Self {
            width,
            height,
            free,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_free(&self, cell: Cell) -> bool {
        cell.in_bounds(self.width, self.height) && self.free[cell.y as usize][cell.x as usize]
    }

    /// All free cells in row-major order
    pub fn free_cells(&self) -> Vec<Cell> {
        self.free
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, free)| **free)
                    .map(move |(x, _)| Cell::new(x as i32, y as i32))
            })
            .collect()
    }
}
