//! Shape generation for 2D primitives
//!
//! All shapes are in board pixels: origin top-left, y down, one cell is
//! `tile x tile`.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{Cell, CollectibleKind, GameState, SnakeState};

/// Axis-aligned rectangle as two triangles
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Filled cell, shrunk by `inset` pixels on every side
pub fn cell_quad(cell: Cell, tile: f32, inset: f32, color: [f32; 4]) -> Vec<Vertex> {
    let origin = cell.to_pixels(tile);
    rect(
        origin + Vec2::splat(inset),
        origin + Vec2::splat(tile - inset),
        color,
    )
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Diamond (square rotated 45 degrees)
pub fn diamond(center: Vec2, half: f32, color: [f32; 4]) -> Vec<Vertex> {
    let top = center - Vec2::Y * half;
    let bottom = center + Vec2::Y * half;
    let left = center - Vec2::X * half;
    let right = center + Vec2::X * half;
    vec![
        Vertex::new(top.x, top.y, color),
        Vertex::new(right.x, right.y, color),
        Vertex::new(left.x, left.y, color),
        Vertex::new(left.x, left.y, color),
        Vertex::new(right.x, right.y, color),
        Vertex::new(bottom.x, bottom.y, color),
    ]
}

/// Star with `points` spikes
pub fn star(center: Vec2, outer: f32, inner: f32, points: u32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((points * 6) as usize);
    let step = PI / points as f32;
    // First spike points up
    let start = -PI / 2.0;

    for i in 0..points * 2 {
        let theta1 = start + i as f32 * step;
        let theta2 = start + (i + 1) as f32 * step;
        let (r1, r2) = if i % 2 == 0 { (outer, inner) } else { (inner, outer) };

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + r1 * theta1.cos(),
            center.y + r1 * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + r2 * theta2.cos(),
            center.y + r2 * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Pickup sprite for one cell
pub fn collectible(kind: CollectibleKind, cell: Cell, tile: f32) -> Vec<Vertex> {
    let center = cell.to_pixels(tile) + Vec2::splat(tile / 2.0);
    match kind {
        CollectibleKind::Food => {
            let mut v = circle(center, tile * 0.4, colors::FOOD, 16);
            v.extend(circle(
                center - Vec2::new(-tile * 0.15, tile * 0.35),
                tile * 0.12,
                colors::FOOD_LEAF,
                8,
            ));
            v
        }
        CollectibleKind::Poison => diamond(center, tile * 0.45, colors::POISON),
        CollectibleKind::Powerup => {
            let mut v = star(center, tile * 0.5, tile * 0.22, 5, colors::POWERUP);
            v.extend(circle(center, tile * 0.12, colors::POWERUP_CORE, 8));
            v
        }
    }
}

/// Full frame: board outline, pickups, then the snake on top (head last)
pub fn scene(state: &GameState, tile: f32) -> Vec<Vertex> {
    let width = state.config.grid_width as f32 * tile;
    let height = state.config.grid_height as f32 * tile;
    let mut vertices = board_outline(width, height, 2.0);

    for item in state.collectibles() {
        vertices.extend(collectible(item.kind, item.cell, tile));
    }

    let (head_color, body_color) = match state.snake.state {
        SnakeState::Dead => (colors::SNAKE_DEAD, colors::SNAKE_DEAD),
        _ => (colors::SNAKE_HEAD, colors::SNAKE_BODY),
    };
    for &segment in state.snake.segments().iter().skip(1).rev() {
        vertices.extend(cell_quad(segment, tile, 1.0, body_color));
    }
    vertices.extend(cell_quad(state.snake.head(), tile, 0.0, head_color));

    vertices
}

/// Thin frame around the board
fn board_outline(width: f32, height: f32, thickness: f32) -> Vec<Vertex> {
    let c = colors::BOARD_EDGE;
    let t = thickness;
    let mut v = rect(Vec2::new(-t, -t), Vec2::new(width + t, 0.0), c);
    v.extend(rect(Vec2::new(-t, height), Vec2::new(width + t, height + t), c));
    v.extend(rect(Vec2::new(-t, 0.0), Vec2::new(0.0, height), c));
    v.extend(rect(Vec2::new(width, 0.0), Vec2::new(width + t, height), c));
    v
}
