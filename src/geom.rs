use macroquad::prelude::*;

/// Strict overlap: rectangles that only share an edge do not collide.
///
/// `Rect::overlaps` from macroquad treats touching edges as overlapping, which
/// would stop the player sliding along a wall it is flush against.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

/// Unit step for one cardinal direction, scaled by `amount`.
#[inline]
pub fn axis_delta(dir: Direction, amount: f32) -> Vec2 {
    match dir {
        Direction::Right => vec2(amount, 0.0),
        Direction::Left => vec2(-amount, 0.0),
        Direction::Up => vec2(0.0, -amount),
        Direction::Down => vec2(0.0, amount),
    }
}

/// Cardinal movement directions, in the order they are resolved each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// +x
    Right,
    /// -x
    Left,
    /// -y
    Up,
    /// +y
    Down,
}

impl Direction {
    /// Resolution order within a frame.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// True for Left/Right.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }
}
