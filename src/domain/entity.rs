/// Entities: Direction (snake), Actor / Platform / Pickup (chase).
/// All chase entities carry an explicit rectangle from construction.

use super::geometry::Rect;

/// Snake heading. Encoded as a unit delta via `delta()`.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// A moving rectangle: the player ("Jerry") or the pursuer ("Tom").
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Actor {
    pub body: Rect,
    pub vx: f32,
    pub vy: f32,
}

impl Actor {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Actor {
            body: Rect::new(x, y, width, height),
            vx: 0.0,
            vy: 0.0,
        }
    }

    pub fn with_velocity(mut self, vx: f32, vy: f32) -> Self {
        self.vx = vx;
        self.vy = vy;
        self
    }
}

/// Static collision geometry. Immutable for the session.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Platform {
    pub body: Rect,
}

impl Platform {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Platform { body: Rect::new(x, y, width, height) }
    }
}

/// Collectible. Cheese is consumed; the bonus is relocated instead.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Pickup {
    pub body: Rect,
}

impl Pickup {
    pub const fn at(x: f32, y: f32) -> Self {
        Pickup { body: Rect::pickup(x, y) }
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.body.x = x;
        self.body.y = y;
    }
}
