/// Geometry primitives shared by both games.
///
///   - `GridPos`: integer cell on the snake board. Equality is exact.
///   - `Rect`:    axis-aligned rectangle in chase-field units.
///
/// All collision in the chase game goes through `Rect::overlaps`.
/// Entities carry an explicit size from construction, so there is no
/// "missing width/height" case to special-case here.

use super::entity::Direction;
use super::random::RandomSource;

/// Default edge length of pickups (cheese, bonus).
pub const PICKUP_SIZE: f32 = 20.0;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        GridPos { x, y }
    }

    /// The neighbouring cell one step in `dir`. May leave the board.
    pub fn offset(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        GridPos { x: self.x + dx, y: self.y + dy }
    }

    /// Inside `[0, grid_size)` on both axes?
    pub fn in_bounds(self, grid_size: i32) -> bool {
        self.x >= 0 && self.x < grid_size && self.y >= 0 && self.y < grid_size
    }
}

#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    /// A pickup-sized square with its top-left corner at (x, y).
    pub const fn pickup(x: f32, y: f32) -> Self {
        Rect::new(x, y, PICKUP_SIZE, PICKUP_SIZE)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict AABB overlap. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Uniform random cell on a `grid_size` × `grid_size` board.
/// Occupied cells are not excluded.
pub fn random_cell(source: &mut dyn RandomSource, grid_size: i32) -> GridPos {
    source.cell(grid_size)
}
