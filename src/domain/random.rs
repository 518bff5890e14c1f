/// Pluggable randomness for food and bonus placement.
///
/// Simulations never call a global RNG; they own a `Box<dyn RandomSource>`.
/// The real game uses `SeededRandom`, tests use `ScriptedSource`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::geometry::{GridPos, Rect};

pub trait RandomSource {
    /// Uniform cell in `[0, grid_size)` on both axes.
    fn cell(&mut self, grid_size: i32) -> GridPos;

    /// Uniform point in `[x, x+width) × [y, y+height)` of `region`.
    fn point_in(&mut self, region: Rect) -> (f32, f32);
}

pub struct SeededRandom {
    rng: StdRng,
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn cell(&mut self, grid_size: i32) -> GridPos {
        if grid_size <= 0 {
            return GridPos::default();
        }
        GridPos::new(
            self.rng.random_range(0..grid_size),
            self.rng.random_range(0..grid_size),
        )
    }

    fn point_in(&mut self, region: Rect) -> (f32, f32) {
        let x = half_open(&mut self.rng, region.x, region.right());
        let y = half_open(&mut self.rng, region.y, region.bottom());
        (x, y)
    }
}

/// Uniform in `[low, high)`; a degenerate range yields `low`.
/// Draws that round onto `high` in f32 are redrawn.
fn half_open(rng: &mut StdRng, low: f32, high: f32) -> f32 {
    if high <= low {
        return low;
    }
    let (lo, span) = (low as f64, high as f64 - low as f64);
    loop {
        let v = (lo + rng.random::<f64>() * span) as f32;
        if v < high {
            return v;
        }
    }
}

/// Replays fixed cells and points in order, then repeats the last one.
/// Falls back to the origin / region corner when nothing was scripted.
#[cfg(test)]
pub struct ScriptedSource {
    cells: Vec<GridPos>,
    points: Vec<(f32, f32)>,
    next_cell: usize,
    next_point: usize,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new(cells: Vec<GridPos>, points: Vec<(f32, f32)>) -> Self {
        ScriptedSource { cells, points, next_cell: 0, next_point: 0 }
    }

    pub fn cells(cells: Vec<GridPos>) -> Self {
        Self::new(cells, vec![])
    }

    pub fn points(points: Vec<(f32, f32)>) -> Self {
        Self::new(vec![], points)
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn cell(&mut self, _grid_size: i32) -> GridPos {
        let idx = self.next_cell.min(self.cells.len().saturating_sub(1));
        self.next_cell += 1;
        self.cells.get(idx).copied().unwrap_or_default()
    }

    fn point_in(&mut self, region: Rect) -> (f32, f32) {
        let idx = self.next_point.min(self.points.len().saturating_sub(1));
        self.next_point += 1;
        self.points.get(idx).copied().unwrap_or((region.x, region.y))
    }
}
