/// Snake simulation: discrete fixed-tick state machine.
///
/// Tick order:
///   1. Apply the pending direction (if any)
///   2. Compute the new head
///   3. Wall check   → crash, move discarded
///   4. Body check   → crash, move discarded
///   5. Prepend the head
///   6. Food check   → +10 and new food (grow), else drop the tail
///
/// Direction changes are validated against the heading used by the last
/// tick, so two quick turns between ticks cannot fold the snake back
/// onto itself. Food may land on the body; it is not re-rolled.

use std::collections::VecDeque;

use crate::config::SnakeConfig;
use crate::domain::entity::Direction;
use crate::domain::geometry::{self, GridPos};
use crate::domain::random::RandomSource;
use super::event::{CrashCause, GameEvent};
use super::session::Simulation;

pub const FOOD_SCORE: u32 = 10;

pub struct SnakeWorld {
    pub grid_size: i32,
    /// Head at index 0. Never empty.
    pub body: VecDeque<GridPos>,
    pub food: GridPos,
    /// Heading applied by the most recent tick. `None` until first start.
    pub direction: Option<Direction>,
    /// Latest accepted request, applied on the next tick.
    pub pending: Option<Direction>,
    pub score: u32,
    rng: Box<dyn RandomSource>,
}

impl SnakeWorld {
    pub fn new(config: &SnakeConfig, rng: Box<dyn RandomSource>) -> Self {
        let mut world = SnakeWorld {
            grid_size: config.grid_size,
            body: VecDeque::new(),
            food: GridPos::default(),
            direction: None,
            pending: None,
            score: 0,
            rng,
        };
        world.reset();
        world
    }

    /// Starting cell: board centre ((10,10) on a 20×20 board).
    pub fn origin(&self) -> GridPos {
        GridPos::new(self.grid_size / 2, self.grid_size / 2)
    }

    /// Fixed first food cell ((15,15) on a 20×20 board).
    pub fn initial_food(&self) -> GridPos {
        let c = (self.grid_size * 3 / 4).min(self.grid_size - 1);
        GridPos::new(c, c)
    }

    pub fn head(&self) -> GridPos {
        self.body.front().copied().unwrap_or_else(|| self.origin())
    }

    /// Request a turn. Rejects the exact reversal of the current heading.
    /// Returns whether the request was accepted.
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if let Some(current) = self.direction {
            if dir.is_opposite(current) {
                return false;
            }
        }
        self.pending = Some(dir);
        true
    }

    pub fn tick(&mut self) -> Vec<GameEvent> {
        if let Some(dir) = self.pending.take() {
            self.direction = Some(dir);
        }
        // Stationary until a heading exists.
        let dir = match self.direction {
            Some(d) => d,
            None => return vec![],
        };

        let head = self.head().offset(dir);

        if !head.in_bounds(self.grid_size) {
            return vec![GameEvent::SnakeCrashed { cause: CrashCause::Wall }];
        }
        if self.body.contains(&head) {
            return vec![GameEvent::SnakeCrashed { cause: CrashCause::SelfBite }];
        }

        self.body.push_front(head);

        if head == self.food {
            self.score += FOOD_SCORE;
            self.food = geometry::random_cell(self.rng.as_mut(), self.grid_size);
            vec![GameEvent::FoodEaten { at: head }]
        } else {
            self.body.pop_back();
            vec![]
        }
    }
}

impl Simulation for SnakeWorld {
    type Input = Direction;

    fn reset(&mut self) {
        self.body.clear();
        self.body.push_back(self.origin());
        self.food = self.initial_food();
        self.direction = None;
        self.pending = None;
        self.score = 0;
    }

    /// A fresh snake starts heading right; a resumed one keeps its heading.
    fn prepare_run(&mut self) {
        if self.direction.is_none() && self.pending.is_none() {
            self.direction = Some(Direction::Right);
        }
    }

    fn apply_input(&mut self, input: Direction) {
        self.set_direction(input);
    }

    fn step(&mut self) -> Vec<GameEvent> {
        self.tick()
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    use crate::domain::random::{ScriptedSource, SeededRandom};
    use crate::sim::session::Session;
    use proptest::prelude::*;

    fn world_with(cells: Vec<GridPos>) -> SnakeWorld {
        SnakeWorld::new(&SnakeConfig::default(), Box::new(ScriptedSource::cells(cells)))
    }

    fn body(cells: &[(i32, i32)]) -> VecDeque<GridPos> {
        cells.iter().map(|&(x, y)| GridPos::new(x, y)).collect()
    }

    #[test]
    fn initial_layout() {
        let w = world_with(vec![]);
        assert_eq!(w.body, body(&[(10, 10)]));
        assert_eq!(w.food, GridPos::new(15, 15));
        assert_eq!(w.direction, None);
        assert_eq!(w.score, 0);
    }

    #[test]
    fn eating_grows_and_scores() {
        let mut w = world_with(vec![GridPos::new(3, 3)]);
        w.prepare_run();
        w.food = GridPos::new(11, 10);
        let events = w.tick();
        assert_eq!(w.body, body(&[(11, 10), (10, 10)]));
        assert_eq!(w.score, 10);
        assert_eq!(w.food, GridPos::new(3, 3));
        assert_eq!(events, vec![GameEvent::FoodEaten { at: GridPos::new(11, 10) }]);
    }

    #[test]
    fn plain_move_keeps_length() {
        let mut w = world_with(vec![]);
        w.body = body(&[(5, 5), (4, 5), (3, 5)]);
        w.direction = Some(Direction::Right);
        assert!(w.tick().is_empty());
        assert_eq!(w.body, body(&[(6, 5), (5, 5), (4, 5)]));
    }

    #[test]
    fn wall_crash_discards_move() {
        let mut w = world_with(vec![]);
        w.body = body(&[(0, 5)]);
        w.direction = Some(Direction::Left);
        let events = w.tick();
        assert_eq!(events, vec![GameEvent::SnakeCrashed { cause: CrashCause::Wall }]);
        assert_eq!(w.body, body(&[(0, 5)]));
    }

    #[test]
    fn self_bite_discards_move() {
        let mut w = world_with(vec![]);
        // Head at (5,5) heading up into (5,4), which is part of the body.
        w.body = body(&[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)]);
        w.direction = Some(Direction::Up);
        let before = w.body.clone();
        let events = w.tick();
        assert_eq!(events, vec![GameEvent::SnakeCrashed { cause: CrashCause::SelfBite }]);
        assert_eq!(w.body, before);
    }

    #[test]
    fn reversal_is_rejected() {
        let mut w = world_with(vec![]);
        w.direction = Some(Direction::Right);
        assert!(!w.set_direction(Direction::Left));
        assert_eq!(w.pending, None);
        assert!(w.set_direction(Direction::Up));
        assert_eq!(w.pending, Some(Direction::Up));
    }

    #[test]
    fn quick_double_turn_is_checked_against_last_heading() {
        let mut w = world_with(vec![]);
        w.body = body(&[(5, 5), (4, 5)]);
        w.direction = Some(Direction::Right);
        assert!(w.set_direction(Direction::Up));
        // Still heading right until the next tick: Left is a reversal.
        assert!(!w.set_direction(Direction::Left));
        w.tick();
        assert_eq!(w.head(), GridPos::new(5, 4));
    }

    #[test]
    fn last_accepted_input_wins() {
        let mut w = world_with(vec![]);
        w.direction = Some(Direction::Right);
        w.set_direction(Direction::Up);
        w.set_direction(Direction::Down);
        w.tick();
        assert_eq!(w.direction, Some(Direction::Down));
        assert_eq!(w.head(), GridPos::new(10, 11));
    }

    #[test]
    fn any_turn_allowed_before_first_heading() {
        let mut w = world_with(vec![]);
        assert!(w.set_direction(Direction::Left));
    }

    #[test]
    fn stationary_without_heading() {
        let mut w = world_with(vec![]);
        assert!(w.tick().is_empty());
        assert_eq!(w.body, body(&[(10, 10)]));
    }

    #[test]
    fn food_may_land_on_body() {
        let mut w = world_with(vec![GridPos::new(10, 10)]);
        w.prepare_run();
        w.food = GridPos::new(11, 10);
        w.tick();
        // New food is the old head cell, still occupied by the body.
        assert_eq!(w.food, GridPos::new(10, 10));
        assert!(w.body.contains(&w.food));
    }

    // ── Through the session controller ──

    fn session() -> Session<SnakeWorld> {
        Session::new(world_with(vec![GridPos::new(0, 0)]), Duration::from_millis(150))
    }

    #[test]
    fn scenario_start_eat_one() {
        let mut s = session();
        s.start(Instant::now());
        s.world_mut().food = GridPos::new(11, 10);
        s.tick();
        assert_eq!(s.world().body, body(&[(11, 10), (10, 10)]));
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn scenario_wall_crash_ends_session() {
        let mut s = session();
        s.start(Instant::now());
        s.world_mut().body = body(&[(0, 5)]);
        s.world_mut().direction = Some(Direction::Left);
        s.tick();
        assert!(s.is_over());
        assert!(!s.is_running());
        assert_eq!(s.world().body, body(&[(0, 5)]));
    }

    #[test]
    fn input_ignored_unless_running() {
        let mut s = session();
        s.handle_input(Direction::Down);
        assert_eq!(s.world().pending, None);
    }

    #[test]
    fn resume_keeps_heading_and_score() {
        let mut s = session();
        let t0 = Instant::now();
        s.start(t0);
        s.handle_input(Direction::Down);
        s.tick();
        let next = s.world().head().offset(Direction::Down);
        s.world_mut().food = next;
        s.tick();
        assert_eq!(s.score(), 10);
        s.pause();
        s.start(t0);
        assert_eq!(s.world().direction, Some(Direction::Down));
        assert_eq!(s.score(), 10);
    }

    #[test]
    fn reset_restores_initial_layout() {
        let mut s = session();
        s.start(Instant::now());
        s.world_mut().food = GridPos::new(11, 10);
        s.tick();
        s.tick();
        s.reset();
        s.reset();
        assert_eq!(s.world().body, body(&[(10, 10)]));
        assert_eq!(s.world().food, GridPos::new(15, 15));
        assert_eq!(s.world().direction, None);
        assert_eq!(s.score(), 0);
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        /// Length grows by one exactly on food, otherwise stays; a crash
        /// leaves the body untouched.
        #[test]
        fn prop_growth_rule(seed in any::<u64>(), moves in prop::collection::vec(direction(), 1..200)) {
            let mut w = SnakeWorld::new(&SnakeConfig::default(), Box::new(SeededRandom::new(seed)));
            w.prepare_run();
            for dir in moves {
                w.set_direction(dir);
                let before = w.body.clone();
                let score_before = w.score;
                let events = w.tick();
                if events.iter().any(GameEvent::ends_session) {
                    prop_assert_eq!(&w.body, &before);
                    break;
                }
                let ate = events.iter().any(|e| matches!(e, GameEvent::FoodEaten { .. }));
                if ate {
                    prop_assert_eq!(w.body.len(), before.len() + 1);
                    prop_assert_eq!(w.score, score_before + FOOD_SCORE);
                } else {
                    prop_assert_eq!(w.body.len(), before.len());
                    prop_assert_eq!(w.score, score_before);
                }
                prop_assert!(w.head().in_bounds(w.grid_size));
            }
        }

        #[test]
        fn prop_reversal_never_accepted(first in direction(), second in direction()) {
            let mut w = SnakeWorld::new(&SnakeConfig::default(), Box::new(SeededRandom::new(1)));
            w.direction = Some(first);
            let accepted = w.set_direction(second);
            prop_assert_eq!(accepted, !second.is_opposite(first));
        }
    }
}
