/// Chase simulation: continuous-time platformer, one update per frame.
///
/// Update order:
///   1. Player physics (gravity → move → platform landing → x clamp)
///   2. Fall-out check          → game over
///   3. Pursuer AI (steer → move → x clamp)
///   4. Capture check           → game over
///   5. Cheese pickup           → removed, +100 each
///   6. Bonus pickup            → relocated, +500
///
/// Steps 3–6 see the player's position after step 1. There is no win
/// condition: collecting every cheese simply leaves the set empty.

use crate::config::ChaseConfig;
use crate::domain::ai;
use crate::domain::entity::{Actor, Pickup, Platform};
use crate::domain::geometry::Rect;
use crate::domain::physics;
use crate::domain::random::RandomSource;
use super::event::GameEvent;
use super::session::Simulation;

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 400.0;

pub const CHEESE_SCORE: u32 = 100;
pub const BONUS_SCORE: u32 = 500;

/// Where the bonus may reappear after being collected.
pub const BONUS_REGION: Rect = Rect::new(0.0, 100.0, 700.0, 200.0);

// ── Initial layout ──

const PLAYER_START: Rect = Rect::new(50.0, 300.0, 30.0, 30.0);
const PURSUER_START: Rect = Rect::new(200.0, 300.0, 40.0, 40.0);
const PURSUER_START_VX: f32 = 1.0;
const CHEESE_START: [(f32, f32); 3] = [(150.0, 280.0), (400.0, 200.0), (300.0, 350.0)];
const BONUS_START: (f32, f32) = (500.0, 150.0);

pub fn default_platforms() -> Vec<Platform> {
    vec![
        Platform::new(0.0, 380.0, 800.0, 20.0),
        Platform::new(150.0, 300.0, 100.0, 20.0),
        Platform::new(350.0, 220.0, 100.0, 20.0),
        Platform::new(500.0, 170.0, 100.0, 20.0),
    ]
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChaseKey {
    Left,
    Right,
    Jump,
}

/// Key edges forwarded by the presentation layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ChaseInput {
    Press(ChaseKey),
    Release(ChaseKey),
}

pub struct ChaseWorld {
    pub field_width: f32,
    pub field_height: f32,
    pub player: Actor,
    pub pursuer: Actor,
    pub platforms: Vec<Platform>,
    pub cheese: Vec<Pickup>,
    pub bonus: Pickup,
    pub score: u32,
    tuning: ChaseConfig,
    rng: Box<dyn RandomSource>,
}

impl ChaseWorld {
    pub fn new(tuning: &ChaseConfig, rng: Box<dyn RandomSource>) -> Self {
        let mut world = ChaseWorld {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            player: Actor::new(0.0, 0.0, 0.0, 0.0),
            pursuer: Actor::new(0.0, 0.0, 0.0, 0.0),
            platforms: default_platforms(),
            cheese: vec![],
            bonus: Pickup::at(0.0, 0.0),
            score: 0,
            tuning: tuning.clone(),
            rng,
        };
        world.reset();
        world
    }

    pub fn update(&mut self) -> Vec<GameEvent> {
        let mut events = Vec::new();

        self.move_player();
        if self.player.body.y > self.field_height {
            events.push(GameEvent::PlayerFell);
            return events;
        }

        ai::pursue(
            &mut self.pursuer,
            self.player.body.x,
            self.tuning.pursuer_speed,
            self.field_width,
        );
        if self.pursuer.body.overlaps(&self.player.body) {
            events.push(GameEvent::PlayerCaught);
            return events;
        }

        self.collect_cheese(&mut events);
        self.collect_bonus(&mut events);
        events
    }

    fn move_player(&mut self) {
        physics::apply_gravity(&mut self.player, self.tuning.gravity);
        physics::integrate(&mut self.player);
        physics::land_on_platforms(&mut self.player, &self.platforms);
        physics::clamp_x(&mut self.player, self.field_width);
    }

    fn collect_cheese(&mut self, events: &mut Vec<GameEvent>) {
        let player = self.player.body;
        let before = self.cheese.len();
        self.cheese.retain(|c| {
            if c.body.overlaps(&player) {
                events.push(GameEvent::CheeseCollected { x: c.body.x, y: c.body.y });
                false
            } else {
                true
            }
        });
        let collected = (before - self.cheese.len()) as u32;
        self.score += collected * CHEESE_SCORE;
    }

    fn collect_bonus(&mut self, events: &mut Vec<GameEvent>) {
        if !self.bonus.body.overlaps(&self.player.body) {
            return;
        }
        self.score += BONUS_SCORE;
        let (x, y) = self.rng.point_in(BONUS_REGION);
        self.bonus.move_to(x, y);
        events.push(GameEvent::BonusCollected { to: (x, y) });
    }
}

impl Simulation for ChaseWorld {
    type Input = ChaseInput;

    fn reset(&mut self) {
        let p = PLAYER_START;
        self.player = Actor::new(p.x, p.y, p.width, p.height);
        let t = PURSUER_START;
        self.pursuer = Actor::new(t.x, t.y, t.width, t.height).with_velocity(PURSUER_START_VX, 0.0);
        self.cheese = CHEESE_START.iter().map(|&(x, y)| Pickup::at(x, y)).collect();
        self.bonus = Pickup::at(BONUS_START.0, BONUS_START.1);
        self.score = 0;
    }

    fn apply_input(&mut self, input: ChaseInput) {
        match input {
            ChaseInput::Press(ChaseKey::Left) => self.player.vx = -self.tuning.run_speed,
            ChaseInput::Press(ChaseKey::Right) => self.player.vx = self.tuning.run_speed,
            ChaseInput::Press(ChaseKey::Jump) => {
                physics::try_jump(&mut self.player, self.tuning.jump_impulse);
            }
            ChaseInput::Release(ChaseKey::Left) | ChaseInput::Release(ChaseKey::Right) => {
                self.player.vx = 0.0;
            }
            ChaseInput::Release(ChaseKey::Jump) => {}
        }
    }

    fn step(&mut self) -> Vec<GameEvent> {
        self.update()
    }

    fn score(&self) -> u32 {
        self.score
    }
}
