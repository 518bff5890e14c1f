/// Session controller: the start / pause / reset / game-over state machine
/// layered over a simulation.
///
/// ## States
///
/// ```text
///   Idle ──start──▶ Running ──pause──▶ Paused ──start──▶ Running
///                      │
///                      └─ terminal event ─▶ Over ──start──▶ (reset) Running
///   any ──reset──▶ Idle
/// ```
///
/// The simulation itself is a pure state-transition function; the session
/// decides when it may run and owns the `Driver` that schedules it.
/// Inputs are forwarded only while running.

use std::time::{Duration, Instant};

use super::driver::Driver;
use super::event::GameEvent;

/// A steppable game world.
pub trait Simulation {
    type Input: Copy;

    /// Restore initial entities and zero score.
    fn reset(&mut self);

    /// Called on every transition into running, after any reset.
    fn prepare_run(&mut self) {}

    fn apply_input(&mut self, input: Self::Input);

    /// Advance by one tick / frame.
    fn step(&mut self) -> Vec<GameEvent>;

    fn score(&self) -> u32;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Over,
}

pub struct Session<S: Simulation> {
    sim: S,
    phase: Phase,
    driver: Driver,
}

impl<S: Simulation> Session<S> {
    pub fn new(sim: S, interval: Duration) -> Self {
        Session { sim, phase: Phase::Idle, driver: Driver::new(interval) }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn score(&self) -> u32 {
        self.sim.score()
    }

    pub fn world(&self) -> &S {
        &self.sim
    }

    #[cfg(test)]
    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    /// Begin or resume. From `Over` the world is reset first.
    /// No-op while already running.
    pub fn start(&mut self, now: Instant) {
        match self.phase {
            Phase::Running => return,
            Phase::Over => {
                log::debug!("start after game over: resetting");
                self.sim.reset();
            }
            Phase::Idle | Phase::Paused => {}
        }
        self.sim.prepare_run();
        self.phase = Phase::Running;
        self.driver.attach(now);
        log::debug!("session running");
    }

    /// Only valid from `Running`; ignored otherwise.
    pub fn pause(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.phase = Phase::Paused;
        self.driver.detach();
        log::debug!("session paused at score {}", self.sim.score());
    }

    /// Back to initial entities, zero score, not running. Valid from any state.
    pub fn reset(&mut self) {
        self.sim.reset();
        self.phase = Phase::Idle;
        self.driver.detach();
        log::debug!("session reset");
    }

    /// The Start/Pause button: pause while running, start otherwise.
    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.pause();
        } else {
            self.start(now);
        }
    }

    /// Forward input to the simulation. Dropped unless running.
    pub fn handle_input(&mut self, input: S::Input) {
        if self.is_running() {
            self.sim.apply_input(input);
        }
    }

    /// Run exactly one step if running. A terminal event moves to `Over`
    /// and detaches the driver.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if !self.is_running() {
            return vec![];
        }
        let events = self.sim.step();
        if events.iter().any(GameEvent::ends_session) {
            self.phase = Phase::Over;
            self.driver.detach();
            log::info!("game over with score {}", self.sim.score());
        }
        events
    }

    /// Step once if the driver says a step is due.
    /// `None` when no step was due.
    pub fn advance(&mut self, now: Instant) -> Option<Vec<GameEvent>> {
        if self.driver.fire(now) {
            Some(self.tick())
        } else {
            None
        }
    }
}
