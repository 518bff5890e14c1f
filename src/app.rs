/// App: everything the presentation layer needs to draw a frame.
///
/// Two independent sessions (snake, chase) plus the active screen and a
/// transient status message. The sessions never share state.

use std::time::Duration;

use crate::config::GameConfig;
use crate::domain::random::SeededRandom;
use crate::sim::chase::ChaseWorld;
use crate::sim::event::{CrashCause, GameEvent};
use crate::sim::session::Session;
use crate::sim::snake::SnakeWorld;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Screen {
    Title,
    Snake,
    Chase,
}

pub struct App {
    pub screen: Screen,
    pub snake: Session<SnakeWorld>,
    pub chase: Session<ChaseWorld>,
    pub message: String,
    pub message_timer: u32,
}

impl App {
    pub fn new(config: &GameConfig) -> Self {
        let (snake_rng, chase_rng) = match config.seed {
            Some(seed) => (SeededRandom::new(seed), SeededRandom::new(seed.wrapping_add(1))),
            None => (SeededRandom::from_entropy(), SeededRandom::from_entropy()),
        };
        log::info!("rng seeds: snake={} chase={}", snake_rng.seed(), chase_rng.seed());

        let snake = Session::new(
            SnakeWorld::new(&config.snake, Box::new(snake_rng)),
            Duration::from_millis(config.snake.tick_rate_ms),
        );
        let chase = Session::new(
            ChaseWorld::new(&config.chase, Box::new(chase_rng)),
            Duration::from_millis(config.chase.frame_ms),
        );

        App {
            screen: Screen::Title,
            snake,
            chase,
            message: String::new(),
            message_timer: 0,
        }
    }

    /// `duration` counts frames; 0 keeps the message until replaced.
    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }

    pub fn clear_message(&mut self) {
        self.message.clear();
        self.message_timer = 0;
    }

    pub fn tick_message(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message.clear();
            }
        }
    }

    /// Turn step events into status messages.
    pub fn announce(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::FoodEaten { at } => {
                    self.set_message(&format!("+10  ♥ at ({}, {})", at.x, at.y), 20)
                }
                GameEvent::SnakeCrashed { cause: CrashCause::Wall } => {
                    self.set_message("Game Over! You hit the wall  [Enter] Play again", 0)
                }
                GameEvent::SnakeCrashed { cause: CrashCause::SelfBite } => {
                    self.set_message("Game Over! You bit yourself  [Enter] Play again", 0)
                }
                GameEvent::CheeseCollected { x, y } => {
                    self.set_message(&format!("Cheese at ({x:.0}, {y:.0})! +100"), 60)
                }
                GameEvent::BonusCollected { to: (x, y) } => {
                    self.set_message(&format!("Bonus! +500  Mickey moved to ({x:.0}, {y:.0})"), 90)
                }
                GameEvent::PlayerFell => self.set_message("Game Over! You fell  [Enter] Play again", 0),
                GameEvent::PlayerCaught => {
                    self.set_message("Game Over! Tom caught Jerry  [Enter] Play again", 0)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::GridPos;

    fn app() -> App {
        let mut config = GameConfig::default();
        config.seed = Some(5);
        App::new(&config)
    }

    #[test]
    fn sessions_start_idle_on_title() {
        let a = app();
        assert_eq!(a.screen, Screen::Title);
        assert!(!a.snake.is_running());
        assert!(!a.chase.is_running());
        assert_eq!(a.snake.driver().interval(), Duration::from_millis(150));
        assert_eq!(a.chase.driver().interval(), Duration::from_millis(16));
    }

    #[test]
    fn timed_message_expires() {
        let mut a = app();
        a.set_message("hi", 2);
        a.tick_message();
        assert_eq!(a.message, "hi");
        a.tick_message();
        assert!(a.message.is_empty());
    }

    #[test]
    fn pickup_messages_report_positions() {
        let mut a = app();
        a.announce(&[GameEvent::FoodEaten { at: GridPos::new(11, 10) }]);
        assert_eq!(a.message, "+10  ♥ at (11, 10)");
        a.announce(&[GameEvent::CheeseCollected { x: 300.0, y: 350.0 }]);
        assert_eq!(a.message, "Cheese at (300, 350)! +100");
        a.announce(&[GameEvent::BonusCollected { to: (123.6, 240.2) }]);
        assert_eq!(a.message, "Bonus! +500  Mickey moved to (124, 240)");
        assert_eq!(a.message_timer, 90);
    }

    #[test]
    fn game_over_message_persists() {
        let mut a = app();
        a.announce(&[GameEvent::PlayerCaught]);
        for _ in 0..500 {
            a.tick_message();
        }
        assert!(a.message.starts_with("Game Over!"));
    }
}
