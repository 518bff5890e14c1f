/// Events emitted during a simulation step.
/// The presentation layer consumes these for messages and effects;
/// the session controller uses `ends_session()` to enter game over.

use crate::domain::geometry::GridPos;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CrashCause {
    Wall,
    SelfBite,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    // ── Snake ──
    FoodEaten { at: GridPos },
    SnakeCrashed { cause: CrashCause },

    // ── Chase ──
    CheeseCollected { x: f32, y: f32 },
    BonusCollected { to: (f32, f32) },
    PlayerFell,
    PlayerCaught,
}

impl GameEvent {
    /// Does this event end the running session?
    pub fn ends_session(&self) -> bool {
        matches!(
            self,
            GameEvent::SnakeCrashed { .. } | GameEvent::PlayerFell | GameEvent::PlayerCaught
        )
    }
}
