/// Key bindings and the key → intent mapping for both games.
///
/// Only edges matter: a snake turn or a jump is one press, and the chase
/// game also needs left/right releases to stop running.

use crossterm::event::KeyCode;

use crate::domain::entity::Direction;
use crate::sim::chase::{ChaseInput, ChaseKey};
use super::input::InputState;

// ── Key Constants ──

pub const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
pub const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
pub const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
pub const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
pub const KEYS_JUMP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W'), KeyCode::Char(' ')];
pub const KEYS_TOGGLE: &[KeyCode] = &[KeyCode::Enter];
pub const KEYS_RESET: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
pub const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];

/// Direction requests pressed this frame, in a fixed order. The snake
/// keeps the last accepted one.
pub fn snake_turns(kb: &InputState) -> Vec<Direction> {
    [
        (KEYS_UP, Direction::Up),
        (KEYS_DOWN, Direction::Down),
        (KEYS_LEFT, Direction::Left),
        (KEYS_RIGHT, Direction::Right),
    ]
    .into_iter()
    .filter(|(keys, _)| kb.any_pressed(keys))
    .map(|(_, dir)| dir)
    .collect()
}

/// Chase key edges for this frame. Releases come first, so a release and
/// a press in one frame leave the newly pressed key in effect.
pub fn chase_inputs(kb: &InputState) -> Vec<ChaseInput> {
    let mut inputs = Vec::with_capacity(4);
    if kb.any_released(KEYS_LEFT) {
        inputs.push(ChaseInput::Release(ChaseKey::Left));
    }
    if kb.any_released(KEYS_RIGHT) {
        inputs.push(ChaseInput::Release(ChaseKey::Right));
    }
    if kb.any_pressed(KEYS_LEFT) {
        inputs.push(ChaseInput::Press(ChaseKey::Left));
    }
    if kb.any_pressed(KEYS_RIGHT) {
        inputs.push(ChaseInput::Press(ChaseKey::Right));
    }
    if kb.any_pressed(KEYS_JUMP) {
        inputs.push(ChaseInput::Press(ChaseKey::Jump));
    }
    inputs
}
