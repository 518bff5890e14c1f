/// Keyboard state tracker.
///
/// Turns the terminal's key event stream into three views per frame:
///   - `fresh_presses`: keys that went from up → down (edge)
///   - `releases`:      keys that went from down → up (edge)
///   - held keys       (internal; feeds release detection)
///
/// Release events are honored when the terminal supports keyboard
/// enhancement. Otherwise every `Press` event counts as a press (a plain
/// terminal never tells us the key went up in between), and a key counts
/// as released once no Press/Repeat arrived for `HOLD_TIMEOUT`.

use std::collections::HashMap;
use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Longer than the usual autorepeat start delay, so a held key does not
/// flicker up between its first press and the first repeat.
const HOLD_TIMEOUT: Duration = Duration::from_millis(550);

pub struct InputState {
    /// Timestamp of last Press/Repeat event for each held key.
    last_active: HashMap<KeyCode, Instant>,
    fresh_presses: Vec<KeyCode>,
    releases: Vec<KeyCode>,
    raw_events: Vec<KeyEvent>,
    /// Only true when keyboard enhancement is confirmed working.
    pub honor_release: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            last_active: HashMap::with_capacity(16),
            fresh_presses: Vec::with_capacity(8),
            releases: Vec::with_capacity(8),
            raw_events: Vec::with_capacity(8),
            honor_release: false,
        }
    }

    /// Drain all pending terminal events without blocking.
    /// Call once per frame, before any simulation step.
    pub fn drain_events(&mut self) -> io::Result<()> {
        self.begin_frame();
        while poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.record(key, Instant::now());
            }
        }
        self.expire(Instant::now());
        Ok(())
    }

    #[cfg(test)]
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.last_active.contains_key(&code)
    }

    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.fresh_presses.contains(c))
    }

    pub fn any_released(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.releases.contains(c))
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.raw_events.iter().any(|k| {
            k.modifiers.contains(KeyModifiers::CONTROL)
                && (k.code == KeyCode::Char('c') || k.code == KeyCode::Char('C'))
        })
    }

    // ── Internal ──

    pub(crate) fn begin_frame(&mut self) {
        self.fresh_presses.clear();
        self.releases.clear();
        self.raw_events.clear();
    }

    pub(crate) fn record(&mut self, key: KeyEvent, now: Instant) {
        self.raw_events.push(key);
        match key.kind {
            KeyEventKind::Release if self.honor_release => {
                if self.last_active.remove(&key.code).is_some() {
                    self.releases.push(key.code);
                }
            }
            // Unreliable without enhancement; timeout handles it.
            KeyEventKind::Release => {}
            kind => {
                let was_up = self.last_active.insert(key.code, now).is_none();
                let unpaired = kind == KeyEventKind::Press && !self.honor_release;
                if (was_up || unpaired) && !self.fresh_presses.contains(&key.code) {
                    self.fresh_presses.push(key.code);
                }
            }
        }
    }

    fn expire(&mut self, now: Instant) {
        let releases = &mut self.releases;
        self.last_active.retain(|code, t| {
            let alive = now.duration_since(*t) < HOLD_TIMEOUT;
            if !alive {
                releases.push(*code);
            }
            alive
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent::new_with_kind(code, KeyModifiers::NONE, kind)
    }

    #[test]
    fn press_is_an_edge_repeat_is_not() {
        let mut s = InputState::new();
        let t0 = Instant::now();
        s.begin_frame();
        s.record(key(KeyCode::Left, KeyEventKind::Press), t0);
        assert!(s.any_pressed(&[KeyCode::Left]));
        assert!(s.is_held(KeyCode::Left));

        s.begin_frame();
        s.record(key(KeyCode::Left, KeyEventKind::Repeat), t0);
        assert!(!s.any_pressed(&[KeyCode::Left]));
        assert!(s.is_held(KeyCode::Left));
    }

    #[test]
    fn explicit_release_with_enhancement() {
        let mut s = InputState::new();
        s.honor_release = true;
        let t0 = Instant::now();
        s.record(key(KeyCode::Right, KeyEventKind::Press), t0);
        s.begin_frame();
        s.record(key(KeyCode::Right, KeyEventKind::Release), t0);
        assert!(s.any_released(&[KeyCode::Right]));
        assert!(!s.is_held(KeyCode::Right));
    }

    #[test]
    fn release_ignored_without_enhancement_until_timeout() {
        let mut s = InputState::new();
        let t0 = Instant::now();
        s.record(key(KeyCode::Right, KeyEventKind::Press), t0);
        s.begin_frame();
        s.record(key(KeyCode::Right, KeyEventKind::Release), t0);
        s.expire(t0 + Duration::from_millis(10));
        assert!(s.is_held(KeyCode::Right));

        s.begin_frame();
        s.expire(t0 + HOLD_TIMEOUT);
        assert!(s.any_released(&[KeyCode::Right]));
        assert!(!s.is_held(KeyCode::Right));
    }

    #[test]
    fn repeated_press_within_hold_window_is_reported() {
        let mut s = InputState::new();
        let t0 = Instant::now();
        let at = |ms| t0 + Duration::from_millis(ms);

        s.begin_frame();
        s.record(key(KeyCode::Up, KeyEventKind::Press), at(0));
        s.expire(at(0));
        assert!(s.any_pressed(&[KeyCode::Up]));

        s.begin_frame();
        s.record(key(KeyCode::Left, KeyEventKind::Press), at(150));
        s.expire(at(150));
        assert!(s.any_pressed(&[KeyCode::Left]));
        assert!(!s.any_pressed(&[KeyCode::Up]));

        // Up is still inside its hold window, but this is a new keystroke.
        s.begin_frame();
        s.record(key(KeyCode::Up, KeyEventKind::Press), at(300));
        s.expire(at(300));
        assert!(s.any_pressed(&[KeyCode::Up]));
    }

    #[test]
    fn held_key_is_not_pressed_again_with_enhancement() {
        let mut s = InputState::new();
        s.honor_release = true;
        let t0 = Instant::now();
        s.record(key(KeyCode::Char(' '), KeyEventKind::Press), t0);
        s.begin_frame();
        s.record(key(KeyCode::Char(' '), KeyEventKind::Repeat), t0);
        assert!(!s.any_pressed(&[KeyCode::Char(' ')]));
    }

    #[test]
    fn ctrl_c_detected() {
        let mut s = InputState::new();
        s.record(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Instant::now(),
        );
        assert!(s.ctrl_c_pressed());
    }
}
