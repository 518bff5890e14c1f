/// Periodic driver: decides when the next tick/frame is due.
///
/// Owned by the session controller. `attach()` arms it on every
/// transition into running, `detach()` disarms it on every transition
/// out. A detached driver never fires, so no stale step can run after a
/// pause, reset or game over.
///
/// Time is passed in by the caller, which keeps the driver testable.

use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
pub struct Driver {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Driver {
    pub fn new(interval: Duration) -> Self {
        Driver { interval, next_due: None }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn attach(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn detach(&mut self) {
        self.next_due = None;
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true (and re-arms) if a step is due at `now`.
    /// At most one step fires per call; missed intervals are not replayed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS150: Duration = Duration::from_millis(150);

    #[test]
    fn detached_never_fires() {
        let mut d = Driver::new(MS150);
        let t0 = Instant::now();
        assert!(!d.is_attached());
        assert!(!d.fire(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn fires_once_per_interval() {
        let mut d = Driver::new(MS150);
        let t0 = Instant::now();
        d.attach(t0);
        assert!(!d.fire(t0 + Duration::from_millis(100)));
        assert!(d.fire(t0 + MS150));
        assert!(!d.fire(t0 + Duration::from_millis(200)));
        assert!(d.fire(t0 + Duration::from_millis(300)));
    }

    #[test]
    fn late_poll_fires_only_once() {
        let mut d = Driver::new(MS150);
        let t0 = Instant::now();
        d.attach(t0);
        let late = t0 + Duration::from_secs(2);
        assert!(d.fire(late));
        assert!(!d.fire(late));
    }

    #[test]
    fn detach_cancels_pending_step() {
        let mut d = Driver::new(MS150);
        let t0 = Instant::now();
        d.attach(t0);
        d.detach();
        assert!(!d.fire(t0 + MS150));
    }
}
