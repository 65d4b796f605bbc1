//! One-shot millisecond countdown.
//!
//! Drives duration-based effects (the alarm-set feedback flash) off the
//! housekeeping tick instead of blocking redraw loops: arm it for N
//! milliseconds, feed it one `tick()` per millisecond, and it reports
//! expiry on exactly the N-th tick.

#[derive(Clone, Copy, Default)]
pub struct Countdown {
    remaining: u16,
}

impl Countdown {
    pub const fn idle() -> Self {
        Self { remaining: 0 }
    }

    /// Arms (or re-arms) the countdown for `ms` milliseconds.
    pub fn start(&mut self, ms: u16) {
        self.remaining = ms;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    /// Advances by one millisecond. Returns true on the tick that expires
    /// the countdown, and false before that and ever after.
    pub fn tick(&mut self) -> bool {
        match self.remaining {
            0 => false,
            1 => {
                self.remaining = 0;
                true
            }
            _ => {
                self.remaining -= 1;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_on_exactly_the_nth_tick() {
        let mut countdown = Countdown::idle();
        countdown.start(5);
        for _ in 0..4 {
            assert!(!countdown.tick());
            assert!(countdown.is_active());
        }
        assert!(countdown.tick());
        assert!(!countdown.is_active());
    }

    #[test]
    fn idle_countdown_never_expires() {
        let mut countdown = Countdown::idle();
        for _ in 0..1_000 {
            assert!(!countdown.tick());
        }
    }

    #[test]
    fn restart_extends_a_running_countdown() {
        let mut countdown = Countdown::idle();
        countdown.start(3);
        assert!(!countdown.tick());
        countdown.start(3);
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert!(countdown.tick());
    }
}
