//! Tick-sampled button debouncing.
//!
//! One `Debouncer` per button, fed the raw (already active-high) pressed
//! level once per millisecond. A press registers only after the input has
//! stayed asserted for the whole debounce window, then repeats at the same
//! cadence for as long as the button is held, so holding a set button walks
//! the clock forward. Bounce shorter than the window is dropped, and the
//! machine re-arms on release.

/// Samples an input must stay asserted before a press registers; also the
/// repeat period while held.
pub const DEBOUNCE_MS: u16 = 100;

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Asserted but not yet trusted; counts consecutive asserted samples.
    Settling(u16),
    /// Press delivered; counts samples since the last event for repeat.
    Held(u16),
}

pub struct Debouncer {
    state: State,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Feed one sample. Returns true on a confirmed press and again every
    /// `DEBOUNCE_MS` samples while the input stays asserted.
    pub fn sample(&mut self, pressed: bool) -> bool {
        match (self.state, pressed) {
            (State::Idle, true) => {
                self.state = State::Settling(1);
                false
            }
            (State::Settling(seen), true) => {
                if seen + 1 >= DEBOUNCE_MS {
                    self.state = State::Held(0);
                    true
                } else {
                    self.state = State::Settling(seen + 1);
                    false
                }
            }
            (State::Held(since), true) => {
                if since + 1 >= DEBOUNCE_MS {
                    self.state = State::Held(0);
                    true
                } else {
                    self.state = State::Held(since + 1);
                    false
                }
            }
            (State::Settling(_), false) | (State::Held(_), false) => {
                self.state = State::Idle;
                false
            }
            (State::Idle, false) => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}
