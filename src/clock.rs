/// Wall-clock state, advanced once per second by the time base task.
///
/// `blink` drives the separator dot between hours and minutes and toggles
/// on every tick, independent of the time fields.
#[derive(Clone, Copy, Default, defmt::Format)]
pub struct WallClock {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub blink: bool,
}

impl WallClock {
    pub const fn new() -> Self {
        Self {
            hour: 0,
            minute: 0,
            second: 0,
            blink: false,
        }
    }

    /// Advances the clock by one second, carrying into minutes and hours.
    ///
    /// A single tick can propagate at most one full carry chain; every field
    /// is back in range by the time this returns.
    pub fn tick(&mut self) {
        self.blink = !self.blink;
        self.second += 1;
        if self.second >= 60 {
            self.second = 0;
            self.minute += 1;
        }
        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;
        }
        if self.hour >= 24 {
            self.hour = 0;
        }
    }

    /// Manual adjustment: hour + 1, wrapping at 24. Seconds are untouched.
    pub fn bump_hour(&mut self) {
        self.hour = (self.hour + 1) % 24;
    }

    /// Manual adjustment: minute + 1, wrapping at 60. No carry into hours.
    pub fn bump_minute(&mut self) {
        self.minute = (self.minute + 1) % 60;
    }
}

/// Alarm setpoint. Always armed; matching is a plain value comparison
/// re-evaluated continuously, so the alarm output is asserted for exactly
/// the minute where hour and minute line up and clears itself after.
#[derive(Clone, Copy, Default, defmt::Format)]
pub struct AlarmSetpoint {
    pub hour: u8,
    pub minute: u8,
}

impl AlarmSetpoint {
    pub const fn new() -> Self {
        Self { hour: 0, minute: 0 }
    }

    pub fn bump_hour(&mut self) {
        self.hour = (self.hour + 1) % 24;
    }

    pub fn bump_minute(&mut self) {
        self.minute = (self.minute + 1) % 60;
    }

    /// True while the wall clock is inside the alarm minute.
    pub fn matches(&self, clock: &WallClock) -> bool {
        self.hour == clock.hour && self.minute == clock.minute
    }
}
