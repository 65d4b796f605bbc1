use crate::clock::{AlarmSetpoint, WallClock};
use crate::glyphs::{digits_of, glyph, DP};

/// One rendered display refresh: four glyph codes, leftmost digit first.
pub type Frame = [u8; 4];

/// Pending visual-feedback event, recorded by the alarm-set interrupt and
/// consumed by the housekeeping task while its countdown runs.
#[derive(Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Flash {
    None,
    /// Show the alarm hour in the high digit pair.
    AlarmHour,
    /// Show the alarm minute in the low digit pair.
    AlarmMinute,
}

/// Builds the normal time frame: HH MM with the separator dot on the
/// second digit while `blink` is set.
pub fn time_frame(clock: &WallClock) -> Frame {
    let (hour_tens, hour_ones) = digits_of(clock.hour);
    let (minute_tens, minute_ones) = digits_of(clock.minute);
    let mut frame = [
        glyph(hour_tens),
        glyph(hour_ones),
        glyph(minute_tens),
        glyph(minute_ones),
    ];
    if clock.blink {
        frame[1] |= DP;
    }
    frame
}

/// Feedback frame after an alarm-hour bump: "HH00".
pub fn alarm_hour_frame(alarm: &AlarmSetpoint) -> Frame {
    let (tens, ones) = digits_of(alarm.hour);
    [glyph(tens), glyph(ones), glyph(0), glyph(0)]
}

/// Feedback frame after an alarm-minute bump: "00MM".
pub fn alarm_minute_frame(alarm: &AlarmSetpoint) -> Frame {
    let (tens, ones) = digits_of(alarm.minute);
    [glyph(0), glyph(0), glyph(tens), glyph(ones)]
}
