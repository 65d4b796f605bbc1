//! Three-wire driver for the shift-register seven-segment module.
//!
//! Two daisy-chained registers sit behind a serial data line, a shift clock
//! and a storage (latch) clock. Each latched 16-bit word is one digit: the
//! digit-select byte goes out first, the segment byte second. `render4`
//! strobes the four positions once, so the display is time-multiplexed and
//! only stays lit while the caller keeps refreshing.
//!
//! The per-digit settle delay is injected as a plain function so the driver
//! stays free of target-specific cycle counting.

use embedded_hal::digital::v2::OutputPin;

use crate::display::Frame;

pub struct ShiftRegDisplay<Data, Clk, Latch> {
    data: Data,
    clk: Clk,
    latch: Latch,
    settle: fn(),
}

impl<Data, Clk, Latch, E> ShiftRegDisplay<Data, Clk, Latch>
where
    Data: OutputPin<Error = E>,
    Clk: OutputPin<Error = E>,
    Latch: OutputPin<Error = E>,
{
    pub fn new(data: Data, clk: Clk, latch: Latch, settle: fn()) -> Self {
        Self {
            data,
            clk,
            latch,
            settle,
        }
    }

    /// One-time setup: drive the lines to a known state and blank the
    /// display.
    pub fn init(&mut self) -> Result<(), E> {
        self.data.set_low()?;
        self.clk.set_low()?;
        self.latch.set_low()?;
        self.shift_byte(0)?;
        self.shift_byte(0)?;
        self.pulse_latch()
    }

    /// Strobes all four digits once, leftmost first, then deselects so the
    /// last digit does not stay lit until the next refresh and outshine the
    /// rest. Every position gets one settle-wide slot per call; call
    /// continuously.
    pub fn render4(&mut self, frame: &Frame) -> Result<(), E> {
        for (position, &segments) in frame.iter().enumerate() {
            let select = 1u8 << (3 - position);
            self.shift_byte(select)?;
            self.shift_byte(segments)?;
            self.pulse_latch()?;
            (self.settle)();
        }
        self.shift_byte(0)?;
        self.shift_byte(0)?;
        self.pulse_latch()
    }

    /// Clocks one byte out MSB-first.
    fn shift_byte(&mut self, byte: u8) -> Result<(), E> {
        for bit in (0..8).rev() {
            if byte & (1u8 << bit) != 0 {
                self.data.set_high()?;
            } else {
                self.data.set_low()?;
            }
            self.clk.set_high()?;
            self.clk.set_low()?;
        }
        Ok(())
    }

    fn pulse_latch(&mut self) -> Result<(), E> {
        self.latch.set_high()?;
        self.latch.set_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Captured state of the simulated register chain: bits sampled on each
    /// shift-clock rising edge, words committed on each latch rising edge.
    #[derive(Default)]
    struct Bus {
        data_level: bool,
        shifted: Vec<bool>,
        latched: Vec<u16>,
    }

    #[derive(Clone, Copy)]
    enum Line {
        Data,
        Clk,
        Latch,
    }

    struct MockPin {
        bus: Rc<RefCell<Bus>>,
        line: Line,
        level: bool,
    }

    impl OutputPin for MockPin {
        type Error = Infallible;

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.set(true)
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.set(false)
        }
    }

    impl MockPin {
        fn set(&mut self, level: bool) -> Result<(), Infallible> {
            let rising = level && !self.level;
            self.level = level;
            let mut bus = self.bus.borrow_mut();
            match self.line {
                Line::Data => bus.data_level = level,
                Line::Clk => {
                    if rising {
                        let sampled = bus.data_level;
                        bus.shifted.push(sampled);
                    }
                }
                Line::Latch => {
                    if rising {
                        let word = bus
                            .shifted
                            .iter()
                            .fold(0u16, |acc, &bit| (acc << 1) | bit as u16);
                        bus.shifted.clear();
                        bus.latched.push(word);
                    }
                }
            }
            Ok(())
        }
    }

    fn harness() -> (ShiftRegDisplay<MockPin, MockPin, MockPin>, Rc<RefCell<Bus>>) {
        let bus = Rc::new(RefCell::new(Bus::default()));
        let pin = |line| MockPin {
            bus: Rc::clone(&bus),
            line,
            level: false,
        };
        let display = ShiftRegDisplay::new(
            pin(Line::Data),
            pin(Line::Clk),
            pin(Line::Latch),
            || {},
        );
        (display, bus)
    }

    #[test]
    fn init_latches_a_blank_word() {
        let (mut display, bus) = harness();
        display.init().unwrap();
        assert_eq!(bus.borrow().latched, vec![0x0000]);
    }

    #[test]
    fn render4_latches_select_then_segments_per_digit() {
        let (mut display, bus) = harness();
        display.render4(&[0x3F, 0x06, 0x5B, 0x4F]).unwrap();
        assert_eq!(
            bus.borrow().latched,
            vec![0x083F, 0x0406, 0x025B, 0x014F, 0x0000]
        );
    }

    #[test]
    fn render4_deselects_after_the_last_digit() {
        let (mut display, bus) = harness();
        display.render4(&[0x7F, 0x7F, 0x7F, 0x7F]).unwrap();
        // The last latched word must blank the selects, so no digit stays
        // lit between refreshes longer than its own strobe slot.
        assert_eq!(*bus.borrow().latched.last().unwrap(), 0x0000);
        // Each digit is selected exactly once per refresh.
        for position in 0..4u16 {
            let select = 1u16 << (11 - position);
            let strobes = bus
                .borrow()
                .latched
                .iter()
                .filter(|&&word| word & 0xFF00 == select)
                .count();
            assert_eq!(strobes, 1);
        }
    }

    #[test]
    fn nothing_latches_mid_shift() {
        let (mut display, bus) = harness();
        display.render4(&[0xFF, 0x00, 0xFF, 0x00]).unwrap();
        // Every latch consumed exactly 16 shifted bits.
        assert!(bus.borrow().shifted.is_empty());
        assert_eq!(bus.borrow().latched.len(), 5);
    }
}
