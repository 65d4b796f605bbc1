//! Seven-segment patterns for a common-cathode display, bits `.gfedcba`.

/// Segment patterns for the digits 0-9.
pub const GLYPHS: [u8; 10] = [
    0x3F, // 0
    0x06, // 1
    0x5B, // 2
    0x4F, // 3
    0x66, // 4
    0x6D, // 5
    0x7D, // 6
    0x07, // 7
    0x7F, // 8
    0x6F, // 9
];

/// Decimal-point segment, used as the hour/minute separator.
pub const DP: u8 = 1 << 7;

/// Splits a value in 0..=99 into its decimal digits.
pub fn digits_of(value: u8) -> (u8, u8) {
    (value / 10, value % 10)
}

/// Segment pattern for a single decimal digit.
pub fn glyph(digit: u8) -> u8 {
    debug_assert!(digit < 10, "not a decimal digit: {digit}");
    GLYPHS[(digit % 10) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_of_splits_decimally() {
        assert_eq!(digits_of(0), (0, 0));
        assert_eq!(digits_of(7), (0, 7));
        assert_eq!(digits_of(42), (4, 2));
        assert_eq!(digits_of(99), (9, 9));
    }

    #[test]
    fn glyphs_are_distinct() {
        for a in 0..10 {
            for b in (a + 1)..10 {
                assert_ne!(GLYPHS[a], GLYPHS[b]);
            }
        }
    }

    #[test]
    #[should_panic(expected = "not a decimal digit")]
    fn glyph_rejects_non_digits() {
        glyph(10);
    }

    #[test]
    fn no_glyph_uses_the_separator_bit() {
        for &pattern in &GLYPHS {
            assert_eq!(pattern & DP, 0);
        }
    }
}
