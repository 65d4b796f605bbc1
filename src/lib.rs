//! Core logic for a shift-register seven-segment alarm clock.
//!
//! Everything in here is pure state-machine code with no hardware
//! dependencies, so it builds and tests on the host. The firmware entry
//! point lives in `main.rs`.

#![cfg_attr(not(test), no_std)]

pub mod clock;
pub mod debounce;
pub mod display;
pub mod glyphs;
pub mod shift_reg;
pub mod wait;
