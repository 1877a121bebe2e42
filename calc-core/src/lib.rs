//! Calculator logic for the number-pad calculator, independent of any board.
//!
//! The firmware feeds decoded key codes into [`calc::CalculatorState`] and
//! draws the result through a [`screen::GlyphSink`].

#![cfg_attr(not(test), no_std)]

pub mod calc;
pub mod error;
pub mod glyph;
pub mod keypad;
pub mod render;
pub mod screen;
pub mod selftest;

pub use calc::{CalculatorState, Focus, Operation, Outcome};
pub use error::{ArithmeticFault, AssertionFailure};
pub use glyph::Glyph;
pub use keypad::{Key, KeyCode};
pub use render::{GlyphString, Precision};
