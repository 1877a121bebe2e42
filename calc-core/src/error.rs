use derive_more::Display;

/// An operation that could not produce a value.
///
/// The text is what the calculator shows after `ERROR: `, so it has to fit
/// the glyph table (upper case only).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ArithmeticFault {
    #[display("DIV BY ZERO")]
    DivideByZero,
    #[display("UNKNOWN OP")]
    UnknownOperator,
}

impl core::error::Error for ArithmeticFault {}

/// A boot self-test check that did not hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[display("{check}")]
pub struct AssertionFailure {
    pub check: &'static str,
}

impl core::error::Error for AssertionFailure {}
