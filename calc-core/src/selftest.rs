//! Checks run once at boot, before the calculator takes input.

use crate::calc::{Operation, apply};
use crate::error::AssertionFailure;
use crate::glyph::Glyph;
use crate::render::{Precision, render};

const MATH_CHECKS: &[(&str, f64, Operation, f64, f64)] = &[
    ("MATH OP ASSERT 1", 4.0, Operation::Add, 5.0, 9.0),
    ("MATH OP ASSERT 2", 292.0, Operation::Add, 123.0, 415.0),
    ("MATH OP ASSERT 3", -233.0, Operation::Add, 343.0, 110.0),
    ("MATH OP ASSERT 4", 9898.0, Operation::Add, -9899.0, -1.0),
    ("MATH OP ASSERT 5", 9898.5, Operation::Add, -9897.5, 1.0),
    ("MATH OP ASSERT 6", -9898.75, Operation::Add, -9898.5, -19797.25),
    ("MATH OP ASSERT 7", 4.0, Operation::Subtract, 5.0, -1.0),
    ("MATH OP ASSERT 8", 292.0, Operation::Subtract, 123.0, 169.0),
    ("MATH OP ASSERT 9", 4.0, Operation::Multiply, 5.0, 20.0),
    ("MATH OP ASSERT 10", 123.0, Operation::Multiply, 13.0, 1599.0),
    ("MATH OP ASSERT 11", 20.0, Operation::Divide, 5.0, 4.0),
    ("MATH OP ASSERT 12", 14.0, Operation::Divide, 4.0, 3.5),
    ("MATH OP ASSERT 13", 12.0, Operation::Divide, 8.0, 1.5),
];

const PUTNUM_CHECKS: &[(&str, f64, &str)] = &[
    ("PUTNUM ASSERT 1", 0.0, "0"),
    ("PUTNUM ASSERT 2", 10.0, "10"),
    ("PUTNUM ASSERT 3", 313.0, "313"),
    ("PUTNUM ASSERT 4", 4294967295.0, "4294967295"),
    ("PUTNUM ASSERT 5", -313.0, "-313"),
    ("PUTNUM ASSERT 6", 3.5, "3.5000"),
    ("PUTNUM ASSERT 7", -0.25, "-0.2500"),
    ("PUTNUM ASSERT 8", 33333.75, "33333.7500"),
];

const PUTNUM_PRECISION: Precision = Precision::FixedDigits(4);

/// Run every check, stopping at the first one that fails.
pub fn run() -> Result<(), AssertionFailure> {
    for &(check, lhs, op, rhs, expected) in MATH_CHECKS {
        ensure(apply(lhs, op, rhs) == Ok(expected), check)?;
    }

    ensure(apply(1.0, Operation::Divide, 0.0).is_err(), "DIV BY ZERO ASSERT")?;

    for &(check, value, expected) in PUTNUM_CHECKS {
        let rendered = render(value, PUTNUM_PRECISION);
        let matches = rendered.len() == expected.len()
            && rendered
                .iter()
                .zip(expected.chars())
                .all(|(&glyph, c)| Glyph::from_char(c) == Some(glyph));
        ensure(matches, check)?;
    }

    Ok(())
}

fn ensure(condition: bool, check: &'static str) -> Result<(), AssertionFailure> {
    if condition {
        Ok(())
    } else {
        Err(AssertionFailure { check })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_checks_pass() {
        assert_eq!(run(), Ok(()));
    }

    #[test]
    fn ensure_names_the_failing_check() {
        assert_eq!(ensure(false, "X"), Err(AssertionFailure { check: "X" }));
    }
}
