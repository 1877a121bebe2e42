//! Decimal text rendering of operands.
//!
//! Digits are truncated, never rounded: `render(2.0 / 3.0, FixedDigits(4))`
//! shows `0.6666`.

use heapless::Vec;

use crate::glyph::Glyph;

/// Longest rendering: sign, 19 integer digits, point, and the most
/// fractional digits `FixedDigits` can ask for.
pub const MAX_GLYPHS: usize = 1 + 19 + 1 + u8::MAX as usize;

/// 2^63, the first value whose whole part no longer fits an `i64`.
const WHOLE_PART_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// From 2^53 up every `f64` is an integer.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Fractional digits shown by the calculator.
pub const DISPLAY_PRECISION: Precision = Precision::FixedDigits(4);

pub type GlyphString = Vec<Glyph, MAX_GLYPHS>;

/// How many fractional digits to produce once the value has a fraction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Precision {
    /// Exactly this many digits.
    FixedDigits(u8),
    /// Until the remainder is exactly zero, or the output is full.
    ///
    /// A fraction like 1/3 only reaches zero after some fifty digits, and very
    /// small values fill the whole buffer. Not for display.
    UntilExact,
}

/// Render `value` as glyphs.
pub fn render(value: f64, precision: Precision) -> GlyphString {
    let mut out = GlyphString::new();
    let mut value = value;

    if value < 0.0 {
        push(&mut out, Glyph::MINUS);
        // Negating f64::MIN is exact, unlike the integer case.
        value = -value;
    }

    let marker = if value.is_nan() {
        Some("NAN")
    } else if value.is_infinite() {
        Some("INF")
    } else if value >= WHOLE_PART_LIMIT {
        Some("OVERFLOW")
    } else {
        None
    };
    if let Some(text) = marker {
        for c in text.chars() {
            push(&mut out, Glyph::from_char(c).unwrap_or(Glyph::UNKNOWN));
        }
        return out;
    }

    let mut whole = value as i64;
    let mut fractional = if value < EXACT_INTEGER_LIMIT {
        value - whole as f64
    } else {
        0.0
    };

    let mut pow10: i64 = 1;
    while pow10 <= whole / 10 {
        pow10 *= 10;
    }

    while pow10 >= 1 {
        let digit = whole / pow10;
        whole %= pow10;
        push_digit(&mut out, digit);
        pow10 /= 10;
    }

    if fractional == 0.0 {
        return out;
    }

    push(&mut out, Glyph::DECIMAL_POINT);
    let mut emitted: usize = 0;
    loop {
        match precision {
            Precision::FixedDigits(n) if emitted >= usize::from(n) => break,
            Precision::UntilExact if fractional == 0.0 => break,
            _ => {}
        }
        if out.is_full() {
            break;
        }

        fractional *= 10.0;
        let digit = fractional as i64;
        fractional -= digit as f64;
        push_digit(&mut out, digit);
        emitted += 1;
    }

    out
}

fn push(out: &mut GlyphString, glyph: Glyph) {
    // Output past capacity is dropped.
    let _ = out.push(glyph);
}

fn push_digit(out: &mut GlyphString, digit: i64) {
    // Float error can push a digit out of 0..=9; such digits are skipped.
    if let Some(glyph) = u8::try_from(digit).ok().and_then(Glyph::digit) {
        push(out, glyph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: f64, precision: Precision) -> String {
        render(value, precision).iter().map(|g| g.to_char()).collect()
    }

    #[test]
    fn zero_is_a_single_digit() {
        for n in [0, 1, 4, 10] {
            assert_eq!(text(0.0, Precision::FixedDigits(n)), "0");
        }
        assert_eq!(text(0.0, Precision::UntilExact), "0");
        assert_eq!(text(-0.0, Precision::FixedDigits(4)), "0");
    }

    #[test]
    fn integers_have_no_leading_zeros() {
        assert_eq!(text(5.0, Precision::FixedDigits(2)), "5");
        assert_eq!(text(10.0, DISPLAY_PRECISION), "10");
        assert_eq!(text(313.0, DISPLAY_PRECISION), "313");
        assert_eq!(text(4294967295.0, DISPLAY_PRECISION), "4294967295");
    }

    #[test]
    fn negative_values_lead_with_minus() {
        for x in [1.0, 3.14, 313.0, 0.5, 4294967296.0] {
            let positive = text(x, DISPLAY_PRECISION);
            assert_eq!(text(-x, DISPLAY_PRECISION), format!("-{positive}"));
        }
    }

    #[test]
    fn fixed_precision_truncates() {
        assert_eq!(text(0.5, Precision::FixedDigits(4)), "0.5000");
        assert_eq!(text(2.0 / 3.0, Precision::FixedDigits(4)), "0.6666");
        assert_eq!(text(33333.75, Precision::FixedDigits(2)), "33333.75");
        assert_eq!(text(1.999_99, Precision::FixedDigits(3)), "1.999");
    }

    #[test]
    fn fixed_precision_always_emits_n_digits() {
        for n in [1u8, 4, 9] {
            let s = text(0.1, Precision::FixedDigits(n));
            assert_eq!(s.len(), 2 + usize::from(n), "{s}");
            assert!(s.starts_with("0.1") || s.starts_with("0.0"), "{s}");
        }
        assert_eq!(text(0.1, Precision::FixedDigits(4)), "0.1000");
    }

    #[test]
    fn zero_precision_keeps_the_point() {
        assert_eq!(text(2.5, Precision::FixedDigits(0)), "2.");
    }

    #[test]
    fn until_exact_stops_on_terminating_fractions() {
        assert_eq!(text(0.5, Precision::UntilExact), "0.5");
        assert_eq!(text(3.125, Precision::UntilExact), "3.125");
    }

    #[test]
    fn until_exact_runs_past_fixed_precision_for_thirds() {
        let glyphs = render(1.0 / 3.0, Precision::UntilExact);
        assert!(glyphs.len() > 20 && glyphs.len() < MAX_GLYPHS, "{}", glyphs.len());
    }

    #[test]
    fn until_exact_is_bounded_by_capacity() {
        let glyphs = render(1e-300, Precision::UntilExact);
        assert_eq!(glyphs.len(), MAX_GLYPHS);
    }

    #[test]
    fn long_fixed_precision_is_not_cut_short() {
        let s = text(0.5, Precision::FixedDigits(40));
        assert_eq!(s.len(), 2 + 40, "{s}");

        let s = text(-1234567890123456.5, Precision::FixedDigits(20));
        assert_eq!(s, "-1234567890123456.50000000000000000000");
    }

    #[test]
    fn widest_value_at_maximum_precision_fits() {
        // Widest value that still has a fraction: 2^52 - 0.5.
        let s = text(-4503599627370495.5, Precision::FixedDigits(u8::MAX));
        assert_eq!(s.len(), 1 + 16 + 1 + usize::from(u8::MAX), "{s}");
        assert!(s.starts_with("-4503599627370495.5000"));

        let s = text(-9.2e18, Precision::FixedDigits(u8::MAX));
        assert_eq!(s, "-9200000000000000000");
    }

    #[test]
    fn whole_parts_beyond_i64_are_marked_as_overflow() {
        assert_eq!(text(9999999999.0 * 9999999999.0, DISPLAY_PRECISION), "OVERFLOW");
        assert_eq!(text(1e30, DISPLAY_PRECISION), "OVERFLOW");
        assert_eq!(text(-1e30, DISPLAY_PRECISION), "-OVERFLOW");
        assert_eq!(text(9.2e18, DISPLAY_PRECISION), "9200000000000000000");
    }

    #[test]
    fn non_finite_values_are_spelled_out() {
        assert_eq!(text(f64::INFINITY, DISPLAY_PRECISION), "INF");
        assert_eq!(text(f64::NEG_INFINITY, DISPLAY_PRECISION), "-INF");
        assert_eq!(text(f64::NAN, DISPLAY_PRECISION), "NAN");
    }
}
