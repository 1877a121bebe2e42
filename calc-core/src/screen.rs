//! What the calculator puts on the display.

use core::fmt::{self, Display, Write};

use crate::calc::CalculatorState;
use crate::glyph::{self, Glyph};
use crate::render::{Precision, render};

/// A character display addressed in glyph cells.
pub trait GlyphSink {
    type Error;

    /// Blank the display and home the cursor.
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor to `column`, counted in glyphs, on text line `bank`.
    fn set_cursor(&mut self, column: u8, bank: u8) -> Result<(), Self::Error>;

    /// Draw `glyph` at the cursor and advance it.
    fn put_glyph(&mut self, glyph: Glyph) -> Result<(), Self::Error>;

    /// Draw `text`. The font has upper case only; anything else it lacks
    /// shows as `?`.
    fn put_str(&mut self, text: &str) -> Result<(), Self::Error> {
        for c in text.chars() {
            let glyph = Glyph::from_char(c.to_ascii_uppercase()).unwrap_or(Glyph::UNKNOWN);
            self.put_glyph(glyph)?;
        }
        Ok(())
    }

    fn put_glyphs(&mut self, glyphs: &[Glyph]) -> Result<(), Self::Error> {
        glyphs.iter().try_for_each(|&glyph| self.put_glyph(glyph))
    }
}

/// Text line holding the operator and the right operand. A left operand
/// too wide for one line wraps into the line between.
pub const RIGHT_OPERAND_BANK: u8 = 2;

/// Redraw the operand pair: `left` on the first line, then `op right` on
/// [`RIGHT_OPERAND_BANK`] while an operation is pending.
pub fn show_state<S: GlyphSink>(
    sink: &mut S,
    state: &CalculatorState,
    precision: Precision,
) -> Result<(), S::Error> {
    sink.clear()?;
    sink.put_glyphs(&render(state.left, precision))?;

    if let Some(op) = state.operation.glyph() {
        sink.set_cursor(0, RIGHT_OPERAND_BANK)?;
        sink.put_glyph(op)?;
        sink.put_glyphs(&render(state.right, precision))?;
    }
    Ok(())
}

/// Replace the display contents with an error message.
pub fn show_fault<S: GlyphSink>(sink: &mut S, fault: impl Display) -> Result<(), S::Error> {
    sink.clear()?;
    sink.put_str("ERROR: ")?;

    let mut writer = GlyphWriter { sink, error: None };
    match write!(writer, "{fault}") {
        Ok(()) => Ok(()),
        Err(fmt::Error) => writer.error.map_or(Ok(()), Err),
    }
}

/// `fmt::Write` onto a sink, keeping the sink's own error.
struct GlyphWriter<'a, S: GlyphSink> {
    sink: &'a mut S,
    error: Option<S::Error>,
}

impl<S: GlyphSink> Write for GlyphWriter<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.sink.put_str(s).map_err(|err| {
            self.error = Some(err);
            fmt::Error
        })
    }
}

/// Draw the whole font table, for checking the display at boot.
pub fn show_glyph_table<S: GlyphSink>(sink: &mut S) -> Result<(), S::Error> {
    sink.clear()?;
    glyph::all().try_for_each(|glyph| sink.put_glyph(glyph))
}
