//! Character-cell console on top of the panel framebuffer.
//!
//! The screen is a grid of `COLUMNS` x `BANKS` glyph cells. The cursor
//! advances one cell per glyph and wraps to the next bank at the end of a
//! line, and back to the top after the last one.

use calc_core::{Glyph, screen::GlyphSink};
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use u8g2_fonts::{
    FontRenderer, fonts,
    types::{FontColor, VerticalPosition},
};

use crate::{
    display::{HEIGHT, Panel, WIDTH},
    error::AppError,
};

const CELL_WIDTH: u16 = 10;
const CELL_HEIGHT: u16 = 20;

pub const COLUMNS: u8 = (WIDTH / CELL_WIDTH) as u8;
pub const BANKS: u8 = (HEIGHT / CELL_HEIGHT) as u8;

const FOREGROUND: Rgb565 = Rgb565::WHITE;
const BACKGROUND: Rgb565 = Rgb565::BLACK;

pub struct Console {
    panel: Panel,
    font: FontRenderer,
    column: u8,
    bank: u8,
}

impl Console {
    pub fn new(panel: Panel) -> Self {
        Self {
            panel,
            font: FontRenderer::new::<fonts::u8g2_font_10x20_mf>(),
            column: 0,
            bank: 0,
        }
    }

    /// Show what has been drawn since the last flush.
    pub async fn flush(&mut self) -> Result<(), AppError> {
        self.panel.flush().await
    }

    fn cell_origin(&self) -> Point {
        Point::new(
            i32::from(self.column) * i32::from(CELL_WIDTH),
            i32::from(self.bank) * i32::from(CELL_HEIGHT),
        )
    }

    fn advance(&mut self) {
        self.column += 1;
        if self.column >= COLUMNS {
            self.column = 0;
            self.bank = (self.bank + 1) % BANKS;
        }
    }
}

impl GlyphSink for Console {
    type Error = AppError;

    fn clear(&mut self) -> Result<(), AppError> {
        let Ok(()) = self.panel.framebuffer().clear(BACKGROUND);
        self.column = 0;
        self.bank = 0;
        Ok(())
    }

    fn set_cursor(&mut self, column: u8, bank: u8) -> Result<(), AppError> {
        self.column = column.min(COLUMNS - 1);
        self.bank = bank.min(BANKS - 1);
        Ok(())
    }

    fn put_glyph(&mut self, glyph: Glyph) -> Result<(), AppError> {
        let origin = self.cell_origin();
        let fb = self.panel.framebuffer();

        let cell = Rectangle::new(origin, Size::new(CELL_WIDTH.into(), CELL_HEIGHT.into()));
        let Ok(()) = fb.fill_solid(&cell, BACKGROUND);

        if glyph != Glyph::SPACE {
            self.font.render(
                glyph.to_char(),
                origin,
                VerticalPosition::Top,
                FontColor::Transparent(FOREGROUND),
                fb,
            )?;
        }

        self.advance();
        Ok(())
    }
}
