/// Index into the display font table.
///
/// The table starts at the space character, so a printable ASCII character
/// `c` lives at index `c - 32`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Glyph(u8);

const FIRST_CHAR: u8 = b' ';
const LAST_CHAR: u8 = b'_';

/// Number of printable glyphs, `' '` through `'_'`.
pub const GLYPH_COUNT: u8 = LAST_CHAR - FIRST_CHAR + 1;

impl Glyph {
    pub const SPACE: Glyph = Glyph(b' ' - FIRST_CHAR);
    pub const MINUS: Glyph = Glyph(b'-' - FIRST_CHAR);
    pub const DECIMAL_POINT: Glyph = Glyph(b'.' - FIRST_CHAR);
    pub const UNKNOWN: Glyph = Glyph(b'?' - FIRST_CHAR);

    /// Glyph at `index` in the font table, if the table has one.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < GLYPH_COUNT {
            Some(Glyph(index))
        } else {
            None
        }
    }

    pub const fn from_char(c: char) -> Option<Self> {
        let code = c as u32;
        if code >= FIRST_CHAR as u32 && code <= LAST_CHAR as u32 {
            Some(Glyph(code as u8 - FIRST_CHAR))
        } else {
            None
        }
    }

    /// Glyph for a decimal digit. Values above 9 have no digit glyph.
    pub const fn digit(d: u8) -> Option<Self> {
        if d < 10 {
            Some(Glyph(b'0' - FIRST_CHAR + d))
        } else {
            None
        }
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn to_char(self) -> char {
        (self.0 + FIRST_CHAR) as char
    }
}

/// Every glyph in table order.
pub fn all() -> impl Iterator<Item = Glyph> {
    (0..GLYPH_COUNT).map(Glyph)
}
