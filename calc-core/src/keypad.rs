//! Key codes produced by the keypad encoder and what they mean to the
//! calculator.

use crate::calc::Operation;

/// A decoded key, 0x0 through 0xF.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyCode(u8);

impl KeyCode {
    pub const fn new(code: u8) -> Option<Self> {
        if code <= 0xF { Some(KeyCode(code)) } else { None }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Encoder output sample to key code, indexed by the raw 4-bit sample.
///
/// This is how the keypad is wired to the encoder and has to stay as is for
/// the legends on the keys to match.
const WIRING: [u8; 16] = [
    0x1, // 0x00
    0x2, // 0x01
    0x3, // 0x02
    0xA, // 0x03
    0x4, // 0x04
    0x5, // 0x05
    0x6, // 0x06
    0xB, // 0x07
    0x7, // 0x08
    0x8, // 0x09
    0x9, // 0x0A
    0xC, // 0x0B
    0xE, // 0x0C
    0x0, // 0x0D
    0xF, // 0x0E
    0xD, // 0x0F
];

/// Decode a raw encoder sample. Samples wider than four bits are not keys.
pub fn decode_port(raw: u8) -> Option<KeyCode> {
    WIRING.get(usize::from(raw)).copied().and_then(KeyCode::new)
}

/// What a key does.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Digit(u8),
    Operator(Operation),
    DecimalPoint,
    Equals,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code.0 {
            d @ 0x0..=0x9 => Key::Digit(d),
            0xA => Key::Operator(Operation::Add),
            0xB => Key::Operator(Operation::Subtract),
            0xC => Key::Operator(Operation::Multiply),
            0xD => Key::Operator(Operation::Divide),
            0xE => Key::DecimalPoint,
            _ => Key::Equals,
        }
    }
}

impl Key {
    /// Legend printed on the physical key.
    pub fn legend(self) -> char {
        match self {
            Key::Digit(d) => char::from(b'0' + d),
            Key::Operator(Operation::Add) => 'A',
            Key::Operator(Operation::Subtract) => 'B',
            Key::Operator(Operation::Multiply) => 'C',
            Key::Operator(Operation::Divide) => 'D',
            Key::Operator(_) => '?',
            Key::DecimalPoint => '*',
            Key::Equals => '#',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_sample_decodes_to_a_distinct_key() {
        let mut seen = [false; 16];
        for raw in 0..16u8 {
            let code = decode_port(raw).expect("4-bit sample must decode");
            assert!(!seen[usize::from(code.value())], "duplicate key {:#x}", code.value());
            seen[usize::from(code.value())] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn wiring_matches_the_board() {
        assert_eq!(decode_port(0x0D), KeyCode::new(0x0));
        assert_eq!(decode_port(0x00), KeyCode::new(0x1));
        assert_eq!(decode_port(0x0A), KeyCode::new(0x9));
        assert_eq!(decode_port(0x03), KeyCode::new(0xA));
        assert_eq!(decode_port(0x0F), KeyCode::new(0xD));
        assert_eq!(decode_port(0x0C), KeyCode::new(0xE));
        assert_eq!(decode_port(0x0E), KeyCode::new(0xF));
    }

    #[test]
    fn wide_samples_are_no_key() {
        assert_eq!(decode_port(0x10), None);
        assert_eq!(decode_port(0xFF), None);
        assert_eq!(KeyCode::new(0x10), None);
    }

    #[test]
    fn key_codes_map_to_actions() {
        let key = |c| Key::from(KeyCode::new(c).unwrap());
        assert_eq!(key(0x0), Key::Digit(0));
        assert_eq!(key(0x9), Key::Digit(9));
        assert_eq!(key(0xA), Key::Operator(Operation::Add));
        assert_eq!(key(0xB), Key::Operator(Operation::Subtract));
        assert_eq!(key(0xC), Key::Operator(Operation::Multiply));
        assert_eq!(key(0xD), Key::Operator(Operation::Divide));
        assert_eq!(key(0xE), Key::DecimalPoint);
        assert_eq!(key(0xF), Key::Equals);
        assert_eq!(key(0xE).legend(), '*');
        assert_eq!(key(0xC).legend(), 'C');
    }
}
