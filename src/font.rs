//! 7 segment glyphs.
//!
//! Segment bits follow the max7219 no-decode layout:
//!
//! ```text
//!   bit:  7  6  5  4  3  2  1  0
//!   seg: DP  A  B  C  D  E  F  G
//! ```

/// Decimal point / dot bit of a segment byte
pub const DOT: u8 = 0b1000_0000;

/// Glyph used for codes missing from a table
pub const BLANK: u8 = b' ';

/// Left half of a two digit wide `W`
pub const DOUBLE_W_LEFT: u8 = 0x10;
/// Right half of a two digit wide `W`
pub const DOUBLE_W_RIGHT: u8 = 0x11;
/// Left half of a two digit wide `M`
pub const DOUBLE_M_LEFT: u8 = 0x12;
/// Right half of a two digit wide `M`
pub const DOUBLE_M_RIGHT: u8 = 0x13;

/// Default font covering 7 bit ascii. Codes 0x00..=0x0F are the hex digits so that
/// `set_digit` can index it directly.
#[rustfmt::skip]
pub const SEVEN_SEGMENT: [u8; 128] = [
    // 0 1 2 3 4 5 6 7
    0b0111_1110, 0b0011_0000, 0b0110_1101, 0b0111_1001, 0b0011_0011, 0b0101_1011, 0b0101_1111, 0b0111_0000,
    // 8 9 A b c d E F
    0b0111_1111, 0b0111_1011, 0b0111_0111, 0b0001_1111, 0b0000_1101, 0b0011_1101, 0b0100_1111, 0b0100_0111,
    // wide W (left, right), wide M (left, right), unused
    0b0001_1110, 0b0011_1100, 0b0110_0110, 0b0111_0010, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000,
    // unused
    0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000,
    // space ! " # $ % & '
    0b0000_0000, 0b1011_0000, 0b0010_0010, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_0010,
    // ( ) * + , - . /
    0b0100_1110, 0b0111_1000, 0b0000_0000, 0b0000_0000, 0b1000_0000, 0b0000_0001, 0b1000_0000, 0b0010_0101,
    // 0 1 2 3 4 5 6 7
    0b0111_1110, 0b0011_0000, 0b0110_1101, 0b0111_1001, 0b0011_0011, 0b0101_1011, 0b0101_1111, 0b0111_0000,
    // 8 9 : ; < = > ?
    0b0111_1111, 0b0111_1011, 0b0000_0000, 0b0000_0000, 0b0000_0000, 0b0000_1001, 0b0000_0000, 0b0110_0101,
    // @ A B C D E F G
    0b0000_0000, 0b0111_0111, 0b0001_1111, 0b0100_1110, 0b0011_1101, 0b0100_1111, 0b0100_0111, 0b0101_1110,
    // H I J K L M N O
    0b0011_0111, 0b0000_0110, 0b0011_1100, 0b0011_0111, 0b0000_1110, 0b0111_0110, 0b0111_0110, 0b0111_1110,
    // P Q R S T U V W
    0b0110_0111, 0b0111_0011, 0b0000_0101, 0b0101_1011, 0b0000_1111, 0b0011_1110, 0b0011_1110, 0b0011_1110,
    // X Y Z [ \ ] ^ _
    0b0011_0111, 0b0011_1011, 0b0110_1101, 0b0100_1110, 0b0001_0011, 0b0111_1000, 0b0110_0010, 0b0000_1000,
    // ` a b c d e f g
    0b0010_0000, 0b0111_1101, 0b0001_1111, 0b0000_1101, 0b0011_1101, 0b0110_1111, 0b0100_0111, 0b0111_1011,
    // h i j k l m n o
    0b0001_0111, 0b0001_0000, 0b0011_1000, 0b0001_0111, 0b0011_0000, 0b0001_0101, 0b0001_0101, 0b0001_1101,
    // p q r s t u v w
    0b0110_0111, 0b0111_0011, 0b0000_0101, 0b0101_1011, 0b0000_1111, 0b0001_1100, 0b0001_1100, 0b0001_1100,
    // x y z { | } ~ DEL
    0b0011_0111, 0b0011_1011, 0b0110_1101, 0b0100_1110, 0b0000_0110, 0b0111_1000, 0b0100_0000, 0b0000_0000,
];

/// Read-only lookup from a character code to its segment byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GlyphTable<'a> {
    glyphs: &'a [u8],
}

impl<'a> GlyphTable<'a> {
    pub const fn new(glyphs: &'a [u8]) -> Self {
        GlyphTable { glyphs }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Segments for `code`. Codes past the end of the table render as the blank glyph
    /// (or nothing at all if the table is too short to hold one).
    pub fn encode(&self, code: u8) -> u8 {
        self.glyphs
            .get(code as usize)
            .or_else(|| self.glyphs.get(BLANK as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Segments for a hex digit value, `None` for anything above 15
    pub fn encode_digit(&self, value: u8) -> Option<u8> {
        if value > 0x0F {
            return None;
        }
        Some(self.encode(value))
    }
}

impl Default for GlyphTable<'static> {
    fn default() -> Self {
        GlyphTable::new(&SEVEN_SEGMENT)
    }
}

/// Set the dot bit of a segment byte when `dot` is true
pub fn with_dot(segments: u8, dot: bool) -> u8 {
    if dot {
        segments | DOT
    } else {
        segments
    }
}
