//! 7x8 bitmap font for the on-screen menu.
//!
//! Each glyph is eight rows; the low seven bits of a row are the pixels,
//! most significant first.

pub const GLYPH_WIDTH: usize = 7;
pub const GLYPH_HEIGHT: usize = 8;

pub type Glyph = [u8; GLYPH_HEIGHT];

pub const BLANK: Glyph = [0; GLYPH_HEIGHT];

const GLYPH_A: Glyph = [0x00, 0x1C, 0x22, 0x22, 0x3E, 0x22, 0x22, 0x00];
const GLYPH_B: Glyph = [0x00, 0x3C, 0x22, 0x3C, 0x22, 0x22, 0x3E, 0x00];
const GLYPH_C: Glyph = [0x00, 0x1C, 0x22, 0x20, 0x20, 0x22, 0x1C, 0x00];
const GLYPH_D: Glyph = [0x00, 0x3C, 0x22, 0x22, 0x22, 0x22, 0x3C, 0x00];
const GLYPH_E: Glyph = [0x00, 0x3E, 0x20, 0x38, 0x20, 0x20, 0x3E, 0x00];
const GLYPH_F: Glyph = [0x00, 0x3E, 0x20, 0x38, 0x20, 0x20, 0x20, 0x00];
const GLYPH_G: Glyph = [0x00, 0x1C, 0x22, 0x20, 0x26, 0x22, 0x1C, 0x00];
const GLYPH_H: Glyph = [0x00, 0x22, 0x22, 0x3E, 0x22, 0x22, 0x22, 0x00];
const GLYPH_I: Glyph = [0x00, 0x3E, 0x08, 0x08, 0x08, 0x08, 0x3E, 0x00];
const GLYPH_J: Glyph = [0x00, 0x3E, 0x04, 0x04, 0x04, 0x24, 0x3C, 0x00];
const GLYPH_K: Glyph = [0x00, 0x22, 0x24, 0x38, 0x28, 0x24, 0x22, 0x00];
const GLYPH_L: Glyph = [0x00, 0x20, 0x20, 0x20, 0x20, 0x20, 0x3E, 0x00];
const GLYPH_M: Glyph = [0x00, 0x22, 0x36, 0x2A, 0x22, 0x22, 0x22, 0x00];
const GLYPH_N: Glyph = [0x00, 0x22, 0x32, 0x2A, 0x26, 0x22, 0x22, 0x00];
const GLYPH_O: Glyph = [0x00, 0x1C, 0x22, 0x22, 0x22, 0x22, 0x1C, 0x00];
const GLYPH_P: Glyph = [0x00, 0x3C, 0x22, 0x22, 0x3C, 0x20, 0x20, 0x00];
const GLYPH_Q: Glyph = [0x00, 0x1C, 0x22, 0x22, 0x22, 0x26, 0x1D, 0x00];
const GLYPH_R: Glyph = [0x00, 0x3C, 0x22, 0x3E, 0x24, 0x22, 0x22, 0x00];
const GLYPH_S: Glyph = [0x00, 0x1C, 0x20, 0x18, 0x0C, 0x02, 0x3C, 0x00];
const GLYPH_T: Glyph = [0x00, 0x3E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x00];
const GLYPH_U: Glyph = [0x00, 0x22, 0x22, 0x22, 0x22, 0x22, 0x1C, 0x00];
const GLYPH_V: Glyph = [0x00, 0x22, 0x22, 0x22, 0x14, 0x08, 0x08, 0x00];
const GLYPH_W: Glyph = [0x00, 0x22, 0x22, 0x22, 0x2A, 0x36, 0x22, 0x00];
const GLYPH_X: Glyph = [0x00, 0x22, 0x14, 0x08, 0x08, 0x14, 0x22, 0x00];
const GLYPH_Y: Glyph = [0x00, 0x22, 0x22, 0x14, 0x08, 0x08, 0x08, 0x00];
const GLYPH_Z: Glyph = [0x00, 0x3E, 0x04, 0x08, 0x10, 0x20, 0x3E, 0x00];
const DIGIT_0: Glyph = [0x00, 0x1C, 0x26, 0x2A, 0x2A, 0x32, 0x1C, 0x00];
const DIGIT_1: Glyph = [0x00, 0x08, 0x18, 0x28, 0x08, 0x08, 0x3E, 0x00];
const DIGIT_2: Glyph = [0x00, 0x1C, 0x22, 0x04, 0x18, 0x20, 0x3E, 0x00];
const DIGIT_3: Glyph = [0x00, 0x3E, 0x02, 0x1C, 0x02, 0x22, 0x1C, 0x00];
const DIGIT_4: Glyph = [0x00, 0x22, 0x22, 0x3E, 0x02, 0x02, 0x02, 0x00];
const DIGIT_5: Glyph = [0x00, 0x3E, 0x20, 0x3C, 0x02, 0x22, 0x1C, 0x00];
const DIGIT_6: Glyph = [0x00, 0x1C, 0x20, 0x3C, 0x22, 0x22, 0x1C, 0x00];
const DIGIT_7: Glyph = [0x00, 0x3E, 0x02, 0x04, 0x08, 0x10, 0x10, 0x00];
const DIGIT_8: Glyph = [0x00, 0x1C, 0x22, 0x1C, 0x22, 0x22, 0x1C, 0x00];
const DIGIT_9: Glyph = [0x00, 0x1C, 0x22, 0x22, 0x1E, 0x02, 0x1C, 0x00];
const EXCLAMATION: Glyph = [0x00, 0x08, 0x08, 0x08, 0x08, 0x00, 0x08, 0x00];
const COLON: Glyph = [0x00, 0x00, 0x00, 0x10, 0x00, 0x10, 0x00, 0x00];

/// Glyph for `ch`. The set is uppercase only; anything without a glyph,
/// lowercase included, is drawn blank.
pub fn glyph(ch: u8) -> &'static Glyph {
    match ch {
        b'A' => &GLYPH_A,
        b'B' => &GLYPH_B,
        b'C' => &GLYPH_C,
        b'D' => &GLYPH_D,
        b'E' => &GLYPH_E,
        b'F' => &GLYPH_F,
        b'G' => &GLYPH_G,
        b'H' => &GLYPH_H,
        b'I' => &GLYPH_I,
        b'J' => &GLYPH_J,
        b'K' => &GLYPH_K,
        b'L' => &GLYPH_L,
        b'M' => &GLYPH_M,
        b'N' => &GLYPH_N,
        b'O' => &GLYPH_O,
        b'P' => &GLYPH_P,
        b'Q' => &GLYPH_Q,
        b'R' => &GLYPH_R,
        b'S' => &GLYPH_S,
        b'T' => &GLYPH_T,
        b'U' => &GLYPH_U,
        b'V' => &GLYPH_V,
        b'W' => &GLYPH_W,
        b'X' => &GLYPH_X,
        b'Y' => &GLYPH_Y,
        b'Z' => &GLYPH_Z,
        b'0' => &DIGIT_0,
        b'1' => &DIGIT_1,
        b'2' => &DIGIT_2,
        b'3' => &DIGIT_3,
        b'4' => &DIGIT_4,
        b'5' => &DIGIT_5,
        b'6' => &DIGIT_6,
        b'7' => &DIGIT_7,
        b'8' => &DIGIT_8,
        b'9' => &DIGIT_9,
        b'!' => &EXCLAMATION,
        b':' => &COLON,
        _ => &BLANK,
    }
}
