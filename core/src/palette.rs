//! Colour schemes.
//!
//! A scheme is four consecutive entries of the colour table, one per 2-bit
//! source pixel value. The active scheme is selected by an offset into the
//! table that is always a multiple of [`SCHEME_SIZE`].

use crate::framebuffer::Pixel;

/// RGB222 colour word as consumed by the video engine.
pub type Color = u16;

pub const R_SHIFT: u16 = 0;
pub const G_SHIFT: u16 = 2;
pub const B_SHIFT: u16 = 4;

pub const SCHEME_SIZE: usize = 4;

/// Packs an 8-bit-per-channel colour, keeping the top two bits of each channel.
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    (((b as u16) >> 6) << B_SHIFT) | (((g as u16) >> 6) << G_SHIFT) | (((r as u16) >> 6) << R_SHIFT)
}

/// Expands a colour word back to 8 bits per channel.
pub const fn to_rgb888(color: Color) -> [u8; 3] {
    let r = ((color >> R_SHIFT) & 0b11) as u8;
    let g = ((color >> G_SHIFT) & 0b11) as u8;
    let b = ((color >> B_SHIFT) & 0b11) as u8;
    [r * 0x55, g * 0x55, b * 0x55]
}

static COLORS: [Color; 148] = [
    // Black and white
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xB5, 0xB2, 0xB5),
    rgb(0x4E, 0x4C, 0x4E),
    rgb(0x00, 0x00, 0x00),
    // Inverted
    rgb(0x00, 0x00, 0x00),
    rgb(0x4E, 0x4C, 0x4E),
    rgb(0xB5, 0xB2, 0xB5),
    rgb(0xF7, 0xF3, 0xF7),
    // DMG
    rgb(0x7B, 0x82, 0x10),
    rgb(0x5A, 0x79, 0x42),
    rgb(0x39, 0x59, 0x4A),
    rgb(0x29, 0x41, 0x39),
    // Game Boy Pocket
    rgb(0xC6, 0xCB, 0xA5),
    rgb(0x8C, 0x92, 0x6B),
    rgb(0x4A, 0x51, 0x39),
    rgb(0x18, 0x18, 0x18),
    // Game Boy Light
    rgb(0x00, 0xB2, 0x84),
    rgb(0x8C, 0x92, 0x6B),
    rgb(0x00, 0x69, 0x4A),
    rgb(0x00, 0x51, 0x39),
    // SGB 1A
    rgb(0xF7, 0xE3, 0xC6),
    rgb(0xD6, 0x92, 0x4A),
    rgb(0xA5, 0x28, 0x21),
    rgb(0x31, 0x18, 0x52),
    // SGB 2A
    rgb(0xEF, 0xC3, 0x9C),
    rgb(0xBD, 0x8A, 0x4A),
    rgb(0x29, 0x79, 0x00),
    rgb(0x00, 0x00, 0x00),
    // SGB 3A
    rgb(0xF7, 0xCB, 0x94),
    rgb(0x73, 0xBA, 0xBD),
    rgb(0xF7, 0x61, 0x29),
    rgb(0x31, 0x49, 0x63),
    // SGB 4A
    rgb(0xEF, 0xA2, 0x6B),
    rgb(0x7B, 0xA2, 0xF7),
    rgb(0xCE, 0x00, 0xCE),
    rgb(0x00, 0x00, 0x7B),
    // SGB 1B
    rgb(0xD6, 0xD3, 0xBD),
    rgb(0xC6, 0xAA, 0x73),
    rgb(0xAD, 0x51, 0x10),
    rgb(0x00, 0x00, 0x00),
    // SGB 2B
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xF7, 0xE3, 0x52),
    rgb(0xF7, 0x30, 0x00),
    rgb(0x52, 0x00, 0x5A),
    // SGB 3B
    rgb(0xD6, 0xD3, 0xBD),
    rgb(0xDE, 0x82, 0x21),
    rgb(0x00, 0x51, 0x00),
    rgb(0x00, 0x10, 0x10),
    // SGB 4B
    rgb(0xEF, 0xE3, 0xEF),
    rgb(0xE7, 0x9A, 0x63),
    rgb(0x42, 0x79, 0x39),
    rgb(0x18, 0x08, 0x08),
    // SGB 1C
    rgb(0xF7, 0xBA, 0xF7),
    rgb(0xE7, 0x92, 0x52),
    rgb(0x94, 0x38, 0x63),
    rgb(0x39, 0x38, 0x94),
    // SGB 2C
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xE7, 0x8A, 0x8C),
    rgb(0x7B, 0x30, 0xE7),
    rgb(0x29, 0x28, 0x94),
    // SGB 3C
    rgb(0xDE, 0xA2, 0xC6),
    rgb(0xF7, 0xF3, 0x7B),
    rgb(0x00, 0xB2, 0xF7),
    rgb(0x21, 0x20, 0x5A),
    // SGB 4C
    rgb(0xF7, 0xDB, 0xDE),
    rgb(0xF7, 0xF3, 0x7B),
    rgb(0x94, 0x9A, 0xDE),
    rgb(0x08, 0x00, 0x00),
    // SGB 1D
    rgb(0xF7, 0xF3, 0xA5),
    rgb(0xBD, 0x82, 0x4A),
    rgb(0xF7, 0x00, 0x00),
    rgb(0x52, 0x18, 0x00),
    // SGB 2D
    rgb(0xF7, 0xF3, 0x9C),
    rgb(0x00, 0xF3, 0x00),
    rgb(0xF7, 0x30, 0x00),
    rgb(0x00, 0x00, 0x52),
    // SGB 3D
    rgb(0xEF, 0xF3, 0xB5),
    rgb(0xDE, 0xA2, 0x7B),
    rgb(0x96, 0xAD, 0x52),
    rgb(0x00, 0x00, 0x00),
    // SGB 4D
    rgb(0xF7, 0xF3, 0xB5),
    rgb(0x94, 0xC3, 0xC6),
    rgb(0x4A, 0x69, 0x7B),
    rgb(0x08, 0x20, 0x4A),
    // SGB 1E
    rgb(0xF7, 0xD3, 0xAD),
    rgb(0x7B, 0xBA, 0x7B),
    rgb(0x6B, 0x8A, 0x42),
    rgb(0x5A, 0x38, 0x21),
    // SGB 2E
    rgb(0xF7, 0xC3, 0x84),
    rgb(0x94, 0xAA, 0xDE),
    rgb(0x29, 0x10, 0x63),
    rgb(0x10, 0x08, 0x10),
    // SGB 3E
    rgb(0xF7, 0xF3, 0xBD),
    rgb(0xDE, 0xAA, 0x6B),
    rgb(0xAD, 0x79, 0x21),
    rgb(0x52, 0x49, 0x73),
    // SGB 4E
    rgb(0xF7, 0xD3, 0xA5),
    rgb(0xDE, 0xA2, 0x7B),
    rgb(0x7B, 0x59, 0x8C),
    rgb(0x00, 0x20, 0x31),
    // SGB 1F
    rgb(0xD6, 0xE3, 0xF7),
    rgb(0xDE, 0x8A, 0x52),
    rgb(0xA5, 0x00, 0x00),
    rgb(0x00, 0x41, 0x10),
    // SGB 2F
    rgb(0xCE, 0xF3, 0xF7),
    rgb(0xF7, 0x92, 0x52),
    rgb(0x9C, 0x00, 0x00),
    rgb(0x18, 0x00, 0x00),
    // SGB 3F
    rgb(0x7B, 0x79, 0xC6),
    rgb(0xF7, 0x69, 0xF7),
    rgb(0xF7, 0xCB, 0x00),
    rgb(0x42, 0x41, 0x42),
    // SGB 4F
    rgb(0xB5, 0xCB, 0xCE),
    rgb(0xD6, 0x82, 0xD6),
    rgb(0x84, 0x00, 0x9C),
    rgb(0x39, 0x00, 0x00),
    // SGB 1G
    rgb(0x00, 0x00, 0x52),
    rgb(0x00, 0x9A, 0xE7),
    rgb(0x7B, 0x79, 0x00),
    rgb(0xF7, 0xF3, 0x5A),
    // SGB 2G
    rgb(0x6B, 0xB2, 0x39),
    rgb(0xDE, 0x51, 0x42),
    rgb(0xDE, 0xB2, 0x84),
    rgb(0x00, 0x18, 0x00),
    // SGB 3G
    rgb(0x63, 0xD3, 0x52),
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xC6, 0x30, 0x39),
    rgb(0x39, 0x00, 0x00),
    // SGB 4G
    rgb(0xAD, 0xDB, 0x18),
    rgb(0xB5, 0x20, 0x5A),
    rgb(0x29, 0x10, 0x00),
    rgb(0x00, 0x82, 0x63),
    // SGB 1H
    rgb(0xF7, 0xE3, 0xDE),
    rgb(0xF7, 0xB2, 0x8C),
    rgb(0x84, 0x41, 0x00),
    rgb(0x31, 0x18, 0x00),
    // SGB 2H
    rgb(0xF7, 0xF3, 0xF7),
    rgb(0xB5, 0xB2, 0xB5),
    rgb(0x73, 0x71, 0x73),
    rgb(0x00, 0x00, 0x00),
    // SGB 3H
    rgb(0xDE, 0xF3, 0x9C),
    rgb(0x7B, 0xC3, 0x39),
    rgb(0x4A, 0x8A, 0x18),
    rgb(0x08, 0x18, 0x00),
    // SGB 4H
    rgb(0xF7, 0xF3, 0xC6),
    rgb(0xB5, 0xBA, 0x5A),
    rgb(0x84, 0x8A, 0x42),
    rgb(0x42, 0x51, 0x29),
];

static SCHEME_NAMES: [&str; 37] = [
    "BLACK WHITE", "INVERTED", "DMG", "POCKET", "LIGHT", "SGB 1A",
    "SGB 2A", "SGB 3A", "SGB 4A", "SGB 1B", "SGB 2B", "SGB 3B",
    "SGB 4B", "SGB 1C", "SGB 2C", "SGB 3C", "SGB 4C", "SGB 1D",
    "SGB 2D", "SGB 3D", "SGB 4D", "SGB 1E", "SGB 2E", "SGB 3E",
    "SGB 4E", "SGB 1F", "SGB 2F", "SGB 3F", "SGB 4F", "SGB 1G",
    "SGB 2G", "SGB 3G", "SGB 4G", "SGB 1H", "SGB 2H", "SGB 3H",
    "SGB 4H",
];

#[derive(Debug)]
pub struct PaletteTable {
    colors: &'static [Color],
    names: &'static [&'static str],
}

static BUILTIN: PaletteTable = PaletteTable {
    colors: &COLORS,
    names: &SCHEME_NAMES,
};

impl PaletteTable {
    /// The DMG, Pocket, Light and Super Game Boy schemes.
    pub fn builtin() -> &'static PaletteTable {
        &BUILTIN
    }

    /// `colors` must hold whole schemes, with one name per scheme.
    pub const fn new(colors: &'static [Color], names: &'static [&'static str]) -> Self {
        assert!(!colors.is_empty() && colors.len() % SCHEME_SIZE == 0);
        assert!(names.len() == colors.len() / SCHEME_SIZE);
        Self { colors, names }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline(always)]
    pub fn scheme_count(&self) -> usize {
        self.colors.len() / SCHEME_SIZE
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Color {
        self.colors[index]
    }

    /// Colour of `pixel` in the scheme starting at `offset`.
    #[inline(always)]
    pub fn resolve(&self, pixel: Pixel, offset: usize) -> Color {
        self.colors[offset + pixel.index()]
    }

    pub fn scheme_name(&self, offset: usize) -> &'static str {
        self.names[offset / SCHEME_SIZE]
    }

    /// Moves `offset` by `direction` whole schemes, wrapping at both ends.
    pub fn step_offset(&self, offset: usize, direction: i8) -> usize {
        let count = self.scheme_count() as isize;
        let scheme = (offset / SCHEME_SIZE) as isize + direction as isize;
        scheme.rem_euclid(count) as usize * SCHEME_SIZE
    }
}
