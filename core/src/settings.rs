//! Live video settings shared between the two contexts.

use core::sync::atomic::{AtomicU16, AtomicU8, Ordering};

use crate::palette::{Color, PaletteTable, SCHEME_SIZE};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectMode {
    None = 0,
    /// Darkens every third row and the last sub-pixel of every column.
    PixelEffect = 1,
    /// Darkens every third row.
    Scanlines = 2,
}

impl EffectMode {
    pub const COUNT: usize = 3;

    pub const fn from_u8(value: u8) -> Self {
        match value {
            1 => EffectMode::PixelEffect,
            2 => EffectMode::Scanlines,
            _ => EffectMode::None,
        }
    }

    pub fn cycled(self, direction: i8) -> Self {
        let next = (self as isize + direction as isize).rem_euclid(Self::COUNT as isize);
        Self::from_u8(next as u8)
    }

    pub const fn name(self) -> &'static str {
        match self {
            EffectMode::None => "NONE",
            EffectMode::PixelEffect => "PIXEL",
            EffectMode::Scanlines => "SCANLINES",
        }
    }

    /// Whether every third play row is drawn as a solid tint line.
    #[inline(always)]
    pub const fn darkens_rows(self) -> bool {
        matches!(self, EffectMode::PixelEffect | EffectMode::Scanlines)
    }
}

/// Values the composer reads once per line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SettingsSnapshot {
    pub scheme_offset: usize,
    pub effect: EffectMode,
    pub tint_index: u8,
    pub tint_color: Color,
}

/// Written by the capture context only, read by the render context.
pub struct VideoSettings {
    scheme_offset: AtomicU16,
    effect: AtomicU8,
    tint_index: AtomicU8,
    tint_color: AtomicU16,
}

impl VideoSettings {
    pub const fn new() -> Self {
        Self {
            scheme_offset: AtomicU16::new(0),
            effect: AtomicU8::new(EffectMode::None as u8),
            tint_index: AtomicU8::new(0),
            tint_color: AtomicU16::new(0),
        }
    }

    pub fn scheme_offset(&self) -> usize {
        self.scheme_offset.load(Ordering::Relaxed) as usize
    }

    pub fn effect(&self) -> EffectMode {
        EffectMode::from_u8(self.effect.load(Ordering::Relaxed))
    }

    pub fn tint_index(&self) -> u8 {
        self.tint_index.load(Ordering::Relaxed)
    }

    pub fn tint_color(&self) -> Color {
        self.tint_color.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            scheme_offset: self.scheme_offset(),
            effect: self.effect(),
            tint_index: self.tint_index(),
            tint_color: self.tint_color(),
        }
    }

    /// Selects the scheme at `offset`, rounded down to a whole scheme.
    pub fn set_scheme_offset(&self, palette: &PaletteTable, offset: usize) {
        let offset = (offset % palette.len()) / SCHEME_SIZE * SCHEME_SIZE;
        self.scheme_offset.store(offset as u16, Ordering::Relaxed);
        self.refresh_tint(palette);
    }

    pub fn set_effect(&self, effect: EffectMode) {
        self.effect.store(effect as u8, Ordering::Relaxed);
    }

    pub fn cycle_scheme(&self, palette: &PaletteTable, direction: i8) {
        let offset = palette.step_offset(self.scheme_offset(), direction);
        self.scheme_offset.store(offset as u16, Ordering::Relaxed);
        self.refresh_tint(palette);
    }

    pub fn cycle_effect(&self, direction: i8) {
        self.set_effect(self.effect().cycled(direction));
    }

    pub fn cycle_scanline_tint(&self, palette: &PaletteTable, direction: i8) {
        let index = (self.tint_index() as isize + direction as isize).rem_euclid(SCHEME_SIZE as isize);
        self.tint_index.store(index as u8, Ordering::Relaxed);
        self.refresh_tint(palette);
    }

    /// Re-resolves the tint colour against the active scheme.
    pub fn refresh_tint(&self, palette: &PaletteTable) {
        let color = palette.get(self.scheme_offset() + self.tint_index() as usize);
        self.tint_color.store(color, Ordering::Relaxed);
    }
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self::new()
    }
}
