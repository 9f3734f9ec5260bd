//! Builds one output scanline of the 640x480 frame.
//!
//! | Lines      | Content                                            |
//! |------------|----------------------------------------------------|
//! | 0..24      | solid border colour                                |
//! | 24..456    | play area: source row `(line - 24) / 3`, scaled 3x |
//! | 456..480   | solid border colour                                |
//!
//! While PixelEffect or Scanlines is active, every play line whose index is a
//! multiple of three is drawn as a solid line in the tint colour instead.

use crate::config::{
    BORDER_COLOR, BORDER_HORZ, BORDER_VERT, DIMMED_SUBPIXEL, FIRST_PIXEL_COLOR, LINE_END_COLOR, PIXELS_X,
    PIXEL_SCALE, PLAY_HEIGHT, PLAY_WIDTH,
};
use crate::error::VideoError;
use crate::framebuffer::{FrameBuffer, Pixel};
use crate::osd::Overlay;
use crate::palette::{Color, PaletteTable};
use crate::settings::{EffectMode, VideoSettings};
use crate::video::{CommandWriter, Opcodes, MAX_LINE_WORDS};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineKind {
    Border,
    /// Darkened row of an active effect.
    Effect,
    Play { row: usize },
}

pub struct ScanlineComposer<'a> {
    palette: &'a PaletteTable,
    frame: &'a FrameBuffer,
    settings: &'a VideoSettings,
    overlay: &'a Overlay,
    opcodes: Opcodes,
    source_rows: [u8; PLAY_HEIGHT],
}

impl<'a> ScanlineComposer<'a> {
    pub fn new(
        palette: &'a PaletteTable,
        frame: &'a FrameBuffer,
        settings: &'a VideoSettings,
        overlay: &'a Overlay,
        opcodes: Opcodes,
    ) -> Self {
        Self {
            palette,
            frame,
            settings,
            overlay,
            opcodes,
            source_rows: core::array::from_fn(|i| (i / PIXEL_SCALE) as u8),
        }
    }

    /// Words needed in a scanline buffer.
    pub const fn required_words() -> usize {
        MAX_LINE_WORDS
    }

    pub fn classify(&self, line: usize, effect: EffectMode) -> LineKind {
        if !(BORDER_VERT..BORDER_VERT + PLAY_HEIGHT).contains(&line) {
            return LineKind::Border;
        }
        if effect.darkens_rows() && line % PIXEL_SCALE == 0 {
            return LineKind::Effect;
        }
        LineKind::Play {
            row: self.source_rows[line - BORDER_VERT] as usize,
        }
    }

    /// Writes output line `line` into `buf` and returns the number of words used.
    pub fn compose(&self, buf: &mut [u16], line: usize) -> Result<usize, VideoError> {
        if buf.len() < MAX_LINE_WORDS {
            return Err(VideoError::BufferTooSmall {
                needed: MAX_LINE_WORDS,
                available: buf.len(),
            });
        }

        let settings = self.settings.snapshot();
        let writer = CommandWriter::new(buf, self.opcodes);
        let used = match self.classify(line, settings.effect) {
            LineKind::Border => solid_line(writer, BORDER_COLOR),
            LineKind::Effect => solid_line(writer, settings.tint_color),
            LineKind::Play { row } => self.play_line(writer, row, settings.scheme_offset, settings.effect, settings.tint_color),
        };
        Ok(used)
    }

    fn play_line(
        &self,
        mut writer: CommandWriter<'_>,
        row: usize,
        scheme_offset: usize,
        effect: EffectMode,
        tint: Color,
    ) -> usize {
        let mut pixels = [Pixel::default(); PIXELS_X];
        self.frame.row(row, &mut pixels);

        let osd_shown = self.overlay.is_enabled();
        let dim = effect == EffectMode::PixelEffect;

        writer.color_run(BORDER_COLOR, BORDER_HORZ - 1);
        writer.raw_run(FIRST_PIXEL_COLOR, PLAY_WIDTH);

        for (x, &pixel) in pixels.iter().enumerate() {
            let osd = if osd_shown { self.overlay.covering(x, row).map(Color::from) } else { None };

            for sub in 0..PIXEL_SCALE {
                if x == 0 && sub == 0 {
                    // sentinel already written in the run header
                    continue;
                }
                let color = match osd {
                    Some(color) => color,
                    None if dim && sub == DIMMED_SUBPIXEL => tint,
                    None => self.palette.resolve(pixel, scheme_offset),
                };
                writer.raw(color);
            }
        }

        writer.color_run(BORDER_COLOR, BORDER_HORZ);
        writer.raw_1p(LINE_END_COLOR);
        writer.end_of_line()
    }
}

fn solid_line(mut writer: CommandWriter<'_>, color: Color) -> usize {
    writer.color_run(BORDER_COLOR, BORDER_HORZ - 1);
    writer.color_run(color, PLAY_WIDTH);
    writer.color_run(BORDER_COLOR, BORDER_HORZ);
    writer.raw_1p(LINE_END_COLOR);
    writer.end_of_line()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OUTPUT_HEIGHT, OUTPUT_WIDTH};
    use crate::osd::{OsdRenderer, OSD_HEIGHT, OSD_WIDTH, OSD_X, OSD_Y};
    use crate::video::decode_line;

    struct Fixture {
        frame: FrameBuffer,
        settings: VideoSettings,
        overlay: Overlay,
    }

    impl Fixture {
        fn new() -> Self {
            let fixture = Self {
                frame: FrameBuffer::new(),
                settings: VideoSettings::new(),
                overlay: Overlay::new(),
            };
            fixture.settings.refresh_tint(PaletteTable::builtin());
            fixture
        }

        fn composer(&self) -> ScanlineComposer<'_> {
            ScanlineComposer::new(PaletteTable::builtin(), &self.frame, &self.settings, &self.overlay, Opcodes::DEFAULT)
        }
    }

    fn render(composer: &ScanlineComposer<'_>, line: usize) -> (usize, [Color; OUTPUT_WIDTH]) {
        let mut buf = [0u16; MAX_LINE_WORDS];
        let used = composer.compose(&mut buf, line).unwrap();
        let mut out = [0; OUTPUT_WIDTH];
        assert_eq!(decode_line(&buf[..used], &Opcodes::DEFAULT, &mut out), Ok(OUTPUT_WIDTH));
        (used, out)
    }

    #[test]
    fn border_lines_ignore_the_frame() {
        let fixture = Fixture::new();
        fixture.frame.fill(Pixel::new(2));
        let composer = fixture.composer();

        for line in [0, BORDER_VERT - 1, BORDER_VERT + PLAY_HEIGHT, OUTPUT_HEIGHT - 1] {
            let mut buf = [0u16; MAX_LINE_WORDS];
            let used = composer.compose(&mut buf, line).unwrap();
            assert_eq!(used, 12);
            assert_eq!(buf[0], Opcodes::DEFAULT.color_run);
            assert_eq!(buf[3], Opcodes::DEFAULT.color_run);
            assert_eq!(buf[6], Opcodes::DEFAULT.color_run);
            assert_eq!(buf[9], Opcodes::DEFAULT.raw_1p);
            assert_eq!(buf[11], Opcodes::DEFAULT.eol_align);

            let (_, out) = render(&composer, line);
            assert!(out[..OUTPUT_WIDTH - 1].iter().all(|&c| c == BORDER_COLOR));
            assert_eq!(out[OUTPUT_WIDTH - 1], LINE_END_COLOR);
        }
    }

    #[test]
    fn play_line_starts_with_the_sentinel() {
        let fixture = Fixture::new();
        fixture.frame.fill(Pixel::new(1));
        let composer = fixture.composer();

        let (used, out) = render(&composer, BORDER_VERT + 1);
        assert_eq!(used, MAX_LINE_WORDS);
        let light = PaletteTable::builtin().get(1);
        assert_ne!(light, FIRST_PIXEL_COLOR);
        assert_eq!(out[BORDER_HORZ - 1], FIRST_PIXEL_COLOR);
        assert!(out[BORDER_HORZ..BORDER_HORZ - 1 + PLAY_WIDTH].iter().all(|&c| c == light));
        assert_eq!(out[BORDER_HORZ - 2], BORDER_COLOR);
        assert_eq!(out[BORDER_HORZ - 1 + PLAY_WIDTH], BORDER_COLOR);
    }

    #[test]
    fn rows_are_scaled_three_times() {
        let fixture = Fixture::new();
        let composer = fixture.composer();
        for line in BORDER_VERT..BORDER_VERT + PLAY_HEIGHT {
            assert_eq!(
                composer.classify(line, EffectMode::None),
                LineKind::Play { row: (line - BORDER_VERT) / PIXEL_SCALE }
            );
        }
    }

    #[test]
    fn columns_are_scaled_three_times() {
        let fixture = Fixture::new();
        fixture.frame.set(10, 0, Pixel::new(2));
        let composer = fixture.composer();
        let palette = PaletteTable::builtin();

        let (_, out) = render(&composer, BORDER_VERT);
        let start = BORDER_HORZ - 1 + 10 * PIXEL_SCALE;
        assert_eq!(out[start - 1], palette.get(0));
        assert_eq!(&out[start..start + 3], &[palette.get(2); 3]);
        assert_eq!(out[start + 3], palette.get(0));
    }

    #[test]
    fn effect_rows_use_the_tint() {
        let fixture = Fixture::new();
        fixture.settings.set_effect(EffectMode::Scanlines);
        fixture.settings.cycle_scanline_tint(PaletteTable::builtin(), 1);
        let composer = fixture.composer();
        let tint = fixture.settings.tint_color();

        assert_eq!(composer.classify(BORDER_VERT, EffectMode::Scanlines), LineKind::Effect);
        let (used, out) = render(&composer, BORDER_VERT);
        assert_eq!(used, 12);
        assert!(out[BORDER_HORZ - 1..BORDER_HORZ - 1 + PLAY_WIDTH].iter().all(|&c| c == tint));

        assert_eq!(composer.classify(BORDER_VERT + 1, EffectMode::Scanlines), LineKind::Play { row: 0 });
    }

    #[test]
    fn pixel_effect_dims_the_last_sub_pixel() {
        let fixture = Fixture::new();
        fixture.settings.set_effect(EffectMode::PixelEffect);
        fixture.settings.cycle_scanline_tint(PaletteTable::builtin(), -1);
        let composer = fixture.composer();
        let tint = fixture.settings.tint_color();
        let base = PaletteTable::builtin().get(0);

        let (_, out) = render(&composer, BORDER_VERT + 1);
        for x in 1..PIXELS_X {
            let start = BORDER_HORZ - 1 + x * PIXEL_SCALE;
            assert_eq!(&out[start..start + 3], &[base, base, tint]);
        }
    }

    #[test]
    fn osd_overrides_every_effect() {
        let fixture = Fixture::new();
        let mut osd = OsdRenderer::new(&fixture.overlay);
        osd.set_line_text(0, "PAL: DMG");
        osd.render();
        fixture.overlay.set_enabled(true);
        let composer = fixture.composer();

        for effect in [EffectMode::None, EffectMode::PixelEffect, EffectMode::Scanlines] {
            fixture.settings.set_effect(effect);
            for row in [OSD_Y, OSD_Y + 9, OSD_Y + OSD_HEIGHT - 1] {
                // middle line of the three is never an effect row
                let line = BORDER_VERT + row * PIXEL_SCALE + 1;
                assert!(matches!(composer.classify(line, effect), LineKind::Play { .. }));
                let (_, out) = render(&composer, line);
                for x in OSD_X..OSD_X + OSD_WIDTH {
                    let expected = fixture.overlay.pixel(x - OSD_X, row - OSD_Y) as Color;
                    for sub in 0..PIXEL_SCALE {
                        assert_eq!(out[BORDER_HORZ - 1 + x * PIXEL_SCALE + sub], expected, "x {x} sub {sub}");
                    }
                }
            }
        }
    }

    #[test]
    fn hidden_osd_is_not_composited() {
        let fixture = Fixture::new();
        let osd = OsdRenderer::new(&fixture.overlay);
        osd.render();
        let composer = fixture.composer();

        let (_, out) = render(&composer, BORDER_VERT + OSD_Y * PIXEL_SCALE + 1);
        let base = PaletteTable::builtin().get(0);
        assert!(out[BORDER_HORZ..BORDER_HORZ - 1 + PLAY_WIDTH].iter().all(|&c| c == base));
    }

    #[test]
    fn small_buffers_are_rejected() {
        let fixture = Fixture::new();
        let composer = fixture.composer();
        let mut buf = [0u16; 100];
        assert_eq!(
            composer.compose(&mut buf, 0),
            Err(VideoError::BufferTooSmall { needed: MAX_LINE_WORDS, available: 100 })
        );
    }
}
