mod common;

use common::{NoReset, RecordingEngine, ScriptedPad, SteppingTimer};
use gbvga_core::config::{
    BORDER_COLOR, BORDER_HORZ, BORDER_VERT, FIRST_PIXEL_COLOR, LINE_END_COLOR, OUTPUT_HEIGHT, OUTPUT_WIDTH, PIXELS_X,
    PIXELS_Y, PIXEL_SCALE, PLAY_HEIGHT, PLAY_WIDTH,
};
use gbvga_core::framebuffer::Pixel;
use gbvga_core::palette::PaletteTable;
use gbvga_core::synth::LcdSignal;
use gbvga_core::video::{decode_line, Opcodes, MAX_LINE_WORDS};
use gbvga_core::{CaptureContext, RenderContext, SharedState, VideoError};

fn decode(words: &[u16]) -> Vec<u16> {
    let mut out = vec![0; OUTPUT_WIDTH];
    let pixels = decode_line(words, &Opcodes::DEFAULT, &mut out).unwrap();
    assert_eq!(pixels, OUTPUT_WIDTH);
    out
}

// =================================================================
// End to end
// =================================================================

#[test]
fn test_uniform_frame_end_to_end() {
    let shared = SharedState::new();
    let palette = PaletteTable::builtin();
    let bus = LcdSignal::new(|_, _| Pixel::new(1));

    let mut capture = CaptureContext::init(&shared, palette, bus, ScriptedPad::idle(), NoReset::default(), SteppingTimer::new(20_000));
    assert!(shared.init.is_released());
    assert_eq!(capture.tick(), None);
    assert_eq!(capture.frames(), 1);

    let mut render = RenderContext::new(&shared, palette, Opcodes::DEFAULT, RecordingEngine::new()).unwrap();
    for _ in 0..OUTPUT_HEIGHT {
        render.tick().unwrap();
    }

    let engine = render.into_engine();
    assert_eq!(engine.lines.len(), OUTPUT_HEIGHT);
    for (line, words) in engine.lines.iter().enumerate() {
        let out = decode(words);
        let play = (BORDER_VERT..BORDER_VERT + PLAY_HEIGHT).contains(&line);

        assert!(out[..BORDER_HORZ - 1].iter().all(|&c| c == BORDER_COLOR));
        assert!(out[BORDER_HORZ - 1 + PLAY_WIDTH..OUTPUT_WIDTH - 1].iter().all(|&c| c == BORDER_COLOR));
        assert_eq!(out[OUTPUT_WIDTH - 1], LINE_END_COLOR);

        if play {
            assert_eq!(words.len(), 3 + 3 + PIXELS_X * PIXEL_SCALE + 3 + 2 + 1);
            assert_eq!(out[BORDER_HORZ - 1], FIRST_PIXEL_COLOR);
            assert!(out[BORDER_HORZ..BORDER_HORZ - 1 + PLAY_WIDTH].iter().all(|&c| c == palette.get(1)));
        } else {
            assert_eq!(words.len(), 12);
            assert!(out[BORDER_HORZ - 1..BORDER_HORZ - 1 + PLAY_WIDTH].iter().all(|&c| c == BORDER_COLOR));
        }
    }
}

#[test]
fn test_captured_pattern_reaches_the_output() {
    let shared = SharedState::new();
    let palette = PaletteTable::builtin();
    let bus = LcdSignal::new(|x, y| Pixel::new(((x / 8 + y / 8) % 4) as u8));

    let mut capture = CaptureContext::init(&shared, palette, bus, ScriptedPad::idle(), NoReset::default(), SteppingTimer::new(20_000));
    capture.tick();

    let mut render = RenderContext::new(&shared, palette, Opcodes::DEFAULT, RecordingEngine::new()).unwrap();
    for _ in 0..OUTPUT_HEIGHT {
        render.tick().unwrap();
    }
    let engine = render.into_engine();

    for y in [0, 17, 80, PIXELS_Y - 1] {
        let out = decode(&engine.lines[BORDER_VERT + y * PIXEL_SCALE + 1]);
        for x in 1..PIXELS_X {
            let expected = palette.get(((x / 8 + y / 8) % 4) as usize);
            let at = BORDER_HORZ - 1 + x * PIXEL_SCALE;
            assert_eq!(&out[at..at + PIXEL_SCALE], &[expected; PIXEL_SCALE], "pixel {x},{y}");
        }
    }
}

#[test]
fn test_short_frames_exit_early() {
    let shared = SharedState::new();
    let palette = PaletteTable::builtin();
    let bus = LcdSignal::new(|_, y| Pixel::new((y % 4) as u8)).with_rows(120, 0);

    shared.frame.fill(Pixel::new(3));
    let mut capture = CaptureContext::init(&shared, palette, bus, ScriptedPad::idle(), NoReset::default(), SteppingTimer::new(20_000));
    capture.tick();

    assert_eq!(shared.frame.get(0, 118), Pixel::new(2));
    // first row of the following frame lands right after the short frame
    assert_eq!(shared.frame.get(0, 120), Pixel::new(0));
    assert_eq!(shared.frame.get(0, 121), Pixel::new(3));
    assert_eq!(shared.frame.get(0, PIXELS_Y - 1), Pixel::new(3));
}

// =================================================================
// Render preconditions
// =================================================================

#[test]
fn test_render_rejects_small_engine_buffers() {
    let shared = SharedState::new();
    let engine = RecordingEngine::with_capacity(MAX_LINE_WORDS - 1);

    let result = RenderContext::new(&shared, PaletteTable::builtin(), Opcodes::DEFAULT, engine);
    assert!(matches!(
        result,
        Err(VideoError::BufferTooSmall { needed: MAX_LINE_WORDS, available }) if available == MAX_LINE_WORDS - 1
    ));
}

#[test]
fn test_render_run_stops_on_a_short_line_buffer() {
    let shared = SharedState::new();
    shared.init.release();
    let engine = RecordingEngine::claiming(MAX_LINE_WORDS, 16);

    let mut render = RenderContext::new(&shared, PaletteTable::builtin(), Opcodes::DEFAULT, engine).unwrap();
    let result = render.run();
    assert!(matches!(
        result,
        Err(VideoError::BufferTooSmall { needed: MAX_LINE_WORDS, available: 16 })
    ));
    assert!(render.engine().lines.is_empty());
}

#[test]
fn test_render_does_not_wait_for_a_fresh_frame() {
    let shared = SharedState::new();
    shared.init.release();

    let mut render = RenderContext::new(&shared, PaletteTable::builtin(), Opcodes::DEFAULT, RecordingEngine::new()).unwrap();
    for _ in 0..OUTPUT_HEIGHT * 2 {
        render.tick().unwrap();
    }
    assert_eq!(render.engine().lines.len(), OUTPUT_HEIGHT * 2);
}

#[test]
fn test_contexts_run_on_separate_threads() {
    let shared = SharedState::new();
    let palette = PaletteTable::builtin();

    std::thread::scope(|s| {
        let renderer = s.spawn(|| {
            shared.init.wait();
            let mut render = RenderContext::new(&shared, palette, Opcodes::DEFAULT, RecordingEngine::new()).unwrap();
            for _ in 0..OUTPUT_HEIGHT {
                render.tick().unwrap();
            }
            render.into_engine().lines.len()
        });

        let bus = LcdSignal::new(|_, _| Pixel::new(2));
        let mut capture = CaptureContext::init(&shared, palette, bus, ScriptedPad::idle(), NoReset::default(), SteppingTimer::new(20_000));
        for _ in 0..3 {
            capture.tick();
        }

        assert_eq!(renderer.join().unwrap(), OUTPUT_HEIGHT);
    });
    assert_eq!(shared.frame.get(PIXELS_X - 1, PIXELS_Y - 1), Pixel::new(2));
}
