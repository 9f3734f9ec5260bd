mod common;

use common::{NoReset, RecordingEngine, ScriptedPad, SteppingTimer};
use gbvga_core::command::Command;
use gbvga_core::config::{BORDER_HORZ, BORDER_VERT, OUTPUT_WIDTH, PIXEL_SCALE};
use gbvga_core::framebuffer::Pixel;
use gbvga_core::input::{Button, ButtonState};
use gbvga_core::mux::{PortDriver, SelectEdge};
use gbvga_core::osd::{OSD_WIDTH, OSD_X, OSD_Y};
use gbvga_core::palette::PaletteTable;
use gbvga_core::pins::{PortLines, PortOutputs};
use gbvga_core::settings::EffectMode;
use gbvga_core::synth::LcdSignal;
use gbvga_core::video::{decode_line, Opcodes};
use gbvga_core::{CaptureContext, RenderContext, SharedState};

const IDLE: ButtonState = ButtonState::RELEASED;

fn held(buttons: &[Button]) -> ButtonState {
    IDLE.pressing(buttons)
}

/// Pad script that opens the menu over two polls.
fn open_menu() -> Vec<ButtonState> {
    vec![held(&[Button::Select, Button::Start]), held(&[Button::Select]), IDLE]
}

fn render_line(shared: &SharedState, line: usize) -> Vec<u16> {
    let mut render = RenderContext::new(shared, PaletteTable::builtin(), Opcodes::DEFAULT, RecordingEngine::new()).unwrap();
    for _ in 0..=line {
        render.tick().unwrap();
    }
    let words = render.into_engine().lines.pop().unwrap();
    let mut out = vec![0; OUTPUT_WIDTH];
    decode_line(&words, &Opcodes::DEFAULT, &mut out).unwrap();
    out
}

#[derive(Default)]
struct PortRecorder {
    driven: Vec<PortLines>,
}

impl PortOutputs for PortRecorder {
    fn drive(&mut self, lines: PortLines) {
        self.driven.push(lines);
    }
}

// =================================================================
// Menu
// =================================================================

#[test]
fn test_select_start_opens_and_closes_the_menu() {
    let shared = SharedState::new();
    let palette = PaletteTable::builtin();
    let mut script = open_menu();
    script.extend(open_menu());
    let bus = LcdSignal::new(|_, _| Pixel::new(0));

    let mut capture = CaptureContext::init(&shared, palette, bus, ScriptedPad::new(script), NoReset::default(), SteppingTimer::new(20_000));
    assert_eq!(shared.overlay.generation(), 1);

    assert_eq!(capture.tick(), None);
    assert_eq!(capture.tick(), Some(Command::ToggleMenu { enabled: true }));
    assert!(shared.overlay.is_enabled());
    assert_eq!(shared.overlay.generation(), 2);
    assert_eq!(capture.tick(), None);

    assert_eq!(capture.tick(), None);
    assert_eq!(capture.tick(), Some(Command::ToggleMenu { enabled: false }));
    assert!(!shared.overlay.is_enabled());
    assert_eq!(shared.overlay.generation(), 2);
}

#[test]
fn test_open_menu_is_composited_over_the_game() {
    let shared = SharedState::new();
    let palette = PaletteTable::builtin();
    let bus = LcdSignal::new(|_, _| Pixel::new(1));

    let mut capture = CaptureContext::init(&shared, palette, bus, ScriptedPad::new(open_menu()), NoReset::default(), SteppingTimer::new(20_000));
    for _ in 0..3 {
        capture.tick();
    }
    assert!(shared.overlay.is_enabled());
    assert_eq!(capture.interpreter().osd().line_text(0), b"PAL: BLACK WHITE  ");

    let row = OSD_Y + 3;
    let out = render_line(&shared, BORDER_VERT + row * PIXEL_SCALE + 1);
    for x in OSD_X..OSD_X + OSD_WIDTH {
        let expected = shared.overlay.pixel(x - OSD_X, row - OSD_Y) as u16;
        assert_eq!(out[BORDER_HORZ - 1 + x * PIXEL_SCALE + 1], expected);
    }
    assert_eq!(out[BORDER_HORZ - 1 + (OSD_X - 1) * PIXEL_SCALE], palette.get(1));
}

#[test]
fn test_menu_changes_palette_and_effect() {
    let shared = SharedState::new();
    let palette = PaletteTable::builtin();
    let mut script = open_menu();
    script.extend([
        held(&[Button::Right]),
        IDLE,
        held(&[Button::Down]),
        IDLE,
        held(&[Button::Right]),
        IDLE,
    ]);
    let bus = LcdSignal::new(|_, _| Pixel::new(2));

    let mut capture = CaptureContext::init(&shared, palette, bus, ScriptedPad::new(script), NoReset::default(), SteppingTimer::new(20_000));
    let commands: Vec<_> = (0..9).filter_map(|_| capture.tick()).collect();
    assert_eq!(
        commands,
        vec![
            Command::ToggleMenu { enabled: true },
            Command::CycleScheme { offset: 4 },
            Command::MoveLine { line: 1 },
            Command::CycleEffect,
        ]
    );
    assert_eq!(shared.settings.scheme_offset(), 4);
    assert_eq!(shared.settings.effect(), EffectMode::PixelEffect);
    assert_eq!(shared.settings.tint_color(), palette.get(4));

    // row 10 is above the menu; line 2 of its three is not an effect row
    let out = render_line(&shared, BORDER_VERT + 10 * PIXEL_SCALE + 1);
    let at = BORDER_HORZ - 1 + 20 * PIXEL_SCALE;
    assert_eq!(&out[at..at + 3], &[palette.get(6), palette.get(6), palette.get(4)]);
}

// =================================================================
// Controller port
// =================================================================

#[test]
fn test_port_is_silent_while_the_menu_is_open() {
    let shared = SharedState::new();
    let palette = PaletteTable::builtin();
    let bus = LcdSignal::new(|_, _| Pixel::new(0));
    let mut port = PortDriver::new(PortRecorder::default());

    let mut capture = CaptureContext::init(&shared, palette, bus, ScriptedPad::new(open_menu()), NoReset::default(), SteppingTimer::new(20_000));
    capture.tick();

    // Select and Start are held: the action half reflects them
    shared.edges.post(SelectEdge::DpadRising);
    port.service(&shared.edges, &shared.buttons, &shared.overlay);
    assert_eq!(
        port.outputs().driven.last(),
        Some(&(PortLines::all() - PortLines::UP_SELECT - PortLines::DOWN_START))
    );

    capture.tick();
    assert!(shared.overlay.is_enabled());
    let driven = port.outputs().driven.len();
    for edge in [SelectEdge::DpadFalling, SelectEdge::DpadRising, SelectEdge::OtherRising] {
        shared.edges.post(edge);
        port.service(&shared.edges, &shared.buttons, &shared.overlay);
    }
    assert_eq!(port.outputs().driven.len(), driven);
}
