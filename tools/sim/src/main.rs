mod engine;
mod host;
mod pad;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use gbvga_core::config::{PIXELS_X, PIXELS_Y};
use gbvga_core::framebuffer::Pixel;
use gbvga_core::mux::{PortDriver, SelectEdge};
use gbvga_core::palette::{PaletteTable, SCHEME_SIZE};
use gbvga_core::settings::EffectMode;
use gbvga_core::synth::{LcdSignal, DEFAULT_BLANK_ROWS};
use gbvga_core::video::Opcodes;
use gbvga_core::{CaptureContext, RenderContext, SharedState};
use tracing::{debug, info, Level};
use tracing_subscriber::util::SubscriberInitExt;

use crate::engine::RecordingEngine;
use crate::host::{ConsolePort, HostTimer, LoggedReset};
use crate::pad::ScriptedPad;

/// How often a game scans its buttons.
const JOYPAD_SCAN: Duration = Duration::from_millis(16);

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Pattern {
    /// Vertical bars of all four shades
    Stripes,
    /// 8x8 checkerboard
    Checker,
    /// Shades stepping down the screen
    Gradient,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Effect {
    None,
    Pixel,
    Scanlines,
}

impl From<Effect> for EffectMode {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::None => EffectMode::None,
            Effect::Pixel => EffectMode::PixelEffect,
            Effect::Scanlines => EffectMode::Scanlines,
        }
    }
}

#[derive(Parser)]
#[command(name = "gbvga-sim")]
#[command(version, about = "Runs the Game Boy VGA bridge against a synthetic LCD", long_about = None)]
struct Cli {
    /// Number of output frames to render
    #[arg(short, long, default_value_t = 3)]
    frames: usize,

    /// PNG to write; `{n}` in the name writes every frame
    #[arg(short, long, default_value = "gbvga.png")]
    output: PathBuf,

    /// Test image fed into the LCD bus
    #[arg(short, long, value_enum, default_value_t = Pattern::Stripes)]
    pattern: Pattern,

    /// Colour scheme number
    #[arg(long, default_value_t = 2)]
    scheme: usize,

    #[arg(long, value_enum, default_value_t = Effect::None)]
    effect: Effect,

    /// Open the on-screen menu through the pad before capturing
    #[arg(long)]
    menu: bool,

    /// Emit frames four rows short to exercise the early frame end
    #[arg(long)]
    short_frames: bool,

    /// Render as fast as possible instead of at 60 Hz
    #[arg(long)]
    unpaced: bool,

    /// More logging, repeat for more
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .compact()
        .finish()
        .init();
}

fn stripes(x: usize, _: usize) -> Pixel {
    Pixel::new((x * 4 / PIXELS_X) as u8)
}

fn checker(x: usize, y: usize) -> Pixel {
    Pixel::new(((x / 8 + y / 8) % 2 * 3) as u8)
}

fn gradient(_: usize, y: usize) -> Pixel {
    Pixel::new((y * 4 / PIXELS_Y) as u8)
}

fn pattern_fn(pattern: Pattern) -> fn(usize, usize) -> Pixel {
    match pattern {
        Pattern::Stripes => stripes,
        Pattern::Checker => checker,
        Pattern::Gradient => gradient,
    }
}

fn frame_path(template: &Path, n: usize) -> Option<PathBuf> {
    let text = template.to_str()?;
    text.contains("{n}").then(|| PathBuf::from(text.replace("{n}", &n.to_string())))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let palette = PaletteTable::builtin();
    if cli.frames == 0 {
        bail!("--frames must be at least 1");
    }
    if cli.scheme >= palette.scheme_count() {
        bail!("--scheme must be below {}", palette.scheme_count());
    }

    let shared = SharedState::new();
    shared.settings.set_scheme_offset(palette, cli.scheme * SCHEME_SIZE);
    shared.settings.set_effect(cli.effect.into());
    info!(
        "scheme {} ({}), effect {}",
        cli.scheme,
        palette.scheme_name(shared.settings.scheme_offset()),
        shared.settings.effect().name()
    );

    let visible = if cli.short_frames { PIXELS_Y - 4 } else { PIXELS_Y };
    let bus = LcdSignal::new(pattern_fn(cli.pattern)).with_rows(visible, DEFAULT_BLANK_ROWS);
    let pad = if cli.menu { ScriptedPad::open_menu() } else { ScriptedPad::new([]) };

    let stop = AtomicBool::new(false);
    let (tx, rx) = crossbeam_channel::unbounded();

    std::thread::scope(|s| -> Result<()> {
        let capture = s.spawn(|| {
            let mut capture = CaptureContext::init(&shared, palette, bus, pad, LoggedReset::default(), HostTimer::new());
            while !stop.load(Ordering::Relaxed) {
                if let Some(command) = capture.tick() {
                    info!("menu: {:?}", command);
                }
            }
            capture.frames()
        });

        s.spawn(|| {
            let mut port = PortDriver::new(ConsolePort::new());
            let mut last = port.outputs().pressed();
            while !stop.load(Ordering::Relaxed) {
                for edge in [
                    SelectEdge::DpadFalling,
                    SelectEdge::DpadRising,
                    SelectEdge::OtherFalling,
                    SelectEdge::OtherRising,
                ] {
                    shared.edges.post(edge);
                    port.service(&shared.edges, &shared.buttons, &shared.overlay);
                    let pressed = port.outputs().pressed();
                    if pressed != last {
                        debug!("console sees {:?} after {:?}", pressed, edge);
                        last = pressed;
                    }
                }
                sleep(JOYPAD_SCAN);
            }
        });

        let render = s.spawn(|| -> Result<()> {
            let engine = RecordingEngine::new(Opcodes::DEFAULT, tx, !cli.unpaced);
            let mut render = RenderContext::new(&shared, palette, Opcodes::DEFAULT, engine)?;
            shared.init.wait();
            while !stop.load(Ordering::Relaxed) {
                render.tick()?;
            }
            Ok(())
        });

        let mut last = None;
        for n in 0..cli.frames {
            let frame = match rx.recv() {
                Ok(frame) => frame,
                Err(_) => break,
            };
            if let Some(path) = frame_path(&cli.output, n) {
                frame.save(&path).with_context(|| format!("writing {}", path.display()))?;
                info!("wrote {}", path.display());
            }
            last = Some(frame);
        }
        stop.store(true, Ordering::Relaxed);

        render.join().map_err(|_| anyhow!("render thread panicked"))??;
        let frames = capture.join().map_err(|_| anyhow!("capture thread panicked"))?;
        info!("captured {} source frames", frames);

        let last = last.ok_or_else(|| anyhow!("renderer stopped before the first frame"))?;
        if frame_path(&cli.output, 0).is_none() {
            last.save(&cli.output)
                .with_context(|| format!("writing {}", cli.output.display()))?;
            info!("wrote {}", cli.output.display());
        }
        Ok(())
    })
}
