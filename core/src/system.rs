//! Shared state and the two execution contexts.
//!
//! | Record          | Written by            | Read by                     |
//! |-----------------|-----------------------|-----------------------------|
//! | `frame`         | capture               | render                      |
//! | `settings`      | capture (menu)        | render                      |
//! | `overlay`       | capture (menu)        | render, port driver         |
//! | `buttons`       | capture (pad poll)    | capture (menu), port driver |
//! | `edges`         | select-line interrupt | port driver                 |
//! | `init`          | capture, once         | render, once                |
//!
//! Nothing here blocks except [`InitSignal::wait`], which the render context
//! calls once before its first line.

use core::convert::Infallible;
use core::sync::atomic::{AtomicBool, Ordering};

use log::{error, info, trace};

use crate::capture::capture_frame;
use crate::command::{Command, CommandInterpreter};
use crate::composer::ScanlineComposer;
use crate::error::VideoError;
use crate::framebuffer::FrameBuffer;
use crate::input::SharedButtons;
use crate::mux::{ControllerMux, EdgeSlot};
use crate::osd::{OsdRenderer, Overlay};
use crate::palette::PaletteTable;
use crate::pins::{ControllerLink, LcdBus, ResetLine, Timer};
use crate::settings::VideoSettings;
use crate::video::{Opcodes, VideoEngine};

/// One-shot start-up handshake.
pub struct InitSignal(AtomicBool);

impl InitSignal {
    pub const fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    pub fn release(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_released(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Spins until [`Self::release`] has been called.
    pub fn wait(&self) {
        while !self.is_released() {
            core::hint::spin_loop();
        }
    }
}

impl Default for InitSignal {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SharedState {
    pub frame: FrameBuffer,
    pub settings: VideoSettings,
    pub overlay: Overlay,
    pub buttons: SharedButtons,
    pub edges: EdgeSlot,
    pub init: InitSignal,
}

impl SharedState {
    pub const fn new() -> Self {
        Self {
            frame: FrameBuffer::new(),
            settings: VideoSettings::new(),
            overlay: Overlay::new(),
            buttons: SharedButtons::new(),
            edges: EdgeSlot::new(),
            init: InitSignal::new(),
        }
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Capture, pad poll and menu, in that order, forever.
pub struct CaptureContext<'a, B, L, R, T> {
    shared: &'a SharedState,
    bus: B,
    mux: ControllerMux<L>,
    interpreter: CommandInterpreter<'a, R>,
    timer: T,
    frames: u32,
}

impl<'a, B, L, R, T> CaptureContext<'a, B, L, R, T>
where
    B: LcdBus,
    L: ControllerLink,
    R: ResetLine,
    T: Timer,
{
    /// Sets up the menu and releases the render context.
    pub fn init(shared: &'a SharedState, palette: &'a PaletteTable, bus: B, link: L, reset: R, timer: T) -> Self {
        shared.settings.refresh_tint(palette);

        let osd = OsdRenderer::new(&shared.overlay);
        let mut interpreter = CommandInterpreter::new(osd, &shared.settings, palette, reset);
        interpreter.refresh_menu_text();
        interpreter.osd().render();

        let context = Self {
            shared,
            bus,
            mux: ControllerMux::new(link),
            interpreter,
            timer,
            frames: 0,
        };

        shared.init.release();
        info!(
            "capture context ready, scheme {}",
            palette.scheme_name(shared.settings.scheme_offset())
        );
        context
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn interpreter(&self) -> &CommandInterpreter<'a, R> {
        &self.interpreter
    }

    pub fn bus(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Captures one frame, polls the pad and runs the menu once.
    pub fn tick(&mut self) -> Option<Command> {
        let rows = capture_frame(&mut self.bus, &self.shared.frame);
        self.frames = self.frames.wrapping_add(1);
        trace!("frame {} ({} rows)", self.frames, rows);

        self.mux.poll(&mut self.timer, &self.shared.buttons);
        self.interpreter.evaluate(self.shared.buttons.load(), &mut self.timer)
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.tick();
        }
    }
}

/// Feeds composed lines to the video engine, forever.
pub struct RenderContext<'a, E> {
    shared: &'a SharedState,
    composer: ScanlineComposer<'a>,
    engine: E,
}

impl<'a, E: VideoEngine> RenderContext<'a, E> {
    /// Fails when the engine's line buffers cannot hold a full line.
    pub fn new(shared: &'a SharedState, palette: &'a PaletteTable, opcodes: Opcodes, engine: E) -> Result<Self, VideoError> {
        let needed = ScanlineComposer::required_words();
        let available = engine.max_scanline_words();
        if available < needed {
            error!("video engine buffers hold {} words, need {}", available, needed);
            return Err(VideoError::BufferTooSmall { needed, available });
        }

        let composer = ScanlineComposer::new(palette, &shared.frame, &shared.settings, &shared.overlay, opcodes);
        Ok(Self { shared, composer, engine })
    }

    pub fn engine(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Composes the line the engine asks for next. Returns the words used.
    pub fn tick(&mut self) -> Result<usize, VideoError> {
        let used = {
            let scanline = self.engine.begin_scanline();
            self.composer.compose(scanline.data, scanline.line)?
        };
        self.engine.end_scanline(used);
        Ok(used)
    }

    /// Waits for the capture context, then renders until a line fails.
    pub fn run(&mut self) -> Result<Infallible, VideoError> {
        self.shared.init.wait();
        info!("render context running");
        loop {
            if let Err(e) = self.tick() {
                error!("render stopped: {}", e);
                return Err(e);
            }
        }
    }
}
