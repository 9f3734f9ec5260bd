//! # Select Lines
//!
//! The console scans its buttons by pulling P14 (d-pad) or P15 (buttons) low.
//! Edge boards answer from the `IO_IRQ_BANK0` handler: every latched edge is
//! posted to the shared [`EdgeSlot`] and serviced before the next one, so two
//! edges caught by one interrupt are both answered. Level boards poll the two
//! lines from their main loop instead.
//!
//! | Edge            | Lines driven            |
//! |-----------------|-------------------------|
//! | d-pad falling   | Right, Left, Up, Down   |
//! | d-pad rising    | A, B, Select, Start     |
//! | other falling   | nothing                 |
//! | other rising    | all released            |

use embedded_hal::digital::InputPin;
use rp2040_hal::gpio::Interrupt;

use gbvga_core::SharedState;
use gbvga_core::input::SharedButtons;
use gbvga_core::mux::{EdgeSlot, PortDriver, SelectEdge};
use gbvga_core::osd::Overlay;
use gbvga_core::pins::PortOutputs;

use crate::gpio::{SenseLine, SioPortOutputs};

bitflags::bitflags! {
    /// Edges latched on one pin since the last acknowledge.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct PinEvents: u8 {
        const EDGE_LOW  = 0b01;
        const EDGE_HIGH = 0b10;
    }
}

/// Select edges in `dpad` and `other`, in the order they are answered.
pub fn select_edges(dpad: PinEvents, other: PinEvents) -> impl Iterator<Item = SelectEdge> {
    [
        (dpad.contains(PinEvents::EDGE_LOW), SelectEdge::DpadFalling),
        (dpad.contains(PinEvents::EDGE_HIGH), SelectEdge::DpadRising),
        (other.contains(PinEvents::EDGE_LOW), SelectEdge::OtherFalling),
        (other.contains(PinEvents::EDGE_HIGH), SelectEdge::OtherRising),
    ]
    .into_iter()
    .filter_map(|(hit, edge)| hit.then_some(edge))
}

/// Drives the button lines from the shared pad snapshot.
pub struct PortResponder<'a, P> {
    port: PortDriver<P>,
    edges: &'a EdgeSlot,
    buttons: &'a SharedButtons,
    overlay: &'a Overlay,
}

impl<'a, P: PortOutputs> PortResponder<'a, P> {
    pub fn new(outputs: P, shared: &'a SharedState) -> Self {
        Self {
            port: PortDriver::new(outputs),
            edges: &shared.edges,
            buttons: &shared.buttons,
            overlay: &shared.overlay,
        }
    }

    pub fn outputs(&mut self) -> &mut P {
        self.port.outputs()
    }

    /// Answers every edge one interrupt latched.
    pub fn on_edges(&mut self, dpad: PinEvents, other: PinEvents) {
        for edge in select_edges(dpad, other) {
            self.edges.post(edge);
            self.port.service(self.edges, self.buttons, self.overlay);
        }
    }

    pub fn on_levels(&mut self, dpad_low: bool, other_low: bool) {
        self.port
            .react_levels(dpad_low, other_low, self.buttons.load(), self.overlay.is_enabled());
    }
}

/// P14 and P15 as inputs.
pub struct SelectInputs {
    dpad: SenseLine,
    other: SenseLine,
}

fn take_latched(line: &mut SenseLine) -> PinEvents {
    let mut events = PinEvents::empty();
    for (flag, irq) in [
        (PinEvents::EDGE_LOW, Interrupt::EdgeLow),
        (PinEvents::EDGE_HIGH, Interrupt::EdgeHigh),
    ] {
        if line.interrupt_status(irq) {
            line.clear_interrupt(irq);
            events |= flag;
        }
    }
    events
}

impl SelectInputs {
    pub fn new(dpad: SenseLine, other: SenseLine) -> Self {
        Self { dpad, other }
    }

    /// Enables both edge interrupts on both lines for the calling core.
    pub fn arm(&mut self) {
        for irq in [Interrupt::EdgeLow, Interrupt::EdgeHigh] {
            self.dpad.set_interrupt_enabled(irq, true);
            self.other.set_interrupt_enabled(irq, true);
        }
    }

    /// Latched edges of the d-pad and other line, cleared on return.
    pub fn take_events(&mut self) -> (PinEvents, PinEvents) {
        (take_latched(&mut self.dpad), take_latched(&mut self.other))
    }

    /// Whether each line is currently pulled low.
    pub fn levels_low(&mut self) -> (bool, bool) {
        let Ok(dpad) = self.dpad.is_low();
        let Ok(other) = self.other.is_low();
        (dpad, other)
    }
}

/// Select inputs plus the port they steer.
pub struct PortMux<'a> {
    select: SelectInputs,
    responder: PortResponder<'a, SioPortOutputs>,
}

impl<'a> PortMux<'a> {
    pub fn new(select: SelectInputs, outputs: SioPortOutputs, shared: &'a SharedState) -> Self {
        Self {
            select,
            responder: PortResponder::new(outputs, shared),
        }
    }

    /// Body of the `IO_IRQ_BANK0` handler.
    pub fn handle_irq(&mut self) {
        let (dpad, other) = self.select.take_events();
        self.responder.on_edges(dpad, other);
    }

    /// Main-loop body on boards that poll the select levels.
    pub fn poll_levels(&mut self) {
        let (dpad_low, other_low) = self.select.levels_low();
        self.responder.on_levels(dpad_low, other_low);
    }
}
