//! One NES pad presented to the Game Boy as its button matrix.
//!
//! The console scans its buttons by pulling one of two select lines low and
//! reading four shared lines: with the d-pad select low it expects the
//! directions, with the other select low it expects A, B, Select and Start.
//! [`ControllerMux`] keeps a snapshot of the pad; [`PortDriver`] answers the
//! console's select edges from that snapshot.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::{CONTROLLER_POLL_PERIOD_US, CONTROLLER_STROBE_US};
use crate::input::{Button, ButtonState, SharedButtons};
use crate::osd::Overlay;
use crate::pins::{ControllerLink, PortLines, PortOutputs, Timer};

/// Reads the NES pad over its latch/pulse/data shift register.
pub struct ControllerMux<L> {
    link: L,
    last_poll_us: Option<u32>,
}

impl<L: ControllerLink> ControllerMux<L> {
    pub fn new(mut link: L) -> Self {
        link.set_latch(false);
        link.set_pulse(false);
        Self { link, last_poll_us: None }
    }

    pub fn link(&mut self) -> &mut L {
        &mut self.link
    }

    /// Shifts in all eight buttons if the poll period has elapsed since the
    /// last read. Returns whether a read happened.
    pub fn poll<T: Timer + ?Sized>(&mut self, timer: &mut T, buttons: &SharedButtons) -> bool {
        let now = timer.now_us();
        if let Some(last) = self.last_poll_us {
            if now.wrapping_sub(last) < CONTROLLER_POLL_PERIOD_US {
                return false;
            }
        }
        self.last_poll_us = Some(now);

        self.link.set_latch(true);
        timer.delay_us(CONTROLLER_STROBE_US);
        self.link.set_latch(false);
        timer.delay_us(CONTROLLER_STROBE_US);

        let mut state = ButtonState::RELEASED;
        for button in Button::ALL {
            state = state.with_level(button, self.link.read_data());

            self.link.set_pulse(true);
            timer.delay_us(CONTROLLER_STROBE_US);
            self.link.set_pulse(false);
            timer.delay_us(CONTROLLER_STROBE_US);
        }

        buttons.store(state);
        true
    }
}

/// Transitions of the console's two select lines.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum SelectEdge {
    DpadFalling = 1,
    DpadRising = 2,
    OtherFalling = 3,
    OtherRising = 4,
}

impl SelectEdge {
    const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(SelectEdge::DpadFalling),
            2 => Some(SelectEdge::DpadRising),
            3 => Some(SelectEdge::OtherFalling),
            4 => Some(SelectEdge::OtherRising),
            _ => None,
        }
    }
}

/// Single-slot mailbox between the edge interrupt and the port driver.
/// A newer edge replaces one that has not been taken yet.
pub struct EdgeSlot(AtomicU8);

impl EdgeSlot {
    pub const fn new() -> Self {
        Self(AtomicU8::new(0))
    }

    #[inline(always)]
    pub fn post(&self, edge: SelectEdge) {
        self.0.store(edge as u8, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn take(&self) -> Option<SelectEdge> {
        SelectEdge::from_u8(self.0.swap(0, Ordering::Relaxed))
    }
}

impl Default for EdgeSlot {
    fn default() -> Self {
        Self::new()
    }
}

fn lines(right_a: bool, left_b: bool, up_select: bool, down_start: bool) -> PortLines {
    let mut lines = PortLines::empty();
    lines.set(PortLines::RIGHT_A, right_a);
    lines.set(PortLines::LEFT_B, left_b);
    lines.set(PortLines::UP_SELECT, up_select);
    lines.set(PortLines::DOWN_START, down_start);
    lines
}

/// Output levels while the d-pad select is active.
pub fn direction_lines(state: ButtonState) -> PortLines {
    lines(
        state.level(Button::Right),
        state.level(Button::Left),
        state.level(Button::Up),
        state.level(Button::Down),
    )
}

/// Output levels while the button select is active.
pub fn action_lines(state: ButtonState) -> PortLines {
    lines(
        state.level(Button::A),
        state.level(Button::B),
        state.level(Button::Select),
        state.level(Button::Start),
    )
}

/// Drives the four Game Boy button lines.
pub struct PortDriver<P> {
    outputs: P,
}

impl<P: PortOutputs> PortDriver<P> {
    pub fn new(mut outputs: P) -> Self {
        outputs.drive(PortLines::all());
        Self { outputs }
    }

    pub fn outputs(&mut self) -> &mut P {
        &mut self.outputs
    }

    /// Answers one select edge. Nothing is driven while the menu is open so
    /// menu navigation does not reach the game.
    pub fn react(&mut self, edge: SelectEdge, buttons: ButtonState, osd_enabled: bool) {
        if osd_enabled {
            return;
        }
        match edge {
            SelectEdge::DpadFalling => self.outputs.drive(direction_lines(buttons)),
            SelectEdge::DpadRising => self.outputs.drive(action_lines(buttons)),
            SelectEdge::OtherRising => self.outputs.drive(PortLines::all()),
            SelectEdge::OtherFalling => {}
        }
    }

    /// Takes the latest edge from `slot`, if any, and answers it.
    pub fn service(&mut self, slot: &EdgeSlot, buttons: &SharedButtons, overlay: &Overlay) {
        if let Some(edge) = slot.take() {
            self.react(edge, buttons.load(), overlay.is_enabled());
        }
    }

    /// Level-polled variant for boards without select interrupts: a low
    /// d-pad select drives the directions, else a low button select drives
    /// the actions, else everything is released.
    pub fn react_levels(&mut self, dpad_low: bool, other_low: bool, buttons: ButtonState, osd_enabled: bool) {
        if osd_enabled {
            return;
        }
        let lines = if dpad_low {
            direction_lines(buttons)
        } else if other_low {
            action_lines(buttons)
        } else {
            PortLines::all()
        };
        self.outputs.drive(lines);
    }
}
