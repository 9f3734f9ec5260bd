use std::collections::VecDeque;

use gbvga_core::input::{Button, ButtonState};
use gbvga_core::pins::ControllerLink;
use tracing::debug;

/// NES pad replaying one button state per latch. The last state sticks.
pub struct ScriptedPad {
    script: VecDeque<ButtonState>,
    current: ButtonState,
    shifted: usize,
}

impl ScriptedPad {
    pub fn new(script: impl IntoIterator<Item = ButtonState>) -> Self {
        Self {
            script: script.into_iter().collect(),
            current: ButtonState::RELEASED,
            shifted: 0,
        }
    }

    /// Holds Select, taps Start, then lets go: opens the menu.
    pub fn open_menu() -> Self {
        let select = ButtonState::RELEASED.pressing(&[Button::Select]);
        Self::new([
            ButtonState::RELEASED,
            select,
            select.pressing(&[Button::Start]),
            select,
            ButtonState::RELEASED,
        ])
    }
}

impl ControllerLink for ScriptedPad {
    fn set_latch(&mut self, high: bool) {
        if !high {
            return;
        }
        if let Some(next) = self.script.pop_front() {
            if next != self.current {
                debug!("pad now {:08b}", next.0);
            }
            self.current = next;
        }
        self.shifted = 0;
    }

    fn set_pulse(&mut self, high: bool) {
        if !high {
            self.shifted += 1;
        }
    }

    fn read_data(&mut self) -> bool {
        // an unplugged pad floats high through the pull-up
        self.shifted >= 8 || (self.current.0 >> self.shifted) & 1 == 1
    }
}
