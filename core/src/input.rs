use core::sync::atomic::{AtomicU8, Ordering};

use bit_field::BitField;

/// NES pad buttons, in the order the pad shifts them out.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Button; 8] = [
        Button::A,
        Button::B,
        Button::Select,
        Button::Start,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Bit position in [`ButtonState`], equal to the shift order.
    pub const fn idx(&self) -> usize {
        match self {
            Button::A => 0,
            Button::B => 1,
            Button::Select => 2,
            Button::Start => 3,
            Button::Up => 4,
            Button::Down => 5,
            Button::Left => 6,
            Button::Right => 7,
        }
    }
}

/// Line levels of all eight buttons. A set bit is a high line, which means
/// released; pressed buttons pull their line low.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ButtonState(pub u8);

impl ButtonState {
    pub const RELEASED: ButtonState = ButtonState(0xFF);

    #[inline]
    pub fn level(self, button: Button) -> bool {
        self.0.get_bit(button.idx())
    }

    #[inline]
    pub fn is_pressed(self, button: Button) -> bool {
        !self.level(button)
    }

    #[inline]
    pub fn with_level(mut self, button: Button, high: bool) -> Self {
        self.0.set_bit(button.idx(), high);
        self
    }

    /// `self` with `buttons` held down.
    pub fn pressing(self, buttons: &[Button]) -> Self {
        buttons.iter().fold(self, |state, &button| state.with_level(button, false))
    }

    /// Held now, released in `previous`.
    #[inline]
    pub fn just_pressed(self, previous: ButtonState, button: Button) -> bool {
        self.is_pressed(button) && !previous.is_pressed(button)
    }

    /// Released now, held in `previous`.
    #[inline]
    pub fn just_released(self, previous: ButtonState, button: Button) -> bool {
        !self.is_pressed(button) && previous.is_pressed(button)
    }
}

impl Default for ButtonState {
    fn default() -> Self {
        Self::RELEASED
    }
}

/// Latest pad snapshot, written by the poller and read by the port driver
/// and the menu.
pub struct SharedButtons(AtomicU8);

impl SharedButtons {
    pub const fn new() -> Self {
        Self(AtomicU8::new(ButtonState::RELEASED.0))
    }

    #[inline(always)]
    pub fn load(&self) -> ButtonState {
        ButtonState(self.0.load(Ordering::Relaxed))
    }

    #[inline(always)]
    pub fn store(&self, state: ButtonState) {
        self.0.store(state.0, Ordering::Relaxed);
    }
}

impl Default for SharedButtons {
    fn default() -> Self {
        Self::new()
    }
}
