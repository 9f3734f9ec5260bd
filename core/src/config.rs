//! Geometry and timing constants.
//!
//! The output mode is 640x480: a 160x144 source frame scaled 3x to a 480x432
//! play area, framed by 80 pixel side borders and 24 line top/bottom borders.

use crate::palette::{rgb, Color};

pub const PIXELS_X: usize = 160;
pub const PIXELS_Y: usize = 144;
pub const PIXEL_COUNT: usize = PIXELS_X * PIXELS_Y;

pub const PIXEL_SCALE: usize = 3;
pub const PLAY_WIDTH: usize = PIXELS_X * PIXEL_SCALE;
pub const PLAY_HEIGHT: usize = PIXELS_Y * PIXEL_SCALE;

pub const BORDER_HORZ: usize = 80;
pub const BORDER_VERT: usize = 24;

pub const OUTPUT_WIDTH: usize = BORDER_HORZ + PLAY_WIDTH + BORDER_HORZ;
pub const OUTPUT_HEIGHT: usize = BORDER_VERT + PLAY_HEIGHT + BORDER_VERT;

/// Shortest run the video engine accepts; run lengths are encoded as `len - MIN_RUN`.
pub const MIN_RUN: usize = 3;

/// Sub-pixel of each scaled column that PixelEffect tints.
pub const DIMMED_SUBPIXEL: usize = PIXEL_SCALE - 1;

pub const BORDER_COLOR: Color = rgb(0xFF, 0x00, 0x00);
/// First play pixel of every line, kept free for a downstream correction.
pub const FIRST_PIXEL_COLOR: Color = rgb(0x00, 0x00, 0x00);
/// Single pixel closing every line.
pub const LINE_END_COLOR: Color = 0;

pub const CONTROLLER_POLL_PERIOD_US: u32 = 20_000;
pub const CONTROLLER_STROBE_US: u32 = 25;
pub const RESET_PULSE_US: u32 = 100_000;

const _: () = assert!(OUTPUT_WIDTH == 640);
const _: () = assert!(OUTPUT_HEIGHT == 480);
const _: () = assert!(BORDER_VERT % PIXEL_SCALE == 0);
