#![no_std]
#![allow(clippy::single_match)]

//! Core of the Game Boy to VGA bridge.
//!
//! Everything here runs on bare metal: the LCD bus decoder, the scanline
//! composer, the on-screen menu and the controller port multiplexer. Pins,
//! timers and the video engine are reached through the traits in [`pins`]
//! and [`video`], so the whole pipeline also runs on a host against the
//! [`synth`] signal source.

pub mod capture;
pub mod command;
pub mod composer;
pub mod config;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod input;
pub mod mux;
pub mod osd;
pub mod palette;
pub mod pins;
pub mod settings;
pub mod synth;
pub mod system;
pub mod video;

pub use error::VideoError;
pub use system::{CaptureContext, RenderContext, SharedState};
