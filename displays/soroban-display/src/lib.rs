//! Display abstraction for the Soroban handheld
//!
//! The panel is a 320x240 RGB565 TFT driven over SPI without a framebuffer:
//! apps draw through the [`Draw`] trait and the concrete driver pushes pixels
//! straight to the controller. Everything here is board-agnostic so app
//! rendering can be exercised on the host against [`FramebufferDisplay`].
//!
//! - [`Rgb565`] - packed 16-bit color with the stock palette
//! - [`FontSize`], [`Align`] - text metrics shared by all apps
//! - [`Draw`] - object-safe drawing-primitive trait
//! - [`FramebufferDisplay`] - in-memory backend for host tests

#![no_std]
#![deny(unsafe_code)]

pub mod buffer;
pub mod color;
pub mod draw;
pub mod font;

pub use buffer::FramebufferDisplay;
pub use color::Rgb565;
pub use draw::{Align, DisplayError, Draw};
pub use font::FontSize;

/// Panel width in pixels
pub const DISPLAY_WIDTH: u16 = 320;

/// Panel height in pixels
pub const DISPLAY_HEIGHT: u16 = 240;
