//! Display backend for the 3.5" ST7365P panel

pub mod st7365p;

pub use st7365p::St7365p;
