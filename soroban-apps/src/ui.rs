//! Shared screen chrome
//!
//! Every app draws the same header bar and footer hint strip; the layout
//! constants here keep them consistent.

use soroban_display::{Align, DisplayError, Draw, FontSize, Rgb565};

/// Height of the title bar
pub const HEADER_HEIGHT: i16 = 40;

/// Height of the footer hint strip
pub const FOOTER_HEIGHT: i16 = 30;

/// Title bar across the top of the screen
pub fn header(display: &mut dyn Draw, title: &str) -> Result<(), DisplayError> {
    let (w, _) = display.size();
    display.fill_rect(0, 0, w as i16, HEADER_HEIGHT, Rgb565::DARK_GRAY)?;
    display.draw_text_aligned(
        w as i16 / 2,
        10,
        title,
        FontSize::Large,
        Align::Center,
        Rgb565::WHITE,
    )
}

/// Key hint strip across the bottom of the screen
pub fn footer(display: &mut dyn Draw, hint: &str) -> Result<(), DisplayError> {
    let (w, h) = display.size();
    let (w, h) = (w as i16, h as i16);
    display.fill_rect(0, h - FOOTER_HEIGHT, w, FOOTER_HEIGHT, Rgb565::DARK_GRAY)?;
    display.draw_text_aligned(
        w / 2,
        h - 20,
        hint,
        FontSize::Small,
        Align::Center,
        Rgb565::WHITE,
    )
}
