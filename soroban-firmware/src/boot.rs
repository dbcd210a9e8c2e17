//! Boot splash

use embassy_time::Timer;
use soroban_display::{Align, DisplayError, Draw, FontSize, Rgb565};

/// Animated splash shown once before the shell takes over
pub async fn splash(display: &mut dyn Draw) -> Result<(), DisplayError> {
    let (w, h) = display.size();
    let (cx, cy) = (w as i16 / 2, h as i16 / 2);

    display.clear(Rgb565::BLACK)?;
    display.draw_text_aligned(cx, cy - 30, "SOROBAN", FontSize::Large, Align::Center, Rgb565::CYAN)?;
    display.draw_text_aligned(
        cx,
        cy,
        "calculator++",
        FontSize::Small,
        Align::Center,
        Rgb565::GRAY,
    )?;

    // Expanding ring under the wordmark
    for r in (4..=40).step_by(4) {
        display.draw_circle(cx, cy + 50, r, Rgb565::BLUE)?;
        if r >= 12 {
            display.draw_circle(cx, cy + 50, r - 8, Rgb565::BLACK)?;
        }
        display.present()?;
        Timer::after_millis(40).await;
    }

    Ok(())
}
