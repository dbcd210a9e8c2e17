//! Drawing-primitive trait
//!
//! [`Draw`] is the object-safe surface apps render through. Concrete
//! backends only implement the pixel-level operations; lines, circles and
//! text are provided on top of them so a hardware driver stays small.
//!
//! Coordinates are signed: anything that falls outside the panel is clipped
//! silently by the backend, never reported as an error.

use crate::color::Rgb565;
use crate::font::{self, FontSize, GLYPH_COLS, GLYPH_ROWS};

/// Errors from a display backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// SPI/GPIO transfer failed
    Bus,
    /// Backend used before its init sequence ran
    NotInitialized,
}

/// Horizontal text anchoring at the given x
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Object-safe drawing surface
///
/// Backends implement [`size`](Draw::size), [`clear`](Draw::clear),
/// [`draw_pixel`](Draw::draw_pixel), [`fill_rect`](Draw::fill_rect) and
/// [`present`](Draw::present); the geometry and text methods have default
/// implementations in terms of those.
pub trait Draw {
    /// Panel dimensions in pixels (width, height)
    fn size(&self) -> (u16, u16);

    /// Fill the whole panel with one color
    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError>;

    /// Set a single pixel; out-of-range coordinates are clipped
    fn draw_pixel(&mut self, x: i16, y: i16, color: Rgb565) -> Result<(), DisplayError>;

    /// Fill an axis-aligned rectangle; clipped to the panel
    fn fill_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Rgb565)
        -> Result<(), DisplayError>;

    /// Make everything drawn so far visible
    ///
    /// A no-op for direct-drive panels without a framebuffer.
    fn present(&mut self) -> Result<(), DisplayError>;

    /// Bresenham line
    fn draw_line(
        &mut self,
        x0: i16,
        y0: i16,
        x1: i16,
        y1: i16,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        let (mut x, mut y) = (x0 as i32, y0 as i32);
        let (x1, y1) = (x1 as i32, y1 as i32);
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.draw_pixel(x as i16, y as i16, color)?;
            if x == x1 && y == y1 {
                return Ok(());
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Rectangle outline
    fn draw_rect(&mut self, x: i16, y: i16, w: i16, h: i16, color: Rgb565)
        -> Result<(), DisplayError> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        self.fill_rect(x, y, w, 1, color)?;
        self.fill_rect(x, y + h - 1, w, 1, color)?;
        self.fill_rect(x, y, 1, h, color)?;
        self.fill_rect(x + w - 1, y, 1, h, color)
    }

    /// Midpoint circle outline
    fn draw_circle(&mut self, cx: i16, cy: i16, r: i16, color: Rgb565)
        -> Result<(), DisplayError> {
        if r < 0 {
            return Ok(());
        }
        let mut x = r;
        let mut y = 0i16;
        let mut err = 1 - r;
        while x >= y {
            for (px, py) in [
                (cx + x, cy + y),
                (cx - x, cy + y),
                (cx + x, cy - y),
                (cx - x, cy - y),
                (cx + y, cy + x),
                (cx - y, cy + x),
                (cx + y, cy - x),
                (cx - y, cy - x),
            ] {
                self.draw_pixel(px, py, color)?;
            }
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
        Ok(())
    }

    /// Filled circle as horizontal spans
    fn fill_circle(&mut self, cx: i16, cy: i16, r: i16, color: Rgb565)
        -> Result<(), DisplayError> {
        if r < 0 {
            return Ok(());
        }
        let mut x = r;
        let mut y = 0i16;
        let mut err = 1 - r;
        while x >= y {
            self.fill_rect(cx - x, cy + y, 2 * x + 1, 1, color)?;
            self.fill_rect(cx - x, cy - y, 2 * x + 1, 1, color)?;
            self.fill_rect(cx - y, cy + x, 2 * y + 1, 1, color)?;
            self.fill_rect(cx - y, cy - x, 2 * y + 1, 1, color)?;
            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
        Ok(())
    }

    /// Draw text with its top-left corner at (x, y)
    fn draw_text(
        &mut self,
        x: i16,
        y: i16,
        text: &str,
        size: FontSize,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        let s = size.scale() as i16;
        let mut pen_x = x;
        for c in text.chars() {
            let columns = font::glyph(c);
            for (col, bits) in columns.iter().enumerate() {
                for row in 0..GLYPH_ROWS {
                    if bits & (1 << row) != 0 {
                        self.fill_rect(
                            pen_x + col as i16 * s,
                            y + row as i16 * s,
                            s,
                            s,
                            color,
                        )?;
                    }
                }
            }
            pen_x += (GLYPH_COLS as i16 + 1) * s;
        }
        Ok(())
    }

    /// Draw text horizontally anchored at x per `align`
    fn draw_text_aligned(
        &mut self,
        x: i16,
        y: i16,
        text: &str,
        size: FontSize,
        align: Align,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        let w = font::text_width(text, size) as i16;
        let x = match align {
            Align::Left => x,
            Align::Center => x - w / 2,
            Align::Right => x - w,
        };
        self.draw_text(x, y, text, size, color)
    }

    /// Rendered width of `text` in pixels
    fn text_width(&self, text: &str, size: FontSize) -> u16 {
        font::text_width(text, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::FramebufferDisplay;

    #[test]
    fn test_line_endpoints_set() {
        let mut fb = FramebufferDisplay::<32, 24>::new();
        fb.draw_line(1, 1, 10, 7, Rgb565::WHITE).unwrap();
        assert_eq!(fb.pixel(1, 1), Rgb565::WHITE);
        assert_eq!(fb.pixel(10, 7), Rgb565::WHITE);
    }

    #[test]
    fn test_rect_outline_leaves_interior() {
        let mut fb = FramebufferDisplay::<32, 24>::new();
        fb.draw_rect(2, 2, 6, 5, Rgb565::RED).unwrap();
        assert_eq!(fb.pixel(2, 2), Rgb565::RED);
        assert_eq!(fb.pixel(7, 6), Rgb565::RED);
        assert_eq!(fb.pixel(4, 4), Rgb565::BLACK);
    }

    #[test]
    fn test_fill_circle_covers_center() {
        let mut fb = FramebufferDisplay::<32, 24>::new();
        fb.fill_circle(10, 10, 4, Rgb565::BLUE).unwrap();
        assert_eq!(fb.pixel(10, 10), Rgb565::BLUE);
        assert_eq!(fb.pixel(10, 14), Rgb565::BLUE);
        assert_eq!(fb.pixel(10, 15), Rgb565::BLACK);
    }

    #[test]
    fn test_clipped_drawing_is_silent() {
        let mut fb = FramebufferDisplay::<32, 24>::new();
        fb.draw_line(-5, -5, 40, 40, Rgb565::WHITE).unwrap();
        fb.fill_rect(30, 22, 10, 10, Rgb565::WHITE).unwrap();
        assert_eq!(fb.pixel(0, 0), Rgb565::WHITE);
    }

    #[test]
    fn test_center_alignment() {
        let mut fb = FramebufferDisplay::<64, 24>::new();
        // "A" is 5px wide at Small, so centering at x=32 puts its column 0 at x=30
        fb.draw_text_aligned(32, 0, "A", FontSize::Small, Align::Center, Rgb565::WHITE)
            .unwrap();
        assert!((0..5).any(|dx| (0..7).any(|dy| fb.pixel(30 + dx, dy) == Rgb565::WHITE)));
        assert_eq!(fb.pixel(29, 3), Rgb565::BLACK);
    }
}
