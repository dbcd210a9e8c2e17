//! In-memory display backend
//!
//! Backs the [`Draw`] trait with a plain pixel array so app rendering and
//! the boot animation can be exercised in host tests without hardware.

use crate::color::Rgb565;
use crate::draw::{DisplayError, Draw};

/// Framebuffer-backed [`Draw`] implementation, dimensions in const generics
///
/// Keep W/H small in tests; the real panel is driven directly and never
/// goes through this type.
pub struct FramebufferDisplay<const W: usize, const H: usize> {
    pixels: [[Rgb565; W]; H],
    presents: u32,
}

impl<const W: usize, const H: usize> FramebufferDisplay<W, H> {
    /// New buffer cleared to black
    pub fn new() -> Self {
        Self {
            pixels: [[Rgb565::BLACK; W]; H],
            presents: 0,
        }
    }

    /// Pixel at (x, y); panics out of range (test helper)
    pub fn pixel(&self, x: i16, y: i16) -> Rgb565 {
        self.pixels[y as usize][x as usize]
    }

    /// Number of pixels currently set to `color`
    pub fn count_of(&self, color: Rgb565) -> usize {
        self.pixels
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&p| p == color)
            .count()
    }

    /// How many times `present` has been called
    pub fn present_count(&self) -> u32 {
        self.presents
    }
}

impl<const W: usize, const H: usize> Default for FramebufferDisplay<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> Draw for FramebufferDisplay<W, H> {
    fn size(&self) -> (u16, u16) {
        (W as u16, H as u16)
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        for row in &mut self.pixels {
            row.fill(color);
        }
        Ok(())
    }

    fn draw_pixel(&mut self, x: i16, y: i16, color: Rgb565) -> Result<(), DisplayError> {
        if x >= 0 && y >= 0 && (x as usize) < W && (y as usize) < H {
            self.pixels[y as usize][x as usize] = color;
        }
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        if w <= 0 || h <= 0 {
            return Ok(());
        }
        let x0 = x.max(0) as usize;
        let y0 = y.max(0) as usize;
        let x1 = (x.saturating_add(w) as usize).min(W);
        let y1 = (y.saturating_add(h) as usize).min(H);
        for row in self.pixels.iter_mut().take(y1).skip(y0) {
            row[x0..x1.max(x0)].fill(color);
        }
        Ok(())
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        self.presents += 1;
        Ok(())
    }
}
