//! ST7365P TFT driver (320x240, RGB565 over SPI)
//!
//! Direct-drive: drawing writes straight into panel RAM through CASET /
//! RASET / RAMWR windows, so [`Draw::present`] is a no-op. Generic over
//! the blocking SPI bus and control pins so the panel driver itself
//! stays board-agnostic.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use soroban_display::{DisplayError, Draw, Rgb565, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Pixels streamed per RAMWR chunk
const CHUNK_PIXELS: usize = 32;

#[allow(dead_code)]
mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const INVON: u8 = 0x21;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// MADCTL value for landscape orientation (row/column exchange + BGR)
const MADCTL_LANDSCAPE: u8 = 0x68;

pub struct St7365p<SPI, DC, CS, RST, DELAY> {
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: RST,
    delay: DELAY,
    initialized: bool,
}

impl<SPI, DC, CS, RST, DELAY> St7365p<SPI, DC, CS, RST, DELAY>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: RST, delay: DELAY) -> Self {
        Self {
            spi,
            dc,
            cs,
            rst,
            delay,
            initialized: false,
        }
    }

    /// Hardware reset followed by the panel init sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_ms(10);
        self.rst.set_low().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_ms(10);
        self.rst.set_high().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_ms(120);

        self.command(cmd::SWRESET, &[])?;
        self.delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        self.delay.delay_ms(120);

        // 16 bpp
        self.command(cmd::COLMOD, &[0x55])?;
        self.command(cmd::MADCTL, &[MADCTL_LANDSCAPE])?;
        self.command(cmd::INVON, &[])?;
        self.command(cmd::DISPON, &[])?;
        self.delay.delay_ms(20);

        self.initialized = true;
        self.clear(Rgb565::BLACK)
    }

    fn command(&mut self, cmd: u8, args: &[u8]) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::Bus)?;
        self.dc.set_low().map_err(|_| DisplayError::Bus)?;
        self.spi.write(&[cmd]).map_err(|_| DisplayError::Bus)?;
        if !args.is_empty() {
            self.dc.set_high().map_err(|_| DisplayError::Bus)?;
            self.spi.write(args).map_err(|_| DisplayError::Bus)?;
        }
        self.cs.set_high().map_err(|_| DisplayError::Bus)?;
        Ok(())
    }

    /// Open a RAMWR window covering the inclusive pixel rectangle
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        let xa = x0.to_be_bytes();
        let xb = x1.to_be_bytes();
        let ya = y0.to_be_bytes();
        let yb = y1.to_be_bytes();
        self.command(cmd::CASET, &[xa[0], xa[1], xb[0], xb[1]])?;
        self.command(cmd::RASET, &[ya[0], ya[1], yb[0], yb[1]])
    }

    /// Stream `count` copies of one pixel into the open window
    fn write_pixels(&mut self, color: Rgb565, count: u32) -> Result<(), DisplayError> {
        let [hi, lo] = color.to_be_bytes();
        let mut chunk = [0u8; CHUNK_PIXELS * 2];
        for pair in chunk.chunks_exact_mut(2) {
            pair[0] = hi;
            pair[1] = lo;
        }

        self.cs.set_low().map_err(|_| DisplayError::Bus)?;
        self.dc.set_low().map_err(|_| DisplayError::Bus)?;
        self.spi
            .write(&[cmd::RAMWR])
            .map_err(|_| DisplayError::Bus)?;
        self.dc.set_high().map_err(|_| DisplayError::Bus)?;

        let mut remaining = count as usize;
        while remaining > 0 {
            let n = remaining.min(CHUNK_PIXELS);
            self.spi
                .write(&chunk[..n * 2])
                .map_err(|_| DisplayError::Bus)?;
            remaining -= n;
        }

        self.cs.set_high().map_err(|_| DisplayError::Bus)?;
        Ok(())
    }
}

impl<SPI, DC, CS, RST, DELAY> Draw for St7365p<SPI, DC, CS, RST, DELAY>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    fn size(&self) -> (u16, u16) {
        (DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError> {
        self.fill_rect(0, 0, DISPLAY_WIDTH as i16, DISPLAY_HEIGHT as i16, color)
    }

    fn draw_pixel(&mut self, x: i16, y: i16, color: Rgb565) -> Result<(), DisplayError> {
        self.fill_rect(x, y, 1, 1, color)
    }

    fn fill_rect(
        &mut self,
        x: i16,
        y: i16,
        w: i16,
        h: i16,
        color: Rgb565,
    ) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }

        // Clip to the panel; empty after clipping is not an error
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(DISPLAY_WIDTH as i16);
        let y1 = (y + h).min(DISPLAY_HEIGHT as i16);
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        self.set_window(x0 as u16, y0 as u16, (x1 - 1) as u16, (y1 - 1) as u16)?;
        let count = (x1 - x0) as u32 * (y1 - y0) as u32;
        self.write_pixels(color, count)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        // Direct-drive panel: pixels are visible as soon as they land
        Ok(())
    }
}
