//! Packed RGB565 color

/// 16-bit RGB565 color as sent to the panel (5 bits red, 6 green, 5 blue)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const BLUE: Self = Self(0x001F);
    pub const CYAN: Self = Self(0x07FF);
    pub const MAGENTA: Self = Self(0xF81F);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const ORANGE: Self = Self(0xFD20);
    pub const GRAY: Self = Self(0x8410);
    pub const DARK_GRAY: Self = Self(0x4208);
    pub const LIGHT_GRAY: Self = Self(0xC618);

    /// Pack 8-bit-per-channel RGB into RGB565
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        let r = (r as u16 >> 3) << 11;
        let g = (g as u16 >> 2) << 5;
        let b = b as u16 >> 3;
        Self(r | g | b)
    }

    /// Raw 16-bit value in panel byte order (big-endian on the wire)
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}
