//! MIPI Display Command Set opcodes shared by the supported controllers.

use bitflags::bitflags;

/// Common DCS commands. Controller families map these onto their own command
/// encoding (ILI9341 sends them as-is, RM68120 shifts them into a 16-bit
/// register address).
pub struct Dcs;

impl Dcs {
    pub const NOP: u8 = 0x00;
    pub const SWRESET: u8 = 0x01;
    pub const SLPIN: u8 = 0x10;
    pub const SLPOUT: u8 = 0x11;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const TEON: u8 = 0x35;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

bitflags! {
    /// Memory Data Access Control register bits.
    ///
    /// Row/column order, row/column exchange and RGB/BGR order; the hardware
    /// mechanism behind rotation and mirroring.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Madctl: u8 {
        /// Row address order (MY).
        const MY = 0x80;
        /// Column address order (MX).
        const MX = 0x40;
        /// Row/column exchange (MV) - the hardware transpose bit.
        const MV = 0x20;
        /// Vertical refresh order (ML).
        const ML = 0x10;
        /// BGR color component order.
        const BGR = 0x08;
        /// Horizontal refresh order (MH).
        const MH = 0x04;
    }
}

/// COLMOD value for a given color depth. Both supported families use the
/// same encoding.
pub fn colmod_for_depth(bits_per_pixel: u8) -> Option<u8> {
    match bits_per_pixel {
        16 => Some(0x55),
        18 => Some(0x66),
        24 => Some(0x77),
        _ => None,
    }
}
