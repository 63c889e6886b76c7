//! RM68120 vendor register addresses.
//!
//! The controller exposes a page-switched register file. A 16-bit address is
//! the page register base plus the parameter index, so every parameter byte
//! gets its own address.

pub struct Reg;

impl Reg {
    /// Manufacture command set control, five sub-registers. The value of
    /// sub-register 4 selects the page.
    pub const PAGE_CTRL: u16 = 0xF000;

    /// Gamma correction tables, one 53-entry table per base.
    pub const GAMMA_BASES: [u16; 6] = [0xD100, 0xD200, 0xD300, 0xD400, 0xD500, 0xD600];
}

/// Page select values for `Reg::PAGE_CTRL` sub-register 4.
pub struct Page;

impl Page {
    pub const CMD: u8 = 0x00;
    pub const MFG1: u8 = 0x01;
    pub const MFG2: u8 = 0x02;
}
