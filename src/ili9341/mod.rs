//! ILI9341 controller family: 240x320 SPI panels.
//!
//! Plain 8-bit DCS commands with multi-byte parameter blocks; the default
//! [`Controller`] address-window encoding applies as-is.

use embedded_hal::delay::DelayNs;

use crate::controller::{run_sequence, Controller, InitCommand};
use crate::dcs::Dcs;
use crate::error::TransportError;
use crate::interface::Interface;

/// Vendor power/timing/gamma setup, applied after sleep-out.
const VENDOR_INIT: [InitCommand; 18] = [
    // Power control B
    InitCommand::new(0xCF, &[0x00, 0x83, 0x30]),
    // Power on sequence control
    InitCommand::new(0xED, &[0x64, 0x03, 0x12, 0x81]),
    // Driver timing control A
    InitCommand::new(0xE8, &[0x85, 0x01, 0x79]),
    // Power control A
    InitCommand::new(0xCB, &[0x39, 0x2C, 0x00, 0x34, 0x02]),
    // Pump ratio control
    InitCommand::new(0xF7, &[0x20]),
    // Driver timing control B
    InitCommand::new(0xEA, &[0x00, 0x00]),
    // Power control 1 and 2
    InitCommand::new(0xC0, &[0x26]),
    InitCommand::new(0xC1, &[0x11]),
    // VCOM control 1 and 2
    InitCommand::new(0xC5, &[0x35, 0x3E]),
    InitCommand::new(0xC7, &[0xBE]),
    // Frame rate control, normal mode
    InitCommand::new(0xB1, &[0x00, 0x1B]),
    // Enable 3G
    InitCommand::new(0xF2, &[0x08]),
    // Gamma set
    InitCommand::new(0x26, &[0x01]),
    // Positive gamma correction
    InitCommand::new(
        0xE0,
        &[
            0x1F, 0x1A, 0x18, 0x0A, 0x0F, 0x06, 0x45, 0x87, 0x32, 0x0A, 0x07, 0x02, 0x07, 0x05,
            0x00,
        ],
    ),
    // Negative gamma correction
    InitCommand::new(
        0xE1,
        &[
            0x00, 0x25, 0x27, 0x05, 0x10, 0x09, 0x3A, 0x78, 0x4D, 0x05, 0x18, 0x0D, 0x38, 0x3A,
            0x1F,
        ],
    ),
    // Entry mode set
    InitCommand::new(0xB7, &[0x07]),
    // Display function control
    InitCommand::new(0xB6, &[0x0A, 0x82, 0x27, 0x00]),
    // Tearing effect line on, v-blank only
    InitCommand::new(0x35, &[0x00]),
];

/// ILI9341 register protocol.
pub struct Ili9341;

impl Controller for Ili9341 {
    const MADCTL_FOR_ROTATION: [u8; 4] = [0x00, 0x20, 0xC0, 0xE0];

    fn init_sequence<I: Interface, D: DelayNs>(
        io: &mut I,
        delay: &mut D,
    ) -> Result<(), TransportError> {
        // The controller powers up in sleep mode; wake it before any setup.
        run_sequence(
            io,
            delay,
            &[InitCommand::with_delay(u16::from(Dcs::SLPOUT), &[], 100)],
        )?;
        run_sequence(io, delay, &VENDOR_INIT)
    }
}
