//! RM68120 controller family: 480x800 panels behind a 16-bit 8080 bus.
//!
//! Commands are 16-bit register addresses: the DCS opcode shifted into the
//! high byte, with the low byte selecting the parameter index. CASET/RASET
//! therefore split into four single-byte sub-registers each.

mod cmd;

use embedded_hal::delay::DelayNs;

use crate::controller::{run_sequence, Controller, InitCommand};
use crate::dcs::Dcs;
use crate::error::TransportError;
use crate::interface::Interface;

use cmd::{Page, Reg};

/// Shared gamma curve, written to all six correction tables.
const GAMMA: [u8; 53] = [
    0x00, 0x00, 0x1b, 0x44, 0x62, 0x00, 0x7b, 0xa1, 0xc0, 0xee, 0x55, 0x10, 0x2c, 0x43, 0x57,
    0x55, 0x68, 0x78, 0x87, 0x94, 0x55, 0xa0, 0xac, 0xb6, 0xc1, 0x55, 0xcb, 0xcd, 0xd6, 0xdf,
    0x95, 0xe8, 0xf1, 0xfa, 0x02, 0xaa, 0x0b, 0x13, 0x1d, 0x26, 0xaa, 0x30, 0x3c, 0x4a, 0x63,
    0xea, 0x79, 0xa6, 0xd0, 0x20, 0x0f, 0x8e, 0xff,
];

/// Manufacture page 1: power rails, gamma voltages, VCOM.
/// 0xB603 instead of 0xB602 follows the vendor's reference stream.
const PAGE1_POWER: [(u16, u8); 28] = [
    (0xB000, 0x05),
    (0xB001, 0x05),
    (0xB002, 0x05),
    (0xB100, 0x05),
    (0xB101, 0x05),
    (0xB102, 0x05),
    (0xB600, 0x34),
    (0xB601, 0x34),
    (0xB603, 0x34),
    (0xB700, 0x24),
    (0xB701, 0x24),
    (0xB702, 0x24),
    (0xB800, 0x24),
    (0xB801, 0x24),
    (0xB802, 0x24),
    (0xBA00, 0x14),
    (0xBA01, 0x14),
    (0xBA02, 0x14),
    (0xB900, 0x24),
    (0xB901, 0x24),
    (0xB902, 0x24),
    (0xBC00, 0x00),
    (0xBC01, 0xA0),
    (0xBC02, 0x00),
    (0xBD00, 0x00),
    (0xBD01, 0xA0),
    (0xBD02, 0x00),
    (0xBE01, 0x3D),
];

/// Command page: display timing, source/gate control.
const PAGE0_DISPLAY: [(u16, u8); 15] = [
    (0xB400, 0x10),
    (0xBC00, 0x05),
    (0xBC01, 0x05),
    (0xBC02, 0x05),
    (0xB700, 0x22),
    (0xB701, 0x22),
    (0xC80B, 0x2A),
    (0xC80C, 0x2A),
    (0xC80F, 0x2A),
    (0xC810, 0x2A),
    (0xD000, 0x01),
    (0xB300, 0x10),
    (0xBD02, 0x07),
    (0xBE02, 0x07),
    (0xBF02, 0x07),
];

/// Manufacture page 2 oscillator/timing tweaks.
const PAGE2_TIMING: [(u16, u8); 3] = [(0xC301, 0xA9), (0xFE01, 0x94), (0xF600, 0x60)];

fn select_page<I: Interface>(io: &mut I, page: u8) -> Result<(), TransportError> {
    const UNLOCK: [u8; 4] = [0x55, 0xAA, 0x52, 0x08];
    for (i, &byte) in UNLOCK.iter().enumerate() {
        io.send_command(Reg::PAGE_CTRL + i as u16, &[byte])?;
    }
    io.send_command(Reg::PAGE_CTRL + 4, &[page])
}

fn write_pairs<I: Interface>(io: &mut I, pairs: &[(u16, u8)]) -> Result<(), TransportError> {
    for &(reg, value) in pairs {
        io.send_command(reg, &[value])?;
    }
    Ok(())
}

/// RM68120 register protocol.
pub struct Rm68120;

impl Controller for Rm68120 {
    const MADCTL_FOR_ROTATION: [u8; 4] = [0x00, 0x60, 0xC0, 0xA0];

    fn command(code: u8) -> u16 {
        u16::from(code) << 8
    }

    fn init_sequence<I: Interface, D: DelayNs>(
        io: &mut I,
        delay: &mut D,
    ) -> Result<(), TransportError> {
        select_page(io, Page::MFG1)?;
        for base in Reg::GAMMA_BASES {
            for (i, &value) in GAMMA.iter().enumerate() {
                io.send_command(base + i as u16, &[value])?;
            }
        }
        write_pairs(io, &PAGE1_POWER)?;

        select_page(io, Page::CMD)?;
        write_pairs(io, &PAGE0_DISPLAY)?;

        select_page(io, Page::MFG2)?;
        write_pairs(io, &PAGE2_TIMING)?;

        // Tearing effect line on, v-blank only.
        io.send_command(Self::command(Dcs::TEON), &[0x00])?;

        // The panel powers up asleep; wake it last and let it settle.
        run_sequence(
            io,
            delay,
            &[InitCommand::with_delay(Self::command(Dcs::SLPOUT), &[], 100)],
        )
    }

    /// Each window coordinate byte lands in its own sub-register.
    fn set_address_window<I: Interface>(
        io: &mut I,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
    ) -> Result<(), TransportError> {
        let caset = Self::command(Dcs::CASET);
        let raset = Self::command(Dcs::RASET);
        let (xe, ye) = (x1 - 1, y1 - 1);
        io.send_command(caset, &[(x0 >> 8) as u8])?;
        io.send_command(caset + 1, &[x0 as u8])?;
        io.send_command(caset + 2, &[(xe >> 8) as u8])?;
        io.send_command(caset + 3, &[xe as u8])?;
        io.send_command(raset, &[(y0 >> 8) as u8])?;
        io.send_command(raset + 1, &[y0 as u8])?;
        io.send_command(raset + 2, &[(ye >> 8) as u8])?;
        io.send_command(raset + 3, &[ye as u8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::Interface;
    use std::vec::Vec;

    #[derive(Default)]
    struct Recorder {
        commands: Vec<(u16, Vec<u8>)>,
    }

    impl Interface for Recorder {
        fn send_command(&mut self, command: u16, params: &[u8]) -> Result<(), TransportError> {
            self.commands.push((command, params.to_vec()));
            Ok(())
        }

        fn send_pixels(&mut self, _pixels: &[u8]) -> Result<(), TransportError> {
            Ok(())
        }

        fn max_transfer_size(&self) -> usize {
            4096
        }
    }

    #[test]
    fn commands_shift_into_high_byte() {
        assert_eq!(Rm68120::command(Dcs::RAMWR), 0x2C00);
        assert_eq!(Rm68120::command(Dcs::MADCTL), 0x3600);
    }

    #[test]
    fn window_splits_into_sub_registers() {
        let mut io = Recorder::default();
        Rm68120::set_address_window(&mut io, 0x0102, 0, 0x0304, 480).unwrap();
        assert_eq!(
            io.commands,
            vec![
                (0x2A00, vec![0x01]),
                (0x2A01, vec![0x02]),
                (0x2A02, vec![0x03]),
                (0x2A03, vec![0x03]),
                (0x2B00, vec![0x00]),
                (0x2B01, vec![0x00]),
                (0x2B02, vec![0x01]),
                (0x2B03, vec![0xDF]),
            ]
        );
    }

    #[test]
    fn init_writes_all_gamma_tables_and_wakes_last() {
        let mut io = Recorder::default();
        let mut delay = embedded_hal_mock::eh1::delay::NoopDelay;
        Rm68120::init_sequence(&mut io, &mut delay).unwrap();

        let gamma_writes = io
            .commands
            .iter()
            .filter(|(cmd, _)| (0xD100..0xD700).contains(cmd))
            .count();
        assert_eq!(gamma_writes, 6 * 53);
        assert_eq!(io.commands.last(), Some(&(0x1100, vec![])));
    }
}
