//! SPI transport: `SpiDevice` plus a data/command select line.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::error::{TransportError, TransportErrorKind};
use crate::interface::Interface;

/// Default transfer ceiling, sized for the DMA transaction pools the SPI
/// boards run with.
pub const DEFAULT_MAX_TRANSFER: usize = 4096;

/// How many bytes of the 16-bit command word go on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandWidth {
    /// Classic DCS controllers: low byte only.
    #[default]
    Bits8,
    /// Register-addressed controllers: big-endian 16-bit word.
    Bits16,
}

/// SPI bus transport.
///
/// `SpiDevice` scopes every write in its own claimed transaction, so a bus
/// shared with other peripherals (SD card on the same SPI host is common on
/// these boards) is released between transfers and nobody is starved.
pub struct SpiInterface<SPI, DC> {
    spi: SPI,
    /// Data/command select: low for commands, high for data.
    dc: DC,
    cmd_width: CommandWidth,
    max_transfer: usize,
}

impl<SPI, DC> SpiInterface<SPI, DC> {
    /// Creates a transport with the default transfer ceiling.
    pub fn new(spi: SPI, dc: DC, cmd_width: CommandWidth) -> Self {
        Self::with_max_transfer(spi, dc, cmd_width, DEFAULT_MAX_TRANSFER)
    }

    /// Creates a transport with an explicit transfer ceiling in bytes.
    pub fn with_max_transfer(
        spi: SPI,
        dc: DC,
        cmd_width: CommandWidth,
        max_transfer: usize,
    ) -> Self {
        SpiInterface {
            spi,
            dc,
            cmd_width,
            max_transfer,
        }
    }

    /// Releases the bus device and the DC pin.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> Interface for SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn send_command(&mut self, command: u16, params: &[u8]) -> Result<(), TransportError> {
        self.dc
            .set_low()
            .map_err(|_| TransportError::new(TransportErrorKind::Pin))?;
        let word = command.to_be_bytes();
        let cmd_bytes: &[u8] = match self.cmd_width {
            CommandWidth::Bits8 => &word[1..],
            CommandWidth::Bits16 => &word,
        };
        self.spi.write(cmd_bytes).map_err(|_| {
            log::error!("SPI write error for command 0x{:04X}", command);
            TransportError::new(TransportErrorKind::Bus)
        })?;
        if params.is_empty() {
            return Ok(());
        }
        self.dc
            .set_high()
            .map_err(|_| TransportError::new(TransportErrorKind::Pin))?;
        self.spi
            .write(params)
            .map_err(|_| TransportError::new(TransportErrorKind::Bus))
    }

    fn send_pixels(&mut self, pixels: &[u8]) -> Result<(), TransportError> {
        debug_assert!(pixels.len() <= self.max_transfer);
        self.dc
            .set_high()
            .map_err(|_| TransportError::new(TransportErrorKind::Pin))?;
        self.spi
            .write(pixels)
            .map_err(|_| TransportError::new(TransportErrorKind::Bus))
    }

    fn max_transfer_size(&self) -> usize {
        self.max_transfer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };
    use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};

    #[test]
    fn command_with_params_toggles_dc() {
        let spi_expect = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x2A]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x00, 0x10, 0x00, 0x63]),
            SpiTransaction::transaction_end(),
        ];
        let dc_expect = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut io = SpiInterface::new(
            SpiMock::new(&spi_expect),
            PinMock::new(&dc_expect),
            CommandWidth::Bits8,
        );
        io.send_command(0x2A, &[0x00, 0x10, 0x00, 0x63]).unwrap();
        let (mut spi, mut dc) = io.release();
        spi.done();
        dc.done();
    }

    #[test]
    fn wide_commands_send_both_bytes() {
        let spi_expect = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x2A, 0x01]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x42]),
            SpiTransaction::transaction_end(),
        ];
        let dc_expect = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut io = SpiInterface::new(
            SpiMock::new(&spi_expect),
            PinMock::new(&dc_expect),
            CommandWidth::Bits16,
        );
        io.send_command(0x2A01, &[0x42]).unwrap();
        let (mut spi, mut dc) = io.release();
        spi.done();
        dc.done();
    }

    #[test]
    fn pixels_go_out_with_dc_high() {
        let spi_expect = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xAA, 0x55, 0xAA, 0x55]),
            SpiTransaction::transaction_end(),
        ];
        let dc_expect = [PinTransaction::set(PinState::High)];
        let mut io = SpiInterface::new(
            SpiMock::new(&spi_expect),
            PinMock::new(&dc_expect),
            CommandWidth::Bits8,
        );
        io.send_pixels(&[0xAA, 0x55, 0xAA, 0x55]).unwrap();
        let (mut spi, mut dc) = io.release();
        spi.done();
        dc.done();
    }
}
